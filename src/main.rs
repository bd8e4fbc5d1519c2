use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use tracing::{info, Level};
use clap::Parser;
use sramctl::{
    charz::function::{policy_by_name, FunctionTestBuilder},
    circuit::{Sram, SramArg, Word},
    ErrorContext, SramError, SramResult,
};

fn main_result() -> SramResult<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.level())
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    // load config
    let config: Config = {
        let context = std::fs::read_to_string(&args.config).context("read config file")?;
        serde_json::from_str(&context).context("parse config file")?
    };
    config.sram.check()?;

    // scripted operations
    if !config.operations.is_empty() {
        let mut sram = Sram::new(config.sram)?;
        for operation in config.operations.iter() {
            match *operation {
                Operation::Write { address, word } => {
                    sram.write(address, word)?;
                    info!("write 0x{:x} -> 0x{:03x}", config.sram.mask_word(word), config.sram.mask_address(address));
                }
                Operation::Read { address } => {
                    let word = sram.read(address)?;
                    info!("read 0x{:03x} -> 0x{:x}", config.sram.mask_address(address), word);
                }
            }
        }
        info!("{} operations in {} cycles", config.operations.len(), sram.cycles());
    }

    // functional test
    if let Some(function_test) = &config.function_test {
        let mut builder = FunctionTestBuilder::default()
            .sram(config.sram)
            .policy_box(policy_by_name(&function_test.policy)?)
            .back_to_back(function_test.back_to_back);
        if let Some(seed) = function_test.seed {
            builder = builder.seed(seed);
        }

        let result = builder.build()?.test()?;
        info!("{} transactions, {} cycles", result.transaction_size, result.cycles);
        if !result.passed() {
            return Err(SramError::msg(format!("functional test failed in {} of {} checks", result.failed_size, result.read_size)));
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = main_result() {
        eprintln!("Err: {}", e);
        std::process::exit(1);
    }
}

/// Cycle-level SRAM control plane model
#[derive(Parser, Debug)]
#[command(name = "sramctl")]
#[command(about = "Run operations and functional tests on an SRAM control model", long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    pub fn level(&self) -> Level {
        if self.verbose { Level::DEBUG } else { Level::INFO }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub sram: SramArg,

    #[serde(default)]
    pub operations: Vec<Operation>,

    pub function_test: Option<FunctionTestConfig>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Write { address: usize, word: Word },
    Read { address: usize },
}

#[derive(Debug, Deserialize, Serialize)]
pub struct FunctionTestConfig {
    policy: String,

    #[serde(default)]
    seed: Option<u64>,

    #[serde(default)]
    back_to_back: bool,
}
