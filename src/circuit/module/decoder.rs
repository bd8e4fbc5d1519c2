use derive_new::new;
use crate::{check_arg, circuit::{bits_to_usize, usize_to_bits, Bits, CircuitResult, SelectVector}};

const MAX_SIMPLE_INPUT_SIZE: usize = 4;
const MIN_INPUT_SIZE: usize = 1;
pub const MAX_INPUT_SIZE: usize = 12;
const SUB_DECODERS_INPUT_SIZES: [&'static [usize]; 8] = [
    &[2, 3],
    &[3, 3],
    &[3, 4],
    &[4, 4],
    &[3, 3, 3],
    &[3, 3, 4],
    &[3, 4, 4],
    &[4, 4, 4],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct DecoderArg {
    pub input_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderType {
    OneAddr,
    Simple,
    Component,
}

impl DecoderArg {
    pub fn kind(&self) -> DecoderType {
        match self.input_size {
            1 => DecoderType::OneAddr,
            i if i <= MAX_SIMPLE_INPUT_SIZE => DecoderType::Simple,
            _ => DecoderType::Component,
        }
    }

    pub fn output_size(&self) -> usize {
        2usize.pow(self.input_size as u32)
    }
}

/// Binary address to one-hot select lines.
///
/// Wide decoders are built from a predecode stage: the address is split into
/// fields, each field is decoded by a small sub-decoder, and every output ANDs
/// one line from each sub-decoder. Enable gates the final AND stage, so a
/// disabled decoder drives no line at all.
#[derive(Debug, Clone)]
pub struct Decoder {
    pub args: DecoderArg,
    sub_decoders: Vec<Decoder>,
}

impl Decoder {
    pub fn new(args: DecoderArg) -> CircuitResult<Self> {
        check_arg!(args.input_size >= MIN_INPUT_SIZE, "Input size '{}' < {}", args.input_size, MIN_INPUT_SIZE);
        check_arg!(args.input_size <= MAX_INPUT_SIZE, "Input size '{}' > {}", args.input_size, MAX_INPUT_SIZE);

        let sub_decoders = match args.kind() {
            DecoderType::Component => {
                Self::sub_decoders_input_size(args.input_size)
                    .iter()
                    .map(|&size| Decoder::new(DecoderArg::new(size)))
                    .collect::<CircuitResult<Vec<_>>>()?
            }
            _ => vec![],
        };

        Ok(Self { args, sub_decoders })
    }

    pub fn input_size(&self) -> usize {
        self.args.input_size
    }

    pub fn output_size(&self) -> usize {
        self.args.output_size()
    }

    /// Decode `address`. Bits above the input width are ignored.
    pub fn decode(&self, address: usize, enable: bool) -> SelectVector {
        let address = usize_to_bits(address, self.args.input_size);
        let lines = match self.args.kind() {
            DecoderType::OneAddr => self.decode_one_addr(&address, enable),
            DecoderType::Simple => self.decode_simple(&address, enable),
            DecoderType::Component => self.decode_component(&address, enable),
        };
        SelectVector::from_decoded(lines)
    }

    fn decode_one_addr(&self, address: &[bool], enable: bool) -> Bits {
        let a0 = address[0];
        vec![enable && !a0, enable && a0]
    }

    fn decode_simple(&self, address: &[bool], enable: bool) -> Bits {
        // AND gate 'i' takes Aj when bit 'j' of 'i' is one, Aj_bar otherwise.
        // i == 000 -> [A0_bar, A1_bar, A2_bar], i == 010 -> [A0_bar, A1, A2_bar]
        (0..self.output_size())
            .map(|i| {
                enable && address.iter().enumerate().all(|(j, &a)| {
                    let bit_one = ((i >> j) & 0x1) != 0;
                    if bit_one { a } else { !a }
                })
            })
            .collect()
    }

    fn decode_component(&self, address: &[bool], enable: bool) -> Bits {
        // Predecode: every sub-decoder sees its own slice of the address
        let mut predecoded = Vec::with_capacity(self.sub_decoders.len());
        let mut global_input_index = 0;
        for sub_decoder in self.sub_decoders.iter() {
            let sub_input_size = sub_decoder.input_size();
            let field = &address[global_input_index..global_input_index + sub_input_size];
            predecoded.push(sub_decoder.decode(bits_to_usize(field), true));
            global_input_index += sub_input_size;
        }

        // Output 'i' picks line `(i >> prefix_sum) & mask` from each sub-decoder
        (0..self.output_size())
            .map(|and_index| {
                let mut prefix_sum = 0;
                let mut output = enable;
                for lines in predecoded.iter() {
                    let sub_input_size = lines.len().trailing_zeros() as usize;
                    let mask = (1usize << sub_input_size) - 1;
                    output &= lines.is_selected((and_index >> prefix_sum) & mask);
                    prefix_sum += sub_input_size;
                }
                output
            })
            .collect()
    }

    fn sub_decoders_input_size(input_size: usize) -> &'static [usize] {
        SUB_DECODERS_INPUT_SIZES[input_size - 1 - MAX_SIMPLE_INPUT_SIZE]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoder_kind() {
        assert_eq!(DecoderArg::new(1).kind(), DecoderType::OneAddr);
        assert_eq!(DecoderArg::new(4).kind(), DecoderType::Simple);
        assert_eq!(DecoderArg::new(6).kind(), DecoderType::Component);
    }

    #[test]
    fn test_sub_decoder_split() {
        for input_size in (MAX_SIMPLE_INPUT_SIZE + 1)..=MAX_INPUT_SIZE {
            let total: usize = Decoder::sub_decoders_input_size(input_size).iter().sum();
            assert_eq!(total, input_size);
        }
    }

    #[test]
    fn test_invalid_input_size() {
        assert!(Decoder::new(DecoderArg::new(0)).is_err());
        assert!(Decoder::new(DecoderArg::new(MAX_INPUT_SIZE + 1)).is_err());
    }
}
