#[derive(Debug, thiserror::Error)]
pub enum CharzError {
    #[error("lack function test config field '{0}'")]
    LackFunctionTestConfigField(&'static str),

    #[error("unsupported function test policy '{0}'")]
    UnsupportedPolicy(String),

    #[error("operation {index} did not assert ready after {cycles} cycles")]
    NotReadyAfterOperation { index: usize, cycles: usize },
}
