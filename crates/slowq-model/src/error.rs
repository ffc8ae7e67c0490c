use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid threshold: {0:?} is not an integer number of seconds")]
    InvalidThreshold(String),
    #[error("invalid threshold: {0:?} does not fit in a 64-bit number of seconds")]
    ThresholdOutOfRange(String),
    #[error("invalid threshold: {0} is negative")]
    NegativeThreshold(i64),
    #[error("cluster host list contains no endpoints")]
    EmptyEndpoints,
    #[error("malformed task: {0}")]
    MalformedTask(String),
}
