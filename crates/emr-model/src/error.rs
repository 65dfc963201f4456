use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("likert item {item} has score {score}; expected 1-5")]
    LikertOutOfRange { item: usize, score: u8 },
    #[error("row {row} is out of range for a dataset with {len} records")]
    RowOutOfRange { row: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
