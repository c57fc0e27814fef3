use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error(
        "column '{column}' of category '{category}' has {actual} rows, expected {expected}"
    )]
    MisalignedColumn {
        category: String,
        column: String,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
