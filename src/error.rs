use thiserror::Error;

#[derive(Error, Debug)]
pub enum PennyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("No expense with ID {0}")]
    ExpenseNotFound(u64),

    #[error("Expense ID {0} is already in use")]
    DuplicateId(u64),

    #[error("No expense IDs left after {0}")]
    IdsExhausted(u64),
}

pub type Result<T> = std::result::Result<T, PennyError>;
