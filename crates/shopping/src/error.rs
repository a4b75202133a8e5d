#[derive(Debug, thiserror::Error)]
pub enum ShoppingError {
    #[error("resource not found: font {0}")]
    MissingFont(String),

    #[error("invalid font resource: {0}")]
    InvalidFont(String),

    #[error("no renderer registered for {0}")]
    MissingRenderer(crate::ExportFormat),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Store(#[from] foodgram_shared::Error),
}

pub type Result<T> = std::result::Result<T, ShoppingError>;

impl From<sqlx::Error> for ShoppingError {
    fn from(value: sqlx::Error) -> Self {
        Self::Store(value.into())
    }
}
