use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_dynamo::Error),

    #[error("DynamoDB error: {0}")]
    Database(String),

    #[error("storage error: {0}")]
    Storage(String),
}
