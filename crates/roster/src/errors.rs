use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Timestamp formatting error: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error("Document {collection}/{id} must be a JSON object")]
    NotAnObject { collection: String, id: String },
}
