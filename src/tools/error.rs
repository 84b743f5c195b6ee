use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Store operation failed: {0}")]
    StoreFailed(String),
}
