use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("document {source_name} is unreadable: {reason}")]
    DocumentUnreadable { source_name: String, reason: String },

    #[error("page text tool '{tool}' is not available")]
    ToolUnavailable { tool: String },
}

impl IngestError {
    pub fn unreadable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::DocumentUnreadable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
