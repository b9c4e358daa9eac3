use studynotes_llm::LlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotesError {
    #[error("No text available for summarization.")]
    EmptyInput,

    #[error("Model service unreachable: {0}")]
    ServiceUnreachable(String),

    #[error("Model service timed out: {0}")]
    ServiceTimeout(String),

    #[error("Model service request failed: {0}")]
    ServiceRequestFailed(String),

    #[error("Unsupported file type '{0}'. Please upload a TXT or Markdown file.")]
    UnsupportedFormat(String),

    #[error("No readable text found in file.")]
    NoReadableText,

    #[error("Note cache error: {0}")]
    Cache(String),
}

impl NotesError {
    /// Failures a caller may retry after backing off.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            NotesError::ServiceUnreachable(_) | NotesError::ServiceTimeout(_)
        )
    }

    /// Failures caused by the submitted content rather than the system.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            NotesError::EmptyInput | NotesError::UnsupportedFormat(_) | NotesError::NoReadableText
        )
    }
}

impl From<LlmError> for NotesError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Unreachable { .. } => NotesError::ServiceUnreachable(err.to_string()),
            LlmError::Timeout { .. } => NotesError::ServiceTimeout(err.to_string()),
            LlmError::ApiError { .. } | LlmError::HttpError(_) | LlmError::ParseError(_) => {
                NotesError::ServiceRequestFailed(err.to_string())
            }
        }
    }
}

impl From<std::io::Error> for NotesError {
    fn from(err: std::io::Error) -> Self {
        NotesError::Cache(err.to_string())
    }
}
