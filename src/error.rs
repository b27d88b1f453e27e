use inkflow_traits::WriterError;
use thiserror::Error;

/// Everything that can go wrong between reading markup and producing PDF bytes.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed markup: {0}")]
    Markup(#[from] quick_xml::Error),

    #[error("Writing failed: {0}")]
    Writer(#[from] WriterError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<quick_xml::events::attributes::AttrError> for PipelineError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        PipelineError::Markup(quick_xml::Error::InvalidAttr(e))
    }
}
