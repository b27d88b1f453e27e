//! The contract between the flow engine and a page-painting backend.
//!
//! The engine never measures glyphs or tracks page geometry. It only asks the writer to
//! move its cursor down, start pages, and place runs of styled text. Everything about
//! wrapping and painting stays behind this trait.

use crate::callback::TextCallback;
use inkflow_style::{TextAlign, TextStyles};
use inkflow_types::{BoundingBox, Color, Size};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum WriterError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Failed to load resource '{path}': {message}")]
    Resource { path: String, message: String },

    #[error("Unsupported image format: {0}")]
    UnsupportedImage(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for WriterError {
    fn from(err: std::io::Error) -> Self {
        WriterError::Io(err.to_string())
    }
}

/// One styled piece of text handed to `DocumentWriter::put`.
#[derive(Debug, Clone)]
pub struct TextRun {
    pub text: String,
    pub styles: TextStyles,
    /// Resolved from `styles.callback` at flush time.
    pub callback: Option<Arc<dyn TextCallback>>,
}

impl TextRun {
    pub fn new(text: impl Into<String>, styles: TextStyles) -> Self {
        Self {
            text: text.into(),
            styles,
            callback: None,
        }
    }
}

/// Paragraph options for one `put`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PutOptions {
    pub align: Option<TextAlign>,
    pub leading: Option<f32>,
    pub padding_left: f32,
    /// Left indent of every line; `None` when the block has no left spacing.
    pub indent_paragraphs: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleOptions {
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageOptions {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub align: Option<TextAlign>,
}

pub trait DocumentWriter {
    /// Moves the cursor down by `amount` points.
    fn advance_cursor(&mut self, amount: f32) -> Result<(), WriterError>;

    fn start_new_page(&mut self) -> Result<(), WriterError>;

    /// Places `runs` as one paragraph. Without a bounding box the writer flows the text
    /// at its cursor; with one, the text starts at the box's top-left corner.
    fn put(
        &mut self,
        runs: &[TextRun],
        options: &PutOptions,
        bounding_box: Option<&BoundingBox>,
    ) -> Result<(), WriterError>;

    /// Width and height of the content area.
    fn bounds(&self) -> Size;

    fn horizontal_rule(&mut self, _options: &RuleOptions) -> Result<(), WriterError> {
        Ok(())
    }

    fn image(&mut self, _src: &str, _options: &ImageOptions) -> Result<(), WriterError> {
        Ok(())
    }
}

impl<W: DocumentWriter + ?Sized> DocumentWriter for &mut W {
    fn advance_cursor(&mut self, amount: f32) -> Result<(), WriterError> {
        (**self).advance_cursor(amount)
    }

    fn start_new_page(&mut self) -> Result<(), WriterError> {
        (**self).start_new_page()
    }

    fn put(
        &mut self,
        runs: &[TextRun],
        options: &PutOptions,
        bounding_box: Option<&BoundingBox>,
    ) -> Result<(), WriterError> {
        (**self).put(runs, options, bounding_box)
    }

    fn bounds(&self) -> Size {
        (**self).bounds()
    }

    fn horizontal_rule(&mut self, options: &RuleOptions) -> Result<(), WriterError> {
        (**self).horizontal_rule(options)
    }

    fn image(&mut self, src: &str, options: &ImageOptions) -> Result<(), WriterError> {
        (**self).image(src, options)
    }
}
