//! inkflow renders HTML-like markup to PDF.
//!
//! The markup is read into open/text/close events that drive the flow engine in
//! `inkflow-layout`. The engine resolves styles through the cascade in `inkflow-style`
//! and hands styled runs to a `DocumentWriter`. `HtmlRenderer` wires that chain to the
//! lopdf-backed `PdfWriter`.
//!
//! ```no_run
//! use inkflow::{HtmlRenderer, RenderConfig};
//!
//! let renderer = HtmlRenderer::new(RenderConfig::default());
//! let pdf = renderer.render("<h1>Hello</h1><p>From <b>inkflow</b></p>")?;
//! std::fs::write("hello.pdf", pdf)?;
//! # Ok::<(), inkflow::PipelineError>(())
//! ```

pub mod config;
pub mod error;
pub mod markup;
pub mod pdf;

pub use config::{PageLayout, RenderConfig};
pub use error::PipelineError;
pub use pdf::PdfWriter;

pub use inkflow_layout::{Attributes, FlowRenderer};
pub use inkflow_traits::{
    CallbackRegistry, Canvas, DocumentWriter, Fragment, TextCallback, WriterError,
};

use inkflow_style::TextStyles;
use std::path::Path;
use std::sync::Arc;

pub struct HtmlRenderer {
    config: RenderConfig,
    callbacks: CallbackRegistry,
}

impl HtmlRenderer {
    /// A renderer with the built-in `highlight` callback registered.
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            callbacks: inkflow_layout::default_registry(),
        }
    }

    /// Registers a callback that runs can select with `callback: <name>`.
    pub fn with_callback<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&TextStyles) -> Arc<dyn TextCallback> + Send + Sync + 'static,
    {
        self.callbacks.register(name, factory);
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Drives any writer with `markup`, returning it once the flow is flushed.
    pub fn render_with<W: DocumentWriter>(
        &self,
        markup: &str,
        writer: W,
    ) -> Result<W, PipelineError> {
        let mut renderer = FlowRenderer::with_callbacks(writer, self.callbacks.clone());
        markup::drive(markup, &mut renderer, &self.config.element_styles)?;
        Ok(renderer.finish()?)
    }

    pub fn render(&self, markup: &str) -> Result<Vec<u8>, PipelineError> {
        let writer = self.render_with(markup, PdfWriter::new(&self.config))?;
        Ok(writer.finish()?)
    }

    pub fn render_to_file(
        &self,
        markup: &str,
        path: impl AsRef<Path>,
    ) -> Result<(), PipelineError> {
        let bytes = self.render(markup)?;
        std::fs::write(path.as_ref(), bytes)?;
        log::info!("Wrote {}", path.as_ref().display());
        Ok(())
    }
}
