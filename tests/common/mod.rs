#![allow(dead_code)]

pub mod pdf_assertions;

use inkflow::{HtmlRenderer, PipelineError, RenderConfig};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of one page (1-based).
    pub fn page_text(&self, page: u32) -> String {
        self.doc.extract_text(&[page]).unwrap_or_default()
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

pub fn render_html(markup: &str) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    render_html_with_config(markup, RenderConfig::default())
}

pub fn render_html_with_config(
    markup: &str,
    config: RenderConfig,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    render_with(&HtmlRenderer::new(config), markup)
}

pub fn render_with(
    renderer: &HtmlRenderer,
    markup: &str,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let _ = env_logger::builder().is_test(true).try_init();
    let bytes = renderer.render(markup)?;
    GeneratedPdf::from_bytes(bytes)
}

/// Renders expecting failure.
pub fn render_error(markup: &str) -> PipelineError {
    match HtmlRenderer::new(RenderConfig::default()).render(markup) {
        Ok(_) => panic!("expected rendering to fail"),
        Err(e) => e,
    }
}
