//! Render configuration, loaded from JSON.
//!
//! ```json
//! {
//!   "page": { "size": "Letter", "margins": "36pt 48pt" },
//!   "baseFontSize": 11,
//!   "baseFont": "Times",
//!   "elementStyles": { "h1": "color: #333366", "p": "line-height: 2" },
//!   "resourceDir": "assets"
//! }
//! ```

use crate::error::PipelineError;
use inkflow_style::{Margins, PageSize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageLayout {
    pub size: PageSize,
    pub margins: Margins,
}

impl PageLayout {
    /// Width and height of the area inside the margins.
    pub fn content_size(&self) -> (f32, f32) {
        let (width, height) = self.size.dimensions_pt();
        (
            width - self.margins.horizontal(),
            height - self.margins.vertical(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub page: PageLayout,
    pub base_font_size: f32,
    pub base_font: String,
    /// Tag name to declarations applied to every element of that tag, ahead of its
    /// `style` attribute.
    pub element_styles: HashMap<String, String>,
    /// Base directory for relative image sources.
    pub resource_dir: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page: PageLayout::default(),
            base_font_size: 12.0,
            base_font: "Helvetica".to_string(),
            element_styles: HashMap::new(),
            resource_dir: None,
        }
    }
}

impl RenderConfig {
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validated()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let mut config = Self::from_json_str(&json)?;
        // Relative resource directories are relative to the config file.
        if let (Some(dir), Some(parent)) = (&config.resource_dir, path.parent()) {
            if dir.is_relative() {
                config.resource_dir = Some(parent.join(dir));
            }
        }
        Ok(config)
    }

    /// The declarations configured for `tag`, or `""`.
    pub fn element_style(&self, tag: &str) -> &str {
        self.element_styles
            .get(tag)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Checks the page geometry and lower-cases `elementStyles` keys.
    pub fn validated(mut self) -> Result<Self, PipelineError> {
        if !(self.base_font_size > 0.0) {
            return Err(PipelineError::Config(format!(
                "baseFontSize must be positive, got {}",
                self.base_font_size
            )));
        }
        let (width, height) = self.page.content_size();
        if width <= 0.0 || height <= 0.0 {
            return Err(PipelineError::Config(format!(
                "page margins leave no content area ({}x{}pt)",
                width, height
            )));
        }
        self.element_styles = self
            .element_styles
            .into_iter()
            .map(|(tag, styles)| (tag.to_ascii_lowercase(), styles))
            .collect();
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RenderConfig::default());
        assert_eq!(config.page.size, PageSize::A4);
        assert_eq!(config.page.margins, Margins::all(36.0));
        assert_eq!(config.base_font_size, 12.0);
    }

    #[test]
    fn test_full_config() {
        let config = RenderConfig::from_json_str(
            r#"{
                "page": { "size": "Letter", "margins": "10pt 20pt" },
                "baseFontSize": 10,
                "baseFont": "Times",
                "elementStyles": { "H1": "color: red" },
                "resourceDir": "assets"
            }"#,
        )
        .unwrap();
        assert_eq!(config.page.size, PageSize::Letter);
        assert_eq!(config.page.margins.top, 10.0);
        assert_eq!(config.page.margins.left, 20.0);
        assert_eq!(config.page.content_size(), (572.0, 772.0));
        assert_eq!(config.base_font, "Times");
        assert_eq!(config.element_style("h1"), "color: red");
        assert_eq!(config.element_style("p"), "");
        assert_eq!(config.resource_dir, Some(PathBuf::from("assets")));
    }

    #[test]
    fn test_custom_page_size() {
        let config =
            RenderConfig::from_json_str(r#"{ "page": { "size": { "width": 300, "height": 400 } } }"#)
                .unwrap();
        assert_eq!(config.page.size.dimensions_pt(), (300.0, 400.0));
    }

    #[test]
    fn test_rejects_invalid_geometry() {
        let result = RenderConfig::from_json_str(r#"{ "page": { "margins": 400 } }"#);
        assert!(matches!(result, Err(PipelineError::Config(_))));
        let result = RenderConfig::from_json_str(r#"{ "baseFontSize": 0 }"#);
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            RenderConfig::from_json_str("{ nope"),
            Err(PipelineError::Json(_))
        ));
    }

    #[test]
    fn test_from_file_resolves_resource_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "resourceDir": "images" }"#).unwrap();
        let config = RenderConfig::from_file(&path).unwrap();
        assert_eq!(config.resource_dir, Some(dir.path().join("images")));
    }
}
