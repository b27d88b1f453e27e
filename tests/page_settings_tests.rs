mod common;

use common::pdf_assertions::{get_page_dimensions, page_operators};
use common::{TestResult, render_html_with_config, render_with};
use inkflow::{Canvas, Fragment, HtmlRenderer, RenderConfig, TextCallback};
use inkflow_style::PageSize;
use inkflow_types::Color;
use std::sync::Arc;

#[test]
fn test_letter_page_size() -> TestResult {
    let config = RenderConfig::from_json_str(r#"{ "page": { "size": "Letter" } }"#)?;
    let pdf = render_html_with_config("<p>Letter</p>", config)?;
    assert_eq!(get_page_dimensions(&pdf.doc, 1), Some((612.0, 792.0)));
    Ok(())
}

#[test]
fn test_custom_page_size_and_margins() -> TestResult {
    let mut config = RenderConfig::default();
    config.page.size = PageSize::Custom {
        width: 300.0,
        height: 200.0,
    };
    config.page.margins = inkflow_style::Margins::all(10.0);
    let markup: String = (1..=20).map(|n| format!("<p>Line {n}</p>")).collect();
    let pdf = render_html_with_config(&markup, config)?;
    assert_eq!(get_page_dimensions(&pdf.doc, 1), Some((300.0, 200.0)));
    assert!(pdf.page_count() > 1);
    Ok(())
}

#[test]
fn test_config_file_with_element_styles() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "baseFont": "Times",
            "baseFontSize": 10,
            "elementStyles": { "P": "font-family: Courier; text-align: center" }
        }"#,
    )?;
    let config = RenderConfig::from_file(&path)?;
    assert_eq!(config.element_style("p"), "font-family: Courier; text-align: center");

    let pdf = render_html_with_config("<h2>Times heading</h2><p>Courier body</p>", config)?;
    assert_pdf_contains_text!(pdf, "Times heading");
    assert_pdf_contains_text!(pdf, "Courier body");
    assert_pdf_has_font!(pdf, "Courier");
    Ok(())
}

#[test]
fn test_mark_is_highlighted() -> TestResult {
    let pdf = render_html_with_config("<p>A <mark>marked</mark> word</p>", RenderConfig::default())?;
    let page_id = pdf.doc.get_pages()[&1];
    let operators = page_operators(&pdf.doc, page_id);
    let fill = operators.iter().position(|op| op == "re");
    let text = operators.iter().rposition(|op| op == "Tj");
    assert!(fill.is_some(), "highlight should paint a rectangle");
    assert!(fill < text);
    assert_pdf_contains_text!(pdf, "marked");
    Ok(())
}

#[derive(Debug)]
struct Underlay(Color);

impl TextCallback for Underlay {
    fn render_behind(&self, fragment: &Fragment, canvas: &mut dyn Canvas) {
        canvas.fill_rect(fragment.rect, self.0);
    }
}

#[test]
fn test_custom_callback_is_invoked() -> TestResult {
    let renderer = HtmlRenderer::new(RenderConfig::default()).with_callback("underlay", |styles| {
        Arc::new(Underlay(styles.color.unwrap_or(Color::BLACK))) as Arc<dyn TextCallback>
    });
    let pdf = render_with(
        &renderer,
        r#"<p><span style="callback: underlay; color: #336699">boxed</span> plain</p>"#,
    )?;
    let page_id = pdf.doc.get_pages()[&1];
    let fills = page_operators(&pdf.doc, page_id)
        .iter()
        .filter(|op| *op == "re")
        .count();
    assert_eq!(fills, 1);
    Ok(())
}

#[test]
fn test_unknown_callback_renders_plain() -> TestResult {
    let pdf = render_html_with_config(
        r#"<p><span style="callback: missing">still here</span></p>"#,
        RenderConfig::default(),
    )?;
    assert_pdf_contains_text!(pdf, "still here");
    Ok(())
}
