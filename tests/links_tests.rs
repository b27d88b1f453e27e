mod common;

use common::pdf_assertions::extract_uri_links;
use common::{TestResult, render_html};

#[test]
fn test_external_hyperlink() -> TestResult {
    let pdf = render_html(r#"<p><a href="https://example.com">Visit Example</a></p>"#)?;
    assert_pdf_contains_text!(pdf, "Visit Example");
    assert_eq!(extract_uri_links(&pdf.doc), vec!["https://example.com"]);
    Ok(())
}

#[test]
fn test_link_href_entities_are_decoded() -> TestResult {
    let pdf = render_html(r#"<a href="https://example.com/?q=1&amp;page=2">search</a>"#)?;
    assert_eq!(
        extract_uri_links(&pdf.doc),
        vec!["https://example.com/?q=1&page=2"]
    );
    Ok(())
}

#[test]
fn test_nested_formatting_inside_links() -> TestResult {
    let pdf = render_html(r#"<p><a href="https://a.example">plain <b>bold</b></a> after</p>"#)?;
    let links = extract_uri_links(&pdf.doc);
    // One annotation per placed fragment; the trailing text is not linked.
    assert_eq!(links.len(), 2);
    assert!(links.iter().all(|link| link == "https://a.example"));
    assert_pdf_contains_text!(pdf, "after");
    Ok(())
}

#[test]
fn test_anchor_without_href_is_plain_text() -> TestResult {
    let pdf = render_html(r#"<p><a name="top">Top</a></p>"#)?;
    assert_pdf_contains_text!(pdf, "Top");
    assert!(extract_uri_links(&pdf.doc).is_empty());
    Ok(())
}
