use lopdf::{Dictionary, Document as LopdfDocument, Object};

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

fn resolve<'a>(doc: &'a LopdfDocument, object: &'a Object) -> Option<&'a Dictionary> {
    match object.as_reference() {
        Ok(id) => doc.get_dictionary(id).ok(),
        Err(_) => object.as_dict().ok(),
    }
}

/// Base font names of every font the page resources reference.
pub fn extract_font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut fonts = std::collections::BTreeSet::new();
    for page_id in doc.get_pages().values() {
        let Ok(page) = doc.get_dictionary(*page_id) else {
            continue;
        };
        let Some(resources) = page.get(b"Resources").ok().and_then(|r| resolve(doc, r)) else {
            continue;
        };
        let Some(font_dict) = resources.get(b"Font").ok().and_then(|f| resolve(doc, f)) else {
            continue;
        };
        for (_, font) in font_dict.iter() {
            if let Some(base_font) = resolve(doc, font)
                .and_then(|font| font.get(b"BaseFont").ok())
                .and_then(|name| name.as_name().ok())
            {
                fonts.insert(String::from_utf8_lossy(base_font).to_string());
            }
        }
    }
    fonts.into_iter().collect()
}

/// URIs of the link annotations on every page, in page order.
pub fn extract_uri_links(doc: &LopdfDocument) -> Vec<String> {
    let mut links = Vec::new();
    for page_id in doc.get_pages().values() {
        let Ok(page) = doc.get_dictionary(*page_id) else {
            continue;
        };
        let Ok(annots) = page.get(b"Annots").and_then(Object::as_array) else {
            continue;
        };
        for annot in annots {
            let uri = resolve(doc, annot)
                .and_then(|annot| annot.get(b"A").ok())
                .and_then(|action| resolve(doc, action))
                .and_then(|action| action.get(b"URI").ok())
                .and_then(|uri| uri.as_str().ok());
            if let Some(uri) = uri {
                links.push(String::from_utf8_lossy(uri).to_string());
            }
        }
    }
    links
}

/// Get page dimensions (width, height) in points
pub fn get_page_dimensions(doc: &LopdfDocument, page_num: u32) -> Option<(f32, f32)> {
    let pages = doc.get_pages();
    let page = doc.get_dictionary(*pages.get(&page_num)?).ok()?;
    let media_box = page.get(b"MediaBox").ok()?.as_array().ok()?;
    if media_box.len() < 4 {
        return None;
    }
    let width = media_box[2].as_float().ok()? - media_box[0].as_float().ok()?;
    let height = media_box[3].as_float().ok()? - media_box[1].as_float().ok()?;
    Some((width, height))
}

/// Content stream operators of one page, in order.
pub fn page_operators(doc: &LopdfDocument, page_id: lopdf::ObjectId) -> Vec<String> {
    doc.get_and_decode_page_content(page_id)
        .map(|content| {
            content
                .operations
                .into_iter()
                .map(|op| op.operator)
                .collect()
        })
        .unwrap_or_default()
}

// ============================================================================
// Fluent Assertion Macros
// ============================================================================

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert that PDF contains a font matching a pattern
#[macro_export]
macro_rules! assert_pdf_has_font {
    ($pdf:expr, $pattern:expr) => {
        let fonts = $crate::common::pdf_assertions::extract_font_names(&$pdf.doc);
        assert!(
            fonts.iter().any(|font| font.contains($pattern)),
            "PDF should reference a font matching '{}', found: {:?}",
            $pattern,
            fonts
        );
    };
}
