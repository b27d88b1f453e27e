//! Drives a `FlowRenderer` from markup text.
//!
//! Reads the markup with quick-xml and turns it into the renderer's open/text/close
//! events, lenient in the ways HTML needs:
//!
//! - void elements (`<br>`, `<img>`) need no closing tag
//! - an unclosed `<li>` or `<p>` ends where its next sibling starts
//! - other unclosed elements end with their parent's end tag; stray end tags are ignored
//! - attributes may be unquoted or valueless
//! - a bare `&` that starts no reference is plain text
//!
//! Anything else malformed is an error.

use crate::error::PipelineError;
use inkflow_layout::{Attributes, FlowRenderer};
use inkflow_traits::DocumentWriter;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// Elements whose content is never rendered.
const SKIPPED: &[&str] = &["head", "style", "script", "title"];

/// Elements implicitly closed by the start of a sibling of the same name.
const IMPLIED_END: &[&str] = &["li", "p"];

/// Elements that never have content or a closing tag.
const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Feeds `markup` through `renderer`. Element styles are keyed by lower-cased tag name.
/// Leaves the renderer unflushed; call `finish` afterwards.
pub fn drive<W: DocumentWriter>(
    markup: &str,
    renderer: &mut FlowRenderer<W>,
    element_styles: &HashMap<String, String>,
) -> Result<(), PipelineError> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(false);
    reader.config_mut().check_end_names = false;
    reader.config_mut().allow_dangling_amp = true;

    let mut driver = Driver {
        renderer,
        element_styles,
        open: Vec::new(),
        text: String::new(),
        skipping: 0,
    };
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => driver.start(&e, false)?,
            Event::Empty(e) => driver.start(&e, true)?,
            Event::End(e) => {
                let name = tag_name(e.name().as_ref());
                driver.end(&name)?;
            }
            Event::Text(e) => driver.push_text(&String::from_utf8_lossy(e.as_ref())),
            Event::GeneralRef(e) => {
                driver.push_text(&format!("&{};", String::from_utf8_lossy(&e)));
            }
            Event::CData(e) => {
                // Escaped so that entity decoding restores it verbatim.
                driver.push_text(&String::from_utf8_lossy(&e).replace('&', "&amp;"));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    driver.close_all()
}

struct Driver<'a, W: DocumentWriter> {
    renderer: &'a mut FlowRenderer<W>,
    element_styles: &'a HashMap<String, String>,
    /// Tag names of the elements opened and not yet closed.
    open: Vec<String>,
    text: String,
    /// Depth inside a skipped element; 0 outside.
    skipping: usize,
}

impl<W: DocumentWriter> Driver<'_, W> {
    fn start(&mut self, e: &BytesStart<'_>, empty: bool) -> Result<(), PipelineError> {
        let name = tag_name(e.name().as_ref());
        if self.skipping > 0 {
            if !empty && !is_void(&name) {
                self.skipping += 1;
            }
            return Ok(());
        }
        if SKIPPED.contains(&name.as_str()) {
            if !empty {
                self.skipping = 1;
            }
            return Ok(());
        }

        if IMPLIED_END.contains(&name.as_str()) && self.open.last() == Some(&name) {
            self.end(&name)?;
        }

        self.flush_text();
        let attributes = read_attributes(e)?;
        let declared = self
            .element_styles
            .get(&name)
            .map(String::as_str)
            .unwrap_or("");
        self.renderer.on_tag_open(&name, attributes, declared)?;

        if empty || is_void(&name) {
            self.renderer.on_tag_close()?;
        } else {
            self.open.push(name);
        }
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<(), PipelineError> {
        if self.skipping > 0 {
            if !is_void(name) {
                self.skipping -= 1;
            }
            return Ok(());
        }
        if is_void(name) {
            return Ok(());
        }
        let Some(position) = self.open.iter().rposition(|open| open == name) else {
            log::debug!("Ignoring stray </{}>", name);
            return Ok(());
        };

        self.flush_text();
        while self.open.len() > position {
            self.open.pop();
            self.renderer.on_tag_close()?;
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        if self.skipping == 0 {
            self.text.push_str(text);
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.renderer.on_text_node(&self.text);
            self.text.clear();
        }
    }

    fn close_all(mut self) -> Result<(), PipelineError> {
        self.flush_text();
        while self.open.pop().is_some() {
            self.renderer.on_tag_close()?;
        }
        Ok(())
    }
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

fn is_void(name: &str) -> bool {
    VOID.contains(&name)
}

fn read_attributes(e: &BytesStart<'_>) -> Result<Attributes, PipelineError> {
    let mut attributes = Attributes::new();
    for attribute in e.html_attributes() {
        let attribute = attribute?;
        let name = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attribute.value);
        let value = inkflow_layout::text::decode_entities(&raw).into_owned();
        attributes.insert(name, value);
    }
    Ok(attributes)
}
