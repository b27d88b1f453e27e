//! The element taxonomy: which tags the renderer knows, whether they establish a block,
//! the styles they contribute by default, and their custom render hooks.

use crate::attributes::Attributes;
use crate::context::ContextStack;
use crate::flow::{FlowBuffer, PendingRun};
use inkflow_style::Declarations;
use inkflow_style::convert::convert_size;
use inkflow_traits::{DocumentWriter, ImageOptions, RuleOptions, WriterError};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// Cursor advance for a line break on an empty line.
pub const LINE_BREAK_ADVANCE: f32 = 12.0;

/// What a hook may touch while its element opens. The element's frame is already on top
/// of `context`.
pub struct RenderScope<'a> {
    pub writer: &'a mut dyn DocumentWriter,
    pub context: &'a ContextStack,
    pub flow: &'a mut FlowBuffer,
}

pub type RenderHook = fn(&mut RenderScope<'_>) -> Result<(), WriterError>;

pub struct ElementKind {
    pub names: &'static [&'static str],
    pub block: bool,
    /// Declarations applied before anything the element declares itself.
    pub extra_styles: &'static str,
    pub attribute_styles: Option<fn(&Attributes) -> Declarations>,
    pub custom_render: Option<RenderHook>,
    /// Whether the element takes a marker from its enclosing list.
    pub list_marker: bool,
}

impl fmt::Debug for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementKind")
            .field("names", &self.names)
            .field("block", &self.block)
            .field("extra_styles", &self.extra_styles)
            .field("custom_render", &self.custom_render.is_some())
            .field("list_marker", &self.list_marker)
            .finish()
    }
}

const fn inline(names: &'static [&'static str], extra_styles: &'static str) -> ElementKind {
    ElementKind {
        names,
        block: false,
        extra_styles,
        attribute_styles: None,
        custom_render: None,
        list_marker: false,
    }
}

const fn block(names: &'static [&'static str], extra_styles: &'static str) -> ElementKind {
    ElementKind {
        block: true,
        ..inline(names, extra_styles)
    }
}

static KINDS: [ElementKind; 28] = [
    ElementKind {
        attribute_styles: Some(link_styles),
        ..inline(&["a"], "color: #0000ee; text-decoration: underline")
    },
    inline(&["b", "strong"], "font-weight: bold"),
    block(&["blockquote"], "margin-left: 25; margin-top: 6; margin-bottom: 6"),
    block(&["body"], ""),
    ElementKind {
        custom_render: Some(line_break),
        ..inline(&["br"], "")
    },
    inline(&["code"], "font-family: Courier"),
    inline(&["del", "s"], "text-decoration: line-through"),
    block(&["div"], ""),
    inline(&["em", "i"], "font-style: italic"),
    block(&["h1"], "font-weight: bold; font-size: 24; margin-top: 12; margin-bottom: 12"),
    block(&["h2"], "font-weight: bold; font-size: 20; margin-top: 10; margin-bottom: 10"),
    block(&["h3"], "font-weight: bold; font-size: 16; margin-top: 8; margin-bottom: 8"),
    block(&["h4"], "font-weight: bold; font-size: 14; margin-top: 7; margin-bottom: 7"),
    block(&["h5"], "font-weight: bold; font-size: 12; margin-top: 6; margin-bottom: 6"),
    block(&["h6"], "font-weight: bold; font-size: 10; margin-top: 5; margin-bottom: 5"),
    ElementKind {
        custom_render: Some(horizontal_rule),
        ..block(&["hr"], "margin-top: 6; margin-bottom: 6")
    },
    ElementKind {
        custom_render: Some(image),
        ..block(&["img"], "")
    },
    inline(&["ins", "u"], "text-decoration: underline"),
    ElementKind {
        list_marker: true,
        ..block(&["li"], "")
    },
    inline(&["mark"], "background: #ffff00; callback: highlight"),
    block(&["ol"], "margin-left: 25; margin-top: 6; margin-bottom: 6"),
    block(&["p"], "margin-top: 6; margin-bottom: 6"),
    block(&["pre"], "white-space: pre; font-family: Courier"),
    inline(&["small"], "font-size: 10"),
    inline(&["span"], ""),
    inline(&["sub"], "vertical-align: sub"),
    inline(&["sup"], "vertical-align: super"),
    block(&["ul"], "margin-left: 25; margin-top: 6; margin-bottom: 6"),
];

static BY_NAME: Lazy<HashMap<&'static str, &'static ElementKind>> = Lazy::new(|| {
    KINDS
        .iter()
        .flat_map(|kind| kind.names.iter().map(move |name| (*name, kind)))
        .collect()
});

impl ElementKind {
    /// Case-insensitive lookup; `None` for tags the renderer does not know.
    pub fn lookup(tag: &str) -> Option<&'static ElementKind> {
        BY_NAME.get(tag.to_ascii_lowercase().as_str()).copied()
    }

    pub fn all() -> &'static [ElementKind] {
        &KINDS
    }
}

fn link_styles(attributes: &Attributes) -> Declarations {
    attributes
        .get("href")
        .map(|href| ("href".to_string(), href.trim().to_string()))
        .filter(|(_, href)| !href.is_empty())
        .into_iter()
        .collect()
}

fn line_break(scope: &mut RenderScope<'_>) -> Result<(), WriterError> {
    if scope.flow.is_empty() {
        scope.writer.advance_cursor(LINE_BREAK_ADVANCE)
    } else {
        scope.flow.push(PendingRun::NewLine);
        Ok(())
    }
}

fn horizontal_rule(scope: &mut RenderScope<'_>) -> Result<(), WriterError> {
    let color = scope.context.last().and_then(|frame| frame.effective.color);
    scope.writer.horizontal_rule(&RuleOptions { color })
}

fn image(scope: &mut RenderScope<'_>) -> Result<(), WriterError> {
    let Some(frame) = scope.context.last() else {
        return Ok(());
    };
    let Some(src) = frame.attributes.get("src").map(str::trim).filter(|s| !s.is_empty()) else {
        log::debug!("Skipping <img> without a src");
        return Ok(());
    };
    let options = ImageOptions {
        width: frame.attributes.get("width").map(convert_size),
        height: frame.attributes.get("height").map(convert_size),
        align: scope.context.current_block_styles().align,
    };
    scope.writer.image(src, &options)
}
