use crate::attributes::Attributes;
use crate::tags::ElementKind;
use indexmap::IndexMap;
use inkflow_style::{
    BlockStyles, StyleRecord, TextStyles, parse_declarations, resolve,
};

/// Spacing applied once at an element boundary: on open (top) or on close (bottom).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeSpacing {
    pub margin: f32,
    pub padding: f32,
    pub page_break: bool,
}

/// The state of one open element.
#[derive(Debug, Clone)]
pub struct ElementFrame {
    pub tag: String,
    pub kind: &'static ElementKind,
    pub attributes: Attributes,
    /// `data-*` attributes, outside style resolution.
    pub data: IndexMap<String, String>,
    /// The element's own declared fragment.
    pub own: StyleRecord,
    /// `own` cascaded over the parent's effective record; set on push.
    pub effective: StyleRecord,
    /// A list marker waiting for the first text run inside this element.
    pub before_content: Option<String>,
    item_counter: u32,
}

impl ElementFrame {
    /// Resolves the element's own fragment from, in order: the kind's defaults, the kind's
    /// attribute styles, `declared_style`, then the `style` attribute.
    pub fn new(
        tag: &str,
        kind: &'static ElementKind,
        attributes: Attributes,
        declared_style: &str,
    ) -> Self {
        let mut own = StyleRecord::new().with_declarations(kind.extra_styles);
        if let Some(attribute_styles) = kind.attribute_styles {
            own = resolve(&attribute_styles(&attributes), own);
        }
        own = resolve(&parse_declarations(declared_style), own);
        if let Some(style) = attributes.style() {
            own = resolve(&parse_declarations(style), own);
        }

        // An `ol` counts from its `start` attribute.
        let item_counter = attributes
            .get("start")
            .and_then(|start| start.trim().parse::<u32>().ok())
            .map_or(0, |start| start.saturating_sub(1));

        Self {
            tag: tag.to_ascii_lowercase(),
            kind,
            data: attributes.data(),
            attributes,
            effective: own.clone(),
            own,
            before_content: None,
            item_counter,
        }
    }

    pub fn is_block(&self) -> bool {
        self.kind.block
    }

    pub fn tag_open_styles(&self) -> EdgeSpacing {
        EdgeSpacing {
            margin: self.own.margin_top.unwrap_or(0.0),
            padding: self.own.padding_top.unwrap_or(0.0),
            page_break: self.own.break_before().is_some_and(|b| b.forces_page()),
        }
    }

    pub fn tag_close_styles(&self) -> EdgeSpacing {
        EdgeSpacing {
            margin: self.own.margin_bottom.unwrap_or(0.0),
            padding: self.own.padding_bottom.unwrap_or(0.0),
            page_break: self.own.break_after().is_some_and(|b| b.forces_page()),
        }
    }

    /// Advances this element's item counter and renders the marker for the new item.
    fn next_marker(&mut self) -> Option<String> {
        let list_type = self.effective.list_style_type.as_deref().map(str::to_ascii_lowercase);
        let numbered = self.tag == "ol";
        let list_type = list_type.as_deref().unwrap_or(if numbered { "decimal" } else { "disc" });

        let marker = match list_type {
            "decimal" => {
                self.item_counter = self.item_counter.saturating_add(1);
                format!("{}. ", self.item_counter)
            }
            "lower-alpha" | "lower-latin" => {
                self.item_counter = self.item_counter.saturating_add(1);
                format!("{}. ", alphabetic(self.item_counter))
            }
            "upper-alpha" | "upper-latin" => {
                self.item_counter = self.item_counter.saturating_add(1);
                format!("{}. ", alphabetic(self.item_counter).to_ascii_uppercase())
            }
            "circle" => "\u{25e6} ".to_string(),
            "square" => "\u{25aa} ".to_string(),
            "none" => return None,
            _ => "\u{2022} ".to_string(),
        };
        Some(marker)
    }
}

/// `1 → a`, `26 → z`, `27 → aa`.
fn alphabetic(mut index: u32) -> String {
    let mut letters = Vec::new();
    while index > 0 {
        index -= 1;
        letters.push(b'a' + (index % 26) as u8);
        index /= 26;
    }
    letters.iter().rev().map(|b| *b as char).collect()
}

/// The open elements, innermost last, plus the flow bookkeeping shared across them.
#[derive(Debug, Default)]
pub struct ContextStack {
    frames: Vec<ElementFrame>,
    /// Bottom margin of the most recently closed element; reset by each flush.
    pub last_margin: f32,
    /// Whether the most recent buffered item was a text run.
    pub last_was_text: bool,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cascades the frame over the current top and pushes it. List items take their
    /// marker from the enclosing list here.
    pub fn push(&mut self, mut frame: ElementFrame) {
        if let Some(parent) = self.frames.last_mut() {
            frame.effective = StyleRecord::cascade(&parent.effective, &frame.own);
            if frame.kind.list_marker {
                frame.before_content = parent.next_marker();
            }
        }
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<ElementFrame> {
        self.frames.pop()
    }

    pub fn last(&self) -> Option<&ElementFrame> {
        self.frames.last()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn current_text_styles(&self) -> TextStyles {
        self.last()
            .map(|frame| frame.effective.text_styles())
            .unwrap_or_default()
    }

    /// Block styles of the innermost block-establishing element.
    pub fn current_block_styles(&self) -> BlockStyles {
        self.frames
            .iter()
            .rev()
            .find(|frame| frame.is_block())
            .map(|frame| frame.effective.block_styles())
            .unwrap_or_default()
    }

    pub fn preserves_white_space(&self) -> bool {
        self.current_text_styles().white_space.preserves()
    }

    /// Takes the pending marker of the innermost element holding one.
    pub fn take_before_content(&mut self) -> Option<String> {
        self.frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.before_content.take())
    }
}
