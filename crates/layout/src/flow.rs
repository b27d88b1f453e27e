use inkflow_style::TextStyles;

/// One buffered item awaiting the next flush.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingRun {
    Text { text: String, styles: TextStyles },
    /// Separates adjacent inline elements.
    Space,
    /// An explicit line break.
    NewLine,
}

impl PendingRun {
    pub fn text(&self) -> &str {
        match self {
            PendingRun::Text { text, .. } => text,
            PendingRun::Space => " ",
            PendingRun::NewLine => "\n",
        }
    }

    pub fn is_marker(&self) -> bool {
        !matches!(self, PendingRun::Text { .. })
    }
}

/// Runs collected since the last flush, in document order.
#[derive(Debug, Clone, Default)]
pub struct FlowBuffer {
    items: Vec<PendingRun>,
}

impl FlowBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: PendingRun) {
        self.items.push(item);
    }

    pub fn last(&self) -> Option<&PendingRun> {
        self.items.last()
    }

    pub fn ends_with_new_line(&self) -> bool {
        matches!(self.last(), Some(PendingRun::NewLine))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[PendingRun] {
        &self.items
    }

    /// Empties the buffer, handing back its items.
    pub fn take(&mut self) -> Vec<PendingRun> {
        std::mem::take(&mut self.items)
    }
}
