//! The flow state machine.
//!
//! Consumes open/text/close events in document order. Text is buffered with its resolved
//! styles and handed to the writer one block at a time, whenever a block-establishing
//! element opens or closes over a non-empty buffer. Vertical box-model spacing is issued
//! directly as cursor advances at element boundaries.

use crate::attributes::Attributes;
use crate::callbacks::default_registry;
use crate::context::{ContextStack, ElementFrame};
use crate::flow::{FlowBuffer, PendingRun};
use crate::tags::{ElementKind, RenderScope};
use crate::text::{decode_entities, normalize_whitespace};
use inkflow_style::{BlockStyles, Position, TextStyles};
use inkflow_traits::{CallbackRegistry, DocumentWriter, PutOptions, TextRun, WriterError};
use inkflow_types::{BoundingBox, Point};

pub struct FlowRenderer<W: DocumentWriter> {
    writer: W,
    context: ContextStack,
    flow: FlowBuffer,
    callbacks: CallbackRegistry,
    /// One entry per open event: whether it produced a frame.
    open_elements: Vec<bool>,
}

impl<W: DocumentWriter> FlowRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self::with_callbacks(writer, default_registry())
    }

    pub fn with_callbacks(writer: W, callbacks: CallbackRegistry) -> Self {
        Self {
            writer,
            context: ContextStack::new(),
            flow: FlowBuffer::new(),
            callbacks,
            open_elements: Vec::new(),
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn context(&self) -> &ContextStack {
        &self.context
    }

    pub fn buffer(&self) -> &FlowBuffer {
        &self.flow
    }

    /// Handles an opening tag. Returns whether the tag is known (and so produced a frame).
    pub fn on_tag_open(
        &mut self,
        tag: &str,
        attributes: Attributes,
        declared_style: &str,
    ) -> Result<bool, WriterError> {
        let Some(kind) = ElementKind::lookup(tag) else {
            log::debug!("Ignoring unknown element <{}>", tag);
            self.open_elements.push(false);
            return Ok(false);
        };
        self.open_elements.push(true);

        let frame = ElementFrame::new(tag, kind, attributes, declared_style);
        if !self.flush_if_needed(frame.is_block())? {
            self.add_space_if_needed();
        }

        let spacing = frame.tag_open_styles();
        let move_down = spacing.margin - self.context.last_margin + spacing.padding;
        if move_down > 0.0 {
            self.writer.advance_cursor(move_down)?;
        }
        if spacing.page_break {
            self.writer.start_new_page()?;
        }

        self.context.push(frame);
        if let Some(hook) = kind.custom_render {
            let mut scope = RenderScope {
                writer: &mut self.writer,
                context: &self.context,
                flow: &mut self.flow,
            };
            hook(&mut scope)?;
        }
        Ok(true)
    }

    /// Buffers a text node. Whitespace-only content is dropped.
    pub fn on_text_node(&mut self, content: &str) {
        if content.bytes().all(|b| b.is_ascii_whitespace()) {
            return;
        }

        let decoded = decode_entities(content);
        let mut text = self.context.take_before_content().unwrap_or_default();
        text.push_str(&normalize_whitespace(
            &decoded,
            self.context.preserves_white_space(),
        ));

        self.flow.push(PendingRun::Text {
            text,
            styles: self.context.current_text_styles(),
        });
        self.context.last_was_text = true;
    }

    /// Handles a closing tag, matching it to the most recent unclosed open.
    pub fn on_tag_close(&mut self) -> Result<(), WriterError> {
        match self.open_elements.pop() {
            Some(true) => {}
            Some(false) => return Ok(()),
            None => {
                log::debug!("Ignoring close without a matching open");
                return Ok(());
            }
        }
        let Some(frame) = self.context.last() else {
            return Ok(());
        };
        let block = frame.is_block();
        let spacing = frame.tag_close_styles();

        self.flush_if_needed(block)?;
        self.context.last_margin = spacing.margin;
        self.writer
            .advance_cursor(spacing.margin + spacing.padding)?;
        if spacing.page_break {
            self.writer.start_new_page()?;
        }
        self.context.last_was_text = false;
        self.context.pop();
        Ok(())
    }

    /// Hands the buffered runs to the writer as one block.
    pub fn flush(&mut self) -> Result<(), WriterError> {
        if self.flow.is_empty() {
            return Ok(());
        }

        let runs: Vec<TextRun> = self
            .flow
            .take()
            .into_iter()
            .map(|item| self.to_text_run(item))
            .collect();
        let block = self.context.current_block_styles();
        let left_indent = block.left_indent();
        let options = PutOptions {
            align: block.align,
            leading: block.leading,
            padding_left: block.padding_left,
            indent_paragraphs: (left_indent > 0.0).then_some(left_indent),
        };
        let bounding_box = self.bounding_box(&block);

        self.writer.put(&runs, &options, bounding_box.as_ref())?;
        self.context.last_margin = 0.0;
        Ok(())
    }

    /// Flushes what is left and hands back the writer.
    pub fn finish(mut self) -> Result<W, WriterError> {
        self.flush()?;
        if !self.context.is_empty() {
            log::debug!("Finishing with {} unclosed element(s)", self.context.depth());
        }
        Ok(self.writer)
    }

    fn flush_if_needed(&mut self, block: bool) -> Result<bool, WriterError> {
        if !block || self.flow.is_empty() || self.flow.ends_with_new_line() {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    fn add_space_if_needed(&mut self) {
        let separated = self.flow.last().is_none_or(PendingRun::is_marker);
        if !self.context.last_was_text && !separated {
            self.flow.push(PendingRun::Space);
        }
    }

    fn to_text_run(&self, item: PendingRun) -> TextRun {
        match item {
            PendingRun::Text { text, styles } => {
                let callback = styles.callback.as_deref().and_then(|name| {
                    let built = self.callbacks.build(name, &styles);
                    if built.is_none() {
                        log::debug!("No callback registered as '{}'", name);
                    }
                    built
                });
                TextRun {
                    text,
                    styles,
                    callback,
                }
            }
            marker => TextRun::new(marker.text(), TextStyles::default()),
        }
    }

    fn bounding_box(&self, block: &BlockStyles) -> Option<BoundingBox> {
        if block.position != Position::Absolute {
            return None;
        }
        let bounds = self.writer.bounds();
        Some(BoundingBox::new(
            Point::new(block.left, bounds.height - block.top),
            bounds.width - block.left,
        ))
    }
}
