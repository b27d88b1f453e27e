//! A writer that records every call instead of painting, for asserting on flow output.
use crate::writer::{DocumentWriter, ImageOptions, PutOptions, RuleOptions, TextRun, WriterError};
use inkflow_style::TextStyles;
use inkflow_types::{BoundingBox, Size};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRun {
    pub text: String,
    pub styles: TextStyles,
    pub has_callback: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WriterCall {
    AdvanceCursor(f32),
    StartNewPage,
    Put {
        runs: Vec<RecordedRun>,
        options: PutOptions,
        bounding_box: Option<BoundingBox>,
    },
    HorizontalRule(RuleOptions),
    Image { src: String, options: ImageOptions },
}

#[derive(Debug, Clone)]
pub struct RecordingWriter {
    pub calls: Vec<WriterCall>,
    bounds: Size,
}

impl Default for RecordingWriter {
    fn default() -> Self {
        Self::new(Size::new(540.0, 720.0))
    }
}

impl RecordingWriter {
    pub fn new(bounds: Size) -> Self {
        Self {
            calls: Vec::new(),
            bounds,
        }
    }

    /// The `put` calls only, as (texts, options, box) triples.
    pub fn puts(&self) -> Vec<(Vec<String>, &PutOptions, Option<&BoundingBox>)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                WriterCall::Put {
                    runs,
                    options,
                    bounding_box,
                } => Some((
                    runs.iter().map(|run| run.text.clone()).collect(),
                    options,
                    bounding_box.as_ref(),
                )),
                _ => None,
            })
            .collect()
    }

    /// All text placed so far, runs joined per `put` and `put`s joined by newlines.
    pub fn text(&self) -> String {
        self.puts()
            .into_iter()
            .map(|(texts, _, _)| texts.concat())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl DocumentWriter for RecordingWriter {
    fn advance_cursor(&mut self, amount: f32) -> Result<(), WriterError> {
        self.calls.push(WriterCall::AdvanceCursor(amount));
        Ok(())
    }

    fn start_new_page(&mut self) -> Result<(), WriterError> {
        self.calls.push(WriterCall::StartNewPage);
        Ok(())
    }

    fn put(
        &mut self,
        runs: &[TextRun],
        options: &PutOptions,
        bounding_box: Option<&BoundingBox>,
    ) -> Result<(), WriterError> {
        let runs = runs
            .iter()
            .map(|run| RecordedRun {
                text: run.text.clone(),
                styles: run.styles.clone(),
                has_callback: run.callback.is_some(),
            })
            .collect();
        self.calls.push(WriterCall::Put {
            runs,
            options: options.clone(),
            bounding_box: bounding_box.copied(),
        });
        Ok(())
    }

    fn bounds(&self) -> Size {
        self.bounds
    }

    fn horizontal_rule(&mut self, options: &RuleOptions) -> Result<(), WriterError> {
        self.calls.push(WriterCall::HorizontalRule(options.clone()));
        Ok(())
    }

    fn image(&mut self, src: &str, options: &ImageOptions) -> Result<(), WriterError> {
        self.calls.push(WriterCall::Image {
            src: src.to_string(),
            options: options.clone(),
        });
        Ok(())
    }
}
