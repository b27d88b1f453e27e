use crate::{Attributes, FlowRenderer};
use inkflow_traits::{RecordingWriter, WriterCall};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn create_test_renderer() -> FlowRenderer<RecordingWriter> {
    init_logger();
    FlowRenderer::new(RecordingWriter::default())
}

pub fn attrs(pairs: &[(&str, &str)]) -> Attributes {
    pairs.iter().copied().collect()
}

/// Opens `tag` with an inline `style` attribute (or none when empty).
pub fn open(renderer: &mut FlowRenderer<RecordingWriter>, tag: &str, style: &str) {
    let attributes = if style.is_empty() {
        Attributes::new()
    } else {
        attrs(&[("style", style)])
    };
    renderer.on_tag_open(tag, attributes, "").unwrap();
}

pub fn close(renderer: &mut FlowRenderer<RecordingWriter>) {
    renderer.on_tag_close().unwrap();
}

/// `<tag style="...">text</tag>`.
pub fn element(renderer: &mut FlowRenderer<RecordingWriter>, tag: &str, style: &str, text: &str) {
    open(renderer, tag, style);
    renderer.on_text_node(text);
    close(renderer);
}

pub fn cursor_advances(calls: &[WriterCall]) -> Vec<f32> {
    calls
        .iter()
        .filter_map(|call| match call {
            WriterCall::AdvanceCursor(amount) => Some(*amount),
            _ => None,
        })
        .collect()
}
