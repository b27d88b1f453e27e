#![cfg(test)]

use crate::context::{ContextStack, ElementFrame};
use crate::tags::ElementKind;
use crate::test_utils::attrs;
use inkflow_style::{BlockStyles, Position, TextAlign, TextStyles};

fn push(stack: &mut ContextStack, tag: &str, style: &str) {
    let kind = ElementKind::lookup(tag).unwrap();
    let attributes = if style.is_empty() { attrs(&[]) } else { attrs(&[("style", style)]) };
    stack.push(ElementFrame::new(tag, kind, attributes, ""));
}

#[test]
fn test_empty_stack_has_default_styles() {
    let stack = ContextStack::new();
    assert!(stack.is_empty());
    assert_eq!(stack.current_text_styles(), TextStyles::default());
    assert_eq!(stack.current_block_styles(), BlockStyles::default());
}

#[test]
fn test_block_styles_come_from_nearest_block() {
    let mut stack = ContextStack::new();
    push(&mut stack, "div", "text-align: center; position: absolute");
    push(&mut stack, "span", "text-align: right");

    // The span is inline, so its own alignment is not consulted.
    let block = stack.current_block_styles();
    assert_eq!(block.align, Some(TextAlign::Center));
    assert_eq!(block.position, Position::Absolute);
}

#[test]
fn test_text_styles_cascade_through_frames() {
    let mut stack = ContextStack::new();
    push(&mut stack, "p", "color: red; font-size: 11");
    push(&mut stack, "em", "");
    let text = stack.current_text_styles();
    assert_eq!(text.size, Some(11.0));
    assert_eq!(text.color.map(|c| c.to_hex()).as_deref(), Some("ff0000"));
    assert_eq!(stack.depth(), 2);
}

#[test]
fn test_before_content_is_taken_once() {
    let mut stack = ContextStack::new();
    push(&mut stack, "ol", "");
    push(&mut stack, "li", "");
    push(&mut stack, "span", "");

    assert_eq!(stack.take_before_content().as_deref(), Some("1. "));
    assert_eq!(stack.take_before_content(), None);
}

#[test]
fn test_data_attributes_live_beside_styles() {
    let kind = ElementKind::lookup("div").unwrap();
    let frame = ElementFrame::new("div", kind, attrs(&[("data-id", " 42 "), ("class", "x")]), "");
    assert_eq!(frame.data.len(), 1);
    assert_eq!(frame.data["id"], "42");
}

#[test]
fn test_pop_returns_innermost() {
    let mut stack = ContextStack::new();
    push(&mut stack, "div", "");
    push(&mut stack, "b", "");
    assert_eq!(stack.pop().map(|frame| frame.tag), Some("b".to_string()));
    assert_eq!(stack.last().map(|frame| frame.tag.as_str()), Some("div"));
}

#[test]
fn test_list_counter_saturates_at_max_start() {
    let mut stack = ContextStack::new();
    let kind = ElementKind::lookup("ol").unwrap();
    stack.push(ElementFrame::new("ol", kind, attrs(&[("start", "4294967295")]), ""));
    let mut markers = Vec::new();
    for _ in 0..3 {
        push(&mut stack, "li", "");
        markers.push(stack.take_before_content());
        stack.pop();
    }
    assert_eq!(markers[0].as_deref(), Some("4294967295. "));
    assert_eq!(markers[2].as_deref(), Some("4294967295. "));
}
