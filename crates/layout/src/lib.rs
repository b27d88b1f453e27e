//! The flow half of inkflow: element taxonomy, context stack and the renderer that turns
//! open/text/close events into writer calls.

pub mod attributes;
pub mod callbacks;
pub mod context;
pub mod flow;
pub mod renderer;
pub mod tags;
pub mod text;

pub use self::attributes::Attributes;
pub use self::callbacks::{Highlight, default_registry};
pub use self::context::{ContextStack, EdgeSpacing, ElementFrame};
pub use self::flow::{FlowBuffer, PendingRun};
pub use self::renderer::FlowRenderer;
pub use self::tags::{ElementKind, RenderHook, RenderScope};

#[cfg(test)]
mod context_test;
#[cfg(test)]
mod test_utils;
