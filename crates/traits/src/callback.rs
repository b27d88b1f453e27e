//! Per-run painting callbacks.
//!
//! A text run can name a callback through its `callback` style. At flush time the
//! renderer looks the name up in a `CallbackRegistry` and attaches the built callback
//! to the run. The writer then invokes it for every fragment it places.

use inkflow_style::TextStyles;
use inkflow_types::{Color, Rect};
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// A placed piece of a run: its text and the box it occupies on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub rect: Rect,
}

/// The drawing surface a callback paints on.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

pub trait TextCallback: Debug + Send + Sync {
    /// Paints before the fragment's glyphs.
    fn render_behind(&self, fragment: &Fragment, canvas: &mut dyn Canvas);

    /// Paints after the fragment's glyphs.
    fn render_in_front(&self, _fragment: &Fragment, _canvas: &mut dyn Canvas) {}
}

/// Builds a callback for a run from the run's resolved text styles.
pub type CallbackFactory = Arc<dyn Fn(&TextStyles) -> Arc<dyn TextCallback> + Send + Sync>;

#[derive(Clone, Default)]
pub struct CallbackRegistry {
    factories: HashMap<String, CallbackFactory>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&TextStyles) -> Arc<dyn TextCallback> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Builds the callback registered under `name`, if any.
    pub fn build(&self, name: &str, styles: &TextStyles) -> Option<Arc<dyn TextCallback>> {
        self.factories.get(name).map(|factory| factory(styles))
    }
}

impl Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("CallbackRegistry")
            .field("callbacks", &names)
            .finish()
    }
}
