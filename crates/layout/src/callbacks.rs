//! Built-in text callbacks.
use inkflow_style::TextStyles;
use inkflow_traits::{CallbackRegistry, Canvas, Fragment, TextCallback};
use inkflow_types::Color;
use std::sync::Arc;

const HIGHLIGHT_YELLOW: Color = Color { r: 255, g: 255, b: 0 };

/// Paints the run's background color behind each placed fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub color: Color,
}

impl Highlight {
    pub fn for_styles(styles: &TextStyles) -> Self {
        Self {
            color: styles.background.unwrap_or(HIGHLIGHT_YELLOW),
        }
    }
}

impl TextCallback for Highlight {
    fn render_behind(&self, fragment: &Fragment, canvas: &mut dyn Canvas) {
        canvas.fill_rect(fragment.rect, self.color);
    }
}

/// A registry holding the built-in `highlight` callback.
pub fn default_registry() -> CallbackRegistry {
    let mut registry = CallbackRegistry::new();
    registry.register("highlight", |styles: &TextStyles| {
        Arc::new(Highlight::for_styles(styles)) as Arc<dyn TextCallback>
    });
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkflow_types::Rect;

    #[derive(Default)]
    struct Surface(Vec<(Rect, Color)>);

    impl Canvas for Surface {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.0.push((rect, color));
        }
    }

    #[test]
    fn test_highlight_uses_background() {
        let styles = TextStyles {
            background: Some(Color::rgb(0, 255, 0)),
            ..TextStyles::default()
        };
        let callback = default_registry().build("highlight", &styles).unwrap();
        let fragment = Fragment {
            text: "marked".to_string(),
            rect: Rect::new(10.0, 20.0, 30.0, 12.0),
        };
        let mut surface = Surface::default();
        callback.render_behind(&fragment, &mut surface);
        assert_eq!(surface.0, vec![(fragment.rect, Color::rgb(0, 255, 0))]);
    }

    #[test]
    fn test_highlight_defaults_to_yellow() {
        assert_eq!(Highlight::for_styles(&TextStyles::default()).color.to_hex(), "ffff00");
    }
}
