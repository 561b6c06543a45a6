use super::tree::ShortcutId;
use crate::geometry::Size;
use std::collections::HashMap;

/// Measures a label in normalized pad units. Provided by the renderer.
pub trait TextMeasurer {
    fn measure(&self, text: &str) -> Size;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str) -> Size,
{
    fn measure(&self, text: &str) -> Size {
        self(text)
    }
}

/// Rough label size used until a renderer installs its own measurer.
pub fn approximate_label_size(text: &str) -> Size {
    Size::new(0.012 * text.chars().count() as f32, 0.03)
}

/// Label sizes keyed by shortcut, recomputed when the text changes.
#[derive(Debug, Default)]
pub struct LayoutCache {
    labels: HashMap<ShortcutId, (String, Size)>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the label `text` of shortcut `id`, measured on first use.
    pub fn label_size(&mut self, id: ShortcutId, text: &str, measurer: &dyn TextMeasurer) -> Size {
        if let Some((cached, size)) = self.labels.get(&id) {
            if cached == text {
                return *size;
            }
        }
        let size = measurer.measure(text);
        self.labels.insert(id, (text.to_string(), size));
        size
    }

    pub fn invalidate(&mut self, id: ShortcutId) {
        self.labels.remove(&id);
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuTree;
    use std::cell::Cell;

    #[test]
    fn measures_once_per_text() {
        let mut tree = MenuTree::new();
        let id = tree.new_shortcut("Mail");
        let calls = Cell::new(0);
        let measurer = |text: &str| {
            calls.set(calls.get() + 1);
            Size::new(0.01 * text.len() as f32, 0.03)
        };
        let mut cache = LayoutCache::new();
        let a = cache.label_size(id, "Mail", &measurer);
        let b = cache.label_size(id, "Mail", &measurer);
        assert_eq!(a, b);
        assert_eq!(calls.get(), 1);
        cache.label_size(id, "Mailbox", &measurer);
        assert_eq!(calls.get(), 2);
        cache.invalidate(id);
        assert!(cache.is_empty());
    }
}
