//! Menus and shortcuts.
//!
//! Every [`Shortcut`] and [`ShortcutMenu`] lives in one [`MenuTree`] and is
//! addressed through generation-checked handles.

pub mod layout;
pub mod shortcut;
pub mod tree;

pub use layout::{approximate_label_size, LayoutCache, TextMeasurer};
pub use shortcut::{Shortcut, ShortcutLimits};
pub use tree::{MenuId, MenuTree, ShortcutId, ShortcutMenu};
