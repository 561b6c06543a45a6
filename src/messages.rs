use crate::menu::{MenuId, ShortcutId};
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayMode {
    Hide,
    Menus,
    Edit,
}

/// Notification for the thread that owns the overlay and the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    ShowOverlay(OverlayMode),
    MenuActivated(MenuId),
    ShortcutSelected(Option<ShortcutId>),
    Feedback(String),
    /// Redraw, e.g. after finger positions changed.
    Refresh,
    EditorShown(bool),
    /// The editor is temporarily hidden while a new shortcut is placed.
    EditorHidden(bool),
}

/// Sending half of the UI queue, cheap to clone into any thread.
#[derive(Debug, Clone)]
pub struct UiSink {
    tx: Sender<UiEvent>,
}

impl UiSink {
    pub fn post(&self, event: UiEvent) {
        // the UI may already be gone during shutdown
        let _ = self.tx.send(event);
    }
}

pub fn ui_channel() -> (UiSink, Receiver<UiEvent>) {
    let (tx, rx) = mpsc::channel();
    (UiSink { tx }, rx)
}
