use crate::menu::{MenuId, ShortcutId};
use crate::messages::{OverlayMode, UiEvent};
use std::sync::mpsc::{Receiver, TryRecvError};

/// Renderer side of the overlay. Every call is idempotent.
pub trait Overlay {
    fn show_overlay(&mut self, mode: OverlayMode);
    fn menu_activated(&mut self, menu: MenuId);
    fn shortcut_selected(&mut self, shortcut: Option<ShortcutId>);
    fn show_feedback(&mut self, text: &str);
    fn refresh(&mut self);
    fn editor_shown(&mut self, _shown: bool) {}
    fn editor_hidden(&mut self, _hidden: bool) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpLifecycle {
    Active,
    Disconnected,
}

/// Drains the UI queue on the thread that owns the overlay.
pub struct OverlayPump {
    rx: Receiver<UiEvent>,
    lifecycle: PumpLifecycle,
}

impl OverlayPump {
    pub fn new(rx: Receiver<UiEvent>) -> Self {
        Self {
            rx,
            lifecycle: PumpLifecycle::Active,
        }
    }

    pub fn lifecycle(&self) -> PumpLifecycle {
        self.lifecycle
    }

    /// Delivers every pending event in arrival order and returns how many
    /// were delivered.
    pub fn pump<O: Overlay + ?Sized>(&mut self, overlay: &mut O) -> usize {
        let mut count = 0;
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    count += 1;
                    match event {
                        UiEvent::ShowOverlay(mode) => overlay.show_overlay(mode),
                        UiEvent::MenuActivated(menu) => overlay.menu_activated(menu),
                        UiEvent::ShortcutSelected(s) => overlay.shortcut_selected(s),
                        UiEvent::Feedback(text) => overlay.show_feedback(&text),
                        UiEvent::Refresh => overlay.refresh(),
                        UiEvent::EditorShown(state) => overlay.editor_shown(state),
                        UiEvent::EditorHidden(state) => overlay.editor_hidden(state),
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.lifecycle = PumpLifecycle::Disconnected;
                    break;
                }
            }
        }
        count
    }
}
