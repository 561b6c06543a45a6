use crate::geometry::{BoxPart, PadGeometry, Point};
use crate::markpad::{EditMode, MarkPad};
use crate::menu::ShortcutId;
use crate::pad::Pad;
use crate::services::DeviceId;
use crate::touch::Touch;
use std::sync::{Arc, Mutex};

/// The pads and the controller they share.
pub struct App {
    markpad: MarkPad,
    pads: Vec<Pad>,
    cur_pad: Option<usize>,
}

impl App {
    pub fn new(markpad: MarkPad) -> Self {
        Self {
            markpad,
            pads: Vec::new(),
            cur_pad: None,
        }
    }

    pub fn markpad(&self) -> &MarkPad {
        &self.markpad
    }

    pub fn markpad_mut(&mut self) -> &mut MarkPad {
        &mut self.markpad
    }

    pub fn pads(&self) -> &[Pad] {
        &self.pads
    }

    pub fn current_pad(&self) -> Option<&Pad> {
        self.cur_pad.and_then(|i| self.pads.get(i))
    }

    fn set_current_pad(&mut self, index: usize) {
        if self.cur_pad == Some(index) {
            return;
        }
        self.cur_pad = Some(index);
        if let Some(pad) = self.pads.get(index) {
            self.markpad.set_geometry(*pad.geometry());
        }
    }

    /// Registers a touch surface. The first one becomes the current pad.
    pub fn add_pad(&mut self, device: DeviceId, width: f32, height: f32) -> anyhow::Result<()> {
        let geometry = PadGeometry::new(width, height)?;
        let pad = Pad::new(device, geometry, self.markpad.settings());
        self.pads.push(pad);
        if self.cur_pad.is_none() {
            self.set_current_pad(self.pads.len() - 1);
        }
        tracing::info!(device, width, height, "pad added");
        Ok(())
    }

    /// Routes a frame to the only pad, or to the pad of `device`. Frames of
    /// unknown devices are dropped.
    pub fn touch_callback(&mut self, device: DeviceId, touches: &[Touch]) {
        let index = if self.pads.len() == 1 {
            Some(0)
        } else {
            self.pads.iter().position(|p| p.device() == device)
        };
        let Some(index) = index else {
            tracing::trace!(device, "touches from unknown device");
            return;
        };
        self.set_current_pad(index);
        if let Some(pad) = self.pads.get_mut(index) {
            pad.touch_callback(&mut self.markpad, touches);
        }
    }

    /// Modifier state reported by the hotkey source, 0 when released.
    pub fn hotkey_callback(&mut self, mask: u32) {
        let shown = self.markpad.is_overlay_shown();
        if mask != 0 {
            if mask == self.markpad.show_mask() {
                if !shown {
                    self.markpad.show_overlay_on_hotkey(true);
                }
            } else if shown
                && mask & self.markpad.edit_mask() != 0
                && self.markpad.edit_mode() == EditMode::None
            {
                // editing restarts from the main menu, keep the one shown
                let menu = self.markpad.current_menu();
                self.edit(EditMode::Shortcuts);
                self.markpad.set_current_menu(Some(menu));
            }
        } else if shown {
            self.markpad.show_overlay_on_hotkey(false);
        }
    }

    /// Switches edit mode, cancelling the gesture of the current pad.
    pub fn edit(&mut self, mode: EditMode) {
        self.markpad.begin_edit(mode);
        let mut borders = None;
        if let Some(pad) = self.cur_pad.and_then(|i| self.pads.get_mut(i)) {
            pad.cancel_touch_gesture(&mut self.markpad, false);
            if mode != EditMode::None {
                self.markpad.cursor().enable_device_for_cursor(pad.device());
                if mode == EditMode::Borders {
                    borders = pad.init_active_borders(&mut self.markpad);
                }
            }
        }
        self.markpad.finish_edit(borders);
    }

    pub fn cancel_touch_gesture(&mut self, close_menu: bool) {
        if let Some(pad) = self.cur_pad.and_then(|i| self.pads.get_mut(i)) {
            pad.cancel_touch_gesture(&mut self.markpad, close_menu);
        }
    }

    /// Editor picking on the current pad.
    pub fn is_in_shortcut(&self, pos: Point) -> Option<(ShortcutId, BoxPart)> {
        self.current_pad()?.is_in_shortcut(&self.markpad, pos)
    }
}

/// Handle shared between the touch callback thread and the UI thread.
pub type SharedApp = Arc<Mutex<App>>;

pub fn shared(app: App) -> SharedApp {
    Arc::new(Mutex::new(app))
}

/// Runs `f` with the application locked. A poisoned lock is logged and `f`
/// is skipped.
pub fn with_app<F>(app: &SharedApp, f: F)
where
    F: FnOnce(&mut App),
{
    match app.lock() {
        Ok(mut guard) => f(&mut guard),
        Err(err) => tracing::error!(?err, "failed to lock application"),
    }
}
