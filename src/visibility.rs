use std::sync::atomic::{AtomicBool, Ordering};

/// Independent reasons for the overlay to be visible.
///
/// The touch path, the hotkey source and the editor each own one flag; the
/// overlay is visible when any of them is set. Flags can flip from any thread
/// and a renderer can poll [`OverlayVisibility::is_shown`] without locking.
#[derive(Debug, Default)]
pub struct OverlayVisibility {
    touch: AtomicBool,
    hotkey: AtomicBool,
    editing: AtomicBool,
}

impl OverlayVisibility {
    pub fn is_shown(&self) -> bool {
        self.touch_wants() || self.hotkey_wants() || self.editing()
    }

    pub fn touch_wants(&self) -> bool {
        self.touch.load(Ordering::SeqCst)
    }

    pub fn hotkey_wants(&self) -> bool {
        self.hotkey.load(Ordering::SeqCst)
    }

    pub fn editing(&self) -> bool {
        self.editing.load(Ordering::SeqCst)
    }

    /// Returns the previous value.
    pub fn set_touch(&self, state: bool) -> bool {
        let old = self.touch.swap(state, Ordering::SeqCst);
        if old != state {
            tracing::debug!(from = ?old, to = ?state, "touch visibility updated");
        }
        old
    }

    /// Returns the previous value.
    pub fn set_hotkey(&self, state: bool) -> bool {
        let old = self.hotkey.swap(state, Ordering::SeqCst);
        if old != state {
            tracing::debug!(from = ?old, to = ?state, "hotkey visibility updated");
        }
        old
    }

    pub fn set_editing(&self, state: bool) {
        self.editing.store(state, Ordering::SeqCst);
    }
}
