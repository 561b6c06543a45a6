use crate::geometry::Size;
use crate::touch::TouchBounds;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Thickness of the strips along each pad edge from which gestures start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveBorders {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for ActiveBorders {
    fn default() -> Self {
        Self {
            left: 0.04,
            right: 0.04,
            top: 0.04,
            bottom: 0.04,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feedback {
    /// How long feedback stays on screen in seconds, 0 disables it.
    pub delay: f32,
}

impl Default for Feedback {
    fn default() -> Self {
        Self { delay: 0.6 }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Hotkey that shows the menus, e.g. `fn+ctrl`.
    #[serde(default = "default_show_hotkey")]
    pub show_hotkey: String,
    #[serde(default = "default_edit_hotkey")]
    pub edit_hotkey: String,
    /// Gestures must start from these strips, except for non-border shortcuts.
    #[serde(default)]
    pub active_borders: ActiveBorders,
    /// How long a finger must dwell on an opener before its menu opens.
    #[serde(default = "default_menu_delay")]
    pub menu_delay: f64,
    /// Distance a validated touch must travel before an opener is looked up.
    #[serde(default)]
    pub min_movement: f32,
    #[serde(default = "default_min_touch_size")]
    pub min_touch_size: f32,
    #[serde(default = "default_max_touch_size")]
    pub max_touch_size: f32,
    #[serde(default = "default_true")]
    pub show_feedback: bool,
    #[serde(default)]
    pub feedback: Feedback,
    /// Record every gesture in a log file (uses disk space).
    #[serde(default)]
    pub log_data: bool,
    /// Directory of the gesture log. Defaults to the working directory.
    #[serde(default)]
    pub log_dir: Option<String>,
    /// Show finger positions while editing.
    #[serde(default)]
    pub show_fingers: bool,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    #[serde(default = "default_min_shortcut_size")]
    pub min_shortcut_size: Size,
    #[serde(default = "default_new_shortcut_size")]
    pub new_shortcut_size: Size,
    #[serde(default = "default_paste_offset")]
    pub paste_offset: Size,
    /// Tolerance when picking box borders in the editor.
    #[serde(default = "default_pick_tolerance")]
    pub pick_tolerance: f32,
    /// Minimum spacing around a shortcut label.
    #[serde(default = "default_name_spacing")]
    pub name_spacing: f32,
}

fn default_show_hotkey() -> String {
    "fn+ctrl".into()
}

fn default_edit_hotkey() -> String {
    "shift".into()
}

fn default_menu_delay() -> f64 {
    0.6
}

fn default_min_touch_size() -> f32 {
    4.0
}

fn default_max_touch_size() -> f32 {
    12.0
}

fn default_true() -> bool {
    true
}

fn default_min_shortcut_size() -> Size {
    Size::new(0.01, 0.01)
}

fn default_new_shortcut_size() -> Size {
    Size::new(0.15, 0.20)
}

fn default_paste_offset() -> Size {
    Size::new(0.03, 0.03)
}

fn default_pick_tolerance() -> f32 {
    0.01
}

fn default_name_spacing() -> f32 {
    0.004
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_hotkey: default_show_hotkey(),
            edit_hotkey: default_edit_hotkey(),
            active_borders: ActiveBorders::default(),
            menu_delay: default_menu_delay(),
            min_movement: 0.0,
            min_touch_size: default_min_touch_size(),
            max_touch_size: default_max_touch_size(),
            show_feedback: true,
            feedback: Feedback::default(),
            log_data: false,
            log_dir: None,
            show_fingers: false,
            debug_logging: false,
            min_shortcut_size: default_min_shortcut_size(),
            new_shortcut_size: default_new_shortcut_size(),
            paste_offset: default_paste_offset(),
            pick_tolerance: default_pick_tolerance(),
            name_spacing: default_name_spacing(),
        }
    }
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn touch_bounds(&self) -> TouchBounds {
        TouchBounds {
            min_size: self.min_touch_size,
            max_size: self.max_touch_size,
        }
    }

    /// Whether a point lies within the active border on any edge.
    pub fn in_active_border(&self, x: f32, y: f32) -> bool {
        let b = &self.active_borders;
        x <= b.left || x >= 1.0 - b.right || y <= b.bottom || y >= 1.0 - b.top
    }
}
