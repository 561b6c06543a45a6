use super::tree::MenuId;
use crate::actions::ShortcutAction;
use crate::geometry::{Rect, Size};

/// Limits applied by the geometry setters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortcutLimits {
    pub min_size: Size,
    pub name_spacing: f32,
}

impl Default for ShortcutLimits {
    fn default() -> Self {
        Self {
            min_size: Size::new(0.01, 0.01),
            name_spacing: 0.004,
        }
    }
}

/// A rectangular region of a menu bound to an action.
#[derive(Debug, Clone, PartialEq)]
pub struct Shortcut {
    name: String,
    area: Rect,
    name_area: Rect,
    action: Option<ShortcutAction>,
    feedback: Option<String>,
    modifiers: u8,
    selected: bool,
    cannot_edit: bool,
    touch_open_menu: bool,
    touch_from_border: bool,
    pub(super) parent_menu: Option<MenuId>,
    pub(super) submenu: Option<MenuId>,
}

impl Shortcut {
    pub(super) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            area: Rect::default(),
            name_area: Rect::default(),
            action: None,
            feedback: None,
            modifiers: 0,
            selected: false,
            cannot_edit: false,
            touch_open_menu: true,
            touch_from_border: true,
            parent_menu: None,
            submenu: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames without touching the label layout, see `MarkPad::rename_shortcut`.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn area(&self) -> &Rect {
        &self.area
    }

    pub fn name_area(&self) -> &Rect {
        &self.name_area
    }

    pub fn action(&self) -> Option<&ShortcutAction> {
        self.action.as_ref()
    }

    pub fn set_action(&mut self, action: Option<ShortcutAction>) {
        self.action = action;
    }

    pub fn command_name(&self) -> &'static str {
        self.action.as_ref().map(|a| a.command_name()).unwrap_or("")
    }

    /// Custom feedback text; `"none"` disables feedback for this shortcut.
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn set_feedback(&mut self, feedback: Option<String>) {
        self.feedback = feedback;
    }

    pub fn modifiers(&self) -> u8 {
        self.modifiers
    }

    pub fn set_modifiers(&mut self, modifiers: u8) {
        self.modifiers = modifiers;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, state: bool) {
        self.selected = state;
    }

    /// Synthetic shortcuts (active borders) cannot be deleted or copied.
    pub fn cannot_edit(&self) -> bool {
        self.cannot_edit
    }

    pub fn set_cannot_edit(&mut self, state: bool) {
        self.cannot_edit = state;
    }

    /// Does dwelling on this shortcut open its menu.
    pub fn touch_open_menu(&self) -> bool {
        self.touch_open_menu
    }

    pub fn set_touch_open_menu(&mut self, state: bool) {
        self.touch_open_menu = state;
    }

    /// Must a gesture on this shortcut start from an active border.
    pub fn touch_from_border(&self) -> bool {
        self.touch_from_border
    }

    pub fn set_touch_from_border(&mut self, state: bool) {
        self.touch_from_border = state;
    }

    /// The menu this shortcut opens, if any.
    pub fn submenu(&self) -> Option<MenuId> {
        self.submenu
    }

    /// The menu containing this shortcut. Kept after removal so the
    /// shortcut can be restored where it was.
    pub fn parent_menu(&self) -> Option<MenuId> {
        self.parent_menu
    }

    // - - - geometry

    pub fn set_x(&mut self, x: f32, move_name: bool, limits: &ShortcutLimits) {
        let mut x = x;
        if x < 0.0 {
            x = 0.0;
        } else if x + self.area.width > 1.0 {
            x = 1.0 - self.area.width;
            if x >= 1.0 - limits.min_size.width {
                x = 1.0 - limits.min_size.width;
            }
        }
        if move_name {
            self.name_area.x += x - self.area.x;
            self.area.x = x;
        } else {
            self.area.x = x;
            self.set_name_x(self.name_area.x, limits);
        }
    }

    pub fn set_y(&mut self, y: f32, move_name: bool, limits: &ShortcutLimits) {
        let mut y = y;
        if y < 0.0 {
            y = 0.0;
        } else if y + self.area.height > 1.0 {
            y = 1.0 - self.area.height;
            if y >= 1.0 - limits.min_size.height {
                y = 1.0 - limits.min_size.height;
            }
        }
        if move_name {
            self.name_area.y += y - self.area.y;
            self.area.y = y;
        } else {
            self.area.y = y;
            self.set_name_y(self.name_area.y, limits);
        }
    }

    pub fn set_pos(&mut self, x: f32, y: f32, limits: &ShortcutLimits) {
        self.set_x(x, true, limits);
        self.set_y(y, true, limits);
    }

    pub fn move_by(&mut self, dx: f32, dy: f32, limits: &ShortcutLimits) {
        self.set_x(self.area.x + dx, true, limits);
        self.set_y(self.area.y + dy, true, limits);
    }

    pub fn set_width(&mut self, width: f32, move_name: bool, limits: &ShortcutLimits) {
        let mut width = width;
        if width < limits.min_size.width {
            width = limits.min_size.width;
        } else if self.area.x + width > 1.0 {
            width = 1.0 - self.area.x;
        }
        let old = self.area.width;
        self.area.width = width;
        if move_name {
            let factor = scale_factor(width, old, self.name_area.width);
            let x = self.area.x + (self.name_area.x - self.area.x) * factor;
            self.set_name_x(x, limits);
        } else {
            self.set_name_x(self.name_area.x, limits);
        }
    }

    pub fn set_height(&mut self, height: f32, move_name: bool, limits: &ShortcutLimits) {
        let mut height = height;
        if height < limits.min_size.height {
            height = limits.min_size.height;
        } else if self.area.y + height > 1.0 {
            height = 1.0 - self.area.y;
        }
        let old = self.area.height;
        self.area.height = height;
        if move_name {
            let factor = scale_factor(height, old, self.name_area.height);
            let y = self.area.y + (self.name_area.y - self.area.y) * factor;
            self.set_name_y(y, limits);
        } else {
            self.set_name_y(self.name_area.y, limits);
        }
    }

    pub fn set_size(&mut self, width: f32, height: f32, limits: &ShortcutLimits) {
        self.set_width(width, true, limits);
        self.set_height(height, true, limits);
    }

    pub fn set_area(&mut self, area: Rect, limits: &ShortcutLimits) {
        self.set_x(area.x, true, limits);
        self.set_y(area.y, true, limits);
        self.set_width(area.width, true, limits);
        self.set_height(area.height, true, limits);
    }

    /// Plain copy, nothing is checked.
    pub fn copy_area(&mut self, area: Rect) {
        self.area = area;
    }

    /// Grows (or shrinks, when negative) the box from its left or right side.
    pub fn change_width(&mut self, delta: f32, from_left: bool, limits: &ShortcutLimits) {
        let mut delta = delta;
        let mut new_x = self.area.x;
        if from_left {
            if new_x - delta < 0.0 {
                delta = new_x;
                new_x = 0.0;
            } else {
                new_x -= delta;
            }
        }
        let mut new_w = self.area.width + delta;
        if new_w < limits.min_size.width {
            new_w = limits.min_size.width;
            delta = new_w - self.area.width;
            if from_left {
                new_x = self.area.x - delta;
            }
        }
        let (old_x, old_w) = (self.area.x, self.area.width);
        self.area.x = new_x;
        self.area.width = new_w;
        let factor = scale_factor(new_w, old_w, self.name_area.width);
        self.set_name_x(new_x + (self.name_area.x - old_x) * factor, limits);
    }

    /// Grows (or shrinks, when negative) the box from its bottom or top side.
    pub fn change_height(&mut self, delta: f32, from_bottom: bool, limits: &ShortcutLimits) {
        let mut delta = delta;
        let mut new_y = self.area.y;
        if from_bottom {
            if new_y - delta < 0.0 {
                delta = new_y;
                new_y = 0.0;
            } else {
                new_y -= delta;
            }
        }
        let mut new_h = self.area.height + delta;
        if new_h < limits.min_size.height {
            new_h = limits.min_size.height;
            delta = new_h - self.area.height;
            if from_bottom {
                new_y = self.area.y - delta;
            }
        }
        let (old_y, old_h) = (self.area.y, self.area.height);
        self.area.y = new_y;
        self.area.height = new_h;
        let factor = scale_factor(new_h, old_h, self.name_area.height);
        self.set_name_y(new_y + (self.name_area.y - old_y) * factor, limits);
    }

    // - - - label

    /// Places the label, kept inside the box. When the box is too narrow the
    /// label is left aligned.
    pub fn set_name_x(&mut self, x: f32, limits: &ShortcutLimits) {
        let mut x = x;
        let sp = limits.name_spacing;
        if x + self.name_area.width > self.area.right() - sp {
            x = self.area.right() - sp - self.name_area.width;
        }
        if x < self.area.x + sp {
            x = self.area.x + sp;
        }
        self.name_area.x = x;
    }

    pub fn set_name_y(&mut self, y: f32, limits: &ShortcutLimits) {
        let mut y = y;
        let sp = limits.name_spacing;
        if y + self.name_area.height > self.area.top() - sp {
            y = self.area.top() - sp - self.name_area.height;
        }
        if y < self.area.y + sp {
            y = self.area.y + sp;
        }
        self.name_area.y = y;
    }

    pub fn move_name(&mut self, dx: f32, dy: f32, constrained: bool, limits: &ShortcutLimits) {
        if constrained {
            self.set_name_x(self.name_area.x + dx, limits);
            self.set_name_y(self.name_area.y + dy, limits);
        } else {
            self.name_area.x += dx;
            self.name_area.y += dy;
        }
    }

    /// Resizes the label to `label` and optionally centers it in the box.
    pub fn center_name(&mut self, label: Size, xcenter: bool, ycenter: bool) {
        self.name_area.width = label.width;
        self.name_area.height = label.height;
        if xcenter {
            self.name_area.x = self.area.x + self.area.width / 2.0 - label.width / 2.0;
        }
        if ycenter {
            self.name_area.y = self.area.y + self.area.height / 2.0 - label.height / 2.0;
        }
    }

    pub fn copy_name_area(&mut self, name_area: Rect) {
        self.name_area = name_area;
    }
}

/// Ratio used to keep the label at the same relative place after a resize.
fn scale_factor(new_len: f32, old_len: f32, label_len: f32) -> f32 {
    let denom = old_len - label_len;
    if denom.abs() <= f32::EPSILON {
        1.0
    } else {
        (new_len - label_len) / denom
    }
}
