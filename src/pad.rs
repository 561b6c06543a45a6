use crate::actions::{ActionRequest, ShortcutState};
use crate::data_logger::GestureLogger;
use crate::geometry::{is_close, is_inside, is_inside_tol, BoxPart, PadGeometry, Point, Rect};
use crate::markpad::MarkPad;
use crate::menu::{MenuId, ShortcutId};
use crate::services::DeviceId;
use crate::settings::Settings;
use crate::touch::{filter_touches, FilteredTouches, Touch};

/// Gesture session of one physical touch surface.
///
/// `touch_callback` is a synchronous transition function: it runs once per
/// frame, never blocks, and reaches the rest of the application only
/// through the [`MarkPad`] it is given.
#[derive(Debug)]
pub struct Pad {
    device: DeviceId,
    geometry: PadGeometry,
    touches: FilteredTouches,
    raw_count: usize,
    borders_menu: Option<MenuId>,
    valid_touch: bool,
    unvalid_touch: bool,
    cancelled: bool,
    touch1: Point,
    touch1_id: i32,
    touch_time: f64,
    sel_touch: Option<Touch>,
    opener: Option<ShortcutId>,
    super_opener: Option<ShortcutId>,
    logger: Option<GestureLogger>,
}

impl Pad {
    pub fn new(device: DeviceId, geometry: PadGeometry, settings: &Settings) -> Self {
        let logger = settings.log_data.then(|| {
            GestureLogger::new(settings.log_dir.as_deref().unwrap_or("."))
        });
        Self {
            device,
            geometry,
            touches: FilteredTouches::default(),
            raw_count: 0,
            borders_menu: None,
            valid_touch: false,
            unvalid_touch: false,
            cancelled: false,
            touch1: Point::default(),
            touch1_id: 0,
            touch_time: 0.0,
            sel_touch: None,
            opener: None,
            super_opener: None,
            logger,
        }
    }

    pub fn device(&self) -> DeviceId {
        self.device
    }

    pub fn geometry(&self) -> &PadGeometry {
        &self.geometry
    }

    /// Touches retained by the last frame.
    pub fn touches(&self) -> &[Touch] {
        self.touches.touches()
    }

    pub fn opener(&self) -> Option<ShortcutId> {
        self.opener
    }

    pub fn super_opener(&self) -> Option<ShortcutId> {
        self.super_opener
    }

    pub fn is_valid_touch(&self) -> bool {
        self.valid_touch
    }

    pub fn is_unvalid_touch(&self) -> bool {
        self.unvalid_touch
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// No gesture in progress.
    pub fn is_idle(&self) -> bool {
        !self.valid_touch
            && !self.unvalid_touch
            && !self.cancelled
            && self.opener.is_none()
            && self.super_opener.is_none()
    }

    pub fn borders_menu(&self) -> Option<MenuId> {
        self.borders_menu
    }

    fn reset(&mut self, mp: &mut MarkPad) {
        self.valid_touch = false;
        self.unvalid_touch = false;
        self.cancelled = false;
        self.opener = None;
        self.super_opener = None;
        mp.touch_select(None);
    }

    /// Processes one frame of raw touches.
    pub fn touch_callback(&mut self, mp: &mut MarkPad, raw: &[Touch]) {
        let tracked = self.valid_touch.then_some(self.touch1_id);
        self.touches = filter_touches(raw, &mp.settings().touch_bounds(), tracked);
        self.raw_count = raw.len();
        let count = self.touches.len();

        if mp.is_editing() {
            if mp.can_show_fingers() {
                mp.update_overlay();
            }
            return;
        }

        // inert until every physical contact is gone, filtered or not
        if self.cancelled {
            if raw.is_empty() {
                self.reset(mp);
                mp.cursor().enable_device_for_cursor(self.device);
                tracing::debug!(device = self.device, "cancelled gesture released");
            }
            if mp.is_overlay_shown() {
                mp.update_overlay();
            }
            return;
        }

        if self.unvalid_touch {
            // fingers are still drawn when the hotkey shows the menus
            if mp.hotkey_wants_menu() {
                mp.update_overlay();
            }
            if count == 0 {
                self.valid_touch = false;
                self.unvalid_touch = false;
                self.cancelled = false;
                mp.cursor().enable_device_for_cursor(self.device);
            }
            return;
        }

        // released only by the filter, not by the user
        if count == 0 && !raw.is_empty() {
            return;
        }

        if count > 0 {
            self.track(mp);
        } else {
            self.release(mp);
        }

        if mp.is_overlay_shown() {
            mp.update_overlay();
        }
    }

    fn track(&mut self, mp: &mut MarkPad) {
        let mut current = self.touches.tracked().copied();

        if !self.valid_touch {
            let Some(first) = self.touches.first().copied() else {
                return;
            };
            current = Some(first);
            let settings = mp.settings();
            if settings.in_active_border(first.pos.x, first.pos.y) {
                self.valid_touch = true;
            }

            // away from the borders only with the hotkey or for shortcuts
            // that do not need a border
            let root = mp.root_menu();
            let found = mp.tree().find_shortcut_at(root, first.pos);
            if let Some(s) = found {
                let from_border = mp
                    .tree()
                    .shortcut(s)
                    .map(|sc| sc.touch_from_border())
                    .unwrap_or(true);
                if mp.hotkey_wants_menu() || !from_border {
                    self.valid_touch = true;
                    self.opener = Some(s);
                    if from_border {
                        mp.cursor().disable_device_for_cursor(self.device);
                    }
                }
            }

            if !self.valid_touch {
                self.unvalid_touch = true;
                tracing::trace!(x = first.pos.x, y = first.pos.y, "touch outside active areas");
                return;
            }

            self.touch1 = first.pos;
            self.touch1_id = first.ident;
            self.touch_time = first.time;
            tracing::debug!(opener = ?self.opener, "gesture started");
            if let Some(s) = self.opener {
                self.log_start(mp, s);
            }
        }

        let Some(current) = current else {
            return;
        };

        let min_move = mp.settings().min_movement;
        if self.opener.is_none()
            && self.geometry.squared_distance(self.touch1, current.pos) >= min_move * min_move
        {
            let root = mp.root_menu();
            if let Some(s) = mp.tree().find_shortcut_at(root, current.pos) {
                self.opener = Some(s);
                mp.cursor().disable_device_for_cursor(self.device);
                self.log_start(mp, s);
            }
        }

        let Some(opener) = self.opener else {
            return;
        };
        let Some(menu) = mp.tree().submenu(opener) else {
            return;
        };
        let Some(opener_area) = mp.tree().shortcut(opener).map(|s| *s.area()) else {
            return;
        };
        let touch_open_menu = mp
            .tree()
            .shortcut(opener)
            .map(|s| s.touch_open_menu())
            .unwrap_or(false);

        let menu_not_active = !mp.is_overlay_shown() || mp.current_menu() != menu;
        let dwell_elapsed = current.time - self.touch_time > mp.settings().menu_delay;
        if menu_not_active
            && is_inside(current.pos, &opener_area)
            && (mp.hotkey_wants_menu() || (touch_open_menu && dwell_elapsed))
        {
            tracing::debug!(?menu, "opening menu");
            mp.open_menu(menu, true);
        } else if let Some(s) = mp.tree().find_shortcut_at(menu, current.pos) {
            mp.touch_select(Some(s));
            self.sel_touch = Some(current);

            // cascaded menu: remember the opener of the parent menu
            if let Some(submenu) = mp.tree().submenu(s) {
                self.super_opener = Some(opener);
                self.opener = Some(s);
                self.touch_time = current.time;
                if mp.tree().parent_menu(s) == Some(mp.current_menu()) {
                    mp.open_menu(submenu, true);
                }
            }
        } else {
            mp.touch_select(None);

            // back in the area of the parent opener: reopen its menu
            if let Some(super_opener) = self.super_opener {
                let inside = mp
                    .tree()
                    .shortcut(super_opener)
                    .map(|s| is_inside(current.pos, s.area()))
                    .unwrap_or(false);
                if inside {
                    self.opener = Some(super_opener);
                    self.super_opener = None;
                    if let Some(parent_menu) = mp.tree().submenu(super_opener) {
                        mp.open_menu(parent_menu, true);
                    }
                    if let Some(s) = mp.tree_mut().shortcut_mut(super_opener) {
                        s.set_selected(false);
                    }
                    tracing::debug!(opener = ?super_opener, "back to parent menu");
                }
            }
        }
    }

    fn log_start(&mut self, mp: &MarkPad, start: ShortcutId) {
        let (Some(logger), Some(sc)) = (self.logger.as_mut(), mp.tree().shortcut(start)) else {
            return;
        };
        if let Err(err) = logger.start_gesture(sc.name(), *sc.area()) {
            tracing::warn!(?err, "failed to log gesture start");
        }
    }

    fn release(&mut self, mp: &mut MarkPad) {
        mp.cursor().enable_device_for_cursor(self.device);

        if let (Some(cur), Some(_)) = (mp.current_shortcut(), self.opener) {
            if !self.cancelled && !self.unvalid_touch {
                self.fire(mp, cur);
            }
        }

        if mp.hotkey_wants_menu() {
            mp.set_current_menu(None);
        } else if mp.is_overlay_shown() {
            mp.show_overlay(false);
        }

        self.reset(mp);
        self.sel_touch = None;
    }

    fn fire(&mut self, mp: &mut MarkPad, cur: ShortcutId) {
        let Some(s) = mp.tree().shortcut(cur) else {
            return;
        };
        let name = s.name().to_string();
        let action = s.action().cloned();
        let feedback = s.feedback().map(str::to_string);
        let area = *s.area();
        let command = s.command_name();

        if let Some(logger) = self.logger.as_mut() {
            let shown = mp.is_overlay_shown();
            if let Err(err) = logger.end_gesture(&name, command, area, shown) {
                tracing::warn!(?err, "failed to log gesture end");
            }
        }

        if mp.settings().show_feedback {
            match feedback.as_deref() {
                Some("none") => {}
                Some(text) => mp.show_feedback(text),
                None => mp.show_feedback(&name),
            }
        }

        // the overlay is closed before running the action
        if mp.is_overlay_shown() {
            mp.show_overlay(false);
        }

        let touch = self
            .sel_touch
            .or_else(|| self.touches.first().copied())
            .unwrap_or_else(|| Touch::new(self.touch1_id, self.touch1, self.touch_time));
        tracing::info!(shortcut = %name, "shortcut released");
        mp.exec(ActionRequest {
            shortcut: cur,
            name,
            action,
            touch,
            state: ShortcutState::Up,
        });
    }

    /// Aborts the gesture in progress. The pad stays inert until every
    /// finger is lifted.
    pub fn cancel_touch_gesture(&mut self, mp: &mut MarkPad, close_menu: bool) {
        let touching = self.raw_count > 0;
        self.valid_touch = false;
        self.opener = None;
        self.super_opener = None;
        mp.touch_select(None);
        if touching {
            self.cancelled = true;
        } else {
            self.unvalid_touch = false;
            self.cancelled = false;
        }
        if close_menu {
            mp.show_overlay(false);
            mp.set_current_menu(None);
        }
        tracing::debug!(device = self.device, touching, "gesture cancelled");
    }

    /// Builds, or refreshes, the four uneditable shortcuts that materialise
    /// the active borders.
    pub fn init_active_borders(&mut self, mp: &mut MarkPad) -> Option<MenuId> {
        let menu = match self.borders_menu.filter(|m| mp.tree().contains_menu(*m)) {
            Some(menu) => menu,
            None => {
                let tree = mp.tree_mut();
                let menu = tree.new_menu();
                for name in ["Left", "Right", "Top", "Bottom"] {
                    if let Some(s) = tree.add_new_shortcut(menu, name) {
                        if let Some(sc) = tree.shortcut_mut(s) {
                            sc.set_cannot_edit(true);
                        }
                    }
                }
                self.borders_menu = Some(menu);
                menu
            }
        };

        let b = mp.settings().active_borders;
        let limits = mp.limits();
        let areas = [
            ("Left", Rect::new(0.0, 0.0, b.left, 1.0)),
            ("Right", Rect::new(1.0 - b.right, 0.0, b.right, 1.0)),
            ("Top", Rect::new(0.0, 1.0 - b.top, 1.0, b.top)),
            ("Bottom", Rect::new(0.0, 0.0, 1.0, b.bottom)),
        ];
        for (name, area) in areas {
            let Some(id) = mp.tree().find_shortcut_named(menu, name) else {
                continue;
            };
            if let Some(s) = mp.tree_mut().shortcut_mut(id) {
                s.set_area(area, &limits);
            }
        }
        Some(menu)
    }

    // - - - editor picking

    /// Which part of the box of `shortcut` is under `pos`.
    pub fn is_in_box(&self, mp: &MarkPad, pos: Point, shortcut: ShortcutId) -> BoxPart {
        let Some(s) = mp.tree().shortcut(shortcut) else {
            return BoxPart::OUTSIDE;
        };
        let xtol = mp.settings().pick_tolerance;
        let ytol = xtol / self.geometry.ratio();
        let a = *s.area();

        if !is_inside_tol(pos, &a, xtol, ytol) {
            return BoxPart::OUTSIDE;
        }
        if is_inside_tol(pos, &a, -xtol, -ytol) {
            return BoxPart::INSIDE;
        }
        if is_close(pos, a.x, a.y, xtol, ytol) {
            BoxPart::BOTTOM_LEFT
        } else if is_close(pos, a.right(), a.y, xtol, ytol) {
            BoxPart::BOTTOM_RIGHT
        } else if is_close(pos, a.x, a.top(), xtol, ytol) {
            BoxPart::TOP_LEFT
        } else if is_close(pos, a.right(), a.top(), xtol, ytol) {
            BoxPart::TOP_RIGHT
        } else if is_inside(pos, &Rect::new(a.x - xtol, a.y, 2.0 * xtol, a.height)) {
            BoxPart::LEFT
        } else if is_inside(pos, &Rect::new(a.right() - xtol, a.y, 2.0 * xtol, a.height)) {
            BoxPart::RIGHT
        } else if is_inside(pos, &Rect::new(a.x, a.y - ytol, a.width, 2.0 * ytol)) {
            BoxPart::BOTTOM
        } else if is_inside(pos, &Rect::new(a.x, a.top() - ytol, a.width, 2.0 * ytol)) {
            BoxPart::TOP
        } else {
            BoxPart::OUTSIDE
        }
    }

    /// Label of `shortcut`, or the square menu button right of the label
    /// for shortcuts that open a menu.
    pub fn is_in_title(&self, mp: &MarkPad, pos: Point, shortcut: ShortcutId) -> BoxPart {
        let Some(s) = mp.tree().shortcut(shortcut) else {
            return BoxPart::OUTSIDE;
        };
        let n = *s.name_area();
        if is_inside(pos, &n) {
            return BoxPart::TITLE;
        }
        if s.submenu().is_some() {
            let button = Rect::new(n.right(), n.y, n.height * self.geometry.ratio(), n.height);
            if is_inside(pos, &button) {
                return BoxPart::MENU_BTN;
            }
        }
        BoxPart::OUTSIDE
    }

    /// Shortcut of the current menu under `pos` for the editor: labels first,
    /// then the current shortcut, then boxes, then the opener of the menu.
    pub fn is_in_shortcut(&self, mp: &MarkPad, pos: Point) -> Option<(ShortcutId, BoxPart)> {
        let menu = mp.current_menu();
        let shortcuts = mp.tree().shortcuts(menu);

        for id in shortcuts {
            let part = self.is_in_title(mp, pos, *id);
            if !part.is_outside() {
                return Some((*id, part));
            }
        }

        let title_or_box = |id: ShortcutId| {
            let part = self.is_in_title(mp, pos, id);
            if part.is_outside() {
                self.is_in_box(mp, pos, id)
            } else {
                part
            }
        };

        if let Some(cur) = mp.current_shortcut() {
            let part = title_or_box(cur);
            if !part.is_outside() {
                return Some((cur, part));
            }
        }

        for id in shortcuts {
            let part = self.is_in_box(mp, pos, *id);
            if !part.is_outside() {
                return Some((*id, part));
            }
        }

        let opener = mp.current_menu_opener()?;
        let part = title_or_box(opener);
        (!part.is_outside()).then_some((opener, part))
    }
}
