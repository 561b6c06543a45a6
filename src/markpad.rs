use crate::actions::{ActionExecutor, ActionRequest, NoopExecutor};
use crate::geometry::{is_inside_tol, BoxPart, PadGeometry, Point, Rect};
use crate::hotkey::{self, CTRL, FN, SHIFT};
use crate::menu::{
    approximate_label_size, LayoutCache, MenuId, MenuTree, Shortcut, ShortcutId, ShortcutLimits,
    TextMeasurer,
};
use crate::messages::{OverlayMode, UiEvent, UiSink};
use crate::services::{CursorControl, NoCursorControl};
use crate::settings::Settings;
use crate::visibility::OverlayVisibility;
use hashlink::LinkedHashSet;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    None,
    Shortcuts,
    Borders,
    Guides,
}

/// Interactive shortcut creation waiting for a position or a guide area.
#[derive(Debug, Clone, Copy)]
struct Creation {
    target: MenuId,
    from_guide: bool,
}

#[derive(Debug, Clone, Copy)]
enum Reduce {
    Min,
    Max,
    Mean,
}

/// Menus, selection and clipboard of the application.
///
/// `cur_shortcut` and `selection` are two exclusive representations of what
/// is selected: at most one of them is non-empty at any time.
pub struct MarkPad {
    settings: Settings,
    tree: MenuTree,
    layout: LayoutCache,
    measurer: Box<dyn TextMeasurer + Send>,
    root_menu: MenuId,
    borders_menu: Option<MenuId>,
    guide: Option<MenuId>,
    current_menu: MenuId,
    cur_shortcut: Option<ShortcutId>,
    selection: LinkedHashSet<ShortcutId>,
    delete_buffer: Vec<ShortcutId>,
    paste_buffer: Vec<ShortcutId>,
    cut_pending: Vec<ShortcutId>,
    paste_count: u32,
    edit_mode: EditMode,
    visibility: Arc<OverlayVisibility>,
    want_fingers: bool,
    creating: Option<Creation>,
    pointer: Point,
    geometry: PadGeometry,
    show_mask: u32,
    edit_mask: u32,
    ui: UiSink,
    executor: Box<dyn ActionExecutor>,
    cursor: Box<dyn CursorControl>,
}

impl MarkPad {
    pub fn new(settings: Settings, ui: UiSink) -> Self {
        let mut tree = MenuTree::new();
        let root_menu = tree.new_main_menu();
        let show_mask = hotkey::parse_hotkey(&settings.show_hotkey).unwrap_or_else(|| {
            tracing::warn!(hotkey = %settings.show_hotkey, "invalid show hotkey, using fn+ctrl");
            FN | CTRL
        });
        let edit_mask = hotkey::parse_hotkey(&settings.edit_hotkey).unwrap_or_else(|| {
            tracing::warn!(hotkey = %settings.edit_hotkey, "invalid edit hotkey, using shift");
            SHIFT
        });
        let want_fingers = settings.show_fingers;
        Self {
            settings,
            tree,
            layout: LayoutCache::new(),
            measurer: Box::new(approximate_label_size),
            root_menu,
            borders_menu: None,
            guide: None,
            current_menu: root_menu,
            cur_shortcut: None,
            selection: LinkedHashSet::new(),
            delete_buffer: Vec::new(),
            paste_buffer: Vec::new(),
            cut_pending: Vec::new(),
            paste_count: 0,
            edit_mode: EditMode::None,
            visibility: Arc::new(OverlayVisibility::default()),
            want_fingers,
            creating: None,
            pointer: Point::default(),
            geometry: PadGeometry::default(),
            show_mask,
            edit_mask,
            ui,
            executor: Box::new(NoopExecutor),
            cursor: Box::new(NoCursorControl),
        }
    }

    pub fn with_executor(mut self, executor: Box<dyn ActionExecutor>) -> Self {
        self.executor = executor;
        self
    }

    pub fn with_cursor_control(mut self, cursor: Box<dyn CursorControl>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Installs the renderer's text measurer and drops cached label sizes.
    pub fn set_measurer<M: TextMeasurer + Send + 'static>(&mut self, measurer: M) {
        self.measurer = Box::new(measurer);
        self.layout.clear();
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut MenuTree {
        &mut self.tree
    }

    pub fn limits(&self) -> ShortcutLimits {
        ShortcutLimits {
            min_size: self.settings.min_shortcut_size,
            name_spacing: self.settings.name_spacing,
        }
    }

    pub fn visibility(&self) -> Arc<OverlayVisibility> {
        Arc::clone(&self.visibility)
    }

    pub fn geometry(&self) -> PadGeometry {
        self.geometry
    }

    pub(crate) fn set_geometry(&mut self, geometry: PadGeometry) {
        self.geometry = geometry;
    }

    pub(crate) fn cursor(&self) -> &dyn CursorControl {
        self.cursor.as_ref()
    }

    pub(crate) fn exec(&self, request: ActionRequest) {
        self.executor.exec(request);
    }

    pub(crate) fn post(&self, event: UiEvent) {
        self.ui.post(event);
    }

    pub fn update_overlay(&self) {
        self.ui.post(UiEvent::Refresh);
    }

    pub fn show_feedback(&self, text: &str) {
        self.ui.post(UiEvent::Feedback(text.to_string()));
    }

    // - - - hotkeys and modes

    pub fn set_hotkeys(&mut self, show_mask: u32, edit_mask: u32) {
        self.show_mask = show_mask;
        self.edit_mask = edit_mask;
    }

    pub fn show_mask(&self) -> u32 {
        self.show_mask
    }

    pub fn edit_mask(&self) -> u32 {
        self.edit_mask
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    pub fn is_editing(&self) -> bool {
        self.edit_mode != EditMode::None
    }

    /// Fingers are drawn outside editing, or while editing when asked for.
    pub fn can_show_fingers(&self) -> bool {
        self.edit_mode == EditMode::None || self.want_fingers
    }

    pub fn show_fingers(&mut self, state: bool) {
        self.want_fingers = state;
    }

    /// First half of a mode switch; the caller then cancels the gesture of
    /// the current pad before calling [`MarkPad::finish_edit`].
    pub(crate) fn begin_edit(&mut self, mode: EditMode) {
        self.edit_mode = mode;
        self.visibility.set_touch(false);
        self.visibility.set_hotkey(false);
    }

    pub(crate) fn finish_edit(&mut self, borders_menu: Option<MenuId>) {
        let editing = self.is_editing();
        if borders_menu.is_some() {
            self.borders_menu = borders_menu;
        }
        self.visibility.set_editing(editing);
        self.set_current_menu(None);
        let mode = if editing {
            OverlayMode::Edit
        } else {
            OverlayMode::Hide
        };
        self.ui.post(UiEvent::ShowOverlay(mode));
        self.ui.post(UiEvent::EditorShown(editing));
        tracing::info!(mode = ?self.edit_mode, "edit mode changed");
    }

    // - - - overlay

    pub fn is_overlay_shown(&self) -> bool {
        self.visibility.is_shown()
    }

    pub fn hotkey_wants_menu(&self) -> bool {
        self.visibility.hotkey_wants()
    }

    /// Touch-driven visibility. Ignored by the renderer while the hotkey or
    /// the editor keeps the overlay open.
    pub fn show_overlay(&mut self, state: bool) {
        self.visibility.set_touch(state);
        if self.visibility.hotkey_wants() || self.is_editing() {
            return;
        }
        let mode = if state {
            OverlayMode::Menus
        } else {
            OverlayMode::Hide
        };
        self.ui.post(UiEvent::ShowOverlay(mode));
    }

    /// Hotkey-driven visibility, also resets the current menu to the root.
    pub fn show_overlay_on_hotkey(&mut self, state: bool) {
        if self.visibility.hotkey_wants() == state {
            return;
        }
        self.visibility.set_hotkey(state);
        if self.visibility.touch_wants() || self.is_editing() {
            return;
        }
        self.set_current_menu(None);
        let mode = if state {
            OverlayMode::Menus
        } else {
            OverlayMode::Hide
        };
        self.ui.post(UiEvent::ShowOverlay(mode));
    }

    // - - - menus

    /// Root menu shared by every pad.
    pub fn root_menu(&self) -> MenuId {
        self.root_menu
    }

    /// Menu shown first, which depends on the edit mode.
    pub fn main_menu(&self) -> MenuId {
        if let Some(guide) = self.guide {
            if self.creating.is_some() || self.edit_mode == EditMode::Guides {
                return guide;
            }
        }
        if self.edit_mode == EditMode::Borders {
            if let Some(borders) = self.borders_menu {
                return borders;
            }
        }
        self.root_menu
    }

    pub fn borders_menu(&self) -> Option<MenuId> {
        self.borders_menu
    }

    pub fn guide(&self) -> Option<MenuId> {
        self.guide
    }

    pub fn set_guide(&mut self, guide: Option<MenuId>) {
        self.guide = guide.filter(|g| self.tree.contains_menu(*g));
    }

    pub fn current_menu(&self) -> MenuId {
        self.current_menu
    }

    pub fn current_menu_opener(&self) -> Option<ShortcutId> {
        self.tree.opener(self.current_menu)
    }

    /// Makes `menu`, or the main menu, current and clears the current shortcut.
    pub fn set_current_menu(&mut self, menu: Option<MenuId>) {
        self.current_menu = menu
            .filter(|m| self.tree.contains_menu(*m))
            .unwrap_or_else(|| self.main_menu());
        if let Some(cur) = self.cur_shortcut.take() {
            if let Some(s) = self.tree.shortcut_mut(cur) {
                s.set_selected(false);
            }
        }
        self.ui.post(UiEvent::MenuActivated(self.current_menu));
        self.ui.post(UiEvent::ShortcutSelected(None));
    }

    pub fn create_menu(&mut self, opener: ShortcutId) -> Option<MenuId> {
        self.tree.create_menu(opener)
    }

    /// Sub-menu of the main-menu shortcut called `name`.
    pub fn find_menu(&self, name: &str) -> Option<MenuId> {
        if name.is_empty() {
            return None;
        }
        let main = self.main_menu();
        self.tree.shortcuts(main).iter().find_map(|id| {
            let s = self.tree.shortcut(*id)?;
            if s.name() == name {
                s.submenu()
            } else {
                None
            }
        })
    }

    pub fn opens_current_menu(&self, shortcut: ShortcutId) -> bool {
        self.tree.submenu(shortcut) == Some(self.current_menu)
    }

    pub fn is_menu_opened(&self, menu: MenuId) -> bool {
        self.current_menu == menu
    }

    pub fn is_cascaded(&self, menu: MenuId) -> bool {
        self.tree.is_cascaded(menu)
    }

    /// Opens `menu`, or with `false` goes back to the menu of its opener.
    pub fn open_menu(&mut self, menu: MenuId, state: bool) {
        if state {
            self.set_current_menu(Some(menu));
        } else if let Some(parent) = self.tree.opener(menu).and_then(|o| self.tree.parent_menu(o)) {
            self.set_current_menu(Some(parent));
        }
        self.clear_multi_selection();
        if !self.is_overlay_shown() {
            self.show_overlay(true);
        } else {
            self.update_overlay();
        }
    }

    pub fn open_close_menu(&mut self, menu: MenuId) {
        let opened = self.is_menu_opened(menu);
        self.open_menu(menu, !opened);
    }

    // - - - selection

    pub fn current_shortcut(&self) -> Option<ShortcutId> {
        self.cur_shortcut
    }

    pub fn is_shortcut_selected(&self) -> bool {
        self.cur_shortcut.is_some() || !self.selection.is_empty()
    }

    /// Shortcuts of the multi-selection in the order they were added.
    pub fn multi_selection(&self) -> Vec<ShortcutId> {
        self.selection.iter().copied().collect()
    }

    /// Single selection. While a shortcut is being created in two steps, the
    /// selected shortcut is the guide area that completes the creation.
    pub fn select_shortcut(&mut self, shortcut: Option<ShortcutId>) {
        if let Some(cur) = self.cur_shortcut {
            if let Some(s) = self.tree.shortcut_mut(cur) {
                s.set_selected(false);
            }
        }
        self.clear_multi_selection();

        if self.creating.is_some() {
            self.cur_shortcut = self.create_shortcut_second_step(shortcut);
        } else {
            self.cur_shortcut = shortcut.filter(|s| self.tree.contains(*s));
        }
        if let Some(cur) = self.cur_shortcut {
            if let Some(s) = self.tree.shortcut_mut(cur) {
                s.set_selected(true);
            }
        }
        self.ui.post(UiEvent::ShortcutSelected(self.cur_shortcut));
    }

    /// Adds `shortcut` to, or removes it from, the multi-selection. The
    /// current shortcut, if any, moves into the multi-selection.
    pub fn multi_selects(&mut self, shortcut: Option<ShortcutId>, add: bool) {
        if self.creating.is_some() {
            self.select_shortcut(shortcut);
            return;
        }
        if let Some(s) = shortcut {
            if add {
                if let Some(cur) = self.cur_shortcut {
                    if let Some(c) = self.tree.shortcut_mut(cur) {
                        c.set_selected(false);
                    }
                    self.add_to_multi_selection(cur);
                }
                self.add_to_multi_selection(s);
            } else {
                if let Some(cur) = self.cur_shortcut {
                    if let Some(c) = self.tree.shortcut_mut(cur) {
                        c.set_selected(false);
                    }
                }
                self.remove_from_multi_selection(s);
            }
        }
        self.cur_shortcut = None;
        self.ui.post(UiEvent::ShortcutSelected(None));
    }

    fn add_to_multi_selection(&mut self, shortcut: ShortcutId) {
        let protected = self.opens_current_menu(shortcut);
        let Some(s) = self.tree.shortcut_mut(shortcut) else {
            return;
        };
        if s.is_selected() {
            return;
        }
        if protected {
            s.set_selected(false);
            return;
        }
        s.set_selected(true);
        self.selection.insert(shortcut);
    }

    fn remove_from_multi_selection(&mut self, shortcut: ShortcutId) {
        if self.selection.remove(&shortcut) {
            if let Some(s) = self.tree.shortcut_mut(shortcut) {
                s.set_selected(false);
            }
        }
    }

    pub fn clear_multi_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let ids: Vec<ShortcutId> = self.selection.iter().copied().collect();
        for id in ids {
            if let Some(s) = self.tree.shortcut_mut(id) {
                s.set_selected(false);
            }
            if self.cur_shortcut == Some(id) {
                self.cur_shortcut = None;
            }
        }
        self.selection.clear();
    }

    pub fn is_in_multi_selection(&self, point: Point, xtol: f32, ytol: f32) -> bool {
        self.selection.iter().any(|id| {
            self.tree
                .shortcut(*id)
                .map(|s| is_inside_tol(point, s.area(), xtol, ytol))
                .unwrap_or(false)
        })
    }

    /// Current shortcut as tracked by a gesture. Unlike editor selection it
    /// does not flag the shortcut as selected.
    pub(crate) fn touch_select(&mut self, shortcut: Option<ShortcutId>) {
        if self.cur_shortcut == shortcut {
            return;
        }
        if let Some(old) = self.cur_shortcut {
            if let Some(s) = self.tree.shortcut_mut(old) {
                s.set_selected(false);
            }
        }
        if shortcut.is_some() {
            self.clear_multi_selection();
        }
        self.cur_shortcut = shortcut;
        self.ui.post(UiEvent::ShortcutSelected(shortcut));
    }

    // - - - labels

    /// Resizes the label of `shortcut` to its measured text and optionally
    /// centers it.
    pub fn center_name(&mut self, shortcut: ShortcutId, xcenter: bool, ycenter: bool) -> bool {
        let Some(name) = self.tree.shortcut(shortcut).map(|s| s.name().to_string()) else {
            return false;
        };
        let label = self
            .layout
            .label_size(shortcut, &name, self.measurer.as_ref());
        match self.tree.shortcut_mut(shortcut) {
            Some(s) => {
                s.center_name(label, xcenter, ycenter);
                true
            }
            None => false,
        }
    }

    pub fn rename_shortcut(&mut self, shortcut: ShortcutId, name: &str) -> bool {
        match self.tree.shortcut_mut(shortcut) {
            Some(s) => s.set_name(name),
            None => return false,
        }
        self.layout.invalidate(shortcut);
        self.center_name(shortcut, false, false);
        let limits = self.limits();
        if let Some(s) = self.tree.shortcut_mut(shortcut) {
            let name_area = *s.name_area();
            s.set_name_x(name_area.x, &limits);
            s.set_name_y(name_area.y, &limits);
        }
        true
    }

    // - - - creation

    pub fn is_creating_shortcut(&self) -> bool {
        self.creating.is_some()
    }

    pub fn is_creating_from_guide(&self) -> bool {
        self.creating.map(|c| c.from_guide).unwrap_or(false)
    }

    pub fn creating_actual_menu(&self) -> Option<MenuId> {
        self.creating.map(|c| c.target)
    }

    /// Pointer position used when a two-step creation has no guide.
    pub fn set_pointer_pos(&mut self, pos: Point) {
        self.pointer = pos;
    }

    /// Creates a shortcut in the current menu at `pos`, or from the guide area
    /// under `pos`. When that is not possible, or with `two_steps`, creation
    /// waits for the next [`MarkPad::select_shortcut`].
    pub fn create_shortcut(&mut self, pos: Point, two_steps: bool) -> Option<ShortcutId> {
        let menu = self.current_menu;
        if self.creating.is_some() || !self.tree.contains_menu(menu) {
            return None;
        }
        let use_guide = self.edit_mode != EditMode::Guides && self.guide.is_some();
        let created = if two_steps {
            let guide = if use_guide { self.find_guide(menu) } else { None };
            self.create_shortcut_first_step(menu, guide);
            None
        } else if use_guide {
            match self.find_guide_area(menu, pos) {
                Some(area) => self.create_shortcut_from_guide(menu, area),
                None => {
                    let guide = self.find_guide(menu);
                    self.create_shortcut_first_step(menu, guide);
                    None
                }
            }
        } else {
            self.create_shortcut_at_pos(menu, pos)
        };
        self.update_overlay();
        created
    }

    fn create_shortcut_first_step(&mut self, menu: MenuId, guide: Option<MenuId>) {
        let from_guide = guide.is_some();
        if let Some(guide) = guide {
            self.set_current_menu(Some(guide));
            self.select_shortcut(None);
        }
        self.creating = Some(Creation {
            target: menu,
            from_guide,
        });
        self.ui.post(UiEvent::EditorHidden(true));
    }

    fn create_shortcut_second_step(&mut self, guide_area: Option<ShortcutId>) -> Option<ShortcutId> {
        let creation = self.creating.take()?;
        let created = if !creation.from_guide {
            self.create_shortcut_at_pos(creation.target, self.pointer)
        } else {
            let target_is_main = self
                .tree
                .menu(creation.target)
                .map(|m| m.is_main_menu())
                .unwrap_or(false);
            match guide_area {
                // openers of the guide only make sense in the main menu
                Some(area) if self.tree.submenu(area).is_none() || target_is_main => {
                    self.create_shortcut_from_guide(creation.target, area)
                }
                _ => None,
            }
        };
        self.creating = Some(creation);
        self.cancel_create_shortcut();
        created
    }

    pub fn cancel_create_shortcut(&mut self) {
        if let Some(creation) = self.creating.take() {
            self.set_current_menu(Some(creation.target));
        }
        self.ui.post(UiEvent::EditorHidden(false));
        self.update_overlay();
    }

    fn create_shortcut_from_guide(&mut self, menu: MenuId, guide_area: ShortcutId) -> Option<ShortcutId> {
        let (area, name_area, opens_menu) = {
            let g = self.tree.shortcut(guide_area)?;
            (*g.area(), *g.name_area(), g.submenu().is_some())
        };
        let s = self.tree.add_new_shortcut(menu, "NoName")?;
        if let Some(sc) = self.tree.shortcut_mut(s) {
            sc.copy_area(area);
        }
        self.center_name(s, false, false);
        let limits = self.limits();
        if let Some(sc) = self.tree.shortcut_mut(s) {
            sc.set_name_x(name_area.x, &limits);
            sc.set_name_y(name_area.y, &limits);
        }
        if opens_menu {
            self.tree.create_menu(s);
        }
        tracing::debug!(shortcut = ?s, "shortcut created from guide");
        Some(s)
    }

    fn create_shortcut_at_pos(&mut self, menu: MenuId, pos: Point) -> Option<ShortcutId> {
        let size = self.settings.new_shortcut_size;
        let s = self.tree.add_new_shortcut(menu, "NoName")?;
        let limits = self.limits();
        if let Some(sc) = self.tree.shortcut_mut(s) {
            let area = Rect::new(
                pos.x - size.width / 2.0,
                pos.y - size.height / 2.0,
                size.width,
                size.height,
            );
            sc.set_area(area, &limits);
        }
        self.center_name(s, true, true);
        tracing::debug!(shortcut = ?s, "shortcut created");
        Some(s)
    }

    // - - - guides

    /// Guide menu matching `menu`: the whole guide for the main menu,
    /// otherwise the guide sub-menu whose opener is nearest to the opener of
    /// `menu`.
    pub fn find_guide(&self, menu: MenuId) -> Option<MenuId> {
        let guide = self.guide?;
        let m = self.tree.menu(menu)?;
        if m.is_main_menu() {
            return Some(guide);
        }
        let opener = m.opener()?;
        let center = self.tree.shortcut(opener)?.area().center();
        let mut min_dist = 1.0;
        let mut template = None;
        for id in self.tree.shortcuts(guide) {
            let Some(s) = self.tree.shortcut(*id) else {
                continue;
            };
            let d = self.geometry.squared_distance(s.area().center(), center);
            if d < min_dist {
                min_dist = d;
                template = s.submenu();
            }
        }
        template
    }

    pub fn find_guide_area(&self, menu: MenuId, pos: Point) -> Option<ShortcutId> {
        let guide_menu = self.find_guide(menu)?;
        self.tree.find_shortcut_at(guide_menu, pos)
    }

    /// Snaps a shortcut to the guide area under its center.
    pub fn adjust_box_to_guide(&mut self, shortcut: ShortcutId) -> bool {
        let Some(s) = self.tree.shortcut(shortcut) else {
            return false;
        };
        let Some(parent) = s.parent_menu() else {
            return false;
        };
        let middle = s.area().center();
        let Some(area) = self
            .find_guide_area(parent, middle)
            .and_then(|g| self.tree.shortcut(g))
            .map(|g| *g.area())
        else {
            return false;
        };
        if let Some(s) = self.tree.shortcut_mut(shortcut) {
            s.copy_area(area);
        }
        true
    }

    // - - - delete, cut, paste

    pub fn delete_buffer_empty(&self) -> bool {
        self.delete_buffer.is_empty()
    }

    pub fn paste_buffer_empty(&self) -> bool {
        self.paste_buffer.is_empty()
    }

    /// Removes `shortcut` from its menu and keeps it for undo.
    ///
    /// Fails and changes nothing for the opener of the current menu, for
    /// uneditable shortcuts and for shortcuts that belong to no menu.
    pub fn delete_shortcut(&mut self, shortcut: ShortcutId) -> bool {
        if self.opens_current_menu(shortcut) {
            return false;
        }
        let Some(s) = self.tree.shortcut(shortcut) else {
            return false;
        };
        if s.cannot_edit() {
            return false;
        }
        let Some(parent) = s.parent_menu() else {
            return false;
        };
        if !self.tree.remove_shortcut(parent, shortcut) {
            return false;
        }
        if self.cur_shortcut == Some(shortcut) {
            self.cur_shortcut = None;
        }
        self.selection.remove(&shortcut);
        if let Some(s) = self.tree.shortcut_mut(shortcut) {
            s.set_selected(false);
        }
        self.delete_buffer.push(shortcut);
        tracing::debug!(?shortcut, "shortcut deleted");
        true
    }

    fn selected_targets(&self) -> Vec<ShortcutId> {
        let mut targets: Vec<ShortcutId> = self.cur_shortcut.into_iter().collect();
        targets.extend(self.selection.iter().copied());
        targets
    }

    /// Deletes the current shortcut and the multi-selection. Returns true
    /// when at least one shortcut was deleted.
    pub fn delete_shortcuts(&mut self) -> bool {
        let targets = self.selected_targets();
        self.clear_multi_selection();
        let mut deleted = false;
        for id in targets {
            deleted |= self.delete_shortcut(id);
        }
        self.ui.post(UiEvent::ShortcutSelected(self.cur_shortcut));
        deleted
    }

    /// Puts the last deleted shortcut back at the end of its menu.
    pub fn undelete_shortcuts(&mut self) -> Option<ShortcutId> {
        let s = self.delete_buffer.pop()?;
        self.cut_pending.retain(|c| *c != s);
        match self.tree.parent_menu(s) {
            Some(parent) if self.tree.add_shortcut(parent, s) => Some(s),
            _ => {
                tracing::warn!(shortcut = ?s, "menu of deleted shortcut is gone");
                self.tree.destroy_shortcut(s);
                None
            }
        }
    }

    fn clear_paste_buffer(&mut self) {
        for id in std::mem::take(&mut self.paste_buffer) {
            self.tree.destroy_shortcut(id);
        }
        self.cut_pending.clear();
    }

    /// Fills the paste buffer with deep copies of the selection.
    pub fn copy_shortcuts(&mut self) {
        self.clear_paste_buffer();
        self.paste_count = 1;
        for id in self.selected_targets() {
            let editable = self
                .tree
                .shortcut(id)
                .map(|s| !s.cannot_edit())
                .unwrap_or(false);
            if !editable || self.opens_current_menu(id) {
                continue;
            }
            if let Some(dup) = self.tree.duplicate_shortcut(id, true) {
                self.paste_buffer.push(dup);
            }
        }
    }

    /// Copies then deletes the selection. The next paste puts the original
    /// shortcuts back, later pastes insert copies.
    pub fn cut_shortcuts(&mut self) {
        self.copy_shortcuts();
        self.paste_count = 0;
        let targets = self.selected_targets();
        self.clear_multi_selection();
        let mut cut = Vec::new();
        for id in targets {
            if self.delete_shortcut(id) {
                cut.push(id);
            }
        }
        self.cut_pending = cut;
        self.ui.post(UiEvent::ShortcutSelected(self.cur_shortcut));
    }

    /// Pastes into `menu` and returns the last inserted shortcut.
    pub fn paste_shortcuts(&mut self, menu: MenuId) -> Option<ShortcutId> {
        if self.paste_buffer.is_empty() || !self.tree.contains_menu(menu) {
            return None;
        }
        let pending: Vec<ShortcutId> = std::mem::take(&mut self.cut_pending)
            .into_iter()
            .filter(|id| self.delete_buffer.contains(id))
            .collect();
        let mut last = None;
        if !pending.is_empty() {
            // originals that would end up inside their own sub-menus stay cut
            for orig in pending {
                if self.tree.add_shortcut(menu, orig) {
                    self.delete_buffer.retain(|d| *d != orig);
                    last = Some(orig);
                } else {
                    self.cut_pending.push(orig);
                }
            }
            if last.is_none() {
                tracing::debug!(?menu, "cut shortcuts cannot be pasted here");
                return None;
            }
        } else {
            let limits = self.limits();
            let offset = self.settings.paste_offset;
            let count = self.paste_count as f32;
            for id in self.paste_buffer.clone() {
                let Some(dup) = self.tree.duplicate_shortcut(id, true) else {
                    continue;
                };
                if let Some(s) = self.tree.shortcut_mut(dup) {
                    s.move_by(count * offset.width, count * offset.height, &limits);
                }
                if self.tree.add_shortcut(menu, dup) {
                    last = Some(dup);
                } else {
                    self.tree.destroy_shortcut(dup);
                }
            }
        }
        self.paste_count += 1;
        last
    }

    // - - - adjust and align

    fn reduce_selection<G, S>(&mut self, reduce: Reduce, get: G, set: S)
    where
        G: Fn(&Shortcut) -> f32,
        S: Fn(&mut Shortcut, f32, &ShortcutLimits),
    {
        let ids: Vec<ShortcutId> = self.selection.iter().copied().collect();
        let values: Vec<f32> = ids
            .iter()
            .filter_map(|id| self.tree.shortcut(*id))
            .map(&get)
            .collect();
        if values.is_empty() {
            return;
        }
        let value = match reduce {
            Reduce::Min => values.iter().copied().fold(1.0, f32::min).max(0.0),
            Reduce::Max => values.iter().copied().fold(0.0, f32::max).min(1.0),
            Reduce::Mean => values.iter().sum::<f32>() / values.len() as f32,
        };
        let limits = self.limits();
        for id in ids {
            if let Some(s) = self.tree.shortcut_mut(id) {
                set(s, value, &limits);
            }
        }
    }

    /// Stretches the selected boxes so the given side lines up with the
    /// outermost one.
    pub fn adjust_boxes(&mut self, part: BoxPart) {
        match part {
            BoxPart::LEFT => self.reduce_selection(
                Reduce::Min,
                |s| s.area().x,
                |s, v, l| {
                    s.set_width(s.area().width + s.area().x - v, true, l);
                    s.set_x(v, false, l);
                },
            ),
            BoxPart::BOTTOM => self.reduce_selection(
                Reduce::Min,
                |s| s.area().y,
                |s, v, l| {
                    s.set_height(s.area().height + s.area().y - v, true, l);
                    s.set_y(v, false, l);
                },
            ),
            BoxPart::RIGHT => self.reduce_selection(
                Reduce::Max,
                |s| s.area().right(),
                |s, v, l| s.set_width(v - s.area().x, true, l),
            ),
            BoxPart::TOP => self.reduce_selection(
                Reduce::Max,
                |s| s.area().top(),
                |s, v, l| s.set_height(v - s.area().y, true, l),
            ),
            _ => {}
        }
    }

    /// Moves the selected boxes so the given side or center lines up.
    pub fn align_boxes(&mut self, part: BoxPart) {
        match part {
            BoxPart::LEFT => {
                self.reduce_selection(Reduce::Min, |s| s.area().x, |s, v, l| s.set_x(v, true, l))
            }
            BoxPart::BOTTOM => {
                self.reduce_selection(Reduce::Min, |s| s.area().y, |s, v, l| s.set_y(v, true, l))
            }
            BoxPart::RIGHT => self.reduce_selection(
                Reduce::Max,
                |s| s.area().right(),
                |s, v, l| s.set_x(v - s.area().width, true, l),
            ),
            BoxPart::TOP => self.reduce_selection(
                Reduce::Max,
                |s| s.area().top(),
                |s, v, l| s.set_y(v - s.area().height, true, l),
            ),
            BoxPart::HCENTER => self.reduce_selection(
                Reduce::Mean,
                |s| s.area().center().x,
                |s, v, l| s.set_x(v - s.area().width / 2.0, true, l),
            ),
            BoxPart::VCENTER => self.reduce_selection(
                Reduce::Mean,
                |s| s.area().center().y,
                |s, v, l| s.set_y(v - s.area().height / 2.0, true, l),
            ),
            _ => {}
        }
    }

    /// Same as [`MarkPad::align_boxes`] for labels.
    pub fn align_titles(&mut self, part: BoxPart) {
        match part {
            BoxPart::LEFT => self.reduce_selection(
                Reduce::Min,
                |s| s.name_area().x,
                |s, v, l| s.set_name_x(v, l),
            ),
            BoxPart::BOTTOM => self.reduce_selection(
                Reduce::Min,
                |s| s.name_area().y,
                |s, v, l| s.set_name_y(v, l),
            ),
            BoxPart::RIGHT => self.reduce_selection(
                Reduce::Max,
                |s| s.name_area().right(),
                |s, v, l| s.set_name_x(v - s.name_area().width, l),
            ),
            BoxPart::TOP => self.reduce_selection(
                Reduce::Max,
                |s| s.name_area().top(),
                |s, v, l| s.set_name_y(v - s.name_area().height, l),
            ),
            BoxPart::HCENTER => self.reduce_selection(
                Reduce::Mean,
                |s| s.name_area().center().x,
                |s, v, l| s.set_name_x(v - s.name_area().width / 2.0, l),
            ),
            BoxPart::VCENTER => self.reduce_selection(
                Reduce::Mean,
                |s| s.name_area().center().y,
                |s, v, l| s.set_name_y(v - s.name_area().height / 2.0, l),
            ),
            _ => {}
        }
    }

    /// First shortcut of the current menu under `point`.
    pub fn shortcut_at(&self, point: Point) -> Option<ShortcutId> {
        self.tree.find_shortcut_at(self.current_menu, point)
    }
}
