use super::shortcut::Shortcut;
use crate::geometry::{is_inside, Point};
use slab::Slab;

/// Handle of a shortcut in a [`MenuTree`].
///
/// Handles carry the generation of the slot they point to, so a handle kept
/// after its shortcut was destroyed never resolves to a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShortcutId {
    key: usize,
    generation: u64,
}

/// Handle of a menu in a [`MenuTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId {
    key: usize,
    generation: u64,
}

/// Ordered set of shortcuts, possibly opened by a shortcut of another menu.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortcutMenu {
    shortcuts: Vec<ShortcutId>,
    opener: Option<ShortcutId>,
    is_main_menu: bool,
    shortcut_num: i32,
}

impl ShortcutMenu {
    /// Shortcuts in insertion order, which is also the lookup priority.
    pub fn shortcuts(&self) -> &[ShortcutId] {
        &self.shortcuts
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }

    pub fn opener(&self) -> Option<ShortcutId> {
        self.opener
    }

    pub fn is_main_menu(&self) -> bool {
        self.is_main_menu
    }

    pub fn shortcut_num(&self) -> i32 {
        self.shortcut_num
    }

    pub fn set_shortcut_num(&mut self, num: i32) {
        self.shortcut_num = num;
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u64,
    value: T,
}

/// Single owning store of every menu and shortcut.
///
/// A menu owns its shortcuts, a shortcut owns the menu it opens. The
/// `opener`/`submenu` and `parent_menu` back-references are plain handles
/// kept consistent by the mutators of this type.
#[derive(Debug, Clone, Default)]
pub struct MenuTree {
    shortcuts: Slab<Slot<Shortcut>>,
    menus: Slab<Slot<ShortcutMenu>>,
    generation: u64,
}

impl MenuTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn shortcut_count(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn menu_count(&self) -> usize {
        self.menus.len()
    }

    // - - - access

    pub fn shortcut(&self, id: ShortcutId) -> Option<&Shortcut> {
        self.shortcuts
            .get(id.key)
            .filter(|slot| slot.generation == id.generation)
            .map(|slot| &slot.value)
    }

    pub fn shortcut_mut(&mut self, id: ShortcutId) -> Option<&mut Shortcut> {
        self.shortcuts
            .get_mut(id.key)
            .filter(|slot| slot.generation == id.generation)
            .map(|slot| &mut slot.value)
    }

    pub fn menu(&self, id: MenuId) -> Option<&ShortcutMenu> {
        self.menus
            .get(id.key)
            .filter(|slot| slot.generation == id.generation)
            .map(|slot| &slot.value)
    }

    pub fn menu_mut(&mut self, id: MenuId) -> Option<&mut ShortcutMenu> {
        self.menus
            .get_mut(id.key)
            .filter(|slot| slot.generation == id.generation)
            .map(|slot| &mut slot.value)
    }

    pub fn contains(&self, id: ShortcutId) -> bool {
        self.shortcut(id).is_some()
    }

    pub fn contains_menu(&self, id: MenuId) -> bool {
        self.menu(id).is_some()
    }

    /// Shortcuts of `menu`, empty when the handle is stale.
    pub fn shortcuts(&self, menu: MenuId) -> &[ShortcutId] {
        self.menu(menu).map(|m| m.shortcuts()).unwrap_or(&[])
    }

    pub fn opener(&self, menu: MenuId) -> Option<ShortcutId> {
        self.menu(menu).and_then(|m| m.opener)
    }

    pub fn submenu(&self, shortcut: ShortcutId) -> Option<MenuId> {
        self.shortcut(shortcut).and_then(|s| s.submenu)
    }

    pub fn parent_menu(&self, shortcut: ShortcutId) -> Option<MenuId> {
        self.shortcut(shortcut).and_then(|s| s.parent_menu)
    }

    /// True when the menu is at least two levels below a root menu.
    pub fn is_cascaded(&self, menu: MenuId) -> bool {
        self.opener(menu)
            .and_then(|opener| self.parent_menu(opener))
            .and_then(|parent| self.opener(parent))
            .is_some()
    }

    /// Number of openers between `menu` and its root.
    pub fn depth(&self, menu: MenuId) -> usize {
        let mut depth = 0;
        let mut current = menu;
        while let Some(parent) = self.opener(current).and_then(|o| self.parent_menu(o)) {
            depth += 1;
            current = parent;
            if depth > self.menus.len() {
                break;
            }
        }
        depth
    }

    /// True when `shortcut` is an ancestor opener of `menu`.
    fn is_below(&self, menu: MenuId, shortcut: ShortcutId) -> bool {
        let mut current = menu;
        for _ in 0..=self.menus.len() {
            let Some(opener) = self.opener(current) else {
                return false;
            };
            if opener == shortcut {
                return true;
            }
            match self.parent_menu(opener) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }

    // - - - creation

    pub fn new_menu(&mut self) -> MenuId {
        let generation = self.next_generation();
        let key = self.menus.insert(Slot {
            generation,
            value: ShortcutMenu::default(),
        });
        MenuId { key, generation }
    }

    pub fn new_main_menu(&mut self) -> MenuId {
        let id = self.new_menu();
        if let Some(menu) = self.menu_mut(id) {
            menu.is_main_menu = true;
        }
        id
    }

    /// Creates a shortcut that belongs to no menu yet.
    pub fn new_shortcut(&mut self, name: &str) -> ShortcutId {
        self.insert_shortcut(Shortcut::new(name))
    }

    fn insert_shortcut(&mut self, shortcut: Shortcut) -> ShortcutId {
        let generation = self.next_generation();
        let key = self.shortcuts.insert(Slot {
            generation,
            value: shortcut,
        });
        ShortcutId { key, generation }
    }

    pub fn add_new_shortcut(&mut self, menu: MenuId, name: &str) -> Option<ShortcutId> {
        if !self.contains_menu(menu) {
            return None;
        }
        let id = self.new_shortcut(name);
        self.add_shortcut(menu, id);
        Some(id)
    }

    // - - - membership

    pub fn contains_shortcut(&self, menu: MenuId, shortcut: ShortcutId) -> bool {
        self.shortcuts(menu).contains(&shortcut)
    }

    /// Appends `shortcut` to `menu`.
    ///
    /// Fails when either handle is stale, the shortcut is already listed in
    /// its parent menu, or `menu` lies inside the shortcut's own sub-menu.
    pub fn add_shortcut(&mut self, menu: MenuId, shortcut: ShortcutId) -> bool {
        if !self.contains_menu(menu) || self.is_below(menu, shortcut) {
            return false;
        }
        let Some(current_parent) = self.shortcut(shortcut).map(|s| s.parent_menu) else {
            return false;
        };
        if let Some(parent) = current_parent {
            if self.contains_shortcut(parent, shortcut) {
                return false;
            }
        }
        if let Some(m) = self.menu_mut(menu) {
            m.shortcuts.push(shortcut);
        }
        if let Some(s) = self.shortcut_mut(shortcut) {
            s.parent_menu = Some(menu);
        }
        true
    }

    /// Removes `shortcut` from `menu` without destroying it.
    pub fn remove_shortcut(&mut self, menu: MenuId, shortcut: ShortcutId) -> bool {
        let Some(m) = self.menu_mut(menu) else {
            return false;
        };
        match m.shortcuts.iter().position(|s| *s == shortcut) {
            Some(index) => {
                m.shortcuts.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn find_shortcut_named(&self, menu: MenuId, name: &str) -> Option<ShortcutId> {
        self.shortcuts(menu)
            .iter()
            .copied()
            .find(|id| self.shortcut(*id).map(|s| s.name() == name).unwrap_or(false))
    }

    /// First shortcut of `menu`, in insertion order, whose area contains `point`.
    pub fn find_shortcut_at(&self, menu: MenuId, point: Point) -> Option<ShortcutId> {
        self.shortcuts(menu).iter().copied().find(|id| {
            self.shortcut(*id)
                .map(|s| is_inside(point, s.area()))
                .unwrap_or(false)
        })
    }

    // - - - opener links

    /// Makes `shortcut` the opener of `menu` (or of nothing).
    ///
    /// Any previous opener of `menu` loses its sub-menu and the previous
    /// sub-menu of `shortcut` loses its opener, so both links always stay
    /// mutual inverses. The previous sub-menu is not destroyed.
    pub fn set_menu(&mut self, shortcut: ShortcutId, menu: Option<MenuId>) -> bool {
        if !self.contains(shortcut) || menu.map(|m| !self.contains_menu(m)).unwrap_or(false) {
            return false;
        }
        if let Some(old) = self.submenu(shortcut) {
            if let Some(m) = self.menu_mut(old) {
                m.opener = None;
            }
        }
        if let Some(menu) = menu {
            if let Some(previous) = self.opener(menu) {
                if let Some(s) = self.shortcut_mut(previous) {
                    s.submenu = None;
                }
            }
            if let Some(m) = self.menu_mut(menu) {
                m.opener = Some(shortcut);
            }
        }
        if let Some(s) = self.shortcut_mut(shortcut) {
            s.submenu = menu;
        }
        true
    }

    /// Creates an empty menu opened by `opener`.
    pub fn create_menu(&mut self, opener: ShortcutId) -> Option<MenuId> {
        if !self.contains(opener) {
            return None;
        }
        let menu = self.new_menu();
        self.set_menu(opener, Some(menu));
        Some(menu)
    }

    // - - - duplication

    /// Duplicates a shortcut, and recursively its sub-menu when `with_submenu`.
    /// The duplicate is unselected and belongs to no menu.
    pub fn duplicate_shortcut(&mut self, shortcut: ShortcutId, with_submenu: bool) -> Option<ShortcutId> {
        let mut copy = self.shortcut(shortcut)?.clone();
        let submenu = copy.submenu.take();
        copy.parent_menu = None;
        copy.set_selected(false);
        let dup = self.insert_shortcut(copy);
        if let (true, Some(submenu)) = (with_submenu, submenu) {
            if let Some(menu_dup) = self.duplicate_menu(submenu) {
                self.set_menu(dup, Some(menu_dup));
            }
        }
        Some(dup)
    }

    /// Deep copy of a menu; the copy has no opener.
    pub fn duplicate_menu(&mut self, menu: MenuId) -> Option<MenuId> {
        let source = self.menu(menu)?.clone();
        let copy = self.new_menu();
        if let Some(m) = self.menu_mut(copy) {
            m.shortcut_num = source.shortcut_num;
        }
        for id in source.shortcuts {
            if let Some(dup) = self.duplicate_shortcut(id, true) {
                self.add_shortcut(copy, dup);
            }
        }
        Some(copy)
    }

    // - - - destruction

    /// Destroys a shortcut and everything its sub-menu contains.
    pub fn destroy_shortcut(&mut self, shortcut: ShortcutId) -> bool {
        let Some(s) = self.shortcut(shortcut) else {
            return false;
        };
        let (parent, submenu) = (s.parent_menu, s.submenu);
        if let Some(parent) = parent {
            self.remove_shortcut(parent, shortcut);
        }
        if let Some(submenu) = submenu {
            self.destroy_menu(submenu);
        }
        self.shortcuts.remove(shortcut.key);
        true
    }

    /// Destroys a menu and its shortcuts; its opener no longer opens anything.
    pub fn destroy_menu(&mut self, menu: MenuId) -> bool {
        let Some(m) = self.menu(menu) else {
            return false;
        };
        let (opener, shortcuts) = (m.opener, m.shortcuts.clone());
        if let Some(opener) = opener {
            if let Some(s) = self.shortcut_mut(opener) {
                s.submenu = None;
            }
        }
        for id in shortcuts {
            if self.parent_menu(id) == Some(menu) {
                self.destroy_shortcut(id);
            }
        }
        self.menus.remove(menu.key);
        true
    }
}
