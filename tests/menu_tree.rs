use padmenu::geometry::{Point, Rect};
use padmenu::menu::{MenuTree, ShortcutLimits};

fn placed(tree: &mut MenuTree, menu: padmenu::menu::MenuId, name: &str, area: Rect) -> padmenu::menu::ShortcutId {
    let id = tree.add_new_shortcut(menu, name).unwrap();
    tree.shortcut_mut(id)
        .unwrap()
        .set_area(area, &ShortcutLimits::default());
    id
}

#[test]
fn opener_links_stay_mutual() {
    let mut tree = MenuTree::new();
    let root = tree.new_main_menu();
    let a = tree.add_new_shortcut(root, "a").unwrap();
    let b = tree.add_new_shortcut(root, "b").unwrap();
    let m = tree.new_menu();
    let n = tree.new_menu();

    assert!(tree.set_menu(a, Some(m)));
    assert_eq!(tree.opener(m), Some(a));
    assert_eq!(tree.submenu(a), Some(m));

    // a second opener steals the menu
    assert!(tree.set_menu(b, Some(m)));
    assert_eq!(tree.opener(m), Some(b));
    assert_eq!(tree.submenu(a), None);

    // switching to another menu releases the first one
    assert!(tree.set_menu(b, Some(n)));
    assert_eq!(tree.opener(m), None);
    assert_eq!(tree.opener(n), Some(b));

    assert!(tree.set_menu(b, None));
    assert_eq!(tree.opener(n), None);
    assert!(tree.contains_menu(n));
}

#[test]
fn add_and_remove_keep_membership_consistent() {
    let mut tree = MenuTree::new();
    let root = tree.new_main_menu();
    let other = tree.new_menu();
    let s = tree.add_new_shortcut(root, "s").unwrap();

    assert!(!tree.add_shortcut(root, s));
    assert!(!tree.add_shortcut(other, s));
    assert_eq!(tree.shortcuts(root), &[s]);

    assert!(tree.remove_shortcut(root, s));
    assert!(!tree.remove_shortcut(root, s));
    assert!(tree.contains(s));
    assert_eq!(tree.parent_menu(s), Some(root));

    assert!(tree.add_shortcut(other, s));
    assert_eq!(tree.parent_menu(s), Some(other));
    assert!(tree.contains_shortcut(other, s));
}

#[test]
fn first_match_wins_on_overlap() {
    let mut tree = MenuTree::new();
    let root = tree.new_main_menu();
    let big = placed(&mut tree, root, "big", Rect::new(0.1, 0.1, 0.5, 0.5));
    let small = placed(&mut tree, root, "small", Rect::new(0.2, 0.2, 0.1, 0.1));

    assert_eq!(tree.find_shortcut_at(root, Point::new(0.25, 0.25)), Some(big));
    assert_eq!(tree.find_shortcut_at(root, Point::new(0.9, 0.9)), None);
    // borders are inclusive
    assert_eq!(tree.find_shortcut_at(root, Point::new(0.6, 0.6)), Some(big));

    tree.remove_shortcut(root, big);
    assert_eq!(tree.find_shortcut_at(root, Point::new(0.25, 0.25)), Some(small));
    assert_eq!(tree.find_shortcut_named(root, "small"), Some(small));
    assert_eq!(tree.find_shortcut_named(root, "big"), None);
}

#[test]
fn destroy_cascades_and_invalidates_handles() {
    let mut tree = MenuTree::new();
    let root = tree.new_main_menu();
    let opener = tree.add_new_shortcut(root, "opener").unwrap();
    let sub = tree.create_menu(opener).unwrap();
    let child = tree.add_new_shortcut(sub, "child").unwrap();
    let deeper = tree.create_menu(child).unwrap();
    tree.add_new_shortcut(deeper, "leaf").unwrap();
    assert_eq!(tree.shortcut_count(), 3);
    assert_eq!(tree.menu_count(), 3);

    assert!(tree.destroy_shortcut(opener));
    assert_eq!(tree.shortcut_count(), 0);
    assert_eq!(tree.menu_count(), 1);
    assert!(tree.shortcuts(root).is_empty());
    assert!(tree.shortcut(child).is_none());
    assert!(tree.menu(sub).is_none());
    assert!(!tree.destroy_shortcut(opener));

    // a reused slot does not resurrect the old handle
    let fresh = tree.add_new_shortcut(root, "fresh").unwrap();
    assert!(tree.shortcut(opener).is_none());
    assert_eq!(tree.shortcut(fresh).map(|s| s.name()), Some("fresh"));
}

#[test]
fn destroying_a_menu_detaches_its_opener() {
    let mut tree = MenuTree::new();
    let root = tree.new_main_menu();
    let opener = tree.add_new_shortcut(root, "opener").unwrap();
    let sub = tree.create_menu(opener).unwrap();
    tree.add_new_shortcut(sub, "child").unwrap();

    assert!(tree.destroy_menu(sub));
    assert_eq!(tree.submenu(opener), None);
    assert_eq!(tree.shortcut_count(), 1);
}

#[test]
fn duplicate_is_a_deep_copy() {
    let mut tree = MenuTree::new();
    let root = tree.new_main_menu();
    let opener = placed(&mut tree, root, "opener", Rect::new(0.1, 0.1, 0.2, 0.2));
    let sub = tree.create_menu(opener).unwrap();
    let child = tree.add_new_shortcut(sub, "child").unwrap();
    tree.shortcut_mut(opener).unwrap().set_selected(true);

    let dup = tree.duplicate_shortcut(opener, true).unwrap();
    let dup_sub = tree.submenu(dup).unwrap();
    assert_ne!(dup_sub, sub);
    assert_eq!(tree.opener(dup_sub), Some(dup));
    assert_eq!(tree.parent_menu(dup), None);
    assert!(!tree.shortcut(dup).unwrap().is_selected());
    assert_eq!(tree.shortcut(dup).unwrap().area(), tree.shortcut(opener).unwrap().area());

    let dup_child = tree.shortcuts(dup_sub)[0];
    assert_ne!(dup_child, child);
    tree.shortcut_mut(dup_child).unwrap().set_name("renamed");
    assert_eq!(tree.shortcut(child).unwrap().name(), "child");

    let shallow = tree.duplicate_shortcut(opener, false).unwrap();
    assert_eq!(tree.submenu(shallow), None);
}

#[test]
fn shortcut_cannot_enter_its_own_submenu() {
    let mut tree = MenuTree::new();
    let root = tree.new_main_menu();
    let opener = tree.add_new_shortcut(root, "opener").unwrap();
    let sub = tree.create_menu(opener).unwrap();
    let child = tree.add_new_shortcut(sub, "child").unwrap();
    let deeper = tree.create_menu(child).unwrap();

    tree.remove_shortcut(root, opener);
    assert!(!tree.add_shortcut(sub, opener));
    assert!(!tree.add_shortcut(deeper, opener));
    assert!(tree.add_shortcut(root, opener));
}

#[test]
fn cascade_depth() {
    let mut tree = MenuTree::new();
    let root = tree.new_main_menu();
    let a = tree.add_new_shortcut(root, "a").unwrap();
    let m1 = tree.create_menu(a).unwrap();
    let b = tree.add_new_shortcut(m1, "b").unwrap();
    let m2 = tree.create_menu(b).unwrap();

    assert_eq!(tree.depth(root), 0);
    assert_eq!(tree.depth(m1), 1);
    assert_eq!(tree.depth(m2), 2);
    assert!(!tree.is_cascaded(root));
    assert!(!tree.is_cascaded(m1));
    assert!(tree.is_cascaded(m2));
}

#[test]
fn geometry_setters_clamp_to_the_pad() {
    let limits = ShortcutLimits::default();
    let mut tree = MenuTree::new();
    let root = tree.new_main_menu();
    let id = placed(&mut tree, root, "s", Rect::new(0.5, 0.5, 0.2, 0.2));
    let s = tree.shortcut_mut(id).unwrap();

    s.set_x(0.9, true, &limits);
    assert!((s.area().x - 0.8).abs() < 1e-6);
    s.set_x(-0.1, true, &limits);
    assert_eq!(s.area().x, 0.0);
    s.set_width(0.001, true, &limits);
    assert!((s.area().width - 0.01).abs() < 1e-6);

    s.set_area(Rect::new(0.8, 0.0, 0.5, 0.3), &limits);
    assert!((s.area().right() - 1.0).abs() < 1e-6);

    s.set_area(Rect::new(0.2, 0.2, 0.2, 0.2), &limits);
    s.change_width(0.1, true, &limits);
    assert!((s.area().x - 0.1).abs() < 1e-6);
    assert!((s.area().width - 0.3).abs() < 1e-6);
    s.change_width(-1.0, false, &limits);
    assert!((s.area().width - 0.01).abs() < 1e-6);
}

#[test]
fn label_stays_inside_its_box() {
    let limits = ShortcutLimits::default();
    let mut tree = MenuTree::new();
    let root = tree.new_main_menu();
    let id = placed(&mut tree, root, "s", Rect::new(0.2, 0.2, 0.2, 0.2));
    let s = tree.shortcut_mut(id).unwrap();
    s.center_name(padmenu::geometry::Size::new(0.05, 0.03), true, true);
    assert!((s.name_area().x - 0.275).abs() < 1e-6);
    assert!((s.name_area().y - 0.285).abs() < 1e-6);

    s.set_name_x(0.9, &limits);
    assert!((s.name_area().right() - (0.4 - limits.name_spacing)).abs() < 1e-6);
    s.set_name_y(0.0, &limits);
    assert!((s.name_area().y - (0.2 + limits.name_spacing)).abs() < 1e-6);

    // moving the box carries the label along
    let before = *s.name_area();
    s.move_by(0.1, 0.1, &limits);
    assert!((s.name_area().x - before.x - 0.1).abs() < 1e-6);
    assert!((s.name_area().y - before.y - 0.1).abs() < 1e-6);
}
