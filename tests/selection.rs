mod common;

use common::add_shortcut;
use padmenu::geometry::{BoxPart, Point, Rect, Size};
use padmenu::messages::{ui_channel, UiEvent};
use padmenu::{MarkPad, Settings};

fn markpad() -> (MarkPad, std::sync::mpsc::Receiver<UiEvent>) {
    let (sink, rx) = ui_channel();
    (MarkPad::new(Settings::default(), sink), rx)
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn single_and_multi_selection_are_exclusive() {
    let (mut mp, rx) = markpad();
    let root = mp.root_menu();
    let a = add_shortcut(&mut mp, root, "a", Rect::new(0.1, 0.1, 0.1, 0.1));
    let b = add_shortcut(&mut mp, root, "b", Rect::new(0.3, 0.1, 0.1, 0.1));
    let c = add_shortcut(&mut mp, root, "c", Rect::new(0.5, 0.1, 0.1, 0.1));

    mp.select_shortcut(Some(a));
    assert_eq!(mp.current_shortcut(), Some(a));
    assert!(mp.tree().shortcut(a).unwrap().is_selected());
    assert!(rx
        .try_iter()
        .any(|e| e == UiEvent::ShortcutSelected(Some(a))));

    mp.multi_selects(Some(b), true);
    assert_eq!(mp.current_shortcut(), None);
    assert_eq!(mp.multi_selection(), vec![a, b]);
    assert!(mp.is_shortcut_selected());
    assert!(mp.is_in_multi_selection(Point::new(0.35, 0.15), 0.0, 0.0));
    assert!(!mp.is_in_multi_selection(Point::new(0.55, 0.15), 0.0, 0.0));

    mp.multi_selects(Some(a), false);
    assert_eq!(mp.multi_selection(), vec![b]);
    assert!(!mp.tree().shortcut(a).unwrap().is_selected());

    mp.select_shortcut(Some(c));
    assert!(mp.multi_selection().is_empty());
    assert!(!mp.tree().shortcut(b).unwrap().is_selected());
    assert_eq!(mp.current_shortcut(), Some(c));

    mp.select_shortcut(None);
    assert!(!mp.is_shortcut_selected());
}

#[test]
fn opener_of_current_menu_cannot_be_deleted() {
    let (mut mp, _rx) = markpad();
    let root = mp.root_menu();
    let opener = add_shortcut(&mut mp, root, "Apps", Rect::new(0.0, 0.3, 0.2, 0.4));
    let menu = mp.create_menu(opener).unwrap();
    mp.set_current_menu(Some(menu));

    assert!(!mp.delete_shortcut(opener));
    assert!(mp.tree().contains_shortcut(root, opener));
    assert!(mp.delete_buffer_empty());

    mp.set_current_menu(None);
    assert!(mp.delete_shortcut(opener));
    assert!(!mp.tree().contains_shortcut(root, opener));
}

#[test]
fn uneditable_shortcut_cannot_be_deleted() {
    let (mut mp, _rx) = markpad();
    let root = mp.root_menu();
    let s = add_shortcut(&mut mp, root, "Left", Rect::new(0.0, 0.0, 0.04, 1.0));
    mp.tree_mut().shortcut_mut(s).unwrap().set_cannot_edit(true);
    assert!(!mp.delete_shortcut(s));

    let detached = mp.tree_mut().new_shortcut("detached");
    assert!(!mp.delete_shortcut(detached));
}

#[test]
fn undelete_puts_shortcut_back_at_the_end() {
    let (mut mp, _rx) = markpad();
    let root = mp.root_menu();
    let a = add_shortcut(&mut mp, root, "a", Rect::new(0.1, 0.1, 0.1, 0.1));
    let b = add_shortcut(&mut mp, root, "b", Rect::new(0.3, 0.1, 0.1, 0.1));

    mp.select_shortcut(Some(a));
    assert!(mp.delete_shortcuts());
    assert_eq!(mp.tree().shortcuts(root), &[b]);
    assert_eq!(mp.current_shortcut(), None);
    assert!(!mp.delete_buffer_empty());

    assert_eq!(mp.undelete_shortcuts(), Some(a));
    assert_eq!(mp.tree().shortcuts(root), &[b, a]);
    assert_eq!(mp.undelete_shortcuts(), None);
}

#[test]
fn undelete_into_a_vanished_menu_discards_the_shortcut() {
    let (mut mp, _rx) = markpad();
    let root = mp.root_menu();
    let opener = add_shortcut(&mut mp, root, "opener", Rect::new(0.1, 0.1, 0.1, 0.1));
    let menu = mp.create_menu(opener).unwrap();
    let child = add_shortcut(&mut mp, menu, "child", Rect::new(0.5, 0.5, 0.1, 0.1));

    assert!(mp.delete_shortcut(child));
    mp.tree_mut().destroy_menu(menu);
    assert!(mp.tree().contains(child));

    assert_eq!(mp.undelete_shortcuts(), None);
    assert!(!mp.tree().contains(child));
}

#[test]
fn copy_paste_inserts_deep_copies() {
    let (mut mp, _rx) = markpad();
    let root = mp.root_menu();
    let opener = add_shortcut(&mut mp, root, "opener", Rect::new(0.1, 0.1, 0.2, 0.2));
    let menu = mp.create_menu(opener).unwrap();
    add_shortcut(&mut mp, menu, "child", Rect::new(0.5, 0.5, 0.1, 0.1));

    mp.select_shortcut(Some(opener));
    mp.copy_shortcuts();
    assert!(!mp.paste_buffer_empty());

    let first = mp.paste_shortcuts(root).unwrap();
    assert_ne!(first, opener);
    let copied_menu = mp.tree().submenu(first).unwrap();
    assert_ne!(copied_menu, menu);
    assert_eq!(mp.tree().shortcuts(copied_menu).len(), 1);
    assert!(close(mp.tree().shortcut(first).unwrap().area().x, 0.13));

    let second = mp.paste_shortcuts(root).unwrap();
    assert_ne!(second, first);
    assert!(close(mp.tree().shortcut(second).unwrap().area().x, 0.16));
    assert_eq!(mp.tree().shortcuts(root).len(), 3);
}

#[test]
fn cut_then_paste_moves_the_original() {
    let (mut mp, _rx) = markpad();
    let root = mp.root_menu();
    let a = add_shortcut(&mut mp, root, "a", Rect::new(0.1, 0.1, 0.2, 0.2));
    let holder = add_shortcut(&mut mp, root, "holder", Rect::new(0.5, 0.5, 0.2, 0.2));
    let other = mp.create_menu(holder).unwrap();

    mp.select_shortcut(Some(a));
    mp.cut_shortcuts();
    assert!(!mp.tree().contains_shortcut(root, a));
    assert_eq!(mp.current_shortcut(), None);

    assert_eq!(mp.paste_shortcuts(other), Some(a));
    assert!(mp.tree().contains_shortcut(other, a));
    assert!(mp.delete_buffer_empty());
    assert!(close(mp.tree().shortcut(a).unwrap().area().x, 0.1));

    let copy = mp.paste_shortcuts(other).unwrap();
    assert_ne!(copy, a);
    assert!(close(mp.tree().shortcut(copy).unwrap().area().x, 0.13));
}

#[test]
fn cut_shortcut_is_not_pasted_inside_its_own_menus() {
    let (mut mp, _rx) = markpad();
    let root = mp.root_menu();
    let a = add_shortcut(&mut mp, root, "a", Rect::new(0.1, 0.1, 0.2, 0.2));
    let menu_a = mp.create_menu(a).unwrap();
    let b = add_shortcut(&mut mp, menu_a, "b", Rect::new(0.4, 0.4, 0.2, 0.2));
    let menu_b = mp.create_menu(b).unwrap();
    mp.set_current_menu(Some(menu_b));

    mp.select_shortcut(Some(a));
    mp.cut_shortcuts();
    assert!(!mp.tree().contains_shortcut(root, a));

    assert_eq!(mp.paste_shortcuts(menu_b), None);
    for id in [a, b] {
        assert!(mp.tree().contains(id));
    }
    assert!(mp.tree().contains_menu(menu_a));
    assert!(mp.tree().contains_menu(menu_b));
    assert_eq!(mp.current_menu(), menu_b);
    assert!(mp.tree().shortcuts(menu_b).is_empty());
    assert!(!mp.delete_buffer_empty());

    // the original is still pending and goes back where it may live
    assert_eq!(mp.paste_shortcuts(root), Some(a));
    assert!(mp.tree().contains_shortcut(root, a));
    assert_eq!(mp.tree().submenu(a), Some(menu_a));
    assert!(mp.delete_buffer_empty());
}

#[test]
fn copy_skips_protected_shortcuts() {
    let (mut mp, _rx) = markpad();
    let root = mp.root_menu();
    let opener = add_shortcut(&mut mp, root, "opener", Rect::new(0.1, 0.1, 0.2, 0.2));
    let menu = mp.create_menu(opener).unwrap();
    mp.set_current_menu(Some(menu));

    mp.select_shortcut(Some(opener));
    mp.copy_shortcuts();
    assert!(mp.paste_buffer_empty());
    assert_eq!(mp.paste_shortcuts(root), None);
}

#[test]
fn align_and_adjust_selected_boxes() {
    let (mut mp, _rx) = markpad();
    let root = mp.root_menu();
    let a = add_shortcut(&mut mp, root, "a", Rect::new(0.1, 0.1, 0.2, 0.2));
    let b = add_shortcut(&mut mp, root, "b", Rect::new(0.3, 0.5, 0.1, 0.2));
    mp.multi_selects(Some(a), true);
    mp.multi_selects(Some(b), true);

    mp.align_boxes(BoxPart::LEFT);
    assert!(close(mp.tree().shortcut(a).unwrap().area().x, 0.1));
    assert!(close(mp.tree().shortcut(b).unwrap().area().x, 0.1));

    mp.adjust_boxes(BoxPart::RIGHT);
    assert!(close(mp.tree().shortcut(b).unwrap().area().right(), 0.3));
    assert!(close(mp.tree().shortcut(b).unwrap().area().width, 0.2));

    mp.align_boxes(BoxPart::VCENTER);
    let ya = mp.tree().shortcut(a).unwrap().area().center().y;
    let yb = mp.tree().shortcut(b).unwrap().area().center().y;
    assert!(close(ya, 0.4));
    assert!(close(yb, 0.4));
}

#[test]
fn create_shortcut_centered_on_position() {
    let (mut mp, _rx) = markpad();
    let s = mp.create_shortcut(Point::new(0.5, 0.5), false).unwrap();
    let sc = mp.tree().shortcut(s).unwrap();
    assert_eq!(sc.name(), "NoName");
    assert!(close(sc.area().x, 0.425));
    assert!(close(sc.area().y, 0.4));
    assert!(close(sc.area().width, 0.15));
    assert!(close(sc.area().center().x, sc.name_area().center().x));
    assert!(mp.tree().contains_shortcut(mp.root_menu(), s));
}

#[test]
fn two_step_creation_uses_pointer() {
    let (mut mp, rx) = markpad();
    assert_eq!(mp.create_shortcut(Point::new(0.5, 0.5), true), None);
    assert!(mp.is_creating_shortcut());
    assert!(!mp.is_creating_from_guide());
    assert_eq!(mp.creating_actual_menu(), Some(mp.root_menu()));
    assert!(rx.try_iter().any(|e| e == UiEvent::EditorHidden(true)));

    mp.set_pointer_pos(Point::new(0.3, 0.3));
    mp.select_shortcut(None);
    assert!(!mp.is_creating_shortcut());
    let s = mp.current_shortcut().unwrap();
    assert!(close(mp.tree().shortcut(s).unwrap().area().center().x, 0.3));
    assert!(rx.try_iter().any(|e| e == UiEvent::EditorHidden(false)));
}

#[test]
fn cancelled_creation_creates_nothing() {
    let (mut mp, _rx) = markpad();
    mp.create_shortcut(Point::new(0.5, 0.5), true);
    mp.cancel_create_shortcut();
    assert!(!mp.is_creating_shortcut());
    assert!(mp.tree().shortcuts(mp.root_menu()).is_empty());
}

#[test]
fn creation_snaps_to_guide_area() {
    let (mut mp, _rx) = markpad();
    let guide = mp.tree_mut().new_main_menu();
    let area = add_shortcut(&mut mp, guide, "area", Rect::new(0.1, 0.1, 0.3, 0.3));
    let with_menu = add_shortcut(&mut mp, guide, "menu area", Rect::new(0.6, 0.6, 0.3, 0.3));
    mp.tree_mut().create_menu(with_menu).unwrap();
    mp.set_guide(Some(guide));

    let s = mp.create_shortcut(Point::new(0.2, 0.2), false).unwrap();
    assert_eq!(mp.tree().shortcut(s).unwrap().area(), mp.tree().shortcut(area).unwrap().area());
    assert!(mp.tree().submenu(s).is_none());

    let t = mp.create_shortcut(Point::new(0.7, 0.7), false).unwrap();
    assert!(mp.tree().submenu(t).is_some());

    // moved boxes snap back
    let limits = mp.limits();
    mp.tree_mut().shortcut_mut(s).unwrap().move_by(0.01, 0.01, &limits);
    assert!(mp.adjust_box_to_guide(s));
    assert!(close(mp.tree().shortcut(s).unwrap().area().x, 0.1));
}

#[test]
fn find_and_open_menus() {
    let (mut mp, _rx) = markpad();
    let root = mp.root_menu();
    let apps = add_shortcut(&mut mp, root, "Apps", Rect::new(0.0, 0.3, 0.2, 0.4));
    let menu = mp.create_menu(apps).unwrap();

    assert_eq!(mp.find_menu("Apps"), Some(menu));
    assert_eq!(mp.find_menu("Nope"), None);
    assert_eq!(mp.find_menu(""), None);

    mp.open_menu(menu, true);
    assert!(mp.is_menu_opened(menu));
    assert!(mp.opens_current_menu(apps));
    assert_eq!(mp.current_menu_opener(), Some(apps));
    assert!(mp.is_overlay_shown());

    mp.open_close_menu(menu);
    assert_eq!(mp.current_menu(), root);
}

#[test]
fn rename_recenters_label_with_measurer() {
    let (mut mp, _rx) = markpad();
    mp.set_measurer(|text: &str| Size::new(0.01 * text.len() as f32, 0.03));
    let root = mp.root_menu();
    let s = add_shortcut(&mut mp, root, "ab", Rect::new(0.2, 0.2, 0.2, 0.2));

    assert!(mp.center_name(s, true, true));
    assert!(close(mp.tree().shortcut(s).unwrap().name_area().width, 0.02));

    assert!(mp.rename_shortcut(s, "abcdef"));
    let sc = mp.tree().shortcut(s).unwrap();
    assert_eq!(sc.name(), "abcdef");
    assert!(close(sc.name_area().width, 0.06));
    assert!(sc.name_area().right() <= sc.area().right());
}
