//! Replays recorded touch frames against a demo menu and prints what the
//! overlay would be told.
//!
//! Usage: `padmenu <frames.json> [settings.json]`

use padmenu::actions::{ActionKind, ShortcutAction, ThreadedExecutor};
use padmenu::controller::{Overlay, OverlayPump};
use padmenu::geometry::{Point, Rect};
use padmenu::menu::{MenuId, ShortcutId};
use padmenu::messages::{ui_channel, OverlayMode};
use padmenu::touch::Touch;
use padmenu::{logging, App, MarkPad, Settings};
use serde::Deserialize;

const DEVICE: u64 = 1;

#[derive(Debug, Deserialize)]
struct RecordedTouch {
    ident: i32,
    x: f32,
    y: f32,
    time: f64,
}

struct PrintOverlay;

impl Overlay for PrintOverlay {
    fn show_overlay(&mut self, mode: OverlayMode) {
        println!("overlay {mode:?}");
    }

    fn menu_activated(&mut self, menu: MenuId) {
        println!("menu {menu:?}");
    }

    fn shortcut_selected(&mut self, shortcut: Option<ShortcutId>) {
        println!("selected {shortcut:?}");
    }

    fn show_feedback(&mut self, text: &str) {
        println!("feedback {text}");
    }

    fn refresh(&mut self) {}
}

fn build_demo_menu(mp: &mut MarkPad) {
    let limits = mp.limits();
    let root = mp.root_menu();
    let tree = mp.tree_mut();
    let Some(apps) = tree.add_new_shortcut(root, "Apps") else {
        return;
    };
    if let Some(s) = tree.shortcut_mut(apps) {
        s.set_area(Rect::new(0.0, 0.3, 0.2, 0.4), &limits);
        s.set_action(Some(ShortcutAction::new(ActionKind::Menu)));
    }
    let Some(menu) = tree.create_menu(apps) else {
        return;
    };
    for (i, name) in ["Mail", "Terminal", "Browser"].iter().enumerate() {
        if let Some(s) = tree.add_new_shortcut(menu, name) {
            if let Some(sc) = tree.shortcut_mut(s) {
                sc.set_area(Rect::new(0.3 + 0.2 * i as f32, 0.4, 0.18, 0.2), &limits);
                sc.set_action(ShortcutAction::from_command("openhideapp").map(|a| a.with_arg(*name)));
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(frames_path) = args.next() else {
        anyhow::bail!("usage: padmenu <frames.json> [settings.json]");
    };
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    logging::init(settings.debug_logging, None);

    let frames: Vec<Vec<RecordedTouch>> =
        serde_json::from_str(&std::fs::read_to_string(&frames_path)?)?;

    let (sink, rx) = ui_channel();
    let mut executor = ThreadedExecutor::new().with_feedback(sink.clone());
    executor.register(ActionKind::Open, |req| {
        let arg = req.action.as_ref().map(|a| a.arg.as_str()).unwrap_or("");
        println!("open {arg}");
        Ok(())
    });

    let mut markpad = MarkPad::new(settings, sink).with_executor(Box::new(executor));
    build_demo_menu(&mut markpad);
    let mut app = App::new(markpad);
    app.add_pad(DEVICE, 1000.0, 600.0)?;

    let mut pump = OverlayPump::new(rx);
    let mut overlay = PrintOverlay;
    for frame in frames {
        let touches: Vec<Touch> = frame
            .iter()
            .map(|t| Touch::new(t.ident, Point::new(t.x, t.y), t.time))
            .collect();
        app.touch_callback(DEVICE, &touches);
        pump.pump(&mut overlay);
    }

    // let the executor thread finish
    std::thread::sleep(std::time::Duration::from_millis(50));
    pump.pump(&mut overlay);
    Ok(())
}
