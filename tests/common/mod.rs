#![allow(dead_code)]

use padmenu::actions::{ActionExecutor, ActionRequest};
use padmenu::geometry::{Point, Rect};
use padmenu::menu::{MenuId, ShortcutId};
use padmenu::messages::{ui_channel, UiEvent};
use padmenu::pad::Pad;
use padmenu::services::{CursorControl, DeviceId};
use padmenu::touch::Touch;
use padmenu::{App, MarkPad, Settings};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};

pub const DEVICE: DeviceId = 7;

#[derive(Clone, Default)]
pub struct RecordingExecutor {
    requests: Arc<Mutex<Vec<ActionRequest>>>,
}

impl RecordingExecutor {
    pub fn requests(&self) -> Vec<ActionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl ActionExecutor for RecordingExecutor {
    fn exec(&self, request: ActionRequest) {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorCall {
    Disable(DeviceId),
    Enable(DeviceId),
}

#[derive(Clone, Default)]
pub struct RecordingCursor {
    calls: Arc<Mutex<Vec<CursorCall>>>,
}

impl RecordingCursor {
    pub fn calls(&self) -> Vec<CursorCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl CursorControl for RecordingCursor {
    fn disable_device_for_cursor(&self, device: DeviceId) {
        if let Ok(mut guard) = self.calls.lock() {
            guard.push(CursorCall::Disable(device));
        }
    }

    fn enable_device_for_cursor(&self, device: DeviceId) {
        if let Ok(mut guard) = self.calls.lock() {
            guard.push(CursorCall::Enable(device));
        }
    }
}

/// An application with one 1000x600 pad, recording everything it sends out.
pub struct Fixture {
    pub app: App,
    pub rx: Receiver<UiEvent>,
    pub executor: RecordingExecutor,
    pub cursor: RecordingCursor,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let (sink, rx) = ui_channel();
        let executor = RecordingExecutor::default();
        let cursor = RecordingCursor::default();
        let markpad = MarkPad::new(settings, sink)
            .with_executor(Box::new(executor.clone()))
            .with_cursor_control(Box::new(cursor.clone()));
        let mut app = App::new(markpad);
        app.add_pad(DEVICE, 1000.0, 600.0).unwrap();
        Self {
            app,
            rx,
            executor,
            cursor,
        }
    }

    pub fn mp(&self) -> &MarkPad {
        self.app.markpad()
    }

    pub fn mp_mut(&mut self) -> &mut MarkPad {
        self.app.markpad_mut()
    }

    pub fn pad(&self) -> &Pad {
        self.app.current_pad().unwrap()
    }

    pub fn frame(&mut self, touches: &[Touch]) {
        self.app.touch_callback(DEVICE, touches);
    }

    /// Events posted since the last call.
    pub fn events(&self) -> Vec<UiEvent> {
        self.rx.try_iter().collect()
    }
}

pub fn touch(ident: i32, x: f32, y: f32, time: f64) -> Touch {
    Touch::new(ident, Point::new(x, y), time)
}

pub fn add_shortcut(mp: &mut MarkPad, menu: MenuId, name: &str, area: Rect) -> ShortcutId {
    let limits = mp.limits();
    let id = mp.tree_mut().add_new_shortcut(menu, name).unwrap();
    mp.tree_mut()
        .shortcut_mut(id)
        .unwrap()
        .set_area(area, &limits);
    id
}
