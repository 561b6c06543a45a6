use crate::menu::ShortcutId;
use crate::messages::{UiEvent, UiSink};
use crate::touch::Touch;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// State of the touch that triggers an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutState {
    Idle,
    Up,
    Down,
    Move,
}

/// A command of an action family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub help: &'static str,
    /// Default argument, `?` when the user must provide one.
    pub arg: &'static str,
}

const fn cmd(
    name: &'static str,
    title: &'static str,
    help: &'static str,
    arg: &'static str,
) -> CommandSpec {
    CommandSpec {
        name,
        title,
        help,
        arg,
    }
}

const OPEN_COMMANDS: &[CommandSpec] = &[
    cmd("openurl", "Open URL", "", "?"),
    cmd("openfile", "Open File or Directory", "", "?"),
    cmd("openhideapp", "Open/Hide Application", "", "?"),
    cmd("opensysdir", "Open Predefined Directory", "", "?"),
];

const WINDOW_COMMANDS: &[CommandSpec] = &[
    cmd("nextwin", "Show Next App Window", "", ""),
    cmd("appwins", "Show All App Windows", "", ""),
    cmd("resize", "Move Window at Location", "", "?"),
    cmd("fullscreen", "App in Full Screen", "", ""),
    cmd("zoom", "Zoom Current App", "", ""),
    cmd("unzoom", "Unzoom Current App", "", ""),
];

const MEDIA_COMMANDS: &[CommandSpec] = &[
    cmd("next", "Next Track or Page", "", "?"),
    cmd("previous", "Previous Track or Page", "", "?"),
    cmd("showhide", "Show/Hide", "", "?"),
    cmd("playpause", "Play/Pause", "", "?"),
    cmd("quitapp", "Quit", "", "?"),
    cmd("command", "Custom Command", "(ex: Music : PlayPause)", "?"),
];

const CLIPBOARD_COMMANDS: &[CommandSpec] = &[
    cmd("pastews", "Paste Without Style", "", ""),
    cmd("write", "Paste this String", "(type string to be pasted)", "?"),
    cmd("store", "Copy to Alt. Clipboard", "(number or any name)", "?"),
    cmd("retrieve", "Paste from Alt. Clipboard", "(number or any name)", "?"),
    cmd("cut", "Cut", "", ""),
    cmd("copy", "Copy", "", ""),
    cmd("paste", "Paste", "", ""),
];

const HOTKEY_COMMANDS: &[CommandSpec] = &[
    cmd("keystroke", "Custom Hotkey", "(select modifiers and enter key)", "?"),
    cmd("redo", "Redo", "(hotkey adapts to app)", ""),
    cmd("undo", "Undo", "", "cmd+z"),
    cmd("find", "Find", "", "cmd+f"),
    cmd("hide", "Hide", "", "cmd+h"),
    cmd("new", "New", "", "cmd+n"),
    cmd("open", "Open", "", "cmd+o"),
    cmd("quit", "Quit", "", "cmd+q"),
    cmd("save", "Save", "", "cmd+s"),
];

const DESKTOP_COMMANDS: &[CommandSpec] = &[
    cmd("volume", "Volume", "", "?"),
    cmd("grabselect", "Grab Screen Area", "", ""),
    cmd("grabscreen", "Grab Entire Screen", "", ""),
    cmd("mcontrol", "Mission Control", "", ""),
    cmd("desktop", "Show Desktop", "", ""),
    cmd("dock", "Show/Hide Dock", "", ""),
];

const SCRIPT_COMMANDS: &[CommandSpec] = &[
    cmd("appcmd", "Application Command", "(ex: Music : PlayPause)", "?"),
    cmd("applecmd", "AppleScript", "", "?"),
    cmd("unixcmd", "Unix", "(ex: ls /Applications)", "?"),
    cmd("scriptfile", "Script File", "(Unix or Apple script)", "?"),
];

/// Family of actions a shortcut can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Opens a sub-menu, nothing is executed.
    Menu,
    Open,
    Window,
    Media,
    Clipboard,
    Hotkey,
    Desktop,
    Script,
}

impl ActionKind {
    pub const ALL: [ActionKind; 8] = [
        ActionKind::Menu,
        ActionKind::Open,
        ActionKind::Window,
        ActionKind::Media,
        ActionKind::Clipboard,
        ActionKind::Hotkey,
        ActionKind::Desktop,
        ActionKind::Script,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ActionKind::Menu => "Menu",
            ActionKind::Open => "Open URL, File or Application",
            ActionKind::Window => "Zoom and Windows",
            ActionKind::Media => "Commands for Media Players and Browsers",
            ActionKind::Clipboard => "Extended Copy & Paste",
            ActionKind::Hotkey => "Application Hotkeys",
            ActionKind::Desktop => "Desktop Commands",
            ActionKind::Script => "Script and Unix Commands",
        }
    }

    pub fn commands(self) -> &'static [CommandSpec] {
        match self {
            ActionKind::Menu => &[],
            ActionKind::Open => OPEN_COMMANDS,
            ActionKind::Window => WINDOW_COMMANDS,
            ActionKind::Media => MEDIA_COMMANDS,
            ActionKind::Clipboard => CLIPBOARD_COMMANDS,
            ActionKind::Hotkey => HOTKEY_COMMANDS,
            ActionKind::Desktop => DESKTOP_COMMANDS,
            ActionKind::Script => SCRIPT_COMMANDS,
        }
    }

    pub fn is_hotkey(self) -> bool {
        self == ActionKind::Hotkey
    }

    pub fn command(self, index: usize) -> Option<&'static CommandSpec> {
        self.commands().get(index)
    }

    /// Finds the family and index of a command name (names are lowercase).
    pub fn from_command(name: &str) -> Option<(ActionKind, usize)> {
        Self::ALL.iter().find_map(|kind| {
            kind.commands()
                .iter()
                .position(|c| c.name == name)
                .map(|index| (*kind, index))
        })
    }
}

/// What a shortcut does when released.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortcutAction {
    pub kind: ActionKind,
    #[serde(default)]
    pub command: Option<usize>,
    #[serde(default)]
    pub arg: String,
}

impl ShortcutAction {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            command: None,
            arg: String::new(),
        }
    }

    /// Binds a command by name, taking its default argument.
    pub fn from_command(name: &str) -> Option<Self> {
        let (kind, index) = ActionKind::from_command(name)?;
        let spec = kind.command(index)?;
        Some(Self {
            kind,
            command: Some(index),
            arg: if spec.arg == "?" {
                String::new()
            } else {
                spec.arg.to_string()
            },
        })
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = arg.into();
        self
    }

    pub fn command_spec(&self) -> Option<&'static CommandSpec> {
        self.command.and_then(|i| self.kind.command(i))
    }

    pub fn command_name(&self) -> &'static str {
        if self.kind == ActionKind::Menu {
            return "menu";
        }
        self.command_spec().map(|c| c.name).unwrap_or("")
    }
}

/// Everything an executor needs about the released shortcut.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    pub shortcut: ShortcutId,
    pub name: String,
    pub action: Option<ShortcutAction>,
    pub touch: Touch,
    pub state: ShortcutState,
}

/// Runs the action bound to a shortcut.
///
/// Fire-and-forget: the gesture path never waits for nor inspects the
/// outcome, failures are reported by the executor itself.
pub trait ActionExecutor: Send {
    fn exec(&self, request: ActionRequest);
}

/// Discards every request.
#[derive(Debug, Default)]
pub struct NoopExecutor;

impl ActionExecutor for NoopExecutor {
    fn exec(&self, request: ActionRequest) {
        tracing::debug!(name = %request.name, "no executor installed");
    }
}

pub type ActionHandler = Arc<dyn Fn(&ActionRequest) -> anyhow::Result<()> + Send + Sync>;

/// Dispatches requests to one handler per [`ActionKind`] on a detached thread.
#[derive(Clone, Default)]
pub struct ThreadedExecutor {
    handlers: HashMap<ActionKind, ActionHandler>,
    feedback: Option<UiSink>,
}

impl ThreadedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feedback(mut self, sink: UiSink) -> Self {
        self.feedback = Some(sink);
        self
    }

    pub fn register<F>(&mut self, kind: ActionKind, handler: F)
    where
        F: Fn(&ActionRequest) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.handlers.insert(kind, Arc::new(handler));
    }

    /// Runs the handler synchronously on the calling thread.
    pub fn dispatch(&self, request: &ActionRequest) -> anyhow::Result<()> {
        let Some(action) = &request.action else {
            return Ok(());
        };
        if action.kind == ActionKind::Menu {
            return Ok(());
        }
        match self.handlers.get(&action.kind) {
            Some(handler) => handler(request),
            None => Err(anyhow::anyhow!("no handler for {:?}", action.kind)),
        }
    }
}

impl ActionExecutor for ThreadedExecutor {
    fn exec(&self, request: ActionRequest) {
        let this = self.clone();
        std::thread::spawn(move || {
            if let Err(err) = this.dispatch(&request) {
                tracing::error!(?err, name = %request.name, "action failed");
                if let Some(sink) = &this.feedback {
                    let arg = request.action.as_ref().map(|a| a.arg.as_str()).unwrap_or("");
                    sink.post(UiEvent::Feedback(format!(
                        "Invalid Action: {} {}",
                        request.name, arg
                    )));
                }
            }
        });
    }
}
