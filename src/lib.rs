//! Touch-driven hierarchical shortcut menus for trackpads.
//!
//! Frames of raw touches enter through [`app::App::touch_callback`], are
//! filtered by [`touch`] and classified by the gesture state machine in
//! [`pad`] against the menus of [`menu`]. Effects reach the renderer as
//! [`messages::UiEvent`]s and released shortcuts reach an
//! [`actions::ActionExecutor`].

pub mod actions;
pub mod app;
pub mod controller;
pub mod data_logger;
pub mod geometry;
pub mod hotkey;
pub mod logging;
pub mod markpad;
pub mod menu;
pub mod messages;
pub mod pad;
pub mod services;
pub mod settings;
pub mod touch;
pub mod visibility;

pub use app::{App, SharedApp};
pub use markpad::{EditMode, MarkPad};
pub use pad::Pad;
pub use settings::Settings;
