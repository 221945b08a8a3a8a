//! Terminal UI using ratatui.

pub mod app;
pub mod editor;
mod input;
mod render;

pub use app::{App, Screen};
pub use editor::{edit_command, editor_command, EditorLauncher, SystemEditor};
pub use input::handle_input;
pub use render::render;
