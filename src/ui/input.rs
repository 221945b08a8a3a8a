//! Input handling.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Screen};

/// Handle a crossterm event.
///
/// Returns `Ok(true)` if the event was handled. The only fallible path is
/// submitting the tag form, where a fetch failure is fatal to the run.
pub fn handle_input(app: &mut App, event: Event) -> anyhow::Result<bool> {
    match event {
        Event::Key(key) => handle_key(app, key),
        _ => Ok(false),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> anyhow::Result<bool> {
    if key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        app.should_quit = true;
        return Ok(true);
    }

    match app.screen {
        Screen::TagForm => handle_form_key(app, key),
        Screen::DiffViewer => Ok(handle_viewer_key(app, key)),
    }
}

/// Keys on the tag entry form.
fn handle_form_key(app: &mut App, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
        KeyCode::Enter if app.submit_focused() => {
            app.submit_tags()?;
            Ok(true)
        }
        KeyCode::Enter | KeyCode::Tab | KeyCode::Down => {
            app.focus_next();
            Ok(true)
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.focus_prev();
            Ok(true)
        }
        KeyCode::Backspace => {
            if let Some(input) = app.focused_input_mut() {
                input.pop_char();
                app.mark_dirty();
            }
            Ok(true)
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.focused_input_mut() {
                input.push_char(c);
                app.mark_dirty();
            }
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Keys in the diff viewer.
fn handle_viewer_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            true
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.scroll(1);
            true
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.scroll(-1);
            true
        }
        KeyCode::PageDown => {
            app.scroll(app.viewport_height as isize);
            true
        }
        KeyCode::PageUp => {
            app.scroll(-(app.viewport_height as isize));
            true
        }
        KeyCode::Char('g') => {
            app.scroll_to_top();
            true
        }
        KeyCode::Char('G') => {
            app.scroll_to_bottom();
            true
        }
        KeyCode::Enter => {
            app.open_editor();
            true
        }
        _ => false,
    }
}
