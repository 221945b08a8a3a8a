//! Application state and lifecycle.

use std::path::PathBuf;

use anyhow::Context as _;

use crate::core::{filter_diff, DiffLine, DiffProvider};

use super::editor::EditorLauncher;

/// Maximum characters accepted per tag input.
pub const TAG_CHAR_LIMIT: usize = 20;

/// Which screen the app is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Tag entry form.
    TagForm,
    /// Filtered diff viewer.
    DiffViewer,
}

/// A single-line text input with a character limit.
#[derive(Debug)]
pub struct TagInput {
    /// Placeholder shown while the value is empty.
    pub placeholder: &'static str,
    /// Current value.
    pub value: String,
}

impl TagInput {
    fn new(placeholder: &'static str) -> Self {
        Self {
            placeholder,
            value: String::new(),
        }
    }

    /// Append a character, respecting the limit.
    pub fn push_char(&mut self, c: char) {
        if self.value.chars().count() < TAG_CHAR_LIMIT {
            self.value.push(c);
        }
    }

    /// Remove the last character.
    pub fn pop_char(&mut self) {
        self.value.pop();
    }
}

/// Application state.
pub struct App {
    provider: Box<dyn DiffProvider>,
    editor: Box<dyn EditorLauncher>,
    tracked: Vec<String>,
    edit_file: PathBuf,

    /// Current screen.
    pub screen: Screen,
    /// Tag inputs: new tag first, old tag second.
    pub inputs: [TagInput; 2],
    /// Focus index: `0..inputs.len()` are inputs, `inputs.len()` is the
    /// submit button.
    pub focus_index: usize,
    /// Filtered diff lines, set on submit.
    pub diff: Vec<DiffLine>,
    /// Vertical scroll offset in the viewer.
    pub scroll_y: usize,
    /// Viewer height from the last render, used for paging and clamping.
    pub viewport_height: usize,
    /// Status message for the footer.
    pub status: Option<String>,
    /// Error message for the footer.
    pub error: Option<String>,
    /// Redraw needed?
    pub dirty: bool,
    /// Should the app quit?
    pub should_quit: bool,
}

impl App {
    /// Create the app with its injected capabilities: a diff provider, an
    /// editor launcher, the tracked file paths, and the handoff target.
    pub fn new(
        provider: Box<dyn DiffProvider>,
        editor: Box<dyn EditorLauncher>,
        tracked: Vec<String>,
        edit_file: PathBuf,
    ) -> Self {
        Self {
            provider,
            editor,
            tracked,
            edit_file,
            screen: Screen::TagForm,
            inputs: [TagInput::new("New tag"), TagInput::new("Old tag")],
            focus_index: 0,
            diff: Vec::new(),
            scroll_y: 0,
            viewport_height: 0,
            status: None,
            error: None,
            dirty: true,
            should_quit: false,
        }
    }

    /// Mark the UI as needing a redraw.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clear the redraw flag after drawing.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Move focus to the next form element, wrapping past the button.
    pub fn focus_next(&mut self) {
        self.focus_index = (self.focus_index + 1) % (self.inputs.len() + 1);
        self.mark_dirty();
    }

    /// Move focus to the previous form element, wrapping.
    pub fn focus_prev(&mut self) {
        let count = self.inputs.len() + 1;
        self.focus_index = (self.focus_index + count - 1) % count;
        self.mark_dirty();
    }

    /// Whether the submit button has focus.
    pub fn submit_focused(&self) -> bool {
        self.focus_index == self.inputs.len()
    }

    /// Currently focused input, if an input (not the button) has focus.
    pub fn focused_input_mut(&mut self) -> Option<&mut TagInput> {
        self.inputs.get_mut(self.focus_index)
    }

    /// Fetch the diff for the entered tags, filter it to the tracked files,
    /// and switch to the viewer.
    ///
    /// A fetch failure aborts the attempt: the error propagates to the
    /// caller, nothing is filtered, and the form stays up. No retry.
    pub fn submit_tags(&mut self) -> anyhow::Result<()> {
        let new_tag = self.inputs[0].value.clone();
        let old_tag = self.inputs[1].value.clone();

        let raw = self
            .provider
            .fetch(&new_tag, &old_tag)
            .with_context(|| format!("failed to fetch diff for {old_tag}...{new_tag}"))?;

        self.diff = filter_diff(raw, &self.tracked);
        self.screen = Screen::DiffViewer;
        self.scroll_y = 0;
        self.status = None;
        self.error = None;
        self.mark_dirty();
        Ok(())
    }

    fn max_scroll(&self) -> usize {
        self.diff.len().saturating_sub(self.viewport_height.max(1))
    }

    /// Scroll the viewer by `delta` lines, clamped to the diff extent.
    pub fn scroll(&mut self, delta: isize) {
        let next = self
            .scroll_y
            .saturating_add_signed(delta)
            .min(self.max_scroll());
        if next != self.scroll_y {
            self.scroll_y = next;
            self.mark_dirty();
        }
    }

    /// Jump to the first line.
    pub fn scroll_to_top(&mut self) {
        self.scroll_y = 0;
        self.mark_dirty();
    }

    /// Jump to the last page.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_y = self.max_scroll();
        self.mark_dirty();
    }

    /// Re-clamp the scroll offset after a viewport resize.
    pub fn clamp_scroll(&mut self) {
        self.scroll_y = self.scroll_y.min(self.max_scroll());
    }

    /// Scroll position as a fraction of the scrollable extent (0.0 to 1.0).
    pub fn scroll_percent(&self) -> f64 {
        let max = self.max_scroll();
        if max == 0 {
            1.0
        } else {
            self.scroll_y as f64 / max as f64
        }
    }

    /// Hand the edit file off to the external editor and record the outcome
    /// as a footer message.
    pub fn open_editor(&mut self) {
        match self.editor.launch(&self.edit_file) {
            Ok(()) => {
                self.status = Some(format!("Editor closed for {}", self.edit_file.display()));
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
        self.mark_dirty();
    }
}
