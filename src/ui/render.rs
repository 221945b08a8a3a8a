//! Frame rendering: the tag form and the filtered diff viewer.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::{DiffLine, LineClass};

use super::app::{App, Screen};

fn focused_style() -> Style {
    Style::default().fg(Color::Indexed(205))
}

fn blurred_style() -> Style {
    Style::default().fg(Color::Indexed(240))
}

fn title_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Indexed(213))
        .add_modifier(Modifier::BOLD)
}

/// Display style for a line class: added is emphasized green, removed is
/// emphasized red, context is plain.
pub fn class_style(class: LineClass) -> Style {
    match class {
        LineClass::Added => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        LineClass::Removed => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
        LineClass::Context => Style::default(),
    }
}

/// Build the styled display line for a diff line.
pub fn styled_line(line: &DiffLine) -> Line<'_> {
    Line::from(Span::styled(line.text.as_str(), class_style(line.class)))
}

/// Render the current frame.
pub fn render(frame: &mut Frame, app: &mut App) {
    match app.screen {
        Screen::TagForm => render_form(frame, app),
        Screen::DiffViewer => render_viewer(frame, app),
    }
}

fn render_form(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        " Input tags to get the diff for server and agent args in k3s ",
        title_style(),
    )));
    lines.push(Line::default());

    for (i, input) in app.inputs.iter().enumerate() {
        let focused = app.focus_index == i;
        let prompt = Span::styled("> ", if focused { focused_style() } else { blurred_style() });
        let text = if input.value.is_empty() {
            Span::styled(input.placeholder, blurred_style())
        } else if focused {
            Span::styled(input.value.as_str(), focused_style())
        } else {
            Span::raw(input.value.as_str())
        };
        lines.push(Line::from(vec![prompt, text]));
    }

    lines.push(Line::default());
    let button_style = if app.submit_focused() {
        focused_style()
    } else {
        blurred_style()
    };
    lines.push(Line::from(Span::styled("[ Submit ]", button_style)));

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_viewer(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);

    app.viewport_height = chunks[1].height as usize;
    app.clamp_scroll();

    if app.diff.is_empty() {
        let msg = Paragraph::new("No changes for the tracked files").style(blurred_style());
        frame.render_widget(msg, chunks[1]);
    } else {
        let lines: Vec<Line> = app
            .diff
            .iter()
            .skip(app.scroll_y)
            .take(app.viewport_height)
            .map(styled_line)
            .collect();
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    render_footer(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = " Diff Viewer ";
    let rule = "─".repeat((area.width as usize).saturating_sub(title.chars().count()));
    let line = Line::from(vec![Span::styled(title, title_style()), Span::raw(rule)]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let info = format!(" {:3.0}% ", app.scroll_percent() * 100.0);
    let (help, help_style) = match (&app.error, &app.status) {
        (Some(error), _) => (format!(" {error} "), Style::default().fg(Color::Red)),
        (None, Some(status)) => (format!(" {status} "), title_style()),
        _ => (
            " press enter to open your editor, q to quit ".to_string(),
            title_style(),
        ),
    };

    let used = help.chars().count() + info.chars().count();
    let rule = "─".repeat((area.width as usize).saturating_sub(used));
    let line = Line::from(vec![
        Span::raw(rule),
        Span::styled(help, help_style),
        Span::styled(info, title_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
