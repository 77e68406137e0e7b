//! Full-redraw rendering of the application state.
//!
//! Every frame rebuilds the whole screen from the projected sequence and the
//! progress summary; there is no incremental diffing.

use chrono::NaiveDate;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph};
use ratatui::Frame;

use crate::task::{Status, Task};

use super::app::AppState;
use super::editor::{EditorState, Picker};

const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);

/// Placeholder glyph for absent or unformattable dates.
const DATE_PLACEHOLDER: &str = "—";

pub fn render(frame: &mut Frame, app: &AppState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    render_header(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_progress(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);

    if let Some(editor) = app.editor.as_ref() {
        render_editor_modal(frame, area, editor, app.editing());
    }
    if let Some(picker) = app.filter_picker.as_ref() {
        render_picker_modal(frame, area, picker, "Filter");
    }
    if let Some(picker) = app.sort_picker.as_ref() {
        render_picker_modal(frame, area, picker, "Sort");
    }
    if app.clear_confirm {
        render_clear_confirm_modal(frame, area, app.store.len());
    }
}

fn render_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            "taskdeck",
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("filter: {}", app.filter),
            Style::default().fg(COLOR_WARNING),
        ),
        Span::raw("  "),
        Span::styled(
            format!("sort: {}", app.sort),
            Style::default().fg(COLOR_MUTED),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_list(frame: &mut Frame, app: &AppState, area: Rect) {
    let mut lines = Vec::new();

    if app.view.is_empty() {
        let message = if app.store.is_empty() {
            "No tasks yet."
        } else {
            "No tasks match."
        };
        lines.push(Line::from(Span::styled(
            message,
            Style::default().fg(COLOR_MUTED),
        )));
    } else {
        let height = area.height.saturating_sub(2) as usize;
        let (start, end) = list_window(app.view.len(), app.selected, height);
        for (index, task) in app.view.iter().enumerate().take(end).skip(start) {
            let selected = app.selected == Some(index);
            lines.push(task_line(task, selected));
            if !task.description.trim().is_empty() {
                lines.push(description_line(task, selected));
            }
        }
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .title("Tasks")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_MUTED)),
    );
    frame.render_widget(list, area);
}

fn task_line(task: &Task, selected: bool) -> Line<'static> {
    let marker = if selected { "> " } else { "  " };
    let title_style = if selected {
        Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_TEXT)
    };

    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(COLOR_ACCENT)),
        Span::styled(format!("[{}] ", task.status), status_style(task.status)),
        Span::styled(task.title.clone(), title_style),
        Span::styled(
            format!("  due {}", format_deadline(task.deadline)),
            Style::default().fg(COLOR_WARNING),
        ),
        Span::styled(
            format!("  added {}", task.created_at.format("%Y-%m-%d")),
            Style::default().fg(COLOR_MUTED),
        ),
    ])
}

fn description_line(task: &Task, selected: bool) -> Line<'static> {
    let marker = if selected { "> " } else { "  " };
    Line::from(vec![
        Span::raw(marker.to_string()),
        Span::styled(
            format!("    {}", task.description),
            Style::default().fg(COLOR_MUTED),
        ),
    ])
}

fn status_style(status: Status) -> Style {
    let color = match status {
        Status::Pending => COLOR_WARNING,
        Status::InProgress => COLOR_ACCENT,
        Status::Completed => COLOR_SUCCESS,
    };
    Style::default().fg(color)
}

fn render_progress(frame: &mut Frame, app: &AppState, area: Rect) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title("Progress")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_MUTED)),
        )
        .gauge_style(Style::default().fg(COLOR_SUCCESS))
        .percent(app.progress.percent as u16)
        .label(format!(
            "{} ({}%)",
            app.progress.label(),
            app.progress.percent
        ));
    frame.render_widget(gauge, area);
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let text = match app.info.as_ref() {
        Some(info) => info.clone(),
        None => app.footer_hint(),
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(COLOR_MUTED),
    )));
    frame.render_widget(footer, area);
}

fn render_editor_modal(frame: &mut Frame, area: Rect, editor: &EditorState, editing: bool) {
    let height = (editor.fields().len() + 5) as u16;
    let modal = centered_rect(area, 56, height);
    frame.render_widget(Clear, modal);

    let mut lines = Vec::new();
    for (index, field) in editor.fields().iter().enumerate() {
        let active = editor.active_index() == index;
        let cursor = if active { "_" } else { "" };
        let style = if active {
            Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_TEXT)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", field.label), Style::default().fg(COLOR_MUTED)),
            Span::styled(format!("{}{cursor}", field.value), style),
        ]));
    }

    let row_style = if editor.status_row_active() {
        Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_ACCENT)
    };
    lines.push(Line::from(vec![
        Span::styled(format!("{:<12}", "Status"), Style::default().fg(COLOR_MUTED)),
        Span::styled(format!("< {} >", editor.status()), row_style),
    ]));

    lines.push(Line::from(""));
    if let Some(error) = editor.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(COLOR_ERROR),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            submit_label(editing),
            Style::default().fg(COLOR_SUCCESS),
        )));
    }

    let title = if editing { "Edit Task" } else { "New Task" };
    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_ACCENT)),
    );
    frame.render_widget(widget, modal);
}

fn render_picker_modal(frame: &mut Frame, area: Rect, picker: &Picker, title: &str) {
    let height = (picker.options().len() + 2) as u16;
    let modal = centered_rect(area, 36, height);
    frame.render_widget(Clear, modal);

    let lines: Vec<Line> = picker
        .options()
        .iter()
        .enumerate()
        .map(|(index, option)| {
            if index == picker.selected_index() {
                Line::from(vec![
                    Span::styled("> ", Style::default().fg(COLOR_ACCENT)),
                    Span::styled(
                        option.clone(),
                        Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(vec![Span::raw("  "), Span::styled(option.clone(), Style::default().fg(COLOR_MUTED))])
            }
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_ACCENT)),
    );
    frame.render_widget(widget, modal);
}

fn render_clear_confirm_modal(frame: &mut Frame, area: Rect, total: usize) {
    let modal = centered_rect(area, 44, 4);
    frame.render_widget(Clear, modal);

    let lines = vec![
        Line::from(format!("Delete all {total} tasks?")),
        Line::from(Span::styled(
            "y confirm   esc cancel",
            Style::default().fg(COLOR_MUTED),
        )),
    ];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title("Clear All")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_ERROR)),
        );
    frame.render_widget(widget, modal);
}

/// Submit affordance label: flips to update wording while editing.
pub(crate) fn submit_label(editing: bool) -> &'static str {
    if editing {
        "[ Update Task ]"
    } else {
        "[ Add Task ]"
    }
}

/// Format an optional deadline for display; absent dates render as a
/// placeholder glyph.
pub fn format_deadline(deadline: Option<NaiveDate>) -> String {
    match deadline {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => DATE_PLACEHOLDER.to_string(),
    }
}

fn list_window(len: usize, selected: Option<usize>, height: usize) -> (usize, usize) {
    if height == 0 || len == 0 {
        return (0, 0);
    }
    let selected = selected.unwrap_or(0).min(len - 1);
    // Rows can take two lines; halve the window so the selection stays visible.
    let visible = (height / 2).max(1);
    let start = selected.saturating_sub(visible.saturating_sub(1));
    let end = (start + visible).min(len);
    (start, end)
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_deadlines_render_as_the_placeholder_glyph() {
        assert_eq!(format_deadline(None), "—");
        assert_eq!(
            format_deadline(NaiveDate::from_ymd_opt(2024, 5, 1)),
            "2024-05-01"
        );
    }

    #[test]
    fn submit_label_flips_in_edit_mode() {
        assert_eq!(submit_label(false), "[ Add Task ]");
        assert_eq!(submit_label(true), "[ Update Task ]");
    }

    #[test]
    fn list_window_keeps_the_selection_visible() {
        assert_eq!(list_window(10, Some(0), 6), (0, 3));
        assert_eq!(list_window(10, Some(9), 6), (7, 10));
        assert_eq!(list_window(2, None, 6), (0, 2));
        assert_eq!(list_window(0, None, 6), (0, 0));
    }
}
