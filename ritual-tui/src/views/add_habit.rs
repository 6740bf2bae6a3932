//! Add-habit form with a segmented frequency selector.

use crate::state::{AddHabitField, App};
use crate::views::centered;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ritual_core::Frequency;

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let form = centered(area, 56, 18);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(form);

    let view = &app.add_habit_view;

    let title = Paragraph::new("Add Habit")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(title, rows[0]);

    view.title.render(
        f,
        rows[1],
        "Title",
        view.focus == AddHabitField::Title,
        &app.theme,
    );
    view.description.render(
        f,
        rows[2],
        "Description",
        view.focus == AddHabitField::Description,
        &app.theme,
    );

    render_frequency_selector(f, app, rows[3]);

    if let Some(error) = &view.error {
        let line = Paragraph::new(error.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.error));
        f.render_widget(line, rows[4]);
    }

    let hint = if view.can_submit() {
        Span::styled("[Enter] Add Habit", Style::default().fg(app.theme.success))
    } else {
        Span::styled(
            "Fill in title and description to add",
            Style::default().fg(app.theme.text_muted),
        )
    };
    let hint = Paragraph::new(Line::from(hint)).alignment(Alignment::Center);
    f.render_widget(hint, rows[5]);
}

/// Three fixed segments, the active one highlighted.
fn render_frequency_selector(f: &mut Frame<'_>, app: &App, area: Rect) {
    let view = &app.add_habit_view;
    let focused = view.focus == AddHabitField::Frequency;
    let border = if focused {
        app.theme.border_focus
    } else {
        app.theme.border
    };

    let mut spans = Vec::new();
    for (index, frequency) in Frequency::ALL.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(
                " \u{2502} ",
                Style::default().fg(app.theme.border),
            ));
        }
        let style = if *frequency == view.frequency {
            Style::default()
                .fg(app.theme.bg)
                .bg(app.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text_dim)
        };
        spans.push(Span::styled(format!(" {} ", frequency.label()), style));
    }

    let selector = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title("Frequency")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    f.render_widget(selector, area);
}
