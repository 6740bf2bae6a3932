//! Auth screen: one form, two modes.

use crate::state::{App, AuthField};
use crate::views::centered;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let form = centered(area, 52, 15);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(form);

    let view = &app.auth_view;

    let title = Paragraph::new(view.mode.title())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(title, rows[0]);

    view.email.render(
        f,
        rows[1],
        "Email",
        view.focus == AuthField::Email,
        &app.theme,
    );
    view.password.render(
        f,
        rows[2],
        "Password",
        view.focus == AuthField::Password,
        &app.theme,
    );

    if let Some(error) = &view.error {
        let line = Paragraph::new(error.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.error));
        f.render_widget(line, rows[3]);
    }

    let hint = format!(
        "[Enter] {}   [Ctrl+T] {}",
        view.mode.submit_label(),
        view.mode.switch_hint()
    );
    let hint = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.text_dim));
    f.render_widget(hint, rows[4]);
}
