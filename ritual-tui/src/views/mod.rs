//! View rendering dispatch.

pub mod add_habit;
pub mod auth;
pub mod habits;

use crate::nav::Screen;
use crate::state::App;
use crate::theme::notification_color;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    match app.screen {
        Screen::Auth => auth::render(f, app, layout[1]),
        Screen::Habits => habits::render(f, app, layout[1]),
        Screen::AddHabit => add_habit::render(f, app, layout[1]),
    }

    render_footer(f, app, layout[2]);
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let account = match app.session.user() {
        Some(user) => user.email.clone(),
        None if app.session.is_loading() => "restoring session...".to_string(),
        None => "signed out".to_string(),
    };
    let live = if app.realtime_connected {
        "live"
    } else {
        "offline"
    };
    let title = format!("ritual | {} | {} | {}", app.screen.title(), account, live);
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().fg(app.theme.primary),
    ));
    f.render_widget(block, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help = match app.screen {
        Screen::Auth => "Tab next field • Enter submit • Ctrl+T switch mode • Ctrl+C quit",
        Screen::Habits => "j/k move • c complete • d delete • n new • s sign out • q quit",
        Screen::AddHabit => "Tab next field • \u{2190}/\u{2192} frequency • Enter create • Esc back",
    };
    let (text, style) = if let Some(note) = app.notifications.last() {
        (
            format!("{}: {}", note.level.label(), note.message),
            Style::default().fg(notification_color(note.level, &app.theme)),
        )
    } else {
        (help.to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::TOP))
        .style(style);
    f.render_widget(footer, area);
}

/// Centers a fixed-size box inside `area`, clamped to fit.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
