//! Today's habits: the list and a detail panel for the selection.

use crate::state::App;
use crate::theme::{frequency_color, streak_color, EmberTheme};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use ritual_core::Habit;

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    render_list(f, app, columns[0]);
    render_detail(f, app, columns[1]);
}

fn render_list(f: &mut Frame<'_>, app: &App, area: Rect) {
    let view = &app.habits_view;
    let block = Block::default().title("Today's Habits").borders(Borders::ALL);

    if view.habits.is_empty() {
        let empty = Paragraph::new("No habits yet. Add your first Habit")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.text_dim))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem<'static>> = view
        .habits
        .iter()
        .map(|habit| {
            habit_item(
                habit,
                view.completed_today.contains(&habit.id),
                &app.theme,
            )
        })
        .collect();

    let mut state = ListState::default();
    if let Some(selected) = &view.selected {
        state.select(view.habits.iter().position(|habit| &habit.id == selected));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(app.theme.bg_highlight));
    f.render_stateful_widget(list, area, &mut state);
}

fn habit_item(habit: &Habit, completed: bool, theme: &EmberTheme) -> ListItem<'static> {
    let marker = if completed { "\u{2713} " } else { "  " };
    let title_style = if completed {
        Style::default()
            .fg(theme.text_dim)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
            .fg(theme.text)
            .add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(theme.success)),
        Span::styled(habit.title.clone(), title_style),
    ])];
    if let Some(description) = &habit.description {
        if !description.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", description),
                Style::default().fg(theme.text_dim),
            )));
        }
    }
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {} day streak", habit.streak_count),
            Style::default().fg(streak_color(habit.streak_count, theme)),
        ),
        Span::raw("   "),
        Span::styled(
            habit.frequency.label().to_string(),
            Style::default().fg(frequency_color(habit.frequency, theme)),
        ),
    ]));
    lines.push(Line::from(""));

    ListItem::new(lines)
}

fn render_detail(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default().title("Details").borders(Borders::ALL);

    let habit = match app.habits_view.selected_habit() {
        Some(habit) => habit,
        None => {
            let placeholder = Paragraph::new("Select a habit")
                .alignment(Alignment::Center)
                .style(Style::default().fg(app.theme.text_muted))
                .block(block);
            f.render_widget(placeholder, area);
            return;
        }
    };

    let completed = app.habits_view.completed_today.contains(&habit.id);
    let status = if completed {
        Span::styled("completed today", Style::default().fg(app.theme.success))
    } else {
        Span::styled("not completed yet", Style::default().fg(app.theme.text_dim))
    };

    let mut lines = vec![
        Line::from(Span::styled(
            habit.title.clone(),
            Style::default()
                .fg(app.theme.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Frequency: ", Style::default().fg(app.theme.text_dim)),
            Span::styled(
                habit.frequency.label().to_string(),
                Style::default().fg(frequency_color(habit.frequency, &app.theme)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Streak:    ", Style::default().fg(app.theme.text_dim)),
            Span::styled(
                format!("{} days", habit.streak_count),
                Style::default().fg(streak_color(habit.streak_count, &app.theme)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Today:     ", Style::default().fg(app.theme.text_dim)),
            status,
        ]),
    ];
    if let Some(last) = habit.last_completed {
        lines.push(Line::from(vec![
            Span::styled("Last done: ", Style::default().fg(app.theme.text_dim)),
            Span::raw(last.format("%Y-%m-%d %H:%M UTC").to_string()),
        ]));
    }
    if let Some(description) = &habit.description {
        if !description.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                description.clone(),
                Style::default().fg(app.theme.text),
            )));
        }
    }

    let detail = Paragraph::new(lines)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(detail, area);
}
