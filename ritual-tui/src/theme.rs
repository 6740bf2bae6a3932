//! Ember theme and color utilities.

use crate::notifications::NotificationLevel;
use ratatui::style::Color;
use ritual_core::Frequency;

#[derive(Debug, Clone)]
pub struct EmberTheme {
    pub bg: Color,
    pub bg_secondary: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub streak: Color,
    pub streak_dim: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl EmberTheme {
    pub fn ember() -> Self {
        Self {
            bg: Color::Rgb(18, 18, 18),
            bg_secondary: Color::Rgb(30, 30, 30),
            bg_highlight: Color::Rgb(48, 42, 56),
            primary: Color::Rgb(124, 77, 255),
            primary_dim: Color::Rgb(74, 46, 153),
            streak: Color::Rgb(255, 152, 0),
            streak_dim: Color::Rgb(153, 91, 0),
            success: Color::Rgb(76, 175, 80),
            warning: Color::Rgb(255, 193, 7),
            error: Color::Rgb(229, 57, 53),
            info: Color::Rgb(3, 169, 244),
            text: Color::Rgb(235, 235, 235),
            text_dim: Color::Rgb(140, 140, 140),
            text_muted: Color::Rgb(80, 80, 80),
            border: Color::Rgb(70, 70, 70),
            border_focus: Color::Rgb(124, 77, 255),
        }
    }
}

pub fn frequency_color(frequency: Frequency, theme: &EmberTheme) -> Color {
    match frequency {
        Frequency::Daily => theme.primary,
        Frequency::Weekly => theme.info,
        Frequency::Monthly => theme.streak,
    }
}

pub fn notification_color(level: NotificationLevel, theme: &EmberTheme) -> Color {
    match level {
        NotificationLevel::Info => theme.info,
        NotificationLevel::Success => theme.success,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
    }
}

/// A streak reads hot once it has survived a week.
pub fn streak_color(streak_count: u32, theme: &EmberTheme) -> Color {
    if streak_count >= 7 {
        theme.streak
    } else if streak_count > 0 {
        theme.streak_dim
    } else {
        theme.text_dim
    }
}
