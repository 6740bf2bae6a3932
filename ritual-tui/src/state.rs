//! Application state.

use crate::config::RitualConfig;
use crate::nav::{RouteGuard, Screen};
use crate::notifications::{Notification, NotificationLevel};
use crate::theme::EmberTheme;
use crate::widgets::InputField;
use ritual_client::{
    collection_channel, BackendClient, HabitRepository, RealtimeClient, SessionStore, Subscription,
};
use ritual_core::{CompletionSet, Frequency, Habit, HabitId};

const MAX_NOTIFICATIONS: usize = 5;

/// Which credential form the auth screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "Welcome Back",
            AuthMode::SignUp => "Create Account",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign In",
            AuthMode::SignUp => "Sign Up",
        }
    }

    /// The hint advertising the other mode.
    pub fn switch_hint(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "Don't have an account? Sign Up",
            AuthMode::SignUp => "Already have an account? Sign In",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
}

impl AuthField {
    pub fn next(self) -> Self {
        match self {
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Email,
        }
    }
}

#[derive(Debug)]
pub struct AuthViewState {
    pub mode: AuthMode,
    pub email: InputField,
    pub password: InputField,
    pub focus: AuthField,
    pub error: Option<String>,
}

impl AuthViewState {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::SignIn,
            email: InputField::new(),
            password: InputField::masked(),
            focus: AuthField::Email,
            error: None,
        }
    }

    pub fn switch_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.error = None;
    }

    pub fn focused_field(&mut self) -> &mut InputField {
        match self.focus {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }
}

impl Default for AuthViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
pub struct HabitsViewState {
    pub habits: Vec<Habit>,
    pub completed_today: CompletionSet,
    pub selected: Option<HabitId>,
}

impl HabitsViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the habit list, keeping the selection when its habit
    /// survived the refresh.
    pub fn set_habits(&mut self, habits: Vec<Habit>) {
        self.habits = habits;
        let still_there = self
            .selected
            .as_ref()
            .map(|id| self.habits.iter().any(|habit| &habit.id == id))
            .unwrap_or(false);
        if !still_there {
            self.selected = self.habits.first().map(|habit| habit.id.clone());
        }
    }

    pub fn set_completed_today(&mut self, completed: CompletionSet) {
        self.completed_today = completed;
    }

    pub fn select_next(&mut self) {
        select_next(&self.habits, &mut self.selected);
    }

    pub fn select_previous(&mut self) {
        select_previous(&self.habits, &mut self.selected);
    }

    pub fn selected_habit(&self) -> Option<&Habit> {
        let id = self.selected.as_ref()?;
        self.habits.iter().find(|habit| &habit.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddHabitField {
    Title,
    Description,
    Frequency,
}

impl AddHabitField {
    pub fn next(self) -> Self {
        match self {
            AddHabitField::Title => AddHabitField::Description,
            AddHabitField::Description => AddHabitField::Frequency,
            AddHabitField::Frequency => AddHabitField::Title,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            AddHabitField::Title => AddHabitField::Frequency,
            AddHabitField::Description => AddHabitField::Title,
            AddHabitField::Frequency => AddHabitField::Description,
        }
    }
}

#[derive(Debug)]
pub struct AddHabitViewState {
    pub title: InputField,
    pub description: InputField,
    pub frequency: Frequency,
    pub focus: AddHabitField,
    pub error: Option<String>,
}

impl AddHabitViewState {
    pub fn new() -> Self {
        Self {
            title: InputField::new(),
            description: InputField::new(),
            frequency: Frequency::Daily,
            focus: AddHabitField::Title,
            error: None,
        }
    }

    /// Back to a blank daily-habit form.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The submit action stays disabled until both fields are filled.
    pub fn can_submit(&self) -> bool {
        !self.title.value().trim().is_empty() && !self.description.value().trim().is_empty()
    }

    pub fn next_frequency(&mut self) {
        self.frequency = cycle_frequency(self.frequency, 1);
    }

    pub fn previous_frequency(&mut self) {
        self.frequency = cycle_frequency(self.frequency, Frequency::ALL.len() - 1);
    }
}

impl Default for AddHabitViewState {
    fn default() -> Self {
        Self::new()
    }
}

fn cycle_frequency(current: Frequency, step: usize) -> Frequency {
    let index = Frequency::ALL
        .iter()
        .position(|f| *f == current)
        .unwrap_or(0);
    Frequency::ALL[(index + step) % Frequency::ALL.len()]
}

/// Live subscriptions for the signed-in session. Dropping this stops both
/// socket readers.
pub struct RealtimeSubscriptions {
    pub habits: Subscription,
    pub completions: Subscription,
}

pub struct App {
    pub config: RitualConfig,
    pub theme: EmberTheme,
    pub session: SessionStore,
    pub repo: HabitRepository,
    pub realtime: RealtimeClient,
    pub screen: Screen,
    pub guard: RouteGuard,
    pub auth_view: AuthViewState,
    pub habits_view: HabitsViewState,
    pub add_habit_view: AddHabitViewState,
    pub notifications: Vec<Notification>,
    pub realtime_connected: bool,
    pub subscriptions: Option<RealtimeSubscriptions>,
    pub habits_channel: String,
    pub completions_channel: String,
}

impl App {
    pub fn new(config: RitualConfig, client: BackendClient) -> Self {
        let repo = HabitRepository::new(client.clone(), &config.backend);
        let realtime = RealtimeClient::new(client.clone());
        let session = SessionStore::new(client);
        let habits_channel = collection_channel(
            &config.backend.database_id,
            &config.backend.habits_collection_id,
        );
        let completions_channel = collection_channel(
            &config.backend.database_id,
            &config.backend.completions_collection_id,
        );

        Self {
            config,
            theme: EmberTheme::ember(),
            session,
            repo,
            realtime,
            screen: Screen::Auth,
            guard: RouteGuard::new(),
            auth_view: AuthViewState::new(),
            habits_view: HabitsViewState::new(),
            add_habit_view: AddHabitViewState::new(),
            notifications: Vec::new(),
            realtime_connected: false,
            subscriptions: None,
            habits_channel,
            completions_channel,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
        if self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    /// Tears down everything owned by the signed-in session.
    pub fn clear_session_state(&mut self) {
        self.subscriptions = None;
        self.realtime_connected = false;
        self.habits_view = HabitsViewState::new();
        self.add_habit_view.reset();
    }
}

fn select_next(habits: &[Habit], selected: &mut Option<HabitId>) {
    if habits.is_empty() {
        *selected = None;
        return;
    }
    let index = selected
        .as_ref()
        .and_then(|id| habits.iter().position(|habit| &habit.id == id));
    let next = match index {
        Some(index) => (index + 1) % habits.len(),
        None => 0,
    };
    *selected = Some(habits[next].id.clone());
}

fn select_previous(habits: &[Habit], selected: &mut Option<HabitId>) {
    if habits.is_empty() {
        *selected = None;
        return;
    }
    let index = selected
        .as_ref()
        .and_then(|id| habits.iter().position(|habit| &habit.id == id))
        .unwrap_or(0);
    let previous = if index == 0 {
        habits.len() - 1
    } else {
        index - 1
    };
    *selected = Some(habits[previous].id.clone());
}

// ============================================================================
// TESTS
// ============================================================================
