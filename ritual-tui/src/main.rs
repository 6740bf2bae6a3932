//! ritual TUI entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use ritual_client::{classify, BackendClient, ClientError, RealtimeMessage, Refresh};
use ritual_core::{validate_credentials, validate_new_habit, CompletionOutcome, UserId};
use ritual_tui::config::RitualConfig;
use ritual_tui::error::TuiError;
use ritual_tui::events::TuiEvent;
use ritual_tui::keys::{map_form_key, map_list_key, Action};
use ritual_tui::nav::Screen;
use ritual_tui::notifications::NotificationLevel;
use ritual_tui::state::{AddHabitField, App, AuthMode, RealtimeSubscriptions};
use ritual_tui::views::render_view;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = RitualConfig::load()?;
    ritual_tui::logging::init(&config)?;

    let client = BackendClient::new(&config.backend)?;
    let mut app = App::new(config, client);
    app.session.resolve().await;

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    if app.session.is_signed_in() {
        app.screen = Screen::Habits;
        enter_habits_screen(&mut app, &event_tx).await;
    }

    let tick_rate = Duration::from_millis(app.config.refresh_interval_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {
                run_guard(&mut app, &event_tx).await;
            }
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, event, &event_tx).await? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                match evt {
                    CrosstermEvent::Key(key) => {
                        let _ = sender.blocking_send(TuiEvent::Input(key));
                    }
                    CrosstermEvent::Resize(width, height) => {
                        let _ = sender.blocking_send(TuiEvent::Resize { width, height });
                    }
                    _ => {}
                }
            }
        }
    });
}

/// Forwards one subscription's messages into the main event channel. Ends
/// when either side closes.
fn spawn_realtime_forwarder(
    mut receiver: mpsc::Receiver<RealtimeMessage>,
    sender: mpsc::Sender<TuiEvent>,
) {
    tokio::spawn(async move {
        while let Some(message) = receiver.recv().await {
            if sender.send(TuiEvent::Realtime(message)).await.is_err() {
                break;
            }
        }
    });
}

/// Runs the navigation guard. Immediate redirects come from `apply`; the
/// delayed auth redirect fires from `poll` once its grace period passes.
async fn run_guard(app: &mut App, event_tx: &mpsc::Sender<TuiEvent>) {
    let now = Instant::now();
    let signed_in = app.session.is_signed_in();
    let loading = app.session.is_loading();
    if let Some(screen) = app.guard.apply(signed_in, loading, app.screen, now) {
        switch_screen(app, screen, event_tx).await;
    }
    if let Some(screen) = app.guard.poll(now) {
        switch_screen(app, screen, event_tx).await;
    }
}

async fn switch_screen(app: &mut App, screen: Screen, event_tx: &mpsc::Sender<TuiEvent>) {
    if app.screen == screen {
        return;
    }
    app.screen = screen;
    if screen == Screen::Habits && app.session.is_signed_in() {
        enter_habits_screen(app, event_tx).await;
    }
}

/// Landing on the habit list: load both lists, and open the realtime
/// subscriptions if this session does not have them yet.
async fn enter_habits_screen(app: &mut App, event_tx: &mpsc::Sender<TuiEvent>) {
    refresh_lists(app).await;
    if app.subscriptions.is_none() {
        match open_subscriptions(app, event_tx).await {
            Ok(subscriptions) => app.subscriptions = Some(subscriptions),
            Err(err) => {
                warn!(error = %err, "realtime subscribe failed");
                app.notify(NotificationLevel::Warning, "Live updates unavailable");
            }
        }
    }
}

async fn open_subscriptions(
    app: &App,
    event_tx: &mpsc::Sender<TuiEvent>,
) -> Result<RealtimeSubscriptions, ClientError> {
    let (habits, habits_rx) = app
        .realtime
        .subscribe(std::slice::from_ref(&app.habits_channel))
        .await?;
    let (completions, completions_rx) = app
        .realtime
        .subscribe(std::slice::from_ref(&app.completions_channel))
        .await?;
    spawn_realtime_forwarder(habits_rx, event_tx.clone());
    spawn_realtime_forwarder(completions_rx, event_tx.clone());
    Ok(RealtimeSubscriptions {
        habits,
        completions,
    })
}

async fn handle_event(
    app: &mut App,
    event: TuiEvent,
    event_tx: &mpsc::Sender<TuiEvent>,
) -> Result<bool, TuiError> {
    match event {
        TuiEvent::Input(key) => {
            if handle_key(app, key).await? {
                return Ok(true);
            }
        }
        TuiEvent::Realtime(message) => handle_realtime(app, message).await,
        TuiEvent::Resize { .. } => {}
    }
    run_guard(app, event_tx).await;
    Ok(false)
}

async fn handle_key(app: &mut App, key: KeyEvent) -> Result<bool, TuiError> {
    match app.screen {
        Screen::Auth => handle_auth_key(app, key).await,
        Screen::Habits => handle_habits_key(app, key).await,
        Screen::AddHabit => handle_add_habit_key(app, key).await,
    }
}

async fn handle_auth_key(app: &mut App, key: KeyEvent) -> Result<bool, TuiError> {
    if let Some(action) = map_form_key(key) {
        match action {
            Action::Quit => return Ok(true),
            Action::Submit => submit_credentials(app).await,
            Action::NextField | Action::PrevField => {
                app.auth_view.focus = app.auth_view.focus.next();
            }
            Action::SwitchAuthMode => app.auth_view.switch_mode(),
            _ => {}
        }
        return Ok(false);
    }
    app.auth_view.focused_field().handle_key(key);
    Ok(false)
}

async fn handle_habits_key(app: &mut App, key: KeyEvent) -> Result<bool, TuiError> {
    if let Some(action) = map_list_key(key) {
        match action {
            Action::Quit => return Ok(true),
            Action::MoveDown => app.habits_view.select_next(),
            Action::MoveUp => app.habits_view.select_previous(),
            Action::Complete => complete_selected(app).await,
            Action::Delete => delete_selected(app).await,
            Action::NewHabit => app.screen = Screen::AddHabit,
            Action::SignOut => sign_out(app).await,
            Action::Refresh => refresh_lists(app).await,
            _ => {}
        }
    }
    Ok(false)
}

async fn handle_add_habit_key(app: &mut App, key: KeyEvent) -> Result<bool, TuiError> {
    if let Some(action) = map_form_key(key) {
        match action {
            Action::Quit => return Ok(true),
            Action::Submit => submit_new_habit(app).await,
            Action::NextField => {
                app.add_habit_view.focus = app.add_habit_view.focus.next();
            }
            Action::PrevField => {
                app.add_habit_view.focus = app.add_habit_view.focus.previous();
            }
            Action::Back => app.screen = Screen::Habits,
            _ => {}
        }
        return Ok(false);
    }

    match app.add_habit_view.focus {
        AddHabitField::Frequency => match key.code {
            KeyCode::Left | KeyCode::Char('h') => app.add_habit_view.previous_frequency(),
            KeyCode::Right | KeyCode::Char('l') => app.add_habit_view.next_frequency(),
            _ => {}
        },
        AddHabitField::Title => {
            app.add_habit_view.title.handle_key(key);
        }
        AddHabitField::Description => {
            app.add_habit_view.description.handle_key(key);
        }
    }
    Ok(false)
}

/// Validates and submits the auth form. Failures land on the form's error
/// line with the backend's message verbatim.
async fn submit_credentials(app: &mut App) {
    let email = app.auth_view.email.value().trim().to_string();
    let password = app.auth_view.password.value().to_string();
    if let Err(err) = validate_credentials(&email, &password) {
        app.auth_view.error = Some(err.to_string());
        return;
    }

    let result = match app.auth_view.mode {
        AuthMode::SignIn => app.session.sign_in(&email, &password).await,
        AuthMode::SignUp => app.session.sign_up(&email, &password).await,
    };
    match result {
        Ok(()) => {
            app.auth_view.error = None;
            app.auth_view.password.clear();
        }
        Err(err) => app.auth_view.error = Some(err.to_string()),
    }
}

async fn submit_new_habit(app: &mut App) {
    let user_id = match current_user_id(app) {
        Some(id) => id,
        None => return,
    };
    let title = app.add_habit_view.title.value().trim().to_string();
    let description = app.add_habit_view.description.value().trim().to_string();
    if let Err(err) = validate_new_habit(&title, &description) {
        app.add_habit_view.error = Some(err.to_string());
        return;
    }

    match app
        .repo
        .create_habit(&user_id, &title, &description, app.add_habit_view.frequency)
        .await
    {
        Ok(_) => {
            app.add_habit_view.reset();
            app.screen = Screen::Habits;
            refresh_lists(app).await;
            app.notify(NotificationLevel::Success, "Habit added");
        }
        Err(err) => app.add_habit_view.error = Some(err.to_string()),
    }
}

async fn complete_selected(app: &mut App) {
    let user_id = match current_user_id(app) {
        Some(id) => id,
        None => return,
    };
    let habit_id = match app.habits_view.selected.clone() {
        Some(id) => id,
        None => return,
    };

    let outcome = app
        .repo
        .complete_habit(
            &user_id,
            &habit_id,
            &app.habits_view.habits,
            &app.habits_view.completed_today,
        )
        .await;
    match outcome {
        Ok(CompletionOutcome::AlreadyCompletedToday) => {
            app.notify(NotificationLevel::Info, "Already completed today");
        }
        Ok(CompletionOutcome::Completed) => {
            app.notify(NotificationLevel::Success, "Habit completed");
            refresh_lists(app).await;
        }
        Ok(CompletionOutcome::RecordedWithoutStreak) => {
            app.notify(NotificationLevel::Warning, "Recorded, streak unchanged");
            refresh_lists(app).await;
        }
        Err(err) => {
            warn!(error = %err, habit_id = %habit_id, "completing habit failed");
        }
    }
}

async fn delete_selected(app: &mut App) {
    let habit_id = match app.habits_view.selected.clone() {
        Some(id) => id,
        None => return,
    };
    match app.repo.delete_habit(&habit_id).await {
        Ok(()) => {
            app.notify(NotificationLevel::Info, "Habit deleted");
            refresh_lists(app).await;
        }
        Err(err) => {
            warn!(error = %err, habit_id = %habit_id, "deleting habit failed");
        }
    }
}

async fn sign_out(app: &mut App) {
    app.clear_session_state();
    app.session.sign_out().await;
    app.notify(NotificationLevel::Info, "Signed out");
}

async fn handle_realtime(app: &mut App, message: RealtimeMessage) {
    match message {
        RealtimeMessage::Connected => {
            app.realtime_connected = true;
        }
        RealtimeMessage::Event(event) => {
            match classify(&event, &app.habits_channel, &app.completions_channel) {
                Refresh::HabitsAndCompletions => refresh_lists(app).await,
                Refresh::Completions => refresh_completions(app).await,
                Refresh::Nothing => {}
            }
        }
        RealtimeMessage::Error { message } => {
            warn!(%message, "realtime error");
        }
        RealtimeMessage::Disconnected { reason } => {
            warn!(%reason, "realtime stream closed");
            app.realtime_connected = false;
        }
    }
}

async fn refresh_lists(app: &mut App) {
    let user_id = match current_user_id(app) {
        Some(id) => id,
        None => return,
    };
    let habits = app.repo.list_habits(&user_id).await;
    app.habits_view.set_habits(habits);
    refresh_completions(app).await;
}

async fn refresh_completions(app: &mut App) {
    let user_id = match current_user_id(app) {
        Some(id) => id,
        None => return,
    };
    let completions = app.repo.list_todays_completions(&user_id).await;
    app.habits_view
        .set_completed_today(ritual_core::CompletionSet::from_completions(&completions));
}

fn current_user_id(app: &App) -> Option<UserId> {
    app.session.user().map(|user| user.id.clone())
}
