//! Screens and the session-based navigation guard.

use std::time::{Duration, Instant};

/// Grace period before an unauthenticated user is bounced to the auth
/// screen. Long enough for a just-issued session to land.
pub const AUTH_REDIRECT_DELAY: Duration = Duration::from_secs(1);

/// The three screens of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth,
    Habits,
    AddHabit,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Auth => "Sign In",
            Screen::Habits => "Today's Habits",
            Screen::AddHabit => "Add Habit",
        }
    }
}

/// What the guard concludes from the current session and screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Nothing to do.
    Stay,
    /// No session on a protected screen. Redirect after the grace period
    /// unless a session shows up first.
    ScheduleAuthRedirect,
    /// Signed in while on the auth screen. Move along immediately.
    RedirectToHabits,
}

/// Pure guard rule. While the stored session is still being resolved the
/// guard stays quiet so a restored session does not flash the auth screen.
pub fn evaluate(signed_in: bool, loading: bool, screen: Screen) -> GuardDecision {
    if loading {
        return GuardDecision::Stay;
    }
    if !signed_in && screen != Screen::Auth {
        return GuardDecision::ScheduleAuthRedirect;
    }
    if signed_in && screen == Screen::Auth {
        return GuardDecision::RedirectToHabits;
    }
    GuardDecision::Stay
}

/// Applies [`evaluate`] over time. `apply` runs after every state change
/// and arms or disarms the delayed redirect; `poll` runs on ticks and
/// fires it once the deadline passes.
#[derive(Debug, Default)]
pub struct RouteGuard {
    deadline: Option<Instant>,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-evaluates the rule. Returns a screen to switch to right now, or
    /// arms the delayed redirect. Signing in before the deadline disarms
    /// it.
    pub fn apply(
        &mut self,
        signed_in: bool,
        loading: bool,
        screen: Screen,
        now: Instant,
    ) -> Option<Screen> {
        match evaluate(signed_in, loading, screen) {
            GuardDecision::Stay => {
                self.deadline = None;
                None
            }
            GuardDecision::RedirectToHabits => {
                self.deadline = None;
                Some(Screen::Habits)
            }
            GuardDecision::ScheduleAuthRedirect => {
                if self.deadline.is_none() {
                    self.deadline = Some(now + AUTH_REDIRECT_DELAY);
                }
                None
            }
        }
    }

    /// Fires the armed redirect once it is due.
    pub fn poll(&mut self, now: Instant) -> Option<Screen> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(Screen::Auth)
            }
            _ => None,
        }
    }

    pub fn redirect_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn later(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    #[test]
    fn test_screen_titles_label_the_three_screens() {
        assert_eq!(Screen::Auth.title(), "Sign In");
        assert_eq!(Screen::Habits.title(), "Today's Habits");
        assert_eq!(Screen::AddHabit.title(), "Add Habit");
    }

    #[test]
    fn test_guard_stays_quiet_while_loading() {
        assert_eq!(evaluate(false, true, Screen::Habits), GuardDecision::Stay);
        assert_eq!(evaluate(false, true, Screen::Auth), GuardDecision::Stay);
    }

    #[test]
    fn test_signed_out_on_protected_screen_schedules_redirect() {
        assert_eq!(
            evaluate(false, false, Screen::Habits),
            GuardDecision::ScheduleAuthRedirect
        );
        assert_eq!(
            evaluate(false, false, Screen::AddHabit),
            GuardDecision::ScheduleAuthRedirect
        );
    }

    #[test]
    fn test_signed_in_on_auth_screen_redirects_immediately() {
        assert_eq!(
            evaluate(true, false, Screen::Auth),
            GuardDecision::RedirectToHabits
        );
    }

    #[test]
    fn test_settled_states_stay_put() {
        assert_eq!(evaluate(true, false, Screen::Habits), GuardDecision::Stay);
        assert_eq!(evaluate(false, false, Screen::Auth), GuardDecision::Stay);
    }

    #[test]
    fn test_delayed_redirect_fires_after_the_grace_period() {
        let start = Instant::now();
        let mut guard = RouteGuard::new();

        assert_eq!(guard.apply(false, false, Screen::Habits, start), None);
        assert!(guard.redirect_pending());

        assert_eq!(guard.poll(later(start, 500)), None);
        assert_eq!(guard.poll(later(start, 1000)), Some(Screen::Auth));
        assert!(!guard.redirect_pending());

        // Fires once.
        assert_eq!(guard.poll(later(start, 2000)), None);
    }

    #[test]
    fn test_signing_in_cancels_the_pending_redirect() {
        let start = Instant::now();
        let mut guard = RouteGuard::new();

        guard.apply(false, false, Screen::Habits, start);
        assert!(guard.redirect_pending());

        // Session arrives before the deadline.
        assert_eq!(guard.apply(true, false, Screen::Habits, later(start, 300)), None);
        assert!(!guard.redirect_pending());
        assert_eq!(guard.poll(later(start, 5000)), None);
    }

    #[test]
    fn test_rearming_does_not_extend_the_deadline() {
        let start = Instant::now();
        let mut guard = RouteGuard::new();

        guard.apply(false, false, Screen::Habits, start);
        // Subsequent evaluations while still signed out keep the original
        // deadline.
        guard.apply(false, false, Screen::Habits, later(start, 900));
        assert_eq!(guard.poll(later(start, 1000)), Some(Screen::Auth));
    }

    #[test]
    fn test_immediate_redirect_from_auth_when_signed_in() {
        let start = Instant::now();
        let mut guard = RouteGuard::new();

        assert_eq!(
            guard.apply(true, false, Screen::Auth, start),
            Some(Screen::Habits)
        );
        assert!(!guard.redirect_pending());
    }
}
