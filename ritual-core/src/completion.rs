//! "Completed today" membership derived from completion records.

use crate::habit::Completion;
use crate::ids::HabitId;
use std::collections::HashSet;

/// Habit ids that have at least one completion inside the current day
/// window.
///
/// Built from whatever the repository's today-query returned; the list view
/// uses membership to style rows, and the repository consults it before
/// inserting a second completion for the same habit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet {
    ids: HashSet<HabitId>,
}

impl CompletionSet {
    pub fn from_completions(completions: &[Completion]) -> Self {
        Self {
            ids: completions.iter().map(|c| c.habit_id.clone()).collect(),
        }
    }

    pub fn contains(&self, id: &HabitId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// What a completion attempt actually wrote.
///
/// The insert and the streak bump are two separate document writes with no
/// transaction around them, so a caller can observe the partial outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// A completion for today already existed; nothing was written.
    AlreadyCompletedToday,
    /// Completion inserted and the habit's streak incremented.
    Completed,
    /// Completion inserted, but the habit was absent from the caller's
    /// list, so no streak update was attempted.
    RecordedWithoutStreak,
}
