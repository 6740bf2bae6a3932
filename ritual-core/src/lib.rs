//! Domain types and pure derivations for the ritual habit tracker.
//!
//! Everything here is plain data plus the two derivations the views and the
//! repository share: membership in "completed today" and the local-day
//! window that defines it. No I/O and no backend awareness; the client
//! crate maps these types onto the wire.

pub mod completion;
pub mod day;
pub mod habit;
pub mod identity;
pub mod ids;
pub mod validate;

pub use completion::{CompletionOutcome, CompletionSet};
pub use day::{start_of_day, start_of_today};
pub use habit::{Completion, Frequency, Habit};
pub use identity::{Identity, Timestamp};
pub use ids::{CompletionId, HabitId, UserId};
pub use validate::{
    validate_credentials, validate_new_habit, ValidationError, MIN_PASSWORD_LEN,
};
