//! Identity types shared across the workspace.

use crate::ids::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp type using UTC timezone.
///
/// All timestamps cross the wire in UTC; conversion to local time happens
/// only at the day-window boundary in [`crate::day`].
pub type Timestamp = DateTime<Utc>;

/// The signed-in account as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
}
