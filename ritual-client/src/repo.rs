//! Habit and completion documents, with the client-side failure policies.

use crate::backend::{BackendClient, ClientError};
use crate::config::BackendConfig;
use crate::query::Query;
use chrono::Utc;
use ritual_core::{
    start_of_today, Completion, CompletionOutcome, CompletionSet, Frequency, Habit, HabitId,
    Timestamp, UserId,
};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
struct NewHabit<'a> {
    user_id: &'a str,
    title: &'a str,
    description: &'a str,
    frequency: Frequency,
    streak_count: u32,
    last_completed: Timestamp,
    created_at: Timestamp,
}

#[derive(Debug, Serialize)]
struct NewCompletion<'a> {
    habit_id: &'a str,
    user_id: &'a str,
    completed_at: Timestamp,
}

#[derive(Debug, Serialize)]
struct StreakUpdate {
    streak_count: u32,
    last_completed: Timestamp,
}

/// User-scoped access to the habit and completion collections.
///
/// Reads never propagate failures: the views treat "backend unreachable"
/// and "nothing there" identically, so a failed read logs a warning and
/// reports empty. Writes return errors and leave surfacing to the caller.
#[derive(Clone)]
pub struct HabitRepository {
    client: BackendClient,
    database_id: String,
    habits_collection_id: String,
    completions_collection_id: String,
}

impl HabitRepository {
    pub fn new(client: BackendClient, config: &BackendConfig) -> Self {
        Self {
            client,
            database_id: config.database_id.clone(),
            habits_collection_id: config.habits_collection_id.clone(),
            completions_collection_id: config.completions_collection_id.clone(),
        }
    }

    pub async fn list_habits(&self, user_id: &UserId) -> Vec<Habit> {
        let queries = [Query::equal("user_id", user_id.as_str())];
        match self
            .client
            .list_documents::<Habit>(&self.database_id, &self.habits_collection_id, &queries)
            .await
        {
            Ok(list) => list.documents,
            Err(err) => {
                warn!(error = %err, "failed to list habits");
                Vec::new()
            }
        }
    }

    /// Completions of this user stamped at or after local midnight.
    pub async fn list_todays_completions(&self, user_id: &UserId) -> Vec<Completion> {
        let since = start_of_today();
        let queries = [
            Query::equal("user_id", user_id.as_str()),
            Query::greater_than_equal("completed_at", since.to_rfc3339()),
        ];
        match self
            .client
            .list_documents::<Completion>(
                &self.database_id,
                &self.completions_collection_id,
                &queries,
            )
            .await
        {
            Ok(list) => list.documents,
            Err(err) => {
                warn!(error = %err, "failed to list today's completions");
                Vec::new()
            }
        }
    }

    /// Inserts a habit with a fresh streak. Blank titles or descriptions
    /// are a caller bug; the form refuses to submit them.
    pub async fn create_habit(
        &self,
        user_id: &UserId,
        title: &str,
        description: &str,
        frequency: Frequency,
    ) -> Result<Habit, ClientError> {
        let now = Utc::now();
        let data = NewHabit {
            user_id: user_id.as_str(),
            title,
            description,
            frequency,
            streak_count: 0,
            last_completed: now,
            created_at: now,
        };
        self.client
            .create_document(&self.database_id, &self.habits_collection_id, &data)
            .await
    }

    /// Deletes a habit document. An id the backend no longer knows counts
    /// as success; the document is gone either way.
    pub async fn delete_habit(&self, habit_id: &HabitId) -> Result<(), ClientError> {
        match self
            .client
            .delete_document(
                &self.database_id,
                &self.habits_collection_id,
                habit_id.as_str(),
            )
            .await
        {
            Ok(()) => Ok(()),
            Err(err) if err.is_not_found() => {
                warn!(habit_id = %habit_id, "deleted a habit the backend no longer had");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Records a completion and bumps the habit's streak.
    ///
    /// The guard against double completion is `completed`, derived from the
    /// caller's last fetch. The insert and the streak patch are two
    /// separate writes; if the habit is absent from `habits` the insert
    /// stands and the streak is left alone.
    pub async fn complete_habit(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        habits: &[Habit],
        completed: &CompletionSet,
    ) -> Result<CompletionOutcome, ClientError> {
        if completed.contains(habit_id) {
            return Ok(CompletionOutcome::AlreadyCompletedToday);
        }

        let now = Utc::now();
        let completion = NewCompletion {
            habit_id: habit_id.as_str(),
            user_id: user_id.as_str(),
            completed_at: now,
        };
        let _: Completion = self
            .client
            .create_document(
                &self.database_id,
                &self.completions_collection_id,
                &completion,
            )
            .await?;

        let habit = match habits.iter().find(|h| &h.id == habit_id) {
            Some(habit) => habit,
            None => {
                warn!(habit_id = %habit_id, "completed a habit missing from the loaded list");
                return Ok(CompletionOutcome::RecordedWithoutStreak);
            }
        };

        let update = StreakUpdate {
            streak_count: habit.streak_count.saturating_add(1),
            last_completed: now,
        };
        let _: Habit = self
            .client
            .update_document(
                &self.database_id,
                &self.habits_collection_id,
                habit_id.as_str(),
                &update,
            )
            .await?;
        Ok(CompletionOutcome::Completed)
    }
}
