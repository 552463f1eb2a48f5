// SPDX-License-Identifier: MIT

//! Streak goal tracking.
//!
//! The goal lives on the user profile document (`users/{id}.streak_goal`)
//! and defaults to seven days when unset.

use serde_json::Value;

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
pub use crate::models::user::DEFAULT_STREAK_GOAL;

/// Fraction of the goal reached, clamped to `[0, 1]`.
pub fn progress_ratio(streak: u32, goal: u32) -> f64 {
    if goal == 0 {
        return 1.0;
    }
    (f64::from(streak) / f64::from(goal)).clamp(0.0, 1.0)
}

/// Validate a submitted goal.
///
/// Accepts a positive integer, either as a JSON number or a numeric string
/// (goal edits come from a text field). Anything else is `InvalidGoal`.
pub fn parse_goal(value: &Value) -> Result<u32> {
    let invalid = || {
        AppError::InvalidGoal(format!(
            "streak goal must be a whole number >= 1, got {value}"
        ))
    };

    let number = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(invalid)?;

    if number < 1 {
        return Err(invalid());
    }
    u32::try_from(number).map_err(|_| invalid())
}

/// Read the user's goal, falling back to the default when unset.
pub async fn get_goal(db: &FirestoreDb, user_id: &str) -> Result<u32> {
    let goal = db
        .get_user_profile(user_id)
        .await?
        .map(|profile| profile.effective_streak_goal())
        .unwrap_or(DEFAULT_STREAK_GOAL);
    Ok(goal)
}

/// Validate and persist a new goal. Nothing is written if validation fails.
pub async fn set_goal(db: &FirestoreDb, user_id: &str, value: &Value) -> Result<u32> {
    let goal = parse_goal(value)?;
    db.set_streak_goal(user_id, goal).await?;
    tracing::info!(user_id, goal, "Streak goal updated");
    Ok(goal)
}

/// Goal editing states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalEditState {
    Idle,
    /// Editing with the current text of the input field.
    Editing { draft: String },
}

/// Outcome of leaving the editing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalEditOutcome {
    /// A valid value was submitted and should be persisted.
    Saved(u32),
    /// Editing was abandoned; the previous goal stands.
    Cancelled,
}

/// Goal edit flow: `Idle -> Editing -> Idle`, via a valid submit or a cancel.
///
/// Nothing is persisted while editing. A rejected submit keeps the editor in
/// `Editing` with the committed goal unchanged.
#[derive(Debug, Clone)]
pub struct GoalEditor {
    goal: u32,
    state: GoalEditState,
}

impl GoalEditor {
    pub fn new(goal: u32) -> Self {
        Self {
            goal,
            state: GoalEditState::Idle,
        }
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn state(&self) -> &GoalEditState {
        &self.state
    }

    /// Enter editing, seeded with the current goal.
    pub fn begin(&mut self) {
        if self.state == GoalEditState::Idle {
            self.state = GoalEditState::Editing {
                draft: self.goal.to_string(),
            };
        }
    }

    /// Replace the draft text. Ignored unless editing.
    pub fn input(&mut self, text: &str) {
        if let GoalEditState::Editing { draft } = &mut self.state {
            *draft = text.to_string();
        }
    }

    /// Submit the draft. Returns `None` when not editing.
    pub fn submit(&mut self) -> Option<Result<GoalEditOutcome>> {
        let GoalEditState::Editing { draft } = &self.state else {
            return None;
        };
        match parse_goal(&Value::String(draft.clone())) {
            Ok(goal) => {
                self.goal = goal;
                self.state = GoalEditState::Idle;
                Some(Ok(GoalEditOutcome::Saved(goal)))
            }
            Err(e) => Some(Err(e)),
        }
    }

    /// Discard the draft and keep the previous goal.
    pub fn cancel(&mut self) -> Option<GoalEditOutcome> {
        match self.state {
            GoalEditState::Editing { .. } => {
                self.state = GoalEditState::Idle;
                Some(GoalEditOutcome::Cancelled)
            }
            GoalEditState::Idle => None,
        }
    }
}
