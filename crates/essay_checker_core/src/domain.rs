//! crates/essay_checker_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or web framework.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The structured feedback produced by the language model for one essay.
///
/// Both fields are always present: a missing key in the model's JSON output
/// deserializes to an empty list, so a consumer never has to handle an
/// absent field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub questions: Vec<String>,
}

/// The result of one analysis call, distinguishing a real model answer from
/// the empty fallback used when the model's output could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// The model's output parsed as JSON.
    Parsed(AnalysisResult),
    /// The model's output was not valid JSON; carries the empty result.
    Degraded(AnalysisResult),
}

impl AnalysisOutcome {
    /// Unwraps the analysis, however it was obtained.
    pub fn into_result(self) -> AnalysisResult {
        match self {
            Self::Parsed(result) | Self::Degraded(result) => result,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

/// An analyzed essay as stored for its owner.
///
/// Records are append-only: none of these fields change after creation, and
/// no update or delete operation exists anywhere in the system.
#[derive(Debug, Clone)]
pub struct EssayRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub prompt: String,
    pub guidelines: String,
    pub content: String,
    pub analysis: AnalysisResult,
    pub created_at: DateTime<Utc>,
}

/// The input to an append: an [`EssayRecord`] before the store has stamped
/// its id and creation time.
#[derive(Debug, Clone)]
pub struct EssayDraft {
    pub owner_id: Uuid,
    pub prompt: String,
    pub guidelines: String,
    pub content: String,
    pub analysis: AnalysisResult,
}

// Represents a user - used throughout the app
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: Uuid,
    pub email: String,
}

// Only used internally for login/signup - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user_id: Uuid,
    pub email: String,
    pub hashed_password: String,
}

// Represents a browser login session (auth cookie)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub id: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_result_defaults_missing_keys_to_empty() {
        let result: AnalysisResult = serde_json::from_str("{}").unwrap();
        assert!(result.suggestions.is_empty());
        assert!(result.questions.is_empty());

        let result: AnalysisResult =
            serde_json::from_str(r#"{"suggestions":["Add examples"]}"#).unwrap();
        assert_eq!(result.suggestions, vec!["Add examples".to_string()]);
        assert!(result.questions.is_empty());
    }

    #[test]
    fn analysis_outcome_unwraps_either_variant() {
        let parsed = AnalysisOutcome::Parsed(AnalysisResult {
            suggestions: vec!["Tighten the intro".to_string()],
            questions: vec![],
        });
        assert!(!parsed.is_degraded());
        assert_eq!(
            parsed.into_result().suggestions,
            vec!["Tighten the intro".to_string()]
        );

        let degraded = AnalysisOutcome::Degraded(AnalysisResult::default());
        assert!(degraded.is_degraded());
        assert_eq!(degraded.into_result(), AnalysisResult::default());
    }
}
