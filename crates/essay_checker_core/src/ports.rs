//! crates/essay_checker_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{AnalysisOutcome, EssayDraft, EssayRecord, User, UserCredentials};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait EssayAnalysisService: Send + Sync {
    /// Produces improvement suggestions and discussion questions for an essay,
    /// judged against the prompt it answers and the guidelines it is graded by.
    ///
    /// Transport failures (network, timeout, malformed response envelope) are
    /// not distinguished from one another; they all surface as a `PortError`.
    /// Model output that is not valid JSON is not an error: it yields
    /// `AnalysisOutcome::Degraded` carrying the empty result.
    async fn analyze_essay(
        &self,
        essay: &str,
        prompt: &str,
        guidelines: &str,
    ) -> PortResult<AnalysisOutcome>;
}

#[async_trait]
pub trait EssayStoreService: Send + Sync {
    /// Creates a new record, stamping the server-assigned id and creation time.
    /// Fails with `PortError::Unavailable` when the store is unreachable.
    async fn append_essay(&self, draft: EssayDraft) -> PortResult<EssayRecord>;

    /// Returns every record belonging to `owner_id`, and nothing else.
    /// Order is unspecified by the contract; callers must not rely on one.
    async fn list_essays_by_owner(&self, owner_id: Uuid) -> PortResult<Vec<EssayRecord>>;
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn create_user_with_email(
        &self,
        email: &str,
        hashed_password: &str,
    ) -> PortResult<User>;

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials>;

    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()>;

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid>;

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()>;
}
