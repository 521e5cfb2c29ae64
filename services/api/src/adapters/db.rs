//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `EssayStoreService` and `AuthService` ports from the `core` crate. It
//! handles all interactions with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use essay_checker_core::domain::{AnalysisResult, EssayDraft, EssayRecord, User, UserCredentials};
use essay_checker_core::ports::{
    AuthService, EssayStoreService, PortError, PortResult,
};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the persistence and auth ports.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

/// Maps `sqlx` errors to port errors, keeping connectivity failures distinct
/// so callers can tell "storage unreachable" apart from everything else.
fn storage_err(e: sqlx::Error) -> PortError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            PortError::Unavailable(e.to_string())
        }
        other => PortError::Unexpected(other.to_string()),
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct EssayRow {
    id: Uuid,
    owner_id: Uuid,
    prompt: String,
    guidelines: String,
    content: String,
    analysis: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl EssayRow {
    fn into_domain(self) -> EssayRecord {
        EssayRecord {
            id: self.id,
            owner_id: self.owner_id,
            prompt: self.prompt,
            guidelines: self.guidelines,
            content: self.content,
            // Stored analyses always round-trip; a missing key still comes
            // back as an empty list.
            analysis: serde_json::from_value::<AnalysisResult>(self.analysis)
                .unwrap_or_default(),
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
}

impl UserRow {
    fn into_domain(self) -> User {
        User {
            user_id: self.user_id,
            email: self.email,
        }
    }
}

#[derive(FromRow)]
struct CredentialsRow {
    user_id: Uuid,
    email: String,
    hashed_password: String,
}

impl CredentialsRow {
    fn into_domain(self) -> UserCredentials {
        UserCredentials {
            user_id: self.user_id,
            email: self.email,
            hashed_password: self.hashed_password,
        }
    }
}

//=========================================================================================
// `EssayStoreService` Trait Implementation
//=========================================================================================

#[async_trait]
impl EssayStoreService for DbAdapter {
    async fn append_essay(&self, draft: EssayDraft) -> PortResult<EssayRecord> {
        let analysis = serde_json::to_value(&draft.analysis)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let row = sqlx::query_as::<_, EssayRow>(
            "INSERT INTO essays (id, owner_id, prompt, guidelines, content, analysis) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, owner_id, prompt, guidelines, content, analysis, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(draft.owner_id)
        .bind(&draft.prompt)
        .bind(&draft.guidelines)
        .bind(&draft.content)
        .bind(analysis)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.into_domain())
    }

    async fn list_essays_by_owner(&self, owner_id: Uuid) -> PortResult<Vec<EssayRecord>> {
        let rows = sqlx::query_as::<_, EssayRow>(
            "SELECT id, owner_id, prompt, guidelines, content, analysis, created_at \
             FROM essays WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows.into_iter().map(EssayRow::into_domain).collect())
    }
}

//=========================================================================================
// `AuthService` Trait Implementation
//=========================================================================================

#[async_trait]
impl AuthService for DbAdapter {
    async fn create_user_with_email(
        &self,
        email: &str,
        hashed_password: &str,
    ) -> PortResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (user_id, email, hashed_password) \
             VALUES ($1, $2, $3) RETURNING user_id, email",
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.into_domain())
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            "SELECT user_id, email, hashed_password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                PortError::NotFound(format!("No user with email {}", email))
            }
            other => storage_err(other),
        })?;

        Ok(row.into_domain())
    }

    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        sqlx::query("INSERT INTO auth_sessions (id, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(session_id)
            .bind(user_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(())
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid> {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM auth_sessions WHERE id = $1 AND expires_at > now()",
        )
        .bind(session_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::Unauthorized,
            other => storage_err(other),
        })?;

        Ok(user_id)
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(())
    }
}
