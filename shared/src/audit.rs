//! # Audit Log
//!
//! `AuditLogEntry` rows are append-only records of privileged mutations:
//! admin user/course management, system configuration writes, and
//! enrollment overrides. Both `admin-service` and `enrollment-service`
//! write them, always inside the same transaction as the mutation they
//! describe — an override that fails to commit must not leave an audit
//! trail for an action that never happened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::errors::ApiError;

/// An append-only record of a privileged action.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub actor_principal_id: Uuid,
    pub action: String,
    pub resource: String,
    pub details: String,
}

/// Inserts an audit log row inside `tx`, so the entry commits or rolls back
/// with the mutation it records.
pub async fn record(
    tx: &mut Transaction<'_, Postgres>,
    actor_principal_id: Uuid,
    action: &str,
    resource: &str,
    details: &str,
) -> Result<AuditLogEntry, ApiError> {
    let entry = sqlx::query_as::<_, AuditLogEntry>(
        "INSERT INTO audit_logs (id, timestamp, actor_principal_id, action, resource, details) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id, timestamp, actor_principal_id, action, resource, details",
    )
    .bind(Uuid::new_v4())
    .bind(Utc::now())
    .bind(actor_principal_id)
    .bind(action)
    .bind(resource)
    .bind(details)
    .fetch_one(&mut **tx)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(entry)
}
