use chrono::Utc;
use sea_orm::{ActiveValue::Set, EntityTrait};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    db::OrmConn,
    entity::{AuditLogs, audit_logs::ActiveModel},
    error::AppResult,
};

pub async fn log_audit(
    db: &OrmConn,
    user_id: Option<Uuid>,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) -> AppResult<()> {
    let entry = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        action: Set(action.to_string()),
        resource: Set(resource.map(str::to_string)),
        metadata: Set(metadata),
        created_at: Set(Utc::now().into()),
    };
    AuditLogs::insert(entry).exec_without_returning(db).await?;

    Ok(())
}

/// Like [`log_audit`] but a failure only produces a warning.
pub async fn record(
    db: &OrmConn,
    user_id: Option<Uuid>,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) {
    if let Err(err) = log_audit(db, user_id, action, resource, metadata).await {
        tracing::warn!(error = %err, action, "audit log failed");
    }
}
