//! Imports a solution snapshot produced by problem submission.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use mindai_core::identity::IdentityProvider;
use mindai_core::notification::{NotificationSink, Severity};
use mindai_core::solution::{SnapshotStore, SolutionSnapshot, SolutionState, project};

use crate::console::render;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext, file: &Path) -> Result<ExitCode> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let snapshot: SolutionSnapshot = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a solution snapshot", file.display()))?;

    let state = match SolutionState::from_snapshot(snapshot) {
        Ok(state) => state,
        Err(err) => {
            ctx.notifier.notify(&err.to_string(), Severity::Error);
            return Ok(ExitCode::FAILURE);
        }
    };

    let identity = ctx.identity.get_or_create_identity().await?;
    let session_id = &state.snapshot().session_id;
    if *session_id != identity {
        tracing::warn!(%session_id, %identity, "Snapshot was created by another session");
        ctx.notifier.notify(
            "This solution was created in a different session.",
            Severity::Warning,
        );
    }

    ctx.snapshot_store.store(state.snapshot()).await?;
    tracing::info!(solution_id = %state.snapshot().solution_id, "Snapshot imported");

    render(&project(&state, false));
    Ok(ExitCode::SUCCESS)
}
