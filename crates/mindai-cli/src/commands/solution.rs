//! One-shot actions on the stored solution.
//!
//! Each invocation starts from the durable snapshot, so the vote and saved
//! flags start cleared every time, as after a page reload.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use mindai_application::VoteOutcome;
use mindai_core::notification::{NotificationSink, Severity};
use mindai_core::solution::{RefinementKind, SnapshotStore, VoteDirection};

use crate::console::{print_restart_hint, render};
use crate::context::AppContext;

fn exit_code(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

pub async fn show(ctx: &AppContext) -> Result<ExitCode> {
    let Ok((_, view)) = ctx.orchestrator().await else {
        return Ok(ExitCode::FAILURE);
    };
    render(&view);
    Ok(ExitCode::SUCCESS)
}

pub async fn refine(ctx: &AppContext, kind: RefinementKind) -> Result<ExitCode> {
    let Ok((orchestrator, _)) = ctx.orchestrator().await else {
        return Ok(ExitCode::FAILURE);
    };
    match orchestrator.refine(kind).await {
        Ok(view) => {
            render(&view);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            print_restart_hint(&err);
            Ok(ExitCode::FAILURE)
        }
    }
}

pub async fn vote(ctx: &AppContext, direction: VoteDirection) -> Result<ExitCode> {
    let Ok((orchestrator, _)) = ctx.orchestrator().await else {
        return Ok(ExitCode::FAILURE);
    };
    let result = orchestrator.vote(direction).await;
    if let Ok(VoteOutcome::Cleared) = result {
        println!("{}", "Vote cleared.".bright_black());
    }
    Ok(exit_code(result.is_ok()))
}

pub async fn save(ctx: &AppContext) -> Result<ExitCode> {
    let Ok((orchestrator, _)) = ctx.orchestrator().await else {
        return Ok(ExitCode::FAILURE);
    };
    Ok(exit_code(orchestrator.save().await.is_ok()))
}

pub async fn end(ctx: &AppContext) -> Result<ExitCode> {
    match ctx.snapshot_store.load().await {
        Ok(None) => {
            ctx.notifier.notify("No active session.", Severity::Info);
            return Ok(ExitCode::SUCCESS);
        }
        Ok(Some(snapshot)) if snapshot.has_identity() => {
            let Ok((orchestrator, _)) = ctx.orchestrator().await else {
                return Ok(ExitCode::FAILURE);
            };
            orchestrator.end_session().await?;
        }
        // Nothing usable to start from; drop whatever is stored.
        _ => ctx.snapshot_store.clear().await?,
    }
    ctx.notifier.notify("Session ended.", Severity::Success);
    Ok(ExitCode::SUCCESS)
}
