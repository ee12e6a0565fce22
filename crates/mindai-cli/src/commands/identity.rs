use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use mindai_core::identity::IdentityProvider;

use crate::context::AppContext;

pub async fn whoami(ctx: &AppContext) -> Result<ExitCode> {
    let identity = ctx.identity.get_or_create_identity().await?;
    println!("{}", identity.bright_cyan());
    Ok(ExitCode::SUCCESS)
}
