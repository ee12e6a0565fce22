//! Interactive session over the current solution.
//!
//! Actions run as background tasks so the prompt stays responsive while a
//! refinement is in flight; their results and notifications are printed as
//! they arrive.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use mindai_application::{SolutionOrchestrator, VoteOutcome};
use mindai_core::solution::{RefinementKind, VoteDirection};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use strum::IntoEnumIterator;
use tokio::task::JoinHandle;

use crate::console::{print_restart_hint, render};
use crate::context::AppContext;

const COMMANDS: [&str; 7] = ["/show", "/refine", "/vote", "/save", "/end", "/help", "/quit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplCommand {
    Show,
    Refine(RefinementKind),
    Vote(VoteDirection),
    Save,
    End,
    Help,
    Quit,
}

impl FromStr for ReplCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let argument = words.next();

        match command {
            "/show" => Ok(ReplCommand::Show),
            "/refine" => argument
                .and_then(|kind| kind.parse().ok())
                .map(ReplCommand::Refine)
                .ok_or_else(refine_usage),
            "/vote" => argument
                .and_then(|direction| direction.parse().ok())
                .map(ReplCommand::Vote)
                .ok_or_else(|| "Usage: /vote <up|down>".to_string()),
            "/save" => Ok(ReplCommand::Save),
            "/end" => Ok(ReplCommand::End),
            "/help" => Ok(ReplCommand::Help),
            "/quit" | "quit" | "exit" => Ok(ReplCommand::Quit),
            other => Err(format!("Unknown command: {}. Type /help.", other)),
        }
    }
}

fn refine_usage() -> String {
    let kinds: Vec<String> = RefinementKind::iter().map(|k| k.to_string()).collect();
    format!("Usage: /refine <{}>", kinds.join("|"))
}

fn print_help() {
    println!("{}", "/show                  display the current solution".bright_black());
    println!("{}", format!("{:<22} request a refinement", "/refine <kind>").bright_black());
    println!("{}", "/vote <up|down>        vote on the current solution".bright_black());
    println!("{}", "/save                  save the solution and plan".bright_black());
    println!("{}", "/end                   end the session".bright_black());
    println!("{}", "/quit                  leave".bright_black());
}

/// Completion, highlighting and hints for slash commands.
#[derive(Clone)]
struct CliHelper {
    candidates: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        let mut candidates: Vec<String> = COMMANDS.iter().map(|c| c.to_string()).collect();
        candidates.extend(RefinementKind::iter().map(|k| format!("/refine {}", k)));
        candidates.extend(["/vote up".to_string(), "/vote down".to_string()]);
        Self { candidates }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .candidates
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') {
            self.candidates
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

pub async fn run(ctx: &AppContext) -> Result<ExitCode> {
    let Ok((orchestrator, view)) = ctx.orchestrator().await else {
        return Ok(ExitCode::FAILURE);
    };
    let orchestrator = Arc::new(orchestrator);

    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== MindAI ===".bright_magenta().bold());
    println!("{}", "Type /help for commands, or 'quit' to exit.".bright_black());
    println!();
    render(&view);

    let mut in_flight: Vec<JoinHandle<()>> = Vec::new();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match trimmed.parse::<ReplCommand>() {
                    Ok(ReplCommand::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Ok(ReplCommand::Help) => print_help(),
                    Ok(ReplCommand::Show) => render(&orchestrator.view().await),
                    Ok(command) => {
                        in_flight.retain(|handle| !handle.is_finished());
                        in_flight.push(tokio::spawn(dispatch(orchestrator.clone(), command)));
                    }
                    Err(usage) => println!("{}", usage.yellow()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    // Let in-flight actions finish so their results are not lost.
    for handle in in_flight {
        let _ = handle.await;
    }

    Ok(ExitCode::SUCCESS)
}

/// Runs one action. Failures were already reported by the orchestrator.
async fn dispatch(orchestrator: Arc<SolutionOrchestrator>, command: ReplCommand) {
    match command {
        ReplCommand::Refine(kind) => {
            match orchestrator.refine(kind).await {
                Ok(view) => render(&view),
                Err(err) => print_restart_hint(&err),
            }
        }
        ReplCommand::Vote(direction) => {
            if let Ok(VoteOutcome::Cleared) = orchestrator.vote(direction).await {
                println!("{}", "Vote cleared.".bright_black());
            }
        }
        ReplCommand::Save => {
            let _ = orchestrator.save().await;
        }
        ReplCommand::End => match orchestrator.end_session().await {
            Ok(()) => println!(
                "{}",
                "Session ended. Submit a new problem to continue.".bright_green()
            ),
            Err(err) => eprintln!("{}", format!("Failed to end session: {}", err).red()),
        },
        ReplCommand::Show | ReplCommand::Help | ReplCommand::Quit => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("/show".parse::<ReplCommand>(), Ok(ReplCommand::Show));
        assert_eq!(
            "/refine deeper".parse::<ReplCommand>(),
            Ok(ReplCommand::Refine(RefinementKind::Deeper))
        );
        assert_eq!(
            "  /vote   down ".parse::<ReplCommand>(),
            Ok(ReplCommand::Vote(VoteDirection::Down))
        );
        assert_eq!("exit".parse::<ReplCommand>(), Ok(ReplCommand::Quit));
    }

    #[test]
    fn test_parse_rejects_bad_arguments() {
        let err = "/refine sideways".parse::<ReplCommand>().unwrap_err();
        assert_eq!(
            err,
            "Usage: /refine <refine|alternative|simpler|practical|deeper>"
        );
        assert!("/vote".parse::<ReplCommand>().is_err());
        assert!("hello".parse::<ReplCommand>().unwrap_err().starts_with("Unknown command"));
    }

    #[test]
    fn test_helper_hints_refinement_kinds() {
        let helper = CliHelper::new();
        assert!(helper.candidates.contains(&"/refine practical".to_string()));
        assert!(helper.candidates.contains(&"/vote up".to_string()));
    }
}
