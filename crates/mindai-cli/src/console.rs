//! Terminal rendering of solutions and notifications.

use colored::{ColoredString, Colorize};
use mindai_core::ActionError;
use mindai_core::notification::{NotificationSink, Severity};
use mindai_core::solution::{SolutionView, Vote};

/// Prints notifications to the terminal; errors go to stderr.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotificationSink;

impl NotificationSink for ConsoleNotificationSink {
    fn notify(&self, message: &str, severity: Severity) {
        let line = format!("{} {}", severity.icon(), message);
        match severity {
            Severity::Success => println!("{}", line.bright_green()),
            Severity::Error => eprintln!("{}", line.red()),
            Severity::Info => println!("{}", line.bright_blue()),
            Severity::Warning => println!("{}", line.yellow()),
        }
    }

    fn set_busy(&self, active: bool, label: Option<&str>) {
        if active {
            println!("{}", format!("⏳ {}", label.unwrap_or("Working...")).bright_black());
        }
    }
}

const RESTART_HINT: &str = "Run `mindai load <file>` with a newly generated solution to continue.";

/// Next step for failures that leave nothing to act on.
pub fn restart_hint(err: &ActionError) -> Option<&'static str> {
    err.requires_restart().then_some(RESTART_HINT)
}

pub fn print_restart_hint(err: &ActionError) {
    if let Some(hint) = restart_hint(err) {
        println!("{}", hint.bright_black());
    }
}

/// Prints the full solution view.
pub fn render(view: &SolutionView) {
    if view.animate {
        println!();
    }
    println!(
        "{}  {}",
        accent(&view.category.tag(), view.category.color).bold(),
        view.session_chip.bright_black()
    );
    println!("{}", view.problem_text.bold());
    if let Some(badge) = &view.refinement_badge {
        println!("{}", badge.bright_magenta());
    }
    println!();

    for section in &view.sections {
        println!("{}", section.title.bright_cyan().bold());
        for line in section.text.lines() {
            println!("  {}", line);
        }
        println!();
    }

    println!(
        "{}",
        format!(
            "Refinements: {} | Category: {} | Last refined: {}",
            view.stats.refinement_count, view.stats.category_label, view.stats.last_refined_label
        )
        .bright_black()
    );

    let vote = match view.vote {
        Vote::Up => "👍 Helpful",
        Vote::Down => "👎 Not helpful",
        Vote::None => "No vote yet",
    };
    let saved = if view.saved { "✔️ Saved" } else { "Not saved" };
    println!("{}", format!("{} | {}", vote, saved).bright_black());
}

fn accent(text: &str, hex: &str) -> ColoredString {
    match hex_rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

/// Parses `#rrggbb`.
fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
