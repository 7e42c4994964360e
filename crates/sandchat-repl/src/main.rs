//! Readline frontend for sandchat.
//!
//! Wires the conversation controller to a rustyline loop: plain text goes
//! to the backend, slash commands drive the confirmation workflow and the
//! dashboard summary, and the terminal view prints the transcript as it
//! evolves.

mod term;

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use sandchat_app::ConversationController;
use sandchat_client::{BackendClient, ClientConfig, SessionIdentity};
use term::{AsciiChartEngine, TermView, print_summary};

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/approve".to_string(),
                "/reject".to_string(),
                "/clear".to_string(),
                "/summary".to_string(),
            ],
        }
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
                .commands
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

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// The main entry point for the sandchat REPL.
///
/// Sets up the HTTP client against the configured backend, restores the
/// persisted session identity, and runs the readline loop. Each round
/// trip is awaited inline; the progress cycler prints its status lines
/// while the request is outstanding.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // ===== Backend wiring =====
    let config = ClientConfig::load()?;
    let session = SessionIdentity::load_or_create()?;
    let backend = Arc::new(BackendClient::new(&config, &session));
    let controller = Arc::new(ConversationController::new(
        backend,
        Arc::new(TermView),
        Arc::new(AsciiChartEngine),
    ));

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== sandchat ===".bright_magenta().bold());
    println!(
        "{}",
        format!("Backend: {}", config.base_url).bright_black()
    );
    println!(
        "{}",
        "Type '/summary' for the dashboard, '/clear' to reset, or 'quit' to exit.".bright_black()
    );
    println!();

    controller.greet().await;

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                let outcome = match trimmed {
                    "/approve" => controller.approve().await,
                    "/reject" => controller.reject().await,
                    "/summary" => match controller.summary().await {
                        Ok(report) => {
                            print_summary(&report);
                            Ok(())
                        }
                        Err(e) => Err(e),
                    },
                    other => controller.submit(other).await,
                };

                if let Err(e) = outcome {
                    eprintln!("{}", format!("Error: {e}").red());
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}
