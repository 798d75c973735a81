//! `alpha`: rewrite a vague request into a structured prompt from the terminal.

mod loading;
mod render;
mod shell;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use prompt_alpha::adapters::CompletionClient;
use prompt_alpha::config::AlphaConfig;
use prompt_alpha::kernel::{Phase, SessionController};
use prompt_alpha::primitives::FrameworkId;
use prompt_alpha::telemetry::{TelemetryConfig, init_tracing};
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "alpha", version, about = "Structure raw intent with a prompt framework")]
struct Cli {
    /// Config file (defaults to <config dir>/prompt-alpha/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging for the alpha crates.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the available frameworks.
    Frameworks,

    /// Optimize one request and print the Markdown result.
    Optimize {
        /// Framework id or acronym (rtf, tag, bab, care, rise).
        #[arg(short, long)]
        framework: FrameworkId,

        /// Print only the final prompt from the fenced block.
        #[arg(long)]
        prompt_only: bool,

        /// Raw request; read from stdin when omitted.
        text: Option<String>,
    },

    /// Interactive session.
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Frameworks => {
            print!("{}", render::catalog());
            Ok(())
        }
        Command::Optimize {
            framework,
            prompt_only,
            text,
        } => {
            let mut controller = session(cli.config.as_deref(), cli.verbose)?;
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            optimize(&mut controller, framework, &text, prompt_only).await
        }
        Command::Shell => {
            let mut controller = session(cli.config.as_deref(), cli.verbose)?;
            shell::run(&mut controller).await
        }
    }
}

/// Loads configuration, installs tracing and wires the completion client.
fn session(config_path: Option<&Path>, verbose: bool) -> Result<SessionController> {
    let config = AlphaConfig::load(config_path).context("loading configuration")?;
    init_tracing(&TelemetryConfig {
        filter: config.log_filter.clone(),
        verbose,
    })?;
    debug!(?config, "configuration resolved");

    let client = CompletionClient::gemini(config.gemini_config()?)?;
    info!(
        credential = client.has_credential(),
        model = %config.model,
        "completion client ready"
    );
    Ok(SessionController::new(client))
}

async fn optimize(
    controller: &mut SessionController,
    framework: FrameworkId,
    text: &str,
    prompt_only: bool,
) -> Result<()> {
    if text.trim().is_empty() {
        bail!("nothing to optimize: the request text is empty");
    }

    controller.edit_text(text);
    controller.select_framework(framework);

    let indicator = loading::spawn(controller.subscribe());
    let phase = controller.generate().await;
    indicator.finish().await;

    let state = controller.state();
    match phase {
        Phase::Succeeded => {
            print!("{}", render::result(state, prompt_only));
            Ok(())
        }
        _ => bail!(
            "{}",
            state
                .error_message()
                .unwrap_or("An unexpected error occurred.")
        ),
    }
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("reading request from stdin")?;
    Ok(text)
}
