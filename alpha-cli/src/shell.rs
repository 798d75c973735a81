//! Line-oriented interactive session.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, anyhow};
use prompt_alpha::kernel::{Phase, SessionController};
use prompt_alpha::primitives::FrameworkId;

use crate::{loading, render};

const HELP: &str = "\
Type your request, then pick a framework and run it.
  :use <id>   select a framework (rtf, tag, bab, care, rise)
  :go         optimize the current request
  :retry      run again after a failure
  :reset      clear the result, keep the request
  :clear      empty the request text
  :list       show the framework catalog
  :show       show the session status
  :quit       leave
Any other line replaces the request text.";

/// A parsed shell line.
#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Use(FrameworkId),
    Go,
    Retry,
    Reset,
    Clear,
    List,
    Show,
    Help,
    Quit,
    Text(String),
}

impl ShellCommand {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Some(Self::Text(line.to_owned())));
        };

        let mut words = rest.split_whitespace();
        let verb = words.next().unwrap_or_default();
        let command = match verb {
            "use" => {
                let id = words
                    .next()
                    .ok_or_else(|| anyhow!(":use needs a framework id"))?;
                Self::Use(id.parse()?)
            }
            "go" => Self::Go,
            "retry" => Self::Retry,
            "reset" => Self::Reset,
            "clear" => Self::Clear,
            "list" => Self::List,
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => return Err(anyhow!("unknown command `:{other}` (try :help)")),
        };
        Ok(Some(command))
    }
}

/// Runs the read-eval loop until `:quit` or end of input.
pub async fn run(controller: &mut SessionController) -> Result<()> {
    println!("{HELP}");
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("alpha> ");
        io::stdout().flush().context("flushing prompt")?;

        line.clear();
        if stdin.lock().read_line(&mut line).context("reading input")? == 0 {
            break;
        }

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };

        if handle(controller, command).await == Flow::Quit {
            break;
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Applies one command to the session.
async fn handle(controller: &mut SessionController, command: ShellCommand) -> Flow {
    match command {
        ShellCommand::Quit => return Flow::Quit,
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::List => print!("{}", render::catalog()),
        ShellCommand::Show => show(controller),
        ShellCommand::Text(text) => {
            controller.edit_text(text);
            println!("request updated");
        }
        ShellCommand::Use(id) => {
            controller.select_framework(id);
            println!("using {}", id.template().name());
        }
        ShellCommand::Reset => {
            controller.reset();
            println!("result cleared");
        }
        ShellCommand::Clear => {
            controller.edit_text(String::new());
            println!("request cleared");
        }
        ShellCommand::Go => {
            let state = controller.state();
            if state.selected().is_none() {
                eprintln!("select a framework first (:use <id>)");
            } else if state.raw_input().trim().is_empty() {
                eprintln!("type a request first");
            } else {
                run_generation(controller, false).await;
            }
        }
        ShellCommand::Retry => {
            if controller.state().phase() == Phase::Failed {
                run_generation(controller, true).await;
            } else {
                eprintln!("nothing to retry");
            }
        }
    }
    Flow::Continue
}

async fn run_generation(controller: &mut SessionController, retry: bool) {
    let indicator = loading::spawn(controller.subscribe());
    let phase = if retry {
        controller.retry().await
    } else {
        controller.generate().await
    };
    indicator.finish().await;

    let state = controller.state();
    match phase {
        Phase::Succeeded => print!("{}", render::result(state, false)),
        Phase::Failed => eprintln!(
            "{} (:retry to try again)",
            state.error_message().unwrap_or_default()
        ),
        Phase::Idle | Phase::Generating => {}
    }
}

fn show(controller: &SessionController) {
    let state = controller.state();
    println!("{}", render::status(state));
    if !state.raw_input().is_empty() {
        println!("request: {}", state.raw_input());
    }
    if let Some(message) = state.error_message() {
        println!("error: {message}");
    }
    if state.result_text().is_some() {
        print!("{}", render::result(state, false));
    }
}
