//! Project board CLI.
//!
//! # Responsibility
//! - Wire logging, rules and one board together.
//! - Feed line commands from stdin or a script file into the board.

mod board;
mod commands;
mod config;

use board::{Board, Flow};
use clap::Parser;
use config::{load_rules, Cli, ConfigError};
use log::warn;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), ConfigError> {
    if let Some(log_dir) = cli.log_dir_str()? {
        projboard_core::init_logging(&cli.effective_log_level(), log_dir)
            .map_err(ConfigError::Logging)?;
    }
    let rules = load_rules(cli.rules.as_deref())?;
    let mut board = Board::new(rules);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.script {
        Some(path) => {
            let file = File::open(path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            drive(&mut board, BufReader::new(file), path, &mut out, true)
        }
        None => drive(
            &mut board,
            io::stdin().lock(),
            Path::new("<stdin>"),
            &mut out,
            false,
        ),
    }
}

/// Runs line commands from `input` against `board`, writing replies to `out`.
///
/// Script lines are echoed back when `echo` is set. Output failures end the
/// run; a closed stdout is not silently ignored.
fn drive(
    board: &mut Board,
    input: impl BufRead,
    origin: &Path,
    out: &mut impl Write,
    echo: bool,
) -> Result<(), ConfigError> {
    writeln!(
        out,
        "projboard {} - type `help` for commands",
        projboard_core::core_version()
    )
    .map_err(ConfigError::Write)?;
    for line in board.show() {
        writeln!(out, "{line}").map_err(ConfigError::Write)?;
    }
    out.flush().map_err(ConfigError::Write)?;

    for line in input.lines() {
        let line = line.map_err(|source| ConfigError::Read {
            path: origin.to_path_buf(),
            source,
        })?;
        if echo && !line.trim().is_empty() {
            writeln!(out, "> {}", line.trim()).map_err(ConfigError::Write)?;
        }

        let command = match commands::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{err}").map_err(ConfigError::Write)?;
                continue;
            }
        };

        match board.execute(command) {
            Ok(Flow::Continue(lines)) => {
                for line in lines {
                    writeln!(out, "{line}").map_err(ConfigError::Write)?;
                }
            }
            Ok(Flow::Quit) => break,
            Err(err) => {
                warn!("event=command module=cli status=rejected reason={err}");
                writeln!(out, "{err}").map_err(ConfigError::Write)?;
            }
        }
        out.flush().map_err(ConfigError::Write)?;
    }

    writeln!(out, "{} item(s) on the board", board.store().len()).map_err(ConfigError::Write)?;
    out.flush().map_err(ConfigError::Write)
}
