//! Line command parsing.
//!
//! # Responsibility
//! - Turn one input line into a [`Command`].
//!
//! # Invariants
//! - Blank lines and `#` comments parse to `None`, never to an error.
//! - Parsing never touches the board.

use projboard_core::ItemStatus;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const HELP_TEXT: &str = "\
commands:
  title <text>                         set the form title
  description <text>                   set the form description
  people <number>                      set the form headcount
  submit                               submit the form
  add <title> | <description> | <n>    fill the form and submit
  drag <id-prefix> <active|finished>   drag a row onto a list
  drop-raw <active|finished> <text>    drop an arbitrary text payload
  show                                 redraw both lists
  export                               print all items as JSON
  help                                 show this text
  quit                                 leave";

/// One board instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetTitle(String),
    SetDescription(String),
    SetPeople(String),
    Submit,
    Add {
        title: String,
        description: String,
        people: String,
    },
    Drag {
        id_prefix: String,
        target: ItemStatus,
    },
    DropRaw {
        target: ItemStatus,
        payload: String,
    },
    Show,
    Export,
    Help,
    Quit,
}

/// Malformed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    MissingArgument {
        command: &'static str,
        usage: &'static str,
    },
    InvalidStatus(String),
    UnknownItem(String),
    AmbiguousItem(String),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(value) => write!(f, "unknown command `{value}`; try `help`"),
            Self::MissingArgument { command, usage } => {
                write!(f, "`{command}` is missing arguments; usage: {usage}")
            }
            Self::InvalidStatus(message) => f.write_str(message),
            Self::UnknownItem(prefix) => write!(f, "no item id starts with `{prefix}`"),
            Self::AmbiguousItem(prefix) => {
                write!(f, "more than one item id starts with `{prefix}`")
            }
        }
    }
}

impl Error for CommandError {}

/// Parses one input line.
///
/// Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let command = match keyword.to_ascii_lowercase().as_str() {
        "title" => Command::SetTitle(rest.to_string()),
        "description" => Command::SetDescription(rest.to_string()),
        "people" => Command::SetPeople(rest.to_string()),
        "submit" => Command::Submit,
        "add" => parse_add(rest)?,
        "drag" => {
            let (id_prefix, target) = split_pair(rest).ok_or(CommandError::MissingArgument {
                command: "drag",
                usage: "drag <id-prefix> <active|finished>",
            })?;
            Command::Drag {
                id_prefix: id_prefix.to_string(),
                target: parse_status(target)?,
            }
        }
        "drop-raw" => {
            let (target, payload) = split_pair(rest).ok_or(CommandError::MissingArgument {
                command: "drop-raw",
                usage: "drop-raw <active|finished> <text>",
            })?;
            Command::DropRaw {
                target: parse_status(target)?,
                payload: payload.to_string(),
            }
        }
        "show" | "list" => Command::Show,
        "export" => Command::Export,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_add(rest: &str) -> Result<Command, CommandError> {
    let parts = rest.split('|').map(str::trim).collect::<Vec<_>>();
    match parts.as_slice() {
        [title, description, people] => Ok(Command::Add {
            title: title.to_string(),
            description: description.to_string(),
            people: people.to_string(),
        }),
        _ => Err(CommandError::MissingArgument {
            command: "add",
            usage: "add <title> | <description> | <people>",
        }),
    }
}

fn split_pair(rest: &str) -> Option<(&str, &str)> {
    let (first, second) = rest.split_once(char::is_whitespace)?;
    let second = second.trim();
    if first.is_empty() || second.is_empty() {
        return None;
    }
    Some((first, second))
}

fn parse_status(value: &str) -> Result<ItemStatus, CommandError> {
    value.parse::<ItemStatus>().map_err(CommandError::InvalidStatus)
}
