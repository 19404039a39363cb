use log::debug;
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// Where a command's JSON document came from, for error messages.
enum Source {
    File(PathBuf),
    Stdin,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "'{}'", path.display()),
            Source::Stdin => f.write_str("stdin"),
        }
    }
}

/// Load a typed input for `command` from `--input <file.json>`, falling back
/// to a JSON document piped on stdin.
pub fn load<T: DeserializeOwned>(
    path: Option<&str>,
    command: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    let (source, raw) = match path {
        Some(path) => {
            let path = PathBuf::from(path);
            let raw = fs::read_to_string(&path).map_err(|e| {
                format!("{command}: cannot read input '{}': {e}", path.display())
            })?;
            (Source::File(path), raw)
        }
        None => match read_piped_stdin()? {
            Some(raw) => (Source::Stdin, raw),
            None => {
                return Err(format!("--input <file.json> or stdin required for {command}").into())
            }
        },
    };
    debug!("{command}: reading input from {source}");
    parse(&raw, command, &source)
}

fn parse<T: DeserializeOwned>(
    raw: &str,
    command: &str,
    source: &Source,
) -> Result<T, Box<dyn std::error::Error>> {
    serde_json::from_str(raw)
        .map_err(|e| format!("{command}: invalid JSON input from {source}: {e}").into())
}

/// Piped stdin contents, or None for a terminal or an empty pipe.
fn read_piped_stdin() -> io::Result<Option<String>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    if buffer.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(buffer))
    }
}
