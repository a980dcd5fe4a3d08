//! CLI command implementations.

pub(crate) mod convert;
pub(crate) mod stats;

use std::io::{self, Read, Write};
use std::path::Path;

pub(crate) use convert::ConvertArgs;
pub(crate) use stats::StatsArgs;

use crate::error::CliError;

/// Human-readable name of an input source.
fn input_label(path: Option<&Path>) -> String {
    match path {
        Some(path) if path != Path::new("-") => path.display().to_string(),
        _ => "<stdin>".to_owned(),
    }
}

/// Read markdown from a file, or from stdin when `path` is absent or `-`.
fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Write text to a file, or to stdout when `path` is absent.
fn write_output(path: Option<&Path>, text: &str) -> Result<(), CliError> {
    if let Some(path) = path {
        std::fs::write(path, text)?;
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()?;
    }
    Ok(())
}
