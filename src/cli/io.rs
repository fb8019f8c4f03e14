//! JSON output for CLI commands
//!
//! Commands answer on stdout with a single JSON object, UTF-8 only.

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
