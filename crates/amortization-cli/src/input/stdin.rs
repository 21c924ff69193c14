use serde_json::Value;
use std::io::{self, Read};

/// True when stdin is piped rather than an interactive terminal.
pub fn is_piped() -> bool {
    !atty::is(atty::Stream::Stdin)
}

/// Read a JSON document from stdin if data is being piped.
/// Returns None for a TTY or an empty pipe.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if !is_piped() {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse JSON from stdin: {}", e))?;
    Ok(Some(value))
}
