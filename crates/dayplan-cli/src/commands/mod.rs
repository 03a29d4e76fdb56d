pub mod drift;
pub mod move_task;
pub mod plan;
pub mod resolve;

use std::io::Read;

use chrono::{DateTime, Utc};

/// Read a JSON document from a file path, or stdin when the path is "-".
pub(crate) fn read_input(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Parse an RFC3339 reference moment, defaulting to the wall clock.
pub(crate) fn parse_now(arg: Option<&str>) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    match arg {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}
