//! Input validation shared by the dispatcher and the log retriever.
//!
//! Everything here runs before a command is built, so a rejected request
//! never spawns a process.

use crate::error::{CoreError, CoreResult};

/// Longest accepted service name.
pub const MAX_SERVICE_NAME_LEN: usize = 128;

/// Upper bound on a single log tail request.
pub const MAX_LOG_LINES: u32 = 10_000;

/// Default tail length for snapshot (GET) log requests.
pub const DEFAULT_SNAPSHOT_LINES: u32 = 100;

/// Default tail length for array (POST) log requests.
pub const DEFAULT_ARRAY_LINES: u32 = 50;

/// PM2 treats `all` as "every process"; it is not a service identity.
const RESERVED_TARGET: &str = "all";

/// Allowed service name characters: alphanumeric, hyphen, underscore, dot, at.
/// A leading hyphen would be parsed as a supervisor flag.
fn is_safe_service_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_SERVICE_NAME_LEN
        && !name.starts_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'))
}

/// Check a service name and return it trimmed.
///
/// `missing_message` is the error used when the name is absent or blank, so
/// each boundary can keep its own wording.
pub fn require_service_name<'a>(
    name: Option<&'a str>,
    missing_message: &str,
) -> CoreResult<&'a str> {
    let name = name.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(CoreError::Validation(missing_message.to_string()));
    }
    if name.eq_ignore_ascii_case(RESERVED_TARGET) || !is_safe_service_name(name) {
        return Err(CoreError::Validation(format!(
            "Invalid service name '{name}'"
        )));
    }
    Ok(name)
}

/// Resolve an optional tail length against its default and bounds.
pub fn resolve_line_count(requested: Option<u32>, default: u32) -> CoreResult<u32> {
    match requested.unwrap_or(default) {
        0 => Err(CoreError::Validation(
            "lineCount must be greater than 0".to_string(),
        )),
        n if n > MAX_LOG_LINES => Err(CoreError::Validation(format!(
            "lineCount must not exceed {MAX_LOG_LINES}"
        ))),
        n => Ok(n),
    }
}
