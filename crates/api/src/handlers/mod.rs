//! Request handlers for the service control API.
//!
//! Handlers translate boundary input into core requests, delegate to
//! [`ServiceControl`](svcdeck_core::services::ServiceControl) and map errors
//! via [`AppError`](crate::error::AppError).

pub mod logs;
pub mod services;

/// First value that is present and not blank.
///
/// Request types accept several spellings of the same field as separate
/// members, so a body carrying two of them is not rejected as a duplicate.
pub(crate) fn first_filled<'a>(values: &[Option<&'a str>]) -> Option<&'a str> {
    values
        .iter()
        .flatten()
        .copied()
        .find(|v| !v.trim().is_empty())
}
