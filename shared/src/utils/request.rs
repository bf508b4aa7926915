use std::borrow::Cow;
use std::sync::atomic::Ordering;
use crate::utils::CONSTANTS;

pub fn set_sanitize_sensitive_info(value: bool) {
    CONSTANTS.sanitize.store(value, Ordering::Relaxed);
}

/// Masks token query values so they never end up in a log line.
pub fn sanitize_sensitive_info(query: &str) -> Cow<'_, str> {
    if !CONSTANTS.sanitize.load(Ordering::Relaxed) {
        return Cow::Borrowed(query);
    }
    CONSTANTS.re_credentials.replace_all(query, "$1***")
}
