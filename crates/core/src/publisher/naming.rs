use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Longest set name the platform accepts.
pub const MAX_SET_NAME_LEN: usize = 64;

static SET_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap());

/// Generates `t<unix-nanos>_by_<bot>` set names.
///
/// The numeric part is strictly increasing for the lifetime of the generator,
/// even when the clock does not advance between calls.
#[derive(Debug, Default)]
pub struct SetNameGenerator {
    last: AtomicI64,
}

impl SetNameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, bot_username: &str) -> String {
        let now = Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_else(|| Utc::now().timestamp_micros().saturating_mul(1000));

        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
                Some(now.max(prev + 1))
            })
            .unwrap_or(now);

        format!("t{}_by_{}", now.max(previous + 1), bot_username)
    }
}

/// Whether `name` is an acceptable set name for a set created by `bot_username`.
pub fn is_valid_set_name(name: &str, bot_username: &str) -> bool {
    if name.len() > MAX_SET_NAME_LEN || !SET_NAME_RE.is_match(name) || name.contains("__") {
        return false;
    }

    let suffix = format!("_by_{}", bot_username).to_ascii_lowercase();
    name.to_ascii_lowercase().ends_with(&suffix)
}
