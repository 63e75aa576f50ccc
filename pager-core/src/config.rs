use std::{env, time::Duration};

use anyhow::Context as _;

/// Default inactivity timeout for reaction paginators.
pub const DEFAULT_PAGER_TIMEOUT_SECS: u64 = 120;

/// Runtime configuration read from the process environment (and `.env`).
#[derive(Clone, Debug)]
pub struct BotConfig {
    /// Discord bot token.
    pub token: String,
    /// Inactivity timeout applied to every paginator; `None` keeps sessions open.
    pub pager_timeout: Option<Duration>,
}

impl BotConfig {
    /// Load configuration from `DISCORD_TOKEN` and the optional `PAGER_TIMEOUT`.
    pub fn from_env() -> anyhow::Result<Self> {
        let token = env::var("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")?;
        let raw_timeout = env::var("PAGER_TIMEOUT").ok();
        let pager_timeout = parse_pager_timeout(raw_timeout.as_deref())?;

        Ok(Self {
            token,
            pager_timeout,
        })
    }
}

/// Resolve the `PAGER_TIMEOUT` value.
///
/// Missing means the default, `0`/`off` disables the timeout, anything else
/// must be a compact duration token.
pub fn parse_pager_timeout(raw: Option<&str>) -> anyhow::Result<Option<Duration>> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(Some(Duration::from_secs(DEFAULT_PAGER_TIMEOUT_SECS)));
    };

    if value == "0" || value.eq_ignore_ascii_case("off") {
        return Ok(None);
    }

    let secs = parse_duration_seconds(value)
        .with_context(|| format!("invalid PAGER_TIMEOUT value `{value}`"))?;

    Ok(Some(Duration::from_secs(secs)))
}

/// Parse a compact duration token like `30s`, `10m`, `2h`, `1d`, or plain seconds.
pub fn parse_duration_seconds(raw: &str) -> Option<u64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let mut chars = value.chars();
    let unit = chars.next_back();

    let (number_raw, multiplier) = match unit {
        Some('s') | Some('S') => (chars.as_str(), 1_u64),
        Some('m') | Some('M') => (chars.as_str(), 60_u64),
        Some('h') | Some('H') => (chars.as_str(), 60_u64 * 60),
        Some('d') | Some('D') => (chars.as_str(), 60_u64 * 60 * 24),
        Some(last) if last.is_ascii_digit() => (value, 1_u64),
        _ => return None,
    };

    let number = number_raw.parse::<u64>().ok()?;
    if number == 0 {
        return None;
    }

    number.checked_mul(multiplier)
}
