//! Engine configuration loaded from environment variables.
//!
//! Every setting has a default so an editor session can start with zero
//! configuration.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

pub const DEFAULT_GRID_ROWS: usize = 2;
/// Larger `STOREFRONT_GRID_ROWS` values are clamped to this.
pub const MAX_GRID_ROWS: usize = 25;
pub const DEFAULT_EMPTY_STATE_MESSAGE: &str = "This store has no sections yet.";

/// Which [`RefreshPolicy`](crate::controller::RefreshPolicy) a controller
/// built from this config uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicyKind {
    /// Every change notification replaces the in-memory store.
    #[default]
    LastWriteWins,
    /// Notifications arriving while there are unsaved edits are held back.
    KeepDirty,
}

impl fmt::Display for RefreshPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RefreshPolicyKind::LastWriteWins => "last-write-wins",
            RefreshPolicyKind::KeepDirty => "keep-dirty",
        })
    }
}

impl FromStr for RefreshPolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "last-write-wins" => Ok(RefreshPolicyKind::LastWriteWins),
            "keep-dirty" => Ok(RefreshPolicyKind::KeepDirty),
            other => Err(format!("unknown refresh policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Subscribe to change notifications after the first fetch.
    /// Env: `STOREFRONT_REALTIME` (true/false)
    /// Default: `false`
    pub realtime: bool,

    /// Env: `STOREFRONT_REFRESH_POLICY` (`last-write-wins` / `keep-dirty`)
    /// Default: `last-write-wins`
    pub refresh_policy: RefreshPolicyKind,

    /// Rows of products a grid without an explicit selection shows; the
    /// slice is `columns * grid_rows`.
    /// Env: `STOREFRONT_GRID_ROWS` (1 to `MAX_GRID_ROWS`)
    /// Default: `2`
    pub grid_rows: usize,

    /// Env: `STOREFRONT_EMPTY_MESSAGE`
    /// Default: `"This store has no sections yet."`
    pub empty_state_message: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            realtime: false,
            refresh_policy: RefreshPolicyKind::default(),
            grid_rows: DEFAULT_GRID_ROWS,
            empty_state_message: DEFAULT_EMPTY_STATE_MESSAGE.to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("STOREFRONT_REALTIME") {
            match parse_bool(&val) {
                Some(enabled) => config.realtime = enabled,
                None => warn!(value = %val, "Invalid STOREFRONT_REALTIME, using default"),
            }
        }

        if let Some(val) = lookup("STOREFRONT_REFRESH_POLICY") {
            match val.parse() {
                Ok(policy) => config.refresh_policy = policy,
                Err(e) => warn!(error = %e, "Invalid STOREFRONT_REFRESH_POLICY, using default"),
            }
        }

        if let Some(val) = lookup("STOREFRONT_GRID_ROWS") {
            match val.trim().parse::<usize>() {
                Ok(rows) if rows > MAX_GRID_ROWS => {
                    warn!(
                        value = rows,
                        max = MAX_GRID_ROWS,
                        "STOREFRONT_GRID_ROWS too large, clamping"
                    );
                    config.grid_rows = MAX_GRID_ROWS;
                }
                Ok(rows) if rows > 0 => config.grid_rows = rows,
                _ => warn!(value = %val, "Invalid STOREFRONT_GRID_ROWS, using default"),
            }
        }

        if let Some(message) = lookup("STOREFRONT_EMPTY_MESSAGE") {
            if !message.trim().is_empty() {
                config.empty_state_message = message;
            }
        }

        config
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
