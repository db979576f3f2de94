// defs.rs
// Shared constants for the bingo watcher

use std::time::Duration;

/// Cell value marking a blank, unplayable slot on a card.
pub const BLANK_NUMBER: &str = "0";

/// Exact length of a player identifier.
pub const PLAYER_ID_LEN: usize = 6;

/// Period between two drawn-balls refreshes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(20);

/// HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_CARDS_PATH: &str = "/api/bingo-cards/";
pub const DEFAULT_BALLS_PATH: &str = "/api/bingo-balls/";

/// Width of one rendered cell, borders excluded.
pub const CELL_WIDTH: usize = 6;

// ANSI escape sequences used by the terminal front-end
pub struct Colors;

impl Colors {
    pub fn green() -> &'static str {
        "\x1b[1;32m"
    }

    pub fn yellow() -> &'static str {
        "\x1b[1;33m"
    }

    pub fn red() -> &'static str {
        "\x1b[1;31m"
    }

    pub fn reversed() -> &'static str {
        "\x1b[7m"
    }

    pub fn dim() -> &'static str {
        "\x1b[2m"
    }

    pub fn reset() -> &'static str {
        "\x1b[0m"
    }
}
