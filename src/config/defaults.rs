//! Fixed game rules. These are deliberately not exposed as settings.

use std::ops::RangeInclusive;
use std::time::Duration;

pub const TOTAL_ROUNDS: u32 = 10;

/// Delay between pressing start and the first round's wait.
pub const START_DELAY: Duration = Duration::from_secs(1);

/// Random wait before a round opens, in whole seconds.
pub const WAIT_SECS: RangeInclusive<u64> = 1..=5;

/// How long input is counted once a round opens.
pub const ACTIVE_WINDOW: Duration = Duration::from_secs(3);

/// Pause between the end of one round and the next round's wait.
pub const ROUND_PAUSE: Duration = Duration::from_secs(1);

// Presentation defaults
pub const DEFAULT_CHART_WIDTH: usize = 40;
pub const MIN_CHART_WIDTH: usize = 10;
pub const MAX_CHART_WIDTH: usize = 200;
pub const DEFAULT_BAR_GLYPH: &str = "#";
pub const DEFAULT_KEY_LABEL: &str = "ENTER";
