use std::f64::consts::PI;

pub const DEFAULT_ENTRIES: [&str; 3] = [
    "YOUR-WALLET-ADDRESS-1",
    "YOUR-WALLET-ADDRESS-2",
    "YOUR-WALLET-ADDRESS-3",
];

pub const EMPTY_ENTRIES_ERROR: &str = "Please enter at least one wallet address.";
pub const INVALID_WINNER_COUNT_ERROR: &str = "Number of winners must be a positive whole number.";
pub const DRAW_IN_PROGRESS_ERROR: &str = "A draw is already running. Wait for it to finish or stop it first.";

// Canvas geometry, in drawing units
pub const WHEEL_SIZE: f64 = 800.0;
pub const WHEEL_MARGIN: f64 = 10.0;
pub const LABEL_INSET: f64 = 20.0;
pub const LABEL_BASELINE_OFFSET: f64 = 2.5;

// Label font shrinks as entries are added: budget / count, clamped
pub const LABEL_FONT_BUDGET: f64 = 200.0;
pub const MIN_LABEL_FONT_PX: f64 = 10.0;
pub const MAX_LABEL_FONT_PX: f64 = 20.0;

/// Angle of the fixed pointer in canvas coordinates (clockwise from +x), i.e. 12 o'clock.
pub const POINTER_ANGLE: f64 = 1.5 * PI;

pub const FULL_TURN: f64 = 2.0 * PI;
