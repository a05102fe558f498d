//! Wheel-of-names raffle core: entry parsing, segment layout, spin planning
//! and the sequential multi-winner draw.

pub mod clock;
pub mod colors;
pub mod constants;
pub mod draw;
pub mod entries;
pub mod error;
pub mod host;
pub mod policy;
pub mod spin;
pub mod validation;
pub mod wheel;

pub use clock::{Clock, ManualClock};
pub use colors::{assign_colors, SegmentColor};
pub use draw::{
    CancelToken, DrawController, DrawGuard, DrawLock, DrawPhase, DrawReport, DrawTermination,
    SpinOutcome,
};
pub use entries::{regenerate, Entry, EntryList};
pub use error::WheelError;
pub use host::{DrawHost, SoundCue, WheelSurface, WinnersDisplay};
pub use policy::DrawPolicy;
pub use spin::{plan_spin, Easing, SpinPlan};
pub use wheel::{label_font_size, layout, segment_under_pointer, Segment, WheelGeometry, WheelState};
