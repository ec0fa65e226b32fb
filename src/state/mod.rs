//! Corner state machine
//!
//! Two states driven solely by pointer movement:
//! - Cold: pointer outside the hot region, nothing running
//! - Hot: pointer inside the hot region, a dwell worker is running

mod machine;
mod region;

pub use machine::{CornerMonitor, CornerState, PointerEvent, PointerKind};
pub use region::{CornerGeometry, HotRegion, Point, Rect};
