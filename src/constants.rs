//! Shared crate-wide constants.

use std::time::Duration;

/// Minimum gap kept between the panel and the viewport or container edge on
/// desktop-sized viewports.
///
/// Units: CSS pixels.
pub const MIN_EDGE_GAP: f64 = 24.0;

/// Edge gap used once the viewport is at or below [`MOBILE_MAX_WIDTH`].
pub const MOBILE_EDGE_GAP: f64 = 16.0;

/// Widest viewport (inclusive) that still counts as mobile.
///
/// Matches the `small` breakpoint, `(max-width: 767px)`.
pub const MOBILE_MAX_WIDTH: f64 = 767.0;

/// Vertical clearance between the trigger element and the panel.
pub const TRIGGER_GAP: f64 = 10.0;

/// Length of the enter/exit transition.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(300);

/// Extent used for container sides the caller did not supply, so an absent
/// container never constrains placement.
pub const UNBOUNDED: f64 = f64::INFINITY;
