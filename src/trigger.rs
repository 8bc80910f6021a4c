//! Trigger snapshots
//!
//! Turns the click or hover that opens a popover into the
//! [`TriggerPosition`] the controller consumes. By default the panel is kept
//! within the viewport; pass a [`Container`] to keep it inside a scrollable
//! parent instead.

use crate::constants::UNBOUNDED;
use crate::placement::TriggerPosition;

/// Layout box of the element that received the event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TargetBox {
    pub offset_top: f64,
    pub client_height: f64,
}

/// The pointer event that opens the popover.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TriggerEvent {
    pub client_x: f64,
    pub target: TargetBox,
}

impl TriggerEvent {
    pub const fn new(client_x: f64, offset_top: f64, client_height: f64) -> Self {
        Self {
            client_x,
            target: TargetBox {
                offset_top,
                client_height,
            },
        }
    }
}

/// Bounding ancestor the panel must stay inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Container {
    pub offset_top: f64,
    pub client_height: f64,
    pub offset_left: f64,
    pub client_width: f64,
}

impl Default for Container {
    fn default() -> Self {
        Self {
            offset_top: 0.0,
            client_height: UNBOUNDED,
            offset_left: 0.0,
            client_width: UNBOUNDED,
        }
    }
}

/// Snapshot the trigger for `event`, bounded by `container` when given.
pub fn dimensions_from_event(event: &TriggerEvent, container: Option<&Container>) -> TriggerPosition {
    let container = container.copied().unwrap_or_default();
    let el_top = event.target.offset_top;
    TriggerPosition::new(event.client_x, el_top, el_top + event.target.client_height).with_container(
        container.offset_top,
        container.client_height,
        container.offset_left,
        container.client_width,
    )
}
