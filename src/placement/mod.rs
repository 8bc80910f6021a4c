//! Popover placement
//!
//! The calculator maps a trigger snapshot, the panel's measured
//! [`Dimensions`] and a [`Reduction`] of the usable viewport to the top-left
//! [`AnchorPosition`] of the floating panel. It prefers placing the panel
//! below the trigger, falls back to above it, and otherwise accepts overflow
//! below. Horizontally the panel is centered on the pointer and clamped into
//! the viewport and the optional container.
//!
//! Measurement lives in [`probe`] and the show/hide bookkeeping in
//! [`controller`]; this module is pure.

pub mod controller;
pub mod probe;

pub use controller::PlacementController;
pub use probe::{PanelNode, ViewportProvider, probe};

use crate::constants::{MIN_EDGE_GAP, MOBILE_EDGE_GAP, MOBILE_MAX_WIDTH, TRIGGER_GAP, UNBOUNDED};

/// Snapshot of the trigger element and the container it lives in, taken when
/// the trigger fires.
///
/// `mouse_x` is the horizontal pointer coordinate. `el_top`/`el_bottom` are
/// the trigger's vertical extent in the document. The remaining fields
/// describe the bounding container and default to an unbounded one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerPosition {
    pub mouse_x: f64,
    pub el_top: f64,
    pub el_bottom: f64,
    pub offset_top: f64,
    pub client_height: f64,
    pub offset_left: f64,
    pub client_width: f64,
}

impl TriggerPosition {
    /// Trigger inside an unbounded container.
    pub const fn new(mouse_x: f64, el_top: f64, el_bottom: f64) -> Self {
        Self {
            mouse_x,
            el_top,
            el_bottom,
            offset_top: 0.0,
            client_height: UNBOUNDED,
            offset_left: 0.0,
            client_width: UNBOUNDED,
        }
    }

    /// Return a copy constrained to the container at the given offsets.
    pub const fn with_container(
        mut self,
        offset_top: f64,
        client_height: f64,
        offset_left: f64,
        client_width: f64,
    ) -> Self {
        self.offset_top = offset_top;
        self.client_height = client_height;
        self.offset_left = offset_left;
        self.client_width = client_width;
        self
    }

    /// Whether `other` points at the same trigger location.
    ///
    /// Only the pointer and the trigger's vertical extent count; a container
    /// change alone does not move the panel.
    pub fn same_trigger(&self, other: &Self) -> bool {
        self.mouse_x == other.mouse_x
            && self.el_top == other.el_top
            && self.el_bottom == other.el_bottom
    }
}

impl Default for TriggerPosition {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// Rendered panel size plus the scroll offset and viewport size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub window_scroll: f64,
    pub window_width: f64,
    pub window_height: f64,
}

impl Dimensions {
    /// Whether the panel has been laid out with a non-zero size.
    pub fn has_panel_size(&self) -> bool {
        self.width != 0.0 && self.height != 0.0
    }
}

/// Vertical space reserved at the top and bottom of the viewport, e.g. for a
/// sticky header or footer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Reduction {
    pub top: f64,
    pub bottom: f64,
}

impl Reduction {
    pub const fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }
}

/// Top-left corner of the panel in document coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnchorPosition {
    pub x: f64,
    pub y: f64,
}

impl AnchorPosition {
    /// Snap both coordinates to whole pixels.
    pub fn rounded(self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
        }
    }
}

/// Which vertical candidate the calculator settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Below the trigger, fully inside the usable band.
    Below,
    /// Above the trigger, because there was no room below.
    Above,
    /// Below the trigger although it overflows the usable band.
    OverflowBelow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub anchor: AnchorPosition,
    pub side: Side,
}

/// Edge gap for a viewport of the given width.
pub fn edge_gap(window_width: f64) -> f64 {
    if window_width > MOBILE_MAX_WIDTH {
        MIN_EDGE_GAP
    } else {
        MOBILE_EDGE_GAP
    }
}

/// Compute where the panel goes.
pub fn calculate_position(
    trigger: &TriggerPosition,
    dims: &Dimensions,
    reduce: &Reduction,
) -> AnchorPosition {
    calculate_placement(trigger, dims, reduce).anchor
}

/// Like [`calculate_position`], also reporting the side that was chosen.
pub fn calculate_placement(
    trigger: &TriggerPosition,
    dims: &Dimensions,
    reduce: &Reduction,
) -> Placement {
    let gap = edge_gap(dims.window_width);

    let viewport_top = dims.window_scroll + reduce.top;
    let viewport_bottom = dims.window_scroll + dims.window_height - reduce.bottom;

    let below = trigger.el_bottom + TRIGGER_GAP;
    let above = trigger.el_top - TRIGGER_GAP - dims.height;

    let container_top = trigger.offset_top + gap;
    let container_bottom = trigger.offset_top + trigger.client_height - gap;
    let container_left = trigger.offset_left + gap;
    let container_right = trigger.offset_left + trigger.client_width - gap - dims.width;

    let (y, side) = if below + dims.height + gap <= viewport_bottom.min(container_bottom) {
        (below, Side::Below)
    } else if above - gap >= viewport_top.max(container_top) {
        (above, Side::Above)
    } else {
        (below, Side::OverflowBelow)
    };

    let x = gap
        .max(trigger.mouse_x - dims.width / 2.0)
        .max(container_left)
        .min(dims.window_width - gap - dims.width)
        .min(container_right);

    Placement {
        anchor: AnchorPosition { x, y },
        side,
    }
}
