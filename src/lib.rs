//! Placement engine for popovers and tooltips.
//!
//! [`placement::calculate_position`] is the pure core: it maps a trigger
//! snapshot, the panel's measured size and the viewport state to the panel's
//! top-left corner. [`placement::PlacementController`] decides when to
//! re-measure and re-place, and [`transition::Transition`] tracks the
//! enter/exit animation independently of placement.

pub mod cli;
pub mod constants;
pub mod placement;
pub mod tracing_sub;
pub mod transition;
pub mod trigger;

pub use placement::{
    AnchorPosition, Dimensions, PanelNode, Placement, PlacementController, Reduction, Side,
    TriggerPosition, ViewportProvider, calculate_placement, calculate_position, edge_gap,
};
pub use trigger::{Container, TriggerEvent, dimensions_from_event};
