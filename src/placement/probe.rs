//! Dimension probe
//!
//! Reads the viewport and the rendered panel through two small capabilities
//! supplied by the host. A host without a viewport (headless rendering,
//! tests) passes `None` and simply keeps the last known values.

use super::Dimensions;

/// Document scroll offset and viewport size, as exposed by the rendering
/// surface.
pub trait ViewportProvider {
    fn scroll_top(&self) -> f64;
    fn client_width(&self) -> f64;
    fn client_height(&self) -> f64;
}

/// Rendered size of the floating panel after layout.
pub trait PanelNode {
    fn client_width(&self) -> f64;
    fn client_height(&self) -> f64;
}

/// Merge fresh measurements into `current`.
///
/// Viewport fields are refreshed only while the panel is visible. Panel
/// sizes of zero mean the node has not been laid out yet and leave the
/// previous measurement in place. The returned flag is true when both panel
/// sizes are known and at least one field moved.
pub fn probe(
    current: Dimensions,
    is_visible: bool,
    viewport: Option<&dyn ViewportProvider>,
    panel: Option<&dyn PanelNode>,
) -> (Dimensions, bool) {
    let mut next = current;

    if is_visible && let Some(viewport) = viewport {
        next.window_scroll = measured(viewport.scroll_top(), current.window_scroll);
        next.window_width = measured(viewport.client_width(), current.window_width);
        next.window_height = measured(viewport.client_height(), current.window_height);
    }

    if let Some(panel) = panel {
        next.width = laid_out(panel.client_width(), current.width);
        next.height = laid_out(panel.client_height(), current.height);
    }

    let changed = next.has_panel_size() && next != current;
    (next, changed)
}

fn measured(value: f64, previous: f64) -> f64 {
    if value.is_finite() { value } else { previous }
}

fn laid_out(value: f64, previous: f64) -> f64 {
    if value.is_finite() && value != 0.0 {
        value
    } else {
        previous
    }
}
