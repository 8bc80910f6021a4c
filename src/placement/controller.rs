//! Placement controller
//!
//! Decides when the panel needs to be re-measured and re-placed. The caller
//! feeds it the current visibility flag and trigger snapshot on every render
//! pass; it answers with the anchor to apply, or `None` when nothing moved.
//! Applying the anchor (and hiding the panel) stays with the rendering layer.

use super::{
    AnchorPosition, Dimensions, PanelNode, Placement, Reduction, TriggerPosition,
    ViewportProvider, calculate_placement, probe,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Hidden,
    Visible,
}

#[derive(Debug, Clone, Default)]
pub struct PlacementController {
    state: PanelState,
    reduce: Reduction,
    position: TriggerPosition,
    dimensions: Dimensions,
    placement: Option<Placement>,
}

impl PlacementController {
    pub fn new(reduce: Reduction) -> Self {
        Self {
            reduce,
            ..Self::default()
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == PanelState::Visible
    }

    /// Anchor computed by the last recalculation.
    pub fn anchor(&self) -> AnchorPosition {
        self.placement
            .map(|placement| placement.anchor)
            .unwrap_or_default()
    }

    /// Anchor and side from the last recalculation, if there was one.
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Trigger snapshot from the last update.
    pub fn position(&self) -> TriggerPosition {
        self.position
    }

    pub fn reduction(&self) -> Reduction {
        self.reduce
    }

    /// Feed the latest props.
    ///
    /// Showing the panel always re-measures and re-places it. While shown, a
    /// new trigger location (pointer or trigger extent) does the same so one
    /// panel can follow several triggers. Hiding, or an unchanged trigger,
    /// returns `None`.
    pub fn update(
        &mut self,
        is_visible: bool,
        position: TriggerPosition,
        viewport: Option<&dyn ViewportProvider>,
        panel: Option<&dyn PanelNode>,
    ) -> Option<AnchorPosition> {
        let previous = std::mem::replace(&mut self.position, position);
        match (self.state, is_visible) {
            (PanelState::Hidden, true) => {
                self.state = PanelState::Visible;
                Some(self.recalculate(viewport, panel))
            }
            (PanelState::Visible, true) if !previous.same_trigger(&position) => {
                Some(self.recalculate(viewport, panel))
            }
            (PanelState::Visible, false) => {
                self.state = PanelState::Hidden;
                tracing::trace!("popover hidden");
                None
            }
            _ => None,
        }
    }

    /// Re-measure after a scroll or resize while the panel is shown.
    ///
    /// Only recalculates when the probe saw a usable change.
    pub fn refresh(
        &mut self,
        viewport: Option<&dyn ViewportProvider>,
        panel: Option<&dyn PanelNode>,
    ) -> Option<AnchorPosition> {
        if !self.is_visible() {
            return None;
        }
        let (dimensions, changed) = probe(self.dimensions, true, viewport, panel);
        if !changed {
            tracing::trace!("popover dimensions unchanged");
            return None;
        }
        self.dimensions = dimensions;
        Some(self.place())
    }

    fn recalculate(
        &mut self,
        viewport: Option<&dyn ViewportProvider>,
        panel: Option<&dyn PanelNode>,
    ) -> AnchorPosition {
        let (dimensions, _) = probe(self.dimensions, self.is_visible(), viewport, panel);
        self.dimensions = dimensions;
        self.place()
    }

    fn place(&mut self) -> AnchorPosition {
        let placement = calculate_placement(&self.position, &self.dimensions, &self.reduce);
        tracing::debug!(
            side = ?placement.side,
            x = placement.anchor.x,
            y = placement.anchor.y,
            "placed popover"
        );
        self.placement = Some(placement);
        placement.anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Side;

    struct Window {
        scroll: f64,
        width: f64,
        height: f64,
    }

    impl ViewportProvider for Window {
        fn scroll_top(&self) -> f64 {
            self.scroll
        }
        fn client_width(&self) -> f64 {
            self.width
        }
        fn client_height(&self) -> f64 {
            self.height
        }
    }

    struct Panel(f64, f64);

    impl PanelNode for Panel {
        fn client_width(&self) -> f64 {
            self.0
        }
        fn client_height(&self) -> f64 {
            self.1
        }
    }

    fn desktop() -> Window {
        Window {
            scroll: 0.0,
            width: 1024.0,
            height: 768.0,
        }
    }

    #[test]
    fn showing_places_the_panel() {
        let mut ctl = PlacementController::new(Reduction::default());
        let window = desktop();
        let panel = Panel(200.0, 80.0);
        let trigger = TriggerPosition::new(500.0, 100.0, 130.0);

        assert_eq!(ctl.update(false, trigger, Some(&window), Some(&panel)), None);
        let anchor = ctl.update(true, trigger, Some(&window), Some(&panel));
        assert_eq!(anchor, Some(AnchorPosition { x: 400.0, y: 140.0 }));
        assert!(ctl.is_visible());
        assert_eq!(ctl.anchor(), AnchorPosition { x: 400.0, y: 140.0 });
        assert_eq!(ctl.dimensions().window_width, 1024.0);
    }

    #[test]
    fn unchanged_trigger_while_visible_is_a_no_op() {
        let mut ctl = PlacementController::new(Reduction::default());
        let window = desktop();
        let panel = Panel(200.0, 80.0);
        let trigger = TriggerPosition::new(500.0, 100.0, 130.0);
        ctl.update(true, trigger, Some(&window), Some(&panel));

        // a different container on the same trigger does not count
        let same = trigger.with_container(0.0, 500.0, 0.0, 500.0);
        assert_eq!(ctl.update(true, same, Some(&window), Some(&panel)), None);
    }

    #[test]
    fn moving_trigger_while_visible_forces_update() {
        let mut ctl = PlacementController::new(Reduction::default());
        let window = desktop();
        let panel = Panel(200.0, 80.0);
        ctl.update(
            true,
            TriggerPosition::new(500.0, 100.0, 130.0),
            Some(&window),
            Some(&panel),
        );

        let moved = ctl.update(
            true,
            TriggerPosition::new(300.0, 650.0, 680.0),
            Some(&window),
            Some(&panel),
        );
        assert_eq!(moved, Some(AnchorPosition { x: 200.0, y: 560.0 }));
    }

    #[test]
    fn placement_records_the_chosen_side() {
        let mut ctl = PlacementController::new(Reduction::default());
        let window = desktop();
        let panel = Panel(200.0, 200.0);
        assert_eq!(ctl.placement(), None);

        let trigger = TriggerPosition::new(500.0, 600.0, 630.0);
        let anchor = ctl.update(true, trigger, Some(&window), Some(&panel));
        let placement = ctl.placement().unwrap();
        assert_eq!(placement.side, Side::Above);
        assert_eq!(Some(placement.anchor), anchor);
    }

    #[test]
    fn hiding_keeps_the_last_anchor() {
        let mut ctl = PlacementController::new(Reduction::default());
        let window = desktop();
        let panel = Panel(200.0, 80.0);
        let trigger = TriggerPosition::new(500.0, 100.0, 130.0);
        ctl.update(true, trigger, Some(&window), Some(&panel));

        let moved = TriggerPosition::new(10.0, 10.0, 10.0);
        assert_eq!(ctl.update(false, moved, Some(&window), Some(&panel)), None);
        assert_eq!(ctl.state(), PanelState::Hidden);
        assert_eq!(ctl.anchor(), AnchorPosition { x: 400.0, y: 140.0 });
        assert_eq!(ctl.update(false, trigger, Some(&window), Some(&panel)), None);
    }

    #[test]
    fn reshowing_always_recalculates() {
        let mut ctl = PlacementController::new(Reduction::default());
        let window = desktop();
        let panel = Panel(200.0, 80.0);
        let trigger = TriggerPosition::new(500.0, 100.0, 130.0);
        ctl.update(true, trigger, Some(&window), Some(&panel));
        ctl.update(false, trigger, Some(&window), Some(&panel));

        let scrolled = Window {
            scroll: 50.0,
            ..desktop()
        };
        assert!(
            ctl.update(true, trigger, Some(&scrolled), Some(&panel))
                .is_some()
        );
        assert_eq!(ctl.dimensions().window_scroll, 50.0);
    }

    #[test]
    fn headless_host_still_returns_a_coordinate() {
        let mut ctl = PlacementController::new(Reduction::default());
        let trigger = TriggerPosition::new(300.0, 100.0, 130.0);
        let anchor = ctl.update(true, trigger, None, None);
        assert!(anchor.is_some());
        assert_eq!(ctl.dimensions(), Dimensions::default());
    }

    #[test]
    fn refresh_only_recalculates_on_change() {
        let mut ctl = PlacementController::new(Reduction::new(0.0, 0.0));
        let window = desktop();
        let panel = Panel(200.0, 200.0);
        let trigger = TriggerPosition::new(500.0, 600.0, 630.0);

        assert_eq!(ctl.refresh(Some(&window), Some(&panel)), None);
        ctl.update(true, trigger, Some(&window), Some(&panel));
        assert_eq!(ctl.refresh(Some(&window), Some(&panel)), None);

        let scrolled = Window {
            scroll: 500.0,
            ..desktop()
        };
        let anchor = ctl.refresh(Some(&scrolled), Some(&panel));
        assert_eq!(anchor, Some(AnchorPosition { x: 400.0, y: 640.0 }));
        assert_eq!(ctl.placement().map(|p| p.side), Some(Side::Below));
    }

    #[test]
    fn instances_do_not_share_state() {
        let window = desktop();
        let panel = Panel(200.0, 80.0);
        let mut first = PlacementController::new(Reduction::default());
        let second = PlacementController::new(Reduction::default());
        first.update(
            true,
            TriggerPosition::new(500.0, 100.0, 130.0),
            Some(&window),
            Some(&panel),
        );
        assert!(first.is_visible());
        assert!(!second.is_visible());
        assert_eq!(second.dimensions(), Dimensions::default());
    }
}
