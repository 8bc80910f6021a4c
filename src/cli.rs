//! Command-line front end.
//!
//! Runs a single placement through the controller the same way a rendering
//! host would: a fixed viewport and panel stand in for the live surface.

use std::fmt;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use indoc::indoc;
use thiserror::Error;
use tracing::Level;

use crate::placement::{
    AnchorPosition, PanelNode, PlacementController, Reduction, Side, TriggerPosition,
    ViewportProvider,
};
use crate::tracing_sub::{self, SubscriberMakeWriter};
use crate::trigger::{Container, TriggerEvent, dimensions_from_event};

const AFTER_HELP: &str = indoc! {"
    Coordinates are CSS pixels in document space. The panel is placed below
    the trigger when it fits, above it otherwise, and overflows below when
    neither side has room.

    Example:
      popover-place --mouse-x 500 --el-top 100 --el-height 30 --width 200 --height 80
"};

#[derive(Parser, Debug)]
#[command(
    name = "popover-place",
    version = env!("CARGO_PKG_VERSION"),
    about = "Compute where a popover panel should be placed next to its trigger",
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Horizontal pointer position when the trigger fired.
    #[arg(long, value_name = "PX", allow_negative_numbers = true)]
    pub mouse_x: f64,

    /// Top of the trigger element in the document.
    #[arg(long, value_name = "PX", allow_negative_numbers = true)]
    pub el_top: f64,

    /// Height of the trigger element.
    #[arg(long, value_name = "PX", default_value_t = 0.0)]
    pub el_height: f64,

    /// Rendered panel width.
    #[arg(long, value_name = "PX")]
    pub width: f64,

    /// Rendered panel height.
    #[arg(long, value_name = "PX")]
    pub height: f64,

    /// Document scroll offset.
    #[arg(long, value_name = "PX", default_value_t = 0.0)]
    pub scroll: f64,

    #[arg(long, value_name = "PX", default_value_t = 1024.0)]
    pub window_width: f64,

    #[arg(long, value_name = "PX", default_value_t = 768.0)]
    pub window_height: f64,

    /// Space reserved at the top of the viewport (sticky header).
    #[arg(long, value_name = "PX", default_value_t = 0.0)]
    pub reduce_top: f64,

    /// Space reserved at the bottom of the viewport (sticky footer).
    #[arg(long, value_name = "PX", default_value_t = 0.0)]
    pub reduce_bottom: f64,

    /// Bounding container as TOP,HEIGHT,LEFT,WIDTH.
    #[arg(long, value_name = "TOP,HEIGHT,LEFT,WIDTH", value_parser = parse_container)]
    pub container: Option<Container>,

    /// Place without a viewport, as a non-interactive host would.
    #[arg(long)]
    pub headless: bool,

    /// Place before the panel has been laid out.
    #[arg(long)]
    pub hidden_panel: bool,

    /// Round the anchor to whole pixels.
    #[arg(long)]
    pub round: bool,

    /// Append logs to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: Level,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("--{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("--{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("failed to open log file: {0}")]
    LogFile(#[from] io::Error),
}

/// Validated inputs for one placement.
#[derive(Debug, Clone)]
pub struct PlacementRequest {
    pub position: TriggerPosition,
    pub viewport: Option<FixedViewport>,
    pub panel: Option<FixedPanel>,
    pub reduce: Reduction,
    pub round: bool,
}

impl TryFrom<&Cli> for PlacementRequest {
    type Error = CliError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        finite("mouse-x", cli.mouse_x)?;
        finite("el-top", cli.el_top)?;
        finite("scroll", cli.scroll)?;
        for (field, value) in [
            ("el-height", cli.el_height),
            ("width", cli.width),
            ("height", cli.height),
            ("window-width", cli.window_width),
            ("window-height", cli.window_height),
            ("reduce-top", cli.reduce_top),
            ("reduce-bottom", cli.reduce_bottom),
        ] {
            non_negative(field, value)?;
        }

        let event = TriggerEvent::new(cli.mouse_x, cli.el_top, cli.el_height);
        let position = dimensions_from_event(&event, cli.container.as_ref());
        let viewport = (!cli.headless).then_some(FixedViewport {
            scroll_top: cli.scroll,
            width: cli.window_width,
            height: cli.window_height,
        });
        let panel = (!cli.hidden_panel).then_some(FixedPanel {
            width: cli.width,
            height: cli.height,
        });
        Ok(Self {
            position,
            viewport,
            panel,
            reduce: Reduction::new(cli.reduce_top, cli.reduce_bottom),
            round: cli.round,
        })
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), CliError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CliError::NonFinite { field })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), CliError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(CliError::Negative { field, value });
    }
    Ok(())
}

fn parse_container(raw: &str) -> Result<Container, String> {
    let parts = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("invalid number in container: {err}"))?;
    let &[offset_top, client_height, offset_left, client_width] = parts.as_slice() else {
        return Err(format!(
            "expected 4 comma-separated values, got {}",
            parts.len()
        ));
    };
    Ok(Container {
        offset_top,
        client_height,
        offset_left,
        client_width,
    })
}

#[derive(Debug, Clone, Copy)]
pub struct FixedViewport {
    pub scroll_top: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewportProvider for FixedViewport {
    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn client_width(&self) -> f64 {
        self.width
    }

    fn client_height(&self) -> f64 {
        self.height
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedPanel {
    pub width: f64,
    pub height: f64,
}

impl PanelNode for FixedPanel {
    fn client_width(&self) -> f64 {
        self.width
    }

    fn client_height(&self) -> f64 {
        self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementReport {
    pub anchor: AnchorPosition,
    pub side: Side,
}

impl fmt::Display for PlacementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side {
            Side::Below => "below",
            Side::Above => "above",
            Side::OverflowBelow => "below (overflow)",
        };
        write!(f, "x={} y={} side={}", self.anchor.x, self.anchor.y, side)
    }
}

/// Show the panel once and report where the controller put it.
///
/// `None` only if the controller did not place the panel.
pub fn place(request: &PlacementRequest) -> Option<PlacementReport> {
    let mut controller = PlacementController::new(request.reduce);
    let viewport = request.viewport.as_ref().map(|v| v as &dyn ViewportProvider);
    let panel = request.panel.as_ref().map(|p| p as &dyn PanelNode);
    controller.update(true, request.position, viewport, panel)?;

    controller.placement().map(|placement| PlacementReport {
        anchor: if request.round {
            placement.anchor.rounded()
        } else {
            placement.anchor
        },
        side: placement.side,
    })
}

pub fn init_logging(cli: &Cli) -> Result<(), CliError> {
    let writer = match &cli.log_file {
        Some(path) => SubscriberMakeWriter::to_file(path)?,
        None => SubscriberMakeWriter::default(),
    };
    tracing_sub::init_with(writer, cli.log_level);
    Ok(())
}

pub fn run(cli: &Cli) -> Result<Option<PlacementReport>, CliError> {
    init_logging(cli)?;
    let request = PlacementRequest::try_from(cli)?;
    Ok(place(&request))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["popover-place"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    const BASE: &[&str] = &[
        "--mouse-x",
        "500",
        "--el-top",
        "100",
        "--el-height",
        "30",
        "--width",
        "200",
        "--height",
        "80",
    ];

    #[test]
    fn places_with_defaults() {
        let cli = parse(BASE);
        let report = place(&PlacementRequest::try_from(&cli).unwrap()).unwrap();
        assert_eq!(report.anchor, AnchorPosition { x: 400.0, y: 140.0 });
        assert_eq!(report.to_string(), "x=400 y=140 side=below");
    }

    #[test]
    fn reports_the_side_the_controller_chose() {
        let cli = parse(&[
            "--mouse-x",
            "500",
            "--el-top",
            "600",
            "--el-height",
            "30",
            "--width",
            "200",
            "--height",
            "200",
        ]);
        let report = place(&PlacementRequest::try_from(&cli).unwrap()).unwrap();
        assert_eq!(report.side, Side::Above);
        assert_eq!(report.to_string(), "x=400 y=390 side=above");
    }

    #[test]
    fn container_is_parsed_and_applied() {
        let mut args = BASE.to_vec();
        args.extend_from_slice(&["--container", "0, 2000, 100, 300"]);
        let cli = parse(&args);
        let request = PlacementRequest::try_from(&cli).unwrap();
        assert_eq!(request.position.offset_left, 100.0);
        assert_eq!(place(&request).unwrap().anchor.x, 176.0);
    }

    #[test]
    fn malformed_container_is_rejected() {
        let mut argv = vec!["popover-place"];
        argv.extend_from_slice(BASE);
        argv.extend_from_slice(&["--container", "1,2,3"]);
        assert!(Cli::try_parse_from(argv.clone()).is_err());
        argv.pop();
        argv.push("1,2,x,4");
        assert!(Cli::try_parse_from(argv.clone()).is_err());
    }

    #[test]
    fn negative_sizes_are_rejected() {
        let mut cli = parse(BASE);
        cli.width = -5.0;
        let err = PlacementRequest::try_from(&cli).unwrap_err();
        assert!(matches!(err, CliError::Negative { field: "width", .. }));

        let mut cli = parse(BASE);
        cli.mouse_x = f64::NAN;
        let err = PlacementRequest::try_from(&cli).unwrap_err();
        assert_eq!(err.to_string(), "--mouse-x must be a finite number");
    }

    #[test]
    fn headless_still_reports_a_position() {
        let mut args = BASE.to_vec();
        args.push("--headless");
        let cli = parse(&args);
        let request = PlacementRequest::try_from(&cli).unwrap();
        assert!(request.viewport.is_none());
        let report = place(&request).unwrap();
        assert!(report.anchor.x.is_finite());
        assert!(report.anchor.y.is_finite());
    }

    #[test]
    fn rounding_is_opt_in() {
        let mut args = BASE.to_vec();
        args[1] = "333.3";
        let cli = parse(&args);
        let report = place(&PlacementRequest::try_from(&cli).unwrap()).unwrap();
        assert!((report.anchor.x - 233.3).abs() < 1e-9);

        args.push("--round");
        let cli = parse(&args);
        let report = place(&PlacementRequest::try_from(&cli).unwrap()).unwrap();
        assert_eq!(report.anchor.x, 233.0);
    }
}
