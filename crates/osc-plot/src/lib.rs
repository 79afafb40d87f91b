//! Renderer-facing geometry for the oscillation lab.
//!
//! Nothing here draws. These are pure mappings from engine state to plot and
//! object coordinates, plus the polylines, legend rows and readout text a
//! canvas backend needs to paint one frame.

pub mod body;
pub mod config;
pub mod error;
pub mod legend;
pub mod mapping;
pub mod palette;
pub mod readout;
pub mod scene;
pub mod trace;

pub use body::{Rect, body_rects};
pub use config::PlotConfig;
pub use error::{PlotError, PlotResult};
pub use legend::{LegendRow, legend_label, legend_rows};
pub use mapping::{CoordinateMapper, PlotPoint, to_object_space};
pub use palette::{LIVE_TRACE, OVERLAY_ALPHA, PALETTE_HEX, Rgba, palette_color};
pub use readout::Readout;
pub use scene::PlotScene;
pub use trace::Trace;
