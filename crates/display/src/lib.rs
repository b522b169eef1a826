//! Interactive phase-plane viewer for second-order systems.
//!
//! - [`Session`]: the window-independent viewer state: solvers, sliders,
//!   viewport, selection, and the [`Command`]s the menu triggers
//! - [`Displayer`]: the eframe application that draws a session with
//!   `egui_plot` and feeds it pointer and keyboard input
//! - [`PlotObserver`]: a solver observer that collects one trajectory and
//!   shows its time series next to its phase portrait
//! - [`scenarios`]: named solver sets to open the viewer with
//!
//! [`Viewport`] and [`ParameterSlider`] hold the coordinate mapping and
//! slider range rules; both are pure and usable without a window.

pub mod scenarios;

mod app;
mod config;
mod plot;
mod session;
mod sliders;
mod viewport;

pub use app::Displayer;
pub use config::{ConfigError, DisplayConfig};
pub use plot::{PlotObserver, Plottable, ShowConfig};
pub use session::{Command, Curve, Drag, PALETTE, RESET_DT, Session, SessionError};
pub use sliders::{MAX_DT, MIN_DT, MIN_TIME_RANGE, ParameterSlider, SPAN, SliderSet};
pub use viewport::{HOME_SCALE, Viewport};
