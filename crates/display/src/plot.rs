//! Static plot of a single trajectory.
//!
//! See [`PlotObserver`] and [`Plottable`] for usage.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use phaseplot_core::Observer;
use phaseplot_solvers::transient::euler;
use phaseplot_systems::{PhaseDerivative, PhaseInput};

/// Configuration for rendering a [`PlotObserver`] result.
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
///
/// # Example
///
/// ```ignore
/// obs.show(ShowConfig::new().title("Oscillator").legend().phase_portrait())?;
/// ```
pub struct ShowConfig {
    title: Option<String>,
    legend: bool,
    phase_portrait: bool,
}

impl ShowConfig {
    /// Creates a new `ShowConfig` with defaults: no title, no legend, time series only.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            legend: false,
            phase_portrait: false,
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enables a legend labeling each trace by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Adds a second panel plotting the first trace against the second.
    ///
    /// Ignored when fewer than two traces were recorded.
    #[must_use]
    pub fn phase_portrait(mut self) -> Self {
        self.phase_portrait = true;
        self
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts plottable data from a solver event.
///
/// Return `None` from [`x`][Plottable::x] to skip the event entirely; return
/// `None` in a trace slot to skip that trace for the event.
pub trait Plottable<const N: usize> {
    /// The x-axis value for this event, or `None` to skip recording entirely.
    fn x(&self) -> Option<f64>;

    /// The y-axis values for each trace.
    fn traces(&self) -> [Option<f64>; N];
}

/// Plots Euler events against time, with traces `[x, v]`.
impl Plottable<2> for euler::Event<PhaseInput, PhaseDerivative> {
    fn x(&self) -> Option<f64> {
        Some(self.snapshot.input.t)
    }

    fn traces(&self) -> [Option<f64>; 2] {
        let point = self.snapshot.input.point;
        [Some(point.x), Some(point.v)]
    }
}

/// An observer that collects trace data during solving and displays it via egui.
///
/// The const generic `N` is the number of traces. Pass `&mut PlotObserver`
/// as the solver observer, or call [`record`][PlotObserver::record]
/// directly, then [`show`][PlotObserver::show] the result.
///
/// Points are sorted by x before display, so events may arrive in any
/// order. The symmetric Euler solver emits the forward half before the
/// backward half.
///
/// # Example
///
/// ```ignore
/// let mut obs = PlotObserver::<2>::new(["x", "v"]);
/// solver.integrate(0.01, 20.0, &mut obs)?;
/// obs.show(ShowConfig::new().title("Oscillator").legend().phase_portrait())?;
/// ```
pub struct PlotObserver<const N: usize> {
    names: [String; N],
    data: [Vec<[f64; 2]>; N],
}

impl<const N: usize> PlotObserver<N> {
    /// Creates a new `PlotObserver` with the given trace names.
    pub fn new(names: [&str; N]) -> Self {
        Self {
            names: names.map(str::to_owned),
            data: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Records a single data point across all traces.
    pub fn record(&mut self, x: f64, traces: [Option<f64>; N]) {
        for (i, y) in traces.into_iter().enumerate() {
            if let Some(y) = y {
                self.data[i].push([x, y]);
            }
        }
    }

    /// Returns the collected traces, each sorted by x.
    fn into_traces(self) -> Vec<(String, Vec<[f64; 2]>)> {
        self.names
            .into_iter()
            .zip(self.data)
            .map(|(name, mut points)| {
                points.sort_by(|a, b| a[0].total_cmp(&b[0]));
                (name, points)
            })
            .collect()
    }

    /// Opens a blocking egui window displaying all collected traces.
    ///
    /// Blocks until the window is closed by the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let options = eframe::NativeOptions::default();
        let title = config.title.unwrap_or_default();
        let traces = self.into_traces();
        let portrait = if config.phase_portrait {
            phase_portrait(&traces)
        } else {
            None
        };

        eframe::run_native(
            &title,
            options,
            Box::new(move |_cc| {
                Ok(Box::new(PlotApp {
                    traces,
                    portrait,
                    legend: config.legend,
                }))
            }),
        )
    }
}

/// Pairs the first two traces point by point, in x order.
///
/// Returns the axis names and the `(first, second)` points.
fn phase_portrait(traces: &[(String, Vec<[f64; 2]>)]) -> Option<Portrait> {
    let [(x_name, xs), (y_name, ys), ..] = traces else {
        return None;
    };
    let points = xs
        .iter()
        .zip(ys)
        .filter(|(a, b)| a[0] == b[0])
        .map(|(a, b)| [a[1], b[1]])
        .collect();
    Some(Portrait {
        x_name: x_name.clone(),
        y_name: y_name.clone(),
        points,
    })
}

struct Portrait {
    x_name: String,
    y_name: String,
    points: Vec<[f64; 2]>,
}

impl<const N: usize, E, A> Observer<E, A> for PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if let Some(x) = event.x() {
            self.record(x, event.traces());
        }
        None
    }
}

/// Allows `&mut PlotObserver<N>` to be passed to solvers that take an observer
/// by value, so [`PlotObserver::show`] can be called after the solve completes.
impl<const N: usize, E, A> Observer<E, A> for &mut PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).observe(event)
    }
}

/// The egui [`eframe::App`] that renders collected traces.
struct PlotApp {
    traces: Vec<(String, Vec<[f64; 2]>)>,
    portrait: Option<Portrait>,
    legend: bool,
}

impl PlotApp {
    fn time_series(&self, ui: &mut egui::Ui) {
        let mut plot = Plot::new("time_series").x_axis_label("t");
        if self.legend {
            plot = plot.legend(Legend::default());
        }
        plot.show(ui, |plot_ui| {
            for (name, points) in &self.traces {
                let plot_points: PlotPoints = points.iter().copied().collect();
                plot_ui.line(Line::new(plot_points).name(name));
            }
        });
    }
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(portrait) = &self.portrait {
            egui::SidePanel::right("phase_portrait")
                .default_width(ctx.screen_rect().width() / 2.0)
                .show(ctx, |ui| {
                    Plot::new("phase_portrait")
                        .data_aspect(1.0)
                        .x_axis_label(portrait.x_name.as_str())
                        .y_axis_label(portrait.y_name.as_str())
                        .show(ui, |plot_ui| {
                            let plot_points: PlotPoints =
                                portrait.points.iter().copied().collect();
                            plot_ui.line(Line::new(plot_points));
                        });
                });
        }
        egui::CentralPanel::default().show(ctx, |ui| self.time_series(ui));
    }
}
