//! The interactive phase-plane window.

use eframe::egui::{self, Color32, Key, Pos2, Rect};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotBounds, PlotPoints, PlotUi, Points};

use crate::{Command, Session};

const MARKER: Color32 = Color32::from_rgb(0, 50, 32);
const SELECTED: Color32 = Color32::from_rgb(255, 100, 100);

/// Extra pixels around the plot within which points are still drawn.
const CULL_MARGIN: f64 = 20.0;

/// The eframe application driving a [`Session`].
///
/// The phase plane fills the window left of a fixed-width menu panel. The
/// plot's own navigation is disabled; pointer and keyboard input are routed
/// to the session, and the plot's bounds are set from its viewport each
/// frame.
pub struct Displayer {
    session: Session,
    plot_size: Option<[f64; 2]>,
}

/// Pointer and keyboard state sampled once per frame.
struct FrameInput {
    interact: Option<Pos2>,
    hover: Option<Pos2>,
    pressed: bool,
    down: bool,
    released: bool,
    delta: egui::Vec2,
    scroll: f32,
    zoom_in: bool,
    zoom_out: bool,
    reset_step: bool,
}

impl Displayer {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            session,
            plot_size: None,
        }
    }

    /// Opens the window and blocks until it is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn run(self, title: &str) -> Result<(), eframe::Error> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(self.session.config().size())
                .with_title(title),
            ..Default::default()
        };
        log::info!("opening {title} with {} curves", self.session.curves().len());
        eframe::run_native(title, options, Box::new(move |_cc| Ok(Box::new(self))))
    }

    fn menu(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Home").clicked() {
                self.session.apply(Command::Home);
            }
            let mut render_points = self.session.render_points();
            if ui.checkbox(&mut render_points, "Render Points").changed() {
                self.session.apply(Command::ToggleRenderPoints);
            }
        });
        ui.horizontal(|ui| {
            if ui.button("Add Initial Condition").clicked() {
                self.session.apply(Command::AddInitialCondition);
            }
            let can_delete = self.session.curves().len() > 1;
            if ui
                .add_enabled(can_delete, egui::Button::new("Delete Initial Condition"))
                .clicked()
            {
                self.session.apply(Command::DeleteInitialCondition);
            }
        });
        ui.separator();

        let mut selected = self.session.selected();
        for (i, curve) in self.session.curves().iter().enumerate() {
            let [r, g, b] = curve.color();
            let initial = curve.solver().initial();
            let label = egui::RichText::new(format!(
                "{} {} at ({:.3}, {:.3})",
                curve.solver().system().name(),
                i + 1,
                initial.x,
                initial.v
            ))
            .color(Color32::from_rgb(r, g, b));
            ui.selectable_value(&mut selected, i, label);
        }
        self.session.select(selected);
        ui.separator();

        let index = self.session.selected();
        let curve = self.session.selected_curve();
        let mut changes = Vec::new();
        for slider in curve.sliders().iter() {
            let Ok(mut value) = curve.solver().parameters().get(slider.name()) else {
                continue;
            };
            let widget = egui::Slider::new(&mut value, slider.range_for(curve.solver()))
                .text(slider.name())
                .logarithmic(slider.logarithmic());
            if ui.add(widget).changed() {
                changes.push((slider.name().to_owned(), value));
            }
        }
        if let Some(err) = curve.solver().last_error() {
            ui.colored_label(SELECTED, format!("trajectory collapsed: {err}"));
        }

        for (name, value) in changes {
            if let Err(err) = self.session.set_parameter(index, &name, value) {
                log::warn!("cannot set {name}: {err}");
            }
        }
    }

    fn phase_plane(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        let size = self
            .plot_size
            .unwrap_or([f64::from(available.x), f64::from(available.y)]);
        let (min, max) = self.session.viewport().bounds(size);
        let session = &self.session;

        let response = Plot::new("phase_plane")
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .x_axis_label("x")
            .y_axis_label("v")
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(min, max));
                draw_curves(plot_ui, session, size);
            });

        let frame = *response.transform.frame();
        let size = [f64::from(frame.width()), f64::from(frame.height())];
        self.plot_size = Some(size);
        self.handle_input(ui.ctx(), frame, size);
    }

    fn handle_input(&mut self, ctx: &egui::Context, frame: Rect, size: [f64; 2]) {
        let input = ctx.input(|i| FrameInput {
            interact: i.pointer.interact_pos(),
            hover: i.pointer.hover_pos(),
            pressed: i.pointer.primary_pressed(),
            down: i.pointer.primary_down(),
            released: i.pointer.primary_released(),
            delta: i.pointer.delta(),
            scroll: i.smooth_scroll_delta.y,
            zoom_in: i.key_down(Key::ArrowUp),
            zoom_out: i.key_down(Key::ArrowDown),
            reset_step: i.key_pressed(Key::R),
        });
        let local = |p: Pos2| [f64::from(p.x - frame.min.x), f64::from(p.y - frame.min.y)];

        if let Some(pos) = input.interact {
            if input.pressed && frame.contains(pos) {
                self.session.press(local(pos), size);
            }
            if input.down && input.delta != egui::Vec2::ZERO {
                let delta = [f64::from(input.delta.x), f64::from(input.delta.y)];
                self.session.drag_to(local(pos), delta, size);
            }
        }
        if input.released {
            self.session.release();
        }

        let hover = input.hover.filter(|p| frame.contains(*p));
        let anchor = hover.map_or([size[0] / 2.0, size[1] / 2.0], local);
        let config = *self.session.config();
        if hover.is_some() && input.scroll != 0.0 {
            self.session
                .zoom(config.scroll_zoom(f64::from(input.scroll)), anchor, size);
        }

        if ctx.memory(|m| m.focused().is_some()) {
            return;
        }
        if input.zoom_in {
            self.session.zoom(config.zoom_in(), anchor, size);
        }
        if input.zoom_out {
            self.session.zoom(config.zoom_out(), anchor, size);
        }
        if input.zoom_in || input.zoom_out {
            ctx.request_repaint();
        }
        if input.reset_step {
            self.session.apply(Command::ResetStepSize);
        }
    }
}

fn draw_curves(plot_ui: &mut PlotUi, session: &Session, size: [f64; 2]) {
    let config = session.config();
    let viewport = session.viewport();

    for (i, curve) in session.curves().iter().enumerate() {
        let [r, g, b] = curve.color();
        let color = Color32::from_rgb(r, g, b);
        let points: Vec<[f64; 2]> = curve
            .solver()
            .points()
            .iter()
            .map(|&p| p.into())
            .collect();

        if session.render_points() {
            let visible: PlotPoints = points
                .iter()
                .copied()
                .filter(|&p| viewport.visible(p, size, CULL_MARGIN))
                .collect();
            plot_ui.points(
                Points::new(visible)
                    .radius(config.point_radius())
                    .color(color),
            );
        }
        plot_ui.line(
            Line::new(PlotPoints::from(points))
                .color(color)
                .width(config.line_width())
                .name(format!("{} {}", curve.solver().system().name(), i + 1)),
        );

        let initial: [f64; 2] = curve.solver().initial().into();
        if i == session.selected() {
            plot_ui.points(
                Points::new(vec![initial])
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(config.marker_radius() + 2.0)
                    .color(SELECTED),
            );
        }
        plot_ui.points(
            Points::new(vec![initial])
                .shape(MarkerShape::Circle)
                .filled(true)
                .radius(config.marker_radius())
                .color(MARKER),
        );
    }
}

impl eframe::App for Displayer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::right("menu")
            .exact_width(self.session.config().menu())
            .resizable(false)
            .show(ctx, |ui| self.menu(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.phase_plane(ui));
    }
}
