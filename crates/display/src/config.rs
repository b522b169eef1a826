use thiserror::Error;

/// Layout and interaction settings for the interactive viewer.
///
/// Construct with [`DisplayConfig::default`] and chain setters as needed;
/// [`validate`](DisplayConfig::validate) is called when a session is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayConfig {
    window_size: [f32; 2],
    menu_width: f32,
    initial_scale: f64,
    zoom_in_factor: f64,
    zoom_out_factor: f64,
    scroll_zoom_rate: f64,
    hit_radius: f64,
    preview_min_dt: f64,
    preview_max_time_range: f64,
    line_width: f32,
    point_radius: f32,
    marker_radius: f32,
}

/// Errors that can occur when validating a display config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("window and menu sizes must be positive, with room left for the plot")]
    Layout,

    #[error("initial scale must be finite and positive")]
    Scale,

    #[error("zoom in factor must exceed 1 and zoom out factor must lie in (0, 1)")]
    ZoomFactors,

    #[error("hit radius must be finite and non-negative")]
    HitRadius,

    #[error("preview limits must be finite and positive")]
    Preview,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_size: [1150.0, 700.0],
            menu_width: 350.0,
            initial_scale: 100.0,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            scroll_zoom_rate: 0.005,
            hit_radius: 10.0,
            preview_min_dt: 0.01,
            preview_max_time_range: 20.0,
            line_width: 3.0,
            point_radius: 3.0,
            marker_radius: 10.0,
        }
    }
}

impl DisplayConfig {
    /// Checks that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [w, h] = self.window_size;
        if !(w > 0.0 && h > 0.0 && self.menu_width > 0.0 && self.menu_width < w) {
            return Err(ConfigError::Layout);
        }
        if !self.initial_scale.is_finite() || self.initial_scale <= 0.0 {
            return Err(ConfigError::Scale);
        }
        if !(self.zoom_in_factor > 1.0 && self.zoom_in_factor.is_finite())
            || !(self.zoom_out_factor > 0.0 && self.zoom_out_factor < 1.0)
        {
            return Err(ConfigError::ZoomFactors);
        }
        if !self.hit_radius.is_finite() || self.hit_radius < 0.0 {
            return Err(ConfigError::HitRadius);
        }
        if !(self.preview_min_dt > 0.0 && self.preview_min_dt.is_finite())
            || !(self.preview_max_time_range > 0.0 && self.preview_max_time_range.is_finite())
        {
            return Err(ConfigError::Preview);
        }
        Ok(())
    }

    /// Sets the initial window size in logical pixels.
    #[must_use]
    pub fn window_size(mut self, width: f32, height: f32) -> Self {
        self.window_size = [width, height];
        self
    }

    /// Sets the width of the menu panel.
    #[must_use]
    pub fn menu_width(mut self, width: f32) -> Self {
        self.menu_width = width;
        self
    }

    /// Sets the pixels per simulation unit used at start and by "Home".
    #[must_use]
    pub fn initial_scale(mut self, scale: f64) -> Self {
        self.initial_scale = scale;
        self
    }

    /// Sets the per-frame zoom factors applied while the arrow keys are held.
    #[must_use]
    pub fn zoom_factors(mut self, zoom_in: f64, zoom_out: f64) -> Self {
        self.zoom_in_factor = zoom_in;
        self.zoom_out_factor = zoom_out;
        self
    }

    /// Sets how far from an initial condition, in pixels, a press still grabs it.
    #[must_use]
    pub fn hit_radius(mut self, radius: f64) -> Self {
        self.hit_radius = radius;
        self
    }

    /// Sets the coarse settings used while an initial condition is dragged.
    #[must_use]
    pub fn preview(mut self, min_dt: f64, max_time_range: f64) -> Self {
        self.preview_min_dt = min_dt;
        self.preview_max_time_range = max_time_range;
        self
    }

    #[must_use]
    pub fn size(&self) -> [f32; 2] {
        self.window_size
    }

    #[must_use]
    pub fn menu(&self) -> f32 {
        self.menu_width
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.initial_scale
    }

    #[must_use]
    pub fn zoom_in(&self) -> f64 {
        self.zoom_in_factor
    }

    #[must_use]
    pub fn zoom_out(&self) -> f64 {
        self.zoom_out_factor
    }

    /// Returns the zoom factor for a scroll of `delta` points.
    #[must_use]
    pub fn scroll_zoom(&self, delta: f64) -> f64 {
        (delta * self.scroll_zoom_rate).exp()
    }

    #[must_use]
    pub fn grab_radius(&self) -> f64 {
        self.hit_radius
    }

    /// Returns the `(dt, time_range)` to integrate with while dragging, given
    /// the solver's own settings.
    #[must_use]
    pub fn preview_settings(&self, dt: f64, time_range: f64) -> (f64, f64) {
        (
            dt.max(self.preview_min_dt),
            time_range.min(self.preview_max_time_range),
        )
    }

    #[must_use]
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    #[must_use]
    pub fn point_radius(&self) -> f32 {
        self.point_radius
    }

    #[must_use]
    pub fn marker_radius(&self) -> f32 {
        self.marker_radius
    }
}
