//! Mapping between window pixels and phase-plane coordinates.

/// Pixels per simulation unit at start and after [`Viewport::home`].
pub const HOME_SCALE: f64 = 100.0;

const MIN_SCALE: f64 = 1e-9;
const MAX_SCALE: f64 = 1e12;

/// The visible window onto the phase plane.
///
/// Screen positions are in pixels relative to the top-left corner of the
/// drawing area, with y growing downward. Simulation coordinates have `v`
/// growing upward. `center` is the simulation point shown at the middle of
/// the drawing area and `scale` is pixels per simulation unit on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    center: [f64; 2],
    scale: f64,
    home_scale: f64,
}

impl Viewport {
    /// Creates a viewport centered on the origin.
    ///
    /// `scale` is also the scale restored by [`home`](Self::home).
    #[must_use]
    pub fn new(scale: f64) -> Self {
        let scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        Self {
            center: [0.0, 0.0],
            scale,
            home_scale: scale,
        }
    }

    #[must_use]
    pub fn center(&self) -> [f64; 2] {
        self.center
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn screen_to_sim(&self, pos: [f64; 2], size: [f64; 2]) -> [f64; 2] {
        [
            self.center[0] + (pos[0] - size[0] / 2.0) / self.scale,
            self.center[1] - (pos[1] - size[1] / 2.0) / self.scale,
        ]
    }

    #[must_use]
    pub fn sim_to_screen(&self, point: [f64; 2], size: [f64; 2]) -> [f64; 2] {
        [
            (point[0] - self.center[0]) * self.scale + size[0] / 2.0,
            (self.center[1] - point[1]) * self.scale + size[1] / 2.0,
        ]
    }

    /// Returns the `(min, max)` simulation corners visible in an area of `size` pixels.
    #[must_use]
    pub fn bounds(&self, size: [f64; 2]) -> ([f64; 2], [f64; 2]) {
        let half_w = size[0] / 2.0 / self.scale;
        let half_h = size[1] / 2.0 / self.scale;
        (
            [self.center[0] - half_w, self.center[1] - half_h],
            [self.center[0] + half_w, self.center[1] + half_h],
        )
    }

    /// Moves the view so the content follows a pointer moved by `delta` pixels.
    pub fn pan_pixels(&mut self, delta: [f64; 2]) {
        self.center[0] -= delta[0] / self.scale;
        self.center[1] += delta[1] / self.scale;
    }

    /// Multiplies the scale by `factor`, keeping `anchor` fixed on screen.
    ///
    /// The resulting scale is clamped to a finite positive range.
    pub fn zoom_about(&mut self, factor: f64, anchor: [f64; 2]) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let ratio = self.scale / scale;
        self.center = [
            anchor[0] + (self.center[0] - anchor[0]) * ratio,
            anchor[1] + (self.center[1] - anchor[1]) * ratio,
        ];
        self.scale = scale;
    }

    /// Restores the starting scale and centers the origin.
    pub fn home(&mut self) {
        self.center = [0.0, 0.0];
        self.scale = self.home_scale;
    }

    /// Returns `true` if `point` lands within `margin` pixels of the drawing area.
    #[must_use]
    pub fn visible(&self, point: [f64; 2], size: [f64; 2], margin: f64) -> bool {
        let [px, py] = self.sim_to_screen(point, size);
        (-margin..=size[0] + margin).contains(&px) && (-margin..=size[1] + margin).contains(&py)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(HOME_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const SIZE: [f64; 2] = [800.0, 600.0];

    #[test]
    fn origin_starts_at_the_middle() {
        let view = Viewport::default();
        assert_eq!(view.sim_to_screen([0.0, 0.0], SIZE), [400.0, 300.0]);
        assert_eq!(view.screen_to_sim([500.0, 200.0], SIZE), [1.0, 1.0]);
    }

    #[test]
    fn screen_and_sim_are_inverse() {
        let mut view = Viewport::default();
        view.pan_pixels([37.0, -12.0]);
        view.zoom_about(2.5, [0.3, -0.7]);

        let sim = view.screen_to_sim([123.0, 456.0], SIZE);
        let back = view.sim_to_screen(sim, SIZE);
        assert_relative_eq!(back[0], 123.0, epsilon = 1e-9);
        assert_relative_eq!(back[1], 456.0, epsilon = 1e-9);
    }

    #[test]
    fn bounds_match_corners() {
        let view = Viewport::default();
        let (min, max) = view.bounds(SIZE);
        assert_eq!(min, [-4.0, -3.0]);
        assert_eq!(max, [4.0, 3.0]);
        assert_eq!(view.screen_to_sim([0.0, SIZE[1]], SIZE), min);
        assert_eq!(view.screen_to_sim([SIZE[0], 0.0], SIZE), max);
    }

    #[test]
    fn panning_moves_content_with_the_pointer() {
        let mut view = Viewport::default();
        let before = view.sim_to_screen([1.0, 1.0], SIZE);
        view.pan_pixels([50.0, 20.0]);
        let after = view.sim_to_screen([1.0, 1.0], SIZE);

        assert_relative_eq!(after[0] - before[0], 50.0, epsilon = 1e-9);
        assert_relative_eq!(after[1] - before[1], 20.0, epsilon = 1e-9);
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut view = Viewport::default();
        let anchor = [2.0, -1.0];
        let before = view.sim_to_screen(anchor, SIZE);

        view.zoom_about(1.1, anchor);
        view.zoom_about(1.1, anchor);
        assert_relative_eq!(view.scale(), 121.0, epsilon = 1e-9);

        let after = view.sim_to_screen(anchor, SIZE);
        assert_relative_eq!(after[0], before[0], epsilon = 1e-9);
        assert_relative_eq!(after[1], before[1], epsilon = 1e-9);
    }

    #[test]
    fn zoom_ignores_bad_factors_and_clamps() {
        let mut view = Viewport::default();
        view.zoom_about(0.0, [0.0, 0.0]);
        view.zoom_about(f64::NAN, [0.0, 0.0]);
        assert_eq!(view.scale(), HOME_SCALE);

        for _ in 0..1000 {
            view.zoom_about(0.1, [0.0, 0.0]);
        }
        assert!(view.scale() > 0.0);
    }

    #[test]
    fn home_restores_start() {
        let mut view = Viewport::new(50.0);
        view.pan_pixels([100.0, 100.0]);
        view.zoom_about(3.0, [1.0, 1.0]);
        view.home();
        assert_eq!(view, Viewport::new(50.0));
    }

    #[test]
    fn visibility_respects_margin() {
        let view = Viewport::default();
        assert!(view.visible([0.0, 0.0], SIZE, 0.0));
        assert!(!view.visible([4.05, 0.0], SIZE, 0.0));
        assert!(view.visible([4.05, 0.0], SIZE, 10.0));
    }
}
