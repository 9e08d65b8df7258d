//! Camera module for pan/zoom transforms.
//!
//! Pan and zoom each have a steady-state value and an in-flight gesture
//! value. The gesture value only lives while a gesture is in progress and is
//! folded into the steady state when the gesture ends.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Default inset, in screen units, kept around content fitted with
/// [`Camera::zoom_to_fit`].
pub const DEFAULT_FIT_MARGIN: f64 = 32.0;

/// Lowest steady zoom when no limits are configured.
pub const DEFAULT_MIN_ZOOM: f64 = 0.01;
/// Highest steady zoom when no limits are configured.
pub const DEFAULT_MAX_ZOOM: f64 = 100.0;

/// Whether `[min_zoom, max_zoom]` is a usable zoom range: finite, positive
/// and not inverted.
pub fn valid_zoom_limits(min_zoom: f64, max_zoom: f64) -> bool {
    min_zoom.is_finite() && max_zoom.is_finite() && min_zoom > 0.0 && min_zoom <= max_zoom
}

/// Camera manages the view transform for the canvas.
///
/// Document space has its origin at the canvas center. Pan is stored in
/// document units and scaled by the current zoom when applied on screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Committed pan offset (document units).
    pub steady_pan: Vec2,
    /// Committed zoom level.
    pub steady_zoom: f64,
    /// Pan of the drag in progress (document units).
    #[serde(skip)]
    gesture_pan: Vec2,
    /// Zoom factor of the pinch in progress.
    #[serde(skip, default = "identity_zoom")]
    gesture_zoom: f64,
    /// Minimum allowed steady zoom level
    pub min_zoom: f64,
    /// Maximum allowed steady zoom level
    pub max_zoom: f64,
}

fn identity_zoom() -> f64 {
    1.0
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            steady_pan: Vec2::ZERO,
            steady_zoom: 1.0,
            gesture_pan: Vec2::ZERO,
            gesture_zoom: 1.0,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera whose steady zoom is clamped to `[min_zoom, max_zoom]`.
    ///
    /// An unusable range falls back to the default limits.
    pub fn with_limits(min_zoom: f64, max_zoom: f64) -> Self {
        if !valid_zoom_limits(min_zoom, max_zoom) {
            log::warn!(
                "Invalid zoom limits [{}, {}], using [{}, {}]",
                min_zoom,
                max_zoom,
                DEFAULT_MIN_ZOOM,
                DEFAULT_MAX_ZOOM
            );
            return Self::default();
        }
        Self {
            min_zoom,
            max_zoom,
            ..Self::default()
        }
    }

    /// Effective zoom: steady zoom times the in-flight pinch factor.
    pub fn zoom(&self) -> f64 {
        self.steady_zoom * self.gesture_zoom
    }

    /// Effective pan in screen units.
    pub fn pan_offset(&self) -> Vec2 {
        (self.steady_pan + self.gesture_pan) * self.zoom()
    }

    pub fn gesture_pan(&self) -> Vec2 {
        self.gesture_pan
    }

    pub fn gesture_zoom(&self) -> f64 {
        self.gesture_zoom
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts document coordinates to screen coordinates
    /// for a canvas of the given size.
    pub fn transform(&self, canvas: Size) -> Affine {
        let center = canvas.to_vec2() / 2.0;
        Affine::translate(center + self.pan_offset()) * Affine::scale(self.zoom())
    }

    /// Get the inverse transform for input handling.
    pub fn inverse_transform(&self, canvas: Size) -> Affine {
        let center = canvas.to_vec2() / 2.0;
        Affine::scale(1.0 / self.zoom()) * Affine::translate(-(center + self.pan_offset()))
    }

    /// Convert a point in the canvas' local screen space to document space.
    pub fn to_document_space(&self, screen_point: Point, canvas: Size) -> Point {
        self.inverse_transform(canvas) * screen_point
    }

    /// Convert a document-space location to the canvas' local screen space.
    pub fn position_on_screen(&self, location: Point, canvas: Size) -> Point {
        self.transform(canvas) * location
    }

    /// Convert a screen-space translation to document units at the current zoom.
    pub fn screen_to_document_delta(&self, translation: Vec2) -> Vec2 {
        translation / self.zoom()
    }

    /// Track an in-progress canvas drag. `translation` is in screen units.
    pub fn update_pan(&mut self, translation: Vec2) {
        self.gesture_pan = self.screen_to_document_delta(translation);
    }

    /// Commit a finished canvas drag.
    pub fn end_pan(&mut self, translation: Vec2) {
        self.steady_pan += self.screen_to_document_delta(translation);
        self.gesture_pan = Vec2::ZERO;
    }

    /// Drop an in-progress canvas drag without committing it.
    pub fn cancel_pan(&mut self) {
        self.gesture_pan = Vec2::ZERO;
    }

    /// Track an in-progress pinch on the canvas.
    pub fn update_zoom(&mut self, scale: f64) {
        if is_usable_factor(scale) {
            self.gesture_zoom = scale;
        }
    }

    /// Commit a finished pinch on the canvas.
    pub fn end_zoom(&mut self, scale: f64) {
        if is_usable_factor(scale) {
            self.set_steady_zoom(self.steady_zoom * scale);
        } else {
            log::warn!("Ignoring canvas zoom by unusable factor {}", scale);
        }
        self.gesture_zoom = 1.0;
    }

    /// Drop an in-progress pinch without committing it.
    pub fn cancel_zoom(&mut self) {
        self.gesture_zoom = 1.0;
    }

    /// Limits currently in force. The public fields may have been edited or
    /// deserialized into an unusable range; that range is replaced by the defaults.
    fn zoom_limits(&self) -> (f64, f64) {
        if valid_zoom_limits(self.min_zoom, self.max_zoom) {
            (self.min_zoom, self.max_zoom)
        } else {
            (DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM)
        }
    }

    fn set_steady_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            log::warn!("Ignoring NaN steady zoom");
            return;
        }
        let (min_zoom, max_zoom) = self.zoom_limits();
        self.steady_zoom = zoom.clamp(min_zoom, max_zoom);
    }

    /// Center the view and zoom so `content` fits inside `canvas` minus `margin`.
    ///
    /// Degenerate content (zero, negative or non-finite size) leaves the
    /// camera unchanged.
    pub fn zoom_to_fit(&mut self, content: Size, canvas: Size, margin: f64) {
        if !(content.width > 0.0 && content.height > 0.0) || !content.is_finite() {
            return;
        }
        let h_zoom = (canvas.width - margin) / content.width;
        let v_zoom = (canvas.height - margin) / content.height;
        self.steady_pan = Vec2::ZERO;
        self.set_steady_zoom(h_zoom.min(v_zoom));
    }
}

fn is_usable_factor(scale: f64) -> bool {
    scale.is_finite() && scale > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Size = Size::new(400.0, 300.0);

    fn assert_point_eq(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-9, "{a:?} != {b:?}");
        assert!((a.y - b.y).abs() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.pan_offset(), Vec2::ZERO);
        assert!((camera.zoom() - 1.0).abs() < f64::EPSILON);
        assert_eq!(camera.gesture_pan(), Vec2::ZERO);
        assert!((camera.gesture_zoom() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_origin_maps_to_canvas_center() {
        let camera = Camera::new();
        assert_point_eq(camera.position_on_screen(Point::ZERO, CANVAS), Point::new(200.0, 150.0));
        assert_point_eq(camera.to_document_space(Point::new(200.0, 150.0), CANVAS), Point::ZERO);
    }

    #[test]
    fn test_pan_is_scaled_by_zoom_on_screen() {
        let mut camera = Camera::new();
        camera.steady_pan = Vec2::new(10.0, -5.0);
        camera.steady_zoom = 2.0;
        assert_eq!(camera.pan_offset(), Vec2::new(20.0, -10.0));
        // (3, 4) * 2 + center + pan
        assert_point_eq(
            camera.position_on_screen(Point::new(3.0, 4.0), CANVAS),
            Point::new(226.0, 148.0),
        );
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.steady_pan = Vec2::new(30.0, -20.0);
        camera.steady_zoom = 1.5;
        camera.update_zoom(1.3);
        camera.update_pan(Vec2::new(7.0, 9.0));

        for &(x, y) in &[(0.0, 0.0), (123.0, 456.0), (-37.0, 12.0)] {
            let location = Point::new(x, y);
            let screen = camera.position_on_screen(location, CANVAS);
            assert_point_eq(camera.to_document_space(screen, CANVAS), location);
        }
    }

    #[test]
    fn test_pan_gesture_converts_to_document_units() {
        let mut camera = Camera::new();
        camera.steady_zoom = 2.0;

        camera.update_pan(Vec2::new(40.0, 20.0));
        assert_eq!(camera.gesture_pan(), Vec2::new(20.0, 10.0));
        assert_eq!(camera.steady_pan, Vec2::ZERO);
        // Screen offset follows the finger exactly.
        assert_eq!(camera.pan_offset(), Vec2::new(40.0, 20.0));

        camera.end_pan(Vec2::new(50.0, 20.0));
        assert_eq!(camera.steady_pan, Vec2::new(25.0, 10.0));
        assert_eq!(camera.gesture_pan(), Vec2::ZERO);
    }

    #[test]
    fn test_cancel_pan_does_not_commit() {
        let mut camera = Camera::new();
        camera.update_pan(Vec2::new(40.0, 20.0));
        camera.cancel_pan();
        assert_eq!(camera.steady_pan, Vec2::ZERO);
        assert_eq!(camera.pan_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_zoom_gesture_composes_with_steady_state() {
        let mut camera = Camera::new();
        camera.steady_zoom = 2.0;

        camera.update_zoom(1.5);
        assert!((camera.zoom() - 3.0).abs() < 1e-12);
        assert!((camera.steady_zoom - 2.0).abs() < f64::EPSILON);

        camera.end_zoom(1.25);
        assert!((camera.steady_zoom - 2.5).abs() < 1e-12);
        assert!((camera.gesture_zoom() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_ignores_unusable_factors() {
        let mut camera = Camera::new();
        camera.update_zoom(0.0);
        camera.update_zoom(-1.0);
        assert!((camera.zoom() - 1.0).abs() < f64::EPSILON);

        camera.end_zoom(f64::INFINITY);
        assert!((camera.steady_zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::with_limits(0.5, 4.0);
        camera.end_zoom(0.001);
        assert!((camera.steady_zoom - 0.5).abs() < f64::EPSILON);

        camera.end_zoom(1000.0);
        assert!((camera.steady_zoom - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_to_fit() {
        let mut camera = Camera::new();
        camera.steady_pan = Vec2::new(15.0, 15.0);
        camera.zoom_to_fit(Size::new(200.0, 100.0), CANVAS, DEFAULT_FIT_MARGIN);
        assert!((camera.steady_zoom - 1.84).abs() < 1e-12);
        assert_eq!(camera.steady_pan, Vec2::ZERO);
    }

    #[test]
    fn test_zoom_to_fit_ignores_degenerate_content() {
        let mut camera = Camera::new();
        camera.steady_pan = Vec2::new(15.0, 15.0);
        camera.steady_zoom = 3.0;

        camera.zoom_to_fit(Size::ZERO, CANVAS, DEFAULT_FIT_MARGIN);
        camera.zoom_to_fit(Size::new(100.0, 0.0), CANVAS, DEFAULT_FIT_MARGIN);
        camera.zoom_to_fit(Size::new(f64::NAN, 10.0), CANVAS, DEFAULT_FIT_MARGIN);

        assert_eq!(camera.steady_pan, Vec2::new(15.0, 15.0));
        assert!((camera.steady_zoom - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_to_fit_tiny_canvas_stays_positive() {
        let mut camera = Camera::new();
        camera.zoom_to_fit(Size::new(200.0, 100.0), Size::new(10.0, 10.0), DEFAULT_FIT_MARGIN);
        assert!(camera.steady_zoom > 0.0);
        assert!((camera.steady_zoom - camera.min_zoom).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_limits_fall_back_to_defaults() {
        for (min_zoom, max_zoom) in [(5.0, 1.0), (0.0, 10.0), (-1.0, 10.0), (f64::NAN, 10.0), (0.1, f64::INFINITY)] {
            let camera = Camera::with_limits(min_zoom, max_zoom);
            assert!((camera.min_zoom - DEFAULT_MIN_ZOOM).abs() < f64::EPSILON);
            assert!((camera.max_zoom - DEFAULT_MAX_ZOOM).abs() < f64::EPSILON);
        }
        let camera = Camera::with_limits(2.0, 2.0);
        assert!((camera.min_zoom - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inverted_limit_fields_do_not_panic() {
        let mut camera = Camera::new();
        camera.min_zoom = 5.0;
        camera.max_zoom = 1.0;
        camera.end_zoom(2.0);
        assert!((camera.steady_zoom - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_to_fit_with_zero_min_zoom_stays_positive() {
        let mut camera = Camera::new();
        camera.min_zoom = 0.0;
        camera.zoom_to_fit(Size::new(200.0, 100.0), Size::new(20.0, 20.0), DEFAULT_FIT_MARGIN);
        assert!(camera.zoom().is_finite());
        assert!((camera.steady_zoom - DEFAULT_MIN_ZOOM).abs() < f64::EPSILON);
    }
}
