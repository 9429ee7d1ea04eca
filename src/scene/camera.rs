//! Camera placement and optics.

use glam::{Mat4, Vec2};

/// How the sensor dimension is fitted to the film aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorFit {
    Auto,
    Horizontal,
    Vertical,
}

/// Camera description.
///
/// The transform is camera-to-world; the view direction is the local -Z
/// axis and up is local +Y.
#[derive(Debug, Clone)]
pub struct CameraData {
    pub transform: Mat4,
    /// Focal length in millimeters, measured against a 32 mm sensor.
    pub lens_mm: f32,
    pub fstop: f32,
    pub use_dof: bool,
    /// Focus distance in scene units; ignored unless positive.
    pub focal_distance: f32,
    /// Lens shift in screen units.
    pub shift: Vec2,
    /// Screen window zoom; 1.0 for final renders.
    pub zoom: f32,
    pub sensor_fit: SensorFit,
    /// Shutter interval in seconds.
    pub shutter_open: f32,
    pub shutter_close: f32,
}

impl Default for CameraData {
    fn default() -> Self {
        Self {
            transform: Mat4::IDENTITY,
            lens_mm: 35.0,
            fstop: 5.6,
            use_dof: false,
            focal_distance: 5.0,
            shift: Vec2::ZERO,
            zoom: 1.0,
            sensor_fit: SensorFit::Auto,
            shutter_open: 0.0,
            shutter_close: 0.0,
        }
    }
}

impl CameraData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full field of view in radians along the sensor dimension.
    pub fn field_of_view(&self) -> f32 {
        2.0 * (0.5 * 32.0 / self.lens_mm).atan()
    }

    /// Aperture radius in meters.
    pub fn lens_radius(&self) -> f32 {
        (self.lens_mm / 1000.0) / (2.0 * self.fstop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_of_view_from_lens() {
        let camera = CameraData {
            lens_mm: 16.0,
            ..CameraData::default()
        };
        assert!((camera.field_of_view() - 2.0 * 1.0f32.atan()).abs() < 1e-6);
    }

    #[test]
    fn test_lens_radius() {
        let camera = CameraData {
            lens_mm: 50.0,
            fstop: 2.0,
            ..CameraData::default()
        };
        assert!((camera.lens_radius() - 0.0125).abs() < 1e-7);
    }
}
