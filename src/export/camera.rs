//! Camera conversion: placement, field of view, screen window, shutter
//! and depth of field as `scene.camera.*` properties.

use glam::Vec3;

use crate::core::{PropValue, Properties};
use crate::scene::{CameraData, FilmSettings, SensorFit};

/// Three points of a look-at statement: origin, target, up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAt {
    pub orig: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// Derive the look-at points from the camera-to-world transform.
///
/// The camera looks down its local -Z axis with +Y up; the target sits
/// one unit along the view direction.
pub fn look_at(camera: &CameraData) -> LookAt {
    let orig = camera.transform.w_axis.truncate();
    let forwards = -camera.transform.z_axis.truncate();
    let up = camera.transform.y_axis.truncate();
    LookAt {
        orig,
        target: orig + forwards,
        up,
    }
}

fn set_cam(props: &mut Properties, key: &str, value: impl Into<PropValue>) {
    props.set(format!("scene.camera.{key}"), value);
}

/// Convert the camera into its `scene.camera.*` property block.
pub fn convert_camera(camera: &CameraData, film: &FilmSettings) -> Properties {
    let mut props = Properties::new();

    set_cam(&mut props, "type", "perspective");

    let lookat = look_at(camera);
    set_cam(&mut props, "lookat.orig", lookat.orig);
    set_cam(&mut props, "lookat.target", lookat.target);
    set_cam(&mut props, "up", lookat.up);

    set_cam(&mut props, "shutteropen", camera.shutter_open);
    set_cam(&mut props, "shutterclose", camera.shutter_close);

    let fov = camera.field_of_view() * vertical_aspect_fix(camera, film);
    set_cam(&mut props, "fieldofview", fov.to_degrees());

    let window = screen_window(camera, film);
    set_cam(&mut props, "screenwindow", window.map(f64::from));

    if camera.use_dof {
        set_cam(&mut props, "lensradius", camera.lens_radius());
        if camera.focal_distance > 0.0 {
            set_cam(&mut props, "focaldistance", camera.focal_distance);
        }
    }

    props
}

/// Field-of-view correction for a vertically fitted sensor on wide film.
/// The aspect ratio is kept at one decimal, always rounding down.
fn vertical_aspect_fix(camera: &CameraData, film: &FilmSettings) -> f32 {
    let width = film.width as f32;
    let height = film.height as f32;
    if camera.sensor_fit == SensorFit::Vertical && width > height {
        ((width / height - 0.05) * 10.0).round() / 10.0
    } else {
        1.0
    }
}

/// Screen window [left, right, bottom, top] from the film aspect, lens
/// shift and zoom.
fn screen_window(camera: &CameraData, film: &FilmSettings) -> [f32; 4] {
    let width = film.width as f32;
    let height = film.height as f32;

    let (xaspect, yaspect) = if width > height {
        (1.0, height / width)
    } else {
        (width / height, 1.0)
    };

    let dx = 2.0 * camera.shift.x;
    let dy = 2.0 * camera.shift.y;
    let zoom = camera.zoom;

    [
        -xaspect * zoom + dx,
        xaspect * zoom + dx,
        -yaspect * zoom + dy,
        yaspect * zoom + dy,
    ]
}
