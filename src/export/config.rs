//! Render configuration assembly: engine, film, image pipeline, filter
//! and sampler selection.

use crate::core::Properties;
use crate::scene::FilmSettings;

/// Build the configuration property set for one conversion.
///
/// `dimensions` overrides the output resolution when given; otherwise
/// the scene's film settings decide.
pub fn render_config_props(film: &FilmSettings, dimensions: Option<(u32, u32)>) -> Properties {
    let (width, height) = dimensions.unwrap_or((film.width, film.height));

    let mut props = Properties::new();
    props.set("renderengine.type", "PATHCPU");
    props.set("accelerator.instances.enable", false);

    props.set("film.width", width);
    props.set("film.height", height);

    // Two-stage pipeline: linear tonemap, then gamma.
    props.set("film.imagepipeline.0.type", "TONEMAP_LUXLINEAR");
    props.set("film.imagepipeline.0.exposure", 1.25);
    props.set("film.imagepipeline.1.type", "GAMMA_CORRECTION");
    props.set("film.imagepipeline.1.value", 1.0);

    props.set("film.filter.type", "MITCHELL_SS");
    props.set("sampler.type", "METROPOLIS");

    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PropValue;

    #[test]
    fn test_baseline_keys() {
        let props = render_config_props(&FilmSettings::default(), None);

        assert_eq!(
            props.get("renderengine.type").and_then(PropValue::as_str),
            Some("PATHCPU")
        );
        assert_eq!(
            props
                .get("accelerator.instances.enable")
                .and_then(PropValue::as_bool),
            Some(false)
        );
        assert_eq!(
            props.get("film.width").and_then(PropValue::as_int),
            Some(640)
        );
        assert_eq!(
            props.get("film.height").and_then(PropValue::as_int),
            Some(480)
        );
        assert_eq!(
            props
                .get("film.imagepipeline.0.type")
                .and_then(PropValue::as_str),
            Some("TONEMAP_LUXLINEAR")
        );
        assert_eq!(
            props
                .get("film.imagepipeline.0.exposure")
                .and_then(PropValue::as_float),
            Some(1.25)
        );
        assert_eq!(
            props
                .get("film.imagepipeline.1.type")
                .and_then(PropValue::as_str),
            Some("GAMMA_CORRECTION")
        );
        assert_eq!(
            props.get("film.filter.type").and_then(PropValue::as_str),
            Some("MITCHELL_SS")
        );
        assert_eq!(
            props.get("sampler.type").and_then(PropValue::as_str),
            Some("METROPOLIS")
        );
    }

    #[test]
    fn test_dimension_override_wins() {
        let film = FilmSettings {
            width: 1920,
            height: 1080,
        };
        let props = render_config_props(&film, Some((320, 240)));
        assert_eq!(props.get("film.width").and_then(PropValue::as_int), Some(320));
        assert_eq!(
            props.get("film.height").and_then(PropValue::as_int),
            Some(240)
        );
    }
}
