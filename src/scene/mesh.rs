//! Mesh datablocks: vertices, polygons, UV layers, export modifiers.

use glam::{Vec2, Vec3};
use smallvec::SmallVec;

use crate::core::ParamSet;

/// A polygon face. Triangles and quads are supported; quads are fanned
/// into triangles during export.
#[derive(Debug, Clone)]
pub struct Polygon {
    /// Corner vertex indices, counter-clockwise.
    pub vertices: SmallVec<[u32; 4]>,
    /// Index into the owning object's material slots.
    pub material_index: usize,
    /// Smooth-shaded faces share merged vertices with vertex normals;
    /// flat faces replicate corners with the face normal.
    pub use_smooth: bool,
    /// Face normal, used verbatim for flat shading.
    pub normal: Vec3,
}

impl Polygon {
    pub fn new(corners: &[u32], material_index: usize, use_smooth: bool, normal: Vec3) -> Self {
        Self {
            vertices: SmallVec::from_slice(corners),
            material_index,
            use_smooth,
            normal,
        }
    }

    /// Geometric normal from the first three corners. Zero for degenerate
    /// faces or out-of-range indices.
    pub fn computed_normal(&self, vertices: &[Vec3]) -> Vec3 {
        if self.vertices.len() < 3 {
            return Vec3::ZERO;
        }
        let corner = |i: usize| vertices.get(self.vertices[i] as usize).copied();
        match (corner(0), corner(1), corner(2)) {
            (Some(a), Some(b), Some(c)) => (b - a).cross(c - a).normalize_or_zero(),
            _ => Vec3::ZERO,
        }
    }
}

/// Per-corner UV coordinates for one layer.
///
/// `loops` runs over all polygon corners in polygon order, matching the
/// concatenation of [`Polygon::vertices`] across the mesh.
#[derive(Debug, Clone)]
pub struct UvLayer {
    pub name: String,
    /// The layer rendered from; at most one per mesh should carry it.
    pub active_render: bool,
    pub loops: Vec<Vec2>,
}

/// Subdivision scheme applied at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubdivScheme {
    Loop,
    Microdisplacement,
}

impl SubdivScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loop => "loop",
            Self::Microdisplacement => "microdisplacement",
        }
    }
}

/// Render-time subdivision settings.
#[derive(Debug, Clone)]
pub struct Subdivision {
    pub scheme: SubdivScheme,
    pub levels: i32,
    pub normal_smooth: bool,
    pub sharp_boundary: bool,
}

/// Render-time displacement settings.
#[derive(Debug, Clone)]
pub struct Displacement {
    /// Name of the float texture driving the displacement.
    pub map: String,
    pub scale: f32,
    pub offset: f32,
}

/// Optional render-time mesh modifiers, appended to every shape exported
/// from the mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshModifiers {
    pub subdivision: Option<Subdivision>,
    pub displacement: Option<Displacement>,
}

impl MeshModifiers {
    /// Render the modifier settings as shape parameters.
    pub fn to_paramset(&self) -> ParamSet {
        let mut params = ParamSet::new();

        if let Some(subdiv) = &self.subdivision {
            params.add_string("subdivscheme", subdiv.scheme.as_str());
            params.add_integer("nsubdivlevels", subdiv.levels);
            params.add_bool("dmnormalsmooth", subdiv.normal_smooth);
            params.add_bool("dmsharpboundary", subdiv.sharp_boundary);
        }

        if let Some(disp) = &self.displacement {
            params.add_string("displacementmap", disp.map.clone());
            params.add_float("dmscale", disp.scale);
            params.add_float("dmoffset", disp.offset);
        }

        params
    }
}

/// A mesh datablock. Vertex normals run parallel to `vertices`.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub name: String,
    pub vertices: Vec<Vec3>,
    /// Per-vertex normals, same length as `vertices`.
    pub normals: Vec<Vec3>,
    pub polygons: Vec<Polygon>,
    pub uv_layers: Vec<UvLayer>,
    pub modifiers: MeshModifiers,
}

impl MeshData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            normals: Vec::new(),
            polygons: Vec::new(),
            uv_layers: Vec::new(),
            modifiers: MeshModifiers::default(),
        }
    }

    /// The UV layer used for rendering, if any.
    pub fn active_uv_layer(&self) -> Option<&UvLayer> {
        self.uv_layers.iter().find(|layer| layer.active_render)
    }

    /// Total corner count across all polygons.
    pub fn loop_count(&self) -> usize {
        self.polygons.iter().map(|p| p.vertices.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computed_normal() {
        let vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let poly = Polygon::new(&[0, 1, 2], 0, false, Vec3::ZERO);
        assert_eq!(poly.computed_normal(&vertices), Vec3::new(0.0, 0.0, 1.0));

        let bad = Polygon::new(&[0, 1, 9], 0, false, Vec3::ZERO);
        assert_eq!(bad.computed_normal(&vertices), Vec3::ZERO);
    }

    #[test]
    fn test_modifier_paramset_empty_by_default() {
        assert!(MeshModifiers::default().to_paramset().is_empty());
    }

    #[test]
    fn test_modifier_paramset_contents() {
        let modifiers = MeshModifiers {
            subdivision: Some(Subdivision {
                scheme: SubdivScheme::Loop,
                levels: 2,
                normal_smooth: true,
                sharp_boundary: false,
            }),
            displacement: Some(Displacement {
                map: "height-tex".to_string(),
                scale: 0.1,
                offset: 0.0,
            }),
        };

        let params = modifiers.to_paramset();
        let names: Vec<&str> = params.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "subdivscheme",
                "nsubdivlevels",
                "dmnormalsmooth",
                "dmsharpboundary",
                "displacementmap",
                "dmscale",
                "dmoffset"
            ]
        );
    }

    #[test]
    fn test_active_uv_layer() {
        let mut mesh = MeshData::new("m");
        mesh.uv_layers.push(UvLayer {
            name: "bake".to_string(),
            active_render: false,
            loops: Vec::new(),
        });
        mesh.uv_layers.push(UvLayer {
            name: "render".to_string(),
            active_render: true,
            loops: Vec::new(),
        });
        assert_eq!(mesh.active_uv_layer().map(|l| l.name.as_str()), Some("render"));
    }
}
