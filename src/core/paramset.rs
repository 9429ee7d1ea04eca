//! Typed parameter lists for the legacy text scene format.
//!
//! A [`ParamSet`] is an insertion-ordered list of name/value pairs rendered
//! as `"type name" [values]` lines. Adding under an existing name replaces
//! the value in place, so repeated exports of the same scene stay
//! diff-stable.

use std::collections::HashMap;
use std::fmt;

use glam::Vec3;

/// Payload of a single parameter.
///
/// The typed adders on [`ParamSet`] cover every kind the scene format
/// accepts. [`ParamSetItem::from_legacy`] is the only way to hold an
/// unrecognized kind; such items render as a comment line instead of
/// failing.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Floats(Vec<f32>),
    Integer(i32),
    Integers(Vec<i32>),
    Bool(bool),
    String(String),
    Strings(Vec<String>),
    /// Flattened xyz triples
    Point(Vec<f32>),
    /// Flattened xyz triples
    Vector(Vec<f32>),
    /// Flattened xyz triples
    Normal(Vec<f32>),
    Color([f32; 3]),
    Texture(String),
    /// Unrecognized legacy kind, kept verbatim
    Unknown { kind: String, payload: String },
}

impl ParamValue {
    /// Wire type token for this payload.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Float(_) | Self::Floats(_) => "float",
            Self::Integer(_) | Self::Integers(_) => "integer",
            Self::Bool(_) => "bool",
            Self::String(_) | Self::Strings(_) => "string",
            Self::Point(_) => "point",
            Self::Vector(_) => "vector",
            Self::Normal(_) => "normal",
            Self::Color(_) => "color",
            Self::Texture(_) => "texture",
            Self::Unknown { kind, .. } => kind,
        }
    }

    /// Byte-size contribution of the payload. Parameter names are free;
    /// floats and integers count 4 bytes per element, strings their length.
    fn payload_size(&self) -> usize {
        match self {
            Self::Float(_) | Self::Integer(_) => 4,
            Self::Floats(v) => v.len() * 4,
            Self::Integers(v) => v.len() * 4,
            Self::Bool(b) => if *b { 4 } else { 5 },
            Self::String(s) | Self::Texture(s) => s.len(),
            Self::Strings(v) => v.iter().map(|s| s.len()).sum(),
            Self::Point(v) | Self::Vector(v) | Self::Normal(v) => v.len() * 4,
            Self::Color(_) => 12,
            Self::Unknown { payload, .. } => payload.len(),
        }
    }
}

/// One named parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSetItem {
    pub name: String,
    pub value: ParamValue,
}

impl ParamSetItem {
    pub fn new(name: impl Into<String>, value: ParamValue) -> Self {
        Self { name: name.into(), value }
    }

    /// Build an item from legacy `(kind, name, payload)` strings.
    ///
    /// Known kinds parse into their typed payload. An unknown kind, or a
    /// payload that does not parse for its kind, is kept verbatim and
    /// renders as a `# unknown param` comment. This constructor never
    /// fails.
    pub fn from_legacy(kind: &str, name: impl Into<String>, payload: &str) -> Self {
        let value = Self::parse_legacy(kind, payload).unwrap_or_else(|| ParamValue::Unknown {
            kind: kind.to_string(),
            payload: payload.to_string(),
        });
        Self { name: name.into(), value }
    }

    fn parse_legacy(kind: &str, payload: &str) -> Option<ParamValue> {
        fn floats(payload: &str) -> Option<Vec<f32>> {
            payload.split_whitespace().map(|t| t.parse().ok()).collect()
        }

        match kind {
            "float" => payload.parse().ok().map(ParamValue::Float),
            "integer" => payload.parse().ok().map(ParamValue::Integer),
            "bool" => match payload {
                "true" => Some(ParamValue::Bool(true)),
                "false" => Some(ParamValue::Bool(false)),
                _ => None,
            },
            "string" => Some(ParamValue::String(payload.to_string())),
            "texture" => Some(ParamValue::Texture(payload.to_string())),
            "point" => floats(payload).map(ParamValue::Point),
            "vector" => floats(payload).map(ParamValue::Vector),
            "normal" => floats(payload).map(ParamValue::Normal),
            "color" => {
                let c: [f32; 3] = floats(payload)?.try_into().ok()?;
                Some(ParamValue::Color(c))
            }
            _ => None,
        }
    }

    /// Deterministic byte estimate: 100 bytes of fixed overhead plus the
    /// payload accounting of [`ParamValue`].
    pub fn size_estimate(&self) -> usize {
        100 + self.value.payload_size()
    }
}

fn join_floats(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.15}"))
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for ParamSetItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.name;
        match &self.value {
            ParamValue::Unknown { kind, payload } => {
                write!(f, "# unknown param ({kind}, {name}, {payload})")
            }
            ParamValue::Float(v) => write!(f, "\"float {name}\" [{v:.15}]"),
            ParamValue::Floats(vs) => write!(f, "\"float {name}\" [{}]", join_floats(vs)),
            ParamValue::Integer(v) => write!(f, "\"integer {name}\" [{v}]"),
            ParamValue::Integers(vs) => {
                let joined = vs.iter().map(i32::to_string).collect::<Vec<_>>().join(" ");
                write!(f, "\"integer {name}\" [{joined}]")
            }
            ParamValue::Bool(b) => write!(f, "\"bool {name}\" [\"{b}\"]"),
            ParamValue::String(s) => write!(f, "\"string {name}\" [\"{s}\"]"),
            ParamValue::Strings(ss) => {
                let joined = ss
                    .iter()
                    .map(|s| format!("\"{s}\""))
                    .collect::<Vec<_>>()
                    .join("\n");
                write!(f, "\"string {name}\" [{joined}]")
            }
            ParamValue::Point(vs) => write!(f, "\"point {name}\" [{}]", join_floats(vs)),
            ParamValue::Vector(vs) => write!(f, "\"vector {name}\" [{}]", join_floats(vs)),
            ParamValue::Normal(vs) => write!(f, "\"normal {name}\" [{}]", join_floats(vs)),
            ParamValue::Color(c) => {
                write!(f, "\"color {name}\" [{:.8} {:.8} {:.8}]", c[0], c[1], c[2])
            }
            ParamValue::Texture(s) => write!(f, "\"texture {name}\" [\"{s}\"]"),
        }
    }
}

/// Insertion-ordered parameter list with a name index for duplicate
/// detection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSet {
    items: Vec<ParamSetItem>,
    index: HashMap<String, usize>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. An existing name keeps its position and gets the new
    /// value; a new name is appended.
    pub fn add(&mut self, name: impl Into<String>, value: ParamValue) -> &mut Self {
        let name = name.into();
        match self.index.get(&name) {
            Some(&slot) => self.items[slot].value = value,
            None => {
                self.index.insert(name.clone(), self.items.len());
                self.items.push(ParamSetItem { name, value });
            }
        }
        self
    }

    pub fn add_float(&mut self, name: impl Into<String>, value: f32) -> &mut Self {
        self.add(name, ParamValue::Float(value))
    }

    pub fn add_floats(&mut self, name: impl Into<String>, values: impl Into<Vec<f32>>) -> &mut Self {
        self.add(name, ParamValue::Floats(values.into()))
    }

    pub fn add_integer(&mut self, name: impl Into<String>, value: i32) -> &mut Self {
        self.add(name, ParamValue::Integer(value))
    }

    pub fn add_integers(&mut self, name: impl Into<String>, values: impl Into<Vec<i32>>) -> &mut Self {
        self.add(name, ParamValue::Integers(values.into()))
    }

    pub fn add_bool(&mut self, name: impl Into<String>, value: bool) -> &mut Self {
        self.add(name, ParamValue::Bool(value))
    }

    pub fn add_string(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.add(name, ParamValue::String(value.into()))
    }

    pub fn add_strings(&mut self, name: impl Into<String>, values: Vec<String>) -> &mut Self {
        self.add(name, ParamValue::Strings(values))
    }

    /// Flattens the points into xyz triples.
    pub fn add_point(&mut self, name: impl Into<String>, points: &[Vec3]) -> &mut Self {
        self.add(name, ParamValue::Point(bytemuck::cast_slice(points).to_vec()))
    }

    /// Flattens the vectors into xyz triples.
    pub fn add_vector(&mut self, name: impl Into<String>, vectors: &[Vec3]) -> &mut Self {
        self.add(name, ParamValue::Vector(bytemuck::cast_slice(vectors).to_vec()))
    }

    /// Flattens the normals into xyz triples.
    pub fn add_normal(&mut self, name: impl Into<String>, normals: &[Vec3]) -> &mut Self {
        self.add(name, ParamValue::Normal(bytemuck::cast_slice(normals).to_vec()))
    }

    pub fn add_color(&mut self, name: impl Into<String>, color: [f32; 3]) -> &mut Self {
        self.add(name, ParamValue::Color(color))
    }

    pub fn add_texture(&mut self, name: impl Into<String>, texture: impl Into<String>) -> &mut Self {
        self.add(name, ParamValue::Texture(texture.into()))
    }

    /// Merge another set into this one, item by item, under the same
    /// replace-in-place rule as [`ParamSet::add`].
    pub fn update(&mut self, other: &ParamSet) -> &mut Self {
        for item in &other.items {
            self.add(item.name.clone(), item.value.clone());
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamSetItem> {
        self.index.get(name).map(|&slot| &self.items[slot])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParamSetItem> {
        self.items.iter()
    }

    /// Sum of the per-item byte estimates.
    pub fn size_estimate(&self) -> usize {
        self.items.iter().map(ParamSetItem::size_estimate).sum()
    }
}

impl fmt::Display for ParamSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ParamSet {
    type Item = &'a ParamSetItem;
    type IntoIter = std::slice::Iter<'a, ParamSetItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
