//! Flat dotted-key property store, the renderer-facing output protocol.
//!
//! Converters emit `scene.objects.box.material = mat_001` style entries.
//! [`Properties::set`] overwrites an existing key in place and appends new
//! keys, so iteration and rendering follow first-insertion order and the
//! output stays diff-stable across repeated exports.

use std::collections::HashMap;
use std::fmt;

use glam::Vec3;

/// A property value: scalar or homogeneous list.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bools(Vec<bool>),
    Ints(Vec<i64>),
    Floats(Vec<f64>),
    Strs(Vec<String>),
}

impl PropValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            Self::Floats(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        match self {
            Self::Bool(b) => write!(f, "{}", u8::from(*b)),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Bools(v) => {
                let bits: Vec<u8> = v.iter().map(|b| u8::from(*b)).collect();
                join(f, &bits)
            }
            Self::Ints(v) => join(f, v),
            Self::Floats(v) => join(f, v),
            Self::Strs(v) => {
                let quoted: Vec<String> = v.iter().map(|s| format!("\"{s}\"")).collect();
                join(f, &quoted)
            }
        }
    }
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for PropValue {
    fn from(v: u32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for PropValue {
    fn from(v: f32) -> Self {
        Self::Float(v as f64)
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<f64>> for PropValue {
    fn from(v: Vec<f64>) -> Self {
        Self::Floats(v)
    }
}

impl From<[f32; 3]> for PropValue {
    fn from(v: [f32; 3]) -> Self {
        Self::Floats(v.iter().map(|x| *x as f64).collect())
    }
}

impl From<[f64; 4]> for PropValue {
    fn from(v: [f64; 4]) -> Self {
        Self::Floats(v.to_vec())
    }
}

impl From<Vec3> for PropValue {
    fn from(v: Vec3) -> Self {
        Self::Floats(vec![v.x as f64, v.y as f64, v.z as f64])
    }
}

/// Insertion-ordered key/value store for renderer properties.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    entries: Vec<(String, PropValue)>,
    index: HashMap<String, usize>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key. An existing key keeps its position and gets the new
    /// value; a new key is appended.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
        self
    }

    /// Merge all entries of another store into this one, in its order.
    pub fn update(&mut self, other: &Properties) -> &mut Self {
        for (key, value) in &other.entries {
            self.set(key.clone(), value.clone());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn has(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.entries {
            writeln!(f, "{key} = {value}")?;
        }
        Ok(())
    }
}

/// Collapse every run of characters outside `[_0-9a-zA-Z]` into a single
/// underscore, yielding a renderer-legal name.
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c == '_' || c.is_ascii_alphanumeric() {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}
