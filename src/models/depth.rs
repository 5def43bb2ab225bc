use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::path::{Path, PathBuf, is_separator};

use crate::error::{Result, TreeError};
use crate::paths::normalize;

/// How many levels to descend below the first listing.
///
/// `Levels(0)` lists the root's immediate children only. `true` converts to
/// `Unbounded` and `false` to `Levels(0)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Depth {
    Levels(i64),
    Unbounded,
}

impl Default for Depth {
    fn default() -> Self {
        Depth::Levels(0)
    }
}

impl Depth {
    pub(crate) fn validate(self) -> Result<Self> {
        match self {
            Depth::Levels(levels) if levels < 0 => Err(TreeError::invalid(format!(
                "depth can't be less than 0 (got {levels})"
            ))),
            depth => Ok(depth),
        }
    }

    /// Whether a directory reached with this remaining budget gets listed.
    pub(crate) fn allows_listing(self) -> bool {
        match self {
            Depth::Levels(levels) => levels >= 0,
            Depth::Unbounded => true,
        }
    }

    /// Budget left for the children of a directory visited with `self`.
    pub(crate) fn descend(self) -> Self {
        match self {
            Depth::Levels(levels) => Depth::Levels(levels.saturating_sub(1)),
            Depth::Unbounded => Depth::Unbounded,
        }
    }
}

impl From<bool> for Depth {
    fn from(unbounded: bool) -> Self {
        if unbounded {
            Depth::Unbounded
        } else {
            Depth::Levels(0)
        }
    }
}

impl From<i64> for Depth {
    fn from(levels: i64) -> Self {
        Depth::Levels(levels)
    }
}

impl From<i32> for Depth {
    fn from(levels: i32) -> Self {
        Depth::Levels(i64::from(levels))
    }
}

impl From<u32> for Depth {
    fn from(levels: u32) -> Self {
        Depth::Levels(i64::from(levels))
    }
}

impl From<usize> for Depth {
    fn from(levels: usize) -> Self {
        i64::try_from(levels).map_or(Depth::Unbounded, Depth::Levels)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Depth::Levels(levels) => write!(f, "{levels}"),
            Depth::Unbounded => f.write_str("unbounded"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DepthValue {
    Depth(Depth),
    Nested(DepthMap),
}

/// A declarative, possibly nested, list of directories to build.
///
/// Nested keys are joined onto their parent's key as path segments. Order is
/// preserved and drives the order of the built trees.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DepthMap {
    entries: Vec<(String, DepthValue)>,
}

impl DepthMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(mut self, key: impl Into<String>, depth: impl Into<Depth>) -> Self {
        self.entries
            .push((key.into(), DepthValue::Depth(depth.into())));
        self
    }

    pub fn nested(mut self, key: impl Into<String>, map: DepthMap) -> Self {
        self.entries.push((key.into(), DepthValue::Nested(map)));
        self
    }

    /// Resolve nesting into one `(path, depth)` list.
    ///
    /// Paths are lexically normalized. A path seen twice keeps the position of
    /// its first occurrence and the depth of its last.
    pub fn flatten(&self) -> Vec<(PathBuf, Depth)> {
        let mut flat = Vec::new();
        self.flatten_into(Path::new(""), &mut flat);
        flat
    }

    fn flatten_into(&self, prefix: &Path, flat: &mut Vec<(PathBuf, Depth)>) {
        for (key, value) in &self.entries {
            let joined = if prefix.as_os_str().is_empty() {
                PathBuf::from(key)
            } else {
                prefix.join(key.trim_start_matches(is_separator))
            };

            match value {
                DepthValue::Depth(depth) => {
                    let path = normalize(&joined);
                    match flat.iter_mut().find(|(existing, _)| *existing == path) {
                        Some(slot) => slot.1 = *depth,
                        None => flat.push((path, *depth)),
                    }
                }
                DepthValue::Nested(map) => map.flatten_into(&joined, flat),
            }
        }
    }
}

struct DepthValueVisitor;

impl<'de> Visitor<'de> for DepthValueVisitor {
    type Value = DepthValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, an integer depth, or a nested map of paths")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(DepthValue::Depth(value.into()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(DepthValue::Depth(value.into()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        i64::try_from(value)
            .map(|levels| DepthValue::Depth(levels.into()))
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        DepthMapVisitor.visit_map(map).map(DepthValue::Nested)
    }
}

impl<'de> Deserialize<'de> for DepthValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DepthValueVisitor)
    }
}

struct DepthMapVisitor;

impl<'de> Visitor<'de> for DepthMapVisitor {
    type Value = DepthMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of paths to depths")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, DepthValue>()? {
            entries.push((key, value));
        }
        Ok(DepthMap { entries })
    }
}

impl<'de> Deserialize<'de> for DepthMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DepthMapVisitor)
    }
}
