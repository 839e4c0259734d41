//! Area files: conversion between rings and the `.enum` area document.
//!
//! An area document is YAML:
//!
//! ```yaml
//! inputType: int
//! outputType: coordinate
//! default: -1
//! values:
//!   "0": "0_16_32_0_63"
//!   "1": "0_17_32_5_60"
//! ```
//!
//! `defaultValue` is accepted in place of `default`. `values` is kept in
//! document order on both read and write.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use super::error::AreaError;
use super::ring::PolygonRing;
use super::transform::CoordinateTransform;

pub const AREA_FILE_EXTENSION: &str = "enum";

/// Fixed header fields written with every area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaMetadata {
    pub input_type: String,
    pub output_type: String,
    pub default_value: i64,
}

impl Default for AreaMetadata {
    fn default() -> Self {
        Self {
            input_type: "int".to_string(),
            output_type: "coordinate".to_string(),
            default_value: -1,
        }
    }
}

/// Ordered `index -> coordinate` entries of an area document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AreaValues(pub Vec<(String, String)>);

impl AreaValues {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn coordinates(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, coord)| coord.as_str())
    }
}

impl Serialize for AreaValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct AreaValuesVisitor;

impl<'de> Visitor<'de> for AreaValuesVisitor {
    type Value = AreaValues;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of index to coordinate string")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, String>()? {
            entries.push((key, value));
        }
        Ok(AreaValues(entries))
    }
}

impl<'de> Deserialize<'de> for AreaValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AreaValuesVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaRecord {
    pub input_type: String,
    pub output_type: String,
    #[serde(rename = "default", alias = "defaultValue")]
    pub default_value: i64,
    pub values: AreaValues,
}

/// A record together with the name it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedArea {
    pub name: String,
    pub record: AreaRecord,
}

/// Builds the area document for `ring`. Every vertex is emitted in order,
/// including the closing vertex that repeats the first.
pub fn export(
    ring: &PolygonRing,
    transform: &CoordinateTransform,
    name: &str,
    metadata: &AreaMetadata,
) -> Result<ExportedArea, AreaError> {
    let name = sanitize_area_name(name);
    if name.is_empty() {
        return Err(AreaError::EmptyName);
    }

    let values = ring
        .vertices()
        .iter()
        .enumerate()
        .map(|(i, vertex)| (i.to_string(), transform.to_game_coordinate(*vertex).to_string()))
        .collect();

    Ok(ExportedArea {
        name,
        record: AreaRecord {
            input_type: metadata.input_type.clone(),
            output_type: metadata.output_type.clone(),
            default_value: metadata.default_value,
            values: AreaValues(values),
        },
    })
}

/// Rebuilds a ring from an area document. Any bad coordinate fails the
/// whole import.
pub fn import(
    record: &AreaRecord,
    transform: &CoordinateTransform,
) -> Result<PolygonRing, AreaError> {
    let vertices = record
        .values
        .coordinates()
        .map(|coord| transform.parse_pixel(coord))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(vertices.into_iter().collect())
}

/// Restricts a user-supplied area name to characters safe in a file name.
pub fn sanitize_area_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn area_file_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{AREA_FILE_EXTENSION}"))
}

/// Writes `<dir>/<name>.enum`, creating `dir` if needed.
pub fn write_area_file(dir: &Path, area: &ExportedArea) -> Result<PathBuf, AreaError> {
    std::fs::create_dir_all(dir).map_err(|source| AreaError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = area_file_path(dir, &area.name);
    let yaml = serde_yaml::to_string(&area.record).map_err(|source| AreaError::Format {
        path: path.clone(),
        source,
    })?;
    std::fs::write(&path, yaml).map_err(|source| AreaError::Io {
        path: path.clone(),
        source,
    })?;

    debug!("Wrote {} coordinates to {:?}", area.record.values.len(), path);
    Ok(path)
}

pub fn read_area_file(path: &Path) -> Result<AreaRecord, AreaError> {
    let contents = std::fs::read_to_string(path).map_err(|source| AreaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&contents).map_err(|source| AreaError::Format {
        path: path.to_path_buf(),
        source,
    })
}
