//! Per-part placement and deformation configuration.
//!
//! The part document is a map from part identifier to [`PartConfig`], read from
//! JSON or RON. Document order is kept because it decides the order in which
//! parts consume the shared random stream.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use glam::DVec3;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, NotFoundError, ValidationError};

/// Document syntax of a configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `serde_json`.
    Json,
    /// `ron`.
    Ron,
}

impl ConfigFormat {
    /// Pick the format from a file extension (`.json` or `.ron`, any case).
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Placement and deformation settings for one part.
///
/// Missing fields fall back to the identity transform and no deformations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartConfig {
    /// World-space translation of the part group.
    #[serde(alias = "posicion")]
    pub position: DVec3,
    /// Rotation in degrees, extrinsic XYZ.
    #[serde(alias = "rotacion")]
    pub rotation: DVec3,
    /// Per-axis scale of the part group.
    #[serde(alias = "escala")]
    pub scale: DVec3,
    /// Deformations applied after placement, in list order.
    #[serde(rename = "deformaciones", alias = "deformations")]
    pub deformations: Vec<DeformationSpec>,
}

impl PartConfig {
    /// Identity placement with no deformations.
    pub const IDENTITY: Self = Self {
        position: DVec3::ZERO,
        rotation: DVec3::ZERO,
        scale: DVec3::ONE,
        deformations: Vec::new(),
    };
}

impl PartConfig {
    /// Reject non-finite placement values and a scale with a zero axis.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.position.is_finite() {
            return Err(ValidationError::NonFiniteValue("position"));
        }
        if !self.rotation.is_finite() {
            return Err(ValidationError::NonFiniteValue("rotation"));
        }
        if !self.scale.is_finite() {
            return Err(ValidationError::NonFiniteValue("scale"));
        }
        if self.scale.cmpeq(DVec3::ZERO).any() {
            return Err(ValidationError::ZeroScaleAxis("part"));
        }
        Ok(())
    }
}

impl Default for PartConfig {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One randomized scaling of a named selection group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeformationSpec {
    /// Name of the selection group (points or edges) to scale.
    #[serde(rename = "selection_set", alias = "selection_group")]
    pub selection_group: String,
    /// Inactive specs are skipped.
    #[serde(rename = "activo", alias = "active")]
    pub active: bool,
    /// Scale before the random factor is applied.
    #[serde(rename = "escala", alias = "base_scale")]
    pub base_scale: DVec3,
    /// Bounds of the random factor shared by all axes.
    #[serde(rename = "rango_random", alias = "random_range")]
    pub random_range: RandomRange,
    /// Axes that receive the scale; masked axes stay at 1.0.
    #[serde(rename = "ejes", alias = "axis_mask")]
    pub axis_mask: AxisMask,
}

impl Default for DeformationSpec {
    fn default() -> Self {
        Self {
            selection_group: String::new(),
            active: true,
            base_scale: DVec3::ONE,
            random_range: RandomRange::default(),
            axis_mask: AxisMask::ALL,
        }
    }
}

impl DeformationSpec {
    /// Check the numeric fields of this spec.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_scale.is_finite() {
            return Err(ValidationError::NonFiniteValue("base scale"));
        }
        self.random_range.validate()
    }

    /// Combine the base scale, a sampled factor and the axis mask.
    pub fn final_scale(&self, factor: f64) -> DVec3 {
        let pick = |enabled: bool, base: f64| if enabled { base * factor } else { 1.0 };
        DVec3::new(
            pick(self.axis_mask.x, self.base_scale.x),
            pick(self.axis_mask.y, self.base_scale.y),
            pick(self.axis_mask.z, self.base_scale.z),
        )
    }
}

/// Closed interval `[min, max]` for a random scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct RandomRange {
    /// Lower bound, must be > 0.
    pub min: f64,
    /// Upper bound, must be >= `min`.
    pub max: f64,
}

impl RandomRange {
    /// Create a range without validating it.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Reject non-finite, non-positive or inverted bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ValidationError::NonFiniteValue("random range"));
        }
        if self.min <= 0.0 {
            return Err(ValidationError::NonPositiveRangeMin(self.min));
        }
        if self.min > self.max {
            return Err(ValidationError::InvertedRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Whether `value` lies inside the closed interval.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for RandomRange {
    fn default() -> Self {
        Self::new(0.9, 1.1)
    }
}

impl From<(f64, f64)> for RandomRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

impl From<RandomRange> for (f64, f64) {
    fn from(range: RandomRange) -> Self {
        (range.min, range.max)
    }
}

/// Which axes a deformation scales.
///
/// Reads either booleans or numbers (non-zero means enabled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[AxisFlag; 3]", into = "[bool; 3]")]
pub struct AxisMask {
    /// X axis enabled.
    pub x: bool,
    /// Y axis enabled.
    pub y: bool,
    /// Z axis enabled.
    pub z: bool,
}

impl AxisMask {
    /// Every axis enabled.
    pub const ALL: Self = Self::new(true, true, true);

    /// Create a mask from per-axis flags.
    pub const fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z }
    }
}

impl Default for AxisMask {
    fn default() -> Self {
        Self::ALL
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AxisFlag {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl AxisFlag {
    fn enabled(&self) -> bool {
        match *self {
            AxisFlag::Bool(b) => b,
            AxisFlag::Int(i) => i != 0,
            AxisFlag::Float(f) => f != 0.0,
        }
    }
}

impl From<[AxisFlag; 3]> for AxisMask {
    fn from([x, y, z]: [AxisFlag; 3]) -> Self {
        Self::new(x.enabled(), y.enabled(), z.enabled())
    }
}

impl From<AxisMask> for [bool; 3] {
    fn from(mask: AxisMask) -> Self {
        [mask.x, mask.y, mask.z]
    }
}

static IDENTITY_PART: PartConfig = PartConfig::IDENTITY;

/// All part configurations of one generation pass, in document order.
///
/// Read-only once loaded; safe to share by reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    parts: Vec<(String, PartConfig)>,
    index: HashMap<String, usize>,
}

impl Configuration {
    /// Load and validate a part document. The format follows the file extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config = Self::parse(&contents, format)?;
        log::info!(
            "Loaded {} part configuration(s) from {}",
            config.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parse and validate a part document held in memory.
    pub fn parse(source: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let PartEntries(entries) = match format {
            ConfigFormat::Json => {
                serde_json::from_str(source).map_err(ConfigError::JsonParseError)?
            }
            ConfigFormat::Ron => ron::from_str(source).map_err(ConfigError::RonParseError)?,
        };
        Self::from_parts(entries)
    }

    /// Build a configuration from `(identifier, part)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicatePart`] on a repeated identifier,
    /// [`ConfigError::InvalidPart`] on a bad placement and
    /// [`ConfigError::InvalidDeformation`] on the first deformation that fails
    /// validation.
    pub fn from_parts(
        entries: impl IntoIterator<Item = (String, PartConfig)>,
    ) -> Result<Self, ConfigError> {
        let mut parts = Vec::new();
        let mut index = HashMap::new();
        for (id, part) in entries {
            if index.contains_key(&id) {
                return Err(ConfigError::DuplicatePart(id));
            }
            part.validate().map_err(|source| ConfigError::InvalidPart {
                part: id.clone(),
                source,
            })?;
            for (i, spec) in part.deformations.iter().enumerate() {
                spec.validate()
                    .map_err(|source| ConfigError::InvalidDeformation {
                        part: id.clone(),
                        index: i,
                        source,
                    })?;
            }
            index.insert(id.clone(), parts.len());
            parts.push((id, part));
        }
        Ok(Self { parts, index })
    }

    /// Look up one part.
    pub fn get_part(&self, id: &str) -> Result<&PartConfig, NotFoundError> {
        self.index
            .get(id)
            .map(|&i| &self.parts[i].1)
            .ok_or_else(|| NotFoundError::Part(id.to_string()))
    }

    /// Look up one part, falling back to the identity placement.
    pub fn part_or_identity(&self, id: &str) -> &PartConfig {
        self.get_part(id).unwrap_or(&IDENTITY_PART)
    }

    /// Part identifiers in document order.
    pub fn part_ids(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(id, _)| id.as_str())
    }

    /// `(identifier, part)` pairs in document order.
    pub fn parts(&self) -> impl Iterator<Item = (&str, &PartConfig)> {
        self.parts.iter().map(|(id, part)| (id.as_str(), part))
    }

    /// Number of configured parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` if no parts are configured.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.parts.len()))?;
        for (id, part) in &self.parts {
            map.serialize_entry(id, part)?;
        }
        map.end()
    }
}

/// Top-level map read entry by entry so document order and duplicates survive.
struct PartEntries(Vec<(String, PartConfig)>);

impl<'de> Deserialize<'de> for PartEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = PartEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from part identifier to part configuration")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<PartEntries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, PartConfig>()? {
                    entries.push(entry);
                }
                Ok(PartEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
