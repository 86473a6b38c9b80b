use crate::error::ConfigError;
use crate::geometry::{GeometryLookup, NodeGeometry};
use crate::graph::NodeKind;
use crate::path::PathStyle;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;

/// What happens to incident edges when a node is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeletePolicy {
    /// Edges stay in storage and dangle until pruned explicitly.
    #[default]
    RetainEdges,
    /// Edges touching the node are removed with it.
    Cascade,
}

/// Canvas configuration. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    pub geometry: NodeGeometry,
    /// Geometry for kinds that render at a different size than `geometry`.
    pub kind_overrides: AHashMap<NodeKind, NodeGeometry>,
    pub path: PathStyle,
    pub delete_policy: DeletePolicy,
    pub memoize_geometry: bool,
    /// Rounding step for memoized geometry keys, in canvas units.
    pub geometry_tolerance: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            geometry: NodeGeometry::default(),
            kind_overrides: AHashMap::new(),
            path: PathStyle::default(),
            delete_policy: DeletePolicy::default(),
            memoize_geometry: false,
            geometry_tolerance: 0.5,
        }
    }
}

impl CanvasConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CanvasConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_geometry("geometry", &self.geometry)?;
        for (kind, geometry) in &self.kind_overrides {
            validate_geometry(&format!("kindOverrides.{}", kind), geometry)?;
        }

        let path = &self.path;
        if !is_non_negative(path.curvature) {
            return Err(ConfigError::invalid("path.curvature", "must be a non-negative number"));
        }
        if !is_non_negative(path.max_offset) {
            return Err(ConfigError::invalid("path.maxOffset", "must be a non-negative number"));
        }
        if !is_positive(path.stroke_width) {
            return Err(ConfigError::invalid("path.strokeWidth", "must be positive"));
        }
        if !(is_positive(path.hit_width) && path.hit_width >= path.stroke_width) {
            return Err(ConfigError::invalid(
                "path.hitWidth",
                "must be at least as wide as the stroke",
            ));
        }
        if !(0.0..=1.0).contains(&path.peak_opacity) {
            return Err(ConfigError::invalid("path.peakOpacity", "must lie within [0, 1]"));
        }
        if !(0.0 < path.fade_in && path.fade_in < 0.5 && 0.5 < path.fade_out && path.fade_out < 1.0)
        {
            return Err(ConfigError::invalid(
                "path.fadeIn/fadeOut",
                "must satisfy 0 < fadeIn < 0.5 < fadeOut < 1",
            ));
        }
        if !is_non_negative(path.arrow_size) {
            return Err(ConfigError::invalid("path.arrowSize", "must not be negative"));
        }
        if !is_positive(self.geometry_tolerance) {
            return Err(ConfigError::invalid("geometryTolerance", "must be positive"));
        }
        Ok(())
    }
}

impl GeometryLookup for CanvasConfig {
    fn geometry_for(&self, kind: NodeKind) -> NodeGeometry {
        self.kind_overrides
            .get(&kind)
            .copied()
            .unwrap_or(self.geometry)
    }
}

fn validate_geometry(field: &str, geometry: &NodeGeometry) -> Result<(), ConfigError> {
    if !is_non_negative(geometry.padding) {
        return Err(ConfigError::invalid(
            &format!("{}.padding", field),
            "must not be negative",
        ));
    }
    if !is_positive(geometry.icon_radius) {
        return Err(ConfigError::invalid(
            &format!("{}.iconRadius", field),
            "must be positive",
        ));
    }
    if !is_positive(geometry.perimeter_radius) {
        return Err(ConfigError::invalid(
            &format!("{}.perimeterRadius", field),
            "must be positive",
        ));
    }
    Ok(())
}

// Both reject NaN and infinities.
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
