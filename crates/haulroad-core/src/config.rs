//! Tour configuration.
//!
//! Configuration is carried as a JSON value so that partial user files (JSON, JSON5 or YAML) and
//! dotted-path overrides can be layered onto the defaults before being resolved into typed
//! [`TourSettings`].

use crate::format;
use crate::traversal::Traversal;
use crate::visibility::Metric;
use crate::{Error, Result};
use haulroad_layout::{Algorithm, CurveFitOptions, MeanderOptions, OrthogonalOptions, ZigZagOptions};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct TourConfig(Value);

impl Default for TourConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl TourConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self(format::read_path(path)?))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path)?.as_bool()
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // Non-object roots are replaced.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    /// Applies a `key.path=value` override. The value is read as JSON when it parses, and as a
    /// plain string otherwise (so `layout.algorithm=orthogonal` needs no quoting).
    pub fn apply_override(&mut self, assignment: &str) -> Result<()> {
        let Some((path, raw)) = assignment.split_once('=') else {
            return Err(Error::InvalidConfig {
                message: format!("expected key=value, got `{assignment}`"),
            });
        };
        let path = path.trim();
        if path.is_empty() || path.split('.').any(str::is_empty) {
            return Err(Error::InvalidConfig {
                message: format!("invalid key path `{path}`"),
            });
        }
        let value = serde_json::from_str(raw.trim())
            .unwrap_or_else(|_| Value::String(raw.trim().to_string()));
        self.set_value(path, value);
        Ok(())
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    /// Layers this config over the defaults and resolves typed settings.
    pub fn resolve(&self) -> Result<TourSettings> {
        let mut merged = serde_json::to_value(TourSettings::default())?;
        deep_merge_value(&mut merged, &self.0);
        let settings: TourSettings =
            serde_json::from_value(merged).map_err(|err| Error::InvalidConfig {
                message: err.to_string(),
            })?;
        settings.validate()?;
        tracing::debug!(
            algorithm = settings.layout.algorithm().name(),
            traversal = ?settings.traversal.strategy,
            threshold = settings.reveal.threshold,
            "resolved tour settings"
        );
        Ok(settings)
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlgorithmKind {
    #[default]
    ZigZag,
    Orthogonal,
    Meander,
    CurveFit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutSettings {
    pub algorithm: AlgorithmKind,
    pub zig_zag: ZigZagOptions,
    pub orthogonal: OrthogonalOptions,
    pub meander: MeanderOptions,
    pub curve_fit: CurveFitOptions,
    /// Radius of the half circle leaves are fanned on around their node.
    pub leaf_radius: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmKind::default(),
            zig_zag: ZigZagOptions::default(),
            orthogonal: OrthogonalOptions::default(),
            meander: MeanderOptions::default(),
            curve_fit: CurveFitOptions::default(),
            leaf_radius: 1.5,
        }
    }
}

impl LayoutSettings {
    pub fn algorithm(&self) -> Algorithm {
        match self.algorithm {
            AlgorithmKind::ZigZag => Algorithm::ZigZag(self.zig_zag.clone()),
            AlgorithmKind::Orthogonal => Algorithm::Orthogonal(self.orthogonal.clone()),
            AlgorithmKind::Meander => Algorithm::Meander(self.meander.clone()),
            AlgorithmKind::CurveFit => Algorithm::CurveFit(self.curve_fit.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TraversalSettings {
    pub strategy: Traversal,
    /// Movement (or tangent) shorter than this keeps the previous facing.
    pub epsilon: f64,
    /// Height of the rendered marker above the road.
    pub elevation: f64,
    /// Added to the computed yaw, for models whose forward axis is not +Z.
    pub yaw_offset: f64,
    /// Catmull-Rom parameterization used by the curve strategy.
    pub curve_alpha: f64,
}

impl Default for TraversalSettings {
    fn default() -> Self {
        Self {
            strategy: Traversal::default(),
            epsilon: 0.001,
            elevation: 0.2,
            yaw_offset: 1.25,
            curve_alpha: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealSettings {
    pub threshold: f64,
    pub metric: Metric,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            metric: Metric::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TourSettings {
    pub layout: LayoutSettings,
    pub traversal: TraversalSettings,
    pub reveal: RevealSettings,
}

impl TourSettings {
    pub fn validate(&self) -> Result<()> {
        let checks: [(&str, f64, bool); 5] = [
            ("reveal.threshold", self.reveal.threshold, self.reveal.threshold > 0.0),
            ("traversal.epsilon", self.traversal.epsilon, self.traversal.epsilon >= 0.0),
            ("traversal.elevation", self.traversal.elevation, true),
            ("traversal.yawOffset", self.traversal.yaw_offset, true),
            ("layout.leafRadius", self.layout.leaf_radius, self.layout.leaf_radius >= 0.0),
        ];
        for (name, value, ok) in checks {
            if !value.is_finite() || !ok {
                return Err(Error::InvalidConfig {
                    message: format!("`{name}` is out of range: {value}"),
                });
            }
        }
        Ok(())
    }
}
