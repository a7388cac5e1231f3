use serde::Serialize;

use crate::plates::{PlateSpec, RoundingPolicy};
use crate::relax::RelaxSettings;

/// Parameters of one solve, in a form that can be dumped as JSON for provenance.
#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    pub geometry: GeometryConfig,
    pub plates: PlateConfig,
    pub numerics: NumericsConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeometryConfig {
    /// Grid linear extent N; the grid has (N+1)^2 nodes.
    pub grid_n: usize,
    /// Physical capacitor extent L.
    pub capacitor_l: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlateConfig {
    pub v_left: f64,
    pub v_right: f64,
    pub rounding: RoundingPolicy,
}

#[derive(Debug, Clone, Serialize)]
pub struct NumericsConfig {
    pub method: String,
    pub tolerance: f64,
    pub max_sweeps: Option<usize>,
    /// Requested worker threads (None = rayon default).
    pub threads: Option<usize>,
}

impl RunConfig {
    pub fn new(n: usize, l: usize, spec: &PlateSpec, settings: &RelaxSettings) -> Self {
        Self {
            geometry: GeometryConfig {
                grid_n: n,
                capacitor_l: l,
            },
            plates: PlateConfig {
                v_left: spec.v_left,
                v_right: spec.v_right,
                rounding: spec.rounding,
            },
            numerics: NumericsConfig {
                method: "jacobi".to_string(),
                tolerance: settings.tolerance,
                max_sweeps: settings.max_sweeps,
                threads: settings.threads,
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_carries_every_parameter() {
        let cfg = RunConfig::new(
            100,
            10,
            &PlateSpec::default(),
            &RelaxSettings::with_tolerance(1e-4),
        );
        let v: serde_json::Value = serde_json::from_str(&cfg.to_json().unwrap()).unwrap();

        assert_eq!(v["geometry"]["grid_n"], 100);
        assert_eq!(v["geometry"]["capacitor_l"], 10);
        assert_eq!(v["plates"]["v_left"], 1.0);
        assert_eq!(v["plates"]["v_right"], -1.0);
        assert_eq!(v["plates"]["rounding"], "floor");
        assert_eq!(v["numerics"]["method"], "jacobi");
        assert_eq!(v["numerics"]["tolerance"], 1e-4);
        assert!(v["numerics"]["max_sweeps"].is_null());
    }
}
