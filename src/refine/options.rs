//! Parameters controlling one refinement cycle.
use crate::fields::{EdgePotentialOptions, ObservationOptions};
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RefineOptions {
    /// Pixel step used for every axis warp.
    pub step_px: f64,
    /// Turns a rendered projection into the attraction field.
    pub edge_potential: EdgePotentialOptions,
    /// Turns the event surface into the evidence field.
    pub observation: ObservationOptions,
}

impl Default for RefineOptions {
    fn default() -> Self {
        Self {
            step_px: 8.0,
            edge_potential: EdgePotentialOptions::default(),
            observation: ObservationOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let opts: RefineOptions =
            serde_json::from_str(r#"{ "step_px": 4.0, "edge_potential": { "blur": 20 } }"#)
                .expect("parse");
        assert_eq!(opts.step_px, 4.0);
        assert_eq!(opts.edge_potential.blur, 20);
        assert_eq!(opts.edge_potential.canny_high, 120.0);
        assert_eq!(opts.observation.blur, 7);
    }
}
