//! Loading of JSON-described dense models from a file path or URL.
//!
//! The model format is a plain feed-forward network: a list of dense layers,
//! each with a row-per-output weight matrix, a bias vector, and an
//! activation. Small enough to hand-write, expressive enough to export a
//! trained classifier head into.
//!
//! ```json
//! {
//!   "layers": [
//!     { "weights": [[...], ...], "bias": [...], "activation": "relu" },
//!     { "weights": [[...], ...], "bias": [...], "activation": "softmax" }
//!   ]
//! }
//! ```

use serde::Deserialize;
use std::path::Path;

use super::{GenreModel, ModelProvider};
use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Activation {
    Linear,
    Relu,
    Sigmoid,
    Softmax,
}

#[derive(Debug, Deserialize)]
struct DenseLayer {
    /// One row per output unit; row length is the layer's input width.
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
    #[serde(default = "default_activation")]
    activation: Activation,
}

fn default_activation() -> Activation {
    Activation::Linear
}

/// A feed-forward network deserialized from JSON.
#[derive(Debug, Deserialize)]
pub struct DenseModel {
    layers: Vec<DenseLayer>,
}

impl DenseModel {
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: DenseModel = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Reject inconsistent shapes at load time so `predict` can't fail
    /// midway through a forward pass.
    fn validate(&self) -> Result<(), ModelError> {
        if self.layers.is_empty() {
            return Err(ModelError::BadLayer {
                layer: 0,
                reason: "model has no layers".into(),
            });
        }
        let mut width = None;
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.weights.is_empty() {
                return Err(ModelError::BadLayer {
                    layer: i,
                    reason: "empty weight matrix".into(),
                });
            }
            let in_dim = layer.weights[0].len();
            if layer.weights.iter().any(|row| row.len() != in_dim) {
                return Err(ModelError::BadLayer {
                    layer: i,
                    reason: "ragged weight matrix".into(),
                });
            }
            if layer.bias.len() != layer.weights.len() {
                return Err(ModelError::BadLayer {
                    layer: i,
                    reason: format!(
                        "bias length {} does not match {} output units",
                        layer.bias.len(),
                        layer.weights.len()
                    ),
                });
            }
            if let Some(prev_out) = width {
                if in_dim != prev_out {
                    return Err(ModelError::BadLayer {
                        layer: i,
                        reason: format!(
                            "expects {in_dim} inputs but previous layer produces {prev_out}"
                        ),
                    });
                }
            }
            width = Some(layer.weights.len());
        }
        Ok(())
    }
}

impl GenreModel for DenseModel {
    fn predict(&self, input: &[f32]) -> Result<Vec<f32>, ModelError> {
        let first_in = self.layers[0].weights[0].len();
        if input.len() != first_in {
            return Err(ModelError::InputShape {
                got: input.len(),
                expected: first_in,
            });
        }

        let mut activations = input.to_vec();
        for layer in &self.layers {
            let mut out: Vec<f32> = layer
                .weights
                .iter()
                .zip(&layer.bias)
                .map(|(row, b)| {
                    row.iter().zip(&activations).map(|(w, x)| w * x).sum::<f32>() + b
                })
                .collect();
            apply_activation(layer.activation, &mut out);
            activations = out;
        }
        Ok(activations)
    }
}

fn apply_activation(activation: Activation, values: &mut [f32]) {
    match activation {
        Activation::Linear => {}
        Activation::Relu => {
            for v in values.iter_mut() {
                *v = v.max(0.0);
            }
        }
        Activation::Sigmoid => {
            for v in values.iter_mut() {
                *v = 1.0 / (1.0 + (-*v).exp());
            }
        }
        Activation::Softmax => {
            let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            let mut sum = 0.0;
            for v in values.iter_mut() {
                *v = (*v - max).exp();
                sum += *v;
            }
            for v in values.iter_mut() {
                *v /= sum;
            }
        }
    }
}

/// Loads [`DenseModel`]s from `http(s)://` URLs or local paths.
pub struct JsonModelProvider;

impl JsonModelProvider {
    pub fn new() -> Self {
        Self
    }

    fn fetch(&self, handle: &str) -> Result<String, ModelError> {
        if handle.starts_with("http://") || handle.starts_with("https://") {
            let fetch_err = |source| ModelError::Fetch {
                url: handle.to_string(),
                source,
            };
            log::info!("fetching model from {handle}");
            reqwest::blocking::get(handle)
                .map_err(fetch_err)?
                .error_for_status()
                .map_err(fetch_err)?
                .text()
                .map_err(fetch_err)
        } else {
            std::fs::read_to_string(Path::new(handle)).map_err(|source| ModelError::Read {
                path: handle.to_string(),
                source,
            })
        }
    }
}

impl Default for JsonModelProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelProvider for JsonModelProvider {
    fn load(&self, handle: &str) -> Result<Box<dyn GenreModel>, ModelError> {
        let json = self.fetch(handle)?;
        let model = DenseModel::from_json(&json)?;
        log::info!("loaded model with {} layers from {handle}", model.layers.len());
        Ok(Box::new(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_layer_passes_input_through() {
        let model = DenseModel::from_json(
            r#"{"layers": [{
                "weights": [[1,0,0],[0,1,0],[0,0,1],[0,0,0]],
                "bias": [0,0,0,0.5]
            }]}"#,
        )
        .unwrap();
        let out = model.predict(&[0.1, 0.2, 0.3]).unwrap();
        assert_eq!(out.len(), 4);
        assert!((out[0] - 0.1).abs() < 1e-6);
        assert!((out[1] - 0.2).abs() < 1e-6);
        assert!((out[2] - 0.3).abs() < 1e-6);
        assert!((out[3] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn relu_clamps_negative_units() {
        let model = DenseModel::from_json(
            r#"{"layers": [{
                "weights": [[1],[-1]],
                "bias": [0,0],
                "activation": "relu"
            }]}"#,
        )
        .unwrap();
        let out = model.predict(&[2.0]).unwrap();
        assert_eq!(out, vec![2.0, 0.0]);
    }

    #[test]
    fn softmax_output_sums_to_one() {
        let model = DenseModel::from_json(
            r#"{"layers": [{
                "weights": [[1,0,0],[0,2,0],[0,0,3],[1,1,1]],
                "bias": [0,0,0,0],
                "activation": "softmax"
            }]}"#,
        )
        .unwrap();
        let out = model.predict(&[0.5, 0.5, 0.5]).unwrap();
        let sum: f32 = out.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(out.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn two_layer_network_chains_widths() {
        let model = DenseModel::from_json(
            r#"{"layers": [
                {"weights": [[1,1,1],[1,-1,0]], "bias": [0,0], "activation": "relu"},
                {"weights": [[1,0],[0,1],[1,1],[0,0]], "bias": [0,0,0,1]}
            ]}"#,
        )
        .unwrap();
        // Hidden: relu([0.6, 0.0]) = [0.6, 0.0].
        let out = model.predict(&[0.1, 0.2, 0.3]).unwrap();
        assert!((out[0] - 0.6).abs() < 1e-6);
        assert!((out[1] - 0.0).abs() < 1e-6);
        assert!((out[2] - 0.6).abs() < 1e-6);
        assert!((out[3] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ragged_weights_are_rejected_at_load() {
        let err = DenseModel::from_json(
            r#"{"layers": [{"weights": [[1,2],[1]], "bias": [0,0]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::BadLayer { layer: 0, .. }));
    }

    #[test]
    fn bias_weight_mismatch_is_rejected_at_load() {
        let err = DenseModel::from_json(
            r#"{"layers": [{"weights": [[1],[2]], "bias": [0]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::BadLayer { layer: 0, .. }));
    }

    #[test]
    fn mismatched_layer_widths_are_rejected_at_load() {
        let err = DenseModel::from_json(
            r#"{"layers": [
                {"weights": [[1,1]], "bias": [0]},
                {"weights": [[1,1]], "bias": [0]}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::BadLayer { layer: 1, .. }));
    }

    #[test]
    fn empty_model_is_rejected() {
        assert!(DenseModel::from_json(r#"{"layers": []}"#).is_err());
    }

    #[test]
    fn wrong_input_width_is_an_error() {
        let model = DenseModel::from_json(
            r#"{"layers": [{"weights": [[1,1,1]], "bias": [0]}]}"#,
        )
        .unwrap();
        assert!(model.predict(&[1.0]).is_err());
    }

    #[test]
    fn missing_file_maps_to_read_error() {
        let provider = JsonModelProvider::new();
        let err = match provider.load("/nonexistent/model.json") {
            Ok(_) => panic!("expected load to fail"),
            Err(e) => e,
        };
        assert!(matches!(err, ModelError::Read { .. }));
    }
}
