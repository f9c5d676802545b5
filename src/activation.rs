use serde::Deserialize;

/// Activation function applied to every node of a layer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// `y = x` if `x > 0`, else `0`.
    #[default]
    Relu,
    /// Hyperbolic tangent, `-1 <= y <= 1`.
    Tanh,
}

impl Activation {
    pub fn compute(&self, x: f64) -> f64 {
        match self {
            Activation::Relu => {
                if x > 0.0 {
                    x
                } else {
                    0.0
                }
            }
            Activation::Tanh => x.tanh(),
        }
    }

    /// Layers call this with their already activated output, not with the weighted sum.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            Activation::Relu => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
        }
    }
}
