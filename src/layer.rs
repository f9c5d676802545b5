use ndarray::{Array, Array1, Array2, ArrayView1, ArrayView2, Zip};
use ndarray_rand::rand::Rng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

use crate::activation::Activation;
use crate::error::{Error, Result};

/// A fully connected layer as seen by the network driving it.
///
/// Any type implementing this can take the hidden or the output position of a
/// [`Network`](crate::network::Network).
pub trait Layer {
    /// Number of nodes, i.e. the length of `output`, `error` and `bias`.
    fn node_count(&self) -> usize;

    /// Number of weights per node, i.e. the expected input length.
    fn weight_count(&self) -> usize;

    /// Result of the most recent `feedforward`.
    fn output(&self) -> ArrayView1<'_, f64>;

    /// Result of the most recent backpropagation.
    fn error(&self) -> ArrayView1<'_, f64>;

    fn bias(&self) -> ArrayView1<'_, f64>;

    /// Weights shaped `(node_count, weight_count)`.
    fn weights(&self) -> ArrayView2<'_, f64>;

    /// Compute `output` from `input`.
    fn feedforward(&mut self, input: ArrayView1<f64>) -> Result<()>;

    /// Compute `error` against the expected output. Only meaningful for an output layer.
    fn backpropagate_terminal(&mut self, reference: ArrayView1<f64>) -> Result<()>;

    /// Compute `error` from the error and weights of the layer fed by this one.
    /// Only meaningful for a hidden layer.
    fn backpropagate_chained(&mut self, next: &dyn Layer) -> Result<()>;

    /// Move weights and bias along `error`, scaled by `learning_rate`.
    /// `input` must be what this layer was fed.
    fn optimize(&mut self, input: ArrayView1<f64>, learning_rate: f64) -> Result<()>;
}

pub(crate) fn check_len(context: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        log::warn!("{context} dimension mismatch: expected {expected} actual {actual}");
        Err(Error::DimensionMismatch {
            context,
            expected,
            actual,
        })
    }
}

pub(crate) fn check_learning_rate(learning_rate: f64) -> Result<()> {
    // Also rejects NaN.
    if learning_rate > 0.0 {
        Ok(())
    } else {
        log::warn!("invalid learning rate {learning_rate}");
        Err(Error::InvalidLearningRate(learning_rate))
    }
}

/// Dense layer storing every vector it needs up front.
/// Nothing is allocated after construction.
#[derive(Debug, Clone)]
pub struct Dense {
    weights: Array2<f64>,
    bias: Array1<f64>,
    output: Array1<f64>,
    error: Array1<f64>,
    activation: Activation,
}

impl Dense {
    /// Create a layer whose weights and biases are drawn from `[0, 1)` with `rng`.
    ///
    /// Panics if `node_count` or `weight_count` is zero. Such a layer can only come from a
    /// wrongly assembled network and there is nothing sensible to continue with.
    pub fn new<R>(
        node_count: usize,
        weight_count: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        assert!(
            node_count > 0 && weight_count > 0,
            "invalid dense layer parameters: {node_count} nodes, {weight_count} weights"
        );
        let bias = Array::random_using(node_count, Uniform::new(0.0, 1.0), &mut *rng);
        let weights = Array::random_using((node_count, weight_count), Uniform::new(0.0, 1.0), rng);
        Dense::with_parameters(weights, bias, activation)
    }

    /// Create a layer from explicit parameters. `weights` is shaped `(node_count, weight_count)`.
    ///
    /// Panics on empty shapes or when `bias` does not have one entry per row of `weights`.
    pub fn with_parameters(
        weights: Array2<f64>,
        bias: Array1<f64>,
        activation: Activation,
    ) -> Self {
        let (node_count, weight_count) = weights.dim();
        assert!(
            node_count > 0 && weight_count > 0,
            "invalid dense layer parameters: {node_count} nodes, {weight_count} weights"
        );
        assert_eq!(bias.len(), node_count, "one bias per node required");

        Self {
            weights,
            bias,
            output: Array1::zeros(node_count),
            error: Array1::zeros(node_count),
            activation,
        }
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }
}

impl Layer for Dense {
    fn node_count(&self) -> usize {
        self.weights.nrows()
    }

    fn weight_count(&self) -> usize {
        self.weights.ncols()
    }

    fn output(&self) -> ArrayView1<'_, f64> {
        self.output.view()
    }

    fn error(&self) -> ArrayView1<'_, f64> {
        self.error.view()
    }

    fn bias(&self) -> ArrayView1<'_, f64> {
        self.bias.view()
    }

    fn weights(&self) -> ArrayView2<'_, f64> {
        self.weights.view()
    }

    fn feedforward(&mut self, input: ArrayView1<f64>) -> Result<()> {
        check_len("input", self.weight_count(), input.len())?;

        let activation = self.activation;
        Zip::from(&mut self.output)
            .and(&self.bias)
            .and(self.weights.rows())
            .for_each(|output, &bias, weights| {
                *output = activation.compute(bias + weights.dot(&input));
            });
        Ok(())
    }

    fn backpropagate_terminal(&mut self, reference: ArrayView1<f64>) -> Result<()> {
        check_len("output", self.node_count(), reference.len())?;

        let activation = self.activation;
        Zip::from(&mut self.error)
            .and(&self.output)
            .and(reference)
            .for_each(|error, &output, &reference| {
                *error = (reference - output) * activation.derivative(output);
            });
        Ok(())
    }

    fn backpropagate_chained(&mut self, next: &dyn Layer) -> Result<()> {
        check_len("layer", self.node_count(), next.weight_count())?;

        let activation = self.activation;
        let next_error = next.error();
        let next_weights = next.weights();
        // Column i of the next layer holds the weights every next node gives to node i.
        Zip::from(&mut self.error)
            .and(&self.output)
            .and(next_weights.columns())
            .for_each(|error, &output, weights| {
                *error = weights.dot(&next_error) * activation.derivative(output);
            });
        Ok(())
    }

    fn optimize(&mut self, input: ArrayView1<f64>, learning_rate: f64) -> Result<()> {
        check_learning_rate(learning_rate)?;
        check_len("input", self.weight_count(), input.len())?;

        Zip::from(&mut self.bias)
            .and(self.weights.rows_mut())
            .and(&self.error)
            .for_each(|bias, mut weights, &error| {
                let step = error * learning_rate;
                *bias += step;
                weights.scaled_add(step, &input);
            });
        Ok(())
    }
}
