use ndarray::{ArrayView1, ArrayView2};

use crate::error::{Error, Result};
use crate::layer::{check_learning_rate, check_len, Layer};
use crate::loss::mean_squared_error;

/// Largest distance between the first output and the first target for which an example
/// counts as learned.
pub const CONVERGENCE_TOLERANCE: f64 = 0.1;

/// A hidden layer feeding an output layer, trained against a borrowed dataset.
///
/// The network owns neither the layers nor the dataset; it only sequences calls on them.
/// Row `k` of the training inputs is paired with row `k` of the training targets.
pub struct Network<'a, H, O> {
    hidden: &'a mut H,
    output: &'a mut O,
    train_input: ArrayView2<'a, f64>,
    train_output: ArrayView2<'a, f64>,
    train_set_count: usize,
    epochs_used: usize,
}

impl<'a, H, O> Network<'a, H, O>
where
    H: Layer,
    O: Layer,
{
    /// Fails if the layers do not chain or the dataset does not fit them.
    pub fn new(
        hidden: &'a mut H,
        output: &'a mut O,
        train_input: ArrayView2<'a, f64>,
        train_output: ArrayView2<'a, f64>,
    ) -> Result<Self> {
        check_len("layer", hidden.node_count(), output.weight_count())?;
        check_len("input", hidden.weight_count(), train_input.ncols())?;
        check_len("output", output.node_count(), train_output.ncols())?;

        let train_set_count = train_input.nrows().min(train_output.nrows());
        Ok(Self {
            hidden,
            output,
            train_input,
            train_output,
            train_set_count,
            epochs_used: 0,
        })
    }

    /// Number of usable examples, the smaller of the two dataset lengths.
    pub fn train_set_count(&self) -> usize {
        self.train_set_count
    }

    /// Full sweeps over the training set performed so far.
    pub fn epochs_used(&self) -> usize {
        self.epochs_used
    }

    pub fn hidden(&self) -> &H {
        &*self.hidden
    }

    pub fn output(&self) -> &O {
        &*self.output
    }

    /// Feed `input` through both layers and return the output layer's output.
    pub fn predict(&mut self, input: ArrayView1<f64>) -> Result<ArrayView1<'_, f64>> {
        self.hidden.feedforward(input)?;
        self.output.feedforward(self.hidden.output())?;
        Ok(self.output.output())
    }

    /// Run exactly `epoch_count` sweeps over the training set.
    ///
    /// Stops at the first failing step. Updates made before it are kept.
    pub fn train(&mut self, epoch_count: usize, learning_rate: f64) -> Result<()> {
        if epoch_count == 0 {
            return Err(Error::InvalidEpochCount);
        }
        check_learning_rate(learning_rate)?;

        let mut loss = 0.0;
        for _ in 0..epoch_count {
            loss = self.sweep(learning_rate)?;
        }
        log::info!("trained {epoch_count} epochs, mean loss {loss:.6}");
        Ok(())
    }

    /// Sweep until every example is predicted within [`CONVERGENCE_TOLERANCE`].
    ///
    /// There is no upper bound on the number of sweeps. With an unlucky initialization or a
    /// learning rate that is too large this never returns;
    /// see [`Network::train_until_converged_within`].
    pub fn train_until_converged(&mut self, learning_rate: f64) -> Result<()> {
        self.converge(learning_rate, None)
    }

    /// Like [`Network::train_until_converged`] but gives up after `max_epochs` sweeps.
    pub fn train_until_converged_within(
        &mut self,
        learning_rate: f64,
        max_epochs: usize,
    ) -> Result<()> {
        if max_epochs == 0 {
            return Err(Error::InvalidEpochCount);
        }
        self.converge(learning_rate, Some(max_epochs))
    }

    /// Whether every training example is currently predicted within [`CONVERGENCE_TOLERANCE`].
    pub fn has_converged(&mut self) -> Result<bool> {
        let train_input = self.train_input;
        let train_output = self.train_output;
        for k in 0..self.train_set_count {
            let prediction = self.predict(train_input.row(k))?[0];
            if (prediction - train_output[[k, 0]]).abs() > CONVERGENCE_TOLERANCE {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn converge(&mut self, learning_rate: f64, max_epochs: Option<usize>) -> Result<()> {
        check_learning_rate(learning_rate)?;

        let mut epochs = 0;
        while !self.has_converged()? {
            if max_epochs.map_or(false, |max_epochs| epochs >= max_epochs) {
                log::warn!("no convergence after {epochs} epochs");
                return Err(Error::NotConverged { epochs });
            }
            let loss = self.sweep(learning_rate)?;
            epochs += 1;
            log::trace!("epoch {}: mean loss {loss:.6}", self.epochs_used);
        }
        log::info!("converged after {epochs} epochs ({} in total)", self.epochs_used);
        Ok(())
    }

    // One pass of forward, backward and optimize over every example.
    // Returns the mean squared error seen during the forward passes.
    fn sweep(&mut self, learning_rate: f64) -> Result<f64> {
        let train_input = self.train_input;
        let train_output = self.train_output;

        let mut total_loss = 0.0;
        for k in 0..self.train_set_count {
            let input = train_input.row(k);
            let target = train_output.row(k);

            self.hidden.feedforward(input)?;
            self.output.feedforward(self.hidden.output())?;

            self.output.backpropagate_terminal(target)?;
            self.hidden.backpropagate_chained(&*self.output)?;
            total_loss += mean_squared_error(self.output.output(), target);

            self.hidden.optimize(input, learning_rate)?;
            self.output.optimize(self.hidden.output(), learning_rate)?;
        }
        self.epochs_used += 1;

        if self.train_set_count == 0 {
            Ok(0.0)
        } else {
            Ok(total_loss / self.train_set_count as f64)
        }
    }
}
