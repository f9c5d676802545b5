//! The polling side of the system: debounced input lines go in, a category comes out on a
//! display.

use std::time::{Duration, Instant};

use ndarray::Array1;

use crate::error::{Error, Result};
use crate::layer::{check_len, Layer};
use crate::network::Network;

/// Source of stable logic levels, one per input line, read by polling.
pub trait InputLines {
    fn line_count(&self) -> usize;

    /// Most recent stable level of `line`.
    fn level(&self, line: usize) -> bool;
}

/// Sink for the category shown to the user.
pub trait ValueDisplay {
    fn set_value(&mut self, value: u32);
}

/// How a debounced line is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// Report the debounced level as is.
    Level,
    /// Flip the reported level on every debounced rising edge, like a push button latch.
    Toggle,
}

#[derive(Debug, Clone, Default)]
struct LineState {
    stable: bool,
    latched: bool,
    pending_since: Option<Instant>,
}

/// Filters raw line samples, accepting a new level only once it held for `interval`.
#[derive(Debug, Clone)]
pub struct Debouncer {
    interval: Duration,
    mode: LineMode,
    lines: Vec<LineState>,
}

impl Debouncer {
    pub fn new(line_count: usize, interval: Duration, mode: LineMode) -> Self {
        Self {
            interval,
            mode,
            lines: vec![LineState::default(); line_count],
        }
    }

    /// Feed one raw sample of every line taken at `now`.
    /// Panics if `raw` does not hold one sample per line.
    pub fn update(&mut self, raw: &[bool], now: Instant) {
        assert_eq!(raw.len(), self.lines.len(), "one sample per line required");
        for (line, &level) in raw.iter().enumerate() {
            self.sample(line, level, now);
        }
    }

    /// Feed one raw sample of `line` taken at `now` and return the reported level.
    pub fn sample(&mut self, line: usize, raw: bool, now: Instant) -> bool {
        let interval = self.interval;
        let mode = self.mode;
        let state = &mut self.lines[line];

        if raw == state.stable {
            state.pending_since = None;
        } else {
            let since = *state.pending_since.get_or_insert(now);
            if now.saturating_duration_since(since) >= interval {
                state.stable = raw;
                state.pending_since = None;
                if raw {
                    state.latched = !state.latched;
                }
                log::debug!("line {line} settled at {raw}");
            }
        }

        match mode {
            LineMode::Level => state.stable,
            LineMode::Toggle => state.latched,
        }
    }
}

impl InputLines for Debouncer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn level(&self, line: usize) -> bool {
        let state = &self.lines[line];
        match self.mode {
            LineMode::Level => state.stable,
            LineMode::Toggle => state.latched,
        }
    }
}

/// Forwards a value to the wrapped display only when it differs from the previous one.
#[derive(Debug)]
pub struct LatchedDisplay<D> {
    inner: D,
    last: Option<u32>,
}

impl<D: ValueDisplay> LatchedDisplay<D> {
    pub fn new(inner: D) -> Self {
        Self { inner, last: None }
    }

    pub fn last(&self) -> Option<u32> {
        self.last
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: ValueDisplay> ValueDisplay for LatchedDisplay<D> {
    fn set_value(&mut self, value: u32) {
        if self.last == Some(value) {
            return;
        }
        self.last = Some(value);
        self.inner.set_value(value);
    }
}

/// Round a prediction to the nearest category of a `width`-line input, clamped to
/// `0..=2^width - 1`. NaN maps to 0.
pub fn to_category(value: f64, width: usize) -> u32 {
    assert!(width > 0 && width < u32::BITS as usize, "invalid input width {width}");
    let max = (1u32 << width) - 1;
    if value.is_nan() {
        return 0;
    }
    (value + 0.5).floor().clamp(0.0, f64::from(max)) as u32
}

/// Drives a trained network from input lines to a display.
pub struct Controller<'a, H, O, I, D> {
    network: Network<'a, H, O>,
    inputs: I,
    display: LatchedDisplay<D>,
    input: Array1<f64>,
}

impl<'a, H, O, I, D> Controller<'a, H, O, I, D>
where
    H: Layer,
    O: Layer,
    I: InputLines,
    D: ValueDisplay,
{
    /// Fails if the number of input lines does not match the network's input width, or if
    /// that width has more categories than a `u32` display value can show.
    pub fn new(network: Network<'a, H, O>, inputs: I, display: D) -> Result<Self> {
        let width = network.hidden().weight_count();
        check_len("input", width, inputs.line_count())?;
        if width >= u32::BITS as usize {
            return Err(Error::InvalidConfig(format!(
                "{width} input lines, at most {} supported",
                u32::BITS - 1
            )));
        }
        Ok(Self {
            network,
            inputs,
            display: LatchedDisplay::new(display),
            input: Array1::zeros(width),
        })
    }

    pub fn inputs_mut(&mut self) -> &mut I {
        &mut self.inputs
    }

    pub fn display(&self) -> &LatchedDisplay<D> {
        &self.display
    }

    /// Read every line, predict, and show the resulting category. Returns the category.
    pub fn poll(&mut self) -> Result<u32> {
        let inputs = &self.inputs;
        self.input
            .iter_mut()
            .enumerate()
            .for_each(|(line, value)| *value = if inputs.level(line) { 1.0 } else { 0.0 });

        let prediction = self.network.predict(self.input.view())?[0];
        let category = to_category(prediction, self.input.len());
        self.display.set_value(category);
        Ok(category)
    }
}
