use ndarray::{Array2, ArrayView1, ArrayView2};

/// Every combination of `width` boolean inputs paired with its integer encoding.
///
/// Row `k` of `inputs` holds the bits of `k`, most significant first, and row `k` of
/// `targets` holds the single value `k`.
#[derive(Debug, Clone)]
pub struct EncoderDataset {
    inputs: Array2<f64>,
    targets: Array2<f64>,
}

impl EncoderDataset {
    /// Panics if `width` is zero or too large to enumerate.
    pub fn new(width: usize) -> Self {
        assert!(
            width > 0 && width < usize::BITS as usize,
            "invalid encoder width {width}"
        );
        let size = 1usize << width;
        let inputs = Array2::from_shape_fn((size, width), |(k, bit)| {
            ((k >> (width - 1 - bit)) & 1) as f64
        });
        let targets = Array2::from_shape_fn((size, 1), |(k, _)| k as f64);
        Self { inputs, targets }
    }

    pub fn width(&self) -> usize {
        self.inputs.ncols()
    }

    pub fn size(&self) -> usize {
        self.inputs.nrows()
    }

    pub fn inputs(&self) -> ArrayView2<'_, f64> {
        self.inputs.view()
    }

    pub fn targets(&self) -> ArrayView2<'_, f64> {
        self.targets.view()
    }

    /// Iterate over `(input, label)` pairs.
    pub fn examples(&self) -> impl Iterator<Item = (ArrayView1<'_, f64>, u32)> {
        self.inputs
            .rows()
            .into_iter()
            .enumerate()
            .map(|(k, input)| (input, k as u32))
    }
}
