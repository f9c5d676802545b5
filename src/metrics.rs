/// Share of positions where `y_pred` matches `y_true`. Zero for empty input.
pub fn accuracy<Label>(y_true: &[Label], y_pred: &[Label]) -> f64
where
    Label: Eq,
{
    if y_true.is_empty() {
        return 0.0;
    }
    let n_corrects = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    n_corrects as f64 / y_true.len() as f64
}

/// Labels of `y_true` whose prediction differs, in order of appearance.
pub fn misclassified<Label>(y_true: &[Label], y_pred: &[Label]) -> Vec<Label>
where
    Label: Eq + Clone,
{
    y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t != p)
        .map(|(t, _)| t.clone())
        .collect()
}
