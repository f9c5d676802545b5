use ndarray::{ArrayView1, Zip};

/// Mean of the squared differences between `prediction` and `target`.
pub fn mean_squared_error(prediction: ArrayView1<f64>, target: ArrayView1<f64>) -> f64 {
    assert_eq!(prediction.len(), target.len());

    let n = prediction.len();
    Zip::from(&prediction)
        .and(&target)
        .fold(0.0, |loss, &prediction, &target| {
            loss + (prediction - target).powi(2)
        })
        / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn compute_mse() {
        let prediction = arr1(&[1.0, 0.5, -0.1, 0.5, 0.2, 1.0]);
        let target = arr1(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_relative_eq!(
            0.35833333333333334,
            mean_squared_error(prediction.view(), target.view())
        );
    }

    #[test]
    fn mse_of_exact_prediction_is_zero() {
        let x = arr1(&[3.0, 7.0]);
        assert_eq!(0.0, mean_squared_error(x.view(), x.view()));
    }
}
