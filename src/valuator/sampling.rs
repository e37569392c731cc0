//! Accuracy helpers for sampled estimates.

/// Relative error of `estimate` against `exact`, in percent.
///
/// An exact value of zero gives `0.0` when the estimate is also zero and
/// `100.0` otherwise.
///
/// # Example
///
/// ```
/// use notty::relative_error;
///
/// assert_eq!(relative_error(1.5, 1.0), 50.0);
/// assert_eq!(relative_error(0.0, 0.0), 0.0);
/// ```
#[must_use]
pub fn relative_error(estimate: f64, exact: f64) -> f64 {
    if exact == 0.0 {
        return if estimate == 0.0 { 0.0 } else { 100.0 };
    }
    abs((estimate - exact) / exact) * 100.0
}

/// Mean of the relative errors of paired estimates, in percent.
///
/// Returns `0.0` for empty input.
#[must_use]
pub fn mean_relative_error(pairs: &[(f64, f64)]) -> f64 {
    if pairs.is_empty() {
        return 0.0;
    }
    let sum: f64 = pairs
        .iter()
        .map(|&(estimate, exact)| relative_error(estimate, exact))
        .sum();
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for sample counts"
    )]
    let len = pairs.len() as f64;
    sum / len
}

#[cfg(feature = "std")]
fn abs(value: f64) -> f64 {
    value.abs()
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn abs(value: f64) -> f64 {
    libm::fabs(value)
}
