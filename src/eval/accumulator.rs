//! Screening of negligible primitives and contraction-weighted accumulation.

use ndarray::{ArrayView1, ArrayView2, ArrayViewMut3};

#[cfg(test)]
#[path = "accumulator_tests.rs"]
mod accumulator_tests;

/// Determines whether a primitive contributes to a SIMD group.
///
/// # Arguments
///
/// * `exps` - The exponential prefactors of the primitive over the group.
/// * `threshold` - The magnitude at or below which a prefactor is negligible.
///
/// # Returns
///
/// `true` if at least one prefactor in the group exceeds `threshold` in magnitude.
pub fn is_significant(exps: ArrayView1<f64>, threshold: f64) -> bool {
    exps.iter().any(|e| e.abs() > threshold)
}

/// Accumulates the combined components of one Cartesian component of one primitive into the
/// output buffer, weighted by the contraction coefficients of that primitive.
///
/// For every contracted function `j`, component `m` and lane `n < width`,
/// `out[m][j * degen + icart][start + n] += combined[m][n] * coefficients[j]`.
///
/// # Arguments
///
/// * `combined` - The `[component][lane]` combined samples.
/// * `coefficients` - The contraction coefficients of the primitive, one per contracted function.
/// * `icart` - The index of the Cartesian component in the canonical order.
/// * `degen` - The number of Cartesian components of the shell.
/// * `start` - The first grid point of the group.
/// * `width` - The number of grid points in the group.
/// * `out` - The `[component][ao][grid]` output region of the shell.
pub fn accumulate(
    combined: ArrayView2<f64>,
    coefficients: ArrayView1<f64>,
    icart: usize,
    degen: usize,
    start: usize,
    width: usize,
    out: &mut ArrayViewMut3<f64>,
) {
    let ncomp = out.shape()[0];
    for (j, coeff) in coefficients.iter().enumerate() {
        let row = j * degen + icart;
        for n in 0..width {
            for m in 0..ncomp {
                out[(m, row, start + n)] += combined[(m, n)] * coeff;
            }
        }
    }
}
