//! Exponential prefactor tables of the primitives of a shell.

use anyhow::{self, ensure};
use ndarray::{Array2, ArrayView2, Axis};

use crate::basis::ao::GaussianShell;

#[cfg(test)]
#[path = "prim_exp_tests.rs"]
mod prim_exp_tests;

/// The default cutoff on the exponent argument beyond which a primitive is treated as vanishing.
pub const EXPCUTOFF: f64 = 50.0;

/// Computes the exponential prefactors of every primitive of a shell at every point of a grid
/// block.
///
/// For primitive $`k`$ with exponent $`\alpha_k`$ and largest absolute contraction coefficient
/// $`c_k`$, and grid point $`\mathbf{r}_i`$ relative to the shell centre,
///
/// ```math
///     e_{ki} = \begin{cases}
///         f \exp(-\alpha_k \lvert \mathbf{r}_i \rvert^2)
///             & \text{if } \alpha_k \lvert \mathbf{r}_i \rvert^2 - \ln c_k < \epsilon, \\
///         0 & \text{otherwise},
///     \end{cases}
/// ```
///
/// where $`f`$ is `prefactor` and $`\epsilon`$ is `expcutoff`.
///
/// # Arguments
///
/// * `shell` - The shell.
/// * `coords` - Axis-major grid coordinates relative to the shell centre.
/// * `prefactor` - The factor $`f`$, usually [`crate::eval::GtoOperator::prefactor`].
/// * `expcutoff` - The cutoff $`\epsilon`$.
///
/// # Returns
///
/// The `[nprim][ngrids]` table of exponential prefactors.
///
/// # Errors
///
/// Errors if `coords` does not have three rows or `expcutoff` is not positive.
pub fn prim_exps(
    shell: &GaussianShell,
    coords: ArrayView2<f64>,
    prefactor: f64,
    expcutoff: f64,
) -> Result<Array2<f64>, anyhow::Error> {
    ensure!(
        coords.nrows() == 3,
        "Grid coordinates must have three rows, but {} found.",
        coords.nrows()
    );
    ensure!(
        expcutoff > 0.0,
        "The exponential cutoff must be positive, but {expcutoff} given."
    );
    let rr = coords.map_axis(Axis(0), |r| r.dot(&r));
    let log_coeffs = shell.max_abs_coefficients().mapv(f64::ln);
    let exps = Array2::from_shape_fn((shell.nprim(), coords.ncols()), |(k, i)| {
        let arr = shell.exponents[k] * rr[i];
        if arr - log_coeffs[k] < expcutoff {
            prefactor * (-arr).exp()
        } else {
            0.0
        }
    });
    Ok(exps)
}
