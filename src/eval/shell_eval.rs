//! Evaluation of one contracted Gaussian shell under one operator over one grid block.

use std::fmt;

use anyhow::{self, ensure, format_err};
use derive_builder::Builder;
use log;
use nalgebra::Point3;
use ndarray::{s, Array2, ArrayView2, ArrayViewMut3};
use serde::{Deserialize, Serialize};

use crate::basis::ao::{GaussianShell, MAX_L};
use crate::eval::accumulator::{accumulate, is_significant};
use crate::eval::operator::GtoOperator;
use crate::eval::power_table::PowerTables;
use crate::eval::sampler::sample_cartesian;
use crate::grid::{simd_groups, BLKSIZE, SIMDD};

#[cfg(test)]
#[path = "shell_eval_tests.rs"]
mod shell_eval_tests;

// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

/// Structure containing control parameters for the evaluation of a shell.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct ShellEvalParams {
    /// Boolean indicating if primitives with negligible exponential prefactors over a whole SIMD
    /// group are skipped.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub screening: bool,

    /// The magnitude at or below which an exponential prefactor is considered negligible.
    #[builder(default = "0.0")]
    #[serde(default)]
    pub screening_threshold: f64,

    /// The common origin required by origin-referenced operators.
    #[builder(default = "None")]
    #[serde(default)]
    pub common_origin: Option<Point3<f64>>,
}

fn default_true() -> bool {
    true
}

impl ShellEvalParams {
    /// Returns a builder to construct a [`ShellEvalParams`] structure.
    pub fn builder() -> ShellEvalParamsBuilder {
        ShellEvalParamsBuilder::default()
    }
}

impl Default for ShellEvalParams {
    fn default() -> Self {
        Self {
            screening: true,
            screening_threshold: 0.0,
            common_origin: None,
        }
    }
}

impl fmt::Display for ShellEvalParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Primitive screening: {}",
            if self.screening { "yes" } else { "no" }
        )?;
        if self.screening {
            writeln!(f, "Screening threshold: {:.3e}", self.screening_threshold)?;
        }
        if let Some(origin) = self.common_origin.as_ref() {
            writeln!(
                f,
                "Common origin: ({:+.3}, {:+.3}, {:+.3})",
                origin[0], origin[1], origin[2]
            )?;
        }
        Ok(())
    }
}

// -------
// Summary
// -------

/// Structure containing bookkeeping counts of a shell evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShellEvalSummary {
    /// The number of SIMD groups visited.
    pub ngroups: usize,

    /// The number of (group, primitive) pairs evaluated.
    pub nevaluated: usize,

    /// The number of (group, primitive) pairs skipped by screening.
    pub nscreened: usize,
}

impl ShellEvalSummary {
    /// Accumulates the counts of another summary into this one.
    pub fn merge(&mut self, other: &Self) {
        self.ngroups += other.ngroups;
        self.nevaluated += other.nevaluated;
        self.nscreened += other.nscreened;
    }
}

impl fmt::Display for ShellEvalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} SIMD group(s), {} primitive evaluation(s), {} screened",
            self.ngroups, self.nevaluated, self.nscreened
        )
    }
}

// =========
// Functions
// =========

/// Evaluates a contracted Gaussian shell under an operator over a block of grid points.
///
/// The output region is first zeroed over all components, contracted functions, and grid
/// points of the block. Every primitive that survives screening in a SIMD group then contributes
/// its contraction-weighted operator components. Within a group, primitives are visited in order
/// and, for each primitive, Cartesian components in canonical order.
///
/// # Arguments
///
/// * `operator` - The operator to apply.
/// * `shell` - The shell to evaluate.
/// * `exps` - The `[nprim][ngrids]` exponential prefactors, see
/// [`crate::eval::prim_exp::prim_exps`].
/// * `coords` - The `[3][ngrids]` grid coordinates relative to the shell centre.
/// * `params` - The control parameters.
/// * `out` - The `[ncomp][degen * nctr][ngrids]` output region of the shell. Row `j * degen + i`
/// holds Cartesian component `i` of contracted function `j`.
///
/// # Returns
///
/// A summary of the work carried out.
///
/// # Errors
///
/// Errors if the shapes of the inputs are inconsistent with one another, if the block holds more
/// than [`BLKSIZE`] points, or if the operator requires a common origin that `params` does not
/// provide.
pub fn eval_shell(
    operator: GtoOperator,
    shell: &GaussianShell,
    exps: ArrayView2<f64>,
    coords: ArrayView2<f64>,
    params: &ShellEvalParams,
    mut out: ArrayViewMut3<f64>,
) -> Result<ShellEvalSummary, anyhow::Error> {
    let ngrids = coords.ncols();
    ensure!(
        coords.nrows() == 3,
        "Grid coordinates must have three rows, but {} found.",
        coords.nrows()
    );
    ensure!(
        ngrids <= BLKSIZE,
        "A grid block can hold at most {BLKSIZE} points, but {ngrids} given."
    );
    ensure!(
        shell.l <= MAX_L,
        "Angular momentum {} exceeds the maximum supported value of {MAX_L}.",
        shell.l
    );
    ensure!(
        shell.coefficients.ncols() == shell.nprim(),
        "Mismatched number of primitives: {} exponents but {} coefficient columns.",
        shell.nprim(),
        shell.coefficients.ncols()
    );
    ensure!(
        exps.dim() == (shell.nprim(), ngrids),
        "Exponential prefactors must have shape {:?}, but {:?} found.",
        (shell.nprim(), ngrids),
        exps.dim()
    );
    ensure!(
        out.dim() == (operator.ncomp(), shell.nao(), ngrids),
        "Output region must have shape {:?} for {operator}, but {:?} found.",
        (operator.ncomp(), shell.nao(), ngrids),
        out.dim()
    );
    ensure!(
        params.screening_threshold >= 0.0,
        "The screening threshold must be non-negative, but {} given.",
        params.screening_threshold
    );
    let common_origin = if operator.requires_common_origin() {
        Some(params.common_origin.as_ref().ok_or_else(|| {
            format_err!("{operator} requires a common origin, but none has been specified.")
        })?)
    } else {
        None
    };

    out.fill(0.0);

    let l = shell.l as usize;
    let degen = shell.degen();
    let cart_order = shell.cart_order();
    let recipe = operator.recipe();
    let layout = operator.sample_layout();
    let combination = operator.combination(&shell.centre);
    let top = l + operator.max_power_offset();

    let mut tables = PowerTables::new(operator.ngenerations(), top);
    let mut samples = Array2::<f64>::zeros((operator.nsample(), SIMDD));
    let mut combined = Array2::<f64>::zeros((operator.ncomp(), SIMDD));
    let mut summary = ShellEvalSummary::default();

    for (start, width) in simd_groups(ngrids) {
        summary.ngroups += 1;
        tables.fill_powers(coords, start, width, top);
        for k in 0..shell.nprim() {
            let exps_k = exps.slice(s![k, start..start + width]);
            if params.screening && !is_significant(exps_k, params.screening_threshold) {
                summary.nscreened += 1;
                continue;
            }
            summary.nevaluated += 1;

            let alpha = shell.exponents[k];
            for step in recipe {
                for axis in 0..3 {
                    let recurrence = step.kind.resolve(axis, alpha, &shell.centre, common_origin);
                    let (old, new) = tables.generation_pair_mut(axis, step.source, step.target);
                    recurrence.apply(old.view(), new, l + step.top_offset, width);
                }
            }

            let coefficients = shell.primitive_coefficients(k);
            for (icart, cart_tuple) in cart_order.iter().enumerate() {
                sample_cartesian(&tables, &layout, exps_k, cart_tuple, samples.view_mut());
                combination.apply(samples.view(), width, combined.view_mut());
                accumulate(
                    combined.view(),
                    coefficients,
                    icart,
                    degen,
                    start,
                    width,
                    &mut out,
                );
            }
        }
    }

    log::debug!("{operator} on {shell}: {summary}.");
    Ok(summary)
}
