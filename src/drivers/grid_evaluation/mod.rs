//! Driver for evaluating every shell of a basis on a grid of points.

use std::fmt;

use anyhow::{self, ensure, format_err, Context};
use derive_builder::Builder;
use itertools::Itertools;
use log;
use nalgebra::Point3;
use ndarray::{s, Array3, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::basis::ao::GaussianShell;
use crate::drivers::GtoGridDriver;
use crate::eval::prim_exp::{prim_exps, EXPCUTOFF};
use crate::eval::{eval_shell, GtoOperator, ShellEvalParams, ShellEvalSummary};
use crate::grid::{grid_blocks, GridBlock, BLKSIZE};
use crate::io::format::{
    gtogrid_output, gtogrid_warn, log_subtitle, log_title, nice_bool, write_subtitle,
    GtoGridOutput,
};
use crate::io::{write_gtogrid_binary, GtoGridFileType};

#[cfg(test)]
#[path = "grid_evaluation_tests.rs"]
mod grid_evaluation_tests;

// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

fn default_expcutoff() -> f64 {
    EXPCUTOFF
}

/// Structure containing control parameters for grid evaluation.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct GridEvaluationParams {
    /// Control parameters for the evaluation of each shell.
    #[builder(default = "ShellEvalParams::default()")]
    #[serde(default)]
    pub shell_eval: ShellEvalParams,

    /// The cutoff on the exponent argument beyond which a primitive is treated as vanishing at a
    /// grid point.
    #[builder(default = "EXPCUTOFF")]
    #[serde(default = "default_expcutoff")]
    pub expcutoff: f64,

    /// Optional name for saving the result as a binary file of type [`GtoGridFileType::Ao`]. If
    /// `None`, the result will not be saved.
    #[builder(default = "None")]
    #[serde(default)]
    pub result_save_name: Option<String>,
}

impl GridEvaluationParams {
    /// Returns a builder to construct a [`GridEvaluationParams`] structure.
    pub fn builder() -> GridEvaluationParamsBuilder {
        GridEvaluationParamsBuilder::default()
    }
}

impl Default for GridEvaluationParams {
    fn default() -> Self {
        Self {
            shell_eval: ShellEvalParams::default(),
            expcutoff: EXPCUTOFF,
            result_save_name: None,
        }
    }
}

impl fmt::Display for GridEvaluationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.shell_eval)?;
        writeln!(f, "Exponential cutoff: {:.3e}", self.expcutoff)?;
        writeln!(
            f,
            "Save grid-evaluation results to file: {}",
            if let Some(name) = self.result_save_name.as_ref() {
                format!("{name}{}", GtoGridFileType::Ao.ext())
            } else {
                nice_bool(false)
            }
        )?;
        writeln!(f)?;
        Ok(())
    }
}

// ------
// Result
// ------

/// Structure containing the results of grid evaluation.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct GridEvaluationResult {
    /// The control parameters used to obtain this set of results.
    pub parameters: GridEvaluationParams,

    /// The operator evaluated.
    pub operator: GtoOperator,

    /// The first atomic-orbital row of each shell.
    pub ao_offsets: Vec<usize>,

    /// The `[ncomp][nao][ngrids]` values.
    pub values: Array3<f64>,

    /// The number of grid blocks processed.
    pub nblocks: usize,

    /// The number of (block, shell, group, primitive) evaluations carried out.
    pub nevaluated: usize,

    /// The number of (block, shell, group, primitive) evaluations skipped by screening.
    pub nscreened: usize,
}

impl GridEvaluationResult {
    fn builder() -> GridEvaluationResultBuilder {
        GridEvaluationResultBuilder::default()
    }

    /// The number of output components.
    pub fn ncomp(&self) -> usize {
        self.values.len_of(Axis(0))
    }

    /// The total number of Cartesian atomic-orbital rows.
    pub fn nao(&self) -> usize {
        self.values.len_of(Axis(1))
    }

    /// The number of grid points.
    pub fn ngrids(&self) -> usize {
        self.values.len_of(Axis(2))
    }

    /// The largest absolute value of each component.
    pub fn max_abs_values(&self) -> Vec<f64> {
        self.values
            .axis_iter(Axis(0))
            .map(|comp| comp.fold(0.0_f64, |acc, v| acc.max(v.abs())))
            .collect_vec()
    }
}

impl fmt::Display for GridEvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Operator: {}", self.operator)?;
        writeln!(f, "Number of components: {}", self.ncomp())?;
        writeln!(f, "Number of Cartesian AOs: {}", self.nao())?;
        writeln!(f, "Number of grid points: {}", self.ngrids())?;
        writeln!(f, "Number of grid blocks: {}", self.nblocks)?;
        writeln!(
            f,
            "Primitive evaluations: {} carried out, {} screened",
            self.nevaluated, self.nscreened
        )?;
        writeln!(f)?;

        write_subtitle(f, "Largest absolute values")?;
        let count_length = self.ncomp().to_string().len().max(4);
        writeln!(f, "{}", "┈".repeat(count_length + 17))?;
        writeln!(f, "{:>count_length$}  {:>15}", "Comp", "Max |value|")?;
        writeln!(f, "{}", "┈".repeat(count_length + 17))?;
        for (m, value) in self.max_abs_values().iter().enumerate() {
            writeln!(f, "{m:>count_length$}  {value:>15.7e}")?;
        }
        writeln!(f, "{}", "┈".repeat(count_length + 17))?;
        Ok(())
    }
}

// ------
// Driver
// ------

/// Driver for evaluating all shells of a basis under one operator on a set of grid points.
///
/// The grid is partitioned into blocks of at most [`BLKSIZE`] points which are evaluated in
/// parallel. Within a block, each shell writes its own rows of the output.
#[derive(Clone, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct GridEvaluationDriver<'a> {
    /// The control parameters.
    parameters: &'a GridEvaluationParams,

    /// The operator to evaluate.
    operator: GtoOperator,

    /// The shells of the basis, in atomic-orbital order.
    shells: &'a [GaussianShell],

    /// The grid points in absolute coordinates.
    grid_points: &'a [Point3<f64>],

    /// The result of the evaluation.
    #[builder(setter(skip), default = "None")]
    result: Option<GridEvaluationResult>,
}

impl<'a> GridEvaluationDriverBuilder<'a> {
    fn validate(&self) -> Result<(), String> {
        let shells = self.shells.ok_or("No shells found.".to_string())?;
        if shells.is_empty() {
            return Err("At least one shell is required.".to_string());
        }
        let grid_points = self.grid_points.ok_or("No grid points found.".to_string())?;
        if grid_points.is_empty() {
            return Err("At least one grid point is required.".to_string());
        }
        Ok(())
    }
}

impl<'a> GridEvaluationDriver<'a> {
    /// Returns a builder to construct a [`GridEvaluationDriver`] structure.
    pub fn builder() -> GridEvaluationDriverBuilder<'a> {
        GridEvaluationDriverBuilder::default()
    }

    fn evaluate(&mut self) -> Result<(), anyhow::Error> {
        log_title("Contracted GTO Grid Evaluation");
        gtogrid_output!("");
        let params = self.parameters;
        let operator = self.operator;
        let shells = self.shells;
        let grid_points = self.grid_points;

        gtogrid_output!("Operator: {operator}");
        params.log_output_display();
        if operator.prefactor() != 1.0 {
            gtogrid_output!(
                "The prefactor {:.3} of {operator} is folded into the exponential factors.",
                operator.prefactor()
            );
            gtogrid_output!("");
        }
        ensure!(
            !operator.requires_common_origin() || params.shell_eval.common_origin.is_some(),
            "{operator} requires a common origin, but none has been specified."
        );

        let ao_offsets = shells
            .iter()
            .scan(0, |acc, shell| {
                let start = *acc;
                *acc += shell.nao();
                Some(start)
            })
            .collect_vec();
        let nao = shells.iter().map(|shell| shell.nao()).sum::<usize>();
        let ngrids = grid_points.len();

        log_subtitle("Shells");
        gtogrid_output!("");
        let count_length = shells.len().to_string().len().max(1);
        for (i, (shell, ao_start)) in shells.iter().zip(ao_offsets.iter()).enumerate() {
            gtogrid_output!(
                "{i:>count_length$}  AO {:>5}..{:<5}  {shell}",
                ao_start,
                ao_start + shell.nao()
            );
            log::debug!("Cartesian components of shell {i}: {}", shell.cart_order());
        }
        gtogrid_output!("");

        let mut values = Array3::<f64>::zeros((operator.ncomp(), nao, ngrids));
        let block_summaries = values
            .axis_chunks_iter_mut(Axis(2), BLKSIZE)
            .into_par_iter()
            .enumerate()
            .map(|(iblock, mut block_values)| {
                let start = iblock * BLKSIZE;
                let end = start + block_values.len_of(Axis(2));
                let points = &grid_points[start..end];
                let mut block_summary = ShellEvalSummary::default();
                for (shell, ao_start) in shells.iter().zip(ao_offsets.iter()) {
                    let block = GridBlock::relative_to(points, &shell.centre)?;
                    let exps = prim_exps(
                        shell,
                        block.coords(),
                        operator.prefactor(),
                        params.expcutoff,
                    )?;
                    let summary = eval_shell(
                        operator,
                        shell,
                        exps.view(),
                        block.coords(),
                        &params.shell_eval,
                        block_values.slice_mut(s![.., *ao_start..ao_start + shell.nao(), ..]),
                    )
                    .with_context(|| {
                        format!("Unable to evaluate {shell} on grid points {start}..{end}.")
                    })?;
                    block_summary.merge(&summary);
                }
                log::debug!("Grid block {iblock} ({start}..{end}): {block_summary}.");
                Ok::<_, anyhow::Error>(block_summary)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut total = ShellEvalSummary::default();
        block_summaries
            .iter()
            .for_each(|summary| total.merge(summary));
        if total.nevaluated == 0 {
            gtogrid_warn!(
                "Every primitive has been screened out at every grid point. All values are zero."
            );
        }

        let result = GridEvaluationResult::builder()
            .parameters(params.clone())
            .operator(operator)
            .ao_offsets(ao_offsets)
            .values(values)
            .nblocks(grid_blocks(ngrids).count())
            .nevaluated(total.nevaluated)
            .nscreened(total.nscreened)
            .build()
            .map_err(|err| format_err!(err))?;

        log_subtitle("Grid-evaluation summary");
        gtogrid_output!("");
        result.log_output_display();
        gtogrid_output!("");

        if let Some(name) = params.result_save_name.as_ref() {
            write_gtogrid_binary(name, GtoGridFileType::Ao, &result)?;
            gtogrid_output!("Grid-evaluation results saved as {name}{}.", GtoGridFileType::Ao.ext());
            gtogrid_output!("");
        }

        self.result = Some(result);
        Ok(())
    }
}

impl<'a> GtoGridDriver for GridEvaluationDriver<'a> {
    type Outcome = GridEvaluationResult;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No grid-evaluation results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.evaluate()
    }
}
