//! Evaluation of contracted Cartesian Gaussian shells and their operator-weighted derivatives
//! on blocks of grid points.
//!
//! For one shell and one [`GtoOperator`], the evaluation proceeds per SIMD group of grid points:
//!
//! 1. [`power_table`] builds ascending powers of the shell-relative coordinates along each axis;
//! 2. [`recurrence`] derives further generations of these tables (derivatives and translations)
//!    following the recipe of the operator;
//! 3. [`sampler`] multiplies the appropriate generations together with the exponential prefactor
//!    of the current primitive;
//! 4. [`combiner`] forms the operator components as fixed linear combinations of the samples;
//! 5. [`accumulator`] screens negligible primitives and accumulates the contraction-weighted
//!    components into the output buffer.
//!
//! [`shell_eval`] drives these steps over a whole grid block.

pub mod accumulator;
pub mod combiner;
pub mod operator;
pub mod power_table;
pub mod prim_exp;
pub mod recurrence;
pub mod sampler;
pub mod shell_eval;

pub use operator::GtoOperator;
pub use shell_eval::{eval_shell, ShellEvalParams, ShellEvalSummary};
