//! # GtoGrid: Contracted Gaussian-Type Orbitals on Grids
//!
//! GtoGrid evaluates contracted Cartesian Gaussian-type orbitals (GTOs), together with a
//! catalog of operator-weighted derivatives of them, on batches of grid points. For a shell of
//! total angular momentum $`l`$ centred at $`\mathbf{R}`$, the $`j`$-th contracted function of
//! Cartesian component $`(l_x, l_y, l_z)`$ is
//!
//! ```math
//!     \phi_j(\mathbf{r}) = x^{l_x} y^{l_y} z^{l_z}
//!         \sum_k c_{jk} \exp\left[-\alpha_k \lvert \mathbf{r} \rvert^2\right],
//! ```
//!
//! with $`\mathbf{r}`$ measured from $`\mathbf{R}`$. The available operators are enumerated in
//! [`eval::GtoOperator`]. They range from plain values and gradients to cross products with
//! the position, spin-dot-gradient forms, and position-weighted gradients referred to the shell
//! centre or to a common origin.
//!
//! ## Organisation
//!
//! - [`basis`]: contracted Gaussian shells and the canonical Cartesian order of their components;
//! - [`grid`]: blocks of grid points and their partitioning into SIMD groups;
//! - [`eval`]: the per-shell evaluation kernel built from power tables, recurrences, samplers,
//!   combiners, and a screened contraction accumulator;
//! - [`drivers`]: evaluation of a whole basis on a whole grid in parallel over grid blocks;
//! - [`interfaces`]: the YAML input configuration and the command-line interface;
//! - [`io`]: reading and writing of configuration and result files.
//!
//! ## Examples and usage
//!
//! For most items (structs, enums, functions, and traits), their usages are illustrated in test
//! functions. The `gtogrid` binary reads a YAML configuration file given by `--config` and
//! writes its main output to the `gtogrid-output` logger.
//!
//! ## License
//!
//! GNU Lesser General Public License v3.0.

pub mod basis;
pub mod drivers;
pub mod eval;
pub mod grid;
pub mod interfaces;
pub mod io;
