//! Contracted Cartesian Gaussian shells.

use std::cmp::Ordering;
use std::fmt;
use std::slice::Iter;

use anyhow::{self, format_err};
use derive_builder::Builder;
use itertools::Itertools;
use nalgebra::Point3;
use ndarray::{Array1, Array2, ArrayView1, Axis};

#[cfg(test)]
#[path = "ao_tests.rs"]
mod ao_tests;

/// The maximum angular momentum for which shells can be evaluated on grids.
pub const MAX_L: u32 = 15;

// ~~~~~~~~~
// CartOrder
// ~~~~~~~~~

/// Structure to contain information about the ordering of Cartesian Gaussians of a certain rank.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CartOrder {
    /// A sequence of $`(l_x, l_y, l_z)`$ tuples giving the ordering of the Cartesian Gaussians.
    pub cart_tuples: Vec<(u32, u32, u32)>,

    /// The rank of the Cartesian Gaussians.
    pub lcart: u32,
}

impl CartOrder {
    /// Constructs a new [`CartOrder`] structure for a specified rank with lexicographic order.
    ///
    /// This is the order in which grid-evaluation kernels write the Cartesian components of a
    /// shell: $`l_x`$ runs from $`l`$ down to $`0`$ and, for each $`l_x`$, $`l_y`$ runs from
    /// $`l - l_x`$ down to $`0`$. Downstream spherical and spinor transformations rely on it.
    ///
    /// # Arguments
    ///
    /// * `lcart` - The required Cartesian Gaussian rank.
    #[must_use]
    pub fn lex(lcart: u32) -> Self {
        let cart_tuples = (0..=lcart)
            .rev()
            .flat_map(|lx| (0..=(lcart - lx)).rev().map(move |ly| (lx, ly, lcart - lx - ly)))
            .collect();
        Self { cart_tuples, lcart }
    }

    /// Iterates over the constituent tuples.
    pub fn iter(&'_ self) -> Iter<'_, (u32, u32, u32)> {
        self.cart_tuples.iter()
    }

    /// Returns the number of Cartesian components in the shell.
    pub fn ncomps(&self) -> usize {
        let lcart = self.lcart as usize;
        ((lcart + 1) * (lcart + 2)).div_euclid(2)
    }
}

impl fmt::Display for CartOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.iter()
                .map(|cart_tuple| cart_tuple_to_str(cart_tuple, true))
                .join(" ")
        )
    }
}

/// Translates a Cartesian exponent tuple to a human-understandable string.
///
/// # Arguments
///
/// * `cart_tuple` - A tuple of $`(l_x, l_y, l_z)`$ specifying the exponents of the Cartesian
///   components of the Cartesian Gaussian.
/// * flat - A flag indicating if the string representation is flat (*e.g.* `xxyz`) or compact
///   (*e.g.* `x^2yz`).
///
/// Returns
///
/// The string representation of the Cartesian exponent tuple.
pub fn cart_tuple_to_str(cart_tuple: &(u32, u32, u32), flat: bool) -> String {
    if cart_tuple.0 + cart_tuple.1 + cart_tuple.2 == 0u32 {
        "1".to_string()
    } else {
        let cart_array = [cart_tuple.0, cart_tuple.1, cart_tuple.2];
        let carts = ["x", "y", "z"];
        cart_array
            .iter()
            .enumerate()
            .map(|(i, &l)| {
                if flat {
                    carts[i].repeat(l as usize)
                } else {
                    match l.cmp(&1) {
                        Ordering::Greater => format!("{}^{l}", carts[i]),
                        Ordering::Equal => carts[i].to_string(),
                        Ordering::Less => String::new(),
                    }
                }
            })
            .collect::<String>()
    }
}

// ~~~~~~~~~~~~~
// GaussianShell
// ~~~~~~~~~~~~~

/// Structure representing a shell of contracted Cartesian Gaussians sharing one centre and one
/// set of primitive exponents.
///
/// The $`j`$-th contracted function of Cartesian component $`(l_x, l_y, l_z)`$ is
///
/// ```math
///     \phi_j(\mathbf{r}) = x^{l_x} y^{l_y} z^{l_z}
///         \sum_k c_{jk} \exp\left[-\alpha_k \lvert \mathbf{r} \rvert^2\right],
/// ```
///
/// with $`\mathbf{r}`$ measured from [`Self::centre`].
#[derive(Clone, Builder, Debug)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct GaussianShell {
    /// The total Cartesian angular momentum of the shell.
    pub l: u32,

    /// The Cartesian centre $`\mathbf{R}`$ of the shell.
    pub centre: Point3<f64>,

    /// The primitive exponents $`\alpha_k`$.
    #[builder(setter(custom))]
    pub exponents: Array1<f64>,

    /// The contraction coefficients $`c_{jk}`$, one row per contracted function and one column
    /// per primitive.
    pub coefficients: Array2<f64>,
}

impl GaussianShellBuilder {
    pub fn exponents(&mut self, exponents: &[f64]) -> &mut Self {
        self.exponents = Some(Array1::from_vec(exponents.to_vec()));
        self
    }

    fn validate(&self) -> Result<(), String> {
        let l = self.l.ok_or("No angular momentum found.".to_string())?;
        if l > MAX_L {
            return Err(format!(
                "Angular momentum {l} exceeds the maximum supported value of {MAX_L}."
            ));
        }
        let exponents = self
            .exponents
            .as_ref()
            .ok_or("No primitive exponents found.".to_string())?;
        let coefficients = self
            .coefficients
            .as_ref()
            .ok_or("No contraction coefficients found.".to_string())?;
        if exponents.is_empty() {
            return Err("A shell must contain at least one primitive.".to_string());
        }
        if coefficients.ncols() != exponents.len() {
            return Err(format!(
                "Mismatched number of primitives: {} exponents but {} coefficient columns.",
                exponents.len(),
                coefficients.ncols()
            ));
        }
        if coefficients.nrows() == 0 {
            return Err("A shell must contain at least one contracted function.".to_string());
        }
        Ok(())
    }
}

impl GaussianShell {
    /// Returns a builder to construct a new [`GaussianShell`].
    pub fn builder() -> GaussianShellBuilder {
        GaussianShellBuilder::default()
    }

    /// Constructs a new [`GaussianShell`].
    ///
    /// # Arguments
    ///
    /// * `l` - The angular momentum.
    /// * `centre` - The Cartesian centre.
    /// * `exponents` - The primitive exponents.
    /// * `coefficients` - The contraction coefficients with shape `[nctr, nprim]`.
    ///
    /// # Errors
    ///
    /// Errors if the angular momentum is too high or the array shapes are inconsistent.
    pub fn new(
        l: u32,
        centre: Point3<f64>,
        exponents: &[f64],
        coefficients: Array2<f64>,
    ) -> Result<Self, anyhow::Error> {
        Self::builder()
            .l(l)
            .centre(centre)
            .exponents(exponents)
            .coefficients(coefficients)
            .build()
            .map_err(|err| format_err!(err))
    }

    /// The canonical Cartesian order of the components of this shell.
    pub fn cart_order(&self) -> CartOrder {
        CartOrder::lex(self.l)
    }

    /// The number of primitives in this shell.
    pub fn nprim(&self) -> usize {
        self.exponents.len()
    }

    /// The number of contracted functions in this shell.
    pub fn nctr(&self) -> usize {
        self.coefficients.nrows()
    }

    /// The number of Cartesian components per contracted function.
    pub fn degen(&self) -> usize {
        let l = self.l as usize;
        (l + 1) * (l + 2) / 2
    }

    /// The number of Cartesian atomic-orbital rows this shell occupies in an output buffer.
    pub fn nao(&self) -> usize {
        self.degen() * self.nctr()
    }

    /// The contraction coefficients of the $`k`$-th primitive across all contracted functions.
    pub fn primitive_coefficients(&self, k: usize) -> ArrayView1<'_, f64> {
        self.coefficients.column(k)
    }

    /// The largest absolute contraction coefficient of each primitive.
    pub fn max_abs_coefficients(&self) -> Array1<f64> {
        self.coefficients
            .map_axis(Axis(0), |col| col.iter().fold(0.0_f64, |acc, c| acc.max(c.abs())))
    }
}

impl fmt::Display for GaussianShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shell l = {} at ({}), {} {}, {} {}",
            self.l,
            self.centre.iter().map(|x| format!("{x:+.3}")).join(", "),
            self.nprim(),
            if self.nprim() == 1 {
                "primitive"
            } else {
                "primitives"
            },
            self.nctr(),
            if self.nctr() == 1 {
                "contraction"
            } else {
                "contractions"
            },
        )
    }
}
