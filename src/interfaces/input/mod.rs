//! `GtoGrid` input configuration.

use anyhow::{self, ensure, format_err};
use nalgebra::{Point3, Vector3};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::basis::ao::GaussianShell;
use crate::drivers::grid_evaluation::{GridEvaluationDriver, GridEvaluationParams};
use crate::drivers::GtoGridDriver;
use crate::eval::GtoOperator;
use crate::grid::uniform_box_points;
use crate::interfaces::InputHandle;
use crate::io::format::{gtogrid_error, gtogrid_output, log_macsec_begin, log_macsec_end};


// ----------
// InputShell
// ----------

/// Serialisable/deserialisable structure specifying a contracted Gaussian shell.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputShell {
    /// The total Cartesian angular momentum.
    pub l: u32,

    /// The shell centre.
    pub centre: Point3<f64>,

    /// The primitive exponents.
    pub exponents: Vec<f64>,

    /// The contraction coefficients, one list per contracted function, each with one coefficient
    /// per primitive.
    pub coefficients: Vec<Vec<f64>>,
}

impl InputShell {
    /// Converts this shell description into a [`GaussianShell`].
    ///
    /// # Errors
    ///
    /// Errors if the coefficient lists do not all have one entry per exponent, or if the shell
    /// is otherwise invalid.
    pub fn to_shell(&self) -> Result<GaussianShell, anyhow::Error> {
        let nprim = self.exponents.len();
        ensure!(
            self.coefficients.iter().all(|row| row.len() == nprim),
            "Every contraction must have {nprim} coefficients."
        );
        let coefficients = Array2::from_shape_vec(
            (self.coefficients.len(), nprim),
            self.coefficients.iter().flatten().copied().collect(),
        )
        .map_err(|err| format_err!(err))?;
        GaussianShell::new(self.l, self.centre, &self.exponents, coefficients)
    }
}

// ---------
// InputGrid
// ---------

/// Serialisable/deserialisable enumerated type specifying grid points.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum InputGrid {
    /// Explicit grid points.
    Points(Vec<Point3<f64>>),

    /// A uniform rectangular grid. Points are ordered with $`z`$ varying fastest.
    UniformBox {
        /// The first corner of the box.
        origin: Point3<f64>,

        /// The grid spacing along each axis.
        spacing: Vector3<f64>,

        /// The number of points along each axis.
        npoints: [usize; 3],
    },
}

impl InputGrid {
    /// Returns the grid points.
    pub fn points(&self) -> Vec<Point3<f64>> {
        match self {
            InputGrid::Points(points) => points.clone(),
            InputGrid::UniformBox {
                origin,
                spacing,
                npoints,
            } => uniform_box_points(origin, spacing, *npoints),
        }
    }
}

// -----
// Input
// -----

/// A structure containing `GtoGrid` input parameters which can be serialised into and
/// deserialised from a YAML input file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Input {
    /// The shells of the basis, in atomic-orbital order.
    pub shells: Vec<InputShell>,

    /// The grid points.
    pub grid: InputGrid,

    /// The operator to evaluate.
    pub operator: GtoOperator,

    /// Parameters for grid evaluation. If not specified, defaults are used.
    #[serde(default)]
    pub parameters: GridEvaluationParams,
}

impl InputHandle for Input {
    fn handle(&self) -> Result<(), anyhow::Error> {
        log_macsec_begin("Input");
        let shells = self
            .shells
            .iter()
            .enumerate()
            .map(|(i, shell)| {
                shell.to_shell().map_err(|err| {
                    gtogrid_error!("Invalid shell {i}: {err}");
                    format_err!("Invalid shell {i}: {err}")
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let points = self.grid.points();
        gtogrid_output!("Number of shells: {}", shells.len());
        gtogrid_output!("Number of grid points: {}", points.len());
        log_macsec_end("Input");
        gtogrid_output!("");

        let mut driver = GridEvaluationDriver::builder()
            .parameters(&self.parameters)
            .operator(self.operator)
            .shells(&shells)
            .grid_points(&points)
            .build()
            .map_err(|err| format_err!(err))?;
        driver.run()?;
        driver.result().map(|_| ())
    }
}
