//! Blocks of grid points laid out for vectorised evaluation.

use anyhow::{self, ensure};
use itertools::iproduct;
use nalgebra::{Point3, Vector3};
use ndarray::{Array2, ArrayView2};


/// The number of grid points processed together as one SIMD group.
pub const SIMDD: usize = 8;

/// The maximum number of grid points in one block.
pub const BLKSIZE: usize = 104;

/// Structure holding the coordinates of a block of grid points relative to a shell centre.
///
/// Coordinates are stored axis-major: row 0 holds all $`x`$ values, row 1 all $`y`$ values, and
/// row 2 all $`z`$ values.
#[derive(Clone, Debug, PartialEq)]
pub struct GridBlock {
    coords: Array2<f64>,
}

impl GridBlock {
    /// Constructs a grid block from axis-major coordinates.
    ///
    /// # Errors
    ///
    /// Errors if `coords` does not have three rows or holds more than [`BLKSIZE`] points.
    pub fn new(coords: Array2<f64>) -> Result<Self, anyhow::Error> {
        ensure!(
            coords.nrows() == 3,
            "Grid coordinates must have three rows, but {} found.",
            coords.nrows()
        );
        ensure!(
            coords.ncols() <= BLKSIZE,
            "A grid block can hold at most {BLKSIZE} points, but {} given.",
            coords.ncols()
        );
        Ok(Self { coords })
    }

    /// Constructs a grid block from absolute grid points, shifting every point by `-centre` so
    /// that the coordinates become relative to `centre`.
    ///
    /// # Errors
    ///
    /// Errors if more than [`BLKSIZE`] points are given.
    pub fn relative_to(points: &[Point3<f64>], centre: &Point3<f64>) -> Result<Self, anyhow::Error> {
        let mut coords = Array2::<f64>::zeros((3, points.len()));
        points.iter().enumerate().for_each(|(i, pt)| {
            let r = pt - centre;
            (0..3).for_each(|axis| coords[(axis, i)] = r[axis]);
        });
        Self::new(coords)
    }

    /// The number of grid points in this block.
    pub fn ngrids(&self) -> usize {
        self.coords.ncols()
    }

    /// An axis-major view of the coordinates.
    pub fn coords(&self) -> ArrayView2<'_, f64> {
        self.coords.view()
    }
}

/// Partitions `ngrids` points into SIMD groups.
///
/// All groups except possibly the last have width [`SIMDD`]; the last group holds the remaining
/// points.
///
/// # Returns
///
/// An iterator over `(start, width)` pairs.
pub fn simd_groups(ngrids: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..ngrids)
        .step_by(SIMDD)
        .map(move |start| (start, SIMDD.min(ngrids - start)))
}

/// Partitions `ngrids` points into blocks of at most [`BLKSIZE`] points.
///
/// # Returns
///
/// An iterator over `(start, end)` pairs.
pub fn grid_blocks(ngrids: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..ngrids)
        .step_by(BLKSIZE)
        .map(move |start| (start, BLKSIZE.min(ngrids - start) + start))
}

/// Generates the points of a uniform rectangular grid.
///
/// Points are ordered with $`z`$ varying fastest.
///
/// # Arguments
///
/// * `origin` - The first corner of the grid.
/// * `spacing` - The grid spacing along each axis.
/// * `npoints` - The number of points along each axis.
pub fn uniform_box_points(
    origin: &Point3<f64>,
    spacing: &Vector3<f64>,
    npoints: [usize; 3],
) -> Vec<Point3<f64>> {
    iproduct!(0..npoints[0], 0..npoints[1], 0..npoints[2])
        .map(|(i, j, k)| {
            origin
                + Vector3::new(
                    i as f64 * spacing[0],
                    j as f64 * spacing[1],
                    k as f64 * spacing[2],
                )
        })
        .collect()
}
