//! Per-axis power and generation tables.

use ndarray::{s, Array4, ArrayView2, ArrayViewMut2};

use crate::grid::SIMDD;

#[cfg(test)]
#[path = "power_table_tests.rs"]
mod power_table_tests;

/// Scratch tables holding, for each Cartesian axis, several generations of power tables for one
/// SIMD group of grid points.
///
/// Generation $`0`$ holds the raw powers $`x^p`$ of the shell-relative coordinate. Each further
/// generation is obtained from an earlier one by one recurrence application (see
/// [`crate::eval::recurrence`]). The tables are indexed as `[axis][generation][power][lane]` and
/// sized at construction from the actual angular momentum.
#[derive(Clone, Debug)]
pub struct PowerTables {
    tables: Array4<f64>,
}

impl PowerTables {
    /// Allocates zeroed tables.
    ///
    /// # Arguments
    ///
    /// * `ngenerations` - The number of generations, including generation $`0`$.
    /// * `max_power` - The highest power that will be stored.
    pub fn new(ngenerations: usize, max_power: usize) -> Self {
        Self {
            tables: Array4::<f64>::zeros((3, ngenerations.max(1), max_power + 1, SIMDD)),
        }
    }

    /// The number of generations these tables can hold.
    pub fn ngenerations(&self) -> usize {
        self.tables.shape()[1]
    }

    /// The highest power these tables can hold.
    pub fn max_power(&self) -> usize {
        self.tables.shape()[2] - 1
    }

    /// Fills generation $`0`$ with ascending powers of the coordinates of one SIMD group.
    ///
    /// For every axis and lane, `table[0] = 1` and `table[p] = table[p - 1] * coordinate` for
    /// `p = 1..=top`.
    ///
    /// # Arguments
    ///
    /// * `coords` - Axis-major shell-relative coordinates of the whole block.
    /// * `start` - The index of the first grid point of the group.
    /// * `width` - The number of grid points in the group, at most [`SIMDD`].
    /// * `top` - The highest power required.
    pub fn fill_powers(&mut self, coords: ArrayView2<f64>, start: usize, width: usize, top: usize) {
        debug_assert!(width <= SIMDD);
        debug_assert!(top <= self.max_power());
        for axis in 0..3 {
            let mut gen0 = self.tables.slice_mut(s![axis, 0, .., ..]);
            for n in 0..width {
                gen0[(0, n)] = 1.0;
            }
            for p in 1..=top {
                for n in 0..width {
                    gen0[(p, n)] = gen0[(p - 1, n)] * coords[(axis, start + n)];
                }
            }
        }
    }

    /// A `[power][lane]` view of one generation along one axis.
    pub fn generation(&self, axis: usize, generation: usize) -> ArrayView2<'_, f64> {
        self.tables.slice(s![axis, generation, .., ..])
    }

    /// A pair of mutable views `(source, target)` of two distinct generations along one axis.
    ///
    /// # Panics
    ///
    /// Panics if `source == target`.
    pub fn generation_pair_mut(
        &mut self,
        axis: usize,
        source: usize,
        target: usize,
    ) -> (ArrayViewMut2<'_, f64>, ArrayViewMut2<'_, f64>) {
        assert_ne!(source, target, "A generation cannot be derived from itself.");
        self.tables.multi_slice_mut((
            s![axis, source, .., ..],
            s![axis, target, .., ..],
        ))
    }
}
