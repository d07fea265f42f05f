//! Recurrences deriving one generation of power tables from another.

use std::fmt;

use nalgebra::Point3;
use ndarray::{ArrayView2, ArrayViewMut2};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "recurrence_tests.rs"]
mod recurrence_tests;

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Recurrence kinds and recipe steps
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// Enumerated type for the kinds of recurrences that can appear in an operator recipe.
///
/// A kind is independent of the axis and of the primitive; it is resolved into a concrete
/// [`Recurrence`] by [`RecurrenceKind::resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecurrenceKind {
    /// Multiplication by the shell-relative coordinate, which amounts to reading the source one
    /// power higher.
    ShiftedPower,

    /// Derivative with respect to the grid coordinate of the Gaussian-weighted power. The source
    /// must hold plain powers (generation 0).
    Derivative,

    /// Multiplication by the absolute coordinate, *i.e.* the shell-relative coordinate shifted by
    /// the shell centre.
    AbsolutePosition,

    /// Multiplication by the coordinate relative to a common origin.
    CommonOrigin,
}

impl RecurrenceKind {
    /// Resolves this kind into a concrete recurrence along one axis.
    ///
    /// # Arguments
    ///
    /// * `axis` - The Cartesian axis (0, 1, or 2).
    /// * `alpha` - The exponent of the current primitive.
    /// * `centre` - The shell centre.
    /// * `common_origin` - The common origin, if any. [`RecurrenceKind::CommonOrigin`] resolves
    /// to a zero shift when no origin is given; callers must make sure an origin is supplied for
    /// operators requiring one.
    pub fn resolve(
        &self,
        axis: usize,
        alpha: f64,
        centre: &Point3<f64>,
        common_origin: Option<&Point3<f64>>,
    ) -> Recurrence {
        match self {
            Self::ShiftedPower => Recurrence::ShiftedPower,
            Self::Derivative => Recurrence::Derivative { alpha },
            Self::AbsolutePosition => Recurrence::AbsolutePosition {
                shift: centre[axis],
            },
            Self::CommonOrigin => Recurrence::CommonOrigin {
                shift: common_origin.map_or(0.0, |origin| centre[axis] - origin[axis]),
            },
        }
    }
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShiftedPower => write!(f, "S"),
            Self::Derivative => write!(f, "D"),
            Self::AbsolutePosition => write!(f, "R"),
            Self::CommonOrigin => write!(f, "C"),
        }
    }
}

/// Structure describing one step of an operator recipe: generation `target` is derived from
/// generation `source` by a recurrence of kind `kind`, up to power `l + top_offset` where `l` is
/// the angular momentum of the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecurrenceStep {
    /// The kind of recurrence applied.
    pub kind: RecurrenceKind,

    /// The generation read.
    pub source: usize,

    /// The generation written.
    pub target: usize,

    /// The offset added to the angular momentum to obtain the highest power written.
    pub top_offset: usize,
}

impl RecurrenceStep {
    /// Creates a recipe step.
    pub const fn new(kind: RecurrenceKind, source: usize, target: usize, top_offset: usize) -> Self {
        Self {
            kind,
            source,
            target,
            top_offset,
        }
    }
}

impl fmt::Display for RecurrenceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "g{} <- {}(g{}) up to l + {}",
            self.target, self.kind, self.source, self.top_offset
        )
    }
}

// ~~~~~~~~~~~~~~~~~~~~
// Concrete recurrences
// ~~~~~~~~~~~~~~~~~~~~

/// Enumerated type for concrete recurrences acting on one axis for one primitive.
///
/// Every recurrence writing power `p` of the new generation reads at most power `p + 1` of the
/// old one.
///
/// The position recurrences commute with differentiation in the following sense: applied to a
/// derivative generation `d[p] = (x^p e)' / e`, they produce `(X x^p e)' / e` where `X` is the
/// multiplying coordinate, because `d[p + 1] = x d[p] + x^p`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Recurrence {
    /// `new[p] = old[p + 1]`.
    ShiftedPower,

    /// `new[p] = p old[p - 1] - 2 alpha old[p + 1]`, without the first term when `p = 0`.
    Derivative { alpha: f64 },

    /// `new[p] = shift old[p] + old[p + 1]` where `shift` is the centre coordinate.
    AbsolutePosition { shift: f64 },

    /// `new[p] = shift old[p] + old[p + 1]` where `shift` is the centre coordinate relative to the
    /// common origin.
    CommonOrigin { shift: f64 },
}

impl Recurrence {
    /// The highest power of the source generation read when writing powers `0..=top`.
    pub fn source_top(&self, top: usize) -> usize {
        match self {
            Self::ShiftedPower
            | Self::Derivative { .. }
            | Self::AbsolutePosition { .. }
            | Self::CommonOrigin { .. } => top + 1,
        }
    }

    /// Applies this recurrence.
    ///
    /// # Arguments
    ///
    /// * `old` - The `[power][lane]` source generation, valid up to power
    /// [`Self::source_top`]`(top)`.
    /// * `new` - The `[power][lane]` target generation.
    /// * `top` - The highest power written.
    /// * `width` - The number of lanes written.
    pub fn apply(
        &self,
        old: ArrayView2<f64>,
        mut new: ArrayViewMut2<f64>,
        top: usize,
        width: usize,
    ) {
        debug_assert!(self.source_top(top) < old.nrows());
        debug_assert!(top < new.nrows());
        match self {
            Self::ShiftedPower => {
                for p in 0..=top {
                    for n in 0..width {
                        new[(p, n)] = old[(p + 1, n)];
                    }
                }
            }
            Self::Derivative { alpha } => {
                let a2 = -2.0 * alpha;
                for n in 0..width {
                    new[(0, n)] = a2 * old[(1, n)];
                }
                for p in 1..=top {
                    let pf = p as f64;
                    for n in 0..width {
                        new[(p, n)] = pf * old[(p - 1, n)] + a2 * old[(p + 1, n)];
                    }
                }
            }
            Self::AbsolutePosition { shift } | Self::CommonOrigin { shift } => {
                for p in 0..=top {
                    for n in 0..width {
                        new[(p, n)] = shift * old[(p, n)] + old[(p + 1, n)];
                    }
                }
            }
        }
    }
}
