//! Catalog of operators that can be evaluated on contracted Gaussian shells.

use std::fmt;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::eval::combiner::Combination;
use crate::eval::recurrence::RecurrenceKind::{
    AbsolutePosition, CommonOrigin, Derivative, ShiftedPower,
};
use crate::eval::recurrence::{RecurrenceKind, RecurrenceStep};
use crate::eval::sampler::{scalar_layout, tensor_layout, tensor_with_value_layout, vector_layout};

#[cfg(test)]
#[path = "operator_tests.rs"]
mod operator_tests;

// ~~~~~~~
// Recipes
// ~~~~~~~

const GRADIENT_RECIPE: [RecurrenceStep; 1] = [RecurrenceStep::new(Derivative, 0, 1, 0)];

const CROSS_POSITION_RECIPE: [RecurrenceStep; 1] =
    [RecurrenceStep::new(AbsolutePosition, 0, 1, 0)];

const GRADIENT_CROSS_POSITION_RECIPE: [RecurrenceStep; 3] = [
    RecurrenceStep::new(AbsolutePosition, 0, 1, 0),
    RecurrenceStep::new(Derivative, 0, 2, 1),
    RecurrenceStep::new(AbsolutePosition, 2, 3, 0),
];

const GRADIENT_OF_SPIN_DOT_GRADIENT_RECIPE: [RecurrenceStep; 3] = [
    RecurrenceStep::new(Derivative, 0, 1, 0),
    RecurrenceStep::new(Derivative, 0, 2, 1),
    RecurrenceStep::new(Derivative, 2, 3, 0),
];

const GRADIENT_TIMES_ORIGIN_RELATIVE_POSITION_RECIPE: [RecurrenceStep; 3] = [
    RecurrenceStep::new(CommonOrigin, 0, 1, 0),
    RecurrenceStep::new(Derivative, 0, 2, 1),
    RecurrenceStep::new(CommonOrigin, 2, 3, 0),
];

const GRADIENT_TIMES_SHELL_RELATIVE_POSITION_RECIPE: [RecurrenceStep; 3] = [
    RecurrenceStep::new(ShiftedPower, 0, 1, 0),
    RecurrenceStep::new(Derivative, 0, 2, 1),
    RecurrenceStep::new(ShiftedPower, 2, 3, 0),
];

// ~~~~~~~~~
// Operators
// ~~~~~~~~~

/// Enumerated type for the operators that can be applied to a contracted Gaussian shell before
/// evaluation on a grid.
///
/// Each operator is characterised by its recipe of recurrences building generations of power
/// tables and by the layout selecting which generations are multiplied together into raw
/// samples. A static linear combination then turns these samples into output components. Below,
/// $`\mathbf{R}`$ is the shell centre, $`\mathbf{O}`$ the common origin, $`\mathbf{r}`$ the
/// grid point, and $`\phi`$ a Cartesian Gaussian. Nine-component operators are laid out as
/// $`3i + j`$ with $`i`$ the direction of differentiation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GtoOperator {
    /// $`\phi`$ itself (1 component).
    Value,

    /// $`\nabla \phi`$ (3 components).
    Gradient,

    /// $`(\mathbf{R} \times \mathbf{r}) \phi`$ (3 components), reported with prefactor
    /// $`1/2`$.
    #[serde(alias = "ig")]
    CrossPosition,

    /// $`\partial_i [(\mathbf{R} \times \mathbf{r})_k \phi]`$ (9 components), reported with
    /// prefactor $`1/2`$.
    #[serde(alias = "ipig")]
    GradientCrossPosition,

    /// The spin-free part of $`\boldsymbol{\sigma} \cdot \mathbf{p}\, \phi`$ up to a factor of
    /// $`i`$ (4 components, the last one identically zero).
    #[serde(alias = "sp")]
    SpinDotGradient,

    /// $`\partial_i`$ of [`Self::SpinDotGradient`] (12 components).
    #[serde(alias = "ipsp")]
    GradientOfSpinDotGradient,

    /// $`\partial_i [(\mathbf{r} - \mathbf{O})_j \phi]
    /// = \delta_{ij} \phi + (\mathbf{r} - \mathbf{O})_j\, \partial_i \phi`$ (9 components).
    #[serde(alias = "iprc")]
    GradientTimesOriginRelativePosition,

    /// $`\partial_i [(\mathbf{r} - \mathbf{R})_j \phi]`$ (9 components).
    #[serde(alias = "ipr")]
    GradientTimesShellRelativePosition,

    /// $`(\mathbf{r} - \mathbf{O})_j\, \partial_i \phi`$ (9 components), the operators of
    /// [`Self::GradientTimesOriginRelativePosition`] applied in the opposite order.
    #[serde(alias = "rcip")]
    OriginRelativePositionTimesGradient,
}

impl GtoOperator {
    /// All operators in the catalog.
    pub const ALL: [GtoOperator; 9] = [
        Self::Value,
        Self::Gradient,
        Self::CrossPosition,
        Self::GradientCrossPosition,
        Self::SpinDotGradient,
        Self::GradientOfSpinDotGradient,
        Self::GradientTimesOriginRelativePosition,
        Self::GradientTimesShellRelativePosition,
        Self::OriginRelativePositionTimesGradient,
    ];

    /// The conventional short label of this operator.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Value => "val",
            Self::Gradient => "ip",
            Self::CrossPosition => "ig",
            Self::GradientCrossPosition => "ipig",
            Self::SpinDotGradient => "sp",
            Self::GradientOfSpinDotGradient => "ipsp",
            Self::GradientTimesOriginRelativePosition => "iprc",
            Self::GradientTimesShellRelativePosition => "ipr",
            Self::OriginRelativePositionTimesGradient => "rcip",
        }
    }

    /// The number of output components.
    pub fn ncomp(&self) -> usize {
        match self {
            Self::Value => 1,
            Self::Gradient | Self::CrossPosition => 3,
            Self::SpinDotGradient => 4,
            Self::GradientCrossPosition
            | Self::GradientTimesOriginRelativePosition
            | Self::GradientTimesShellRelativePosition
            | Self::OriginRelativePositionTimesGradient => 9,
            Self::GradientOfSpinDotGradient => 12,
        }
    }

    /// The generation assignments of the raw samples.
    pub fn sample_layout(&self) -> Vec<[usize; 3]> {
        match self {
            Self::Value => scalar_layout(),
            Self::Gradient | Self::CrossPosition | Self::SpinDotGradient => vector_layout(),
            Self::GradientCrossPosition
            | Self::GradientOfSpinDotGradient
            | Self::GradientTimesOriginRelativePosition
            | Self::GradientTimesShellRelativePosition => tensor_layout(),
            Self::OriginRelativePositionTimesGradient => tensor_with_value_layout(),
        }
    }

    /// The number of raw samples per Cartesian component.
    pub fn nsample(&self) -> usize {
        self.sample_layout().len()
    }

    /// The recurrence steps building generations 1 and beyond, in order of application.
    pub fn recipe(&self) -> &'static [RecurrenceStep] {
        match self {
            Self::Value => &[],
            Self::Gradient | Self::SpinDotGradient => &GRADIENT_RECIPE,
            Self::CrossPosition => &CROSS_POSITION_RECIPE,
            Self::GradientCrossPosition => &GRADIENT_CROSS_POSITION_RECIPE,
            Self::GradientOfSpinDotGradient => &GRADIENT_OF_SPIN_DOT_GRADIENT_RECIPE,
            Self::GradientTimesOriginRelativePosition
            | Self::OriginRelativePositionTimesGradient => {
                &GRADIENT_TIMES_ORIGIN_RELATIVE_POSITION_RECIPE
            }
            Self::GradientTimesShellRelativePosition => {
                &GRADIENT_TIMES_SHELL_RELATIVE_POSITION_RECIPE
            }
        }
    }

    /// The number of generations of power tables required, including generation 0.
    pub fn ngenerations(&self) -> usize {
        self.recipe()
            .iter()
            .map(|step| step.target + 1)
            .max()
            .unwrap_or(1)
    }

    /// The highest power of generation 0 required, relative to the angular momentum.
    pub fn max_power_offset(&self) -> usize {
        match self {
            Self::Value => 0,
            Self::Gradient | Self::CrossPosition | Self::SpinDotGradient => 1,
            Self::GradientCrossPosition
            | Self::GradientOfSpinDotGradient
            | Self::GradientTimesOriginRelativePosition
            | Self::GradientTimesShellRelativePosition
            | Self::OriginRelativePositionTimesGradient => 2,
        }
    }

    /// The factor expected to have been folded into the exponential prefactors. It is not applied
    /// by the shell evaluation itself.
    pub fn prefactor(&self) -> f64 {
        match self {
            Self::CrossPosition | Self::GradientCrossPosition => 0.5,
            _ => 1.0,
        }
    }

    /// Whether this operator refers to a common origin.
    pub fn requires_common_origin(&self) -> bool {
        self.recipe()
            .iter()
            .any(|step| step.kind == RecurrenceKind::CommonOrigin)
    }

    /// The linear combination forming the output components from the raw samples.
    ///
    /// # Arguments
    ///
    /// * `centre` - The shell centre, needed by the cross-product operators.
    pub fn combination(&self, centre: &Point3<f64>) -> Combination {
        let c = [-centre[0], -centre[1], -centre[2]];
        match self {
            Self::CrossPosition => Combination::cross(&c, 1),
            Self::GradientCrossPosition => Combination::cross(&c, 3),
            Self::SpinDotGradient => Combination::negated_with_zero(1),
            Self::GradientOfSpinDotGradient => Combination::negated_with_zero(3),
            Self::OriginRelativePositionTimesGradient => Combination::minus_value_on_diagonal(),
            Self::Value
            | Self::Gradient
            | Self::GradientTimesOriginRelativePosition
            | Self::GradientTimesShellRelativePosition => Combination::identity(self.nsample()),
        }
    }
}

impl fmt::Display for GtoOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Value => "Value",
            Self::Gradient => "Gradient",
            Self::CrossPosition => "Cross position",
            Self::GradientCrossPosition => "Gradient of cross position",
            Self::SpinDotGradient => "Spin dot gradient",
            Self::GradientOfSpinDotGradient => "Gradient of spin dot gradient",
            Self::GradientTimesOriginRelativePosition => "Gradient times origin-relative position",
            Self::GradientTimesShellRelativePosition => "Gradient times shell-relative position",
            Self::OriginRelativePositionTimesGradient => "Origin-relative position times gradient",
        };
        write!(f, "{name} ({})", self.label())
    }
}
