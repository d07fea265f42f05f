//! Linear combinations of raw samples forming the components of an operator.

use std::fmt;

use anyhow::{self, ensure};
use itertools::Itertools;
use ndarray::{ArrayView2, ArrayViewMut2};

#[cfg(test)]
#[path = "combiner_tests.rs"]
mod combiner_tests;

/// Structure holding a static linear combination of raw samples.
///
/// Each output component is a list of `(sample index, weight)` terms. An empty list denotes a
/// component that vanishes identically.
#[derive(Clone, Debug, PartialEq)]
pub struct Combination {
    /// The number of raw samples consumed.
    nsample: usize,

    /// The terms of each output component.
    terms: Vec<Vec<(usize, f64)>>,
}

impl Combination {
    /// Constructs a combination from explicit term lists.
    ///
    /// # Errors
    ///
    /// Errors if any term refers to a sample index not smaller than `nsample`.
    pub fn new(nsample: usize, terms: Vec<Vec<(usize, f64)>>) -> Result<Self, anyhow::Error> {
        ensure!(
            terms.iter().flatten().all(|(k, _)| *k < nsample),
            "Combination terms refer to samples beyond the {nsample} available."
        );
        Ok(Self { nsample, terms })
    }

    /// Every sample becomes one component unchanged.
    pub fn identity(nsample: usize) -> Self {
        Self {
            nsample,
            terms: (0..nsample).map(|k| vec![(k, 1.0)]).collect(),
        }
    }

    /// Cross product with a fixed vector, applied to each consecutive triple of samples.
    ///
    /// With `c` the fixed vector and `s` one triple of samples, the resulting triple is
    /// `(-c[1] s[2] + c[2] s[1], -c[2] s[0] + c[0] s[2], -c[0] s[1] + c[1] s[0])`.
    pub fn cross(c: &[f64; 3], ntriples: usize) -> Self {
        let terms = (0..ntriples)
            .flat_map(|t| {
                let b = 3 * t;
                [
                    vec![(b + 2, -c[1]), (b + 1, c[2])],
                    vec![(b, -c[2]), (b + 2, c[0])],
                    vec![(b + 1, -c[0]), (b, c[1])],
                ]
            })
            .collect();
        Self {
            nsample: 3 * ntriples,
            terms,
        }
    }

    /// Each consecutive triple of samples is negated and followed by an identically vanishing
    /// fourth component.
    pub fn negated_with_zero(ntriples: usize) -> Self {
        let terms = (0..ntriples)
            .flat_map(|t| {
                let b = 3 * t;
                [
                    vec![(b, -1.0)],
                    vec![(b + 1, -1.0)],
                    vec![(b + 2, -1.0)],
                    vec![],
                ]
            })
            .collect();
        Self {
            nsample: 3 * ntriples,
            terms,
        }
    }

    /// Nine tensor samples copied unchanged, except that a tenth value sample is subtracted from
    /// the diagonal components `0`, `4` and `8`.
    pub fn minus_value_on_diagonal() -> Self {
        let terms = (0..9)
            .map(|ij| {
                if ij % 4 == 0 {
                    vec![(ij, 1.0), (9, -1.0)]
                } else {
                    vec![(ij, 1.0)]
                }
            })
            .collect();
        Self { nsample: 10, terms }
    }

    /// The number of raw samples consumed.
    pub fn nsample(&self) -> usize {
        self.nsample
    }

    /// The number of output components produced.
    pub fn ncomp(&self) -> usize {
        self.terms.len()
    }

    /// Applies this combination lane by lane.
    ///
    /// # Arguments
    ///
    /// * `samples` - The `[sample][lane]` raw samples.
    /// * `width` - The number of lanes to combine.
    /// * `out` - The `[component][lane]` buffer to overwrite.
    pub fn apply(&self, samples: ArrayView2<f64>, width: usize, mut out: ArrayViewMut2<f64>) {
        debug_assert!(samples.nrows() >= self.nsample);
        debug_assert!(out.nrows() >= self.ncomp());
        for (m, terms) in self.terms.iter().enumerate() {
            for n in 0..width {
                out[(m, n)] = terms
                    .iter()
                    .fold(0.0, |acc, &(k, w)| acc + w * samples[(k, n)]);
            }
        }
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (m, terms) in self.terms.iter().enumerate() {
            let rhs = if terms.is_empty() {
                "0".to_string()
            } else {
                terms
                    .iter()
                    .map(|(k, w)| format!("{w:+.3} s{k}"))
                    .join(" ")
            };
            writeln!(f, "out{m} = {rhs}")?;
        }
        Ok(())
    }
}
