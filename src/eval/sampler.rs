//! Products of generation tables forming the raw directional samples.

use ndarray::{ArrayView1, ArrayViewMut2};

use crate::eval::power_table::PowerTables;

#[cfg(test)]
#[path = "sampler_tests.rs"]
mod sampler_tests;

/// The generation assignments of a single undifferentiated sample.
pub fn scalar_layout() -> Vec<[usize; 3]> {
    vec![[0, 0, 0]]
}

/// The generation assignments of three directional samples: sample `i` uses generation 1 along
/// axis `i` and generation 0 along the other axes.
pub fn vector_layout() -> Vec<[usize; 3]> {
    (0..3)
        .map(|i| {
            let mut gens = [0; 3];
            gens[i] = 1;
            gens
        })
        .collect()
}

/// The generation assignments of nine tensor samples.
///
/// Sample `3i + j` uses generation 3 along axis `i` when `i == j`, and otherwise generation 2
/// along axis `i` and generation 1 along axis `j`. The remaining axes use generation 0.
pub fn tensor_layout() -> Vec<[usize; 3]> {
    (0..3)
        .flat_map(|i| {
            (0..3).map(move |j| {
                let mut gens = [0; 3];
                if i == j {
                    gens[i] = 3;
                } else {
                    gens[i] = 2;
                    gens[j] = 1;
                }
                gens
            })
        })
        .collect()
}

/// The nine tensor samples of [`tensor_layout`] followed by one undifferentiated sample.
pub fn tensor_with_value_layout() -> Vec<[usize; 3]> {
    let mut layout = tensor_layout();
    layout.extend(scalar_layout());
    layout
}

/// Computes the raw samples of one Cartesian component over one SIMD group.
///
/// Sample `m` at lane `n` is `e[n] * x[gx][lx][n] * y[gy][ly][n] * z[gz][lz][n]` where
/// `(gx, gy, gz) = layout[m]`.
///
/// # Arguments
///
/// * `tables` - The power tables of the current group and primitive.
/// * `layout` - The generation assignments of the samples.
/// * `exps` - The exponential prefactors of the current primitive over the group.
/// * `cart_tuple` - The Cartesian exponents $`(l_x, l_y, l_z)`$.
/// * `samples` - The `[sample][lane]` buffer to overwrite.
pub fn sample_cartesian(
    tables: &PowerTables,
    layout: &[[usize; 3]],
    exps: ArrayView1<f64>,
    cart_tuple: &(u32, u32, u32),
    mut samples: ArrayViewMut2<f64>,
) {
    let (lx, ly, lz) = (
        cart_tuple.0 as usize,
        cart_tuple.1 as usize,
        cart_tuple.2 as usize,
    );
    let width = exps.len();
    for (m, [gx, gy, gz]) in layout.iter().enumerate() {
        let fx = tables.generation(0, *gx);
        let fy = tables.generation(1, *gy);
        let fz = tables.generation(2, *gz);
        for n in 0..width {
            samples[(m, n)] = exps[n] * fx[(lx, n)] * fy[(ly, n)] * fz[(lz, n)];
        }
    }
}
