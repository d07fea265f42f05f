use approx;
use ndarray::{array, Array2};

use crate::eval::power_table::PowerTables;
use crate::eval::recurrence::Recurrence;
use crate::eval::sampler::{
    sample_cartesian, scalar_layout, tensor_layout, tensor_with_value_layout, vector_layout,
};

#[test]
fn test_eval_sampler_layouts() {
    assert_eq!(scalar_layout(), vec![[0, 0, 0]]);
    assert_eq!(vector_layout(), vec![[1, 0, 0], [0, 1, 0], [0, 0, 1]]);
    assert_eq!(
        tensor_layout(),
        vec![
            [3, 0, 0],
            [2, 1, 0],
            [2, 0, 1],
            [1, 2, 0],
            [0, 3, 0],
            [0, 2, 1],
            [1, 0, 2],
            [0, 1, 2],
            [0, 0, 3],
        ]
    );
    let with_value = tensor_with_value_layout();
    assert_eq!(with_value.len(), 10);
    assert_eq!(with_value[..9], tensor_layout()[..]);
    assert_eq!(with_value[9], [0, 0, 0]);
}

#[test]
fn test_eval_sampler_scalar() {
    let coords = array![[0.5, -1.0], [2.0, 0.25], [-1.5, 3.0]];
    let mut tables = PowerTables::new(1, 3);
    tables.fill_powers(coords.view(), 0, 2, 3);
    let exps = array![0.8, 0.1];
    let mut samples = Array2::<f64>::zeros((1, 8));
    sample_cartesian(
        &tables,
        &scalar_layout(),
        exps.view(),
        &(2, 0, 1),
        samples.view_mut(),
    );
    for n in 0..2 {
        let (x, z): (f64, f64) = (coords[(0, n)], coords[(2, n)]);
        approx::assert_relative_eq!(samples[(0, n)], exps[n] * x * x * z, max_relative = 1e-14);
    }
    assert_eq!(samples[(0, 2)], 0.0);
}

#[test]
fn test_eval_sampler_vector_uses_first_generation() {
    let coords = array![[0.5], [2.0], [-1.5]];
    let alpha = 0.9;
    let mut tables = PowerTables::new(2, 2);
    tables.fill_powers(coords.view(), 0, 1, 2);
    for axis in 0..3 {
        let (old, new) = tables.generation_pair_mut(axis, 0, 1);
        Recurrence::Derivative { alpha }.apply(old.view(), new, 1, 1);
    }
    let exps = array![1.0];
    let mut samples = Array2::<f64>::zeros((3, 8));
    sample_cartesian(
        &tables,
        &vector_layout(),
        exps.view(),
        &(1, 0, 0),
        samples.view_mut(),
    );
    let (x, y, z) = (0.5, 2.0, -1.5);
    // d/dx x: 1 - 2 a x^2; d/dy x: -2 a x y; d/dz x: -2 a x z
    approx::assert_relative_eq!(samples[(0, 0)], 1.0 - 2.0 * alpha * x * x, epsilon = 1e-14);
    approx::assert_relative_eq!(samples[(1, 0)], -2.0 * alpha * x * y, epsilon = 1e-14);
    approx::assert_relative_eq!(samples[(2, 0)], -2.0 * alpha * x * z, epsilon = 1e-14);
}
