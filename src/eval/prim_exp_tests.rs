use approx;
use nalgebra::Point3;
use ndarray::array;

use crate::basis::ao::GaussianShell;
use crate::eval::prim_exp::{prim_exps, EXPCUTOFF};

#[test]
fn test_eval_prim_exps() {
    let shell = GaussianShell::new(
        1,
        Point3::origin(),
        &[2.0, 0.5],
        array![[0.3, 0.7], [-1.2, 0.0]],
    )
    .unwrap();
    let coords = array![[0.0, 1.0, 0.5], [0.0, 0.0, -0.5], [0.0, 1.0, 0.0]];
    let exps = prim_exps(&shell, coords.view(), 0.5, EXPCUTOFF).unwrap();
    assert_eq!(exps.dim(), (2, 3));
    approx::assert_relative_eq!(exps[(0, 0)], 0.5);
    approx::assert_relative_eq!(exps[(0, 1)], 0.5 * (-4.0_f64).exp(), max_relative = 1e-14);
    approx::assert_relative_eq!(exps[(1, 2)], 0.5 * (-0.25_f64).exp(), max_relative = 1e-14);
}

#[test]
fn test_eval_prim_exps_cutoff() {
    let shell = GaussianShell::new(0, Point3::origin(), &[1.0, 1.0], array![[1.0, 1e-3]]).unwrap();
    // r^2 = 49: 49 - ln(1) < 50 is kept, 49 - ln(1e-3) = 55.9 is not.
    let coords = array![[7.0], [0.0], [0.0]];
    let exps = prim_exps(&shell, coords.view(), 1.0, EXPCUTOFF).unwrap();
    assert!(exps[(0, 0)] > 0.0);
    assert_eq!(exps[(1, 0)], 0.0);

    let exps_tight = prim_exps(&shell, coords.view(), 1.0, 10.0).unwrap();
    assert_eq!(exps_tight[(0, 0)], 0.0);
}

#[test]
fn test_eval_prim_exps_invalid() {
    let shell = GaussianShell::new(0, Point3::origin(), &[1.0], array![[1.0]]).unwrap();
    assert!(prim_exps(&shell, array![[0.0], [0.0]].view(), 1.0, EXPCUTOFF).is_err());
    assert!(prim_exps(&shell, array![[0.0], [0.0], [0.0]].view(), 1.0, 0.0).is_err());
}
