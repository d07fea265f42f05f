use approx;
use nalgebra::Point3;
use ndarray::{array, Array2};

use crate::eval::recurrence::{Recurrence, RecurrenceKind, RecurrenceStep};

fn powers(xs: &[f64], top: usize) -> Array2<f64> {
    Array2::from_shape_fn((top + 1, xs.len()), |(p, n)| xs[n].powi(p as i32))
}

#[test]
fn test_eval_recurrence_kind_resolve() {
    let centre = Point3::new(1.0, -2.0, 3.0);
    let origin = Point3::new(0.5, 0.5, 0.5);
    assert_eq!(
        RecurrenceKind::ShiftedPower.resolve(0, 1.2, &centre, None),
        Recurrence::ShiftedPower
    );
    assert_eq!(
        RecurrenceKind::Derivative.resolve(2, 1.2, &centre, None),
        Recurrence::Derivative { alpha: 1.2 }
    );
    assert_eq!(
        RecurrenceKind::AbsolutePosition.resolve(1, 1.2, &centre, Some(&origin)),
        Recurrence::AbsolutePosition { shift: -2.0 }
    );
    assert_eq!(
        RecurrenceKind::CommonOrigin.resolve(1, 1.2, &centre, Some(&origin)),
        Recurrence::CommonOrigin { shift: -2.5 }
    );
    assert_eq!(
        RecurrenceKind::CommonOrigin.resolve(2, 1.2, &centre, None),
        Recurrence::CommonOrigin { shift: 0.0 }
    );
}

#[test]
fn test_eval_recurrence_step_display() {
    let step = RecurrenceStep::new(RecurrenceKind::Derivative, 1, 3, 0);
    assert_eq!(step.to_string(), "g3 <- D(g1) up to l + 0");
}

#[test]
fn test_eval_recurrence_shifted_power() {
    // x * x^p = x^(p+1)
    let xs = [0.5, -1.5, 2.0];
    let old = powers(&xs, 4);
    let mut new = Array2::<f64>::zeros((4, 3));
    Recurrence::ShiftedPower.apply(old.view(), new.view_mut(), 3, 3);
    for (n, x) in xs.iter().enumerate() {
        for p in 0..=3 {
            assert_eq!(new[(p, n)], x.powi(p as i32 + 1));
        }
    }
}

#[test]
fn test_eval_recurrence_derivative() {
    // d/dx [x^p exp(-a x^2)] = (p x^(p-1) - 2 a x^(p+1)) exp(-a x^2)
    let xs = [0.3, -1.1, 0.0, 2.0];
    let alpha = 0.7;
    let old = powers(&xs, 4);
    let mut new = Array2::<f64>::from_elem((4, 4), f64::NAN);
    Recurrence::Derivative { alpha }.apply(old.view(), new.view_mut(), 3, 4);
    for (n, x) in xs.iter().enumerate() {
        approx::assert_relative_eq!(new[(0, n)], -2.0 * alpha * x, epsilon = 1e-14);
        for p in 1..=3 {
            let expected =
                p as f64 * x.powi(p as i32 - 1) - 2.0 * alpha * x.powi(p as i32 + 1);
            approx::assert_relative_eq!(new[(p, n)], expected, epsilon = 1e-13);
        }
    }
}

#[test]
fn test_eval_recurrence_translation() {
    // (x + c) x^p = c x^p + x^(p+1)
    let xs = [0.4, -0.9];
    let old = powers(&xs, 3);
    let mut new = Array2::<f64>::zeros((3, 2));
    Recurrence::AbsolutePosition { shift: 1.5 }.apply(old.view(), new.view_mut(), 2, 2);
    let mut new_c = Array2::<f64>::zeros((3, 2));
    Recurrence::CommonOrigin { shift: 1.5 }.apply(old.view(), new_c.view_mut(), 2, 2);
    for (n, x) in xs.iter().enumerate() {
        for p in 0..=2 {
            approx::assert_relative_eq!(
                new[(p, n)],
                (x + 1.5) * x.powi(p as i32),
                epsilon = 1e-14
            );
        }
    }
    assert_eq!(new, new_c);
}

#[test]
fn test_eval_recurrence_partial_width() {
    let old = array![[1.0, 1.0], [2.0, 3.0], [4.0, 9.0]];
    let mut new = Array2::<f64>::from_elem((2, 2), -7.0);
    Recurrence::Derivative { alpha: 0.5 }.apply(old.view(), new.view_mut(), 1, 1);
    assert_eq!(new[(0, 0)], -2.0);
    assert_eq!(new[(1, 0)], 1.0 - 4.0);
    assert_eq!(new[(0, 1)], -7.0);
    assert_eq!(new[(1, 1)], -7.0);
}

#[test]
fn test_eval_recurrence_source_top() {
    assert_eq!(Recurrence::ShiftedPower.source_top(3), 4);
    assert_eq!(Recurrence::Derivative { alpha: 1.0 }.source_top(3), 4);
    assert_eq!(Recurrence::CommonOrigin { shift: 1.0 }.source_top(0), 1);
}

/// `(x^p e)' / e` with `e = exp(-alpha x^2)`.
fn dmono(p: i32, x: f64, alpha: f64) -> f64 {
    let mono = |q: i32| if q < 0 { 0.0 } else { x.powi(q) };
    p as f64 * mono(p - 1) - 2.0 * alpha * mono(p + 1)
}

/// Applies `first` to generation 0 then `second` to the result, returning both generations.
fn compose(
    first: Recurrence,
    second: Recurrence,
    xs: &[f64],
    l: usize,
) -> (Array2<f64>, Array2<f64>) {
    let width = xs.len();
    let gen0 = powers(xs, l + 2);
    let mut gen1 = Array2::<f64>::zeros((l + 2, width));
    first.apply(gen0.view(), gen1.view_mut(), l + 1, width);
    let mut gen2 = Array2::<f64>::zeros((l + 1, width));
    second.apply(gen1.view(), gen2.view_mut(), l, width);
    (gen1, gen2)
}

#[test]
fn test_eval_recurrence_position_after_derivative() {
    // X = x + s: (X x^p e)' / e = x^p + X (x^p e)' / e
    let xs = [0.35, -0.8, 1.25];
    let alpha = 0.9;
    let shift = -0.6;
    for l in 1..=4 {
        for (second, s) in [
            (Recurrence::CommonOrigin { shift }, shift),
            (Recurrence::AbsolutePosition { shift }, shift),
            (Recurrence::ShiftedPower, 0.0),
        ] {
            let (gen1, gen2) = compose(Recurrence::Derivative { alpha }, second, &xs, l);
            for (n, x) in xs.iter().enumerate() {
                for p in 0..=l {
                    let pi = p as i32;
                    approx::assert_relative_eq!(
                        gen1[(p, n)],
                        dmono(pi, *x, alpha),
                        epsilon = 1e-13,
                        max_relative = 1e-12
                    );
                    approx::assert_relative_eq!(
                        gen2[(p, n)],
                        x.powi(pi) + (x + s) * dmono(pi, *x, alpha),
                        epsilon = 1e-13,
                        max_relative = 1e-12
                    );
                }
            }
        }
    }
}

#[test]
fn test_eval_recurrence_derivative_after_position() {
    // The derivative recurrence assumes plain powers: on X x^p it misses the x^p term that the
    // derivative of the translation contributes.
    let xs = [0.35, -0.8, 1.25];
    let alpha = 0.9;
    let shift = -0.6;
    for l in 1..=4 {
        let (gen1, gen2) = compose(
            Recurrence::CommonOrigin { shift },
            Recurrence::Derivative { alpha },
            &xs,
            l,
        );
        for (n, x) in xs.iter().enumerate() {
            for p in 0..=l {
                let pi = p as i32;
                approx::assert_relative_eq!(
                    gen1[(p, n)],
                    (x + shift) * x.powi(pi),
                    epsilon = 1e-13,
                    max_relative = 1e-12
                );
                approx::assert_relative_eq!(
                    gen2[(p, n)],
                    (x + shift) * dmono(pi, *x, alpha),
                    epsilon = 1e-13,
                    max_relative = 1e-12
                );
            }
        }
    }
}
