use approx;
use env_logger;
use nalgebra::{Point3, Vector3};
use ndarray::{array, s, Array3};

use crate::basis::ao::GaussianShell;
use crate::drivers::grid_evaluation::{
    GridEvaluationDriver, GridEvaluationParams, GridEvaluationResult,
};
use crate::drivers::GtoGridDriver;
use crate::eval::prim_exp::prim_exps;
use crate::eval::{eval_shell, GtoOperator, ShellEvalParams};
use crate::grid::{uniform_box_points, GridBlock, BLKSIZE};
use crate::io::{read_gtogrid_binary, GtoGridFileType};

fn test_shells() -> Vec<GaussianShell> {
    vec![
        GaussianShell::new(0, Point3::new(0.0, 0.0, 0.5), &[3.4, 0.6], array![[0.15, 0.9]])
            .unwrap(),
        GaussianShell::new(
            1,
            Point3::new(0.3, -0.4, 0.0),
            &[1.1, 0.3],
            array![[0.5, 0.5], [1.0, -0.2]],
        )
        .unwrap(),
        GaussianShell::new(2, Point3::new(-0.5, 0.2, -0.1), &[0.8], array![[1.0]]).unwrap(),
    ]
}

fn test_points() -> Vec<Point3<f64>> {
    // 6 x 6 x 7 = 252 points, three blocks
    uniform_box_points(
        &Point3::new(-1.5, -1.5, -1.5),
        &Vector3::new(0.6, 0.6, 0.5),
        [6, 6, 7],
    )
}

#[test]
fn test_drivers_grid_evaluation_value() {
    let _ = env_logger::builder().is_test(true).try_init();
    let shells = test_shells();
    let points = test_points();
    let params = GridEvaluationParams::default();
    let mut driver = GridEvaluationDriver::builder()
        .parameters(&params)
        .operator(GtoOperator::Value)
        .shells(&shells)
        .grid_points(&points)
        .build()
        .unwrap();
    assert!(driver.result().is_err());
    driver.run().unwrap();
    let result = driver.result().unwrap();

    assert_eq!(result.ncomp(), 1);
    assert_eq!(result.nao(), 1 + 6 + 6);
    assert_eq!(result.ngrids(), 252);
    assert_eq!(result.nblocks, 3);
    assert_eq!(result.ao_offsets, vec![0, 1, 7]);

    // d_xy of the third shell
    let shell = &shells[2];
    for (i, pt) in points.iter().enumerate() {
        let r = pt - shell.centre;
        let expected = r[0] * r[1] * (-0.8 * r.norm_squared()).exp();
        approx::assert_relative_eq!(
            result.values[(0, 7 + 1, i)],
            expected,
            epsilon = 1e-14,
            max_relative = 1e-12
        );
    }

    // Second contraction of the p shell, z component
    let shell = &shells[1];
    for (i, pt) in points.iter().enumerate() {
        let r = pt - shell.centre;
        let rr = r.norm_squared();
        let expected = r[2] * ((-1.1 * rr).exp() - 0.2 * (-0.3 * rr).exp());
        approx::assert_relative_eq!(
            result.values[(0, 1 + 3 + 2, i)],
            expected,
            epsilon = 1e-14,
            max_relative = 1e-12
        );
    }
}

#[test]
fn test_drivers_grid_evaluation_matches_shell_evaluation() {
    let _ = env_logger::builder().is_test(true).try_init();
    let shells = test_shells();
    let points = test_points();
    let operator = GtoOperator::GradientCrossPosition;
    let params = GridEvaluationParams::builder()
        .expcutoff(30.0)
        .build()
        .unwrap();
    let mut driver = GridEvaluationDriver::builder()
        .parameters(&params)
        .operator(operator)
        .shells(&shells)
        .grid_points(&points)
        .build()
        .unwrap();
    driver.run().unwrap();
    let result = driver.result().unwrap();
    assert_eq!(result.ncomp(), 9);

    // Last block, last shell evaluated directly
    let shell = &shells[2];
    let block = GridBlock::relative_to(&points[2 * BLKSIZE..], &shell.centre).unwrap();
    let exps = prim_exps(shell, block.coords(), operator.prefactor(), 30.0).unwrap();
    let mut out = Array3::<f64>::zeros((9, shell.nao(), block.ngrids()));
    eval_shell(
        operator,
        shell,
        exps.view(),
        block.coords(),
        &ShellEvalParams::default(),
        out.view_mut(),
    )
    .unwrap();
    assert_eq!(result.values.slice(s![.., 7..13, 2 * BLKSIZE..]), out);
    assert!(result.max_abs_values().iter().all(|v| *v > 0.0));
}

#[test]
fn test_drivers_grid_evaluation_requires_origin() {
    let shells = test_shells();
    let points = test_points();
    let params = GridEvaluationParams::default();
    let mut driver = GridEvaluationDriver::builder()
        .parameters(&params)
        .operator(GtoOperator::GradientTimesOriginRelativePosition)
        .shells(&shells)
        .grid_points(&points)
        .build()
        .unwrap();
    assert!(driver.run().is_err());
    assert!(driver.result().is_err());

    let params = GridEvaluationParams::builder()
        .shell_eval(
            ShellEvalParams::builder()
                .common_origin(Some(Point3::origin()))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let mut driver = GridEvaluationDriver::builder()
        .parameters(&params)
        .operator(GtoOperator::GradientTimesOriginRelativePosition)
        .shells(&shells)
        .grid_points(&points)
        .build()
        .unwrap();
    driver.run().unwrap();
    assert_eq!(driver.result().unwrap().ncomp(), 9);
}

#[test]
fn test_drivers_grid_evaluation_invalid_builder() {
    let shells = test_shells();
    let points: Vec<Point3<f64>> = vec![];
    let params = GridEvaluationParams::default();
    assert!(GridEvaluationDriver::builder()
        .parameters(&params)
        .operator(GtoOperator::Value)
        .shells(&shells)
        .grid_points(&points)
        .build()
        .is_err());
    assert!(GridEvaluationDriver::builder()
        .parameters(&params)
        .operator(GtoOperator::Value)
        .shells(&[])
        .grid_points(&test_points())
        .build()
        .is_err());
}

#[test]
fn test_drivers_grid_evaluation_save() {
    let shells = test_shells();
    let points = test_points()[..20].to_vec();
    let name = std::env::temp_dir()
        .join(format!("gtogrid_driver_save_{}", std::process::id()))
        .to_string_lossy()
        .to_string();
    let params = GridEvaluationParams::builder()
        .result_save_name(Some(name.clone()))
        .build()
        .unwrap();
    let mut driver = GridEvaluationDriver::builder()
        .parameters(&params)
        .operator(GtoOperator::Gradient)
        .shells(&shells)
        .grid_points(&points)
        .build()
        .unwrap();
    driver.run().unwrap();
    let result = driver.result().unwrap();
    let read: GridEvaluationResult = read_gtogrid_binary(&name, GtoGridFileType::Ao).unwrap();
    assert_eq!(read.operator, GtoOperator::Gradient);
    assert_eq!(read.values, result.values);
    assert_eq!(read.ao_offsets, result.ao_offsets);
    assert_eq!(read.parameters.result_save_name, Some(name.clone()));

    let mut path = std::path::PathBuf::from(&name);
    path.set_extension(GtoGridFileType::Ao.ext());
    let _ = std::fs::remove_file(path);
}
