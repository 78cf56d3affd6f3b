use velocity_speed_tables::interp::{BreakpointError, Breakpoints};
use velocity_speed_tables::samples::Samples;

fn table(x: &[f64], y: &[f64]) -> Breakpoints {
    Breakpoints::new(x.to_vec(), y.to_vec()).expect("valid breakpoint table")
}

#[test]
fn linear_interpolation_between_breakpoints() {
    let vmo = table(&[0.0, 20_000.0, 40_000.0], &[350.0, 330.0, 310.0]);
    assert_eq!(vmo.eval(0.0), Some(350.0));
    assert_eq!(vmo.eval(10_000.0), Some(340.0));
    assert_eq!(vmo.eval(20_000.0), Some(330.0));
    assert_eq!(vmo.eval(30_000.0), Some(320.0));
    assert_eq!(vmo.eval(40_000.0), Some(310.0));
}

#[test]
fn stepped_table_is_right_continuous_at_the_duplicate() {
    let vmo = table(
        &[0.0, 20_000.0, 20_000.0, 40_000.0],
        &[350.0, 350.0, 300.0, 300.0],
    );
    assert_eq!(vmo.eval(0.0), Some(350.0));
    assert_eq!(vmo.eval(19_999.0), Some(350.0));
    assert_eq!(vmo.eval(20_000.0), Some(300.0));
    assert_eq!(vmo.eval(20_001.0), Some(300.0));
    assert_eq!(vmo.eval(40_000.0), Some(300.0));
}

#[test]
fn out_of_range_and_nan_are_missing() {
    let vmo = table(&[0.0, 40_000.0], &[350.0, 310.0]);
    assert_eq!(vmo.eval(-1.0), None);
    assert_eq!(vmo.eval(40_000.1), None);
    assert_eq!(vmo.eval(f64::NAN), None);
}

#[test]
fn single_point_table_matches_only_its_breakpoint() {
    let fixed = table(&[25_000.0], &[320.0]);
    assert_eq!(fixed.eval(25_000.0), Some(320.0));
    assert_eq!(fixed.eval(24_999.0), None);
    assert_eq!(fixed.eval(25_001.0), None);
}

#[test]
fn interpolated_value_is_bounded_by_the_bracketing_breakpoints() {
    let vmo = table(
        &[0.0, 10_000.0, 25_000.0, 41_000.0],
        &[335.0, 340.0, 322.0, 310.0],
    );
    let mut at = 0.0;
    while at <= 41_000.0 {
        let value = vmo.eval(at).expect("within range");
        assert!(
            (310.0..=340.0).contains(&value),
            "value {value} at {at} escapes breakpoint bounds"
        );
        at += 500.0;
    }
}

#[test]
fn series_evaluation_preserves_shape_and_missingness() {
    let vmo = table(&[0.0, 40_000.0], &[350.0, 310.0]);
    let altitude = Samples::Series(vec![Some(0.0), None, Some(20_000.0), Some(50_000.0)]);
    let result = vmo.eval_samples(&altitude);
    assert_eq!(
        result,
        Samples::Series(vec![Some(350.0), None, Some(330.0), None])
    );

    let scalar = vmo.eval_samples(&Samples::from(10_000.0));
    assert_eq!(scalar, Samples::Scalar(Some(340.0)));
}

#[test]
fn construction_rejects_malformed_tables() {
    assert_eq!(
        Breakpoints::new(vec![], vec![]).unwrap_err(),
        BreakpointError::Empty
    );
    assert_eq!(
        Breakpoints::new(vec![0.0, 1.0], vec![100.0]).unwrap_err(),
        BreakpointError::LengthMismatch {
            breakpoints: 2,
            values: 1
        }
    );
    assert_eq!(
        Breakpoints::new(vec![0.0, 2.0, 1.0], vec![100.0, 110.0, 120.0]).unwrap_err(),
        BreakpointError::Unsorted(2)
    );
}

#[test]
fn duplicate_breakpoints_are_legal() {
    let stepped = Breakpoints::new(vec![0.0, 0.0], vec![100.0, 90.0]);
    assert!(stepped.is_ok());
}
