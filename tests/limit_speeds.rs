use velocity_speed_tables::interp::Breakpoints;
use velocity_speed_tables::lookup::{LimitTable, VelocitySpeedTableSet};
use velocity_speed_tables::samples::Samples;

fn with_limits(vmo: LimitTable, mmo: LimitTable) -> VelocitySpeedTableSet {
    VelocitySpeedTableSet {
        vmo,
        mmo,
        ..VelocitySpeedTableSet::default()
    }
}

fn banded(altitude: &[f64], speed: &[f64]) -> LimitTable {
    LimitTable::Banded(
        Breakpoints::new(altitude.to_vec(), speed.to_vec()).expect("valid limit table"),
    )
}

#[test]
fn undefined_limit_is_missing_everywhere() {
    let tables = with_limits(LimitTable::Undefined, LimitTable::Undefined);
    assert_eq!(tables.vmo(&Samples::from(20_000.0)), Samples::missing());
    assert_eq!(tables.mmo(&Samples::from(20_000.0)), Samples::missing());

    let altitude = Samples::Series(vec![Some(0.0), None, Some(40_000.0)]);
    assert_eq!(tables.vmo(&altitude), Samples::Series(vec![None; 3]));
}

#[test]
fn fixed_limit_respects_positional_missingness() {
    let tables = with_limits(LimitTable::Fixed(350.0), LimitTable::Fixed(0.85));
    assert_eq!(tables.vmo(&Samples::from(0.0)), Samples::from(350.0));
    assert_eq!(tables.vmo(&Samples::from(40_000.0)), Samples::from(350.0));
    assert_eq!(tables.mmo(&Samples::from(30_000.0)), Samples::from(0.85));
    // No recorded altitude, no limit: a fixed value has no fallback tier.
    assert_eq!(tables.vmo(&Samples::missing()), Samples::missing());

    let altitude = Samples::Series(vec![Some(0.0), Some(10_000.0), None, Some(30_000.0)]);
    assert_eq!(
        tables.vmo(&altitude),
        Samples::Series(vec![Some(350.0), Some(350.0), None, Some(350.0)])
    );
}

#[test]
fn stepped_vmo_drops_at_the_repeated_altitude() {
    let tables = with_limits(
        banded(
            &[0.0, 20_000.0, 20_000.0, 40_000.0],
            &[350.0, 350.0, 300.0, 300.0],
        ),
        LimitTable::Undefined,
    );
    assert_eq!(tables.vmo(&Samples::from(19_999.0)), Samples::from(350.0));
    assert_eq!(tables.vmo(&Samples::from(20_000.0)), Samples::from(300.0));
    assert_eq!(tables.vmo(&Samples::from(20_001.0)), Samples::from(300.0));
}

#[test]
fn interpolated_vmo_is_linear_between_breakpoints() {
    let tables = with_limits(
        banded(&[0.0, 20_000.0, 40_000.0], &[350.0, 330.0, 310.0]),
        LimitTable::Undefined,
    );
    assert_eq!(tables.vmo(&Samples::from(10_000.0)), Samples::from(340.0));
    assert_eq!(tables.vmo(&Samples::from(30_000.0)), Samples::from(320.0));

    let altitude = Samples::Series(vec![
        Some(0.0),
        Some(10_000.0),
        None,
        Some(30_000.0),
        Some(40_000.0),
    ]);
    assert_eq!(
        tables.vmo(&altitude),
        Samples::Series(vec![
            Some(350.0),
            Some(340.0),
            None,
            Some(320.0),
            Some(310.0)
        ])
    );
}

#[test]
fn out_of_range_altitude_is_missing_with_no_fallback_tier() {
    let tables = with_limits(
        banded(&[0.0, 41_000.0], &[335.0, 310.0]),
        LimitTable::Undefined,
    );
    assert_eq!(tables.vmo(&Samples::from(-100.0)), Samples::missing());
    assert_eq!(tables.vmo(&Samples::from(41_001.0)), Samples::missing());
}

#[test]
fn mmo_tables_interpolate_without_rounding() {
    let tables = with_limits(
        LimitTable::Undefined,
        banded(&[0.0, 20_000.0, 40_000.0], &[0.86, 0.83, 0.80]),
    );
    let mach_at = |altitude: f64| match tables.mmo(&Samples::from(altitude)) {
        Samples::Scalar(Some(value)) => value,
        other => panic!("expected a present scalar, got {other:?}"),
    };
    assert!((mach_at(0.0) - 0.86).abs() < 1e-12);
    assert!((mach_at(10_000.0) - 0.845).abs() < 1e-12);
    assert!((mach_at(20_000.0) - 0.83).abs() < 1e-12);
    assert!((mach_at(40_000.0) - 0.80).abs() < 1e-12);
}

#[test]
fn stepped_mmo_drops_at_the_repeated_altitude() {
    let tables = with_limits(
        LimitTable::Undefined,
        banded(
            &[0.0, 20_000.0, 20_000.0, 40_000.0],
            &[0.85, 0.85, 0.80, 0.80],
        ),
    );
    assert_eq!(tables.mmo(&Samples::from(19_999.0)), Samples::from(0.85));
    assert_eq!(tables.mmo(&Samples::from(20_000.0)), Samples::from(0.80));
    assert_eq!(tables.mmo(&Samples::from(20_001.0)), Samples::from(0.80));
}

#[test]
fn minimum_speed_floor_never_applies_to_limits() {
    let mut tables = with_limits(
        banded(&[0.0, 41_000.0], &[335.0, 310.0]),
        LimitTable::Undefined,
    );
    tables.minimum_speed = Some(340.0);
    assert_eq!(tables.vmo(&Samples::from(41_000.0)), Samples::from(310.0));
}
