use super::*;

#[test]
fn round_half_up_ties_go_up() {
    assert_eq!(round_half_up(2.5), 3.0);
    assert_eq!(round_half_up(-2.5), -2.0);
    assert_eq!(round_half_up(2.49), 2.0);
    assert_eq!(round_half_up(-0.4), 0.0);
}

#[test]
fn gcd_handles_zero_and_coprime() {
    assert_eq!(gcd_u128(12, 18), 6);
    assert_eq!(gcd_u128(7, 0), 7);
    assert_eq!(gcd_u128(9, 28), 1);
}

#[test]
fn approximate_recovers_simple_fractions() {
    assert_eq!(Ratio::approximate(1.5), Ratio::new(3, 2));
    assert_eq!(Ratio::approximate(0.25), Ratio::new(1, 4));
    assert_eq!(Ratio::approximate(3.0), Ratio::new(3, 1));
    assert_eq!(Ratio::approximate(1.0 / 3.0), Ratio::new(1, 3));
    assert_eq!(Ratio::approximate(0.1), Ratio::new(1, 10));
}

#[test]
fn approximate_rejects_non_positive_and_tiny_values() {
    assert!(Ratio::approximate(0.0).is_none());
    assert!(Ratio::approximate(-1.0).is_none());
    assert!(Ratio::approximate(f64::NAN).is_none());
    assert!(Ratio::approximate(1e-12).is_none());
}

#[test]
fn ratio_lcm_of_fractions() {
    let a = Ratio::new(3, 2).unwrap();
    let b = Ratio::new(2, 1).unwrap();
    assert_eq!(a.lcm(b), Ratio::new(6, 1));

    let third = Ratio::new(1, 3).unwrap();
    let half = Ratio::new(1, 2).unwrap();
    assert_eq!(third.lcm(half), Ratio::new(1, 1));
}

#[test]
fn ratio_lcm_reports_overflow() {
    let big = Ratio::new(u128::MAX - 1, 1).unwrap();
    let other = Ratio::new(u128::MAX - 2, 1).unwrap();
    assert!(big.lcm(other).is_none());
}

#[test]
fn approximate_within_respects_the_denominator_bound() {
    assert_eq!(
        Ratio::approximate_within(1.0 / 60.0, 65_535),
        Ratio::new(1, 60)
    );
    assert_eq!(
        Ratio::approximate_within(1.0 / 29.97, 65_535),
        Ratio::new(100, 2997)
    );
    assert!(Ratio::approximate_within(1.0 / 70_000.0, 65_535).is_none());
}
