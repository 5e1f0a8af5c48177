use chrono::{TimeZone, Utc};
use densite_domain::{DensityStats, DomainError, Locality, LocalityKind};
use std::str::FromStr;
use strum::IntoEnumIterator;

#[test]
fn construction_trims_and_stores_name() {
    let locality = Locality::new("  Grand Ville  ", 120_000, 48.0, LocalityKind::Urban).unwrap();
    assert_eq!(locality.name(), "Grand Ville");
    assert_eq!(locality.population(), 120_000);
    assert_eq!(locality.kind(), LocalityKind::Urban);
}

#[test]
fn blank_name_is_rejected() {
    let err = Locality::new("   ", 10, 1.0, LocalityKind::Rural).unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
    assert!(err.to_string().contains("name"));
}

#[test]
fn non_positive_area_is_rejected() {
    for area in [0.0, -3.5, f64::NAN, f64::INFINITY] {
        let result = Locality::new("Petit Bourg", 10, area, LocalityKind::Rural);
        assert!(result.is_err(), "area {area} should be rejected");
    }
}

#[test]
fn density_is_exact_division() {
    let locality = Locality::new("Ville", 100, 8.0, LocalityKind::Urban).unwrap();
    assert!((locality.density() - 12.5).abs() < f64::EPSILON);
    assert!(locality.density().is_finite());
    assert!(locality.density() >= 0.0);
}

#[test]
fn zero_population_density_is_zero() {
    let locality = Locality::new("Hameau", 0, 4.0, LocalityKind::Rural).unwrap();
    assert!((locality.density() - 0.0).abs() < f64::EPSILON);
}

#[test]
fn from_parts_keeps_given_timestamp() {
    let stamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
    let locality = Locality::from_parts("Ville", 10, 1.0, LocalityKind::Urban, stamp).unwrap();
    assert_eq!(locality.registered_at(), stamp);
}

#[test]
fn kind_round_trips_through_strings() {
    assert_eq!(LocalityKind::Urban.to_string(), "URBAN");
    assert_eq!(LocalityKind::from_str("RURAL").unwrap(), LocalityKind::Rural);
    assert_eq!(LocalityKind::iter().count(), 2);
}

#[test]
fn density_stats_summarize() {
    let stats = DensityStats::from_densities([10.0, 20.0, 30.0]).unwrap();
    assert_eq!(stats.count, 3);
    assert!((stats.average - 20.0).abs() < f64::EPSILON);
    assert!((stats.min - 10.0).abs() < f64::EPSILON);
    assert!((stats.max - 30.0).abs() < f64::EPSILON);
}

#[test]
fn density_stats_empty_is_none() {
    assert!(DensityStats::from_densities(std::iter::empty()).is_none());
}
