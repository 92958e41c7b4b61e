//! GPS trace anomaly correction.
//!
//! Live tracking occasionally receives glitched fixes reporting coordinates
//! far outside the plausible neighborhood of the surrounding trajectory.
//! This module drops those samples from a trace; it never corrects or
//! interpolates them.
//!
//! # Invariants
//! - Deterministic and side-effect-free; the input is never mutated.
//! - Sample order is preserved; output length equals input length minus the
//!   number of detected anomalies.
//! - Idempotent for plausible GPS noise: a second pass finds nothing left
//!   to remove.

use tracing::debug;

use crate::config::TraceConfig;
use crate::model::TracePoint;

/// Mean earth radius in meters, for great-circle distances.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Remove anomalous samples from an ordered GPS trace.
///
/// An interior sample is an anomaly when it sits outside the plausible
/// envelope of BOTH its surviving predecessor and its successor: the
/// great-circle distance for the hop must stay within
/// `tolerance_m + max_speed_mps * Δt`. Endpoints have at most one neighbor
/// to judge against and are never dropped, so sequences of two or fewer
/// samples are returned unchanged.
///
/// Comparing against the surviving predecessor (rather than the raw one)
/// keeps one glitch from sheltering the next in a consecutive run.
#[must_use]
pub fn correct_trace(points: &[TracePoint], config: &TraceConfig) -> Vec<TracePoint> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut kept = Vec::with_capacity(points.len());
    kept.push(points[0]);

    for (index, point) in points.iter().enumerate().skip(1) {
        if index == points.len() - 1 {
            kept.push(*point);
            break;
        }

        let previous = &kept[kept.len() - 1];
        let next = &points[index + 1];
        if plausible_hop(previous, point, config) || plausible_hop(point, next, config) {
            kept.push(*point);
        } else {
            debug!(
                "dropping anomalous sample {index} at ({}, {})",
                point.latitude, point.longitude
            );
        }
    }

    kept
}

/// Whether moving from `a` to `b` stays within the plausible envelope.
fn plausible_hop(a: &TracePoint, b: &TracePoint, config: &TraceConfig) -> bool {
    let elapsed_s = (b.timestamp - a.timestamp).num_milliseconds().abs() as f64 / 1000.0;
    let allowed_m = config.tolerance_m + config.max_speed_mps * elapsed_s;
    haversine_m(a, b) <= allowed_m
}

/// Great-circle distance between two samples in meters.
fn haversine_m(a: &TracePoint, b: &TracePoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 14, 6, 0, 0).unwrap()
    }

    /// Alternating plausible samples near Lausanne, ten seconds apart.
    fn plausible_trace(len: usize) -> Vec<TracePoint> {
        (0..len)
            .map(|i| {
                let wobble = if i % 2 == 0 { 0.0 } else { 0.001 };
                TracePoint::new(
                    base_time() + Duration::seconds(10 * i as i64),
                    46.5 + wobble,
                    6.5 + wobble,
                )
            })
            .collect()
    }

    #[test]
    fn test_plausible_trace_unchanged() {
        let trace = plausible_trace(51);
        let corrected = correct_trace(&trace, &TraceConfig::default());
        assert_eq!(corrected, trace);
    }

    #[test]
    fn test_single_anomaly_removed() {
        let mut trace = plausible_trace(20);
        trace[10].latitude = 0.0;
        trace[10].longitude = 0.0;

        let corrected = correct_trace(&trace, &TraceConfig::default());

        assert_eq!(corrected.len(), trace.len() - 1);
        assert!(corrected
            .iter()
            .all(|p| p.latitude > 46.0 && p.longitude > 6.0));
    }

    #[test]
    fn test_consecutive_scattered_anomalies_removed() {
        let mut trace = plausible_trace(20);
        trace[8].latitude = 0.0;
        trace[8].longitude = 0.0;
        trace[9].latitude = 80.0;
        trace[9].longitude = 170.0;
        trace[10].latitude = -50.0;
        trace[10].longitude = 30.0;

        let corrected = correct_trace(&trace, &TraceConfig::default());
        assert_eq!(corrected.len(), trace.len() - 3);
    }

    #[test]
    fn test_singleton_unchanged() {
        let trace = plausible_trace(1);
        assert_eq!(correct_trace(&trace, &TraceConfig::default()), trace);
    }

    #[test]
    fn test_empty_unchanged() {
        assert!(correct_trace(&[], &TraceConfig::default()).is_empty());
    }

    #[test]
    fn test_pair_unchanged_even_when_far_apart() {
        // Two samples have no interior point to judge; both survive.
        let trace = vec![
            TracePoint::new(base_time(), 46.5, 6.5),
            TracePoint::new(base_time() + Duration::seconds(10), 0.0, 0.0),
        ];
        assert_eq!(correct_trace(&trace, &TraceConfig::default()), trace);
    }

    #[test]
    fn test_idempotent() {
        let mut trace = plausible_trace(30);
        trace[5].latitude = -12.0;
        trace[21].longitude = 120.0;

        let config = TraceConfig::default();
        let once = correct_trace(&trace, &config);
        let twice = correct_trace(&once, &config);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_not_mutated() {
        let mut trace = plausible_trace(10);
        trace[4].latitude = 0.0;
        trace[4].longitude = 0.0;
        let before = trace.clone();

        let _ = correct_trace(&trace, &TraceConfig::default());
        assert_eq!(trace, before);
    }

    #[test]
    fn test_fast_but_plausible_motion_kept() {
        // 500 m hops every 10 s is 50 m/s, inside the default envelope.
        let trace: Vec<TracePoint> = (0..10)
            .map(|i| {
                TracePoint::new(
                    base_time() + Duration::seconds(10 * i64::from(i)),
                    46.5 + 0.0045 * f64::from(i),
                    6.5,
                )
            })
            .collect();

        let corrected = correct_trace(&trace, &TraceConfig::default());
        assert_eq!(corrected, trace);
    }

    #[test]
    fn test_haversine_known_distance() {
        // One degree of latitude is about 111 km.
        let a = TracePoint::new(base_time(), 46.0, 6.5);
        let b = TracePoint::new(base_time(), 47.0, 6.5);
        let d = haversine_m(&a, &b);
        assert!((d - 111_195.0).abs() < 500.0);
    }
}
