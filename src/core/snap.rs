//! Snap resolution: where a released drag is allowed to come to rest.
//!
//! The scroll surface projects its own rest offset from the release
//! velocity.  We nudge that projection so the nearest cell's left edge lines
//! up with the indicator's left edge.

/// Release velocity as reported by the host.  Never used in the offset
/// math; carried through so listeners see what the host saw.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Cell left edges the host has laid out near the projected viewport, in
/// the scroll surface's content coordinates.  Produced once per drag end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometrySample {
    pub candidate_offsets: Vec<f64>,
}

impl GeometrySample {
    pub fn new(candidate_offsets: Vec<f64>) -> Self {
        Self { candidate_offsets }
    }
}

/// Correct `proposed_offset` so a candidate edge lands on the indicator.
///
/// * `indicator_offset` – distance from the content origin of the visible
///   area to the indicator's left edge.
///
/// Ties go to the first candidate in list order.  With no candidates the
/// proposal is returned untouched.
pub fn resolve(proposed_offset: f64, candidate_offsets: &[f64], indicator_offset: f64) -> f64 {
    let target_edge = proposed_offset + indicator_offset;

    let mut best: Option<(f64, f64)> = None;
    for &edge in candidate_offsets {
        let distance = (edge - target_edge).abs();
        // Strict `<` keeps the earliest candidate on ties.
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((edge, distance));
        }
    }

    match best {
        Some((edge, _)) => edge - indicator_offset,
        None => proposed_offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_to_nearest_edge() {
        // target edge 85 → nearest 90 → 90 - 45
        assert_eq!(resolve(40.0, &[0.0, 90.0, 180.0], 45.0), 45.0);
        // target edge 175 → nearest 180
        assert_eq!(resolve(130.0, &[0.0, 90.0, 180.0], 45.0), 135.0);
        // target edge 20 → nearest 0
        assert_eq!(resolve(-25.0, &[0.0, 90.0, 180.0], 45.0), -45.0);
    }

    #[test]
    fn ties_go_to_the_first_candidate() {
        // target edge 45 is exactly between 0 and 90.
        assert_eq!(resolve(0.0, &[0.0, 90.0], 45.0), -45.0);
        // Same distances, reversed layout order.
        assert_eq!(resolve(0.0, &[90.0, 0.0], 45.0), 45.0);
    }

    #[test]
    fn output_minimises_distance_over_candidates() {
        let candidates = [12.0, 101.5, 190.0, 280.25, 371.0];
        let indicator = 33.0;
        let mut proposed = -80.0;
        while proposed < 450.0 {
            let out = resolve(proposed, &candidates, indicator);
            let chosen = out + indicator;
            let target = proposed + indicator;
            for &c in &candidates {
                assert!((chosen - target).abs() <= (c - target).abs() + 1e-9);
            }
            proposed += 7.3;
        }
    }

    #[test]
    fn empty_candidates_pass_through() {
        for proposed in [-10.0, 0.0, 42.5, 1e6] {
            assert_eq!(resolve(proposed, &[], 45.0), proposed);
        }
    }
}
