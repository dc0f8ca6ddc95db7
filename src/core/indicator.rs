//! Indicator interpolation: the per-frame dot scale and crossing detector.
//!
//! Scroll position is measured in cell widths ("progress").  Between two
//! cells the dot grows or shrinks depending on which neighbours it is
//! allowed to rest on, and a crossing fires whenever the centred cell
//! changes identity.

use super::selection::SelectionModel;

/// Result of one interpolation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorFrame {
    /// Uniform scale for the dot, in `[0, 1.5]`.
    pub scale: f64,
    /// The centred cell changed on this frame.
    pub crossed: bool,
}

/// `true` when `value` has no fractional part.
pub fn is_integral(value: f64) -> bool {
    value.fract() == 0.0
}

/// Largest integer not greater than `value`.
pub fn integer_below(value: f64) -> i64 {
    value.floor() as i64
}

/// Compute the dot scale and the crossing flag for one frame.
///
/// `left_selectable` / `right_selectable` describe the cells at
/// `floor(progress)` and `ceil(progress)`.
pub fn update(
    progress: f64,
    left_selectable: bool,
    right_selectable: bool,
    previous_progress: f64,
) -> IndicatorFrame {
    let intra = progress - progress.floor();
    let delta_from_midpoint = (0.5 - intra).abs();

    let scale = match (left_selectable, right_selectable) {
        (true, true) => 1.5 - delta_from_midpoint,
        (true, false) => 1.0 - intra,
        (false, true) => intra,
        (false, false) => 0.0,
    };

    IndicatorFrame {
        scale,
        crossed: crossed(progress, previous_progress),
    }
}

/// Fires once when passing through an integer, or when landing exactly on
/// one.  A frame that starts already centred never fires.
fn crossed(progress: f64, previous: f64) -> bool {
    let previous_integral = is_integral(previous);
    if previous_integral {
        return false;
    }
    integer_below(progress) != integer_below(previous) || is_integral(progress)
}

// ───────────────────────────────────────── scroll state ──────

/// Transient per-frame scroll bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    /// Last raw content offset reported by the host.
    pub raw_offset: f64,
    /// Width of one cell along the scroll axis.  Always `> 0`.
    pub cell_extent: f64,
    /// Progress of the previous frame.
    pub last_progress: f64,
}

impl ScrollState {
    pub fn new(cell_extent: f64) -> Self {
        Self {
            raw_offset: 0.0,
            cell_extent,
            last_progress: 0.0,
        }
    }

    /// Progress for `raw_offset`, unbounded in both directions.
    pub fn progress_for(&self, raw_offset: f64) -> f64 {
        raw_offset / self.cell_extent
    }

    /// Run one frame: look up both neighbours, interpolate, remember the
    /// progress for the next frame.
    pub fn advance(&mut self, raw_offset: f64, model: &SelectionModel) -> IndicatorFrame {
        let progress = self.progress_for(raw_offset);
        let left = model.is_selectable_at(progress.floor() as i64);
        let right = model.is_selectable_at(progress.ceil() as i64);

        let frame = update(progress, left, right, self.last_progress);
        self.raw_offset = raw_offset;
        self.last_progress = progress;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cell::cells_from_flags;

    fn scale(progress: f64, left: bool, right: bool) -> f64 {
        update(progress, left, right, 0.0).scale
    }

    #[test]
    fn scale_table() {
        let intra = [0.0, 0.25, 0.5, 0.75];
        let both = [1.0, 1.25, 1.5, 1.25];
        let left_only = [1.0, 0.75, 0.5, 0.25];
        let right_only = [0.0, 0.25, 0.5, 0.75];

        for (i, &t) in intra.iter().enumerate() {
            let p = 3.0 + t;
            assert_eq!(scale(p, true, true), both[i], "both at {t}");
            assert_eq!(scale(p, true, false), left_only[i], "left at {t}");
            assert_eq!(scale(p, false, true), right_only[i], "right at {t}");
            assert_eq!(scale(p, false, false), 0.0, "none at {t}");
        }
    }

    #[test]
    fn boundary_values() {
        assert_eq!(scale(0.3, false, false), 0.0);
        assert_eq!(scale(1.0, true, false), 1.0);
        assert_eq!(scale(1.0, false, true), 0.0);
    }

    #[test]
    fn both_selectable_is_continuous_across_cells() {
        // Approaching the next integer from below meets the value at it.
        let just_below = scale(1.999_999, true, true);
        let at = scale(2.0, true, true);
        assert!((just_below - at).abs() < 1e-5);

        let mut p = 0.0;
        let mut prev = scale(p, true, true);
        while p < 4.0 {
            p += 0.01;
            let s = scale(p, true, true);
            assert!((s - prev).abs() < 0.011, "jump at {p}");
            prev = s;
        }
    }

    #[test]
    fn crossing_fires_once_per_arrival() {
        let sequence = [0.0, 0.4, 0.9, 1.0, 1.0, 1.1];
        let mut previous = 0.0;
        let fired: Vec<bool> = sequence
            .iter()
            .map(|&p| {
                let f = update(p, true, true, previous).crossed;
                previous = p;
                f
            })
            .collect();
        assert_eq!(fired, [false, false, false, true, false, false]);
    }

    #[test]
    fn crossing_fires_when_passing_through_without_landing() {
        assert!(update(2.2, true, true, 1.8).crossed);
        assert!(update(0.7, true, true, 1.3).crossed);
        assert!(!update(1.6, true, true, 1.2).crossed);
    }

    #[test]
    fn leaving_a_centred_frame_does_not_fire() {
        assert!(!update(2.4, true, true, 2.0).crossed);
        assert!(!update(1.6, true, true, 2.0).crossed);
    }

    #[test]
    fn crossing_works_below_zero() {
        assert!(update(-1.0, false, false, -0.6).crossed);
        assert!(update(-0.2, true, false, 0.1).crossed);
    }

    #[test]
    fn scroll_state_reads_neighbours_and_tracks_progress() {
        let model = SelectionModel::new(cells_from_flags(&[true, false, true]));
        let mut state = ScrollState::new(90.0);

        // Between cell 0 (selectable) and 1 (not): 1 - 0.5
        let f = state.advance(45.0, &model);
        assert_eq!(f.scale, 0.5);
        assert_eq!(state.last_progress, 0.5);

        // Landing on cell 1 crosses.
        let f = state.advance(90.0, &model);
        assert!(f.crossed);
        assert_eq!(f.scale, 0.0);

        // Far past the end: both neighbours out of range.
        let f = state.advance(900.0, &model);
        assert_eq!(f.scale, 0.0);
        let f = state.advance(-130.0, &model);
        assert_eq!(f.scale, 0.0);
    }

    #[test]
    fn empty_model_degenerates_to_zero() {
        let model = SelectionModel::default();
        let mut state = ScrollState::new(10.0);
        for off in [0.0, 3.0, 15.0, -4.0] {
            assert_eq!(state.advance(off, &model).scale, 0.0);
        }
    }
}
