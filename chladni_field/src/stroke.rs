//! Stroke-width lookup.
//!
//! The widths are a hand-tuned aesthetic: each equity band has its own
//! irregular list of stroke-ratio breakpoints.  The table is kept as data so
//! the breakpoints stay exactly as tuned on the wall.

/// Every width the lookup can produce.
pub const STROKE_WIDTHS: [u32; 7] = [1, 2, 4, 6, 10, 30, 50];

/// Breakpoints for one equity band.
///
/// `steps` are `(max_ratio, width)` pairs checked in order; the first pair
/// with `ratio <= max_ratio` wins.  `otherwise` covers ratios past the last
/// breakpoint.
#[derive(Clone, Copy, Debug)]
pub struct StrokeBand {
    pub max_equity: f32,
    pub steps:      &'static [(f32, u32)],
    pub otherwise:  u32,
}

pub const STROKE_BANDS: [StrokeBand; 6] = [
    StrokeBand {
        max_equity: 2.0,
        steps:      &[(1.5, 2)],
        otherwise:  4,
    },
    StrokeBand {
        max_equity: 4.0,
        steps:      &[(1.5, 2), (2.75, 4), (3.0, 10), (3.5, 1)],
        otherwise:  2,
    },
    StrokeBand {
        max_equity: 5.0,
        steps:      &[(1.75, 2), (2.75, 4), (3.5, 1), (4.0, 6), (4.05, 10), (5.0, 1)],
        otherwise:  1,
    },
    StrokeBand {
        max_equity: 7.0,
        steps: &[
            (1.75, 2), (2.75, 4), (3.5, 1), (4.0, 6), (4.1, 10),
            (5.0, 2), (5.01, 30), (6.2, 2), (6.3, 10), (7.1, 1),
        ],
        otherwise:  1,
    },
    StrokeBand {
        max_equity: 9.0,
        steps:      &[(0.01, 50), (0.1, 10), (1.0, 6), (3.0, 2)],
        otherwise:  1,
    },
    StrokeBand {
        max_equity: 10.0,
        steps:      &[(0.004, 50), (0.09, 10)],
        otherwise:  1,
    },
];

impl StrokeBand {
    /// The band responsible for `equity`.  Values above the top band use it.
    pub fn for_equity(equity: f32) -> &'static StrokeBand {
        STROKE_BANDS
            .iter()
            .find(|band| equity <= band.max_equity)
            .unwrap_or(&STROKE_BANDS[STROKE_BANDS.len() - 1])
    }

    pub fn width_for(&self, ratio: f32) -> u32 {
        self.steps
            .iter()
            .find(|&&(max_ratio, _)| ratio <= max_ratio)
            .map(|&(_, width)| width)
            .unwrap_or(self.otherwise)
    }
}

/// Stroke width for a particle: `ratio` is `stroke_factor × equity`.
pub fn stroke_width(equity: f32, ratio: f32) -> u32 {
    StrokeBand::for_equity(equity).width_for(ratio)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
