//! # Value Model: CTR Curve and Business Impact
//!
//! Pure calculation. `ctr_for_rank` maps a 1-indexed SERP position to an
//! empirical organic click-through rate; `business_impact` turns monthly
//! search volume, an expected rank and a conversion rate into an estimate of
//! monthly conversions.
//!
//! ## Invariant
//!
//! An incomplete estimate (missing rank, missing or non-positive conversion
//! rate) always scores 0. It never produces a plausible-looking number.

/// Empirical CTR for ranks 1 through 10, indexed by `rank - 1`.
pub const CTR_TABLE: [f64; 10] = [
    0.398, 0.187, 0.102, 0.072, 0.051, 0.044, 0.030, 0.021, 0.019, 0.016,
];

/// Per-position decay applied beyond rank 10.
pub const CTR_DECAY_FACTOR: f64 = 0.85;

/// Click-through rate for a 1-indexed SERP rank.
///
/// Ranks 1–10 come from [`CTR_TABLE`]. Beyond rank 10 the rank-10 value
/// decays by [`CTR_DECAY_FACTOR`] per position:
/// `ctr(r) = ctr(10) * 0.85^(r - 10)`. Rank 0 is invalid and yields 0.
pub fn ctr_for_rank(rank: u32) -> f64 {
    match rank {
        0 => 0.0,
        1..=10 => CTR_TABLE[(rank - 1) as usize],
        _ => {
            let steps = i32::try_from(rank - 10).unwrap_or(i32::MAX);
            CTR_TABLE[9] * CTR_DECAY_FACTOR.powi(steps)
        }
    }
}

/// Estimated monthly conversions: `round(pv * ctr(expected_rank) * cvr)`.
///
/// Returns 0 whenever `expected_rank` is absent or below 1, or `cvr` is
/// absent or not strictly positive.
pub fn business_impact(estimated_pv: u64, expected_rank: Option<u32>, cvr: Option<f64>) -> u64 {
    let Some(rank) = expected_rank.filter(|r| *r >= 1) else {
        return 0;
    };
    let Some(cvr) = cvr.filter(|c| *c > 0.0 && c.is_finite()) else {
        return 0;
    };
    let estimate = estimated_pv as f64 * ctr_for_rank(rank) * cvr;
    // Saturating float-to-int cast; estimate is non-negative here.
    estimate.round() as u64
}
