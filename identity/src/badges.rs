//! Badge bitset — derived entirely from verification status and points.

use womansplain_types::ProtocolParams;

/// Set iff the address holds a verified identity record.
pub const VERIFIED: u32 = 1 << 0;
/// Set at `advisor_badge_points` validation points.
pub const ADVISOR: u32 = 1 << 1;
/// Set at `expert_badge_points` validation points.
pub const EXPERT: u32 = 1 << 2;
/// Set at `legend_badge_points` validation points.
pub const LEGEND: u32 = 1 << 3;

/// Recompute the full badge bitset from scratch.
///
/// Pure function of `(verified, points)` — callers replace the stored flags
/// with the result instead of toggling individual bits, so stored badge
/// state can never drift from the point total.
pub fn compute_badges(verified: bool, points: u64, params: &ProtocolParams) -> u32 {
    let mut flags = 0;
    if verified {
        flags |= VERIFIED;
    }
    if points >= params.advisor_badge_points {
        flags |= ADVISOR;
    }
    if points >= params.expert_badge_points {
        flags |= EXPERT;
    }
    if points >= params.legend_badge_points {
        flags |= LEGEND;
    }
    flags
}
