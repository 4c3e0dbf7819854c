//! Dice pool and reach budget.

use gr_core::CastingType;
use gr_core::arcanum::MAX_RATING;
use serde::{Deserialize, Serialize};

/// A computed dice pool, before and after flooring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSize {
    /// Pool before flooring; may be zero or negative.
    pub raw: i64,
}

impl PoolSize {
    /// Dice actually rolled: never fewer than one.
    pub fn dice(self) -> u32 {
        u32::try_from(self.raw.max(1)).unwrap_or(u32::MAX)
    }

    /// The pool collapsed to a chance die.
    pub fn is_chance_die(self) -> bool {
        self.raw <= 1
    }
}

/// Build the casting pool: Gnosis plus the domain rating plus yantras,
/// minus the effective penalty.
///
/// Every casting type uses the same base, so the casting type is not an
/// input. Rotes were once given a flat `3 + Arcanum` instead; that variant
/// is not applied here.
pub fn compute_pool(gnosis: u8, domain: u8, yantras: i32, penalty: i32) -> PoolSize {
    PoolSize {
        raw: i64::from(gnosis) + i64::from(domain) + i64::from(yantras) - i64::from(penalty),
    }
}

/// Reach points available before any manual modifier.
///
/// One free reach, plus one for every dot of Arcanum above the spell's
/// level. Rotes count as Arcanum 5.
pub fn available_reaches(domain: u8, level: u8, casting_type: CastingType) -> u32 {
    let arcanum = match casting_type {
        CastingType::Rote => MAX_RATING,
        CastingType::Improvised | CastingType::Praxis => domain,
    };
    1 + u32::from(arcanum.saturating_sub(level))
}
