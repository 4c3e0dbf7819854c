//! Reading successes off a rolled pool.
//!
//! A normal pool scores one success per die showing 8 or more. A chance die
//! (a pool that collapsed to one die or fewer before flooring) only succeeds
//! on a 10, and a 1 on it is a dramatic failure.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest face that counts as a success on a normal pool.
pub const SUCCESS_THRESHOLD: u8 = 8;

/// Successes needed for an exceptional success.
pub const EXCEPTIONAL_SUCCESSES: u32 = 5;

/// The classified outcome of a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Number of successes.
    pub successes: u32,
    /// A chance die came up 1.
    pub dramatic_failure: bool,
    /// Five or more successes.
    pub exceptional: bool,
}

impl Resolution {
    /// Classify a set of faces. `chance_die` selects the stricter rule.
    pub fn classify(faces: &[u8], chance_die: bool) -> Self {
        let threshold = if chance_die { 10 } else { SUCCESS_THRESHOLD };
        let successes = faces.iter().filter(|&&f| f >= threshold).count() as u32;

        Self {
            successes,
            dramatic_failure: chance_die && faces.first() == Some(&1),
            exceptional: successes >= EXCEPTIONAL_SUCCESSES,
        }
    }

    /// At least one success.
    pub fn is_success(&self) -> bool {
        self.successes > 0
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.successes == 1 { "" } else { "es" };
        if self.dramatic_failure {
            write!(f, "Dramatic Failure")
        } else if self.successes == 0 {
            write!(f, "Failure")
        } else if self.exceptional {
            write!(f, "Exceptional Success ({} success{plural})", self.successes)
        } else {
            write!(f, "Success ({} success{plural})", self.successes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_pool_counts_eight_and_up() {
        let r = Resolution::classify(&[8, 9, 10, 7, 1], false);
        assert_eq!(r.successes, 3);
        assert!(!r.dramatic_failure);
        assert!(!r.exceptional);
    }

    #[test]
    fn normal_pool_ignores_ones() {
        let r = Resolution::classify(&[1, 1, 1], false);
        assert_eq!(r.successes, 0);
        assert!(!r.dramatic_failure);
    }

    #[test]
    fn chance_die_needs_a_ten() {
        assert_eq!(Resolution::classify(&[9], true).successes, 0);
        assert_eq!(Resolution::classify(&[8], true).successes, 0);
        let r = Resolution::classify(&[10, 10, 4], true);
        assert_eq!(r.successes, 2);
        assert!(!r.dramatic_failure);
    }

    #[test]
    fn chance_die_one_is_dramatic() {
        let r = Resolution::classify(&[1], true);
        assert!(r.dramatic_failure);
        assert!(!r.is_success());
    }

    #[test]
    fn five_successes_is_exceptional() {
        let r = Resolution::classify(&[8, 8, 9, 10, 10, 3], false);
        assert_eq!(r.successes, 5);
        assert!(r.exceptional);
    }

    #[test]
    fn display() {
        insta::assert_snapshot!(Resolution::classify(&[1], true).to_string(), @"Dramatic Failure");
        insta::assert_snapshot!(Resolution::classify(&[2, 3], false).to_string(), @"Failure");
        insta::assert_snapshot!(Resolution::classify(&[8, 3], false).to_string(), @"Success (1 success)");
        insta::assert_snapshot!(
            Resolution::classify(&[8, 8, 8, 8, 8, 8], false).to_string(),
            @"Exceptional Success (6 successes)"
        );
    }
}
