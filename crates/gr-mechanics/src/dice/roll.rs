//! Open-ended pool rolling.

use super::{DieSource, RollOptions};
use crate::error::{MechError, MechResult};

/// Roll `pool` d10s, adding a die for every face at or above the explode
/// threshold. Returns every face drawn, in draw order.
///
/// The roll walks a remaining-dice counter rather than recursing. It fails
/// with [`MechError::RunawayExplosion`] once `options.max_draws` dice beyond
/// the base pool have been drawn and more are still owed.
pub fn roll(pool: u32, options: &RollOptions, source: &mut impl DieSource) -> MechResult<Vec<u8>> {
    let threshold = options.again.threshold();
    let mut remaining = pool;
    let limit = pool as usize + options.max_draws as usize;
    let mut faces = Vec::with_capacity(pool as usize);

    while remaining > 0 {
        if faces.len() >= limit {
            return Err(MechError::RunawayExplosion {
                draws: options.max_draws,
            });
        }
        let face = source.draw();
        faces.push(face);
        if face < threshold {
            remaining -= 1;
        }
    }

    tracing::debug!(pool, drawn = faces.len(), again = %options.again, "rolled pool");
    Ok(faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{Again, RngDice, ScriptedDice};

    #[test]
    fn one_die_explodes_twice() {
        let mut dice = ScriptedDice::new([10, 10, 5]);
        let faces = roll(1, &RollOptions::default(), &mut dice).unwrap();
        assert_eq!(faces, vec![10, 10, 5]);
        assert_eq!(dice.drawn(), 3);
    }

    #[test]
    fn no_explosions() {
        let mut dice = ScriptedDice::new([3, 7, 9, 1]);
        let faces = roll(4, &RollOptions::default(), &mut dice).unwrap();
        assert_eq!(faces, vec![3, 7, 9, 1]);
    }

    #[test]
    fn nine_again_explodes_nines() {
        let mut dice = ScriptedDice::new([9, 4, 2]);
        let opts = RollOptions::default().with_again(Again::Nine);
        assert_eq!(roll(1, &opts, &mut dice).unwrap(), vec![9, 4]);
    }

    #[test]
    fn eight_again_explodes_eights() {
        let mut dice = ScriptedDice::new([8, 9, 10, 3, 6]);
        let opts = RollOptions::default().with_again(Again::Eight);
        assert_eq!(roll(2, &opts, &mut dice).unwrap(), vec![8, 9, 10, 3, 6]);
    }

    #[test]
    fn empty_pool_draws_nothing() {
        let mut dice = ScriptedDice::new([10]);
        assert!(roll(0, &RollOptions::default(), &mut dice).unwrap().is_empty());
        assert_eq!(dice.drawn(), 0);
    }

    #[test]
    fn endless_tens_hit_the_cap() {
        let mut dice = ScriptedDice::new([10]);
        let opts = RollOptions::default().with_max_draws(50);
        let err = roll(1, &opts, &mut dice).unwrap_err();
        assert!(matches!(err, MechError::RunawayExplosion { draws: 50 }));
        assert_eq!(dice.drawn(), 51);
    }

    #[test]
    fn pool_larger_than_the_cap_rolls_without_explosions() {
        let mut dice = ScriptedDice::new([3]);
        let opts = RollOptions::default().with_max_draws(5);
        let faces = roll(20, &opts, &mut dice).unwrap();
        assert_eq!(faces.len(), 20);

        let faces = roll(10_001, &RollOptions::default(), &mut dice).unwrap();
        assert_eq!(faces.len(), 10_001);
    }

    #[test]
    fn cap_counts_only_exploded_dice() {
        let mut dice = ScriptedDice::new([10, 4, 4, 4]);
        let opts = RollOptions::default().with_max_draws(1);
        let faces = roll(3, &opts, &mut dice).unwrap();
        assert_eq!(faces, vec![10, 4, 4, 4]);
    }

    #[test]
    fn fair_dice_produce_at_least_the_pool() {
        let mut dice = RngDice::seeded(42);
        for pool in 1..=20 {
            let faces = roll(pool, &RollOptions::default(), &mut dice).unwrap();
            assert!(faces.len() >= pool as usize);
            let non_exploding = faces.iter().filter(|&&f| f < 10).count();
            assert_eq!(non_exploding, pool as usize);
        }
    }
}
