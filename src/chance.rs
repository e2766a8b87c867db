//! Thin wrappers over `rand`: a coin toss, a bounded roll and a shuffled hand.
//!
//! Everything takes the generator as a parameter. The binary passes
//! `thread_rng()` or a seeded `StdRng`; tests always use a seed.

use crate::error::{DrillError, Result};
use rand::Rng;
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use rand::seq::SliceRandom as _;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coin {
    Heads,
    Tails,
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heads => write!(f, "heads"),
            Self::Tails => write!(f, "tails"),
        }
    }
}

/// Generator used by the CLI: seeded when `seed` is given, entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn flip_coin<R: Rng>(rng: &mut R) -> Coin {
    // `choose` only returns None for an empty slice.
    *[Coin::Heads, Coin::Tails]
        .choose(rng)
        .unwrap_or(&Coin::Heads)
}

/// Uniform integer in `low..=high`.
///
/// # Errors
///
/// [`DrillError::InvalidRange`] when `low > high`.
pub fn roll<R: Rng>(rng: &mut R, low: i64, high: i64) -> Result<i64> {
    if low > high {
        return Err(DrillError::InvalidRange { low, high });
    }
    Ok(rng.gen_range(low..=high))
}

pub fn shuffle<R: Rng, T>(rng: &mut R, items: &mut [T]) {
    items.shuffle(rng);
}

pub fn default_deck() -> Vec<String> {
    [
        "Ace of spades",
        "Queen of spades",
        "Ace of hearts",
        "King of diamonds",
        "Jack of clubs",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_lands_on_both_sides() {
        let mut rng = make_rng(Some(7));
        let flips: Vec<Coin> = (0..200).map(|_| flip_coin(&mut rng)).collect();
        assert!(flips.contains(&Coin::Heads));
        assert!(flips.contains(&Coin::Tails));
    }

    #[test]
    fn test_same_seed_same_flips() {
        let mut a = make_rng(Some(42));
        let mut b = make_rng(Some(42));
        for _ in 0..20 {
            assert_eq!(flip_coin(&mut a), flip_coin(&mut b));
        }
    }

    #[test]
    fn test_roll_stays_in_bounds() {
        let mut rng = make_rng(Some(1));
        let mut seen = [false; 12];
        for _ in 0..1000 {
            let n = roll(&mut rng, 1, 12).unwrap();
            assert!((1..=12).contains(&n));
            seen[(n - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "every face should come up");
    }

    #[test]
    fn test_roll_single_value_range() {
        let mut rng = make_rng(Some(3));
        assert_eq!(roll(&mut rng, 5, 5).unwrap(), 5);
    }

    #[test]
    fn test_roll_rejects_inverted_range() {
        let mut rng = make_rng(Some(3));
        assert!(matches!(
            roll(&mut rng, 12, 1),
            Err(DrillError::InvalidRange { low: 12, high: 1 })
        ));
    }

    #[test]
    fn test_shuffle_keeps_every_card() {
        let mut rng = make_rng(Some(9));
        let mut deck = default_deck();
        shuffle(&mut rng, &mut deck);

        let mut sorted = deck.clone();
        sorted.sort();
        let mut expected = default_deck();
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_coin_display() {
        assert_eq!(Coin::Heads.to_string(), "heads");
        assert_eq!(Coin::Tails.to_string(), "tails");
    }
}
