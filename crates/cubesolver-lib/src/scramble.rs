//! Random move sequences: scrambles and the placeholder fallback.
//!
//! Scrambles avoid two consecutive turns of the same face. They do not avoid
//! the `X Y X` pattern where `X` and `Y` are opposite faces, so sequences such
//! as `R L R'` still occur even though the outer turns commute and partly
//! cancel.

use std::ops::RangeInclusive;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::moves::Move;

/// Scramble length used when the caller does not pick one.
pub const DEFAULT_SCRAMBLE_LENGTH: usize = 20;

/// Bounds on the length of the random fallback sequence.
pub const FALLBACK_LENGTH: RangeInclusive<usize> = 15..=25;

/// Generate a scramble of `length` moves using the thread-local RNG.
pub fn generate_scramble(length: usize) -> Vec<Move> {
    generate_scramble_with(&mut rand::rng(), length)
}

/// Generate a scramble of `length` moves from the given RNG.
///
/// Each move is drawn uniformly from the tokens whose face differs from the
/// previous move's face.
pub fn generate_scramble_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Vec<Move> {
    let mut scramble = Vec::with_capacity(length);
    let mut last_face = None;

    for _ in 0..length {
        let candidates: Vec<Move> = Move::ALL
            .iter()
            .copied()
            .filter(|m| Some(m.face) != last_face)
            .collect();
        // candidates always holds at least 15 moves
        let Some(&next) = candidates.choose(rng) else {
            break;
        };
        last_face = Some(next.face);
        scramble.push(next);
    }

    scramble
}

/// Produce the placeholder answer used when the external solver fails.
///
/// The length is uniform in [`FALLBACK_LENGTH`] and every move is independent
/// and uniform over the full alphabet. The result does not solve anything.
pub fn random_moves<R: Rng + ?Sized>(rng: &mut R) -> Vec<Move> {
    let length = rng.random_range(FALLBACK_LENGTH);
    (0..length)
        .filter_map(|_| Move::ALL.choose(rng).copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn scramble_has_requested_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for length in [0, 1, 2, 20, 64] {
            assert_eq!(generate_scramble_with(&mut rng, length).len(), length);
        }
    }

    #[test]
    fn scramble_never_repeats_a_face() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let scramble = generate_scramble_with(&mut rng, 30);
            for pair in scramble.windows(2) {
                assert_ne!(pair[0].face, pair[1].face, "adjacent moves: {pair:?}");
            }
        }
    }

    #[test]
    fn same_seed_gives_same_scramble() {
        let a = generate_scramble_with(&mut StdRng::seed_from_u64(99), 20);
        let b = generate_scramble_with(&mut StdRng::seed_from_u64(99), 20);
        assert_eq!(a, b);
    }

    #[test]
    fn default_scramble_uses_default_length() {
        assert_eq!(
            generate_scramble(DEFAULT_SCRAMBLE_LENGTH).len(),
            DEFAULT_SCRAMBLE_LENGTH
        );
    }

    #[test]
    fn fallback_length_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let moves = random_moves(&mut rng);
            assert!(FALLBACK_LENGTH.contains(&moves.len()), "len {}", moves.len());
        }
    }
}
