//! Track order for folder playback
//!
//! Folders play in file-number order `1..=count`, or in a uniform random
//! permutation of it (Fisher-Yates) when shuffle is on.

use rand::seq::SliceRandom;
use rand::Rng;

/// Build the play order for a folder of `count` tracks
///
/// File numbers are 1-based, so the identity order is `[1, 2, ..., count]`.
pub fn track_order<R: Rng + ?Sized>(count: u8, shuffle: bool, rng: &mut R) -> Vec<u8> {
    let mut order: Vec<u8> = (1..=count).collect();
    if shuffle {
        order.shuffle(rng);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn identity_order_without_shuffle() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(track_order(5, false, &mut rng), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_folder_has_empty_order() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(track_order(0, true, &mut rng).is_empty());
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut order = track_order(50, true, &mut rng);
        assert_eq!(order.len(), 50);

        order.sort_unstable();
        assert_eq!(order, (1..=50).collect::<Vec<u8>>());
    }

    #[test]
    fn shuffle_is_deterministic_for_a_seed() {
        let a = track_order(20, true, &mut StdRng::seed_from_u64(7));
        let b = track_order(20, true, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_is_roughly_uniform() {
        // Every one of the 24 orderings of 4 tracks should come up about
        // equally often
        const TRIALS: usize = 24_000;
        let mut rng = StdRng::seed_from_u64(0xC41E);
        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();

        for _ in 0..TRIALS {
            *counts.entry(track_order(4, true, &mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), 24);
        let expected = TRIALS / 24;
        for (order, count) in &counts {
            let deviation = count.abs_diff(expected);
            assert!(
                deviation < expected / 6,
                "order {order:?} seen {count} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn every_track_visits_every_position() {
        const TRIALS: usize = 8000;
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let mut table = [[0usize; 4]; 4];

        for _ in 0..TRIALS {
            for (position, track) in track_order(4, true, &mut rng).into_iter().enumerate() {
                table[usize::from(track - 1)][position] += 1;
            }
        }

        let expected = TRIALS / 4;
        for row in table {
            for count in row {
                assert!(
                    count.abs_diff(expected) < expected / 10,
                    "position table {table:?} deviates from {expected}"
                );
            }
        }
    }
}
