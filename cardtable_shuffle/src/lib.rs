// Copyright 2026 the Cardtable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cardtable Shuffle: in-place, uniform, cryptographically-seeded shuffling.
//!
//! This crate provides the one permutation primitive the tabletop needs:
//! a Fisher–Yates shuffle whose random source is required, at the type
//! level, to be cryptographically strong. A weak or biased generator is a
//! real problem for a deck tester — a predictable shuffle is exploitable in
//! competitive play — so the generic seam is bounded by [`rand::CryptoRng`]
//! and the convenience entry point draws from the operating system.
//!
//! ## Minimal example
//!
//! ```rust
//! use cardtable_shuffle::shuffle;
//!
//! let mut deck = vec![1, 2, 3, 4, 5, 6, 7, 8];
//! shuffle(&mut deck);
//! deck.sort();
//! assert_eq!(deck, [1, 2, 3, 4, 5, 6, 7, 8]); // same multiset, new order
//! ```
//!
//! ## Deterministic shuffling
//!
//! [`shuffle_with`] accepts any `Rng + CryptoRng`, so tests can pass a
//! seeded generator and assert exact outcomes:
//!
//! ```rust
//! # #[cfg(feature = "std")] {
//! use cardtable_shuffle::shuffle_with;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut a = vec![1, 2, 3, 4, 5];
//! let mut b = vec![1, 2, 3, 4, 5];
//! shuffle_with(&mut a, &mut StdRng::seed_from_u64(7));
//! shuffle_with(&mut b, &mut StdRng::seed_from_u64(7));
//! assert_eq!(a, b);
//! # }
//! ```
//!
//! ## Design notes
//!
//! - Each position draws uniformly from the remaining range via `rand`'s
//!   range sampling, which rejects values that would introduce modulo bias.
//! - Slices of length 0 or 1 are a no-op.
//! - [`shuffle`] uses [`rand::rngs::OsRng`] fresh on every call; the OS
//!   entropy source never exhausts, so repeated shuffles stay uniform.
//!
//! This crate is `no_std`.

#![no_std]

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};

/// Shuffles a slice in place using the operating system's entropy source.
///
/// Equivalent to `shuffle_with(slice, &mut OsRng)`.
pub fn shuffle<T>(slice: &mut [T]) {
    shuffle_with(slice, &mut OsRng);
}

/// Shuffles a slice in place with the provided cryptographically-strong
/// generator.
///
/// Fisher–Yates: for each `i` from `0` to `len - 2`, draw `r` uniformly
/// from `[i, len - 1]` inclusive and swap positions `i` and `r`. Every
/// permutation of the slice is equally likely. Slices of length 0 or 1 are
/// left untouched.
pub fn shuffle_with<T, R>(slice: &mut [T], rng: &mut R)
where
    R: Rng + CryptoRng,
{
    let len = slice.len();
    if len <= 1 {
        return;
    }
    for i in 0..len - 1 {
        let r = rng.gen_range(i..len);
        slice.swap(i, r);
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    extern crate alloc;
    use alloc::vec::Vec;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn empty_and_singleton_slices_are_untouched() {
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty);

        let mut one = [42];
        shuffle(&mut one);
        assert_eq!(one, [42]);
    }

    #[test]
    fn shuffle_preserves_the_multiset() {
        let mut deck: Vec<u32> = (0..60).chain(0..20).collect();
        let mut expected = deck.clone();
        expected.sort_unstable();

        shuffle(&mut deck);

        let mut sorted = deck.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn repeated_shuffles_change_order_with_overwhelming_probability() {
        let original: Vec<u32> = (0..40).collect();
        let mut rng = StdRng::seed_from_u64(0xCA_4D5);

        // The chance of 10 consecutive identity permutations of 40 elements
        // is (1/40!)^10; any hit here means the shuffle is broken.
        let mut changed = false;
        for _ in 0..10 {
            let mut deck = original.clone();
            shuffle_with(&mut deck, &mut rng);
            if deck != original {
                changed = true;
            }
        }
        assert!(changed, "order never changed across repeated shuffles");
    }

    #[test]
    fn seeded_shuffles_are_reproducible() {
        let mut a: Vec<u32> = (0..30).collect();
        let mut b: Vec<u32> = (0..30).collect();

        shuffle_with(&mut a, &mut StdRng::seed_from_u64(99));
        shuffle_with(&mut b, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);

        let mut c: Vec<u32> = (0..30).collect();
        shuffle_with(&mut c, &mut StdRng::seed_from_u64(100));
        assert_ne!(a, c, "different seeds should give different orders");
    }

    #[test]
    fn two_element_slice_visits_both_orders() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen_swapped = false;
        let mut seen_kept = false;
        for _ in 0..64 {
            let mut pair = [1, 2];
            shuffle_with(&mut pair, &mut rng);
            match pair {
                [1, 2] => seen_kept = true,
                [2, 1] => seen_swapped = true,
                _ => unreachable!(),
            }
        }
        assert!(seen_kept && seen_swapped, "both orders should occur");
    }
}
