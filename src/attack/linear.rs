//! Matsui's Algorithm 2: linear last-round key recovery (C5).

use super::Oracle;
use crate::bits::parity;
use crate::des::{expand_last_round_input, sbox_slice, sboxes};
use crate::rng::BlockRng;
use crate::stats::{best_lat_mask, Lat};

/// A theoretical linear characteristic, used only for the Piling-Up /
/// sample-complexity illustration — the attack itself picks masks
/// empirically per S-box via [`best_lat_mask`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearCharacteristic {
    pub rounds: u8,
    pub input_mask: u64,
    pub output_mask: u64,
    pub key_mask: u64,
    pub bias: f64,
}

/// 3-round characteristic with per-round bias 20/64: combined bias ~= 0.122.
pub const CHAR_3_ROUND: LinearCharacteristic = LinearCharacteristic {
    rounds: 3,
    input_mask: 0,
    output_mask: 0,
    key_mask: 0,
    bias: 0.1220703125,
};

/// The recovered guess for one S-box's final-round subkey slice.
///
/// `deviation` is the signed `T_g - N/2` for the winning guess; `lat_sign`
/// is the signed `LAT[alpha, beta]` entry the mask was chosen from. Per the
/// "sign handling" design decision, both are preserved so a caller can read
/// off the disclosed outer-round key parity without re-deriving it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRecovery {
    pub guess: u8,
    pub deviation: f64,
    pub mask_alpha: u8,
    pub mask_beta: u8,
    pub lat_sign: i32,
}

/// Draws `count` random plaintext/ciphertext pairs from the oracle.
pub fn collect_pairs<O: Oracle>(oracle: &O, count: u64, rng: &mut BlockRng) -> Vec<(u64, u64)> {
    (0..count)
        .map(|_| {
            let p = rng.next_block();
            let c = oracle.encrypt(p);
            (p, c)
        })
        .collect()
}

/// Counts, for every 6-bit guess, how often the parity equation selected by
/// `best_lat_mask(lat)` holds, and reports the guess with maximal deviation
/// from `N/2`.
pub fn attack_sbox(pairs: &[(u64, u64)], sbox_index: usize, lat: &Lat) -> LinearRecovery {
    let (alpha, beta, lat_sign) = best_lat_mask(lat);
    let n = pairs.len() as f64;

    let mut counters = [0u64; 64];
    for &(_, c) in pairs {
        let expanded = expand_last_round_input(c);
        let slice = sbox_slice(expanded, sbox_index);
        for g in 0u8..64 {
            let u = slice ^ g;
            let y = sboxes::eval(sbox_index, u);
            let input_parity = parity((u & alpha) as u64);
            let output_parity = parity((y & beta) as u64);
            if input_parity == output_parity {
                counters[g as usize] += 1;
            }
        }
    }

    let mut best_guess = 0u8;
    let mut best_deviation = counters[0] as f64 - n / 2.0;
    for (g, &count) in counters.iter().enumerate().skip(1) {
        let deviation = count as f64 - n / 2.0;
        if deviation.abs() > best_deviation.abs() {
            best_deviation = deviation;
            best_guess = g as u8;
        }
    }

    LinearRecovery {
        guess: best_guess,
        deviation: best_deviation,
        mask_alpha: alpha,
        mask_beta: beta,
        lat_sign,
    }
}

/// Runs the full 8-S-box attack, sharing one pair set across all of them.
pub fn attack<O: Oracle>(
    oracle: &O,
    pair_count: u64,
    lats: &[Lat; 8],
    rng: &mut BlockRng,
) -> [LinearRecovery; 8] {
    let pairs = collect_pairs(oracle, pair_count, rng);
    core::array::from_fn(|i| attack_sbox(&pairs, i, &lats[i]))
}
