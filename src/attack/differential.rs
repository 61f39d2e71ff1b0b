//! Biham-Shamir style differential last-round key recovery (C4).

use super::Oracle;
use crate::des::{expand_last_round_input, sbox_slice, sboxes};
use crate::rng::BlockRng;

/// A chosen-plaintext differential characteristic: an input difference and
/// its predicted propagation probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferentialCharacteristic {
    pub rounds: u8,
    pub delta_l0: u32,
    pub delta_r0: u32,
    pub probability: f64,
}

/// 4-round characteristic bundled with the demo: p ~= (1/16)^2 = 2^-8.
pub const CHAR_4_ROUND: DifferentialCharacteristic = DifferentialCharacteristic {
    rounds: 4,
    delta_l0: 0x4008_0000,
    delta_r0: 0x0400_0000,
    probability: 1.0 / 256.0,
};

/// 6-round characteristic bundled with the demo: p = 2^-8.
pub const CHAR_6_ROUND: DifferentialCharacteristic = DifferentialCharacteristic {
    rounds: 6,
    delta_l0: 0x0000_0000,
    delta_r0: 0x6000_0000,
    probability: 1.0 / 256.0,
};

/// A chosen-plaintext sample pair: `P' = P xor (delta_l0 || delta_r0)`.
#[derive(Debug, Clone, Copy)]
pub struct Pair {
    pub p: u64,
    pub p_prime: u64,
    pub c: u64,
    pub c_prime: u64,
}

/// The recovered (or not) 6-bit subkey slice for one S-box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SboxRecovery {
    Recovered {
        guess: u8,
        score: u32,
        median_score: f64,
    },
    /// The characteristic never propagated to the expected output
    /// difference for any guess; no 6-bit slice was recovered.
    NoSignal,
}

/// Draws `count` chosen plaintext pairs and queries the oracle for both
/// ciphertexts. Pairs are independent, so this loop is safe to parallelise
/// or batch for map-reduce scoring.
pub fn collect_pairs<O: Oracle>(
    oracle: &O,
    characteristic: &DifferentialCharacteristic,
    count: u64,
    rng: &mut BlockRng,
) -> Vec<Pair> {
    let delta = ((characteristic.delta_l0 as u64) << 32) | characteristic.delta_r0 as u64;
    (0..count)
        .map(|_| {
            let p = rng.next_block();
            let p_prime = p ^ delta;
            let c = oracle.encrypt(p);
            let c_prime = oracle.encrypt(p_prime);
            Pair { p, p_prime, c, c_prime }
        })
        .collect()
}

/// Scores all 64 guesses for one S-box's final-round subkey slice against
/// an already-collected pair set.
pub fn attack_sbox(pairs: &[Pair], sbox_index: usize, expected_output_diff: u8) -> SboxRecovery {
    let mut scores = [0u32; 64];

    for pair in pairs {
        let expanded_c = expand_last_round_input(pair.c);
        let expanded_cp = expand_last_round_input(pair.c_prime);
        let slice_c = sbox_slice(expanded_c, sbox_index);
        let slice_cp = sbox_slice(expanded_cp, sbox_index);

        for g in 0u8..64 {
            let y = sboxes::eval(sbox_index, slice_c ^ g);
            let y_prime = sboxes::eval(sbox_index, slice_cp ^ g);
            if (y ^ y_prime) == expected_output_diff {
                scores[g as usize] += 1;
            }
        }
    }

    score_to_recovery(&scores)
}

fn score_to_recovery(scores: &[u32; 64]) -> SboxRecovery {
    if scores.iter().all(|&s| s == 0) {
        return SboxRecovery::NoSignal;
    }

    let mut best_guess = 0u8;
    let mut best_score = scores[0];
    for (g, &s) in scores.iter().enumerate().skip(1) {
        if s > best_score {
            best_score = s;
            best_guess = g as u8;
        }
    }

    let mut sorted = *scores;
    sorted.sort_unstable();
    let median_score = (sorted[31] as f64 + sorted[32] as f64) / 2.0;

    SboxRecovery::Recovered {
        guess: best_guess,
        score: best_score,
        median_score,
    }
}

/// Runs the full 8-S-box attack, sharing one pair set across all of them
/// (each S-box's scoring only reads the shared pairs, so this preserves the
/// spec's per-S-box independence while avoiding redundant oracle queries).
pub fn attack<O: Oracle>(
    oracle: &O,
    characteristic: &DifferentialCharacteristic,
    pair_count: u64,
    expected_output_diff: [u8; 8],
    rng: &mut BlockRng,
) -> [SboxRecovery; 8] {
    let pairs = collect_pairs(oracle, characteristic, pair_count, rng);
    core::array::from_fn(|i| attack_sbox(&pairs, i, expected_output_diff[i]))
}

/// [`attack`] with the expected output difference defaulting to zero for
/// every S-box, matching the bundled demo characteristics (see the
/// "expected output difference" open question: a characteristic-accurate
/// value here yields full `K_R` recovery instead of a weak signal).
pub fn attack_default<O: Oracle>(
    oracle: &O,
    characteristic: &DifferentialCharacteristic,
    pair_count: u64,
    rng: &mut BlockRng,
) -> [SboxRecovery; 8] {
    attack(oracle, characteristic, pair_count, [0u8; 8], rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_signal_when_no_guess_ever_matches() {
        let scores = [0u32; 64];
        assert_eq!(score_to_recovery(&scores), SboxRecovery::NoSignal);
    }

    #[test]
    fn ties_break_to_the_smaller_guess() {
        let mut scores = [0u32; 64];
        scores[10] = 5;
        scores[3] = 5;
        match score_to_recovery(&scores) {
            SboxRecovery::Recovered { guess, .. } => assert_eq!(guess, 3),
            SboxRecovery::NoSignal => panic!("expected a recovery"),
        }
    }

    #[test]
    fn bundled_characteristics_match_the_spec() {
        assert_eq!(CHAR_4_ROUND.rounds, 4);
        assert_eq!(CHAR_4_ROUND.delta_l0, 0x4008_0000);
        assert_eq!(CHAR_4_ROUND.delta_r0, 0x0400_0000);
        assert_eq!(CHAR_6_ROUND.rounds, 6);
        assert_eq!(CHAR_6_ROUND.delta_r0, 0x6000_0000);
    }
}
