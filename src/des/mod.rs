//! DES core (C2): key schedule, Feistel round function, full and
//! round-parameterised block encrypt/decrypt.

pub mod sboxes;
pub mod tables;

use crate::bits::{left_rotate, permute};
use crate::error::DesError;
use tables::{E, FP, IP, P, PC1, PC2, ROT};

const MASK_28: u64 = (1u64 << 28) - 1;
const MASK_32: u64 = (1u64 << 32) - 1;

/// A DES instance bound to a single 64-bit key, holding its 16 round subkeys.
pub struct Des {
    subkeys: [u64; 16],
}

impl Des {
    /// Runs the key schedule (PC-1, sixteen rotate-and-PC-2 rounds).
    pub fn new(key: u64) -> Self {
        let pc1 = permute(key, &PC1, 64).expect("PC-1 table indices are fixed and in range");
        let mut c = pc1 >> 28;
        let mut d = pc1 & MASK_28;

        let subkeys = core::array::from_fn(|i| {
            c = left_rotate(c, ROT[i] as u32, 28);
            d = left_rotate(d, ROT[i] as u32, 28);
            let cd = merge_halves(c, d, 28);
            permute(cd, &PC2, 56).expect("PC-2 table indices are fixed and in range")
        });

        Self { subkeys }
    }

    /// The 16 forty-eight-bit round subkeys, in key-schedule order (K1..K16).
    pub fn subkeys(&self) -> &[u64; 16] {
        &self.subkeys
    }

    /// Full 16-round DES encryption of one 64-bit block.
    pub fn encrypt(&self, plaintext: u64) -> u64 {
        feistel_rounds(plaintext, &self.subkeys).0
    }

    /// Full 16-round DES decryption of one 64-bit block.
    pub fn decrypt(&self, ciphertext: u64) -> u64 {
        let mut reversed = self.subkeys;
        reversed.reverse();
        feistel_rounds(ciphertext, &reversed).0
    }

    /// Encrypts through exactly `rounds` Feistel rounds (still applying the
    /// final swap and FP), returning the ciphertext together with the
    /// pre-swap `(L_rounds, R_rounds)` halves. This is the oracle surface
    /// the attacks consume: `rounds` is a caller-supplied value and out of
    /// range is reported rather than panicked on.
    pub fn encrypt_rounds(&self, plaintext: u64, rounds: u8) -> Result<(u64, u64, u64), DesError> {
        validate_round_count(rounds)?;
        Ok(feistel_rounds(plaintext, &self.subkeys[..rounds as usize]))
    }

    /// Decrypts a block produced by `rounds` Feistel rounds, by running the
    /// same structure with that many subkeys reversed.
    pub fn decrypt_rounds(&self, ciphertext: u64, rounds: u8) -> Result<u64, DesError> {
        validate_round_count(rounds)?;
        let mut reversed: [u64; 16] = self.subkeys;
        reversed[..rounds as usize].reverse();
        Ok(feistel_rounds(ciphertext, &reversed[..rounds as usize]).0)
    }
}

fn validate_round_count(rounds: u8) -> Result<(), DesError> {
    if (1..=16).contains(&rounds) {
        Ok(())
    } else {
        Err(DesError::InvalidRoundCount(rounds))
    }
}

fn feistel_rounds(block: u64, subkeys: &[u64]) -> (u64, u64, u64) {
    let ip_block = permute(block, &IP, 64).expect("IP table indices are fixed and in range");
    let mut l = ip_block >> 32;
    let mut r = ip_block & MASK_32;

    for &key in subkeys {
        let next_r = l ^ f(r, key);
        l = r;
        r = next_r;
    }

    let merged = merge_halves(r, l, 32); // final swap
    let out = permute(merged, &FP, 64).expect("FP table indices are fixed and in range");
    (out, l, r)
}

/// The Feistel round function: expand, mix with the subkey, substitute
/// through the eight S-boxes, permute.
fn f(right: u64, round_key: u64) -> u64 {
    let expanded = permute(right, &E, 32).expect("E table indices are fixed and in range");
    let mixed = expanded ^ round_key;

    let mut substituted: u64 = 0;
    for i in 0..8 {
        let chunk = sbox_slice(mixed, i);
        substituted = (substituted << 4) | sboxes::eval(i, chunk) as u64;
    }

    permute(substituted, &P, 32).expect("P table indices are fixed and in range")
}

/// Extracts the 0-based `i`-th 6-bit chunk (MSB-first) from a 48-bit value.
pub fn sbox_slice(expanded: u64, i: usize) -> u8 {
    ((expanded >> (48 - (i + 1) * 6)) & 0b11_1111) as u8
}

/// Given a last-round ciphertext, undoes FP (applies IP) and expands the
/// recovered `R_{rounds-1}` (`= L_rounds`, by the Feistel identity) through
/// `E`, ready for XOR with a guessed final-round subkey slice.
pub fn expand_last_round_input(ciphertext: u64) -> u64 {
    let ip_block = permute(ciphertext, &IP, 64).expect("IP table indices are fixed and in range");
    let l_rounds = ip_block & MASK_32; // second half after undoing the final swap
    permute(l_rounds, &E, 32).expect("E table indices are fixed and in range")
}

fn merge_halves(left: u64, right: u64, half_width: u32) -> u64 {
    (left << half_width) | right
}
