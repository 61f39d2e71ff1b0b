//! S-box statistics (C3): Difference Distribution Table, Linear
//! Approximation Table, ranking helpers, and the Piling-Up lemma.
//!
//! Each S-box's table is built independently of the others (and, within a
//! table, each input-difference/mask row is independent of the rest) — safe
//! to map-reduce across rows per the concurrency model in the spec.

use crate::bits::parity;
use crate::des::sboxes;

/// 64 input differences x 16 output differences.
pub type Ddt = [[u32; 16]; 64];

/// 64 input masks x 16 output masks, centred on 32 (`count - 32`).
pub type Lat = [[i32; 16]; 64];

/// Builds the Difference Distribution Table for S-box `sbox_index`.
pub fn build_ddt(sbox_index: usize) -> Ddt {
    let mut ddt = [[0u32; 16]; 64];
    for dx in 0u8..64 {
        for x in 0u8..64 {
            let y = sboxes::eval(sbox_index, x);
            let y_shifted = sboxes::eval(sbox_index, x ^ dx);
            let dy = (y ^ y_shifted) as usize;
            ddt[dx as usize][dy] += 1;
        }
    }
    ddt
}

/// Builds the Linear Approximation Table for S-box `sbox_index`.
pub fn build_lat(sbox_index: usize) -> Lat {
    let mut lat = [[0i32; 16]; 64];
    for alpha in 0u8..64 {
        for beta in 0u8..16 {
            let mut count = 0i32;
            for x in 0u8..64 {
                let y = sboxes::eval(sbox_index, x);
                let input_parity = parity((x & alpha) as u64);
                let output_parity = parity((y & beta) as u64);
                if input_parity == output_parity {
                    count += 1;
                }
            }
            lat[alpha as usize][beta as usize] = count - 32;
        }
    }
    lat
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferentialEntry {
    pub delta_x: u8,
    pub delta_y: u8,
    pub count: u32,
    pub probability: f64,
}

/// The `n` highest-count `(Δx, Δy)` entries with `Δx != 0`, ties broken by
/// `(Δx, Δy)` ascending.
pub fn find_best_differentials(ddt: &Ddt, n: usize) -> Vec<DifferentialEntry> {
    let mut entries: Vec<DifferentialEntry> = (1u8..64)
        .flat_map(|dx| (0u8..16).map(move |dy| (dx, dy)))
        .map(|(dx, dy)| {
            let count = ddt[dx as usize][dy as usize];
            DifferentialEntry {
                delta_x: dx,
                delta_y: dy,
                count,
                probability: count as f64 / 64.0,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.delta_x.cmp(&b.delta_x))
            .then(a.delta_y.cmp(&b.delta_y))
    });
    entries.truncate(n);
    entries
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximationEntry {
    pub alpha: u8,
    pub beta: u8,
    pub lat: i32,
    pub bias: f64,
}

/// The `n` highest-`|LAT|` entries with `alpha != 0` and `beta != 0`.
pub fn find_best_approximations(lat: &Lat, n: usize) -> Vec<ApproximationEntry> {
    let mut entries: Vec<ApproximationEntry> = (1u8..64)
        .flat_map(|a| (1u8..16).map(move |b| (a, b)))
        .map(|(a, b)| {
            let value = lat[a as usize][b as usize];
            ApproximationEntry {
                alpha: a,
                beta: b,
                lat: value,
                bias: value.unsigned_abs() as f64 / 64.0,
            }
        })
        .collect();

    entries.sort_by(|a, b| b.lat.abs().cmp(&a.lat.abs()));
    entries.truncate(n);
    entries
}

/// The single `(alpha, beta)` mask (both non-zero) maximising `|LAT|`.
pub fn best_lat_mask(lat: &Lat) -> (u8, u8, i32) {
    let mut best = (1u8, 1u8, lat[1][1]);
    for a in 1u8..64 {
        for b in 1u8..16 {
            let value = lat[a as usize][b as usize];
            if value.abs() > best.2.abs() {
                best = (a, b, value);
            }
        }
    }
    best
}

/// Combined bias of a chain of independent per-round biases, via the
/// Piling-Up lemma: `2^(n-1) * prod(eps_i)`.
pub fn piling_up(biases: &[f64]) -> f64 {
    let product: f64 = biases.iter().product();
    2f64.powi(biases.len() as i32 - 1) * product
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleEstimate {
    Pairs(u64),
    Infeasible,
}

/// Estimates the number of pairs needed for a ~95% success rate against a
/// characteristic of the given bias (`N ~= 8 / eps^2`).
pub fn estimate_required_pairs(bias: f64) -> SampleEstimate {
    const SUCCESS_CONSTANT: f64 = 8.0;
    if bias == 0.0 {
        SampleEstimate::Infeasible
    } else {
        SampleEstimate::Pairs((SUCCESS_CONSTANT / (bias * bias)).ceil() as u64)
    }
}
