//! A pedagogical cryptanalysis workbench for DES.
//!
//! The core is pure and single-threaded: a bit-exact DES primitive
//! ([`des`]), the Difference Distribution Table / Linear Approximation
//! Table builders for its S-boxes ([`stats`]), and the differential and
//! linear last-round key-recovery attacks built on top of them
//! ([`attack`]). Randomness ([`rng`]) is always seeded explicitly; there is
//! no implicit global source.

pub mod attack;
pub mod bits;
pub mod des;
pub mod error;
pub mod rng;
pub mod stats;

pub use des::Des;
pub use error::DesError;
