//! CLI driver for the DES cryptanalysis workbench (external collaborator —
//! argument handling, progress printing and PRNG seeding all live here, not
//! in the core library).

use clap::Parser;
use des_cryptanalysis::attack::{differential, linear, RoundReducedOracle};
use des_cryptanalysis::bits::block_to_hex;
use des_cryptanalysis::des::Des;
use des_cryptanalysis::rng::BlockRng;
use des_cryptanalysis::stats::{
    build_ddt, build_lat, estimate_required_pairs, find_best_approximations, find_best_differentials,
    piling_up, SampleEstimate,
};

const DEMO_ROUNDS: u8 = 4;
const DEMO_SEED: u64 = 42;

/// Differential and linear cryptanalysis demos against round-reduced DES.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Round-trip DES against the FIPS 46-3 fixed test vectors.
    #[arg(long = "test-des")]
    test_des: bool,

    /// Build and rank the Difference Distribution Tables.
    #[arg(long = "analyze-ddt")]
    analyze_ddt: bool,

    /// Build and rank the Linear Approximation Tables.
    #[arg(long = "analyze-lat")]
    analyze_lat: bool,

    /// Run the differential key-recovery attack demo.
    #[arg(long)]
    differential: bool,

    /// Run the linear key-recovery attack demo.
    #[arg(long)]
    linear: bool,

    /// Run every phase, in order: DES tests, DDT, differential attack, LAT,
    /// linear attack. This is the default when no switch is given.
    #[arg(long)]
    all: bool,

    /// Requested round count for the attack demos. The bundled
    /// characteristics are 4-round; a different value is warned about and
    /// clamped to 4.
    #[arg(long, default_value_t = DEMO_ROUNDS)]
    rounds: u8,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let any_selected =
        cli.test_des || cli.analyze_ddt || cli.analyze_lat || cli.differential || cli.linear || cli.all;
    let run_all = cli.all || !any_selected;

    if run_all {
        log::info!("phase 1/5: DES round-trip tests");
        let des_ok = run_test_des();
        if !des_ok {
            log::error!("DES self-test failed; aborting before the remaining phases");
            return;
        }
        log::info!("phase 2/5: DDT analysis");
        run_analyze_ddt();
        log::info!("phase 3/5: differential attack");
        run_differential(cli.rounds);
        log::info!("phase 4/5: LAT analysis");
        run_analyze_lat();
        log::info!("phase 5/5: linear attack");
        run_linear(cli.rounds);
        return;
    }

    if cli.test_des {
        run_test_des();
    }
    if cli.analyze_ddt {
        run_analyze_ddt();
    }
    if cli.differential {
        run_differential(cli.rounds);
    }
    if cli.analyze_lat {
        run_analyze_lat();
    }
    if cli.linear {
        run_linear(cli.rounds);
    }
}

struct Vector {
    key: &'static str,
    plaintext: &'static str,
    ciphertext: &'static str,
}

const VECTORS: [Vector; 3] = [
    Vector {
        key: "133457799BBCDFF1",
        plaintext: "0123456789ABCDEF",
        ciphertext: "85E813540F0AB405",
    },
    Vector {
        key: "0E329232EA6D0D73",
        plaintext: "8787878787878787",
        ciphertext: "0000000000000000",
    },
    Vector {
        key: "0000000000000000",
        plaintext: "0000000000000000",
        ciphertext: "8CA64DE9C1B123A7",
    },
];

fn run_test_des() -> bool {
    use des_cryptanalysis::bits::hex_to_block;

    let mut all_passed = true;
    for (i, v) in VECTORS.iter().enumerate() {
        let key = hex_to_block(v.key).expect("fixed test vector key is valid hex");
        let plaintext = hex_to_block(v.plaintext).expect("fixed test vector plaintext is valid hex");
        let expected = hex_to_block(v.ciphertext).expect("fixed test vector ciphertext is valid hex");

        let des = Des::new(key);
        let ciphertext = des.encrypt(plaintext);
        let decrypted = des.decrypt(ciphertext);
        let passed = ciphertext == expected && decrypted == plaintext;
        all_passed &= passed;

        log::info!(
            "test vector {}: {} (key={}, ciphertext={})",
            i + 1,
            if passed { "PASS" } else { "FAIL" },
            v.key,
            block_to_hex(ciphertext),
        );
    }
    all_passed
}

fn run_analyze_ddt() {
    for i in 0..8 {
        let ddt = build_ddt(i);
        let best = find_best_differentials(&ddt, 3);
        log::info!("s-box {}: top differentials {:?}", i + 1, best);
    }
}

fn run_analyze_lat() {
    use des_cryptanalysis::stats::best_lat_mask;

    for i in 0..8 {
        let lat = build_lat(i);
        let best = find_best_approximations(&lat, 3);
        log::info!("s-box {}: top approximations {:?}", i + 1, best);
    }

    // Piling-Up / sample-size demonstration: chain the single S-box with the
    // strongest bias across a 3-round characteristic and estimate how many
    // known plaintexts Matsui's Algorithm 2 would need against it.
    let (best_sbox, alpha, beta, lat_value) = (0..8)
        .map(|i| {
            let (a, b, v) = best_lat_mask(&build_lat(i));
            (i, a, b, v)
        })
        .max_by_key(|&(_, _, _, v)| v.abs())
        .unwrap();
    let bias = lat_value.unsigned_abs() as f64 / 64.0;
    let combined_bias = piling_up(&[bias; 3]);
    log::info!(
        "piling-up demo: s-box {} mask (alpha={alpha}, beta={beta}) bias={bias:.4}, 3-round combined bias={combined_bias:.6}",
        best_sbox + 1,
    );
    match estimate_required_pairs(combined_bias) {
        SampleEstimate::Pairs(n) => log::info!("estimated known plaintexts needed for ~95% success: {n}"),
        SampleEstimate::Infeasible => log::info!("combined bias is zero; attack is infeasible at this round count"),
    }
}

fn clamp_rounds(requested: u8) -> u8 {
    if requested != DEMO_ROUNDS {
        log::warn!(
            "requested round count {requested} is not supported by the bundled characteristics; forcing {DEMO_ROUNDS}"
        );
        DEMO_ROUNDS
    } else {
        requested
    }
}

fn run_differential(requested_rounds: u8) {
    let rounds = clamp_rounds(requested_rounds);
    let mut rng = BlockRng::seeded(DEMO_SEED);
    let key = rng.next_block();
    let des = Des::new(key);
    let oracle = RoundReducedOracle::new(&des, rounds);

    let recoveries = differential::attack_default(&oracle, &differential::CHAR_4_ROUND, 500, &mut rng);
    for (i, recovery) in recoveries.iter().enumerate() {
        log::info!("s-box {}: {:?}", i + 1, recovery);
    }
    log::info!(
        "true K_{rounds} for reference: {}",
        block_to_hex(des.subkeys()[(rounds - 1) as usize])
    );
}

fn run_linear(requested_rounds: u8) {
    let rounds = clamp_rounds(requested_rounds);
    let mut rng = BlockRng::seeded(DEMO_SEED);
    let key = rng.next_block();
    let des = Des::new(key);
    let oracle = RoundReducedOracle::new(&des, rounds);

    let lats: [_; 8] = core::array::from_fn(build_lat);
    let recoveries = linear::attack(&oracle, 1000, &lats, &mut rng);
    for (i, recovery) in recoveries.iter().enumerate() {
        log::info!("s-box {}: {:?}", i + 1, recovery);
    }
    log::info!(
        "true K_{rounds} for reference: {}",
        block_to_hex(des.subkeys()[(rounds - 1) as usize])
    );
}
