//! Benchmark spherical bounding boxes at large batch sizes.
//!
//! Run with: cargo run --release --bin bench_bboxes
//!
//! Usage:
//!   bench_bboxes               Run default size (1m)
//!   bench_bboxes 100k 1m 10m   Run multiple sizes
//!   bench_bboxes -n 10         Run 10 iterations (for profiling)

use std::f64::consts::{PI, TAU};
use std::time::{Duration, Instant};

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use idv_geometry::geometry::{BoundsConfig, Spherical, SphericalBoundsEngine, SphericalElement};
use idv_geometry::util::{format_rate, parse_count};

#[derive(Parser)]
#[command(name = "bench_bboxes")]
#[command(about = "Benchmark sequential vs parallel spherical bounding boxes")]
struct Args {
    /// Element counts to benchmark (e.g., 100k, 1m, 10M)
    #[arg(value_parser = parse_count)]
    sizes: Vec<usize>,

    /// Random seed
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Number of iterations per size
    #[arg(short = 'n', long, default_value_t = 3)]
    iterations: usize,
}

fn format_num(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{}k", n / 1_000)
    } else {
        format!("{}", n)
    }
}

/// Random elements, a few percent of which straddle a pole or wrap through phi = 0.
fn generate_elements(n: usize, seed: u64) -> Vec<SphericalElement> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let r = rng.gen_range(0.1..1.0);
            let theta = rng.gen_range(0.0..PI);
            let phi = rng.gen_range(0.0..TAU);
            let dr = rng.gen_range(0.0..0.1);
            let dtheta = rng.gen_range(0.0..0.2);
            let dphi = rng.gen_range(0.0..0.4);
            SphericalElement::from_edges(
                Spherical::new(r, (theta - dtheta).max(0.0), phi),
                Spherical::new(r + dr, (theta + dtheta).min(PI), phi + dphi),
            )
        })
        .collect()
}

fn time_runs(
    engine: &SphericalBoundsEngine,
    elements: &[SphericalElement],
    iterations: usize,
) -> (Duration, Vec<idv_geometry::geometry::CartesianBBox>) {
    let mut best = Duration::MAX;
    let mut boxes = Vec::new();
    for _ in 0..iterations.max(1) {
        let t0 = Instant::now();
        boxes = engine.element_bboxes(elements);
        best = best.min(t0.elapsed());
    }
    (best, boxes)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    println!("Spherical Bounding Box Benchmark");
    println!("================================\n");

    let sizes: Vec<usize> = if args.sizes.is_empty() {
        vec![1_000_000]
    } else {
        args.sizes
    };

    println!("Configuration:");
    println!("  seed = {}", args.seed);
    println!("  threads = {}", rayon::current_num_threads());
    println!(
        "  sizes = {:?}",
        sizes.iter().map(|&n| format_num(n)).collect::<Vec<_>>()
    );
    println!("  iterations = {}", args.iterations);

    let sequential = SphericalBoundsEngine::new(BoundsConfig {
        parallel_threshold: usize::MAX,
        ..BoundsConfig::default()
    });
    let parallel = SphericalBoundsEngine::new(BoundsConfig {
        parallel_threshold: 0,
        ..BoundsConfig::default()
    });

    let mut mismatches = 0usize;
    println!(
        "\n{:>10} | {:>11} | {:>11} | {:>10} | {:>7}",
        "n", "sequential", "parallel", "throughput", "speedup"
    );
    println!("{:-<10}-+-{:-<11}-+-{:-<11}-+-{:-<10}-+-{:-<7}", "", "", "", "", "");

    for &n in &sizes {
        let elements = generate_elements(n, args.seed);

        let (seq_time, seq_boxes) = time_runs(&sequential, &elements, args.iterations);
        let (par_time, par_boxes) = time_runs(&parallel, &elements, args.iterations);

        if seq_boxes != par_boxes {
            mismatches += 1;
        }

        println!(
            "{:>10} | {:>9.1}ms | {:>9.1}ms | {:>10} | {:>6.2}x",
            format_num(n),
            seq_time.as_secs_f64() * 1000.0,
            par_time.as_secs_f64() * 1000.0,
            format_rate(n, par_time),
            seq_time.as_secs_f64() / par_time.as_secs_f64().max(f64::MIN_POSITIVE)
        );
    }

    if mismatches > 0 {
        println!("\nWARNING: parallel boxes differ from sequential for {} size(s)", mismatches);
        std::process::exit(1);
    }
    println!("\nBenchmark complete.");
}
