use anstream::println;
use clap::Parser;
use hrsw::Stopwatch;
use human_duration::human_duration;
use owo_colors::OwoColorize;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use power_heap::PowerHeap;
use power_heap::PowerHeapError;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Most values printed after draining a heap.
const MAX_PRINTED_VALUES: usize = 32;

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(long_version = power_heap::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Branching factor exponent, nodes get `2^k` children.
    #[arg(
        short = 'k',
        long,
        env = "POWER_HEAP_EXPONENT",
        default_value_t = 1i32,
        allow_negative_numbers = true
    )]
    pub exponent: i32,

    /// Values to insert. Runs the binary and quaternary demo when empty.
    #[arg(allow_negative_numbers = true)]
    pub values: Vec<i64>,

    /// Also insert this many random values.
    #[arg(long)]
    pub random: Option<usize>,
    #[arg(long, default_value_t = 0u64)]
    pub seed: u64,

    /// Print memory stats before draining.
    #[arg(long)]
    pub stats: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

/// Inserts `values` and pops up to `pops` of them (all when `None`).
fn run(
    name: &str,
    exponent: i32,
    values: &[i64],
    pops: Option<usize>,
    stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut heap = PowerHeap::with_capacity(exponent, values.len())?;
    println!(
        "{} (arity {}, {} values)",
        name.bold(),
        heap.branching_factor().cyan(),
        values.len()
    );

    let mut stopwatch = Stopwatch::new_started();
    for v in values {
        heap.insert(*v);
    }
    stopwatch.stop();
    println!("  inserted in {}", human_duration(&stopwatch.elapsed()).yellow());

    if stats {
        heap.print_memory_stats()?;
    }

    let pops = pops.unwrap_or(heap.len());
    let mut popped = Vec::with_capacity(pops);
    let mut stopwatch = Stopwatch::new_started();
    for _ in 0..pops {
        match heap.pop_max() {
            Ok(v) => popped.push(v),
            Err(PowerHeapError::EmptyStructure) => break,
            Err(e) => return Err(e.into()),
        }
    }
    stopwatch.stop();
    println!(
        "  popped {} in {}",
        popped.len(),
        human_duration(&stopwatch.elapsed()).yellow()
    );

    for v in popped.iter().take(MAX_PRINTED_VALUES) {
        println!("  {}", v.green());
    }
    if popped.len() > MAX_PRINTED_VALUES {
        println!("  ... {} more", popped.len() - MAX_PRINTED_VALUES);
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.color.write_global();

    if args.values.is_empty() && args.random.is_none() {
        run("Binary", 1, &[10, 20, 15], Some(3), args.stats)?;
        run("Quaternary", 2, &[5, 30, 25, 40, 35], Some(2), args.stats)?;
        return Ok(());
    }

    let mut values = args.values.clone();
    if let Some(n) = args.random {
        let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
        values.extend((0..n).map(|_| rng.random_range(-1_000_000..1_000_000i64)));
    }

    if let Err(e) = run("PowerHeap", args.exponent, &values, None, args.stats) {
        println!("{} {e}", "Error:".red());
        return Err(e);
    }

    Ok(())
}
