//! `bench_local.rs` — quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Fast, ad-hoc timing for a handful of searches on *your* machine.
//! - Loads the corpus once, then runs each query several times and reports the median.
//! - Also times a cold load and a cached reload of the corpus directory.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 5`
//! - Print a few matches:            `cargo run --bin bench_local --release -- -p 5`
//! - See all flags:                  `cargo run --bin bench_local -- --help`
//!
//! NOTES
//! -----
//! - Not statistically rigorous; use the same machine and `--release` for comparable numbers.
//! - Queries live in `get_cases()` below, written in the same shape a front end submits.
//! - One warm-up run per query is done (not included in timing).

use clap::Parser;
use std::hint::black_box;
use std::time::Instant;

use cercaparole::constraints::ConstraintSet;
use cercaparole::corpus::{CorpusCache, DEFAULT_CORPUS_DIR};
use cercaparole::filter::filter_words;
use cercaparole::request::SearchRequest;

/// Simple local benchmark runner: load the corpus once, time several searches.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the `.txt` word lists
    #[arg(short, long, default_value = DEFAULT_CORPUS_DIR)]
    dir: String,

    /// Number of repeats per query (use >1 to reduce noise; median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 1)]
    num_repeats: usize,

    /// Print up to this many matches per query (0 = print none)
    #[arg(short = 'p', long = "print", default_value_t = 0)]
    print_limit: usize,
}

/// A benchmark case: a display name and the raw form fields.
struct Case {
    name: &'static str,
    request: SearchRequest,
}

fn field(s: &str) -> Option<String> {
    Some(s.to_string())
}

/// Edit/add new queries here.
fn get_cases() -> Vec<Case> {
    vec![
        Case { name: "everything", request: SearchRequest::default() },
        Case { name: "length=5", request: SearchRequest { length: field("5"), ..Default::default() } },
        Case {
            name: "include=ae exclude=t",
            request: SearchRequest { include_letters: field("ae"), exclude_letters: field("t"), ..Default::default() },
        },
        Case { name: "starts_with=ca", request: SearchRequest { starts_with: field("ca"), ..Default::default() } },
        Case { name: "ends_with=zione", request: SearchRequest { ends_with: field("zione"), ..Default::default() } },
        Case {
            name: "positions=1:a,3:a",
            request: SearchRequest { letters_at_positions: field("1:a,3:a"), ..Default::default() },
        },
        Case {
            name: "length=7 include=rst positions=0:p",
            request: SearchRequest {
                length: field("7"),
                include_letters: field("rst"),
                letters_at_positions: field("0:p"),
                ..Default::default()
            },
        },
    ]
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

const MAX_NAME_LEN: usize = 40;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cache = CorpusCache::new();

    // Cold load, then a cached one: the difference is what the cache saves per query.
    eprintln!("Loading corpus from: {}", cli.dir);
    let t_load = Instant::now();
    let num_words = cache.get_or_load(&cli.dir)?.len();
    let load_secs = t_load.elapsed().as_secs_f64();
    let t_cached = Instant::now();
    let corpus = cache.get_or_load(&cli.dir)?;
    let cached_secs = t_cached.elapsed().as_secs_f64();
    eprintln!("Loaded {num_words} words in {load_secs:.3}s (cached lookup {cached_secs:.4}s)");

    let cases = get_cases();
    let mut summary: Vec<(&str, f64, usize)> = Vec::with_capacity(cases.len());

    for (idx, case) in cases.iter().enumerate() {
        eprintln!("\n[{:02}] {}", idx + 1, case.name);

        let constraints: ConstraintSet = match case.request.to_constraints() {
            Ok(c) => c,
            Err(e) => {
                eprintln!("  ✗ Invalid query: {}", e.display_detailed());
                continue;
            }
        };

        // warm-up, not timed
        let _warmup = filter_words(&corpus.words, &constraints);

        let mut times = Vec::with_capacity(cli.num_repeats);
        let mut last_matches: Vec<&str> = Vec::new();
        for rep in 0..cli.num_repeats {
            let t_filter = Instant::now();
            let matches = filter_words(&corpus.words, black_box(&constraints));
            let filter_secs = t_filter.elapsed().as_secs_f64();

            times.push(filter_secs);
            last_matches = black_box(matches);
            eprintln!(
                "  run {:>2}/{:>2}: {:.4}s ({} matches)",
                rep + 1,
                cli.num_repeats,
                filter_secs,
                last_matches.len()
            );
        }

        let med = median(times);

        for word in last_matches.iter().take(cli.print_limit) {
            println!("{word}");
        }

        eprintln!(
            "  → median {:.4}s over {} run(s); {} {}",
            med,
            cli.num_repeats,
            last_matches.len(),
            pluralizer(last_matches.len(), "match", "matches")
        );
        summary.push((case.name, med, last_matches.len()));
    }

    eprintln!("\n==== Summary ====");
    eprintln!("{:<MAX_NAME_LEN$} | {:>10} | {:>9}", "query", "median (s)", "# matches");
    eprintln!("{:-<MAX_NAME_LEN$}-+-{:-<10}-+-{:-<9}", "", "", "");
    for (name, med, num_matches) in &summary {
        let display = if name.chars().count() > MAX_NAME_LEN {
            format!("{}…", name.chars().take(MAX_NAME_LEN - 1).collect::<String>())
        } else {
            (*name).to_string()
        };
        eprintln!("{display:<MAX_NAME_LEN$} | {med:>10.4} | {num_matches:>9}");
    }

    Ok(())
}

fn pluralizer<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}
