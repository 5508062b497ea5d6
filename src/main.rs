use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser};

use cercaparole::corpus::{Corpus, CorpusCache, CorpusError, DEFAULT_CORPUS_DIR};
use cercaparole::errors::ParseError;
use cercaparole::filter::{search_corpus, SearchResult};
use cercaparole::request::SearchRequest;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// Search Italian word lists by length, letters, prefix, suffix and pinned positions
#[derive(Parser, Debug)]
#[command(author, version = VERSION, about, long_about = None)]
struct Cli {
    /// Directory holding the `.txt` word lists
    #[arg(short, long, default_value = DEFAULT_CORPUS_DIR)]
    dir: PathBuf,

    #[command(flatten)]
    query: QueryArgs,

    /// Read one query per line from stdin (same flags, without --dir); `quit` to stop
    #[arg(long, conflicts_with_all = ["length", "include", "exclude", "starts_with", "ends_with", "first_letters", "positions"])]
    interactive: bool,
}

/// The search fields. Empty values count as not given.
#[derive(Args, Debug, Default, Clone)]
struct QueryArgs {
    /// Exact number of letters
    #[arg(short, long)]
    length: Option<String>,

    /// Letters that must all appear somewhere in the word
    #[arg(short, long)]
    include: Option<String>,

    /// Letters that must not appear anywhere in the word
    #[arg(short = 'x', long)]
    exclude: Option<String>,

    /// Required prefix
    #[arg(short, long)]
    starts_with: Option<String>,

    /// Required suffix
    #[arg(short, long)]
    ends_with: Option<String>,

    /// Letters that must fill the first positions, in order
    #[arg(short, long)]
    first_letters: Option<String>,

    /// Letters pinned at zero-based positions, e.g. `0:c,2:t`.
    /// Overrides --starts-with, --ends-with and --first-letters
    #[arg(short, long)]
    positions: Option<String>,
}

impl From<QueryArgs> for SearchRequest {
    fn from(q: QueryArgs) -> Self {
        SearchRequest {
            length: q.length,
            include_letters: q.include,
            exclude_letters: q.exclude,
            starts_with: q.starts_with,
            ends_with: q.ends_with,
            first_letters: q.first_letters,
            letters_at_positions: q.positions,
        }
    }
}

/// One line of an interactive session.
#[derive(Parser, Debug)]
#[command(name = "query", no_binary_name = true)]
struct QueryLine {
    #[command(flatten)]
    query: QueryArgs,
}

/// Entry point of the cercaparole CLI.
///
/// Delegates to [`try_main`], printing any error in detailed form
/// before exiting with code 1.
fn main() -> ExitCode {
    cercaparole::log::init_logger(cercaparole::log::debug_requested());

    if let Err(e) = try_main() {
        eprintln!("Error: {}", describe_error(e.as_ref()));
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Detailed display (code + help) for our own error types, plain display otherwise.
fn describe_error(e: &(dyn std::error::Error + 'static)) -> String {
    if let Some(pe) = e.downcast_ref::<ParseError>() {
        pe.display_detailed()
    } else if let Some(ce) = e.downcast_ref::<CorpusError>() {
        ce.display_detailed()
    } else {
        e.to_string()
    }
}

fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.interactive {
        return run_interactive(&cli.dir);
    }

    // validate before touching the disk
    let constraints = SearchRequest::from(cli.query).to_constraints().map_err(|pe| *pe)?;
    log::debug!("Constraints: {constraints}");

    let t_load = Instant::now();
    let corpus = Corpus::load_from_dir(&cli.dir)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    let t_filter = Instant::now();
    let result = search_corpus(&corpus, &constraints);
    let filter_secs = t_filter.elapsed().as_secs_f64();

    write_result(&mut BufWriter::new(io::stdout().lock()), &result)?;

    eprintln!(
        "Loaded {} words in {:.3}s; filtered in {:.3}s.",
        corpus.len(),
        load_secs,
        filter_secs
    );
    Ok(())
}

/// Run queries from stdin against `dir`, reloading the corpus only when it changes.
///
/// Bad queries and load failures are reported and the session goes on.
fn run_interactive(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut cache = CorpusCache::new();
    eprintln!("Corpus: {}. One query per line (e.g. `-l 5 -e o`), `quit` to stop.", dir.display());

    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        let query = match QueryLine::try_parse_from(line.split_whitespace()) {
            Ok(q) => q.query,
            Err(e) => {
                // clap renders its own usage/help text
                eprintln!("{e}");
                continue;
            }
        };

        let constraints = match SearchRequest::from(query).to_constraints() {
            Ok(c) => c,
            Err(pe) => {
                eprintln!("Error: {}", pe.display_detailed());
                continue;
            }
        };

        let corpus = match cache.get_or_load(dir) {
            Ok(corpus) => corpus,
            Err(ce) => {
                eprintln!("Error: {}", ce.display_detailed());
                continue;
            }
        };

        let result = search_corpus(corpus, &constraints);
        write_result(&mut BufWriter::new(io::stdout().lock()), &result)?;
    }
    Ok(())
}

/// Print the match count, then one word per line.
fn write_result<W: Write>(out: &mut W, result: &SearchResult) -> io::Result<()> {
    writeln!(out, "Numero di risultati: {}", result.count())?;
    for word in &result.words {
        writeln!(out, "{word}")?;
    }
    out.flush()
}
