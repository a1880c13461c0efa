use anyhow::{Context, Result};
use base64::Engine;
use clap::{Args, Parser, Subcommand};
use quarry::output::{CountReport, CsvSink, print_snippets};
use quarry::{Quarry, QueryConfig, batch};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quarry")]
#[command(about = "Substring occurrence queries over a suffix-array indexed corpus")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to config.json in the app data directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct QueryArgs {
    /// Corpus file; <corpus>.table.bin and <corpus>.size must sit beside it
    corpus: PathBuf,

    /// Query text
    query: String,

    /// Treat the query as base64-encoded bytes (pre-tokenized queries)
    #[arg(long)]
    base64: bool,
}

impl QueryArgs {
    fn query_bytes(&self) -> Result<Vec<u8>> {
        if self.base64 {
            base64::engine::general_purpose::STANDARD
                .decode(&self.query)
                .context("Failed to decode base64 query")
        } else {
            Ok(self.query.as_bytes().to_vec())
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Count occurrences and print a JSON report
    Count {
        #[command(flatten)]
        args: QueryArgs,

        /// Include text before and after each occurrence
        #[arg(short, long)]
        context: bool,
    },
    /// Show occurrences in context
    Snippets {
        #[command(flatten)]
        args: QueryArgs,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// List the documents containing each occurrence
    Documents {
        #[command(flatten)]
        args: QueryArgs,

        /// Print each document once, in ID order
        #[arg(short, long)]
        distinct: bool,
    },
    /// Write every document containing the query as CSV
    Export {
        #[command(flatten)]
        args: QueryArgs,
    },
    /// Write documents by ID as CSV
    Retrieve {
        /// Corpus file
        corpus: PathBuf,

        /// Document IDs (1-based)
        #[arg(required = true)]
        ids: Vec<u32>,
    },
    /// Run every query in a file, one per line
    Batch {
        /// Corpus file
        corpus: PathBuf,

        /// File with one query per line
        queries: PathBuf,

        /// Write <queries>-results.csv with the matching documents instead of counts
        #[arg(long)]
        csv: bool,

        /// Treat each line as base64-encoded bytes
        #[arg(long)]
        base64: bool,
    },
    /// Verify a corpus and show statistics
    Stats {
        /// Corpus file
        corpus: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => QueryConfig::load_from(path)?,
        None => QueryConfig::load()?,
    };
    let quarry = Quarry::new(config);

    match cli.command {
        Commands::Count { args, context } => {
            let query = args.query_bytes()?;
            let outcome = quarry.query(&args.corpus, &query)?;
            let snippets = match outcome.range {
                Some(range) if context => quarry
                    .context(&args.corpus, range.first as i64, range.last as i64, query.len())?
                    .into_inner(),
                _ => Vec::new(),
            };
            let report = CountReport::new(&outcome, &query, &snippets);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Snippets { args, no_color } => {
            let query = args.query_bytes()?;
            let outcome = quarry.query(&args.corpus, &query)?;
            if let Some(range) = outcome.range {
                let snippets =
                    quarry.context(&args.corpus, range.first as i64, range.last as i64, query.len())?;
                print_snippets(&snippets, &query, !no_color)?;
            }
            eprintln!("{} occurrences", outcome.count);
        }
        Commands::Documents { args, distinct } => {
            let query = args.query_bytes()?;
            let outcome = quarry.query(&args.corpus, &query)?;
            if let Some(range) = outcome.range {
                let (first, last) = (range.first as i64, range.last as i64);
                if distinct {
                    for doc_id in quarry.document_set(&args.corpus, first, last)? {
                        println!("{}", doc_id);
                    }
                } else {
                    for doc_id in quarry.documents(&args.corpus, first, last)? {
                        println!("{}", doc_id);
                    }
                }
            }
        }
        Commands::Export { args } => {
            let query = args.query_bytes()?;
            let outcome = quarry.query(&args.corpus, &query)?;
            let doc_ids: Vec<u32> = match outcome.range {
                Some(range) => quarry
                    .document_set(&args.corpus, range.first as i64, range.last as i64)?
                    .into_iter()
                    .collect(),
                None => Vec::new(),
            };
            write_csv(&quarry, &args.corpus, &doc_ids)?;
        }
        Commands::Retrieve { corpus, ids } => {
            write_csv(&quarry, &corpus, &ids)?;
        }
        Commands::Batch {
            corpus,
            queries,
            csv,
            base64,
        } => {
            let query_list = batch::read_queries(&queries, base64)?;
            let elapsed = if csv {
                let (path, elapsed) = batch::export_to_results_file(&quarry, &corpus, &queries, &query_list)?;
                eprintln!("Wrote {}", path.display());
                elapsed
            } else {
                let stdout = io::stdout();
                let mut out = BufWriter::new(stdout.lock());
                let elapsed = batch::count_queries(&quarry, &corpus, &query_list, &mut out)?;
                out.flush()?;
                elapsed
            };
            eprintln!("Time taken: {:.3}s", elapsed.as_secs_f64());
        }
        Commands::Stats { corpus } => {
            quarry::index::stats::show_stats(&corpus)?;
        }
    }

    Ok(())
}

fn write_csv(quarry: &Quarry, corpus: &Path, doc_ids: &[u32]) -> Result<()> {
    let stdout = io::stdout();
    let mut sink = CsvSink::new(BufWriter::new(stdout.lock()));
    sink.write_header()?;
    quarry
        .retrieve(corpus, doc_ids, &mut sink)
        .with_context(|| format!("Failed to retrieve documents from {}", corpus.display()))?;
    sink.flush()?;
    Ok(())
}
