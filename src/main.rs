use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use linemerge::{
    compare_dirs, enumerate_hunks, DiffAlgorithm, DiffAlgorithmType, DiffStats, Differ, Error,
    FileStatus, MergeDirection, Merger, NormalizationOptions,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(version, about = "A tool for comparing two texts line by line and merging hunks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Inputs {
    /// The original file (empty if omitted)
    #[arg(short = 'i', long)]
    old: Option<PathBuf>,

    /// The new file (empty if omitted)
    #[arg(short, long)]
    new: Option<PathBuf>,

    /// Diffing algorithm
    #[arg(short, long, value_enum, default_value_t = Algorithm::Lcs)]
    algorithm: Algorithm,

    /// Compare lines case-insensitively
    #[arg(long, default_value_t = false)]
    ignore_case: bool,

    /// Collapse runs of whitespace before comparing
    #[arg(short = 'w', long, default_value_t = false)]
    ignore_whitespace: bool,

    /// Remove SQL comments before comparing
    #[arg(long, default_value_t = false)]
    strip_comments: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Algorithm {
    Lcs,
    Myers,
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    OldToNew,
    NewToOld,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the line diff of two files
    Diff {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// List the hunks of the diff of two files
    Hunks {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Copy one hunk from one file to the other
    Merge {
        #[command(flatten)]
        inputs: Inputs,

        /// Index of the hunk, as listed by `hunks`
        #[arg(long)]
        hunk: usize,

        /// Which side to copy from
        #[arg(short, long, value_enum)]
        direction: Direction,

        /// The output file (defaults to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare all files of two directories
    CompareDirs {
        /// The original directory
        old: PathBuf,

        /// The new directory
        new: PathBuf,
    },
}

struct Loaded {
    old: String,
    new: String,
    differ: Differ,
}

impl Inputs {
    fn load(&self) -> Result<Loaded> {
        let old = read_optional(self.old.as_deref())?;
        let new = read_optional(self.new.as_deref())?;

        let algorithm = match self.algorithm {
            Algorithm::Lcs => DiffAlgorithmType::Lcs,
            Algorithm::Myers => DiffAlgorithmType::Myers,
        };
        let normalization = NormalizationOptions::new()
            .ignore_case(self.ignore_case)
            .collapse_whitespace(self.ignore_whitespace)
            .strip_comments(self.strip_comments);
        let differ = Differ::new(&old, &new)
            .algorithm(algorithm)
            .normalization(normalization);

        Ok(Loaded { old, new, differ })
    }
}

fn read_optional(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => Ok(String::new()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Diff { inputs } => {
            let loaded = inputs.load()?;
            let diff = loaded.differ.compute();
            for entry in &diff {
                let old_line = entry.old_line.map(|n| n.to_string()).unwrap_or_default();
                let new_line = entry.new_line.map(|n| n.to_string()).unwrap_or_default();
                println!("{:>5} {:>5} {}", old_line, new_line, entry);
            }
            let stats = DiffStats::from_entries(&diff);
            if stats.is_unchanged() {
                println!("\nidentical ({} lines)", stats.same);
            } else {
                println!("\n{}", stats);
            }
        }

        Commands::Hunks { inputs } => {
            let loaded = inputs.load()?;
            let diff = loaded.differ.compute();
            for (index, hunk) in enumerate_hunks(&diff).iter().enumerate() {
                println!("{:>3}: {}", index, hunk);
            }
        }

        Commands::Merge {
            inputs,
            hunk,
            direction,
            output,
        } => {
            let loaded = inputs.load()?;
            let diff = loaded.differ.compute();
            let hunks = enumerate_hunks(&diff);
            let selected = hunks.get(hunk).ok_or(Error::HunkOutOfRange {
                index: hunk,
                count: hunks.len(),
            })?;

            let direction = match direction {
                Direction::OldToNew => MergeDirection::OldToNew,
                Direction::NewToOld => MergeDirection::NewToOld,
            };
            info!(%selected, %direction, "merging hunk {}", hunk);
            let nothing_to_copy = match direction {
                MergeDirection::OldToNew => selected.is_insertion(),
                MergeDirection::NewToOld => selected.is_deletion(),
            };
            if nothing_to_copy {
                warn!(
                    %selected,
                    "hunk has no lines to copy {}, only {} changes the text",
                    direction,
                    direction.reverse()
                );
            }
            let result = Merger::new(&diff).apply(selected, direction, &loaded.old, &loaded.new);

            match output {
                Some(path) => fs::write(path, result)?,
                None => print!("{}", result),
            }
        }

        Commands::CompareDirs { old, new } => {
            let results = compare_dirs(&old, &new)?;

            let mut changed_count = 0;
            for result in &results {
                let path = result.path.display();
                match &result.status {
                    FileStatus::Added => println!("  Added:     {}", path),
                    FileStatus::Removed => println!("  Removed:   {}", path),
                    FileStatus::Modified(_) => {
                        if let Some(stats) = result.stats() {
                            println!("  Modified:  {} ({})", path, stats);
                        }
                    }
                    FileStatus::Identical => {
                        continue;
                    }
                    FileStatus::Binary => println!("  Binary:    {}", path),
                }
                changed_count += 1;
            }

            println!("\nSummary:");
            println!("  {} files compared", results.len());
            println!("  {} differ", changed_count);
        }
    }

    Ok(())
}
