use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tokcount")]
#[command(about = "Estimate LLM token counts for files and directories", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count tokens in a single text file
    File(FileArgs),

    /// Recursively count tokens in every file under a directory
    Dir(DirArgs),
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// Path to the text file to analyze
    pub path: PathBuf,

    /// Output only the token count (useful for scripting)
    #[arg(short, long)]
    pub quiet: bool,

    /// Show detailed file statistics
    #[arg(short, long)]
    pub stats: bool,

    /// Tokenizer encoding (default from config: cl100k_base)
    #[arg(short, long)]
    pub encoding: Option<String>,
}

#[derive(Args, Debug)]
pub struct DirArgs {
    /// Path to the directory to analyze
    pub path: PathBuf,

    /// Include only files matching these patterns (comma-separated, e.g. "*.py,*.js")
    #[arg(short = 'f', long = "filter")]
    pub filter: Option<String>,

    /// Exclude files matching these patterns (comma-separated, e.g. "*.log,*.tmp")
    #[arg(short, long)]
    pub exclude: Option<String>,

    /// Write a CSV report to this file
    #[arg(short, long, value_name = "FILENAME")]
    pub report: Option<PathBuf>,

    /// Output only the summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Maximum number of parallel workers (default: available cores)
    #[arg(long)]
    pub max_workers: Option<usize>,

    /// Tokenizer encoding (default from config: cl100k_base)
    #[arg(long)]
    pub encoding: Option<String>,

    /// Do not descend into directories whose name matches an exclude pattern
    #[arg(long)]
    pub prune_dirs: bool,

    /// Print the report as JSON instead of text
    #[arg(long, conflicts_with = "quiet")]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_command() {
        let cli = Cli::try_parse_from(["tokcount", "file", "README.md", "-q", "-e", "o200k_base"])
            .unwrap();
        match cli.command {
            Commands::File(args) => {
                assert_eq!(args.path, PathBuf::from("README.md"));
                assert!(args.quiet);
                assert!(!args.stats);
                assert_eq!(args.encoding.as_deref(), Some("o200k_base"));
            }
            Commands::Dir(_) => panic!("expected file command"),
        }
    }

    #[test]
    fn test_parse_dir_command() {
        let cli = Cli::try_parse_from([
            "tokcount",
            "dir",
            "./src",
            "--filter",
            "*.py,*.js",
            "-e",
            "*.log",
            "--report",
            "out.csv",
            "--max-workers",
            "4",
            "--prune-dirs",
        ])
        .unwrap();
        match cli.command {
            Commands::Dir(args) => {
                assert_eq!(args.path, PathBuf::from("./src"));
                assert_eq!(args.filter.as_deref(), Some("*.py,*.js"));
                assert_eq!(args.exclude.as_deref(), Some("*.log"));
                assert_eq!(args.report, Some(PathBuf::from("out.csv")));
                assert_eq!(args.max_workers, Some(4));
                assert!(args.prune_dirs);
                assert!(!args.json);
            }
            Commands::File(_) => panic!("expected dir command"),
        }
    }

    #[test]
    fn test_json_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["tokcount", "dir", ".", "--json", "--quiet"]).is_err());
    }
}
