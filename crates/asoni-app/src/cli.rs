use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "asoni", version, about = "Synthetic Georgian OCR dataset builder")]
pub struct Cli {
    /// JSON config file; defaults and environment are used when absent
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the weighted dictionary
    #[arg(long, global = true, value_name = "DIR")]
    pub dict_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the dictionary from Georgian Wikipedia
    BuildWiki(BuildWikiArgs),
    /// Merge words from local PDF and DOCX files into the dictionary
    BuildDocs(BuildDocsArgs),
    /// Render the labeled image dataset
    Generate(GenerateArgs),
    /// Print sample words, sequences and numbers
    Sample(SampleArgs),
    /// Print dictionary statistics
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
pub struct BuildWikiArgs {
    /// Total pages to fetch, seed pages included
    #[arg(long, value_name = "N")]
    pub pages: Option<usize>,

    #[arg(long, value_name = "COUNT")]
    pub min_frequency: Option<u64>,

    /// Merge into the existing dictionary instead of replacing it
    #[arg(long)]
    pub merge: bool,
}

#[derive(Args, Debug)]
pub struct BuildDocsArgs {
    #[arg(long, value_name = "DIR")]
    pub docs_dir: Option<PathBuf>,

    #[arg(long, value_name = "COUNT")]
    pub min_frequency: Option<u64>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(long, value_name = "DIR")]
    pub fonts_dir: Option<PathBuf>,

    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub labels: Option<PathBuf>,

    /// Images per font
    #[arg(long, value_name = "N")]
    pub samples: Option<usize>,

    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Render fonts one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Also write the zip archive
    #[arg(long)]
    pub package: bool,
}

#[derive(Args, Debug)]
pub struct SampleArgs {
    #[arg(long, default_value_t = 10)]
    pub words: usize,

    #[arg(long, default_value_t = 5)]
    pub sequences: usize,

    #[arg(long, default_value_t = 5)]
    pub numbers: usize,

    #[arg(long, default_value_t = 5)]
    pub mixed: usize,

    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[arg(long, default_value_t = 20)]
    pub top: usize,

    #[arg(long, default_value_t = 20)]
    pub rarest: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::parse_from([
            "asoni",
            "--config",
            "asoni.json",
            "generate",
            "--seed",
            "42",
            "--sequential",
            "--package",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("asoni.json")));
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.seed, Some(42));
                assert!(args.sequential);
                assert!(args.package);
                assert_eq!(args.samples, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_dict_dir_after_subcommand() {
        let cli = Cli::parse_from(["asoni", "stats", "--dict-dir", "dicts", "--top", "5"]);
        assert_eq!(cli.dict_dir, Some(PathBuf::from("dicts")));
        assert!(matches!(cli.command, Command::Stats(StatsArgs { top: 5, .. })));
    }
}
