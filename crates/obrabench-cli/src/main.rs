mod benchmark;
mod display;
mod search;

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use obrabench_core::{AreaExtractor, Config};
use obrabench_sync::Category;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "obrabench", version, about = "Price-per-m² benchmarks from public works contracts")]
struct Cli {
    /// JSON config file (extractor bounds, data source, export format).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// PNCP search endpoint; overrides the config file.
    #[arg(long, global = true, env = "OBRABENCH_BASE_URL")]
    base_url: Option<String>,

    /// Debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search PNCP, suggest areas, and write the working table.
    Search(SearchArgs),
    /// Curate the working table and compute the R$/m² index.
    Index(IndexArgs),
    /// Run the area extractor over text arguments or stdin lines.
    Extract(ExtractArgs),
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Free-text query, e.g. "construção escola 12 salas".
    term: String,

    /// First year of the result-date range.
    #[arg(long, default_value_t = 2024)]
    from: i32,

    /// Last year of the result-date range.
    #[arg(long, default_value_t = 2025)]
    to: i32,

    #[arg(long, value_enum, default_value_t = CategoryArg::Services)]
    category: CategoryArg,

    /// Page size; defaults to the config value.
    #[arg(long)]
    page_size: Option<u32>,

    /// Working table to write.
    #[arg(short, long, default_value = "obras.csv")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct IndexArgs {
    /// Working table written by `search`.
    table: PathBuf,

    /// Control ids to include (comma-separated).
    #[arg(long, value_delimiter = ',')]
    select: Vec<String>,

    /// Include every row.
    #[arg(long)]
    select_all: bool,

    /// Area override as CONTROL_ID=VALUE (value in pt-BR format, e.g. 1.250,5).
    #[arg(long = "area", value_name = "ID=VALUE")]
    areas: Vec<String>,

    /// Write the curated table back to the same file.
    #[arg(long)]
    save: bool,

    /// Calculation export to write.
    #[arg(short, long, default_value = "memoria_calculo.csv")]
    export: PathBuf,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Descriptions; reads stdin lines when empty.
    text: Vec<String>,

    /// Print every plausible candidate, not just the chosen area.
    #[arg(long)]
    all: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum CategoryArg {
    Services,
    Goods,
    Any,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Services => Category::Services,
            CategoryArg::Goods => Category::Goods,
            CategoryArg::Any => Category::Any,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("obrabench v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_or_default(cli.config.as_deref()).context("loading config")?;
    if let Some(url) = cli.base_url {
        config.source.base_url = url;
    }

    match cli.command {
        Command::Search(args) => {
            let page_size = args.page_size.unwrap_or(config.source.page_size);
            let params = search::SearchParams {
                term: args.term,
                from_year: args.from,
                to_year: args.to,
                category: args.category.into(),
                page_size,
                out: args.out,
            };
            search::run_search(&config, &params).await.map(|_| ())
        }
        Command::Index(args) => {
            let params = benchmark::BenchmarkParams {
                table: args.table,
                select: args.select,
                select_all: args.select_all,
                areas: args.areas,
                save: args.save,
                export: args.export,
            };
            benchmark::run_benchmark(&config, &params).map(|_| ())
        }
        Command::Extract(args) => run_extract(&config, &args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_extract(config: &Config, args: &ExtractArgs) -> anyhow::Result<()> {
    let extractor = AreaExtractor::new(&config.extractor).context("building area extractor")?;

    let texts: Vec<String> = if args.text.is_empty() {
        std::io::stdin()
            .lock()
            .lines()
            .collect::<Result<_, _>>()
            .context("reading stdin")?
    } else {
        args.text.clone()
    };

    for text in &texts {
        display::print_extraction(&extractor, text, args.all, &config.export);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_with_defaults() {
        let cli = Cli::try_parse_from(["obrabench", "search", "escola 12 salas"]).unwrap();
        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.term, "escola 12 salas");
        assert_eq!(args.from, 2024);
        assert_eq!(args.to, 2025);
        assert_eq!(args.category, CategoryArg::Services);
        assert_eq!(args.out, PathBuf::from("obras.csv"));
        assert!(args.page_size.is_none());
    }

    #[test]
    fn parses_search_options() {
        let cli = Cli::try_parse_from([
            "obrabench",
            "search",
            "creche",
            "--from",
            "2023",
            "--to",
            "2024",
            "--category",
            "any",
            "--page-size",
            "20",
            "-o",
            "creches.csv",
        ])
        .unwrap();
        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.from, 2023);
        assert_eq!(Category::from(args.category), Category::Any);
        assert_eq!(args.page_size, Some(20));
        assert_eq!(args.out, PathBuf::from("creches.csv"));
    }

    #[test]
    fn parses_index_curation_flags() {
        let cli = Cli::try_parse_from([
            "obrabench",
            "index",
            "obras.csv",
            "--select",
            "a-1/2024,b-2/2024",
            "--area",
            "a-1/2024=1.250,5",
            "--area",
            "b-2/2024=300",
            "--save",
        ])
        .unwrap();
        let Command::Index(args) = cli.command else {
            panic!("expected index");
        };
        assert_eq!(args.select, vec!["a-1/2024", "b-2/2024"]);
        assert_eq!(args.areas, vec!["a-1/2024=1.250,5", "b-2/2024=300"]);
        assert!(args.save);
        assert!(!args.select_all);
        assert_eq!(args.export, PathBuf::from("memoria_calculo.csv"));
    }

    #[test]
    fn parses_extract_and_globals() {
        let cli = Cli::try_parse_from([
            "obrabench",
            "extract",
            "150 m²",
            "--all",
            "--config",
            "obrabench.json",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("obrabench.json")));
        assert!(cli.verbose);
        let Command::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.text, vec!["150 m²"]);
        assert!(args.all);
    }

    #[test]
    fn search_requires_term() {
        assert!(Cli::try_parse_from(["obrabench", "search"]).is_err());
    }
}
