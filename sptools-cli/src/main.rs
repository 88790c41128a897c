//! sptools CLI — research datastore bootstrap and stats charting.
//!
//! Commands:
//! - `mkds` — seed a manifest and drive `sp_dstool` to build a datastore
//! - `plot` — read a stats stream on stdin and chart it
//! - `parse` — read a stats stream on stdin and print it as JSON
//! - `show` — print a symbol's history or dividend table

use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sptools_core::bootstrap::{self, parse_symbols, BootstrapRequest};
use sptools_core::config::DatastoreConfig;
use sptools_core::stats::parse_stats;
use sptools_core::{
    Backend, ChartRenderer, Config, DataStore, GnuplotRenderer, LabelOptions, Labels, Tag,
};
use sptools_tui::{TerminalRenderer, Theme};

#[derive(Parser)]
#[command(
    name = "sptools",
    about = "sptools — research datastores and stats charts"
)]
struct Cli {
    /// TOML config file. Defaults to <config dir>/sptools/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a research datastore from a list of stock symbols.
    Mkds {
        /// Directory holding the manifest and the datastore.
        #[arg(long)]
        root: PathBuf,

        /// Research name; the datastore is created as sp_<name>.
        #[arg(long)]
        name: String,

        /// Base date recorded for every symbol (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Comma-separated symbols (e.g., IBM,MSFT,AAPL).
        #[arg(long)]
        symbols: String,

        /// Also run the update and check operations.
        #[arg(short, long, default_value_t = false)]
        update: bool,

        /// Show the datastore tool's output.
        #[arg(short, long, default_value_t = false)]
        verbose: bool,
    },
    /// Chart a stats stream read from stdin.
    Plot {
        /// Chart backend. Defaults to the config's [plot] backend.
        #[arg(long)]
        backend: Option<Backend>,

        /// Replace the generated labels instead of appending to them.
        #[arg(short = 'o', long = "override", default_value_t = false)]
        override_labels: bool,

        /// Title text.
        #[arg(short, long, default_value = "")]
        title: String,

        /// Y axis label text.
        #[arg(short, long, default_value = "")]
        ylabel: String,

        /// X axis label text.
        #[arg(short, long, default_value = "")]
        xlabel: String,
    },
    /// Parse a stats stream from stdin and print it as JSON.
    Parse,
    /// Print a symbol's table from the datastore.
    Show {
        /// Symbol to read.
        #[arg(long)]
        symbol: String,

        /// Read dividends instead of price history.
        #[arg(long, default_value_t = false)]
        dividends: bool,

        /// Only print the last N rows.
        #[arg(long)]
        tail: Option<usize>,

        /// Datastore root. Defaults to the config value, then $HOME.
        #[arg(long)]
        root: Option<PathBuf>,

        /// Datastore name. Defaults to the config value, then sp_datastore.
        #[arg(long)]
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?
        .with_home(dirs::home_dir());

    match cli.command {
        Commands::Mkds {
            root,
            name,
            date,
            symbols,
            update,
            verbose,
        } => run_mkds(&config, root, name, date, &symbols, update, verbose),
        Commands::Plot {
            backend,
            override_labels,
            title,
            ylabel,
            xlabel,
        } => {
            let opts = LabelOptions {
                title,
                ylabel,
                xlabel,
                override_labels,
            };
            run_plot(&config, backend, &opts)
        }
        Commands::Parse => run_parse(),
        Commands::Show {
            symbol,
            dividends,
            tail,
            root,
            name,
        } => run_show(&config.datastore, &symbol, dividends, tail, root, name),
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sptools")
        .join("config.toml")
}

fn run_mkds(
    config: &Config,
    root: PathBuf,
    name: String,
    date: NaiveDate,
    symbols: &str,
    update: bool,
    verbose: bool,
) -> Result<()> {
    let request = BootstrapRequest {
        root,
        name,
        base_date: date,
        symbols: parse_symbols(symbols),
        update,
        verbose,
        dstool: config.tools.dstool.clone(),
    };
    bootstrap::run(&request)
        .with_context(|| format!("failed to create datastore {}", request.ds_name()))?;
    println!(
        "Created {} ({} symbols, manifest {})",
        request.ds_name(),
        request.symbols.len(),
        request.manifest_path().display()
    );
    Ok(())
}

fn select_renderer(config: &Config, backend: Option<Backend>) -> Box<dyn ChartRenderer> {
    match backend.unwrap_or(config.plot.backend) {
        Backend::Gnuplot => Box::new(GnuplotRenderer::new(
            config.tools.gnuplot.clone(),
            config.plot.script_path.clone(),
        )),
        Backend::Terminal => Box::new(TerminalRenderer::new(Theme::dark())),
    }
}

fn run_plot(config: &Config, backend: Option<Backend>, opts: &LabelOptions) -> Result<()> {
    let record = parse_stats(BufReader::new(io::stdin().lock()))
        .context("failed to parse stats stream")?;
    let labels = Labels::new(&record, opts);
    let renderer = select_renderer(config, backend);
    tracing::info!(backend = renderer.name(), points = record.len(), "plotting");
    renderer
        .render(&record, &labels)
        .with_context(|| format!("{} backend failed", renderer.name()))
}

fn run_parse() -> Result<()> {
    let record = parse_stats(BufReader::new(io::stdin().lock()))
        .context("failed to parse stats stream")?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn run_show(
    datastore: &DatastoreConfig,
    symbol: &str,
    dividends: bool,
    tail: Option<usize>,
    root: Option<PathBuf>,
    name: Option<String>,
) -> Result<()> {
    let ds_config = DatastoreConfig {
        root: root.or_else(|| datastore.root.clone()),
        name: name.or_else(|| datastore.name.clone()),
        home: datastore.home.clone(),
    };
    let store = DataStore::new(&ds_config).context("failed to open datastore")?;
    let tag = if dividends { Tag::Dividends } else { Tag::History };

    if !store.symbol_exists(tag, symbol) {
        tracing::warn!(%store, %tag, symbol, "no data file for symbol");
    }
    let df = store
        .read_data(tag, symbol)
        .with_context(|| format!("failed to read {tag} for {symbol} from {store}"))?;

    let df = match tail {
        Some(n) => df.tail(Some(n)),
        None => df,
    };
    println!("{df}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn mkds_parses_date_and_flags() {
        let cli = Cli::try_parse_from([
            "sptools", "mkds", "--root", "/data", "--name", "research", "--date", "2020-01-02",
            "--symbols", "IBM,MSFT", "-u",
        ])
        .unwrap();
        match cli.command {
            Commands::Mkds {
                date,
                symbols,
                update,
                verbose,
                ..
            } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
                assert_eq!(symbols, "IBM,MSFT");
                assert!(update);
                assert!(!verbose);
            }
            _ => panic!("expected mkds"),
        }
    }

    #[test]
    fn mkds_rejects_bad_date() {
        let res = Cli::try_parse_from([
            "sptools", "mkds", "--root", "/data", "--name", "r", "--date", "01/02/2020",
            "--symbols", "IBM",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn plot_label_flags() {
        let cli = Cli::try_parse_from([
            "sptools", "plot", "--backend", "terminal", "-o", "-t", "My Title", "-y", "Price",
        ])
        .unwrap();
        match cli.command {
            Commands::Plot {
                backend,
                override_labels,
                title,
                ylabel,
                xlabel,
            } => {
                assert_eq!(backend, Some(Backend::Terminal));
                assert!(override_labels);
                assert_eq!(title, "My Title");
                assert_eq!(ylabel, "Price");
                assert_eq!(xlabel, "");
            }
            _ => panic!("expected plot"),
        }
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["sptools", "parse", "--config", "/tmp/sp.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/sp.toml")));
    }

    #[test]
    fn backend_flag_overrides_config() {
        let config = Config::default();
        assert_eq!(select_renderer(&config, None).name(), "gnuplot");
        assert_eq!(
            select_renderer(&config, Some(Backend::Terminal)).name(),
            "terminal"
        );
    }
}
