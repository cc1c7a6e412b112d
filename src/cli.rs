//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::mock_market_adapter::{ClockMode, MockMarketAdapter};
use crate::adapters::table_report_adapter::{TableReportAdapter, format_summary};
use crate::domain::allocation::{AllocationEngine, AllocationResult};
use crate::domain::config_validation::{
    MARKET_SECTION, NO_TIMEFRAME, PORTFOLIO_SECTION, parse_timeframe, target_value,
    total_capital, validate_market_config, validate_portfolio_config, watchlist,
};
use crate::domain::error::SmartcapError;
use crate::domain::inputs::{
    DEFAULT_TARGET_PROFIT, DEFAULT_TARGET_PROFIT_PERCENT, PortfolioInputs,
};
use crate::domain::sector::SectorTable;
use crate::domain::sentiment::{JitterSource, RngJitter};
use crate::domain::session::{SessionPhase, is_trading_window, market_now};
use crate::domain::summary::PortfolioSummary;
use crate::domain::timeframe::TimeFrame;
use crate::domain::watchlist::Watchlist;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::report_port::{AllocationReport, ReportPort};

const REPORT_SECTION: &str = "report";

#[derive(Parser, Debug)]
#[command(
    name = "smartcap",
    about = "Capital allocation engine for Vietnamese equities"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch snapshots, run the allocation engine and write a report
    Allocate {
        #[arg(short, long)]
        config: PathBuf,
        /// Replace the configured watch-list (comma separated)
        #[arg(long)]
        symbols: Option<String>,
        /// Append a symbol to the watch-list
        #[arg(long = "add")]
        add: Vec<String>,
        /// Drop a symbol from the watch-list
        #[arg(long = "remove")]
        remove: Vec<String>,
        /// 1H, 4H, 1D, 1W, 1M or none
        #[arg(long)]
        timeframe: Option<String>,
        /// table, csv or json
        #[arg(short, long)]
        format: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Seed the mock market and the sentiment jitter
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print the sector table
    Sectors {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the current exchange session phase
    Session,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Table,
    Csv,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(ReportFormat::Table),
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown format '{other}' (expected table, csv or json)")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReportFormat::Table => "table",
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        };
        f.write_str(s)
    }
}

/// Command-line changes applied on top of the configured inputs.
#[derive(Debug, Default)]
pub struct InputOverrides<'a> {
    pub symbols: Option<&'a str>,
    pub add: &'a [String],
    pub remove: &'a [String],
    pub timeframe: Option<&'a str>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Allocate {
            config,
            symbols,
            add,
            remove,
            timeframe,
            format,
            output,
            seed,
        } => {
            let overrides = InputOverrides {
                symbols: symbols.as_deref(),
                add: &add,
                remove: &remove,
                timeframe: timeframe.as_deref(),
            };
            run_allocate(&config, &overrides, format.as_deref(), output.as_ref(), seed)
        }
        Command::Validate { config } => run_validate(&config),
        Command::Sectors { config } => run_sectors(config.as_ref()),
        Command::Session => run_session(),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = SmartcapError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_allocate(
    config_path: &Path,
    overrides: &InputOverrides<'_>,
    format_override: Option<&str>,
    output_path: Option<&PathBuf>,
    seed: Option<u64>,
) -> ExitCode {
    tracing::info!(config = %config_path.display(), "loading config");
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match allocate_with_config(&adapter, overrides, format_override, output_path, seed) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn allocate_with_config(
    adapter: &dyn ConfigPort,
    overrides: &InputOverrides<'_>,
    format_override: Option<&str>,
    output_path: Option<&PathBuf>,
    seed: Option<u64>,
) -> Result<(), SmartcapError> {
    validate_portfolio_config(adapter)?;
    validate_market_config(adapter)?;

    let mut inputs = build_inputs(adapter)?;
    apply_overrides(&mut inputs, overrides)?;
    let engine = AllocationEngine::new(build_sector_table(adapter)?);
    let market = build_market_port(adapter, seed)?;
    let format = resolve_format(format_override, adapter)?;
    let report = build_report_port(format, adapter.get_bool(REPORT_SECTION, "pretty", true));

    let mut jitter: Box<dyn JitterSource> = match seed {
        Some(seed) => Box::new(RngJitter(StdRng::seed_from_u64(seed))),
        None => Box::new(RngJitter(rand::thread_rng())),
    };

    let output_path = output_path
        .cloned()
        .or_else(|| adapter.get_nonempty(REPORT_SECTION, "output").map(PathBuf::from));

    let summary = match &output_path {
        Some(path) => {
            // A failed run must leave an existing report untouched.
            let mut rendered: Vec<u8> = Vec::new();
            let (_, summary) = run_allocation_pipeline(
                market.as_ref(),
                &engine,
                &inputs,
                jitter.as_mut(),
                report.as_ref(),
                &mut rendered,
            )?;
            let mut out = BufWriter::new(File::create(path)?);
            out.write_all(&rendered)?;
            out.flush()?;
            tracing::info!(path = %path.display(), %format, "report written");
            summary
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            run_allocation_pipeline(
                market.as_ref(),
                &engine,
                &inputs,
                jitter.as_mut(),
                report.as_ref(),
                &mut out,
            )?
            .1
        }
    };

    if output_path.is_some() || format != ReportFormat::Table {
        eprintln!("\n=== Summary ===");
        for line in format_summary(&summary) {
            eprintln!("{line}");
        }
    }
    Ok(())
}

/// One refresh cycle: fetch, allocate, summarise and write the report.
pub fn run_allocation_pipeline(
    market: &dyn MarketDataPort,
    engine: &AllocationEngine,
    inputs: &PortfolioInputs,
    jitter: &mut dyn JitterSource,
    report: &dyn ReportPort,
    out: &mut dyn Write,
) -> Result<(Vec<AllocationResult>, PortfolioSummary), SmartcapError> {
    if inputs.symbols.is_empty() {
        tracing::warn!("watch-list is empty; nothing to allocate");
    }

    let snapshots = market.fetch_snapshots(inputs.symbols.as_slice())?;
    tracing::info!(
        symbols = snapshots.len(),
        timeframe = inputs.timeframe.map(|tf| tf.label()).unwrap_or("unspecified"),
        "running allocation"
    );

    let results = engine.optimize_with(inputs, &snapshots, jitter);
    let summary = PortfolioSummary::compute(inputs, &results);

    report.write(
        &AllocationReport {
            inputs,
            results: &results,
            summary: &summary,
        },
        out,
    )?;
    Ok((results, summary))
}

/// Portfolio inputs from `[portfolio]`. Capital and symbols are required;
/// the profit targets fall back to their defaults only when unset.
pub fn build_inputs(config: &dyn ConfigPort) -> Result<PortfolioInputs, SmartcapError> {
    Ok(PortfolioInputs {
        total_capital: total_capital(config)?,
        target_profit: target_value(config, "target_profit", DEFAULT_TARGET_PROFIT)?,
        target_profit_percent: target_value(
            config,
            "target_profit_percent",
            DEFAULT_TARGET_PROFIT_PERCENT,
        )?,
        symbols: watchlist(config)?,
        timeframe: parse_timeframe(config)?,
    })
}

pub fn apply_overrides(
    inputs: &mut PortfolioInputs,
    overrides: &InputOverrides<'_>,
) -> Result<(), SmartcapError> {
    if let Some(symbols) = overrides.symbols {
        inputs.symbols = Watchlist::parse(symbols)?;
    }
    for symbol in overrides.add {
        if !inputs.symbols.add(symbol)? {
            tracing::warn!(%symbol, "already on the watch-list");
        }
    }
    for symbol in overrides.remove {
        if !inputs.symbols.remove(symbol) {
            tracing::warn!(%symbol, "not on the watch-list");
        }
    }
    if let Some(tf) = overrides.timeframe {
        inputs.timeframe = if tf.trim().eq_ignore_ascii_case(NO_TIMEFRAME) {
            None
        } else {
            Some(
                tf.parse::<TimeFrame>()
                    .map_err(|reason| SmartcapError::ConfigInvalid {
                        section: PORTFOLIO_SECTION.to_string(),
                        key: "timeframe".to_string(),
                        reason,
                    })?,
            )
        };
    }
    Ok(())
}

pub fn build_sector_table(config: &dyn ConfigPort) -> Result<SectorTable, SmartcapError> {
    Ok(SectorTable::from_config(config)?.unwrap_or_else(SectorTable::builtin))
}

pub fn build_market_port(
    config: &dyn ConfigPort,
    seed: Option<u64>,
) -> Result<Box<dyn MarketDataPort>, SmartcapError> {
    let source = config
        .get_nonempty(MARKET_SECTION, "source")
        .unwrap_or_else(|| "mock".to_string())
        .to_lowercase();

    match source.as_str() {
        "csv" => {
            let path = config.get_nonempty(MARKET_SECTION, "csv_path").ok_or_else(|| {
                SmartcapError::ConfigMissing {
                    section: MARKET_SECTION.to_string(),
                    key: "csv_path".to_string(),
                }
            })?;
            tracing::info!(%path, "using CSV snapshots");
            Ok(Box::new(CsvAdapter::new(PathBuf::from(path))))
        }
        "mock" => {
            let clock = match config.get_nonempty(MARKET_SECTION, "clock") {
                Some(s) => s.parse::<ClockMode>().map_err(|reason| {
                    SmartcapError::ConfigInvalid {
                        section: MARKET_SECTION.to_string(),
                        key: "clock".to_string(),
                        reason,
                    }
                })?,
                None => ClockMode::Auto,
            };
            tracing::info!(?clock, ?seed, "using mock market");
            Ok(Box::new(match seed {
                Some(seed) => MockMarketAdapter::with_seed(clock, seed),
                None => MockMarketAdapter::new(clock),
            }))
        }
        other => Err(SmartcapError::ConfigInvalid {
            section: MARKET_SECTION.to_string(),
            key: "source".to_string(),
            reason: format!("unknown source '{other}', expected mock or csv"),
        }),
    }
}

pub fn resolve_format(
    format_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<ReportFormat, SmartcapError> {
    let raw = match format_override {
        Some(f) => f.to_string(),
        None => match config.get_nonempty(REPORT_SECTION, "format") {
            Some(f) => f,
            None => return Ok(ReportFormat::Table),
        },
    };
    raw.parse().map_err(|reason| SmartcapError::ConfigInvalid {
        section: REPORT_SECTION.to_string(),
        key: "format".to_string(),
        reason,
    })
}

/// `pretty` only affects JSON output.
pub fn build_report_port(format: ReportFormat, pretty: bool) -> Box<dyn ReportPort> {
    match format {
        ReportFormat::Table => Box::new(TableReportAdapter),
        ReportFormat::Csv => Box::new(CsvReportAdapter),
        ReportFormat::Json => Box::new(JsonReportAdapter { pretty }),
    }
}

pub fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let checked = validate_portfolio_config(&adapter)
        .and_then(|()| validate_market_config(&adapter))
        .and_then(|()| build_sector_table(&adapter))
        .and_then(|sectors| {
            build_inputs(&adapter).map(|inputs| (inputs, sectors))
        })
        .and_then(|(inputs, sectors)| {
            resolve_format(None, &adapter).map(|format| (inputs, sectors, format))
        });

    match checked {
        Ok((inputs, sectors, format)) => {
            eprintln!("  capital:   {:.0}", inputs.total_capital);
            eprintln!("  symbols:   {}", inputs.symbols.as_slice().join(", "));
            eprintln!(
                "  timeframe: {}",
                inputs.timeframe.map(|tf| tf.label()).unwrap_or("unspecified")
            );
            eprintln!("  sectors:   {}", sectors.sectors().len());
            eprintln!("  format:    {format}");
            eprintln!("\nConfiguration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_sectors(config_path: Option<&PathBuf>) -> ExitCode {
    let table = match config_path {
        Some(path) => {
            let adapter = match load_config(path) {
                Ok(a) => a,
                Err(code) => return code,
            };
            match build_sector_table(&adapter) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("error: {e}");
                    return (&e).into();
                }
            }
        }
        None => SectorTable::builtin(),
    };

    for sector in table.sectors() {
        let status = sector
            .status
            .map(|q| q.label().to_string())
            .unwrap_or_else(|| "-".to_string());
        let strength = sector
            .strength
            .map(|s| format!("{s:.0}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:<10} {:>4}  {}",
            sector.name,
            status,
            strength,
            sector.members.join(", ")
        );
    }
    ExitCode::SUCCESS
}

fn run_session() -> ExitCode {
    let now = market_now();
    let phase = SessionPhase::at(now);
    println!("{}  {}", now.format("%Y-%m-%d %H:%M"), phase);
    if is_trading_window(now) {
        println!("Prices are live.");
    } else if phase.is_closed() {
        println!("Market closed; prices are frozen at the last close.");
    } else {
        println!("Auction in progress; prices are frozen until matching resumes.");
    }
    ExitCode::SUCCESS
}
