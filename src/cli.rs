//! CLI definition and dispatch.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;
use tracing_subscriber::prelude::*;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::journal_adapter::JournalAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::log_sink_adapter::LogSinkAdapter;
use crate::domain::config_validation::{candle_limit, validate_config};
use crate::domain::error::CrossbotError;
use crate::domain::evaluation::evaluate;
use crate::domain::execution::{ExecutionGate, ExecutionSettings};
use crate::domain::indicator::sma::period_from_i64;
use crate::domain::indicator::IndicatorType;
use crate::domain::order::build_order;
use crate::domain::record::EvaluationRecord;
use crate::domain::signal::Action;
use crate::domain::strategy::{trading_mode, StrategyConfig};
use crate::domain::venue::{data_source_kind, order_sink_kind, DataSourceKind, OrderSinkKind};
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::order_sink_port::OrderSinkPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "crossbot", about = "Moving-average crossover signal bot")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one evaluation cycle
    Evaluate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        timeframe: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Re-run the evaluation cycle on a fixed interval
    Watch {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long, default_value_t = 60)]
        interval_secs: u64,
        /// Stop after this many cycles (runs until interrupted if omitted)
        #[arg(long)]
        cycles: Option<u64>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(tracing_subscriber::filter::Targets::new().with_target("crossbot", level));
    // A subscriber may already be installed (tests, embedding).
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Evaluate {
            config,
            symbol,
            timeframe,
            output,
        } => run_evaluate(&config, symbol.as_deref(), timeframe.as_deref(), output.as_deref()),
        Command::Watch {
            config,
            interval_secs,
            cycles,
            output,
        } => run_watch(&config, Duration::from_secs(interval_secs), cycles, output.as_deref()),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, CrossbotError> {
    tracing::info!("loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|e| CrossbotError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn required_string(config: &dyn ConfigPort, section: &str, key: &str) -> Result<String, CrossbotError> {
    config
        .get_string(section, key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CrossbotError::config_missing(section, key))
}

fn required_period(config: &dyn ConfigPort, key: &str) -> Result<usize, CrossbotError> {
    let raw = required_string(config, "strategy", key)?;
    let value: i64 = raw.parse().map_err(|_| {
        CrossbotError::config_invalid("strategy", key, format!("{} must be an integer", key))
    })?;
    period_from_i64(value)
}

pub fn build_strategy_config(
    config: &dyn ConfigPort,
    symbol_override: Option<&str>,
    timeframe_override: Option<&str>,
) -> Result<StrategyConfig, CrossbotError> {
    let symbol = match symbol_override {
        Some(s) => s.trim().to_uppercase(),
        None => required_string(config, "strategy", "symbol")?,
    };
    let timeframe = match timeframe_override {
        Some(t) => t.trim().to_string(),
        None => required_string(config, "strategy", "timeframe")?,
    };

    let mode = trading_mode(config)?;

    Ok(StrategyConfig {
        symbol,
        timeframe,
        fast_length: required_period(config, "fast_length")?,
        slow_length: required_period(config, "slow_length")?,
        capital: config.get_double("strategy", "capital", 0.0),
        risk_percent: config.get_double("strategy", "risk_percent", 0.0),
        mode,
    })
}

pub fn build_market_data(config: &dyn ConfigPort) -> Result<Box<dyn MarketDataPort>, CrossbotError> {
    match data_source_kind(config)? {
        DataSourceKind::Csv => {
            let path = required_string(config, "market_data", "path")?;
            Ok(Box::new(CsvAdapter::new(PathBuf::from(path))))
        }
    }
}

pub fn build_order_sink(config: &dyn ConfigPort) -> Result<Box<dyn OrderSinkPort>, CrossbotError> {
    match order_sink_kind(config)? {
        OrderSinkKind::Journal => {
            let path = required_string(config, "execution", "journal_path")?;
            Ok(Box::new(JournalAdapter::new(PathBuf::from(path))))
        }
        OrderSinkKind::Log => Ok(Box::new(LogSinkAdapter)),
    }
}

/// Fetch, evaluate, gate, and record one cycle.
pub fn run_cycle(
    data_port: &dyn MarketDataPort,
    strategy: &StrategyConfig,
    gate: &ExecutionGate,
    limit: usize,
    evaluated_at: DateTime<Utc>,
) -> Result<EvaluationRecord, CrossbotError> {
    let candles = data_port.fetch_candles(&strategy.symbol, &strategy.timeframe, limit)?;
    tracing::debug!(count = candles.len(), "candles fetched");

    let computation = evaluate(&candles, strategy)?;
    tracing::info!(
        symbol = %strategy.symbol,
        action = %computation.action,
        crossover = computation.signal.is_crossover(),
        price = computation.latest_price,
        size = computation.position_size,
        "{}",
        computation.reason
    );

    let order = build_order(&computation);
    if order.is_none() && computation.action != Action::Hold {
        tracing::warn!(
            price = computation.latest_price,
            "position size is zero, no order proposed"
        );
    }

    let outcome = gate.dispatch(&strategy.symbol, order.as_ref())?;
    Ok(EvaluationRecord::new(evaluated_at, strategy, candles.len(), computation, order)
        .with_execution(outcome))
}

struct Session {
    strategy: StrategyConfig,
    data_port: Box<dyn MarketDataPort>,
    gate: ExecutionGate,
    limit: usize,
}

fn prepare_session(
    config_path: &Path,
    symbol: Option<&str>,
    timeframe: Option<&str>,
) -> Result<Session, CrossbotError> {
    let adapter = load_config(config_path)?;
    validate_config(&adapter)?;

    let strategy = build_strategy_config(&adapter, symbol, timeframe)?;
    let settings = ExecutionSettings::from_config(&adapter)?;
    let gate = ExecutionGate::new(settings, build_order_sink(&adapter)?);
    tracing::info!(
        symbol = %strategy.symbol,
        timeframe = %strategy.timeframe,
        fast = %IndicatorType::Sma(strategy.fast_length),
        slow = %IndicatorType::Sma(strategy.slow_length),
        mode = %settings.mode,
        live_trading_enabled = settings.live_trading_enabled,
        "strategy loaded"
    );

    Ok(Session {
        strategy,
        data_port: build_market_data(&adapter)?,
        gate,
        limit: candle_limit(&adapter)?,
    })
}

fn emit(record: &EvaluationRecord, output: Option<&Path>) -> Result<(), CrossbotError> {
    println!("{}", JsonReportAdapter::render(record)?);
    if let Some(path) = output {
        JsonReportAdapter::new().write(record, &path.display().to_string())?;
        tracing::info!("record written to {}", path.display());
    }
    Ok(())
}

fn run_evaluate(
    config_path: &Path,
    symbol: Option<&str>,
    timeframe: Option<&str>,
    output: Option<&Path>,
) -> Result<(), CrossbotError> {
    let session = prepare_session(config_path, symbol, timeframe)?;
    let record = run_cycle(
        session.data_port.as_ref(),
        &session.strategy,
        &session.gate,
        session.limit,
        Utc::now(),
    )?;
    emit(&record, output)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WatchSummary {
    pub cycles: u64,
    pub skipped: u64,
}

/// Run cycles every `interval` until `max_cycles` (forever when `None`).
///
/// Each cycle stands alone: a cycle failure (see
/// [`CrossbotError::is_cycle_failure`]) is logged and counted, and the next
/// cycle still runs. Any other error, including one from `on_record`, ends
/// the loop.
pub fn watch(
    data_port: &dyn MarketDataPort,
    strategy: &StrategyConfig,
    gate: &ExecutionGate,
    limit: usize,
    interval: Duration,
    max_cycles: Option<u64>,
    mut on_record: impl FnMut(&EvaluationRecord) -> Result<(), CrossbotError>,
) -> Result<WatchSummary, CrossbotError> {
    let mut summary = WatchSummary::default();

    loop {
        summary.cycles += 1;
        let cycle = summary.cycles;
        tracing::info!(cycle, "evaluation cycle");

        match run_cycle(data_port, strategy, gate, limit, Utc::now()) {
            Ok(record) => on_record(&record)?,
            Err(e) if e.is_cycle_failure() => {
                summary.skipped += 1;
                tracing::warn!(cycle, skipped = summary.skipped, "skipping cycle: {e}");
            }
            Err(e) => return Err(e),
        }

        if max_cycles.is_some_and(|max| cycle >= max) {
            return Ok(summary);
        }
        thread::sleep(interval);
    }
}

fn run_watch(
    config_path: &Path,
    interval: Duration,
    cycles: Option<u64>,
    output: Option<&Path>,
) -> Result<(), CrossbotError> {
    let session = prepare_session(config_path, None, None)?;
    let summary = watch(
        session.data_port.as_ref(),
        &session.strategy,
        &session.gate,
        session.limit,
        interval,
        cycles,
        |record| emit(record, output),
    )?;
    tracing::info!(cycles = summary.cycles, skipped = summary.skipped, "watch finished");
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), CrossbotError> {
    let adapter = load_config(config_path)?;
    validate_config(&adapter)?;
    let strategy = build_strategy_config(&adapter, None, None)?;

    eprintln!("Strategy:");
    eprintln!("  symbol:       {}", strategy.symbol);
    eprintln!("  timeframe:    {}", strategy.timeframe);
    eprintln!(
        "  fast/slow:    {} / {}",
        IndicatorType::Sma(strategy.fast_length),
        IndicatorType::Sma(strategy.slow_length)
    );
    eprintln!("  capital:      {}", strategy.capital);
    eprintln!("  risk percent: {}", strategy.risk_percent);
    eprintln!("  mode:         {}", strategy.mode);
    eprintln!("Market data:    {} (limit {})", data_source_kind(&adapter)?, candle_limit(&adapter)?);
    eprintln!("Order sink:     {}", order_sink_kind(&adapter)?);
    eprintln!("\nConfiguration is valid.");
    Ok(())
}
