//! ATR Risk CLI: size and paper-trade ATR risk orders.
//!
//! Commands:
//! - `plan`: run the sizer on explicit readings and print the order plan
//! - `click`: replay a bar tape through the paper host and click Buy or Sell
//! - `labels`: print the two button labels at a point on the tape
//! - `init-config`: write a default bot config TOML

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use atr_risk_core::data::{load_bars_csv, synthetic_bars, SyntheticOptions};
use atr_risk_core::domain::Bar;
use atr_risk_core::host::HostError;
use atr_risk_core::{
    compute_order_plan, AccountState, AtrRiskBot, BotConfig, ClickOutcome, Direction,
    MarketReading, OrderPlan, PaperHost, RiskConfig, SymbolSpec,
};

#[derive(Parser)]
#[command(
    name = "atr-risk",
    about = "ATR risk bot: volatility-sized market orders with a fixed 2:1 target"
)]
struct Cli {
    /// Log sizing diagnostics (same as RUST_LOG=debug).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Size an order from explicit readings.
    Plan(PlanArgs),
    /// Replay bars through the paper host and click a button.
    Click {
        /// buy or sell.
        direction: Direction,

        #[command(flatten)]
        tape: TapeArgs,

        /// Print the submitted order as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the Buy/Sell button labels.
    Labels {
        #[command(flatten)]
        tape: TapeArgs,
    },
    /// Write a default config file.
    InitConfig {
        /// Output path.
        #[arg(long, default_value = "atr-risk.toml")]
        output: PathBuf,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Args)]
struct PlanArgs {
    /// buy or sell.
    direction: Direction,

    /// M15 ATR in price units.
    #[arg(long)]
    atr_m15: f64,

    /// H1 ATR in price units; shown in diagnostics only.
    #[arg(long)]
    atr_h1: Option<f64>,

    #[arg(long, default_value_t = 0.0001)]
    pip_size: f64,

    /// Account-currency value of one pip per unit of volume.
    #[arg(long)]
    pip_value: f64,

    #[arg(long)]
    bid: f64,

    /// Defaults to the bid.
    #[arg(long)]
    ask: Option<f64>,

    #[arg(long)]
    balance: f64,

    #[arg(long, default_value_t = 2.0)]
    scale_factor: f64,

    #[arg(long, default_value_t = 1.0)]
    risk_percent: f64,

    /// Volume step; enables paper normalization together with min/max.
    #[arg(long)]
    volume_step: Option<f64>,

    #[arg(long, requires = "volume_step")]
    volume_min: Option<f64>,

    #[arg(long, requires = "volume_step")]
    volume_max: Option<f64>,

    /// Print the plan as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args)]
struct TapeArgs {
    /// Bot config TOML. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// M15 bars CSV (timestamp,open,high,low,close[,volume]).
    #[arg(long, conflicts_with = "synthetic")]
    bars: Option<PathBuf>,

    /// Number of synthetic M15 bars to generate when no CSV is given.
    #[arg(long, default_value_t = 500)]
    synthetic: usize,

    /// Seed for the synthetic tape.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Replay only up to this many bars (default: all).
    #[arg(long)]
    at: Option<usize>,

    /// Override the paper account balance.
    #[arg(long)]
    balance: Option<f64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Plan(args) => run_plan(args),
        Commands::Click {
            direction,
            tape,
            json,
        } => run_click(direction, &tape, json),
        Commands::Labels { tape } => run_labels(&tape),
        Commands::InitConfig { output, force } => run_init_config(output, force),
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

fn run_plan(args: PlanArgs) -> Result<()> {
    let reading = MarketReading {
        atr_m15: args.atr_m15,
        atr_h1: args.atr_h1,
        pip_size: args.pip_size,
        pip_value: args.pip_value,
        bid: args.bid,
        ask: args.ask.unwrap_or(args.bid),
    };
    let config = RiskConfig::new(args.scale_factor, args.risk_percent)?;
    let account = AccountState::new(args.balance);

    let spec = args.volume_step.map(|step| SymbolSpec {
        pip_size: args.pip_size,
        pip_value: args.pip_value,
        volume_step: step,
        volume_min: args.volume_min.unwrap_or(step),
        volume_max: args.volume_max.unwrap_or(f64::MAX),
        ..SymbolSpec::default()
    });
    if let Some((field, value)) = spec.as_ref().and_then(SymbolSpec::invalid_field) {
        bail!("invalid --{}: {value}", field.replace('_', "-"));
    }

    let plan = compute_order_plan(args.direction, &reading, &account, &config, |raw| {
        Ok::<f64, HostError>(match &spec {
            Some(spec) => spec.normalize_volume(raw),
            None => raw,
        })
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }
    Ok(())
}

fn run_click(direction: Direction, tape: &TapeArgs, json: bool) -> Result<()> {
    let mut bot = build_bot(tape)?;
    bot.on_start();

    match bot.on_click(direction)? {
        ClickOutcome::Submitted { plan, ack } => {
            let order = bot
                .host()
                .orders()
                .iter()
                .find(|o| o.id == ack.order_id)
                .context("paper host lost the submitted order")?;
            if json {
                println!("{}", serde_json::to_string_pretty(order)?);
            } else {
                print_plan(&plan);
                println!();
                println!("Order #{} at {}", order.id, order.timestamp);
                println!("  {} {} {:.0} units", order.request.direction, order.request.symbol, order.request.volume);
                println!("  Entry:       {:.5}", order.entry_price);
                println!("  Stop loss:   {:.5}", order.stop_loss_price);
                println!("  Take profit: {:.5}", order.take_profit_price);
                println!("  Label:       {}", order.request.label);
            }
        }
        ClickOutcome::Skipped { plan } => {
            print_plan(&plan);
            bail!("volume normalized to zero, no order submitted");
        }
    }

    bot.on_stop();
    Ok(())
}

fn run_labels(tape: &TapeArgs) -> Result<()> {
    let mut bot = build_bot(tape)?;
    let panel = bot.on_start();
    for button in panel.buttons() {
        println!("{}", button.text);
    }
    Ok(())
}

fn run_init_config(output: PathBuf, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", output.display());
    }
    BotConfig::default().save(&output)?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn build_bot(tape: &TapeArgs) -> Result<AtrRiskBot<PaperHost>> {
    let mut config = match &tape.config {
        Some(path) => BotConfig::load(path)?,
        None => BotConfig::default(),
    };
    if let Some(balance) = tape.balance {
        config.paper.balance = balance;
    }

    let bars = load_tape(tape, &config)?;
    if bars.is_empty() {
        bail!("bar tape is empty");
    }

    let mut host = PaperHost::new(config.symbol.clone(), config.paper.clone(), bars);
    if let Some(at) = tape.at {
        if at == 0 || at > host.total_bars() {
            bail!("--at must be in 1..={}", host.total_bars());
        }
        host.seek(at);
    }
    tracing::debug!(
        bars = host.visible_bars().len(),
        last = ?host.current_bar().map(|b| b.timestamp),
        "tape ready"
    );

    Ok(AtrRiskBot::new(host, config)?)
}

fn load_tape(tape: &TapeArgs, config: &BotConfig) -> Result<Vec<Bar>> {
    if let Some(path) = &tape.bars {
        return load_bars_csv(path).with_context(|| format!("loading {}", path.display()));
    }
    let opts = SyntheticOptions {
        pip_size: config.symbol.pip_size,
        start_price: 11_000.0 * config.symbol.pip_size,
        ..SyntheticOptions::default()
    };
    Ok(synthetic_bars(&config.symbol.name, tape.seed, tape.synthetic, &opts))
}

fn print_plan(plan: &OrderPlan) {
    println!("Order plan: {}", plan.direction);
    println!("  Stop loss:   {:.1} pips @ {:.5}", plan.stop_loss_pips, plan.stop_loss_price);
    println!("  Take profit: {:.1} pips @ {:.5}", plan.take_profit_pips, plan.take_profit_price);
    println!("  Risk amount: {:.2}", plan.risk_amount);
    println!("  Volume:      {} (raw {:.4})", plan.volume, plan.volume_raw);
}
