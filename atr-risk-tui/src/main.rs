//! ATR Risk TUI: the two-button bot on a replayed M15 tape.
//!
//! Usage: `atr-risk-tui [BARS.csv]`. Without a CSV a synthetic tape is
//! generated. The config is read from `<config dir>/atr-risk/bot.toml` when
//! present; logs go to `<config dir>/atr-risk/atr-risk-tui.log`.

mod app;
mod input;
mod theme;
mod ui;

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use atr_risk_core::data::{load_bars_csv, synthetic_bars, SyntheticOptions};
use atr_risk_core::{AtrRiskBot, BotConfig, PaperHost};

use crate::app::AppState;

const SYNTHETIC_BARS: usize = 2_000;
const SYNTHETIC_SEED: u64 = 7;
/// Bars revealed at startup; enough for the M15 ATR, not yet for H1.
const WARMUP_VISIBLE: usize = 32;
const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(200);

fn main() -> Result<()> {
    // Restore the terminal before printing a panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let app_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("atr-risk");
    init_logging(&app_dir)?;

    let config = load_config(&app_dir.join("bot.toml"))?;
    let bars = match std::env::args_os().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            load_bars_csv(&path).with_context(|| format!("loading {}", path.display()))?
        }
        None => synthetic_bars(
            &config.symbol.name,
            SYNTHETIC_SEED,
            SYNTHETIC_BARS,
            &SyntheticOptions {
                pip_size: config.symbol.pip_size,
                start_price: 11_000.0 * config.symbol.pip_size,
                ..SyntheticOptions::default()
            },
        ),
    };

    let mut host = PaperHost::new(config.symbol.clone(), config.paper.clone(), bars);
    host.seek(WARMUP_VISIBLE);
    let bot = AtrRiskBot::new(host, config)?;
    let mut app = AppState::new(bot);

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let mut last_step = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if last_step.elapsed() >= AUTOPLAY_INTERVAL {
            app.on_timer();
            last_step = Instant::now();
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Log to a file; stderr belongs to the alternate screen.
fn init_logging(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join("atr-risk-tui.log");
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,atr_risk_core=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn load_config(path: &Path) -> Result<BotConfig> {
    if path.exists() {
        Ok(BotConfig::load(path)?)
    } else {
        tracing::info!(path = %path.display(), "no config file, using defaults");
        Ok(BotConfig::default())
    }
}
