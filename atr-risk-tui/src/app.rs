//! Application state: the running bot, button selection, and the order log.

use std::collections::VecDeque;

use chrono::NaiveDateTime;

use atr_risk_core::bot::ControlPanel;
use atr_risk_core::{AtrRiskBot, BotError, ClickOutcome, Direction, PaperHost};

/// Entries kept in the order log.
pub const ORDER_LOG_CAPACITY: usize = 100;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// One line in the order log.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Bar time the click happened at, if a bar was visible.
    pub timestamp: Option<NaiveDateTime>,
    pub direction: Direction,
    pub level: StatusLevel,
    pub message: String,
}

/// Top-level application state.
pub struct AppState {
    pub bot: AtrRiskBot<PaperHost>,
    pub selected: Direction,
    pub running: bool,
    pub autoplay: bool,

    /// Newest first.
    pub order_log: VecDeque<LogEntry>,
    pub status_message: Option<(String, StatusLevel)>,
}

impl AppState {
    /// Starts the bot so the buttons exist from the first frame.
    pub fn new(mut bot: AtrRiskBot<PaperHost>) -> Self {
        let ready = bot.on_start().button(Direction::Buy).text.clone();
        Self {
            bot,
            selected: Direction::Buy,
            running: true,
            autoplay: false,
            order_log: VecDeque::with_capacity(ORDER_LOG_CAPACITY),
            status_message: Some((format!("Ready: {ready}"), StatusLevel::Info)),
        }
    }

    pub fn panel(&self) -> Option<&ControlPanel> {
        self.bot.panel()
    }

    pub fn host(&self) -> &PaperHost {
        self.bot.host()
    }

    pub fn select(&mut self, direction: Direction) {
        self.selected = direction;
    }

    pub fn toggle_selection(&mut self) {
        self.selected = self.selected.opposite();
    }

    pub fn click_selected(&mut self) {
        self.click(self.selected);
    }

    /// Click a button and record the outcome in the order log.
    pub fn click(&mut self, direction: Direction) {
        self.selected = direction;
        let timestamp = self.host().current_bar().map(|b| b.timestamp);

        let (level, message) = match self.bot.on_click(direction) {
            Ok(ClickOutcome::Submitted { plan, ack }) => (
                StatusLevel::Info,
                format!(
                    "#{} {} {:.0} @ {:.5}  SL {:.1} / TP {:.1} pips",
                    ack.order_id,
                    direction,
                    plan.volume,
                    ack.entry_price,
                    plan.stop_loss_pips,
                    plan.take_profit_pips
                ),
            ),
            Ok(ClickOutcome::Skipped { plan }) => (
                StatusLevel::Warning,
                format!(
                    "{direction} skipped: volume {:.2} normalizes to zero",
                    plan.volume_raw
                ),
            ),
            Err(err) => (StatusLevel::Error, format!("{direction} failed: {err}")),
        };

        self.status_message = Some((message.clone(), level));
        self.order_log.push_front(LogEntry {
            timestamp,
            direction,
            level,
            message,
        });
        self.order_log.truncate(ORDER_LOG_CAPACITY);
    }

    /// Reveal the next bar and refresh the labels. Returns false at the end
    /// of the tape.
    pub fn step(&mut self) -> bool {
        if !self.bot.host_mut().advance() {
            self.autoplay = false;
            self.set_warning("End of tape");
            return false;
        }
        if let Err(err) = self.bot.on_tick() {
            self.set_error(err);
        }
        true
    }

    pub fn toggle_autoplay(&mut self) {
        self.autoplay = !self.autoplay;
        if self.autoplay {
            self.set_status("Autoplay on");
        } else {
            self.set_status("Autoplay paused");
        }
    }

    /// Called on every autoplay interval.
    pub fn on_timer(&mut self) {
        if self.autoplay {
            self.step();
        }
    }

    pub fn quit(&mut self) {
        self.bot.on_stop();
        self.running = false;
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, err: BotError) {
        self.status_message = Some((err.to_string(), StatusLevel::Error));
    }
}
