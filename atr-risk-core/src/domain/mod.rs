//! Domain types for the ATR risk bot.

pub mod bar;
pub mod direction;
pub mod market;
pub mod symbol;
pub mod timeframe;

pub use bar::{Bar, BarError};
pub use direction::Direction;
pub use market::{AccountState, MarketReading};
pub use symbol::SymbolSpec;
pub use timeframe::Timeframe;
