//! Trailing-window technical indicators over daily closing prices.
//!
//! Every function returns a vector aligned 1:1 with its input. Entries whose
//! window reaches before the first price hold a neutral placeholder instead
//! of being dropped, so callers can zip the outputs row by row.

pub mod momentum;
pub mod oscillator;
pub mod trend;
pub mod volatility;

pub use momentum::{lag, momentum, returns};
pub use oscillator::rsi::{rsi, RSI_NEUTRAL};
pub use trend::ma::moving_average;
pub use volatility::bollinger_bands::bollinger_distance;
pub use volatility::volatility::rolling_volatility;
