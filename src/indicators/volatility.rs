pub mod bollinger_bands;
pub mod volatility;
