//! Binance USDT-M perpetual futures REST client.

mod config;
mod error;
mod perps;
mod types;
mod utils;

pub use config::{BinancePerpsClientConfig, DEFAULT_RECV_WINDOW, TESTNET_BASE_URL};
pub use error::{ApiErrorBody, BinanceError};
pub use perps::BinancePerpsClient;
pub use rust_decimal::Decimal;
pub use types::{
    AccountInfo, AssetBalance, NewOrder, OrderResponse, OrderSide, OrderType, ServerTime,
    TimeInForce,
};
