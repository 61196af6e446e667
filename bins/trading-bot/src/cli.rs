//! Command-line surface of the `trading-bot` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clients_binance::{Decimal, OrderSide, OrderType, DEFAULT_RECV_WINDOW, TESTNET_BASE_URL};

const EXAMPLES: &str = "\
Examples:
  Market Buy: trading-bot BTCUSDT buy market 0.001 --api_key YOUR_KEY --api_secret YOUR_SECRET
  Limit Sell: trading-bot ETHUSDT sell limit 0.1 2500 --api_key YOUR_KEY --api_secret YOUR_SECRET";

#[derive(Debug, Parser)]
#[command(name = "trading-bot")]
#[command(about = "Binance Futures Testnet Trading Bot", long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Trading pair (e.g., BTCUSDT)
    pub symbol: String,

    /// Order side
    #[arg(value_enum)]
    pub side: SideArg,

    /// Order type
    #[arg(value_enum, value_name = "TYPE")]
    pub order_type: TypeArg,

    /// Order quantity
    #[arg(allow_negative_numbers = true)]
    pub quantity: Decimal,

    /// Price for limit orders (required for limit type)
    #[arg(allow_negative_numbers = true)]
    pub price: Option<Decimal>,

    /// Binance API key
    #[arg(long = "api_key", value_name = "KEY")]
    pub api_key: String,

    /// Binance API secret
    #[arg(long = "api_secret", value_name = "SECRET")]
    pub api_secret: String,

    /// REST endpoint of the futures exchange
    #[arg(long = "base_url", value_name = "URL", default_value = TESTNET_BASE_URL)]
    pub base_url: String,

    /// Validity window of signed requests, in milliseconds
    #[arg(long = "recv_window", value_name = "MS", default_value_t = DEFAULT_RECV_WINDOW)]
    pub recv_window: u64,

    /// Verify connectivity, account status and balance before placing the order
    #[arg(long = "check_connection")]
    pub check_connection: bool,

    /// Default log filter; RUST_LOG overrides it
    #[arg(long = "log_level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Also append logs to this file
    #[arg(long = "log_file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    Buy,
    Sell,
}

impl From<SideArg> for OrderSide {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Buy => OrderSide::Buy,
            SideArg::Sell => OrderSide::Sell,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeArg {
    Market,
    Limit,
}

impl From<TypeArg> for OrderType {
    fn from(order_type: TypeArg) -> Self {
        match order_type {
            TypeArg::Market => OrderType::Market,
            TypeArg::Limit => OrderType::Limit,
        }
    }
}
