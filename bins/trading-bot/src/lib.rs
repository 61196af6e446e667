//! Places a single order on the Binance USDT-M futures testnet.
//!
//! The binary validates its arguments into an [`OrderRequest`], then hands a
//! single order to the exchange client and prints the confirmation.

mod bot;
mod cli;
mod error;
mod report;
mod request;
mod startup;

pub use bot::{check_connection, execute, place_order, ConnectionReport, Exchange};
pub use cli::{Cli, SideArg, TypeArg};
pub use error::BotError;
pub use report::render_confirmation;
pub use request::{Credentials, OrderRequest};
pub use startup::prepare;
