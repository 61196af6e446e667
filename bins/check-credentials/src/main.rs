//! check-credentials: verify Binance futures testnet API keys without trading.
//!
//! Usage: check-credentials --api_key KEY --api_secret SECRET [--base_url URL]

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use clients_binance::{BinancePerpsClient, BinancePerpsClientConfig, TESTNET_BASE_URL};
use trading_bot::ConnectionReport;

#[derive(Debug, Parser)]
#[command(name = "check-credentials")]
#[command(about = "Test Binance Futures Testnet API credentials", long_about = None)]
struct Args {
    /// Binance API key
    #[arg(long = "api_key", value_name = "KEY")]
    api_key: String,

    /// Binance API secret
    #[arg(long = "api_secret", value_name = "SECRET")]
    api_secret: String,

    /// REST endpoint of the futures exchange
    #[arg(long = "base_url", value_name = "URL", default_value = TESTNET_BASE_URL)]
    base_url: String,

    /// Default log filter; RUST_LOG overrides it
    #[arg(long = "log_level", value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(()) => {
            println!("\n[SUCCESS] All tests passed! Credentials are valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("\n[ERROR] Credential Test Failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let _guard = utils::init_tracing(&args.log_level, None)?;
    println!("Testing Binance API credentials...");

    let client = reqwest::Client::builder().build()?;
    let config = BinancePerpsClientConfig::testnet(args.api_key, args.api_secret)
        .with_base_url(args.base_url);
    let perps = BinancePerpsClient::new(Arc::new(client), config);

    let report = trading_bot::check_connection(&perps).await?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &ConnectionReport) {
    println!(
        "[SUCCESS] API Connectivity: Working (Ping: {:.2}ms)",
        report.ping.as_secs_f64() * 1000.0
    );
    if let Some(time) = report.server_time {
        println!(
            "[SUCCESS] Server Time: {} UTC",
            time.format("%Y-%m-%d %H:%M:%S")
        );
    }
    println!("[SUCCESS] Account Information Received");
    println!("    Can Trade: {}", report.account.can_trade);
    println!("    Can Withdraw: {}", report.account.can_withdraw);
    println!("    Can Deposit: {}", report.account.can_deposit);
    match &report.usdt_balance {
        Some(b) => println!("[SUCCESS] USDT Balance: {}", b.balance),
        None => println!("[WARNING] No USDT balance found"),
    }
}
