//! trading-bot: place one market or limit order on Binance USDT-M futures testnet.
//!
//! Usage: trading-bot <SYMBOL> <buy|sell> <market|limit> <QUANTITY> [PRICE] --api_key KEY --api_secret SECRET

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use clients_binance::{BinancePerpsClient, BinancePerpsClientConfig};
use trading_bot::{BotError, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("\n{}", err.user_message());
            ExitCode::from(err.exit_status())
        }
    }
}

async fn run(cli: Cli) -> Result<(), BotError> {
    let (request, _guard) = trading_bot::prepare(&cli)?;

    let client = reqwest::Client::builder()
        .build()
        .context("failed to build HTTP client")?;
    let config = BinancePerpsClientConfig::testnet(
        request.credentials.api_key.clone(),
        request.credentials.api_secret.clone(),
    )
    .with_base_url(cli.base_url.as_str())
    .with_recv_window(cli.recv_window);
    tracing::debug!(?config, "client configured");
    let perps = BinancePerpsClient::new(Arc::new(client), config);

    let order = trading_bot::execute(&perps, &request, cli.check_connection).await?;
    println!("{}", trading_bot::render_confirmation(&order));
    Ok(())
}
