//! Order submission flow, written against the [`Exchange`] seam so it can run
//! without a network in tests.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clients_binance::{
    AccountInfo, AssetBalance, BinanceError, BinancePerpsClient, NewOrder, OrderResponse,
    ServerTime,
};

use crate::error::BotError;
use crate::request::OrderRequest;

/// The exchange operations the bot relies on.
#[async_trait]
pub trait Exchange {
    async fn ping(&self) -> Result<(), BinanceError>;
    async fn server_time(&self) -> Result<ServerTime, BinanceError>;
    async fn account(&self) -> Result<AccountInfo, BinanceError>;
    async fn account_balance(&self) -> Result<Vec<AssetBalance>, BinanceError>;
    async fn place_order(&self, order: &NewOrder) -> Result<OrderResponse, BinanceError>;
}

#[async_trait]
impl Exchange for BinancePerpsClient {
    async fn ping(&self) -> Result<(), BinanceError> {
        BinancePerpsClient::ping(self).await
    }

    async fn server_time(&self) -> Result<ServerTime, BinanceError> {
        BinancePerpsClient::server_time(self).await
    }

    async fn account(&self) -> Result<AccountInfo, BinanceError> {
        BinancePerpsClient::account(self).await
    }

    async fn account_balance(&self) -> Result<Vec<AssetBalance>, BinanceError> {
        BinancePerpsClient::account_balance(self).await
    }

    async fn place_order(&self, order: &NewOrder) -> Result<OrderResponse, BinanceError> {
        BinancePerpsClient::place_order(self, order).await
    }
}

/// Result of [`check_connection`].
#[derive(Debug, Clone)]
pub struct ConnectionReport {
    pub ping: Duration,
    pub server_time: Option<DateTime<Utc>>,
    pub account: AccountInfo,
    /// `None` when the account holds no USDT entry.
    pub usdt_balance: Option<AssetBalance>,
}

/// Pings the exchange, reads server time, account flags and the USDT balance.
pub async fn check_connection<E: Exchange + Sync>(
    exchange: &E,
) -> Result<ConnectionReport, BinanceError> {
    let start = Instant::now();
    exchange.ping().await?;
    let ping = start.elapsed();

    let server_ms = exchange.server_time().await?.server_time;
    let server_time = DateTime::<Utc>::from_timestamp_millis(server_ms);
    tracing::info!(
        ping_ms = %format!("{:.2}", ping.as_secs_f64() * 1000.0),
        "API connection successful"
    );
    if let Some(time) = server_time {
        tracing::info!("Binance server time: {} UTC", time.format("%Y-%m-%d %H:%M:%S"));
    }

    let account = exchange.account().await?;
    tracing::info!(can_trade = account.can_trade, "account status");

    let usdt_balance = exchange
        .account_balance()
        .await?
        .into_iter()
        .find(|b| b.asset == "USDT");
    match &usdt_balance {
        Some(b) => tracing::info!("Available balance: {} USDT", b.balance),
        None => tracing::warn!("No USDT balance found"),
    }

    Ok(ConnectionReport {
        ping,
        server_time,
        account,
        usdt_balance,
    })
}

/// Submits the request with exactly one `place_order` call.
pub async fn place_order<E: Exchange + Sync>(
    exchange: &E,
    request: &OrderRequest,
) -> Result<OrderResponse, BinanceError> {
    let order = request.to_new_order();
    tracing::info!(
        symbol = %order.symbol,
        side = %order.side,
        order_type = %order.order_type,
        quantity = %order.quantity,
        price = ?order.price,
        "placing order"
    );
    match exchange.place_order(&order).await {
        Ok(resp) => {
            tracing::info!(order_id = resp.order_id, status = %resp.status, "order successful");
            Ok(resp)
        }
        Err(err) => {
            tracing::error!("order failed: {}", err);
            Err(err)
        }
    }
}

/// Optional pre-flight check followed by the single order call.
pub async fn execute<E: Exchange + Sync>(
    exchange: &E,
    request: &OrderRequest,
    check_first: bool,
) -> Result<OrderResponse, BotError> {
    if check_first {
        check_connection(exchange).await?;
    }
    Ok(place_order(exchange, request).await?)
}
