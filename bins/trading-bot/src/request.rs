use clients_binance::{Decimal, NewOrder, OrderSide, OrderType};

use crate::cli::Cli;
use crate::error::BotError;

/// API key pair supplied on the command line. Held in memory only.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// A validated order, built once per invocation.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Decimal,
    /// Present iff `order_type` is LIMIT.
    pub price: Option<Decimal>,
    pub credentials: Credentials,
}

impl OrderRequest {
    /// Checks the raw arguments and normalizes them into a request.
    ///
    /// Runs before any client is built, so a failure here never reaches the
    /// network.
    pub fn new(
        symbol: &str,
        side: OrderSide,
        order_type: OrderType,
        quantity: Decimal,
        price: Option<Decimal>,
        credentials: Credentials,
    ) -> Result<Self, BotError> {
        let symbol = symbol.trim().to_ascii_uppercase();
        if symbol.is_empty() || !symbol.ends_with("USDT") {
            return Err(BotError::Validation(
                "Symbol must be a USDT-M pair (e.g., BTCUSDT)".to_string(),
            ));
        }

        if quantity <= Decimal::ZERO {
            return Err(BotError::Validation("Quantity must be positive".to_string()));
        }

        let price = match (order_type, price) {
            (OrderType::Limit, None) => {
                return Err(BotError::Validation(
                    "Price is required for limit orders".to_string(),
                ))
            }
            (OrderType::Limit, Some(price)) if price <= Decimal::ZERO => {
                return Err(BotError::Validation("Price must be positive".to_string()))
            }
            (OrderType::Limit, Some(price)) => Some(price),
            (OrderType::Market, _) => None,
        };

        Ok(Self {
            symbol,
            side,
            order_type,
            quantity,
            price,
            credentials,
        })
    }

    /// Wire request handed to the exchange client.
    pub fn to_new_order(&self) -> NewOrder {
        match (self.order_type, self.price) {
            (OrderType::Limit, Some(price)) => {
                NewOrder::limit(self.symbol.clone(), self.side, self.quantity, price)
            }
            _ => NewOrder::market(self.symbol.clone(), self.side, self.quantity),
        }
    }
}

impl TryFrom<&Cli> for OrderRequest {
    type Error = BotError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        OrderRequest::new(
            &cli.symbol,
            cli.side.into(),
            cli.order_type.into(),
            cli.quantity,
            cli.price,
            Credentials {
                api_key: cli.api_key.clone(),
                api_secret: cli.api_secret.clone(),
            },
        )
    }
}
