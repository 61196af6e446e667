use clients_binance::BinanceError;

/// Terminal outcome of a failed invocation.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// Bad arguments; detected before any network call.
    #[error("{0}")]
    Validation(String),

    /// Anything the exchange or the connection to it reported.
    /// Business rejections and transport failures share this category.
    #[error(transparent)]
    Trading(#[from] BinanceError),

    /// Local setup failed (logging, HTTP client).
    #[error(transparent)]
    Setup(#[from] anyhow::Error),
}

impl BotError {
    /// Process exit status. Usage errors share clap's status.
    pub fn exit_status(&self) -> u8 {
        match self {
            BotError::Validation(_) => 2,
            BotError::Trading(_) | BotError::Setup(_) => 1,
        }
    }

    /// Text shown to the user on stderr.
    pub fn user_message(&self) -> String {
        match self {
            BotError::Validation(msg) => format!(
                "[ERROR] Validation Error: {}\nUse -h for help with command usage",
                msg
            ),
            BotError::Trading(err) => format!("[ERROR] Trading Error: {}", error_chain(err)),
            BotError::Setup(err) => format!("[ERROR] Unexpected Error: {:#}", err),
        }
    }
}

/// `err` followed by each of its causes, joined by `: `.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    std::iter::successors(Some(err), |e| e.source())
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_points_at_help() {
        let err = BotError::Validation("Price is required for limit orders".to_string());
        assert_eq!(
            err.user_message(),
            "[ERROR] Validation Error: Price is required for limit orders\nUse -h for help with command usage"
        );
        assert_eq!(err.exit_status(), 2);
    }

    #[test]
    fn exchange_rejection_is_trading_error() {
        let err = BotError::from(BinanceError::Api {
            status: 400,
            code: -2019,
            msg: "Margin is insufficient.".to_string(),
        });
        assert_eq!(
            err.user_message(),
            "[ERROR] Trading Error: API Error 400: Margin is insufficient. (code -2019)"
        );
        assert_eq!(err.exit_status(), 1);
    }

    #[test]
    fn decode_failure_shows_cause() {
        let cause = serde_json::from_str::<u64>("x").unwrap_err();
        let err = BotError::from(BinanceError::from(cause));
        assert_eq!(
            err.user_message(),
            "[ERROR] Trading Error: failed to decode response: expected value at line 1 column 1"
        );
    }

    #[tokio::test]
    async fn network_failure_shows_underlying_cause() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let cause = http
            .get(format!("http://{}/fapi/v1/ping", addr))
            .send()
            .await
            .unwrap_err();
        let root = std::error::Error::source(&cause)
            .map(|e| e.to_string())
            .expect("reqwest wraps the connect error");
        let top = cause.to_string();

        let msg = BotError::from(BinanceError::from(cause)).user_message();
        assert!(msg.starts_with("[ERROR] Trading Error: network error: "));
        assert!(msg.contains(&top));
        assert!(msg.contains(&root));
    }
}
