use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::config::BinancePerpsClientConfig;
use crate::error::BinanceError;
use crate::types::{AccountInfo, AssetBalance, NewOrder, OrderResponse, ServerTime};
use crate::utils;

/// Client for Binance perpetual futures (USDT-M) API.
pub struct BinancePerpsClient {
    client: Arc<reqwest::Client>,
    config: BinancePerpsClientConfig,
}

impl BinancePerpsClient {
    pub fn new(client: Arc<reqwest::Client>, config: BinancePerpsClientConfig) -> Self {
        Self { client, config }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Connectivity check; succeeds on an empty `{}` reply.
    pub async fn ping(&self) -> Result<(), BinanceError> {
        let url = format!("{}/fapi/v1/ping", self.config.base_url);
        execute(self.client.get(url)).await?;
        Ok(())
    }

    pub async fn server_time(&self) -> Result<ServerTime, BinanceError> {
        let url = format!("{}/fapi/v1/time", self.config.base_url);
        let body = execute(self.client.get(url)).await?;
        decode(&body)
    }

    pub async fn account(&self) -> Result<AccountInfo, BinanceError> {
        let body = self
            .signed_request(Method::GET, "/fapi/v2/account", Vec::new())
            .await?;
        decode(&body)
    }

    pub async fn account_balance(&self) -> Result<Vec<AssetBalance>, BinanceError> {
        let body = self
            .signed_request(Method::GET, "/fapi/v2/balance", Vec::new())
            .await?;
        decode(&body)
    }

    /// Submits a new order. Called once per order; never retried here.
    pub async fn place_order(&self, order: &NewOrder) -> Result<OrderResponse, BinanceError> {
        tracing::debug!(
            symbol = %order.symbol,
            side = %order.side,
            order_type = %order.order_type,
            "submitting order"
        );
        let body = self
            .signed_request(Method::POST, "/fapi/v1/order", order.to_params())
            .await?;
        decode(&body)
    }

    /// Signed request for USD-M futures (fapi).
    ///
    /// `params` come without signature; timestamp/recvWindow are added if missing.
    /// GET carries the signed query in the URL, POST and DELETE in an
    /// `application/x-www-form-urlencoded` body.
    async fn signed_request(
        &self,
        method: Method,
        path: &str,
        params: Vec<(&str, String)>,
    ) -> Result<String, BinanceError> {
        let params = utils::with_auth_params(params, self.config.recv_window);
        let signed_query = utils::sign_params(&self.config.api_secret, &params);

        let url = format!("{}{}", self.config.base_url, path);
        let req = if method == Method::GET {
            self.client.get(format!("{}?{}", url, signed_query))
        } else {
            self.client
                .request(method, url)
                .header(
                    reqwest::header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(signed_query)
        };

        execute(req.header("X-MBX-APIKEY", &self.config.api_key)).await
    }
}

/// Sends the request and returns the body of a 2xx response.
async fn execute(req: reqwest::RequestBuilder) -> Result<String, BinanceError> {
    let resp = req.send().await?;
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        tracing::debug!(status = status.as_u16(), %body, "binance request rejected");
        return Err(BinanceError::from_response(status.as_u16(), body));
    }
    Ok(body)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, BinanceError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderSide;
    use rust_decimal::Decimal;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client_for(base_url: &str) -> BinancePerpsClient {
        let config = BinancePerpsClientConfig::testnet("KEY1".into(), "secret".into())
            .with_base_url(base_url);
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        BinancePerpsClient::new(Arc::new(http), config)
    }

    /// True once the head and `content-length` bytes of body have arrived.
    fn request_complete(buf: &[u8]) -> bool {
        let text = String::from_utf8_lossy(buf);
        let Some(head_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..head_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        buf.len() >= head_end + 4 + content_length
    }

    /// Answers a single HTTP request with `status` and a JSON `body`, and
    /// returns the raw request (head, blank line, body).
    async fn serve_once(listener: TcpListener, status: &'static str, body: &'static str) -> String {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request_complete(&buf) {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8(buf).unwrap()
    }

    async fn local_server() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        (listener, base_url)
    }

    fn split_request(raw: &str) -> (String, &str) {
        let (head, body) = raw.split_once("\r\n\r\n").unwrap();
        (head.to_ascii_lowercase(), body)
    }

    fn is_signature(s: &str) -> bool {
        s.len() == 64 && s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    }

    #[test]
    fn keeps_configured_base_url() {
        let client = client_for("http://localhost:9/");
        assert_eq!(client.base_url(), "http://localhost:9");
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{}", addr));
        let err = client.ping().await.unwrap_err();
        assert!(matches!(err, BinanceError::Http(_)));
        assert!(err.code().is_none());
    }

    #[tokio::test]
    async fn order_is_signed_form_post_and_rejection_keeps_code() {
        let (listener, base_url) = local_server().await;
        let server = tokio::spawn(serve_once(
            listener,
            "401 Unauthorized",
            r#"{"code":-2015,"msg":"Invalid API-key, IP, or permissions for action."}"#,
        ));

        let order = NewOrder::limit(
            "ETHUSDT",
            OrderSide::Sell,
            Decimal::new(1, 1),
            Decimal::new(2500, 0),
        );
        let err = client_for(&base_url).place_order(&order).await.unwrap_err();
        let raw = server.await.unwrap();
        let (head, body) = split_request(&raw);

        assert!(head.starts_with("post /fapi/v1/order http/1.1\r\n"));
        assert!(head.contains("\r\ncontent-type: application/x-www-form-urlencoded"));
        assert!(head.contains("\r\nx-mbx-apikey: key1"));

        assert!(body.starts_with(
            "symbol=ETHUSDT&side=SELL&type=LIMIT&timeInForce=GTC&quantity=0.1&price=2500&timestamp="
        ));
        let (unsigned, signature) = body.rsplit_once("&signature=").unwrap();
        assert!(unsigned.ends_with("&recvWindow=5000"));
        assert!(is_signature(signature));

        assert_eq!(err.code(), Some(-2015));
        assert!(matches!(err, BinanceError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn signed_get_carries_signature_in_query() {
        let (listener, base_url) = local_server().await;
        let server = tokio::spawn(serve_once(
            listener,
            "200 OK",
            r#"[{"asset":"USDT","balance":"100.0","availableBalance":"90.0"}]"#,
        ));

        let balances = client_for(&base_url).account_balance().await.unwrap();
        let raw = server.await.unwrap();
        let (head, body) = split_request(&raw);

        let request_line = head.lines().next().unwrap();
        assert!(request_line.starts_with("get /fapi/v2/balance?timestamp="));
        let query = request_line
            .trim_start_matches("get /fapi/v2/balance?")
            .trim_end_matches(" http/1.1");
        let (_, signature) = query.rsplit_once("&signature=").unwrap();
        assert!(is_signature(signature));
        assert!(head.contains("\r\nx-mbx-apikey: key1"));
        assert!(body.is_empty());

        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].balance, "100.0");
    }

    #[tokio::test]
    async fn server_time_decodes_success_body() {
        let (listener, base_url) = local_server().await;
        let server = tokio::spawn(serve_once(listener, "200 OK", r#"{"serverTime":1717000000000}"#));

        let time = client_for(&base_url).server_time().await.unwrap();
        let raw = server.await.unwrap();

        assert!(raw.starts_with("GET /fapi/v1/time HTTP/1.1\r\n"));
        assert_eq!(time.server_time, 1_717_000_000_000);
    }

    #[tokio::test]
    async fn non_json_rejection_keeps_body() {
        let (listener, base_url) = local_server().await;
        let server = tokio::spawn(serve_once(listener, "502 Bad Gateway", "upstream down"));

        let err = client_for(&base_url).ping().await.unwrap_err();
        server.await.unwrap();

        assert!(
            matches!(err, BinanceError::Status { status: 502, ref body } if body == "upstream down")
        );
    }
}
