use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::form_urlencoded;

type HmacSha256 = Hmac<Sha256>;

/// Milliseconds since the Unix epoch, as Binance expects in `timestamp`.
pub(crate) fn binance_fapi_timestamp_ms() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
        .to_string()
}

/// Encode params as query string (URL-encoded). The signature must be computed over this string.
fn build_query(params: &[(&str, String)]) -> String {
    let mut ser = form_urlencoded::Serializer::new(String::new());
    for (k, v) in params {
        ser.append_pair(k, v);
    }
    ser.finish()
}

/// HMAC-SHA256(secret, query) -> lowercase hex.
fn sign_query(api_secret: &str, query: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(api_secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(query.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Append signature to params and return the full query string.
pub(crate) fn sign_params(api_secret: &str, params: &[(&str, String)]) -> String {
    let query = build_query(params);
    let sig = sign_query(api_secret, &query);
    format!("{}&signature={}", query, sig)
}

/// Adds `timestamp` and `recvWindow` unless the caller already set them.
pub(crate) fn with_auth_params<'a>(
    mut params: Vec<(&'a str, String)>,
    recv_window: u64,
) -> Vec<(&'a str, String)> {
    if !params.iter().any(|(k, _)| *k == "timestamp") {
        params.push(("timestamp", binance_fapi_timestamp_ms()));
    }
    if !params.iter().any(|(k, _)| *k == "recvWindow") {
        params.push(("recvWindow", recv_window.to_string()));
    }
    params
}
