use clients_binance::OrderResponse;

const RULE: &str = "==================================================";
const TESTNET_UI: &str = "https://testnet.binancefuture.com";

/// Human-readable order confirmation printed on success.
pub fn render_confirmation(resp: &OrderResponse) -> String {
    let mut lines = vec![
        RULE.to_string(),
        "[SUCCESS] Order Execution Details:".to_string(),
        RULE.to_string(),
        format!("Order ID: {}", resp.order_id),
        format!("Symbol: {}", resp.symbol),
        format!("Status: {}", resp.status),
        format!("Side: {}", resp.side),
        format!("Type: {}", resp.order_type),
        format!("Quantity: {}", resp.orig_qty),
    ];
    if let Some(price) = &resp.price {
        lines.push(format!("Price: {}", price));
    }
    lines.push(format!("Executed Qty: {}", resp.executed_qty));
    if let Some(avg) = &resp.avg_price {
        lines.push(format!("Avg Price: {}", avg));
    }
    lines.push(RULE.to_string());
    lines.push("Check Binance Testnet for full order details".to_string());
    lines.push(TESTNET_UI.to_string());
    lines.join("\n")
}
