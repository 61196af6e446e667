use clients_binance::OrderType;
use utils::WorkerGuard;

use crate::cli::Cli;
use crate::error::BotError;
use crate::request::OrderRequest;

/// Validates the arguments, then installs logging.
///
/// Validation comes first so a usage error leaves nothing behind, not even
/// an empty `--log_file`. Keep the returned guard alive until exit.
pub fn prepare(cli: &Cli) -> Result<(OrderRequest, Option<WorkerGuard>), BotError> {
    let request = OrderRequest::try_from(cli)?;
    let guard = utils::init_tracing(&cli.log_level, cli.log_file.as_deref())?;

    if let (OrderType::Market, Some(price)) = (request.order_type, cli.price) {
        tracing::warn!(%price, "price is ignored for market orders");
    }
    Ok((request, guard))
}
