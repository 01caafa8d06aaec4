use crate::shared::core::primitives::ProductId;
use serde::Deserialize;

/// Requested absolute amount for a product. `amount` is taken as given by the
/// caller and validated by the decider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}
