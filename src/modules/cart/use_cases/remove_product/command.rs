use crate::shared::core::primitives::ProductId;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveProduct {
    pub product_id: ProductId,
}
