use crate::shared::core::primitives::ProductId;

/// Point in time view of the stock for one product. Never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockSnapshot {
    pub product_id: ProductId,
    pub available_amount: i64,
}

impl StockSnapshot {
    pub fn new(product_id: ProductId, available_amount: i64) -> Self {
        Self {
            product_id,
            available_amount,
        }
    }

    pub fn covers(&self, requested: u32) -> bool {
        i64::from(requested) <= self.available_amount
    }
}
