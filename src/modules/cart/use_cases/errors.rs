use crate::modules::cart::adapters::outbound::inventory::InventoryError;
use crate::modules::cart::core::decision::DecideError;
use std::fmt;
use thiserror::Error;

pub const OUT_OF_STOCK_MESSAGE: &str = "Requested quantity is out of stock";
pub const ADD_PRODUCT_FAILED_MESSAGE: &str = "Error adding product";
pub const REMOVE_PRODUCT_FAILED_MESSAGE: &str = "Error removing product";
pub const UPDATE_PRODUCT_AMOUNT_FAILED_MESSAGE: &str = "Error updating product quantity";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    AddProduct,
    RemoveProduct,
    UpdateProductAmount,
}

impl CartOperation {
    pub fn failure_message(self) -> &'static str {
        match self {
            CartOperation::AddProduct => ADD_PRODUCT_FAILED_MESSAGE,
            CartOperation::RemoveProduct => REMOVE_PRODUCT_FAILED_MESSAGE,
            CartOperation::UpdateProductAmount => UPDATE_PRODUCT_AMOUNT_FAILED_MESSAGE,
        }
    }
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CartOperation::AddProduct => "add_product",
            CartOperation::RemoveProduct => "remove_product",
            CartOperation::UpdateProductAmount => "update_product_amount",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum CartError {
    #[error("rejected: {0}")]
    Rejected(#[from] DecideError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl CartError {
    /// Message shown to the shopper. Only a stock shortage gets its own text;
    /// everything else collapses into the operation's generic failure.
    pub fn user_message(&self, operation: CartOperation) -> &'static str {
        match self {
            CartError::Rejected(DecideError::OutOfStock { .. }) => OUT_OF_STOCK_MESSAGE,
            _ => operation.failure_message(),
        }
    }
}
