use crate::modules::cart::core::cart::Cart;
use crate::modules::cart::core::decision::Decision;
use crate::modules::cart::use_cases::errors::CartError;
use crate::modules::cart::use_cases::remove_product::command::RemoveProduct;
use crate::modules::cart::use_cases::remove_product::decide::decide_remove;
use tracing::{debug, instrument};

/// Removal needs no remote data, so the handler holds no ports.
#[derive(Debug, Default, Clone, Copy)]
pub struct RemoveProductHandler;

impl RemoveProductHandler {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self, cart), fields(product_id = command.product_id))]
    pub fn handle(&self, cart: &Cart, command: RemoveProduct) -> Result<Cart, CartError> {
        match decide_remove(cart, &command) {
            Decision::Accepted { cart: next } => {
                debug!(remaining = next.len(), "product removed");
                Ok(next)
            }
            Decision::Rejected { reason } => Err(reason.into()),
        }
    }
}
