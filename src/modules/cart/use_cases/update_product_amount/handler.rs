use crate::modules::cart::adapters::outbound::inventory::StockService;
use crate::modules::cart::core::cart::Cart;
use crate::modules::cart::core::decision::Decision;
use crate::modules::cart::use_cases::errors::CartError;
use crate::modules::cart::use_cases::update_product_amount::command::UpdateProductAmount;
use crate::modules::cart::use_cases::update_product_amount::decide::{
    decide_update, validate_amount,
};
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct UpdateProductAmountHandler<TStock>
where
    TStock: StockService + 'static,
{
    stock: Arc<TStock>,
}

impl<TStock> UpdateProductAmountHandler<TStock>
where
    TStock: StockService + 'static,
{
    pub fn new(stock: Arc<TStock>) -> Self {
        Self { stock }
    }

    /// Sets an absolute amount. A product missing from the cart is not an
    /// error: the unchanged cart is returned and still gets persisted.
    #[instrument(
        skip(self, cart),
        fields(product_id = command.product_id, amount = command.amount)
    )]
    pub async fn handle(
        &self,
        cart: &Cart,
        command: UpdateProductAmount,
    ) -> Result<Cart, CartError> {
        let amount = validate_amount(&command)?;
        let stock = self.stock.stock(command.product_id).await?;

        match decide_update(cart, &command, amount, &stock) {
            Decision::Accepted { cart: next } => {
                debug!("product amount updated");
                Ok(next)
            }
            Decision::Rejected { reason } => Err(reason.into()),
        }
    }
}
