use crate::modules::cart::adapters::outbound::inventory::{
    InventoryError, ProductCatalog, StockService,
};
use crate::modules::cart::core::cart::{Cart, CartEntry};
use crate::modules::cart::use_cases::add_product::command::AddProduct;
use crate::modules::cart::use_cases::add_product::decide::{AddDecision, decide_add};
use crate::modules::cart::use_cases::errors::CartError;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct AddProductHandler<TStock, TCatalog>
where
    TStock: StockService + 'static,
    TCatalog: ProductCatalog + 'static,
{
    stock: Arc<TStock>,
    catalog: Arc<TCatalog>,
}

impl<TStock, TCatalog> AddProductHandler<TStock, TCatalog>
where
    TStock: StockService + 'static,
    TCatalog: ProductCatalog + 'static,
{
    pub fn new(stock: Arc<TStock>, catalog: Arc<TCatalog>) -> Self {
        Self { stock, catalog }
    }

    /// Returns the cart after adding one unit of the product. Nothing is
    /// persisted here; on error `cart` is still the current state.
    #[instrument(skip(self, cart), fields(product_id = command.product_id))]
    pub async fn handle(&self, cart: &Cart, command: AddProduct) -> Result<Cart, CartError> {
        let stock = self.stock.stock(command.product_id).await?;

        let next = match decide_add(cart, &command, &stock) {
            AddDecision::Increment { cart } => cart,
            AddDecision::AppendNew { amount } => {
                let product = self.catalog.product(command.product_id).await?;
                if product.id != command.product_id {
                    return Err(InventoryError::Malformed(format!(
                        "catalog returned product {} for product {}",
                        product.id, command.product_id
                    ))
                    .into());
                }
                cart.with_appended(CartEntry::new(product, amount))
            }
            AddDecision::Rejected { reason } => return Err(reason.into()),
        };

        debug!(
            amount = next.find(command.product_id).map(|e| e.amount),
            "product added"
        );
        Ok(next)
    }
}
