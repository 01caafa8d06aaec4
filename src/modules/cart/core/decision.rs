use crate::modules::cart::core::cart::Cart;
use crate::shared::core::primitives::ProductId;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum DecideError {
    #[error("requested {requested} of product {product_id} but only {available} in stock")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    #[error("amount must be at least 1, got {0}")]
    InvalidAmount(i64),
}

#[derive(Debug)]
pub enum Decision {
    Accepted { cart: Cart },
    Rejected { reason: DecideError },
}
