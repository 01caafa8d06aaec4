use crate::modules::cart::core::cart::Cart;
use crate::modules::cart::core::decision::{DecideError, Decision};
use crate::modules::cart::use_cases::remove_product::command::RemoveProduct;

pub fn decide_remove(cart: &Cart, command: &RemoveProduct) -> Decision {
    match cart.position(command.product_id) {
        Some(index) => Decision::Accepted {
            cart: cart.without(index),
        },
        None => Decision::Rejected {
            reason: DecideError::NotInCart(command.product_id),
        },
    }
}
