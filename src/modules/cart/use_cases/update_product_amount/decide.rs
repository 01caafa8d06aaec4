use crate::modules::cart::core::cart::Cart;
use crate::modules::cart::core::decision::{DecideError, Decision};
use crate::modules::cart::core::stock::StockSnapshot;
use crate::modules::cart::use_cases::update_product_amount::command::UpdateProductAmount;

/// Checks the requested amount before any stock lookup. Dropping to zero is
/// the job of remove, not update.
pub fn validate_amount(command: &UpdateProductAmount) -> Result<u32, DecideError> {
    if command.amount < 1 {
        return Err(DecideError::InvalidAmount(command.amount));
    }
    u32::try_from(command.amount).map_err(|_| DecideError::InvalidAmount(command.amount))
}

pub fn decide_update(
    cart: &Cart,
    command: &UpdateProductAmount,
    amount: u32,
    stock: &StockSnapshot,
) -> Decision {
    if !stock.covers(amount) {
        return Decision::Rejected {
            reason: DecideError::OutOfStock {
                product_id: command.product_id,
                requested: i64::from(amount),
                available: stock.available_amount,
            },
        };
    }
    Decision::Accepted {
        cart: cart.with_amount(command.product_id, amount),
    }
}
