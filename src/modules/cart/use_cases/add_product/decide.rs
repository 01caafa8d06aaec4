use crate::modules::cart::core::cart::Cart;
use crate::modules::cart::core::decision::DecideError;
use crate::modules::cart::core::stock::StockSnapshot;
use crate::modules::cart::use_cases::add_product::command::AddProduct;

#[derive(Debug)]
pub enum AddDecision {
    /// The product is already in the cart; `cart` holds the bumped amount.
    Increment { cart: Cart },
    /// The product is new; the caller still has to fetch its catalog data.
    AppendNew { amount: u32 },
    Rejected { reason: DecideError },
}

pub fn decide_add(cart: &Cart, command: &AddProduct, stock: &StockSnapshot) -> AddDecision {
    let existing = cart.find(command.product_id);
    let target = existing.map_or(1, |entry| entry.amount.saturating_add(1));

    if !stock.covers(target) {
        return AddDecision::Rejected {
            reason: DecideError::OutOfStock {
                product_id: command.product_id,
                requested: i64::from(target),
                available: stock.available_amount,
            },
        };
    }

    match existing {
        Some(_) => AddDecision::Increment {
            cart: cart.with_amount(command.product_id, target),
        },
        None => AddDecision::AppendNew { amount: target },
    }
}
