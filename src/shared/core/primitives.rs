/// Catalog identifier of a product. Unique within a cart.
pub type ProductId = i64;
