// Composition root for the cart.
//
// Responsibilities
// - Read config from environment.
// - Wire inventory, store and notifier implementations into the use case handlers.
// - Run the cart worker behind the shared CartStore handle.

pub mod cart_store;
pub mod config;
pub mod telemetry;
