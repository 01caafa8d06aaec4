// End to end tests for the shared cart handle.
//
// Wires the CartStore with the in memory inventory, key value store and
// notifier, then asserts on the visible cart, the stored JSON and the
// messages the shopper would have seen.

use crate::modules::cart::adapters::outbound::cart_repository::DEFAULT_STORAGE_KEY;
use crate::modules::cart::adapters::outbound::inventory_in_memory::InMemoryInventory;
use crate::modules::cart::core::cart::{Cart, CartEntry};
use crate::modules::cart::use_cases::errors::{
    ADD_PRODUCT_FAILED_MESSAGE, OUT_OF_STOCK_MESSAGE, REMOVE_PRODUCT_FAILED_MESSAGE,
    UPDATE_PRODUCT_AMOUNT_FAILED_MESSAGE,
};
use crate::modules::cart::use_cases::update_product_amount::command::UpdateProductAmount;
use crate::shared::core::primitives::ProductId;
use crate::shared::infrastructure::key_value_store::PersistedStore;
use crate::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
use crate::shared::infrastructure::key_value_store::json_file::JsonFileStore;
use crate::shared::infrastructure::notifier::in_memory::InMemoryNotifier;
use crate::shell::cart_store::CartStore;
use crate::tests::fixtures::carts::cart_of;
use crate::tests::fixtures::products::ProductBuilder;
use rstest::{fixture, rstest};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::join;
use tokio::time::{sleep, timeout};

struct World {
    inventory: Arc<InMemoryInventory>,
    store: Arc<InMemoryKeyValueStore>,
    notifier: Arc<InMemoryNotifier>,
}

impl World {
    fn seeded(cart: &Cart) -> Self {
        let raw = serde_json::to_string(cart).unwrap();
        Self::with_store(InMemoryKeyValueStore::new().with_entry(DEFAULT_STORAGE_KEY, raw))
    }

    fn with_store(store: InMemoryKeyValueStore) -> Self {
        let inventory = InMemoryInventory::new()
            .with_product(ProductBuilder::new().id(1).build(), 2)
            .with_product(ProductBuilder::new().id(2).build(), 10)
            .with_product(ProductBuilder::new().id(3).build(), 10)
            .with_stock(6, 4);
        Self {
            inventory: Arc::new(inventory),
            store: Arc::new(store),
            notifier: Arc::new(InMemoryNotifier::new()),
        }
    }

    async fn open(&self) -> CartStore {
        CartStore::open(
            self.inventory.clone(),
            self.inventory.clone(),
            self.store.clone(),
            DEFAULT_STORAGE_KEY,
            self.notifier.clone(),
        )
        .await
    }

    async fn stored_cart(&self) -> Option<Cart> {
        self.store
            .get(DEFAULT_STORAGE_KEY)
            .await
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    async fn open_on_file(&self, path: &Path) -> CartStore {
        CartStore::open(
            self.inventory.clone(),
            self.inventory.clone(),
            Arc::new(JsonFileStore::new(path)),
            DEFAULT_STORAGE_KEY,
            self.notifier.clone(),
        )
        .await
    }
}

#[fixture]
fn world() -> World {
    World::with_store(InMemoryKeyValueStore::new())
}

fn amounts(cart: &Cart) -> Vec<(ProductId, u32)> {
    cart.iter().map(|e| (e.product_id(), e.amount)).collect()
}

#[rstest]
#[tokio::test]
async fn it_should_start_from_the_persisted_cart() {
    let world = World::seeded(&cart_of(&[(2, 1), (1, 2)]));
    let store = world.open().await;
    assert_eq!(amounts(&store.cart()), vec![(2, 1), (1, 2)]);
}

#[rstest]
#[tokio::test]
async fn it_should_start_empty_when_the_persisted_cart_is_unparsable() {
    let world = World::with_store(
        InMemoryKeyValueStore::new().with_entry(DEFAULT_STORAGE_KEY, "[{broken"),
    );
    let store = world.open().await;
    assert!(store.cart().is_empty());
}

#[rstest]
#[tokio::test]
async fn it_should_add_a_new_product_with_amount_one(world: World) {
    let store = world.open().await;
    store.add_product(2).await;
    assert_eq!(amounts(&store.cart()), vec![(2, 1)]);
    assert_eq!(world.stored_cart().await, Some(store.cart()));
    assert!(world.notifier.messages().is_empty());
}

#[rstest]
#[tokio::test]
async fn it_should_add_a_named_product_to_an_empty_cart() {
    let shoe = serde_json::from_value(serde_json::json!({ "id": 5, "name": "Shoe" })).unwrap();
    let world = World {
        inventory: Arc::new(InMemoryInventory::new().with_product(shoe, 3)),
        store: Arc::new(InMemoryKeyValueStore::new()),
        notifier: Arc::new(InMemoryNotifier::new()),
    };
    let store = world.open().await;

    store.add_product(5).await;

    let cart = store.cart();
    assert_eq!(cart.len(), 1);
    let entry: &CartEntry = cart.find(5).unwrap();
    assert_eq!(entry.amount, 1);
    assert_eq!(entry.product.title, "Shoe");
}

#[rstest]
#[tokio::test]
async fn it_should_increment_an_existing_product() {
    let world = World::seeded(&cart_of(&[(2, 3), (3, 1)]));
    let store = world.open().await;
    store.add_product(2).await;
    assert_eq!(amounts(&store.cart()), vec![(2, 4), (3, 1)]);
    assert_eq!(world.stored_cart().await, Some(store.cart()));
}

#[rstest]
#[tokio::test]
async fn it_should_reject_an_add_beyond_the_stock() {
    let world = World::seeded(&cart_of(&[(1, 2)]));
    let store = world.open().await;
    store.add_product(1).await;
    assert_eq!(amounts(&store.cart()), vec![(1, 2)]);
    assert_eq!(world.notifier.messages(), vec![OUT_OF_STOCK_MESSAGE]);
}

#[rstest]
#[tokio::test]
async fn it_should_report_a_generic_failure_when_the_inventory_is_down(world: World) {
    let store = world.open().await;
    world.inventory.toggle_offline();
    store.add_product(2).await;
    assert!(store.cart().is_empty());
    assert_eq!(world.stored_cart().await, None);
    assert_eq!(world.notifier.messages(), vec![ADD_PRODUCT_FAILED_MESSAGE]);
}

#[rstest]
#[tokio::test]
async fn it_should_report_a_generic_failure_when_the_catalog_misses_the_product(world: World) {
    // product 6 has stock but no catalog entry
    let store = world.open().await;
    store.add_product(6).await;
    assert!(store.cart().is_empty());
    assert_eq!(world.notifier.messages(), vec![ADD_PRODUCT_FAILED_MESSAGE]);
}

#[rstest]
#[tokio::test]
async fn it_should_remove_only_the_requested_entry() {
    let world = World::seeded(&cart_of(&[(1, 1), (2, 2), (3, 3)]));
    let store = world.open().await;
    store.remove_product(2).await;
    assert_eq!(amounts(&store.cart()), vec![(1, 1), (3, 3)]);
    assert_eq!(world.stored_cart().await, Some(store.cart()));
}

#[rstest]
#[tokio::test]
async fn it_should_notify_again_when_removing_twice() {
    let world = World::seeded(&cart_of(&[(1, 1), (2, 2)]));
    let store = world.open().await;
    store.remove_product(1).await;
    store.remove_product(1).await;
    assert_eq!(amounts(&store.cart()), vec![(2, 2)]);
    assert_eq!(world.notifier.messages(), vec![REMOVE_PRODUCT_FAILED_MESSAGE]);
}

#[rstest]
#[case(0)]
#[case(-1)]
#[tokio::test]
async fn it_should_refuse_non_positive_amounts(#[case] amount: i64) {
    let world = World::seeded(&cart_of(&[(2, 2)]));
    let store = world.open().await;
    store
        .update_product_amount(UpdateProductAmount {
            product_id: 2,
            amount,
        })
        .await;
    assert_eq!(amounts(&store.cart()), vec![(2, 2)]);
    assert_eq!(
        world.notifier.messages(),
        vec![UPDATE_PRODUCT_AMOUNT_FAILED_MESSAGE]
    );
    assert_eq!(world.inventory.stock_requests(), 0);
}

#[rstest]
#[tokio::test]
async fn it_should_set_the_requested_amount() {
    let world = World::seeded(&cart_of(&[(2, 1), (3, 1)]));
    let store = world.open().await;
    store
        .update_product_amount(UpdateProductAmount {
            product_id: 2,
            amount: 10,
        })
        .await;
    assert_eq!(amounts(&store.cart()), vec![(2, 10), (3, 1)]);
    assert_eq!(world.stored_cart().await, Some(store.cart()));
    assert!(world.notifier.messages().is_empty());
}

#[rstest]
#[tokio::test]
async fn it_should_reject_an_update_beyond_the_stock() {
    let world = World::seeded(&cart_of(&[(1, 1)]));
    let store = world.open().await;
    store
        .update_product_amount(UpdateProductAmount {
            product_id: 1,
            amount: 3,
        })
        .await;
    assert_eq!(amounts(&store.cart()), vec![(1, 1)]);
    assert_eq!(world.notifier.messages(), vec![OUT_OF_STOCK_MESSAGE]);
}

#[rstest]
#[tokio::test]
async fn it_should_report_a_generic_failure_when_the_stock_lookup_fails() {
    let world = World::seeded(&cart_of(&[(4, 1)]));
    let store = world.open().await;
    store
        .update_product_amount(UpdateProductAmount {
            product_id: 4,
            amount: 2,
        })
        .await;
    assert_eq!(amounts(&store.cart()), vec![(4, 1)]);
    assert_eq!(
        world.notifier.messages(),
        vec![UPDATE_PRODUCT_AMOUNT_FAILED_MESSAGE]
    );
}

#[rstest]
#[tokio::test]
async fn it_should_fetch_the_stock_for_every_validating_operation(world: World) {
    let store = world.open().await;
    store.add_product(2).await;
    store.add_product(2).await;
    store
        .update_product_amount(UpdateProductAmount {
            product_id: 2,
            amount: 5,
        })
        .await;
    store.remove_product(2).await;
    assert_eq!(world.inventory.stock_requests(), 3);
}

#[rstest]
#[tokio::test]
async fn it_should_restore_the_same_cart_after_reopening(world: World) {
    let store = world.open().await;
    store.add_product(3).await;
    store.add_product(1).await;
    store.add_product(2).await;
    store.add_product(3).await;
    let before = store.cart();
    drop(store);

    let reopened = world.open().await;
    assert_eq!(reopened.cart(), before);
    assert_eq!(amounts(&before), vec![(3, 2), (1, 1), (2, 1)]);
}

#[rstest]
#[tokio::test]
async fn it_should_keep_the_in_memory_cart_when_persisting_fails(world: World) {
    let store = world.open().await;
    world.store.toggle_offline();
    store.add_product(2).await;
    assert_eq!(amounts(&store.cart()), vec![(2, 1)]);
    assert!(world.notifier.messages().is_empty());
}

#[rstest]
#[tokio::test]
async fn it_should_not_lose_concurrent_adds_of_the_same_product(world: World) {
    world.inventory.set_delay_ms(20);
    let store = world.open().await;
    let other = store.clone();
    join!(store.add_product(2), other.add_product(2));
    assert_eq!(amounts(&store.cart()), vec![(2, 2)]);
    assert_eq!(world.stored_cart().await, Some(store.cart()));
}

#[rstest]
#[tokio::test]
async fn it_should_publish_changes_to_subscribers(world: World) {
    let store = world.open().await;
    let mut changes = store.subscribe();
    store.add_product(3).await;
    assert!(changes.has_changed().unwrap());
    assert_eq!(amounts(&changes.borrow_and_update()), vec![(3, 1)]);

    store.remove_product(9).await;
    assert!(!changes.has_changed().unwrap());
}

#[rstest]
#[tokio::test]
async fn it_should_see_stock_changes_between_operations() {
    let world = World::seeded(&cart_of(&[(1, 2)]));
    let store = world.open().await;
    store.add_product(1).await;
    assert_eq!(world.notifier.messages(), vec![OUT_OF_STOCK_MESSAGE]);

    world.inventory.set_stock(1, 5).await;
    store.add_product(1).await;
    assert_eq!(amounts(&store.cart()), vec![(1, 3)]);
}

#[rstest]
#[tokio::test]
async fn it_should_keep_concurrent_adds_of_different_products(world: World) {
    world.inventory.set_delay_ms(20);
    let store = world.open().await;
    let other = store.clone();
    join!(store.add_product(2), other.add_product(3));

    let mut added = amounts(&store.cart());
    added.sort();
    assert_eq!(added, vec![(2, 1), (3, 1)]);
    assert_eq!(world.stored_cart().await, Some(store.cart()));
}

#[rstest]
#[tokio::test]
async fn it_should_apply_commands_for_one_product_in_call_order(world: World) {
    world.inventory.set_delay_ms(20);
    let store = world.open().await;
    let other = store.clone();
    join!(store.add_product(2), other.remove_product(2));

    assert!(store.cart().is_empty());
    assert!(world.notifier.messages().is_empty());
    assert_eq!(world.stored_cart().await, Some(Cart::new()));
}

#[rstest]
#[tokio::test]
async fn it_should_remove_a_product_while_another_one_waits_for_stock() {
    let world = World::seeded(&cart_of(&[(2, 1)]));
    world.inventory.set_delay_ms(300);
    let store = world.open().await;

    let adding = tokio::spawn({
        let store = store.clone();
        async move { store.add_product(3).await }
    });
    sleep(Duration::from_millis(20)).await;

    let removed = timeout(Duration::from_millis(100), store.remove_product(2)).await;
    assert!(removed.is_ok());
    assert!(!adding.is_finished());
    assert!(store.cart().is_empty());

    adding.await.unwrap();
    assert_eq!(amounts(&store.cart()), vec![(3, 1)]);
    assert_eq!(world.stored_cart().await, Some(store.cart()));
}

#[rstest]
#[tokio::test]
async fn it_should_keep_saving_after_finding_a_corrupt_store_file(world: World) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.json");
    std::fs::write(&path, "{ corrupt").unwrap();

    let store = world.open_on_file(&path).await;
    assert!(store.cart().is_empty());
    store.add_product(2).await;
    drop(store);

    let reopened = world.open_on_file(&path).await;
    assert_eq!(amounts(&reopened.cart()), vec![(2, 1)]);
    assert!(world.notifier.messages().is_empty());
}
