// Shared cart handle for UI consumers.
//
// Every product gets its own lane: a worker task that applies the commands for
// that product one at a time, in the order they were issued. Lanes run side by
// side, so a stalled inventory call only holds up its own product. Results are
// committed one by one against the latest cart, touching only the lane's entry,
// then persisted and published. Handles only hold channel ends and are cheap to
// clone.

use crate::modules::cart::adapters::outbound::cart_repository::CartRepository;
use crate::modules::cart::adapters::outbound::inventory::{ProductCatalog, StockService};
use crate::modules::cart::core::cart::Cart;
use crate::modules::cart::use_cases::add_product::command::AddProduct;
use crate::modules::cart::use_cases::add_product::handler::AddProductHandler;
use crate::modules::cart::use_cases::errors::{CartError, CartOperation};
use crate::modules::cart::use_cases::remove_product::command::RemoveProduct;
use crate::modules::cart::use_cases::remove_product::handler::RemoveProductHandler;
use crate::modules::cart::use_cases::update_product_amount::command::UpdateProductAmount;
use crate::modules::cart::use_cases::update_product_amount::handler::UpdateProductAmountHandler;
use crate::shared::core::primitives::ProductId;
use crate::shared::infrastructure::key_value_store::PersistedStore;
use crate::shared::infrastructure::notifier::Notifier;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, warn};

#[derive(Debug)]
enum CartCommand {
    AddProduct(AddProduct),
    RemoveProduct(RemoveProduct),
    UpdateProductAmount(UpdateProductAmount),
}

impl CartCommand {
    fn product_id(&self) -> ProductId {
        match self {
            Self::AddProduct(command) => command.product_id,
            Self::RemoveProduct(command) => command.product_id,
            Self::UpdateProductAmount(command) => command.product_id,
        }
    }
}

struct Envelope {
    command: CartCommand,
    done: oneshot::Sender<()>,
}

type LaneSender = mpsc::UnboundedSender<Envelope>;
type OpenLane = dyn Fn(ProductId) -> LaneSender + Send + Sync;

#[derive(Clone)]
pub struct CartStore {
    lanes: Arc<Mutex<HashMap<ProductId, LaneSender>>>,
    open_lane: Arc<OpenLane>,
    state: watch::Receiver<Cart>,
}

impl CartStore {
    /// Restores the cart from `store` under `storage_key`. Lane workers are
    /// spawned on the current tokio runtime as products get touched.
    pub async fn open<TStock, TCatalog, TStore>(
        stock: Arc<TStock>,
        catalog: Arc<TCatalog>,
        store: Arc<TStore>,
        storage_key: impl Into<String>,
        notifier: Arc<dyn Notifier>,
    ) -> Self
    where
        TStock: StockService + 'static,
        TCatalog: ProductCatalog + 'static,
        TStore: PersistedStore + 'static,
    {
        let repository = CartRepository::new(store, storage_key);
        let cart = repository.load().await;
        debug!(key = repository.key(), entries = cart.len(), "cart store opened");

        let (state_tx, state_rx) = watch::channel(cart);
        let worker = Arc::new(CartWorker {
            add: AddProductHandler::new(stock.clone(), catalog),
            remove: RemoveProductHandler::new(),
            update: UpdateProductAmountHandler::new(stock),
            repository,
            notifier,
            state: state_tx,
            commit: tokio::sync::Mutex::new(()),
        });

        let open_lane = move |product_id: ProductId| {
            let (lane_tx, lane_rx) = mpsc::unbounded_channel();
            tokio::spawn(worker.clone().run_lane(product_id, lane_rx));
            lane_tx
        };

        Self {
            lanes: Arc::new(Mutex::new(HashMap::new())),
            open_lane: Arc::new(open_lane),
            state: state_rx,
        }
    }

    /// Snapshot of the current cart.
    pub fn cart(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Receiver that is marked changed after every successful mutation.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.clone()
    }

    pub async fn add_product(&self, product_id: ProductId) {
        self.dispatch(CartCommand::AddProduct(AddProduct { product_id }))
            .await;
    }

    pub async fn remove_product(&self, product_id: ProductId) {
        self.dispatch(CartCommand::RemoveProduct(RemoveProduct { product_id }))
            .await;
    }

    pub async fn update_product_amount(&self, command: UpdateProductAmount) {
        self.dispatch(CartCommand::UpdateProductAmount(command))
            .await;
    }

    async fn dispatch(&self, command: CartCommand) {
        let (done, completed) = oneshot::channel();
        let lane = self.lane(command.product_id());
        if let Err(err) = lane.send(Envelope { command, done }) {
            error!(command = ?err.0.command, "cart lane is gone, command dropped");
            return;
        }
        if completed.await.is_err() {
            warn!("cart lane stopped before completing the command");
        }
    }

    fn lane(&self, product_id: ProductId) -> LaneSender {
        let mut lanes = self.lanes.lock().unwrap_or_else(PoisonError::into_inner);
        lanes
            .entry(product_id)
            .or_insert_with(|| (self.open_lane)(product_id))
            .clone()
    }
}

struct CartWorker<TStock, TCatalog, TStore>
where
    TStock: StockService + 'static,
    TCatalog: ProductCatalog + 'static,
    TStore: PersistedStore + 'static,
{
    add: AddProductHandler<TStock, TCatalog>,
    remove: RemoveProductHandler,
    update: UpdateProductAmountHandler<TStock>,
    repository: CartRepository<TStore>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<Cart>,
    commit: tokio::sync::Mutex<()>,
}

impl<TStock, TCatalog, TStore> CartWorker<TStock, TCatalog, TStore>
where
    TStock: StockService + 'static,
    TCatalog: ProductCatalog + 'static,
    TStore: PersistedStore + 'static,
{
    async fn run_lane(
        self: Arc<Self>,
        product_id: ProductId,
        mut commands: mpsc::UnboundedReceiver<Envelope>,
    ) {
        while let Some(Envelope { command, done }) = commands.recv().await {
            self.apply(product_id, command).await;
            // the caller may have stopped waiting
            let _ = done.send(());
        }
        debug!(product_id, "cart lane stopped");
    }

    async fn apply(&self, product_id: ProductId, command: CartCommand) {
        // other lanes never touch this product's entry, so the snapshot stays
        // accurate for it until the commit below
        let snapshot = self.state.borrow().clone();
        let (operation, result) = match command {
            CartCommand::AddProduct(command) => (
                CartOperation::AddProduct,
                self.add.handle(&snapshot, command).await,
            ),
            CartCommand::RemoveProduct(command) => (
                CartOperation::RemoveProduct,
                self.remove.handle(&snapshot, command),
            ),
            CartCommand::UpdateProductAmount(command) => (
                CartOperation::UpdateProductAmount,
                self.update.handle(&snapshot, command).await,
            ),
        };

        match result {
            Ok(proposed) => self.commit(product_id, &proposed).await,
            Err(err) => {
                match &err {
                    CartError::Rejected(reason) => {
                        warn!(%operation, %reason, "cart operation rejected");
                    }
                    CartError::Inventory(cause) => {
                        error!(%operation, error = %cause, "cart operation failed");
                    }
                }
                self.notifier.error(err.user_message(operation));
            }
        }
    }

    async fn commit(&self, product_id: ProductId, proposed: &Cart) {
        let _guard = self.commit.lock().await;
        let next = self.state.borrow().with_entry_from(product_id, proposed);
        self.repository.persist(&next).await;
        self.state.send_replace(next);
    }
}
