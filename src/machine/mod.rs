//! Vending machine transaction state machine.
//!
//! The machine owns the current [`MachineStatus`] and the product inventory.
//! Every action checks the status it is called in, computes the next status
//! and replaces the old one wholesale. Observers subscribed through
//! [`Machine::subscribe`] see a fresh [`Snapshot`] after each commit.

use tokio::sync::watch;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info, warn};

use crate::Won;
use crate::change::{self, ChangeBreakdown, Denomination};
use crate::model::{Action, MachineStatus};

mod config;
pub use config::MachineConfig;

mod error;
pub use error::MachineError;

mod random;
pub use random::{Randomness, Scripted, SeededRandom};

mod state;
pub use state::{Product, Snapshot, default_products};

const INVALID_PRODUCT: &str = "Invalid product selected.";
const CARD_DECLINED: &str = "Card declined. Please try again.";

/// The vending machine.
///
/// All mutating actions take `&mut self`, so two actions can never commit
/// against the same transaction at once. `pay_by_card` keeps that exclusive
/// borrow across its simulated gateway delay.
pub struct Machine {
    status: MachineStatus,
    products: Vec<Product>,
    config: MachineConfig,
    rng: Box<dyn Randomness>,
    observers: watch::Sender<Snapshot>,
}

/// Public API
impl Machine {
    /// A machine with the default catalog, default tunables and entropy-seeded randomness.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default(), SeededRandom::from_entropy())
    }

    pub fn with_config(config: MachineConfig, rng: impl Randomness + 'static) -> Self {
        let products = default_products();
        let (observers, _) = watch::channel(Snapshot {
            status: MachineStatus::Idle,
            products: products.clone(),
        });
        Self {
            status: MachineStatus::Idle,
            products,
            config,
            rng: Box::new(rng),
            observers,
        }
    }

    /// Replace the seeded catalog.
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self.publish();
        self
    }

    pub fn status(&self) -> &MachineStatus {
        &self.status
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status.clone(),
            products: self.products.clone(),
        }
    }

    /// Receive a new snapshot after every committed transition.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.observers.subscribe()
    }

    /// Run the machine over a stream of actions, one at a time.
    pub async fn run(&mut self, mut stream: impl Stream<Item = Action> + Unpin) {
        while let Some(action) = stream.next().await {
            // invalid transitions leave the machine untouched, keep going
            let _ = self.apply(action).await;
        }
    }

    /// Apply a single action on top of the current machine state.
    pub async fn apply(&mut self, action: Action) -> Result<(), MachineError> {
        let name = action.name();
        let result = match action {
            Action::SelectProduct(id) => self.select_product(&id),
            Action::InsertCash(denomination) => self.insert_cash(denomination),
            Action::PayByCard => self.pay_by_card().await,
            Action::TakeItem => self.take_item(),
            Action::TakeChange => self.take_change(),
            Action::CancelOrder => self.cancel_order(),
            Action::ResetFromError => self.reset_from_error(),
        };
        self.log_result(name, &result);
        result
    }

    /// Reserve a product. Valid from `Idle`.
    pub fn select_product(&mut self, product_id: &str) -> Result<(), MachineError> {
        if !matches!(self.status, MachineStatus::Idle) {
            return Err(self.invalid("select_product"));
        }

        let next = match self.product(product_id) {
            None => MachineStatus::fault(self.status.clone(), INVALID_PRODUCT, None),
            Some(product) if !product.in_stock() => MachineStatus::fault(
                self.status.clone(),
                format!("{} is out of stock.", product.name),
                None,
            ),
            Some(product) => MachineStatus::AwaitingPayment {
                product_id: product.id.clone(),
                inserted_amount: Won::ZERO,
            },
        };

        self.commit(next);
        Ok(())
    }

    /// Insert one bill or coin. Valid from `AwaitingPayment`.
    ///
    /// The inserted value may be misread, in which case the machine faults
    /// and owes the very same denomination back.
    pub fn insert_cash(&mut self, denomination: Denomination) -> Result<(), MachineError> {
        let MachineStatus::AwaitingPayment {
            product_id,
            inserted_amount,
        } = &self.status
        else {
            return Err(self.invalid("insert_cash"));
        };
        let product_id = product_id.clone();
        let inserted_amount = *inserted_amount;

        if self.rng.chance(self.config.misread_probability) {
            warn!(denomination = %denomination, "cash misread");
            let next = MachineStatus::fault(
                self.status.clone(),
                format!("Could not read the {denomination}. Please take it back."),
                Some(ChangeBreakdown::single(denomination)),
            );
            self.commit(next);
            return Ok(());
        }

        let total = inserted_amount + denomination.value;

        let Some(idx) = self.position(&product_id) else {
            let next = MachineStatus::fault(self.status.clone(), INVALID_PRODUCT, None);
            self.commit(next);
            return Ok(());
        };
        let product = &mut self.products[idx];

        let next = if total >= product.price {
            product.dispense_one();
            MachineStatus::Dispensing {
                change: change::decompose(total - product.price),
                product_id: Some(product_id),
                item_taken: false,
                change_taken: false,
            }
        } else {
            MachineStatus::AwaitingPayment {
                product_id,
                inserted_amount: total,
            }
        };

        self.commit(next);
        Ok(())
    }

    /// Pay the reserved product by card. Valid from `AwaitingPayment`.
    ///
    /// Resolves once the simulated gateway delay has elapsed and the payment
    /// was either approved or declined.
    pub async fn pay_by_card(&mut self) -> Result<(), MachineError> {
        let MachineStatus::AwaitingPayment { product_id, .. } = &self.status else {
            return Err(self.invalid("pay_by_card"));
        };
        let product_id = product_id.clone();

        info!(product = %product_id, "processing card payment");
        tokio::time::sleep(self.config.card_delay).await;

        if !self.rng.chance(self.config.card_approval_probability) {
            warn!(product = %product_id, "card payment declined");
            let next = MachineStatus::fault(self.status.clone(), CARD_DECLINED, None);
            self.commit(next);
            return Ok(());
        }

        let Some(idx) = self.position(&product_id) else {
            let next = MachineStatus::fault(self.status.clone(), INVALID_PRODUCT, None);
            self.commit(next);
            return Ok(());
        };
        self.products[idx].dispense_one();

        // nothing to collect but the item
        self.commit(MachineStatus::Dispensing {
            product_id: Some(product_id),
            change: ChangeBreakdown::empty(),
            item_taken: false,
            change_taken: true,
        });
        Ok(())
    }

    /// Collect the item from the tray. Valid from `Dispensing`.
    pub fn take_item(&mut self) -> Result<(), MachineError> {
        let MachineStatus::Dispensing {
            product_id,
            change,
            change_taken,
            ..
        } = &self.status
        else {
            return Err(self.invalid("take_item"));
        };

        let next = if change.is_empty() || *change_taken {
            MachineStatus::Idle
        } else {
            MachineStatus::Dispensing {
                product_id: product_id.clone(),
                change: change.clone(),
                item_taken: true,
                change_taken: *change_taken,
            }
        };

        self.commit(next);
        Ok(())
    }

    /// Collect the change from the tray. Valid from `Dispensing`.
    pub fn take_change(&mut self) -> Result<(), MachineError> {
        let MachineStatus::Dispensing {
            product_id,
            change,
            item_taken,
            ..
        } = &self.status
        else {
            return Err(self.invalid("take_change"));
        };

        // a refund has no item to wait for
        let next = if product_id.is_none() || *item_taken {
            MachineStatus::Idle
        } else {
            MachineStatus::Dispensing {
                product_id: product_id.clone(),
                change: change.clone(),
                item_taken: *item_taken,
                change_taken: true,
            }
        };

        self.commit(next);
        Ok(())
    }

    /// Abandon the order. Valid from `AwaitingPayment`.
    ///
    /// Inserted cash is refunded through the dispense tray.
    pub fn cancel_order(&mut self) -> Result<(), MachineError> {
        let MachineStatus::AwaitingPayment {
            inserted_amount, ..
        } = &self.status
        else {
            return Err(self.invalid("cancel_order"));
        };

        let next = if inserted_amount.is_positive() {
            MachineStatus::Dispensing {
                product_id: None,
                change: change::decompose(*inserted_amount),
                item_taken: false,
                change_taken: false,
            }
        } else {
            MachineStatus::Idle
        };

        self.commit(next);
        Ok(())
    }

    /// Go back to the status the machine was in before the fault. Valid from `Error`.
    pub fn reset_from_error(&mut self) -> Result<(), MachineError> {
        let MachineStatus::Error {
            previous_status, ..
        } = &self.status
        else {
            return Err(self.invalid("reset_from_error"));
        };

        let next = previous_status.as_ref().clone();
        self.commit(next);
        Ok(())
    }
}

/// Private API
impl Machine {
    /// Replace the status and notify observers
    fn commit(&mut self, next: MachineStatus) {
        debug!(from = self.status.name(), to = next.name(), "transition");
        self.status = next;
        self.publish();
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.products.iter().position(|p| p.id == product_id)
    }

    fn publish(&self) {
        self.observers.send_replace(self.snapshot());
    }

    /// Report an action called in the wrong status
    fn invalid(&self, action: &'static str) -> MachineError {
        let state = self.status.name();
        warn!(action, state, "action called in invalid state");
        MachineError::InvalidTransition { action, state }
    }

    /// Small helper to log `apply` results
    fn log_result(&self, action: &str, result: &Result<(), MachineError>) {
        match (result, &self.status) {
            (Ok(()), MachineStatus::Error { message, .. }) => {
                info!(
                    status = self.status.name(),
                    reason = %message,
                    "{action} faulted"
                );
            }
            (Ok(()), status) => {
                info!(status = status.name(), "{action} applied");
            }
            // already reported by `invalid`
            (Err(e), status) => {
                debug!(status = status.name(), reason = %e, "{action} skipped");
            }
        }
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
