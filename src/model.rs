//! Core domain types for the vending machine.

use crate::Won;
use crate::change::{ChangeBreakdown, Denomination};

/// Product identifier, e.g. `"cola"`.
pub type ProductId = String;

/// A user input to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Reserve a product for purchase.
    SelectProduct(ProductId),
    /// Feed one bill or coin into the machine.
    InsertCash(Denomination),
    /// Pay the reserved product by card.
    PayByCard,
    /// Collect the item from the dispense tray.
    TakeItem,
    /// Collect the change from the dispense tray.
    TakeChange,
    /// Abandon the current order, refunding inserted cash.
    CancelOrder,
    /// Leave the error screen, restoring the status before the fault.
    ResetFromError,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SelectProduct(_) => "select_product",
            Action::InsertCash(_) => "insert_cash",
            Action::PayByCard => "pay_by_card",
            Action::TakeItem => "take_item",
            Action::TakeChange => "take_change",
            Action::CancelOrder => "cancel_order",
            Action::ResetFromError => "reset_from_error",
        }
    }
}

/// Where the machine is in the purchase lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MachineStatus {
    /// No active transaction.
    #[default]
    Idle,
    /// A product is reserved and cash or card payment is expected.
    AwaitingPayment {
        product_id: ProductId,
        inserted_amount: Won,
    },
    /// Waiting for the user to collect what is on the tray.
    ///
    /// `product_id` is `None` for a refund of a cancelled cash order.
    Dispensing {
        product_id: Option<ProductId>,
        change: ChangeBreakdown,
        item_taken: bool,
        change_taken: bool,
    },
    /// A recoverable fault. `change` is money owed back to the user.
    Error {
        message: String,
        previous_status: Box<MachineStatus>,
        change: Option<ChangeBreakdown>,
    },
}

impl MachineStatus {
    pub fn name(&self) -> &'static str {
        match self {
            MachineStatus::Idle => "idle",
            MachineStatus::AwaitingPayment { .. } => "awaiting-payment",
            MachineStatus::Dispensing { .. } => "dispensing",
            MachineStatus::Error { .. } => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, MachineStatus::Error { .. })
    }

    /// Build an `Error` status that recovers to `previous`.
    ///
    /// Errors never nest: faulting from an `Error` keeps its recovery target.
    pub fn fault(
        previous: MachineStatus,
        message: impl Into<String>,
        change: Option<ChangeBreakdown>,
    ) -> MachineStatus {
        let previous = match previous {
            MachineStatus::Error {
                previous_status, ..
            } => *previous_status,
            other => other,
        };
        MachineStatus::Error {
            message: message.into(),
            previous_status: Box::new(previous),
            change,
        }
    }
}
