pub mod change;
pub mod csv;
pub mod machine;
pub mod model;
pub mod money;

pub use change::{ChangeBreakdown, Denomination, DenominationKind};
pub use machine::{Machine, MachineConfig, MachineError, Product, Snapshot};
pub use model::{Action, MachineStatus, ProductId};
pub use money::Won;
