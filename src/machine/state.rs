use crate::Won;
use crate::model::{MachineStatus, ProductId};

/// A product slot with its price and remaining stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Won,
    pub stock: u32,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: i64, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: Won::new(price),
            stock,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Take one unit out of stock. Stock never goes below zero.
    pub fn dispense_one(&mut self) {
        self.stock = self.stock.saturating_sub(1);
    }
}

/// The catalog a freshly started machine is loaded with.
pub fn default_products() -> Vec<Product> {
    vec![
        Product::new("cola", "Cola", 1100, 5),
        Product::new("water", "Water", 600, 10),
        Product::new("coffee", "Coffee", 700, 3),
    ]
}

/// Everything observers get to see after a committed transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub status: MachineStatus,
    pub products: Vec<Product>,
}
