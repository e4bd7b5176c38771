use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Current inventory snapshot for one medicine.
///
/// Supplied fresh by the inventory store on each call; the engine keeps no
/// persistent copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StockState {
    pub medicine_id: Uuid,
    pub medicine_name: String,

    #[validate(range(min = 0))]
    pub current_stock: i32,

    #[validate(range(min = 0))]
    pub reorder_level: i32,
}

impl StockState {
    pub fn new(
        medicine_id: Uuid,
        medicine_name: impl Into<String>,
        current_stock: i32,
        reorder_level: i32,
    ) -> Self {
        Self {
            medicine_id,
            medicine_name: medicine_name.into(),
            current_stock,
            reorder_level,
        }
    }

    /// At or below the configured reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.reorder_level
    }
}
