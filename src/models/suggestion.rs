use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Urgency band for a reorder suggestion.
///
/// Declaration order backs the ranking in `suggest_all`: sorting ascending
/// puts CRITICAL before HIGH before MEDIUM before LOW.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

/// Reorder recommendation for a single medicine.
///
/// Constructed fresh per call and never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderSuggestion {
    pub medicine_id: Uuid,
    pub medicine_name: String,
    pub current_stock: i32,
    /// Average units sold per day over the lookback window, rounded to two
    /// decimals for display. Classification and quantity math use the
    /// unrounded value.
    pub daily_average: f64,
    pub suggested_order_qty: u32,
    pub priority: Priority,
    pub reorder_level: i32,
    /// Days until stock-out at the observed rate, capped at 999 when the
    /// window shows no demand. Within a priority band, batch output ranks
    /// by this field ascending.
    pub days_of_cover: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_orders_most_severe_first() {
        let mut bands = vec![Priority::Low, Priority::Critical, Priority::Medium, Priority::High];
        bands.sort();
        assert_eq!(
            bands,
            vec![Priority::Critical, Priority::High, Priority::Medium, Priority::Low]
        );
    }

    #[test]
    fn priority_round_trips_through_uppercase_labels() {
        assert_eq!(Priority::Critical.to_string(), "CRITICAL");
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        let json = serde_json::to_string(&Priority::Medium).unwrap();
        assert_eq!(json, "\"MEDIUM\"");
    }
}
