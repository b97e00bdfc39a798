use serde::Serialize;

/// One detected price change. Produced and consumed within a single run,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceChange {
    pub name: String,
    pub old_price: f64,
    pub new_price: f64,
    pub currency: String,
    pub url: String,
}

impl PriceChange {
    /// One-line rendering used by notification bodies.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} -> {} {}",
            self.name, self.old_price, self.new_price, self.currency
        )
    }
}
