use crate::cart::item::CartItem;
use crate::cart::mvi::UiState;

/// Ordered cart contents. At most one line per product id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartState {
    pub items: Vec<CartItem>,
}

impl UiState for CartState {}

impl CartState {
    pub fn find(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line quantities (badge count).
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// First id that appears more than once, if any.
    pub fn duplicate_id(&self) -> Option<&str> {
        self.items.iter().enumerate().find_map(|(idx, item)| {
            self.items[..idx]
                .iter()
                .any(|earlier| earlier.id == item.id)
                .then_some(item.id.as_str())
        })
    }
}
