use std::fmt;

use bistro_shared::customer::CustomerProfile;

use crate::{Catalog, Slot, SlotGrid};

/// A budget breach found on an occupied slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub item_id: String,
    pub item_name: String,
    pub slot: Slot,
    pub ceiling: f64,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}) exceeds {} budget of ${:.2}",
            self.item_name, self.slot.day, self.slot.time, self.slot.item_type, self.ceiling
        )
    }
}

/// Re-checks every occupied slot against the per-item ceilings, in slot order.
///
/// Allergens are enforced at assignment time and are not audited here.
pub fn audit(grid: &SlotGrid, catalog: &Catalog, customer: &CustomerProfile) -> Vec<Violation> {
    grid.iter()
        .filter_map(|(slot, id)| catalog.get(id).map(|item| (slot, item)))
        .filter(|(_, item)| crate::exceeds_budget(item, &customer.budgets))
        .map(|(slot, item)| Violation {
            item_id: item.id.to_owned(),
            item_name: item.name.to_owned(),
            slot,
            ceiling: customer.budgets.ceiling(item.item_type),
        })
        .collect()
}
