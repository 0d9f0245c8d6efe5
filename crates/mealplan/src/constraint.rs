use std::collections::BTreeSet;

use bistro_shared::customer::{BudgetCeilings, CustomerProfile};
use bistro_shared::mealplan::{Day, Daytime};
use bistro_shared::menu::{ItemType, MenuItem, normalize_allergen};

use crate::Slot;

/// Why an item was refused for a slot. Recovered where it happens, never fatal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConstraintViolation {
    #[error("contains allergens that conflict with customer allergies")]
    Allergen,

    #[error("exceeds the maximum {item_type} budget of ${ceiling:.2}")]
    Budget { item_type: ItemType, ceiling: f64 },

    #[error("is a {actual}, not a {expected}")]
    WrongType {
        expected: ItemType,
        actual: ItemType,
    },

    #[error("is not available on {day} {time}")]
    Unavailable { day: Day, time: Daytime },

    #[error("menu item {0} not found")]
    UnknownItem(String),
}

/// True iff any of the item's allergen tags is one of the customer's.
pub fn has_allergen_conflict(item: &MenuItem, customer_allergens: &BTreeSet<String>) -> bool {
    if item.allergens.is_empty() || customer_allergens.is_empty() {
        return false;
    }

    let restricted = customer_allergens
        .iter()
        .map(normalize_allergen)
        .collect::<BTreeSet<_>>();

    item.allergens
        .iter()
        .any(|tag| restricted.contains(&normalize_allergen(tag)))
}

/// Per-item ceiling check. Weekly and daily totals are never compared here.
pub fn exceeds_budget(item: &MenuItem, budgets: &BudgetCeilings) -> bool {
    item.price > budgets.ceiling(item.item_type)
}

/// Runs every hard rule for placing `item` into `slot`.
///
/// Allergens are checked before price so a conflicting item is always
/// reported as such, whatever it costs.
pub fn check(
    item: &MenuItem,
    slot: Slot,
    customer: &CustomerProfile,
) -> Result<(), ConstraintViolation> {
    if has_allergen_conflict(item, &customer.allergens) {
        return Err(ConstraintViolation::Allergen);
    }

    if exceeds_budget(item, &customer.budgets) {
        return Err(ConstraintViolation::Budget {
            item_type: item.item_type,
            ceiling: customer.budgets.ceiling(item.item_type),
        });
    }

    if item.item_type != slot.item_type {
        return Err(ConstraintViolation::WrongType {
            expected: slot.item_type,
            actual: item.item_type,
        });
    }

    if !item.is_available_at(slot.day, slot.time) {
        return Err(ConstraintViolation::Unavailable {
            day: slot.day,
            time: slot.time,
        });
    }

    Ok(())
}
