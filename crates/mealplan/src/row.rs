use bistro_shared::customer::CustomerProfile;
use bistro_shared::mealplan::{Day, Daytime};

use crate::{Catalog, ConstraintViolation, Slot, SlotGrid, has_allergen_conflict};

/// Persisted form of one assignment. The item type is not stored; it is
/// always read back from the referenced menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRow {
    pub plan_id: String,
    pub menu_item_id: String,
    pub day: Day,
    pub daytime: Daytime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadIssue {
    UnknownItem {
        menu_item_id: String,
        day: Day,
        daytime: Daytime,
    },
    Rejected {
        slot: Slot,
        menu_item_id: String,
        reason: ConstraintViolation,
    },
    SlotTaken {
        slot: Slot,
        menu_item_id: String,
        kept: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Loaded {
    pub grid: SlotGrid,
    pub issues: Vec<LoadIssue>,
}

pub fn to_rows(plan_id: &str, grid: &SlotGrid) -> Vec<PlanRow> {
    grid.iter()
        .map(|(slot, id)| PlanRow {
            plan_id: plan_id.to_owned(),
            menu_item_id: id.to_owned(),
            day: slot.day,
            daytime: slot.time,
        })
        .collect()
}

/// Rebuilds a grid keyed by `(day, daytime, item type of the referenced item)`.
///
/// Rows whose item now conflicts with the customer's allergens or is no longer
/// offered at that day and time are skipped. Budget is left to the auditor.
pub fn from_rows(
    rows: impl IntoIterator<Item = PlanRow>,
    catalog: &Catalog,
    customer: &CustomerProfile,
) -> Loaded {
    let mut loaded = Loaded::default();

    for row in rows {
        let Some(item) = catalog.get(&row.menu_item_id) else {
            tracing::warn!(menu_item_id = %row.menu_item_id, plan_id = %row.plan_id, "unknown menu item in plan");
            loaded.issues.push(LoadIssue::UnknownItem {
                menu_item_id: row.menu_item_id,
                day: row.day,
                daytime: row.daytime,
            });
            continue;
        };

        let slot = Slot::new(row.day, row.daytime, item.item_type);
        let rejected = if has_allergen_conflict(item, &customer.allergens) {
            Some(ConstraintViolation::Allergen)
        } else if !item.is_available_at(slot.day, slot.time) {
            Some(ConstraintViolation::Unavailable {
                day: slot.day,
                time: slot.time,
            })
        } else {
            None
        };

        if let Some(reason) = rejected {
            tracing::warn!(?slot, menu_item_id = %row.menu_item_id, %reason, "stored row breaks a plan rule");
            loaded.issues.push(LoadIssue::Rejected {
                slot,
                menu_item_id: row.menu_item_id,
                reason,
            });
            continue;
        }

        if let Some(kept) = loaded.grid.get(slot) {
            tracing::warn!(?slot, menu_item_id = %row.menu_item_id, "slot already taken in plan");
            loaded.issues.push(LoadIssue::SlotTaken {
                slot,
                menu_item_id: row.menu_item_id,
                kept: kept.to_owned(),
            });
            continue;
        }

        loaded.grid.insert_unchecked(slot, row.menu_item_id);
    }

    loaded
}
