use std::collections::BTreeMap;

use bistro_shared::customer::CustomerProfile;
use bistro_shared::mealplan::{Day, Daytime};
use bistro_shared::menu::ItemType;
use strum::VariantArray;

use crate::{Catalog, ConstraintViolation};

pub const SLOT_COUNT: usize = 63;
pub const SLOTS_PER_TYPE: usize = 21;

/// One cell of the weekly grid.
///
/// Ordering is day, then time, then item type, which is also the order
/// the assignment algorithms walk the grid in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    pub day: Day,
    pub time: Daytime,
    pub item_type: ItemType,
}

impl Slot {
    pub fn new(day: Day, time: Daytime, item_type: ItemType) -> Self {
        Self {
            day,
            time,
            item_type,
        }
    }

    pub fn all() -> impl Iterator<Item = Slot> {
        Day::VARIANTS.iter().flat_map(|day| {
            Daytime::VARIANTS.iter().flat_map(move |time| {
                ItemType::VARIANTS
                    .iter()
                    .map(move |item_type| Slot::new(*day, *time, *item_type))
            })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillState {
    Empty,
    Partial,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeekTotal {
    pub amount: f64,
    pub count: usize,
}

/// Slot to menu item id. Absent keys are unassigned slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotGrid {
    slots: BTreeMap<Slot, String>,
}

impl SlotGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(|id| id.as_str())
    }

    pub fn is_assigned(&self, slot: Slot) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &str)> {
        self.slots.iter().map(|(slot, id)| (*slot, id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Validated assignment. On rejection the grid is left untouched.
    pub fn set(
        &mut self,
        slot: Slot,
        item_id: &str,
        catalog: &Catalog,
        customer: &CustomerProfile,
    ) -> Result<(), ConstraintViolation> {
        let Some(item) = catalog.get(item_id) else {
            return Err(ConstraintViolation::UnknownItem(item_id.to_owned()));
        };

        crate::check(item, slot, customer)?;
        self.slots.insert(slot, item.id.to_owned());

        Ok(())
    }

    /// Callers must have validated the item for this slot.
    pub(crate) fn insert_unchecked(
        &mut self,
        slot: Slot,
        item_id: impl Into<String>,
    ) -> Option<String> {
        self.slots.insert(slot, item_id.into())
    }

    pub fn clear(&mut self, slot: Slot) -> Option<String> {
        self.slots.remove(&slot)
    }

    pub fn clear_all(&mut self) {
        self.slots.clear();
    }

    pub fn fill_state(&self) -> FillState {
        match self.slots.len() {
            0 => FillState::Empty,
            SLOT_COUNT => FillState::Full,
            _ => FillState::Partial,
        }
    }

    /// Ids assigned on `day` for `item_type`, at most one per time of day.
    pub fn items_on(&self, day: Day, item_type: ItemType) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(move |(slot, _)| slot.day == day && slot.item_type == item_type)
            .map(|(_, id)| id)
    }

    pub fn count(&self, item_type: ItemType) -> usize {
        self.slots
            .keys()
            .filter(|slot| slot.item_type == item_type)
            .count()
    }

    pub fn day_total(&self, day: Day, item_type: ItemType, catalog: &Catalog) -> f64 {
        self.items_on(day, item_type)
            .filter_map(|id| catalog.get(id))
            .map(|item| item.price)
            .sum()
    }

    pub fn week_total(&self, item_type: ItemType, catalog: &Catalog) -> WeekTotal {
        self.iter()
            .filter(|(slot, _)| slot.item_type == item_type)
            .fold(WeekTotal::default(), |mut total, (_, id)| {
                if let Some(item) = catalog.get(id) {
                    total.amount += item.price;
                }
                total.count += 1;
                total
            })
    }
}
