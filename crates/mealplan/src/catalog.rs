use std::collections::HashMap;

use bistro_shared::mealplan::{Day, Daytime};
use bistro_shared::menu::{ItemType, MenuItem};

use crate::Slot;

/// Read-only view over the menu for one planning session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
    index: HashMap<String, usize>,
}

/// The catalog split by item type. The three groups are disjoint.
#[derive(Debug, Default)]
pub struct Grouped<'a> {
    pub meals: Vec<&'a MenuItem>,
    pub snacks: Vec<&'a MenuItem>,
    pub drinks: Vec<&'a MenuItem>,
}

impl<'a> Grouped<'a> {
    pub fn get(&self, item_type: ItemType) -> &[&'a MenuItem] {
        match item_type {
            ItemType::Meal => &self.meals,
            ItemType::Snack => &self.snacks,
            ItemType::Drink => &self.drinks,
        }
    }
}

impl Catalog {
    pub fn new(items: impl IntoIterator<Item = MenuItem>) -> Self {
        let mut catalog = Self::default();

        for item in items {
            if catalog.index.contains_key(&item.id) {
                tracing::warn!(id = %item.id, "duplicate menu item ignored");
                continue;
            }

            catalog.index.insert(item.id.to_owned(), catalog.items.len());
            catalog.items.push(item);
        }

        catalog
    }

    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.index.get(id).map(|i| &self.items[*i])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn of_type(&self, item_type: ItemType) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(move |i| i.item_type == item_type)
    }

    pub fn grouped(&self) -> Grouped<'_> {
        let mut grouped = Grouped::default();

        for item in &self.items {
            match item.item_type {
                ItemType::Meal => grouped.meals.push(item),
                ItemType::Snack => grouped.snacks.push(item),
                ItemType::Drink => grouped.drinks.push(item),
            }
        }

        grouped
    }

    pub fn available_at(&self, day: Day, time: Daytime) -> Vec<&MenuItem> {
        available_at(&self.items, day, time)
    }

    /// Items of the slot's type offered at the slot's day and time.
    pub fn available_for(&self, slot: Slot) -> Vec<&MenuItem> {
        available_at(self.of_type(slot.item_type), slot.day, slot.time)
    }
}

pub fn available_at<'a>(
    items: impl IntoIterator<Item = &'a MenuItem>,
    day: Day,
    time: Daytime,
) -> Vec<&'a MenuItem> {
    items
        .into_iter()
        .filter(|item| item.is_available_at(day, time))
        .collect()
}
