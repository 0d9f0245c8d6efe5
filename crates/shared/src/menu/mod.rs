use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

use crate::mealplan::{Day, Daytime};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Meal,
    Snack,
    Drink,
}

/// A catalog entry. Immutable for the duration of a planning session.
#[derive(Validate, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub id: String,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(range(min = 0.0), custom(function = "validate_amount"))]
    pub price: f64,
    #[serde(default)]
    pub allergens: BTreeSet<String>,
    pub item_type: ItemType,
    #[serde(default)]
    pub available_days: BTreeSet<Day>,
    #[serde(default)]
    pub available_times: BTreeSet<Daytime>,
}

impl MenuItem {
    /// An item with an empty day or time set is available nowhere.
    pub fn is_available_at(&self, day: Day, time: Daytime) -> bool {
        self.available_days.contains(&day) && self.available_times.contains(&time)
    }
}

/// Prices and budget ceilings must be finite. `range` lets NaN through.
pub fn validate_amount(value: f64) -> Result<(), validator::ValidationError> {
    if !value.is_finite() {
        return Err(validator::ValidationError::new("amount_not_finite")
            .with_message("Amount must be a finite number".into()));
    }

    Ok(())
}

/// Allergen tags are compared trimmed and lowercased.
pub fn normalize_allergen(tag: impl AsRef<str>) -> String {
    tag.as_ref().trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn item(price: f64) -> MenuItem {
        MenuItem {
            id: "01".to_owned(),
            name: "Lentil soup".to_owned(),
            price,
            allergens: BTreeSet::new(),
            item_type: ItemType::Meal,
            available_days: BTreeSet::from([Day::Monday, Day::Friday]),
            available_times: BTreeSet::from([Daytime::Evening]),
        }
    }

    #[test]
    fn test_item_type_lowercase_forms() {
        assert_eq!(ItemType::Snack.to_string(), "snack");
        assert_eq!(ItemType::from_str("drink").unwrap(), ItemType::Drink);
        assert!(ItemType::from_str("dessert").is_err());
    }

    #[test]
    fn test_available_at_requires_day_and_time() {
        let item = item(4.5);
        assert!(item.is_available_at(Day::Monday, Daytime::Evening));
        assert!(!item.is_available_at(Day::Monday, Daytime::Morning));
        assert!(!item.is_available_at(Day::Tuesday, Daytime::Evening));
    }

    #[test]
    fn test_empty_availability_is_nowhere() {
        let mut item = item(4.5);
        item.available_days.clear();

        for day in Day::VARIANTS {
            for time in Daytime::VARIANTS {
                assert!(!item.is_available_at(*day, *time));
            }
        }
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(item(0.0).validate().is_ok());
        assert!(item(-1.0).validate().is_err());
    }

    #[test]
    fn test_non_finite_price_rejected() {
        assert!(item(f64::NAN).validate().is_err());
        assert!(item(f64::INFINITY).validate().is_err());
        assert!(item(f64::NEG_INFINITY).validate().is_err());
    }

    #[test]
    fn test_normalize_allergen() {
        assert_eq!(normalize_allergen("  Nuts "), "nuts");
    }
}
