use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::menu::ItemType;

/// Maximum price of a single item per category. Not a cumulative cap.
#[derive(Validate, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct BudgetCeilings {
    #[validate(range(min = 0.0), custom(function = "crate::menu::validate_amount"))]
    pub meal: f64,
    #[validate(range(min = 0.0), custom(function = "crate::menu::validate_amount"))]
    pub snack: f64,
    #[validate(range(min = 0.0), custom(function = "crate::menu::validate_amount"))]
    pub drink: f64,
}

impl BudgetCeilings {
    pub fn ceiling(&self, item_type: ItemType) -> f64 {
        match item_type {
            ItemType::Meal => self.meal,
            ItemType::Snack => self.snack,
            ItemType::Drink => self.drink,
        }
    }
}

#[derive(Validate, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CustomerProfile {
    pub id: String,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[serde(default)]
    pub allergens: BTreeSet<String>,
    #[validate(nested)]
    pub budgets: BudgetCeilings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_per_type() {
        let budgets = BudgetCeilings {
            meal: 15.0,
            snack: 5.0,
            drink: 3.5,
        };

        assert_eq!(budgets.ceiling(ItemType::Meal), 15.0);
        assert_eq!(budgets.ceiling(ItemType::Snack), 5.0);
        assert_eq!(budgets.ceiling(ItemType::Drink), 3.5);
    }

    #[test]
    fn test_negative_budget_rejected() {
        let customer = CustomerProfile {
            id: "c1".to_owned(),
            name: "Ada".to_owned(),
            allergens: BTreeSet::new(),
            budgets: BudgetCeilings {
                meal: 15.0,
                snack: -1.0,
                drink: 2.0,
            },
        };

        assert!(customer.validate().is_err());
    }

    #[test]
    fn test_non_finite_budget_rejected() {
        let finite = BudgetCeilings {
            meal: 15.0,
            snack: 5.0,
            drink: 2.0,
        };
        assert!(finite.validate().is_ok());

        for budgets in [
            BudgetCeilings {
                meal: f64::NAN,
                ..finite
            },
            BudgetCeilings {
                snack: f64::INFINITY,
                ..finite
            },
            BudgetCeilings {
                drink: f64::NAN,
                ..finite
            },
        ] {
            assert!(budgets.validate().is_err());
        }
    }
}
