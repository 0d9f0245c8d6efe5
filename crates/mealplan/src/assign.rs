use std::fmt;

use bistro_shared::customer::CustomerProfile;
use bistro_shared::menu::{ItemType, MenuItem};
use strum::VariantArray;

use crate::{Catalog, Chooser, ConstraintViolation, Slot, SlotGrid};

const PRICE_EPSILON: f64 = 1e-9;

/// Knobs that separate auto-generate from auto-fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Skip items already placed on the same day for the same item type.
    pub no_repeat_same_day: bool,
    /// Leave assigned slots alone.
    pub only_empty: bool,
}

impl SelectionPolicy {
    pub const GENERATE: Self = Self {
        no_repeat_same_day: true,
        only_empty: false,
    };

    pub const FILL: Self = Self {
        no_repeat_same_day: false,
        only_empty: true,
    };
}

/// Non-blocking notices produced by the assignment algorithms.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    UnfillableSlot(Slot),
    BudgetTightness {
        item_type: ItemType,
        week_total: f64,
        filled: usize,
        ceiling: f64,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnfillableSlot(slot) => write!(
                f,
                "no {} available for {} {}",
                slot.item_type, slot.day, slot.time
            ),
            Warning::BudgetTightness {
                item_type,
                week_total,
                filled,
                ceiling,
            } => write!(
                f,
                "{item_type} total of ${week_total:.2} over {filled} slots is above the ${ceiling:.2} per item budget"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub assigned: usize,
    pub warnings: Vec<Warning>,
}

impl Report {
    pub fn unfillable(&self) -> impl Iterator<Item = Slot> {
        self.warnings.iter().filter_map(|w| match w {
            Warning::UnfillableSlot(slot) => Some(*slot),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategorySummary {
    pub item_type: ItemType,
    pub total: f64,
    pub filled: usize,
    pub ceiling: f64,
}

/// Runs the assignment algorithms against a catalog and a customer.
///
/// Grids are taken by `&mut`, so one command runs to completion before the
/// next can touch the same grid.
pub struct Planner<'a> {
    catalog: &'a Catalog,
    customer: &'a CustomerProfile,
}

impl<'a> Planner<'a> {
    pub fn new(catalog: &'a Catalog, customer: &'a CustomerProfile) -> Self {
        Self { catalog, customer }
    }

    /// Valid items for `slot` under `policy`, in catalog order.
    pub fn candidates(
        &self,
        grid: &SlotGrid,
        slot: Slot,
        policy: SelectionPolicy,
    ) -> Vec<&'a MenuItem> {
        let used_today = if policy.no_repeat_same_day {
            grid.iter()
                .filter(|(other, _)| {
                    *other != slot && other.day == slot.day && other.item_type == slot.item_type
                })
                .map(|(_, id)| id.to_owned())
                .collect::<Vec<_>>()
        } else {
            vec![]
        };

        self.catalog
            .available_for(slot)
            .into_iter()
            .filter(|item| !crate::has_allergen_conflict(item, &self.customer.allergens))
            .filter(|item| !used_today.iter().any(|id| id == &item.id))
            .filter(|item| !crate::exceeds_budget(item, &self.customer.budgets))
            .collect()
    }

    /// Fills every slot from scratch. Slots without a candidate stay empty.
    pub fn generate(&self, grid: &mut SlotGrid, chooser: &mut dyn Chooser) -> Report {
        let mut fresh = SlotGrid::new();
        let mut report = self.run(&mut fresh, chooser, SelectionPolicy::GENERATE);
        *grid = fresh;

        report.warnings.extend(self.budget_warnings(grid));
        tracing::info!(
            assigned = report.assigned,
            warnings = report.warnings.len(),
            "meal plan generated"
        );

        report
    }

    pub fn regenerate(&self, grid: &mut SlotGrid, chooser: &mut dyn Chooser) -> Report {
        grid.clear_all();
        self.generate(grid, chooser)
    }

    /// Fills empty slots only, allowing same-day repeats.
    pub fn fill(&self, grid: &mut SlotGrid, chooser: &mut dyn Chooser) -> Report {
        let mut report = self.run(grid, chooser, SelectionPolicy::FILL);

        report.warnings.extend(self.budget_warnings(grid));
        tracing::info!(
            assigned = report.assigned,
            warnings = report.warnings.len(),
            "meal plan gaps filled"
        );

        report
    }

    /// Manual single-slot assignment.
    pub fn assign(
        &self,
        grid: &mut SlotGrid,
        slot: Slot,
        item_id: &str,
    ) -> Result<(), ConstraintViolation> {
        grid.set(slot, item_id, self.catalog, self.customer)
            .inspect_err(|reason| {
                tracing::debug!(?slot, item_id, %reason, "assignment rejected");
            })
    }

    /// Advisory only: a category whose week total is more than its ceiling
    /// times its filled slots holds at least one item above the ceiling.
    pub fn budget_warnings(&self, grid: &SlotGrid) -> Vec<Warning> {
        self.summary(grid)
            .into_iter()
            .filter(|s| s.total > s.ceiling * s.filled as f64 + PRICE_EPSILON)
            .map(|s| Warning::BudgetTightness {
                item_type: s.item_type,
                week_total: s.total,
                filled: s.filled,
                ceiling: s.ceiling,
            })
            .collect()
    }

    pub fn summary(&self, grid: &SlotGrid) -> Vec<CategorySummary> {
        ItemType::VARIANTS
            .iter()
            .map(|item_type| {
                let total = grid.week_total(*item_type, self.catalog);
                CategorySummary {
                    item_type: *item_type,
                    total: total.amount,
                    filled: total.count,
                    ceiling: self.customer.budgets.ceiling(*item_type),
                }
            })
            .collect()
    }

    fn run(
        &self,
        grid: &mut SlotGrid,
        chooser: &mut dyn Chooser,
        policy: SelectionPolicy,
    ) -> Report {
        let mut report = Report::default();

        for slot in Slot::all() {
            if policy.only_empty && grid.is_assigned(slot) {
                continue;
            }

            let candidates = self.candidates(grid, slot, policy);
            match chooser.choose(&candidates) {
                Some(item) => {
                    grid.insert_unchecked(slot, item.id.to_owned());
                    report.assigned += 1;
                }
                None => {
                    tracing::debug!(?slot, "no candidate for slot");
                    report.warnings.push(Warning::UnfillableSlot(slot));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use bistro_shared::customer::BudgetCeilings;
    use bistro_shared::mealplan::{Day, Daytime};

    use super::*;
    use crate::{FillState, FirstChooser, RandomChooser};

    fn everywhere(id: &str, price: f64, item_type: ItemType) -> MenuItem {
        MenuItem {
            id: id.to_owned(),
            name: format!("item {id}"),
            price,
            allergens: BTreeSet::new(),
            item_type,
            available_days: Day::VARIANTS.iter().copied().collect(),
            available_times: Daytime::VARIANTS.iter().copied().collect(),
        }
    }

    fn customer(meal: f64, snack: f64, drink: f64) -> CustomerProfile {
        CustomerProfile {
            id: "c".to_owned(),
            name: "Customer".to_owned(),
            allergens: BTreeSet::from(["nuts".to_owned()]),
            budgets: BudgetCeilings { meal, snack, drink },
        }
    }

    fn catalog() -> Catalog {
        let mut items = vec![];
        for i in 0..4 {
            items.push(everywhere(&format!("m{i}"), 10.0 + i as f64, ItemType::Meal));
            items.push(everywhere(&format!("s{i}"), 2.0 + i as f64, ItemType::Snack));
            items.push(everywhere(&format!("d{i}"), 1.0 + i as f64, ItemType::Drink));
        }
        let mut nutty = everywhere("nutty", 1.0, ItemType::Snack);
        nutty.allergens.insert("nuts".to_owned());
        items.push(nutty);

        Catalog::new(items)
    }

    #[test]
    fn test_candidates_apply_every_filter() {
        let catalog = catalog();
        let customer = customer(11.0, 10.0, 10.0);
        let planner = Planner::new(&catalog, &customer);
        let slot = Slot::new(Day::Monday, Daytime::Morning, ItemType::Meal);

        let ids = planner
            .candidates(&SlotGrid::new(), slot, SelectionPolicy::GENERATE)
            .iter()
            .map(|i| i.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["m0", "m1"]);

        let snack = Slot::new(Day::Monday, Daytime::Morning, ItemType::Snack);
        assert!(
            planner
                .candidates(&SlotGrid::new(), snack, SelectionPolicy::GENERATE)
                .iter()
                .all(|i| i.id != "nutty")
        );
    }

    #[test]
    fn test_same_day_rule_only_for_generate() {
        let catalog = catalog();
        let customer = customer(11.0, 10.0, 10.0);
        let planner = Planner::new(&catalog, &customer);
        let mut grid = SlotGrid::new();
        grid.insert_unchecked(
            Slot::new(Day::Monday, Daytime::Morning, ItemType::Meal),
            "m0",
        );
        let slot = Slot::new(Day::Monday, Daytime::Evening, ItemType::Meal);

        let generate = planner.candidates(&grid, slot, SelectionPolicy::GENERATE);
        assert_eq!(generate.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), vec!["m1"]);

        let fill = planner.candidates(&grid, slot, SelectionPolicy::FILL);
        assert_eq!(fill.len(), 2);

        let tuesday = Slot::new(Day::Tuesday, Daytime::Evening, ItemType::Meal);
        assert_eq!(planner.candidates(&grid, tuesday, SelectionPolicy::GENERATE).len(), 2);
    }

    #[test]
    fn test_generate_fills_all_slots_without_same_day_repeat() {
        let catalog = catalog();
        let customer = customer(20.0, 10.0, 10.0);
        let planner = Planner::new(&catalog, &customer);
        let mut grid = SlotGrid::new();

        let report = planner.generate(&mut grid, &mut RandomChooser::seeded(7));

        assert_eq!(report.assigned, 63);
        assert!(report.warnings.is_empty());
        assert_eq!(grid.fill_state(), FillState::Full);

        for day in Day::VARIANTS {
            for item_type in ItemType::VARIANTS {
                let mut ids = grid.items_on(*day, *item_type).collect::<Vec<_>>();
                let before = ids.len();
                ids.sort();
                ids.dedup();
                assert_eq!(ids.len(), before, "repeat on {day} for {item_type}");
            }
        }
    }

    #[test]
    fn test_generate_warns_for_each_unfillable_slot() {
        let catalog = catalog();
        let customer = customer(20.0, 10.0, 0.5);
        let planner = Planner::new(&catalog, &customer);
        let mut grid = SlotGrid::new();

        let report = planner.generate(&mut grid, &mut FirstChooser);

        assert_eq!(report.assigned, 42);
        assert_eq!(report.unfillable().count(), 21);
        assert!(report.unfillable().all(|s| s.item_type == ItemType::Drink));
        assert_eq!(grid.count(ItemType::Drink), 0);
        assert_eq!(grid.count(ItemType::Meal), 21);
        assert_eq!(grid.count(ItemType::Snack), 21);
    }

    #[test]
    fn test_same_day_rule_can_leave_slot_empty() {
        let catalog = Catalog::new([everywhere("only", 5.0, ItemType::Meal)]);
        let customer = customer(20.0, 10.0, 10.0);
        let planner = Planner::new(&catalog, &customer);
        let mut grid = SlotGrid::new();

        let report = planner.generate(&mut grid, &mut FirstChooser);

        assert_eq!(grid.count(ItemType::Meal), 7);
        assert_eq!(
            report
                .unfillable()
                .filter(|s| s.item_type == ItemType::Meal)
                .count(),
            14
        );
    }

    #[test]
    fn test_fill_keeps_existing_assignments() {
        let catalog = catalog();
        let customer = customer(20.0, 10.0, 10.0);
        let planner = Planner::new(&catalog, &customer);
        let mut grid = SlotGrid::new();
        let kept = Slot::new(Day::Wednesday, Daytime::Afternoon, ItemType::Snack);
        grid.insert_unchecked(kept, "s3");

        let report = planner.fill(&mut grid, &mut RandomChooser::seeded(3));

        assert_eq!(report.assigned, 62);
        assert_eq!(grid.get(kept), Some("s3"));
        assert_eq!(grid.fill_state(), FillState::Full);
    }

    #[test]
    fn test_fill_reports_budget_tightness_for_legacy_items() {
        let catalog = Catalog::new([everywhere("d3", 4.0, ItemType::Drink)]);
        let customer = customer(20.0, 10.0, 2.0);
        let planner = Planner::new(&catalog, &customer);
        let mut grid = SlotGrid::new();
        grid.insert_unchecked(
            Slot::new(Day::Monday, Daytime::Morning, ItemType::Drink),
            "d3",
        );

        let report = planner.fill(&mut grid, &mut FirstChooser);

        assert_eq!(report.assigned, 0);
        assert!(report.warnings.iter().any(|w| matches!(
            w,
            Warning::BudgetTightness {
                item_type: ItemType::Drink,
                ..
            }
        )));
    }

    #[test]
    fn test_regenerate_clears_first() {
        let catalog = Catalog::new([everywhere("m0", 5.0, ItemType::Meal)]);
        let customer = customer(20.0, 10.0, 10.0);
        let planner = Planner::new(&catalog, &customer);
        let mut grid = SlotGrid::new();
        grid.insert_unchecked(
            Slot::new(Day::Monday, Daytime::Morning, ItemType::Drink),
            "gone",
        );

        planner.regenerate(&mut grid, &mut FirstChooser);

        assert!(grid.iter().all(|(slot, id)| slot.item_type == ItemType::Meal && id == "m0"));
    }

    #[test]
    fn test_manual_assignment() {
        let catalog = catalog();
        let customer = customer(11.0, 10.0, 10.0);
        let planner = Planner::new(&catalog, &customer);
        let mut grid = SlotGrid::new();
        let slot = Slot::new(Day::Monday, Daytime::Morning, ItemType::Snack);

        assert_eq!(
            planner.assign(&mut grid, slot, "nutty"),
            Err(ConstraintViolation::Allergen)
        );
        assert!(planner.assign(&mut grid, slot, "s1").is_ok());
        assert_eq!(grid.get(slot), Some("s1"));
    }

    #[test]
    fn test_warning_messages() {
        let slot = Slot::new(Day::Friday, Daytime::Evening, ItemType::Drink);
        assert_eq!(
            Warning::UnfillableSlot(slot).to_string(),
            "no drink available for friday evening"
        );
    }

    #[test]
    fn test_generate_respects_restricted_availability() {
        fn limited(id: &str, item_type: ItemType, days: &[Day], times: &[Daytime]) -> MenuItem {
            MenuItem {
                available_days: days.iter().copied().collect(),
                available_times: times.iter().copied().collect(),
                ..everywhere(id, 5.0, item_type)
            }
        }

        let weekdays = [Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday, Day::Friday];
        let catalog = Catalog::new([
            limited("breakfast", ItemType::Meal, Day::VARIANTS, &[Daytime::Morning]),
            limited("lunch", ItemType::Meal, &weekdays, &[Daytime::Afternoon, Daytime::Evening]),
            limited("roast", ItemType::Meal, &[Day::Sunday], &[Daytime::Evening]),
            everywhere("crisps", 2.0, ItemType::Snack),
            limited("punch", ItemType::Drink, &[Day::Saturday, Day::Sunday], &[Daytime::Evening]),
        ]);
        let customer = customer(10.0, 10.0, 10.0);
        let planner = Planner::new(&catalog, &customer);

        let mut choosers: Vec<Box<dyn Chooser>> = vec![Box::new(FirstChooser)];
        choosers.extend((0..5).map(|seed| Box::new(RandomChooser::seeded(seed)) as Box<dyn Chooser>));

        for mut chooser in choosers {
            let mut grid = SlotGrid::new();
            let report = planner.generate(&mut grid, chooser.as_mut());

            assert_eq!(report.assigned, grid.len());
            for (slot, id) in grid.iter() {
                let item = catalog.get(id).expect("assigned item is in the catalog");
                assert!(
                    item.is_available_at(slot.day, slot.time),
                    "{id} placed on {} {}",
                    slot.day,
                    slot.time
                );
            }

            let roast = grid
                .iter()
                .filter(|(_, id)| *id == "roast")
                .map(|(slot, _)| slot)
                .collect::<Vec<_>>();
            assert_eq!(
                roast,
                vec![Slot::new(Day::Sunday, Daytime::Evening, ItemType::Meal)]
            );
            assert_eq!(grid.count(ItemType::Drink), 2);

            let unfillable = report
                .warnings
                .iter()
                .filter(|w| matches!(w, Warning::UnfillableSlot(_)))
                .count();
            assert_eq!(unfillable, 63 - grid.len());
        }
    }
}
