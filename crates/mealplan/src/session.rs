use bistro_shared::customer::CustomerProfile;
use bistro_shared::mealplan::{MealPlan, PlanStatus};
use bistro_shared::not_found;

use crate::{
    Catalog, CategorySummary, Chooser, Command, CommitOutcome, ConstraintViolation, LoadIssue,
    Planner, Query, Report, Slot, SlotGrid, Violation,
};

/// Editable in-memory copy of one stored plan.
///
/// Every command takes `&mut self`, so a session applies one command at a
/// time. Storage is only touched by [`Session::commit`].
pub struct Session {
    state: bistro_shared::State,
    plan: MealPlan,
    customer: CustomerProfile,
    catalog: Catalog,
    grid: SlotGrid,
    load_issues: Vec<LoadIssue>,
    chooser: Box<dyn Chooser + Send>,
}

impl Session {
    /// Loads plan header, customer and catalog, then rebuilds the grid from
    /// the stored rows. Any failure here aborts the session.
    pub async fn open(
        state: bistro_shared::State,
        plan_id: impl Into<String>,
        chooser: Box<dyn Chooser + Send>,
    ) -> bistro_shared::Result<Self> {
        let plan_id = plan_id.into();
        let query = Query(state.clone());

        let Some(plan) = query.find_plan(&plan_id).await? else {
            not_found!("meal plan {plan_id}");
        };

        let Some(customer) = query.find_customer(&plan.customer_id).await? else {
            not_found!("customer {}", plan.customer_id);
        };

        let catalog = query.catalog().await?;
        let loaded = crate::from_rows(query.plan_rows(&plan.id).await?, &catalog, &customer);

        tracing::debug!(
            plan_id = %plan.id,
            slots = loaded.grid.len(),
            issues = loaded.issues.len(),
            "meal plan session opened"
        );

        Ok(Self {
            state,
            plan,
            customer,
            catalog,
            grid: loaded.grid,
            load_issues: loaded.issues,
            chooser,
        })
    }

    pub fn plan(&self) -> &MealPlan {
        &self.plan
    }

    pub fn customer(&self) -> &CustomerProfile {
        &self.customer
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    pub fn load_issues(&self) -> &[LoadIssue] {
        &self.load_issues
    }

    pub fn generate(&mut self) -> Report {
        Planner::new(&self.catalog, &self.customer).generate(&mut self.grid, self.chooser.as_mut())
    }

    pub fn regenerate(&mut self) -> Report {
        Planner::new(&self.catalog, &self.customer)
            .regenerate(&mut self.grid, self.chooser.as_mut())
    }

    pub fn fill(&mut self) -> Report {
        Planner::new(&self.catalog, &self.customer).fill(&mut self.grid, self.chooser.as_mut())
    }

    pub fn assign(&mut self, slot: Slot, item_id: &str) -> Result<(), ConstraintViolation> {
        Planner::new(&self.catalog, &self.customer).assign(&mut self.grid, slot, item_id)
    }

    pub fn clear(&mut self, slot: Slot) -> Option<String> {
        self.grid.clear(slot)
    }

    pub fn audit(&self) -> Vec<Violation> {
        crate::audit(&self.grid, &self.catalog, &self.customer)
    }

    pub fn summary(&self) -> Vec<CategorySummary> {
        Planner::new(&self.catalog, &self.customer).summary(&self.grid)
    }

    /// On a refused or failed commit the grid and the stored plan are left as
    /// they were.
    pub async fn commit(&mut self) -> bistro_shared::Result<CommitOutcome> {
        let outcome = Command(self.state.clone())
            .commit(&self.plan.id, &self.grid, &self.catalog, &self.customer)
            .await?;

        if outcome.is_committed() {
            self.plan.status = PlanStatus::Completed;
        }

        Ok(outcome)
    }
}
