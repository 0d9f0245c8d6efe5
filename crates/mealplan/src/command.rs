use std::ops::Deref;

use bistro_db::table::{Customer, MealPlan, MealPlanItem, MenuItem};
use bistro_shared::customer::CustomerProfile;
use bistro_shared::mealplan::PlanStatus;
use bistro_shared::{Week, not_found};
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;
use validator::Validate;

use crate::{Catalog, SlotGrid, Violation};

#[derive(Clone)]
pub struct Command(pub bistro_shared::State);

impl Deref for Command {
    type Target = bistro_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Validate, Clone, Debug)]
pub struct CreatePlanInput {
    #[validate(length(min = 1))]
    pub customer_id: String,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub week: Week,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// Nothing was written.
    Refused(Vec<Violation>),
    Committed { rows: usize },
}

impl CommitOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

impl Command {
    pub async fn create_menu_item(
        &self,
        mut input: bistro_shared::menu::MenuItem,
    ) -> bistro_shared::Result<String> {
        input.validate()?;

        if input.id.is_empty() {
            input.id = bistro_shared::new_id();
        }

        input.allergens = input
            .allergens
            .iter()
            .map(bistro_shared::menu::normalize_allergen)
            .collect();

        let statement = sea_query::Query::insert()
            .into_table(MenuItem::Table)
            .columns([
                MenuItem::Id,
                MenuItem::Name,
                MenuItem::Price,
                MenuItem::ItemType,
                MenuItem::Allergens,
                MenuItem::AvailableDays,
                MenuItem::AvailableTimes,
            ])
            .values_panic([
                input.id.to_owned().into(),
                input.name.to_owned().into(),
                input.price.into(),
                input.item_type.to_string().into(),
                serde_json::to_string(&input.allergens)?.into(),
                serde_json::to_string(&input.available_days)?.into(),
                serde_json::to_string(&input.available_times)?.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        tracing::debug!(id = %input.id, item_type = %input.item_type, "menu item created");

        Ok(input.id)
    }

    pub async fn create_customer(&self, mut input: CustomerProfile) -> bistro_shared::Result<String> {
        input.validate()?;

        if input.id.is_empty() {
            input.id = bistro_shared::new_id();
        }

        input.allergens = input
            .allergens
            .iter()
            .map(bistro_shared::menu::normalize_allergen)
            .collect();

        let statement = sea_query::Query::insert()
            .into_table(Customer::Table)
            .columns([
                Customer::Id,
                Customer::Name,
                Customer::Allergens,
                Customer::MealsBudget,
                Customer::SnacksBudget,
                Customer::DrinksBudget,
            ])
            .values_panic([
                input.id.to_owned().into(),
                input.name.to_owned().into(),
                serde_json::to_string(&input.allergens)?.into(),
                input.budgets.meal.into(),
                input.budgets.snack.into(),
                input.budgets.drink.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        tracing::debug!(id = %input.id, "customer created");

        Ok(input.id)
    }

    pub async fn create_plan(&self, input: CreatePlanInput) -> bistro_shared::Result<String> {
        input.validate()?;

        let query = crate::Query(self.0.clone());
        if query.find_customer(&input.customer_id).await?.is_none() {
            not_found!("customer {}", input.customer_id);
        }

        let id = bistro_shared::new_id();
        let statement = sea_query::Query::insert()
            .into_table(MealPlan::Table)
            .columns([
                MealPlan::Id,
                MealPlan::CustomerId,
                MealPlan::Name,
                MealPlan::Start,
                MealPlan::End,
                MealPlan::Status,
                MealPlan::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                input.customer_id.to_owned().into(),
                input.name.to_owned().into(),
                (input.week.start_timestamp() as i64).into(),
                (input.week.end_timestamp() as i64).into(),
                PlanStatus::Draft.to_string().into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        tracing::info!(plan_id = %id, customer_id = %input.customer_id, "meal plan created");

        Ok(id)
    }

    pub async fn delete_plan(&self, id: impl Into<String>) -> bistro_shared::Result<()> {
        let id = id.into();
        let mut tx = self.write_db.begin().await?;

        let statement = sea_query::Query::delete()
            .from_table(MealPlanItem::Table)
            .and_where(Expr::col(MealPlanItem::PlanId).eq(&id))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let statement = sea_query::Query::delete()
            .from_table(MealPlan::Table)
            .and_where(Expr::col(MealPlan::Id).eq(&id))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        if result.rows_affected() == 0 {
            not_found!("meal plan {id}");
        }

        tx.commit().await?;

        tracing::info!(plan_id = %id, "meal plan deleted");

        Ok(())
    }

    /// Replaces the stored selection of `plan_id` with `grid`.
    ///
    /// Budget breaches refuse the commit before storage is touched. Otherwise
    /// header update, row delete and row insert share one transaction, and
    /// any failure leaves the previous rows in place.
    pub async fn commit(
        &self,
        plan_id: &str,
        grid: &SlotGrid,
        catalog: &Catalog,
        customer: &CustomerProfile,
    ) -> bistro_shared::Result<CommitOutcome> {
        let violations = crate::audit(grid, catalog, customer);
        if !violations.is_empty() {
            tracing::warn!(
                plan_id,
                violations = violations.len(),
                "meal plan commit refused"
            );

            return Ok(CommitOutcome::Refused(violations));
        }

        let rows = crate::to_rows(plan_id, grid);
        let mut tx = self.write_db.begin().await?;

        let statement = sea_query::Query::update()
            .table(MealPlan::Table)
            .values([
                (MealPlan::Status, PlanStatus::Completed.to_string().into()),
                (
                    MealPlan::UpdatedAt,
                    OffsetDateTime::now_utc().unix_timestamp().into(),
                ),
            ])
            .and_where(Expr::col(MealPlan::Id).eq(plan_id))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        if result.rows_affected() == 0 {
            not_found!("meal plan {plan_id}");
        }

        let statement = sea_query::Query::delete()
            .from_table(MealPlanItem::Table)
            .and_where(Expr::col(MealPlanItem::PlanId).eq(plan_id))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        if !rows.is_empty() {
            let mut statement = sea_query::Query::insert()
                .into_table(MealPlanItem::Table)
                .columns([
                    MealPlanItem::PlanId,
                    MealPlanItem::MenuItemId,
                    MealPlanItem::Day,
                    MealPlanItem::Daytime,
                ])
                .to_owned();

            for row in rows.iter() {
                statement.values_panic([
                    row.plan_id.to_owned().into(),
                    row.menu_item_id.to_owned().into(),
                    row.day.to_string().into(),
                    row.daytime.to_string().into(),
                ]);
            }

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        tx.commit().await?;

        tracing::info!(plan_id, rows = rows.len(), "meal plan committed");

        Ok(CommitOutcome::Committed { rows: rows.len() })
    }
}
