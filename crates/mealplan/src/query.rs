use std::collections::BTreeSet;
use std::ops::Deref;
use std::str::FromStr;

use bistro_db::table::{Customer, MealPlan, MealPlanItem, MenuItem};
use bistro_shared::customer::{BudgetCeilings, CustomerProfile};
use bistro_shared::mealplan::{Day, Daytime, PlanStatus};
use bistro_shared::menu::ItemType;
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;
use sqlx::types::Json;

use crate::{Catalog, PlanRow};

#[derive(Clone)]
pub struct Query(pub bistro_shared::State);

impl Deref for Query {
    type Target = bistro_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(FromRow)]
pub struct MenuItemRow {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub item_type: String,
    pub allergens: Json<BTreeSet<String>>,
    pub available_days: Json<BTreeSet<Day>>,
    pub available_times: Json<BTreeSet<Daytime>>,
}

impl TryFrom<MenuItemRow> for bistro_shared::menu::MenuItem {
    type Error = bistro_shared::Error;

    fn try_from(value: MenuItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            name: value.name,
            price: value.price,
            item_type: ItemType::from_str(&value.item_type)?,
            allergens: value.allergens.0,
            available_days: value.available_days.0,
            available_times: value.available_times.0,
        })
    }
}

#[derive(FromRow)]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub allergens: Json<BTreeSet<String>>,
    pub meals_budget: f64,
    pub snacks_budget: f64,
    pub drinks_budget: f64,
}

impl From<CustomerRow> for CustomerProfile {
    fn from(value: CustomerRow) -> Self {
        Self {
            id: value.id,
            name: value.name,
            allergens: value.allergens.0,
            budgets: BudgetCeilings {
                meal: value.meals_budget,
                snack: value.snacks_budget,
                drink: value.drinks_budget,
            },
        }
    }
}

#[derive(FromRow)]
pub struct MealPlanRow {
    pub id: String,
    pub customer_id: String,
    pub name: String,
    pub start: i64,
    pub end: i64,
    pub status: String,
}

impl TryFrom<MealPlanRow> for bistro_shared::mealplan::MealPlan {
    type Error = bistro_shared::Error;

    fn try_from(value: MealPlanRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            customer_id: value.customer_id,
            name: value.name,
            start: Ord::max(value.start, 0) as u64,
            end: Ord::max(value.end, 0) as u64,
            status: PlanStatus::from_str(&value.status)?,
        })
    }
}

#[derive(FromRow)]
pub struct PlanItemRow {
    pub plan_id: String,
    pub menu_item_id: String,
    pub day: String,
    pub daytime: String,
}

impl TryFrom<PlanItemRow> for PlanRow {
    type Error = bistro_shared::Error;

    fn try_from(value: PlanItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            plan_id: value.plan_id,
            menu_item_id: value.menu_item_id,
            day: Day::from_str(&value.day)?,
            daytime: Daytime::from_str(&value.daytime)?,
        })
    }
}

impl Query {
    pub async fn menu_items(&self) -> bistro_shared::Result<Vec<bistro_shared::menu::MenuItem>> {
        let statement = sea_query::Query::select()
            .columns([
                MenuItem::Id,
                MenuItem::Name,
                MenuItem::Price,
                MenuItem::ItemType,
                MenuItem::Allergens,
                MenuItem::AvailableDays,
                MenuItem::AvailableTimes,
            ])
            .from(MenuItem::Table)
            .order_by(MenuItem::Name, Order::Asc)
            .order_by(MenuItem::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        sqlx::query_as_with::<_, MenuItemRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    pub async fn catalog(&self) -> bistro_shared::Result<Catalog> {
        Ok(Catalog::new(self.menu_items().await?))
    }

    pub async fn find_customer(
        &self,
        id: impl Into<String>,
    ) -> bistro_shared::Result<Option<CustomerProfile>> {
        let statement = sea_query::Query::select()
            .columns([
                Customer::Id,
                Customer::Name,
                Customer::Allergens,
                Customer::MealsBudget,
                Customer::SnacksBudget,
                Customer::DrinksBudget,
            ])
            .from(Customer::Table)
            .and_where(Expr::col(Customer::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, CustomerRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
            .map(Into::into))
    }

    pub async fn find_plan(
        &self,
        id: impl Into<String>,
    ) -> bistro_shared::Result<Option<bistro_shared::mealplan::MealPlan>> {
        let statement = plan_select()
            .and_where(Expr::col(MealPlan::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        sqlx::query_as_with::<_, MealPlanRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    pub async fn filter_plans(
        &self,
        customer_id: impl Into<String>,
    ) -> bistro_shared::Result<Vec<bistro_shared::mealplan::MealPlan>> {
        let statement = plan_select()
            .and_where(Expr::col(MealPlan::CustomerId).eq(customer_id.into()))
            .order_by(MealPlan::Start, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        sqlx::query_as_with::<_, MealPlanRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    /// Rows in insertion order. Unknown day or daytime values fail the load.
    pub async fn plan_rows(&self, plan_id: impl Into<String>) -> bistro_shared::Result<Vec<PlanRow>> {
        let statement = sea_query::Query::select()
            .columns([
                MealPlanItem::PlanId,
                MealPlanItem::MenuItemId,
                MealPlanItem::Day,
                MealPlanItem::Daytime,
            ])
            .from(MealPlanItem::Table)
            .and_where(Expr::col(MealPlanItem::PlanId).eq(plan_id.into()))
            .order_by_expr(Expr::cust("rowid"), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        sqlx::query_as_with::<_, PlanItemRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }
}

fn plan_select() -> sea_query::SelectStatement {
    sea_query::Query::select()
        .columns([
            MealPlan::Id,
            MealPlan::CustomerId,
            MealPlan::Name,
            MealPlan::Start,
            MealPlan::End,
            MealPlan::Status,
        ])
        .from(MealPlan::Table)
        .to_owned()
}
