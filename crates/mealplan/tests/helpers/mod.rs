#![allow(dead_code)]

use std::collections::BTreeSet;
use std::{path::PathBuf, str::FromStr};

use bistro_mealplan::{Command, FirstChooser, Session};
use bistro_shared::State;
use bistro_shared::customer::{BudgetCeilings, CustomerProfile};
use bistro_shared::mealplan::{Day, Daytime};
use bistro_shared::menu::{ItemType, MenuItem};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::migrator::{Migrate, Plan};
use strum::VariantArray;

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    bistro_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State::single(pool))
}

/// Available every day at every time.
pub fn item(id: &str, name: &str, price: f64, item_type: ItemType) -> MenuItem {
    MenuItem {
        id: id.to_owned(),
        name: name.to_owned(),
        price,
        allergens: BTreeSet::new(),
        item_type,
        available_days: Day::VARIANTS.iter().copied().collect(),
        available_times: Daytime::VARIANTS.iter().copied().collect(),
    }
}

pub fn customer(id: &str, meal: f64, snack: f64, drink: f64) -> CustomerProfile {
    CustomerProfile {
        id: id.to_owned(),
        name: format!("customer {id}"),
        allergens: BTreeSet::new(),
        budgets: BudgetCeilings { meal, snack, drink },
    }
}

/// Three items of each type at 2.0, 4.0 and 6.0.
pub fn menu() -> Vec<MenuItem> {
    let mut items = vec![];
    for item_type in ItemType::VARIANTS {
        for (n, price) in [2.0, 4.0, 6.0].into_iter().enumerate() {
            items.push(item(
                &format!("{item_type}-{n}"),
                &format!("{item_type} {n}"),
                price,
                *item_type,
            ));
        }
    }
    items
}

pub async fn seed(
    cmd: &Command,
    items: Vec<MenuItem>,
    customer: CustomerProfile,
) -> anyhow::Result<String> {
    for item in items {
        cmd.create_menu_item(item).await?;
    }

    Ok(cmd.create_customer(customer).await?)
}

pub async fn create_plan(cmd: &Command, customer_id: &str) -> anyhow::Result<String> {
    let week = bistro_shared::next_week(time::macros::datetime!(2025-01-15 10:00 UTC))?;

    Ok(cmd
        .create_plan(bistro_mealplan::CreatePlanInput {
            customer_id: customer_id.to_owned(),
            name: "Week plan".to_owned(),
            week,
        })
        .await?)
}

pub async fn open(state: &State, plan_id: &str) -> anyhow::Result<Session> {
    Ok(Session::open(state.clone(), plan_id, Box::new(FirstChooser)).await?)
}
