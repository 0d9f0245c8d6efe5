mod customer;
mod meal_plan;
mod meal_plan_item;
mod menu_item;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "bistro",
    "m0001",
    vec_box![],
    vec_box![
        menu_item::CreateTable,
        menu_item::CreateIdx1,
        customer::CreateTable,
        meal_plan::CreateTable,
        meal_plan::CreateIdx1,
        meal_plan_item::CreateTable,
        meal_plan_item::CreateIdx1
    ]
);
