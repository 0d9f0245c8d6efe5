use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum MenuItem {
    Table,
    Id,
    Name,
    Price,
    ItemType,
    Allergens,
    AvailableDays,
    AvailableTimes,
}

#[derive(Iden, Clone)]
pub enum Customer {
    Table,
    Id,
    Name,
    Allergens,
    MealsBudget,
    SnacksBudget,
    DrinksBudget,
}

#[derive(Iden, Clone)]
pub enum MealPlan {
    Table,
    Id,
    CustomerId,
    Name,
    Start,
    End,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum MealPlanItem {
    Table,
    PlanId,
    MenuItemId,
    Day,
    Daytime,
}
