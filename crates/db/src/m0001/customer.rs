use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Customer;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Customer::Table)
        .col(
            ColumnDef::new(Customer::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Customer::Name)
                .string()
                .not_null()
                .string_len(120),
        )
        .col(
            ColumnDef::new(Customer::Allergens)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(
            ColumnDef::new(Customer::MealsBudget)
                .double()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(Customer::SnacksBudget)
                .double()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(Customer::DrinksBudget)
                .double()
                .not_null()
                .default(0),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Customer::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
