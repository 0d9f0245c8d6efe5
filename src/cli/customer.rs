use bistro_shared::customer::{BudgetCeilings, CustomerProfile};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum CustomerCommand {
    /// Register a customer with per-item budget ceilings
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        meals_budget: f64,
        #[arg(long)]
        snacks_budget: f64,
        #[arg(long)]
        drinks_budget: f64,
        /// Repeat for each allergy
        #[arg(long = "allergen")]
        allergens: Vec<String>,
    },
    /// Show a customer and their plans
    Show { id: String },
}

pub async fn run(config: bistro::Config, command: CustomerCommand) -> anyhow::Result<()> {
    let state = bistro::connect(&config).await?;

    match command {
        CustomerCommand::Add {
            name,
            meals_budget,
            snacks_budget,
            drinks_budget,
            allergens,
        } => {
            let id = bistro_mealplan::Command(state)
                .create_customer(CustomerProfile {
                    id: String::new(),
                    name,
                    allergens: allergens.into_iter().collect(),
                    budgets: BudgetCeilings {
                        meal: meals_budget,
                        snack: snacks_budget,
                        drink: drinks_budget,
                    },
                })
                .await?;

            println!("{id}");
        }
        CustomerCommand::Show { id } => {
            let query = bistro_mealplan::Query(state);
            let Some(customer) = query.find_customer(&id).await? else {
                anyhow::bail!("customer {id} not found");
            };

            println!("{} ({})", customer.name, customer.id);
            println!("allergies: {}", super::list(&customer.allergens));
            println!(
                "budgets: meal ${:.2}, snack ${:.2}, drink ${:.2}",
                customer.budgets.meal, customer.budgets.snack, customer.budgets.drink
            );

            for plan in query.filter_plans(&customer.id).await? {
                println!("{}  {:<9}  {}", plan.id, plan.status, plan.name);
            }
        }
    }

    Ok(())
}
