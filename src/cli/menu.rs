use bistro_shared::mealplan::{Day, Daytime};
use bistro_shared::menu::{ItemType, MenuItem};
use clap::Subcommand;
use std::collections::BTreeSet;
use strum::VariantArray;

#[derive(Subcommand)]
pub enum MenuCommand {
    /// Add a menu item. Without --day or --time it is offered every day or at every time.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long = "type")]
        item_type: ItemType,
        /// Repeat for each allergen
        #[arg(long = "allergen")]
        allergens: Vec<String>,
        #[arg(long = "day")]
        days: Vec<Day>,
        #[arg(long = "time")]
        times: Vec<Daytime>,
    },
    /// List the catalog
    List,
}

pub async fn run(config: bistro::Config, command: MenuCommand) -> anyhow::Result<()> {
    let state = bistro::connect(&config).await?;

    match command {
        MenuCommand::Add {
            name,
            price,
            item_type,
            allergens,
            days,
            times,
        } => {
            let available_days = if days.is_empty() {
                Day::VARIANTS.iter().copied().collect()
            } else {
                days.into_iter().collect()
            };
            let available_times = if times.is_empty() {
                Daytime::VARIANTS.iter().copied().collect()
            } else {
                times.into_iter().collect()
            };

            let id = bistro_mealplan::Command(state)
                .create_menu_item(MenuItem {
                    id: String::new(),
                    name,
                    price,
                    allergens: allergens.into_iter().collect::<BTreeSet<_>>(),
                    item_type,
                    available_days,
                    available_times,
                })
                .await?;

            println!("{id}");
        }
        MenuCommand::List => {
            let catalog = bistro_mealplan::Query(state).catalog().await?;
            if catalog.is_empty() {
                println!("menu is empty");
                return Ok(());
            }

            let grouped = catalog.grouped();

            for item_type in ItemType::VARIANTS {
                for item in grouped.get(*item_type) {
                    println!(
                        "{}  {:<5}  ${:>7.2}  {}  [{}] days: {} times: {}",
                        item.id,
                        item.item_type,
                        item.price,
                        item.name,
                        super::list(&item.allergens),
                        super::list(&item.available_days),
                        super::list(&item.available_times),
                    );
                }
            }
        }
    }

    Ok(())
}
