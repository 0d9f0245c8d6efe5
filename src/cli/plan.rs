use bistro_mealplan::{CommitOutcome, CreatePlanInput, Report, Session, Slot};
use bistro_shared::mealplan::{Day, Daytime};
use bistro_shared::menu::ItemType;
use clap::Subcommand;
use strum::VariantArray;

#[derive(Subcommand)]
pub enum PlanCommand {
    /// Create an empty draft plan for next week
    Create {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        name: String,
    },
    /// List the plans of a customer
    List {
        #[arg(long)]
        customer: String,
    },
    /// Replace the whole selection with a fresh one
    Generate { plan_id: String },
    /// Clear every slot, then generate
    Regenerate { plan_id: String },
    /// Fill empty slots only
    Fill { plan_id: String },
    /// Assign one item to one slot
    Set {
        plan_id: String,
        day: Day,
        time: Daytime,
        item_type: ItemType,
        item_id: String,
    },
    /// Empty one slot
    Clear {
        plan_id: String,
        day: Day,
        time: Daytime,
        item_type: ItemType,
    },
    /// Print the weekly grid and totals
    Show { plan_id: String },
    /// List budget violations without committing
    Audit { plan_id: String },
    /// Save the stored selection again after an audit
    Commit { plan_id: String },
    /// Delete a plan and its selection
    Delete { plan_id: String },
}

pub async fn run(config: bistro::Config, command: PlanCommand) -> anyhow::Result<()> {
    let state = bistro::connect(&config).await?;
    let open = |plan_id: String| {
        Session::open(
            state.clone(),
            plan_id,
            bistro_mealplan::chooser_for_seed(config.planner.seed),
        )
    };

    match command {
        PlanCommand::Create { customer, name } => {
            let id = bistro_mealplan::Command(state.clone())
                .create_plan(CreatePlanInput {
                    customer_id: customer,
                    name,
                    week: bistro_shared::next_week_from_now()?,
                })
                .await?;

            println!("{id}");
        }
        PlanCommand::List { customer } => {
            for plan in bistro_mealplan::Query(state.clone())
                .filter_plans(customer)
                .await?
            {
                println!("{}  {:<9}  {}", plan.id, plan.status, plan.name);
            }
        }
        PlanCommand::Generate { plan_id } => {
            let mut session = open(plan_id).await?;
            print_report(&session.generate());
            commit(&mut session).await?;
        }
        PlanCommand::Regenerate { plan_id } => {
            let mut session = open(plan_id).await?;
            print_report(&session.regenerate());
            commit(&mut session).await?;
        }
        PlanCommand::Fill { plan_id } => {
            let mut session = open(plan_id).await?;
            print_report(&session.fill());
            commit(&mut session).await?;
        }
        PlanCommand::Set {
            plan_id,
            day,
            time,
            item_type,
            item_id,
        } => {
            let mut session = open(plan_id).await?;
            let slot = Slot::new(day, time, item_type);

            if let Err(reason) = session.assign(slot, &item_id) {
                anyhow::bail!("{item_id} cannot be placed on {day} {time}: {reason}");
            }

            commit(&mut session).await?;
        }
        PlanCommand::Clear {
            plan_id,
            day,
            time,
            item_type,
        } => {
            let mut session = open(plan_id).await?;

            if session.clear(Slot::new(day, time, item_type)).is_none() {
                println!("{day} {time} {item_type} was already empty");
            }

            commit(&mut session).await?;
        }
        PlanCommand::Show { plan_id } => {
            let session = open(plan_id).await?;
            print_grid(&session);
        }
        PlanCommand::Audit { plan_id } => {
            let session = open(plan_id).await?;
            let violations = session.audit();

            if violations.is_empty() {
                println!("no budget violations");
            }

            for violation in violations {
                println!("{violation}");
            }
        }
        PlanCommand::Commit { plan_id } => {
            let mut session = open(plan_id).await?;
            commit(&mut session).await?;
        }
        PlanCommand::Delete { plan_id } => {
            bistro_mealplan::Command(state.clone())
                .delete_plan(plan_id)
                .await?;
        }
    }

    Ok(())
}

fn print_report(report: &Report) {
    println!("{} slots assigned", report.assigned);

    for warning in report.warnings.iter() {
        println!("warning: {warning}");
    }
}

async fn commit(session: &mut Session) -> anyhow::Result<()> {
    for issue in session.load_issues() {
        tracing::warn!(?issue, "stored row skipped");
    }

    match session.commit().await? {
        CommitOutcome::Committed { rows } => {
            println!("committed {rows} slots");
            Ok(())
        }
        CommitOutcome::Refused(violations) => {
            for violation in violations.iter() {
                println!("{violation}");
            }

            anyhow::bail!("commit refused: {} budget violations", violations.len())
        }
    }
}

fn print_grid(session: &Session) {
    let plan = session.plan();
    let customer = session.customer();
    let catalog = session.catalog();

    println!("{} for {} ({})", plan.name, customer.name, plan.status);

    for day in Day::VARIANTS {
        println!("{day}");

        for time in Daytime::VARIANTS {
            let cells = ItemType::VARIANTS
                .iter()
                .map(|item_type| {
                    let slot = Slot::new(*day, *time, *item_type);
                    let name = session
                        .grid()
                        .get(slot)
                        .map(|id| catalog.get(id).map_or(id, |item| item.name.as_str()))
                        .unwrap_or("-");

                    format!("{item_type}: {name}")
                })
                .collect::<Vec<_>>();

            println!("  {:<9} {}", time, cells.join(" | "));
        }
    }

    for summary in session.summary() {
        println!(
            "{}: ${:.2} over {} slots, ceiling ${:.2} per item",
            summary.item_type, summary.total, summary.filled, summary.ceiling
        );
    }

    for issue in session.load_issues() {
        println!("skipped stored row: {issue:?}");
    }
}
