use clap::{Args, Parser, Subcommand};
use engine::{ExpenseCategory, Money, Session, Snapshot};

use crate::{error::Result, store::FileStore};

mod config;
mod error;
mod store;

#[derive(Parser, Debug)]
#[command(name = "chip")]
#[command(about = "Chip keeps score of your spending discipline")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the state file path.
    #[arg(long)]
    state_path: Option<String>,
    /// Log filter (e.g. warn, info, debug).
    #[arg(long, env = "CHIP_LOG", default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Set the monthly income and the daily spending ceiling.
    Onboard(OnboardArgs),
    /// Log an expense and hear what Chip thinks of it.
    Log(LogArgs),
    /// Show level, XP and budget usage.
    Status,
}

#[derive(Args, Debug)]
struct OnboardArgs {
    /// Monthly income (informational).
    #[arg(long)]
    income: String,
    /// Maximum you want to spend per day.
    #[arg(long)]
    daily_budget: String,
}

#[derive(Args, Debug)]
struct LogArgs {
    /// Amount spent.
    amount: String,
    /// What the money went to.
    description: String,
    /// necessary, want or investment.
    #[arg(long, value_parser = parse_category)]
    category: ExpenseCategory,
}

fn parse_category(raw: &str) -> std::result::Result<ExpenseCategory, String> {
    ExpenseCategory::try_from(raw).map_err(|err| err.to_string())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "chip_cli={level},engine={level}",
            level = cli.log
        ))
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = config::load(cli.config.as_deref(), cli.state_path)?;
    tracing::debug!("using state file {}", settings.state_path);
    let store = FileStore::new(&settings.state_path);
    let mut session = Session::builder().store(store).build().await;

    match cli.command {
        Command::Onboard(args) => {
            let income: Money = args.income.parse()?;
            let daily_budget: Money = args.daily_budget.parse()?;
            session.complete_onboarding(income, daily_budget)?;
            println!("All set. Chip is watching your wallet now.");
            print_status(&session.snapshot());
        }
        Command::Log(args) => {
            let amount: Money = args.amount.parse()?;
            let outcome = session.log_expense(amount, &args.description, args.category)?;
            println!("{} XP", signed(outcome.xp_delta));
            if outcome.honesty_bonus != 0 {
                println!(
                    "(includes Honesty Bonus {} XP for logging it anyway)",
                    signed(outcome.honesty_bonus)
                );
            }
            println!("Chip says: {}", outcome.feedback);
            println!();
            print_status(&session.snapshot());
        }
        Command::Status => print_status(&session.snapshot()),
    }

    session.shutdown().await;
    Ok(())
}

/// Renders the home screen as text.
fn print_status(snapshot: &Snapshot) {
    if !snapshot.onboarded {
        println!("Chip needs your numbers first:");
        println!("    chip onboard --income 850000 --daily-budget 20000");
        return;
    }

    println!(
        "{} - {} XP ({} XP to next level)",
        snapshot.level.name, snapshot.xp, snapshot.level.xp_to_next_level
    );
    println!("XP progress     {}", bar(snapshot.level.progress));
    println!("Total spent     {}", snapshot.total_spent);
    println!(
        "Daily budget    {:.0}% used, {} remaining  {}",
        snapshot.budget.percent_raw,
        snapshot.budget.remaining,
        bar(snapshot.budget.percent_clamped / 100.0)
    );
    if let Some(expense) = &snapshot.last_expense {
        println!(
            "Last expense    {} on {} ({}) - XP {}",
            expense.amount,
            expense.description,
            expense.category.as_str(),
            signed(expense.xp_delta)
        );
    }
    println!("Chip says: {}", snapshot.feedback);
}

fn signed(value: i64) -> String {
    if value >= 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

fn bar(fraction: f64) -> String {
    const WIDTH: usize = 20;
    let filled = (fraction.clamp(0.0, 1.0) * WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(WIDTH - filled))
}
