// Expense Tracker - CLI
// Inspect and edit the JSON document stores from the terminal

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use expense_tracker::i18n::{category_label, status_label, translate};
use expense_tracker::logging::init_tracing;
use expense_tracker::{
    Category, ExpenseFields, Language, LogConfig, Status, StoreConfig, TranslationKey,
};

#[derive(Debug, Parser)]
#[command(name = "expense-tracker", version, about = "Household expense tracker")]
struct Cli {
    #[command(flatten)]
    store: StoreConfig,

    #[command(flatten)]
    log: LogConfig,

    /// Label language: ar or en
    #[arg(long, global = true, default_value = "ar")]
    lang: Language,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create both store files if they are missing
    Init,
    /// List expenses with totals
    Expenses,
    /// List groups, their items and totals
    Groups,
    /// Record a new expense
    AddExpense {
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: Category,
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "unpaid")]
        status: Status,
    },
    /// Mark an expense paid or unpaid
    SetStatus {
        #[arg(long)]
        id: String,
        #[arg(long)]
        status: Status,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log.filter);

    match cli.command {
        Command::Init => run_init(&cli.store),
        Command::Expenses => run_expenses(&cli.store, cli.lang),
        Command::Groups => run_groups(&cli.store, cli.lang),
        Command::AddExpense { description, category, amount, date, status } => {
            let fields = ExpenseFields {
                description,
                category,
                amount: expense_tracker::model::parse_amount(&amount)?,
                date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
                status,
            };
            let expense = cli.store.expense_handler().create(fields)?;
            println!("✓ {} ({})", translate(cli.lang, TranslationKey::MessageSuccess), expense.id);
            Ok(())
        }
        Command::SetStatus { id, status } => run_set_status(&cli.store, &id, status, cli.lang),
    }
}

fn run_init(store: &StoreConfig) -> Result<()> {
    store
        .expense_handler()
        .store()
        .ensure_ready()
        .context("Failed to initialize expenses store")?;
    store
        .group_handler()
        .store()
        .ensure_ready()
        .context("Failed to initialize groups store")?;

    println!("✓ {}", store.expenses_path().display());
    println!("✓ {}", store.groups_path().display());
    Ok(())
}

fn run_expenses(store: &StoreConfig, lang: Language) -> Result<()> {
    let handler = store.expense_handler();
    let expenses = handler.list().context("Failed to read expenses")?;

    println!("{}", translate(lang, TranslationKey::AppTitle));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if expenses.is_empty() {
        println!("{}", translate(lang, TranslationKey::MessageNoExpenses));
        return Ok(());
    }

    for e in &expenses {
        println!(
            "{:<14} {}  {:<30} {:<18} {:>12.2}  {}",
            e.id,
            e.date,
            e.description,
            category_label(lang, e.category),
            e.amount,
            status_label(lang, e.status),
        );
    }

    let summary = expense_tracker::ExpenseSummary::from_expenses(&expenses);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "{}: {:.2}   {}: {:.2}   {}: {:.2}",
        translate(lang, TranslationKey::TableAmount),
        summary.total,
        status_label(lang, Status::Paid),
        summary.paid_total,
        status_label(lang, Status::Unpaid),
        summary.unpaid_total,
    );
    Ok(())
}

fn run_groups(store: &StoreConfig, lang: Language) -> Result<()> {
    let groups = store
        .group_handler()
        .list_groups()
        .context("Failed to read groups")?;

    for group in &groups {
        println!(
            "📦 {} [{}] - {:.2} ({} {:.2})",
            group.name,
            category_label(lang, group.category),
            group.total(),
            status_label(lang, Status::Paid),
            group.paid_total(),
        );
        for item in &group.items {
            println!(
                "   {:<14} {}  {:<28} {:>12.2}  {}",
                item.id,
                item.date,
                item.description,
                item.amount,
                status_label(lang, item.status),
            );
        }
    }

    println!("{} group(s)", groups.len());
    Ok(())
}

fn run_set_status(store: &StoreConfig, id: &str, status: Status, lang: Language) -> Result<()> {
    let handler = store.expense_handler();
    let Some(current) = handler.list()?.into_iter().find(|e| e.id == id) else {
        bail!("Expense not found: {}", id);
    };

    let date = current
        .date
        .parse::<NaiveDate>()
        .with_context(|| format!("Expense {} has an unreadable date '{}'", id, current.date))?;

    // Updates are full replacement, so carry every other field over
    let fields = ExpenseFields {
        description: current.description,
        category: current.category,
        amount: current.amount,
        date,
        status,
    };
    let updated = handler.update(id, fields)?;
    println!("✓ {} → {}", updated.id, status_label(lang, updated.status));
    Ok(())
}
