//! CLI administration tool for equipment-rental.
//!
//! Provides commands for inspecting inventory, running the overdue sweep and
//! managing members without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # List rentals past their end date
//! cargo run --bin admin -- overdue list
//!
//! # Mark them OVERDUE and notify members
//! cargo run --bin admin -- overdue sweep
//!
//! # Deactivate a member
//! cargo run --bin admin -- member deactivate 6f1c...
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use equipment_rental::domain::entities::Rental;
use equipment_rental::domain::ports::SystemClock;
use equipment_rental::domain::value_objects::MemberId;
use equipment_rental::infrastructure::notification::LoggingNotificationService;
use equipment_rental::infrastructure::payment::SimulatedPaymentService;
use equipment_rental::infrastructure::persistence::pg_repositories;
use equipment_rental::server::{build_state, event_bus};
use equipment_rental::state::AppState;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing equipment-rental.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show inventory and rental counts
    Stats,

    /// Overdue rentals
    Overdue {
        #[command(subcommand)]
        action: OverdueAction,
    },

    /// Manage members
    Member {
        #[command(subcommand)]
        action: MemberAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum OverdueAction {
    /// List rentals past their end date
    List,

    /// Mark past-due rentals OVERDUE
    Sweep {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum MemberAction {
    /// Show a member
    Show {
        /// Member UUID
        id: String,
    },

    /// Deactivate a member with no open rentals
    Deactivate {
        /// Member UUID
        id: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Overdue { action } => handle_overdue_action(action, services(&pool)).await?,
        Commands::Member { action } => handle_member_action(action, services(&pool)).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn services(pool: &PgPool) -> AppState {
    build_state(
        pg_repositories(Arc::new(pool.clone())),
        event_bus(Arc::new(LoggingNotificationService)),
        Arc::new(SimulatedPaymentService),
        Arc::new(SystemClock),
    )
}

async fn handle_overdue_action(action: OverdueAction, state: AppState) -> Result<()> {
    let today = state.clock.today();

    match action {
        OverdueAction::List => {
            println!("{}", "⏰ Overdue Rentals".bright_blue().bold());
            println!();

            let rentals = state.rental_service.overdue().await?;
            if rentals.is_empty() {
                println!("{}", "  No overdue rentals".green());
                return Ok(());
            }

            print_rentals(&rentals, today);
        }
        OverdueAction::Sweep { yes } => {
            println!("{}", "🧹 Overdue Sweep".bright_blue().bold());
            println!();

            let pending = state.rental_service.overdue().await?;
            if pending.is_empty() {
                println!("{}", "  Nothing to sweep".green());
                return Ok(());
            }

            println!("  Past due: {}", pending.len().to_string().yellow().bold());
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Mark these rentals OVERDUE and notify members?")
                    .default(true)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let marked = state.rental_service.sweep_overdue().await?;

            println!();
            println!(
                "{} {}",
                "✅ Marked overdue:".green().bold(),
                marked.len().to_string().bright_white().bold()
            );
            if !marked.is_empty() {
                println!();
                print_rentals(&marked, today);
            }
        }
    }

    Ok(())
}

/// Prints rentals as a table.
///
/// ```text
///   Rental                                Member                                Due         Days
///   ─────────────────────────────────────────────────────────────────────────────────────────────
///   0c6f...                               8a1e...                               2026-03-01  4
/// ```
fn print_rentals(rentals: &[Rental], today: NaiveDate) {
    println!(
        "  {:<38} {:<38} {:<11} {}",
        "Rental".bright_white().bold(),
        "Member".bright_white().bold(),
        "Due".bright_white().bold(),
        "Days".bright_white().bold()
    );
    println!("  {}", "─".repeat(95).bright_black());

    for rental in rentals {
        println!(
            "  {:<38} {:<38} {:<11} {}",
            rental.id.to_string().cyan(),
            rental.member_id.to_string().bright_black(),
            rental.period.end().to_string(),
            rental.days_overdue(today).to_string().red().bold()
        );
    }

    println!();
    println!(
        "  Total: {}",
        rentals.len().to_string().bright_white().bold()
    );
    println!();
}

async fn handle_member_action(action: MemberAction, state: AppState) -> Result<()> {
    match action {
        MemberAction::Show { id } => {
            let member = state.member_service.get(parse_member_id(&id)?).await?;

            println!("{}", "👤 Member".bright_blue().bold());
            println!();
            println!("  Name:    {}", member.name.cyan());
            println!("  Email:   {}", member.email);
            println!("  Tier:    {}", member.tier.to_string().bright_white());
            println!(
                "  Rentals: {}/{}",
                member.active_rentals,
                member.tier.max_concurrent_rentals()
            );
            let status = if member.is_active {
                "ACTIVE".green()
            } else {
                "INACTIVE".red()
            };
            println!("  Status:  {status}");
            println!();
        }
        MemberAction::Deactivate { id } => {
            let member = state.member_service.get(parse_member_id(&id)?).await?;

            if !member.is_active {
                println!("{}", "⚠️  This member is already inactive".yellow());
                return Ok(());
            }

            println!("  Member: {}", member.name.cyan());
            println!("  Email:  {}", member.email.bright_black());
            println!();

            let confirmed = Confirm::new()
                .with_prompt("Deactivate this member?")
                .default(false)
                .interact()?;

            if !confirmed {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }

            state.member_service.deactivate(member.id).await?;

            println!();
            println!("{}", "✅ Member deactivated".green().bold());
            println!();
        }
    }

    Ok(())
}

fn parse_member_id(raw: &str) -> Result<MemberId> {
    raw.parse::<MemberId>()
        .map_err(|e| anyhow::anyhow!("Invalid member id: {}", e))
}

/// Displays inventory and rental counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let equipment_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment")
        .fetch_one(pool)
        .await?;

    let members_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM members WHERE is_active")
            .fetch_one(pool)
            .await?;

    let open_rentals: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM rentals WHERE status IN ('PENDING', 'ACTIVE', 'OVERDUE')",
    )
    .fetch_one(pool)
    .await?;

    let open_reservations: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reservations WHERE status IN ('PENDING', 'CONFIRMED')",
    )
    .fetch_one(pool)
    .await?;

    println!(
        "  Equipment:         {}",
        equipment_count.to_string().bright_green().bold()
    );
    println!(
        "  Active members:    {}",
        members_count.to_string().bright_green().bold()
    );
    println!(
        "  Open rentals:      {}",
        open_rentals.to_string().bright_green().bold()
    );
    println!(
        "  Open reservations: {}",
        open_reservations.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
