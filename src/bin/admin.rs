//! CLI administration tool for blueprint-directory.
//!
//! Reviews vendor submissions, shows catalog statistics and checks the
//! database without going through the website.
//!
//! # Usage
//!
//! ```bash
//! # List pending submissions
//! cargo run --bin admin -- submissions list
//!
//! # List everything, including reviewed submissions
//! cargo run --bin admin -- submissions list --status all
//!
//! # Approve or reject a submission
//! cargo run --bin admin -- submissions approve 12
//! cargo run --bin admin -- submissions reject 13 --yes
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_USER`/`DB_PASSWORD`/`DB_NAME` (required)

use blueprint_directory::application::services::SubmissionService;
use blueprint_directory::config::Config;
use blueprint_directory::domain::entities::{Submission, SubmissionStatus};
use blueprint_directory::domain::repositories::CatalogRepository;
use blueprint_directory::infrastructure::persistence::{
    PgCatalogRepository, PgSubmissionRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing blueprint-directory.
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
    /// Review tool submissions
    Submissions {
        #[command(subcommand)]
        action: SubmissionAction,
    },

    /// Show catalog statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum SubmissionAction {
    /// List submissions, newest first
    List {
        /// pending, approved, rejected or all
        #[arg(short, long, default_value = "pending")]
        status: String,
    },

    /// Approve a pending submission
    Approve {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Reject a pending submission
    Reject {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
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

type Submissions = SubmissionService<PgSubmissionRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?
        .context("DATABASE_URL (or DB_USER, DB_PASSWORD and DB_NAME) must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Submissions { action } => handle_submission_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches submission review commands.
async fn handle_submission_action(action: SubmissionAction, pool: &PgPool) -> Result<()> {
    let service = SubmissionService::new(Arc::new(PgSubmissionRepository::new(Arc::new(
        pool.clone(),
    ))));

    match action {
        SubmissionAction::List { status } => list_submissions(&service, &status).await?,
        SubmissionAction::Approve { id, yes } => {
            review(&service, id, SubmissionStatus::Approved, yes).await?
        }
        SubmissionAction::Reject { id, yes } => {
            review(&service, id, SubmissionStatus::Rejected, yes).await?
        }
    }

    Ok(())
}

/// Lists submissions in a table.
///
/// # Output Format
///
/// ```text
/// 📋 Submissions (pending)
///
///   ID   Tool                      Plan       Submitted         Status
///   ───────────────────────────────────────────────────────────────────────
///   12   Fieldwire                 verified   2026-10-02 09:14  pending
/// ```
async fn list_submissions(service: &Submissions, status: &str) -> Result<()> {
    let filter = match status.trim() {
        "all" => None,
        other => Some(
            other
                .parse::<SubmissionStatus>()
                .map_err(|_| anyhow::anyhow!("Unknown status '{}'", other))?,
        ),
    };

    println!(
        "{} ({})",
        "📋 Submissions".bright_blue().bold(),
        status.trim()
    );
    println!();

    let submissions = service
        .list(filter)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list submissions: {}", e))?;

    if submissions.is_empty() {
        println!("{}", "  No submissions found".yellow());
        return Ok(());
    }

    println!(
        "  {:<4} {:<25} {:<10} {:<17} {}",
        "ID".bright_white().bold(),
        "Tool".bright_white().bold(),
        "Plan".bright_white().bold(),
        "Submitted".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for s in &submissions {
        let status = match s.status {
            SubmissionStatus::Pending => s.status.as_str().yellow(),
            SubmissionStatus::Approved => s.status.as_str().green(),
            SubmissionStatus::Rejected => s.status.as_str().red(),
        };

        println!(
            "  {:<4} {:<25} {:<10} {:<17} {}",
            s.id.to_string().bright_black(),
            truncate(&s.tool_name, 25).cyan(),
            s.plan.as_str(),
            s.submitted_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        submissions.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Approves or rejects one submission after showing its details.
async fn review(
    service: &Submissions,
    id: i64,
    decision: SubmissionStatus,
    skip_confirm: bool,
) -> Result<()> {
    let submission = service
        .list(None)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .into_iter()
        .find(|s| s.id == id)
        .context("Submission not found")?;

    if submission.status != SubmissionStatus::Pending {
        println!(
            "{} {}",
            "⚠️  Submission is already".yellow(),
            submission.status.as_str().yellow()
        );
        return Ok(());
    }

    print_details(&submission);

    if !skip_confirm {
        let verb = match decision {
            SubmissionStatus::Approved => "Approve",
            _ => "Reject",
        };
        let confirmed = Confirm::new()
            .with_prompt(format!("{} this submission?", verb))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let result = match decision {
        SubmissionStatus::Approved => service.approve(id).await,
        _ => service.reject(id).await,
    };
    result.map_err(|e| anyhow::anyhow!("Failed to update submission: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Submission".green().bold(),
        decision.as_str().green().bold()
    );
    println!();

    Ok(())
}

fn print_details(s: &Submission) {
    println!("{}", "Submission details:".bright_white().bold());
    println!("  Tool:     {}", s.tool_name.cyan());
    println!("  Category: {}", s.category);
    println!("  Website:  {}", s.website_url);
    println!("  Contact:  {}", s.contact_email);
    if let Some(company) = &s.company_name {
        println!("  Company:  {}", company);
    }
    println!("  Plan:     {}", s.plan.as_str().bright_yellow());
    if !s.platforms.is_empty() {
        println!("  Platforms: {}", s.platforms.join(", "));
    }
    println!();
    println!("  {}", s.description);
    println!();
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let mut out: String = value.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Displays catalog and queue statistics.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let catalog = PgCatalogRepository::new(Arc::new(pool.clone()));
    let stats = catalog
        .stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    let clicks_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM tool_events WHERE event = 'affiliate_clicked'")
            .fetch_one(pool)
            .await?;

    let pending_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM tool_submissions WHERE status = 'pending'")
            .fetch_one(pool)
            .await?;

    println!(
        "  Tools:               {}",
        stats.total_tools.to_string().bright_green().bold()
    );
    println!(
        "  Categories:          {}",
        stats.total_categories.to_string().bright_green().bold()
    );
    println!(
        "  Views:               {}",
        stats.total_views.to_string().bright_green().bold()
    );
    println!(
        "  Affiliate clicks:    {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!(
        "  Pending submissions: {}",
        pending_count.to_string().bright_yellow().bold()
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
