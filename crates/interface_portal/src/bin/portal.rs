//! insure-portal - command-line client for the insurance self-service portal
//!
//! # Usage
//!
//! ```bash
//! insure-portal login --email ada@example.com --password secret123
//! insure-portal dashboard
//! insure-portal policies list --search acme --type Home
//! insure-portal claims file --policy POL-3 --amount 250 --description "Hail damage"
//! insure-portal logout
//! ```
//!
//! # Environment Variables
//!
//! * `PORTAL_API_URL` - Backend base URL (default: http://localhost:5000)
//! * `PORTAL_SESSION_FILE` - Where the session is persisted
//! * `PORTAL_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::{parse_amount_input, ClaimId, PolicyId, Selector};
use domain_account::AuthField;
use domain_claims::{ClaimField, ClaimStatus};
use domain_policy::{PolicyField, PolicyStatus, PolicyType};
use infra_http::{ClientConfig, FileSessionStorage, Navigator, PortalClient, Route, SessionStore};
use interface_portal::{view, Portal};

fn main() -> ExitCode {
    match try_main() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            let _ = writeln!(io::stderr(), "Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "insure-portal",
    author,
    version,
    about = "Manage your insurance policies and claims from the terminal."
)]
struct Cli {
    /// Backend base URL, overriding PORTAL_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file, overriding PORTAL_SESSION_FILE
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Log level, overriding PORTAL_LOG_LEVEL
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to the password
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Sign out
    Logout,

    /// Show summary counters and recent activity
    Dashboard,

    /// Manage policies
    Policies {
        #[command(subcommand)]
        command: PolicyCommand,
    },

    /// Manage claims
    Claims {
        #[command(subcommand)]
        command: ClaimCommand,
    },
}

#[derive(Debug, Subcommand)]
enum PolicyCommand {
    /// List policies
    List {
        /// Matches insurer or policy type
        #[arg(long, default_value = "")]
        search: String,
        /// Policy type or "all"
        #[arg(long = "type", default_value = "all")]
        policy_type: Selector<PolicyType>,
    },
    /// Add a policy
    Add {
        #[arg(long, default_value = "")]
        insurer: String,
        #[arg(long = "type")]
        policy_type: Option<PolicyType>,
        #[arg(long, default_value = "")]
        premium: String,
        #[arg(long, value_parser = parse_day)]
        start: Option<NaiveDate>,
        #[arg(long, value_parser = parse_day)]
        end: Option<NaiveDate>,
    },
    /// Change a policy
    Edit {
        id: PolicyId,
        #[arg(long)]
        insurer: Option<String>,
        #[arg(long = "type")]
        policy_type: Option<PolicyType>,
        #[arg(long)]
        premium: Option<String>,
        #[arg(long, value_parser = parse_day)]
        start: Option<NaiveDate>,
        #[arg(long, value_parser = parse_day)]
        end: Option<NaiveDate>,
        #[arg(long)]
        status: Option<PolicyStatus>,
    },
}

#[derive(Debug, Subcommand)]
enum ClaimCommand {
    /// List claims
    List {
        /// Matches the description
        #[arg(long, default_value = "")]
        search: String,
        /// Claim status or "all"
        #[arg(long, default_value = "all")]
        status: Selector<ClaimStatus>,
    },
    /// File a claim against an active policy
    File {
        #[arg(long)]
        policy: Option<PolicyId>,
        #[arg(long, default_value = "")]
        amount: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Amend a submitted claim
    Edit {
        id: ClaimId,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Withdraw a submitted claim
    Delete {
        id: ClaimId,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    core_kernel::parse_date(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn try_main() -> Result<bool> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("reading PORTAL_* configuration")?;
    if let Some(api_url) = cli.api_url.clone() {
        config = config.with_api_url(api_url);
    }
    if let Some(path) = cli.session_file.clone() {
        config.session_file = Some(path);
    }
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }
    init_tracing(&config.log_level);

    let storage = FileSessionStorage::new(config.session_path());
    tracing::debug!(path = %storage.path().display(), "Session storage");
    let session = SessionStore::hydrate(Arc::new(storage));
    let navigator = Navigator::new();
    let client = PortalClient::new(&config, session.clone(), navigator.clone())
        .context("building HTTP client")?;
    let portal = Portal::new(client, session, navigator);

    let ok = match cli.command {
        Command::Login { email, password } => {
            let mut page = portal.login_page();
            page.set_email(email);
            page.set_password(password);
            let ok = page.submit().await;
            print!("{}", view::field_errors(page.errors()));
            ok
        }
        Command::Register {
            first_name,
            last_name,
            email,
            password,
            confirm_password,
        } => {
            let mut page = portal.register_page();
            let confirm = confirm_password.unwrap_or_else(|| password.clone());
            page.set(AuthField::FirstName, first_name);
            page.set(AuthField::LastName, last_name);
            page.set(AuthField::Email, email);
            page.set(AuthField::Password, password);
            page.set(AuthField::ConfirmPassword, confirm);
            let ok = page.submit().await;
            print!("{}", view::field_errors(page.errors()));
            ok
        }
        Command::Logout => {
            portal.logout();
            true
        }
        Command::Dashboard => {
            if !enter(&portal, Route::Dashboard) {
                false
            } else {
                let mut page = portal.dashboard_page();
                let ok = page.load().await;
                if ok {
                    println!("{}", view::nav(&portal));
                    print!("{}", view::dashboard(&page));
                }
                ok
            }
        }
        Command::Policies { command } => {
            if !enter(&portal, Route::Policies) {
                false
            } else {
                run_policies(&portal, command).await
            }
        }
        Command::Claims { command } => {
            if !enter(&portal, Route::Claims) {
                false
            } else {
                run_claims(&portal, command).await
            }
        }
    };

    print!("{}", view::notices(&portal.notifier().drain()));
    Ok(ok)
}

type CliPortal = Portal<PortalClient>;

/// Opens a protected page through the route guard
fn enter(portal: &CliPortal, route: Route) -> bool {
    let shown = portal.open(route.path());
    if shown != route {
        println!("Please sign in first: insure-portal login --email <email> --password <password>");
        return false;
    }
    true
}

async fn run_policies(portal: &CliPortal, command: PolicyCommand) -> bool {
    let mut page = portal.policies_page();
    if !page.load().await {
        return false;
    }

    match command {
        PolicyCommand::List { search, policy_type } => {
            page.set_search(search);
            page.set_type_filter(policy_type);
            print!("{}", view::policies(&page));
            true
        }
        PolicyCommand::Add {
            insurer,
            policy_type,
            premium,
            start,
            end,
        } => {
            page.open_create();
            page.update_field(PolicyField::Insurer, |d| d.insurer = insurer);
            page.update_field(PolicyField::PolicyType, |d| d.policy_type = policy_type);
            page.update_field(PolicyField::PremiumAmount, |d| {
                d.premium_amount = parse_amount_input(&premium)
            });
            page.update_field(PolicyField::StartDate, |d| d.start_date = start);
            page.update_field(PolicyField::EndDate, |d| d.end_date = end);
            let ok = page.submit().await;
            print!("{}", view::field_errors(page.form_errors()));
            ok
        }
        PolicyCommand::Edit {
            id,
            insurer,
            policy_type,
            premium,
            start,
            end,
            status,
        } => {
            if !page.open_edit(id) {
                println!("No policy {}", id);
                return false;
            }
            if let Some(insurer) = insurer {
                page.update_field(PolicyField::Insurer, |d| d.insurer = insurer);
            }
            if let Some(policy_type) = policy_type {
                page.update_field(PolicyField::PolicyType, |d| d.policy_type = Some(policy_type));
            }
            if let Some(premium) = premium {
                page.update_field(PolicyField::PremiumAmount, |d| {
                    d.premium_amount = parse_amount_input(&premium)
                });
            }
            if let Some(start) = start {
                page.update_field(PolicyField::StartDate, |d| d.start_date = Some(start));
            }
            if let Some(end) = end {
                page.update_field(PolicyField::EndDate, |d| d.end_date = Some(end));
            }
            if let Some(status) = status {
                page.update_field(PolicyField::Status, |d| d.status = Some(status));
            }
            let ok = page.submit().await;
            print!("{}", view::field_errors(page.form_errors()));
            ok
        }
    }
}

async fn run_claims(portal: &CliPortal, command: ClaimCommand) -> bool {
    let mut page = portal.claims_page();
    if !page.load().await {
        return false;
    }

    match command {
        ClaimCommand::List { search, status } => {
            page.set_search(search);
            page.set_status_filter(status);
            print!("{}", view::claims(&page));
            true
        }
        ClaimCommand::File {
            policy,
            amount,
            description,
        } => {
            if !page.open_create() {
                return false;
            }
            page.update_field(ClaimField::PolicyId, |d| d.policy_id = policy);
            page.update_field(ClaimField::ClaimAmount, |d| {
                d.claim_amount = parse_amount_input(&amount)
            });
            page.update_field(ClaimField::Description, |d| d.description = description);
            let ok = page.submit().await;
            print!("{}", view::field_errors(page.form_errors()));
            ok
        }
        ClaimCommand::Edit {
            id,
            amount,
            description,
        } => {
            if !page.open_edit(id) {
                println!("Claim {} cannot be edited", id);
                return false;
            }
            if let Some(amount) = amount {
                page.update_field(ClaimField::ClaimAmount, |d| {
                    d.claim_amount = parse_amount_input(&amount)
                });
            }
            if let Some(description) = description {
                page.update_field(ClaimField::Description, |d| d.description = description);
            }
            let ok = page.submit().await;
            print!("{}", view::field_errors(page.form_errors()));
            ok
        }
        ClaimCommand::Delete { id, yes } => {
            if !page.request_delete(id) {
                println!("Claim {} cannot be deleted", id);
                return false;
            }
            if !yes {
                page.cancel_delete();
                println!("Re-run with --yes to delete claim {}", id);
                return false;
            }
            page.confirm_delete().await
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(io::stderr),
        )
        .init();
}
