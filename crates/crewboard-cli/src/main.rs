use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use crewboard_core::catalog::{EntityKind, Role, WorkerKind};
use crewboard_core::session::Page;
use crewboard_core::task::DateTab;
use crewboard_infrastructure::{ConfigService, CrewPaths, FileKeyValueStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod commands;

use app::App;

#[derive(Parser)]
#[command(name = "crewboard")]
#[command(about = "Crewboard - roster, rename history and sessions for a media production team", long_about = None)]
struct Cli {
    /// Directory holding the persisted catalog and session
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory holding config.toml
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List engineers, SMM and accounts under their current names
    Roster {
        /// engineer, smm or account
        #[arg(long)]
        kind: Option<EntityKind>,
    },
    /// Show the rename history of one entity
    History { kind: EntityKind, id: String },
    /// Workers that can log in without a password
    Workers,
    /// Every entity under the name it had on a date (head only)
    Directory {
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Add an engineer, SMM or account
    Add {
        kind: EntityKind,
        name: String,
        /// First day the name is in force, defaults to today
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        project: Option<String>,
    },
    /// Remove an entity
    Remove { kind: EntityKind, id: String },
    /// Record a new name from a date on
    Rename {
        kind: EntityKind,
        id: String,
        name: String,
        /// Defaults to today
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        project: Option<String>,
    },
    /// Show the leadership table
    Leadership,
    /// Give a leadership role to someone
    AssignRole { role: Role, name: String },
    /// Show SMM to account assignments
    Links { smm_id: Option<String> },
    /// Assign an account to an SMM
    Link { smm_id: String, account_id: String },
    /// Remove an account from an SMM
    Unlink { smm_id: String, account_id: String },
    /// Log in
    Login {
        #[command(subcommand)]
        who: LoginAs,
    },
    /// Log out
    Logout,
    /// Show the current identity
    Whoami,
    /// Open a dashboard page
    Open { page: Page },
    /// Change the admin password
    Passwd { current: String, new: String },
    /// List tasks from a JSON file in list order
    Tasks {
        file: PathBuf,
        /// Only tomorrow's tasks
        #[arg(long, conflicts_with_all = ["date", "all"])]
        tomorrow: bool,
        /// Only the tasks on this date
        #[arg(long, conflicts_with = "all")]
        date: Option<NaiveDate>,
        /// Every task, not only today's
        #[arg(long)]
        all: bool,
    },
    /// Show the effective configuration
    Config,
}

#[derive(Subcommand)]
enum LoginAs {
    /// As the head, with the shared password
    Admin { password: String },
    /// As a worker from the roster
    Worker {
        id: String,
        /// ve or smm
        #[arg(long)]
        kind: WorkerKind,
    },
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = ConfigService::new(CrewPaths::new(cli.config_dir)?);
    let config = config_service.get_config()?;
    init_tracing(&config.log_level);

    let data_dir = config_service
        .paths()
        .resolve_data_dir(cli.data_dir, &config)?;
    let today = Local::now().date_naive();

    if let Commands::Config = cli.command {
        return commands::config::show(config_service.paths(), &config, &data_dir);
    }

    let store = FileKeyValueStore::open(&data_dir)
        .with_context(|| format!("Failed to open data dir {}", data_dir.display()))?;
    tracing::debug!(data_dir = %data_dir.display(), "starting");
    let mut app = App::open(Arc::new(store));

    match cli.command {
        Commands::Roster { kind } => commands::catalog::roster(&app, kind),
        Commands::History { kind, id } => commands::catalog::history(&app, kind, &id)?,
        Commands::Workers => commands::catalog::workers(&app),
        Commands::Directory { date } => {
            commands::catalog::directory(&mut app, date.unwrap_or(today))?
        }
        Commands::Add {
            kind,
            name,
            from,
            project,
        } => commands::catalog::add(&mut app, kind, name, from.unwrap_or(today), project)?,
        Commands::Remove { kind, id } => commands::catalog::remove(&mut app, kind, &id)?,
        Commands::Rename {
            kind,
            id,
            name,
            from,
            project,
        } => commands::catalog::rename(&mut app, kind, &id, name, from.unwrap_or(today), project)?,
        Commands::Leadership => commands::catalog::leadership(&app),
        Commands::AssignRole { role, name } => commands::catalog::assign_role(&mut app, role, name)?,
        Commands::Links { smm_id } => commands::catalog::links(&app, smm_id.as_deref()),
        Commands::Link { smm_id, account_id } => {
            commands::catalog::link(&mut app, &smm_id, &account_id)?
        }
        Commands::Unlink { smm_id, account_id } => {
            commands::catalog::unlink(&mut app, &smm_id, &account_id)?
        }
        Commands::Login { who } => match who {
            LoginAs::Admin { password } => commands::session::login_admin(&mut app, &password)?,
            LoginAs::Worker { id, kind } => commands::session::login_worker(&mut app, &id, kind)?,
        },
        Commands::Logout => commands::session::logout(&mut app)?,
        Commands::Whoami => commands::session::whoami(&app),
        Commands::Open { page } => commands::session::open(&mut app, page)?,
        Commands::Passwd { current, new } => commands::session::passwd(&mut app, &current, &new)?,
        Commands::Tasks {
            file,
            tomorrow,
            date,
            all,
        } => {
            let tab = match (all, tomorrow, date) {
                (true, _, _) => None,
                (_, true, _) => Some(DateTab::Tomorrow),
                (_, _, Some(date)) => Some(DateTab::On(date)),
                _ => Some(DateTab::Today),
            };
            commands::tasks::list(&file, tab, today)?
        }
        Commands::Config => {}
    }

    app.flush()?;
    Ok(())
}
