/*
[INPUT]:  CLI arguments, YAML configuration file
[OUTPUT]: Executed commands against the disposition service
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or the startup flow
*/

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::AppContext;

#[derive(Parser, Debug)]
#[command(name = "dispo", version, about = "Task disposition tracking client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a configuration file interactively
    Init {
        /// Where to write the config; defaults to the user config directory
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Sign in to the disposition service
    Login {
        #[arg(long)]
        username: Option<String>,
    },
    /// Sign out and drop the persisted session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List tasks
    Tasks {
        /// Drafts awaiting disposition (leader view)
        #[arg(long)]
        drafts: bool,
        /// Tasks assigned to one section, e.g. SECTION_OPERATIONS
        #[arg(long, value_name = "ROLE", conflicts_with = "drafts")]
        section: Option<String>,
    },
    /// Inspect or manage a single task
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },
    /// Work a task's checklist stages
    Checklist {
        #[command(subcommand)]
        command: ChecklistCommand,
    },
    /// Show the notification feed
    Notifications {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Dashboard statistics and stuck tasks
    Stats,
}

#[derive(Subcommand, Debug)]
enum TaskCommand {
    /// Show a task with its checklist
    Show { task_id: String },
    /// Create a draft task (leaders only)
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// 1 = low, 2 = medium, 3 = high
        #[arg(long, default_value_t = 2)]
        priority: u8,
        /// Due date, YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        due_date: String,
    },
    /// Disposition a draft task to a section (leaders only)
    Disposition {
        task_id: String,
        #[arg(long, value_name = "ROLE")]
        section: String,
        #[arg(long)]
        note: String,
    },
}

#[derive(Subcommand, Debug)]
enum ChecklistCommand {
    /// Start (or resume) the actionable stage
    Start { task_id: String, item_id: String },
    /// Complete the stage currently in progress
    Complete { task_id: String, item_id: String },
    /// Flag the in-progress stage as blocked
    Block {
        task_id: String,
        item_id: String,
        #[arg(long)]
        note: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    if let Command::Init { output } = &args.command {
        return cli::init::run_init(output.clone());
    }

    let context = AppContext::build(args.config_path.as_deref())?;

    match args.command {
        Command::Init { .. } => unreachable!("handled above"),
        Command::Login { username } => cli::session::login(&context, username).await,
        Command::Logout => cli::session::logout(&context),
        Command::Whoami => cli::session::whoami(&context),
        Command::Tasks { drafts, section } => {
            cli::tasks::list(&context, drafts, section.as_deref()).await
        }
        Command::Task { command } => match command {
            TaskCommand::Show { task_id } => cli::tasks::show(&context, &task_id).await,
            TaskCommand::Create {
                title,
                description,
                priority,
                due_date,
            } => cli::tasks::create(&context, title, description, priority, &due_date).await,
            TaskCommand::Disposition {
                task_id,
                section,
                note,
            } => cli::tasks::disposition(&context, &task_id, &section, note).await,
        },
        Command::Checklist { command } => match command {
            ChecklistCommand::Start { task_id, item_id } => {
                cli::tasks::checklist_start(&context, &task_id, &item_id).await
            }
            ChecklistCommand::Complete { task_id, item_id } => {
                cli::tasks::checklist_complete(&context, &task_id, &item_id).await
            }
            ChecklistCommand::Block {
                task_id,
                item_id,
                note,
            } => cli::tasks::checklist_block(&context, &task_id, &item_id, note).await,
        },
        Command::Notifications { page } => cli::notifications::list(&context, page).await,
        Command::Stats => cli::monitor::stats(&context).await,
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
