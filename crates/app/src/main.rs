//! Chorale - ticketing for La Grande Chorale de Sainte Croix
//!
//! Lists performances with live availability, shows the payment prompt for a
//! purchase, and gives the administrator event editing and a sales dashboard.

use std::path::PathBuf;
use std::process::ExitCode;

use chorale_core::{hash_secret, EventDraft, EventPatch, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod state;
mod viewmodel;

use state::{AppState, CONFIG_FILE};
use viewmodel::{admin, events, Listing};

#[derive(Parser)]
#[command(name = "chorale")]
#[command(about = "Event listing and ticket sales for the choir")]
#[command(version)]
struct Cli {
    /// Directory holding the database and config (defaults to the user data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (defaults to <data-dir>/chorale.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Admin password for this run
    #[arg(long, global = true, env = "CHORALE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events
    List {
        #[arg(long, value_enum, default_value_t = Listing::Upcoming)]
        show: Listing,
    },

    /// Show one event in detail
    Show { id: String },

    /// Show how to pay for tickets
    Buy {
        id: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },

    /// Administration (requires --password)
    #[command(subcommand)]
    Admin(AdminCommand),

    /// Print an Argon2 hash for the admin_password_hash setting
    HashPassword { secret: String },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Sales totals and per-event chart
    Dashboard,

    /// Create an event
    Create(CreateArgs),

    /// Change fields of an event
    Update {
        id: String,
        #[command(flatten)]
        fields: UpdateArgs,
    },

    /// Record tickets sold
    Sell {
        id: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },

    /// Delete an event
    Remove { id: String },

    /// Restore the built-in events
    Reset,
}

#[derive(Args)]
struct CreateArgs {
    #[arg(long)]
    title: String,
    /// YYYY-MM-DD
    #[arg(long)]
    date: String,
    /// HH:MM
    #[arg(long, default_value = "")]
    time: String,
    #[arg(long, default_value = "")]
    venue: String,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    price: f64,
    #[arg(long, allow_negative_numbers = true)]
    capacity: i64,
    #[arg(long, default_value = "")]
    cover: String,
    #[arg(long, default_value = "")]
    description: String,
}

impl From<CreateArgs> for EventDraft {
    fn from(args: CreateArgs) -> Self {
        EventDraft {
            title: args.title,
            date: args.date,
            time: args.time,
            venue: args.venue,
            price: args.price,
            capacity: args.capacity,
            sold: 0,
            cover: args.cover,
            description: args.description,
        }
    }
}

#[derive(Args)]
struct UpdateArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    time: Option<String>,
    #[arg(long)]
    venue: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    price: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    capacity: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    sold: Option<i64>,
    #[arg(long)]
    cover: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl From<UpdateArgs> for EventPatch {
    fn from(args: UpdateArgs) -> Self {
        EventPatch {
            title: args.title,
            date: args.date,
            time: args.time,
            venue: args.venue,
            price: args.price,
            capacity: args.capacity,
            sold: args.sold,
            cover: args.cover,
            description: args.description,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Erreur : {e}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    if let Commands::HashPassword { secret } = &cli.command {
        return Ok(format!("{}\n", hash_secret(secret)?));
    }

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => AppState::data_path()?,
    };
    let config_path = cli.config.unwrap_or_else(|| data_dir.join(CONFIG_FILE));
    tracing::info!(data_dir = %data_dir.display(), "Starting Chorale");

    let mut state = AppState::new(&data_dir, &config_path)?;
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::List { show } => Ok(events::render_listing(&state, show, today)),
        Commands::Show { id } => events::render_detail(&state, &id),
        Commands::Buy { id, quantity } => events::render_purchase(&state, &id, quantity),
        Commands::Admin(command) => {
            state.login(cli.password.as_deref())?;
            run_admin(&mut state, command)
        }
        Commands::HashPassword { secret } => Ok(format!("{}\n", hash_secret(&secret)?)),
    }
}

fn run_admin(state: &mut AppState, command: AdminCommand) -> Result<String> {
    match command {
        AdminCommand::Dashboard => admin::render_dashboard(state),
        AdminCommand::Create(args) => admin::create_event(state, args.into()),
        AdminCommand::Update { id, fields } => admin::update_event(state, &id, fields.into()),
        AdminCommand::Sell { id, quantity } => admin::record_sale(state, &id, quantity),
        AdminCommand::Remove { id } => admin::remove_event(state, &id),
        AdminCommand::Reset => admin::reset_events(state),
    }
}
