//! LARQ CLI - browse the catalog, manage the local account and check out.
//!
//! # Usage
//!
//! ```bash
//! # List the featured bottles
//! larq catalog --category featured
//!
//! # Show one product with its colours
//! larq product bottle-purevis
//!
//! # Create an account (the session is kept in LARQ_STORAGE_PATH)
//! larq account signup -e jo@example.com -n "Jo" -p secret1 -c secret1
//!
//! # Buy two black Swig Tops and a set
//! larq checkout -i bottle-swig-top:Black -i bottle-swig-top:Black \
//!     --set bottle-swig-top,bottle-purevis \
//!     --card-number "4242 4242 4242 4242" --card-name "Jo" --expiry 12/27 --cvv 123
//! ```
//!
//! # Commands
//!
//! - `catalog` - List products, optionally for one category
//! - `product` - Show a product's variants and prices
//! - `account` - Sign up, log in, log out, show the current session
//! - `checkout` - Fill a cart and run the mock payment

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use larq_storefront::config::StorefrontConfig;
use larq_storefront::state::Storefront;
use larq_storefront::storage::FileStorage;

mod commands;

#[derive(Parser)]
#[command(name = "larq")]
#[command(author, version, about = "LARQ storefront from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog {
        /// Category tab (featured, smart, filtration, everyday, pitchers)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one product
    Product {
        /// Product id, e.g. bottle-purevis
        id: String,
    },
    /// Manage the local account
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Fill a cart and check out
    Checkout(CheckoutArgs),
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create an account and sign in
    Signup {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        password: String,

        /// Password confirmation
        #[arg(short = 'c', long)]
        confirm: String,
    },
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in account
    Whoami,
}

#[derive(Args)]
struct CheckoutArgs {
    /// Item to add, as `id[:colour[:size]]`; repeat to add more
    #[arg(short, long = "item")]
    items: Vec<String>,

    /// Two product ids to add as a set
    #[arg(long, value_delimiter = ',', num_args = 1)]
    set: Vec<String>,

    /// Sign in with this email before paying
    #[arg(long, requires = "password")]
    email: Option<String>,

    #[arg(long, requires = "email")]
    password: Option<String>,

    #[arg(long)]
    card_number: String,

    #[arg(long)]
    card_name: String,

    /// Expiry as MM/YY
    #[arg(long)]
    expiry: String,

    #[arg(long)]
    cvv: String,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry.dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(config.sentry.environment.clone().into()),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config errors are reported after tracing is up
    let config = StorefrontConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Logs go to stderr so command output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "larq_storefront=info,larq=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    // Return instead of exiting so the Sentry guard drops and flushes
    commands::finish(result)
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<String, commands::CommandError> {
    let storage = FileStorage::new(config.storage_path.clone());
    let mut shop = Storefront::new(config, storage);

    let output = match cli.command {
        Commands::Catalog { category } => commands::catalog::list(&shop, category.as_deref()),
        Commands::Product { id } => commands::catalog::show(&shop, &id)?,
        Commands::Account { action } => match action {
            AccountAction::Signup {
                email,
                name,
                password,
                confirm,
            } => commands::account::signup(&mut shop, &name, &email, &password, &confirm)?,
            AccountAction::Login { email, password } => {
                commands::account::login(&mut shop, &email, &password)?
            }
            AccountAction::Logout => commands::account::logout(&mut shop),
            AccountAction::Whoami => commands::account::whoami(&shop),
        },
        Commands::Checkout(args) => {
            let request = commands::checkout::CheckoutRequest {
                items: args.items,
                set: args.set,
                credentials: args.email.zip(args.password),
                card_number: args.card_number,
                card_name: args.card_name,
                expiry: args.expiry,
                cvv: args.cvv,
            };
            commands::checkout::run(&mut shop, request).await?
        }
    };
    Ok(output)
}
