//! Citropoth CLI - drive the storefront from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! citropoth catalog list --category ceramics
//!
//! # Shop and check out
//! citropoth cart add 1
//! citropoth cart update 1 -- -1
//! citropoth checkout
//!
//! # Accounts
//! citropoth account register -n "Ada Potter" -e ada@example.com
//! citropoth account login -e ada@example.com
//!
//! # Produce the admin password hash for CITROPOTH_ADMIN_PASSWORD_HASH
//! citropoth admin hash-password
//! ```
//!
//! State is kept in `CITROPOTH_DATA_DIR` (default `.citropoth`), one JSON file
//! per entity. Passwords are read from `CITROPOTH_PASSWORD` when not given on
//! the command line.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use citropoth_core::Category;
use citropoth_core::Price;
use citropoth_storefront::db::FileStore;
use citropoth_storefront::services::CraftAdvisor;
use citropoth_storefront::{AppError, Page, Storefront, StorefrontConfig};

#[allow(clippy::print_stdout)]
mod commands;

type Shop = Storefront<FileStore>;

#[derive(Parser)]
#[command(name = "citropoth")]
#[command(author, version, about = "Citropoth storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Turn the cart into an order
    Checkout,
    /// Register, sign in and view orders
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Review a product
    Review {
        #[command(subcommand)]
        action: ReviewAction,
    },
    /// Read the journal
    Blog {
        #[command(subcommand)]
        action: BlogAction,
    },
    /// Ask the craft advisor
    Advise {
        #[command(subcommand)]
        action: AdviseAction,
    },
    /// Administrator tools
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Show which page the current session lands on
    Page {
        /// Page slug (e.g., `admin`, `limited-releases`)
        page: Page,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Only show one category
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Show a product with its reviews
    Show { id: String },
    /// List limited releases
    Limited,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one of a product
    Add { id: String },
    /// Change a line's quantity by a signed amount
    Update {
        id: String,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Remove a line
    Remove { id: String },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create a customer account
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "CITROPOTH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "CITROPOTH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the current session
    Whoami,
    /// List your orders
    Orders,
}

#[derive(Subcommand)]
enum ReviewAction {
    /// Post a review
    Add {
        /// Product ID
        id: String,
        /// Stars from 1 to 5
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        #[arg(short, long)]
        comment: String,
    },
}

#[derive(Subcommand)]
enum BlogAction {
    /// List journal posts
    List,
    /// Show a journal post
    Show { id: String },
}

#[derive(Subcommand)]
enum AdviseAction {
    /// Suggest a craft project for an interest
    Recommend { hint: String },
    /// Write a short story for a product
    Story {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage journal posts
    Blog {
        #[command(subcommand)]
        action: AdminBlogAction,
    },
    /// List registered customers
    Users,
    /// Print an Argon2 hash for `CITROPOTH_ADMIN_PASSWORD_HASH`
    HashPassword {
        #[arg(short, long, env = "CITROPOTH_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Catalog a new product
    Add(ProductFields),
    /// Change fields of an existing product
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductPatch,
    },
    /// Delete a product
    Delete { id: String },
}

#[derive(Args)]
struct ProductFields {
    #[arg(short, long)]
    name: String,
    /// Price in dollars (e.g., 45 or 45.50)
    #[arg(short, long)]
    price: Price,
    #[arg(short, long)]
    category: Category,
    #[arg(short, long)]
    description: String,
    #[arg(short, long)]
    image: Option<String>,
    /// Mark as a limited release
    #[arg(long)]
    limited: bool,
}

#[derive(Args)]
struct ProductPatch {
    #[arg(short, long)]
    name: Option<String>,
    #[arg(short, long)]
    price: Option<Price>,
    #[arg(short, long)]
    category: Option<Category>,
    #[arg(short, long)]
    description: Option<String>,
    #[arg(short, long)]
    image: Option<String>,
    /// Set or clear the limited-release flag
    #[arg(long)]
    limited: Option<bool>,
}

#[derive(Subcommand)]
enum AdminBlogAction {
    /// Publish a journal post
    Add(BlogFields),
    /// Change fields of an existing post
    Update {
        id: String,
        #[command(flatten)]
        fields: BlogPatch,
    },
    /// Delete a journal post
    Delete { id: String },
}

#[derive(Args)]
struct BlogFields {
    #[arg(short, long)]
    title: String,
    #[arg(short, long)]
    excerpt: String,
    #[arg(long)]
    content: String,
    #[arg(short, long)]
    category: String,
    #[arg(short, long)]
    image: Option<String>,
}

#[derive(Args)]
struct BlogPatch {
    #[arg(short, long)]
    title: Option<String>,
    #[arg(short, long)]
    excerpt: Option<String>,
    #[arg(long)]
    content: Option<String>,
    #[arg(short, long)]
    category: Option<String>,
    #[arg(short, long)]
    image: Option<String>,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

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

fn init_tracing() {
    // Logs go to stderr so command output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "citropoth_storefront=info,citropoth_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Hashing needs no configuration; it is how the admin hash gets configured
    if let Commands::Admin {
        action: AdminAction::HashPassword { password },
    } = &cli.command
    {
        return finish(commands::admin::hash_password(password));
    }

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => return finish(Err(AppError::from(e))),
    };

    let _sentry_guard = init_sentry(&config);
    init_tracing();

    finish(run(cli.command, &config).await)
}

#[allow(clippy::print_stderr)]
fn finish(result: citropoth_storefront::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.report();
            eprintln!("error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &StorefrontConfig) -> citropoth_storefront::Result<()> {
    let store = FileStore::open(&config.data_dir)?;
    let mut shop: Shop = Storefront::open(store, config);

    match command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { category } => commands::catalog::list(&shop, category),
            CatalogAction::Show { id } => commands::catalog::show(&shop, &id.into())?,
            CatalogAction::Limited => commands::catalog::limited(&shop),
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&shop),
            CartAction::Add { id } => commands::cart::add(&mut shop, &id.into())?,
            CartAction::Update { id, delta } => {
                commands::cart::update(&mut shop, &id.into(), delta)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut shop, &id.into())?,
            CartAction::Clear => commands::cart::clear(&mut shop),
        },
        Commands::Checkout => commands::cart::checkout(&mut shop)?,
        Commands::Account { action } => match action {
            AccountAction::Register {
                name,
                email,
                password,
            } => commands::account::register(&mut shop, &name, &email, &password)?,
            AccountAction::Login { email, password } => {
                commands::account::login(&mut shop, &email, &password)?;
            }
            AccountAction::Logout => commands::account::logout(&mut shop),
            AccountAction::Whoami => commands::account::whoami(&shop),
            AccountAction::Orders => commands::account::orders(&shop),
        },
        Commands::Review { action } => match action {
            ReviewAction::Add {
                id,
                rating,
                comment,
            } => commands::catalog::review(&mut shop, &id.into(), rating, &comment)?,
        },
        Commands::Blog { action } => match action {
            BlogAction::List => commands::blog::list(&shop),
            BlogAction::Show { id } => commands::blog::show(&shop, &id.into())?,
        },
        Commands::Advise { action } => {
            let advisor = CraftAdvisor::from_config(config.gemini.as_ref());
            match action {
                AdviseAction::Recommend { hint } => {
                    commands::advise::recommend(&advisor, &hint).await;
                }
                AdviseAction::Story { id } => {
                    commands::advise::story(&shop, &advisor, &id.into()).await?;
                }
            }
        }
        Commands::Admin { action } => match action {
            AdminAction::Product { action } => match action {
                ProductAction::Add(fields) => commands::admin::add_product(&mut shop, fields)?,
                ProductAction::Update { id, fields } => {
                    commands::admin::update_product(&mut shop, &id.into(), fields)?;
                }
                ProductAction::Delete { id } => {
                    commands::admin::delete_product(&mut shop, &id.into())?;
                }
            },
            AdminAction::Blog { action } => match action {
                AdminBlogAction::Add(fields) => commands::admin::add_blog_post(&mut shop, fields)?,
                AdminBlogAction::Update { id, fields } => {
                    commands::admin::update_blog_post(&mut shop, &id.into(), fields)?;
                }
                AdminBlogAction::Delete { id } => {
                    commands::admin::delete_blog_post(&mut shop, &id.into())?;
                }
            },
            AdminAction::Users => commands::admin::users(&shop)?,
            AdminAction::HashPassword { password } => commands::admin::hash_password(&password)?,
        },
        Commands::Page { page } => commands::page(&shop, page),
    }

    Ok(())
}
