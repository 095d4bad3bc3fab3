//! groceteria - terminal client for the groceteria shop
//!
//! Usage:
//!   groceteria login --email <email> --password <password> [--admin]
//!   groceteria items [--category <CATEGORY|100>] [--page <n>]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use groceteria_admin::Host;
use groceteria_core::{CategoryFilter, ClientConfig, FileStore, GroceteriaClient, Session};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "groceteria")]
#[command(about = "Terminal client for the groceteria shop")]
struct Cli {
    /// API base URL, overrides GROCETERIA_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file, overrides GROCETERIA_SESSION_FILE
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Items per page, overrides GROCETERIA_PAGE_SIZE
    #[arg(long, global = true)]
    page_size: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and keep the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Sign in to the admin console
        #[arg(long)]
        admin: bool,
    },
    /// Forget the stored session
    Logout {
        #[arg(long)]
        admin: bool,
    },
    /// Show who is signed in
    Whoami,
    /// Admin item list, optionally filtered by category
    Items {
        /// Category name, or 100 for all items
        #[arg(long, default_value = "100")]
        category: CategoryFilter,
        /// One-based page number within the category
        #[arg(long)]
        page: Option<u32>,
    },
    /// Delete an item and show the refreshed list
    DeleteItem {
        id: u64,
        #[arg(long, default_value = "100")]
        category: CategoryFilter,
    },
    /// Show where an item is edited
    EditItem { id: u64 },
    /// Search items by keyword
    Search {
        keyword: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// Cart lines, for one user or everyone
    Cart {
        #[arg(long)]
        user: Option<u64>,
    },
    /// Orders, for one user or everyone
    Orders {
        #[arg(long)]
        user: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "groceteria_admin=warn,groceteria_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(path) = cli.session_file {
        config.session_file = path;
    }
    if let Some(size) = cli.page_size.filter(|s| *s > 0) {
        config.page_size = size;
    }
    tracing::debug!(?config, "resolved configuration");

    let session = Session::new(FileStore::open(&config.session_file)?);
    let mut host = Host::new(
        GroceteriaClient::new(&config.api_url),
        session,
        config.page_size,
    );

    let output = match cli.command {
        Commands::Login {
            email,
            password,
            admin,
        } => host.login(&email, &password, admin)?,
        Commands::Logout { admin } => host.logout(admin)?,
        Commands::Whoami => host.whoami(),
        Commands::Items { category, page } => host.item_list(category, page)?,
        Commands::DeleteItem { id, category } => host.delete_item(id, category)?,
        Commands::EditItem { id } => host.edit_item(id)?,
        Commands::Search {
            keyword,
            page,
            size,
        } => host.search(&keyword, page, size)?,
        Commands::Cart { user } => host.cart(user)?,
        Commands::Orders { user } => host.orders(user)?,
    };
    print!("{output}");
    tracing::debug!(requests = host.requests_sent(), "done");
    Ok(())
}
