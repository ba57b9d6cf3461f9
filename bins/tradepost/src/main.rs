//! Tradepost CLI - marketplace access from the terminal
//!
//! Thin front end over `tradepost-api-client`: every subcommand maps onto one
//! client operation and prints the response as JSON or as one-line summaries.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod output;

use commands::{auth, items, media, messages, transactions, users, wishlist};
use context::GlobalArgs;
use output::OutputFormat;

/// Command-line client for the Tradepost marketplace
#[derive(Parser)]
#[command(name = "tradepost")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Backend root, e.g. http://localhost:8000/api
    #[arg(long, global = true, env = "TRADEPOST_API_URL")]
    base_url: Option<String>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// File holding the stored credential
    #[arg(long, global = true, env = "TRADEPOST_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        /// Account name
        #[arg(short, long)]
        username: String,

        /// Contact email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Postal address
        #[arg(long)]
        address: Option<String>,

        /// Phone number (repeatable)
        #[arg(long = "phone")]
        phones: Vec<String>,
    },

    /// Log in and store the returned credential
    Login {
        /// Account name
        username: String,

        /// Account password
        #[arg(short, long, env = "TRADEPOST_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored credential
    Logout,

    /// Browse and manage item listings
    Items {
        #[command(subcommand)]
        action: ItemsAction,
    },

    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },

    /// Inspect and update user profiles
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Start and track transactions
    Transactions {
        #[command(subcommand)]
        action: TransactionsAction,
    },

    /// Send and read messages
    Messages {
        #[command(subcommand)]
        action: MessagesAction,
    },

    /// Print the browsable URL for a stored media path (no network access)
    MediaUrl {
        /// Media path as returned by the backend
        path: String,
    },
}

#[derive(Subcommand)]
enum ItemsAction {
    /// List items
    List {
        /// Free-text search
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort key understood by the backend
        #[arg(long, default_value = "")]
        sort: String,
    },

    /// Show one item
    Get {
        /// Item id
        id: i64,
    },

    /// Create a listing
    Create {
        /// Listing title
        #[arg(short, long)]
        title: String,

        /// Item condition, e.g. "new" or "used"
        #[arg(long)]
        condition: String,

        /// Category id
        #[arg(long)]
        category: i64,

        /// Longer description
        #[arg(short, long)]
        description: Option<String>,

        /// Sale price
        #[arg(long, conflicts_with = "exchange_for")]
        price: Option<i64>,

        /// Offer the item in exchange for this
        #[arg(long)]
        exchange_for: Option<String>,

        /// Image file to attach (repeatable)
        #[arg(short, long = "image")]
        images: Vec<PathBuf>,
    },

    /// Update a listing
    Update {
        /// Item id
        id: i64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New condition
        #[arg(long)]
        condition: Option<String>,

        /// New price
        #[arg(long)]
        price: Option<i64>,

        /// New category id
        #[arg(long)]
        category: Option<i64>,

        /// Mark the listing as available (true) or closed (false)
        #[arg(long)]
        available: Option<bool>,
    },

    /// Delete a listing
    Delete {
        /// Item id
        id: i64,
    },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Add an item
    Add {
        /// Item id
        item_id: i64,
    },

    /// List wishlisted items
    List,

    /// Remove an item
    Remove {
        /// Item id
        item_id: i64,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// Show the logged-in user
    Me,

    /// Update the logged-in user
    UpdateMe {
        /// New email
        #[arg(short, long)]
        email: Option<String>,

        /// New password
        #[arg(short, long)]
        password: Option<String>,

        /// New address
        #[arg(long)]
        address: Option<String>,
    },

    /// Show another user
    Get {
        /// User id
        id: i64,
    },
}

#[derive(Subcommand)]
enum TransactionsAction {
    /// Start a transaction for an item
    Create {
        /// Item id
        item_id: i64,
    },

    /// List transactions
    List,

    /// Change a transaction's status
    Status {
        /// Transaction id
        id: i64,

        /// New status, e.g. "completed"
        status: String,
    },

    /// Delete a transaction
    Delete {
        /// Transaction id
        id: i64,
    },
}

#[derive(Subcommand)]
enum MessagesAction {
    /// Send a message about an item
    Send {
        /// Recipient user id
        receiver_id: i64,

        /// Item the message is about
        item_id: i64,

        /// Message text
        content: String,
    },

    /// Show the conversation with a user about an item
    History {
        /// Other user id
        user_id: i64,

        /// Item id
        item_id: i64,
    },

    /// List conversations
    Conversations,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        Some(EnvFilter::new("tradepost=debug,tradepost_api_client=debug"))
    } else {
        EnvFilter::try_from_default_env().ok()
    };
    if let Some(filter) = filter {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let globals = GlobalArgs {
        base_url: cli.base_url,
        config: cli.config,
        token_file: cli.token_file,
        format: cli.format,
    };

    let result = match cli.command {
        Commands::Register {
            username,
            email,
            password,
            address,
            phones,
        } => auth::register(&globals, username, email, password, address, phones).await,
        Commands::Login { username, password } => auth::login(&globals, &username, &password).await,
        Commands::Logout => auth::logout(&globals),

        Commands::Items { action } => match action {
            ItemsAction::List { search, sort } => items::list(&globals, &search, &sort).await,
            ItemsAction::Get { id } => items::get(&globals, id).await,
            ItemsAction::Create {
                title,
                condition,
                category,
                description,
                price,
                exchange_for,
                images,
            } => {
                let listing = items::Listing {
                    title,
                    condition,
                    category,
                    description,
                    price,
                    exchange_for,
                    images,
                };
                items::create(&globals, listing).await
            }
            ItemsAction::Update {
                id,
                title,
                description,
                condition,
                price,
                category,
                available,
            } => {
                let update = items::ItemUpdate {
                    title,
                    description,
                    condition,
                    price,
                    category,
                    status: available,
                    ..items::ItemUpdate::default()
                };
                items::update(&globals, id, update).await
            }
            ItemsAction::Delete { id } => items::delete(&globals, id).await,
        },

        Commands::Wishlist { action } => match action {
            WishlistAction::Add { item_id } => wishlist::add(&globals, item_id).await,
            WishlistAction::List => wishlist::list(&globals).await,
            WishlistAction::Remove { item_id } => wishlist::remove(&globals, item_id).await,
        },

        Commands::Users { action } => match action {
            UsersAction::Me => users::me(&globals).await,
            UsersAction::UpdateMe {
                email,
                password,
                address,
            } => users::update_me(&globals, email, password, address).await,
            UsersAction::Get { id } => users::get(&globals, id).await,
        },

        Commands::Transactions { action } => match action {
            TransactionsAction::Create { item_id } => transactions::create(&globals, item_id).await,
            TransactionsAction::List => transactions::list(&globals).await,
            TransactionsAction::Status { id, status } => {
                transactions::status(&globals, id, status).await
            }
            TransactionsAction::Delete { id } => transactions::delete(&globals, id).await,
        },

        Commands::Messages { action } => match action {
            MessagesAction::Send {
                receiver_id,
                item_id,
                content,
            } => messages::send(&globals, receiver_id, item_id, &content).await,
            MessagesAction::History { user_id, item_id } => {
                messages::history(&globals, user_id, item_id).await
            }
            MessagesAction::Conversations => messages::conversations(&globals).await,
        },

        Commands::MediaUrl { path } => media::run(&globals, &path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
