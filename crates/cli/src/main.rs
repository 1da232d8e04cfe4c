use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use shelf_app::{BookId, NewBook};
use shelf_cli::{views::render_error, AdminView, BookEdit, BooksClient, CatalogView, ClientError};

#[derive(Parser)]
#[command(name = "shelf", version, about = "Browse and manage the SHELF library catalog")]
struct Cli {
    /// Base URL of the SHELF server
    #[arg(long, env = "SHELF_URL", default_value = "http://127.0.0.1:8080", global = true)]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the public catalog
    Catalog,
    /// Manage catalog records
    Admin(AdminArgs),
}

#[derive(Args)]
struct AdminArgs {
    /// Admin password, checked by the server
    #[arg(long, env = "SHELF_ADMIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    action: AdminAction,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Check the admin password without changing anything
    Login,
    /// List every record with its id
    List,
    /// Add a book
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        image: String,
        /// Mark the new book as checked out
        #[arg(long)]
        unavailable: bool,
    },
    /// Edit a book; omitted fields keep their current value
    Edit {
        id: BookId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        available: Option<bool>,
    },
    /// Remove a book
    Remove { id: BookId },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init()
        .ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{}", render_error(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, ClientError> {
    let client = BooksClient::new(cli.url)?;

    match cli.command {
        Command::Catalog => Ok(CatalogView::load(&client).await?.render()),
        Command::Admin(args) => run_admin(client, args).await,
    }
}

async fn run_admin(client: BooksClient, args: AdminArgs) -> Result<String, ClientError> {
    // Entry gate: a supplied password must be accepted before anything else runs.
    if let Some(password) = &args.password {
        client.open_session(password).await?;
    }

    if let AdminAction::Login = args.action {
        return match args.password {
            Some(_) => Ok("Access granted".to_string()),
            None => Ok("No password given; the server decides on each change.".to_string()),
        };
    }

    let client = client.with_admin_password(args.password);
    let mut view = AdminView::load(client).await?;

    match args.action {
        AdminAction::Login | AdminAction::List => Ok(view.render()),
        AdminAction::Add {
            title,
            author,
            image,
            unavailable,
        } => {
            let book = view
                .add(NewBook {
                    title,
                    author,
                    available: !unavailable,
                    image,
                })
                .await?;
            Ok(format!("Added [{}] {}", book.id, book.title))
        }
        AdminAction::Edit {
            id,
            title,
            author,
            image,
            available,
        } => {
            let edit = BookEdit {
                title,
                author,
                available,
                image,
            };
            let book = view.edit(id, &edit).await?;
            Ok(format!("Updated [{}] {}", book.id, book.title))
        }
        AdminAction::Remove { id } => Ok(view.remove(id).await?.message),
    }
}
