use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use shelf_app::{
    modules::authors::{models::NewAuthor, repository::AuthorRepository},
    storage::{RepositoryError, Storage},
};
use shelf_kernel::settings::{Settings, StorageBackend};
use uuid::Uuid;

/// Books and authors service
#[derive(Debug, Parser)]
#[command(name = "shelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Create any missing tables and exit
    InitSchema,
    /// Manage authors
    Author {
        #[command(subcommand)]
        command: AuthorCommand,
    },
}

#[derive(Debug, Subcommand)]
enum AuthorCommand {
    /// Insert an author and print its id
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: String,
    },
    /// Print an author as JSON
    Show {
        /// Author id
        id: Uuid,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load shelf settings")?;
    shelf_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Serve => shelf_app::run(settings).await,
        Command::InitSchema => {
            let storage = persistent_storage(&settings).await?;
            let registry = shelf_app::build_registry(&storage);
            storage.ensure_schema(&registry.collect_schema()).await?;
            tracing::info!("schema is up to date");
            Ok(())
        }
        Command::Author {
            command:
                AuthorCommand::Add {
                    first_name,
                    last_name,
                    email,
                },
        } => {
            let author = NewAuthor::new(first_name, last_name, email)?;
            let storage = persistent_storage(&settings).await?;

            match storage.authors.create_author(author).await {
                Ok(id) => {
                    tracing::info!(author_id = %id, "author created");
                    println!("{id}");
                    Ok(())
                }
                Err(e @ RepositoryError::UniqueViolation { .. }) => bail!("{e}"),
                Err(e) => Err(e).context("failed to create author"),
            }
        }
        Command::Author {
            command: AuthorCommand::Show { id },
        } => {
            let storage = persistent_storage(&settings).await?;
            let author = storage
                .authors
                .get_author(id)
                .await
                .context("failed to fetch author")?;

            match author {
                Some(author) => {
                    println!("{}", serde_json::to_string_pretty(&author)?);
                    Ok(())
                }
                None => bail!("author {id} does not exist"),
            }
        }
    }
}

/// Commands that write outside a server process only make sense against
/// a real database.
async fn persistent_storage(settings: &Settings) -> anyhow::Result<Storage> {
    if settings.database.backend == StorageBackend::Memory {
        bail!("this command requires database.backend = \"postgres\"");
    }
    Storage::connect(&settings.database)
        .await
        .context("failed to open storage")
}
