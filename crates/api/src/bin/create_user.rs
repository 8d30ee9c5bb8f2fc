//! Create a user and print its API token.

use api::config::database_url_from_env;
use clap::Parser;
use database::{user, validation, Database, User};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "create-user")]
#[command(about = "Create a prompt server user and print its bearer token")]
struct Args {
    /// Display name
    #[arg(long)]
    name: String,

    /// Bearer token to assign (generated when omitted)
    #[arg(long)]
    token: Option<String>,

    /// SQLite database URL (defaults to SQLITE_PATH)
    #[arg(long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    validation::validate_name(&args.name)?;

    let url = args.database.unwrap_or_else(database_url_from_env);
    let db = Database::connect(&url).await?;
    db.migrate().await?;

    let new_user = User {
        id: Uuid::new_v4().to_string(),
        name: args.name.trim().to_string(),
        api_token: args
            .token
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string()),
    };
    user::create_user(db.pool(), &new_user).await?;
    info!(id = %new_user.id, name = %new_user.name, "Created user");

    println!("{}", new_user.api_token);

    db.close().await;
    Ok(())
}
