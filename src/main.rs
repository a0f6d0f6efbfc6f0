use std::sync::Arc;

use cardlist::config::{ApiConfig, ConfigError, ConfigOverrides};
use cardlist::{ApiError, CardListController, Reference, TrelloClient};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("api: {0}")]
    Api(#[from] ApiError),
}

#[derive(Parser, Debug)]
#[command(name = "cardlist", about = "List the cards on a board or list")]
struct Cli {
    /// API root. Falls back to `TRELLO_BASE_URL`, then the public API.
    #[arg(long)]
    base_url: Option<String>,

    /// Falls back to `TRELLO_API_KEY`.
    #[arg(long)]
    api_key: Option<String>,

    /// Falls back to `TRELLO_API_TOKEN`.
    #[arg(long)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cards on a board.
    Board {
        board_id: String,
        /// Look the board up first and list cards from the resolved value.
        #[arg(long)]
        by_value: bool,
    },
    /// Cards in a list.
    List {
        list_id: String,
        /// Look the list up first and list cards from the resolved value.
        #[arg(long)]
        by_value: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ApiConfig::from_env_with(ConfigOverrides {
        base_url: cli.base_url,
        api_key: cli.api_key,
        token: cli.token,
    })?;
    let client = Arc::new(TrelloClient::new(&config)?);

    let reference = match cli.command {
        Command::Board { board_id, by_value: false } => Reference::BoardId(board_id),
        Command::Board { board_id, by_value: true } => Reference::Board(client.board(&board_id).await?),
        Command::List { list_id, by_value: false } => Reference::ListId(list_id),
        Command::List { list_id, by_value: true } => Reference::List(client.list(&list_id).await?),
    };

    let mut controller = CardListController::new(client);
    controller.set_mode(reference);
    controller.next_update().await;

    println!("{}", controller.title());
    for cell in controller.cells() {
        println!("  {cell}");
    }
    Ok(())
}
