use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use kanri_lib::domain::entities::{BoardDraft, BoardPatch, Story, StoryDraft, StoryPatch};
use kanri_lib::domain::value_objects::{QueryKey, ResourceId};
use kanri_lib::infrastructure::notification::TracingNotifier;
use kanri_lib::shared::{AppConfig, init_logging};
use kanri_lib::{AppState, DeleteOutcome};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "kanri")]
#[command(about = "Boards and scrum client with optimistic updates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL (overrides KANRI_API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "JSON_LOGS")]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage boards
    Boards {
        #[command(subcommand)]
        command: BoardCommands,
    },
    /// Manage scrum stories
    Stories {
        #[command(subcommand)]
        command: StoryCommands,
    },
}

#[derive(Subcommand)]
enum BoardCommands {
    List,
    Create {
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    Rename {
        id: String,
        title: String,
    },
    Delete {
        id: String,
    },
    /// Reorder boards (ids in the new order)
    Reorder {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Subcommand)]
enum StoryCommands {
    List {
        #[arg(long)]
        sprint: Option<String>,
        #[arg(long)]
        epic: Option<String>,
    },
    Create {
        title: String,
        #[arg(long)]
        sprint: Option<String>,
        #[arg(long)]
        epic: Option<String>,
        #[arg(long)]
        points: Option<u32>,
    },
    /// Move a story to another sprint (omit --to for the backlog)
    Move {
        id: String,
        #[arg(long)]
        to: Option<String>,
        /// Sprint the story currently belongs to
        #[arg(long)]
        from: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.json_logs);
    info!("Starting kanri v{}", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    let state = AppState::new(config, Arc::new(TracingNotifier))?;

    match cli.command {
        Commands::Boards { command } => run_boards(&state, command).await?,
        Commands::Stories { command } => run_stories(&state, command).await?,
    }

    Ok(())
}

async fn run_boards(state: &AppState, command: BoardCommands) -> Result<()> {
    let key = QueryKey::boards();
    match command {
        BoardCommands::List => {
            let boards = state.boards.refresh(&key).await?;
            for board in boards.items() {
                println!("{}\t{}", board.id, board.title);
            }
        }
        BoardCommands::Create { title, description } => {
            state.boards.ensure_loaded(&key).await?;
            let draft = BoardDraft {
                description,
                ..BoardDraft::new(title)
            };
            let board = state.boards.create(&key, draft).await?;
            println!("{}", board.id);
        }
        BoardCommands::Rename { id, title } => {
            state.boards.ensure_loaded(&key).await?;
            state
                .boards
                .update(&key, &parse_id(id)?, BoardPatch::title(title))
                .await?;
        }
        BoardCommands::Delete { id } => {
            if state.boards.delete(&key, &parse_id(id.clone())?).await? == DeleteOutcome::AlreadyAbsent {
                info!("Board {} was already gone", id);
            }
        }
        BoardCommands::Reorder { ids } => {
            state.boards.ensure_loaded(&key).await?;
            let ids = ids.into_iter().map(parse_id).collect::<Result<Vec<_>>>()?;
            let settle = state.boards.reorder(&key, ids).await?;
            let boards = settle.wait().await?;
            for board in boards.items() {
                println!("{}\t{}\t{}", board.position, board.id, board.title);
            }
        }
    }
    Ok(())
}

async fn run_stories(state: &AppState, command: StoryCommands) -> Result<()> {
    match command {
        StoryCommands::List { sprint, epic } => {
            let key = story_key(sprint.as_deref(), epic.as_deref());
            let stories = state.stories.refresh(&key).await?;
            for story in stories.items() {
                print_story(story);
            }
        }
        StoryCommands::Create {
            title,
            sprint,
            epic,
            points,
        } => {
            let key = story_key(sprint.as_deref(), epic.as_deref());
            state.stories.ensure_loaded(&key).await?;
            let draft = StoryDraft {
                sprint_id: sprint,
                epic_id: epic,
                points,
                ..StoryDraft::new(title)
            };
            let story = state.stories.create(&key, draft).await?;
            print_story(&story);
        }
        StoryCommands::Move { id, to, from } => {
            let key = story_key(from.as_deref(), None);
            state.stories.ensure_loaded(&key).await?;
            let story = state
                .stories
                .update(&key, &parse_id(id)?, StoryPatch::move_to_sprint(to))
                .await?;
            print_story(&story);
        }
    }
    Ok(())
}

fn story_key(sprint: Option<&str>, epic: Option<&str>) -> QueryKey {
    let mut key = QueryKey::stories();
    if let Some(sprint) = sprint {
        key = key.with_filter("sprintId", sprint);
    }
    if let Some(epic) = epic {
        key = key.with_filter("epicId", epic);
    }
    key
}

fn print_story(story: &Story) {
    println!(
        "{}\t{}\t{}\t{}",
        story.id,
        story.title,
        story.sprint_id.as_deref().unwrap_or("backlog"),
        story
            .points
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
}

fn parse_id(value: String) -> Result<ResourceId> {
    ResourceId::new(value).map_err(|e| anyhow!(e))
}
