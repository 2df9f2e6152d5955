//! CLI argument definitions for `cork`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "cork",
    version,
    about = "corkboard -- epics, stories, and tasks on a column board"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Path to the .corkboard directory (overrides upward discovery)
    #[arg(long, global = true, env = "CORKBOARD_DIR", value_name = "DIR")]
    pub db: Option<String>,

    /// Actor name recorded on the audit trail
    #[arg(long, global = true, env = "CORKBOARD_ACTOR")]
    pub actor: Option<String>,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a corkboard database in the current directory
    Init(InitArgs),

    /// Print version information
    Version,

    /// Manage boards
    Board(BoardArgs),

    /// Manage a board's columns
    Column(ColumnArgs),

    /// Manage items (epics, stories, tasks)
    Item(ItemArgs),

    /// Bulk-import a nested JSON document of epics/stories/tasks
    ///
    /// There is no de-duplication key: re-running the same document
    /// duplicates previously imported items.
    Import(ImportArgs),

    /// Show the column board, optionally scoped to one epic's descendants
    View(ViewArgs),

    /// List a board's epics with their story/task counts
    Epics(EpicsArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Re-initialize even if a database already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct BoardArgs {
    #[command(subcommand)]
    pub command: BoardCommands,
}

#[derive(Subcommand, Debug)]
pub enum BoardCommands {
    /// Create a new board
    Create {
        /// Board name
        name: String,

        /// Board description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Also create the starter columns from config
        #[arg(long)]
        with_columns: bool,

        /// Record this board as the default target in config.yaml
        #[arg(long = "default")]
        set_default: bool,
    },

    /// List all boards
    List,

    /// Show one board and its columns
    Show {
        /// Board id
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct ColumnArgs {
    #[command(subcommand)]
    pub command: ColumnCommands,
}

#[derive(Subcommand, Debug)]
pub enum ColumnCommands {
    /// Add a column to a board (appended after the existing ones)
    Add {
        /// Column name
        name: String,

        /// Target board (defaults to the configured board)
        #[arg(long)]
        board: Option<String>,
    },

    /// List a board's columns in display order
    List {
        /// Target board (defaults to the configured board)
        #[arg(long)]
        board: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct ItemArgs {
    #[command(subcommand)]
    pub command: ItemCommands,
}

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// Create a single item
    Add {
        /// Item title
        title: String,

        /// Target board (defaults to the configured board)
        #[arg(long)]
        board: Option<String>,

        /// Target column, by id or name (defaults to the board's first column)
        #[arg(long)]
        column: Option<String>,

        /// Item type: epic, story, or task
        #[arg(short = 't', long = "type", default_value = "task")]
        item_type: String,

        /// Item description
        #[arg(short, long)]
        description: Option<String>,

        /// Parent item id (an epic for stories, a story for tasks)
        #[arg(long)]
        parent: Option<String>,

        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Show one item in detail
    Show {
        /// Item id
        id: String,
    },

    /// List items
    List {
        /// Target board (defaults to the configured board)
        #[arg(long)]
        board: Option<String>,

        /// Filter by column id
        #[arg(long)]
        column: Option<String>,

        /// Filter by item type
        #[arg(short = 't', long = "type")]
        item_type: Option<String>,
    },

    /// Edit an item's title, description, or tags
    Edit {
        /// Item id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// Replacement comma-separated tag list
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },

    /// Delete a single item; its direct children are re-parented to top level
    Rm {
        /// Item id
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON document to import
    pub file: Option<PathBuf>,

    /// Target board (defaults to the configured board)
    #[arg(long)]
    pub board: Option<String>,

    /// Print the expected document shape and exit
    #[arg(long)]
    pub show_format: bool,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Target board (defaults to the configured board)
    #[arg(long)]
    pub board: Option<String>,

    /// Restrict the view to one epic's stories and their tasks
    #[arg(long)]
    pub epic: Option<String>,
}

#[derive(Args, Debug)]
pub struct EpicsArgs {
    /// Target board (defaults to the configured board)
    #[arg(long)]
    pub board: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_import() {
        let cli = Cli::try_parse_from(["cork", "import", "items.json", "--board", "bo-1"]).unwrap();
        match cli.command {
            Some(Commands::Import(args)) => {
                assert_eq!(args.file.unwrap().to_str().unwrap(), "items.json");
                assert_eq!(args.board.as_deref(), Some("bo-1"));
                assert!(!args.show_format);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parses_item_add_with_tags() {
        let cli = Cli::try_parse_from([
            "cork", "item", "add", "Fix login", "-t", "story", "--tags", "auth,ui",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Item(args)) => match args.command {
                ItemCommands::Add { title, item_type, tags, .. } => {
                    assert_eq!(title, "Fix login");
                    assert_eq!(item_type, "story");
                    assert_eq!(tags, vec!["auth", "ui"]);
                }
                other => panic!("unexpected item command: {other:?}"),
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_are_global() {
        let cli = Cli::try_parse_from(["cork", "board", "list", "--json"]).unwrap();
        assert!(cli.global.json);
    }
}
