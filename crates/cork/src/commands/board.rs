//! `cork board` -- create, list, and show boards.

use anyhow::{Context, Result};
use serde::Serialize;

use corkboard_core::board::{Board, Column};
use corkboard_storage::Storage;

use crate::cli::{BoardArgs, BoardCommands};
use crate::context::RuntimeContext;
use crate::output::{output_json, output_table};

/// Execute the `cork board` command.
pub fn run(ctx: &RuntimeContext, args: &BoardArgs) -> Result<()> {
    match &args.command {
        BoardCommands::Create {
            name,
            description,
            with_columns,
            set_default,
        } => run_create(ctx, name, description, *with_columns, *set_default),
        BoardCommands::List => run_list(ctx),
        BoardCommands::Show { id } => run_show(ctx, id),
    }
}

fn run_create(
    ctx: &RuntimeContext,
    name: &str,
    description: &str,
    with_columns: bool,
    set_default: bool,
) -> Result<()> {
    let store = ctx.open_store()?;
    let board = store.create_board(name, description, &ctx.actor)?;

    if with_columns {
        for column_name in &ctx.config.starter_columns {
            store.create_column(&board.id, column_name, &ctx.actor)?;
        }
    }

    if set_default {
        let dir = ctx
            .corkboard_dir
            .as_deref()
            .context("no .corkboard directory to store the default board in")?;
        let mut config = ctx.config.clone();
        config.default_board = Some(board.id.clone());
        corkboard_config::save_config(dir, &config)
            .context("failed to update config.yaml with the default board")?;
    }

    if ctx.json {
        output_json(&board);
    } else if !ctx.quiet {
        println!("Created board: {}", board.id);
        println!("  Name: {}", board.name);
        if with_columns {
            println!("  Columns: {}", ctx.config.starter_columns.join(", "));
        }
        if set_default {
            println!("  Set as default board");
        }
    }

    Ok(())
}

fn run_list(ctx: &RuntimeContext) -> Result<()> {
    let store = ctx.open_store()?;
    let boards = store.list_boards()?;

    if ctx.json {
        output_json(&boards);
    } else if boards.is_empty() {
        println!("No boards yet. Create one with `cork board create <name>`.");
    } else {
        let headers = &["ID", "NAME", "DESCRIPTION"];
        let rows: Vec<Vec<String>> = boards
            .iter()
            .map(|b| vec![b.id.clone(), b.name.clone(), b.description.clone()])
            .collect();
        output_table(headers, &rows);
    }

    Ok(())
}

/// View model for `board show --json`: the board plus its columns.
#[derive(Serialize)]
struct BoardDetail {
    #[serde(flatten)]
    board: Board,
    columns: Vec<Column>,
}

fn run_show(ctx: &RuntimeContext, id: &str) -> Result<()> {
    let store = ctx.open_store()?;
    let board = store.get_board(id)?;
    let columns = store.list_columns(id)?;

    if ctx.json {
        output_json(&BoardDetail { board, columns });
    } else {
        println!("{} -- {}", board.id, board.name);
        if !board.description.is_empty() {
            println!("{}", board.description);
        }
        if columns.is_empty() {
            println!("\nNo columns yet. Add one with `cork column add <name> --board {}`.", board.id);
        } else {
            println!();
            let headers = &["ID", "ORDER", "NAME"];
            let rows: Vec<Vec<String>> = columns
                .iter()
                .map(|c| vec![c.id.clone(), c.order_index.to_string(), c.name.clone()])
                .collect();
            output_table(headers, &rows);
        }
    }

    Ok(())
}
