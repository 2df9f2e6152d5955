//! `cork column` -- manage a board's columns.

use anyhow::{Result, bail};

use corkboard_core::board::Column;
use corkboard_storage::Storage;

use crate::cli::{ColumnArgs, ColumnCommands};
use crate::context::RuntimeContext;
use crate::output::{output_json, output_table};

/// Execute the `cork column` command.
pub fn run(ctx: &RuntimeContext, args: &ColumnArgs) -> Result<()> {
    match &args.command {
        ColumnCommands::Add { name, board } => run_add(ctx, name, board.as_deref()),
        ColumnCommands::List { board } => run_list(ctx, board.as_deref()),
    }
}

fn run_add(ctx: &RuntimeContext, name: &str, board_flag: Option<&str>) -> Result<()> {
    let board_id = ctx.resolve_board(board_flag)?;
    let store = ctx.open_store()?;
    let column = store.create_column(&board_id, name, &ctx.actor)?;

    if ctx.json {
        output_json(&column);
    } else if !ctx.quiet {
        println!(
            "Created column: {} (\"{}\", position {})",
            column.id, column.name, column.order_index
        );
    }

    Ok(())
}

fn run_list(ctx: &RuntimeContext, board_flag: Option<&str>) -> Result<()> {
    let board_id = ctx.resolve_board(board_flag)?;
    let store = ctx.open_store()?;
    let columns = store.list_columns(&board_id)?;

    if ctx.json {
        output_json(&columns);
    } else if columns.is_empty() {
        println!("Board {} has no columns yet.", board_id);
    } else {
        let headers = &["ID", "ORDER", "NAME"];
        let rows: Vec<Vec<String>> = columns
            .iter()
            .map(|c| vec![c.id.clone(), c.order_index.to_string(), c.name.clone()])
            .collect();
        output_table(headers, &rows);
    }

    Ok(())
}

/// Resolves a `--column` flag (id or name) against a board's columns.
///
/// Without a flag, the board's first column (smallest `order_index`) is
/// used -- the same target the import engine picks.
pub(crate) fn resolve_column(
    store: &dyn Storage,
    board_id: &str,
    flag: Option<&str>,
) -> Result<Column> {
    let mut columns = store.list_columns(board_id)?;
    if columns.is_empty() {
        bail!("board {board_id} has no columns; add one with `cork column add`");
    }

    match flag {
        None => Ok(columns.remove(0)),
        Some(wanted) => columns
            .into_iter()
            .find(|c| c.id == wanted || c.name == wanted)
            .ok_or_else(|| {
                anyhow::anyhow!("no column {wanted:?} on board {board_id} (by id or name)")
            }),
    }
}
