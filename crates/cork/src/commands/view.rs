//! `cork view` -- render the column board, optionally scoped to one epic.

use anyhow::{Result, bail};

use corkboard_core::enums::ItemType;
use corkboard_core::filter::ItemFilter;
use corkboard_core::projection;
use corkboard_storage::Storage;

use crate::cli::ViewArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `cork view` command.
pub fn run(ctx: &RuntimeContext, args: &ViewArgs) -> Result<()> {
    let board_id = ctx.resolve_board(args.board.as_deref())?;
    let store = ctx.open_store()?;

    let board = store.get_board(&board_id)?;
    let columns = store.list_columns(&board_id)?;
    let items = store.list_items(&ItemFilter::for_board(&board_id))?;

    // A bad epic id would silently project to an empty board; fail loudly.
    if let Some(epic_id) = args.epic.as_deref() {
        let epic = store.get_item(epic_id)?;
        if epic.item_type != ItemType::Epic {
            bail!("{} is a {}, not an epic", epic_id, epic.item_type);
        }
    }

    let view = projection::project(&items, args.epic.as_deref());

    if ctx.json {
        // Keyed by column id; columns with no matching items are absent.
        output_json(&view);
        return Ok(());
    }

    println!("{}", board.name);
    if !board.description.is_empty() {
        println!("{}", board.description);
    }
    if let Some(epic_id) = args.epic.as_deref() {
        println!("(scoped to epic {epic_id})");
    }

    if columns.is_empty() {
        println!("\nThis board has no columns yet. Add one with `cork column add <name>`.");
        return Ok(());
    }

    for column in &columns {
        // The projection omits empty columns; the human view still shows them.
        let column_items = view.get(column.id.as_str());
        let count = column_items.map_or(0, |list| list.len());
        println!("\n{} ({count})", column.name);
        let Some(column_items) = column_items else {
            continue;
        };
        for item in column_items {
            let parent = item
                .parent_item_id
                .as_deref()
                .map(|p| format!("  <- {p}"))
                .unwrap_or_default();
            println!(
                "  [{}] {}: {}{}",
                item.item_type.label(),
                item.id,
                item.title,
                parent
            );
        }
    }

    Ok(())
}
