//! `cork item` -- create, inspect, edit, and delete single items.

use anyhow::{Result, bail};

use corkboard_core::enums::ItemType;
use corkboard_core::filter::{ItemFilter, ItemUpdates};
use corkboard_core::item::NewItemBuilder;
use corkboard_storage::Storage;

use crate::cli::{ItemArgs, ItemCommands};
use crate::commands::column::resolve_column;
use crate::context::RuntimeContext;
use crate::output::{format_item_detail, format_item_row, output_json, output_table};

/// Execute the `cork item` command.
pub fn run(ctx: &RuntimeContext, args: &ItemArgs) -> Result<()> {
    match &args.command {
        ItemCommands::Add {
            title,
            board,
            column,
            item_type,
            description,
            parent,
            tags,
        } => run_add(
            ctx,
            title,
            board.as_deref(),
            column.as_deref(),
            item_type,
            description.as_deref(),
            parent.as_deref(),
            tags,
        ),
        ItemCommands::Show { id } => run_show(ctx, id),
        ItemCommands::List {
            board,
            column,
            item_type,
        } => run_list(ctx, board.as_deref(), column.as_deref(), item_type.as_deref()),
        ItemCommands::Edit {
            id,
            title,
            description,
            tags,
        } => run_edit(ctx, id, title.clone(), description.clone(), tags.clone()),
        ItemCommands::Rm { id } => run_rm(ctx, id),
    }
}

/// Parse a `--type` flag value, rejecting anything outside the closed set.
fn parse_item_type(s: &str) -> Result<ItemType> {
    ItemType::parse(s)
        .ok_or_else(|| anyhow::anyhow!("unknown item type {s:?}: expected epic, story, or task"))
}

#[allow(clippy::too_many_arguments)]
fn run_add(
    ctx: &RuntimeContext,
    title: &str,
    board_flag: Option<&str>,
    column_flag: Option<&str>,
    type_flag: &str,
    description: Option<&str>,
    parent: Option<&str>,
    tags: &[String],
) -> Result<()> {
    if title.trim().is_empty() {
        bail!("title must not be empty");
    }
    let item_type = parse_item_type(type_flag)?;

    let board_id = ctx.resolve_board(board_flag)?;
    let store = ctx.open_store()?;
    store.get_board(&board_id)?;
    let column = resolve_column(&store, &board_id, column_flag)?;

    // The parent must sit exactly one rank above the new item.
    if let Some(parent_id) = parent {
        let parent_item = store.get_item(parent_id)?;
        match item_type.parent_type() {
            None => bail!("an epic cannot have a parent"),
            Some(expected) if parent_item.item_type != expected => bail!(
                "parent of a {} must be a {}, but {} is a {}",
                item_type,
                expected,
                parent_id,
                parent_item.item_type
            ),
            _ => {}
        }
        if parent_item.board_id != board_id {
            bail!("parent {} belongs to a different board", parent_id);
        }
    }

    // Read the column's current max order, then insert one past it. This is
    // the same read-then-write sequence the import engine uses; concurrent
    // writers on the same column can race it.
    let max = store.max_order_index(&board_id, &column.id)?;
    let order_index = max.map_or(0, |m| m + 1);

    let mut builder = NewItemBuilder::new(&board_id, &column.id, title)
        .item_type(item_type)
        .order_index(order_index)
        .tags(tags.to_vec());
    if let Some(description) = description {
        builder = builder.description(description);
    }
    if let Some(parent_id) = parent {
        builder = builder.parent(parent_id);
    }

    let item = store.insert_item(&builder.build(), &ctx.actor)?;

    if ctx.json {
        output_json(&item);
    } else if ctx.quiet {
        println!("{}", item.id);
    } else {
        println!("Created item: {}", item.id);
        println!("  Title: {}", item.title);
        println!("  Type: {}", item.item_type.label());
        println!("  Column: {} (position {})", column.name, item.order_index);
        if let Some(ref parent_id) = item.parent_item_id {
            println!("  Parent: {}", parent_id);
        }
    }

    Ok(())
}

fn run_show(ctx: &RuntimeContext, id: &str) -> Result<()> {
    let store = ctx.open_store()?;
    let item = store.get_item(id)?;

    if ctx.json {
        output_json(&item);
    } else {
        println!("{}", format_item_detail(&item));
    }

    Ok(())
}

fn run_list(
    ctx: &RuntimeContext,
    board_flag: Option<&str>,
    column: Option<&str>,
    type_flag: Option<&str>,
) -> Result<()> {
    let board_id = ctx.resolve_board(board_flag)?;
    let item_type = type_flag.map(parse_item_type).transpose()?;
    let store = ctx.open_store()?;

    let filter = ItemFilter {
        board_id: Some(board_id),
        column_id: column.map(str::to_owned),
        item_type,
        ..ItemFilter::default()
    };
    let items = store.list_items(&filter)?;

    if ctx.json {
        output_json(&items);
    } else if items.is_empty() {
        println!("No items match.");
    } else {
        let headers = &["ID", "TYPE", "TITLE", "ORDER", "PARENT", "TAGS"];
        let rows: Vec<Vec<String>> = items.iter().map(format_item_row).collect();
        output_table(headers, &rows);
    }

    Ok(())
}

fn run_edit(
    ctx: &RuntimeContext,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    tags: Option<Vec<String>>,
) -> Result<()> {
    let updates = ItemUpdates {
        title,
        description,
        tags,
    };
    if updates.is_empty() {
        bail!("nothing to update: pass --title, --description, or --tags");
    }

    let store = ctx.open_store()?;
    let item = store.update_item(id, &updates, &ctx.actor)?;

    if ctx.json {
        output_json(&item);
    } else if !ctx.quiet {
        println!("Updated item: {}", item.id);
        println!("  Title: {}", item.title);
    }

    Ok(())
}

fn run_rm(ctx: &RuntimeContext, id: &str) -> Result<()> {
    let store = ctx.open_store()?;
    let outcome = store.delete_item(id, &ctx.actor)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "deleted": id,
            "orphaned_children": outcome.orphaned_children,
        }));
    } else if !ctx.quiet {
        if outcome.orphaned_children > 0 {
            println!(
                "Deleted item {} ({} direct children re-parented to top level)",
                id, outcome.orphaned_children
            );
        } else {
            println!("Deleted item {}", id);
        }
    }

    Ok(())
}
