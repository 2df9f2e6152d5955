//! `cork epics` -- the epic selector lane: a board's epics with counts.

use anyhow::Result;
use serde::Serialize;

use corkboard_core::filter::ItemFilter;
use corkboard_core::projection;
use corkboard_storage::Storage;

use crate::cli::EpicsArgs;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_table};

/// View model for one epic row.
#[derive(Serialize)]
struct EpicRow {
    id: String,
    title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,
    stories: usize,
    tasks: usize,
}

/// Execute the `cork epics` command.
pub fn run(ctx: &RuntimeContext, args: &EpicsArgs) -> Result<()> {
    let board_id = ctx.resolve_board(args.board.as_deref())?;
    let store = ctx.open_store()?;
    store.get_board(&board_id)?;

    let items = store.list_items(&ItemFilter::for_board(&board_id))?;
    let rows: Vec<EpicRow> = projection::epics(&items)
        .into_iter()
        .map(|epic| {
            let (stories, tasks) = projection::descendant_counts(&items, &epic.id);
            EpicRow {
                id: epic.id.clone(),
                title: epic.title.clone(),
                description: epic.description.clone(),
                stories,
                tasks,
            }
        })
        .collect();

    if ctx.json {
        output_json(&rows);
    } else if rows.is_empty() {
        println!("Board {} has no epics yet.", board_id);
    } else {
        let headers = &["ID", "TITLE", "STORIES", "TASKS"];
        let table: Vec<Vec<String>> = rows
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.title.clone(),
                    r.stories.to_string(),
                    r.tasks.to_string(),
                ]
            })
            .collect();
        output_table(headers, &table);
    }

    Ok(())
}
