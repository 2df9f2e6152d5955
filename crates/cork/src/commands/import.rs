//! `cork import` -- bulk-import a nested JSON document of items.

use std::fs;

use anyhow::{Context, Result, bail};

use corkboard_core::document::ImportDocument;
use corkboard_import::{ImportEngine, ImportOutcome};

use crate::cli::ImportArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// How many error strings the human-readable summary shows.
const SHOWN_ERRORS: usize = 3;

/// The document shape the importer expects.
const EXPECTED_STRUCTURE: &str = r#"{
  "boardName": "Optional: name of the target board",
  "items": [
    {
      "type": "epic",
      "title": "Epic title",
      "description": "Epic description...",
      "tags": ["Tag1", "OptionalTag2"],
      "stories": [
        {
          "type": "story",
          "title": "Story title",
          "description": "Story description...",
          "tags": ["TagA"],
          "tasks": [
            {
              "type": "task",
              "title": "Task title",
              "description": "Task description...",
              "tags": []
            }
          ]
        }
      ]
    }
  ]
}"#;

/// Execute the `cork import` command.
pub fn run(ctx: &RuntimeContext, args: &ImportArgs) -> Result<()> {
    if args.show_format {
        println!("{EXPECTED_STRUCTURE}");
        return Ok(());
    }

    let Some(file) = &args.file else {
        bail!("no input file given (use --show-format to see the expected document shape)");
    };

    let board_id = ctx.resolve_board(args.board.as_deref())?;
    let store = ctx.open_store()?;

    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let document = ImportDocument::parse(&text)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    let engine = ImportEngine::new(&store);
    let outcome = engine.run(&document, &board_id, &ctx.actor)?;

    match outcome {
        ImportOutcome::Nothing => {
            if ctx.json {
                output_json(&serde_json::json!({
                    "outcome": "nothing",
                    "success_count": 0,
                    "error_count": 0,
                }));
            } else {
                println!("No items found in the document; nothing was imported.");
            }
        }
        ImportOutcome::Completed(report) => {
            if ctx.json {
                output_json(&report);
            } else if report.is_clean() {
                println!(
                    "Import successful: {} items imported into board {}.",
                    report.success_count, board_id
                );
            } else {
                println!(
                    "Import finished with errors: {} imported, {} failed.",
                    report.success_count, report.error_count
                );
                for error in report.errors.iter().take(SHOWN_ERRORS) {
                    println!("  - {error}");
                }
                if report.errors.len() > SHOWN_ERRORS {
                    println!("  ... and {} more", report.errors.len() - SHOWN_ERRORS);
                }
            }
        }
    }

    Ok(())
}
