//! `cork version` -- print version information.

use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `cork version` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    if ctx.json {
        output_json(&serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
        }));
    } else {
        println!("cork {}", env!("CARGO_PKG_VERSION"));
    }
    Ok(())
}
