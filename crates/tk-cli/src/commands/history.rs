use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use super::{CliResult, open_session};

pub fn run(dir: &Path) -> CliResult {
    let session = open_session(dir);
    let history = &session.account().dice_history;

    if history.is_empty() {
        println!("  No rolls yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Expression", "Rolls", "Total", "When"]);

    // Newest first.
    for entry in history.iter().rev() {
        let rolls: Vec<String> = entry.rolls.iter().map(u32::to_string).collect();
        table.add_row(vec![
            entry.expression.clone(),
            rolls.join(", "),
            entry.total.to_string(),
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}
