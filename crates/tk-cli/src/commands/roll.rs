use std::path::Path;

use colored::Colorize;
use tk_core::DiceExpression;

use super::{CliResult, make_roller, open_session};

pub fn run(dir: &Path, seed: Option<u64>, expression: &str) -> CliResult {
    let expr: DiceExpression = expression.parse().map_err(|e| format!("{e}"))?;
    let mut session = open_session(dir);
    let mut roller = make_roller(seed);

    let entry = session
        .roll_expression(&expr, &mut roller)
        .map_err(|e| e.to_string())?;

    let rolls: Vec<String> = entry.rolls.iter().map(u32::to_string).collect();
    let bonus = if expr.bonus != 0 {
        format!(" {:+}", expr.bonus)
    } else {
        String::new()
    };
    println!("  {} = [{}]{}", entry.expression.bold(), rolls.join(", "), bonus);
    println!("  total: {}", entry.total.to_string().bold());

    Ok(())
}
