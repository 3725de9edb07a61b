use std::fs;
use std::path::Path;

use super::{CliResult, open_session};

pub fn export(dir: &Path, output: Option<&Path>) -> CliResult {
    let session = open_session(dir);
    let text = session.export().map_err(|e| e.to_string())?;
    match output {
        Some(path) => {
            fs::write(path, &text).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
            println!("  Exported account to {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

pub fn import(dir: &Path, file: &Path) -> CliResult {
    let text =
        fs::read_to_string(file).map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let mut session = open_session(dir);
    session.import(&text).map_err(|e| e.to_string())?;
    let characters = session.characters().len();
    println!("  Imported account with {characters} character(s)");
    Ok(())
}
