use crate::session::Session;
use scriptscope_api::{OutlineEntry, outline_tree};
use scriptscope_core::WorkerConfig;
use std::fmt::Write;
use std::path::Path;

pub async fn run(
    config: &WorkerConfig,
    path: &Path,
    json: bool,
    tree: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(config, path, &[] as &[&Path]).await?;
    let outline = session.manager.get_outline(&session.file_name).await?;
    session.close().await;

    if json && tree {
        println!("{}", serde_json::to_string_pretty(&outline_tree(&outline))?);
    } else if json {
        println!("{}", serde_json::to_string_pretty(&outline)?);
    } else {
        print!("{}", render(&outline));
    }
    Ok(())
}

/// One line per entry, indented two spaces per level, with 1-based lines.
pub(crate) fn render(outline: &[OutlineEntry]) -> String {
    let mut out = String::new();
    for entry in outline {
        let _ = writeln!(
            out,
            "{:indent$}{} {} :{}",
            "",
            entry.kind,
            entry.name,
            entry.line + 1,
            indent = entry.indent_amount * 2
        );
    }
    out
}
