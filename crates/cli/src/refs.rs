use crate::session::Session;
use scriptscope_core::WorkerConfig;
use std::path::{Path, PathBuf};

pub async fn run(
    config: &WorkerConfig,
    path: &Path,
    roots: &[String],
    libs: &[PathBuf],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(config, path, libs).await?;
    let references = session
        .manager
        .get_referenced_properties(&session.file_name, roots)
        .await?;
    session.close().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&references)?);
        return Ok(());
    }
    for (root, members) in references.iter() {
        let members: Vec<&str> = members.iter().map(String::as_str).collect();
        println!("{}: {}", root, members.join(", "));
    }
    Ok(())
}
