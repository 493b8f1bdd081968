use crate::session::Session;
use scriptscope_core::WorkerConfig;
use std::path::Path;

pub async fn run(
    config: &WorkerConfig,
    path: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(config, path, &[] as &[&Path]).await?;
    let diagnostics = session
        .manager
        .get_syntactic_diagnostics(&session.file_name)
        .await?;
    let file_name = session.file_name.clone();
    session.close().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&diagnostics)?);
        return Ok(());
    }
    for d in &diagnostics {
        println!(
            "{}:{}:{}: {}",
            file_name,
            d.line + 1,
            d.character + 1,
            d.message
        );
    }
    if diagnostics.is_empty() {
        tracing::info!(file = %file_name, "no syntax errors");
    }
    Ok(())
}
