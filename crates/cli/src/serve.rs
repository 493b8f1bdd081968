use scriptscope_api::{WorkerRequest, WorkerResponse};
use scriptscope_core::{LanguageWorker, WorkerConfig};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Worker protocol over stdio: one JSON request per line in, one JSON
/// response per line out. Stops at end of input.
pub async fn run(config: &WorkerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut worker = LanguageWorker::new(config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    tracing::info!("serving worker protocol on stdio");
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = answer(&mut worker, &line);
        write_response(&mut stdout, &response).await?;
    }
    tracing::info!("stdin closed, worker exiting");
    Ok(())
}

/// Malformed lines get an error response rather than ending the session.
pub(crate) fn answer(worker: &mut LanguageWorker, line: &str) -> WorkerResponse {
    match serde_json::from_str::<WorkerRequest>(line) {
        Ok(request) => worker.handle(request),
        Err(err) => {
            tracing::warn!(error = %err, "malformed request");
            WorkerResponse::error(format!("Malformed request: {}", err))
        }
    }
}

async fn write_response<W: AsyncWrite + Unpin>(
    out: &mut W,
    response: &WorkerResponse,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut bytes = serde_json::to_vec(response)?;
    bytes.push(b'\n');
    out.write_all(&bytes).await?;
    out.flush().await?;
    Ok(())
}
