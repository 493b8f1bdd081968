use scriptscope_api::{WorkerRequest, WorkerResponse};
use scriptscope_core::WorkerConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let schemas = serde_json::json!({
        "request": schemars::schema_for!(WorkerRequest),
        "response": schemars::schema_for!(WorkerResponse),
        "config": schemars::schema_for!(WorkerConfig),
    });
    println!("{}", serde_json::to_string_pretty(&schemas)?);
    Ok(())
}
