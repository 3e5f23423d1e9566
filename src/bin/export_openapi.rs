//! Write the gateway's OpenAPI document as JSON
//!
//! Usage:
//!   export_openapi > openapi.json
//!   export_openapi --output docs/openapi.json

use anyhow::Context;
use utoipa::OpenApi;
use transport_admin_gateway::gateway::openapi::ApiDoc;

fn output_path() -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| a == "--output" || a == "-o")
        .and_then(|i| args.get(i + 1).cloned())
}

fn main() -> anyhow::Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .context("Failed to serialize OpenAPI document")?;

    match output_path() {
        Some(path) => {
            std::fs::write(&path, &json).with_context(|| format!("Failed to write {}", path))?;
            eprintln!("OpenAPI document written to {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
