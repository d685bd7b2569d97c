// Prints the OpenAPI document of the example service.
// Usage: cargo run --bin openapi_export > openapi.json

use safe_wrap::api::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let json = ApiDoc::openapi().to_pretty_json()?;
    println!("{}", json);
    Ok(())
}
