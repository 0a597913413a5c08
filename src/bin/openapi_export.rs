use std::{fs, path::PathBuf};

use eshop_catalog::openapi::{ApiDocV1, ApiDocV2};
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = PathBuf::from("openapi");
    fs::create_dir_all(&output_dir)?;

    let documents = [
        ("eshop-catalog.v1.json", ApiDocV1::openapi()),
        ("eshop-catalog.v2.json", ApiDocV2::openapi()),
    ];

    for (file_name, openapi) in documents {
        let json = serde_json::to_string_pretty(&openapi)?;
        let output_path = output_dir.join(file_name);
        fs::write(&output_path, json)?;
        println!("OpenAPI spec written to {}", output_path.display());
    }

    Ok(())
}
