use shared_types::generate_typescript_definitions;
use shared_types::typescript_gen::API_TYPE_NAMES;
use std::path::PathBuf;

/// Writes `types.ts` into the given directory, `web/api-types` by default
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("web/api-types"));
    std::fs::create_dir_all(&dir)?;

    let module = generate_typescript_definitions(API_TYPE_NAMES)?;
    let path = dir.join("types.ts");
    std::fs::write(&path, module + "\n")?;

    println!("Wrote {} types to {}", API_TYPE_NAMES.len(), path.display());
    Ok(())
}
