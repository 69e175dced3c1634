//! CLI command for inspecting a packaged GLB file

use std::path::Path;

use serde_json::Value;

const COUNTED: [&str; 7] = [
    "buffers",
    "bufferViews",
    "accessors",
    "materials",
    "meshes",
    "nodes",
    "scenes",
];

pub fn execute(file: &Path) -> anyhow::Result<()> {
    let bytes = std::fs::read(file)?;
    let glb = gltf::Glb::from_slice(&bytes)?;

    println!("GLB: {}", file.display());
    println!();
    println!("Version: {}", glb.header.version);
    println!("Total length: {} bytes", glb.header.length);
    println!("JSON chunk: {} bytes", glb.json.len());
    match &glb.bin {
        Some(bin) => println!("BIN chunk: {} bytes", bin.len()),
        None => println!("BIN chunk: none"),
    }
    println!();

    let document: Value = serde_json::from_slice(&glb.json)?;
    println!("Document:");
    for key in COUNTED {
        let count = document
            .get(key)
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        println!("  {key:12} {count:>6}");
    }
    if let Some(scene) = document.get("scene") {
        println!("  {:12} {:>6}", "scene", scene.to_string());
    }

    Ok(())
}
