use serde_json::Value;
use std::fs;
use std::path::Path;

fn main() {
    // Version follows package.json when the crate lives inside the npm package
    println!("cargo:rerun-if-changed=package.json");

    let package_json_path = "package.json";

    let version = if Path::new(package_json_path).exists() {
        match fs::read_to_string(package_json_path) {
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(json) => match json.get("version").and_then(|v| v.as_str()) {
                    Some(version) => version.to_string(),
                    None => {
                        println!("cargo:warning=No version found in package.json, using Cargo.toml version");
                        env!("CARGO_PKG_VERSION").to_string()
                    }
                },
                Err(e) => {
                    println!("cargo:warning=Failed to parse package.json: {}", e);
                    env!("CARGO_PKG_VERSION").to_string()
                }
            },
            Err(e) => {
                println!("cargo:warning=Failed to read package.json: {}", e);
                env!("CARGO_PKG_VERSION").to_string()
            }
        }
    } else {
        env!("CARGO_PKG_VERSION").to_string()
    };

    println!("cargo:rustc-env=PACKAGE_VERSION={}", version);
}
