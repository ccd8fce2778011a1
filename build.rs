use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use keypad_config::KeypadConfig;

const DEFAULT_CONFIG: &str = "keypad.json";

/// Place linker memory layout in OUT_DIR and add it to the search path
fn memory(out: &Path) -> Result<()> {
    fs::write(out.join("memory.x"), include_bytes!("memory.x"))
        .context("Saving memory.x")?;
    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rerun-if-changed=memory.x");
    Ok(())
}

/// JSON config file to generate code from, `None` if generation is disabled
fn config_path() -> Result<Option<PathBuf>> {
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_JSON_CONFIG");
    println!("cargo:rerun-if-env-changed=KEYPAD_JSON_CONFIG");

    let var = env::var_os("KEYPAD_JSON_CONFIG");
    if env::var_os("CARGO_FEATURE_JSON_CONFIG").is_none() {
        if var.is_some() {
            println!("cargo:warning=KEYPAD_JSON_CONFIG ignored, feature \"json-config\" is disabled");
        }
        return Ok(None);
    }

    match var {
        None => Ok(Some(PathBuf::from(DEFAULT_CONFIG))),
        Some(path) => match path.into_string() {
            Ok(path) => Ok(Some(PathBuf::from(path))),
            Err(_) => bail!("KEYPAD_JSON_CONFIG is not valid UTF-8"),
        },
    }
}

fn json_config(out: &Path) -> Result<()> {
    // Schema for editor support, also kept next to keypad.json
    for dir in [out, Path::new(".")] {
        KeypadConfig::schema_to_file(&dir.join("schema.json"))
            .context("While generating JSON schema")?;
    }

    if let Some(path) = config_path()? {
        println!("cargo:rerun-if-changed={}", path.display());
        let config = KeypadConfig::from_file(&path)
            .with_context(|| format!("While reading {}", path.display()))?;
        config.to_file(&out.join("config.rs"))
            .context("While generating config.rs")?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let out = PathBuf::from(env::var_os("OUT_DIR").context("Could not get OUT_DIR")?);
    memory(&out)?;
    json_config(&out)?;
    Ok(())
}
