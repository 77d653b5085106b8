//! Loading of user-supplied vein bindings from a TOML veins file.
//!
//! The built-in registry covers the stock runtimes; a veins file named by the
//! [`VEINS_ENV_VAR`] environment variable can add veins or rebind existing
//! ones, e.g.:
//!
//! ```toml
//! [veins.ruby]
//! command = ["ruby", "-w"]
//! args = ["{script}"]        # optional; script path appended when omitted
//!
//! [veins.shell]
//! command = ["sh"]
//! ```

use crate::registry::{RuntimeBinding, VeinRegistry};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

/// Environment variable naming a TOML file of additional vein bindings.
pub const VEINS_ENV_VAR: &str = "FRAGLETC_VEINS";

#[derive(Debug, Deserialize)]
struct VeinsFile {
    #[serde(default)]
    veins: BTreeMap<String, BindingSpec>,
}

#[derive(Debug, Deserialize)]
struct BindingSpec {
    command: Vec<String>,
    #[serde(default)]
    args: Vec<String>,
}

/// Register the bindings from the file named by [`VEINS_ENV_VAR`], if any.
///
/// The variable being unset is not an error; a file that cannot be read or
/// parsed is, since silently running with the wrong runtimes would be worse.
pub fn apply_overrides(registry: &mut VeinRegistry) -> Result<()> {
    match env::var_os(VEINS_ENV_VAR) {
        Some(path) => load_file(registry, Path::new(&path)),
        None => Ok(()),
    }
}

/// Register every binding from one veins file, overwriting built-ins on
/// name collisions.
pub fn load_file(registry: &mut VeinRegistry, path: &Path) -> Result<()> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading veins file {}", path.display()))?;
    let file: VeinsFile = toml::from_str(&data)
        .with_context(|| format!("parsing veins file {}", path.display()))?;
    for (name, spec) in file.veins {
        let binding = RuntimeBinding::new(name.clone(), spec.command, spec.args)
            .with_context(|| format!("invalid vein '{}' in {}", name, path.display()))?;
        registry.register(binding);
    }
    Ok(())
}
