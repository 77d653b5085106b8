use anyhow::{Result, bail};
use std::collections::HashMap;

/// Placeholder token in an argument template that is replaced by the script
/// path when the concrete command line is built.
pub const SCRIPT_PLACEHOLDER: &str = "{script}";

/// Immutable description of how to execute scripts of one vein.
///
/// `command` is the runtime executable plus any fixed flags; `args_template`
/// holds per-script arguments, where any occurrence of [`SCRIPT_PLACEHOLDER`]
/// is replaced by the script path. A template that never mentions the
/// placeholder gets the script path appended after it, which covers the common
/// `ruby <script>` shape without any template at all.
#[derive(Debug, Clone)]
pub struct RuntimeBinding {
    vein: String,
    command: Vec<String>,
    args_template: Vec<String>,
}

impl RuntimeBinding {
    /// Create a validated binding.
    ///
    /// Fails when the vein name is empty or the command has no executable,
    /// so a binding that exists is always spawnable in principle.
    pub fn new(
        vein: impl Into<String>,
        command: Vec<String>,
        args_template: Vec<String>,
    ) -> Result<Self> {
        let vein = vein.into();
        if vein.is_empty() {
            bail!("vein name is required");
        }
        if command.is_empty() || command[0].is_empty() {
            bail!("vein '{}' has no command to execute", vein);
        }
        Ok(Self {
            vein,
            command,
            args_template,
        })
    }

    // Infallible constructor for the compiled-in defaults.
    fn builtin(vein: &str, program: &str) -> Self {
        Self {
            vein: vein.to_string(),
            command: vec![program.to_string()],
            args_template: Vec::new(),
        }
    }

    pub fn vein(&self) -> &str {
        &self.vein
    }

    /// The executable that will be spawned. Always present, by construction.
    pub fn program(&self) -> &str {
        &self.command[0]
    }

    /// Build the full argv for one script: fixed command, then the template
    /// with the script path substituted (or appended), then any extra
    /// arguments destined for the script itself.
    pub fn build_argv(&self, script: &str, script_args: &[String]) -> Vec<String> {
        let mut argv = self.command.clone();
        let mut substituted = false;
        for arg in &self.args_template {
            if arg.contains(SCRIPT_PLACEHOLDER) {
                substituted = true;
                argv.push(arg.replace(SCRIPT_PLACEHOLDER, script));
            } else {
                argv.push(arg.clone());
            }
        }
        if !substituted {
            argv.push(script.to_string());
        }
        argv.extend(script_args.iter().cloned());
        argv
    }
}

/// Table of known veins, built once per invocation and read-only afterward.
///
/// The registry answers one question: given a vein identifier, what command
/// executes a script of this vein? It has no side effects beyond its in-memory
/// table.
#[derive(Debug, Default)]
pub struct VeinRegistry {
    bindings: HashMap<String, RuntimeBinding>,
}

impl VeinRegistry {
    /// An empty registry, mainly useful in tests.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding the compiled-in default bindings: the conventional
    /// local runtime for each supported language.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(RuntimeBinding::builtin("ruby", "ruby"));
        registry.register(RuntimeBinding::builtin("javascript", "node"));
        registry.register(RuntimeBinding::builtin("typescript", "ts-node"));
        registry
    }

    /// Insert or overwrite the binding for its vein. Last write wins, which
    /// is what lets a veins file replace a compiled-in default.
    pub fn register(&mut self, binding: RuntimeBinding) {
        self.bindings.insert(binding.vein.clone(), binding);
    }

    pub fn lookup(&self, vein: &str) -> Option<&RuntimeBinding> {
        self.bindings.get(vein)
    }

    /// All registered vein names, sorted for stable output.
    pub fn veins(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
