use crate::registry::VeinRegistry;
use crate::shebang;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells and many command-line tools.
pub type ExitCode = i32;

/// Exit code for failures that originate in the dispatcher itself rather
/// than in the script. A child's own exit code is relayed verbatim and may
/// also be 2; the `fragletc: error:` stderr prefix tells the layers apart.
pub const DISPATCH_FAILURE: ExitCode = 2;

/// A failure in resolving or launching a script's runtime.
///
/// A script that runs and exits nonzero is deliberately *not* represented
/// here; its exit code is relayed as an ordinary [`ExitCode`].
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Neither an explicit `--vein` flag nor a fragletc shebang supplied a vein.
    #[error("no vein declared: pass --vein=<name> or start the script with a fragletc shebang")]
    MissingVein,
    /// The resolved vein has no registered runtime binding.
    #[error("unknown vein '{0}'")]
    UnknownVein(String),
    /// The script file could not be opened or read.
    #[error("cannot read script '{path}': {source}")]
    ScriptRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The runtime subprocess could not be started at all.
    #[error("cannot launch runtime '{program}': {source}")]
    RuntimeLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Resolve the vein for one invocation.
///
/// The explicit CLI flag takes precedence, since it is the override
/// mechanism; otherwise the shebang-declared vein is used; with neither,
/// dispatch fails.
pub fn resolve_vein(
    cli_override: Option<&str>,
    declared: Option<&str>,
) -> Result<String, DispatchError> {
    cli_override
        .or(declared)
        .map(str::to_string)
        .ok_or(DispatchError::MissingVein)
}

/// Executes one script through the runtime bound to its vein.
///
/// The registry is injected at construction and never mutated by dispatch,
/// so independent runs share nothing.
pub struct Dispatcher<'a> {
    registry: &'a VeinRegistry,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a VeinRegistry) -> Self {
        Self { registry }
    }

    /// Resolve and execute `script`, returning the child's exit code.
    ///
    /// Exactly one subprocess is spawned per call and never retried: a
    /// script that partially consumed stdin must not run twice. The child
    /// inherits this process's stdin, stdout and stderr unbuffered, so
    /// interactive and streaming scripts behave as if invoked directly.
    pub fn run(
        &self,
        script: &str,
        vein_override: Option<&str>,
        script_args: &[String],
    ) -> Result<ExitCode, DispatchError> {
        let first_line = read_first_line(script)?;
        let declared = first_line.as_deref().and_then(shebang::parse_vein);
        let vein = resolve_vein(vein_override, declared.as_deref())?;
        let binding = self
            .registry
            .lookup(&vein)
            .ok_or_else(|| DispatchError::UnknownVein(vein.clone()))?;

        let argv = binding.build_argv(script, script_args);
        let program = binding.program().to_string();
        let mut child = Command::new(&argv[0])
            .args(&argv[1..])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| DispatchError::RuntimeLaunch {
                program: program.clone(),
                source,
            })?;
        let exit_status = child.wait().map_err(|source| DispatchError::RuntimeLaunch {
            program,
            source,
        })?;
        match exit_status.code() {
            Some(code) => Ok(code),
            None => Ok(terminated_by_signal(exit_status)),
        }
    }
}

// Longer than any plausible shebang; keeps a newline-free file from being
// buffered whole.
const FIRST_LINE_LIMIT: u64 = 8 * 1024;

// Only the first line is ever inspected; the body belongs to the runtime.
// Read as bytes and decode lossily: the script may not be UTF-8 at all, and
// that only matters for shebang matching, never for dispatch itself.
fn read_first_line(script: &str) -> Result<Option<String>, DispatchError> {
    let read_err = |source| DispatchError::ScriptRead {
        path: script.to_string(),
        source,
    };
    let file = File::open(Path::new(script)).map_err(&read_err)?;
    let mut raw = Vec::new();
    BufReader::new(file)
        .take(FIRST_LINE_LIMIT)
        .read_until(b'\n', &mut raw)
        .map_err(&read_err)?;
    if raw.is_empty() {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}
