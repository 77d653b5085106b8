use regex::Regex;
use std::sync::LazyLock;

// Matches the fragletc shebang convention:
//   #!/usr/bin/env -S fragletc --vein=<identifier>
// and the direct form where fragletc itself is the interpreter:
//   #!/usr/local/bin/fragletc --vein=<identifier>
// Whitespace-tolerant; trailing shebang arguments are ignored.
static SHEBANG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#!\s*(?:\S+\s+(?:-S\s+)?)?(?:\S*/)?fragletc\s+--vein=([^\s=]+)(?:\s+.*)?$")
        .unwrap()
});

/// Extract the vein declared by a script's first line.
///
/// Returns `None` when the line is not a fragletc shebang — including plain
/// shebangs like `#!/usr/bin/env ruby`, which simply fail to match. A missing
/// or foreign shebang is not an error on its own, because an explicit
/// `--vein` flag can still supply the vein.
pub fn parse_vein(first_line: &str) -> Option<String> {
    SHEBANG
        .captures(first_line.trim_end_matches(['\r', '\n']))
        .map(|caps| caps[1].to_string())
}
