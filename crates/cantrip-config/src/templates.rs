//! Starter files written by `cantrip init`.
//!
//! The sources under `templates/` are live TOML so they can be checked against
//! the parser; users receive them with every setting commented out.

/// Per-directory starter (`.cantrip.toml`).
const LOCAL: &str = include_str!("../templates/config.toml");

/// Home-directory starter.
const GLOBAL: &str = include_str!("../templates/config-global.toml");

/// Returns the starter config for the home directory or for a music directory.
pub fn template(global: bool) -> String {
    commented(if global { GLOBAL } else { LOCAL })
}

/// Prefixes each setting with `# `, leaving comments and blank lines alone.
fn commented(source: &str) -> String {
    source
        .lines()
        .map(|line| match line {
            "" => "\n".to_string(),
            l if l.starts_with('#') => format!("{l}\n"),
            l => format!("# {l}\n"),
        })
        .collect()
}
