//! Build metadata stamped in by `build.rs`.

use std::fmt;

/// Value vergen writes when git information could not be collected.
const VERGEN_PLACEHOLDER: &str = "VERGEN_IDEMPOTENT_OUTPUT";

/// Crate version and the git state the binary was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub branch: Option<&'static str>,
    pub commit: Option<&'static str>,
    pub dirty: bool,
}

impl BuildInfo {
    /// Metadata of the running build.
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            branch: git_value(option_env!("VERGEN_GIT_BRANCH")),
            commit: git_value(option_env!("VERGEN_GIT_SHA")),
            dirty: option_env!("VERGEN_GIT_DIRTY") == Some("true"),
        }
    }

    /// Commit hash cut to seven characters.
    pub fn short_commit(&self) -> Option<&'static str> {
        self.commit.map(|sha| &sha[..sha.len().min(7)])
    }
}

fn git_value(value: Option<&'static str>) -> Option<&'static str> {
    value.filter(|v| !v.is_empty() && *v != VERGEN_PLACEHOLDER)
}

/// `0.1.0`, `0.1.0 (main 1a2b3c4)` or `0.1.0 (main 1a2b3c4, dirty)`.
impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.version)?;
        let Some(commit) = self.short_commit() else {
            return Ok(());
        };
        write!(f, " ({} {commit}", self.branch.unwrap_or("detached"))?;
        if self.dirty {
            f.write_str(", dirty")?;
        }
        f.write_str(")")
    }
}
