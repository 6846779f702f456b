//! Name validation for branches, tags and ref file paths.
//!
//! Branch and tag names follow git-style conventions:
//! - Must be non-empty
//! - Must not contain whitespace, `~`, `^`, `:`, `?`, `*`, `[`, `\`
//! - Must not contain `..` or `@{`, and must not be exactly `@`
//! - Must not start or end with `.` or `/`, nor end with `.lock`
//! - Components between slashes must be non-empty and not start with `.`

use crate::error::{RefError, Result};

/// Characters that are forbidden anywhere in a branch or tag name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '~', '^', ':', '?', '*', '[', '\\'];

fn invalid(name: &str, reason: impl Into<String>) -> RefError {
    RefError::InvalidName {
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn check_short_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid(name, format!("{kind} name must not be empty")));
    }
    if name == "@" {
        return Err(invalid(name, "'@' is reserved for HEAD"));
    }
    if let Some(ch) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(invalid(name, format!("contains forbidden character: {ch:?}")));
    }
    if name.contains("..") || name.contains("@{") {
        return Err(invalid(name, "must not contain '..' or '@{'"));
    }
    if name.starts_with(['.', '/']) || name.ends_with(['.', '/']) {
        return Err(invalid(name, "must not start or end with '.' or '/'"));
    }
    if name.ends_with(".lock") {
        return Err(invalid(name, "must not end with '.lock'"));
    }
    for component in name.split('/') {
        if component.is_empty() {
            return Err(invalid(name, "path components must not be empty"));
        }
        if component.starts_with('.') {
            return Err(invalid(
                name,
                format!("component must not start with '.': {component:?}"),
            ));
        }
    }
    Ok(())
}

/// Validate a branch name (without `refs/heads/`).
///
/// ```
/// use gpgit_refs::validate_branch_name;
///
/// assert!(validate_branch_name("master").is_ok());
/// assert!(validate_branch_name("feature/auth").is_ok());
/// assert!(validate_branch_name("").is_err());
/// assert!(validate_branch_name("bad..name").is_err());
/// ```
pub fn validate_branch_name(name: &str) -> Result<()> {
    check_short_name("branch", name)
}

/// Validate a tag name (without `refs/tags/`). Same rules as branches.
pub fn validate_tag_name(name: &str) -> Result<()> {
    check_short_name("tag", name)
}

/// Validate a full ref name before it is mapped onto a file path.
///
/// Rejects anything that could escape the control directory.
pub fn validate_ref_path(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid(name, "ref name must not be empty"));
    }
    if name.contains(['\\', '\0']) {
        return Err(invalid(name, "contains a backslash or NUL"));
    }
    if name
        .split('/')
        .any(|c| c.is_empty() || c == "." || c == "..")
    {
        return Err(invalid(name, "empty, '.' or '..' component"));
    }
    Ok(())
}
