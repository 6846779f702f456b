use gpgit_types::ObjectId;
use tracing::debug;

use crate::error::{RefError, Result};
use crate::types::{BranchInfo, Head, RefValue, HEAD, HEADS_PREFIX, MERGE_HEAD, TAGS_PREFIX};

/// Longest symbolic chain followed before reporting a cycle.
pub const MAX_SYMBOLIC_DEPTH: usize = 32;

/// Storage backend for references.
///
/// Backends implement the four raw operations, which never follow symbolic
/// values. Resolution, dereferenced updates and name lookup are provided
/// methods so every backend behaves identically.
pub trait RefStore: Send + Sync {
    /// Read the stored value of exactly `name`. `Ok(None)` if absent.
    fn read_ref(&self, name: &str) -> Result<Option<RefValue>>;

    /// Write `value` to exactly `name`, creating it if needed.
    fn write_ref(&self, name: &str, value: &RefValue) -> Result<()>;

    /// Remove exactly `name`. Returns `true` if it existed.
    fn delete_ref(&self, name: &str) -> Result<bool>;

    /// Names of all stored refs starting with `prefix`, sorted.
    ///
    /// Includes `HEAD` and `MERGE_HEAD` when present and matching.
    fn list_refs(&self, prefix: &str) -> Result<Vec<String>>;

    // -----------------------------------------------------------------------
    // Provided resolution
    // -----------------------------------------------------------------------

    /// Resolve `name` to its physical ref and value.
    ///
    /// With `deref`, symbolic values are followed until a direct value or a
    /// missing ref; the returned name is the last ref in the chain. Without
    /// `deref`, the stored value of `name` itself is returned.
    fn resolve(&self, name: &str, deref: bool) -> Result<(String, Option<RefValue>)> {
        let mut current = name.to_string();
        for _ in 0..MAX_SYMBOLIC_DEPTH {
            match self.read_ref(&current)? {
                Some(RefValue::Symbolic(target)) if deref => current = target,
                value => return Ok((current, value)),
            }
        }
        Err(RefError::SymbolicCycle(name.to_string()))
    }

    /// Write `value` to `name`, or with `deref` to the end of its chain.
    fn update(&self, name: &str, value: RefValue, deref: bool) -> Result<()> {
        let physical = if deref {
            self.resolve(name, true)?.0
        } else {
            name.to_string()
        };
        debug!(name, physical = %physical, value = %value, "updating ref");
        self.write_ref(&physical, &value)
    }

    /// Delete `name`, or with `deref` the end of its chain.
    fn delete(&self, name: &str, deref: bool) -> Result<bool> {
        let physical = if deref {
            self.resolve(name, true)?.0
        } else {
            name.to_string()
        };
        debug!(name, physical = %physical, "deleting ref");
        self.delete_ref(&physical)
    }

    /// Dereferenced object id of `name`, if it resolves to one.
    fn value_of(&self, name: &str) -> Result<Option<ObjectId>> {
        Ok(self
            .resolve(name, true)?
            .1
            .and_then(|value| value.as_direct()))
    }

    /// Every ref under `prefix` with its dereferenced id, sorted by name.
    ///
    /// Refs whose chain ends at a missing ref are skipped.
    fn list(&self, prefix: &str) -> Result<Vec<(String, ObjectId)>> {
        let mut out = Vec::new();
        for name in self.list_refs(prefix)? {
            if let Some(id) = self.value_of(&name)? {
                out.push((name, id));
            }
        }
        Ok(out)
    }

    /// Turn a user-supplied name into an object id.
    ///
    /// `@` aliases `HEAD`. Candidates are tried in order: the literal name
    /// (only for `HEAD`, `MERGE_HEAD` and `refs/...`), `refs/<name>`,
    /// `refs/tags/<name>`, `refs/heads/<name>`, then a raw 40-hex id.
    fn resolve_name(&self, name: &str) -> Result<ObjectId> {
        let name = if name == "@" { HEAD } else { name };
        let mut candidates = Vec::with_capacity(4);
        // Other files in the control directory are not refs.
        if name == HEAD || name == MERGE_HEAD || name.starts_with("refs/") {
            candidates.push(name.to_string());
        }
        candidates.push(format!("refs/{name}"));
        candidates.push(format!("{TAGS_PREFIX}{name}"));
        candidates.push(format!("{HEADS_PREFIX}{name}"));
        for candidate in &candidates {
            if let Some(id) = self.value_of(candidate)? {
                return Ok(id);
            }
        }
        if ObjectId::is_hex_id(name) {
            if let Ok(id) = ObjectId::from_hex(name) {
                return Ok(id);
            }
        }
        Err(RefError::UnknownReference(name.to_string()))
    }

    // -----------------------------------------------------------------------
    // Provided HEAD and branch helpers
    // -----------------------------------------------------------------------

    /// Current `HEAD`, or `None` if it is missing or dangling.
    fn head(&self) -> Result<Option<Head>> {
        match self.read_ref(HEAD)? {
            Some(RefValue::Symbolic(target)) => Ok(Some(Head::Branch(
                target
                    .strip_prefix(HEADS_PREFIX)
                    .unwrap_or(&target)
                    .to_string(),
            ))),
            Some(RefValue::Direct(id)) => Ok(Some(Head::Detached(id))),
            None => Ok(None),
        }
    }

    /// Short name of the branch `HEAD` is attached to.
    fn current_branch(&self) -> Result<Option<String>> {
        Ok(match self.head()? {
            Some(Head::Branch(name)) => Some(name),
            _ => None,
        })
    }

    fn is_branch(&self, name: &str) -> Result<bool> {
        Ok(self.value_of(&format!("{HEADS_PREFIX}{name}"))?.is_some())
    }

    /// All local branches, marking the one `HEAD` is attached to.
    fn branches(&self) -> Result<Vec<BranchInfo>> {
        let current = self.current_branch()?;
        Ok(self
            .list(HEADS_PREFIX)?
            .into_iter()
            .filter_map(|(name, target)| {
                let short = name.strip_prefix(HEADS_PREFIX)?.to_string();
                Some(BranchInfo {
                    is_current: current.as_deref() == Some(short.as_str()),
                    name: short,
                    target,
                })
            })
            .collect())
    }

    /// All tags as `(short name, target)`.
    fn tags(&self) -> Result<Vec<(String, ObjectId)>> {
        Ok(self
            .list(TAGS_PREFIX)?
            .into_iter()
            .filter_map(|(name, id)| Some((name.strip_prefix(TAGS_PREFIX)?.to_string(), id)))
            .collect())
    }
}
