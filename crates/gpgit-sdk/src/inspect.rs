use std::collections::BTreeMap;

use gpgit_diff::{changed_files, diff_trees};
use gpgit_index::{read_tree, FileSet, WorkdirStatus};
use gpgit_refs::{RefStore, RefValue, MERGE_HEAD};
use gpgit_store::{Commit, ObjectStore};
use gpgit_types::{ObjectId, ObjectKind};

use crate::error::SdkResult;
use crate::repository::Repository;

/// One side of a diff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffSide {
    /// The tree of a specific commit.
    Commit(ObjectId),
    /// The tree of the `HEAD` commit; empty before the first commit.
    Head,
    Index,
    WorkingTree,
}

/// A commit together with its diff against its first parent.
#[derive(Clone, Debug)]
pub struct CommitDetails {
    pub id: ObjectId,
    pub commit: Commit,
    pub diff: String,
}

impl Repository {
    /// Files recorded by `commit`, or nothing for `None`.
    pub fn commit_files(&self, commit: Option<ObjectId>) -> SdkResult<FileSet> {
        match commit {
            Some(id) => {
                let tree = self.get_commit(&id)?.tree;
                Ok(read_tree(&self.objects, &tree, "")?)
            }
            None => Ok(FileSet::new()),
        }
    }

    fn files_of(&self, side: DiffSide) -> SdkResult<FileSet> {
        match side {
            DiffSide::Commit(id) => self.commit_files(Some(id)),
            DiffSide::Head => self.commit_files(self.head()?),
            DiffSide::Index => Ok(self.load_index()?.into_entries()),
            // Stored so the diff can read the blobs back.
            DiffSide::WorkingTree => Ok(self.working_tree().snapshot(&self.objects)?),
        }
    }

    /// Staged changes (`HEAD` against the index) and unstaged changes (the
    /// index against the working tree).
    pub fn status(&self) -> SdkResult<WorkdirStatus> {
        let head = self.head()?;
        let head_files = self.commit_files(head)?;
        let index = self.load_index()?;
        let working = self.working_tree().scan()?;
        Ok(WorkdirStatus {
            branch: self.current_branch()?,
            head,
            merge_head: self.refs.value_of(MERGE_HEAD)?,
            staged: changed_files(&head_files, index.entries()),
            unstaged: changed_files(index.entries(), &working),
        })
    }

    /// Unified diff from one side to another.
    pub fn diff(&self, from: DiffSide, to: DiffSide) -> SdkResult<String> {
        let from = self.files_of(from)?;
        let to = self.files_of(to)?;
        Ok(diff_trees(&self.objects, &from, &to)?)
    }

    /// The commit `name` resolves to, diffed against its first parent (or
    /// against nothing for a root commit).
    pub fn show(&self, name: &str) -> SdkResult<CommitDetails> {
        let id = self.resolve(name)?;
        let commit = self.get_commit(&id)?;
        let before = self.commit_files(commit.first_parent().copied())?;
        let after = read_tree(&self.objects, &commit.tree, "")?;
        let diff = diff_trees(&self.objects, &before, &after)?;
        Ok(CommitDetails { id, commit, diff })
    }

    /// Every ref name grouped by the id it resolves to, for decorating
    /// history output.
    pub fn ref_names(&self) -> SdkResult<BTreeMap<ObjectId, Vec<String>>> {
        let mut names: BTreeMap<ObjectId, Vec<String>> = BTreeMap::new();
        for (name, id) in self.refs.list("")? {
            names.entry(id).or_default().push(name);
        }
        Ok(names)
    }

    /// Graphviz description of every ref and every commit reachable from
    /// them.
    pub fn graph_dot(&self) -> SdkResult<String> {
        let mut dot = String::from("digraph commits {\n");
        let mut tips = Vec::new();
        for name in self.refs.list_refs("")? {
            let Some(value) = self.refs.read_ref(&name)? else {
                continue;
            };
            dot.push_str(&format!("\"{name}\" [shape=note]\n"));
            dot.push_str(&format!("\"{name}\" -> \"{}\"\n", target(&value)));
            if let RefValue::Direct(id) = value {
                // Tags may name blobs or trees.
                if self.objects.get_tagged(&id)?.kind == ObjectKind::Commit {
                    tips.push(id);
                }
            }
        }
        for id in self.graph().ancestors_of(tips) {
            let id = id?;
            let commit = self.get_commit(&id)?;
            dot.push_str(&format!(
                "\"{id}\" [shape=box style=filled label=\"{}\"]\n",
                id.short_hex()
            ));
            for parent in &commit.parents {
                dot.push_str(&format!("\"{id}\" -> \"{parent}\"\n"));
            }
        }
        dot.push_str("}\n");
        Ok(dot)
    }
}

fn target(value: &RefValue) -> String {
    match value {
        RefValue::Direct(id) => id.to_hex(),
        RefValue::Symbolic(name) => name.clone(),
    }
}
