use std::fs;
use std::path::{Path, PathBuf};

use gpgit_dag::CommitGraph;
use gpgit_index::{read_tree, write_tree, FileSet, Index, WorkingTree};
use gpgit_merge::MergeDriver;
use gpgit_refs::{
    validate_branch_name, validate_tag_name, BranchInfo, FsRefStore, RefStore, RefValue, HEAD,
    HEADS_PREFIX, TAGS_PREFIX,
};
use gpgit_store::{Commit, FsObjectStore, ObjectStore, StoredObject};
use gpgit_types::{ObjectId, ObjectKind, RepositoryHandle, DEFAULT_CONTROL_DIR};
use tracing::info;

use crate::config::RepoConfig;
use crate::error::{SdkError, SdkResult};

/// A gpgit repository on disk.
///
/// Owns the [`RepositoryHandle`] and the stores opened through it. Every
/// operation goes through this value; nothing is cached between calls, so
/// two `Repository` values on the same root observe each other's writes.
pub struct Repository {
    pub(crate) handle: RepositoryHandle,
    pub(crate) config: RepoConfig,
    pub(crate) objects: FsObjectStore,
    pub(crate) refs: FsRefStore,
    pub(crate) driver: Box<dyn MergeDriver>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("handle", &self.handle)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Create a new repository at `root` with the default configuration.
    pub fn init(root: impl AsRef<Path>) -> SdkResult<Self> {
        Self::init_with(root, RepoConfig::default())
    }

    /// Create the control directory layout, point `HEAD` at the (still
    /// unborn) default branch and write `config.toml`.
    pub fn init_with(root: impl AsRef<Path>, config: RepoConfig) -> SdkResult<Self> {
        let handle = RepositoryHandle::new(root.as_ref(), config.control_dir.as_str());
        if handle.is_initialized() {
            return Err(SdkError::AlreadyInitialized(handle.control_dir()));
        }
        validate_branch_name(&config.default_branch)?;
        fs::create_dir_all(handle.control_dir())?;

        let repo = Self::assemble(handle, config);
        repo.objects.init()?;
        repo.refs.init()?;
        repo.refs.update(
            HEAD,
            RefValue::symbolic(format!("{HEADS_PREFIX}{}", repo.config.default_branch)),
            false,
        )?;
        repo.config.save(&repo.handle.config_path())?;
        info!(
            root = %repo.handle.root().display(),
            branch = %repo.config.default_branch,
            "initialized repository"
        );
        Ok(repo)
    }

    /// Open an existing repository that uses the default control directory.
    pub fn open(root: impl AsRef<Path>) -> SdkResult<Self> {
        Self::open_with_control_dir(root, DEFAULT_CONTROL_DIR)
    }

    pub fn open_with_control_dir(root: impl AsRef<Path>, control_dir: &str) -> SdkResult<Self> {
        let handle = RepositoryHandle::new(root.as_ref(), control_dir);
        if !handle.is_initialized() {
            return Err(SdkError::NotARepository(root.as_ref().to_path_buf()));
        }
        let mut config = RepoConfig::load(&handle.config_path())?;
        config.control_dir = control_dir.to_string();
        Ok(Self::assemble(handle, config))
    }

    fn assemble(handle: RepositoryHandle, config: RepoConfig) -> Self {
        Self {
            objects: FsObjectStore::open(&handle),
            refs: FsRefStore::open(&handle),
            driver: config.merge.build_driver(),
            handle,
            config,
        }
    }

    /// Replace the configured line-merge driver.
    pub fn with_merge_driver(mut self, driver: Box<dyn MergeDriver>) -> Self {
        self.driver = driver;
        self
    }

    // ---- Content operations ----

    /// Store `data` as a blob.
    pub fn hash_object(&self, data: &[u8]) -> SdkResult<ObjectId> {
        Ok(self.objects.put(data, ObjectKind::Blob)?)
    }

    /// Read any object, optionally insisting on its kind.
    pub fn cat_object(&self, id: &ObjectId, expected: Option<ObjectKind>) -> SdkResult<StoredObject> {
        let object = self.objects.get_tagged(id)?;
        if let Some(expected) = expected {
            if expected != object.kind {
                return Err(gpgit_store::StoreError::ObjectTypeMismatch {
                    id: *id,
                    expected,
                    actual: object.kind,
                }
                .into());
            }
        }
        Ok(object)
    }

    /// Resolve a ref name, short branch or tag name, `@`, or hex id.
    pub fn resolve(&self, name: &str) -> SdkResult<ObjectId> {
        Ok(self.refs.resolve_name(name)?)
    }

    // ---- Index operations ----

    pub fn load_index(&self) -> SdkResult<Index> {
        Ok(Index::load(&self.handle.index_path())?)
    }

    pub(crate) fn save_index(&self, index: &Index) -> SdkResult<()> {
        Ok(index.save(&self.handle.index_path())?)
    }

    /// Stage files, and directories recursively, skipping the control
    /// directory. Returns the number of files staged.
    pub fn stage(&self, paths: &[PathBuf]) -> SdkResult<usize> {
        let mut index = self.load_index()?;
        let staged = self
            .working_tree()
            .stage(&mut index, paths, &self.objects)?;
        self.save_index(&index)?;
        Ok(staged)
    }

    /// Write the index as a tree hierarchy and return the root tree id.
    pub fn write_tree(&self) -> SdkResult<ObjectId> {
        Ok(write_tree(&self.load_index()?, &self.objects)?)
    }

    /// Replace the index with the contents of `tree`. With
    /// `update_working`, the working tree is rewritten to match as well.
    pub fn read_tree(&self, tree: &ObjectId, update_working: bool) -> SdkResult<FileSet> {
        let files = read_tree(&self.objects, tree, "")?;
        if update_working {
            self.working_tree().materialize(&files, &self.objects)?;
        }
        self.save_index(&Index::from_entries(files.clone())?)?;
        Ok(files)
    }

    // ---- Commit operations ----

    /// Commit the current index on top of `HEAD` (and `MERGE_HEAD`, if a
    /// merge is pending).
    pub fn commit(&self, message: &str) -> SdkResult<ObjectId> {
        let tree = self.write_tree()?;
        Ok(gpgit_dag::commit(message, tree, &self.objects, &self.refs)?)
    }

    pub fn get_commit(&self, id: &ObjectId) -> SdkResult<Commit> {
        Ok(self.objects.get_commit(id)?)
    }

    /// The commit `HEAD` resolves to, if any.
    pub fn head(&self) -> SdkResult<Option<ObjectId>> {
        Ok(self.refs.value_of(HEAD)?)
    }

    /// History starting at `start`, first-parent-first.
    pub fn log(&self, start: &str) -> SdkResult<Vec<(ObjectId, Commit)>> {
        let id = self.resolve(start)?;
        Ok(self.graph().log(id)?)
    }

    // ---- Branch operations ----

    /// Create (or move) `refs/heads/<name>` to the commit `start` names.
    pub fn create_branch(&self, name: &str, start: &str) -> SdkResult<ObjectId> {
        validate_branch_name(name)?;
        let id = self.resolve(start)?;
        self.refs
            .update(&format!("{HEADS_PREFIX}{name}"), RefValue::Direct(id), true)?;
        info!(branch = name, target = %id.short_hex(), "created branch");
        Ok(id)
    }

    pub fn branches(&self) -> SdkResult<Vec<BranchInfo>> {
        Ok(self.refs.branches()?)
    }

    pub fn current_branch(&self) -> SdkResult<Option<String>> {
        Ok(self.refs.current_branch()?)
    }

    /// Create (or move) `refs/tags/<name>` to the object `target` names.
    pub fn create_tag(&self, name: &str, target: &str) -> SdkResult<ObjectId> {
        validate_tag_name(name)?;
        let id = self.resolve(target)?;
        self.refs
            .update(&format!("{TAGS_PREFIX}{name}"), RefValue::Direct(id), true)?;
        info!(tag = name, target = %id.short_hex(), "created tag");
        Ok(id)
    }

    pub fn tags(&self) -> SdkResult<Vec<(String, ObjectId)>> {
        Ok(self.refs.tags()?)
    }

    /// Check out `name`: index and working tree are replaced by its tree.
    ///
    /// A branch name attaches `HEAD` to that branch; anything else leaves
    /// `HEAD` detached at the resolved commit.
    pub fn switch(&self, name: &str) -> SdkResult<ObjectId> {
        let id = self.resolve(name)?;
        let commit = self.get_commit(&id)?;
        self.read_tree(&commit.tree, true)?;

        let head = if self.refs.is_branch(name)? {
            RefValue::symbolic(format!("{HEADS_PREFIX}{name}"))
        } else {
            RefValue::Direct(id)
        };
        self.refs.update(HEAD, head, false)?;
        info!(target = name, commit = %id.short_hex(), "switched");
        Ok(id)
    }

    /// Move `HEAD` (through its branch) to `name`. The index and working
    /// tree are left alone.
    pub fn reset(&self, name: &str) -> SdkResult<ObjectId> {
        let id = self.resolve(name)?;
        self.refs.update(HEAD, RefValue::Direct(id), true)?;
        info!(commit = %id.short_hex(), "reset HEAD");
        Ok(id)
    }

    // ---- Accessors ----

    pub fn handle(&self) -> &RepositoryHandle {
        &self.handle
    }

    pub fn root(&self) -> &Path {
        self.handle.root()
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    pub fn objects(&self) -> &FsObjectStore {
        &self.objects
    }

    pub fn refs(&self) -> &FsRefStore {
        &self.refs
    }

    pub fn working_tree(&self) -> WorkingTree<'_> {
        WorkingTree::new(&self.handle)
    }

    pub(crate) fn graph(&self) -> CommitGraph<'_> {
        CommitGraph::new(&self.objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{write, TestRepo};
    use gpgit_refs::{Head, RefError};

    #[test]
    fn init_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let control = dir.path().join(".gpgit");
        assert!(control.join("objects").is_dir());
        assert!(control.join("refs/heads").is_dir());
        assert!(control.join("refs/tags").is_dir());
        assert!(control.join("config.toml").is_file());
        assert_eq!(
            fs::read_to_string(control.join("HEAD")).unwrap(),
            "ref: refs/heads/master"
        );
        assert_eq!(repo.head().unwrap(), None);
        assert_eq!(repo.current_branch().unwrap().as_deref(), Some("master"));
    }

    #[test]
    fn init_twice_fails() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        assert!(matches!(
            Repository::init(dir.path()),
            Err(SdkError::AlreadyInitialized(_))
        ));
    }

    #[test]
    fn open_requires_control_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Repository::open(dir.path()),
            Err(SdkError::NotARepository(_))
        ));
    }

    #[test]
    fn custom_control_dir_and_branch() {
        let dir = tempfile::tempdir().unwrap();
        let config = RepoConfig {
            control_dir: ".meta".into(),
            default_branch: "trunk".into(),
            ..RepoConfig::default()
        };
        Repository::init_with(dir.path(), config).unwrap();
        let repo = Repository::open_with_control_dir(dir.path(), ".meta").unwrap();
        assert_eq!(repo.config().default_branch, "trunk");
        assert_eq!(repo.current_branch().unwrap().as_deref(), Some("trunk"));
    }

    #[test]
    fn hash_object_is_content_addressed() {
        let t = TestRepo::new();
        let a = t.repo.hash_object(b"hello\n").unwrap();
        let b = t.repo.hash_object(b"hello\n").unwrap();
        assert_eq!(a, b);
        let object = t.repo.cat_object(&a, Some(ObjectKind::Blob)).unwrap();
        assert_eq!(object.data, b"hello\n");
        assert!(t.repo.cat_object(&a, Some(ObjectKind::Tree)).is_err());
    }

    #[test]
    fn stage_ignores_control_dir_and_writes_tree() {
        let t = TestRepo::new();
        write(t.root(), "a.txt", "a");
        write(t.root(), "dir/b.txt", "b");
        assert_eq!(t.repo.stage(&[PathBuf::from(".")]).unwrap(), 2);

        let index = t.repo.load_index().unwrap();
        let paths: Vec<&String> = index.entries().keys().collect();
        assert_eq!(paths, vec!["a.txt", "dir/b.txt"]);

        let tree = t.repo.write_tree().unwrap();
        let files = read_tree(t.repo.objects(), &tree, "").unwrap();
        assert_eq!(&files, index.entries());
    }

    #[test]
    fn commits_chain_through_head() {
        let t = TestRepo::new();
        let first = t.commit_file("f.txt", "1", "first");
        let second = t.commit_file("f.txt", "2", "second");
        assert_eq!(t.repo.get_commit(&second).unwrap().parents, vec![first]);
        assert_eq!(t.repo.resolve("master").unwrap(), second);

        let log = t.repo.log("@").unwrap();
        let messages: Vec<&str> = log.iter().map(|(_, c)| c.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn branch_and_switch() {
        let t = TestRepo::new();
        let first = t.commit_file("f.txt", "1", "first");
        t.repo.create_branch("topic", "@").unwrap();
        t.commit_file("f.txt", "2", "second");

        t.repo.switch("topic").unwrap();
        assert_eq!(fs::read_to_string(t.root().join("f.txt")).unwrap(), "1");
        assert_eq!(t.repo.current_branch().unwrap().as_deref(), Some("topic"));
        assert_eq!(t.repo.head().unwrap(), Some(first));

        let branches = t.repo.branches().unwrap();
        let current: Vec<&str> = branches
            .iter()
            .filter(|b| b.is_current)
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(current, vec!["topic"]);
    }

    #[test]
    fn switch_to_commit_detaches() {
        let t = TestRepo::new();
        let first = t.commit_file("f.txt", "1", "first");
        t.commit_file("f.txt", "2", "second");
        t.repo.switch(&first.to_hex()).unwrap();
        assert_eq!(t.repo.refs().head().unwrap(), Some(Head::Detached(first)));
        assert_eq!(fs::read_to_string(t.root().join("f.txt")).unwrap(), "1");
    }

    #[test]
    fn reset_moves_branch_only() {
        let t = TestRepo::new();
        let first = t.commit_file("f.txt", "1", "first");
        t.commit_file("f.txt", "2", "second");
        t.repo.reset(&first.to_hex()).unwrap();
        assert_eq!(t.repo.resolve("master").unwrap(), first);
        assert_eq!(fs::read_to_string(t.root().join("f.txt")).unwrap(), "2");
    }

    #[test]
    fn tags_resolve_by_short_name() {
        let t = TestRepo::new();
        let first = t.commit_file("f.txt", "1", "first");
        t.repo.create_tag("v1", "@").unwrap();
        t.commit_file("f.txt", "2", "second");
        assert_eq!(t.repo.resolve("v1").unwrap(), first);
        assert_eq!(t.repo.tags().unwrap(), vec![("v1".to_string(), first)]);
    }

    #[test]
    fn branches_may_share_names_with_control_files() {
        let t = TestRepo::new();
        let first = t.commit_file("f.txt", "1", "first");
        t.repo.create_branch("index", "@").unwrap();
        t.repo.create_branch("config.toml", "@").unwrap();
        assert_eq!(t.repo.resolve("index").unwrap(), first);
        assert_eq!(t.repo.resolve("config.toml").unwrap(), first);

        t.repo.switch("index").unwrap();
        assert_eq!(t.repo.current_branch().unwrap().as_deref(), Some("index"));
    }

    #[test]
    fn invalid_branch_name_is_rejected() {
        let t = TestRepo::new();
        t.commit_file("f.txt", "1", "first");
        assert!(matches!(
            t.repo.create_branch("bad name", "@"),
            Err(SdkError::Ref(RefError::InvalidName { .. }))
        ));
    }
}
