use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "gpgit",
    about = "gpgit: a small content-addressed version control system",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an empty repository
    Init(InitArgs),
    /// Store a file as a blob and print its id
    HashObject(HashObjectArgs),
    /// Print the payload of an object
    CatFile(CatFileArgs),
    /// Write the index as a tree and print its id
    WriteTree,
    /// Load a tree into the index
    ReadTree(ReadTreeArgs),
    /// Stage files and directories
    Add(AddArgs),
    /// Record the index as a new commit
    Commit(CommitArgs),
    /// Show commit history
    Log(LogArgs),
    /// Show a commit and its changes
    Show(ShowArgs),
    /// Show changes between commit, index and working tree
    Diff(DiffArgs),
    /// Show working directory status
    Status,
    /// Check out a branch or commit
    Switch(SwitchArgs),
    /// List or create branches
    Branch(BranchArgs),
    /// Create a tag
    Tag(TagArgs),
    /// Move HEAD to a commit, keeping index and working tree
    Reset(ResetArgs),
    /// Merge a commit into HEAD
    Merge(MergeArgs),
    /// Print the merge base of two commits
    MergeBase(MergeBaseArgs),
    /// Copy branches from another repository into refs/remote/*
    Fetch(FetchArgs),
    /// Publish a branch to another repository
    Push(PushArgs),
    /// Print the ref and commit graph in Graphviz format
    K,
}

#[derive(Args)]
pub struct InitArgs {
    pub path: Option<PathBuf>,
    /// Branch HEAD starts on
    #[arg(long)]
    pub default_branch: Option<String>,
}

#[derive(Args)]
pub struct HashObjectArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct CatFileArgs {
    pub object: String,
}

#[derive(Args)]
pub struct ReadTreeArgs {
    pub tree: String,
    /// Also rewrite the working tree
    #[arg(short, long)]
    pub update: bool,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(Args)]
pub struct CommitArgs {
    #[arg(short, long)]
    pub message: String,
}

#[derive(Args)]
pub struct LogArgs {
    #[arg(default_value = "@")]
    pub start: String,
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
    #[arg(long)]
    pub oneline: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    #[arg(default_value = "@")]
    pub commit: String,
}

#[derive(Args)]
pub struct DiffArgs {
    /// Compare against the index instead of the working tree
    #[arg(long)]
    pub cached: bool,
    pub commit: Option<String>,
}

#[derive(Args)]
pub struct SwitchArgs {
    pub target: String,
}

#[derive(Args)]
pub struct BranchArgs {
    pub name: Option<String>,
    #[arg(default_value = "@")]
    pub start: String,
}

#[derive(Args)]
pub struct TagArgs {
    pub name: String,
    #[arg(default_value = "@")]
    pub commit: String,
}

#[derive(Args)]
pub struct ResetArgs {
    pub commit: String,
}

#[derive(Args)]
pub struct MergeArgs {
    pub commit: String,
}

#[derive(Args)]
pub struct MergeBaseArgs {
    pub first: String,
    pub second: String,
}

#[derive(Args)]
pub struct FetchArgs {
    pub remote: PathBuf,
}

#[derive(Args)]
pub struct PushArgs {
    pub remote: PathBuf,
    pub branch: String,
}
