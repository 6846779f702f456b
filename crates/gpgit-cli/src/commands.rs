use std::env;
use std::fs;
use std::io::{self, Write};

use anyhow::Context;
use colored::Colorize;
use gpgit_sdk::{DiffSide, MergeReport, ObjectKind, RepoConfig, Repository, StatusEntry};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Init(args) => cmd_init(args),
        Command::HashObject(args) => cmd_hash_object(args),
        Command::CatFile(args) => cmd_cat_file(args),
        Command::WriteTree => cmd_write_tree(),
        Command::ReadTree(args) => cmd_read_tree(args),
        Command::Add(args) => cmd_add(args),
        Command::Commit(args) => cmd_commit(args),
        Command::Log(args) => cmd_log(args),
        Command::Show(args) => cmd_show(args),
        Command::Diff(args) => cmd_diff(args),
        Command::Status => cmd_status(),
        Command::Switch(args) => cmd_switch(args),
        Command::Branch(args) => cmd_branch(args),
        Command::Tag(args) => cmd_tag(args),
        Command::Reset(args) => cmd_reset(args),
        Command::Merge(args) => cmd_merge(args),
        Command::MergeBase(args) => cmd_merge_base(args),
        Command::Fetch(args) => cmd_fetch(args),
        Command::Push(args) => cmd_push(args),
        Command::K => cmd_k(),
    }
}

fn open_repo() -> anyhow::Result<Repository> {
    let root = env::current_dir().context("cannot determine current directory")?;
    debug!(root = %root.display(), "opening repository");
    Ok(Repository::open(&root)?)
}

fn write_stdout(bytes: &[u8]) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(bytes)?;
    out.flush()?;
    Ok(())
}

fn cmd_init(args: InitArgs) -> anyhow::Result<()> {
    let root = match args.path {
        Some(path) => path,
        None => env::current_dir()?,
    };
    fs::create_dir_all(&root).with_context(|| format!("cannot create {}", root.display()))?;
    let mut config = RepoConfig::default();
    if let Some(branch) = args.default_branch {
        config.default_branch = branch;
    }
    let repo = Repository::init_with(&root, config)?;
    println!(
        "{} Initialized empty gpgit repository in {}",
        "✓".green().bold(),
        repo.handle().control_dir().display().to_string().bold()
    );
    Ok(())
}

fn cmd_hash_object(args: HashObjectArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let data = fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    println!("{}", repo.hash_object(&data)?);
    Ok(())
}

fn cmd_cat_file(args: CatFileArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let id = repo.resolve(&args.object)?;
    write_stdout(&repo.cat_object(&id, None)?.data)
}

fn cmd_write_tree() -> anyhow::Result<()> {
    let repo = open_repo()?;
    println!("{}", repo.write_tree()?);
    Ok(())
}

fn cmd_read_tree(args: ReadTreeArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let id = repo.resolve(&args.tree)?;
    // A commit name reads that commit's tree.
    let tree = match repo.cat_object(&id, None)?.kind {
        ObjectKind::Commit => repo.get_commit(&id)?.tree,
        _ => id,
    };
    let files = repo.read_tree(&tree, args.update)?;
    println!("Read {} files from {}", files.len(), tree.short_hex().yellow());
    Ok(())
}

fn cmd_add(args: AddArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let count = repo.stage(&args.paths)?;
    println!("  {} {} files", "staged:".green(), count);
    Ok(())
}

fn cmd_commit(args: CommitArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let id = repo.commit(&args.message)?;
    let branch = repo
        .current_branch()?
        .unwrap_or_else(|| "detached HEAD".into());
    println!("[{} {}] {}", branch.green(), id.short_hex().yellow(), first_line(&args.message));
    Ok(())
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}

fn cmd_log(args: LogArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let names = repo.ref_names()?;
    let limit = args.limit.unwrap_or(usize::MAX);
    for (id, commit) in repo.log(&args.start)?.into_iter().take(limit) {
        let decoration = names
            .get(&id)
            .map(|refs| format!(" ({})", refs.join(", ")))
            .unwrap_or_default();
        if args.oneline {
            println!(
                "{}{} {}",
                id.short_hex().yellow(),
                decoration.green(),
                first_line(&commit.message)
            );
        } else {
            println!("{} {}{}\n", "commit".yellow(), id.to_string().yellow(), decoration.green());
            print_message(&commit.message);
        }
    }
    Ok(())
}

fn print_message(message: &str) {
    for line in message.lines() {
        println!("    {line}");
    }
    println!();
}

fn cmd_show(args: ShowArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let details = repo.show(&args.commit)?;
    println!("{} {}", "commit".yellow(), details.id.to_string().yellow());
    if details.commit.is_merge() {
        let parents: Vec<String> = details
            .commit
            .parents
            .iter()
            .map(|p| p.short_hex())
            .collect();
        println!("Merge: {}", parents.join(" "));
    }
    println!();
    print_message(&details.commit.message);
    write_stdout(details.diff.as_bytes())
}

fn cmd_diff(args: DiffArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let commit = args
        .commit
        .as_deref()
        .map(|name| repo.resolve(name))
        .transpose()?;
    let (from, to) = match (commit, args.cached) {
        (Some(id), true) => (DiffSide::Commit(id), DiffSide::Index),
        (Some(id), false) => (DiffSide::Commit(id), DiffSide::WorkingTree),
        (None, true) => (DiffSide::Head, DiffSide::Index),
        (None, false) => (DiffSide::Index, DiffSide::WorkingTree),
    };
    write_stdout(repo.diff(from, to)?.as_bytes())
}

fn print_entries(entries: &[StatusEntry]) {
    for entry in entries {
        println!("{:>12}: {}", entry.status.to_string(), entry.path);
    }
}

fn cmd_status() -> anyhow::Result<()> {
    let repo = open_repo()?;
    let status = repo.status()?;
    match (&status.branch, status.head) {
        (Some(branch), _) => println!("On branch {}", branch.yellow().bold()),
        (None, Some(head)) => println!("HEAD detached at {}", head.short_hex().yellow()),
        (None, None) => println!("HEAD detached"),
    }
    if let Some(merge_head) = status.merge_head {
        println!("Merging with {}", merge_head.short_hex().yellow());
    }

    println!("\nChanges to be committed:\n");
    print_entries(&status.staged);
    println!("\nChanges not staged for commit:\n");
    print_entries(&status.unstaged);
    Ok(())
}

fn cmd_switch(args: SwitchArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let id = repo.switch(&args.target)?;
    match repo.current_branch()? {
        Some(branch) => println!("Switched to branch {}", branch.yellow().bold()),
        None => println!("HEAD is now at {}", id.short_hex().yellow()),
    }
    Ok(())
}

fn cmd_branch(args: BranchArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    match args.name {
        Some(name) => {
            let id = repo.create_branch(&name, &args.start)?;
            println!("Branch {} created at {}", name.yellow(), id.short_hex());
        }
        None => {
            for branch in repo.branches()? {
                if branch.is_current {
                    println!("* {}", branch.name.green().bold());
                } else {
                    println!("  {}", branch.name);
                }
            }
        }
    }
    Ok(())
}

fn cmd_tag(args: TagArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let id = repo.create_tag(&args.name, &args.commit)?;
    println!("Tag {} created at {}", args.name.yellow(), id.short_hex());
    Ok(())
}

fn cmd_reset(args: ResetArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let id = repo.reset(&args.commit)?;
    println!("HEAD is now at {}", id.short_hex().yellow());
    Ok(())
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    match repo.combine(&args.commit)? {
        MergeReport::UpToDate => println!("Already up to date."),
        MergeReport::FastForward { from, to } => {
            println!("Fast-forward {}..{}", from.short_hex(), to.short_hex().yellow());
        }
        MergeReport::Merged { conflicts, .. } if conflicts.is_empty() => {
            println!(
                "{} Merged {}; commit to conclude the merge.",
                "✓".green(),
                args.commit.yellow()
            );
        }
        MergeReport::Merged { conflicts, .. } => {
            for path in &conflicts {
                println!("{} {}", "CONFLICT:".red().bold(), path);
            }
            println!("Fix conflicts, add the files and commit the result.");
        }
    }
    Ok(())
}

fn cmd_merge_base(args: MergeBaseArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    match repo.merge_base(&args.first, &args.second)? {
        Some(base) => println!("{base}"),
        None => anyhow::bail!("{} and {} share no history", args.first, args.second),
    }
    Ok(())
}

fn cmd_fetch(args: FetchArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let result = repo.fetch(&args.remote)?;
    println!(
        "Fetched {} objects from {}",
        result.objects_copied,
        args.remote.display().to_string().bold()
    );
    for update in result.refs_updated.iter().filter(|u| !u.is_noop()) {
        println!("  {} -> {}", update.name.green(), update.new.short_hex());
    }
    Ok(())
}

fn cmd_push(args: PushArgs) -> anyhow::Result<()> {
    let repo = open_repo()?;
    let result = repo.push(&args.remote, &args.branch)?;
    let old = result
        .update
        .old
        .map(|id| id.short_hex())
        .unwrap_or_else(|| "(new)".into());
    println!(
        "{} {} {}..{} ({} objects)",
        "✓".green(),
        result.update.name.yellow(),
        old,
        result.update.new.short_hex(),
        result.objects_copied
    );
    Ok(())
}

fn cmd_k() -> anyhow::Result<()> {
    let repo = open_repo()?;
    write_stdout(repo.graph_dot()?.as_bytes())
}
