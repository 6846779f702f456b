//! Blob-level diff: line-by-line comparison of file contents.
//!
//! Uses the `similar` crate (Myers diff algorithm) and renders the result
//! in unified format with three lines of context.

use similar::{ChangeTag, TextDiff};

/// The result of diffing two blobs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlobDiff {
    /// Unified diff text; empty when the contents are identical.
    pub text: String,
    pub additions: usize,
    pub deletions: usize,
    /// At least one side is not UTF-8, so no line diff was produced.
    pub binary: bool,
}

impl BlobDiff {
    /// Returns `true` if the two blobs are identical.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Unified diff between `old` and `new`, labelled `old_label` / `new_label`.
pub fn diff_blobs(old: &[u8], new: &[u8], old_label: &str, new_label: &str) -> BlobDiff {
    if old == new {
        return BlobDiff {
            text: String::new(),
            additions: 0,
            deletions: 0,
            binary: false,
        };
    }

    let (Ok(old_str), Ok(new_str)) = (std::str::from_utf8(old), std::str::from_utf8(new)) else {
        return BlobDiff {
            text: format!("Binary files {old_label} and {new_label} differ\n"),
            additions: 0,
            deletions: 0,
            binary: true,
        };
    };

    let diff = TextDiff::from_lines(old_str, new_str);
    let (mut additions, mut deletions) = (0, 0);
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => additions += 1,
            ChangeTag::Delete => deletions += 1,
            ChangeTag::Equal => {}
        }
    }
    let text = diff
        .unified_diff()
        .context_radius(3)
        .header(old_label, new_label)
        .to_string();

    BlobDiff {
        text,
        additions,
        deletions,
        binary: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_blobs() {
        let diff = diff_blobs(b"same\n", b"same\n", "a/f", "b/f");
        assert!(diff.is_empty());
        assert_eq!(diff.additions + diff.deletions, 0);
    }

    #[test]
    fn single_line_change() {
        let diff = diff_blobs(b"one\ntwo\nthree\n", b"one\n2\nthree\n", "a/f", "b/f");
        assert_eq!(diff.additions, 1);
        assert_eq!(diff.deletions, 1);
        assert!(diff.text.starts_with("--- a/f\n+++ b/f\n"));
        assert!(diff.text.contains("-two\n"));
        assert!(diff.text.contains("+2\n"));
    }

    #[test]
    fn new_file_is_all_additions() {
        let diff = diff_blobs(b"", b"a\nb\n", "/dev/null", "b/new");
        assert_eq!(diff.additions, 2);
        assert_eq!(diff.deletions, 0);
    }

    #[test]
    fn binary_content() {
        let diff = diff_blobs(&[0xff, 0x00], &[0xfe], "a/bin", "b/bin");
        assert!(diff.binary);
        assert_eq!(diff.text, "Binary files a/bin and b/bin differ\n");
    }
}
