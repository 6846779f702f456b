//! In-process diff3.
//!
//! Both sides are diffed against the base with `similar`. Base lines that
//! both sides kept unchanged act as synchronization points; every region
//! between two such points is resolved on its own:
//!
//! - only one side changed it: take that side
//! - both sides made the same change: take it once
//! - otherwise: emit a conflict block with all three versions

use similar::{capture_diff_slices, Algorithm, DiffOp};

use crate::driver::{MergeDriver, MergeLabels, MergeOutcome};
use crate::error::MergeResult;

/// Line-based three-way merge producing `diff3 -m` style conflict blocks.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeMergeDriver;

fn split_lines(data: &[u8]) -> Vec<&[u8]> {
    data.split_inclusive(|&b| b == b'\n').collect()
}

/// For each base line, the index of the matching line in `side`, if the
/// diff kept it.
fn match_lines(base: &[&[u8]], side: &[&[u8]]) -> Vec<Option<usize>> {
    let mut matched = vec![None; base.len()];
    for op in capture_diff_slices(Algorithm::Myers, base, side) {
        if let DiffOp::Equal {
            old_index,
            new_index,
            len,
        } = op
        {
            for k in 0..len {
                matched[old_index + k] = Some(new_index + k);
            }
        }
    }
    matched
}

fn push_lines(out: &mut Vec<u8>, lines: &[&[u8]]) {
    for line in lines {
        out.extend_from_slice(line);
    }
}

fn push_block(out: &mut Vec<u8>, marker: &str, label: &str, lines: &[&[u8]]) {
    out.extend_from_slice(format!("{marker} {label}\n").as_bytes());
    push_lines(out, lines);
    if out.last().is_some_and(|&b| b != b'\n') {
        out.push(b'\n');
    }
}

impl MergeDriver for NativeMergeDriver {
    fn merge(
        &self,
        base: Option<&[u8]>,
        ours: Option<&[u8]>,
        theirs: Option<&[u8]>,
        labels: &MergeLabels,
    ) -> MergeResult<MergeOutcome> {
        let o = split_lines(base.unwrap_or_default());
        let a = split_lines(ours.unwrap_or_default());
        let b = split_lines(theirs.unwrap_or_default());
        let ma = match_lines(&o, &a);
        let mb = match_lines(&o, &b);

        let mut out = Vec::new();
        let mut conflict = false;
        let (mut io, mut ia, mut ib) = (0, 0, 0);
        loop {
            while io < o.len() && ma[io] == Some(ia) && mb[io] == Some(ib) {
                out.extend_from_slice(o[io]);
                io += 1;
                ia += 1;
                ib += 1;
            }
            if io == o.len() && ia == a.len() && ib == b.len() {
                break;
            }

            let (eo, ea, eb) = (io..o.len())
                .find_map(|i| Some((i, ma[i]?, mb[i]?)))
                .unwrap_or((o.len(), a.len(), b.len()));
            let (chunk_o, chunk_a, chunk_b) = (&o[io..eo], &a[ia..ea], &b[ib..eb]);

            if chunk_a == chunk_o || chunk_a == chunk_b {
                push_lines(&mut out, chunk_b);
            } else if chunk_b == chunk_o {
                push_lines(&mut out, chunk_a);
            } else {
                conflict = true;
                push_block(&mut out, "<<<<<<<", &labels.ours, chunk_a);
                push_block(&mut out, "|||||||", &labels.base, chunk_o);
                out.extend_from_slice(b"=======\n");
                push_lines(&mut out, chunk_b);
                if out.last().is_some_and(|&c| c != b'\n') {
                    out.push(b'\n');
                }
                out.extend_from_slice(format!(">>>>>>> {}\n", labels.theirs).as_bytes());
            }
            (io, ia, ib) = (eo, ea, eb);
        }

        Ok(MergeOutcome {
            content: out,
            conflict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn merge(base: &str, ours: &str, theirs: &str) -> MergeOutcome {
        NativeMergeDriver
            .merge(
                Some(base.as_bytes()),
                Some(ours.as_bytes()),
                Some(theirs.as_bytes()),
                &MergeLabels::default(),
            )
            .unwrap()
    }

    fn text(outcome: &MergeOutcome) -> &str {
        std::str::from_utf8(&outcome.content).unwrap()
    }

    #[test]
    fn non_overlapping_edits_merge_cleanly() {
        let outcome = merge("a\nb\nc\nd\ne\n", "A\nb\nc\nd\ne\n", "a\nb\nc\nd\nE\n");
        assert!(!outcome.conflict);
        assert_eq!(text(&outcome), "A\nb\nc\nd\nE\n");
    }

    #[test]
    fn identical_edits_are_taken_once() {
        let outcome = merge("x\n", "y\n", "y\n");
        assert!(!outcome.conflict);
        assert_eq!(text(&outcome), "y\n");
    }

    #[test]
    fn overlapping_edits_conflict() {
        let outcome = merge("keep\nline\n", "keep\nours\n", "keep\ntheirs\n");
        assert!(outcome.conflict);
        assert_eq!(
            text(&outcome),
            "keep\n<<<<<<< HEAD\nours\n||||||| BASE\nline\n=======\ntheirs\n>>>>>>> MERGE_HEAD\n"
        );
    }

    #[test]
    fn custom_labels_appear_in_markers() {
        let labels = MergeLabels {
            ours: "mine".into(),
            base: "ancestor".into(),
            theirs: "yours".into(),
        };
        let outcome = NativeMergeDriver
            .merge(Some(b"a"), Some(b"b"), Some(b"c"), &labels)
            .unwrap();
        assert!(outcome.conflict);
        let merged = text(&outcome);
        assert!(merged.starts_with("<<<<<<< mine\nb\n||||||| ancestor\na\n"));
        assert!(merged.ends_with("=======\nc\n>>>>>>> yours\n"));
    }

    #[test]
    fn missing_sides_are_empty() {
        // Deleted on their side, untouched on ours.
        let deleted = NativeMergeDriver
            .merge(Some(b"gone\n"), Some(b"gone\n"), None, &MergeLabels::default())
            .unwrap();
        assert!(!deleted.conflict);
        assert!(deleted.content.is_empty());

        // Added only on our side.
        let added = NativeMergeDriver
            .merge(None, Some(b"new\n"), None, &MergeLabels::default())
            .unwrap();
        assert!(!added.conflict);
        assert_eq!(added.content, b"new\n");
    }

    #[test]
    fn both_added_differently_conflicts() {
        let outcome = NativeMergeDriver
            .merge(None, Some(b"one\n"), Some(b"two\n"), &MergeLabels::default())
            .unwrap();
        assert!(outcome.conflict);
    }

    proptest! {
        #[test]
        fn untouched_side_yields_the_other(
            base in proptest::collection::vec("[a-d]{0,3}\n", 0..12),
            other in proptest::collection::vec("[a-d]{0,3}\n", 0..12),
        ) {
            let base = base.concat();
            let other = other.concat();
            let theirs_changed = merge(&base, &base, &other);
            prop_assert!(!theirs_changed.conflict);
            prop_assert_eq!(text(&theirs_changed), other.as_str());

            let ours_changed = merge(&base, &other, &base);
            prop_assert!(!ours_changed.conflict);
            prop_assert_eq!(text(&ours_changed), other.as_str());
        }
    }
}
