use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::driver::{MergeDriver, MergeLabels, MergeOutcome};
use crate::error::{MergeError, MergeResult};

/// Merge driver that runs an external `diff3 -m`.
///
/// Exit status 0 means a clean merge and 1 means conflicts were written
/// into the output; anything else is a driver failure.
#[derive(Clone, Debug)]
pub struct Diff3Driver {
    program: String,
}

impl Diff3Driver {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for Diff3Driver {
    fn default() -> Self {
        Self::new("diff3")
    }
}

fn temp_file(content: Option<&[u8]>) -> MergeResult<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.unwrap_or_default())?;
    file.flush()?;
    Ok(file)
}

impl MergeDriver for Diff3Driver {
    fn merge(
        &self,
        base: Option<&[u8]>,
        ours: Option<&[u8]>,
        theirs: Option<&[u8]>,
        labels: &MergeLabels,
    ) -> MergeResult<MergeOutcome> {
        let ours_file = temp_file(ours)?;
        let base_file = temp_file(base)?;
        let theirs_file = temp_file(theirs)?;

        let output = Command::new(&self.program)
            .arg("-m")
            .arg("-L")
            .arg(&labels.ours)
            .arg(ours_file.path())
            .arg("-L")
            .arg(&labels.base)
            .arg(base_file.path())
            .arg("-L")
            .arg(&labels.theirs)
            .arg(theirs_file.path())
            .output()
            .map_err(|e| MergeError::Driver(format!("could not run {}: {e}", self.program)))?;

        debug!(program = %self.program, status = ?output.status.code(), "diff3 finished");
        match output.status.code() {
            Some(0) => Ok(MergeOutcome::clean(output.stdout)),
            Some(1) => Ok(MergeOutcome {
                content: output.stdout,
                conflict: true,
            }),
            _ => Err(MergeError::Driver(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_a_driver_error() {
        let driver = Diff3Driver::new("gpgit-no-such-diff3-binary");
        let err = driver
            .merge(Some(b"a\n"), Some(b"b\n"), Some(b"c\n"), &MergeLabels::default())
            .unwrap_err();
        assert!(matches!(err, MergeError::Driver(_)));
    }

    #[test]
    fn default_program_is_diff3() {
        assert_eq!(Diff3Driver::default().program(), "diff3");
    }
}
