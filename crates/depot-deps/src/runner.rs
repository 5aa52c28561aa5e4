//! Running dependency manager executables.

use std::path::Path;
use std::process::{Command, Stdio};

/// Errors from running an external command.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("'{0}' not found in PATH")]
    NotFound(String),
    #[error("'{program}' exited with {code}: {stderr}")]
    Failed {
        program: String,
        code: i32,
        stderr: String,
    },
    #[error("failed to execute '{0}': {1}")]
    Exec(String, std::io::Error),
}

/// Runs external programs on behalf of the interactors.
pub trait CommandRunner {
    /// Run `program` with `args` inside `cwd`, waiting for it to finish.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), RunError>;
}

/// Runs programs with [`std::process::Command`].
#[derive(Debug, Default, Clone)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), RunError> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RunError::NotFound(program.to_string())
                } else {
                    RunError::Exec(program.to_string(), e)
                }
            })?;

        if !output.status.success() {
            return Err(RunError::Failed {
                program: program.to_string(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    /// One recorded invocation.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Invocation {
        pub program: String,
        pub args: Vec<String>,
        pub cwd: PathBuf,
    }

    /// Records invocations and fakes the files a real run would leave behind.
    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        pub invocations: RefCell<Vec<Invocation>>,
        /// Files written into `cwd` on every run, as (name, contents).
        pub outputs: Vec<(&'static str, &'static str)>,
        /// Exit code to fail with.
        pub fail_with: Option<i32>,
    }

    impl RecordingRunner {
        pub fn writing(outputs: Vec<(&'static str, &'static str)>) -> Self {
            Self {
                outputs,
                ..Default::default()
            }
        }

        pub fn failing(code: i32) -> Self {
            Self {
                fail_with: Some(code),
                ..Default::default()
            }
        }

        pub fn single(&self) -> Invocation {
            let invocations = self.invocations.borrow();
            assert_eq!(invocations.len(), 1, "expected exactly one invocation");
            invocations[0].clone()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), RunError> {
            self.invocations.borrow_mut().push(Invocation {
                program: program.to_string(),
                args: args.to_vec(),
                cwd: cwd.to_path_buf(),
            });

            if let Some(code) = self.fail_with {
                return Err(RunError::Failed {
                    program: program.to_string(),
                    code,
                    stderr: "simulated failure".to_string(),
                });
            }

            for (name, contents) in &self.outputs {
                std::fs::write(cwd.join(name), contents).unwrap();
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let err = SystemRunner
            .run("depot-test-definitely-missing-program", &[], temp.path())
            .unwrap_err();
        assert!(matches!(err, RunError::NotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_reported() {
        let temp = tempfile::tempdir().unwrap();
        let args = vec!["-c".to_string(), "echo broken >&2; exit 3".to_string()];
        let err = SystemRunner.run("sh", &args, temp.path()).unwrap_err();
        match err {
            RunError::Failed { code, stderr, .. } => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn runs_inside_working_directory() {
        let temp = tempfile::tempdir().unwrap();
        let args = vec!["-c".to_string(), "touch marker".to_string()];
        SystemRunner.run("sh", &args, temp.path()).unwrap();
        assert!(temp.path().join("marker").exists());
    }
}
