// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Git history generation for painted contribution graphs.
//!
//! Creates a fresh repository at an explicit location and records the dated
//! commits that make up the picture. Every `git` invocation runs with the
//! repository as its working directory; the process working directory is
//! left untouched.

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    process::Command,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::{self, Error},
    intensity::IntensitySample,
};

/// File written next to `.git` when the repository is created.
pub const PLACEHOLDER_FILE: &str = "dummy.txt";
/// Tracked file that receives one line per generated commit.
pub const HISTORY_FILE: &str = "file.txt";

/// Identity stored in the repository's local git configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize,)]
pub struct CommitAuthor
{
    /// Value for `user.name`.
    pub name:  String,
    /// Value for `user.email`.
    pub email: String,
}

/// A single commit to be recorded.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct CommitRecord
{
    /// Day the commit is dated at.
    pub date:    NaiveDate,
    /// Position of the commit within its day, starting at 1.
    pub ordinal: usize,
}

impl CommitRecord
{
    /// Timestamp passed to `git commit --date`, noon of the day.
    pub fn timestamp(&self,) -> String
    {
        format!("{}T12:00:00", self.date.format("%Y-%m-%d"))
    }

    /// Commit message.
    pub fn message(&self,) -> String
    {
        format!("Commit {} on {}", self.ordinal, self.timestamp())
    }

    /// Line appended to [`HISTORY_FILE`] so the commit has content.
    pub fn history_line(&self,) -> String
    {
        format!("Commit number {} on {}\n", self.ordinal, self.timestamp())
    }
}

/// Receiver of generated commits.
pub trait CommitSink
{
    /// Records one commit. Commits arrive in final history order.
    ///
    /// # Errors
    ///
    /// Any error aborts the emission.
    fn record(&mut self, commit: &CommitRecord,) -> Result<(), Error,>;
}

/// Records `level` commits for every sample, in sample order.
///
/// All commits of one day are recorded before the next day starts. The
/// optional `progress` callback runs after each recorded commit.
///
/// # Returns
///
/// Total number of commits recorded.
///
/// # Errors
///
/// Propagates the first error returned by the sink.
pub fn emit_history<S, F,>(
    sink: &mut S,
    samples: &[IntensitySample],
    mut progress: F,
) -> Result<usize, Error,>
where
    S: CommitSink + ?Sized,
    F: FnMut(&CommitRecord,),
{
    let mut recorded = 0;
    for sample in samples {
        for ordinal in 1..=sample.level.commits() {
            let commit = CommitRecord {
                date: sample.date,
                ordinal,
            };
            sink.record(&commit,)?;
            progress(&commit,);
            recorded += 1;
        }
    }

    info!("Recorded {} commits across {} days", recorded, samples.len());
    Ok(recorded,)
}

/// Freshly initialized repository receiving the generated history.
#[derive(Debug,)]
pub struct GitRepository
{
    root: PathBuf,
}

impl GitRepository
{
    /// Creates `root`, initializes git inside it and writes the placeholder
    /// file.
    ///
    /// # Errors
    ///
    /// * [`Error::DestinationExists`] when anything, including a dangling
    ///   symlink, already occupies `root`.
    /// * [`Error::Io`] when the directory or placeholder cannot be written.
    ///   Missing parent directories are not created.
    /// * [`Error::Git`] when `git init` or `git config` fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::path::Path;
    ///
    /// use graphpaint::GitRepository;
    ///
    /// # fn example() -> Result<(), graphpaint::Error> {
    /// let repository = GitRepository::create(Path::new("2024-contribution-graph"), None)?;
    /// println!("initialized {}", repository.root().display());
    /// # Ok(())
    /// # }
    /// ```
    pub fn create(root: &Path, author: Option<&CommitAuthor,>,) -> Result<Self, Error,>
    {
        fs::create_dir(root,).map_err(|source| {
            if source.kind() == io::ErrorKind::AlreadyExists {
                Error::DestinationExists {
                    path: root.to_path_buf(),
                }
            } else {
                error::io_error(root, source,)
            }
        },)?;
        info!("Initializing git repository in {}", root.display());

        let repository = Self {
            root: root.to_path_buf(),
        };
        repository.run_git(&["init"],)?;

        if let Some(author,) = author {
            repository.run_git(&["config", "user.name", &author.name],)?;
            repository.run_git(&["config", "user.email", &author.email],)?;
        }

        let placeholder = repository.root.join(PLACEHOLDER_FILE,);
        fs::write(&placeholder, "Initial commit.\n",)
            .map_err(|source| error::io_error(&placeholder, source,),)?;

        Ok(repository,)
    }

    /// Location of the working tree.
    pub fn root(&self,) -> &Path
    {
        &self.root
    }

    fn append_history_line(&self, commit: &CommitRecord,) -> Result<(), Error,>
    {
        let path = self.root.join(HISTORY_FILE,);
        let mut file = OpenOptions::new()
            .create(true,)
            .append(true,)
            .open(&path,)
            .map_err(|source| error::io_error(&path, source,),)?;
        file.write_all(commit.history_line().as_bytes(),)
            .map_err(|source| error::io_error(&path, source,),)
    }

    fn run_git(&self, args: &[&str],) -> Result<(), Error,>
    {
        let output = Command::new("git",)
            .args(args,)
            .current_dir(&self.root,)
            .output()
            .map_err(|e| Error::git(args, e.to_string(),),)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr,);
            return Err(Error::git(args, stderr.trim(),),);
        }

        Ok((),)
    }
}

impl CommitSink for GitRepository
{
    fn record(&mut self, commit: &CommitRecord,) -> Result<(), Error,>
    {
        let timestamp = commit.timestamp();
        let message = commit.message();
        debug!("Committing {}", message);

        self.append_history_line(commit,)?;
        self.run_git(&["add", HISTORY_FILE],)?;
        self.run_git(&["commit", "-m", &message, "--date", &timestamp],)
    }
}

#[cfg(test)]
mod tests
{
    use std::process::Command;

    use tempfile::tempdir;

    use super::*;
    use crate::intensity::IntensityLevel;

    #[derive(Default,)]
    struct RecordingSink
    {
        commits: Vec<CommitRecord,>,
        fail_at: Option<usize,>,
    }

    impl CommitSink for RecordingSink
    {
        fn record(&mut self, commit: &CommitRecord,) -> Result<(), Error,>
        {
            if self.fail_at == Some(self.commits.len(),) {
                return Err(Error::git(&["commit"], "simulated failure",),);
            }
            self.commits.push(commit.clone(),);
            Ok((),)
        }
    }

    fn date(month: u32, day: u32,) -> NaiveDate
    {
        NaiveDate::from_ymd_opt(2024, month, day,).expect("valid date",)
    }

    fn sample(month: u32, day: u32, level: u8,) -> IntensitySample
    {
        IntensitySample {
            date:  date(month, day,),
            level: IntensityLevel::new(level,).expect("valid level",),
        }
    }

    fn git_available() -> bool
    {
        Command::new("git",).arg("--version",).output().is_ok_and(|o| o.status.success(),)
    }

    fn test_author() -> CommitAuthor
    {
        CommitAuthor {
            name:  "Graph Painter".to_owned(),
            email: "painter@example.com".to_owned(),
        }
    }

    #[test]
    fn commit_record_formats_noon_timestamp()
    {
        let commit = CommitRecord {
            date:    date(3, 5,),
            ordinal: 2,
        };
        assert_eq!(commit.timestamp(), "2024-03-05T12:00:00");
        assert_eq!(commit.message(), "Commit 2 on 2024-03-05T12:00:00");
        assert_eq!(commit.history_line(), "Commit number 2 on 2024-03-05T12:00:00\n");
    }

    #[test]
    fn emit_history_records_level_commits_per_day_in_order()
    {
        let samples = [sample(1, 7, 2,), sample(1, 8, 0,), sample(1, 9, 3,),];
        let mut sink = RecordingSink::default();
        let mut observed = 0;

        let total = emit_history(&mut sink, &samples, |_| observed += 1,).expect("emission",);

        assert_eq!(total, 5);
        assert_eq!(observed, 5);
        let recorded: Vec<(NaiveDate, usize,),> =
            sink.commits.iter().map(|c| (c.date, c.ordinal,),).collect();
        assert_eq!(
            recorded,
            vec![
                (date(1, 7), 1),
                (date(1, 7), 2),
                (date(1, 9), 1),
                (date(1, 9), 2),
                (date(1, 9), 3),
            ]
        );
    }

    #[test]
    fn emit_history_stops_at_first_failure()
    {
        let samples = [sample(1, 7, 4,),];
        let mut sink = RecordingSink {
            fail_at: Some(2,),
            ..RecordingSink::default()
        };

        let error = emit_history(&mut sink, &samples, |_| {},).expect_err("expected failure",);
        assert!(matches!(error, Error::Git { .. }));
        assert_eq!(sink.commits.len(), 2);
    }

    #[test]
    fn create_refuses_existing_destination()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let error = GitRepository::create(temp.path(), None,).expect_err("expected exists error",);
        match error {
            Error::DestinationExists {
                path,
            } => assert_eq!(path, temp.path()),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn create_does_not_create_missing_parents()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let parent = temp.path().join("missing",);
        let root = parent.join("graph",);

        let error = GitRepository::create(&root, None,).expect_err("expected io error",);
        match error {
            Error::Io {
                path,
                ..
            } => assert_eq!(path, root),
            other => panic!("unexpected error variant: {other:?}"),
        }
        assert!(!parent.exists());
    }

    #[cfg(unix)]
    #[test]
    fn create_treats_dangling_symlink_as_existing()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let root = temp.path().join("graph",);
        std::os::unix::fs::symlink(temp.path().join("nowhere",), &root,)
            .expect("failed to create symlink",);

        let error = GitRepository::create(&root, None,).expect_err("expected exists error",);
        assert!(matches!(error, Error::DestinationExists { .. }), "got {error:?}");
        assert!(!temp.path().join("nowhere",).exists());
    }

    #[test]
    fn git_repository_records_dated_commits()
    {
        if !git_available() {
            return;
        }

        let temp = tempdir().expect("failed to create tempdir",);
        let root = temp.path().join("graph",);
        let author = test_author();
        let mut repository = GitRepository::create(&root, Some(&author,),).expect("create repo",);
        assert!(root.join(".git",).exists());
        assert_eq!(
            fs::read_to_string(root.join(PLACEHOLDER_FILE),).expect("placeholder"),
            "Initial commit.\n"
        );

        let samples = [sample(1, 7, 2,), sample(1, 8, 1,),];
        let total = emit_history(&mut repository, &samples, |_| {},).expect("emission",);
        assert_eq!(total, 3);

        let log = Command::new("git",)
            .args(["log", "--reverse", "--format=%ad|%s", "--date=format:%Y-%m-%dT%H:%M:%S"],)
            .current_dir(&root,)
            .output()
            .expect("git log",);
        let log = String::from_utf8_lossy(&log.stdout,);
        let lines: Vec<&str,> = log.lines().collect();
        assert_eq!(
            lines,
            vec![
                "2024-01-07T12:00:00|Commit 1 on 2024-01-07T12:00:00",
                "2024-01-07T12:00:00|Commit 2 on 2024-01-07T12:00:00",
                "2024-01-08T12:00:00|Commit 1 on 2024-01-08T12:00:00",
            ]
        );

        let history = fs::read_to_string(root.join(HISTORY_FILE,),).expect("history file",);
        assert_eq!(history.lines().count(), 3);
    }
}
