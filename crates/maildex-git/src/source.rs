//! Driving the external `git` binary.
//!
//! One child process per operation, synchronous. Listing and in-memory reads
//! consume the child's standard output through a pipe; extraction points the
//! child's standard output at the destination file so the bytes never pass
//! through this process.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use chrono::{DateTime, Utc};
use maildex_types::{BlobId, PendingMessage};
use tracing::debug;

use crate::error::{GitError, GitResult};
use crate::list::parse_listing_line;
use crate::seen::SeenSet;

/// Increment by which the in-memory read buffer grows.
const READ_CHUNK: usize = 1024;

/// A git repository serving as a message store.
///
/// Construction is cheap and performs no validation; a bad repository path
/// surfaces as an error from the first operation that shells out. The value
/// is plain data, so it can be cloned freely and shared across a run.
#[derive(Clone, Debug)]
pub struct GitSource {
    /// Repository metadata directory, passed as `--git-dir`.
    git_dir: PathBuf,
    /// Program to invoke. Defaults to `git`; tests substitute fakes.
    program: PathBuf,
}

impl GitSource {
    /// A source reading from the repository at `git_dir`.
    pub fn new(git_dir: impl Into<PathBuf>) -> Self {
        Self {
            git_dir: git_dir.into(),
            program: PathBuf::from("git"),
        }
    }

    /// Substitute the program used for object-store commands.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// The configured repository directory.
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// List message blobs reachable from `HEAD` that are not yet in `seen`.
    ///
    /// Runs the object listing and filters it line by line (see
    /// [`parse_listing_line`]); every identifier that survives the filter
    /// and was not already in `seen` becomes one [`PendingMessage`], in
    /// listing order. Accepted identifiers are added to `seen` as they are
    /// found, so a blob listed twice in the same run yields one entry.
    ///
    /// `since` bounds the listing to history from after the given instant;
    /// `None` walks all of it. Lines that do not name a message blob are
    /// skipped silently — the listing legitimately interleaves commits,
    /// trees, and unrelated blobs.
    pub fn discover(
        &self,
        seen: &mut SeenSet,
        since: Option<DateTime<Utc>>,
    ) -> GitResult<Vec<PendingMessage>> {
        let args = self.listing_args(since);
        let command = self.describe(&args);
        let (mut child, stdout) = self.spawn_streaming(&args)?;

        let mut reader = BufReader::new(stdout);
        let mut line = Vec::with_capacity(128);
        let mut pending = Vec::new();
        let streamed = loop {
            line.clear();
            match reader.read_until(b'\n', &mut line) {
                Ok(0) => break Ok(()),
                Ok(_) => {}
                Err(e) => {
                    break Err(GitError::Stream {
                        command,
                        source: e,
                    })
                }
            }
            if line.last() == Some(&b'\n') {
                line.pop();
            }
            let Some(id) = parse_listing_line(&line) else {
                continue;
            };
            if seen.insert(&id) {
                pending.push(PendingMessage::git_blob(id));
            }
        };
        // Close our end of the pipe before waiting: a child mid-write must
        // see it gone rather than block.
        drop(reader);
        reap(&mut child);
        streamed?;

        debug!(new = pending.len(), known = seen.len(), "object listing complete");
        Ok(pending)
    }

    /// Read a blob's entire contents into memory.
    ///
    /// Streams `cat-file blob` output through a pipe, growing the buffer in
    /// [`READ_CHUNK`] increments until end-of-stream. A read error is a
    /// failure, never a partial result. The child's exit status is not
    /// inspected on this path: end-of-stream is the completion signal, and
    /// an unknown identifier simply yields an empty buffer for the caller to
    /// judge.
    pub fn read_blob(&self, id: &BlobId) -> GitResult<Vec<u8>> {
        let args = blob_args(id);
        let command = self.describe(&args);
        let (mut child, mut stdout) = self.spawn_streaming(&args)?;

        let mut data = Vec::new();
        let mut filled = 0;
        let streamed = loop {
            if data.len() < filled + READ_CHUNK {
                data.resize(filled + READ_CHUNK, 0);
            }
            match stdout.read(&mut data[filled..filled + READ_CHUNK]) {
                Ok(0) => break Ok(()),
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => {
                    break Err(GitError::Stream {
                        command,
                        source: e,
                    })
                }
            }
        };
        drop(stdout);
        reap(&mut child);
        streamed?;

        data.truncate(filled);
        debug!(id = %id.short(), len = data.len(), "blob read");
        Ok(data)
    }

    /// Materialize a blob into the file at `dest`.
    ///
    /// The destination is created if absent and truncated if present,
    /// readable and writable by the owner only. The child writes straight
    /// into it. Callers on this path hand the file to another tool next, so
    /// every failure is surfaced: destination creation, launch, wait, and an
    /// unsuccessful exit status all error.
    pub fn extract_blob(&self, id: &BlobId, dest: &Path) -> GitResult<()> {
        let file = open_destination(dest).map_err(|e| GitError::CreateDest {
            path: dest.to_path_buf(),
            source: e,
        })?;

        let args = blob_args(id);
        let command = self.describe(&args);
        let mut child = self
            .command(&args)
            .stdout(Stdio::from(file))
            .spawn()
            .map_err(|e| GitError::Launch {
                command: command.clone(),
                source: e,
            })?;
        let status = child.wait().map_err(|e| GitError::Wait {
            command: command.clone(),
            source: e,
        })?;
        if !status.success() {
            return Err(GitError::Exit { command, status });
        }

        debug!(id = %id.short(), dest = %dest.display(), "blob extracted");
        Ok(())
    }

    /// Arguments for the object listing.
    ///
    /// The bound is rendered as RFC 3339 with an explicit UTC offset so the
    /// external parser sees an unambiguous instant regardless of the local
    /// timezone.
    fn listing_args(&self, since: Option<DateTime<Utc>>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["rev-list".into(), "--objects".into()];
        if let Some(bound) = since {
            args.push("--since".into());
            args.push(bound.to_rfc3339().into());
        }
        args.push("HEAD".into());
        args
    }

    /// Base command: `<program> --git-dir <dir> <args…>`, stdin closed.
    fn command(&self, args: &[OsString]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--git-dir").arg(&self.git_dir).args(args);
        cmd.stdin(Stdio::null());
        cmd
    }

    /// Spawn with standard output piped back to us.
    fn spawn_streaming(
        &self,
        args: &[OsString],
    ) -> GitResult<(Child, std::process::ChildStdout)> {
        let mut child = self
            .command(args)
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| GitError::Launch {
                command: self.describe(args),
                source: e,
            })?;
        let stdout = child.stdout.take().expect("stdout was piped");
        Ok((child, stdout))
    }

    /// Command line as shown in errors; the `--git-dir` prefix is elided.
    fn describe(&self, args: &[OsString]) -> String {
        let mut out = self.program.display().to_string();
        for arg in args {
            out.push(' ');
            out.push_str(&arg.to_string_lossy());
        }
        out
    }
}

/// Arguments to print one blob to standard output.
fn blob_args(id: &BlobId) -> Vec<OsString> {
    vec!["cat-file".into(), "blob".into(), id.as_str().into()]
}

/// Open the extraction target: create or truncate, owner-only permissions.
fn open_destination(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

/// Collect the child's exit so it does not linger as a zombie. The status is
/// deliberately not inspected; callers that care wait themselves.
fn reap(child: &mut Child) {
    let _ = child.wait();
}
