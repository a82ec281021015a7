//! Temporary workspaces and request fixtures for CLI tests.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use course_core::CourseRequest;
use course_core::test_support::{alternating_line, fixed_start};
use log::LevelFilter;
use tempfile::TempDir;

use crate::CliError;

/// A temporary directory addressed through UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self { _tmp: tmp, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write test file");
}

/// Four alternating places with a fixed start time and no visit estimates.
pub(super) fn sample_request() -> CourseRequest {
    CourseRequest::new(alternating_line()).with_start_time(fixed_start())
}

pub(super) fn write_request(path: &Utf8Path, request: &CourseRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}

/// Stand-in for the process logger, which can only be installed once.
pub(super) const fn skip_logger(_level: Option<LevelFilter>) -> Result<(), CliError> {
    Ok(())
}
