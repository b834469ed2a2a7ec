// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, FsError, GitError, MirrorError, MirrorResult, NetworkError};
use std::path::Path;

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        key: "server".to_string(),
        env: "INPUT_SERVER".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required input 'server' (set INPUT_SERVER)");
}

#[test]
fn test_http_error_display_includes_status_and_body() {
    let err: MirrorError = NetworkError::HttpError {
        status: 401,
        url: "https://git.example.com/api/v1/orgs/acme/repos?page=1&limit=50".to_string(),
        body: "unauthorized".to_string(),
    }
    .into();
    insta::assert_snapshot!(
        err.to_string(),
        @"network error: http error 401: https://git.example.com/api/v1/orgs/acme/repos?page=1&limit=50: unauthorized"
    );
}

#[test]
fn test_git_command_failed_display() {
    let err = GitError::CommandFailed {
        command: "git config --global --add include.path /home/ci/.git-mirrors".to_string(),
        code: 255,
        message: "could not lock config file".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"git command failed: git config --global --add include.path /home/ci/.git-mirrors (exit code 255) - could not lock config file"
    );
}

#[test]
fn test_fs_error_io_maps_not_found() {
    let path = Path::new("/nowhere/.git-mirrors");
    let err = FsError::io(path, std::io::Error::from(std::io::ErrorKind::NotFound));
    assert!(matches!(err, FsError::NotFound(ref p) if p == "/nowhere/.git-mirrors"));

    let err = FsError::io(
        path,
        std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    );
    assert!(matches!(err, FsError::IoError { .. }));
}

#[test]
fn test_mirror_error_size() {
    // Every variant is a thin Box + discriminant
    let size = std::mem::size_of::<MirrorError>();
    assert!(size <= 24, "MirrorError is {size} bytes, expected <= 24");
}

#[test]
fn test_mirror_result_size() {
    let size = std::mem::size_of::<MirrorResult<()>>();
    assert!(size <= 24, "MirrorResult<()> is {size} bytes, expected <= 24");
}
