//! Domain-specific error types.
//!
//! Each provisioning component returns a typed error ([`ConfigError`],
//! [`CopyError`], [`InstallError`]) built with [`thiserror`]; the command
//! layer converts them to [`anyhow::Error`] via `?` at the CLI boundary.
//! Missing copy sources are deliberately not represented here — they are a
//! warn-and-skip condition reported through
//! [`CopyReport`](crate::copier::CopyReport), not an error value.

use thiserror::Error;

/// Errors from loading the configuration document.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read from disk.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Neither the two-section shape nor the legacy flat mapping parsed.
    #[error("config file {path} is not valid for any supported shape: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: String,
        /// Parse failure reported for the current two-section shape.
        message: String,
    },
}

/// Errors from a mutating copy run. Any of these aborts the remaining copies,
/// leaving already-copied files in place.
#[derive(Error, Debug)]
pub enum CopyError {
    /// A source exists but is not a regular file (symlink, directory, device).
    #[error("source '{path}' is not a regular file")]
    NotRegular {
        /// Path of the offending source.
        path: String,
    },

    /// The destination root could not be created.
    #[error("failed to create destination root {path}: {source}")]
    CreateRoot {
        /// Path of the destination root.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Copying a file's bytes failed.
    #[error("failed to copy {from} to {to}: {source}")]
    Io {
        /// Source path.
        from: String,
        /// Destination path.
        to: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the package classification and installation pipeline.
#[derive(Error, Debug)]
pub enum InstallError {
    /// The live repository query could not be executed at all.
    #[error("failed to query official repository for '{package}': {reason}")]
    Query {
        /// Package whose lookup failed.
        package: String,
        /// Why the query process could not run.
        reason: String,
    },

    /// The AUR helper is absent and a bootstrap step failed.
    #[error("bootstrapping {helper} failed while {step}: {reason}")]
    Bootstrap {
        /// Name of the AUR helper being bootstrapped.
        helper: String,
        /// The step that failed (e.g. "cloning the build recipe").
        step: String,
        /// Underlying failure text.
        reason: String,
    },

    /// A package-manager invocation exited non-zero.
    #[error("{backend} failed for {packages:?}: {reason}")]
    Backend {
        /// Backend command that failed ("pacman" or "yay").
        backend: String,
        /// Packages that were being installed.
        packages: Vec<String>,
        /// Underlying process error text.
        reason: String,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::io;

    // -----------------------------------------------------------------------
    // ConfigError
    // -----------------------------------------------------------------------

    #[test]
    fn config_error_read_display() {
        let e = ConfigError::Read {
            path: "dotfiles.json".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        insta::assert_snapshot!(
            e.to_string(),
            @"failed to read config file dotfiles.json: no such file"
        );
    }

    #[test]
    fn config_error_read_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Read {
            path: "dotfiles.json".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
    }

    #[test]
    fn config_error_parse_display() {
        let e = ConfigError::Parse {
            path: "dotfiles.json".to_string(),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert!(e.to_string().contains("dotfiles.json"));
        assert!(e.to_string().contains("any supported shape"));
    }

    // -----------------------------------------------------------------------
    // CopyError
    // -----------------------------------------------------------------------

    #[test]
    fn copy_error_not_regular_display() {
        let e = CopyError::NotRegular {
            path: "files/vimrc".to_string(),
        };
        insta::assert_snapshot!(e.to_string(), @"source 'files/vimrc' is not a regular file");
    }

    #[test]
    fn copy_error_io_display_names_both_paths() {
        let e = CopyError::Io {
            from: "files/vimrc".to_string(),
            to: "/home/user/.vimrc".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.to_string().contains("files/vimrc"));
        assert!(e.to_string().contains("/home/user/.vimrc"));
    }

    #[test]
    fn copy_error_io_has_source() {
        use std::error::Error as StdError;
        let e = CopyError::Io {
            from: "a".to_string(),
            to: "b".to_string(),
            source: io::Error::other("disk full"),
        };
        assert!(e.source().is_some());
    }

    #[test]
    fn copy_error_create_root_display() {
        let e = CopyError::CreateRoot {
            path: "/home/user".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.to_string().contains("destination root"));
        assert!(e.to_string().contains("/home/user"));
    }

    // -----------------------------------------------------------------------
    // InstallError
    // -----------------------------------------------------------------------

    #[test]
    fn install_error_query_display() {
        let e = InstallError::Query {
            package: "vim".to_string(),
            reason: "failed to execute: pacman".to_string(),
        };
        insta::assert_snapshot!(
            e.to_string(),
            @"failed to query official repository for 'vim': failed to execute: pacman"
        );
    }

    #[test]
    fn install_error_bootstrap_display_names_step() {
        let e = InstallError::Bootstrap {
            helper: "yay".to_string(),
            step: "cloning the build recipe".to_string(),
            reason: "git exited 128".to_string(),
        };
        insta::assert_snapshot!(
            e.to_string(),
            @"bootstrapping yay failed while cloning the build recipe: git exited 128"
        );
    }

    #[test]
    fn install_error_backend_display_lists_packages() {
        let e = InstallError::Backend {
            backend: "pacman".to_string(),
            packages: vec!["vim".to_string(), "git".to_string()],
            reason: "exit 1".to_string(),
        };
        assert!(e.to_string().contains("pacman"));
        assert!(e.to_string().contains("vim"));
        assert!(e.to_string().contains("git"));
    }

    // -----------------------------------------------------------------------
    // Boundary conversions
    // -----------------------------------------------------------------------

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<ConfigError>();
        assert_send_sync::<CopyError>();
        assert_send_sync::<InstallError>();
    }

    #[test]
    fn errors_convert_to_anyhow() {
        let _config: anyhow::Error = ConfigError::Parse {
            path: "x".to_string(),
            message: "bad".to_string(),
        }
        .into();
        let _copy: anyhow::Error = CopyError::NotRegular {
            path: "x".to_string(),
        }
        .into();
        let _install: anyhow::Error = InstallError::Query {
            package: "x".to_string(),
            reason: "bad".to_string(),
        }
        .into();
    }
}
