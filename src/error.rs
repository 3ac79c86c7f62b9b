#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the graphpaint crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

/// Unified error type returned by the library and the CLI.
///
/// Every variant is fatal for a run. Validation variants
/// ([`Error::InvalidFormat`], [`Error::DimensionMismatch`],
/// [`Error::DestinationExists`]) are always raised before the destination
/// repository is touched.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// The decoded image does not use exactly three 8-bit color channels.
    #[error("image {path:?} must be 8-bit RGB without alpha, found {color_type}")]
    InvalidFormat {
        /// Location of the offending image.
        path:       PathBuf,
        /// Color model reported by the decoder.
        color_type: String
    },
    /// The image dimensions do not fit the contribution graph.
    #[error("image is {width}x{height} but {requirement}")]
    DimensionMismatch {
        /// Image width in pixels.
        width:       u32,
        /// Image height in pixels.
        height:      u32,
        /// Human readable description of the violated requirement.
        requirement: String
    },
    /// The destination repository directory is already present.
    #[error("destination {path:?} already exists")]
    DestinationExists {
        /// Location of the destination directory.
        path: PathBuf
    },
    /// Wraps I/O errors raised while touching the filesystem.
    #[error("i/o failure at {path:?}: {source}")]
    Io {
        /// Location that triggered the failure.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps decoder errors raised while opening the input image.
    #[error("failed to decode image {path:?}: {source}")]
    Image {
        /// Location of the image file.
        path:   PathBuf,
        /// Underlying decoder error.
        source: image::ImageError
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse configuration: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Wraps serialization errors when writing the commit plan.
    #[error("failed to serialize plan: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_json::Error
    },
    /// Returned when configuration values violate invariants.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// A `git` invocation could not be launched or exited unsuccessfully.
    #[error("git {command} failed: {message}")]
    Git {
        /// Arguments passed to `git`, joined by spaces.
        command: String,
        /// Launch error or captured standard error.
        message: String
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a git error for the given argument list.
    pub fn git<M>(args: &[&str], message: M) -> Self
    where
        M: Into<String>
    {
        Self::Git {
            command: args.join(" "),
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}
