//! Configuration document describing a contribution graph painting run.
//!
//! The document is read from YAML and every field falls back to a default,
//! so an empty document describes the stock run: `pacman.png` painted onto
//! 2024 inside `2024-contribution-graph`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{self, Error},
    history::CommitAuthor,
};

/// Image painted when no path is configured.
pub const DEFAULT_IMAGE_PATH: &str = "pacman.png";
/// Year painted when none is configured.
pub const DEFAULT_TARGET_YEAR: i32 = 2024;
/// Repository directory created when none is configured.
pub const DEFAULT_REPO_DIR: &str = "2024-contribution-graph";

/// Settings for a single run.
///
/// # Examples
///
/// ```
/// use graphpaint::GraphConfig;
///
/// let yaml = r#"
/// image_path: invader.png
/// target_year: 2025
/// inverted_colors: true
/// "#;
/// let config = GraphConfig::parse(yaml,).expect("valid configuration",);
/// assert_eq!(config.target_year, 2025);
/// assert_eq!(config.repo_dir.to_str(), Some("2024-contribution-graph"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize,)]
#[serde(deny_unknown_fields)]
pub struct GraphConfig
{
    /// Location of the `W x 7` source image.
    #[serde(default = "default_image_path", alias = "image")]
    pub image_path: PathBuf,

    /// Year whose contribution graph is painted.
    #[serde(default = "default_target_year", alias = "year")]
    pub target_year: i32,

    /// Directory that will hold the generated repository. Must not exist.
    #[serde(default = "default_repo_dir", alias = "repo")]
    pub repo_dir: PathBuf,

    /// Paints dark pixels bright and bright pixels dark when `true`.
    #[serde(default, alias = "inverted")]
    pub inverted_colors: bool,

    /// Optional identity written to the repository's local git config.
    #[serde(default)]
    pub author: Option<CommitAuthor,>,
}

fn default_image_path() -> PathBuf
{
    PathBuf::from(DEFAULT_IMAGE_PATH,)
}

fn default_target_year() -> i32
{
    DEFAULT_TARGET_YEAR
}

fn default_repo_dir() -> PathBuf
{
    PathBuf::from(DEFAULT_REPO_DIR,)
}

impl Default for GraphConfig
{
    fn default() -> Self
    {
        Self {
            image_path:      default_image_path(),
            target_year:     default_target_year(),
            repo_dir:        default_repo_dir(),
            inverted_colors: false,
            author:          None,
        }
    }
}

impl GraphConfig
{
    /// Reads and validates a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read, [`Error::Parse`]
    /// for malformed YAML and [`Error::Validation`] when values violate the
    /// invariants checked by [`GraphConfig::validate`].
    pub fn load(path: &Path,) -> Result<Self, Error,>
    {
        debug!("Reading configuration from {}", path.display());
        let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
        Self::parse(&contents,)
    }

    /// Parses and validates a YAML document.
    ///
    /// # Errors
    ///
    /// See [`GraphConfig::load`].
    pub fn parse(contents: &str,) -> Result<Self, Error,>
    {
        let config: Self = if contents.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(contents,)?
        };
        config.validate()?;
        Ok(config,)
    }

    /// Checks invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for empty paths or a blank author.
    pub fn validate(&self,) -> Result<(), Error,>
    {
        if self.image_path.as_os_str().is_empty() {
            return Err(Error::validation("image_path must not be empty",),);
        }
        if self.repo_dir.as_os_str().is_empty() {
            return Err(Error::validation("repo_dir must not be empty",),);
        }
        if let Some(author,) = self.author.as_ref() {
            if author.name.trim().is_empty() {
                return Err(Error::validation("author.name must not be blank",),);
            }
            if author.email.trim().is_empty() {
                return Err(Error::validation("author.email must not be blank",),);
            }
        }

        Ok((),)
    }
}
