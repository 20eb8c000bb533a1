//! Error types for map generation and map file handling.
//!
//! Generation itself never fails; everything here comes from reading or
//! writing world files, or from a configuration the generator cannot honor.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a generator or shift run.
#[derive(Error, Debug)]
pub enum MapError {
    /// A world file could not be read or written.
    #[error("unable to access {}: {source}", path.display())]
    Io {
        /// The file being read or written.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A line in a world file did not match the expected format.
    #[error("malformed line {line_no} in {}: {line:?}", file.display())]
    MalformedLine {
        /// The offending file.
        file: PathBuf,
        /// 1-based line number.
        line_no: usize,
        /// The raw line text.
        line: String,
    },

    /// A room record names a sector id that no terrain kind maps to.
    #[error("unable to identify sector vnum {0}")]
    UnknownSector(i32),

    /// A `#<vnum>` header was not followed by its data line.
    #[error("error reading room #{vnum} in {}", file.display())]
    MissingRecordBody {
        /// The offending file.
        file: PathBuf,
        /// The room whose body is missing.
        vnum: usize,
    },

    /// A room vnum lies outside the configured map.
    #[error("room #{vnum} in {} is outside the map", file.display())]
    OutOfBounds {
        /// The offending file.
        file: PathBuf,
        /// The out-of-range room vnum.
        vnum: usize,
    },

    /// Horizontal shifting needs a map that wraps east-west.
    #[error("cannot shift by {amount}: the map does not wrap horizontally")]
    ShiftWithoutWrap {
        /// Requested shift distance.
        amount: i32,
    },

    /// The PNG preview could not be rendered or saved.
    #[error("unable to write image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The generation report could not be serialized.
    #[error("unable to write report {}: {source}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The run configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MapError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        MapError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for map operations.
pub type MapResult<T> = Result<T, MapError>;
