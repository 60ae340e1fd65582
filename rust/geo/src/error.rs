// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for GEO reading and writing.

/// Result type alias for GEO operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a GEO document.
///
/// Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A record did not have the expected shape.
    #[error("line {line}: expected {expected}, found {found:?}")]
    Syntax {
        line: usize,
        expected: &'static str,
        found: String,
    },

    /// The document ended inside a section.
    #[error("unexpected end of file in section {section}")]
    UnexpectedEof { section: &'static str },

    /// A contour or bend record refers to a vertex that does not exist.
    #[error("line {line}: vertex {index} out of range (1..={count})")]
    VertexOutOfRange {
        line: usize,
        index: usize,
        count: usize,
    },

    /// The profile lines do not form a valid closed contour.
    #[error("invalid part: {0}")]
    Part(#[from] bend_assist_topology::Error),
}
