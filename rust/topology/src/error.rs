// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for contour operations.

/// Result type alias for contour operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when a line list does not form a valid closed contour.
///
/// Line numbers are the `index` of the offending [`Line`](bend_assist_geometry::Line).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A contour must have at least one line.
    #[error("contour has no profile lines")]
    EmptyContour,

    /// Consecutive lines are not connected end-to-start.
    #[error("contour is not closed: line {0} endpoint does not match line {1} startpoint")]
    OpenContour(i32, i32),

    /// Start and end point of a line coincide.
    #[error("line {0} has zero length")]
    DegenerateLine(i32),

    /// Two lines join the same points in the same direction.
    #[error("line {0} duplicates an earlier contour line")]
    DuplicateLine(i32),

    /// A bend line was found in the profile.
    #[error("line {0} is not a profile line")]
    NotProfileLine(i32),

    /// A contour position passed to an edit is out of range.
    #[error("no contour line at position {0}")]
    PositionOutOfRange(usize),
}
