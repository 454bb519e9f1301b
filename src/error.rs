// Copyright 2026 the Bezseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported at the boundary between stored geometry and segments.

use core::fmt;

use crate::CurveKind;

/// An error constructing a [`CurveSegment`](crate::CurveSegment).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SegmentError {
    /// The number of control points does not match the curve kind.
    WrongPointCount {
        /// The requested kind.
        kind: CurveKind,
        /// The number of control points supplied.
        found: usize,
    },
    /// A command letter that names neither a quadratic nor a cubic curve.
    UnknownKind(char),
}

impl fmt::Display for SegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentError::WrongPointCount { kind, found } => write!(
                f,
                "a {kind} curve needs {} control points, got {found}",
                kind.point_count()
            ),
            SegmentError::UnknownKind(c) => write!(f, "invalid curve command type: {c:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SegmentError {}

#[cfg(test)]
mod tests {
    use crate::{CurveKind, SegmentError};

    #[test]
    fn display() {
        let err = SegmentError::WrongPointCount {
            kind: CurveKind::Cubic,
            found: 3,
        };
        assert_eq!(err.to_string(), "a cubic curve needs 4 control points, got 3");
        assert_eq!(
            SegmentError::UnknownKind('L').to_string(),
            "invalid curve command type: 'L'"
        );
    }
}
