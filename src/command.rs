// Copyright 2026 the Bezseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outline path commands produced from curve segments.

use arrayvec::ArrayVec;

use crate::{CubicBez, CurveKind, Point, QuadBez};

/// A curve command of an outline path, as consumed by path serialization.
///
/// `is_split` records whether the command resulted from splitting another
/// segment; the editor uses it to decide continuity and selection behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathCommand {
    /// A quadratic curve command (`Q`).
    Quad {
        /// The curve geometry.
        curve: QuadBez,
        /// Whether the command resulted from a split.
        is_split: bool,
    },
    /// A cubic curve command (`C`).
    Cubic {
        /// The curve geometry.
        curve: CubicBez,
        /// Whether the command resulted from a split.
        is_split: bool,
    },
}

impl PathCommand {
    /// The kind of curve this command draws.
    #[inline]
    pub fn kind(&self) -> CurveKind {
        match self {
            PathCommand::Quad { .. } => CurveKind::Quadratic,
            PathCommand::Cubic { .. } => CurveKind::Cubic,
        }
    }

    /// The command letter.
    #[inline]
    pub fn svg_char(&self) -> char {
        self.kind().svg_char()
    }

    /// Whether the command resulted from a split.
    #[inline]
    pub fn is_split(&self) -> bool {
        match *self {
            PathCommand::Quad { is_split, .. } | PathCommand::Cubic { is_split, .. } => is_split,
        }
    }

    /// The control points, including start and end, in order.
    pub fn points(&self) -> ArrayVec<Point, 4> {
        match self {
            PathCommand::Quad { curve, .. } => curve.points().into_iter().collect(),
            PathCommand::Cubic { curve, .. } => ArrayVec::from(curve.points()),
        }
    }

    /// The start point.
    #[inline]
    pub fn start(&self) -> Point {
        match self {
            PathCommand::Quad { curve, .. } => curve.p0,
            PathCommand::Cubic { curve, .. } => curve.p0,
        }
    }

    /// The end point.
    #[inline]
    pub fn end(&self) -> Point {
        match self {
            PathCommand::Quad { curve, .. } => curve.p2,
            PathCommand::Cubic { curve, .. } => curve.p3,
        }
    }
}
