// Copyright 2026 the Bezseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadratic and cubic Bézier segments for vector path editing.
//!
//! The bezseg library models a single curve segment of an editable outline
//! and answers the questions a path editor asks about it: how long it is,
//! which point on it is closest to the pointer, what the piece between two
//! parameters looks like, what cubic traces the same path as a quadratic,
//! and which parameter sits at a given fraction of the arc length.
//!
//! # Examples
//!
//! ```
//! use bezseg::{CurveSegment, Piece, Point};
//!
//! let seg = CurveSegment::cubic((0.0, 0.0), (0.0, 100.0), (100.0, 100.0), (100.0, 0.0));
//!
//! // Cut the curve at its arc length midpoint.
//! let t = seg.find_t_by_arclen_fraction(0.5);
//! let left = seg.split(0.0, t);
//! let right = seg.split(t, 1.0);
//! assert!((left.path_length() - right.path_length()).abs() < 1e-3);
//!
//! // Degenerate pieces come back as simpler primitives.
//! assert!(matches!(seg.split(t, t), Piece::Point(_)));
//!
//! let proj = seg.project(Point::new(50.0, 100.0));
//! assert!((proj.t - 0.5).abs() < 1e-6);
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This is useful for
//! `no_std` environments. The `alloc` crate is used regardless.
//!
//! [`libm`]: https://docs.rs/libm

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("bezseg requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

extern crate alloc;

pub mod common;
mod command;
mod cubicbez;
mod diagnostics;
mod error;
mod line;
mod param_curve;
mod point;
mod quadbez;
mod segment;
mod vec2;

pub use crate::command::*;
pub use crate::cubicbez::*;
pub use crate::diagnostics::*;
pub use crate::error::*;
pub use crate::line::*;
pub use crate::param_curve::*;
pub use crate::point::*;
pub use crate::quadbez::*;
pub use crate::segment::*;
pub use crate::vec2::*;
