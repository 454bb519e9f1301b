// Copyright 2026 the Bezseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostic events for best-effort computations.
//!
//! Some operations do not fail but may produce an imprecise or unchanged
//! result, for example when the arc length search runs out of iterations on a
//! degenerate curve. Those operations report a [`Diagnostic`] to a
//! [`DiagnosticSink`] supplied by the caller instead of printing anything.
//!
//! The convenience forms of those operations use [`LogSink`], which forwards
//! events to the [`log`] facade.

use alloc::vec::Vec;
use core::fmt;

use arrayvec::ArrayVec;

use crate::{CurveKind, Point};

/// An event worth surfacing from a best-effort computation.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Diagnostic {
    /// The arc length parameter search reached its depth limit without
    /// converging. The requested fraction was returned unmodified.
    ArclenSearchExhausted {
        /// Kind of the searched curve.
        kind: CurveKind,
        /// Control points of the searched curve.
        points: ArrayVec<Point, 4>,
        /// The requested arc length fraction.
        fraction: f64,
    },
    /// A conversion between curve kinds that cannot be done exactly was
    /// requested. The curve was returned unchanged.
    UnsupportedConversion {
        /// Kind of the source curve.
        from: CurveKind,
        /// The requested kind.
        to: CurveKind,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ArclenSearchExhausted {
                kind,
                points,
                fraction,
            } => {
                write!(
                    f,
                    "could not find the parameter at arc length fraction {fraction} for: {}",
                    kind.svg_char()
                )?;
                for p in points {
                    write!(f, " {p}")?;
                }
                Ok(())
            }
            Diagnostic::UnsupportedConversion { from, to } => {
                write!(f, "conversion from {from} to {to} is not supported")
            }
        }
    }
}

/// A receiver of [`Diagnostic`] events.
pub trait DiagnosticSink {
    /// Record one event.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// A sink that emits every event as a `warn` record through the [`log`] facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!(target: "bezseg", "{diagnostic}");
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}
