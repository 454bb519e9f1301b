// Copyright 2026 the Bezseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editable curve segments.
//!
//! A [`CurveSegment`] is one quadratic or cubic piece of a shape outline. It
//! answers geometric questions (length, nearest point) and produces new
//! geometry (sub-curves, degree elevation) without ever mutating itself.

use core::fmt;
use core::ops::Range;

use arrayvec::ArrayVec;

use crate::{
    CubicBez, Diagnostic, DiagnosticSink, Line, LogSink, Nearest, ParamCurve, ParamCurveArclen,
    ParamCurveNearest, PathCommand, Point, QuadBez, SegmentError, DEFAULT_ACCURACY,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Relative tolerance for deciding that control points lie on the chord.
const COLLINEAR_EPSILON: f64 = 1e-12;

/// The degree of a curve segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveKind {
    /// A quadratic Bézier, with 3 control points.
    Quadratic,
    /// A cubic Bézier, with 4 control points.
    Cubic,
}

impl CurveKind {
    /// The number of control points, including both end points.
    #[inline]
    pub const fn point_count(self) -> usize {
        match self {
            CurveKind::Quadratic => 3,
            CurveKind::Cubic => 4,
        }
    }

    /// The outline command letter for this kind.
    #[inline]
    pub const fn svg_char(self) -> char {
        match self {
            CurveKind::Quadratic => 'Q',
            CurveKind::Cubic => 'C',
        }
    }

    /// Parse an outline command letter.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::UnknownKind`] for any letter other than `Q` or `C`.
    pub fn from_svg_char(c: char) -> Result<CurveKind, SegmentError> {
        match c {
            'Q' => Ok(CurveKind::Quadratic),
            'C' => Ok(CurveKind::Cubic),
            _ => Err(SegmentError::UnknownKind(c)),
        }
    }

    /// Whether [`CurveSegment::convert_to`] produces an exact result for this
    /// pair of kinds.
    ///
    /// Lowering a cubic to a quadratic is lossy and is not supported.
    #[inline]
    pub fn converts_exactly_to(self, target: CurveKind) -> bool {
        self == target || (self, target) == (CurveKind::Quadratic, CurveKind::Cubic)
    }
}

impl TryFrom<char> for CurveKind {
    type Error = SegmentError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        CurveKind::from_svg_char(c)
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CurveKind::Quadratic => "quadratic",
            CurveKind::Cubic => "cubic",
        })
    }
}

/// The geometry of a segment. Each kind carries exactly its point count.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Bez {
    Quad(QuadBez),
    Cubic(CubicBez),
}

impl Bez {
    fn kind(&self) -> CurveKind {
        match self {
            Bez::Quad(_) => CurveKind::Quadratic,
            Bez::Cubic(_) => CurveKind::Cubic,
        }
    }

    fn points(&self) -> ArrayVec<Point, 4> {
        match self {
            Bez::Quad(q) => q.points().into_iter().collect(),
            Bez::Cubic(c) => ArrayVec::from(c.points()),
        }
    }

    /// Whether the curve traces exactly its chord, from start to end,
    /// without ever turning back.
    fn traces_chord(&self) -> bool {
        let points = self.points();
        let (p0, pn) = (self.start(), self.end());
        let chord = pn - p0;
        let len2 = chord.hypot2();
        if len2 <= 0.0 || len2.is_nan() {
            return false;
        }
        let mut s: ArrayVec<f64, 2> = ArrayVec::new();
        for &p in &points[1..points.len() - 1] {
            let v = p - p0;
            if chord.cross(v).abs() > COLLINEAR_EPSILON * len2 {
                return false;
            }
            s.push(v.dot(chord) / len2);
        }
        // The position along the chord is a Bézier with coefficients
        // 0, s.., 1; it must be monotone on [0, 1].
        match s.as_slice() {
            &[s1] => (0.0..=1.0).contains(&s1),
            &[s1, s2] => {
                let (a, b, c) = (s1, s2 - s1, 1.0 - s2);
                a >= 0.0 && c >= 0.0 && (b >= 0.0 || b * b <= a * c)
            }
            _ => false,
        }
    }
}

impl ParamCurve for Bez {
    fn eval(&self, t: f64) -> Point {
        match self {
            Bez::Quad(q) => q.eval(t),
            Bez::Cubic(c) => c.eval(t),
        }
    }

    fn subsegment(&self, range: Range<f64>) -> Bez {
        match self {
            Bez::Quad(q) => Bez::Quad(q.subsegment(range)),
            Bez::Cubic(c) => Bez::Cubic(c.subsegment(range)),
        }
    }

    fn start(&self) -> Point {
        match self {
            Bez::Quad(q) => q.p0,
            Bez::Cubic(c) => c.p0,
        }
    }

    fn end(&self) -> Point {
        match self {
            Bez::Quad(q) => q.p2,
            Bez::Cubic(c) => c.p3,
        }
    }
}

impl ParamCurveArclen for Bez {
    fn arclen(&self, accuracy: f64) -> f64 {
        match self {
            Bez::Quad(q) => q.arclen(accuracy),
            Bez::Cubic(c) => c.arclen(accuracy),
        }
    }
}

impl ParamCurveNearest for Bez {
    fn nearest(&self, p: Point, accuracy: f64) -> Nearest {
        match self {
            Bez::Quad(q) => q.nearest(p, accuracy),
            Bez::Cubic(c) => c.nearest(p, accuracy),
        }
    }
}

/// The closest position on a curve to some query point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Projection {
    /// The x coordinate of the closest point.
    pub x: f64,
    /// The y coordinate of the closest point.
    pub y: f64,
    /// The curve parameter of the closest point, in `[0, 1]`.
    pub t: f64,
    /// The distance from the query point to the closest point.
    pub d: f64,
}

impl Projection {
    fn new(on_curve: Point, t: f64, query: Point) -> Projection {
        Projection {
            x: on_curve.x,
            y: on_curve.y,
            t,
            d: query.distance(on_curve),
        }
    }

    /// The closest point.
    #[inline]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One quadratic or cubic Bézier segment of an editable outline.
///
/// Segments are immutable values. The arc length is computed once, on
/// construction.
///
/// ```
/// use bezseg::{CurveKind, CurveSegment, Point};
///
/// let q = CurveSegment::new(
///     CurveKind::Quadratic,
///     &[Point::new(0.0, 0.0), Point::new(1.0, 2.0), Point::new(2.0, 0.0)],
/// )
/// .unwrap();
/// let c = q.convert_to(CurveKind::Cubic);
/// assert_eq!(c.kind(), CurveKind::Cubic);
/// assert!((c.path_length() - q.path_length()).abs() < 1e-6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSegment {
    bez: Bez,
    arclen: f64,
}

impl CurveSegment {
    /// Create a segment of the given kind from its control points.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::WrongPointCount`] unless exactly 3 points are
    /// given for a quadratic, or exactly 4 for a cubic.
    pub fn new(kind: CurveKind, points: &[Point]) -> Result<CurveSegment, SegmentError> {
        match (kind, points) {
            (CurveKind::Quadratic, &[p0, p1, p2]) => Ok(CurveSegment::quad(p0, p1, p2)),
            (CurveKind::Cubic, &[p0, p1, p2, p3]) => Ok(CurveSegment::cubic(p0, p1, p2, p3)),
            _ => Err(SegmentError::WrongPointCount {
                kind,
                found: points.len(),
            }),
        }
    }

    /// Create a quadratic segment.
    #[inline]
    pub fn quad<P: Into<Point>>(p0: P, p1: P, p2: P) -> CurveSegment {
        QuadBez::new(p0, p1, p2).into()
    }

    /// Create a cubic segment.
    #[inline]
    pub fn cubic<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> CurveSegment {
        CubicBez::new(p0, p1, p2, p3).into()
    }

    /// Create a segment from an outline command.
    pub fn from_command(command: PathCommand) -> CurveSegment {
        match command {
            PathCommand::Quad { curve, .. } => curve.into(),
            PathCommand::Cubic { curve, .. } => curve.into(),
        }
    }

    fn from_bez(bez: Bez) -> CurveSegment {
        CurveSegment {
            bez,
            arclen: bez.arclen(DEFAULT_ACCURACY),
        }
    }

    /// The kind of this segment.
    #[inline]
    pub fn kind(&self) -> CurveKind {
        self.bez.kind()
    }

    /// The control points, including both end points, in order.
    #[inline]
    pub fn control_points(&self) -> ArrayVec<Point, 4> {
        self.bez.points()
    }

    /// The quadratic geometry, if this is a quadratic segment.
    #[inline]
    pub fn as_quad(&self) -> Option<QuadBez> {
        match self.bez {
            Bez::Quad(q) => Some(q),
            Bez::Cubic(_) => None,
        }
    }

    /// The cubic geometry, if this is a cubic segment.
    #[inline]
    pub fn as_cubic(&self) -> Option<CubicBez> {
        match self.bez {
            Bez::Cubic(c) => Some(c),
            Bez::Quad(_) => None,
        }
    }

    /// The start point.
    #[inline]
    pub fn start(&self) -> Point {
        self.bez.start()
    }

    /// The end point.
    #[inline]
    pub fn end(&self) -> Point {
        self.bez.end()
    }

    /// Evaluate the curve at parameter `t`.
    #[inline]
    pub fn eval(&self, t: f64) -> Point {
        self.bez.eval(t)
    }

    /// The arc length of the whole curve.
    #[inline]
    pub fn path_length(&self) -> f64 {
        self.arclen
    }

    /// The same curve traversed from end to start.
    #[must_use]
    pub fn reversed(&self) -> CurveSegment {
        let bez = match self.bez {
            Bez::Quad(q) => Bez::Quad(q.reversed()),
            Bez::Cubic(c) => Bez::Cubic(c.reversed()),
        };
        CurveSegment {
            bez,
            arclen: self.arclen,
        }
    }

    /// Find the point on the curve closest to `point`.
    pub fn project(&self, point: Point) -> Projection {
        let t = self.bez.nearest(point, DEFAULT_ACCURACY).t.clamp(0.0, 1.0);
        Projection::new(self.bez.eval(t), t, point)
    }

    /// Cut out the piece of the curve between parameters `t1` and `t2`.
    ///
    /// The parameters need not be ordered; `t1 > t2` yields the piece
    /// traversed backwards. Pieces that degenerate are returned as the
    /// simpler primitive: equal parameters give a point, and a piece whose
    /// control points describe a straight path gives a line.
    pub fn split(&self, t1: f64, t2: f64) -> Piece {
        if t1 == t2 {
            return Piece::Point(self.bez.eval(t1));
        }
        let sub = self.bez.subsegment(t1..t2);
        let points = sub.points();
        let mut unique: ArrayVec<Point, 4> = ArrayVec::new();
        for &p in &points {
            if !unique.contains(&p) {
                unique.push(p);
            }
        }
        let (first, last) = (sub.start(), sub.end());
        match unique.len() {
            1 => Piece::Point(first),
            2 => Piece::Line(Line::new(first, last)),
            _ if sub.traces_chord() => Piece::Line(Line::new(first, last)),
            _ => Piece::Curve(CurveSegment::from_bez(sub)),
        }
    }

    /// Convert to a segment of the given kind.
    ///
    /// A quadratic is raised to the cubic tracing the identical path.
    /// Requesting the current kind returns an unchanged copy.
    ///
    /// Lowering a cubic to a quadratic is not supported: the cubic is returned
    /// unchanged and the request is logged through [`LogSink`]. Use
    /// [`convert_to_with`](Self::convert_to_with) to receive that event, or
    /// check [`CurveKind::converts_exactly_to`] first.
    pub fn convert_to(&self, kind: CurveKind) -> CurveSegment {
        self.convert_to_with(kind, &mut LogSink)
    }

    /// Like [`convert_to`](Self::convert_to), reporting unsupported
    /// conversions to `sink`.
    pub fn convert_to_with<S: DiagnosticSink + ?Sized>(
        &self,
        kind: CurveKind,
        sink: &mut S,
    ) -> CurveSegment {
        match (self.bez, kind) {
            (Bez::Quad(q), CurveKind::Cubic) => q.raise().into(),
            (Bez::Cubic(_), CurveKind::Quadratic) => {
                sink.report(Diagnostic::UnsupportedConversion {
                    from: CurveKind::Cubic,
                    to: kind,
                });
                *self
            }
            _ => *self,
        }
    }

    /// Find the parameter at which the given fraction of the arc length has
    /// been traversed from the start.
    ///
    /// This uses the default [`ArclenSearch`]. When the search does not
    /// converge, `fraction` itself is returned and the failure is logged
    /// through [`LogSink`].
    pub fn find_t_by_arclen_fraction(&self, fraction: f64) -> f64 {
        ArclenSearch::default().find_with(self, fraction, &mut LogSink)
    }

    /// Like [`find_t_by_arclen_fraction`](Self::find_t_by_arclen_fraction),
    /// reporting a failed search to `sink`.
    pub fn find_t_by_arclen_fraction_with<S: DiagnosticSink + ?Sized>(
        &self,
        fraction: f64,
        sink: &mut S,
    ) -> f64 {
        ArclenSearch::default().find_with(self, fraction, sink)
    }

    /// The outline command for this segment.
    pub fn to_command(&self, is_split: bool) -> PathCommand {
        match self.bez {
            Bez::Quad(curve) => PathCommand::Quad { curve, is_split },
            Bez::Cubic(curve) => PathCommand::Cubic { curve, is_split },
        }
    }
}

impl From<QuadBez> for CurveSegment {
    fn from(q: QuadBez) -> CurveSegment {
        CurveSegment::from_bez(Bez::Quad(q))
    }
}

impl From<CubicBez> for CurveSegment {
    fn from(c: CubicBez) -> CurveSegment {
        CurveSegment::from_bez(Bez::Cubic(c))
    }
}

impl From<PathCommand> for CurveSegment {
    fn from(command: PathCommand) -> CurveSegment {
        CurveSegment::from_command(command)
    }
}

/// The result of [`CurveSegment::split`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Piece {
    /// The piece collapsed to a single point.
    Point(Point),
    /// The piece is a straight line.
    Line(Line),
    /// The piece is a proper curve of the same kind as its source.
    Curve(CurveSegment),
}

impl Piece {
    /// The start point.
    pub fn start(&self) -> Point {
        match self {
            Piece::Point(p) => *p,
            Piece::Line(l) => l.p0,
            Piece::Curve(c) => c.start(),
        }
    }

    /// The end point.
    pub fn end(&self) -> Point {
        match self {
            Piece::Point(p) => *p,
            Piece::Line(l) => l.p1,
            Piece::Curve(c) => c.end(),
        }
    }

    /// The arc length of the piece; zero for a point.
    pub fn path_length(&self) -> f64 {
        match self {
            Piece::Point(_) => 0.0,
            Piece::Line(l) => l.length(),
            Piece::Curve(c) => c.path_length(),
        }
    }

    /// Find the position on the piece closest to `point`.
    pub fn project(&self, point: Point) -> Projection {
        match self {
            Piece::Point(p) => Projection::new(*p, 0.0, point),
            Piece::Line(l) => {
                let t = l.nearest(point, DEFAULT_ACCURACY).t;
                Projection::new(l.eval(t), t, point)
            }
            Piece::Curve(c) => c.project(point),
        }
    }

    /// The curve, if the piece did not degenerate.
    pub fn into_curve(self) -> Option<CurveSegment> {
        match self {
            Piece::Curve(c) => Some(c),
            _ => None,
        }
    }
}

/// Parameters of the search performed by
/// [`CurveSegment::find_t_by_arclen_fraction`].
///
/// The search starts from `t = fraction` and moves by steps of `2^e`, with
/// `e` running from `start_exponent` down to (excluding) `min_exponent`,
/// toward the side where the ratio of the arc lengths before and after `t`
/// matches `fraction / (1 - fraction)`. It stops once the mismatch, in curve
/// length units, is below `epsilon`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArclenSearch {
    /// Convergence threshold, in curve length units.
    pub epsilon: f64,
    /// Exponent of the first step.
    pub start_exponent: i32,
    /// The search gives up when the step exponent reaches this value.
    pub min_exponent: i32,
    /// Accuracy of each arc length measurement.
    pub accuracy: f64,
}

impl Default for ArclenSearch {
    fn default() -> Self {
        ArclenSearch {
            epsilon: 1e-3,
            start_exponent: -2,
            min_exponent: -100,
            accuracy: 1e-6,
        }
    }
}

impl ArclenSearch {
    /// Run the search, logging a failed search through [`LogSink`].
    pub fn find(&self, segment: &CurveSegment, fraction: f64) -> f64 {
        self.find_with(segment, fraction, &mut LogSink)
    }

    /// Run the search, reporting a failed search to `sink`.
    ///
    /// Fractions of exactly 0 and 1 map to parameters 0 and 1 without
    /// searching. When the step exponent is exhausted without convergence,
    /// [`Diagnostic::ArclenSearchExhausted`] is reported and `fraction` is
    /// returned unmodified.
    pub fn find_with<S: DiagnosticSink + ?Sized>(
        &self,
        segment: &CurveSegment,
        fraction: f64,
        sink: &mut S,
    ) -> f64 {
        if fraction == 0.0 || fraction == 1.0 {
            return fraction;
        }
        let bez = &segment.bez;
        let ratio = fraction / (1.0 - fraction);
        let mut t = fraction;
        let mut exponent = self.start_exponent;
        while exponent > self.min_exponent {
            let low = bez.subsegment(0.0..t).arclen(self.accuracy);
            let high = bez.subsegment(t..1.0).arclen(self.accuracy);
            let diff = low - ratio * high;
            if diff.abs() < self.epsilon {
                return t;
            }
            let step = 2.0f64.powi(exponent);
            t = if diff > 0.0 { t - step } else { t + step }.clamp(0.0, 1.0);
            exponent -= 1;
        }
        sink.report(Diagnostic::ArclenSearchExhausted {
            kind: bez.kind(),
            points: bez.points(),
            fraction,
        });
        fraction
    }
}
