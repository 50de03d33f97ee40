//! Segment extraction: splitting a path into contiguous runs at large
//! positional jumps.
//!
//! A [`Segment`] is a transient working unit consumed by the chaining,
//! flyback, stitching and deduplication transforms; it is never persisted.

use crate::geo_utils::{haversine_distance, path_length};
use crate::GpsPoint;

/// A contiguous sub-sequence of a path with no internal gap exceeding the
/// threshold it was extracted with.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Points of this segment, in original path order
    pub points: Vec<GpsPoint>,
    /// Index of the first point within the source path
    pub start_index: usize,
}

impl Segment {
    /// First point of the segment.
    ///
    /// # Panics
    /// Panics on an empty segment; [`split_at_gaps`] never produces one.
    pub fn start(&self) -> GpsPoint {
        self.points[0]
    }

    /// Last point of the segment.
    pub fn end(&self) -> GpsPoint {
        self.points[self.points.len() - 1]
    }

    /// Middle point of the segment (by index, not by distance).
    pub fn midpoint(&self) -> GpsPoint {
        self.points[self.points.len() / 2]
    }

    /// Internal length of the segment in kilometers.
    pub fn length_km(&self) -> f64 {
        path_length(&self.points)
    }

    /// Number of points in the segment.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A copy of this segment with its points in reverse order.
    pub fn reversed(&self) -> Segment {
        Segment {
            points: self.points.iter().rev().copied().collect(),
            start_index: self.start_index,
        }
    }
}

/// Split a path into contiguous segments at gaps larger than
/// `gap_threshold_km`.
///
/// A new segment starts whenever the distance between consecutive points
/// exceeds the threshold. Concatenating the returned segments in order
/// reproduces the input path exactly; no point is dropped or reordered.
/// Pure and total: an empty input yields an empty segment list, a
/// single-point input yields one single-point segment.
///
/// # Example
/// ```
/// use trailmend::{split_at_gaps, GpsPoint};
///
/// let path = vec![
///     GpsPoint::new(46.00, 8.00),
///     GpsPoint::new(46.01, 8.00),
///     GpsPoint::new(46.50, 8.00), // ~54 km jump
///     GpsPoint::new(46.51, 8.00),
/// ];
/// let segments = split_at_gaps(&path, 2.0);
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[1].start_index, 2);
/// ```
pub fn split_at_gaps(points: &[GpsPoint], gap_threshold_km: f64) -> Vec<Segment> {
    if points.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut segment_start = 0;

    for i in 1..points.len() {
        if haversine_distance(&points[i - 1], &points[i]) > gap_threshold_km {
            segments.push(Segment {
                points: points[segment_start..i].to_vec(),
                start_index: segment_start,
            });
            segment_start = i;
        }
    }

    segments.push(Segment {
        points: points[segment_start..].to_vec(),
        start_index: segment_start,
    });

    segments
}

/// Concatenate segments back into a flat path, in the order given.
pub fn concat_segments(segments: &[Segment]) -> Vec<GpsPoint> {
    segments.iter().flat_map(|s| s.points.iter().copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_empty() {
        assert!(split_at_gaps(&[], 2.0).is_empty());
    }

    #[test]
    fn test_split_single_point() {
        let segments = split_at_gaps(&[GpsPoint::new(46.0, 8.0)], 2.0);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 1);
    }

    #[test]
    fn test_reversed_keeps_start_index() {
        let seg = Segment {
            points: vec![GpsPoint::new(46.0, 8.0), GpsPoint::new(46.1, 8.0)],
            start_index: 7,
        };
        let rev = seg.reversed();
        assert_eq!(rev.start_index, 7);
        assert_eq!(rev.start(), seg.end());
    }
}
