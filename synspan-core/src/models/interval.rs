use std::fmt::{self, Display};

use crate::errors::IntervalError;

/// A closed interval `[start, stop]` on a named contig.
///
/// Both endpoints are included, so intervals that merely touch at a boundary
/// count as overlapping. `start <= stop` is not enforced; callers may build
/// degenerate intervals and [`overlaps`](Interval::overlaps) tolerates them.
///
/// # Examples
///
/// ```
/// use synspan_core::models::Interval;
///
/// let a = Interval::new("chr1", 1, 5);
/// let b = Interval::new("chr1", 5, 9);
/// assert!(a.overlaps(&b)); // shared endpoint counts
/// assert_eq!(a.to_string(), "chr1\t1\t5");
/// ```
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Interval {
    pub contig: String,
    pub start: i64,
    pub stop: i64,
}

impl Interval {
    pub fn new(contig: impl Into<String>, start: i64, stop: i64) -> Self {
        Interval {
            contig: contig.into(),
            start,
            stop,
        }
    }

    /// Build an interval from textual coordinate fields.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::InvalidCoordinate`] when either bound does not
    /// parse as an integer.
    ///
    /// ```
    /// use synspan_core::models::Interval;
    ///
    /// let iv = Interval::from_fields("chr2", "100", "200").unwrap();
    /// assert_eq!(iv, Interval::new("chr2", 100, 200));
    /// assert!(Interval::from_fields("chr2", "100", "end").is_err());
    /// ```
    pub fn from_fields(contig: &str, start: &str, stop: &str) -> Result<Self, IntervalError> {
        let start = start
            .trim()
            .parse::<i64>()
            .map_err(|_| IntervalError::InvalidCoordinate(start.to_string()))?;
        let stop = stop
            .trim()
            .parse::<i64>()
            .map_err(|_| IntervalError::InvalidCoordinate(stop.to_string()))?;
        Ok(Interval::new(contig, start, stop))
    }

    /// Check whether two intervals overlap.
    ///
    /// Closed-interval test: a shared endpoint counts as an overlap.
    /// Intervals on different contigs never overlap.
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.contig == other.contig && self.stop >= other.start && self.start <= other.stop
    }

    /// Tab-separated `contig start stop` rendering.
    pub fn as_string(&self) -> String {
        format!("{}\t{}\t{}", self.contig, self.start, self.stop)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl TryFrom<&str> for Interval {
    type Error = IntervalError;

    /// Parse one tab-separated `contig start stop` record, the inverse of
    /// [`Display`].
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut fields = value.trim_end_matches(['\r', '\n']).split('\t');
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(contig), Some(start), Some(stop), None) => {
                Interval::from_fields(contig, start, stop)
            }
            _ => Err(IntervalError::MalformedRecord(value.to_string())),
        }
    }
}
