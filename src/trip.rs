//! Trip record ingestion.
//!
//! Reads the yellow-cab trip CSV layout and feeds pickup and dropoff
//! locations into a tree. Only the location columns are interpreted.
//! Trips with a `0` coordinate carry placeholder locations and are skipped
//! before they reach the tree, which performs no such filtering itself.

use crate::error::{HotquadError, Result};
use crate::tree::Quadtree;
use hotquad_types::point::Point;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const PICKUP_LONGITUDE: usize = 5;
const PICKUP_LATITUDE: usize = 6;
const DROPOFF_LONGITUDE: usize = 9;
const DROPOFF_LATITUDE: usize = 10;

/// A geographic location as recorded in the trip data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

impl Location {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Missing GPS fixes are recorded as zero.
    pub fn is_placeholder(&self) -> bool {
        self.longitude == 0.0 || self.latitude == 0.0
    }

    /// Index coordinates: latitude on x, longitude on y.
    pub fn to_point(&self) -> Point {
        Point::new(self.latitude, self.longitude)
    }
}

/// The two locations of one trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trip {
    pub pickup: Location,
    pub dropoff: Location,
}

impl Trip {
    /// Parse one CSV data row.
    pub fn parse(line: &str, line_number: usize) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        let field = |index: usize| -> Result<f64> {
            let raw = fields.get(index).ok_or_else(|| HotquadError::Parse {
                line: line_number,
                message: format!("expected at least {} fields, got {}", index + 1, fields.len()),
            })?;
            raw.trim().parse::<f64>().map_err(|e| HotquadError::Parse {
                line: line_number,
                message: format!("field {} ({:?}): {}", index, raw, e),
            })
        };

        Ok(Self {
            pickup: Location::new(field(PICKUP_LONGITUDE)?, field(PICKUP_LATITUDE)?),
            dropoff: Location::new(field(DROPOFF_LONGITUDE)?, field(DROPOFF_LATITUDE)?),
        })
    }

    pub fn has_placeholder(&self) -> bool {
        self.pickup.is_placeholder() || self.dropoff.is_placeholder()
    }
}

/// Iterator over the trips of a CSV stream. The header row is skipped.
pub struct TripReader<R> {
    lines: std::io::Lines<R>,
    line_number: usize,
    limit: Option<usize>,
    emitted: usize,
}

impl<R: BufRead> TripReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            limit: None,
            emitted: 0,
        }
    }

    /// Stop after `limit` data rows.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl TripReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for TripReader<R> {
    type Item = Result<Trip>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.limit.is_some_and(|limit| self.emitted >= limit) {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_number += 1;

            if self.line_number == 1 || line.trim().is_empty() {
                continue;
            }

            self.emitted += 1;
            return Some(Trip::parse(&line, self.line_number));
        }
    }
}

/// Counters reported by [`ingest`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub trips: usize,
    pub placeholders: usize,
    pub malformed: usize,
    pub inserted: usize,
    /// Locations outside the region or already present
    pub rejected: usize,
}

/// Insert the dropoff and pickup location of every usable trip.
///
/// Malformed rows are logged and counted; I/O failures and partition faults
/// abort ingestion.
pub fn ingest<R: BufRead>(tree: &mut Quadtree, trips: TripReader<R>) -> Result<IngestStats> {
    let mut stats = IngestStats::default();

    for trip in trips {
        let trip = match trip {
            Ok(trip) => trip,
            Err(HotquadError::Parse { line, message }) => {
                log::warn!("Skipping line {}: {}", line, message);
                stats.malformed += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        stats.trips += 1;
        if trip.has_placeholder() {
            stats.placeholders += 1;
            continue;
        }

        for location in [trip.dropoff, trip.pickup] {
            if tree.insert_point(location.to_point())? {
                stats.inserted += 1;
            } else {
                stats.rejected += 1;
            }
        }
    }

    log::debug!(
        "Ingested {} trips ({} inserted, {} rejected, {} placeholders, {} malformed)",
        stats.trips,
        stats.inserted,
        stats.rejected,
        stats.placeholders,
        stats.malformed
    );
    Ok(stats)
}
