//! Semicolon separated snapshot format
//!
//! One event per row:
//!
//! ```text
//! 2010-02-27;06:34:14;-36.1;-72.7;35; ;MW;8.8;OFFSHORE MAULE, CHILE;
//! ```
//!
//! Columns are date, time (UTC), latitude, longitude, depth, an unused
//! column, magnitude scale, magnitude and the feed's region name. Header rows
//! and events on the West Chile Rise (outside any region) are skipped.

use crate::catalogue::Catalogue;
use crate::event::{Event, ScaleType};
use crate::region::RegionTable;
use crate::{CatalogueError, Result};
use chrono::{NaiveDateTime, TimeZone, Utc};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::io::{Read, Write};
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const MIN_FIELDS: usize = 9;

/// Outcome of reading a snapshot into a catalogue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadSummary {
    /// Events not previously in the catalogue
    pub added: usize,
    /// Events already present
    pub duplicates: usize,
    /// Header and out-of-region rows
    pub skipped: usize,
    /// Rows that could not be parsed
    pub malformed: usize,
}

/// Read snapshot rows from `reader` into `catalogue`.
///
/// Malformed rows are logged and counted, not fatal.
pub fn read_events<R: Read>(
    reader: R,
    regions: &RegionTable,
    catalogue: &mut Catalogue,
) -> Result<ReadSummary> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut summary = ReadSummary::default();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or(index as u64 + 1);

        match parse_record(&record, line, regions) {
            Ok(Some(event)) => {
                if catalogue.insert(event) {
                    summary.added += 1;
                } else {
                    summary.duplicates += 1;
                }
            }
            Ok(None) => summary.skipped += 1,
            Err(err) => {
                warn!(line, error = %err, "skipping malformed catalogue row");
                summary.malformed += 1;
            }
        }
    }

    Ok(summary)
}

/// Parse one snapshot row; `Ok(None)` for rows that carry no event
pub fn parse_record(
    record: &StringRecord,
    line: u64,
    regions: &RegionTable,
) -> Result<Option<Event>> {
    let joined = record.iter().collect::<Vec<_>>().join(";").to_uppercase();
    if joined.contains("WEST CHILE") || joined.contains("DATE") {
        return Ok(None);
    }

    if record.len() < MIN_FIELDS {
        return Err(CatalogueError::Parse {
            line,
            message: format!("expected {} fields, found {}", MIN_FIELDS, record.len()),
        });
    }

    let field = |i: usize| record.get(i).unwrap_or("").trim();
    let number = |i: usize, name: &str| {
        field(i).parse::<f64>().map_err(|err| CatalogueError::Parse {
            line,
            message: format!("invalid {} '{}': {}", name, field(i), err),
        })
    };

    let stamp = format!("{} {}", field(0), field(1));
    let naive = NaiveDateTime::parse_from_str(&stamp, &format!("{} {}", DATE_FORMAT, TIME_FORMAT))
        .map_err(|err| CatalogueError::Parse {
            line,
            message: format!("invalid timestamp '{}': {}", stamp, err),
        })?;

    let event = Event {
        region: regions.resolve(field(8))?,
        timestamp: Utc.from_utc_datetime(&naive),
        magnitude: number(7, "magnitude")?,
        scale: field(6).parse::<ScaleType>()?,
        longitude: number(3, "longitude")?,
        latitude: number(2, "latitude")?,
        depth: number(4, "depth")?,
    };

    Ok(Some(event))
}

/// Write every event of `catalogue` as snapshot rows
pub fn write_events<W: Write>(writer: W, catalogue: &Catalogue) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(writer);

    for event in catalogue.iter() {
        csv_writer.write_record([
            event.timestamp.format(DATE_FORMAT).to_string(),
            event.timestamp.format(TIME_FORMAT).to_string(),
            event.latitude.to_string(),
            event.longitude.to_string(),
            event.depth.to_string(),
            " ".to_string(),
            event.scale.to_string(),
            event.magnitude.to_string(),
            event.region.code().to_string(),
            String::new(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

impl Catalogue {
    /// Read snapshot rows into this catalogue
    pub fn read_csv<R: Read>(&mut self, reader: R, regions: &RegionTable) -> Result<ReadSummary> {
        read_events(reader, regions, self)
    }

    /// Write this catalogue as snapshot rows
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        write_events(writer, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;
    use pretty_assertions::assert_eq;

    const SNAPSHOT: &str = "\
Date;Time UTC;Latitude;Longitude;Depth;;Scale;Magnitude;Region;
2010-02-27;06:34:14;-36.1;-72.7;35; ;MW;8.8;OFFSHORE MAULE, CHILE;
2015-09-16;22:54:32;-31.6;-71.7;25; ;mw;8.3;OFF COAST OF COQUIMBO, CHILE;
2014-04-01;23:46:47;-19.6;-70.8;20; ;M;3.4;TARAPACA, CHILE;
2013-05-02;10:00:00;-36.0;-100.0;10; ;MB;5.1;WEST CHILE RISE;
2010-02-27;06:34:14;-36.1;-72.7;35; ;MW;8.8;OFFSHORE MAULE, CHILE;
";

    #[test]
    fn test_read_snapshot() {
        let mut catalogue = Catalogue::new();
        let summary = catalogue
            .read_csv(SNAPSHOT.as_bytes(), &RegionTable::new())
            .unwrap();

        assert_eq!(
            summary,
            ReadSummary {
                added: 3,
                duplicates: 1,
                skipped: 2,
                malformed: 0,
            }
        );

        let maule = catalogue.by_region(&[Region::Maule]);
        assert_eq!(maule.len(), 1);
        assert_eq!(maule[0].scale, ScaleType::MW);
        assert_eq!(maule[0].latitude, -36.1);
        assert_eq!(maule[0].depth, 35.0);
        assert_eq!(
            catalogue.by_region(&[Region::Tarapaca])[0].scale,
            ScaleType::ML
        );
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let data = "\
2010-02-27;06:34:14;-36.1;-72.7;35; ;MW;huge;MAULE, CHILE;
2010-02-27;06:34:14;-36.1;-72.7;35; ;MW;8.8;ATLANTIS;
2010-02-27;06:34;-36.1;-72.7;35; ;MW;8.8;MAULE, CHILE;
2010-02-27;06:34:14;-36.1
2011-03-11;05:46:24;-36.1;-72.7;35; ;MW;6.1;MAULE, CHILE;
";
        let mut catalogue = Catalogue::new();
        let summary = catalogue
            .read_csv(data.as_bytes(), &RegionTable::new())
            .unwrap();

        assert_eq!(summary.added, 1);
        assert_eq!(summary.malformed, 4);
    }

    #[test]
    fn test_parse_errors_carry_line() {
        let record = StringRecord::from(vec![
            "2010-02-27", "06:34:14", "-36.1", "-72.7", "35", " ", "MW", "big", "MAULE", "",
        ]);
        let err = parse_record(&record, 12, &RegionTable::new()).unwrap_err();
        assert!(matches!(err, CatalogueError::Parse { line: 12, .. }));
    }

    #[test]
    fn test_write_then_read_preserves_events() {
        let mut catalogue = Catalogue::new();
        catalogue
            .read_csv(SNAPSHOT.as_bytes(), &RegionTable::new())
            .unwrap();

        let mut buffer = Vec::new();
        catalogue.write_csv(&mut buffer).unwrap();
        let written = String::from_utf8(buffer).unwrap();
        assert!(written.starts_with("2010-02-27;06:34:14;-36.1;-72.7;35; ;MW;8.8;Maule;\n"));

        let mut reread = Catalogue::new();
        let summary = reread
            .read_csv(written.as_bytes(), &RegionTable::new())
            .unwrap();
        assert_eq!(summary.added, catalogue.len());
        for event in catalogue.iter() {
            let found = reread.iter().find(|other| *other == event).unwrap();
            assert_eq!(found.scale, event.scale);
            assert_eq!(found.longitude, event.longitude);
        }
    }
}
