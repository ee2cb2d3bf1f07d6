//! Reads a track list and turns every line into a [`TrackRecord`].

use encoding_rs::{Encoding, UTF_8, WINDOWS_1251};
use std::fs;
use std::io::BufRead;
use std::path::Path;

use crate::Result;
use crate::error::Error;
use crate::format::LineFormat;
use crate::types::{SEQ, TO, TrackRecord};

#[derive(Debug)]
pub(crate) struct LoadedTrackList {
    pub(crate) records: Vec<TrackRecord>,
    pub(crate) encoding: &'static Encoding,
    pub(crate) autodetected: bool,
}

pub(crate) fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| Error::UnsupportedEncoding {
        label: label.to_string(),
    })
}

pub(crate) fn load_track_list(
    path: &Path,
    encoding: Option<&'static Encoding>,
    format: &LineFormat,
) -> Result<LoadedTrackList> {
    let contents = fs::read(path).map_err(|err| Error::unreadable(path, err))?;
    let (encoding, autodetected) = match encoding {
        Some(enc) => (enc, false),
        None => (detect_encoding(&contents), true),
    };
    // `decode` also strips a BOM when one is present.
    let (decoded, used, had_errors) = encoding.decode(&contents);
    if had_errors {
        tracing::warn!(
            encoding = used.name(),
            "track list contains bytes that are invalid in the selected encoding"
        );
    }
    tracing::debug!(
        path = %path.display(),
        encoding = used.name(),
        autodetected,
        "decoded track list"
    );

    let records = parse_track_list(decoded.as_bytes(), format)?;
    Ok(LoadedTrackList {
        records,
        encoding: used,
        autodetected,
    })
}

fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if std::str::from_utf8(bytes).is_ok() {
        UTF_8
    } else {
        WINDOWS_1251
    }
}

/// Parses one record per line.
///
/// A record without `to` takes the `from` of the record after it; the last
/// record keeps no `to` unless its line supplied one. `seq` counts lines
/// from 1 and is zero-padded to the width of the record count.
pub fn parse_track_list<R: BufRead>(reader: R, format: &LineFormat) -> Result<Vec<TrackRecord>> {
    let mut records = Vec::new();
    let mut pending: Option<TrackRecord> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(Error::Read)?;
        let line = line.trim();
        let line_number = index + 1;

        let values = format
            .captures(line)
            .ok_or_else(|| Error::LineMismatch {
                line_number,
                line: line.to_string(),
            })?;
        let mut record = TrackRecord::from_pairs(
            format
                .names()
                .iter()
                .map(String::as_str)
                .zip(values),
        );
        record.set(SEQ, line_number.to_string());

        if let Some(mut previous) = pending.take() {
            if previous.end().is_none() {
                previous.set(TO, record.start());
            }
            records.push(previous);
        }
        pending = Some(record);
    }
    records.extend(pending);

    let width = records.len().to_string().len();
    for record in &mut records {
        let padded = format!("{:0>width$}", record.seq(), width = width);
        record.set(SEQ, padded);
    }

    tracing::debug!(tracks = records.len(), "parsed track list");
    Ok(records)
}
