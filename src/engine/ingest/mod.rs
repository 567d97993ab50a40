use std::io::Read;

use csv::{Position, StringRecord};
use tracing::{debug, info};

use crate::domain::ad::{AdProperties, CampaignHierarchy};
use crate::domain::error::IngestError;

/// Column order of an ad export. The first row is a header and is always dropped.
pub const EXPORT_COLUMNS: [&str; 6] = [
    "campaign_name",
    "ad_set_name",
    "ad_name",
    "cta",
    "headline",
    "website_url",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Row counters collected during one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Data rows after the header, filtered or not.
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_filtered: usize,
}

/// One export row shaped to the columns the checks need.
struct AdRow<'a> {
    campaign_name: &'a str,
    ad_set_name: &'a str,
    ad_name: &'a str,
    cta: &'a str,
    website_url: &'a str,
}

impl<'a> AdRow<'a> {
    /// `None` when the record is missing required columns.
    fn from_record(record: &'a StringRecord) -> Option<Self> {
        if record.len() < EXPORT_COLUMNS.len() {
            return None;
        }
        // Columns past `website_url` are ignored; `headline` is not checked.
        Some(Self {
            campaign_name: &record[0],
            ad_set_name: &record[1],
            ad_name: &record[2],
            cta: &record[3],
            website_url: &record[5],
        })
    }
}

/// Offset of the first byte after a record terminator.
///
/// A CRLF terminator leaves its `\n` unread until the next record.
fn line_start(body: &[u8], offset: usize) -> usize {
    if offset > 0 && body.get(offset - 1) == Some(&b'\r') && body.get(offset) == Some(&b'\n') {
        offset + 1
    } else {
        offset
    }
}

/// Offset of a blank line directly following the record that ended at
/// `offset`. The reader skips such lines silently.
fn blank_line_after(body: &[u8], offset: usize) -> Option<usize> {
    let start = line_start(body, offset);
    matches!(body.get(start), Some(b'\r' | b'\n')).then_some(start)
}

/// 1-based line number of `offset`.
fn line_number(body: &[u8], offset: usize) -> u64 {
    let newlines = body[..offset.min(body.len())]
        .iter()
        .filter(|&&byte| byte == b'\n')
        .count();
    newlines as u64 + 1
}

fn byte_offset(position: &Position) -> usize {
    usize::try_from(position.byte()).unwrap_or(usize::MAX)
}

/// Parses an ad export into a campaign hierarchy.
///
/// With `filter` set to a non-empty string, rows whose ad name does not
/// contain it are skipped entirely.
pub fn parse<R: Read>(reader: R, filter: Option<&str>) -> Result<CampaignHierarchy, IngestError> {
    parse_with_stats(reader, filter).map(|(hierarchy, _)| hierarchy)
}

/// Same as [`parse`], also returning row counters.
pub fn parse_with_stats<R: Read>(
    mut reader: R,
    filter: Option<&str>,
) -> Result<(CampaignHierarchy, IngestStats), IngestError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| IngestError::Read { source })?;
    drop(reader);

    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes.as_slice());
    let filter = filter.filter(|needle| !needle.is_empty());

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body);
    let mut record = StringRecord::new();

    let has_header = csv_reader
        .read_record(&mut record)
        .map_err(|source| IngestError::Decode { source })?;
    if !has_header {
        return Err(IngestError::MissingHeader);
    }

    let mut hierarchy = CampaignHierarchy::new();
    let mut stats = IngestStats::default();
    loop {
        // An empty line is a row with no fields.
        if let Some(blank) = blank_line_after(body, byte_offset(csv_reader.position())) {
            return Err(IngestError::ShortRow {
                line: line_number(body, blank),
                found: 0,
                expected: EXPORT_COLUMNS.len(),
            });
        }
        let has_record = csv_reader
            .read_record(&mut record)
            .map_err(|source| IngestError::Decode { source })?;
        if !has_record {
            break;
        }
        let Some(row) = AdRow::from_record(&record) else {
            let start = record.position().map_or(body.len(), byte_offset);
            return Err(IngestError::ShortRow {
                line: line_number(body, line_start(body, start)),
                found: record.len(),
                expected: EXPORT_COLUMNS.len(),
            });
        };
        stats.rows_read += 1;

        if let Some(needle) = filter
            && !row.ad_name.contains(needle)
        {
            debug!(ad_name = row.ad_name, filter = needle, "ingest_row_filtered");
            stats.rows_filtered += 1;
            continue;
        }

        hierarchy.insert(
            row.campaign_name,
            row.ad_set_name,
            row.ad_name,
            AdProperties::new(row.website_url, row.cta),
        );
        stats.rows_kept += 1;
    }

    info!(
        rows_read = stats.rows_read,
        rows_kept = stats.rows_kept,
        rows_filtered = stats.rows_filtered,
        ads = hierarchy.ad_count(),
        "ingest_complete"
    );
    Ok((hierarchy, stats))
}
