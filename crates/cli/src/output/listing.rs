//! Directory listings
//!
//! Short form prints one tagged name per line. Long form adds a kind or
//! content-type column, a size and a timestamp, each padded to the widest
//! value in the batch.

use console::style;
use jiff::Timestamp;
use s3shell_core::ObjectInfo;
use s3shell_core::path::SEPARATOR;

/// Tag for directory-like entries in short listings
pub const DIR_TAG: &str = "-dir-";

/// Kind column for buckets in long listings
pub const BUCKET_TAG: &str = "s3-bucket";

/// Display name of the current folder's own marker in long listings
pub const CURRENT_DIR: &str = ".";

const MISSING: &str = "-";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One bucket in a root listing
#[derive(Debug, Clone)]
pub struct BucketRow {
    pub name: String,
    /// Sum of object sizes, only gathered for long listings
    pub size: Option<u64>,
    pub created: Option<Timestamp>,
}

/// Keep only the entries that sit directly under `dir_key`
///
/// An entry is direct when its key, with `dir_key` stripped, has no separator
/// or only a trailing one. The folder's own marker is kept.
pub fn direct_children(objects: Vec<ObjectInfo>, dir_key: &str) -> Vec<ObjectInfo> {
    objects
        .into_iter()
        .filter(|object| {
            let Some(rest) = object.key.strip_prefix(dir_key) else {
                return false;
            };
            match rest.find(SEPARATOR) {
                None => true,
                Some(idx) => idx + 1 == rest.len(),
            }
        })
        .collect()
}

fn format_time(ts: Option<Timestamp>) -> String {
    ts.map(|t| t.strftime(TIME_FORMAT).to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

fn widest<'a>(values: impl Iterator<Item = &'a String>) -> usize {
    values.map(|v| v.chars().count()).max().unwrap_or(0)
}

/// Formats listings into output lines
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn dir_tag(&self) -> String {
        if self.color {
            style(DIR_TAG).blue().bold().to_string()
        } else {
            DIR_TAG.to_string()
        }
    }

    /// Render the bucket listing shown at the root
    pub fn buckets(&self, rows: &[BucketRow], long: bool) -> Vec<String> {
        if !long {
            let tag = self.dir_tag();
            return rows.iter().map(|b| format!("{tag}\t{}", b.name)).collect();
        }

        let sizes: Vec<String> = rows
            .iter()
            .map(|b| b.size.unwrap_or(0).to_string())
            .collect();
        let dates: Vec<String> = rows.iter().map(|b| format_time(b.created)).collect();
        let size_w = widest(sizes.iter());
        let date_w = widest(dates.iter());

        rows.iter()
            .zip(sizes.iter().zip(dates.iter()))
            .map(|(bucket, (size, date))| {
                format!(
                    "{BUCKET_TAG}\t{size:<size_w$}\t{date:<date_w$}\t{}",
                    bucket.name
                )
            })
            .collect()
    }

    /// Render the entries of the folder whose listing prefix is `dir_key`
    ///
    /// `entries` are expected to be direct children only, see
    /// [`direct_children`].
    pub fn objects(&self, entries: &[ObjectInfo], dir_key: &str, long: bool) -> Vec<String> {
        if !long {
            let tag = self.dir_tag();
            return entries
                .iter()
                .filter(|o| o.key != dir_key)
                .map(|o| {
                    if o.is_folder_marker() {
                        format!("{tag}\t{}", o.key)
                    } else {
                        format!("\t{}", o.key)
                    }
                })
                .collect();
        }

        let kinds: Vec<String> = entries
            .iter()
            .map(|o| o.content_type.clone().unwrap_or_else(|| MISSING.to_string()))
            .collect();
        let sizes: Vec<String> = entries.iter().map(|o| o.size.to_string()).collect();
        let dates: Vec<String> = entries.iter().map(|o| format_time(o.last_modified)).collect();
        let kind_w = widest(kinds.iter());
        let size_w = widest(sizes.iter());
        let date_w = widest(dates.iter());

        entries
            .iter()
            .enumerate()
            .map(|(i, o)| {
                let name = if o.key == dir_key {
                    CURRENT_DIR
                } else {
                    o.key.as_str()
                };
                format!(
                    "{:<kind_w$}\t{:<size_w$}\t{:<date_w$}\t{name}",
                    kinds[i], sizes[i], dates[i]
                )
            })
            .collect()
    }
}
