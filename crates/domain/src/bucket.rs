use crate::Classification;
use chrono::{DateTime, TimeZone};
use std::fmt;

const BUCKET_FORMAT: &str = "%Y-%m-%d-%H";

/// Wall-clock hour a snapshot belongs to (`YYYY-MM-DD-HH`).
///
/// The key names the snapshot artifacts and doubles as the idempotency token:
/// a bucket is considered produced once its internal artifact exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketKey(String);

impl BucketKey {
    /// Truncates `now` to the hour in its own time zone.
    pub fn from_datetime<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self(now.naive_local().format(BUCKET_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the ranked snapshot for `classification` in this bucket.
    pub fn artifact_name(&self, prefix: &str, classification: Classification) -> String {
        format!(
            "{}_top_{}_requests_{}.txt",
            prefix,
            classification.as_str(),
            self.0
        )
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
