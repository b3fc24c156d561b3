//! Export shaping: record selection, CSV/JSON encoding and file naming.

use crate::domain::{Result, UserRecord, UserdeckError};
use chrono::NaiveDate;
use std::fmt::Write as _;

/// Header row of the CSV export.
pub const CSV_HEADER: &str = "ID,Name,Email,Phone,City,Company";

/// Output encoding of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// File name for an export taken on `date`: `users_YYYY-MM-DD.<ext>`.
    #[must_use]
    pub fn file_name(self, date: NaiveDate) -> String {
        format!("users_{}.{}", date.format("%Y-%m-%d"), self.extension())
    }
}

/// What to export when the filtered set is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyExportPolicy {
    /// Fall back to every loaded user.
    #[default]
    ExportAll,
    /// Export the empty filtered set as-is.
    ExportEmpty,
}

impl EmptyExportPolicy {
    /// Parses the `export_empty` configuration value.
    ///
    /// Accepts `all` and `none`, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::ExportAll),
            "none" | "empty" => Some(Self::ExportEmpty),
            _ => None,
        }
    }
}

/// A shaped export ready to be offered to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

/// Picks the records an export covers.
#[must_use]
pub fn select_records<'a>(
    filtered: &[&'a UserRecord],
    raw: &'a [UserRecord],
    policy: EmptyExportPolicy,
) -> Vec<&'a UserRecord> {
    match policy {
        EmptyExportPolicy::ExportAll if filtered.is_empty() => raw.iter().collect(),
        EmptyExportPolicy::ExportAll | EmptyExportPolicy::ExportEmpty => filtered.to_vec(),
    }
}

/// Encodes records as CSV.
///
/// The id is written bare; every other field is quoted with embedded quotes
/// doubled. Rows are separated by `\n` with no trailing newline.
#[must_use]
pub fn to_csv(records: &[&UserRecord]) -> String {
    let mut out = String::from(CSV_HEADER);
    for user in records {
        out.push('\n');
        let _ = write!(
            out,
            "{},{},{},{},{},{}",
            user.id,
            quote(&user.name),
            quote(&user.email),
            quote(&user.phone),
            quote(user.city()),
            quote(&user.company.name),
        );
    }
    out
}

/// Encodes records as a pretty-printed JSON array with 2-space indentation.
///
/// # Errors
///
/// Returns [`UserdeckError::Serialization`] if encoding fails.
pub fn to_json(records: &[&UserRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Shapes a complete export file.
///
/// # Errors
///
/// Returns an error if the records cannot be encoded.
pub fn build_export(
    format: ExportFormat,
    policy: EmptyExportPolicy,
    filtered: &[&UserRecord],
    raw: &[UserRecord],
    date: NaiveDate,
) -> Result<ExportFile> {
    let records = select_records(filtered, raw, policy);
    let _span = tracing::debug_span!(
        "build_export",
        format = ?format,
        policy = ?policy,
        record_count = records.len()
    )
    .entered();

    let contents = match format {
        ExportFormat::Csv => to_csv(&records),
        ExportFormat::Json => to_json(&records)
            .map_err(|e| UserdeckError::Export(format!("JSON encoding failed: {e}")))?,
    };

    Ok(ExportFile {
        file_name: format.file_name(date),
        contents,
    })
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::fixtures::{user, users_in};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn file_names_carry_date_and_extension() {
        assert_eq!(ExportFormat::Csv.file_name(date()), "users_2024-03-09.csv");
        assert_eq!(ExportFormat::Json.file_name(date()), "users_2024-03-09.json");
    }

    #[test]
    fn csv_quotes_strings_and_leaves_id_bare() {
        let record = user(7, "Ann \"Nan\" Lee", "ann@x.com", "Oslo");
        let csv = to_csv(&[&record]);
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            "7,\"Ann \"\"Nan\"\" Lee\",\"ann@x.com\",\"555-0107\",\"Oslo\",\"Company 7\""
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn csv_with_no_records_is_header_only() {
        assert_eq!(to_csv(&[]), CSV_HEADER);
    }

    #[test]
    fn json_keeps_upstream_field_names() {
        let record = user(1, "Ann", "a@x.com", "Oslo");
        let json = to_json(&[&record]).unwrap();
        assert!(json.starts_with("[\n  {\n    \"id\": 1,"));
        assert!(json.contains("\"catchPhrase\""));
        assert!(!json.contains("\"geo\""));
    }

    #[test]
    fn empty_filter_falls_back_to_everyone_by_default() {
        let raw = users_in(&["A", "B", "C"]);
        let picked = select_records(&[], &raw, EmptyExportPolicy::default());
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn export_empty_policy_keeps_empty_set() {
        let raw = users_in(&["A", "B"]);
        assert!(select_records(&[], &raw, EmptyExportPolicy::ExportEmpty).is_empty());
    }

    #[test]
    fn non_empty_filter_is_exported_as_is() {
        let raw = users_in(&["A", "B", "A"]);
        let filtered: Vec<&UserRecord> = raw.iter().filter(|u| u.city() == "A").collect();
        for policy in [EmptyExportPolicy::ExportAll, EmptyExportPolicy::ExportEmpty] {
            let ids: Vec<u64> = select_records(&filtered, &raw, policy).iter().map(|u| u.id).collect();
            assert_eq!(ids, vec![1, 3]);
        }
    }

    #[test]
    fn policy_parses_config_values() {
        assert_eq!(EmptyExportPolicy::parse("all"), Some(EmptyExportPolicy::ExportAll));
        assert_eq!(EmptyExportPolicy::parse(" NONE "), Some(EmptyExportPolicy::ExportEmpty));
        assert_eq!(EmptyExportPolicy::parse("sometimes"), None);
    }

    #[test]
    fn build_export_uses_fallback_records() {
        let raw = users_in(&["A", "B"]);
        let file = build_export(ExportFormat::Csv, EmptyExportPolicy::ExportAll, &[], &raw, date()).unwrap();
        assert_eq!(file.file_name, "users_2024-03-09.csv");
        assert_eq!(file.contents.lines().count(), 3);
    }
}
