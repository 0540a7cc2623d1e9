use std::cmp::Ordering;

use thiserror::Error;

use memvault_core::FileRecord;

/// Sortable record attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Lowercased title, falling back to the original filename.
    Name,
    /// Raw byte count.
    Size,
    /// Stored MIME string.
    Type,
    /// Creation timestamp.
    #[default]
    Date,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Error returned when parsing an unknown sort parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort parameter: {0}")]
pub struct SortParseError(pub String);

impl std::str::FromStr for SortKey {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "size" => Ok(SortKey::Size),
            "type" => Ok(SortKey::Type),
            "date" => Ok(SortKey::Date),
            other => Err(SortParseError(other.to_owned())),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(SortParseError(other.to_owned())),
        }
    }
}

/// Sort records in place by the given key and order.
///
/// The sort is stable: records with equal keys keep their relative input
/// order, in both directions. Date keys compare chronologically, which
/// for RFC 3339 timestamps equals their lexicographic order.
pub fn sort_records(records: &mut [FileRecord], key: SortKey, order: SortOrder) {
    records.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Name => a
                .display_name()
                .to_lowercase()
                .cmp(&b.display_name().to_lowercase()),
            SortKey::Size => a.file_size.cmp(&b.file_size),
            SortKey::Type => a.file_type.cmp(&b.file_type),
            SortKey::Date => a.created_at.cmp(&b.created_at),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Comparator-style helper exposed for merge sorting in the engine.
pub(crate) fn by_date_desc(a: &FileRecord, b: &FileRecord) -> Ordering {
    b.created_at.cmp(&a.created_at)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use memvault_core::CategoryDetails;

    use super::*;

    fn record(title: Option<&str>, filename: &str, size: u64, mime: &str) -> FileRecord {
        FileRecord::new(
            title.map(str::to_owned),
            None,
            format!("notes/{filename}"),
            format!("memory://memory-vault/notes/{filename}"),
            filename.to_owned(),
            mime.to_owned(),
            size,
            CategoryDetails::Notes { tags: vec![] },
        )
    }

    #[test]
    fn parse_sort_parameters() {
        assert_eq!(SortKey::from_str("name").unwrap(), SortKey::Name);
        assert_eq!(SortKey::from_str("date").unwrap(), SortKey::Date);
        assert_eq!(SortOrder::from_str("asc").unwrap(), SortOrder::Asc);
        assert!(SortKey::from_str("newest").is_err());
        assert!(SortOrder::from_str("up").is_err());
    }

    #[test]
    fn name_sort_is_case_insensitive() {
        let mut records = vec![
            record(Some("banana"), "b.txt", 1, "text/plain"),
            record(Some("Apple"), "a.txt", 2, "text/plain"),
            record(Some("cherry"), "c.txt", 3, "text/plain"),
        ];
        sort_records(&mut records, SortKey::Name, SortOrder::Asc);
        let names: Vec<_> = records.iter().map(FileRecord::display_name).collect();
        assert_eq!(names, ["Apple", "banana", "cherry"]);
    }

    #[test]
    fn name_sort_is_stable_for_equal_keys() {
        // "DUPE" and "dupe" compare equal case-insensitively; their input
        // order must survive, ascending and descending.
        let first = record(Some("DUPE"), "1.txt", 1, "text/plain");
        let second = record(Some("dupe"), "2.txt", 2, "text/plain");
        let third = record(Some("aaa"), "3.txt", 3, "text/plain");

        let mut records = vec![first.clone(), second.clone(), third];
        sort_records(&mut records, SortKey::Name, SortOrder::Asc);
        assert_eq!(records[1].id, first.id);
        assert_eq!(records[2].id, second.id);

        let mut records = vec![first.clone(), second.clone()];
        sort_records(&mut records, SortKey::Name, SortOrder::Desc);
        assert_eq!(records[0].id, first.id);
        assert_eq!(records[1].id, second.id);
    }

    #[test]
    fn name_sort_falls_back_to_filename() {
        let mut records = vec![
            record(None, "zeta.txt", 1, "text/plain"),
            record(Some("alpha"), "x.txt", 2, "text/plain"),
        ];
        sort_records(&mut records, SortKey::Name, SortOrder::Asc);
        assert_eq!(records[0].display_name(), "alpha");
        assert_eq!(records[1].display_name(), "zeta.txt");
    }

    #[test]
    fn size_sort() {
        let mut records = vec![
            record(Some("big"), "b.txt", 300, "text/plain"),
            record(Some("small"), "s.txt", 1, "text/plain"),
            record(Some("mid"), "m.txt", 40, "text/plain"),
        ];
        sort_records(&mut records, SortKey::Size, SortOrder::Desc);
        let sizes: Vec<_> = records.iter().map(|r| r.file_size).collect();
        assert_eq!(sizes, [300, 40, 1]);
    }

    #[test]
    fn type_sort() {
        let mut records = vec![
            record(Some("a"), "a.txt", 1, "text/plain"),
            record(Some("b"), "b.pdf", 1, "application/pdf"),
        ];
        sort_records(&mut records, SortKey::Type, SortOrder::Asc);
        assert_eq!(records[0].file_type, "application/pdf");
        assert_eq!(records[1].file_type, "text/plain");
    }

    #[test]
    fn date_sort() {
        let mut old = record(Some("old"), "o.txt", 1, "text/plain");
        old.created_at = old.created_at - chrono::Duration::hours(2);
        let new = record(Some("new"), "n.txt", 1, "text/plain");

        let mut records = vec![old.clone(), new.clone()];
        sort_records(&mut records, SortKey::Date, SortOrder::Desc);
        assert_eq!(records[0].id, new.id);

        sort_records(&mut records, SortKey::Date, SortOrder::Asc);
        assert_eq!(records[0].id, old.id);
    }
}
