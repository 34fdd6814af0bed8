//! Rebuild a name group's records from a flat search result.

use crate::chain::record::ResourceRecord;
use crate::error::RepairError;
use crate::ports::SearchEntry;

/// Turn search hits for `name` into records, adding the invalid sentinel
/// when the search did not return it.
///
/// Records keep search order; the sentinel, if appended, comes last.
///
/// # Errors
///
/// Returns [`RepairError::NoSearchResults`] when `entries` is empty.
pub fn reconstruct(
    name: &str,
    entries: &[SearchEntry],
    invalid: &ResourceRecord,
) -> Result<Vec<ResourceRecord>, RepairError> {
    if entries.is_empty() {
        return Err(RepairError::NoSearchResults { name: name.to_string() });
    }

    let mut records: Vec<ResourceRecord> = entries.iter().map(ResourceRecord::from_entry).collect();

    if !records.iter().any(|r| r.id == invalid.id) {
        tracing::debug!(resource_id = %invalid.id, name, "invalid resource not in search results");
        records.push(invalid.clone());
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::record::Link;

    fn entry(id: &str, url: &str) -> SearchEntry {
        SearchEntry { id: id.into(), name: "temp_log.csv".into(), url: url.into(), package_id: "p".into() }
    }

    #[test]
    fn empty_search_is_an_error() {
        let sentinel = ResourceRecord::invalid("c", "temp_log.csv", "", "p");
        let err = reconstruct("temp_log.csv", &[], &sentinel).unwrap_err();
        assert!(matches!(err, RepairError::NoSearchResults { name } if name == "temp_log.csv"));
    }

    #[test]
    fn appends_sentinel_once_when_missing() {
        let entries = vec![entry("a", "https://h/resource/a/x"), entry("b", "https://h/resource/a/x")];
        let sentinel = ResourceRecord::invalid("c", "temp_log.csv", "", "p");

        let records = reconstruct("temp_log.csv", &entries, &sentinel).unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(records[0].link, Link::Head);
        assert_eq!(records[1].link, Link::Linked("a".into()));
        assert_eq!(records[2].link, Link::Unparseable);
    }

    #[test]
    fn search_copy_replaces_sentinel() {
        let entries = vec![entry("a", "https://h/resource/a/x"), entry("c", "broken")];
        let sentinel = ResourceRecord::invalid("c", "temp_log.csv", "broken", "p");

        let records = reconstruct("temp_log.csv", &entries, &sentinel).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, "c");
    }

    #[test]
    fn non_head_entries_are_not_duplicated() {
        let entries = vec![
            entry("a", "https://h/resource/a/x"),
            entry("b", "https://h/resource/a/x"),
            entry("d", "https://h/resource/b/x"),
        ];
        let sentinel = ResourceRecord::invalid("d", "temp_log.csv", "", "p");

        let records = reconstruct("temp_log.csv", &entries, &sentinel).unwrap();

        assert_eq!(records.len(), 3);
    }
}
