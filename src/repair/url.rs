//! Corrected download URLs.

/// Status codes accepted as proof that a corrected URL resolves.
pub const ACCEPTED_STATUSES: [u16; 2] = [200, 302];

/// Build the download URL for a resource derived from `predecessor_id`.
///
/// The file name is lowercased.
#[must_use]
pub fn corrected_url(host: &str, package_id: &str, predecessor_id: &str, name: &str) -> String {
    format!(
        "https://{host}/dataset/{package_id}/resource/{predecessor_id}/download/{}",
        name.to_lowercase()
    )
}

/// Whether a probe status confirms a corrected URL.
#[must_use]
pub fn is_accepted(status: u16) -> bool {
    ACCEPTED_STATUSES.contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::parse_predecessor;

    #[test]
    fn builds_lowercased_download_url() {
        assert_eq!(
            corrected_url("data.coat.no", "pkg1", "p1", "Data.csv"),
            "https://data.coat.no/dataset/pkg1/resource/p1/download/data.csv"
        );
    }

    #[test]
    fn corrected_url_parses_back_to_predecessor() {
        let pred = "0f1e2d3c-aaaa-4bbb-8ccc-123456789abc";
        let url = corrected_url("data.coat.no", "pkg1", pred, "TEMP_LOG.csv");
        assert_eq!(parse_predecessor(&url).unwrap(), pred);
    }

    #[test]
    fn only_ok_and_found_are_accepted() {
        assert!(is_accepted(200));
        assert!(is_accepted(302));
        assert!(!is_accepted(301));
        assert!(!is_accepted(404));
        assert!(!is_accepted(500));
    }
}
