//! Pagination cursor parsing
//!
//! The API hands back `next`/`prev` as full URLs. Only the `page` query
//! parameter is read from them; page size and path are never assumed.

use url::Url;

/// Page number encoded in a `next`/`prev` cursor.
///
/// `None` for a missing or empty cursor, a string that is not an absolute
/// URL, a URL without `page`, or a `page` that is not a non-negative integer.
pub fn extract_page_number(cursor: Option<&str>) -> Option<u32> {
    let cursor = cursor.map(str::trim).filter(|c| !c.is_empty())?;
    let url = Url::parse(cursor).ok()?;
    let (_, page) = url.query_pairs().find(|(key, _)| key == "page")?;
    page.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_exact_page() {
        assert_eq!(
            extract_page_number(Some("https://x/api/character?page=3")),
            Some(3)
        );
        assert_eq!(
            extract_page_number(Some(
                "https://rickandmortyapi.com/api/character?page=12&name=rick&status=alive"
            )),
            Some(12)
        );
        assert_eq!(
            extract_page_number(Some("https://x/api/character?name=rick&page=2")),
            Some(2)
        );
    }

    #[test]
    fn test_missing_or_empty_cursor() {
        assert_eq!(extract_page_number(None), None);
        assert_eq!(extract_page_number(Some("")), None);
        assert_eq!(extract_page_number(Some("   ")), None);
    }

    #[test]
    fn test_malformed_cursor() {
        assert_eq!(extract_page_number(Some("not a url")), None);
        assert_eq!(extract_page_number(Some("/character?page=2")), None);
        assert_eq!(extract_page_number(Some("https://x/api/character")), None);
        assert_eq!(extract_page_number(Some("https://x/api/character?page=")), None);
        assert_eq!(extract_page_number(Some("https://x/api/character?page=two")), None);
        assert_eq!(extract_page_number(Some("https://x/api/character?page=-1")), None);
    }
}
