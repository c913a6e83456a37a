// src/edgar/models.rs

/// One Form 4 filing as listed by the EDGAR feed: the XML document URL plus
/// the human-readable index page derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingReference {
    pub document_url: String,
    pub index_url: String,
}

impl FilingReference {
    /// Builds a reference from the feed's document link. EDGAR serves the
    /// filing index page at the same path with `.xml` swapped for
    /// `-index.html`. A link without an `.xml` suffix (e.g. an index page)
    /// passes through unchanged, with both URLs equal.
    pub fn from_document_url(document_url: &str) -> Self {
        let index_url = document_url.replace(".xml", "-index.html");
        Self {
            document_url: document_url.to_string(),
            index_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_url_derived_from_document_url() {
        let filing = FilingReference::from_document_url(
            "https://www.sec.gov/Archives/edgar/data/320193/000032019324000001/wk-form4_1.xml",
        );
        assert_eq!(
            filing.index_url,
            "https://www.sec.gov/Archives/edgar/data/320193/000032019324000001/wk-form4_1-index.html"
        );
        assert!(filing.document_url.ends_with(".xml"));
    }

    #[test]
    fn test_non_xml_link_passes_through_unchanged() {
        let filing = FilingReference::from_document_url(
            "https://www.sec.gov/Archives/edgar/data/320193/000032019324000001-index.htm",
        );
        assert_eq!(filing.index_url, filing.document_url);
    }
}
