//! Link classification: the pure first step of every scan.

use log::debug;

use crate::error::{Result, ScanError};
use crate::links::urls::{drive_file_id, is_drive_url};
use crate::model::link::ResolvedLink;

/// Classifies a scanned string.
///
/// - Drive/Docs links with a recognizable file identifier become
///   [`LinkKind::GoogleDrive`](crate::model::link::LinkKind::GoogleDrive) with a
///   direct-download URL.
/// - Anything mentioning `.pdf` (any case) is used as is.
/// - Other `http` URLs need redirect resolution first.
/// - Everything else is [`ScanError::InvalidContent`].
pub fn classify(payload: &str) -> Result<ResolvedLink> {
    if is_drive_url(payload) {
        if let Some(file_id) = drive_file_id(payload) {
            debug!("classified Drive link, file id {file_id}");
            return Ok(ResolvedLink::google_drive(&file_id));
        }
        debug!("Drive link without a file id: {payload}");
    }

    if payload.to_lowercase().contains(".pdf") {
        debug!("classified direct PDF link: {payload}");
        return Ok(ResolvedLink::direct_pdf(payload));
    }

    if payload.starts_with("http") {
        debug!("link needs redirect resolution: {payload}");
        return Ok(ResolvedLink::unresolvable(payload));
    }

    Err(ScanError::InvalidContent)
}

/// Classification of a URL returned by the redirect resolver: it has to be
/// terminal now.
pub fn classify_resolved(url: &str) -> Result<ResolvedLink> {
    match classify(url) {
        Ok(link) if link.is_terminal() => Ok(link),
        Ok(_) | Err(ScanError::InvalidContent) => Err(ScanError::NotAPdfLink(url.to_string())),
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::link::LinkKind;

    #[test]
    fn drive_share_links_keep_the_exact_id() {
        for payload in [
            "https://drive.google.com/file/d/ABC123/view?usp=sharing",
            "https://drive.google.com/file/d/ABC123/view",
            "https://drive.google.com/file/d/ABC123",
            "https://drive.google.com/file/d/ABC123/edit#heading=h.1",
        ] {
            let link = classify(payload).unwrap();
            assert_eq!(link.kind, LinkKind::GoogleDrive, "{payload}");
            assert_eq!(
                link.url,
                "https://drive.google.com/uc?export=download&id=ABC123"
            );
            assert_eq!(link.drive_file_id().as_deref(), Some("ABC123"));
        }
    }

    #[test]
    fn docs_domain_counts_as_drive() {
        let link = classify("https://docs.google.com/file/d/Doc-9_x/view").unwrap();
        assert_eq!(link.kind, LinkKind::GoogleDrive);
        assert_eq!(link.drive_file_id().as_deref(), Some("Doc-9_x"));
    }

    #[test]
    fn normalized_drive_link_classifies_to_itself() {
        let url = "https://drive.google.com/uc?export=download&id=ABC123";
        assert_eq!(classify(url).unwrap(), ResolvedLink::google_drive("ABC123"));
    }

    #[test]
    fn pdf_links_are_left_unchanged_in_any_case() {
        for payload in [
            "https://example.com/slides.pdf",
            "https://example.com/SLIDES.PDF?download=1",
            "ftp://files.example/deck.Pdf",
        ] {
            let link = classify(payload).unwrap();
            assert_eq!(link.kind, LinkKind::DirectPdf);
            assert_eq!(link.url, payload);
        }
    }

    #[test]
    fn other_http_links_need_resolution() {
        let link = classify("https://scan.page/p/abc").unwrap();
        assert_eq!(link.kind, LinkKind::Unresolvable);
        assert!(!link.is_terminal());
    }

    #[test]
    fn drive_folder_without_id_falls_through() {
        let link = classify("https://drive.google.com/drive/folders").unwrap();
        assert_eq!(link.kind, LinkKind::Unresolvable);
    }

    #[test]
    fn plain_text_is_invalid_content() {
        for payload in ["hello world", "4006381333931", "", "mailto:someone@example.com"] {
            assert_eq!(classify(payload), Err(ScanError::InvalidContent));
        }
    }

    #[test]
    fn resolved_url_must_be_terminal() {
        assert_eq!(
            classify_resolved("https://example.com/landing"),
            Err(ScanError::NotAPdfLink("https://example.com/landing".to_string()))
        );
        assert_eq!(
            classify_resolved("https://example.com/deck.pdf").unwrap().kind,
            LinkKind::DirectPdf
        );
    }
}
