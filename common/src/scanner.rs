//! Filtering of the barcode decoder's error channel.
//!
//! The decoder reports an error for every video frame in which it finds no
//! code. Those are not failures and must never reach the user.

/// Error names the decoder emits while a code is simply not (yet) readable.
const BENIGN_DECODE_ERRORS: [&str; 3] = ["NotFoundException", "ChecksumException", "FormatException"];

pub fn is_benign_decode_error(name: &str) -> bool {
    BENIGN_DECODE_ERRORS.contains(&name)
}

/// The user (or a browser policy) refused camera access.
pub fn is_permission_denied(text: &str) -> bool {
    text.contains("NotAllowedError") || text.to_ascii_lowercase().contains("permission denied")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_misses_are_benign() {
        assert!(is_benign_decode_error("NotFoundException"));
        assert!(!is_benign_decode_error("NotReadableError"));
    }

    #[test]
    fn detects_permission_denial() {
        assert!(is_permission_denied("NotAllowedError: Permission denied"));
        assert!(is_permission_denied("Permission denied by system"));
        assert!(!is_permission_denied("NotFoundError: Requested device not found"));
    }
}
