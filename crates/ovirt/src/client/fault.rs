//! The engine's XML error document.

use serde::Deserialize;

use crate::error::RequestError;

/// `<fault><reason>..</reason><detail>..</detail></fault>`
#[derive(Debug, Deserialize)]
struct Fault {
    reason: Option<String>,
    detail: Option<String>,
}

/// Builds the error for a non-success response, attaching the fault text
/// when the body carries one.
pub(crate) async fn request_error(response: reqwest::Response) -> RequestError {
    let status = response.status();
    let error = RequestError::new(
        status.as_u16(),
        status.canonical_reason().map(str::to_string),
    );

    match response.bytes().await {
        Ok(body) => match parse_fault(&body) {
            Some(fault) => error.with_fault(fault.reason, fault.detail),
            None => error,
        },
        Err(_) => error,
    }
}

fn parse_fault(body: &[u8]) -> Option<Fault> {
    if body.is_empty() {
        return None;
    }
    quick_xml::de::from_reader::<_, Fault>(body)
        .ok()
        .filter(|f| f.reason.is_some() || f.detail.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_engine_fault() {
        let body = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<fault>
    <detail>Entity not found: vm 123</detail>
    <reason>Operation Failed</reason>
</fault>"#;
        let fault = parse_fault(body).unwrap();
        assert_eq!(fault.reason.as_deref(), Some("Operation Failed"));
        assert_eq!(fault.detail.as_deref(), Some("Entity not found: vm 123"));
    }

    #[test]
    fn ignores_non_xml_body() {
        assert!(parse_fault(b"<html><body>Unauthorized</body></html>").is_none());
        assert!(parse_fault(b"not xml at all").is_none());
        assert!(parse_fault(b"").is_none());
    }
}
