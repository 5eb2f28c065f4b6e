//! `mailto:` URI builder (RFC 6068)
//!
//! Subject and body are percent-encoded as UTF-8 with every byte outside the
//! RFC 3986 unreserved set escaped. Line breaks are normalised to CRLF first.

use urlencoding::encode;

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\r\n")
}

fn encode_addresses(addresses: &[String]) -> String {
    addresses
        .iter()
        .map(|a| encode(a.trim()).replace("%40", "@"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Build `mailto:to1,to2?cc=..&subject=..&body=..`
pub fn build_mailto(to: &[String], cc: &[String], subject: &str, body: &str) -> String {
    let mut uri = format!("mailto:{}", encode_addresses(to));

    let mut params = Vec::new();
    if !cc.is_empty() {
        params.push(format!("cc={}", encode_addresses(cc)));
    }
    if !subject.is_empty() {
        params.push(format!("subject={}", encode(&normalize_newlines(subject))));
    }
    if !body.is_empty() {
        params.push(format!("body={}", encode(&normalize_newlines(body))));
    }
    if !params.is_empty() {
        uri.push('?');
        uri.push_str(&params.join("&"));
    }
    uri
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mailto_basic() {
        let uri = build_mailto(
            &["store@comet.it".into(), "ops@example.com".into()],
            &[],
            "Visita 21/10",
            "Ciao,\na presto",
        );
        assert_eq!(
            uri,
            "mailto:store@comet.it,ops@example.com?subject=Visita%2021%2F10&body=Ciao%2C%0D%0Aa%20presto"
        );
    }

    #[test]
    fn test_mailto_cc_and_reserved_characters() {
        let uri = build_mailto(&["a@b.it".into()], &["c+d@e.it".into()], "A&B=?", "");
        assert_eq!(uri, "mailto:a@b.it?cc=c%2Bd@e.it&subject=A%26B%3D%3F");
    }

    #[test]
    fn test_mailto_utf8() {
        let uri = build_mailto(&["a@b.it".into()], &[], "Città", "");
        assert_eq!(uri, "mailto:a@b.it?subject=Citt%C3%A0");
    }

    #[test]
    fn test_mailto_without_params() {
        assert_eq!(build_mailto(&["a@b.it".into()], &[], "", ""), "mailto:a@b.it");
    }
}
