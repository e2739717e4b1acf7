use std::sync::LazyLock;

use regex::Regex;

use crate::model::Contact;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap());
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());
static WEBSITE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https?://[^\s]+|www\.[^\s]+|[a-zA-Z0-9-]+\.(?:com|org|net|gov)").unwrap()
});

/// Extract phone, email, and website independently. A miss on one field
/// never blocks the others.
pub fn extract(text: &str) -> Contact {
    Contact {
        phone: PHONE_RE.find(text).and_then(|m| normalize_phone(m.as_str())),
        email: EMAIL_RE.find(text).map(|m| m.as_str().to_string()),
        website: WEBSITE_RE.find(text).map(|m| ensure_scheme(m.as_str())),
    }
}

/// Canonical US phone form: (NNN) NNN-NNNN. Anything that does not boil
/// down to exactly 10 digits is dropped.
fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 10 {
        return None;
    }
    Some(format!(
        "({}) {}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..10]
    ))
}

fn ensure_scheme(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_normalization() {
        assert_eq!(
            extract("Call 555-123-4567 to book").phone.as_deref(),
            Some("(555) 123-4567")
        );
        assert_eq!(
            extract("(303) 555.0100").phone.as_deref(),
            Some("(303) 555-0100")
        );
    }

    #[test]
    fn malformed_phone_is_absent_not_an_error() {
        assert_eq!(extract("phone: abc").phone, None);
    }

    #[test]
    fn email_match() {
        assert_eq!(
            extract("write host@lakeviewcamp.com anytime").email.as_deref(),
            Some("host@lakeviewcamp.com")
        );
    }

    #[test]
    fn website_scheme_prefixing() {
        assert_eq!(
            extract("see www.lakeviewcamp.com for rates").website.as_deref(),
            Some("https://www.lakeviewcamp.com")
        );
        assert_eq!(
            extract("https://camp.example.org/book").website.as_deref(),
            Some("https://camp.example.org/book")
        );
        assert_eq!(
            extract("visit lakeviewcamp.net today").website.as_deref(),
            Some("https://lakeviewcamp.net")
        );
    }

    #[test]
    fn fields_are_independent() {
        let c = extract("email host@camp.org, no phone listed");
        assert!(c.phone.is_none());
        assert_eq!(c.email.as_deref(), Some("host@camp.org"));
        // The bare-domain heuristic also picks up the email's domain,
        // matching the behavior of the earlier extractor generations.
        assert_eq!(c.website.as_deref(), Some("https://camp.org"));
    }
}
