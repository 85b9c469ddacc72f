//! WhatsApp deep links for quote inquiries and chat bookings.
//!
//! The `wa.me` link convention is `https://wa.me/<number>?text=<escaped>`;
//! the escaping must match JavaScript `encodeURIComponent`, which leaves
//! `A-Za-z0-9 - _ . ! ~ * ' ( )` unescaped.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// Quote link shown on every rendered listing.
pub fn inquiry_link(number: &str, name: &str, price_display: &str) -> String {
    let message = format!("Inquiry: {} - {}", name, price_display);
    format!("https://wa.me/{}?text={}", number, encode_component(&message))
}

/// Booking link used by matched chat replies.
pub fn booking_link(number: &str, subject: &str) -> String {
    let message = format!("Hi Alliya - I want {}", subject);
    format!("https://wa.me/{}?text={}", number, encode_component(&message))
}

/// Link on the generic no-match reply, which quotes the query instead of a
/// product name.
pub fn chat_link(number: &str, query: &str) -> String {
    let message = format!("Alliya - {}", query);
    format!("https://wa.me/{}?text={}", number, encode_component(&message))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inquiry_link_exact_format() {
        let link = inquiry_link("971501234567", "1121 Sella", "AED 100");
        assert_eq!(
            link,
            "https://wa.me/971501234567?text=Inquiry%3A%201121%20Sella%20-%20AED%20100"
        );
    }

    #[test]
    fn test_encode_component_matches_encodeuricomponent() {
        assert_eq!(encode_component("a b"), "a%20b");
        assert_eq!(encode_component("5%"), "5%25");
        assert_eq!(encode_component("it's-fine.!~*()"), "it's-fine.!~*()");
        assert_eq!(encode_component("x&y=z"), "x%26y%3Dz");
    }

    #[test]
    fn test_booking_link_contains_subject() {
        let link = booking_link("971585521976", "golden sella");
        assert_eq!(
            link,
            "https://wa.me/971585521976?text=Hi%20Alliya%20-%20I%20want%20golden%20sella"
        );
    }

    #[test]
    fn test_chat_link_quotes_query() {
        let link = chat_link("971585521976", "quinoa");
        assert_eq!(
            link,
            "https://wa.me/971585521976?text=Alliya%20-%20quinoa"
        );
    }
}
