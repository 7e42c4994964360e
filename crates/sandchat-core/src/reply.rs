//! Reply decoding.
//!
//! The backend embeds an optional chart directive inside its free-text
//! reply, between literal sentinel markers. This is the one bit-exact
//! wire contract the client must preserve: the sentinels, their order,
//! and the rule that prose is always shown even when the embedded
//! directive is unusable.

use crate::chart::ChartDirective;

/// Opening sentinel of an embedded chart directive.
pub const CHART_OPEN: &str = "<CHART_CONFIG>";
/// Closing sentinel of an embedded chart directive.
pub const CHART_CLOSE: &str = "</CHART_CONFIG>";

/// A decoded reply: the prose to display, and the directive when one was
/// present and parseable.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedReply {
    pub display_text: String,
    pub directive: Option<ChartDirective>,
}

/// Splits a raw reply into display text and an optional chart directive.
///
/// Only the first opening/closing sentinel pair is honored. When either
/// sentinel is absent, or the closing sentinel occurs at or before the
/// opening one, the whole reply (trimmed) is display text — the common
/// case for plain-text replies, not an error. When the pair is well
/// formed, the span between the sentinels is parsed as JSON; a parse
/// failure degrades to "no directive", but the sentinel span (markers
/// included) is still removed so the prose is never lost to a bad
/// directive.
pub fn decode(raw: &str) -> DecodedReply {
    let (Some(open), Some(close)) = (raw.find(CHART_OPEN), raw.find(CHART_CLOSE)) else {
        return DecodedReply {
            display_text: raw.trim().to_string(),
            directive: None,
        };
    };
    if close <= open {
        return DecodedReply {
            display_text: raw.trim().to_string(),
            directive: None,
        };
    }

    let embedded = raw[open + CHART_OPEN.len()..close].trim();
    let directive = ChartDirective::parse(embedded);

    let mut display_text = String::with_capacity(raw.len());
    display_text.push_str(&raw[..open]);
    display_text.push_str(&raw[close + CHART_CLOSE.len()..]);

    DecodedReply {
        display_text: display_text.trim().to_string(),
        directive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_text_passes_through() {
        let decoded = decode("hello");
        assert_eq!(decoded.display_text, "hello");
        assert!(decoded.directive.is_none());
    }

    #[test]
    fn test_plain_text_is_trimmed() {
        let decoded = decode("  hello\n");
        assert_eq!(decoded.display_text, "hello");
    }

    #[test]
    fn test_missing_close_sentinel_degrades() {
        let raw = "before <CHART_CONFIG>{\"type\":\"bar\"}";
        let decoded = decode(raw);
        assert_eq!(decoded.display_text, raw.trim());
        assert!(decoded.directive.is_none());
    }

    #[test]
    fn test_inverted_sentinels_degrade() {
        // Sentinel order is load-bearing: close before open means no span.
        let raw = "</CHART_CONFIG>{\"type\":\"bar\"}<CHART_CONFIG>";
        let decoded = decode(raw);
        assert_eq!(decoded.display_text, raw);
        assert!(decoded.directive.is_none());
    }

    #[test]
    fn test_well_formed_span_extracts_directive() {
        let raw = "Here:\n<CHART_CONFIG>{\"type\":\"bar\",\"data\":{\"labels\":[\"A\"],\"datasets\":[{\"data\":[1]}]}}</CHART_CONFIG>\nDone";
        let decoded = decode(raw);

        assert_eq!(decoded.display_text, "Here:\n\nDone");
        let directive = decoded.directive.expect("directive should parse");
        assert_eq!(directive.chart_type(), Some("bar"));
        assert_eq!(
            directive.as_value()["data"]["labels"],
            json!(["A"])
        );
    }

    #[test]
    fn test_malformed_json_still_strips_span() {
        let raw = "Here:\n<CHART_CONFIG>{oops}</CHART_CONFIG>\nDone";
        let decoded = decode(raw);
        assert_eq!(decoded.display_text, "Here:\n\nDone");
        assert!(decoded.directive.is_none());
    }

    #[test]
    fn test_scalar_json_is_not_a_directive() {
        let decoded = decode("x <CHART_CONFIG>42</CHART_CONFIG> y");
        assert_eq!(decoded.display_text, "x  y");
        assert!(decoded.directive.is_none());
    }

    #[test]
    fn test_embedded_span_is_trimmed_before_parse() {
        let decoded = decode("<CHART_CONFIG>\n  {\"type\":\"bar\"}\n</CHART_CONFIG>");
        assert_eq!(decoded.display_text, "");
        assert_eq!(
            decoded.directive.unwrap().chart_type(),
            Some("bar")
        );
    }

    #[test]
    fn test_only_first_pair_honored() {
        let raw = "a<CHART_CONFIG>{\"type\":\"bar\"}</CHART_CONFIG>b<CHART_CONFIG>{\"type\":\"pie\"}</CHART_CONFIG>c";
        let decoded = decode(raw);
        assert_eq!(
            decoded.display_text,
            "ab<CHART_CONFIG>{\"type\":\"pie\"}</CHART_CONFIG>c"
        );
        assert_eq!(decoded.directive.unwrap().chart_type(), Some("bar"));
    }
}
