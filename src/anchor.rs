//! Text-fragment deep links
//!
//! Turns a stored quote selector into a `#:~:text=` URL so that opening the
//! link scrolls to and marks the passage natively, without any script on the
//! target page.
//!
//! Reference: <https://wicg.github.io/scroll-to-text-fragment/>

use urlencoding::encode;

use crate::annotations::{ItemContent, Selector};

const TEXT_DIRECTIVE: &str = ":~:text=";

/// Build a deep link to the passage described by `selector`
///
/// Returns `base_url` unchanged when there is no selector, when it is not a
/// quote selector, or when its `exact` text is empty. Each part of the quote
/// is percent-encoded on its own, with `-` escaped as well, so the only
/// literal `-,` and `,-` in the directive are the context markers.
pub fn build_anchor_url(base_url: &str, selector: Option<&Selector>) -> String {
    let Some(quote) = selector
        .and_then(Selector::as_text_quote)
        .filter(|q| q.is_usable())
    else {
        return base_url.to_string();
    };

    let mut directive = String::new();
    if let Some(prefix) = non_empty(quote.prefix.as_deref()) {
        directive.push_str(&encode_part(prefix));
        directive.push_str("-,");
    }
    directive.push_str(&encode_part(&quote.exact));
    if let Some(suffix) = non_empty(quote.suffix.as_deref()) {
        directive.push_str(",-");
        directive.push_str(&encode_part(suffix));
    }

    // A page fragment may already be present; the directive follows it
    let separator = if base_url.contains('#') { "" } else { "#" };
    format!("{base_url}{separator}{TEXT_DIRECTIVE}{directive}")
}

/// Deep link for an item, built from its target page and selector
pub fn anchor_for_item(item: &ItemContent) -> Option<String> {
    item.target
        .as_ref()
        .map(|target| build_anchor_url(&target.source, target.selector.as_ref()))
}

fn encode_part(part: &str) -> String {
    encode(part).replace('-', "%2D")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{AuthorRef, Identity, Target};

    #[test]
    fn test_full_quote() {
        let selector = Selector::text_quote("hello world", Some("say "), Some("."));
        assert_eq!(
            build_anchor_url("https://ex.com/a", Some(&selector)),
            "https://ex.com/a#:~:text=say%20-,hello%20world,-."
        );
    }

    #[test]
    fn test_exact_only() {
        let selector = Selector::text_quote("hello", None, None);
        assert_eq!(
            build_anchor_url("https://ex.com/a", Some(&selector)),
            "https://ex.com/a#:~:text=hello"
        );
    }

    #[test]
    fn test_empty_context_is_omitted() {
        let selector = Selector::text_quote("hello", Some(""), Some(""));
        assert_eq!(
            build_anchor_url("https://ex.com/a", Some(&selector)),
            "https://ex.com/a#:~:text=hello"
        );
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        let selector = Selector::text_quote("a,b&c", None, Some("#1"));
        assert_eq!(
            build_anchor_url("https://ex.com", Some(&selector)),
            "https://ex.com#:~:text=a%2Cb%26c,-%231"
        );
    }

    #[test]
    fn test_hyphens_are_escaped() {
        let selector = Selector::text_quote("-5 degrees", None, None);
        assert_eq!(
            build_anchor_url("https://ex.com", Some(&selector)),
            "https://ex.com#:~:text=%2D5%20degrees"
        );

        let selector = Selector::text_quote("well-known", Some("a-"), Some("-b"));
        assert_eq!(
            build_anchor_url("https://ex.com", Some(&selector)),
            "https://ex.com#:~:text=a%2D-,well%2Dknown,-%2Db"
        );
    }

    #[test]
    fn test_degrades_to_base_url() {
        let base = "https://ex.com/a?x=1";
        assert_eq!(build_anchor_url(base, None), base);
        assert_eq!(
            build_anchor_url(base, Some(&Selector::text_quote("", Some("p"), None))),
            base
        );
        assert_eq!(build_anchor_url(base, Some(&Selector::Unsupported)), base);
        assert_eq!(
            build_anchor_url(base, Some(&Selector::TextPosition { start: 0, end: 4 })),
            base
        );
    }

    #[test]
    fn test_existing_fragment() {
        let selector = Selector::text_quote("hello", None, None);
        assert_eq!(
            build_anchor_url("https://ex.com/a#intro", Some(&selector)),
            "https://ex.com/a#intro:~:text=hello"
        );
    }

    #[test]
    fn test_anchor_for_item() {
        let item = ItemContent::new(Identity::from_uri("at://a"), AuthorRef::new("did:plc:me"))
            .with_target(Target::with_selector(
                "https://ex.com/a",
                Selector::text_quote("quote", None, None),
            ));
        assert_eq!(
            anchor_for_item(&item).as_deref(),
            Some("https://ex.com/a#:~:text=quote")
        );

        let bare = ItemContent::new(Identity::from_uri("at://b"), AuthorRef::default());
        assert!(anchor_for_item(&bare).is_none());
    }
}
