//! Lightweight HTML fact extraction.
//!
//! Probes only need a handful of facts from a page, so this works on the
//! markup with a few regexes rather than building a DOM.

use std::sync::LazyLock;

use regex::Regex;

static INVISIBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!--.*?-->|<(?:script|style|noscript|template)\b[^>]*>.*?</(?:script|style|noscript|template)\s*>")
        .expect("valid regex")
});
static BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body\b[^>]*>(.*)</body\s*>").expect("valid regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));
static SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a\s*>").expect("valid regex"));
static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#).expect("valid regex")
});
static NAVIGATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<nav\b|\b(?:class|id)\s*=\s*["'][^"']*\b(?:nav|navigation|menu)\b"#)
        .expect("valid regex")
});
static FOOTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<footer\b|\bclass\s*=\s*["'][^"']*\bfooter\b"#).expect("valid regex")
});
static LOGO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*\balt\s*=\s*["'][^"']*logo|\b(?:class|id)\s*=\s*["'][^"']*\blogo\b"#)
        .expect("valid regex")
});
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.+-]+@\w+\.\w+").expect("valid regex"));
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{3}[-.\s]?\d{3}[-.\s]?\d{4}").expect("valid regex"));

/// A hyperlink with lowercased target and text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// `href` attribute, lowercased
    pub href: String,
    /// Link text with markup removed, lowercased
    pub text: String,
}

/// Facts extracted from one HTML page
#[derive(Debug, Clone, Default)]
pub struct Document {
    text: String,
    markup: String,
    anchors: Vec<Anchor>,
    navigation: bool,
    footer: bool,
    logo: bool,
}

impl Document {
    /// Extract facts from raw HTML
    pub fn parse(html: &str) -> Self {
        let visible = INVISIBLE.replace_all(html, " ");
        let body = BODY
            .captures(&visible)
            .and_then(|c| c.get(1))
            .map_or(visible.as_ref(), |m| m.as_str());

        let anchors = ANCHOR
            .captures_iter(&visible)
            .map(|c| {
                let attrs = c.get(1).map_or("", |m| m.as_str());
                let href = HREF
                    .captures(attrs)
                    .and_then(|h| h.get(1).or_else(|| h.get(2)).or_else(|| h.get(3)))
                    .map_or_else(String::new, |m| decode_entities(m.as_str()).to_lowercase());
                let text = c.get(2).map_or("", |m| m.as_str());
                Anchor {
                    href,
                    text: text_of(text).to_lowercase(),
                }
            })
            .collect();

        Self {
            text: text_of(body),
            markup: html.to_lowercase(),
            anchors,
            navigation: NAVIGATION.is_match(html),
            footer: FOOTER.is_match(html),
            logo: LOGO.is_match(html),
        }
    }

    /// Visible body text, whitespace collapsed, original case
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Every anchor in document order
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Case-insensitive search of the raw markup
    pub fn mentions(&self, needle: &str) -> bool {
        self.markup.contains(&needle.to_lowercase())
    }

    /// Page has a `<nav>` or a nav/menu class or id
    pub const fn has_navigation(&self) -> bool {
        self.navigation
    }

    /// Page has a `<footer>` or footer class
    pub const fn has_footer(&self) -> bool {
        self.footer
    }

    /// Page has a logo image or logo class or id
    pub const fn has_logo(&self) -> bool {
        self.logo
    }

    /// An email address or phone number appears in the text or a link
    pub fn has_contact_details(&self) -> bool {
        let in_links = self
            .anchors
            .iter()
            .any(|a| a.href.starts_with("mailto:") || a.href.starts_with("tel:"));
        in_links || EMAIL.is_match(&self.text) || PHONE.is_match(&self.text)
    }
}

fn text_of(fragment: &str) -> String {
    let stripped = TAG.replace_all(fragment, " ");
    let decoded = decode_entities(&stripped);
    SPACE.replace_all(&decoded, " ").trim().to_string()
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html><head><title>Shop</title>
<style>.logo { color: red }</style>
<script>var hidden = "CLAIM YOUR PRIZE";</script>
</head>
<body>
  <header><img src="/l.png" alt="Acme logo"></header>
  <nav><a href="/about">About us</a> <a href='/Privacy-Policy'>Privacy</a></nav>
  <p>Welcome to Acme &amp; Sons. Call 555-123-4567.</p>
  <!-- <p>commented out</p> -->
  <footer><a href="mailto:hello@acme.test">Email</a></footer>
</body></html>"#;

    #[test]
    fn extracts_visible_text_only() {
        let doc = Document::parse(PAGE);
        assert!(doc.text().contains("Welcome to Acme & Sons."));
        assert!(!doc.text().contains("CLAIM"));
        assert!(!doc.text().contains("commented"));
        assert!(!doc.text().contains("Shop"));
    }

    #[test]
    fn collects_anchors_lowercased() {
        let doc = Document::parse(PAGE);
        let hrefs: Vec<_> = doc.anchors().iter().map(|a| a.href.as_str()).collect();
        assert_eq!(hrefs, ["/about", "/privacy-policy", "mailto:hello@acme.test"]);
        assert_eq!(doc.anchors()[0].text, "about us");
    }

    #[test]
    fn structural_markers() {
        let doc = Document::parse(PAGE);
        assert!(doc.has_logo());
        assert!(doc.has_navigation());
        assert!(doc.has_footer());

        let bare = Document::parse("<html><body><p>hello</p></body></html>");
        assert!(!bare.has_logo());
        assert!(!bare.has_navigation());
        assert!(!bare.has_footer());
    }

    #[test]
    fn class_based_markers() {
        let doc = Document::parse(
            r#"<div id="logo"></div><ul class="main menu"></ul><div class="site footer"></div>"#,
        );
        assert!(doc.has_logo());
        assert!(doc.has_navigation());
        assert!(doc.has_footer());
    }

    #[test]
    fn contact_details() {
        assert!(Document::parse(PAGE).has_contact_details());
        assert!(Document::parse("<p>write to support@shop.test</p>").has_contact_details());
        assert!(!Document::parse("<p>nothing here</p>").has_contact_details());
    }

    #[test]
    fn mentions_is_case_insensitive() {
        let doc = Document::parse(r#"<a href="https://Twitter.com/acme">t</a>"#);
        assert!(doc.mentions("twitter.com"));
        assert!(!doc.mentions("linkedin.com"));
    }

    #[test]
    fn fragment_without_body_uses_whole_document() {
        let doc = Document::parse("<p>Just   text</p>");
        assert_eq!(doc.text(), "Just text");
    }
}
