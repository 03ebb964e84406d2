use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use trustcheck_core::{ProbeId, ProbeResult, ProbeStatus, ScoreCard, Target, TransparencyFindings};
use trustcheck_recon::{Anchor, Document, PageFetcher};

use super::Probe;
use crate::error::ProbeError;

const SOCIAL_NETWORKS: [&str; 5] = [
    "facebook.com",
    "twitter.com",
    "linkedin.com",
    "instagram.com",
    "youtube.com",
];

/// Policies, contact details and outbound social profiles
pub struct TransparencyProbe {
    fetcher: Arc<dyn PageFetcher>,
}

impl TransparencyProbe {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Probe for TransparencyProbe {
    type Findings = TransparencyFindings;

    fn id(&self) -> ProbeId {
        ProbeId::Transparency
    }

    #[instrument(skip_all, fields(domain = %target.host()))]
    async fn observe(
        &self,
        target: &Target,
    ) -> Result<ProbeResult<TransparencyFindings>, ProbeError> {
        let page = self.fetcher.fetch(target.canonical_url()).await?;
        Ok(score_transparency(&Document::parse(&page.body)))
    }

    fn fallback(&self) -> ProbeResult<TransparencyFindings> {
        ProbeResult::degraded(50, ProbeStatus::Warning, TransparencyFindings::default())
    }
}

fn score_transparency(doc: &Document) -> ProbeResult<TransparencyFindings> {
    let links = |href: &str, text: &str| {
        doc.anchors()
            .iter()
            .any(|Anchor { href: h, text: t }| h.contains(href) || t.contains(text))
    };

    let privacy_policy = links("privacy", "privacy policy");
    let terms_of_service = links("terms", "terms of service");
    let about_page = links("about", "about us");
    let contact_info = links("contact", "contact us") || doc.has_contact_details();
    let social_media_links = SOCIAL_NETWORKS.iter().any(|s| doc.mentions(s));

    let mut card = ScoreCard::new(100);
    card.adjust_if(!privacy_policy, -25);
    card.adjust_if(!terms_of_service, -20);
    card.adjust_if(!contact_info, -25);
    card.adjust_if(!about_page, -15);
    card.adjust_if(!social_media_links, -15);

    let findings = TransparencyFindings {
        privacy_policy: Some(privacy_policy),
        terms_of_service: Some(terms_of_service),
        about_page: Some(about_page),
        contact_info: Some(contact_info),
        social_media_links: Some(social_media_links),
    };
    ProbeResult::observed(card.finish(), findings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_transparent_site() {
        let doc = Document::parse(
            r#"<footer>
                <a href="/privacy">Privacy</a>
                <a href="/legal/terms">Terms</a>
                <a href="/company">About us</a>
                <a href="/help">Contact us</a>
                <a href="https://www.linkedin.com/company/acme">LinkedIn</a>
            </footer>"#,
        );
        let result = score_transparency(&doc);
        assert_eq!(result.score(), 100);
        assert_eq!(result.findings().about_page, Some(true));
    }

    #[test]
    fn bare_page_scores_zero() {
        let result = score_transparency(&Document::parse("<p>Buy now</p>"));
        assert_eq!(result.score(), 0);
        assert_eq!(result.status(), ProbeStatus::Fail);
        assert_eq!(result.findings().privacy_policy, Some(false));
        assert_eq!(result.findings().contact_info, Some(false));
    }

    #[test]
    fn contact_falls_back_to_inline_email() {
        let doc = Document::parse(
            r#"<a href="/privacy-policy">Privacy</a><p>Questions? orders@shop.test</p>"#,
        );
        let result = score_transparency(&doc);
        assert_eq!(result.findings().contact_info, Some(true));
        assert_eq!(result.score(), 50);
    }
}
