use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use tracing::instrument;
use trustcheck_core::{
    ContentFindings, GrammarQuality, ProbeId, ProbeResult, ProbeStatus, ScoreCard, Target,
};
use trustcheck_recon::{Document, PageFetcher};

use super::Probe;
use crate::error::ProbeError;

const URGENCY_PHRASES: [&str; 13] = [
    "act now",
    "limited time",
    "hurry",
    "expires soon",
    "last chance",
    "don't miss",
    "urgent",
    "immediately",
    "quick",
    "instant",
    "today only",
    "while supplies last",
    "ending soon",
];

const FAKE_OFFER_PHRASES: [&str; 9] = [
    "congratulations you've won",
    "you are the lucky visitor",
    "claim your prize",
    "you've been selected",
    "free iphone",
    "free gift card",
    "click here to claim",
    "100% free",
    "risk free",
];

static SHOUTED_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[!?]{3,}").expect("valid regex"));

/// Pressure tactics, bait offers, shouting and missing site structure
pub struct ContentProbe {
    fetcher: Arc<dyn PageFetcher>,
}

impl ContentProbe {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Probe for ContentProbe {
    type Findings = ContentFindings;

    fn id(&self) -> ProbeId {
        ProbeId::ContentSignals
    }

    #[instrument(skip_all, fields(domain = %target.host()))]
    async fn observe(&self, target: &Target) -> Result<ProbeResult<ContentFindings>, ProbeError> {
        let page = self.fetcher.fetch(target.canonical_url()).await?;
        Ok(score_content(&Document::parse(&page.body)))
    }

    fn fallback(&self) -> ProbeResult<ContentFindings> {
        ProbeResult::degraded(70, ProbeStatus::Warning, ContentFindings::default())
    }
}

fn score_content(doc: &Document) -> ProbeResult<ContentFindings> {
    let mut card = ScoreCard::new(100);
    let text = doc.text();
    let lowered = text.to_lowercase().replace('\u{2019}', "'");

    let urgency = URGENCY_PHRASES.iter().any(|p| lowered.contains(p));
    card.adjust_if(urgency, -20);

    let fake_offers = FAKE_OFFER_PHRASES.iter().any(|p| lowered.contains(p));
    card.adjust_if(fake_offers, -30);

    let caps = caps_ratio(text);
    let grammar = if caps > 0.3 || SHOUTED_PUNCTUATION.is_match(text) {
        card.adjust(-25);
        GrammarQuality::Poor
    } else if caps > 0.15 {
        card.adjust(-10);
        GrammarQuality::Fair
    } else {
        GrammarQuality::Good
    };

    let professional = doc.has_logo() && doc.has_navigation() && doc.has_footer();
    card.adjust_if(!professional, -15);

    let findings = ContentFindings {
        urgency_language: Some(urgency),
        fake_offers: Some(fake_offers),
        grammar_quality: Some(grammar),
        caps_ratio: Some((caps * 1000.0).round() / 1000.0),
        has_logo: Some(doc.has_logo()),
        has_navigation: Some(doc.has_navigation()),
        has_footer: Some(doc.has_footer()),
        professional_design: Some(professional),
    };
    ProbeResult::observed(card.finish(), findings)
}

/// Share of alphabetic characters that are uppercase
fn caps_ratio(text: &str) -> f64 {
    let (upper, letters) = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0_usize, 0_usize), |(upper, letters), c| {
            (upper + usize::from(c.is_uppercase()), letters + 1)
        });

    if letters == 0 {
        0.0
    } else {
        upper as f64 / letters as f64
    }
}
