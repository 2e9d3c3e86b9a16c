// src/pipeline/resolve.rs

//! Section-targeted PDF link resolution.
//!
//! Locates the menu PDF for one section among the many links on a loosely
//! structured page. Three ordered tiers, first non-empty wins:
//!
//! 1. Heading-scoped: anchors under the parent of the first heading that
//!    matches the section label.
//! 2. Keyword-anywhere: any anchor whose URL carries the primary keyword
//!    and not the exclusion token.
//! 3. Broad fallback: any anchor matching one of the fallback keywords.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::MenuSection;
use crate::utils::absolutize;

/// A PDF anchor found during one resolution pass.
#[derive(Debug, Clone)]
pub struct CandidateLink {
    /// Raw href as found in the markup
    pub href: String,
    /// Anchor text
    pub anchor_text: String,
    /// Text of the heading the anchor was scoped under, if any
    pub heading: Option<String>,
}

/// Resolves the download URL for one section's menu PDF.
pub struct SectionLinkResolver<'a> {
    section: &'a MenuSection,
    base_url: &'a str,
    heading_selector: Selector,
    anchor_selector: Selector,
}

impl<'a> SectionLinkResolver<'a> {
    /// Create a resolver for the given section and site origin.
    pub fn new(section: &'a MenuSection, base_url: &'a str) -> Result<Self> {
        Ok(Self {
            section,
            base_url,
            heading_selector: parse_selector("h2, h3, h4")?,
            anchor_selector: parse_selector("a[href]")?,
        })
    }

    /// Resolve the menu URL from raw markup.
    ///
    /// Returns `None` when no tier matches; that is an expected outcome,
    /// not an error.
    pub fn resolve(&self, markup: &str) -> Option<String> {
        let document = Html::parse_document(markup);
        let href = self
            .heading_scoped(&document)
            .or_else(|| self.keyword_anywhere(&document))
            .or_else(|| self.broad_fallback(&document))?;
        Some(absolutize(self.base_url, &href))
    }

    /// Tier 1: search only within the parent container of the first
    /// heading whose text contains every section term.
    ///
    /// Scanning stops at that heading even when it yields no link; later
    /// headings are never considered and resolution falls through to the
    /// document-wide tiers.
    fn heading_scoped(&self, document: &Html) -> Option<String> {
        let heading = document.select(&self.heading_selector).find(|el| {
            let text: String = el.text().collect();
            self.section
                .heading_terms
                .iter()
                .all(|term| text.contains(term.as_str()))
        })?;

        let parent = heading.parent().and_then(ElementRef::wrap)?;
        let heading_text: String = heading.text().collect();
        let candidates = self.pdf_candidates(parent, Some(heading_text));

        self.pick_primary(&candidates)
            .or_else(|| {
                // No candidate clears the exclusion token; accept any
                // carrying the primary keyword.
                candidates
                    .iter()
                    .find(|c| self.has_primary_keyword(&c.href))
                    .map(|c| c.href.clone())
            })
    }

    /// Tier 2: first document-order PDF anchor carrying the primary
    /// keyword and not the exclusion token.
    fn keyword_anywhere(&self, document: &Html) -> Option<String> {
        let root = document.root_element();
        let candidates = self.pdf_candidates(root, None);
        self.pick_primary(&candidates)
    }

    /// Tier 3: first PDF anchor matching any fallback keyword and not the
    /// fallback exclusion.
    fn broad_fallback(&self, document: &Html) -> Option<String> {
        let root = document.root_element();
        self.pdf_candidates(root, None)
            .into_iter()
            .find(|c| {
                let lower = c.href.to_lowercase();
                self.section
                    .fallback_keywords
                    .iter()
                    .any(|kw| lower.contains(kw.as_str()))
                    && !lower.contains(self.section.fallback_exclusion.as_str())
            })
            .map(|c| c.href)
    }

    /// Collect all `.pdf` anchors under the given scope, in document order.
    fn pdf_candidates(&self, scope: ElementRef<'_>, heading: Option<String>) -> Vec<CandidateLink> {
        scope
            .select(&self.anchor_selector)
            .filter_map(|el| {
                let href = el.value().attr("href")?;
                if !href.to_lowercase().ends_with(".pdf") {
                    return None;
                }
                Some(CandidateLink {
                    href: href.to_string(),
                    anchor_text: el.text().collect::<String>().trim().to_string(),
                    heading: heading.clone(),
                })
            })
            .collect()
    }

    /// First candidate carrying the primary keyword without the exclusion
    /// token.
    fn pick_primary(&self, candidates: &[CandidateLink]) -> Option<String> {
        candidates
            .iter()
            .find(|c| self.has_primary_keyword(&c.href) && !self.has_exclusion_token(&c.href))
            .map(|c| {
                log::debug!(
                    "Candidate '{}' ({}) accepted",
                    c.anchor_text,
                    c.href
                );
                c.href.clone()
            })
    }

    fn has_primary_keyword(&self, href: &str) -> bool {
        href.to_lowercase()
            .contains(self.section.primary_keyword.as_str())
    }

    fn has_exclusion_token(&self, href: &str) -> bool {
        href.to_uppercase()
            .contains(self.section.exclusion_token.as_str())
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
