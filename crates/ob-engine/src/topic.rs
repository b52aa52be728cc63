//! Keyword-based topic extraction.

use ob_core::Deck;

/// Topic used when no domain keyword matches.
pub const DEFAULT_TOPIC: &str = "geral";

/// How many topics [`TopicExtractor::extract`] returns at most.
pub const MAX_TOPICS: usize = 2;

/// Maps each domain of the deck to its keywords: the triggers of every
/// symbol carrying the domain, plus the domain name itself.
#[derive(Debug, Clone)]
pub struct TopicExtractor {
    domains: Vec<(String, Vec<String>)>,
}

impl TopicExtractor {
    /// Build the keyword map from a deck, domains in first-seen order.
    pub fn new(deck: &Deck) -> Self {
        let mut domains: Vec<(String, Vec<String>)> = Vec::new();
        for symbol in deck.symbols() {
            for domain in &symbol.domains {
                let index = match domains.iter().position(|(d, _)| d == domain) {
                    Some(i) => i,
                    None => {
                        domains.push((domain.clone(), Vec::new()));
                        domains.len() - 1
                    }
                };
                let keywords = &mut domains[index].1;
                keywords.extend(symbol.triggers.iter().map(|t| t.to_lowercase()));
                keywords.push(domain.to_lowercase());
            }
        }
        Self { domains }
    }

    /// Up to two domains with the most keyword hits, best first. Ties keep
    /// first-seen order.
    pub fn extract(&self, question: &str) -> Vec<(&str, usize)> {
        let lower = question.to_lowercase();
        let mut scored: Vec<(&str, usize)> = self
            .domains
            .iter()
            .map(|(domain, keywords)| {
                let hits = keywords.iter().filter(|k| lower.contains(k.as_str())).count();
                (domain.as_str(), hits)
            })
            .filter(|(_, hits)| *hits > 0)
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(MAX_TOPICS);
        scored
    }

    /// The best topic, or [`DEFAULT_TOPIC`].
    pub fn primary(&self, question: &str) -> String {
        self.extract(question)
            .first()
            .map_or_else(|| DEFAULT_TOPIC.to_string(), |(d, _)| d.to_string())
    }
}
