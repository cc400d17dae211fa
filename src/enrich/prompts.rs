//! Prompt assembly from templates compiled into the binary.
use crate::submission::Rating;

const REPLY_TEMPLATE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/prompts/reply.md"));
const SUMMARY_TEMPLATE: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/prompts/summary.md"));
const ACTIONS_TEMPLATE: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/prompts/actions.md"));

/// Renders the three enrichment prompts for a given kind of business.
#[derive(Debug, Clone)]
pub struct PromptBook {
    business: String,
}

impl PromptBook {
    pub fn new(business: impl Into<String>) -> Self {
        Self {
            business: business.into(),
        }
    }

    /// One short friendly paragraph to send back to the customer.
    pub fn reply(&self, rating: Rating, review: &str) -> String {
        self.render(REPLY_TEMPLATE, Some(rating), review)
    }

    /// One-sentence summary of the review.
    pub fn summary(&self, review: &str) -> String {
        self.render(SUMMARY_TEMPLATE, None, review)
    }

    /// Exactly three bullet-point recommendations for the owner.
    pub fn actions(&self, rating: Rating, review: &str) -> String {
        self.render(ACTIONS_TEMPLATE, Some(rating), review)
    }

    // The review is substituted last so placeholder-like text inside it is
    // left alone.
    fn render(&self, template: &str, rating: Option<Rating>, review: &str) -> String {
        let mut prompt = template.replace("{business}", &self.business);
        if let Some(rating) = rating {
            prompt = prompt.replace("{rating}", &rating.to_string());
        }
        prompt.replace("{review}", review).trim_end().to_string()
    }
}
