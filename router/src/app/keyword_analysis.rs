//! Keyword diagnostics
//!
//! Cheap substring heuristics for debugging misclassifications. Never feeds
//! the decision engine.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::entities::Category;

const BUG_KEYWORDS: &[&str] = &[
    "not working",
    "broken",
    "error",
    "bug",
    "issue",
    "problem",
    "failed",
    "failure",
    "crash",
];

const QUESTION_KEYWORDS: &[&str] = &[
    "how do i",
    "how to",
    "can you help",
    "where is",
    "where can i",
    "help me",
    "guide",
    "tutorial",
];

const FEATURE_KEYWORDS: &[&str] = &[
    "add",
    "enhancement",
    "improvement",
    "feature request",
    "would like",
    "suggestion",
    "could you",
];

const SECURITY_KEYWORDS: &[&str] = &[
    "security",
    "vulnerability",
    "breach",
    "unauthorized",
    "suspicious",
    "hack",
];

const BILLING_KEYWORDS: &[&str] = &[
    "payment",
    "billing",
    "invoice",
    "charge",
    "subscription",
    "refund",
    "pricing",
];

/// Urgency indicators, highest level first
const URGENCY_KEYWORDS: &[(u8, &[&str])] = &[
    (
        5,
        &[
            "production down",
            "system down",
            "critical",
            "emergency",
            "urgent",
            "immediately",
        ],
    ),
    (4, &["high priority", "important", "asap", "urgent", "major issue"]),
    (3, &["issue", "problem", "not working"]),
    (2, &["minor", "small issue", "cosmetic"]),
    (1, &["question", "help", "guidance"]),
];

/// Scoring order; ties go to the earlier entry
const SCORING_ORDER: [Category; 5] = [
    Category::Bug,
    Category::GeneralQuestion,
    Category::FeatureRequest,
    Category::SecurityConcern,
    Category::BillingInquiry,
];

fn keywords_for(category: Category) -> &'static [&'static str] {
    match category {
        Category::Bug => BUG_KEYWORDS,
        Category::GeneralQuestion => QUESTION_KEYWORDS,
        Category::FeatureRequest => FEATURE_KEYWORDS,
        Category::SecurityConcern => SECURITY_KEYWORDS,
        Category::BillingInquiry => BILLING_KEYWORDS,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub category: Category,
    pub matches: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordAnalysis {
    /// One entry per category, in `SCORING_ORDER`
    pub category_scores: Vec<CategoryScore>,
    /// Urgency level -> number of indicator hits
    pub urgency_indicators: BTreeMap<u8, usize>,
    pub suggested_category: Category,
    pub category_confidence: usize,
    pub text_length: usize,
    pub word_count: usize,
}

/// Count keyword hits in a ticket's subject and message
pub fn analyze_keywords(subject: &str, message: &str) -> KeywordAnalysis {
    let text = format!("{} {}", subject, message).to_lowercase();
    let hits = |keywords: &[&str]| keywords.iter().filter(|kw| text.contains(**kw)).count();

    let category_scores: Vec<CategoryScore> = SCORING_ORDER
        .into_iter()
        .map(|category| CategoryScore {
            category,
            matches: hits(keywords_for(category)),
        })
        .collect();

    let urgency_indicators: BTreeMap<u8, usize> = URGENCY_KEYWORDS
        .iter()
        .map(|&(level, keywords)| (level, hits(keywords)))
        .collect();

    // Strict comparison keeps the earliest category on ties
    let mut best = &category_scores[0];
    for score in &category_scores[1..] {
        if score.matches > best.matches {
            best = score;
        }
    }
    let suggested_category = best.category;
    let category_confidence = best.matches;

    KeywordAnalysis {
        suggested_category,
        category_confidence,
        text_length: text.chars().count(),
        word_count: text.split_whitespace().count(),
        category_scores,
        urgency_indicators,
    }
}
