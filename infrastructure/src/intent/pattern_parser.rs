//! Keyword and pattern based intent parser.
//!
//! Deliberately trivial: keyword objective detection, a percent regex
//! for the target, fixed constraint phrases. Any replacement producing
//! the same `ParsedIntent` shape (including a model-backed one) slots in
//! behind the same port.

use consilium_application::ports::intent_parser::{IntentParser, ParseError};
use consilium_domain::{Objective, ParsedIntent};
use regex::Regex;

const DEFAULT_RETENTION_TARGET: f64 = 0.08;

/// Pattern-matching intent parser over a fixed worker roster.
pub struct PatternIntentParser {
    percent: Regex,
    workers: Vec<String>,
}

impl Default for PatternIntentParser {
    fn default() -> Self {
        Self::new(
            ["sales", "marketing", "finance", "operations", "support", "hiring"]
                .map(String::from)
                .to_vec(),
        )
    }
}

impl PatternIntentParser {
    pub fn new(workers: Vec<String>) -> Self {
        Self {
            percent: Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("valid percent pattern"),
            workers,
        }
    }

    fn extract_percent(&self, text: &str) -> Option<f64> {
        self.percent
            .captures(text)
            .and_then(|caps| caps[1].parse::<f64>().ok())
            .map(|value| value / 100.0)
    }

    fn extract_constraint(lower: &str) -> String {
        if lower.contains("without increasing cac") || lower.contains("no cac increase") {
            "No CAC increase allowed".to_string()
        } else if lower.contains("within budget") || lower.contains("within existing budget") {
            "Within existing budget".to_string()
        } else {
            "None specified".to_string()
        }
    }
}

impl IntentParser for PatternIntentParser {
    fn parse(&self, directive: &str) -> Result<ParsedIntent, ParseError> {
        let text = directive.trim();
        if text.is_empty() {
            return Err(ParseError::EmptyDirective);
        }

        let lower = text.to_lowercase();
        let constraint = Self::extract_constraint(&lower);

        if lower.contains("retention") {
            return Ok(ParsedIntent {
                original_text: text.to_string(),
                primary_objective: Objective::ImproveRetention,
                target_metric: "retention_rate".to_string(),
                target_value: self
                    .extract_percent(text)
                    .unwrap_or(DEFAULT_RETENTION_TARGET),
                constraint,
                affected_workers: self.workers.clone(),
            });
        }

        // General directives go to the workers named in the text, or to
        // everyone when none are.
        let mentioned: Vec<String> = self
            .workers
            .iter()
            .filter(|w| lower.contains(w.as_str()))
            .cloned()
            .collect();
        let affected = if mentioned.is_empty() {
            self.workers.clone()
        } else {
            mentioned
        };

        let mut intent = ParsedIntent::general(text, affected);
        intent.constraint = constraint;
        Ok(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retention_directive_parsed() {
        let parser = PatternIntentParser::default();
        let intent = parser
            .parse("Improve quarterly retention by 8% without increasing CAC")
            .unwrap();

        assert_eq!(intent.primary_objective, Objective::ImproveRetention);
        assert_eq!(intent.target_metric, "retention_rate");
        assert!((intent.target_value - 0.08).abs() < 1e-9);
        assert_eq!(intent.constraint, "No CAC increase allowed");
        assert_eq!(intent.affected_workers.len(), 6);
    }

    #[test]
    fn test_retention_without_percent_uses_default() {
        let parser = PatternIntentParser::default();
        let intent = parser.parse("Improve customer retention this quarter").unwrap();
        assert!((intent.target_value - DEFAULT_RETENTION_TARGET).abs() < 1e-9);
        assert_eq!(intent.constraint, "None specified");
    }

    #[test]
    fn test_budget_constraint_phrase() {
        let parser = PatternIntentParser::default();
        let intent = parser
            .parse("Improve retention by 5% within existing budget")
            .unwrap();
        assert_eq!(intent.constraint, "Within existing budget");
        assert!((intent.target_value - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_general_directive_routes_to_mentioned_workers() {
        let parser = PatternIntentParser::default();
        let intent = parser
            .parse("Review vendor spending with finance and operations")
            .unwrap();
        assert_eq!(intent.primary_objective, Objective::General);
        assert_eq!(intent.affected_workers, vec!["finance", "operations"]);
    }

    #[test]
    fn test_general_directive_defaults_to_all_workers() {
        let parser = PatternIntentParser::default();
        let intent = parser.parse("Prepare the quarterly business review").unwrap();
        assert_eq!(intent.affected_workers.len(), 6);
    }

    #[test]
    fn test_empty_directive_rejected() {
        let parser = PatternIntentParser::default();
        assert!(matches!(parser.parse("   "), Err(ParseError::EmptyDirective)));
    }
}
