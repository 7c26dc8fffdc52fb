use tracing::{debug, warn};

use super::rules::{self, FieldError, Rule, TotalAmount};
use crate::receipt::Receipt;

/// Result of evaluating one rule.
///
/// `evaluated` is false when a field the rule needs could not be parsed; the
/// rule then contributes zero points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub rule: Rule,
    pub points: u64,
    pub evaluated: bool,
    pub description: String, // e.g. "6 letters and digits", "item 2: 18 bytes"
}

impl RuleOutcome {
    fn scored(rule: Rule, points: u64, description: String) -> Self {
        Self {
            rule,
            points,
            evaluated: true,
            description,
        }
    }

    fn skipped(rule: Rule, error: &FieldError) -> Self {
        Self {
            rule,
            points: 0,
            evaluated: false,
            description: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub outcomes: Vec<RuleOutcome>,
}

impl ScoreBreakdown {
    /// Total points contributed by one rule (description length has one
    /// outcome per item)
    pub fn points_for(&self, rule: Rule) -> u64 {
        self.outcomes
            .iter()
            .filter(|o| o.rule == rule)
            .fold(0u64, |total, o| total.saturating_add(o.points))
    }

    /// True if any rule was skipped because of a malformed field
    pub fn has_skipped(&self) -> bool {
        self.outcomes.iter().any(|o| !o.evaluated)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    pub points: u64,
    pub breakdown: ScoreBreakdown,
}

/// Score a receipt.
///
/// Never fails. A malformed total zeroes the round-dollar and quarter rules, a
/// malformed price zeroes that item's description rule, and a malformed
/// purchase date or time zeroes the odd-day and afternoon rules.
pub fn calculate_points(receipt: &Receipt) -> ScoreResult {
    let mut outcomes = Vec::new();
    let mut score: u64 = 0;

    let mut record = |outcome: RuleOutcome| {
        score = score.saturating_add(outcome.points);
        debug!(
            rule = outcome.rule.label(),
            points = outcome.points,
            score,
            "{}",
            outcome.description
        );
        outcomes.push(outcome);
    };

    // Retailer name
    let letters_and_digits = rules::retailer_points(&receipt.retailer);
    record(RuleOutcome::scored(
        Rule::RetailerName,
        letters_and_digits,
        format!("{} letters and digits", letters_and_digits),
    ));

    // Round dollar and quarter multiple share the parsed total
    match TotalAmount::parse(&receipt.total) {
        Ok(total) => {
            record(RuleOutcome::scored(
                Rule::RoundDollar,
                rules::round_dollar_points(&total),
                format!("total {}", receipt.total),
            ));
            record(RuleOutcome::scored(
                Rule::QuarterMultiple,
                rules::quarter_multiple_points(&total),
                format!("total {}", receipt.total),
            ));
        }
        Err(e) => {
            warn!("Skipping total rules: {}", e);
            record(RuleOutcome::skipped(Rule::RoundDollar, &e));
            record(RuleOutcome::skipped(Rule::QuarterMultiple, &e));
        }
    }

    // Item pairs
    let item_count = receipt.item_count();
    record(RuleOutcome::scored(
        Rule::ItemPairs,
        rules::item_pair_points(item_count),
        format!("{} items", item_count),
    ));

    // Description length, one outcome per item
    for (i, item) in receipt.items.iter().enumerate() {
        match rules::description_points(item) {
            Ok(points) => record(RuleOutcome::scored(
                Rule::DescriptionLength,
                points,
                format!(
                    "item {}: '{}' ({} bytes trimmed)",
                    i,
                    item.short_description.trim(),
                    item.short_description.trim().len()
                ),
            )),
            Err(e) => {
                warn!(item = i, "Skipping description rule: {}", e);
                record(RuleOutcome::skipped(Rule::DescriptionLength, &e));
            }
        }
    }

    // Odd day and afternoon window share the parsed timestamp
    match rules::parse_purchased_at(&receipt.purchased_at()) {
        Ok(purchased_at) => {
            record(RuleOutcome::scored(
                Rule::OddDay,
                rules::odd_day_points(&purchased_at),
                format!("purchased {}", purchased_at.date()),
            ));
            record(RuleOutcome::scored(
                Rule::AfternoonWindow,
                rules::afternoon_points(&purchased_at),
                format!("purchased at {}", purchased_at.time()),
            ));
        }
        Err(e) => {
            warn!("Skipping purchase time rules: {}", e);
            record(RuleOutcome::skipped(Rule::OddDay, &e));
            record(RuleOutcome::skipped(Rule::AfternoonWindow, &e));
        }
    }

    ScoreResult {
        points: score,
        breakdown: ScoreBreakdown { outcomes },
    }
}
