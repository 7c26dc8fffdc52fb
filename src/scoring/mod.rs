pub mod engine;
pub mod rules;

pub use engine::{calculate_points, RuleOutcome, ScoreBreakdown, ScoreResult};
pub use rules::{FieldError, Rule, TotalAmount};
