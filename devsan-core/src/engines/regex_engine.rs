// devsan-core/src/engines/regex_engine.rs
//! A `SanitizationEngine` that applies an ordered list of regex rules,
//! each one validated, compiled and run through the bounded replacer.
//! License: MIT OR APACHE 2.0

use log::{debug, warn};

use crate::config::{Rule, RuleSet, SafetyLimits};
use crate::engine::{RuleReport, RuleStatus, SanitizationEngine, SanitizationResult};
use crate::sanitizers::{compiler, replacer};

#[derive(Debug, Clone, Default)]
pub struct RegexEngine {
    rules: Vec<Rule>,
    limits: SafetyLimits,
}

impl RegexEngine {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self::with_limits(rules, SafetyLimits::default())
    }

    pub fn with_limits(rules: Vec<Rule>, limits: SafetyLimits) -> Self {
        Self { rules, limits }
    }

    pub fn from_rule_set(set: RuleSet) -> Self {
        Self::with_limits(set.rules, set.limits)
    }

    /// Runs one rule against `working`. Returns the new working string on
    /// success; on failure `working` is left as it was.
    fn apply_rule(&self, rule: &Rule, working: &str, warnings: &mut Vec<String>) -> (Option<String>, RuleStatus) {
        if rule.is_inert() {
            debug!("Rule{} is inert, skipping.", rule.label_clause());
            return (None, RuleStatus::Inert);
        }

        let matcher = match compiler::compile(&rule.pattern) {
            Ok(matcher) => matcher,
            Err(error) => {
                let warning = format!(
                    "Skipped invalid or unsafe pattern{}: {}",
                    rule.label_clause(),
                    rule.pattern
                );
                warn!("{} ({})", warning, error);
                warnings.push(warning);
                return (None, RuleStatus::Skipped { error });
            }
        };

        match replacer::apply_with_limits(working, &matcher, &rule.replacement, &self.limits) {
            Ok(replaced) => {
                debug!(
                    "Rule{} converged after {} pass(es), {} replacement(s).",
                    rule.label_clause(),
                    replaced.passes,
                    replaced.replacements
                );
                let status = RuleStatus::Applied {
                    passes: replaced.passes,
                    replacements: replaced.replacements,
                };
                (Some(replaced.output), status)
            }
            Err(error) => {
                let warning = format!(
                    "Failed to apply pattern{}: {}",
                    rule.label_clause(),
                    rule.pattern
                );
                warn!("{} ({})", warning, error);
                warnings.push(warning);
                (None, RuleStatus::Failed { error })
            }
        }
    }
}

impl SanitizationEngine for RegexEngine {
    fn sanitize(&self, content: &str) -> SanitizationResult {
        let mut working = content.to_string();
        let mut warnings = Vec::new();
        let mut reports = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let (next, status) = self.apply_rule(rule, &working, &mut warnings);
            if let Some(next) = next {
                working = next;
            }
            reports.push(RuleReport {
                rule_type: rule.rule_type.clone(),
                pattern: rule.pattern.clone(),
                status,
            });
        }

        if !warnings.is_empty() {
            warn!("Sanitization completed with {} warning(s).", warnings.len());
        }

        SanitizationResult { output: working, warnings, reports }
    }

    fn rules(&self) -> &[Rule] {
        &self.rules
    }

    fn limits(&self) -> &SafetyLimits {
        &self.limits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{CompileError, GuardTrip, ReplaceError};
    use crate::validators::DangerousShape;

    #[test]
    fn test_reports_follow_rule_order() {
        let engine = RegexEngine::new(vec![
            Rule::new("inert", "", "[X]"),
            Rule::new("digits", r"\d", "#"),
            Rule::new("broken", "(", "[X]"),
        ]);
        let result = engine.sanitize("a1b22");

        assert_eq!(result.output, "a#b##");
        assert_eq!(result.reports.len(), 3);
        assert_eq!(result.reports[0].status, RuleStatus::Inert);
        assert_eq!(
            result.reports[1].status,
            RuleStatus::Applied { passes: 2, replacements: 3 }
        );
        assert!(matches!(
            result.reports[2].status,
            RuleStatus::Skipped { error: CompileError::InvalidSyntax { .. } }
        ));
        assert_eq!(result.total_replacements(), 3);
    }

    #[test]
    fn test_unsafe_pattern_report() {
        let engine = RegexEngine::new(vec![Rule::new("", "(.*){10,}", "[X]")]);
        let result = engine.sanitize("anything");
        assert_eq!(result.output, "anything");
        assert_eq!(result.warnings, vec!["Skipped invalid or unsafe pattern: (.*){10,}"]);
        assert_eq!(
            result.reports[0].status,
            RuleStatus::Skipped {
                error: CompileError::UnsafePattern {
                    pattern: "(.*){10,}".to_string(),
                    shape: DangerousShape::RepeatedWildcardGroup,
                }
            }
        );
    }

    #[test]
    fn test_failed_rule_keeps_previous_effects() {
        let limits = SafetyLimits { max_iterations: 10, ..SafetyLimits::default() };
        let engine = RegexEngine::with_limits(
            vec![
                Rule::new("email", r"\w+@\w+\.com", "[EMAIL]"),
                Rule::new("rotate", r"^(.)(.*)$", "$2$1"),
            ],
            limits,
        );
        let result = engine.sanitize("hi bob@corp.com");
        assert_eq!(result.output, "hi [EMAIL]");
        assert_eq!(result.warnings, vec![r"Failed to apply pattern (rotate): ^(.)(.*)$"]);
        assert_eq!(
            result.reports[1].status,
            RuleStatus::Failed {
                error: ReplaceError::ReDoSSuspected(GuardTrip::IterationLimit { passes: 10 })
            }
        );
    }

    #[test]
    fn test_result_serializes_to_json() {
        let engine = RegexEngine::new(vec![Rule::new("digits", r"\d+", "#"), Rule::new("", "(", "x")]);
        let result = engine.sanitize("a1");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["output"], "a#");
        assert_eq!(json["reports"][0]["type"], "digits");
        assert_eq!(json["reports"][0]["status"], "applied");
        assert_eq!(json["reports"][0]["replacements"], 1);
        assert_eq!(json["reports"][1]["status"], "skipped");
        assert!(json["reports"][1]["error"].as_str().unwrap().contains("not a valid regular expression"));
    }
}
