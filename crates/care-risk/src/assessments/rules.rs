use std::collections::BTreeSet;

use super::category::RiskCategory;
use super::error::EvaluationError;

/// Predicate over a raw input record paired with the factor it reports.
pub struct FactorRule<I> {
    description: &'static str,
    applies: fn(&I) -> bool,
}

impl<I> FactorRule<I> {
    pub const fn new(description: &'static str, applies: fn(&I) -> bool) -> Self {
        Self {
            description,
            applies,
        }
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn applies(&self, input: &I) -> bool {
        (self.applies)(input)
    }
}

/// Ordered, independent factor rules, most clinically significant first.
pub struct RuleTable<I> {
    rules: Vec<FactorRule<I>>,
}

impl<I> RuleTable<I> {
    pub fn new(rules: Vec<FactorRule<I>>) -> Result<Self, EvaluationError> {
        if rules.is_empty() {
            return Err(EvaluationError::Configuration(
                "factor rule table is empty".to_string(),
            ));
        }

        let mut seen = BTreeSet::new();
        for rule in &rules {
            if rule.description.trim().is_empty() {
                return Err(EvaluationError::Configuration(
                    "factor rule has an empty description".to_string(),
                ));
            }
            if !seen.insert(rule.description) {
                return Err(EvaluationError::Configuration(format!(
                    "factor rule '{}' is declared twice",
                    rule.description
                )));
            }
        }

        Ok(Self { rules })
    }

    /// Every factor whose predicate holds, in table order. An empty list is a valid outcome.
    pub fn explain(&self, input: &I) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| rule.applies(input))
            .map(|rule| rule.description.to_string())
            .collect()
    }

    pub fn descriptions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.description)
    }
}

/// Additional recommendation appended when any factor contains `factor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorTrigger {
    pub factor: &'static str,
    pub recommendation: &'static str,
}

impl FactorTrigger {
    pub const fn new(factor: &'static str, recommendation: &'static str) -> Self {
        Self {
            factor,
            recommendation,
        }
    }
}

/// Base recommendations per category plus factor-triggered additions.
pub struct RecommendationTable<C> {
    base: fn(C) -> &'static [&'static str],
    triggers: Vec<FactorTrigger>,
}

impl<C: RiskCategory> RecommendationTable<C> {
    pub fn new(
        base: fn(C) -> &'static [&'static str],
        triggers: Vec<FactorTrigger>,
    ) -> Result<Self, EvaluationError> {
        for category in C::ORDERED {
            if base(*category).is_empty() {
                return Err(EvaluationError::Configuration(format!(
                    "no base recommendations for {}",
                    category.label()
                )));
            }
        }
        if let Some(trigger) = triggers
            .iter()
            .find(|trigger| trigger.factor.is_empty() || trigger.recommendation.is_empty())
        {
            return Err(EvaluationError::Configuration(format!(
                "recommendation trigger {trigger:?} is incomplete"
            )));
        }

        Ok(Self { base, triggers })
    }

    /// Every trigger must be reachable from some factor the rule table can emit.
    pub fn check_triggers<I>(&self, rules: &RuleTable<I>) -> Result<(), EvaluationError> {
        for trigger in &self.triggers {
            if !rules
                .descriptions()
                .any(|description| description.contains(trigger.factor))
            {
                return Err(EvaluationError::Configuration(format!(
                    "recommendation trigger '{}' matches no factor rule",
                    trigger.factor
                )));
            }
        }
        Ok(())
    }

    pub fn base(&self, category: C) -> &'static [&'static str] {
        (self.base)(category)
    }

    pub fn recommend(&self, category: C, factors: &[String]) -> Vec<String> {
        let mut recommendations: Vec<String> = self
            .base(category)
            .iter()
            .map(|text| text.to_string())
            .collect();

        for trigger in &self.triggers {
            let fired = factors
                .iter()
                .any(|factor| factor.contains(trigger.factor));
            if fired
                && !recommendations
                    .iter()
                    .any(|existing| existing == trigger.recommendation)
            {
                recommendations.push(trigger.recommendation.to_string());
            }
        }

        recommendations
    }
}
