use super::eligibility::{categorical_exclusion, log_exclusion, profile_exclusion};
use super::{by_confidence_desc, AlgorithmKind, Attribution, Recommender, ScoredStrategy};
use crate::answers::AnswerSet;
use crate::catalog::{ids, StrategyCatalog};
use crate::domain::{MaturityStage, SizeClass};
use crate::profile::NgoProfile;
use std::fmt;

/// Local-currency budget above which major-gift channels are suggested.
pub const DEFAULT_MAJOR_GIFT_BUDGET: i64 = 10_000_000;

/// Attribution for strategies added only to reach the minimum list length.
pub const FILL_RULE: &str = "maturity_and_size_match";

const RULE_SCORE: u8 = 90;
const FILL_SCORE: u8 = 70;
const FILL_CONFIDENCE: f64 = 0.6;
const MIN_RESULTS: usize = 5;

/// Inputs a rule condition may inspect.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub answers: &'a AnswerSet,
    pub profile: &'a NgoProfile,
    pub major_gift_budget: i64,
}

/// Named condition mapping organization features to strategies.
#[derive(Clone, Copy)]
pub struct RecommendationRule {
    pub name: &'static str,
    pub description: &'static str,
    pub condition: fn(&RuleContext<'_>) -> bool,
    pub strategies: &'static [&'static str],
    pub confidence: f64,
}

impl fmt::Debug for RecommendationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecommendationRule")
            .field("name", &self.name)
            .field("strategies", &self.strategies)
            .field("confidence", &self.confidence)
            .finish_non_exhaustive()
    }
}

impl RecommendationRule {
    pub fn matches(&self, context: &RuleContext<'_>) -> bool {
        (self.condition)(context)
    }
}

fn startup_small(context: &RuleContext<'_>) -> bool {
    context.profile.maturity == MaturityStage::Startup && context.profile.size == SizeClass::Small
}

fn small_digital_ready(context: &RuleContext<'_>) -> bool {
    context.profile.size == SizeClass::Small && context.profile.digital_capacity >= 4
}

fn educational_registration(context: &RuleContext<'_>) -> bool {
    context.profile.is_educational()
}

fn established_csr_registered(context: &RuleContext<'_>) -> bool {
    context.profile.maturity == MaturityStage::Established && context.profile.has_compliance("csr1")
}

fn fcra_registered_mid_large(context: &RuleContext<'_>) -> bool {
    matches!(context.profile.size, SizeClass::Medium | SizeClass::Large)
        && context.profile.has_compliance("fcra")
}

fn high_budget(context: &RuleContext<'_>) -> bool {
    context.profile.budget > context.major_gift_budget
}

fn government_relations(context: &RuleContext<'_>) -> bool {
    context.answers.is_yes("ngoGovernmentRelations")
}

pub const STANDARD_RULES: [RecommendationRule; 7] = [
    RecommendationRule {
        name: "startup_small",
        description: "Young, small organizations start with low-cost digital channels",
        condition: startup_small,
        strategies: &[ids::P2P, ids::DIGITAL_FUNDRAISING, ids::CROWDFUNDING],
        confidence: 0.85,
    },
    RecommendationRule {
        name: "small_digital_ready",
        description: "Small organizations with strong digital capacity",
        condition: small_digital_ready,
        strategies: &[ids::DIGITAL_FUNDRAISING, ids::P2P, ids::CROWDFUNDING],
        confidence: 0.8,
    },
    RecommendationRule {
        name: "educational_registration",
        description: "Educational institutions can raise endowments and grants",
        condition: educational_registration,
        strategies: &[ids::ENDOWMENT_FUNDS, ids::GRANTS, ids::EVENT_BASED],
        confidence: 0.9,
    },
    RecommendationRule {
        name: "established_csr_registered",
        description: "Established organizations holding CSR-1 registration",
        condition: established_csr_registered,
        strategies: &[ids::CSR, ids::EMPLOYEE_GIVING, ids::HNI_GIVING],
        confidence: 0.85,
    },
    RecommendationRule {
        name: "fcra_registered_mid_large",
        description: "Medium or large organizations cleared for foreign contributions",
        condition: fcra_registered_mid_large,
        strategies: &[ids::FOREIGN_GRANTS, ids::FOREIGN_RFPS, ids::GRANTS],
        confidence: 0.9,
    },
    RecommendationRule {
        name: "high_budget",
        description: "Large budgets support major-gift and institutional channels",
        condition: high_budget,
        strategies: &[ids::HNI_GIVING, ids::GRANTS, ids::CSR],
        confidence: 0.8,
    },
    RecommendationRule {
        name: "government_relations",
        description: "Existing government relationships open public funding",
        condition: government_relations,
        strategies: &[ids::GOVERNMENT_GRANTS, ids::GRANTS],
        confidence: 0.75,
    },
];

/// Applies an ordered rule set, then tops up with generally suitable strategies.
pub struct RuleRecommender<'a> {
    catalog: &'a StrategyCatalog,
    major_gift_budget: i64,
    rules: &'a [RecommendationRule],
}

impl<'a> RuleRecommender<'a> {
    pub fn new(catalog: &'a StrategyCatalog) -> Self {
        Self {
            catalog,
            major_gift_budget: DEFAULT_MAJOR_GIFT_BUDGET,
            rules: &STANDARD_RULES,
        }
    }

    pub fn with_major_gift_budget(mut self, budget: i64) -> Self {
        self.major_gift_budget = budget;
        self
    }

    pub fn with_rules(mut self, rules: &'a [RecommendationRule]) -> Self {
        self.rules = rules;
        self
    }

    fn apply_rule(
        &self,
        rule: &RecommendationRule,
        profile: &NgoProfile,
        matched: &mut Vec<ScoredStrategy>,
    ) {
        for id in rule.strategies {
            let Some(strategy) = self.catalog.get(id) else {
                tracing::warn!(rule = rule.name, strategy = *id, "rule names unknown strategy");
                continue;
            };
            if let Some(exclusion) = categorical_exclusion(profile, strategy) {
                log_exclusion(AlgorithmKind::Rule.label(), strategy, exclusion);
                continue;
            }

            match matched.iter_mut().find(|existing| existing.strategy_id == *id) {
                Some(existing) => {
                    if rule.confidence > existing.confidence {
                        existing.confidence = rule.confidence;
                        existing.attribution = Attribution::Rule {
                            rule: rule.name.to_string(),
                        };
                    }
                }
                None => matched.push(ScoredStrategy {
                    strategy_id: strategy.id.clone(),
                    score: RULE_SCORE,
                    confidence: rule.confidence,
                    algorithm: AlgorithmKind::Rule,
                    attribution: Attribution::Rule {
                        rule: rule.name.to_string(),
                    },
                }),
            }
        }
    }

    /// Tops `matched` up to the minimum length with suitable strategies in catalog order.
    fn fill(&self, profile: &NgoProfile, matched: &mut Vec<ScoredStrategy>) {
        let missing = MIN_RESULTS.saturating_sub(matched.len());
        let fillers: Vec<ScoredStrategy> = self
            .catalog
            .iter()
            .filter(|strategy| {
                !matched
                    .iter()
                    .any(|existing| existing.strategy_id == strategy.id)
            })
            .filter(|strategy| profile_exclusion(profile, strategy).is_none())
            .map(|strategy| ScoredStrategy {
                strategy_id: strategy.id.clone(),
                score: FILL_SCORE,
                confidence: FILL_CONFIDENCE,
                algorithm: AlgorithmKind::Rule,
                attribution: Attribution::Rule {
                    rule: FILL_RULE.to_string(),
                },
            })
            .take(missing)
            .collect();
        matched.extend(fillers);
    }
}

impl Recommender for RuleRecommender<'_> {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Rule
    }

    fn recommend(&self, answers: &AnswerSet, profile: &NgoProfile) -> Vec<ScoredStrategy> {
        let context = RuleContext {
            answers,
            profile,
            major_gift_budget: self.major_gift_budget,
        };

        let mut matched = Vec::new();
        for rule in self.rules.iter().filter(|rule| rule.matches(&context)) {
            tracing::debug!(rule = rule.name, "rule matched");
            self.apply_rule(rule, profile, &mut matched);
        }

        if matched.len() < MIN_RESULTS {
            self.fill(profile, &mut matched);
        }

        matched.sort_by(by_confidence_desc);
        tracing::debug!(algorithm = "rule", candidates = matched.len(), "algorithm finished");
        matched
    }
}
