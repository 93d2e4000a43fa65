use crate::answers::AnswerSet;
use crate::catalog::ids;
use crate::domain::LocationTier;

/// Points a strategy earns for operating in each city tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierPoints {
    pub tier1: i32,
    pub tier2: i32,
    pub tier3: i32,
    pub rural: i32,
}

impl TierPoints {
    const fn new(tier1: i32, tier2: i32, tier3: i32, rural: i32) -> Self {
        Self {
            tier1,
            tier2,
            tier3,
            rural,
        }
    }

    pub fn for_tier(&self, tier: LocationTier) -> i32 {
        match tier {
            LocationTier::Tier1 => self.tier1,
            LocationTier::Tier2 => self.tier2,
            LocationTier::Tier3 => self.tier3,
            LocationTier::Rural => self.rural,
        }
    }
}

const CORPORATE_URBAN: TierPoints = TierPoints::new(15, 8, 3, 0);
const DIGITAL_REACH: TierPoints = TierPoints::new(10, 8, 5, 2);
const DEFAULT_POINTS: TierPoints = TierPoints::new(5, 4, 3, 2);

const LOCATION_POINTS: &[(&str, TierPoints)] = &[
    (ids::CSR, CORPORATE_URBAN),
    (ids::EMPLOYEE_GIVING, CORPORATE_URBAN),
    (ids::GOVERNMENT_GRANTS, TierPoints::new(0, 5, 10, 15)),
    (ids::CROWDFUNDING, DIGITAL_REACH),
    (ids::P2P, DIGITAL_REACH),
    (ids::DIGITAL_FUNDRAISING, DIGITAL_REACH),
    (ids::EVENT_BASED, TierPoints::new(12, 8, 4, 0)),
    (ids::DOOR_TO_DOOR, TierPoints::new(4, 6, 8, 10)),
    (ids::HNI_GIVING, TierPoints::new(12, 6, 0, 0)),
    (ids::CHECKOUT_CHARITY, TierPoints::new(10, 7, 4, 0)),
    (ids::GRANTS, TierPoints::new(8, 6, 4, 2)),
    (ids::FOREIGN_GRANTS, TierPoints::new(10, 7, 4, 0)),
];

pub fn tier_points(strategy_id: &str) -> TierPoints {
    LOCATION_POINTS
        .iter()
        .find(|(id, _)| *id == strategy_id)
        .map(|(_, points)| *points)
        .unwrap_or(DEFAULT_POINTS)
}

/// Mean points over every selected location, rounded; 0 with no selection.
/// Unrecognized entries count toward the mean with 0 points.
pub fn impact(answers: &AnswerSet, strategy_id: &str) -> i32 {
    let locations = answers.list("ngoLocation");
    if locations.is_empty() {
        return 0;
    }

    let points = tier_points(strategy_id);
    let total: i32 = locations
        .iter()
        .filter_map(|raw| LocationTier::from_answer(raw))
        .map(|tier| points.for_tier(tier))
        .sum();
    (f64::from(total) / locations.len() as f64).round() as i32
}

/// Human-readable location advice for one strategy.
pub fn insights(answers: &AnswerSet, strategy_id: &str, impact: i32) -> Vec<String> {
    let raw = answers.list("ngoLocation");
    if raw.is_empty() {
        return Vec::new();
    }

    let tiers: Vec<LocationTier> = raw
        .iter()
        .filter_map(|entry| LocationTier::from_answer(entry))
        .collect();
    let labels = tiers
        .iter()
        .map(|tier| tier.label())
        .collect::<Vec<_>>()
        .join(", ");
    let has = |tier: LocationTier| tiers.contains(&tier);
    let urban_core = tiers.iter().any(|tier| tier.is_urban_core());
    let rural_reach = has(LocationTier::Rural) || has(LocationTier::Tier3);

    let mut insights = Vec::new();
    if impact >= 10 {
        insights.push(format!("Strong alignment with your location profile ({labels})"));
    } else if impact >= 5 {
        insights.push(format!("Moderate alignment with your location profile ({labels})"));
    } else if impact <= 0 {
        insights.push(format!("May face challenges due to your location profile ({labels})"));
    }

    match strategy_id {
        ids::CSR => {
            if has(LocationTier::Tier1) {
                insights.push(
                    "Presence in Tier 1 city provides strong advantage for CSR funding".to_string(),
                );
            } else if !urban_core {
                insights.push(
                    "Consider partnerships with NGOs in Tier 1/2 cities to improve CSR access"
                        .to_string(),
                );
            }
        }
        ids::GOVERNMENT_GRANTS if rural_reach => {
            insights.push(
                "Rural/Tier 3 presence aligns well with government grant priorities".to_string(),
            );
        }
        ids::DIGITAL_FUNDRAISING => {
            if urban_core {
                insights.push(
                    "Urban presence provides good infrastructure for digital initiatives"
                        .to_string(),
                );
            } else {
                insights.push(
                    "Consider infrastructure requirements for digital fundraising".to_string(),
                );
            }
        }
        ids::DOOR_TO_DOOR if rural_reach => {
            insights.push(
                "Rural/Tier 3 presence is advantageous for door-to-door fundraising".to_string(),
            );
        }
        ids::FOREIGN_GRANTS if !urban_core => {
            insights.push(
                "Consider establishing presence in a major city to facilitate foreign funding"
                    .to_string(),
            );
        }
        _ => {}
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impact_is_the_rounded_mean_over_locations() {
        let answers = AnswerSet::new().with("ngoLocation", ["tier1", "rural"]);

        assert_eq!(impact(&answers, ids::CSR), 8);
        assert_eq!(impact(&answers, ids::GOVERNMENT_GRANTS), 8);
        assert_eq!(impact(&answers, ids::LEGACY_GIVING), 4);
        assert_eq!(impact(&AnswerSet::new(), ids::CSR), 0);
    }

    #[test]
    fn unknown_locations_dilute_the_mean() {
        let answers = AnswerSet::new().with("ngoLocation", ["tier1", "overseas"]);
        assert_eq!(impact(&answers, ids::HNI_GIVING), 6);
    }

    #[test]
    fn csr_insights_reward_tier_one_presence() {
        let answers = AnswerSet::new().with("ngoLocation", ["tier1"]);
        let insights = insights(&answers, ids::CSR, impact(&answers, ids::CSR));

        assert_eq!(
            insights,
            vec![
                "Strong alignment with your location profile (Tier 1 city)".to_string(),
                "Presence in Tier 1 city provides strong advantage for CSR funding".to_string(),
            ]
        );
    }

    #[test]
    fn rural_presence_advises_on_government_and_foreign_grants() {
        let answers = AnswerSet::new().with("ngoLocation", ["rural"]);

        let government = insights(&answers, ids::GOVERNMENT_GRANTS, 15);
        assert!(government
            .iter()
            .any(|line| line == "Rural/Tier 3 presence aligns well with government grant priorities"));

        let foreign = insights(&answers, ids::FOREIGN_GRANTS, 0);
        assert_eq!(foreign.len(), 2);
        assert!(foreign[0].starts_with("May face challenges"));
    }

    #[test]
    fn no_locations_means_no_insights() {
        assert!(insights(&AnswerSet::new(), ids::CSR, 0).is_empty());
    }
}
