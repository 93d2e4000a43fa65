use super::views::Descriptors;
use crate::catalog::{Criterion, Strategy};
use crate::profile::NgoProfile;

fn tier(rating: u8, high: &'static str, middle: &'static str, low: &'static str) -> &'static str {
    if rating >= 4 {
        high
    } else if rating == 3 {
        middle
    } else {
        low
    }
}

/// Presentation labels derived from a strategy's ratings. Missing ratings read as 0.
pub fn describe(strategy: &Strategy) -> Descriptors {
    let rating = |criterion| strategy.rating(criterion).unwrap_or(0);
    let timeline = rating(Criterion::FundingTimeline);

    Descriptors {
        timeline_context: tier(timeline, "Quick Win", "Medium-term", "Long-term"),
        implementation_phase: tier(timeline, "Immediate", "3-6 months", "6+ months"),
        trend: tier(rating(Criterion::MacroTrends), "Growing", "Stable", "Declining"),
        funding_range: match strategy.rating(Criterion::FundingScale) {
            Some(1) => "$1K-$10K",
            Some(2) => "$10K-$100K",
            Some(3) => "$100K-$1M",
            Some(4) => "$1M-$10M",
            _ => "$10M+",
        },
        scalability: tier(
            rating(Criterion::ScalabilityPotential),
            "High Growth",
            "Medium Growth",
            "Limited Growth",
        ),
        engagement: tier(
            rating(Criterion::DonorEngagement),
            "High Engagement",
            "Medium Engagement",
            "Low Engagement",
        ),
    }
}

/// Reasons the strategy fits the organization.
pub fn highlights(strategy: &Strategy, profile: &NgoProfile) -> Vec<String> {
    let at_least = |criterion, floor| strategy.rating(criterion).is_some_and(|value| value >= floor);
    let mut highlights = Vec::new();

    if strategy.suits_maturity(profile.maturity) {
        highlights.push(format!(
            "Aligns with your {} stage maturity level",
            profile.maturity.key()
        ));
    }
    if strategy.suits_size(profile.size) {
        highlights.push("Matches your organizational size and capacity".to_string());
    }

    let rated = [
        (
            at_least(Criterion::ImplementationFeasibility, 3),
            "Implementation complexity matches your current capabilities",
        ),
        (
            at_least(Criterion::ScalabilityPotential, 4),
            "Offers strong potential for scaling and growth",
        ),
        (
            at_least(Criterion::DonorEngagement, 4),
            "Provides high donor engagement opportunities",
        ),
        (
            at_least(Criterion::MacroTrends, 4),
            "Aligns with current fundraising trends and donor preferences",
        ),
        (
            strategy
                .rating(Criterion::ResourceRequirements)
                .is_some_and(|value| value <= 3),
            "Resource requirements align with your current capacity",
        ),
    ];
    highlights.extend(
        rated
            .into_iter()
            .filter(|(applies, _)| *applies)
            .map(|(_, line)| line.to_string()),
    );
    highlights
}
