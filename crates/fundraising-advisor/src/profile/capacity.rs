use crate::answers::AnswerSet;

const DIGITAL_CHANNELS: [&str; 7] = [
    "ngoWebsite",
    "ngoSocialMedia",
    "ngoDonationPage",
    "ngoEmailMarketing",
    "ngoOnlinePlatforms",
    "ngoDigitalBudget",
    "ngoOnlineCampaigns",
];

const DIGITAL_SKILLS: [&str; 4] = [
    "digitalMarketing",
    "contentCreation",
    "websiteManagement",
    "dataAnalysis",
];

const EVENT_SKILLS: [&str; 5] = [
    "eventPlanning",
    "eventMarketing",
    "eventTicketing",
    "eventVolunteers",
    "eventFollowup",
];

/// Bracketed count answers share one tiering: low/mid/high brackets earn 1/2/3.
const PARTNER_COUNT_TIERS: [(&str, u8); 3] = [("1to3", 1), ("4to10", 2), ("over10", 3)];
const DONOR_COUNT_TIERS: [(&str, u8); 3] = [("100to500", 1), ("500to1000", 2), ("over1000", 3)];
const VOLUNTEER_SHARE_TIERS: [(&str, u8); 3] = [("25to50", 1), ("51to75", 2), ("over75", 3)];
const EVENT_COUNT_TIERS: [(&str, u8); 3] = [("3to5", 1), ("6to10", 2), ("over10", 3)];
const FUNDRAISING_SKILL_TIERS: [(&str, u8); 3] = [("some", 1), ("mix", 2), ("specialized", 3)];
const FUNDRAISING_CAPITAL_TIERS: [(&str, u8); 2] = [("yes", 2), ("limited", 1)];

pub(super) const NETWORK_CAP: u8 = 6;
pub(super) const FUNDRAISING_CAP: u8 = 12;
pub(super) const EVENT_CAP: u8 = 10;

fn tier_points(answers: &AnswerSet, key: &str, tiers: &[(&str, u8)]) -> u8 {
    answers
        .text(key)
        .map(str::trim)
        .and_then(|value| tiers.iter().find(|(bracket, _)| *bracket == value))
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

fn flag(answers: &AnswerSet, key: &str, points: u8) -> u8 {
    if answers.is_yes(key) {
        points
    } else {
        0
    }
}

/// 0-8: one point per active channel plus one for strong average digital skills.
pub(super) fn digital(answers: &AnswerSet) -> u8 {
    let channels = DIGITAL_CHANNELS
        .iter()
        .filter(|key| answers.is_yes(key))
        .count() as u8;

    let skilled = answers.ratings("ngoDigitalSkills").is_some()
        && answers.rating_average("ngoDigitalSkills", &DIGITAL_SKILLS) >= 3.0;

    channels + u8::from(skilled)
}

/// 0-10 raw volunteer capacity.
pub(super) fn volunteer(answers: &AnswerSet) -> u8 {
    let mut score = 0;

    if answers.is_yes("ngoVolunteers") {
        score += 1;
        let count = answers.integer("ngoVolunteersCount");
        if count > 10 {
            score += 1;
        }
        if count > 50 {
            score += 1;
        }
    }

    if answers.is_yes("ngoVolunteerOperations") {
        score += 1 + tier_points(answers, "ngoVolunteerPercentage", &VOLUNTEER_SHARE_TIERS);
    }

    score += flag(answers, "ngoVolunteerManagement", 1);
    if answers.integer("ngoVolunteerCapacity") >= 3 {
        score += 1;
    }
    score += flag(answers, "ngoVolunteerFundraising", 2);

    score
}

/// 0-10 event capacity; experience, skills and logistics each contribute.
pub(super) fn event(answers: &AnswerSet) -> u8 {
    let mut score = 0;

    if answers.is_yes("ngoEventExperience") {
        score += 1 + tier_points(answers, "ngoEventCount", &EVENT_COUNT_TIERS);
        if answers.list_len("ngoEventTypes") > 3 {
            score += 1;
        }
    }

    if answers.ratings("ngoEventCapacity").is_some() {
        let average = answers.rating_average("ngoEventCapacity", &EVENT_SKILLS);
        if average >= 3.0 {
            score += 2;
        }
        if average >= 4.0 {
            score += 1;
        }
    }

    score += flag(answers, "ngoEventVenues", 1);
    score += flag(answers, "ngoVirtualEvents", 1);
    score += flag(answers, "ngoEventBudget", 1);

    score.min(EVENT_CAP)
}

pub(super) fn corporate_network(answers: &AnswerSet) -> u8 {
    let mut score = 0;
    if answers.is_yes("ngoCorporateRelations") {
        score += 1 + tier_points(answers, "ngoCorporatePartnersCount", &PARTNER_COUNT_TIERS);
    }
    if answers.integer("ngoCorporateRelationshipStrength") >= 3 {
        score += 1;
    }
    score += flag(answers, "ngoCSRExperience", 1);
    score.min(NETWORK_CAP)
}

pub(super) fn individual_network(answers: &AnswerSet) -> u8 {
    let mut score = flag(answers, "ngoDonorDatabase", 1);
    score += tier_points(answers, "ngoDonorCount", &DONOR_COUNT_TIERS);
    if answers.integer("ngoDonorRelationship") >= 3 {
        score += 1;
    }
    score += flag(answers, "ngoDonorStewardship", 1);
    score.min(NETWORK_CAP)
}

pub(super) fn foundation_network(answers: &AnswerSet) -> u8 {
    let mut score = 0;
    if answers.is_yes("ngoFoundationRelations") {
        score += 1 + tier_points(answers, "ngoFoundationCount", &PARTNER_COUNT_TIERS);
    }
    if answers.integer("ngoFoundationRelationshipStrength") >= 3 {
        score += 1;
    }
    score += flag(answers, "ngoGrantWriting", 1);
    score.min(NETWORK_CAP)
}

/// 0-12 raw fundraising capacity.
pub(super) fn fundraising(answers: &AnswerSet) -> u8 {
    let mut score = 0;

    if answers.is_yes("ngoFundraisingDept") {
        score += 1;
        if answers.integer("ngoFundraisingStaffCount") >= 2 {
            score += 1;
        }
    }

    score += tier_points(answers, "ngoFundraisingSkill", &FUNDRAISING_SKILL_TIERS);
    score += flag(answers, "ngoVolunteerFundraisingSupport", 1);
    if answers.decimal("ngoFundraisingBudgetPercent") >= 10.0 {
        score += 1;
    }
    score += tier_points(answers, "ngoFundraisingCapital", &FUNDRAISING_CAPITAL_TIERS);
    score += flag(answers, "ngoCRM", 1);
    score += flag(answers, "ngoFinancialSystems", 1);

    score.min(FUNDRAISING_CAP)
}
