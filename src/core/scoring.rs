use crate::core::categories::TrekCategories;
use crate::core::filters::{matches_interest, TrekProfile};
use crate::models::{AgeGroup, Experience, FitnessLevel, HealthIssue, PreferenceSet, Trek, TrekType};

/// Penalty for a critical condition on a trek that is not easy or moderate
const CRITICAL_HEALTH_PENALTY: i32 = 10;
/// Penalty per health condition beyond the first
const EXTRA_CONDITION_PENALTY: i32 = 3;
/// Points for a trek matching at least one trek-type interest
const INTEREST_POINTS: i32 = 25;
/// Bonus per additional matching trek-type interest
const EXTRA_INTEREST_BONUS: i32 = 5;

/// Outcome of scoring one trek
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// Suitability in 0..=100
    pub score: u8,
    /// The reason shown to the user
    pub reason: String,
    /// All reasons in evaluation order; never empty
    pub reasons: Vec<String>,
}

/// Running total and reasons collected across the scoring dimensions
#[derive(Debug, Default)]
struct Tally {
    points: i32,
    reasons: Vec<String>,
}

impl Tally {
    fn add(&mut self, points: i32) {
        self.points += points;
    }

    fn add_with_reason(&mut self, points: i32, reason: &str) {
        self.points += points;
        self.reasons.push(reason.to_string());
    }

    fn note(&mut self, reason: impl Into<String>) {
        self.reasons.push(reason.into());
    }
}

/// Calculate a suitability score (0-100) for a trek against user preferences
///
/// The score adds up five independent dimensions, evaluated in order:
///
/// | dimension  | typical range |
/// |------------|---------------|
/// | age group  | 0-30          |
/// | health     | 0-20, minus penalties |
/// | fitness    | 0-25          |
/// | experience | 0-25          |
/// | interests  | 0-25 plus 5 per extra matching interest |
///
/// The health penalty is taken off the running total right after the health
/// dimension, floored at zero. The final sum is capped at 100.
///
/// Only the first reason produced is surfaced as `reason`; if no dimension
/// produced one, a default is picked from the final score.
pub fn calculate_match_score(
    trek: &Trek,
    preferences: &PreferenceSet,
    categories: &TrekCategories,
) -> ScoreBreakdown {
    let profile = TrekProfile::classify(trek, categories);
    let mut tally = Tally::default();

    score_age(preferences.age_group, &profile, &mut tally);

    let penalty = score_health(&preferences.health_issues, &profile, &mut tally);
    tally.points = (tally.points - penalty).max(0);

    score_fitness(preferences.fitness_level, &profile, &mut tally);
    score_experience(preferences.experience, &profile, &mut tally);
    score_interests(&preferences.trek_type_interests, &profile, &mut tally);

    let score = tally.points.clamp(0, 100) as u8;
    let mut reasons = tally.reasons;
    if reasons.is_empty() {
        reasons.push(default_reason(score).to_string());
    }
    let reason = reasons.first().cloned().unwrap_or_default();

    ScoreBreakdown {
        score,
        reason,
        reasons,
    }
}

#[inline]
fn score_age(age_group: AgeGroup, profile: &TrekProfile, tally: &mut Tally) {
    match age_group {
        AgeGroup::Under18 => {
            if profile.is_gentle() {
                tally.add_with_reason(25, "Perfect for young adventurers!");
            } else if profile.is_moderate_tier() {
                tally.add(15);
            }
        }
        AgeGroup::From18To40 => {
            tally.add(20);
            if profile.adventure {
                tally.add_with_reason(10, "Great adventure for your age group!");
            }
        }
        AgeGroup::From41To60 => {
            if profile.is_easy_or_moderate_tier() {
                tally.add_with_reason(20, "Well-suited for your experience level!");
            } else if profile.is_hard_tier() {
                tally.add(5);
            }
        }
        AgeGroup::Over60 => {
            if profile.is_gentle() {
                tally.add_with_reason(25, "Gentle trek with beautiful views!");
            } else {
                tally.add(5);
            }
        }
    }
}

/// Score the health dimension and return the penalty still to be applied
///
/// "none" wins outright whenever it is present. Otherwise critical
/// conditions take precedence over moderate ones for the points awarded.
fn score_health(issues: &[HealthIssue], profile: &TrekProfile, tally: &mut Tally) -> i32 {
    if issues.is_empty() {
        return 0;
    }
    if issues.contains(&HealthIssue::NoneDeclared) {
        tally.add(20);
        return 0;
    }

    let has = |issue: HealthIssue| issues.contains(&issue);
    let mut penalty = 0;

    if issues.iter().any(|issue| issue.is_critical()) {
        if profile.is_gentle() {
            tally.add(15);
            if has(HealthIssue::AsthmaBreathing) {
                tally.note("Easy trek suitable for breathing conditions");
            }
            if has(HealthIssue::HeartBp) {
                tally.note("Low-intensity trek for heart health");
            }
            if has(HealthIssue::SurgeryInjury) {
                tally.note("Gentle trek for recovery phase");
            }
        } else if profile.is_moderate_tier() {
            tally.add_with_reason(8, "Moderate trek - medical clearance recommended");
        } else {
            penalty += CRITICAL_HEALTH_PENALTY;
        }
    } else if issues.iter().any(|issue| issue.is_moderate()) {
        if profile.is_gentle() {
            tally.add(18);
            if has(HealthIssue::Diabetes) {
                tally.note("Manageable trek for diabetes management");
            }
            if has(HealthIssue::JointKnee) {
                tally.note("Easy on joints with minimal climbing");
            }
        } else if profile.is_moderate_tier() {
            tally.add(12);
            if has(HealthIssue::Diabetes) {
                tally.note("Carry glucose supplies for monitoring");
            }
            if has(HealthIssue::JointKnee) && profile.waterfall {
                tally.note("Rewarding destination worth the moderate effort");
            }
        } else {
            tally.add(5);
        }
    }

    if issues.len() > 1 {
        penalty += (issues.len() as i32 - 1) * EXTRA_CONDITION_PENALTY;
        tally.note("Multiple health considerations addressed");
    }

    penalty
}

#[inline]
fn score_fitness(fitness: FitnessLevel, profile: &TrekProfile, tally: &mut Tally) {
    match fitness {
        FitnessLevel::Low => {
            if profile.is_gentle() {
                tally.add_with_reason(25, "Perfect for building your trekking confidence!");
            } else if profile.is_moderate_tier() {
                tally.add(10);
            }
        }
        FitnessLevel::Medium => {
            if profile.is_easy_or_moderate_tier() {
                tally.add(20);
            } else if profile.is_hard_tier() {
                tally.add(10);
            }
        }
        FitnessLevel::High => {
            tally.add(15);
            if profile.adventure || profile.is_hard_tier() {
                tally.add_with_reason(10, "Challenging trek to test your limits!");
            }
        }
    }
}

#[inline]
fn score_experience(experience: Experience, profile: &TrekProfile, tally: &mut Tally) {
    match experience {
        Experience::FirstTime => {
            if profile.is_gentle() {
                tally.add_with_reason(25, "Ideal first trek with great memories!");
            } else if profile.is_moderate_tier() {
                tally.add(15);
            }
        }
        Experience::FewTreks => {
            if profile.is_easy_or_moderate_tier() {
                tally.add(20);
            } else if profile.is_hard_tier() {
                tally.add(15);
            }
        }
        Experience::Experienced => {
            tally.add(15);
            if profile.adventure {
                tally.add_with_reason(10, "Advanced trek for seasoned trekkers!");
            }
        }
    }
}

/// Interests never stack: the best match counts once, and every further
/// matching interest only adds a small bonus.
fn score_interests(interests: &[TrekType], profile: &TrekProfile, tally: &mut Tally) {
    let matching: Vec<TrekType> = interests
        .iter()
        .copied()
        .filter(|interest| matches_interest(profile, *interest))
        .collect();

    for interest in &matching {
        tally.note(interest_reason(*interest));
    }

    if matching.is_empty() {
        return;
    }

    tally.add(INTEREST_POINTS);
    if matching.len() > 1 {
        tally.add((matching.len() as i32 - 1) * EXTRA_INTEREST_BONUS);
        tally.note(format!("Matches {} of your preferences!", matching.len()));
    }
}

fn interest_reason(interest: TrekType) -> &'static str {
    match interest {
        TrekType::EasyShort => "Short and sweet adventure!",
        TrekType::ScenicWaterfall => "Stunning scenery and natural beauty!",
        TrekType::FortHistory => "Rich history and heritage site!",
        TrekType::AdventureLong => "Epic adventure and challenge!",
    }
}

/// Reason used when no dimension produced one
pub fn default_reason(score: u8) -> &'static str {
    if score >= 70 {
        "Great match for your preferences!"
    } else if score >= 50 {
        "Good option to consider!"
    } else {
        "Moderate match for your profile."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(
        age_group: AgeGroup,
        health_issues: Vec<HealthIssue>,
        fitness_level: FitnessLevel,
        experience: Experience,
        trek_type_interests: Vec<TrekType>,
    ) -> PreferenceSet {
        PreferenceSet {
            age_group,
            health_issues,
            fitness_level,
            experience,
            trek_type_interests,
        }
    }

    fn score(trek: &Trek, preferences: &PreferenceSet) -> ScoreBreakdown {
        calculate_match_score(trek, preferences, &TrekCategories::default())
    }

    #[test]
    fn test_karnala_for_senior_beginner() {
        let trek = Trek::new("Karnala Fort", Some("Easy"));
        let preferences = prefs(
            AgeGroup::Over60,
            vec![HealthIssue::NoneDeclared],
            FitnessLevel::Low,
            Experience::FirstTime,
            vec![TrekType::EasyShort],
        );

        let result = score(&trek, &preferences);
        assert_eq!(result.score, 100);
        assert_eq!(result.reason, "Gentle trek with beautiful views!");
    }

    #[test]
    fn test_karnala_with_heart_and_diabetes() {
        let trek = Trek::new("Karnala Fort", Some("Easy"));
        let preferences = prefs(
            AgeGroup::From18To40,
            vec![HealthIssue::HeartBp, HealthIssue::Diabetes],
            FitnessLevel::High,
            Experience::Experienced,
            vec![TrekType::AdventureLong],
        );

        let result = score(&trek, &preferences);
        // 20 + 15 - 3 + 15 + 15 + 0
        assert_eq!(result.score, 62);
        assert_eq!(result.reason, "Low-intensity trek for heart health");
        assert!(result
            .reasons
            .contains(&"Multiple health considerations addressed".to_string()));
        assert!(!result
            .reasons
            .contains(&"Manageable trek for diabetes management".to_string()));
    }

    #[test]
    fn test_none_overrides_other_conditions() {
        let trek = Trek::new("Torna Fort", Some("Hard"));
        let with_none = prefs(
            AgeGroup::From18To40,
            vec![HealthIssue::HeartBp, HealthIssue::NoneDeclared],
            FitnessLevel::Medium,
            Experience::FewTreks,
            vec![],
        );
        let without_health = PreferenceSet {
            health_issues: vec![],
            ..with_none.clone()
        };

        let a = score(&trek, &with_none);
        let b = score(&trek, &without_health);
        assert_eq!(a.score, b.score + 20);
    }

    #[test]
    fn test_critical_condition_on_hard_trek_is_penalised() {
        let trek = Trek::new("Torna Fort", Some("Hard"));
        let preferences = prefs(
            AgeGroup::From41To60,
            vec![HealthIssue::AsthmaBreathing],
            FitnessLevel::Medium,
            Experience::FewTreks,
            vec![],
        );

        // age 5, health 0 - 10 floored to 0, fitness 10, experience 15
        let result = score(&trek, &preferences);
        assert_eq!(result.score, 25);
        assert_eq!(result.reason, "Moderate match for your profile.");
    }

    #[test]
    fn test_moderate_condition_on_waterfall() {
        let trek = Trek::new("Kalu Waterfall", Some("Moderate"));
        let preferences = prefs(
            AgeGroup::Under18,
            vec![HealthIssue::JointKnee],
            FitnessLevel::Medium,
            Experience::FewTreks,
            vec![],
        );

        // age 15, health 12, fitness 20, experience 20
        let result = score(&trek, &preferences);
        assert_eq!(result.score, 67);
        assert_eq!(result.reason, "Rewarding destination worth the moderate effort");
    }

    #[test]
    fn test_multiple_interests_add_small_bonus() {
        let trek = Trek::new("Harishchandragad Fort", Some("Hard"));
        let single = prefs(
            AgeGroup::From18To40,
            vec![],
            FitnessLevel::Medium,
            Experience::FewTreks,
            vec![TrekType::FortHistory],
        );
        let double = PreferenceSet {
            trek_type_interests: vec![TrekType::FortHistory, TrekType::AdventureLong],
            ..single.clone()
        };

        let a = score(&trek, &single);
        let b = score(&trek, &double);
        assert_eq!(b.score, a.score + 5);
        assert!(b.reasons.contains(&"Matches 2 of your preferences!".to_string()));
    }

    #[test]
    fn test_default_reason_bands() {
        assert_eq!(default_reason(70), "Great match for your preferences!");
        assert_eq!(default_reason(69), "Good option to consider!");
        assert_eq!(default_reason(50), "Good option to consider!");
        assert_eq!(default_reason(49), "Moderate match for your profile.");
    }

    #[test]
    fn test_no_reason_uses_default() {
        let trek = Trek::new("Rajgad Fort", Some("Moderate"));
        let preferences = prefs(
            AgeGroup::Under18,
            vec![],
            FitnessLevel::Medium,
            Experience::FewTreks,
            vec![],
        );

        // 15 + 20 + 20
        let result = score(&trek, &preferences);
        assert_eq!(result.score, 55);
        assert_eq!(result.reason, "Good option to consider!");
        assert_eq!(result.reasons, vec!["Good option to consider!".to_string()]);
    }
}
