//! Privacy risk scoring over generated entity populations

use lexshield::anonymization::{
    models::{Entity, EntityType},
    risk::{PrivacyGrade, PrivacyRiskAnalyzer, RiskConfig, RiskRule, Severity},
};
use lexshield::domain::DocumentId;
use std::collections::BTreeMap;
use test_case::test_case;

fn population(entity_type: EntityType, count: usize) -> Vec<Entity> {
    let document_id = DocumentId::new("population").unwrap();
    (1..=count)
        .map(|n| {
            Entity::new(
                entity_type,
                format!("value {n}"),
                format!("{}_{n:03}", entity_type.token_prefix()),
                "generated",
                document_id.clone(),
            )
        })
        .collect()
}

#[test_case(EntityType::Person; "person")]
#[test_case(EntityType::Identifier; "identifier")]
#[test_case(EntityType::Financial; "financial")]
#[test_case(EntityType::Date; "date")]
#[test_case(EntityType::CaseNumber; "case number")]
fn test_score_never_decreases_with_more_entities(entity_type: EntityType) {
    let analyzer = PrivacyRiskAnalyzer::default();
    let mut previous = analyzer.analyze(&[]);

    for count in 1..=40 {
        let report = analyzer.analyze(&population(entity_type, count));
        assert!(
            report.risk_score >= previous.risk_score,
            "score fell at {count}: {} < {}",
            report.risk_score,
            previous.risk_score
        );
        assert!(report.privacy_grade >= previous.privacy_grade, "grade improved at {count}");
        previous = report;
    }
}

#[test]
fn test_adding_a_category_never_lowers_score() {
    let analyzer = PrivacyRiskAnalyzer::default();
    let mut entities = population(EntityType::Person, 6);
    let before = analyzer.analyze(&entities);

    entities.extend(population(EntityType::Contact, 2));
    let after = analyzer.analyze(&entities);

    assert!(after.risk_score > before.risk_score);
    assert!(after.privacy_grade >= before.privacy_grade);
    assert_eq!(after.total_entities, 8);
}

#[test]
fn test_severity_follows_thresholds() {
    let analyzer = PrivacyRiskAnalyzer::default();
    let rule = RiskConfig::default().person;

    let low = analyzer.analyze(&population(EntityType::Person, rule.medium_at - 1));
    let medium = analyzer.analyze(&population(EntityType::Person, rule.medium_at));
    let high = analyzer.analyze(&population(EntityType::Person, rule.high_at));

    assert_eq!(low.max_severity(), Some(Severity::Low));
    assert_eq!(medium.max_severity(), Some(Severity::Medium));
    assert_eq!(high.max_severity(), Some(Severity::High));
}

#[test]
fn test_heavy_exposure_grades_f() {
    let analyzer = PrivacyRiskAnalyzer::default();
    let mut entities = Vec::new();
    for entity_type in EntityType::ALL {
        entities.extend(population(entity_type, 40));
    }

    let report = analyzer.analyze(&entities);
    assert_eq!(report.privacy_grade, PrivacyGrade::F);
    assert_eq!(report.risks.len(), EntityType::ALL.len());
    assert!(report.risks.iter().all(|r| r.severity == Severity::High));
    assert!(report.risks.iter().all(|r| r.recommendation.starts_with("Urgent")));
}

#[test]
fn test_custom_rules_change_severity() {
    let config = RiskConfig {
        financial: RiskRule {
            medium_at: 1,
            high_at: 2,
            weight: 4.0,
        },
        ..Default::default()
    };
    assert!(config.validate().is_ok());
    let analyzer = PrivacyRiskAnalyzer::new(config);

    let counts = BTreeMap::from([(EntityType::Financial, 2)]);
    let report = analyzer.analyze_counts(&counts);
    let risk = report.risk_for(EntityType::Financial).unwrap();
    assert_eq!(risk.severity, Severity::High);
    assert_eq!(report.risk_score, Severity::High.weight() * 4.0);
}

#[test]
fn test_zero_counts_are_not_reported() {
    let analyzer = PrivacyRiskAnalyzer::default();
    let counts = BTreeMap::from([(EntityType::Person, 0), (EntityType::Contact, 1)]);
    let report = analyzer.analyze_counts(&counts);

    assert!(report.risk_for(EntityType::Person).is_none());
    assert_eq!(report.risks.len(), 1);
    assert!(!report.entity_counts.contains_key(&EntityType::Person));
}

#[test]
fn test_unordered_thresholds_are_rejected() {
    let config = RiskConfig {
        identifier: RiskRule {
            medium_at: 6,
            high_at: 3,
            weight: 1.0,
        },
        ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.contains("identifier"));
}
