//! Privacy risk analysis over entity populations
//!
//! Entities are counted per type; each type's count is graded low, medium or
//! high against that type's thresholds. The risk score is the sum of
//! `severity weight x type weight` over all present types, and the letter grade
//! is read off fixed score cutoffs. Since severities only rise with count and
//! every term is non-negative, adding entities never lowers the score.

use crate::anonymization::models::{Entity, EntityType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Severity of a category risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Contribution of this severity to the risk score
    pub fn weight(&self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 3.0,
            Self::High => 5.0,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Letter grade, A best and F worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrivacyGrade {
    A,
    B,
    C,
    D,
    F,
}

impl fmt::Display for PrivacyGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.write_str(letter)
    }
}

/// Count thresholds and weight for one entity type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskRule {
    /// Count at which severity becomes medium
    pub medium_at: usize,
    /// Count at which severity becomes high
    pub high_at: usize,
    /// Multiplier applied to the severity weight
    pub weight: f64,
}

impl RiskRule {
    const fn new(medium_at: usize, high_at: usize, weight: f64) -> Self {
        Self {
            medium_at,
            high_at,
            weight,
        }
    }

    /// Severity for a count; `None` when the type is absent
    pub fn severity(&self, count: usize) -> Option<Severity> {
        if count == 0 {
            None
        } else if count >= self.high_at {
            Some(Severity::High)
        } else if count >= self.medium_at {
            Some(Severity::Medium)
        } else {
            Some(Severity::Low)
        }
    }
}

/// Score cutoffs for grades B through F
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeCutoffs {
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub f: f64,
}

impl Default for GradeCutoffs {
    fn default() -> Self {
        Self {
            b: 3.0,
            c: 8.0,
            d: 15.0,
            f: 25.0,
        }
    }
}

impl GradeCutoffs {
    /// Grade for a score
    pub fn grade(&self, score: f64) -> PrivacyGrade {
        if score >= self.f {
            PrivacyGrade::F
        } else if score >= self.d {
            PrivacyGrade::D
        } else if score >= self.c {
            PrivacyGrade::C
        } else if score >= self.b {
            PrivacyGrade::B
        } else {
            PrivacyGrade::A
        }
    }
}

/// Per-type risk rules and grade cutoffs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub person: RiskRule,
    pub organization: RiskRule,
    pub date: RiskRule,
    pub location: RiskRule,
    pub contact: RiskRule,
    pub identifier: RiskRule,
    pub financial: RiskRule,
    pub case_number: RiskRule,
    pub sensitive: RiskRule,
    pub grades: GradeCutoffs,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            person: RiskRule::new(5, 20, 1.0),
            organization: RiskRule::new(5, 15, 0.75),
            date: RiskRule::new(10, 30, 0.5),
            location: RiskRule::new(5, 15, 0.75),
            contact: RiskRule::new(1, 5, 1.5),
            identifier: RiskRule::new(1, 5, 2.0),
            financial: RiskRule::new(3, 10, 1.5),
            case_number: RiskRule::new(1, 5, 1.5),
            sensitive: RiskRule::new(1, 3, 1.0),
            grades: GradeCutoffs::default(),
        }
    }
}

impl RiskConfig {
    /// Rule for an entity type
    pub fn rule_for(&self, entity_type: EntityType) -> &RiskRule {
        match entity_type {
            EntityType::Person => &self.person,
            EntityType::Organization => &self.organization,
            EntityType::Date => &self.date,
            EntityType::Location => &self.location,
            EntityType::Contact => &self.contact,
            EntityType::Identifier => &self.identifier,
            EntityType::Financial => &self.financial,
            EntityType::CaseNumber => &self.case_number,
            EntityType::Sensitive => &self.sensitive,
        }
    }

    /// Thresholds must be ordered and weights non-negative
    pub fn validate(&self) -> Result<(), String> {
        for entity_type in EntityType::ALL {
            let rule = self.rule_for(entity_type);
            if rule.medium_at == 0 || rule.high_at < rule.medium_at {
                return Err(format!(
                    "risk.{entity_type}: need 0 < medium_at <= high_at (got {} and {})",
                    rule.medium_at, rule.high_at
                ));
            }
            if !rule.weight.is_finite() || rule.weight < 0.0 {
                return Err(format!("risk.{entity_type}: weight must be >= 0"));
            }
        }
        let g = &self.grades;
        if !(0.0 < g.b && g.b < g.c && g.c < g.d && g.d < g.f) {
            return Err("risk.grades: cutoffs must be positive and strictly ascending".to_string());
        }
        Ok(())
    }
}

/// One flagged category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRisk {
    /// Entity type this risk concerns
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Short label such as `identifier_exposure`
    pub risk: String,
    pub severity: Severity,
    pub count: usize,
    pub recommendation: String,
}

/// Aggregate privacy risk for a population of entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Flagged categories, most severe first
    pub risks: Vec<CategoryRisk>,
    pub risk_score: f64,
    pub privacy_grade: PrivacyGrade,
    /// Entities analysed
    pub total_entities: usize,
    /// Entity count by type
    pub entity_counts: BTreeMap<EntityType, usize>,
}

impl RiskReport {
    /// Highest severity present, if any
    pub fn max_severity(&self) -> Option<Severity> {
        self.risks.iter().map(|r| r.severity).max()
    }

    /// Risk entry for a type
    pub fn risk_for(&self, entity_type: EntityType) -> Option<&CategoryRisk> {
        self.risks.iter().find(|r| r.entity_type == entity_type)
    }
}

fn risk_label(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::Person => "personal_name_exposure",
        EntityType::Organization => "organization_exposure",
        EntityType::Date => "date_exposure",
        EntityType::Location => "location_exposure",
        EntityType::Contact => "contact_exposure",
        EntityType::Identifier => "identifier_exposure",
        EntityType::Financial => "financial_exposure",
        EntityType::CaseNumber => "case_reference_exposure",
        EntityType::Sensitive => "privileged_content",
    }
}

fn recommendation(entity_type: EntityType, severity: Severity) -> String {
    let advice = match entity_type {
        EntityType::Person => {
            "Check that every party, witness and counsel name was tokenised and review remaining initials or honorifics that could re-identify individuals"
        }
        EntityType::Organization => {
            "Confirm company names are tokenised and remove trading names or brands that point to the client"
        }
        EntityType::Date => {
            "Consider generalising dates to month or year where the exact day is not material"
        }
        EntityType::Location => {
            "Generalise addresses to town or region and confirm postcodes are tokenised"
        }
        EntityType::Contact => {
            "Remove email addresses and telephone numbers entirely; they are rarely needed for analysis"
        }
        EntityType::Identifier => {
            "Strip registration, account, card and national ID numbers before sharing; each one identifies a party on its own"
        }
        EntityType::Financial => {
            "Keep only the magnitude classes of amounts and review whether exact figures are needed at all"
        }
        EntityType::CaseNumber => {
            "Case and claim numbers resolve to public court records; keep them tokenised and avoid quoting citations verbatim"
        }
        EntityType::Sensitive => {
            "Review redacted privileged or confidential passages before any external disclosure"
        }
    };
    match severity {
        Severity::High => format!("Urgent: {advice}."),
        Severity::Medium | Severity::Low => format!("{advice}."),
    }
}

/// Computes [`RiskReport`]s from entity populations
#[derive(Debug, Clone, Default)]
pub struct PrivacyRiskAnalyzer {
    config: RiskConfig,
}

impl PrivacyRiskAnalyzer {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Analyse a population of entities
    ///
    /// Each entity record counts once; consolidate first to count distinct
    /// values across documents.
    pub fn analyze(&self, entities: &[Entity]) -> RiskReport {
        let mut counts: BTreeMap<EntityType, usize> = BTreeMap::new();
        for entity in entities {
            *counts.entry(entity.entity_type).or_insert(0) += 1;
        }
        self.analyze_counts(&counts)
    }

    /// Analyse precomputed per-type counts
    pub fn analyze_counts(&self, counts: &BTreeMap<EntityType, usize>) -> RiskReport {
        let mut risks = Vec::new();
        let mut risk_score = 0.0;

        for (&entity_type, &count) in counts {
            let rule = self.config.rule_for(entity_type);
            let Some(severity) = rule.severity(count) else {
                continue;
            };
            risk_score += severity.weight() * rule.weight;
            risks.push(CategoryRisk {
                entity_type,
                risk: risk_label(entity_type).to_string(),
                severity,
                count,
                recommendation: recommendation(entity_type, severity),
            });
        }

        risks.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then_with(|| b.count.cmp(&a.count))
                .then_with(|| a.entity_type.cmp(&b.entity_type))
        });

        RiskReport {
            risks,
            risk_score,
            privacy_grade: self.config.grades.grade(risk_score),
            total_entities: counts.values().sum(),
            entity_counts: counts.iter().filter(|(_, c)| **c > 0).map(|(t, c)| (*t, *c)).collect(),
        }
    }
}
