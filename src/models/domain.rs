use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A preference weight constrained to the closed interval [0, 1].
///
/// Construction is only possible through `new` / `TryFrom<f64>`, so any
/// `Weight` held by the rest of the system is already in range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Weight(f64);

impl Weight {
    pub fn new(value: f64) -> Result<Self, WeightOutOfRange> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(WeightOutOfRange(value))
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightOutOfRange(pub f64);

impl fmt::Display for WeightOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value {} is outside the range 0.00 - 1.00", self.0)
    }
}

impl std::error::Error for WeightOutOfRange {}

impl TryFrom<f64> for Weight {
    type Error = WeightOutOfRange;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Weight> for f64 {
    fn from(value: Weight) -> Self {
        value.0
    }
}

/// Where the parent is willing to let studies/work happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "location_preference", rename_all = "lowercase")]
pub enum LocationPreference {
    Local,
    National,
    International,
    Conditional,
}

impl LocationPreference {
    pub const VARIANTS: &'static [&'static str] =
        &["local", "national", "international", "conditional"];
}

impl FromStr for LocationPreference {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "national" => Ok(Self::National),
            "international" => Ok(Self::International),
            "conditional" => Ok(Self::Conditional),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "migration_willingness", rename_all = "lowercase")]
pub enum MigrationWillingness {
    Yes,
    No,
    Conditional,
}

impl MigrationWillingness {
    pub const VARIANTS: &'static [&'static str] = &["yes", "no", "conditional"];
}

impl FromStr for MigrationWillingness {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "conditional" => Ok(Self::Conditional),
            _ => Err(()),
        }
    }
}

/// Hard budget limits attached to a preference record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetConstraints {
    pub max_tuition_per_year: f64,
}

/// A validated parental career-preference record.
///
/// Every field has already passed the boundary validator: weights are in
/// [0, 1] by construction and the enumerations are typed. Profession lists
/// keep caller order and are not deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentPreference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub financial_stability_weight: Weight,
    pub job_security_weight: Weight,
    pub prestige_weight: Weight,
    pub location_preference: LocationPreference,
    pub migration_willingness: MigrationWillingness,
    pub budget_constraints: BudgetConstraints,
    pub unacceptable_professions: Vec<String>,
    pub acceptable_professions: Vec<String>,
    pub parent_risk_tolerance: Weight,
    pub weight_on_parent_layer: Weight,
}

/// A preference record as persisted: the validated record plus the
/// server-assigned identifier and creation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPreference {
    pub id: uuid::Uuid,
    #[serde(flatten)]
    pub preference: ParentPreference,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Recommendation payload returned after a preference submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub score: u8,
    pub recommended_path: String,
    pub match_reason: String,
    pub flags: Vec<String>,
}

/// A societal-influence survey submission: Likert answers (1-5) grouped
/// by section key, question index within the section as the inner key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocietalSurvey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub responses: BTreeMap<String, BTreeMap<String, i64>>,
}

/// Computed influence analysis for a societal survey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyAnalysis {
    /// Per-section influence, normalized to [0, 1]
    pub section_scores: BTreeMap<String, f64>,
    /// Mean of the section scores
    pub overall_influence: f64,
    /// Highest-scoring section (first in key order on ties)
    pub dominant_section: String,
}
