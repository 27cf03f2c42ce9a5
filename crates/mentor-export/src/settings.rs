//! # Settings: Authored vs Resolved
//!
//! `settings.json` is fully optional at rest; the platform wants every
//! field present. [`Settings`] models the file as authored, and
//! [`Settings::resolve`] materializes the documented defaults into a
//! [`ResolvedSettings`]. The two are separate types on purpose: only the
//! exporter is allowed to default, and the resolved form cannot round-trip
//! back into an authored file by accident.

use serde::{Deserialize, Serialize};

/// Scoring mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Feedback after every question; scores are advisory.
    Training,
    /// Scores withheld until the end.
    Exam,
}

/// How `passing_score` applies across questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassingMode {
    /// Passing any question at the threshold passes the test.
    Any,
    /// Every question must reach the threshold.
    All,
}

/// How many previous questions to feed into the AI context.
///
/// Serializes as a plain integer or the string `"all"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextDepth {
    /// Include the whole test so far.
    #[serde(rename = "all")]
    All,
    /// Include at most this many previous questions.
    #[serde(untagged)]
    Limit(u32),
}

/// The research-study sub-record as authored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResearchSettings {
    #[serde(default)]
    pub pre_commitment_enabled: Option<bool>,
    #[serde(default)]
    pub pre_commitment_frequency: Option<u32>,
    #[serde(default)]
    pub ai_suggestions_enabled: Option<bool>,
    #[serde(default)]
    pub ai_suggestion_frequency: Option<u32>,
    #[serde(default)]
    pub ai_suggestion_types: Option<Vec<String>>,
}

/// `settings.json` as authored: everything optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub time_limit_minutes: Option<u32>,
    #[serde(default)]
    pub randomize_order: Option<bool>,
    #[serde(default)]
    pub max_score: Option<u32>,
    #[serde(default)]
    pub mode: Option<ScoringMode>,
    #[serde(default)]
    pub passing_score: Option<f64>,
    #[serde(default)]
    pub passing_mode: Option<PassingMode>,
    #[serde(default)]
    pub include_previous_context: Option<bool>,
    #[serde(default)]
    pub context_depth: Option<ContextDepth>,
    #[serde(default)]
    pub show_ai_recommendation: Option<bool>,
    #[serde(default)]
    pub enable_final_overview: Option<bool>,
    #[serde(default)]
    pub final_overview_replace_score: Option<bool>,
    #[serde(default)]
    pub final_overview_student_visible: Option<bool>,
    #[serde(default)]
    pub final_overview_teacher_visible: Option<bool>,
    #[serde(default)]
    pub research: Option<ResearchSettings>,
}

/// The research sub-record with defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedResearchSettings {
    pub pre_commitment_enabled: bool,
    pub pre_commitment_frequency: u32,
    pub ai_suggestions_enabled: bool,
    pub ai_suggestion_frequency: u32,
    pub ai_suggestion_types: Vec<String>,
}

/// Settings with every field present, as the platform expects them.
///
/// `time_limit_minutes` and `passing_score` default to `null`, so they are
/// serialized even when `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSettings {
    pub time_limit_minutes: Option<u32>,
    pub randomize_order: bool,
    pub max_score: u32,
    pub mode: ScoringMode,
    pub passing_score: Option<f64>,
    pub passing_mode: PassingMode,
    pub include_previous_context: bool,
    pub context_depth: ContextDepth,
    pub show_ai_recommendation: bool,
    pub enable_final_overview: bool,
    pub final_overview_replace_score: bool,
    pub final_overview_student_visible: bool,
    pub final_overview_teacher_visible: bool,
    pub research: ResolvedResearchSettings,
}

impl ResearchSettings {
    /// Apply the documented defaults.
    pub fn resolve(self) -> ResolvedResearchSettings {
        ResolvedResearchSettings {
            pre_commitment_enabled: self.pre_commitment_enabled.unwrap_or(false),
            pre_commitment_frequency: self.pre_commitment_frequency.unwrap_or(0),
            ai_suggestions_enabled: self.ai_suggestions_enabled.unwrap_or(false),
            ai_suggestion_frequency: self.ai_suggestion_frequency.unwrap_or(0),
            ai_suggestion_types: self.ai_suggestion_types.unwrap_or_default(),
        }
    }
}

impl Settings {
    /// Apply the documented defaults.
    pub fn resolve(self) -> ResolvedSettings {
        ResolvedSettings {
            time_limit_minutes: self.time_limit_minutes,
            randomize_order: self.randomize_order.unwrap_or(false),
            max_score: self.max_score.unwrap_or(10),
            mode: self.mode.unwrap_or(ScoringMode::Training),
            passing_score: self.passing_score,
            passing_mode: self.passing_mode.unwrap_or(PassingMode::Any),
            include_previous_context: self.include_previous_context.unwrap_or(false),
            context_depth: self.context_depth.unwrap_or(ContextDepth::All),
            show_ai_recommendation: self.show_ai_recommendation.unwrap_or(true),
            enable_final_overview: self.enable_final_overview.unwrap_or(false),
            final_overview_replace_score: self.final_overview_replace_score.unwrap_or(false),
            final_overview_student_visible: self.final_overview_student_visible.unwrap_or(true),
            final_overview_teacher_visible: self.final_overview_teacher_visible.unwrap_or(true),
            research: self.research.unwrap_or_default().resolve(),
        }
    }
}
