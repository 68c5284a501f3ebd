use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full analysis tree returned to clients.
///
/// Every array-valued field defaults to empty so a partial model response
/// still deserializes into a complete shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Analysis {
    pub summary: Summary,
    pub risk_assessment: RiskAssessment,
    pub vague_terms: Vec<VagueTerm>,
    pub key_terms: Vec<KeyTerm>,
    pub legal_references: Vec<String>,
    pub recommendations: Vec<String>,
    pub red_flags: Vec<String>,
    pub suggested_questions: Vec<SuggestedQuestion>,
    pub flowchart: Flowchart,
    #[serde(skip_deserializing)]
    pub metadata: AnalysisMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Summary {
    pub document_type: String,
    pub overview: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskAssessment {
    pub risk_score: u8,
    pub favorable: Vec<RiskFinding>,
    pub moderate: Vec<RiskFinding>,
    pub critical: Vec<RiskFinding>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskFinding {
    pub r#type: String,
    pub description: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VagueTerm {
    pub term: String,
    pub concern: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyTerm {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestedQuestion {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Flowchart {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowNode {
    pub id: String,
    pub r#type: String,
    pub label: String,
    pub position: NodePosition,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodePosition {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
}

/// Attached by the normalizer, never taken from the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisMetadata {
    pub analysis_id: String,
    pub generated_at: Option<DateTime<Utc>>,
    pub model: String,
    pub parties: Parties,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Optional counterparty names echoed back through the analysis.
///
/// Serializes to `{}` when neither name was supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party2: Option<String>,
}

impl Parties {
    pub fn is_empty(&self) -> bool {
        self.party1.is_none() && self.party2.is_none()
    }
}
