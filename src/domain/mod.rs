mod analysis;
mod conversation;
mod document;
mod user_record;

pub use analysis::{
    Analysis, AnalysisMetadata, FlowEdge, FlowNode, Flowchart, KeyTerm, NodePosition, Parties,
    RiskAssessment, RiskFinding, SuggestedQuestion, Summary, VagueTerm,
};
pub use conversation::{ConversationTurn, TurnRole};
pub use document::DocumentKind;
pub use user_record::UserDataRecord;
