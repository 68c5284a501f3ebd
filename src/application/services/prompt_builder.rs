use serde_json::Value;

use crate::domain::{ConversationTurn, Parties};

const ANALYSIS_SCHEMA: &str = r#"{
  "summary": {
    "documentType": "<short label, e.g. 'Residential Lease Agreement'>",
    "overview": "<2-4 sentence plain-language summary of what this document does>",
    "wordCount": 0
  },
  "riskAssessment": {
    "riskScore": 0,
    "favorable": [{ "type": "<clause category>", "description": "<why this works in the reader's favor>", "location": "<section or quote>" }],
    "moderate": [{ "type": "<clause category>", "description": "<what deserves attention>", "location": "<section or quote>" }],
    "critical": [{ "type": "<clause category>", "description": "<why this is dangerous>", "location": "<section or quote>" }]
  },
  "vagueTerms": [{ "term": "<ambiguous wording>", "concern": "<how it could be read against the reader>", "location": "<section or quote>" }],
  "keyTerms": [{ "term": "<legal term used in the document>", "definition": "<plain-language definition>" }],
  "legalReferences": ["<statute, regulation or doctrine the document invokes>"],
  "recommendations": ["<concrete action the reader should take before signing>"],
  "redFlags": ["<provision that warrants professional review>"],
  "suggestedQuestions": [{ "question": "<question a reader would ask about this document>", "answer": "<grounded answer>" }],
  "flowchart": {
    "nodes": [{ "id": "n1", "type": "start", "label": "<step label>", "position": { "x": 0, "y": 0 } }],
    "edges": [{ "id": "e1", "source": "n1", "target": "n2", "label": "<transition label>" }]
  }
}"#;

/// Render the single-shot analysis instruction for a document.
///
/// The template is deterministic: same text and parties, same prompt.
pub fn build_analysis_prompt(text: &str, parties: Option<&Parties>) -> String {
    let mut prompt = String::with_capacity(text.len() + 4096);

    prompt.push_str(
        "You are a legal document analyst. Review the document below and respond with a \
         single JSON object, no surrounding prose and no markdown code fences.\n\n",
    );

    if let Some(parties) = parties.filter(|p| !p.is_empty()) {
        prompt.push_str("The reader has identified the parties involved:\n");
        if let Some(party1) = &parties.party1 {
            prompt.push_str(&format!("- First party: {}\n", party1));
        }
        if let Some(party2) = &parties.party2 {
            prompt.push_str(&format!("- Second party: {}\n", party2));
        }
        prompt.push_str("Assess risk from the perspective of the first party.\n\n");
    }

    prompt.push_str("DOCUMENT:\n---\n");
    prompt.push_str(text);
    prompt.push_str("\n---\n\n");

    prompt.push_str("Fill in exactly this JSON structure:\n");
    prompt.push_str(ANALYSIS_SCHEMA);

    prompt.push_str(
        "\n\nRisk tiering rules:\n\
         - \"favorable\": clauses that protect or benefit the reader.\n\
         - \"moderate\": clauses that deserve attention or negotiation but are not dangerous.\n\
         - \"critical\": clauses that expose the reader to serious loss of money, rights or recourse.\n\
         - Do not invent moderate or critical findings. If the document genuinely contains \
         none, return empty arrays for those tiers.\n\n\
         Flowchart conventions:\n\
         - Describe the obligations and decision points of the document as a directed graph.\n\
         - Node \"type\" must be one of: start, party, process, decision, end.\n\
         - Place start nodes toward the top-left (small x and y) and end nodes toward the \
         bottom-right (large x and y); spread intermediate nodes between them.\n\
         - Every edge must reference existing node ids.\n",
    );

    prompt
}

/// Render the conversational follow-up prompt for the Q&A endpoints.
pub fn build_question_prompt(
    question: &str,
    analysis_context: &Value,
    history: &[ConversationTurn],
    original_text: Option<&str>,
) -> String {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str(
        "You are answering follow-up questions about a legal document that was previously \
         analyzed. Ground every answer in the analysis and document excerpts below.\n\n",
    );

    prompt.push_str("PRIOR ANALYSIS:\n");
    prompt.push_str(&analysis_context.to_string());
    prompt.push_str("\n\n");

    if let Some(text) = original_text.filter(|t| !t.trim().is_empty()) {
        prompt.push_str("ORIGINAL DOCUMENT TEXT:\n---\n");
        prompt.push_str(text);
        prompt.push_str("\n---\n\n");
    }

    if !history.is_empty() {
        prompt.push_str("CONVERSATION SO FAR:\n");
        for turn in history {
            prompt.push_str(&format!("{}: {}\n", turn.role.as_str(), turn.content));
        }
        prompt.push('\n');
    }

    prompt.push_str(&format!("QUESTION: {}\n\n", question));
    prompt.push_str(
        "Answer in plain prose only. Do not use markdown, bullet characters, headings or \
         any other markup. If the document does not address the question, say so and \
         recommend consulting a qualified attorney.",
    );

    prompt
}
