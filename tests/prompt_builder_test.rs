use serde_json::json;

use lexguard::application::services::{build_analysis_prompt, build_question_prompt};
use lexguard::domain::{ConversationTurn, Parties, TurnRole};

#[test]
fn given_document_text_when_building_analysis_prompt_then_text_is_embedded_verbatim() {
    let text = "The licensee shall indemnify the licensor against all claims.";

    let prompt = build_analysis_prompt(text, None);

    assert!(prompt.contains(text));
    assert!(prompt.contains("riskAssessment"));
    assert!(prompt.contains("flowchart"));
    assert!(prompt.contains("suggestedQuestions"));
}

#[test]
fn given_parties_when_building_analysis_prompt_then_parties_appear_conditionally() {
    let text = "Some agreement text.";
    let parties = Parties {
        party1: Some("Acme Corp".to_string()),
        party2: Some("Jane Doe".to_string()),
    };

    let with_parties = build_analysis_prompt(text, Some(&parties));
    let without_parties = build_analysis_prompt(text, None);

    assert!(with_parties.contains("Acme Corp"));
    assert!(with_parties.contains("Jane Doe"));
    assert!(!without_parties.contains("Acme Corp"));
}

#[test]
fn given_same_inputs_when_building_analysis_prompt_then_output_is_deterministic() {
    let text = "Deterministic agreement text.";

    assert_eq!(
        build_analysis_prompt(text, None),
        build_analysis_prompt(text, None)
    );
}

#[test]
fn given_analysis_prompt_when_built_then_risk_rules_forbid_fabricated_findings() {
    let prompt = build_analysis_prompt("Text.", None);

    assert!(prompt.contains("Do not invent moderate or critical findings"));
    assert!(prompt.contains("start, party, process, decision, end"));
}

#[test]
fn given_history_when_building_question_prompt_then_turns_are_replayed_in_order() {
    let history = vec![
        ConversationTurn {
            role: TurnRole::User,
            content: "Is the deposit refundable?".to_string(),
        },
        ConversationTurn {
            role: TurnRole::Assistant,
            content: "Yes, within 30 days.".to_string(),
        },
    ];
    let context = json!({ "summary": { "documentType": "Lease" } });

    let prompt = build_question_prompt("What about interest?", &context, &history, None);

    let user_pos = prompt.find("User: Is the deposit refundable?").unwrap();
    let assistant_pos = prompt.find("Assistant: Yes, within 30 days.").unwrap();
    let question_pos = prompt.find("QUESTION: What about interest?").unwrap();
    assert!(user_pos < assistant_pos);
    assert!(assistant_pos < question_pos);
}

#[test]
fn given_question_prompt_when_built_then_plain_prose_output_is_required() {
    let prompt = build_question_prompt("Why?", &json!({}), &[], Some("Original text here."));

    assert!(prompt.contains("plain prose"));
    assert!(prompt.contains("Original text here."));
}
