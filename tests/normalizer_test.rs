use lexguard::application::services::{normalize, risk_score};
use lexguard::domain::Parties;

const SOURCE_TEXT: &str = "The tenant shall pay rent on the first of each month.";

#[test]
fn given_zero_counts_when_scoring_then_returns_neutral_midpoint() {
    assert_eq!(risk_score(0, 0, 0), 50);
}

#[test]
fn given_only_favorable_findings_when_scoring_then_returns_full_score() {
    assert_eq!(risk_score(4, 0, 0), 100);
}

#[test]
fn given_only_critical_findings_when_scoring_then_returns_zero() {
    assert_eq!(risk_score(0, 0, 5), 0);
}

#[test]
fn given_mixed_findings_when_scoring_then_moderates_count_half() {
    // round(100 * (2 + 0.5*2) / 6) = 50
    assert_eq!(risk_score(2, 2, 2), 50);
    // round(100 * (1 + 0.5*1) / 2) = 75
    assert_eq!(risk_score(1, 1, 0), 75);
    // round(100 * 0.5 / 1) = 50
    assert_eq!(risk_score(0, 1, 0), 50);
}

#[test]
fn given_arbitrary_counts_when_scoring_then_score_stays_in_range() {
    for favorable in 0..12 {
        for moderate in 0..12 {
            for critical in 0..12 {
                let score = risk_score(favorable, moderate, critical);
                assert!(score <= 100, "score {} out of range", score);
            }
        }
    }
}

#[test]
fn given_model_risk_score_when_normalizing_then_score_is_recomputed() {
    let raw = r#"{
        "riskAssessment": {
            "riskScore": 3,
            "favorable": [{ "type": "Termination", "description": "Mutual exit rights", "location": "Section 8" }],
            "moderate": [],
            "critical": []
        }
    }"#;

    let analysis = normalize(raw, None, SOURCE_TEXT, "test-model");

    assert_eq!(analysis.risk_assessment.risk_score, 100);
}

#[test]
fn given_missing_array_fields_when_normalizing_then_all_fields_are_present() {
    let raw = r#"{ "summary": { "documentType": "Lease", "overview": "A lease." } }"#;

    let analysis = normalize(raw, None, SOURCE_TEXT, "test-model");

    assert!(analysis.legal_references.is_empty());
    assert!(analysis.vague_terms.is_empty());
    assert!(analysis.key_terms.is_empty());
    assert!(analysis.red_flags.is_empty());
    assert!(analysis.recommendations.is_empty());
    assert!(analysis.flowchart.nodes.is_empty());
    // Suggested questions fall back to the generic set rather than empty.
    assert!(!analysis.suggested_questions.is_empty());
    assert_eq!(analysis.summary.document_type, "Lease");
}

#[test]
fn given_fenced_model_output_when_normalizing_then_payload_is_parsed() {
    let raw = "```json\n{ \"summary\": { \"documentType\": \"NDA\", \"overview\": \"x\" } }\n```";

    let analysis = normalize(raw, None, SOURCE_TEXT, "test-model");

    assert_eq!(analysis.summary.document_type, "NDA");
    assert!(analysis.metadata.error.is_none());
}

#[test]
fn given_unparseable_output_when_normalizing_then_returns_degraded_analysis() {
    let analysis = normalize("the model rambled instead", None, SOURCE_TEXT, "test-model");

    assert_eq!(analysis.risk_assessment.moderate.len(), 1);
    assert_eq!(analysis.risk_assessment.moderate[0].r#type, "Analysis Error");
    assert_eq!(analysis.metadata.error.as_deref(), Some("JSON parsing failed"));
    assert_eq!(
        analysis.summary.word_count,
        SOURCE_TEXT.split_whitespace().count()
    );
    // One moderate finding and nothing else scores the neutral midpoint.
    assert_eq!(analysis.risk_assessment.risk_score, 50);
}

#[test]
fn given_parties_when_normalizing_then_metadata_echoes_them() {
    let parties = Parties {
        party1: Some("Acme Corp".to_string()),
        party2: None,
    };

    let analysis = normalize("{}", Some(&parties), SOURCE_TEXT, "test-model");

    assert_eq!(analysis.metadata.parties.party1.as_deref(), Some("Acme Corp"));
    assert_eq!(analysis.metadata.model, "test-model");
    assert!(!analysis.metadata.analysis_id.is_empty());
    assert!(analysis.metadata.generated_at.is_some());
}

#[test]
fn given_word_count_from_model_when_normalizing_then_count_is_recomputed_from_source() {
    let raw = r#"{ "summary": { "documentType": "Lease", "overview": "x", "wordCount": 9999 } }"#;

    let analysis = normalize(raw, None, SOURCE_TEXT, "test-model");

    assert_eq!(
        analysis.summary.word_count,
        SOURCE_TEXT.split_whitespace().count()
    );
}
