use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Analysis, AnalysisMetadata, Parties, RiskFinding, SuggestedQuestion};

/// Deterministic score from tier counts. The model's own riskScore field is
/// always overwritten with this value.
pub fn risk_score(favorable: usize, moderate: usize, critical: usize) -> u8 {
    let total = favorable + moderate + critical;
    if total == 0 {
        return 50;
    }
    let score = 100.0 * (favorable as f64 + 0.5 * moderate as f64) / total as f64;
    score.round().clamp(0.0, 100.0) as u8
}

/// Turn raw model output into a complete, valid [`Analysis`].
///
/// Malformed JSON degrades to a fixed placeholder result rather than an
/// error: by the time the model has answered, the request has been paid for
/// and the caller still gets a usable shape.
pub fn normalize(raw: &str, parties: Option<&Parties>, source_text: &str, model: &str) -> Analysis {
    let payload = strip_code_fences(raw);

    let mut analysis = match serde_json::from_str::<Analysis>(payload) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "Model response was not valid JSON, degrading");
            return degraded_analysis(parties, source_text, model);
        }
    };

    analysis.risk_assessment.risk_score = risk_score(
        analysis.risk_assessment.favorable.len(),
        analysis.risk_assessment.moderate.len(),
        analysis.risk_assessment.critical.len(),
    );

    analysis.summary.word_count = word_count(source_text);

    if analysis.suggested_questions.is_empty() {
        analysis.suggested_questions = fallback_questions();
    }

    analysis.metadata = fresh_metadata(parties, model, None);
    analysis
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
    else {
        return trimmed;
    };
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn fresh_metadata(parties: Option<&Parties>, model: &str, error: Option<String>) -> AnalysisMetadata {
    AnalysisMetadata {
        analysis_id: Uuid::new_v4().to_string(),
        generated_at: Some(Utc::now()),
        model: model.to_string(),
        parties: parties.cloned().unwrap_or_default(),
        error,
    }
}

fn degraded_analysis(parties: Option<&Parties>, source_text: &str, model: &str) -> Analysis {
    let mut analysis = Analysis::default();

    analysis.summary.document_type = "Legal Document".to_string();
    analysis.summary.overview = "The document was received but the automated analysis \
         could not be read. Resubmit the document to retry."
        .to_string();
    analysis.summary.word_count = word_count(source_text);

    analysis.risk_assessment.moderate = vec![RiskFinding {
        r#type: "Analysis Error".to_string(),
        description: "The analysis service returned a response that could not be parsed."
            .to_string(),
        location: "N/A".to_string(),
    }];
    analysis.risk_assessment.risk_score = risk_score(0, 1, 0);

    analysis.suggested_questions = fallback_questions();
    analysis.metadata = fresh_metadata(parties, model, Some("JSON parsing failed".to_string()));
    analysis
}

fn fallback_questions() -> Vec<SuggestedQuestion> {
    vec![
        SuggestedQuestion {
            question: "What are my main obligations under this document?".to_string(),
            answer: "Review the process steps in the analysis, or ask this question directly \
                 for a grounded answer."
                .to_string(),
        },
        SuggestedQuestion {
            question: "What happens if I want to terminate early?".to_string(),
            answer: "Look for termination or cancellation clauses in the document, or ask \
                 this question directly for a grounded answer."
                .to_string(),
        },
        SuggestedQuestion {
            question: "Which clauses should I negotiate before signing?".to_string(),
            answer: "The moderate and critical findings are the usual starting points for \
                 negotiation."
                .to_string(),
        },
    ]
}
