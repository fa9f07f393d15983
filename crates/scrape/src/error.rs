use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("scraper API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("run '{0}' does not exist or the identifier is incorrect")]
    RunNotFound(String),

    #[error("run identifier '{0}' is badly formed or in an invalid format")]
    MalformedRunId(String),

    #[error("failed to parse scraper response: {0}")]
    Parse(String),

    #[error("scraper not configured: {0}")]
    NotConfigured(&'static str),
}

/// Classify a non-2xx API response for a run lookup. The service reports
/// unknown and malformed identifiers only through its error text, so the
/// body is inspected for the known patterns; anything else stays a generic
/// API error.
pub fn classify_run_error(run_id: &str, status: u16, body: String) -> ScrapeError {
    let lower = body.to_lowercase();
    if lower.contains("does not exist") || lower.contains("not found") {
        ScrapeError::RunNotFound(run_id.to_string())
    } else if lower.contains("badly formed") || lower.contains("invalid format") {
        ScrapeError::MalformedRunId(run_id.to_string())
    } else {
        ScrapeError::Api { status, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_text_maps_to_run_not_found() {
        let err = classify_run_error("abc", 404, "Run with id abc was not found".into());
        assert!(matches!(err, ScrapeError::RunNotFound(id) if id == "abc"));

        let err = classify_run_error("abc", 404, "record does not exist".into());
        assert!(matches!(err, ScrapeError::RunNotFound(_)));
    }

    #[test]
    fn malformed_text_maps_to_malformed_run_id() {
        let err = classify_run_error("!!", 400, "identifier is badly formed".into());
        assert!(matches!(err, ScrapeError::MalformedRunId(id) if id == "!!"));

        let err = classify_run_error("!!", 400, "id has an INVALID FORMAT".into());
        assert!(matches!(err, ScrapeError::MalformedRunId(_)));
    }

    #[test]
    fn other_errors_stay_generic() {
        let err = classify_run_error("abc", 500, "internal server error".into());
        match err {
            ScrapeError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal server error");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
