/// Lifecycle state reported by the scraping service for a run.
///
/// The status vocabulary is open-ended; only `SUCCEEDED` and the known
/// failure states are classified as terminal. Everything else is carried
/// verbatim so callers can surface it and poll again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Terminal: the run finished and its dataset is complete.
    Succeeded,
    /// Terminal: the run ended without producing a complete dataset.
    Ended(String),
    /// Non-terminal: the run is still progressing.
    InProgress(String),
}

impl RunStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "SUCCEEDED" => RunStatus::Succeeded,
            "FAILED" | "ABORTED" | "TIMED-OUT" => RunStatus::Ended(raw.to_string()),
            other => RunStatus::InProgress(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::InProgress(_))
    }

    /// The raw status string as reported by the service.
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Succeeded => "SUCCEEDED",
            RunStatus::Ended(s) | RunStatus::InProgress(s) => s,
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeded_is_terminal_success() {
        let status = RunStatus::parse("SUCCEEDED");
        assert_eq!(status, RunStatus::Succeeded);
        assert!(status.is_terminal());
    }

    #[test]
    fn failure_states_are_terminal_but_not_success() {
        for raw in ["FAILED", "ABORTED", "TIMED-OUT"] {
            let status = RunStatus::parse(raw);
            assert!(status.is_terminal(), "{raw} should be terminal");
            assert_ne!(status, RunStatus::Succeeded);
            assert_eq!(status.as_str(), raw);
        }
    }

    #[test]
    fn unknown_states_are_carried_verbatim_as_in_progress() {
        for raw in ["READY", "RUNNING", "ABORTING", "SOME-NEW-STATE"] {
            let status = RunStatus::parse(raw);
            assert!(!status.is_terminal(), "{raw} should be non-terminal");
            assert_eq!(status.as_str(), raw);
        }
    }
}
