//! Artifact workflow errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by the DFD → ETP workflow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtifactError {
    /// An artifact was requested before the one it derives from.
    #[error("{artifact} requires a {requires} generated from the same project snapshot")]
    MissingPrerequisite {
        artifact: &'static str,
        requires: &'static str,
    },
}

impl ArtifactError {
    pub fn missing_prerequisite(artifact: &'static str, requires: &'static str) -> Self {
        ArtifactError::MissingPrerequisite { artifact, requires }
    }

    /// Portuguese guidance for the user.
    pub fn user_message(&self) -> String {
        match self {
            ArtifactError::MissingPrerequisite { artifact, requires } => format!(
                "Gere o {} antes de gerar o {} para este projeto.",
                requires, artifact
            ),
        }
    }
}

impl From<ArtifactError> for DomainError {
    fn from(err: ArtifactError) -> Self {
        match &err {
            ArtifactError::MissingPrerequisite { artifact, requires } => {
                DomainError::new(ErrorCode::MissingPrerequisite, err.to_string())
                    .with_detail("artifact", *artifact)
                    .with_detail("requires", *requires)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_domain_error_with_code() {
        let err: DomainError = ArtifactError::missing_prerequisite("ETP", "DFD").into();
        assert_eq!(err.code, ErrorCode::MissingPrerequisite);
        assert_eq!(err.details.get("requires").map(String::as_str), Some("DFD"));
    }

    #[test]
    fn user_message_names_prerequisite() {
        let msg = ArtifactError::missing_prerequisite("ETP", "DFD").user_message();
        assert_eq!(msg, "Gere o DFD antes de gerar o ETP para este projeto.");
    }
}
