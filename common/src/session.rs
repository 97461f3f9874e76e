//! Per-session generation state.
//!
//! A session starts in `AwaitingInput` and moves to `Generated` on the first
//! successful `generate`. A later successful call replaces the cached output;
//! a failed call returns the error and leaves whatever was cached before.

use crate::error::DeploymentError;
use crate::model::deployment::DeploymentRequest;
use crate::model::script::{GeneratedDeployment, GenerationStamp, ScriptArtifact};
use crate::render::render;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    AwaitingInput,
    Generated,
}

#[derive(Debug, Clone, Default)]
pub struct DeploymentSession {
    generated: Option<GeneratedDeployment>,
}

impl DeploymentSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        match self.generated {
            Some(_) => SessionPhase::Generated,
            None => SessionPhase::AwaitingInput,
        }
    }

    /// Validates `request`, stamps it with `now` and renders every section.
    ///
    /// The stamp is computed only after validation passes, so a rejected
    /// request never touches the suffix or timestamp of the cached output.
    pub fn generate(
        &mut self,
        request: DeploymentRequest,
        now: NaiveDateTime,
    ) -> Result<&GeneratedDeployment, DeploymentError> {
        let request = request.normalized();
        request.validate()?;

        let stamp = GenerationStamp::new(&request.user_initials, now);
        let scripts = render(&request, &stamp)?;

        Ok(&*self.generated.insert(GeneratedDeployment {
            request,
            stamp,
            sections: scripts.sections,
            full_script: scripts.full_script,
        }))
    }

    pub fn deployment(&self) -> Option<&GeneratedDeployment> {
        self.generated.as_ref()
    }

    /// The download for the cached output, if any.
    pub fn artifact(&self) -> Option<ScriptArtifact> {
        self.generated.as_ref().map(GeneratedDeployment::artifact)
    }
}
