use crate::model::script::GeneratedDeployment;
use crate::session::SessionPhase;
use serde::{Deserialize, Serialize};

/// Response of the session creation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: String,
}

/// Current state of one session as shown to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: String,
    pub phase: SessionPhase,
    /// `None` while the session awaits input.
    pub deployment: Option<GeneratedDeployment>,
}

/// Error payload returned with every non-2xx API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
