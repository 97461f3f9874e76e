use thiserror::Error;

/// Why a generation request produced no scripts.
///
/// `MissingField` and `MissingInitials` are input problems the user fixes and
/// retries. `UnboundSlot` means a template references a value the renderer
/// does not provide.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeploymentError {
    #[error(
        "Please fill in all required fields: Source Table Name, Business Key, and SCD2 Columns (missing: {})",
        .fields.join(", ")
    )]
    MissingField { fields: Vec<&'static str> },
    #[error("Please enter your initials")]
    MissingInitials,
    #[error("template slot `{slot}` has no value")]
    UnboundSlot { slot: String },
}

impl DeploymentError {
    /// Stable identifier for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            DeploymentError::MissingField { .. } => "missing_field",
            DeploymentError::MissingInitials => "missing_initials",
            DeploymentError::UnboundSlot { .. } => "unbound_slot",
        }
    }

    pub fn is_validation(&self) -> bool {
        !matches!(self, DeploymentError::UnboundSlot { .. })
    }
}
