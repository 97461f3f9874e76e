//! The deployment request assembled from the form, plus the choice sets the
//! form offers.
//!
//! A `DeploymentRequest` only stores what the user typed or picked. Table
//! names for the ST and HS layers are derived on every call so they can never
//! drift from `source_table_name`.

use crate::error::DeploymentError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_SCHEMA: &str = "TIA";
pub const DEFAULT_DELETE_COLUMN: &str = "DELETED_FLAG";
pub const DEFAULT_DELETE_VALUE: &str = "Y";

/// Schema of the first-landing staging tables.
pub const STAGING_SCHEMA: &str = "ST";
/// Schema of the SCD2 historized tables.
pub const HISTORIC_SCHEMA: &str = "HS";

/// Source system used by the `ST_Full_Initial` job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceSystemInitial {
    #[default]
    #[serde(rename = "Replicate_Full")]
    ReplicateFull,
}

impl SourceSystemInitial {
    pub const ALL: [SourceSystemInitial; 1] = [SourceSystemInitial::ReplicateFull];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceSystemInitial::ReplicateFull => "Replicate_Full",
        }
    }
}

/// Source system used by the `ST_Full_Daily` job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceSystemDaily {
    #[default]
    #[serde(rename = "Replicate_CDC")]
    ReplicateCdc,
}

impl SourceSystemDaily {
    pub const ALL: [SourceSystemDaily; 1] = [SourceSystemDaily::ReplicateCdc];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceSystemDaily::ReplicateCdc => "Replicate_CDC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteType {
    #[serde(rename = "SOFT")]
    Soft,
}

impl DeleteType {
    pub const ALL: [DeleteType; 1] = [DeleteType::Soft];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteType::Soft => "SOFT",
        }
    }
}

/// Everything the user supplies for one deployment.
///
/// Missing JSON fields fall back to the same defaults the form pre-fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentRequest {
    pub user_initials: String,
    pub source_system_initial: SourceSystemInitial,
    pub source_system_daily: SourceSystemDaily,
    pub source_schema_name: String,
    pub source_table_name: String,
    /// Comma-separated column list, passed through untouched.
    pub business_key: String,
    /// Comma-separated column list, passed through untouched.
    pub scd2_columns: String,
    pub delete_type: Option<DeleteType>,
    pub source_delete_column: String,
    pub source_delete_value: String,
    /// Accepted from the form but does not change any generated step.
    pub skip_staging_table_exists: bool,
    pub skip_historic_table_exists: bool,
}

impl Default for DeploymentRequest {
    fn default() -> Self {
        Self {
            user_initials: String::new(),
            source_system_initial: SourceSystemInitial::default(),
            source_system_daily: SourceSystemDaily::default(),
            source_schema_name: DEFAULT_SOURCE_SCHEMA.to_string(),
            source_table_name: String::new(),
            business_key: String::new(),
            scd2_columns: String::new(),
            delete_type: None,
            source_delete_column: DEFAULT_DELETE_COLUMN.to_string(),
            source_delete_value: DEFAULT_DELETE_VALUE.to_string(),
            skip_staging_table_exists: false,
            skip_historic_table_exists: false,
        }
    }
}

impl DeploymentRequest {
    /// Returns the request with its initials lower-cased, the way the form
    /// stores them as soon as they are typed.
    pub fn normalized(mut self) -> Self {
        self.user_initials = self.user_initials.to_lowercase();
        self
    }

    /// Checks the required fields. Missing table/key/SCD2 input is reported
    /// before missing initials.
    pub fn validate(&self) -> Result<(), DeploymentError> {
        let fields: Vec<&'static str> = [
            ("source_table_name", &self.source_table_name),
            ("business_key", &self.business_key),
            ("scd2_columns", &self.scd2_columns),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if !fields.is_empty() {
            return Err(DeploymentError::MissingField { fields });
        }
        if self.user_initials.is_empty() {
            return Err(DeploymentError::MissingInitials);
        }
        Ok(())
    }

    /// Name of the change-tracking table the daily job reads from.
    pub fn source_table_name_ct(&self) -> String {
        format!("{}__ct", self.source_table_name)
    }

    pub fn target_staging_schema(&self) -> &'static str {
        STAGING_SCHEMA
    }

    pub fn target_staging_table(&self) -> String {
        format!("ST_{}", self.source_table_name)
    }

    pub fn target_historic_schema(&self) -> &'static str {
        HISTORIC_SCHEMA
    }

    pub fn target_historic_table(&self) -> String {
        format!("HS_{}", self.source_table_name)
    }

    /// Text written into `delete_type` of the Daily stage row. An unset
    /// delete type is written as the literal `None`, not SQL `NULL`; the
    /// existing control tables were loaded that way.
    // TODO: switch to NULL once the product owner confirms the job runner accepts it.
    pub fn delete_type_text(&self) -> &'static str {
        self.delete_type.as_ref().map_or("None", DeleteType::as_str)
    }

    /// Human-readable creator shown in the script header.
    pub fn creator(&self) -> String {
        self.user_initials.to_uppercase()
    }
}

/// Choice sets and defaults a form needs to offer the inputs of a
/// `DeploymentRequest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormOptions {
    pub source_systems_initial: Vec<SourceSystemInitial>,
    pub source_systems_daily: Vec<SourceSystemDaily>,
    /// `None` is offered as the first choice.
    pub delete_types: Vec<Option<DeleteType>>,
    pub defaults: DeploymentRequest,
}

impl Default for FormOptions {
    fn default() -> Self {
        let mut delete_types = vec![None];
        delete_types.extend(DeleteType::ALL.into_iter().map(Some));
        Self {
            source_systems_initial: SourceSystemInitial::ALL.to_vec(),
            source_systems_daily: SourceSystemDaily::ALL.to_vec(),
            delete_types,
            defaults: DeploymentRequest::default(),
        }
    }
}
