//! Rendered output: the six display sections, the generation stamp they all
//! share, and the downloadable artifact.

use crate::model::deployment::DeploymentRequest;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const SCRIPT_MIME_TYPE: &str = "text/plain";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    ControlTablesBackup,
    StageControlTable,
    HistoricControlTable,
    JobControlTable,
    CreateHistoricTable,
    Cleanup,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::ControlTablesBackup,
        Step::StageControlTable,
        Step::HistoricControlTable,
        Step::JobControlTable,
        Step::CreateHistoricTable,
        Step::Cleanup,
    ];

    pub fn number(&self) -> u8 {
        match self {
            Step::ControlTablesBackup => 1,
            Step::StageControlTable => 2,
            Step::HistoricControlTable => 3,
            Step::JobControlTable => 4,
            Step::CreateHistoricTable => 5,
            Step::Cleanup => 6,
        }
    }

    /// Short label of the display tab.
    pub fn tab_title(&self) -> &'static str {
        match self {
            Step::ControlTablesBackup => "1. Control Tables Backup",
            Step::StageControlTable => "2. ST Control Table",
            Step::HistoricControlTable => "3. HS Control Table",
            Step::JobControlTable => "4. Job Control Table",
            Step::CreateHistoricTable => "5. Create HS Table",
            Step::Cleanup => "6. Cleanup",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Step::ControlTablesBackup => "Step 1: Create Temporary Control Tables",
            Step::StageControlTable => "Step 2: Update ST Control Table",
            Step::HistoricControlTable => "Step 3: Update HS Control Table",
            Step::JobControlTable => "Step 4: Update Job Control Table",
            Step::CreateHistoricTable => "Step 5: Create HS Table",
            Step::Cleanup => "Step 6: Cleanup - Add to Production Control Tables",
        }
    }

    /// Title used in the full-script banner, e.g. `STEP 1: CREATE TEMPORARY CONTROL TABLES`.
    pub fn banner(&self) -> String {
        self.heading().to_uppercase()
    }
}

/// Values fixed at the moment of a successful generation and shared by every
/// section, the header and the file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStamp {
    /// `YYYYMMDD`
    pub date: String,
    /// `<initials>_<YYYYMMDD>`, namespaces the sandbox tables of one run.
    pub table_suffix: String,
    /// `YYYY-MM-DD HH:MM:SS`, shown in the script header.
    pub generated_at: String,
}

impl GenerationStamp {
    /// `initials` are expected to be lower-cased already.
    pub fn new(initials: &str, now: NaiveDateTime) -> Self {
        let date = now.format("%Y%m%d").to_string();
        Self {
            table_suffix: format!("{}_{}", initials, date),
            generated_at: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            date,
        }
    }
}

/// One read-only display region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSection {
    pub step: Step,
    /// 1-based position, as shown on the tab.
    pub number: u8,
    pub title: String,
    pub heading: String,
    pub sql: String,
    /// Operator notes shown next to the SQL. Never part of the full script.
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptArtifact {
    pub file_name: String,
    pub mime_type: String,
    pub content: String,
}

impl ScriptArtifact {
    pub fn file_name_for(source_table_name: &str, table_suffix: &str) -> String {
        format!("deploy_{}_{}.sql", source_table_name, table_suffix)
    }
}

/// Result of one successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDeployment {
    pub request: DeploymentRequest,
    pub stamp: GenerationStamp,
    pub sections: Vec<ScriptSection>,
    pub full_script: String,
}

impl GeneratedDeployment {
    pub fn file_name(&self) -> String {
        ScriptArtifact::file_name_for(&self.request.source_table_name, &self.stamp.table_suffix)
    }

    pub fn artifact(&self) -> ScriptArtifact {
        ScriptArtifact {
            file_name: self.file_name(),
            mime_type: SCRIPT_MIME_TYPE.to_string(),
            content: self.full_script.clone(),
        }
    }
}
