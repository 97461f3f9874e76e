//! SQL skeletons for the six deployment steps.
//!
//! Every skeleton is literal text with `{{slot}}` placeholders that
//! `render::substitute` fills in verbatim. The text is emitted exactly as
//! written here, trailing whitespace included, so edits to these constants
//! change the generated scripts byte for byte.

use crate::model::deployment::DeploymentRequest;
use crate::model::script::Step;

/// Copies one Initial and one Daily row of the stage control table into the sandbox.
pub const CONTROL_TABLE_STAGE_BACKUP: &str = r#"-- Make a copy of DWH.CONTROL_TABLE_STAGE
WITH cte AS ( 	
    SELECT TOP 1 * FROM DWH.CONTROL_TABLE_STAGE WHERE job_name IN ('ST_Full_Initial') 	
    UNION ALL 	
    SELECT TOP 1 * FROM DWH.CONTROL_TABLE_STAGE WHERE job_name IN ('ST_Full_Daily') 	
) 	
SELECT *	
INTO sandbox.temp_control_table_st_{{table_suffix}} FROM cte;
"#;

pub const CONTROL_TABLE_HS_BACKUP: &str = r#"-- Make a copy of DWH.CONTROL_TABLE_HS
SELECT TOP 1 * 
INTO sandbox.temp_control_table_hs_{{table_suffix}} 
FROM DWH.CONTROL_TABLE_HS;
"#;

pub const JOB_CONTROL_BACKUP: &str = r#"-- Make a copy of DWH.JOB_CONTROL
SELECT * 
INTO sandbox.temp_control_table_job_{{table_suffix}} 
FROM DWH.JOB_CONTROL 
WHERE job_name IN ('ST_Full_Daily','ST_Full_Initial','HS_Full_Daily','HS_Full_Daily_Control','ST_Placeholder');
"#;

pub const STAGE_INITIAL_UPDATE: &str = r#"-- Update temporary control table for stage to reflect Initial Load values
UPDATE sandbox.temp_control_table_st_{{table_suffix}}
SET 
    job_name = 'ST_Full_Initial',
    source_system = '{{source_system_initial}}',
    src_schema_name = '{{source_schema}}',
    src_table_name = '{{source_table}}',
    tgt_schema_name = '{{staging_schema}}',
    tgt_table_name = '{{staging_table}}',
    business_key = '{{business_key}}',
    initial_load_valid_from_column = '__lowDate',
    incremental_filter_column = '__fullLoad',
    incremental_filter_column_timezone = 'UTC',
    skip = 0,
    priority = 0,
    delete_type = NULL,
    src_delete_column = NULL,
    src_delete_value = NULL 
WHERE job_name = 'ST_Full_Initial';
"#;

/// `delete_type` is interpolated as text, an unset delete type renders as `None`.
pub const STAGE_DAILY_UPDATE: &str = r#"-- Update temporary control table for stage to reflect Daily load values
UPDATE sandbox.temp_control_table_st_{{table_suffix}}
SET 
    job_name = 'ST_Full_Daily',
    source_system = '{{source_system_daily}}',
    src_schema_name = '{{source_schema}}',
    src_table_name = '{{source_table_ct}}',
    tgt_schema_name = '{{staging_schema}}',
    tgt_table_name = '{{staging_table}}',
    business_key = '{{business_key}}',
    initial_load_valid_from_column = '__lowDate',
    incremental_filter_column = 'header__timestamp',
    incremental_filter_column_timezone = 'UTC',
    skip = 0,
    priority = 0,
    delete_type = '{{delete_type}}',
    src_delete_column = '{{delete_column}}',
    src_delete_value = '{{delete_value}}'
WHERE job_name = 'ST_Full_Daily';
"#;

pub const HISTORIC_CONTROL_UPDATE: &str = r#"-- Update temporary control table for historic stage to reflect daily load values
UPDATE sandbox.temp_control_table_hs_{{table_suffix}}
SET job_name = 'HS_Full_Daily',
    src_schema_name = '{{staging_schema}}',
    src_table_name = '{{staging_table}}', 
    tgt_schema_name = '{{historic_schema}}',
    tgt_table_name = '{{historic_table}}', 
    business_key = '{{business_key}}',
    primary_key = 'TC_ROW_ID',
    incremental_filter_column = '__fullLoad',
    incremental_filter_column_timezone = 'UTC',
    scd_type = 'SCD2',
    scd2_columns = '{{scd2_columns}}',
    skip = 0,
    priority = 0,
    prescript = '',
    postscript = '',
    partitions = 1,
    use_source_column_for_valid_dates = 1,
    source_column_for_valid_from_date = 'header__timestamp';
"#;

pub const JOB_CONTROL_UPDATE: &str = r#"-- Update the control table so that the jobs are set to STATUS='SUCCESS'
UPDATE sandbox.temp_control_table_job_{{table_suffix}}
SET 
    STATUS = 'SUCCESS',
    LAST_LOAD_DATE = '1970-01-01',
    JOB_INTERVAL_IN_MINUTES = 0
WHERE job_name IN ('HS_Full_Daily','ST_Full_Daily','HS_Full_Daily_Control','ST_Full_Initial');
"#;

pub const HISTORIC_TABLE_CREATE: &str = r#"-- Create the HS table with technical columns
SELECT * INTO {{historic_schema}}.{{historic_table}} FROM {{staging_schema}}.{{staging_table}} WHERE 1 = 0;

ALTER TABLE {{historic_schema}}.{{historic_table}}
ADD TC_CURRENT_FLAG VARCHAR(1), 
    TC_VALID_FROM_DATE DATETIME2(0), 
    TC_VALID_TO_DATE DATETIME2(0), 
    TC_CHECKSUM_BUSKEY VARCHAR(32), 
    TC_CHECKSUM_SCD VARCHAR(32), 
    TC_DELETED_FLAG VARCHAR(1), 
    TC_DELETED_DATETIME DATETIME2(0),
    TC_INSERTED_DATE DATETIME2(0),
    TC_ROW_ID BIGINT IDENTITY(1,1) PRIMARY KEY;

ALTER TABLE {{historic_schema}}.{{historic_table}}
DROP COLUMN TC_INITIAL_LOAD_VALID_FROM_DATE;
"#;

pub const CLEANUP_STAGE: &str = r#"-- Add the stage job definition to DWH.CONTROL_TABLE_STAGE
-- Backup control table first
SELECT * INTO sandbox.CONTROL_TABLE_STAGE_backup_{{table_suffix}} FROM DWH.CONTROL_TABLE_STAGE;

-- Option to drop and recreate with new entries (commented out for safety)
/*
DROP TABLE DWH.CONTROL_TABLE_STAGE;

WITH cte AS (
    SELECT * FROM sandbox.temp_control_table_st_{{table_suffix}}
    UNION ALL
    SELECT * FROM sandbox.CONTROL_TABLE_STAGE_backup_{{table_suffix}} 
    WHERE job_name+'|'+source_system+'|'+src_schema_name+'|'+src_table_name+'|'+tgt_schema_name+'|'+tgt_table_name 
          NOT IN (SELECT job_name+'|'+source_system+'|'+src_schema_name+'|'+src_table_name+'|'+tgt_schema_name+'|'+tgt_table_name 
                  FROM sandbox.temp_control_table_st_{{table_suffix}})
)
SELECT * INTO DWH.CONTROL_TABLE_STAGE FROM cte;
*/
"#;

pub const CLEANUP_HISTORIC: &str = r#"-- Add the HS job definition to DWH.CONTROL_TABLE_HS
-- Backup control table first
SELECT * INTO sandbox.CONTROL_TABLE_HS_backup_{{table_suffix}} FROM DWH.CONTROL_TABLE_HS;

-- Option to drop and recreate with new entries (commented out for safety)
/*
DROP TABLE DWH.CONTROL_TABLE_HS;

WITH cte AS (
    SELECT * FROM sandbox.temp_control_table_hs_{{table_suffix}}
    UNION ALL
    SELECT * FROM sandbox.CONTROL_TABLE_HS_backup_{{table_suffix}} 
    WHERE job_name+'|'+src_schema_name+'|'+src_table_name+'|'+tgt_schema_name+'|'+tgt_table_name 
          NOT IN (SELECT job_name+'|'+src_schema_name+'|'+src_table_name+'|'+tgt_schema_name+'|'+tgt_table_name 
                  FROM sandbox.temp_control_table_hs_{{table_suffix}})
)
SELECT * INTO DWH.CONTROL_TABLE_HS FROM cte;
*/
"#;

/// Inert: the drop statements stay inside a block comment.
pub const CLEANUP_SANDBOX: &str = r#"-- Drop the temporary tables
/*
DROP TABLE sandbox.temp_control_table_hs_{{table_suffix}};
DROP TABLE sandbox.temp_control_table_st_{{table_suffix}};
DROP TABLE sandbox.temp_control_table_job_{{table_suffix}};
DROP TABLE sandbox.CONTROL_TABLE_HS_backup_{{table_suffix}};
DROP TABLE sandbox.CONTROL_TABLE_STAGE_backup_{{table_suffix}};
*/
"#;

/// Step 5 output when the HS table already exists.
pub const HISTORIC_TABLE_SKIPPED: &str = "-- HS Table creation skipped as per user selection";

pub const PIPELINE_SETUP_NOTES: &str = "### Pipeline Setup Notes

1. Clone pipeline **Scheduling / pl_StageAndHistoricStageDailyLoad** in a separate branch
2. Add parameters to match your temporary tables
3. For initial load:
   - Set STJobName to **ST_Full_Initial**
   - Set HSJobName to **HS_Full_Daily**
   - Set pInitialLoad to **true**
4. For daily loads:
   - Set STJobName to **ST_Full_Daily**
   - Set HSJobName to **HS_Full_Daily**
   - Set pInitialLoad to **false**
";

pub const HISTORIC_TABLE_NOTE: &str = "**Note:** If you want a quicker way to get to the HS tables, you can run the initial load with an invalid HS job name. 
This will only run the stage part of the job and then fail. Then create the HS table with this script.
";

pub const SCRIPT_HEADER: &str = r#"-- Generated SQL Deployment Script for {{source_table}}
-- Generated on: {{generated_at}}
-- This script contains all steps needed for deploying {{source_table}} to the data warehouse.
-- Created by: {{creator}}
"#;

pub const BANNER_RULE: &str = "---------------------------------------------------------";

pub const END_MARKER: &str = "-- End of script";

/// One piece of a section. Pieces of the same section are separated by a blank line.
#[derive(Debug, Clone, Copy)]
pub enum Fragment {
    Sql(&'static str),
    /// Chosen by `skip_historic_table_exists`.
    HistoricTable {
        create: &'static str,
        skipped: &'static str,
    },
}

impl Fragment {
    pub fn select(&self, request: &DeploymentRequest) -> &'static str {
        match *self {
            Fragment::Sql(text) => text,
            Fragment::HistoricTable { create, skipped } => {
                if request.skip_historic_table_exists {
                    skipped
                } else {
                    create
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SectionTemplate {
    pub step: Step,
    pub fragments: &'static [Fragment],
    pub notes: Option<&'static str>,
}

/// The six sections in the order they appear in the full script.
pub const SECTIONS: [SectionTemplate; 6] = [
    SectionTemplate {
        step: Step::ControlTablesBackup,
        fragments: &[
            Fragment::Sql(CONTROL_TABLE_STAGE_BACKUP),
            Fragment::Sql(CONTROL_TABLE_HS_BACKUP),
            Fragment::Sql(JOB_CONTROL_BACKUP),
        ],
        notes: None,
    },
    SectionTemplate {
        step: Step::StageControlTable,
        fragments: &[
            Fragment::Sql(STAGE_INITIAL_UPDATE),
            Fragment::Sql(STAGE_DAILY_UPDATE),
        ],
        notes: None,
    },
    SectionTemplate {
        step: Step::HistoricControlTable,
        fragments: &[Fragment::Sql(HISTORIC_CONTROL_UPDATE)],
        notes: None,
    },
    SectionTemplate {
        step: Step::JobControlTable,
        fragments: &[Fragment::Sql(JOB_CONTROL_UPDATE)],
        notes: Some(PIPELINE_SETUP_NOTES),
    },
    SectionTemplate {
        step: Step::CreateHistoricTable,
        fragments: &[Fragment::HistoricTable {
            create: HISTORIC_TABLE_CREATE,
            skipped: HISTORIC_TABLE_SKIPPED,
        }],
        notes: Some(HISTORIC_TABLE_NOTE),
    },
    SectionTemplate {
        step: Step::Cleanup,
        fragments: &[
            Fragment::Sql(CLEANUP_STAGE),
            Fragment::Sql(CLEANUP_HISTORIC),
            Fragment::Sql(CLEANUP_SANDBOX),
        ],
        notes: None,
    },
];
