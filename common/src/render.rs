//! Fills the SQL skeletons from `templates` with the values of one request.
//!
//! Substitution is plain text replacement of `{{slot}}` markers: no quoting,
//! no escaping, no evaluation. Rendering is pure; the same request and stamp
//! always produce the same bytes.

use crate::error::DeploymentError;
use crate::model::deployment::DeploymentRequest;
use crate::model::script::{GenerationStamp, ScriptSection};
use crate::templates::{SectionTemplate, BANNER_RULE, END_MARKER, SCRIPT_HEADER, SECTIONS};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Slot name -> replacement text.
pub type Bindings = BTreeMap<&'static str, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedScripts {
    pub sections: Vec<ScriptSection>,
    pub full_script: String,
}

fn slot_pattern() -> &'static Regex {
    static SLOT: OnceLock<Regex> = OnceLock::new();
    SLOT.get_or_init(|| Regex::new(r"\{\{([a-z0-9_]+)\}\}").expect("slot pattern compiles"))
}

/// Values for every slot the section skeletons and the script header use.
pub fn bindings(request: &DeploymentRequest, stamp: &GenerationStamp) -> Bindings {
    let mut values = Bindings::new();
    values.insert("table_suffix", stamp.table_suffix.clone());
    values.insert("generated_at", stamp.generated_at.clone());
    values.insert("creator", request.creator());
    values.insert(
        "source_system_initial",
        request.source_system_initial.as_str().to_string(),
    );
    values.insert(
        "source_system_daily",
        request.source_system_daily.as_str().to_string(),
    );
    values.insert("source_schema", request.source_schema_name.clone());
    values.insert("source_table", request.source_table_name.clone());
    values.insert("source_table_ct", request.source_table_name_ct());
    values.insert("staging_schema", request.target_staging_schema().to_string());
    values.insert("staging_table", request.target_staging_table());
    values.insert("historic_schema", request.target_historic_schema().to_string());
    values.insert("historic_table", request.target_historic_table());
    values.insert("business_key", request.business_key.clone());
    values.insert("scd2_columns", request.scd2_columns.clone());
    values.insert("delete_type", request.delete_type_text().to_string());
    values.insert("delete_column", request.source_delete_column.clone());
    values.insert("delete_value", request.source_delete_value.clone());
    values
}

/// Replaces every `{{slot}}` in `template` in a single pass. Replacement text
/// is never rescanned, so values containing `{{...}}` come out as typed.
pub fn substitute(template: &str, bindings: &Bindings) -> Result<String, DeploymentError> {
    let pattern = slot_pattern();
    if let Some(unbound) = pattern
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .find(|slot| !bindings.contains_key(slot.as_str()))
    {
        return Err(DeploymentError::UnboundSlot { slot: unbound });
    }

    let rendered = pattern.replace_all(template, |caps: &Captures| {
        bindings
            .get(&caps[1])
            .map(String::as_str)
            .unwrap_or_default()
            .to_string()
    });
    Ok(rendered.into_owned())
}

pub fn render_section(
    template: &SectionTemplate,
    request: &DeploymentRequest,
    bindings: &Bindings,
) -> Result<ScriptSection, DeploymentError> {
    let parts = template
        .fragments
        .iter()
        .map(|fragment| substitute(fragment.select(request), bindings))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ScriptSection {
        step: template.step,
        number: template.step.number(),
        title: template.step.tab_title().to_string(),
        heading: template.step.heading().to_string(),
        sql: parts.join("\n"),
        notes: template.notes.map(str::to_string),
    })
}

/// Header, then every section under its banner, then the end marker.
pub fn render_full_script(
    sections: &[ScriptSection],
    bindings: &Bindings,
) -> Result<String, DeploymentError> {
    let mut script = substitute(SCRIPT_HEADER, bindings)?;
    for section in sections {
        script.push('\n');
        script.push_str(BANNER_RULE);
        script.push_str("\n-- ");
        script.push_str(&section.step.banner());
        script.push('\n');
        script.push_str(BANNER_RULE);
        script.push('\n');
        script.push_str(&section.sql);
        script.push('\n');
    }
    script.push('\n');
    script.push_str(END_MARKER);
    script.push('\n');
    Ok(script)
}

/// Validates `request` and renders all six sections plus the full script.
///
/// `request` is used as given; callers normalize it first.
pub fn render(
    request: &DeploymentRequest,
    stamp: &GenerationStamp,
) -> Result<RenderedScripts, DeploymentError> {
    request.validate()?;

    let bindings = bindings(request, stamp);
    let sections = SECTIONS
        .iter()
        .map(|template| render_section(template, request, &bindings))
        .collect::<Result<Vec<_>, _>>()?;
    let full_script = render_full_script(&sections, &bindings)?;

    Ok(RenderedScripts {
        sections,
        full_script,
    })
}
