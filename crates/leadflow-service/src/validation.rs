//! Required-field checks for caller-supplied input.
//!
//! Checks stop at the first failure so each rejected call names exactly
//! one field. Empty strings count as missing.

use leadflow_core::error::{LeadflowError, LeadflowResult};
use leadflow_core::models::agent::{AgentFields, NewSalesAgent};
use leadflow_core::models::lead::{LeadFields, Priority};

/// Lead fields that passed presence checks. Agent identifiers are still
/// raw strings; their format and existence are checked by the caller.
#[derive(Debug)]
pub(crate) struct CheckedLead {
    pub name: String,
    pub source: String,
    pub sales_agent: Vec<String>,
    pub status: String,
    pub tags: Vec<String>,
    pub time_to_close: u32,
    pub priority: Priority,
}

pub(crate) fn require_text(field: &str, value: Option<String>) -> LeadflowResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(LeadflowError::missing(field)),
    }
}

fn require_list(field: &str, value: Option<Vec<String>>) -> LeadflowResult<Vec<String>> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(LeadflowError::missing(field)),
    }
}

/// Drop duplicate tags, keeping the first occurrence.
fn tag_set(tags: Vec<String>) -> LeadflowResult<Vec<String>> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if tag.is_empty() {
            return Err(LeadflowError::validation("tags", "must not contain empty values"));
        }
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    Ok(out)
}

pub(crate) fn check_agent_fields(fields: AgentFields) -> LeadflowResult<NewSalesAgent> {
    let name = require_text("name", fields.name)?;
    let email = require_text("email", fields.email)?;
    Ok(NewSalesAgent { name, email })
}

pub(crate) fn check_lead_fields(fields: LeadFields) -> LeadflowResult<CheckedLead> {
    let name = require_text("name", fields.name)?;
    let source = require_text("source", fields.source)?;
    let sales_agent = require_list("sales_agent", fields.sales_agent)?;
    let status = require_text("status", fields.status)?;
    let tags = tag_set(require_list("tags", fields.tags)?)?;
    let time_to_close = match fields.time_to_close {
        Some(days) if days > 0 => days,
        _ => return Err(LeadflowError::missing("time_to_close")),
    };
    let priority = require_text("priority", fields.priority)?
        .parse::<Priority>()
        .map_err(|_| LeadflowError::validation("priority", "must be one of High, Medium, Low"))?;

    Ok(CheckedLead {
        name,
        source,
        sales_agent,
        status,
        tags,
        time_to_close,
        priority,
    })
}
