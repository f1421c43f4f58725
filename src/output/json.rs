//! JSON output formatting

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::container::ContainerRoster;
use crate::output::formatter::View;
use crate::session::{SessionState, Transcript};
use crate::status::{summarize, StatusSummary};
use crate::suite::TestRoster;

/// Point-in-time view of a session for display or export
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub transcript: &'a Transcript,
    pub history: &'a [String],
    pub containers: &'a ContainerRoster,
    pub tests: &'a TestRoster,
    pub code: &'a str,
    pub status: StatusSummary,
    #[serde(serialize_with = "rfc3339")]
    pub generated_at: DateTime<Utc>,
}

impl<'a> Snapshot<'a> {
    pub fn capture(state: &'a SessionState) -> Self {
        Self {
            transcript: state.transcript(),
            history: state.history().entries(),
            containers: state.containers(),
            tests: state.tests(),
            code: state.code(),
            status: summarize(state),
            generated_at: Utc::now(),
        }
    }
}

fn rfc3339<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

pub fn format_json(view: &View<'_>) -> String {
    let data: Value = match view {
        View::Containers(roster) => serde_json::to_value(roster).unwrap_or(json!(null)),
        View::Tests(roster) => serde_json::to_value(roster).unwrap_or(json!(null)),
        View::Status(summary) => {
            let mut value = serde_json::to_value(summary).unwrap_or(json!({}));
            if let Value::Object(ref mut map) = value {
                map.insert("text".to_string(), json!(summary.to_string()));
            }
            value
        }
        View::Code(code) => json!({
            "lines": code.lines().count(),
            "bytes": code.len(),
        }),
        View::Snapshot(snapshot) => serde_json::to_value(snapshot).unwrap_or(json!(null)),
        View::Skips(skips) => Value::Array(
            skips
                .iter()
                .map(|skip| {
                    let mut value = serde_json::to_value(skip).unwrap_or(json!({}));
                    if let Value::Object(ref mut map) = value {
                        map.insert("total".to_string(), json!(skip.formatted_total()));
                        map.insert("size_class".to_string(), json!(skip.size_class()));
                    }
                    value
                })
                .collect(),
        ),
    };

    serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string())
}
