//! Output formatting

use crate::container::ContainerRoster;
use crate::output::human::format_human;
use crate::output::json::{format_json, Snapshot};
use crate::skips::Skip;
use crate::status::StatusSummary;
use crate::suite::TestRoster;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Something a front end wants to show
#[derive(Debug)]
pub enum View<'a> {
    Containers(&'a ContainerRoster),
    Tests(&'a TestRoster),
    Status(StatusSummary),
    Code(&'a str),
    Snapshot(&'a Snapshot<'a>),
    Skips(&'a [&'a Skip]),
}

pub fn format_output(view: &View<'_>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(view),
        OutputFormat::Json => format_json(view),
    }
}
