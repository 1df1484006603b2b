//! Listing records as the views consume them.
//!
//! The feeds use different field names (`Notice_Num`, `event_date`, ...);
//! normalization maps them onto the camelCase keys the table columns read
//! and keeps the raw record alongside.

use serde_json::{Map, Value};

use crate::errors::DataError;
use crate::table_config::{self, TableConfig};
use crate::templates;
use crate::utils::DateFormatter;

/// A row type that can be fetched, tabulated and shown in the details panel.
pub trait Listing: Clone + 'static {
    /// Name used in error messages.
    const SERVICE_NAME: &'static str;

    fn normalize(raw: Value) -> Result<Self, DataError>;
    fn id(&self) -> Option<&str>;
    /// Column value by normalized key.
    fn field(&self, key: &str) -> Option<&str>;
    fn details_html(&self, formatter: &DateFormatter) -> String;
    fn table_config() -> TableConfig;
}

/// String view of a feed field.  Numbers are rendered, `null` is absent.
fn text_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_record(raw: &Value, service: &str) -> Result<Map<String, Value>, DataError> {
    match raw {
        Value::Object(map) => Ok(map.clone()),
        other => Err(DataError::Decode(format!("{}: expected an object record, got {}", service, other))),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: Option<String>,
    pub notice_number: Option<String>,
    pub announcement_date: Option<String>,
    pub closing_date: Option<String>,
    pub command_location: Option<String>,
    pub grade: Option<String>,
    pub position: Option<String>,
    pub details: Option<String>,
    pub raw: Value,
}

impl Listing for Job {
    const SERVICE_NAME: &'static str = "JobsDataService";

    fn normalize(raw: Value) -> Result<Self, DataError> {
        let record = as_record(&raw, Self::SERVICE_NAME)?;
        Ok(Self {
            id: text_field(&record, "Id"),
            notice_number: text_field(&record, "Notice_Num"),
            announcement_date: text_field(&record, "Announcement_Date"),
            closing_date: text_field(&record, "Closing_Date"),
            command_location: text_field(&record, "Command_Location"),
            grade: text_field(&record, "Grade"),
            position: text_field(&record, "Position"),
            details: text_field(&record, "Details"),
            raw,
        })
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn field(&self, key: &str) -> Option<&str> {
        match key {
            "id" => self.id.as_deref(),
            "noticeNumber" => self.notice_number.as_deref(),
            "announcementDate" => self.announcement_date.as_deref(),
            "closingDate" => self.closing_date.as_deref(),
            "commandLocation" => self.command_location.as_deref(),
            "grade" => self.grade.as_deref(),
            "position" => self.position.as_deref(),
            "details" => self.details.as_deref(),
            _ => None,
        }
    }

    fn details_html(&self, formatter: &DateFormatter) -> String {
        templates::job_details_template(self, formatter)
    }

    fn table_config() -> TableConfig {
        table_config::jobs_table_config()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: Option<String>,
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub location: Option<String>,
    pub details: Option<String>,
    pub raw: Value,
}

impl Listing for Event {
    const SERVICE_NAME: &'static str = "EventsDataService";

    fn normalize(raw: Value) -> Result<Self, DataError> {
        let record = as_record(&raw, Self::SERVICE_NAME)?;
        Ok(Self {
            id: text_field(&record, "id"),
            title: text_field(&record, "title"),
            start_date: text_field(&record, "event_date"),
            location: text_field(&record, "location"),
            details: text_field(&record, "description"),
            raw,
        })
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn field(&self, key: &str) -> Option<&str> {
        match key {
            "id" => self.id.as_deref(),
            "title" => self.title.as_deref(),
            "startDate" => self.start_date.as_deref(),
            "location" => self.location.as_deref(),
            "details" => self.details.as_deref(),
            _ => None,
        }
    }

    fn details_html(&self, formatter: &DateFormatter) -> String {
        templates::event_details_template(self, formatter)
    }

    fn table_config() -> TableConfig {
        table_config::events_table_config()
    }
}
