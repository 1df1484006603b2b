//! Column layout for the jobs and events tables.

use std::cmp::Ordering;

use crate::constants::{ATTR_DATA_ID, EVENTS_EMPTY_MESSAGE, JOBS_EMPTY_MESSAGE};
use crate::models::Listing;
use crate::utils::{escape_html, DateFormatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    /// Displayed through the formatter, sorted by timestamp.
    Date,
    /// Button that opens the details panel for the row.
    RowAction {
        classes: &'static str,
        aria_label_prefix: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub title: &'static str,
    pub kind: ColumnKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub columns: Vec<Column>,
    /// `(column index, direction)`, most significant first.
    pub default_order: Vec<(usize, SortDirection)>,
    /// Class the delegated row-action listener matches on.
    pub row_action_class: Option<&'static str>,
    pub empty_message: &'static str,
}

impl Column {
    fn text(key: &'static str, title: &'static str) -> Self {
        Self { key, title, kind: ColumnKind::Text }
    }

    fn date(key: &'static str, title: &'static str) -> Self {
        Self { key, title, kind: ColumnKind::Date }
    }

    pub fn render_cell(&self, value: Option<&str>, row_id: Option<&str>, formatter: &DateFormatter) -> String {
        let value = value.unwrap_or("");
        match &self.kind {
            ColumnKind::Text => format!("<td>{}</td>", escape_html(value)),
            ColumnKind::Date => format!(
                "<td data-order=\"{}\">{}</td>",
                formatter.format_sort_value(value),
                escape_html(&formatter.format_display(value))
            ),
            ColumnKind::RowAction { classes, aria_label_prefix } => {
                let text = escape_html(value);
                format!(
                    "<td><button type=\"button\" class=\"{}\" {}=\"{}\" aria-label=\"{}{}\">{}</button></td>",
                    classes,
                    ATTR_DATA_ID,
                    escape_html(row_id.unwrap_or("")),
                    aria_label_prefix,
                    text,
                    text
                )
            }
        }
    }

    pub fn sort_key(&self, value: Option<&str>, formatter: &DateFormatter) -> SortKey {
        let value = value.unwrap_or("");
        match self.kind {
            ColumnKind::Date => SortKey::Number(formatter.format_sort_value(value)),
            _ => match value.trim().parse::<i64>() {
                Ok(n) => SortKey::Number(n),
                Err(_) => SortKey::Text(value.to_lowercase()),
            },
        }
    }

    pub fn header(&self) -> String {
        format!("<th scope=\"col\">{}</th>", escape_html(self.title))
    }
}

impl TableConfig {
    /// Compare two rows by the default order.
    pub fn compare<L: Listing>(&self, a: &L, b: &L, formatter: &DateFormatter) -> Ordering {
        for (idx, direction) in &self.default_order {
            let Some(column) = self.columns.get(*idx) else {
                continue;
            };
            let ka = column.sort_key(a.field(column.key), formatter);
            let kb = column.sort_key(b.field(column.key), formatter);
            let ord = match direction {
                SortDirection::Asc => ka.cmp(&kb),
                SortDirection::Desc => kb.cmp(&ka),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

pub fn jobs_table_config() -> TableConfig {
    TableConfig {
        columns: vec![
            Column::text("noticeNumber", "Notice #"),
            Column::date("announcementDate", "Date"),
            Column::text("commandLocation", "Command and Location"),
            Column::text("grade", "Grade"),
            Column {
                key: "position",
                title: "Position",
                kind: ColumnKind::RowAction {
                    classes: "job-link js-position",
                    aria_label_prefix: "View details for ",
                },
            },
        ],
        default_order: vec![(1, SortDirection::Desc), (0, SortDirection::Desc)],
        row_action_class: Some("js-position"),
        empty_message: JOBS_EMPTY_MESSAGE,
    }
}

pub fn events_table_config() -> TableConfig {
    TableConfig {
        columns: vec![
            Column {
                key: "title",
                title: "Event",
                kind: ColumnKind::RowAction { classes: "js-title", aria_label_prefix: "" },
            },
            Column::date("startDate", "Date"),
            Column::text("location", "Location"),
        ],
        default_order: vec![(1, SortDirection::Asc)],
        row_action_class: Some("js-title"),
        empty_message: EVENTS_EMPTY_MESSAGE,
    }
}
