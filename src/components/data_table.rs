//! Listing table: renders rows from a [`TableConfig`] and routes clicks on
//! a row's action button to a callback, with the button as the trigger.

use std::rc::Rc;

use crate::constants::ATTR_DATA_ID;
use crate::dom::DomHost;
use crate::models::Listing;
use crate::table_config::TableConfig;
use crate::utils::{escape_html, DateFormatter};
use crate::{debug_log, warn_log};

/// Table markup (`<thead>` + `<tbody>`) for `rows`, which are expected to be
/// sorted already.
pub fn render_table_html<L: Listing>(config: &TableConfig, rows: &[L], formatter: &DateFormatter) -> String {
    let mut html = String::from("<thead><tr>");
    for column in &config.columns {
        html.push_str(&column.header());
    }
    html.push_str("</tr></thead><tbody>");

    if rows.is_empty() {
        html.push_str(&format!(
            "<tr><td class=\"empty-table\" colspan=\"{}\">{}</td></tr>",
            config.columns.len(),
            escape_html(config.empty_message)
        ));
    }
    for row in rows {
        html.push_str("<tr>");
        for column in &config.columns {
            html.push_str(&column.render_cell(row.field(column.key), row.id(), formatter));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody>");
    html
}

pub struct DataTableView<H: DomHost> {
    host: H,
    table: Option<H::Element>,
    config: TableConfig,
    formatter: DateFormatter,
}

impl<H: DomHost> DataTableView<H> {
    pub fn new(host: H, selector: &str, config: TableConfig, formatter: DateFormatter) -> Self {
        let table = host.query(selector);
        if table.is_none() {
            warn_log!("No table element matches '{}'", selector);
        }
        Self { host, table, config, formatter }
    }

    /// Render `rows` in default order and wire the row action.  The listener
    /// lives as long as the page.
    pub fn init<L, F>(&self, mut rows: Vec<L>, on_row_action: F)
    where
        L: Listing,
        F: Fn(&L, &H::Element) + 'static,
    {
        let Some(table) = &self.table else {
            return;
        };

        rows.sort_by(|a, b| self.config.compare(a, b, &self.formatter));
        self.host
            .set_inner_html(table, &render_table_html(&self.config, &rows, &self.formatter));
        debug_log!("Rendered {} table rows", rows.len());

        let Some(action_class) = self.config.row_action_class else {
            return;
        };

        let rows = Rc::new(rows);
        let host = self.host.clone();
        let registered = self.host.listen_delegated_click(
            table,
            action_class,
            Box::new(move |button: &H::Element| {
                let id = host.attribute(button, ATTR_DATA_ID);
                let row = id
                    .as_deref()
                    .filter(|id| !id.is_empty())
                    .and_then(|id| rows.iter().find(|row| row.id() == Some(id)));
                match row {
                    Some(row) => on_row_action(row, button),
                    None => warn_log!("No row data found for clicked element (data-id {:?})", id),
                }
            }),
        );
        if let Err(e) = registered {
            warn_log!("Row action listener not registered: {}", e);
        }
    }
}
