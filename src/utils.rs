//! Utility helpers shared across the WASM frontend.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse the date formats the listing feeds use.  Date-only and naive
/// timestamps are taken as UTC.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Numeric day/month/year ordering for a locale tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateOrder {
    MonthDayYear,
    DayMonthYear,
    DottedDayMonthYear,
    Iso,
}

fn date_order(locale: &str) -> DateOrder {
    match locale {
        "en-US" | "en" => DateOrder::MonthDayYear,
        "en-GB" | "en-AU" | "en-IE" | "fr-FR" | "es-ES" | "it-IT" | "pt-BR" => DateOrder::DayMonthYear,
        "de-DE" | "de-AT" | "de-CH" | "nb-NO" | "fi-FI" => DateOrder::DottedDayMonthYear,
        _ => DateOrder::Iso,
    }
}

/// `Date.prototype.toLocaleDateString` with numeric year/month/day in UTC.
/// `None` when the browser rejects the locale tag.
#[cfg(target_arch = "wasm32")]
fn locale_date_string(locale: &str, dt: &DateTime<Utc>) -> Option<String> {
    use wasm_bindgen::{JsCast, JsValue};

    let date = js_sys::Date::new(&JsValue::from_f64(dt.timestamp_millis() as f64));
    let options = js_sys::Object::new();
    for (key, value) in [("year", "numeric"), ("month", "numeric"), ("day", "numeric"), ("timeZone", "UTC")] {
        js_sys::Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value)).ok()?;
    }
    let method: js_sys::Function = js_sys::Reflect::get(&date, &JsValue::from_str("toLocaleDateString"))
        .ok()?
        .dyn_into()
        .ok()?;
    method
        .call2(&date, &JsValue::from_str(locale), &options)
        .ok()?
        .as_string()
}

/// Formats feed dates for table cells and details panels.  In the browser
/// the locale's own date format applies; elsewhere a fixed table of locale
/// families does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatter {
    locale: String,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_LOCALE)
    }
}

impl DateFormatter {
    pub fn new(locale: &str) -> Self {
        let locale = if locale.trim().is_empty() { crate::constants::DEFAULT_LOCALE } else { locale };
        Self { locale: locale.to_string() }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Human-readable date, or an empty string for missing/invalid input.
    pub fn format_display(&self, input: &str) -> String {
        let Some(dt) = parse_date(input) else {
            return String::new();
        };
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(text) = locale_date_string(&self.locale, &dt) {
                return text;
            }
        }
        let pattern = match date_order(&self.locale) {
            DateOrder::MonthDayYear => "%-m/%-d/%Y",
            DateOrder::DayMonthYear => "%d/%m/%Y",
            DateOrder::DottedDayMonthYear => "%-d.%-m.%Y",
            DateOrder::Iso => "%Y-%m-%d",
        };
        dt.format(pattern).to_string()
    }

    /// Milliseconds since the epoch, `0` for missing/invalid input.
    pub fn format_sort_value(&self, input: &str) -> i64 {
        parse_date(input).map(|dt| dt.timestamp_millis()).unwrap_or(0)
    }
}

/// Escape text for interpolation into HTML content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
