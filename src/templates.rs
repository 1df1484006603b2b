//! Details-panel markup for jobs and events.
//!
//! Scalar fields are escaped here.  The `details` body is trusted upstream
//! markup and passes through; for jobs, bare URLs in it become links.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::constants::DEFAULT_CLOSE_CLASS;
use crate::models::{Event, Job};
use crate::utils::{escape_html, DateFormatter};

fn close_button(label: &str) -> String {
    format!(
        "<button class=\"{}\" aria-label=\"{}\" type=\"button\">✕</button>",
        DEFAULT_CLOSE_CLASS, label
    )
}

fn text(value: &Option<String>) -> String {
    escape_html(value.as_deref().unwrap_or(""))
}

pub fn job_details_template(job: &Job, formatter: &DateFormatter) -> String {
    let announcement_date = formatter.format_display(job.announcement_date.as_deref().unwrap_or(""));
    let details_html = linkify(job.details.as_deref().unwrap_or(""));

    format!(
        r#"<div class="details-panel">
  {close}
  <h2 id="details-panel-heading">Job details for {position}</h2>
  <dl>
    <dt>Notice Number</dt>
    <dd>{notice}</dd>
    <dt>Grade</dt>
    <dd>{grade}</dd>
    <dt>Location</dt>
    <dd>{location}</dd>
    <dt>Announcement Date</dt>
    <dd>{announced}</dd>
  </dl>
  <div class="details-body">{details}</div>
</div>"#,
        close = close_button("Close job details"),
        position = text(&job.position),
        notice = text(&job.notice_number),
        grade = text(&job.grade),
        location = text(&job.command_location),
        announced = escape_html(&announcement_date),
        details = details_html,
    )
}

pub fn event_details_template(event: &Event, formatter: &DateFormatter) -> String {
    let raw_date = event.start_date.as_deref().unwrap_or("");
    let display_date = match formatter.format_display(raw_date) {
        formatted if formatted.is_empty() => raw_date.to_string(),
        formatted => formatted,
    };

    format!(
        r#"<div class="details-panel">
  {close}
  <h2 id="details-panel-heading">Event details for {title}</h2>
  <dl>
    <dt>Date</dt>
    <dd>{date}</dd>
    <dt>Location</dt>
    <dd>{location}</dd>
  </dl>
  <div class="details-body">{details}</div>
</div>"#,
        close = close_button("Close event details"),
        title = text(&event.title),
        date = escape_html(&display_date),
        location = text(&event.location),
        details = event.details.as_deref().unwrap_or(""),
    )
}

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("TAG_RE should compile"));
static ANCHOR_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^<a[\s>]").expect("ANCHOR_OPEN_RE should compile"));
static ANCHOR_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^</a[\s>]").expect("ANCHOR_CLOSE_RE should compile"));
static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(?i)https?://[^\s<>"']+"#).expect("URL_RE should compile"));

/// Drop sentence punctuation from the end of a matched URL.  A closing
/// parenthesis stays when it balances one inside the URL.
fn trim_url(candidate: &str) -> &str {
    let mut url = candidate;
    loop {
        let Some(last) = url.chars().last() else {
            return url;
        };
        let trailing = match last {
            '.' | ',' | ';' | ':' | '!' | '?' => true,
            ')' => url.matches(')').count() > url.matches('(').count(),
            _ => false,
        };
        if !trailing {
            return url;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
}

fn linkify_text(text: &str, out: &mut String) {
    let mut cursor = 0;
    for m in URL_RE.find_iter(text) {
        let url = trim_url(m.as_str());
        if url.ends_with("://") {
            continue;
        }
        out.push_str(&text[cursor..m.start()]);
        out.push_str(&format!("<a href=\"{0}\">{0}</a>", url));
        cursor = m.start() + url.len();
    }
    out.push_str(&text[cursor..]);
}

/// Wrap bare http(s) URLs in anchors, leaving tags and existing anchor
/// contents untouched.
pub fn linkify(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;
    let mut anchor_depth = 0usize;

    for tag in TAG_RE.find_iter(html) {
        let text = &html[cursor..tag.start()];
        if anchor_depth == 0 {
            linkify_text(text, &mut out);
        } else {
            out.push_str(text);
        }

        if ANCHOR_OPEN_RE.is_match(tag.as_str()) {
            anchor_depth += 1;
        } else if ANCHOR_CLOSE_RE.is_match(tag.as_str()) {
            anchor_depth = anchor_depth.saturating_sub(1);
        }
        out.push_str(tag.as_str());
        cursor = tag.end();
    }

    let tail = &html[cursor..];
    if anchor_depth == 0 {
        linkify_text(tail, &mut out);
    } else {
        out.push_str(tail);
    }
    out
}
