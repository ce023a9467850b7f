// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Popup page content.
//!
//! A [`PageView`] is everything the popup shows for one page: the check-in
//! lines and the state of the navigation controls. The GUI paints it with
//! widgets; [`PageView::html`] renders the same content as an HTML fragment.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::feature::Checkin;
use crate::pager::SessionId;

/// Shown in place of a date that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const DISABLED_CONTROL_STYLE: &str = r#" style="pointer-events: none; color: grey;""#;

/// Rendered content of one popup page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Session whose controls this view carries.
    pub session: SessionId,
    pub beer_name: String,
    pub brewery_name: String,
    pub venue_name: Option<String>,
    /// Check-in date, already formatted as `Mon DD, YYYY`.
    pub date: String,
    /// Zero-based page index.
    pub page: usize,
    pub total: usize,
}

impl PageView {
    /// Build the view of `checkin` as page `page` of `total`.
    #[must_use]
    pub fn new(session: SessionId, checkin: &Checkin, page: usize, total: usize) -> Self {
        Self {
            session,
            beer_name: checkin.beer_name.clone(),
            brewery_name: checkin.brewery_name.clone(),
            venue_name: checkin.venue_name.clone(),
            date: format_checkin_date(&checkin.created_at),
            page,
            total,
        }
    }

    #[must_use]
    pub fn brewery_line(&self) -> String {
        format!("by {}", self.brewery_name)
    }

    #[must_use]
    pub fn venue_line(&self) -> Option<String> {
        self.venue_name.as_ref().map(|venue| format!("at {venue}"))
    }

    #[must_use]
    pub fn date_line(&self) -> String {
        format!("on {}", self.date)
    }

    /// Page label, e.g. `2 of 3`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} of {}", self.page + 1, self.total)
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total
    }

    /// Render as an HTML fragment with `prevPage`/`nextPage` anchors.
    #[must_use]
    pub fn html(&self) -> String {
        let mut out = format!(
            "<b>{}</b><br>by {}",
            escape_html(&self.beer_name),
            escape_html(&self.brewery_name)
        );
        if let Some(venue) = &self.venue_name {
            out.push_str("<br>at ");
            out.push_str(&escape_html(venue));
        }
        out.push_str(&format!("<br>on {}<br>", escape_html(&self.date)));

        out.push_str("<br><br>");
        out.push_str(&format!(
            r##"<a href="#" id="prevPage"{}>&lt;</a>"##,
            if self.has_prev() { "" } else { DISABLED_CONTROL_STYLE }
        ));
        out.push_str(&format!(" <span>{}</span> ", self.label()));
        out.push_str(&format!(
            r##"<a href="#" id="nextPage"{}>&gt;</a>"##,
            if self.has_next() { "" } else { DISABLED_CONTROL_STYLE }
        ));
        out
    }
}

/// Format a check-in timestamp as `Mon DD, YYYY`.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD`.
/// Zoned timestamps are converted to UTC before taking the date.
#[must_use]
pub fn format_checkin_date(raw: &str) -> String {
    parse_checkin_date(raw).map_or_else(
        || INVALID_DATE.to_string(),
        |date| date.format("%b %d, %Y").to_string(),
    )
}

fn parse_checkin_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
