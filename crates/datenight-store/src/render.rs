//! Display formatting for plans: dates, times, and Markdown notes.

use chrono::{NaiveDate, NaiveTime, Timelike};
use pulldown_cmark::{Event, Options, Parser, html};

use crate::models::{DATE_FORMAT, PlanRecord, TIME_FORMAT};

/// Convert a 24-hour `HH:MM` time to 12-hour form, e.g. `19:05` -> `7:05 PM`.
///
/// Empty input yields an empty string. Unparseable input is returned as-is.
pub fn format_time_12h(time: &str) -> String {
    if time.is_empty() {
        return String::new();
    }
    let Ok(parsed) = NaiveTime::parse_from_str(time, TIME_FORMAT) else {
        return time.to_owned();
    };
    let (is_pm, hour12) = parsed.hour12();
    let suffix = if is_pm { "PM" } else { "AM" };
    format!("{hour12}:{:02} {suffix}", parsed.minute())
}

/// Spell out an ISO date, e.g. `2024-06-01` -> `Saturday, June 1, 2024`.
///
/// Unparseable input is returned as-is.
pub fn format_date_long(date: &str) -> String {
    match NaiveDate::parse_from_str(date, DATE_FORMAT) {
        Ok(d) => d.format("%A, %B %-d, %Y").to_string(),
        Err(_) => date.to_owned(),
    }
}

/// Render Markdown notes to HTML.
///
/// Tables, strikethrough and task lists are enabled. Raw HTML embedded in
/// the notes is escaped and shown as text.
pub fn render_notes_html(notes: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(notes, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(notes.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// Render a plan as an indented plain-text block for terminal output.
pub fn render_plan_text(plan: &PlanRecord) -> String {
    let mut out = format!("{}  (id {})\n", plan.title, plan.id);
    out.push_str(&format!("  Date:     {}\n", format_date_long(&plan.date)));
    if plan.has_time() {
        out.push_str(&format!("  Time:     {}\n", format_time_12h(&plan.time)));
    }
    if !plan.location.is_empty() {
        out.push_str(&format!("  Location: {}\n", plan.location));
    }
    if !plan.notes.trim().is_empty() {
        out.push_str("  Notes:\n");
        for line in plan.notes.lines() {
            out.push_str(&format!("    {line}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlanFields;

    #[test]
    fn time_12h_conversions() {
        assert_eq!(format_time_12h("19:05"), "7:05 PM");
        assert_eq!(format_time_12h("00:30"), "12:30 AM");
        assert_eq!(format_time_12h("12:00"), "12:00 PM");
        assert_eq!(format_time_12h("09:15"), "9:15 AM");
        assert_eq!(format_time_12h(""), "");
        assert_eq!(format_time_12h("later"), "later");
    }

    #[test]
    fn date_long_form() {
        assert_eq!(format_date_long("2024-06-01"), "Saturday, June 1, 2024");
        assert_eq!(format_date_long("2024-12-25"), "Wednesday, December 25, 2024");
        assert_eq!(format_date_long("someday"), "someday");
    }

    #[test]
    fn notes_render_markdown() {
        let html = render_notes_html("# Plan\n\n- **wine**\n- *cheese*\n");
        assert!(html.contains("<h1>Plan</h1>"), "got: {html}");
        assert!(html.contains("<strong>wine</strong>"), "got: {html}");
        assert!(html.contains("<em>cheese</em>"), "got: {html}");
    }

    #[test]
    fn notes_render_task_lists_and_strikethrough() {
        let html = render_notes_html("- [x] book table\n- ~~cancel~~\n");
        assert!(html.contains("checkbox"), "got: {html}");
        assert!(html.contains("<del>cancel</del>"), "got: {html}");
    }

    #[test]
    fn notes_escape_raw_html() {
        let html = render_notes_html("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"), "got: {html}");
        assert!(html.contains("&lt;script&gt;"), "got: {html}");
    }

    #[test]
    fn plan_text_skips_empty_fields() {
        let plan = PlanRecord::from_fields(1, PlanFields::new("Picnic", "2024-06-01"));
        let text = render_plan_text(&plan);
        assert!(text.contains("Picnic"));
        assert!(text.contains("Saturday, June 1, 2024"));
        assert!(!text.contains("Time:"));
        assert!(!text.contains("Location:"));
        assert!(!text.contains("Notes:"));
    }

    #[test]
    fn plan_text_includes_all_fields() {
        let plan = PlanRecord::from_fields(
            2,
            PlanFields::new("Dinner", "2024-06-01")
                .with_time("19:00")
                .with_location("Harbor")
                .with_notes("line one\nline two"),
        );
        let text = render_plan_text(&plan);
        assert!(text.contains("Time:     7:00 PM"));
        assert!(text.contains("Location: Harbor"));
        assert!(text.contains("    line one\n    line two"));
    }

    #[test]
    fn plan_text_layout_is_exact() {
        let plan = PlanRecord::from_fields(
            3,
            PlanFields::new("Tango", "2024-07-04")
                .with_time("20:15")
                .with_notes("Wear shoes"),
        );
        assert_eq!(
            render_plan_text(&plan),
            "Tango  (id 3)\n  Date:     Thursday, July 4, 2024\n  Time:     8:15 PM\n  Notes:\n    Wear shoes\n"
        );
    }
}
