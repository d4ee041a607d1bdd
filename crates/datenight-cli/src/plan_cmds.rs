//! CLI handlers for `datenight plan` subcommands.
//!
//! Implements:
//! - `datenight plan add <title> --date ..`  -- create a plan
//! - `datenight plan list`                  -- list plans, newest date first
//! - `datenight plan show <id> [--html]`    -- show one plan
//! - `datenight plan edit <id> ..`          -- replace fields of a plan
//! - `datenight plan delete <id>`           -- remove a plan

use anyhow::{Context, Result, bail};

use datenight_core::catalog;
use datenight_store::render::{format_time_12h, render_notes_html, render_plan_text};
use datenight_store::{BlobStore, PlanFields, PlanRecord, PlanStore};

use crate::PlanCommands;

// -----------------------------------------------------------------------
// Public entry point
// -----------------------------------------------------------------------

/// Dispatch a `PlanCommands` variant to the appropriate handler.
pub fn run_plan_command<B: BlobStore>(command: PlanCommands, store: &PlanStore<B>) -> Result<()> {
    match command {
        PlanCommands::Add {
            title,
            date,
            time,
            location,
            notes,
        } => cmd_add(store, new_plan_fields(title, date, time, location, notes)),
        PlanCommands::List => cmd_list(store),
        PlanCommands::Show { id, html } => cmd_show(store, id, html),
        PlanCommands::Edit {
            id,
            title,
            date,
            time,
            location,
            notes,
        } => {
            let edits = PlanEdits {
                title,
                date,
                time,
                location,
                notes,
            };
            cmd_edit(store, id, edits)
        }
        PlanCommands::Delete { id } => cmd_delete(store, id),
    }
}

// -----------------------------------------------------------------------
// datenight plan add
// -----------------------------------------------------------------------

/// Fields for a new plan. Without explicit notes, a curated idea with the
/// same title lends its description.
fn new_plan_fields(
    title: String,
    date: String,
    time: Option<String>,
    location: Option<String>,
    notes: Option<String>,
) -> PlanFields {
    let notes = notes
        .or_else(|| catalog::find(&title).map(|s| s.description.to_string()))
        .unwrap_or_default();
    PlanFields::new(title, date)
        .with_time(time.unwrap_or_default())
        .with_location(location.unwrap_or_default())
        .with_notes(notes)
}

fn cmd_add<B: BlobStore>(store: &PlanStore<B>, fields: PlanFields) -> Result<()> {
    let plan = store.create(fields).context("failed to save plan")?;

    println!("Plan saved.");
    println!();
    print!("{}", render_plan_text(&plan));
    Ok(())
}

// -----------------------------------------------------------------------
// datenight plan list
// -----------------------------------------------------------------------

fn cmd_list<B: BlobStore>(store: &PlanStore<B>) -> Result<()> {
    let plans = store.list();

    if plans.is_empty() {
        println!("No plans yet. Use `datenight plan add <title> --date YYYY-MM-DD` to create one.");
        return Ok(());
    }

    for line in format_table(&plans) {
        println!("{line}");
    }
    Ok(())
}

/// Lay plans out as an aligned table, header first.
fn format_table(plans: &[PlanRecord]) -> Vec<String> {
    let id_w = plans
        .iter()
        .map(|p| p.id.to_string().len())
        .max()
        .unwrap_or(2)
        .max(2);
    let date_w = 10;
    let time_w = 8;
    let title_w = plans
        .iter()
        .map(|p| p.title.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut lines = Vec::with_capacity(plans.len() + 1);
    lines.push(
        format!("{:<id_w$}  {:<date_w$}  {:<time_w$}  {:<title_w$}  LOCATION", "ID", "DATE", "TIME", "TITLE")
            .trim_end()
            .to_string(),
    );
    for plan in plans {
        lines.push(
            format!(
                "{:<id_w$}  {:<date_w$}  {:<time_w$}  {:<title_w$}  {}",
                plan.id,
                plan.date,
                format_time_12h(&plan.time),
                plan.title,
                plan.location,
            )
            .trim_end()
            .to_string(),
        );
    }
    lines
}

// -----------------------------------------------------------------------
// datenight plan show <id>
// -----------------------------------------------------------------------

fn cmd_show<B: BlobStore>(store: &PlanStore<B>, id: i64, html: bool) -> Result<()> {
    let Some(plan) = store.get(id) else {
        bail!("plan {id} not found");
    };

    if html {
        print!("{}", render_notes_html(&plan.notes));
    } else {
        print!("{}", render_plan_text(&plan));
    }
    Ok(())
}

// -----------------------------------------------------------------------
// datenight plan edit <id>
// -----------------------------------------------------------------------

/// Field replacements given on the command line. `None` keeps the stored
/// value; `Some("")` clears an optional field.
#[derive(Debug, Default)]
struct PlanEdits {
    title: Option<String>,
    date: Option<String>,
    time: Option<String>,
    location: Option<String>,
    notes: Option<String>,
}

impl PlanEdits {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.location.is_none()
            && self.notes.is_none()
    }

    fn apply(self, existing: PlanRecord) -> PlanFields {
        PlanFields {
            title: self.title.unwrap_or(existing.title),
            date: self.date.unwrap_or(existing.date),
            time: self.time.unwrap_or(existing.time),
            location: self.location.unwrap_or(existing.location),
            notes: self.notes.unwrap_or(existing.notes),
        }
    }
}

fn cmd_edit<B: BlobStore>(store: &PlanStore<B>, id: i64, edits: PlanEdits) -> Result<()> {
    if edits.is_empty() {
        bail!("nothing to change; pass at least one of --title, --date, --time, --location, --notes");
    }

    let Some(existing) = store.get(id) else {
        bail!("plan {id} not found");
    };

    let plan = store
        .update(id, edits.apply(existing))
        .with_context(|| format!("failed to update plan {id}"))?;

    println!("Plan updated.");
    println!();
    print!("{}", render_plan_text(&plan));
    Ok(())
}

// -----------------------------------------------------------------------
// datenight plan delete <id>
// -----------------------------------------------------------------------

fn cmd_delete<B: BlobStore>(store: &PlanStore<B>, id: i64) -> Result<()> {
    if store
        .delete(id)
        .with_context(|| format!("failed to delete plan {id}"))?
    {
        println!("Plan {id} deleted.");
    } else {
        println!("No plan with id {id}; nothing deleted.");
    }
    Ok(())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use datenight_store::MemoryBlobStore;

    fn record(id: i64, title: &str, date: &str, time: &str) -> PlanRecord {
        PlanRecord::from_fields(id, PlanFields::new(title, date).with_time(time))
    }

    #[test]
    fn table_aligns_columns_and_formats_time() {
        let plans = vec![
            record(1717200000000, "Sunset Picnic", "2024-06-01", "19:30"),
            record(2, "Brunch", "2024-05-01", ""),
        ];
        let lines = format_table(&plans);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("7:30 PM"));
        assert!(lines[2].contains("Brunch"));
        let title_col = lines[0].find("TITLE").unwrap();
        assert_eq!(lines[1].find("Sunset Picnic").unwrap(), title_col);
        assert_eq!(lines[2].find("Brunch").unwrap(), title_col);
    }

    #[test]
    fn curated_title_fills_notes() {
        let fields = new_plan_fields(
            "stargazing".to_string(),
            "2024-08-12".to_string(),
            None,
            None,
            None,
        );
        assert_eq!(fields.notes, "Find a quiet spot and watch the stars together");

        let fields = new_plan_fields(
            "Movie Night".to_string(),
            "2024-08-12".to_string(),
            None,
            None,
            Some("Popcorn".to_string()),
        );
        assert_eq!(fields.notes, "Popcorn");
    }

    #[test]
    fn edits_keep_unspecified_fields() {
        let existing = PlanRecord::from_fields(
            7,
            PlanFields::new("Dinner", "2024-06-01")
                .with_time("19:00")
                .with_location("Bistro")
                .with_notes("Book a table"),
        );
        let edits = PlanEdits {
            time: Some(String::new()),
            title: Some("Late dinner".to_string()),
            ..Default::default()
        };
        let fields = edits.apply(existing);
        assert_eq!(fields.title, "Late dinner");
        assert_eq!(fields.date, "2024-06-01");
        assert_eq!(fields.time, "");
        assert_eq!(fields.location, "Bistro");
        assert_eq!(fields.notes, "Book a table");
    }

    #[test]
    fn edit_without_changes_is_rejected() {
        let store = PlanStore::new(MemoryBlobStore::new());
        let err = cmd_edit(&store, 1, PlanEdits::default()).unwrap_err();
        assert!(err.to_string().contains("nothing to change"));
    }

    #[test]
    fn edit_missing_plan_errors() {
        let store = PlanStore::new(MemoryBlobStore::new());
        let edits = PlanEdits {
            title: Some("x".to_string()),
            ..Default::default()
        };
        let err = cmd_edit(&store, 42, edits).unwrap_err();
        assert_eq!(err.to_string(), "plan 42 not found");
    }

    #[test]
    fn add_rejects_invalid_fields() {
        let store = PlanStore::new(MemoryBlobStore::new());
        let err = cmd_add(&store, PlanFields::new("  ", "2024-06-01")).unwrap_err();
        assert_eq!(err.to_string(), "failed to save plan");
        assert!(store.list().is_empty());
    }

    #[test]
    fn delete_absent_plan_succeeds() {
        let store = PlanStore::new(MemoryBlobStore::new());
        cmd_delete(&store, 99).unwrap();
    }
}
