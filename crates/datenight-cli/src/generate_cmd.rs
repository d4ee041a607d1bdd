//! `datenight generate`: ask the idea endpoint for a suggestion, optionally
//! saving it as a plan.

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

use datenight_core::idea::options::{BUDGETS, FormOption, MOODS, OCCASIONS, TIMES_OF_DAY, label_for, values_list};
use datenight_core::{IdeaClient, IdeaRequest, IdeaResponse};
use datenight_store::render::render_plan_text;
use datenight_store::{BlobStore, PlanFields, PlanStore};

/// Options collected from the command line.
#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub mood: String,
    pub budget: String,
    pub location: Option<String>,
    pub time_of_day: Option<String>,
    pub occasion: Option<String>,
    /// Date to save the idea under; saving is skipped when `None`.
    pub save_date: Option<String>,
    pub save_time: Option<String>,
    pub save_location: Option<String>,
}

impl GenerateOptions {
    fn request(&self) -> IdeaRequest {
        let mut request = IdeaRequest::new(self.mood.clone(), self.budget.clone());
        if let Some(location) = &self.location {
            request = request.with_location(location.clone());
        }
        if let Some(time_of_day) = &self.time_of_day {
            request = request.with_time_of_day(time_of_day.clone());
        }
        if let Some(occasion) = &self.occasion {
            request = request.with_occasion(occasion.clone());
        }
        request
    }
}

pub async fn run_generate<B: BlobStore>(
    client: &IdeaClient,
    store: &PlanStore<B>,
    options: GenerateOptions,
) -> Result<()> {
    warn_if_unknown("mood", MOODS, Some(&options.mood));
    warn_if_unknown("budget", BUDGETS, Some(&options.budget));
    warn_if_unknown("time of day", TIMES_OF_DAY, options.time_of_day.as_deref());
    warn_if_unknown("occasion", OCCASIONS, options.occasion.as_deref());

    let request = options.request();
    let idea = match client.generate_idea(&request).await {
        Ok(idea) => idea,
        Err(e) => {
            debug!(error = ?e, url = %client.endpoint_url(), "idea request failed");
            bail!("{e}");
        }
    };

    println!("{}", idea.title);
    println!("  {}", idea.description);

    if let Some(date) = options.save_date {
        let fields = plan_fields(
            &idea,
            date,
            options.save_time.unwrap_or_default(),
            options.save_location.unwrap_or_default(),
        );
        let plan = store.create(fields).context("failed to save generated idea")?;
        println!();
        println!("Saved as plan {}.", plan.id);
        print!("{}", render_plan_text(&plan));
    }

    Ok(())
}

/// Plan fields for a generated idea: its title, and its description as notes.
fn plan_fields(idea: &IdeaResponse, date: String, time: String, location: String) -> PlanFields {
    PlanFields::new(idea.title.clone(), date)
        .with_time(time)
        .with_location(location)
        .with_notes(idea.description.clone())
}

fn warn_if_unknown(what: &str, options: &[FormOption], value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        if label_for(options, value).is_none() {
            warn!("unusual {what} {value:?}; common values are: {}", values_list(options));
        }
    }
}
