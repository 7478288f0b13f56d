//! Interactive generation with live per-item status lines

use std::future::Future;
use std::sync::Arc;

use chrono::Local;
use farm_admin::client::{AdminApiClient, AdminStore};
use farm_admin::config::AdminConfig;
use farm_admin::generator::{
    latest_start_day, BatchTaskGenerator, CancelHandle, CancelSignal, ComboGenerator,
    GenerationReport, ItemOutcome,
};
use farm_admin::models::{TaskMedium, TaskTemplate, TaskType};
use farm_admin::planner::{parse_day, DateRange};
use farm_admin::AdminResult;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;

use crate::GenerateCommands;

pub async fn handle_generate_command(
    cmd: GenerateCommands,
    config: &AdminConfig,
) -> anyhow::Result<()> {
    let client = AdminApiClient::new(config.api.clone())?;
    let store: Arc<dyn AdminStore> = Arc::new(client);
    let today = Local::now().date_naive();

    match cmd {
        GenerateCommands::Tasks {
            start,
            end,
            types,
            name,
            medium,
            summary,
            link,
            reward,
            image,
        } => {
            let defaults = DateRange::rest_of_month(today);
            let range = resolve_range(start.as_deref(), end.as_deref(), defaults)?;

            let types = if types.is_empty() {
                vec![TaskType::Ad]
            } else {
                types
                    .iter()
                    .map(|raw| raw.parse::<TaskType>())
                    .collect::<AdminResult<Vec<_>>>()?
            };
            let medium = medium
                .map(|raw| raw.parse::<TaskMedium>())
                .transpose()?;

            let templates: Vec<TaskTemplate> = types
                .into_iter()
                .map(|task_type| {
                    let mut template = TaskTemplate::for_type(task_type);
                    if let Some(name) = &name {
                        template.task_name = name.clone();
                    }
                    if let Some(medium) = medium {
                        template.task_medium = medium;
                    }
                    if let Some(summary) = &summary {
                        template.task_summary = summary.clone();
                    }
                    if let Some(link) = &link {
                        template.task_link = link.clone();
                    }
                    if let Some(reward) = &reward {
                        template.task_reward = reward.clone();
                    }
                    if let Some(image) = &image {
                        template.task_image = image.clone();
                    }
                    template
                })
                .collect();

            println!("Creating daily tasks for {range}");
            let generator = BatchTaskGenerator::new(store, &config.generator);
            let report = run_with_progress(|cancel, progress| async move {
                generator
                    .generate(range, &templates, &cancel, Some(progress))
                    .await
            })
            .await?;
            print_summary(&report);
        }
        GenerateCommands::Combos {
            start,
            end,
            reward,
            seed,
        } => {
            let mut generator = ComboGenerator::new(store, &config.generator);
            if let Some(reward) = reward {
                generator = generator.with_reward(reward);
            }

            let range = if start.is_some() && end.is_some() {
                resolve_range(start.as_deref(), end.as_deref(), DateRange::new(today, today))?
            } else {
                let existing = generator.snapshot(&CancelSignal::never()).await?;
                let defaults = DateRange::combo_window(today, latest_start_day(&existing));
                resolve_range(start.as_deref(), end.as_deref(), defaults)?
            };

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            println!("Creating daily combos for {range}");
            let generator = &generator;
            let report = run_with_progress(|cancel, progress| async move {
                generator
                    .generate(range, &mut rng, &cancel, Some(progress))
                    .await
            })
            .await?;
            print_summary(&report);
        }
    }
    Ok(())
}

fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
    defaults: DateRange,
) -> AdminResult<DateRange> {
    let start_date = start.map(parse_day).transpose()?.unwrap_or(defaults.start_date);
    let end_date = end.map(parse_day).transpose()?.unwrap_or(defaults.end_date);
    Ok(DateRange::new(start_date, end_date))
}

/// Drive a generation while printing each outcome as it arrives
///
/// Ctrl-C cancels the run; dates not yet started are reported as cancelled.
async fn run_with_progress<F, Fut>(run: F) -> AdminResult<GenerationReport>
where
    F: FnOnce(CancelSignal, mpsc::UnboundedSender<ItemOutcome>) -> Fut,
    Fut: Future<Output = AdminResult<GenerationReport>>,
{
    let (handle, cancel) = CancelSignal::pair();
    let (progress, mut updates) = mpsc::unbounded_channel::<ItemOutcome>();

    let printer = async move {
        while let Some(outcome) = updates.recv().await {
            println!("{}", outcome.status_line());
        }
    };

    let interrupt = tokio::spawn(cancel_on_ctrl_c(handle));
    let (report, ()) = tokio::join!(run(cancel, progress), printer);
    interrupt.abort();
    report
}

async fn cancel_on_ctrl_c(handle: CancelHandle) {
    if tokio::signal::ctrl_c().await.is_ok() {
        eprintln!("Interrupted, cancelling remaining work...");
        handle.cancel();
    }
}

fn print_summary(report: &GenerationReport) {
    println!();
    if report.has_failures() {
        println!("✗ {}", report.summary());
    } else {
        println!("✓ {}", report.summary());
    }
}
