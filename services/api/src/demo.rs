use crate::infra::{ConsoleNotifier, InMemoryLeadSink};
use async_trait::async_trait;
use clap::Args;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use craftlink_intake::config::IntakeConfig;
use craftlink_intake::error::AppError;
use craftlink_intake::intake::{
    FieldKey, FormRecord, LeadCsvImporter, LeadIntakeService, LeadPayload, LeadSink, Role,
    SinkError, SubmissionController, SubmissionOutcome,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Success display window in milliseconds (the production default is 3000)
    #[arg(long, default_value_t = 500)]
    pub(crate) success_window_ms: u64,
    /// Optional lead CSV export to replay through the engine
    #[arg(long)]
    pub(crate) leads_csv: Option<PathBuf>,
}

/// Sink whose first delivery fails at the transport layer, so the demo can
/// show the retry path.
#[derive(Default)]
struct FlakyLeadSink {
    inner: InMemoryLeadSink,
    tripped: AtomicBool,
}

#[async_trait]
impl LeadSink for FlakyLeadSink {
    async fn deliver(&self, lead: &LeadPayload) -> Result<(), SinkError> {
        if !self.tripped.swap(true, Ordering::SeqCst) {
            return Err(SinkError::Transport("connection reset by peer".to_string()));
        }
        self.inner.deliver(lead).await
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = IntakeConfig {
        endpoint: "in-memory (demo)".to_string(),
        success_window_ms: args.success_window_ms,
    };

    println!("CraftLink lead intake demo");
    println!("==========================");

    requester_walkthrough(&config).await;
    provider_walkthrough(&config).await;
    retry_walkthrough(&config).await;

    if let Some(path) = args.leads_csv {
        import_walkthrough(&config, &path).await?;
    }

    Ok(())
}

async fn requester_walkthrough(config: &IntakeConfig) {
    println!("\n1. Requester signup");

    let sink = Arc::new(InMemoryLeadSink::default());
    let notifier = Arc::new(ConsoleNotifier);
    let controller =
        SubmissionController::new(sink.clone(), notifier, config.success_display_window());

    let mut record = FormRecord::new();
    record.set_role(Role::Requester);
    record.set_field(FieldKey::Name, "Ada Obi");
    record.set_field(FieldKey::Email, "ada@example.com");
    record.set_field(FieldKey::Phone, "+2348012345678");
    record.set_field(FieldKey::ServiceCategory, "Plumbing");
    record.set_field(FieldKey::Location, "Lagos, Nigeria");

    println!(
        "  all fields filled, consent unchecked -> submittable: {}",
        record.is_submittable()
    );
    record.set_consent(true);
    println!("  consent checked -> submittable: {}", record.is_submittable());

    let outcome = controller.submit(&record).await;
    if let SubmissionOutcome::Accepted { .. } = outcome {
        let delivered = sink.deliveries();
        if let Some(payload) = delivered.first() {
            match serde_json::to_string_pretty(payload) {
                Ok(json) => println!("  delivered payload:\n{}", indent(&json)),
                Err(err) => println!("  payload did not serialize: {err}"),
            }
        }
    }

    println!(
        "  holding the success notice for {}ms before the form clears...",
        config.success_window_ms
    );
    controller.finish_success(&mut record).await;
    println!(
        "  form cleared: {} (role back to {})",
        record.is_empty(),
        record.role().label()
    );
}

async fn provider_walkthrough(config: &IntakeConfig) {
    println!("\n2. Provider signup, with a correction");

    let sink = Arc::new(InMemoryLeadSink::default());
    let notifier = Arc::new(ConsoleNotifier);
    let controller =
        SubmissionController::new(sink.clone(), notifier, config.success_display_window());

    let mut record = FormRecord::new();
    record.set_role(Role::Provider);
    record.set_field(FieldKey::Name, "Bola Adeyemi");
    record.set_field(FieldKey::Email, "bola@example.com");
    record.set_field(FieldKey::Phone, "08012345678");
    record.set_field(FieldKey::ServiceCategory, "Electrical");
    record.set_field(FieldKey::ExperienceBand, "3-5 years");
    record.set_field(FieldKey::Location, "Ibadan, Nigeria");
    record.set_field(FieldKey::Description, "Residential wiring and solar installs.");
    record.set_field(FieldKey::ImmediateAvailability, "yes");
    record.set_field(FieldKey::WeeklyHoursAvailable, "20-30 hours");
    record.set_field(FieldKey::PortfolioUrl, "https://portfolio.example.com/bola");
    record.set_field(FieldKey::OfferingType, "Service");
    record.set_field(FieldKey::RateText, "From NGN 15,000 per job");
    record.set_field(FieldKey::BankCode, "058");
    record.set_consent(true);

    record.set_field(FieldKey::AccountNumber, "12345");
    if let Some(hint) = record.error(FieldKey::AccountNumber) {
        println!("  account number '12345' -> inline hint: {hint}");
    }
    println!("  submittable with the bad account number: {}", record.is_submittable());

    record.set_field(FieldKey::AccountNumber, "0123456789");
    println!("  corrected account number -> submittable: {}", record.is_submittable());

    let outcome = controller.submit(&record).await;
    if let SubmissionOutcome::Accepted { .. } = outcome {
        if let Some(LeadPayload::Provider(lead)) = sink.deliveries().first() {
            println!("  contact link derived from phone: {}", lead.contact_link);
            println!("  reputation for new entrants: {}", lead.reputation);
        }
    }
    controller.finish_success(&mut record).await;
}

async fn retry_walkthrough(config: &IntakeConfig) {
    println!("\n3. Transport failure and retry");

    let sink = Arc::new(FlakyLeadSink::default());
    let notifier = Arc::new(ConsoleNotifier);
    let controller =
        SubmissionController::new(sink.clone(), notifier, config.success_display_window());

    let mut record = FormRecord::new();
    record.set_role(Role::Requester);
    record.set_field(FieldKey::Name, "Chidi Eze");
    record.set_field(FieldKey::Email, "chidi@example.com");
    record.set_field(FieldKey::Phone, "07012345678");
    record.set_field(FieldKey::ServiceCategory, "Cleaning");
    record.set_field(FieldKey::Location, "Abuja, Nigeria");
    record.set_consent(true);

    let outcome = controller.submit(&record).await;
    println!(
        "  first attempt failed: {}",
        matches!(outcome, SubmissionOutcome::Failed { .. })
    );
    println!(
        "  values preserved for retry: name = {:?}",
        record.value(FieldKey::Name)
    );

    controller.acknowledge_error();
    let outcome = controller.submit(&record).await;
    println!(
        "  retry accepted: {}",
        matches!(outcome, SubmissionOutcome::Accepted { .. })
    );
    controller.finish_success(&mut record).await;
}

async fn import_walkthrough(config: &IntakeConfig, path: &PathBuf) -> Result<(), AppError> {
    println!("\n4. Bulk import from {}", path.display());

    let rows = LeadCsvImporter::from_path(path)?;
    let sink = Arc::new(InMemoryLeadSink::default());
    let notifier = Arc::new(ConsoleNotifier);
    let service = Arc::new(LeadIntakeService::new(sink, notifier, config.clone()));

    let summary = service.import(&rows).await;
    println!(
        "  {} rows: {} accepted, {} rejected, {} failed",
        summary.total, summary.accepted, summary.rejected, summary.failed
    );
    for row in &summary.rows {
        if !row.accepted {
            println!("  - row {} ({}): {}", row.row, row.role.label(), row.message);
        }
    }

    Ok(())
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
