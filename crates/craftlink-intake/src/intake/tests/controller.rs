use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};
use serde_json::Value;

use super::common::*;
use crate::intake::domain::{FieldKey, Role, SubmissionState};
use crate::intake::profile::{build_payload, whatsapp_contact_link};
use crate::intake::submit::{
    SubmissionController, SubmissionOutcome, PROVIDER_SUCCESS_MESSAGE,
    REQUESTER_SUCCESS_MESSAGE, RETRY_MESSAGE,
};

#[tokio::test]
async fn double_submit_results_in_one_outbound_delivery() {
    let sink = Arc::new(SlowLeadSink::new(Duration::from_millis(50)));
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = Arc::new(SubmissionController::new(
        sink.clone(),
        notifier.clone(),
        Duration::from_millis(10),
    ));
    let record = requester_record();

    let (first, second) =
        tokio::join!(controller.submit(&record), controller.submit(&record));

    let outcomes = [first, second];
    assert_eq!(
        outcomes
            .iter()
            .filter(|outcome| matches!(outcome, SubmissionOutcome::Accepted { .. }))
            .count(),
        1
    );
    assert_eq!(
        outcomes
            .iter()
            .filter(|outcome| matches!(outcome, SubmissionOutcome::InFlight))
            .count(),
        1
    );
    assert_eq!(sink.delivered(), 1);
    assert_eq!(notifier.accepted().len(), 1);
}

#[tokio::test]
async fn rejected_records_never_reach_the_sink() {
    let (service, sink, notifier) = build_service();
    let mut request = requester_request();
    request.fields.remove(&FieldKey::Email);

    match service.submit(&request).await {
        SubmissionOutcome::Rejected(report) => {
            assert!(report.missing_fields.contains(&FieldKey::Email));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(sink.deliveries().is_empty());
    assert!(notifier.accepted().is_empty());
    assert!(notifier.failed().is_empty());
}

#[tokio::test]
async fn transport_failure_keeps_values_and_notifies_retry() {
    let sink = Arc::new(FailingLeadSink);
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = SubmissionController::new(
        sink,
        notifier.clone(),
        Duration::from_millis(10),
    );
    let mut record = requester_record();

    match controller.submit(&record).await {
        SubmissionOutcome::Failed { message } => assert_eq!(message, RETRY_MESSAGE),
        other => panic!("expected failure, got {other:?}"),
    }

    assert!(matches!(controller.state(), SubmissionState::Error { .. }));
    assert_eq!(record.value(FieldKey::Name), Some("Ada Obi"));
    assert_eq!(record.value(FieldKey::Phone), Some("+2348012345678"));
    assert_eq!(notifier.failed(), vec![RETRY_MESSAGE.to_string()]);

    // Returning to Idle for a retry never clears the record.
    controller.acknowledge_error();
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert!(record.is_submittable());

    // The display-window reset only runs after a success.
    controller.finish_success(&mut record).await;
    assert_eq!(record.value(FieldKey::Name), Some("Ada Obi"));
}

#[tokio::test]
async fn success_clears_the_record_only_after_the_display_window() {
    let sink = Arc::new(RecordingLeadSink::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let window = Duration::from_millis(40);
    let controller = SubmissionController::new(sink.clone(), notifier.clone(), window);
    let mut record = requester_record();

    let outcome = controller.submit(&record).await;
    assert!(matches!(outcome, SubmissionOutcome::Accepted { .. }));

    // The record survives while the success notice is on screen.
    assert_eq!(controller.state(), SubmissionState::Success);
    assert_eq!(record.value(FieldKey::Name), Some("Ada Obi"));

    let started = Instant::now();
    controller.finish_success(&mut record).await;

    assert!(started.elapsed() >= window);
    assert!(record.is_empty());
    assert_eq!(record.role(), Role::Requester);
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert_eq!(sink.deliveries().len(), 1);
}

#[tokio::test]
async fn success_messages_are_role_specific() {
    let (service, _, notifier) = build_service();

    let outcome = service.submit(&requester_request()).await;
    assert!(matches!(
        outcome,
        SubmissionOutcome::Accepted {
            role: Role::Requester,
            message: REQUESTER_SUCCESS_MESSAGE,
        }
    ));

    let outcome = service.submit(&provider_request()).await;
    assert!(matches!(
        outcome,
        SubmissionOutcome::Accepted {
            role: Role::Provider,
            message: PROVIDER_SUCCESS_MESSAGE,
        }
    ));
    assert_eq!(notifier.accepted().len(), 2);
}

#[test]
fn payload_is_deterministic_apart_from_the_timestamp() {
    let record = provider_record();
    let stamp = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();

    let first = build_payload(&record, stamp).expect("payload builds");
    let second = build_payload(&record, stamp).expect("payload builds");
    assert_eq!(first, second);

    let later = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 5).unwrap();
    let third = build_payload(&record, later).expect("payload builds");

    let mut a = serde_json::to_value(&first).expect("serializes");
    let mut b = serde_json::to_value(&third).expect("serializes");
    a.as_object_mut().unwrap().remove("submittedAt");
    b.as_object_mut().unwrap().remove("submittedAt");
    assert_eq!(a, b);
}

#[test]
fn provider_payload_derives_contact_link_and_reputation() {
    let record = provider_record();
    let stamp = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
    let payload = build_payload(&record, stamp).expect("payload builds");

    let json: Value = serde_json::to_value(&payload).expect("serializes");
    assert_eq!(json["type"], "Provider");
    assert_eq!(json["contactLink"], "https://wa.me/08012345678");
    assert_eq!(json["reputation"], "New provider");
    assert_eq!(json["bankName"], "Guaranty Trust Bank");
    assert_eq!(json["bankCode"], "058");
    assert_eq!(json["serviceCategory"], "Electrical");
    assert_eq!(json["immediateAvailability"], true);
}

#[test]
fn contact_link_strips_every_non_digit() {
    assert_eq!(
        whatsapp_contact_link("+234 801 234 5678"),
        "https://wa.me/2348012345678"
    );
    assert_eq!(whatsapp_contact_link("0801-234-5678"), "https://wa.me/08012345678");
}

#[test]
fn requester_payload_matches_the_contract() {
    let record = requester_record();
    let stamp = Utc.with_ymd_and_hms(2026, 8, 1, 9, 30, 0).unwrap();
    let payload = build_payload(&record, stamp).expect("payload builds");

    let json: Value = serde_json::to_value(&payload).expect("serializes");
    assert_eq!(json["type"], "Requester");
    assert_eq!(json["name"], "Ada Obi");
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json["serviceCategory"], "Plumbing");
    assert_eq!(json["location"], "Lagos, Nigeria");
    assert_eq!(json["consent"], true);
    assert!(json.get("contactLink").is_none());
}
