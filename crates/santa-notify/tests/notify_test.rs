//! Notifier tests

use santa_core::{AssignConfig, Assignment, Participant, Roster, RunConfig, assign_with_seed};
use santa_notify::{
    Credential, DeliveryOutcome, DeliveryPolicy, MemoryTransport, Notifier, OutboxTransport,
    compose,
};

const FAMILY: &str = r#"{
    "sender_email": "santa@example.com",
    "sender_name": "North Pole",
    "subject": "Wells Secret Santa!",
    "group_name": "Wells",
    "people": [
        { "name": "Anna", "email": "anna@example.com", "exclude": ["Dave"] },
        { "name": "Bob", "email": "bob@example.com" },
        { "name": "Cleo", "email": "cleo@example.com" },
        { "name": "Dave", "email": "dave@example.com", "exclude": ["Anna"] }
    ]
}"#;

fn family() -> (RunConfig, Assignment) {
    let config = RunConfig::from_json_str(FAMILY).unwrap();
    let assignment =
        assign_with_seed(config.roster(), Some(2020), &AssignConfig::default()).unwrap();
    (config, assignment)
}

#[test]
fn plain_text_message_layout() {
    let roster = Roster::new(vec![
        Participant::new("Anna", "anna@example.com"),
        Participant::new("Bob", "bob@example.com"),
    ])
    .unwrap();
    let sender = santa_core::SenderIdentity { email: "santa@example.com".to_string(), name: None };
    let config = RunConfig::new(sender, roster).unwrap().with_group_name("Wells");
    // Two people can only swap, whatever the seed.
    let assignment = assign_with_seed(config.roster(), Some(0), &AssignConfig::default()).unwrap();

    let anna = config.roster().get("Anna").unwrap();
    let message = compose(&config, &assignment, anna).unwrap();

    assert_eq!(message.subject, "Secret Santa!");
    insta::assert_snapshot!(message.text, @r"
    Wells Secret Santa

    Hi Anna,

    Your Secret Santa target is Bob!

    Contact list:
    - Anna <anna@example.com>
    - Bob <bob@example.com>
    ");
}

#[test]
fn every_participant_gets_own_target_and_full_roster() {
    let (config, assignment) = family();
    let mut notifier = Notifier::new(MemoryTransport::new(), Credential::none());

    let report = notifier.notify(&config, &assignment);
    assert!(report.all_delivered());
    assert_eq!(report.delivered_count(), 4);

    let sent = notifier.transport().sent();
    assert_eq!(sent.len(), 4);
    for (message, participant) in sent.iter().zip(config.roster()) {
        assert_eq!(message.to, participant.email);
        assert_eq!(message.from, "North Pole <santa@example.com>");
        assert_eq!(message.subject, "Wells Secret Santa!");

        let target = assignment.target_of(&participant.name).unwrap();
        assert!(message.text.contains(&format!("Your Secret Santa target is {target}!")));
        for contact in config.roster() {
            assert!(message.text.contains(&contact.email));
            assert!(message.html.contains(&contact.email));
        }
    }
}

#[test]
fn best_effort_continues_after_failure() {
    let (config, assignment) = family();
    let before = assignment.clone();
    let transport = MemoryTransport::new().rejecting("bob@example.com");
    let mut notifier = Notifier::new(transport, Credential::none());

    let report = notifier.notify(&config, &assignment);

    assert!(!report.all_delivered());
    assert_eq!(report.delivered_count(), 3);
    let failed: Vec<_> = report.failures().map(|e| e.participant.as_str()).collect();
    assert_eq!(failed, ["Bob"]);
    assert_eq!(assignment, before);
}

#[test]
fn abort_policy_skips_remaining() {
    let (config, assignment) = family();
    let transport = MemoryTransport::new().rejecting("bob@example.com");
    let mut notifier = Notifier::new(transport, Credential::none())
        .with_policy(DeliveryPolicy::AbortOnFirstFailure);

    let report = notifier.notify(&config, &assignment);
    let outcomes: Vec<_> = report.entries().iter().map(|e| &e.outcome).collect();

    assert_eq!(outcomes[0], &DeliveryOutcome::Delivered);
    assert!(matches!(outcomes[1], DeliveryOutcome::Failed { .. }));
    assert_eq!(outcomes[2], &DeliveryOutcome::Skipped);
    assert_eq!(outcomes[3], &DeliveryOutcome::Skipped);
    assert_eq!(notifier.transport().sent().len(), 1);
}

#[test]
fn auth_failure_marks_everyone_failed() {
    let (config, assignment) = family();
    let transport = MemoryTransport::new().requiring_secret("correct horse");
    let mut notifier = Notifier::new(transport, Credential::new("battery staple"));

    let report = notifier.notify(&config, &assignment);

    assert_eq!(report.delivered_count(), 0);
    assert_eq!(report.failures().count(), 4);
    assert!(report.entries().iter().all(|e| matches!(
        &e.outcome,
        DeliveryOutcome::Failed { reason } if reason.starts_with("authentication failed")
    )));
    assert!(notifier.transport().sent().is_empty());
}

#[test]
fn outbox_receives_one_file_per_participant() {
    let (config, assignment) = family();
    let dir = tempfile::tempdir().unwrap();
    let outbox = OutboxTransport::new(dir.path().join("out"));
    let mut notifier = Notifier::new(outbox, Credential::none());

    let report = notifier.notify(&config, &assignment);
    assert!(report.all_delivered());

    let outbox = notifier.into_transport();
    assert_eq!(outbox.dir(), dir.path().join("out"));
    assert_eq!(outbox.written().len(), 4);
    let first = std::fs::read_to_string(&outbox.written()[0]).unwrap();
    assert!(first.contains("To: anna@example.com"));
    assert!(first.contains("Subject: Wells Secret Santa!"));
    assert!(first.contains("<h2>Wells Secret Santa</h2>"));
}

#[test]
fn subject_override_cannot_add_headers() {
    let (config, assignment) = family();
    let config = config.with_subject("Hi\nBcc: leak@evil.example");
    let dir = tempfile::tempdir().unwrap();
    let mut notifier = Notifier::new(OutboxTransport::new(dir.path()), Credential::none());

    assert!(notifier.notify(&config, &assignment).all_delivered());

    for path in notifier.transport().written() {
        let eml = std::fs::read_to_string(path).unwrap();
        assert!(!eml.lines().any(|l| l.starts_with("Bcc:")), "header injected in {path:?}");
    }
}
