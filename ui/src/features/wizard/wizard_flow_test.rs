//! End-to-end wizard scenarios: submission properties across whole flows

use super::*;
use crate::services::navigation::testing::{NavEvent, RecordingNavigator};
use crate::services::navigation::AppRoute;

fn registration_wizard() -> Wizard {
    let sequencer = StepSequencer::linear(
        Flow::Registration,
        vec![
            StepDefinition::new("Name").field("name"),
            StepDefinition::new("Username").field("username"),
            StepDefinition::new("DOB").field("dateOfBirth"),
        ],
    )
    .unwrap();
    let schema = Schema::new()
        .field(FieldRules::new("name").required("Name is required"))
        .field(
            FieldRules::new("username")
                .required("Username is required")
                .min_length(3, "Username must be at least 3 characters"),
        )
        .field(FieldRules::new("dateOfBirth").required("Date of birth is required"));
    Wizard::new(sequencer, schema)
}

fn profile_wizard() -> Wizard {
    let sequencer = StepSequencer::skippable(
        Flow::ProfileCreation,
        vec![
            StepDefinition::new("Profile picture").field_with_default("profilePicture", ""),
            StepDefinition::new("Bio").field_with_default("bio", ""),
            StepDefinition::new("Location").field_with_default("location", ""),
        ],
        0,
    )
    .unwrap();
    let schema = Schema::new()
        .field(FieldRules::new("profilePicture").required("Please choose a profile picture"))
        .field(
            FieldRules::new("bio")
                .required("Tell people about yourself")
                .max_length(160, "Bio must be 160 characters or fewer"),
        )
        .field(FieldRules::new("location").required("Location is required"));
    Wizard::new(sequencer, schema)
}

#[test]
fn test_empty_name_reports_required() {
    let mut wizard = registration_wizard();
    wizard
        .submit_step(&["name"], FormData::new().with("name", ""), false)
        .unwrap();

    assert_eq!(wizard.errors().len(), 1);
    assert_eq!(wizard.errors()["name"], "Name is required");
    assert_eq!(wizard.current_step_index(), 0);
}

#[test]
fn test_named_step_advances() {
    let mut wizard = registration_wizard();
    wizard
        .submit_step(&["name"], FormData::new().with("name", "Alice"), false)
        .unwrap();

    assert_eq!(wizard.form_data().text("name"), Some("Alice"));
    assert!(!wizard.errors().contains_key("name"));
    assert_eq!(wizard.current_step_index(), 1);
}

#[test]
fn test_submission_is_all_or_nothing() {
    let mut wizard = registration_wizard();
    wizard
        .submit_step(&["name"], FormData::new().with("name", "Alice"), false)
        .unwrap();
    let before = wizard.form_data().clone();

    // The valid extra key must not leak in when the step itself fails
    let outcome = wizard
        .submit_step(
            &["username"],
            FormData::new().with("username", "al").with("bio", "hello"),
            false,
        )
        .unwrap();

    assert!(matches!(outcome, StepOutcome::Invalid(_)));
    assert_eq!(wizard.form_data(), &before);
    assert_eq!(wizard.current_step_index(), 1);

    let outcome = wizard
        .submit_step(
            &["username"],
            FormData::new().with("username", "alice").with("bio", "hello"),
            false,
        )
        .unwrap();
    assert!(matches!(outcome, StepOutcome::Advanced { index: 2, .. }));
    assert_eq!(wizard.form_data().len(), 3);
    assert!(wizard.errors().is_empty());
}

#[test]
fn test_skip_merges_and_advances_regardless_of_content() {
    let mut wizard = profile_wizard();
    wizard
        .submit_step(&["profilePicture"], FormData::new().with("profilePicture", "file:///me.png"), false)
        .unwrap();
    assert_eq!(wizard.sequencer().step_name(1), Ok("Bio"));

    let outcome = wizard
        .submit_step(&["bio"], FormData::new().with("profilePicture", ""), true)
        .unwrap();

    assert!(matches!(outcome, StepOutcome::Advanced { index: 2, .. }));
    assert_eq!(wizard.form_data().text("profilePicture"), Some(""));
}

#[test]
fn test_skip_step_clears_only_its_own_field() {
    let mut wizard = profile_wizard();
    wizard
        .submit_step(&["profilePicture"], FormData::new().with("profilePicture", "file:///me.png"), false)
        .unwrap();

    wizard.skip_step().unwrap();

    assert_eq!(wizard.form_data().text("bio"), Some(""));
    assert_eq!(
        wizard.form_data().text("profilePicture"),
        Some("file:///me.png")
    );
    assert_eq!(wizard.current_step_index(), 2);
}

#[test]
fn test_last_step_resets_to_initial_shape() {
    let nav = RecordingNavigator::default();
    let mut wizard = profile_wizard();
    wizard.skip_step().unwrap();
    wizard.skip_step().unwrap();
    let outcome = wizard
        .submit_and_navigate(&["location"], FormData::new().with("location", "Lisbon"), false, &nav)
        .unwrap();

    match outcome {
        StepOutcome::Completed { data, .. } => {
            assert_eq!(data.text("location"), Some("Lisbon"));
            assert_eq!(data.text("bio"), Some(""));
        }
        other => panic!("expected completion, got {:?}", other),
    }
    assert!(wizard.form_data().is_empty());
    assert!(wizard.errors().is_empty());
    assert_eq!(wizard.current_step_index(), 0);
    assert_eq!(nav.events(), vec![NavEvent::Push(AppRoute::ProfileComplete)]);
}

#[test]
fn test_retreat_from_first_step_defers_to_exit_path() {
    let nav = RecordingNavigator::default();
    let mut wizard = registration_wizard();
    for _ in 0..3 {
        assert_eq!(wizard.go_back(&nav), BackOutcome::ConfirmExit);
        assert_eq!(wizard.current_step_index(), 0);
    }
    assert!(nav.events().is_empty());
}

#[test]
fn test_full_registration_walk_with_navigation() {
    let nav = RecordingNavigator::default();
    let mut wizard = registration_wizard();

    wizard
        .submit_and_navigate(&["name"], FormData::new().with("name", "Alice"), false, &nav)
        .unwrap();
    wizard
        .submit_and_navigate(&["username"], FormData::new().with("username", "alice"), false, &nav)
        .unwrap();
    wizard.go_back(&nav);
    wizard
        .submit_and_navigate(&["username"], FormData::new().with("username", "alice_b"), false, &nav)
        .unwrap();
    let outcome = wizard
        .submit_and_navigate(&["dateOfBirth"], FormData::new().with("dateOfBirth", "1990-05-01"), false, &nav)
        .unwrap();

    assert!(matches!(outcome, StepOutcome::Completed { .. }));
    assert_eq!(
        nav.events(),
        vec![
            NavEvent::Push(AppRoute::Registration { step: 1 }),
            NavEvent::Push(AppRoute::Registration { step: 2 }),
            NavEvent::Back,
            NavEvent::Push(AppRoute::Registration { step: 2 }),
            NavEvent::Push(AppRoute::RegistrationComplete),
        ]
    );
}

#[test]
fn test_browser_history_moves_back_but_never_ahead() {
    let mut wizard = registration_wizard();
    wizard
        .submit_step(&["name"], FormData::new().with("name", "Alice"), false)
        .unwrap();
    wizard
        .submit_step(&["username"], FormData::new().with("username", "alice"), false)
        .unwrap();
    assert_eq!(wizard.current_step_index(), 2);

    // A reload or typed URL pointing past the validated steps
    assert_eq!(wizard.sync_to_step(5), Some(AppRoute::Registration { step: 2 }));

    assert_eq!(wizard.sync_to_step(0), None);
    assert_eq!(wizard.current_step_index(), 0);
    assert_eq!(wizard.form_data().text("username"), Some("alice"));
}
