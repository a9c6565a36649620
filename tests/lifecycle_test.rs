//! Tests for the lifecycle engine's state-machine rules: authorization
//! guards, terminal states, the serialization-conflict detector, the
//! notification texts, and the HTTP error mapping. All pure — no database.
//!
//! Run with: `cargo test --test lifecycle_test`
use actix_web::http::StatusCode;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::DbErr;
use uuid::Uuid;

use talentlink_backend::handlers::lifecycle_error_response;
use talentlink_backend::lifecycle::{
    LifecycleError, ensure_contract_party, ensure_project_client, is_serialization_conflict,
    notifications,
};
use talentlink_backend::models::contracts::{self, Status as ContractStatus};
use talentlink_backend::models::profiles::SkillSet;
use talentlink_backend::models::projects;
use talentlink_backend::models::proposals::Status as ProposalStatus;

fn sample_project(client_id: Uuid) -> projects::Model {
    projects::Model {
        id: Uuid::new_v4(),
        client_id,
        title: "Landing page".to_string(),
        description: "Build a landing page".to_string(),
        budget: Some(Decimal::new(5000, 0)),
        deadline: None,
        skills_required: SkillSet(vec!["html".to_string(), "css".to_string()]),
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn sample_contract(client_id: Uuid, freelancer_id: Uuid, status: ContractStatus) -> contracts::Model {
    contracts::Model {
        id: Uuid::new_v4(),
        proposal_id: Uuid::new_v4(),
        project_id: Uuid::new_v4(),
        client_id,
        freelancer_id,
        status,
        created_at: Utc::now(),
        updated_at: None,
    }
}

#[test]
fn test_only_the_client_passes_the_project_guard() {
    let client_id = Uuid::new_v4();
    let project = sample_project(client_id);

    assert!(ensure_project_client(&project, client_id).is_ok());

    let stranger = Uuid::new_v4();
    match ensure_project_client(&project, stranger) {
        Err(LifecycleError::Unauthorized(_)) => {}
        other => panic!("Expected Unauthorized, got {other:?}"),
    }
}

#[test]
fn test_both_parties_pass_the_contract_guard() {
    let client_id = Uuid::new_v4();
    let freelancer_id = Uuid::new_v4();
    let contract = sample_contract(client_id, freelancer_id, ContractStatus::Active);

    assert!(ensure_contract_party(&contract, client_id).is_ok());
    assert!(ensure_contract_party(&contract, freelancer_id).is_ok());

    match ensure_contract_party(&contract, Uuid::new_v4()) {
        Err(LifecycleError::Unauthorized(_)) => {}
        other => panic!("Expected Unauthorized, got {other:?}"),
    }
}

#[test]
fn test_other_party_flips_sides() {
    let client_id = Uuid::new_v4();
    let freelancer_id = Uuid::new_v4();
    let contract = sample_contract(client_id, freelancer_id, ContractStatus::Active);

    assert_eq!(contract.other_party(client_id), freelancer_id);
    assert_eq!(contract.other_party(freelancer_id), client_id);
}

#[test]
fn test_proposal_terminal_states() {
    assert!(!ProposalStatus::Pending.is_terminal());
    assert!(ProposalStatus::Accepted.is_terminal());
    assert!(ProposalStatus::Rejected.is_terminal());
}

#[test]
fn test_contract_terminal_states() {
    assert!(!ContractStatus::Active.is_terminal());
    assert!(ContractStatus::Completed.is_terminal());
    assert!(ContractStatus::Cancelled.is_terminal());
}

#[test]
fn test_serialization_conflicts_are_detected() {
    let conflict = DbErr::Custom(
        "could not serialize access due to concurrent update (SQLSTATE 40001)".to_string(),
    );
    assert!(is_serialization_conflict(&conflict));

    let deadlock = DbErr::Custom("deadlock detected (SQLSTATE 40P01)".to_string());
    assert!(is_serialization_conflict(&deadlock));

    let unrelated = DbErr::Custom("duplicate key value violates unique constraint".to_string());
    assert!(!is_serialization_conflict(&unrelated));
}

#[test]
fn test_acceptance_notification_mentions_the_project_and_outcome() {
    let message = notifications::proposal_accepted("Landing page");
    assert!(message.contains("Landing page"));
    assert!(message.contains("ACCEPTED"));

    let message = notifications::proposal_rejected("Landing page");
    assert!(message.contains("Landing page"));
    assert!(message.contains("rejected"));
}

#[test]
fn test_contract_closure_notifications_name_the_terminal_state() {
    let completed = notifications::contract_closed("Landing page", ContractStatus::Completed);
    assert!(completed.contains("completed"));

    let cancelled = notifications::contract_closed("Landing page", ContractStatus::Cancelled);
    assert!(cancelled.contains("cancelled"));
}

#[test]
fn test_lifecycle_errors_map_to_http_statuses() {
    let cases = [
        (
            LifecycleError::Unauthorized("no".to_string()),
            StatusCode::FORBIDDEN,
        ),
        (
            LifecycleError::NotFound("missing".to_string()),
            StatusCode::NOT_FOUND,
        ),
        (
            LifecycleError::InvalidState("terminal".to_string()),
            StatusCode::CONFLICT,
        ),
        (
            LifecycleError::Conflict("raced".to_string()),
            StatusCode::CONFLICT,
        ),
        (
            LifecycleError::Validation("bad bid".to_string()),
            StatusCode::BAD_REQUEST,
        ),
        (
            LifecycleError::Db(DbErr::Custom("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(lifecycle_error_response(&err).status(), expected);
    }
}
