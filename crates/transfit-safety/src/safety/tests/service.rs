use std::sync::Arc;

use super::common::*;
use crate::safety::domain::{BinderType, UserId};
use crate::safety::service::{SafetyEvaluationService, SafetyServiceError};
use crate::safety::repository::StoreError;

#[test]
fn evaluates_stored_profiles_against_the_catalog() {
    let stored = binding_profile(Some(9.0), Some(BinderType::Commercial));
    let service = build_service(vec![stored.clone()]);

    let result = service
        .evaluate_user(&stored.user_id, now())
        .expect("evaluation succeeds");

    assert_eq!(result, engine().evaluate(&stored, &pool(), now()));
    assert!(result.is_excluded(&id("bench-press")));
}

#[test]
fn unknown_users_are_reported() {
    let service = build_service(Vec::new());

    let error = service
        .evaluate_user(&UserId("ghost".to_string()), now())
        .expect_err("missing profile");

    assert!(matches!(error, SafetyServiceError::ProfileNotFound(user) if user.0 == "ghost"));
}

#[test]
fn supplied_exercises_bypass_the_catalog() {
    let service = SafetyEvaluationService::new(
        Arc::new(MemoryProfiles::default()),
        Arc::new(UnavailableCatalog),
        engine(),
    );
    let profile = binding_profile(Some(9.0), Some(BinderType::Commercial));

    let result = service
        .evaluate_profile(&profile, Some(pool()), now())
        .expect("explicit pool needs no catalog");
    assert!(result.is_excluded(&id("bench-press")));

    let error = service
        .evaluate_profile(&profile, None, now())
        .expect_err("catalog offline");
    assert!(matches!(
        error,
        SafetyServiceError::Store(StoreError::Unavailable(_))
    ));
}
