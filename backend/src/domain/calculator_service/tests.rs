//! Tests for the calculator service.

use std::sync::Arc;

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    CalculationPersistenceError, MockCalculationRepository, MockPasswordHasher,
    MockUserRepository,
};
use crate::domain::operations::Operation;
use crate::domain::{
    Calculation, CalculationId, DEFAULT_USERNAME, EmailAddress, ErrorCode, Operands, User,
    Username,
};

type Service =
    CalculatorService<MockCalculationRepository, MockUserRepository, MockPasswordHasher>;

fn user(id: i64, username: &str) -> User {
    User::new(
        UserId::new(id).expect("positive id"),
        Username::new(username).expect("username"),
        EmailAddress::new(format!("{username}@example.com")).expect("email"),
        Utc::now(),
    )
}

fn echo_record(
    id: i64,
) -> impl FnOnce(&NewCalculation) -> Result<Calculation, CalculationPersistenceError> + Send + 'static {
    move |new| {
        let evaluation = new.evaluation();
        Ok(Calculation {
            id: CalculationId::from_db(id),
            operation: evaluation.operation(),
            operands: evaluation.operands(),
            result: evaluation.result(),
            timestamp: Utc::now(),
            user_id: new.user_id(),
        })
    }
}

fn users_with_default() -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(|_| Ok(Some(user(1, DEFAULT_USERNAME))));
    users
}

fn service(calculations: MockCalculationRepository, users: MockUserRepository) -> Service {
    CalculatorService::new(
        Arc::new(calculations),
        Arc::new(users),
        Arc::new(MockPasswordHasher::new()),
    )
}

fn request(operation: Operation, x: f64, y: f64, user_id: Option<UserId>) -> CalculationRequest {
    CalculationRequest {
        operation,
        operands: Operands::new(x, y),
        user_id,
    }
}

#[rstest]
#[case(Operation::Add, 3.0, 5.0, 8.0)]
#[case(Operation::Subtract, 10.0, 4.0, 6.0)]
#[case(Operation::Multiply, 2.0, 5.0, 10.0)]
#[case(Operation::Divide, 10.0, 2.0, 5.0)]
#[tokio::test]
async fn records_result_for_default_user(
    #[case] operation: Operation,
    #[case] x: f64,
    #[case] y: f64,
    #[case] expected: f64,
) {
    let mut calculations = MockCalculationRepository::new();
    calculations
        .expect_record()
        .withf(move |new| {
            new.user_id().get() == 1
                && new.evaluation().operation() == operation
                && new.evaluation().result() == expected
        })
        .times(1)
        .return_once(echo_record(11));

    let outcome = service(calculations, users_with_default())
        .calculate(request(operation, x, y, None))
        .await
        .expect("calculation succeeds");

    assert_eq!(outcome.result, expected);
    assert_eq!(outcome.calculation_id.get(), 11);
}

#[tokio::test]
async fn division_by_zero_writes_nothing() {
    let mut calculations = MockCalculationRepository::new();
    calculations.expect_record().never();
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().never();
    users.expect_find_by_id().never();

    let error = service(calculations, users)
        .calculate(request(Operation::Divide, 10.0, 0.0, None))
        .await
        .expect_err("division by zero");

    assert_eq!(error.code(), ErrorCode::DivisionByZero);
    assert_eq!(error.message(), "Cannot divide by zero");
}

#[tokio::test]
async fn explicit_user_owns_the_calculation() {
    let owner = UserId::new(7).expect("positive id");
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .withf(move |id| *id == owner)
        .times(1)
        .return_once(|_| Ok(Some(user(7, "integrationuser"))));
    users.expect_find_by_username().never();
    let mut calculations = MockCalculationRepository::new();
    calculations
        .expect_record()
        .withf(move |new| new.user_id() == owner)
        .times(1)
        .return_once(echo_record(2));

    let outcome = service(calculations, users)
        .calculate(request(Operation::Multiply, 4.0, 2.5, Some(owner)))
        .await
        .expect("calculation succeeds");

    assert_eq!(outcome.result, 10.0);
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));
    let mut calculations = MockCalculationRepository::new();
    calculations.expect_record().never();

    let error = service(calculations, users)
        .calculate(request(
            Operation::Add,
            1.0,
            1.0,
            Some(UserId::new(99).expect("positive id")),
        ))
        .await
        .expect_err("unknown user");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn user_deleted_between_lookup_and_insert_is_not_found() {
    let mut calculations = MockCalculationRepository::new();
    calculations
        .expect_record()
        .return_once(|_| Err(CalculationPersistenceError::user_not_found(1_i64)));

    let error = service(calculations, users_with_default())
        .calculate(request(Operation::Add, 1.0, 2.0, None))
        .await
        .expect_err("owner vanished");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn storage_outage_is_service_unavailable() {
    let mut calculations = MockCalculationRepository::new();
    calculations
        .expect_record()
        .return_once(|_| Err(CalculationPersistenceError::connection("pool timed out")));

    let error = service(calculations, users_with_default())
        .calculate(request(Operation::Subtract, 1.0, 2.0, None))
        .await
        .expect_err("unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
