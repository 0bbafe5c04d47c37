//! Integration tests for the versioned repository contract.
//!
//! These tests verify, against the in-memory adapters:
//! 1. Insert assigns version 1; each successful update bumps it by one
//! 2. A stale update fails with `OptimisticLockingFailure` and writes nothing
//! 3. Of two racing updates from the same snapshot exactly one wins
//! 4. A task's assignee collection is replaced, never merged
//! 5. The task handlers surface conflicts to the caller unchanged

use std::sync::Arc;

use business_records::adapters::{
    InMemoryEmployeeRepository, InMemoryProjectRepository, InMemoryTaskRepository,
};
use business_records::application::{
    CreateTaskCommand, CreateTaskHandler, ReassignTaskCommand, ReassignTaskHandler,
    UpdateTaskCommand, UpdateTaskHandler,
};
use business_records::domain::foundation::{
    EmployeeId, EntityRepository, ProjectId, RepositoryError, Version,
};
use business_records::domain::records::{EmployeeData, ProjectData, TaskData, TaskStatus};
use business_records::ports::TaskRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn employee(first_name: &str) -> EmployeeData {
    EmployeeData::new(first_name, "Tester", None, None, None).unwrap()
}

fn task_with(assignees: &[EmployeeId]) -> TaskData {
    TaskData::new(
        ProjectId::new(1).unwrap(),
        "Quarterly close",
        None,
        TaskStatus::Open,
        None,
        assignees.iter().copied(),
    )
    .unwrap()
}

// =============================================================================
// Version lifecycle
// =============================================================================

#[tokio::test]
async fn stale_update_is_rejected_and_newer_data_survives() {
    let repo = InMemoryEmployeeRepository::new("Employee");

    let v1 = repo.insert(employee("D1")).await.unwrap();
    assert_eq!(v1.version(), Version::INITIAL);

    let v2 = repo.update(&v1.with_data(employee("D2"))).await.unwrap();
    assert_eq!(v2.version().value(), 2);
    assert_eq!(
        repo.find_by_id(*v1.id()).await.unwrap().unwrap().data().first_name(),
        "D2"
    );

    let err = repo.update(&v1.with_data(employee("D3"))).await.unwrap_err();
    assert_eq!(
        err,
        RepositoryError::optimistic_locking("Employee", v1.id(), Version::INITIAL)
    );

    let stored = repo.find_by_id(*v1.id()).await.unwrap().unwrap();
    assert_eq!(stored.data().first_name(), "D2");
    assert_eq!(stored.version().value(), 2);
}

#[tokio::test]
async fn entities_compare_by_id_across_versions() {
    let repo = InMemoryEmployeeRepository::new("Employee");
    let v1 = repo.insert(employee("Ann")).await.unwrap();
    let v2 = repo.update(&v1.with_data(employee("Anna"))).await.unwrap();

    assert_eq!(v1, v2);
    assert_ne!(v1.data(), v2.data());
}

#[tokio::test]
async fn concurrent_updates_from_same_snapshot_have_one_winner() {
    let repo = Arc::new(InMemoryEmployeeRepository::new("Employee"));
    let snapshot = repo.insert(employee("Start")).await.unwrap();

    let left = {
        let repo = repo.clone();
        let edit = snapshot.with_data(employee("Left"));
        tokio::spawn(async move { repo.update(&edit).await })
    };
    let right = {
        let repo = repo.clone();
        let edit = snapshot.with_data(employee("Right"));
        tokio::spawn(async move { repo.update(&edit).await })
    };
    let (left, right) = tokio::join!(left, right);
    let results = [left.unwrap(), right.unwrap()];

    let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(e) if e.is_conflict()))
        .count();
    assert_eq!(winners.len(), 1);
    assert_eq!(conflicts, 1);

    let stored = repo.find_by_id(*snapshot.id()).await.unwrap().unwrap();
    assert_eq!(stored.version().value(), 2);
    assert_eq!(stored.data(), winners[0].data());
}

#[tokio::test]
async fn delete_is_idempotent_and_exists_follows() {
    let repo = InMemoryEmployeeRepository::new("Employee");
    let inserted = repo.insert(employee("Gone")).await.unwrap();

    assert!(repo.exists(*inserted.id()).await.unwrap());
    repo.delete_by_id(*inserted.id()).await.unwrap();
    repo.delete_by_id(*inserted.id()).await.unwrap();
    assert!(!repo.exists(*inserted.id()).await.unwrap());
}

// =============================================================================
// Dependent collection
// =============================================================================

#[tokio::test]
async fn assignee_update_replaces_rather_than_merges() {
    let repo = InMemoryTaskRepository::new();
    let staff: Vec<EmployeeId> = (1..=3).map(|id| EmployeeId::new(id).unwrap()).collect();

    let inserted = repo.insert(task_with(&staff[..2])).await.unwrap();
    let edited = inserted.with_data(inserted.data().clone().with_assignees([staff[2]]));
    repo.update(&edited).await.unwrap();

    let stored = repo.find_by_id(*inserted.id()).await.unwrap().unwrap();
    assert_eq!(
        stored.data().assignees().iter().copied().collect::<Vec<_>>(),
        vec![staff[2]]
    );
    assert!(repo.find_by_assignee(staff[0]).await.unwrap().is_empty());
    assert_eq!(repo.find_by_assignee(staff[2]).await.unwrap().len(), 1);
}

#[tokio::test]
async fn conflicting_task_update_keeps_previous_assignees() {
    let repo = InMemoryTaskRepository::new();
    let e1 = EmployeeId::new(1).unwrap();
    let e2 = EmployeeId::new(2).unwrap();

    let v1 = repo.insert(task_with(&[e1])).await.unwrap();
    repo.update(&v1.with_data(v1.data().clone().with_status(TaskStatus::Done)))
        .await
        .unwrap();

    let err = repo
        .update(&v1.with_data(v1.data().clone().with_assignees([e2])))
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    let stored = repo.find_by_id(*v1.id()).await.unwrap().unwrap();
    assert!(stored.data().is_assigned_to(e1));
    assert!(!stored.data().is_assigned_to(e2));
    assert_eq!(stored.data().status(), TaskStatus::Done);
}

// =============================================================================
// Handlers end to end
// =============================================================================

#[tokio::test]
async fn task_workflow_through_handlers() {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let projects = Arc::new(InMemoryProjectRepository::new("Project"));
    let employees = Arc::new(InMemoryEmployeeRepository::new("Employee"));

    let project = projects
        .insert(ProjectData::new("Ledger", None, None).unwrap())
        .await
        .unwrap();
    let alice = *employees.insert(employee("Alice")).await.unwrap().id();
    let bob = *employees.insert(employee("Bob")).await.unwrap().id();

    let create = CreateTaskHandler::new(tasks.clone(), projects.clone(), employees.clone());
    let update = UpdateTaskHandler::new(tasks.clone());
    let reassign = ReassignTaskHandler::new(tasks.clone(), employees.clone());

    let created = create
        .handle(CreateTaskCommand {
            project: *project.id(),
            title: "Reconcile accounts".into(),
            description: Some("Month end".into()),
            due_date: None,
            assignees: vec![alice],
        })
        .await
        .unwrap();

    let mut start = UpdateTaskCommand::for_task(*created.id(), Some(created.version()));
    start.status = Some(TaskStatus::InProgress);
    let started = update.handle(start).await.unwrap();
    assert_eq!(started.version().value(), 2);

    // A client still holding version 1 loses.
    let err = reassign
        .handle(ReassignTaskCommand {
            task_id: *created.id(),
            expected_version: Some(created.version()),
            assignees: vec![bob],
        })
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    let reassigned = reassign
        .handle(ReassignTaskCommand {
            task_id: *created.id(),
            expected_version: Some(started.version()),
            assignees: vec![bob],
        })
        .await
        .unwrap();
    assert_eq!(reassigned.version().value(), 3);

    let stored = tasks.find_by_id(*created.id()).await.unwrap().unwrap();
    assert_eq!(stored.data().status(), TaskStatus::InProgress);
    assert!(stored.data().is_assigned_to(bob));
    assert!(!stored.data().is_assigned_to(alice));
}
