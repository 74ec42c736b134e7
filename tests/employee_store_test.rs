//! Employee service tests against a real (in-memory SQLite) store.

mod common;

use std::sync::Arc;

use employee_management::domain::{
    Employee, EmployeeChanges, EmployeeListParams, EmployeeSortField, EmployeeType,
};
use employee_management::errors::{AppError, DuplicateField};
use employee_management::infra::EmployeeRepository;
use employee_management::services::EmployeeService;
use employee_management::types::SortOrder;

use common::{new_employee, service, store, test_database};

fn page(page: u64, limit: u64) -> EmployeeListParams {
    EmployeeListParams {
        page,
        limit,
        ..Default::default()
    }
}

#[tokio::test]
async fn create_assigns_sequential_ids_and_round_trips() {
    let db = test_database().await;
    let service = service(&db);

    let mut input = new_employee(1);
    input.personal_notes = Some("Prefers remote work".to_string());

    let first = service.create_employee(input.clone()).await.unwrap();
    let second = service.create_employee(new_employee(2)).await.unwrap();

    assert_eq!(first.employee_id, 1);
    assert_eq!(second.employee_id, 2);

    let fetched = service.get_employee(first.employee_id).await.unwrap();
    assert_eq!(fetched, Employee::from_new(first.employee_id, input));
}

#[tokio::test]
async fn duplicate_email_or_mobile_persists_nothing() {
    let db = test_database().await;
    let service = service(&db);
    service.create_employee(new_employee(1)).await.unwrap();

    let mut same_email = new_employee(2);
    same_email.email = new_employee(1).email;
    let err = service.create_employee(same_email).await.unwrap_err();
    assert!(matches!(err, AppError::Duplicate(DuplicateField::Email)));

    let mut same_mobile = new_employee(3);
    same_mobile.mobile_number = new_employee(1).mobile_number;
    let err = service.create_employee(same_mobile).await.unwrap_err();
    assert!(matches!(err, AppError::Duplicate(DuplicateField::MobileNumber)));

    let listed = service.list_employees(page(1, 5)).await.unwrap();
    assert_eq!(listed.employees.len(), 1);
}

#[tokio::test]
async fn unique_index_rejects_duplicates_and_rolls_back_the_id() {
    let db = test_database().await;
    let store = store(&db);
    store.create(new_employee(1)).await.unwrap();

    // Straight to the store, skipping the service's pre-check
    let mut clash = new_employee(2);
    clash.email = new_employee(1).email;
    let err = store.create(clash).await.unwrap_err();
    assert!(matches!(err, AppError::Duplicate(DuplicateField::Email)));

    let next = store.create(new_employee(3)).await.unwrap();
    assert_eq!(next.employee_id, 2);
}

#[tokio::test]
async fn pagination_scenario() {
    let db = test_database().await;
    let service = service(&db);

    for n in 1..=3 {
        service.create_employee(new_employee(n)).await.unwrap();
    }
    let first = service.list_employees(page(1, 5)).await.unwrap();
    assert_eq!(first.total_pages, 1);
    assert_eq!(first.employees.len(), 3);

    for n in 4..=6 {
        service.create_employee(new_employee(n)).await.unwrap();
    }
    let second = service.list_employees(page(2, 5)).await.unwrap();
    assert_eq!(second.total_pages, 2);
    assert_eq!(second.employees.len(), 1);
    assert_eq!(second.employees[0].employee_id, 6);

    let past_end = service.list_employees(page(3, 5)).await.unwrap();
    assert_eq!(past_end.total_pages, 2);
    assert!(past_end.employees.is_empty());
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let db = test_database().await;
    let listed = service(&db).list_employees(page(1, 5)).await.unwrap();

    assert_eq!(listed.total_pages, 0);
    assert!(listed.employees.is_empty());
}

#[tokio::test]
async fn sorts_by_experience_descending() {
    let db = test_database().await;
    let service = service(&db);
    for n in [3, 7, 1, 5] {
        service.create_employee(new_employee(n)).await.unwrap();
    }

    let params = EmployeeListParams {
        sort_by: Some(EmployeeSortField::Experience),
        sort_order: SortOrder::Desc,
        ..page(1, 10)
    };
    let listed = service.list_employees(params).await.unwrap();

    let experience: Vec<i32> = listed.employees.iter().map(|e| e.experience).collect();
    assert_eq!(experience, vec![7, 5, 3, 1]);
}

#[tokio::test]
async fn type_filter_restricts_rows_and_pages() {
    let db = test_database().await;
    let service = service(&db);
    for n in 1..=7 {
        let mut employee = new_employee(n);
        if n % 2 == 0 {
            employee.employee_type = EmployeeType::Contract;
        }
        service.create_employee(employee).await.unwrap();
    }

    let params = EmployeeListParams {
        employee_type: Some(EmployeeType::Contract),
        ..page(1, 2)
    };
    let listed = service.list_employees(params).await.unwrap();

    assert_eq!(listed.total_pages, 2);
    assert_eq!(listed.employees.len(), 2);
    assert!(listed
        .employees
        .iter()
        .all(|e| e.employee_type == EmployeeType::Contract));
}

#[tokio::test]
async fn update_changes_only_provided_fields() {
    let db = test_database().await;
    let service = service(&db);
    let mut input = new_employee(1);
    input.personal_notes = Some("Temporary note".to_string());
    let created = service.create_employee(input).await.unwrap();

    let changes = EmployeeChanges {
        designation: Some("Tech Lead".to_string()),
        salary: Some(250000.0),
        personal_notes: Some(String::new()),
        ..Default::default()
    };
    let updated = service
        .update_employee(created.employee_id, changes)
        .await
        .unwrap();

    assert_eq!(updated.designation, "Tech Lead");
    assert_eq!(updated.salary, 250000.0);
    assert_eq!(updated.personal_notes, None);
    assert_eq!(updated.full_name, created.full_name);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.employee_id, created.employee_id);
}

#[tokio::test]
async fn update_to_anothers_mobile_is_duplicate() {
    let db = test_database().await;
    let service = service(&db);
    service.create_employee(new_employee(1)).await.unwrap();
    let second = service.create_employee(new_employee(2)).await.unwrap();

    let changes = EmployeeChanges {
        mobile_number: Some(new_employee(1).mobile_number),
        ..Default::default()
    };
    let err = service
        .update_employee(second.employee_id, changes)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Duplicate(DuplicateField::MobileNumber)));
}

#[tokio::test]
async fn update_and_delete_of_missing_id_are_not_found() {
    let db = test_database().await;
    let service = service(&db);

    let changes = EmployeeChanges {
        designation: Some("Nobody".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        service.update_employee(99, changes).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.delete_employee(99).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn deleted_ids_are_never_reused() {
    let db = test_database().await;
    let service = service(&db);
    service.create_employee(new_employee(1)).await.unwrap();
    let second = service.create_employee(new_employee(2)).await.unwrap();

    service.delete_employee(second.employee_id).await.unwrap();
    assert!(matches!(
        service.get_employee(second.employee_id).await,
        Err(AppError::NotFound(_))
    ));

    let third = service.create_employee(new_employee(3)).await.unwrap();
    assert_eq!(third.employee_id, 3);
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let db = test_database().await;
    let service = Arc::new(service(&db));

    let handles: Vec<_> = (1..=8)
        .map(|n| {
            let service = service.clone();
            tokio::spawn(async move { service.create_employee(new_employee(n)).await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().employee_id);
    }
    ids.sort_unstable();

    assert_eq!(ids, (1..=8).collect::<Vec<i64>>());
}
