use staffdesk_core::db::open_db_in_memory;
use staffdesk_core::{
    Department, Employee, RepoError, SqliteDepartmentTable, SqliteEmployeeTable, TableStore,
    UpsertOutcome,
};

fn employee(empno: i64, name: &str, job: &str, deptno: i64) -> Employee {
    Employee {
        empno,
        empname: name.to_string(),
        job: job.to_string(),
        deptno,
    }
}

fn department(deptno: i64, dname: &str, loc: &str) -> Department {
    Department {
        deptno,
        dname: dname.to_string(),
        loc: loc.to_string(),
    }
}

#[test]
fn employee_upsert_inserts_then_updates_in_place() {
    let conn = open_db_in_memory().unwrap();
    let mut table = SqliteEmployeeTable::new(&conn);

    assert_eq!(
        table.upsert(&employee(1, "A", "HR", 10)).unwrap(),
        UpsertOutcome::Inserted
    );
    assert_eq!(
        table.upsert(&employee(2, "B", "IT", 20)).unwrap(),
        UpsertOutcome::Inserted
    );
    assert_eq!(
        table.upsert(&employee(1, "A", "Finance", 30)).unwrap(),
        UpsertOutcome::Updated
    );

    assert_eq!(table.count().unwrap(), 2);
    assert_eq!(
        table.lookup(1).unwrap(),
        Some(employee(1, "A", "Finance", 30))
    );
}

#[test]
fn employee_scan_keeps_insertion_order_not_key_order() {
    let conn = open_db_in_memory().unwrap();
    let mut table = SqliteEmployeeTable::new(&conn);

    table.insert(&employee(9, "Z", "HR", 1)).unwrap();
    table.insert(&employee(3, "C", "HR", 1)).unwrap();
    table.upsert(&employee(9, "Z2", "HR", 1)).unwrap();

    let keys: Vec<i64> = table.scan().unwrap().iter().map(|row| row.empno).collect();
    assert_eq!(keys, [9, 3]);
}

#[test]
fn employee_plain_insert_of_existing_key_is_duplicate() {
    let conn = open_db_in_memory().unwrap();
    let mut table = SqliteEmployeeTable::new(&conn);

    table.insert(&employee(1, "A", "HR", 10)).unwrap();
    let err = table.insert(&employee(1, "B", "IT", 10)).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateKey { kind: "employee", ref key } if key == "1"));
}

#[test]
fn employee_update_missing_key_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let mut table = SqliteEmployeeTable::new(&conn);

    let err = table.update(5, &employee(5, "E", "HR", 1)).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn employee_writes_are_validated_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let mut table = SqliteEmployeeTable::new(&conn);

    let err = table.upsert(&employee(1, "   ", "HR", 10)).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(table.count().unwrap(), 0);
}

#[test]
fn department_insert_keeps_duplicate_keys() {
    let conn = open_db_in_memory().unwrap();
    let mut table = SqliteDepartmentTable::new(&conn);

    table.insert(&department(10, "Sales", "NY")).unwrap();
    table.insert(&department(10, "Sales", "Boston")).unwrap();

    assert_eq!(table.count().unwrap(), 2);
    assert_eq!(table.lookup(10).unwrap().unwrap().loc, "NY");
}

#[test]
fn department_upsert_updates_every_row_with_key() {
    let conn = open_db_in_memory().unwrap();
    let mut table = SqliteDepartmentTable::new(&conn);

    assert_eq!(
        table.upsert(&department(10, "Sales", "NY")).unwrap(),
        UpsertOutcome::Inserted
    );
    table.insert(&department(10, "Sales", "Boston")).unwrap();
    assert_eq!(
        table.upsert(&department(10, "Support", "SF")).unwrap(),
        UpsertOutcome::Updated
    );

    let rows = table.scan().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.dname == "Support" && row.loc == "SF"));
}

#[test]
fn tables_share_one_connection() {
    let conn = open_db_in_memory().unwrap();
    let mut employees = SqliteEmployeeTable::new(&conn);
    let mut departments = SqliteDepartmentTable::new(&conn);

    employees.insert(&employee(1, "A", "HR", 10)).unwrap();
    departments.insert(&department(10, "Sales", "NY")).unwrap();

    assert_eq!(employees.count().unwrap(), 1);
    assert_eq!(departments.count().unwrap(), 1);
}
