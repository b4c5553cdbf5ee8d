use staffdesk_core::db::open_db_in_memory;
use staffdesk_core::{
    import_employees_file, load_join_view, submit_department, submit_employee, EmptySide,
    ImportError, JoinView, JoinedRow, RawRecord, SqliteDepartmentTable, SqliteEmployeeTable,
    TableStore,
};
use std::io::Write;

fn employee_form(empno: &str, name: &str, job: &str, deptno: &str) -> RawRecord {
    RawRecord::new()
        .with("Empno", empno)
        .with("Empname", name)
        .with("Job", job)
        .with("Deptno", deptno)
}

fn department_form(deptno: &str, dname: &str, loc: &str) -> RawRecord {
    RawRecord::new()
        .with("Deptno", deptno)
        .with("Dname", dname)
        .with("Loc", loc)
}

#[test]
fn form_submissions_feed_database_join() {
    let conn = open_db_in_memory().unwrap();
    let mut employees = SqliteEmployeeTable::new(&conn);
    let mut departments = SqliteDepartmentTable::new(&conn);

    assert!(submit_employee(&mut employees, &employee_form("1", "A", "HR", "10")).is_success());
    assert!(submit_employee(&mut employees, &employee_form("2", "B", "IT", "20")).is_success());
    assert!(
        submit_department(&mut departments, &department_form("10", "Sales", "NY")).is_success()
    );

    let view = load_join_view(&employees, &departments).unwrap();
    assert_eq!(
        view,
        JoinView::Rows(vec![JoinedRow {
            empno: 1,
            empname: "A".to_string(),
            job: "HR".to_string(),
            deptno: 10,
            dname: "Sales".to_string(),
            loc: "NY".to_string(),
        }])
    );
}

#[test]
fn resubmitting_existing_empno_updates_row() {
    let conn = open_db_in_memory().unwrap();
    let mut employees = SqliteEmployeeTable::new(&conn);

    submit_employee(&mut employees, &employee_form("1", "A", "HR", "10"));
    let outcome = submit_employee(&mut employees, &employee_form("1", "A", "Sales", "30"));

    assert_eq!(
        outcome.message(),
        "Employee data updated successfully for Empno 1!"
    );
    let rows = employees.scan().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].empno, 1);
    assert_eq!(rows[0].job, "Sales");
    assert_eq!(rows[0].deptno, 30);
}

#[test]
fn join_against_empty_departments_reports_no_data() {
    let conn = open_db_in_memory().unwrap();
    let mut employees = SqliteEmployeeTable::new(&conn);
    let departments = SqliteDepartmentTable::new(&conn);

    submit_employee(&mut employees, &employee_form("1", "A", "HR", "10"));
    let view = load_join_view(&employees, &departments).unwrap();
    assert_eq!(view, JoinView::NoData(EmptySide::Departments));
}

#[test]
fn file_import_upserts_valid_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employee_data.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "Empno,Empname,Job,Deptno").unwrap();
    writeln!(file, "1,A,HR,10").unwrap();
    writeln!(file, "2,B,IT,20").unwrap();
    drop(file);

    let conn = open_db_in_memory().unwrap();
    let mut employees = SqliteEmployeeTable::new(&conn);
    submit_employee(&mut employees, &employee_form("2", "Old", "Ops", "5"));

    let report = import_employees_file(&path, &mut employees).unwrap();
    assert_eq!(report.inserted, 1);
    assert_eq!(report.updated, 1);
    assert_eq!(employees.lookup(2).unwrap().unwrap().empname, "B");
}

#[test]
fn file_import_with_invalid_row_writes_nothing() {
    let csv = "Empno,Empname,Job,Deptno\n1,A,HR,10\n2,B,IT,0\n";
    let conn = open_db_in_memory().unwrap();
    let mut employees = SqliteEmployeeTable::new(&conn);

    let err = staffdesk_core::import_employees_csv(csv.as_bytes(), &mut employees).unwrap_err();
    assert!(matches!(err, ImportError::InvalidRow { row: 2, .. }));
    assert_eq!(employees.count().unwrap(), 0);
}

#[test]
fn file_import_missing_file_is_csv_error() {
    let conn = open_db_in_memory().unwrap();
    let mut employees = SqliteEmployeeTable::new(&conn);
    let err = import_employees_file("/nonexistent/employees.csv", &mut employees).unwrap_err();
    assert!(matches!(err, ImportError::Csv(_)));
}
