use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use staffbook_core::db::open_db_in_memory;
use staffbook_core::sheet::EXPORT_COLUMNS;
use staffbook_core::{
    read_table, Cell, EmployeeService, ErrorKind, SheetError, SqliteEmployeeRepository,
};
use std::path::Path;

fn write_layout_two_workbook(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["Nom", "Email", "Phone", "Poste", "Salaire"].iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    sheet.write_string(1, 0, "Ibrahima Sarr").unwrap();
    sheet.write_string(1, 1, "ibrahima@x.com").unwrap();
    sheet.write_number(1, 2, 771234567.0).unwrap();
    sheet.write_string(1, 3, "Comptable").unwrap();
    sheet.write_number(1, 4, 420000.0).unwrap();

    sheet.write_string(2, 0, "Fatou Ndiaye").unwrap();
    sheet.write_string(2, 1, "fatou@x.com").unwrap();
    sheet.write_string(2, 3, "None").unwrap();
    sheet.write_number(2, 4, 610000.5).unwrap();
    workbook.save(path).unwrap();
}

#[test]
fn xlsx_import_reads_first_sheet_with_header_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees-2.xlsx");
    write_layout_two_workbook(&path);

    let table = read_table(&path).unwrap();
    assert_eq!(table.headers, vec!["Nom", "Email", "Phone", "Poste", "Salaire"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.cell(0, 2), &Cell::Number(771234567.0));
    assert!(table.cell(1, 2).is_empty());
}

#[test]
fn xlsx_file_import_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees-2.xlsx");
    write_layout_two_workbook(&path);

    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());

    let format = service.validate_file(&path);
    assert!(format.ok);
    assert_eq!(format.format_label, "employees-2");

    let report = service.import_file(&path);
    assert!(report.success, "{}", report.message);
    assert_eq!(report.imported, 2);

    let records = service.get_all().unwrap();
    assert_eq!(records[0].telephone.as_deref(), Some("771234567"));
    assert_eq!(records[0].poste.as_deref(), Some("Comptable"));
    assert_eq!(records[1].telephone, None);
    assert_eq!(records[1].poste, None);
    assert_eq!(records[1].salaire, 610000.5);
}

#[test]
fn semicolon_csv_import_is_supported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees.csv");
    std::fs::write(
        &path,
        "\u{feff}Nom;Email;Salaire;Téléphone;Département\n\
         Awa Diop;awa@x.com;500000;77123456;RH\n\
         ;;;;\n\
         Moussa Fall;moussa@x.com;350 000,50;NONE;\n",
    )
    .unwrap();

    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    let report = service.import_file(&path);

    assert!(report.success, "{}", report.message);
    assert_eq!(report.imported, 2);
    assert_eq!(report.format_label.as_deref(), Some("employees-1"));

    let records = service.get_all().unwrap();
    assert_eq!(records[0].departement.as_deref(), Some("RH"));
    assert_eq!(records[1].salaire, 350000.5);
    assert_eq!(records[1].telephone, None);
    assert_eq!(records[1].departement, None);
}

#[test]
fn missing_or_corrupt_files_are_file_access_failures() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());

    let missing = service.import_file(dir.path().join("absent.xlsx"));
    assert!(!missing.success);
    assert_eq!(missing.errors, 1);
    assert_eq!(missing.error_kind, Some(ErrorKind::FileAccess));

    let missing_format = service.validate_file(dir.path().join("absent.xlsx"));
    assert!(!missing_format.ok);
    assert_eq!(missing_format.format_label, "unknown");
    assert_eq!(missing_format.error_kind, Some(ErrorKind::FileAccess));
    assert_eq!(missing_format.issues.len(), 1);

    let corrupt_path = dir.path().join("corrupt.xlsx");
    std::fs::write(&corrupt_path, b"definitely not a zip archive").unwrap();
    assert!(matches!(
        read_table(&corrupt_path),
        Err(SheetError::Unreadable { .. })
    ));
    let corrupt = service.import_file(&corrupt_path);
    assert_eq!(corrupt.error_kind, Some(ErrorKind::FileAccess));
    assert_eq!(service.count().unwrap(), 0);
}

#[test]
fn header_only_file_is_reported_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("header-only.csv");
    std::fs::write(&path, "Nom,Email,Salaire\n").unwrap();

    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    let report = service.import_file(&path);

    assert_eq!(report.error_kind, Some(ErrorKind::EmptyInput));
    assert_eq!(report.message, "empty file");
}

#[test]
fn export_writes_every_record_to_xlsx() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("employees-2.xlsx");
    write_layout_two_workbook(&source);

    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    service.import_file(&source);

    let target = dir.path().join("export_employees.xlsx");
    let report = service.export_to_file(&target);
    assert!(report.success, "{}", report.message);
    assert_eq!(report.exported, 2);
    assert_eq!(report.path.as_deref(), Some(target.as_path()));

    let mut workbook: Xlsx<_> = open_workbook(&target).unwrap();
    let range = workbook.worksheet_range("employees").unwrap();
    let rows: Vec<_> = range.rows().collect();
    assert_eq!(rows.len(), 3);
    let headers: Vec<String> = rows[0].iter().map(|cell| cell.to_string()).collect();
    assert_eq!(headers, EXPORT_COLUMNS);
    assert_eq!(rows[1][1], Data::String("Ibrahima Sarr".to_string()));
    assert_eq!(rows[2][6], Data::Float(610000.5));
}

#[test]
fn export_round_trips_through_csv_import() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("employees-2.xlsx");
    write_layout_two_workbook(&source);

    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    service.import_file(&source);

    let target = dir.path().join("export.csv");
    assert!(service.export_to_file(&target).success);

    let table = read_table(&target).unwrap();
    assert_eq!(table.headers, EXPORT_COLUMNS);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.cell(0, 3), &Cell::from("771234567"));
    assert!(table.cell(1, 5).is_empty());
}

#[test]
fn export_of_empty_store_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("export_employees.xlsx");

    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    let report = service.export_to_file(&target);

    assert!(!report.success);
    assert_eq!(report.message, "no data to export");
    assert!(!target.exists());
}

#[test]
fn export_to_unwritable_location_is_file_access_failure() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    let source = dir.path().join("employees-2.xlsx");
    write_layout_two_workbook(&source);
    service.import_file(&source);

    let target = dir.path().join("missing-dir").join("export.csv");
    let report = service.export_to_file(&target);
    assert!(!report.success);
    assert_eq!(report.error_kind, Some(ErrorKind::FileAccess));
}
