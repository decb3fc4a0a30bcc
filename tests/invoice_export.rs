use repairmate::{ErrorKind, NewRepair, RepairDesk, RepairStore, Role};
use std::path::Path;

fn open_store(dir: &Path) -> RepairStore {
    RepairStore::open(&dir.join("repairmate.db")).unwrap()
}

fn seed_device(desk: &RepairDesk<'_>, serial: &str, costs: &[f64]) {
    desk.create_device("ada@example.com", "ThinkPad X1", serial).unwrap();
    for (i, cost) in costs.iter().enumerate() {
        let request = NewRepair {
            cost: Some(*cost),
            ..NewRepair::new(serial, "Bob", format!("Job {}", i))
        };
        desk.create_repair(&request).unwrap();
    }
}

#[test]
fn test_invoice_totals_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());
    let desk = RepairDesk::new(&store, Some(Role::Admin));
    desk.create_customer("Ada", "ada@example.com").unwrap();
    seed_device(&desk, "SN-100", &[100.0, 50.0]);

    let export = desk.generate_invoice("SN-100", dir.path()).unwrap();

    let totals = export.invoice.totals;
    assert_eq!(totals.total, 150.0);
    assert!((totals.tax - 10.5).abs() < 1e-9);
    assert!((totals.grand_total - 160.5).abs() < 1e-9);
    assert_eq!(export.path, dir.path().join("invoice_SN-100.csv"));

    let text = std::fs::read_to_string(&export.path).unwrap();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows[0], "RepairID,Cost,Status");
    assert_eq!(rows[1], format!("{},100.0,Pending", export.invoice.lines[0].repair_id));
    assert_eq!(rows[2], format!("{},50.0,Pending", export.invoice.lines[1].repair_id));
    assert_eq!(rows[3], "");
    assert_eq!(rows[4], "Total,150.0");
    assert!(rows[5].starts_with("Tax (7%),"));
    assert!(rows[6].starts_with("Grand Total,"));
    assert_eq!(rows.len(), 7);
}

#[test]
fn test_invoice_rows_belong_to_serial() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());
    let desk = RepairDesk::new(&store, Some(Role::Technician));
    desk.create_customer("Ada", "ada@example.com").unwrap();
    seed_device(&desk, "SN-A", &[10.0, 20.0, 30.0]);
    seed_device(&desk, "SN-B", &[999.0]);

    let export = desk.generate_invoice("SN-A", dir.path()).unwrap();
    let expected = store.invoice_lines("SN-A").unwrap();

    let text = std::fs::read_to_string(&export.path).unwrap();
    let ids: Vec<i64> = text
        .lines()
        .skip(1)
        .take_while(|row| !row.is_empty())
        .map(|row| row.split(',').next().unwrap().parse().unwrap())
        .collect();

    assert_eq!(ids, expected.iter().map(|line| line.repair_id).collect::<Vec<_>>());
    assert_eq!(export.invoice.totals.total, 60.0);
    assert!(!text.contains("999"));
}

#[test]
fn test_invoice_without_repairs_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());
    let desk = RepairDesk::new(&store, Some(Role::Admin));
    desk.create_customer("Ada", "ada@example.com").unwrap();
    seed_device(&desk, "SN-EMPTY", &[]);

    let err = desk.generate_invoice("SN-EMPTY", out.path()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "No repair jobs found");
    assert!(!out.path().join("invoice_SN-EMPTY.csv").exists());
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_records_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = open_store(dir.path());
        let desk = RepairDesk::new(&store, Some(Role::Admin));
        desk.create_customer("Ada", "ada@example.com").unwrap();
        seed_device(&desk, "SN-1", &[5.0]);
    }

    let store = open_store(dir.path());
    let desk = RepairDesk::new(&store, None);

    assert!(store.find_customer_by_email("ada@example.com").unwrap().is_some());
    assert_eq!(desk.search_repairs("PENDING").unwrap().len(), 1);
    assert!(desk.search_repairs("zzz_no_match").unwrap().is_empty());
    assert_eq!(
        desk.create_customer("Ada again", "ada@example.com").unwrap_err().kind(),
        ErrorKind::Uniqueness
    );
    assert_eq!(store.stats().unwrap().customers, 1);
}

#[test]
fn test_invoice_creates_missing_export_dir() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());
    let desk = RepairDesk::new(&store, Some(Role::Admin));
    desk.create_customer("Ada", "ada@example.com").unwrap();
    seed_device(&desk, "SN-NEST", &[42.0]);
    let out_dir = dir.path().join("exports").join("2026").join("invoices");

    let export = desk.generate_invoice("SN-NEST", &out_dir).unwrap();

    assert_eq!(export.path, out_dir.join("invoice_SN-NEST.csv"));
    assert!(std::fs::read_to_string(&export.path).unwrap().starts_with("RepairID,Cost,Status"));
}
