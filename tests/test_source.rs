//! File loading tests: CSV/parquet/JSON inputs, schema and value errors.

mod common;

use common::{sample_exports, write_csv, ORDERS_HEADER, PAYMENTS_HEADER};
use kpi_trends::{FileSource, KpiError, TableSource};
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

#[test]
fn loads_csv_orders_in_file_order() {
    let (_tmp, orders, payments) = sample_exports();
    let source = FileSource::open(&orders, &payments).unwrap();

    let orders = source.orders().unwrap();
    assert_eq!(orders.len(), 5);
    let ids: Vec<&str> = orders.iter().map(|o| o.order_id.as_str()).collect();
    assert_eq!(ids, vec!["1001", "1002", "1003", "1004", "1005"]);

    assert_eq!(orders[0].order_date, common::date("2024-01-05"));
    assert_eq!(orders[1].ingestion_date, common::date("2024-01-22"));
    assert_eq!(orders[1].gross_amount, dec!(50.25));
    assert_eq!(orders[0].region.as_deref(), Some("US"));
    assert_eq!(orders[2].region, None);
}

#[test]
fn loads_csv_payments() {
    let (_tmp, orders, payments) = sample_exports();
    let source = FileSource::open(&orders, &payments).unwrap();

    let payments = source.payments().unwrap();
    assert_eq!(payments.len(), 8);
    assert_eq!(payments[2].payment_method, "paypal");
    assert_eq!(payments[3].payment_amount, dec!(30.25));
}

#[test]
fn order_ids_keep_leading_zeros() {
    let tmp = tempfile::tempdir().unwrap();
    let orders = write_csv(
        tmp.path(),
        "orders.csv",
        ORDERS_HEADER,
        &["007,2024-01-05,2024-01-05,US,web,A,Completed,1"],
    );
    let payments = write_csv(
        tmp.path(),
        "payments.csv",
        PAYMENTS_HEADER,
        &["7,2024-01-05,card,5"],
    );

    let source = FileSource::open(&orders, &payments).unwrap();
    let orders = source.orders().unwrap();
    let payments = source.payments().unwrap();
    assert_eq!(orders[0].order_id, "007");

    // "7" is a different order, so nothing is collected for "007"
    let paid = kpi_trends::join::paid_by_order(&payments).unwrap();
    let joined = kpi_trends::join::join_payments(&orders, &paid);
    assert_eq!(joined[0].paid_amount, dec!(0));
    assert_eq!(kpi_trends::quality::orphan_payments(&orders, &payments), 1);
}

#[test]
fn extra_columns_are_ignored() {
    let tmp = tempfile::tempdir().unwrap();
    let orders = write_csv(
        tmp.path(),
        "orders.csv",
        &format!("{},note", ORDERS_HEADER),
        &["1,2024-01-05,2024-01-06,US,web,A,Completed,1.50,hello"],
    );
    let payments = write_csv(
        tmp.path(),
        "payments.csv",
        &format!("note,{}", PAYMENTS_HEADER),
        &["x,1,2024-01-06,card,1.50"],
    );

    let source = FileSource::open(&orders, &payments).unwrap();
    assert_eq!(source.orders().unwrap()[0].gross_amount, dec!(1.50));
    assert_eq!(source.payments().unwrap()[0].order_id, "1");
}

#[test]
fn null_marker_regions_count_as_missing() {
    let tmp = tempfile::tempdir().unwrap();
    let orders = write_csv(
        tmp.path(),
        "orders.csv",
        ORDERS_HEADER,
        &[
            "1,2024-01-05,2024-01-05,NA,web,A,Completed,1",
            "2,2024-01-05,2024-01-05,null,web,A,Completed,1",
            "3,2024-01-05,2024-01-05,,web,A,Completed,1",
            "4,2024-01-05,2024-01-05,N/A,web,A,Completed,1",
            "5,2024-01-05,2024-01-05,EU,web,A,Completed,1",
        ],
    );
    let payments = write_csv(tmp.path(), "payments.csv", PAYMENTS_HEADER, &[]);
    let source = FileSource::open(&orders, &payments).unwrap();

    let orders = source.orders().unwrap();
    let regions: Vec<Option<&str>> = orders.iter().map(|o| o.region.as_deref()).collect();
    assert_eq!(regions, vec![None, None, None, None, Some("EU")]);

    let report = kpi_trends::quality::check(&orders, &[]);
    assert_eq!(report.orders_missing_region_pct.to_string(), "80.00");
}

// ---------------------------------------------------------------------------
// Other formats
// ---------------------------------------------------------------------------

#[test]
fn loads_parquet_and_json_inputs() {
    let (tmp, orders_csv, payments_csv) = sample_exports();

    // Convert the CSV fixtures with DuckDB itself
    let parquet = tmp.path().join("orders.parquet");
    let ndjson = tmp.path().join("payments.ndjson");
    let conn = kpi_trends::Connection::new().unwrap();
    conn.execute(
        &format!(
            "COPY (SELECT * FROM read_csv('{}', header = true, \
               types = {{'order_date': 'DATE', 'ingestion_date': 'DATE', 'gross_amount': 'DECIMAL(12,3)'}})) \
             TO '{}' (FORMAT PARQUET)",
            orders_csv.display(),
            parquet.display()
        ),
        &[],
    )
    .unwrap();
    conn.execute(
        &format!(
            "COPY (SELECT * FROM read_csv('{}', header = true, all_varchar = true)) \
             TO '{}' (FORMAT JSON)",
            payments_csv.display(),
            ndjson.display()
        ),
        &[],
    )
    .unwrap();

    let source = FileSource::open(&parquet, &ndjson).unwrap();
    let orders = source.orders().unwrap();
    let payments = source.payments().unwrap();

    assert_eq!(orders.len(), 5);
    assert_eq!(orders[1].ingestion_date, common::date("2024-01-22"));
    assert_eq!(orders[1].gross_amount, dec!(50.25));
    assert_eq!(orders[2].region, None);
    assert_eq!(payments.len(), 8);
    assert_eq!(payments[7].order_id, "9999");
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn missing_file_is_input_not_found() {
    let (tmp, orders, _) = sample_exports();
    let missing = tmp.path().join("nope.csv");

    match FileSource::open(&orders, &missing) {
        Err(KpiError::InputNotFound(path)) => assert_eq!(path, missing),
        Err(e) => panic!("expected InputNotFound, got {}", e),
        Ok(_) => panic!("expected InputNotFound"),
    }
}

#[test]
fn missing_column_is_reported_by_name() {
    let tmp = tempfile::tempdir().unwrap();
    let orders = write_csv(
        tmp.path(),
        "orders.csv",
        "order_id,order_date,ingestion_date,region,channel,status,gross_amount",
        &["1,2024-01-05,2024-01-05,US,web,Completed,1"],
    );
    let payments = write_csv(tmp.path(), "payments.csv", PAYMENTS_HEADER, &[]);

    match FileSource::open(&orders, &payments) {
        Err(KpiError::MissingColumn { table, column }) => {
            assert_eq!(table, "orders");
            assert_eq!(column, "product_line");
        }
        Err(e) => panic!("expected MissingColumn, got {}", e),
        Ok(_) => panic!("expected MissingColumn"),
    }
}

#[test]
fn unparseable_date_is_invalid_value() {
    let tmp = tempfile::tempdir().unwrap();
    let orders = write_csv(
        tmp.path(),
        "orders.csv",
        ORDERS_HEADER,
        &[
            "1,2024-01-05,2024-01-05,US,web,A,Completed,1",
            "2,2024-13-40,2024-01-05,US,web,A,Completed,1",
        ],
    );
    let payments = write_csv(tmp.path(), "payments.csv", PAYMENTS_HEADER, &[]);
    let source = FileSource::open(&orders, &payments).unwrap();

    match source.orders() {
        Err(KpiError::InvalidValue { table, row, column, value, .. }) => {
            assert_eq!(table, "orders");
            assert_eq!(row, 2);
            assert_eq!(column, "order_date");
            assert_eq!(value, "2024-13-40");
        }
        other => panic!("expected InvalidValue, got {:?}", other),
    }
}

#[test]
fn unparseable_amount_is_invalid_value() {
    let tmp = tempfile::tempdir().unwrap();
    let orders = write_csv(tmp.path(), "orders.csv", ORDERS_HEADER, &[]);
    let payments = write_csv(
        tmp.path(),
        "payments.csv",
        PAYMENTS_HEADER,
        &["1,2024-01-06,card,ten"],
    );
    let source = FileSource::open(&orders, &payments).unwrap();

    let err = source.payments().unwrap_err();
    assert!(matches!(err, KpiError::InvalidValue { ref column, .. } if column == "payment_amount"));
    assert!(err.to_string().contains("\"ten\""));
}
