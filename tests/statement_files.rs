use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use ypbank_ledger::csv_format::CleanedCsv;
use ypbank_ledger::{parse_and_save, DebitCredit, Error, ParseOptions, StatementLoader};

const HDFC_STYLE: &str = "\
HDFC BANK Ltd.,,,,,,
Statement of account,,,,,,
,,,,,,
Date,Narration,Chq./Ref.No.,Value Dt,Withdrawal Amt.,Deposit Amt.,Closing Balance
01/05/23,UPI-GROCERY STORE,0000312345,01/05/23,\"1,250.00\",,48750.00
02/05/23,NEFT CR-ACME CORP SALARY,N123456,02/05/23,,\"50,000.00\",98750.00
03/05/23,ATM,000099,03/05/23,500.00,,98250.00
03/05/23,42,,03/05/23,1.00,,98249.00
,STATEMENT SUMMARY,,,,,
,Opening Balance,,,,,50000.00
";

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_parse_and_save_writes_cleaned_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "may.csv",
        "Statement of Account,,,,\n\
         ,,,,\n\
         ,Txn Date,Narration,Withdrawal Amt.,Deposit Amt.\n\
         ,2023-05-01,Grocery Store,500,0\n\
         ,2023-05-02,Salary,0,50000\n\
         ,,Closing Balance,,49500\n",
    );

    let output = parse_and_save(&input).unwrap();
    assert_eq!(output, dir.path().join("may_cleaned.csv"));
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Date,Description,Amount,Type\n\
         2023-05-01,Grocery Store,500,Debit\n\
         2023-05-02,Salary,50000,Credit\n"
    );
}

#[test]
fn test_withdrawal_deposit_statement() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "hdfc.csv", HDFC_STYLE);

    let ledger = StatementLoader::new().load_path(&input).unwrap();
    assert_eq!(ledger.header_row, 3);

    let rows: Vec<(String, &str, String, DebitCredit)> = ledger
        .transactions
        .iter()
        .map(|t| {
            (
                t.date.to_string(),
                t.description.as_str(),
                t.amount.to_string(),
                t.debit_credit,
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("2023-01-05".to_string(), "UPI-GROCERY STORE", "1250.00".to_string(), DebitCredit::Debit),
            ("2023-02-05".to_string(), "NEFT CR-ACME CORP SALARY", "50000.00".to_string(), DebitCredit::Credit),
            ("2023-03-05".to_string(), "ATM", "500.00".to_string(), DebitCredit::Debit),
        ]
    );
}

#[test]
fn test_earliest_date_option() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "old.csv",
        "Date,Description,Amount\n1999-12-31,Millennium party,-20\n2000-01-01,New year gift,30\n",
    );

    let options = ParseOptions::default()
        .with_earliest_date(chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
    let ledger = StatementLoader::new()
        .with_options(options)
        .load_path(&input)
        .unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.transactions[0].description, "New year gift");
}

#[test]
fn test_cleaned_output_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "hdfc.csv", HDFC_STYLE);

    let output = parse_and_save(&input).unwrap();
    let mut file = fs::File::open(output).unwrap();
    let cleaned = CleanedCsv::from_read(&mut file).unwrap();
    let ledger = StatementLoader::new().load_path(&input).unwrap();
    assert_eq!(cleaned.transactions, ledger.transactions);
}

#[test]
fn test_failures_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write(dir.path(), "statement.pdf", "%PDF-1.4");
    assert!(matches!(parse_and_save(&pdf), Err(Error::UnsupportedFormat(_))));

    let notes = write(dir.path(), "notes.csv", "hello,world\n");
    assert!(matches!(parse_and_save(&notes), Err(Error::NoTableFound(_))));

    assert!(!dir.path().join("statement_cleaned.csv").exists());
    assert!(!dir.path().join("notes_cleaned.csv").exists());
}

#[test]
fn test_missing_workbook_is_spreadsheet_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.xlsx");
    assert!(matches!(
        StatementLoader::new().load_path(&missing),
        Err(Error::Spreadsheet(_)) | Err(Error::Io(_))
    ));
}
