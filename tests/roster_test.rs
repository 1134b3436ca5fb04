mod common;

use anyhow::Result;
use std::fs::File;
use std::io::{BufReader, Write};

use splitbill::application::{Config, SplitService};
use splitbill::application::AppError;
use splitbill::domain::{Payer, SettlementMode, SplitBillForm};
use splitbill::io::load_roster;
use tempfile::NamedTempFile;

fn write_roster(json: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(json.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn test_session_from_roster_file() -> Result<()> {
    let file = write_roster(
        r#"[
            {"name": "Lena", "image": "https://i.pravatar.cc/48?u=1", "balance": 12.5},
            {"name": "Omar", "image": "https://i.pravatar.cc/48?u=2", "balance": "-3"}
        ]"#,
    )?;

    let ledger = load_roster(BufReader::new(File::open(file.path())?))?;
    let mut service = SplitService::new(ledger, Config::default().with_currency("$"));

    assert_eq!(service.friends().len(), 2);
    assert_eq!(service.summary().net, 1250 - 300);

    service.select_by_name("Omar")?;
    service.split_bill(SplitBillForm::new(1000, Payer::Friend)?.with_my_expense(250)?)?;

    let omar = service.get_friend_by_name("Omar")?;
    assert_eq!(omar.balance, -250);
    assert_eq!(omar.balance_message(service.currency()), "You owe Omar 2.50$");
    Ok(())
}

#[test]
fn test_roster_file_with_missing_image_is_rejected() -> Result<()> {
    let file = write_roster(r#"[{"name": "Lena", "image": ""}]"#)?;

    let err = load_roster(BufReader::new(File::open(file.path())?)).unwrap_err();

    assert!(err.to_string().contains("image must not be empty"));
    Ok(())
}

#[test]
fn test_roster_file_with_invalid_json_is_rejected() -> Result<()> {
    let file = write_roster("not json")?;
    assert!(load_roster(BufReader::new(File::open(file.path())?)).is_err());
    Ok(())
}

#[test]
fn test_roster_balance_outside_cents_range_is_rejected() -> Result<()> {
    let as_number = write_roster(
        r#"[{"name": "Lena", "image": "img", "balance": -92233720368547758.08}]"#,
    )?;
    let as_text = write_roster(
        r#"[{"name": "Lena", "image": "img", "balance": "-92233720368547758.08"}]"#,
    )?;

    assert!(load_roster(BufReader::new(File::open(as_number.path())?)).is_err());
    assert!(load_roster(BufReader::new(File::open(as_text.path())?)).is_err());
    Ok(())
}

#[test]
fn test_accumulating_onto_huge_roster_balance_reports_overflow() -> Result<()> {
    let file = write_roster(
        r#"[{"name": "Lena", "image": "img", "balance": "92233720368547758"}]"#,
    )?;
    let ledger = load_roster(BufReader::new(File::open(file.path())?))?;
    let mut service = SplitService::new(
        ledger,
        Config::default().with_mode(SettlementMode::Accumulate),
    );

    service.select_by_name("Lena")?;
    let result = service.split_bill(SplitBillForm::new(1000, Payer::User)?);

    assert!(matches!(result, Err(AppError::BalanceOverflow(_))));
    assert_eq!(
        service.get_friend_by_name("Lena")?.balance,
        9_223_372_036_854_775_800
    );
    let summary = service.summary();
    assert_eq!(summary.owed_to_you, 9_223_372_036_854_775_800);
    Ok(())
}
