use super::*;
use time::macros::date;

fn input(room_id: Uuid) -> ContractInput {
    ContractInput {
        room_id: Some(room_id),
        tenant_name: Some("PT Maju Jaya".into()),
        contract_start: Some(date!(2024 - 01 - 01)),
        contract_end: Some(date!(2024 - 12 - 31)),
        ..ContractInput::default()
    }
}

#[test]
fn status_follows_today_against_range() {
    let start = date!(2024 - 01 - 01);
    let end = date!(2024 - 12 - 31);
    assert_eq!(status_on(start, end, date!(2024 - 06 - 15)), ContractStatus::Active);
    assert_eq!(status_on(start, end, date!(2023 - 01 - 01)), ContractStatus::Upcoming);
    assert_eq!(status_on(start, end, date!(2025 - 01 - 01)), ContractStatus::Expired);
}

#[test]
fn status_range_is_inclusive_on_both_ends() {
    let start = date!(2024 - 01 - 01);
    let end = date!(2024 - 12 - 31);
    assert_eq!(status_on(start, end, start), ContractStatus::Active);
    assert_eq!(status_on(start, end, end), ContractStatus::Active);
    assert_eq!(status_on(start, start, start), ContractStatus::Active);
}

#[test]
fn into_new_requires_core_fields() {
    let room_id = Uuid::new_v4();
    assert!(matches!(ContractInput { room_id: None, ..input(room_id) }.into_new(), Err(ContractError::Invalid(_))));
    assert!(matches!(
        ContractInput { tenant_name: Some("  ".into()), ..input(room_id) }.into_new(),
        Err(ContractError::Invalid(_))
    ));
    assert!(matches!(
        ContractInput { contract_end: None, ..input(room_id) }.into_new(),
        Err(ContractError::Invalid(_))
    ));
}

#[test]
fn into_new_rejects_inverted_range_and_negative_rate() {
    let room_id = Uuid::new_v4();
    let inverted = ContractInput { contract_end: Some(date!(2023 - 12 - 31)), ..input(room_id) };
    assert!(matches!(inverted.into_new(), Err(ContractError::Invalid(_))));

    let negative = ContractInput { monthly_rate: Some(-1.0), ..input(room_id) };
    assert!(matches!(negative.into_new(), Err(ContractError::Invalid(_))));
}

#[test]
fn apply_to_checks_the_combined_range() {
    let mut contract = input(Uuid::new_v4()).into_new().unwrap();
    let before = contract.clone();

    let err = ContractInput { contract_start: Some(date!(2025 - 02 - 01)), ..ContractInput::default() }
        .apply_to(&mut contract);
    assert!(matches!(err, Err(ContractError::Invalid(_))));
    assert_eq!(contract, before);

    ContractInput {
        contract_start: Some(date!(2025 - 02 - 01)),
        contract_end: Some(date!(2026 - 01 - 31)),
        contract_number: Some("K-17".into()),
        ..ContractInput::default()
    }
    .apply_to(&mut contract)
    .unwrap();
    assert_eq!(contract.contract_start, date!(2025 - 02 - 01));
    assert_eq!(contract.contract_number.as_deref(), Some("K-17"));
    assert_eq!(contract.tenant_name, "PT Maju Jaya");
}

#[test]
fn input_parses_iso_dates() {
    let room_id = Uuid::new_v4();
    let body = serde_json::json!({
        "room_id": room_id,
        "tenant_name": "Acme",
        "contract_start": "2024-01-01",
        "contract_end": "2024-12-31",
        "monthly_rate": 1500.0
    });
    let parsed: ContractInput = serde_json::from_value(body).unwrap();
    let contract = parsed.into_new().unwrap();
    assert_eq!(contract.room_id, room_id);
    assert_eq!(contract.contract_start, date!(2024 - 01 - 01));
    assert_eq!(contract.monthly_rate, Some(1500.0));
}

#[test]
fn view_serializes_flat_with_status() {
    let contract = input(Uuid::new_v4()).into_new().unwrap();
    let json = serde_json::to_value(contract.view(date!(2024 - 06 - 15))).unwrap();
    assert_eq!(json["status"], "active");
    assert_eq!(json["tenant_name"], "PT Maju Jaya");
    assert_eq!(json["contract_start"], "2024-01-01");
    assert_eq!(json["contract_end"], "2024-12-31");
}
