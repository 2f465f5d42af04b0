//! End-to-end payload tests against known vectors and field boundaries.

mod common;

use common::{init_tracing, sample, with_amount, CD, CR, ND, PUBLISHED};
use pixkit_lib::tlv::{parse_fields, FieldCode};
use pixkit_lib::{verify_payload, PayloadEncoder, PaymentData, PixError, PixErrorCode};
use rust_decimal_macros::dec;

#[test]
fn test_published_vector() {
    init_tracing();
    let data = sample();
    let mut encoder = PayloadEncoder::new(&data);
    assert_eq!(encoder.generate().unwrap(), PUBLISHED);
    assert_eq!(encoder.to_string(), PUBLISHED);
}

#[test]
fn test_repeated_generate_is_identical() {
    let data = sample();
    let mut encoder = PayloadEncoder::new(&data);
    let outputs: Vec<String> = (0..5)
        .map(|_| encoder.generate().unwrap().to_string())
        .collect();
    assert!(outputs.iter().all(|p| p == PUBLISHED));
}

#[test]
fn test_published_vector_fields() {
    let fields = verify_payload(PUBLISHED).unwrap();
    let codes: Vec<String> = fields.iter().map(|(code, _)| code.to_string()).collect();
    assert_eq!(
        codes,
        ["00", "26", "52", "53", "54", "58", "59", "60", "62", "63"]
    );

    let account = parse_fields(&fields[1].1).unwrap();
    assert_eq!(
        account,
        vec![
            (FieldCode::GUI, "BR.GOV.BCB.PIX".to_string()),
            (FieldCode::PIX_KEY, CD.to_string()),
            (FieldCode::DESCRIPTION, String::new()),
        ]
    );
    assert_eq!(fields[4], (FieldCode::AMOUNT, "1.00".to_string()));
    assert_eq!(fields[6], (FieldCode::MERCHANT_NAME, ND.to_string()));
    assert_eq!(fields[7], (FieldCode::MERCHANT_CITY, CR.to_string()));
}

#[test]
fn test_amount_formatting_vectors() {
    for (amount, expected) in [
        (dec!(1.0), "1.00"),
        (dec!(1.00), "1.00"),
        (dec!(1.234), "1.23"),
        (dec!(1.001), "1.00"),
        (dec!(1.230), "1.23"),
        (dec!(1.229), "1.23"),
        (dec!(1.000), "1.00"),
    ] {
        assert_eq!(with_amount(amount).unwrap().formatted_amount(), expected);
    }
}

#[test]
fn test_boundaries() {
    assert!(PaymentData::new(&"a".repeat(25), CD, dec!(1), CR).is_ok());
    assert_eq!(
        PaymentData::new(&"a".repeat(26), CD, dec!(1), CR)
            .unwrap_err()
            .code(),
        PixErrorCode::FieldTooLong
    );

    assert!(PaymentData::new(ND, CD, dec!(1), &"a".repeat(15)).is_ok());
    assert_eq!(
        PaymentData::new(ND, CD, dec!(1), &"a".repeat(16))
            .unwrap_err()
            .code(),
        PixErrorCode::FieldTooLong
    );

    assert!(with_amount(dec!(1234567890.00)).is_ok());
    assert!(with_amount(dec!(12345678901.00)).is_err());
    assert!(with_amount(dec!(12345678901)).is_err());
}

#[test]
fn test_non_positive_amounts() {
    for amount in [dec!(0), dec!(-1)] {
        assert!(matches!(
            with_amount(amount).unwrap_err(),
            PixError::NonPositiveAmount { .. }
        ));
    }
}

#[test]
fn test_long_transaction_id_fails_before_serialization() {
    let data = sample();
    let err = PayloadEncoder::with_transaction_id(&data, &"x".repeat(26)).unwrap_err();
    assert_eq!(err.code(), PixErrorCode::TransactionIdTooLong);
}

#[test]
fn test_description_present() {
    let data = PaymentData::with_description(ND, CD, dec!(1.0), CR, "PIX em Rust!").unwrap();
    let mut encoder = PayloadEncoder::new(&data);
    let payload = encoder.generate().unwrap().to_string();

    let fields = verify_payload(&payload).unwrap();
    let account = parse_fields(&fields[1].1).unwrap();
    assert_eq!(
        account[2],
        (FieldCode::DESCRIPTION, "PIX em Rust".to_string())
    );
}

#[test]
fn test_amount_field_changes_checksum() {
    let a = sample();
    let b = with_amount(dec!(1.01)).unwrap();
    let pa = PayloadEncoder::new(&a).generate().unwrap().to_string();
    let pb = PayloadEncoder::new(&b).generate().unwrap().to_string();
    assert_ne!(pa[pa.len() - 4..], pb[pb.len() - 4..]);
    assert!(pb.contains("54041.01"));
}

#[cfg(feature = "qrcode")]
#[test]
fn test_emit_to_qr_matrix() {
    use pixkit_lib::{QrMatrixRenderer, RenderConfig};

    let data = sample();
    let mut encoder = PayloadEncoder::new(&data);
    let renderer = QrMatrixRenderer::new(RenderConfig::default()).unwrap();

    assert!(encoder.payload().is_empty());
    let matrix = encoder.emit(&renderer).unwrap();
    assert_eq!(encoder.payload(), PUBLISHED);
    assert!(matrix.width() >= 21);
}
