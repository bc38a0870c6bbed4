use chrono::NaiveDate;
use quotestore_core::{NewQuote, Quote, QuoteState, QuoteValidationError};
use serde_json::json;

fn socrates() -> Quote {
    Quote {
        id: 1,
        text: "The only true wisdom is in knowing you know nothing.".to_string(),
        attributed_name: Some("Socrates".to_string()),
        attributed_date: None,
        deleted: false,
    }
}

#[test]
fn new_quote_builder_sets_attribution() {
    let date = NaiveDate::from_ymd_opt(1605, 1, 1).unwrap();
    let request = NewQuote::new("To be, or not to be")
        .with_attribution_name("Hamlet")
        .with_attribution_date(date);

    assert_eq!(request.text, "To be, or not to be");
    assert_eq!(request.attributed_name.as_deref(), Some("Hamlet"));
    assert_eq!(request.attributed_date, Some(date));
    assert!(request.validate().is_ok());
}

#[test]
fn new_quote_rejects_only_empty_text() {
    assert_eq!(
        NewQuote::new("").validate(),
        Err(QuoteValidationError::EmptyText)
    );
    assert!(NewQuote::new(" \t").validate().is_ok());
}

#[test]
fn persisted_quote_validation_checks_id_and_text() {
    assert!(socrates().validate().is_ok());

    let mut bad_id = socrates();
    bad_id.id = 0;
    assert_eq!(
        bad_id.validate(),
        Err(QuoteValidationError::NonPositiveId(0))
    );

    let mut bad_text = socrates();
    bad_text.text.clear();
    assert_eq!(bad_text.validate(), Err(QuoteValidationError::EmptyText));
}

#[test]
fn state_follows_tombstone_flag() {
    let mut quote = socrates();
    assert!(quote.is_active());
    assert_eq!(quote.state(), QuoteState::Active);

    quote.deleted = true;
    assert!(!quote.is_active());
    assert_eq!(quote.state(), QuoteState::Tombstoned);
}

#[test]
fn serializes_with_explicit_nulls_and_iso_dates() {
    let value = serde_json::to_value(socrates()).unwrap();
    assert_eq!(
        value,
        json!({
            "id": 1,
            "text": "The only true wisdom is in knowing you know nothing.",
            "attributed_name": "Socrates",
            "attributed_date": null,
            "deleted": false
        })
    );

    let mut dated = socrates();
    dated.attributed_date = NaiveDate::from_ymd_opt(2001, 9, 9);
    let value = serde_json::to_value(&dated).unwrap();
    assert_eq!(value["attributed_date"], "2001-09-09");

    let back: Quote = serde_json::from_value(value).unwrap();
    assert_eq!(back, dated);
}
