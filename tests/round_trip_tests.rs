use losslessjson::{Lossless, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ContactDetails {
    #[serde(rename = "homePhone")]
    home_phone: String,
    email: String,
}

static CONTACT_DETAILS_DOCUMENT: &str = r#"{
  "homePhone": "01234 567890",
  "mobilePhone": "07123 123456",
  "email": "someone@email.com",
  "address": {
    "line1": "1 Toad Road",
    "city": "London",
    "postcode": "E1 1TD"
  }
}"#;

fn top_level_keys(document: &str) -> Vec<String> {
    let value: Value = serde_json::from_str(document).unwrap();
    value
        .as_object()
        .expect("expected a JSON object")
        .keys()
        .cloned()
        .collect()
}

#[test]
fn test_round_trip_preserves_additional_properties() -> Result<()> {
    let contact: Lossless<ContactDetails> = Lossless::from_json(CONTACT_DETAILS_DOCUMENT)?;
    let reserialized = contact.to_json_pretty()?;

    let original: Value = serde_json::from_str(CONTACT_DETAILS_DOCUMENT)?;
    let round_tripped: Value = serde_json::from_str(&reserialized)?;
    assert_eq!(round_tripped, original);

    Ok(())
}

#[test]
fn test_concrete_contact_details_scenario() -> Result<()> {
    let contact: Lossless<ContactDetails> = Lossless::from_json(CONTACT_DETAILS_DOCUMENT)?;

    assert_eq!(contact.home_phone, "01234 567890");
    assert_eq!(contact.email, "someone@email.com");

    let extra = contact.extra_properties();
    assert_eq!(extra.len(), 2);
    assert_eq!(extra.get("mobilePhone"), Some(&json!("07123 123456")));
    assert_eq!(
        extra.get("address"),
        Some(&json!({
            "line1": "1 Toad Road",
            "city": "London",
            "postcode": "E1 1TD"
        }))
    );

    // mobilePhone was seen before address and must stay ahead of it.
    let captured: Vec<&String> = extra.keys().collect();
    assert_eq!(captured, ["mobilePhone", "address"]);

    let out = contact.to_json()?;
    let keys = top_level_keys(&out);
    assert_eq!(keys.len(), 4);
    for expected in ["homePhone", "mobilePhone", "email", "address"] {
        assert!(keys.iter().any(|k| k == expected), "missing key {expected}");
    }

    Ok(())
}

#[test]
fn test_unrecognized_keys_keep_relative_order() -> Result<()> {
    let document = r#"{"x":1,"homePhone":"h","y":2,"email":"e","z":3}"#;
    let contact: Lossless<ContactDetails> = Lossless::from_json(document)?;

    let captured: Vec<&String> = contact.extra_properties().keys().collect();
    assert_eq!(captured, ["x", "y", "z"]);

    let out = contact.to_json()?;
    let unknown_in_output: Vec<String> = top_level_keys(&out)
        .into_iter()
        .filter(|k| k != "homePhone" && k != "email")
        .collect();
    assert_eq!(unknown_in_output, ["x", "y", "z"]);

    Ok(())
}

#[test]
fn test_known_properties_match_plain_deserialization() -> Result<()> {
    let plain: ContactDetails = serde_json::from_str(CONTACT_DETAILS_DOCUMENT)?;
    let lossless: Lossless<ContactDetails> = Lossless::from_json(CONTACT_DETAILS_DOCUMENT)?;

    assert_eq!(lossless.inner(), &plain);

    Ok(())
}

#[test]
fn test_constructor_forwarding() -> Result<()> {
    let direct = ContactDetails {
        home_phone: "01234 567890".to_string(),
        email: "someone@email.com".to_string(),
    };
    let wrapped = Lossless::new(direct.clone());

    assert_eq!(wrapped.inner(), &direct);
    assert!(wrapped.extra_properties().is_empty());

    // With nothing captured, output carries the known properties only.
    let out = wrapped.to_json()?;
    assert_eq!(
        serde_json::from_str::<Value>(&out)?,
        json!({"homePhone": "01234 567890", "email": "someone@email.com"})
    );

    Ok(())
}

#[test]
fn test_substitutable_where_inner_type_is_expected() -> Result<()> {
    fn describe(contact: &ContactDetails) -> String {
        format!("{} <{}>", contact.home_phone, contact.email)
    }

    let contact: Lossless<ContactDetails> = Lossless::from_json(CONTACT_DETAILS_DOCUMENT)?;
    assert_eq!(describe(&contact), "01234 567890 <someone@email.com>");
    assert_eq!(describe(contact.as_ref()), describe(contact.inner()));

    Ok(())
}

#[test]
fn test_extra_scalar_shapes_round_trip() -> Result<()> {
    let document = r#"{"homePhone":"h","email":"e","count":42,"ratio":0.5,"flag":true,"nothing":null,"tags":["a","b"]}"#;
    let contact: Lossless<ContactDetails> = Lossless::from_json(document)?;

    let original: Value = serde_json::from_str(document)?;
    assert_eq!(contact.to_value()?, original);
    assert_eq!(contact.extra_properties().get("count"), Some(&json!(42)));

    Ok(())
}

#[test]
fn test_nested_opaque_value_keeps_key_order() -> Result<()> {
    let contact: Lossless<ContactDetails> = Lossless::from_json(CONTACT_DETAILS_DOCUMENT)?;
    let out = contact.to_json()?;

    let value: Value = serde_json::from_str(&out)?;
    let address = value["address"].as_object().unwrap();
    let keys: Vec<&String> = address.keys().collect();
    assert_eq!(keys, ["line1", "city", "postcode"]);

    Ok(())
}

#[test]
fn test_capture_and_emit_hooks() -> Result<()> {
    let mut contact = Lossless::new(ContactDetails {
        home_phone: "h".to_string(),
        email: "e".to_string(),
    });

    contact.capture("mobilePhone", json!("07123 123456"));
    contact.capture("mobilePhone", json!("07999 999999"));
    contact.capture("nickname", json!("Toad"));

    // Last write wins, single entry per key.
    assert_eq!(contact.extra_properties().len(), 2);
    assert_eq!(
        contact.extra_properties().get("mobilePhone"),
        Some(&json!("07999 999999"))
    );

    let out: Value = serde_json::from_str(&contact.to_json()?)?;
    assert_eq!(out["mobilePhone"], json!("07999 999999"));
    assert_eq!(out["nickname"], json!("Toad"));

    Ok(())
}

#[test]
fn test_document_with_no_extra_properties() -> Result<()> {
    let document = r#"{"homePhone":"h","email":"e"}"#;
    let contact: Lossless<ContactDetails> = Lossless::from_json(document)?;

    assert!(contact.extra_properties().is_empty());
    assert_eq!(
        serde_json::from_str::<Value>(&contact.to_json()?)?,
        serde_json::from_str::<Value>(document)?
    );

    Ok(())
}

#[test]
fn test_into_parts_and_from() -> Result<()> {
    let contact: Lossless<ContactDetails> = Lossless::from_json(CONTACT_DETAILS_DOCUMENT)?;
    let (inner, extra) = contact.into_parts();

    assert_eq!(inner.email, "someone@email.com");
    assert!(extra.contains("mobilePhone"));

    let rewrapped: Lossless<ContactDetails> = inner.into();
    assert!(rewrapped.extra_properties().is_empty());

    Ok(())
}
