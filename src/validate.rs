use serde_json::{Map, Value};

/// Check that every required field is present and non-null in the request
/// body, in declared order. Fails with the first missing field name; callers
/// never aggregate multiple missing fields into one error.
pub fn validate(record: &Map<String, Value>, required: &[&'static str]) -> Result<(), &'static str> {
    for &field in required {
        match record.get(field) {
            None | Some(Value::Null) => return Err(field),
            Some(_) => {}
        }
    }
    Ok(())
}
