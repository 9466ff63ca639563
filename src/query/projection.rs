//! Field projection

use serde_json::{Map, Value};

/// Keep only the requested fields of a record or list of records
///
/// Fields the record does not have are skipped. Null passes through.
pub fn project(value: &Value, fields: &[String]) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(|item| project(item, fields)).collect()),
        Value::Object(record) => Value::Object(project_record(record, fields)),
        other => other.clone(),
    }
}

fn project_record(record: &Map<String, Value>, fields: &[String]) -> Map<String, Value> {
    let mut out = Map::new();
    for field in fields {
        if let Some(value) = record.get(field) {
            out.insert(field.clone(), value.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_project_list() {
        let data = json!([
            { "id": "1", "name": "A", "location": "X" },
            { "id": "2", "name": "B", "location": "Y" }
        ]);
        assert_eq!(
            project(&data, &fields(&["id", "name"])),
            json!([{ "id": "1", "name": "A" }, { "id": "2", "name": "B" }])
        );
    }

    #[test]
    fn test_unknown_fields_skipped() {
        let data = json!({ "id": "1", "name": "A" });
        assert_eq!(
            project(&data, &fields(&["artists", "id", "min"])),
            json!({ "id": "1" })
        );
    }

    #[test]
    fn test_empty_field_list_gives_empty_objects() {
        let data = json!([{ "id": "1" }, { "id": "2" }]);
        assert_eq!(project(&data, &[]), json!([{}, {}]));
    }

    #[test]
    fn test_keeps_requested_field_order() {
        let data = json!({ "bio": "b", "id": "1", "name": "A", "location": "X" });
        let projected = project(&data, &fields(&["name", "location", "id"]));
        let keys: Vec<&str> = projected
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["name", "location", "id"]);
    }

    #[test]
    fn test_null_passes_through() {
        assert_eq!(project(&Value::Null, &fields(&["id"])), Value::Null);
    }

    #[test]
    fn test_idempotent() {
        let data = json!([{ "id": "1", "name": "A", "bio": "b", "priceRange": { "min": 1, "max": 2 } }]);
        let selection = fields(&["name", "priceRange", "missing"]);
        let once = project(&data, &selection);
        assert_eq!(project(&once, &selection), once);
    }
}
