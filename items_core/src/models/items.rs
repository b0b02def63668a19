//! Item wire payloads and their mapping to `items` rows

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::database::DbItem;

/// Body of `POST /items/{id}` and `PUT /items/{id}`.
///
/// Omitted optional fields are stored as null, so an update always replaces
/// the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ItemPayload {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub price: Option<i64>,

    #[validate(length(max = 100, message = "Car must not exceed 100 characters"))]
    #[serde(default)]
    pub car: Option<String>,
}

impl ItemPayload {
    pub fn into_record(self, id: i64) -> DbItem {
        DbItem {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            car: self.car,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub car: Option<String>,
}

impl From<DbItem> for Item {
    fn from(row: DbItem) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            car: row.car,
        }
    }
}

/// Query string of `GET /items/filter/`. Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemFilterQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub car_name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub price: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_missing_optionals_become_none() {
        let payload: ItemPayload = serde_json::from_str(r#"{"name": "Model 3"}"#).unwrap();
        assert_eq!(payload.name, "Model 3");
        assert!(payload.description.is_none());
        assert!(payload.price.is_none());
        assert!(payload.car.is_none());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_payload_length_limits() {
        let payload = ItemPayload {
            name: "x".repeat(101),
            description: None,
            price: None,
            car: Some("y".repeat(101)),
        };
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("car"));

        let empty_name = ItemPayload {
            name: String::new(),
            description: None,
            price: None,
            car: None,
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_record_mapping() {
        let payload = ItemPayload {
            name: "Model S".to_string(),
            description: Some("red sedan".to_string()),
            price: Some(50000),
            car: Some("Tesla".to_string()),
        };

        let item = Item::from(payload.into_record(1));
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            serde_json::json!({
                "id": 1,
                "name": "Model S",
                "description": "red sedan",
                "price": 50000,
                "car": "Tesla"
            })
        );
    }

    #[test]
    fn test_filter_query_only_empty_values_are_absent() {
        let query: ItemFilterQuery =
            serde_json::from_str(r#"{"car_name": "", "color": " ", "price": "50000"}"#).unwrap();
        assert!(query.car_name.is_none());
        assert_eq!(query.color.as_deref(), Some(" "));
        assert_eq!(query.price.as_deref(), Some("50000"));
    }
}
