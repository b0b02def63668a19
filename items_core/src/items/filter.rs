use sqlx::{QueryBuilder, Sqlite};

use crate::error::{AppError, Result};
use crate::models::items::ItemFilterQuery;

/// Conjunction of optional predicates over the `items` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    /// Exact match on `car`.
    pub car_name: Option<String>,
    /// Substring match on `description`.
    pub color: Option<String>,
    /// Exact match on `price`.
    pub price: Option<i64>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_car_name(mut self, car_name: impl Into<String>) -> Self {
        self.car_name = Some(car_name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_price(mut self, price: i64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn has_filters(&self) -> bool {
        self.car_name.is_some() || self.color.is_some() || self.price.is_some()
    }

    /// Appends one ` AND ...` clause per supplied predicate.
    pub fn push_conditions(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        if let Some(car_name) = &self.car_name {
            builder.push(" AND car = ");
            builder.push_bind(car_name.clone());
        }

        if let Some(color) = &self.color {
            builder.push(" AND description LIKE ");
            builder.push_bind(format!("%{}%", escape_like(color)));
            builder.push(" ESCAPE '\\'");
        }

        if let Some(price) = self.price {
            builder.push(" AND price = ");
            builder.push_bind(price);
        }
    }
}

impl TryFrom<ItemFilterQuery> for ItemFilter {
    type Error = AppError;

    fn try_from(query: ItemFilterQuery) -> Result<Self> {
        let price = query
            .price
            .map(|raw| {
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| AppError::BadRequest(format!("Invalid price: {}", raw)))
            })
            .transpose()?;

        Ok(Self {
            car_name: query.car_name,
            color: query.color,
            price,
        })
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_filters() {
        assert!(!ItemFilter::new().has_filters());
        assert!(ItemFilter::new().with_price(10).has_filters());
        assert!(ItemFilter::new().with_color("red").has_filters());
    }

    #[test]
    fn test_push_conditions_binds_each_predicate() {
        let filter = ItemFilter::new()
            .with_car_name("Tesla")
            .with_color("red")
            .with_price(50000);

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT id FROM items WHERE 1=1");
        filter.push_conditions(&mut builder);

        assert_eq!(
            builder.sql(),
            "SELECT id FROM items WHERE 1=1 AND car = ? AND description LIKE ? ESCAPE '\\' AND price = ?"
        );
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("red"), "red");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn test_from_query() {
        let query = ItemFilterQuery {
            car_name: Some("BMW".to_string()),
            color: None,
            price: Some(" 42 ".to_string()),
        };
        let filter = ItemFilter::try_from(query).unwrap();
        assert_eq!(filter, ItemFilter::new().with_car_name("BMW").with_price(42));

        let bad = ItemFilterQuery {
            price: Some("cheap".to_string()),
            ..ItemFilterQuery::default()
        };
        assert!(matches!(ItemFilter::try_from(bad), Err(AppError::BadRequest(_))));
    }
}
