use crate::domain::models::filter::{
    ConferenceFilter, FilterField, FilterOperator, FilterValue, NormalizedFilters, RawFilter,
};
use crate::error::AppError;

/// Validates raw filters and maps them onto the closed field/operator sets.
///
/// Only one distinct field may carry inequality operators across the batch;
/// repeating inequalities on that same field is fine. Numeric fields have
/// their values coerced to integers. Order is preserved.
pub fn normalize_filters(raw: &[RawFilter]) -> Result<NormalizedFilters, AppError> {
    let mut inequality_field: Option<FilterField> = None;
    let mut filters = Vec::with_capacity(raw.len());

    for f in raw {
        let field = FilterField::from_token(&f.field)
            .ok_or_else(|| AppError::InvalidFilter(format!("Unknown filter field: {}", f.field)))?;
        let operator = FilterOperator::from_token(&f.operator)
            .ok_or_else(|| AppError::InvalidFilter(format!("Unknown filter operator: {}", f.operator)))?;

        if operator.is_inequality() {
            match inequality_field {
                Some(existing) if existing != field => {
                    return Err(AppError::MultipleInequalityFields);
                }
                _ => inequality_field = Some(field),
            }
        }

        let value = coerce_value(field, &f.value)?;
        filters.push(ConferenceFilter { field, operator, value });
    }

    Ok(NormalizedFilters { inequality_field, filters })
}

fn coerce_value(field: FilterField, value: &str) -> Result<FilterValue, AppError> {
    if field.is_numeric() {
        value.trim().parse::<i64>()
            .map(FilterValue::Int)
            .map_err(|_| AppError::InvalidValue(format!("Value '{}' for {} must be an integer", value, field)))
    } else {
        Ok(FilterValue::Text(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_tokens_to_canonical_triples() {
        let out = normalize_filters(&[
            RawFilter::new("CITY", "EQ", "London"),
            RawFilter::new("TOPIC", "EQ", "Medical Innovations"),
            RawFilter::new("MONTH", "EQ", "6"),
        ]).unwrap();

        assert_eq!(out.inequality_field, None);
        assert_eq!(out.filters.len(), 3);
        assert_eq!(out.filters[0].field.as_str(), "city");
        assert_eq!(out.filters[0].operator.as_str(), "=");
        assert_eq!(out.filters[0].value, FilterValue::Text("London".into()));
        assert_eq!(out.filters[1].field.as_str(), "topics");
        assert_eq!(out.filters[2].value, FilterValue::Int(6));
    }

    #[test]
    fn test_every_operator_token() {
        for (token, symbol) in [("EQ", "="), ("GT", ">"), ("GTEQ", ">="), ("LT", "<"), ("LTEQ", "<="), ("NE", "!=")] {
            let out = normalize_filters(&[RawFilter::new("MAX_ATTENDEES", token, "10")]).unwrap();
            assert_eq!(out.filters[0].operator.as_str(), symbol);
        }
    }

    #[test]
    fn test_unknown_field_or_operator_is_invalid_filter() {
        let err = normalize_filters(&[RawFilter::new("COUNTRY", "EQ", "UK")]).unwrap_err();
        assert!(matches!(err, AppError::InvalidFilter(_)));

        let err = normalize_filters(&[RawFilter::new("CITY", "LIKE", "Lon")]).unwrap_err();
        assert!(matches!(err, AppError::InvalidFilter(_)));

        // Tokens are case-sensitive
        let err = normalize_filters(&[RawFilter::new("city", "EQ", "London")]).unwrap_err();
        assert!(matches!(err, AppError::InvalidFilter(_)));
    }

    #[test]
    fn test_two_inequality_fields_rejected() {
        let err = normalize_filters(&[
            RawFilter::new("MONTH", "GT", "3"),
            RawFilter::new("CITY", "EQ", "Paris"),
            RawFilter::new("MAX_ATTENDEES", "LT", "100"),
        ]).unwrap_err();
        assert!(matches!(err, AppError::MultipleInequalityFields));

        let err = normalize_filters(&[
            RawFilter::new("CITY", "NE", "Paris"),
            RawFilter::new("TOPIC", "NE", "Web"),
        ]).unwrap_err();
        assert!(matches!(err, AppError::MultipleInequalityFields));
    }

    #[test]
    fn test_repeated_inequality_on_same_field_allowed() {
        let out = normalize_filters(&[
            RawFilter::new("MAX_ATTENDEES", "GT", "10"),
            RawFilter::new("CITY", "EQ", "Tokyo"),
            RawFilter::new("MAX_ATTENDEES", "LTEQ", "500"),
            RawFilter::new("MONTH", "EQ", "11"),
        ]).unwrap();
        assert_eq!(out.inequality_field, Some(FilterField::MaxAttendees));
        assert_eq!(out.filters.len(), 4);
        assert_eq!(out.filters[2].operator, FilterOperator::Lteq);
    }

    #[test]
    fn test_numeric_coercion() {
        let out = normalize_filters(&[RawFilter::new("MONTH", "EQ", " 7 ")]).unwrap();
        assert_eq!(out.filters[0].value, FilterValue::Int(7));

        let err = normalize_filters(&[RawFilter::new("MAX_ATTENDEES", "GT", "lots")]).unwrap_err();
        assert!(matches!(err, AppError::InvalidValue(_)));

        // Text fields keep their value verbatim, digits included
        let out = normalize_filters(&[RawFilter::new("CITY", "EQ", "42")]).unwrap();
        assert_eq!(out.filters[0].value, FilterValue::Text("42".into()));
    }

    #[test]
    fn test_empty_batch() {
        let out = normalize_filters(&[]).unwrap();
        assert_eq!(out, NormalizedFilters::default());
    }
}
