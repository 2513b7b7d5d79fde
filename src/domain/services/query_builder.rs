use crate::domain::models::filter::{ConferenceQuery, NormalizedFilters, SortKey};

impl ConferenceQuery {
    /// Orders by the inequality field first when there is one, since the
    /// leading sort key has to match it; `name` always breaks ties.
    pub fn build(normalized: NormalizedFilters) -> Self {
        let mut order_by = Vec::with_capacity(2);
        if let Some(field) = normalized.inequality_field {
            order_by.push(SortKey::Field(field));
        }
        order_by.push(SortKey::Name);

        Self { filters: normalized.filters, order_by }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::filter::{FilterField, RawFilter};
    use crate::domain::services::filters::normalize_filters;

    #[test]
    fn test_no_filters_orders_by_name_only() {
        let query = ConferenceQuery::build(NormalizedFilters::default());
        assert!(query.filters.is_empty());
        assert_eq!(query.order_by, vec![SortKey::Name]);
    }

    #[test]
    fn test_equality_filters_order_by_name_only() {
        let normalized = normalize_filters(&[RawFilter::new("CITY", "EQ", "Berlin")]).unwrap();
        let query = ConferenceQuery::build(normalized);
        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.order_by, vec![SortKey::Name]);
    }

    #[test]
    fn test_inequality_field_leads_ordering() {
        let normalized = normalize_filters(&[
            RawFilter::new("CITY", "EQ", "Berlin"),
            RawFilter::new("MONTH", "GTEQ", "4"),
        ]).unwrap();
        let query = ConferenceQuery::build(normalized);
        assert_eq!(query.order_by, vec![SortKey::Field(FilterField::Month), SortKey::Name]);
    }
}
