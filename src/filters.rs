//! Filter criteria held by the dashboard and the query parameters derived
//! from them.

/// The filter fields the filter bar can change one at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    Category,
    Date,
    MinAmount,
    MaxAmount,
}

/// Current filter state. `Default` is the all-empty reset state.
///
/// Only `category` and `date` become backend query parameters. The amount
/// bounds are collected by the filter bar but not part of the request
/// contract yet; forward them in [`FilterCriteria::query_string`] once the
/// backend grows matching parameters, or apply them to the fetched list if
/// they are meant to stay client-side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub date: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

impl FilterCriteria {
    /// Returns a copy with exactly one field replaced by the raw input
    /// value. Empty input clears the field; so does a non-numeric value in
    /// either amount box.
    pub fn with_field(&self, field: FilterField, raw: &str) -> Self {
        let mut next = self.clone();
        let trimmed = raw.trim();
        match field {
            FilterField::Category => next.category = non_empty(trimmed),
            FilterField::Date => next.date = non_empty(trimmed),
            FilterField::MinAmount => next.min_amount = trimmed.parse().ok(),
            FilterField::MaxAmount => next.max_amount = trimmed.parse().ok(),
        }
        next
    }

    /// Query string for the transactions endpoint: `""` when nothing is
    /// set, otherwise `?category=..&date=..` with unset fields omitted.
    /// Empty strings are never sent.
    pub fn query_string(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(format!("category={category}"));
        }
        if let Some(date) = &self.date {
            pairs.push(format!("date={date}"));
        }
        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_criteria_builds_empty_query() {
        assert_eq!(FilterCriteria::default().query_string(), "");
    }

    #[test]
    fn set_fields_appear_in_query() {
        let criteria = FilterCriteria::default()
            .with_field(FilterField::Category, "airtime_purchases")
            .with_field(FilterField::Date, "2024-03-15");
        assert_eq!(
            criteria.query_string(),
            "?category=airtime_purchases&date=2024-03-15"
        );
    }

    #[test]
    fn single_field_queries_omit_the_other() {
        let by_category =
            FilterCriteria::default().with_field(FilterField::Category, "bank_deposits");
        assert_eq!(by_category.query_string(), "?category=bank_deposits");

        let by_date = FilterCriteria::default().with_field(FilterField::Date, "2024-01-01");
        assert_eq!(by_date.query_string(), "?date=2024-01-01");
    }

    #[test]
    fn amount_bounds_never_reach_the_query() {
        let criteria = FilterCriteria::default()
            .with_field(FilterField::MinAmount, "1000")
            .with_field(FilterField::MaxAmount, "50000");
        assert_eq!(criteria.min_amount, Some(1000.0));
        assert_eq!(criteria.max_amount, Some(50000.0));
        assert_eq!(criteria.query_string(), "");
    }

    #[test]
    fn with_field_replaces_exactly_one_field() {
        let base = FilterCriteria {
            category: Some("incoming_money".into()),
            date: Some("2024-02-02".into()),
            min_amount: Some(10.0),
            max_amount: None,
        };
        let next = base.with_field(FilterField::Date, "2024-05-05");
        assert_eq!(next.category, base.category);
        assert_eq!(next.date.as_deref(), Some("2024-05-05"));
        assert_eq!(next.min_amount, base.min_amount);
        assert_eq!(next.max_amount, base.max_amount);
    }

    #[test]
    fn empty_input_clears_a_field() {
        let base = FilterCriteria::default().with_field(FilterField::Category, "bank_transfers");
        let cleared = base.with_field(FilterField::Category, "");
        assert_eq!(cleared, FilterCriteria::default());
    }

    #[test]
    fn junk_amount_input_clears_the_bound() {
        let base = FilterCriteria::default().with_field(FilterField::MinAmount, "500");
        assert_eq!(base.min_amount, Some(500.0));
        assert_eq!(base.with_field(FilterField::MinAmount, "abc").min_amount, None);
    }

    #[test]
    fn reset_is_all_empty_regardless_of_prior_state() {
        let criteria = FilterCriteria {
            category: Some("agent_withdrawals".into()),
            date: Some("2024-07-01".into()),
            min_amount: Some(1.0),
            max_amount: Some(2.0),
        };
        // Reset is one atomic replacement with the default value.
        let reset = FilterCriteria::default();
        assert_ne!(criteria, reset);
        assert_eq!(reset.category, None);
        assert_eq!(reset.date, None);
        assert_eq!(reset.min_amount, None);
        assert_eq!(reset.max_amount, None);
    }
}
