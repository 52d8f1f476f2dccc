use crate::common::Value;

use super::{
    ComparisonFilter, ComparisonMode, EqualsFilter, Filter, NotEqualsFilter,
};

/// Creates a fluent filter builder for the specified field name.
///
/// The returned `FluentFilter` provides methods for building equality and
/// comparison filters on that field.
pub fn field(field_name: &str) -> FluentFilter {
    FluentFilter {
        field_name: field_name.to_string(),
    }
}

/// A fluent builder for constructing filters on a specific field.
///
/// Each method consumes the builder and returns a [Filter] that can be used
/// directly with collection read operations or combined with other filters.
pub struct FluentFilter {
    field_name: String,
}

impl FluentFilter {
    /// Matches documents where the field equals the specified value.
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(EqualsFilter::new(self.field_name, value.into()))
    }

    /// Matches documents where the field does not equal the specified value.
    #[inline]
    pub fn ne<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(NotEqualsFilter::new(self.field_name, value.into()))
    }

    /// Matches documents where the field is greater than the specified value.
    #[inline]
    pub fn gt<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(ComparisonFilter::new(
            self.field_name,
            value.into(),
            ComparisonMode::Greater,
        ))
    }

    /// Matches documents where the field is greater than or equal to the specified value.
    #[inline]
    pub fn gte<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(ComparisonFilter::new(
            self.field_name,
            value.into(),
            ComparisonMode::GreaterEqual,
        ))
    }

    /// Matches documents where the field is less than the specified value.
    #[inline]
    pub fn lt<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(ComparisonFilter::new(
            self.field_name,
            value.into(),
            ComparisonMode::Lesser,
        ))
    }

    /// Matches documents where the field is less than or equal to the specified value.
    #[inline]
    pub fn lte<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(ComparisonFilter::new(
            self.field_name,
            value.into(),
            ComparisonMode::LesserEqual,
        ))
    }
}
