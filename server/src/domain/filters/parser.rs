//! Filter condition validation
//!
//! Checks every raw condition against the attribute and operator
//! allow-lists and coerces its value. Nothing is rendered here; a single
//! failing condition rejects the whole list.

use super::types::{
    Attribute, Conditions, Conjunction, FilterCondition, FilterError, FilterSet, FilterValue,
    NormalizedCondition, Operator, bind_key,
};

/// Validate and normalize an ordered list of raw conditions.
///
/// An empty list yields [`FilterSet::All`].
pub fn parse_filters(raw: &[FilterCondition]) -> Result<FilterSet, FilterError> {
    let conditions = raw
        .iter()
        .enumerate()
        .map(|(index, condition)| parse_condition(index, condition))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(match Conditions::new(conditions) {
        Some(conditions) => FilterSet::Where(conditions),
        None => FilterSet::All,
    })
}

fn parse_condition(
    index: usize,
    raw: &FilterCondition,
) -> Result<NormalizedCondition, FilterError> {
    let attribute =
        Attribute::from_column(&raw.attribute).ok_or_else(|| FilterError::InvalidAttribute {
            index,
            attribute: raw.attribute.clone(),
        })?;

    let operator = Operator::parse(&raw.operator).ok_or_else(|| FilterError::InvalidOperator {
        index,
        operator: raw.operator.clone(),
    })?;

    let value = coerce_value(index, attribute, operator, &raw.value)?;

    let conjunction = if index == 0 {
        None
    } else {
        Some(Conjunction::resolve(raw.conjunction.as_deref()))
    };

    Ok(NormalizedCondition {
        attribute,
        operator,
        value,
        conjunction,
        bind_key: bind_key(index),
    })
}

/// Numeric attributes always bind a number, even under `LIKE`
fn coerce_value(
    index: usize,
    attribute: Attribute,
    operator: Operator,
    raw: &str,
) -> Result<FilterValue, FilterError> {
    if attribute.is_numeric() {
        return parse_number(raw).ok_or_else(|| FilterError::InvalidValue {
            index,
            attribute: attribute.column(),
            value: raw.to_string(),
        });
    }

    Ok(match operator {
        Operator::Like => FilterValue::Text(format!("%{}%", raw)),
        _ => FilterValue::Text(raw.to_string()),
    })
}

fn parse_number(raw: &str) -> Option<FilterValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(FilterValue::Integer(v));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(FilterValue::Real)
}
