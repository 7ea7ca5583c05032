//! Output formatting for read contexts (template and shortcode
//! consumers).

use crate::listing::{FieldValue, format_plain_number};
use crate::schema::field::{FieldDefinition, TypeSettings};

/// Field keys that format as currency amounts
const MONETARY_KEYS: &[&str] = &["price", "sales_price", "msrp"];

/// Formatting knobs accepted by every field type
#[derive(Debug, Clone, PartialEq)]
pub struct FormatOptions {
    /// Prepended when the formatted value is non-empty
    pub before: String,
    /// Appended when the formatted value is non-empty
    pub after: String,
    /// Returned unwrapped when the value is absent
    pub default: String,
    pub currency: String,
    pub decimals: usize,
    pub yes_text: String,
    pub no_text: String,
    /// Group thousands for non-monetary numbers
    pub group_thousands: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            before: String::new(),
            after: String::new(),
            default: String::new(),
            currency: "$".to_string(),
            decimals: 2,
            yes_text: "\u{2713}".to_string(),
            no_text: "\u{2612}".to_string(),
            group_thousands: false,
        }
    }
}

/// Format one stored value for display.
///
/// Monetary number fields render as currency with grouped thousands,
/// `select` values resolve to their option label, `checkbox_array` flag
/// sets render as a yes/no glyph (`yes` wins when both flags are
/// present), everything else passes through. An absent value yields
/// `default` without the before/after wrapping.
#[must_use]
pub fn format_value(field: &FieldDefinition, value: &FieldValue, opts: &FormatOptions) -> String {
    if value.is_empty() {
        return opts.default.clone();
    }

    let formatted = match (&field.settings, value) {
        (TypeSettings::Number(_), FieldValue::Number(n)) => format_number(field, *n, opts),
        (TypeSettings::Number(_), other) => other.as_plain(),
        (TypeSettings::CheckboxArray { .. }, FieldValue::Flags(flags)) => {
            if flags.iter().any(|f| f == "yes") {
                opts.yes_text.clone()
            } else if flags.iter().any(|f| f == "no") {
                opts.no_text.clone()
            } else {
                String::new()
            }
        }
        (TypeSettings::Select { .. }, FieldValue::Text(stored)) => field
            .option_label(stored)
            .map_or_else(|| stored.clone(), ToString::to_string),
        (_, other) => other.as_plain(),
    };

    if formatted.is_empty() {
        return formatted;
    }
    format!("{}{formatted}{}", opts.before, opts.after)
}

fn format_number(field: &FieldDefinition, n: f64, opts: &FormatOptions) -> String {
    if MONETARY_KEYS.contains(&field.key.as_str()) {
        format!("{}{}", opts.currency, group_thousands(n, opts.decimals))
    } else if opts.group_thousands {
        group_thousands(n, 0)
    } else {
        format_plain_number(n)
    }
}

/// Fixed-decimal rendering with `,` thousands separators
fn group_thousands(n: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if n < 0.0 { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(24999.5, 2), "24,999.50");
        assert_eq!(group_thousands(999.0, 0), "999");
        assert_eq!(group_thousands(1000.0, 0), "1,000");
        assert_eq!(group_thousands(-1234.0, 0), "-1,234");
    }
}
