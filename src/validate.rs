//! Record validation that reports every problem at once.

use std::{collections::HashSet, fmt::Display, ops::RangeInclusive};

use crate::error::ValidationErrors;

pub trait Validate {
    /// Checks the record and everything nested in it, collecting all
    /// field-level problems rather than stopping at the first.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

pub fn require_text(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{field} must not be empty"));
    }
}

pub fn require_within<T>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<T>,
    range: RangeInclusive<T>,
) where
    T: PartialOrd + Display + Copy,
{
    if let Some(value) = value
        && !range.contains(&value)
    {
        errors.push(format!(
            "{field} {value} is outside {}..={}",
            range.start(),
            range.end()
        ));
    }
}

/// Reports every repeat of a non-empty name.
pub fn require_unique<'a, I>(errors: &mut ValidationErrors, label: &str, names: I)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for name in names.into_iter().filter(|name| !name.is_empty()) {
        if !seen.insert(name) {
            errors.push(format!("{label} '{name}' is listed more than once"));
        }
    }
}

/// Validates each nested record, labelling its problems with `label` and the
/// entry's name or position.
pub fn validate_each<'a, N, V, I>(errors: &mut ValidationErrors, label: &str, items: I)
where
    N: Display,
    V: Validate + 'a,
    I: IntoIterator<Item = (N, &'a V)>,
{
    for (name, item) in items {
        if let Err(nested) = item.validate() {
            errors.extend_with(&format!("{label} '{name}'"), nested);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl Validate for Named {
        fn validate(&self) -> Result<(), ValidationErrors> {
            let mut errors = ValidationErrors::new();
            require_text(&mut errors, "name", self.0);
            errors.into_result()
        }
    }

    #[test]
    fn nested_problems_are_all_collected() {
        let items = [Named(""), Named("ok"), Named("  ")];
        let mut errors = ValidationErrors::new();
        validate_each(&mut errors, "linknet", items.iter().enumerate());
        assert_eq!(
            errors.problems(),
            &[
                "linknet '0': name must not be empty".to_string(),
                "linknet '2': name must not be empty".to_string(),
            ]
        );
    }

    #[test]
    fn repeats_are_reported_once_per_repeat() {
        let mut errors = ValidationErrors::new();
        require_unique(&mut errors, "device", ["a", "", "b", "a", "", "a"]);
        assert_eq!(
            errors.problems(),
            &[
                "device 'a' is listed more than once".to_string(),
                "device 'a' is listed more than once".to_string(),
            ]
        );
    }

    #[test]
    fn ranges_only_apply_to_present_values() {
        let mut errors = ValidationErrors::new();
        require_within(&mut errors, "latitude", None, -90.0f32..=90.0);
        require_within(&mut errors, "latitude", Some(-41.5f32), -90.0..=90.0);
        assert!(errors.is_empty());
        require_within(&mut errors, "longitude", Some(190.5f32), -180.0..=180.0);
        assert_eq!(errors.to_string(), "longitude 190.5 is outside -180..=180");
    }
}
