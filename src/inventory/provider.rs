use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    error::ValidationErrors,
    record::{Field, Record},
    validate::{Validate, require_text, require_unique, validate_each},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for Service {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::value("name", &self.name).comment("The name of the provided service."),
            Field::optional("reference", &self.reference)
                .comment("An optional service reference."),
            Field::optional("contact", &self.contact).comment("Optional contact details."),
            Field::optional("notes", &self.notes)
                .comment("Optional service specific notes and documentation."),
        ]
    }
}

impl Validate for Service {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name", &self.name);
        errors.into_result()
    }
}

/// A block of networks allocated by a provider. Networks are CIDR text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Range {
    pub name: String,
    pub area: String,
    pub networks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for Range {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::value("name", &self.name).comment("The name of the network range."),
            Field::value("area", &self.area).comment("The network area identification."),
            Field::list("networks", &self.networks).comment("An array of networks."),
            Field::optional("notes", &self.notes)
                .comment("Optional range specific notes and documentation."),
        ]
    }
}

impl Validate for Range {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name", &self.name);
        if self.networks.iter().any(|network| network.trim().is_empty()) {
            errors.push("networks must not contain empty entries");
        }
        require_unique(
            &mut errors,
            "network",
            self.networks.iter().map(String::as_str),
        );
        errors.into_result()
    }
}

/// A network service provider: its services and address allocations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Provider {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "service", skip_serializing_if = "HashMap::is_empty")]
    pub services: HashMap<String, Service>,
    #[serde(rename = "range", skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<Range>,
}

impl Record for Provider {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::value("name", &self.name).comment("The name of the network provider."),
            Field::optional("notes", &self.notes)
                .comment("Optional provider notes and documentation."),
            Field::map("services", &self.services)
                .key("service")
                .comment("A list of provided services."),
            Field::array("ranges", &self.ranges)
                .key("range")
                .comment("An array of provided network ranges."),
        ]
    }
}

impl Validate for Provider {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name", &self.name);
        validate_each(
            &mut errors,
            "service",
            self.services.iter().sorted_by(|(a, _), (b, _)| a.cmp(b)),
        );
        require_unique(
            &mut errors,
            "range",
            self.ranges.iter().map(|r| r.name.as_str()),
        );
        validate_each(&mut errors, "range", self.ranges.iter().enumerate());
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_problems_are_collected_with_their_position() {
        let provider = Provider {
            name: "Example Provider".to_string(),
            ranges: vec![Range {
                name: "Private Networks".to_string(),
                area: "0.0.0.1".to_string(),
                networks: vec![
                    "10.100.41.0/24".to_string(),
                    " ".to_string(),
                    "10.100.41.0/24".to_string(),
                ],
                notes: None,
            }],
            ..Provider::default()
        };
        let errors = provider.validate().expect_err("invalid range");
        assert_eq!(
            errors.problems(),
            &[
                "range '0': networks must not contain empty entries".to_string(),
                "range '0': network '10.100.41.0/24' is listed more than once".to_string(),
            ]
        );
    }
}
