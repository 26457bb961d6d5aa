use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    error::ValidationErrors,
    record::{Field, Record},
    validate::{Validate, require_text, validate_each},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Version {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for Version {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::value("name", &self.name).comment("The name of the model version."),
            Field::value("kind", &self.kind)
                .key("type")
                .comment("The generic type of the model version."),
            Field::list("tags", &self.tags)
                .comment("An array of extra tags associated with this version."),
            Field::optional("notes", &self.notes)
                .comment("Optional model version specific notes and documentation."),
        ]
    }
}

impl Validate for Version {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name", &self.name);
        errors.into_result()
    }
}

/// An equipment model and its released versions, keyed by version id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Model {
    pub name: String,
    pub manufacturer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "version", skip_serializing_if = "HashMap::is_empty")]
    pub versions: HashMap<String, Version>,
}

impl Record for Model {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::value("name", &self.name).comment("The name of the equipment model."),
            Field::value("manufacturer", &self.manufacturer)
                .comment("Primary device manufacturer."),
            Field::optional("notes", &self.notes)
                .comment("Optional model specific notes and documentation."),
            Field::map("versions", &self.versions)
                .key("version")
                .comment("A list of device model versions."),
        ]
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name", &self.name);
        require_text(&mut errors, "manufacturer", &self.manufacturer);
        validate_each(
            &mut errors,
            "version",
            self.versions.iter().sorted_by(|(a, _), (b, _)| a.cmp(b)),
        );
        errors.into_result()
    }
}
