use serde::{Deserialize, Serialize};

use crate::{
    error::ValidationErrors,
    record::{Field, Record},
    validate::{Validate, require_text, require_unique, validate_each},
};

/// A device type offered by a maker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MakerModel {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for MakerModel {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::value("name", &self.name).comment("The name of the device model."),
            Field::value("kind", &self.kind)
                .key("type")
                .comment("The generic type of the model."),
            Field::list("tags", &self.tags)
                .comment("An array of extra tags associated with this model."),
            Field::optional("notes", &self.notes)
                .comment("Optional model specific notes and documentation."),
        ]
    }
}

impl Validate for MakerModel {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name", &self.name);
        require_text(&mut errors, "type", &self.kind);
        errors.into_result()
    }
}

/// A device manufacturer and the models it makes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Maker {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "model", skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<MakerModel>,
}

impl Record for Maker {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::value("name", &self.name).comment("The name of the device maker."),
            Field::optional("notes", &self.notes)
                .comment("Optional maker specific notes and documentation."),
            Field::array("models", &self.models)
                .key("model")
                .comment("An array of device model types."),
        ]
    }
}

impl Validate for Maker {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name", &self.name);
        require_unique(
            &mut errors,
            "model",
            self.models.iter().map(|m| m.name.as_str()),
        );
        validate_each(&mut errors, "model", self.models.iter().enumerate());
        errors.into_result()
    }
}
