use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    error::ValidationErrors,
    record::{Field, Record},
    validate::{Validate, require_text, require_unique, require_within, validate_each},
};

/// A network link that a location requires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Linknet {
    pub name: String,
}

impl Record for Linknet {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::value("name", &self.name).comment("Linknet name.")]
    }
}

impl Validate for Linknet {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name", &self.name);
        errors.into_result()
    }
}

/// A piece of equipment installed at a location. Addresses are CIDR text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    pub name: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uninstalled: Option<bool>,
}

impl Record for Equipment {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::value("name", &self.name).comment("The unique equipment name."),
            Field::value("model", &self.model).comment("A generic equipment model name."),
            Field::optional("address", &self.address)
                .comment("The primary equipment ip address used to connect."),
            Field::list("aliases", &self.aliases)
                .comment("Any extra ip addresses assigned to the equipment."),
            Field::list("tags", &self.tags).comment("Any extra equipment tags or labels."),
            Field::optional("notes", &self.notes)
                .comment("Any equipment specific notes or comments."),
            Field::optional("uninstalled", &self.uninstalled)
                .comment("Indicate whether the equipment is not present."),
        ]
    }
}

impl Validate for Equipment {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name", &self.name);
        require_text(&mut errors, "model", &self.model);
        if let Some(address) = &self.address
            && self.aliases.contains(address)
        {
            errors.push(format!("alias {address} repeats the primary address"));
        }
        errors.into_result()
    }
}

/// An equipment site: position, networking and installed equipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub tag: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runnet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locnet: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub linknets: Vec<Linknet>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub equipment: HashMap<String, Equipment>,
}

impl Record for Location {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::value("tag", &self.tag).comment("Location specific tag."),
            Field::value("name", &self.name).comment("Location place name."),
            Field::optional("latitude", &self.latitude).comment("Optional location latitude."),
            Field::optional("longitude", &self.longitude)
                .comment("Optional location longitude."),
            Field::optional("runnet", &self.runnet).comment("Optional location runnet."),
            Field::optional("locnet", &self.locnet).comment("Should a locnet be required."),
            Field::array("linknets", &self.linknets)
                .comment("A list of required location linknets."),
            Field::map("equipment", &self.equipment)
                .comment("The equipment installed at the location."),
        ]
    }
}

impl Validate for Location {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "tag", &self.tag);
        require_text(&mut errors, "name", &self.name);
        require_within(&mut errors, "latitude", self.latitude, -90.0..=90.0);
        require_within(&mut errors, "longitude", self.longitude, -180.0..=180.0);

        require_unique(
            &mut errors,
            "linknet",
            self.linknets.iter().map(|l| l.name.as_str()),
        );
        validate_each(&mut errors, "linknet", self.linknets.iter().enumerate());

        validate_each(
            &mut errors,
            "equipment",
            self.equipment.iter().sorted_by(|(a, _), (b, _)| a.cmp(b)),
        );
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode_string;

    #[test]
    fn empty_location_documents_its_collections() {
        let text = encode_string(&Location::default()).expect("encode");
        assert!(text.contains("#[[linknets]]\n#\t# Linknet name.\n#\tname = \"\"\n"));
        assert!(text.contains("#[equipment.value]\n#\t# The unique equipment name.\n"));
        assert!(text.contains("#\t#aliases = []\n"));
        assert_eq!(text.matches("#[[linknets]]").count(), 1);
    }

    #[test]
    fn validation_reports_every_problem() {
        let mut location = Location {
            latitude: Some(-91.0),
            linknets: vec![
                Linknet {
                    name: "A to B".into(),
                },
                Linknet {
                    name: "A to B".into(),
                },
                Linknet::default(),
            ],
            ..Location::default()
        };
        location.equipment.insert("z".into(), Equipment::default());
        location.equipment.insert(
            "a".into(),
            Equipment {
                name: "a".into(),
                model: "m".into(),
                address: Some("10.0.0.1/28".into()),
                aliases: vec!["10.0.0.1/28".into()],
                ..Equipment::default()
            },
        );

        let errors = location.validate().expect_err("invalid location");
        assert_eq!(
            errors.problems(),
            &[
                "tag must not be empty".to_string(),
                "name must not be empty".to_string(),
                "latitude -91 is outside -90..=90".to_string(),
                "linknet 'A to B' is listed more than once".to_string(),
                "linknet '2': name must not be empty".to_string(),
                "equipment 'a': alias 10.0.0.1/28 repeats the primary address".to_string(),
                "equipment 'z': name must not be empty".to_string(),
                "equipment 'z': model must not be empty".to_string(),
            ]
        );
    }
}
