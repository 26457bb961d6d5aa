use serde::{Deserialize, Serialize};

use crate::{
    error::ValidationErrors,
    record::{Field, Record},
    validate::{Validate, require_text, require_unique, validate_each},
};

use super::Linknet;

/// A device reachable on a site network. Addresses are CIDR text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    pub name: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uninstalled: Option<bool>,
}

impl Record for Device {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::value("name", &self.name)
                .comment("Device name, generally an equipment tag plus the site network tag."),
            Field::value("model", &self.model)
                .comment("Model name, a generic term useful for monitoring or configuration."),
            Field::optional("address", &self.address).comment("Primary IP address of the device."),
            Field::list("aliases", &self.aliases)
                .comment("Extra addresses associated with this device."),
            Field::list("tags", &self.tags).comment("Extra tags associated with this device."),
            Field::list("links", &self.links).comment("Linked devices."),
            Field::optional("notes", &self.notes)
                .comment("Device specific notes and documentation."),
            Field::optional("uninstalled", &self.uninstalled)
                .comment("Is the device uninstalled or unreachable."),
        ]
    }
}

impl Validate for Device {
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

/// The IP layout of one site: its equipment range, links and devices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runnet: Option<String>,
    #[serde(rename = "linknet", skip_serializing_if = "Vec::is_empty")]
    pub linknets: Vec<Linknet>,
    #[serde(rename = "device", skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<Device>,
}

impl Network {
    /// The network name, falling back to the location tag.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.location)
    }
}

impl Record for Network {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::value("location", &self.location).comment("The network location ID tag."),
            Field::optional("name", &self.name)
                .comment("Name of the network, defaults to location name."),
            Field::optional("notes", &self.notes).comment("Network notes and documentation."),
            Field::optional("runnet", &self.runnet)
                .comment("Site specific IP 192.168.X.Y/28 equipment range."),
            Field::array("linknets", &self.linknets)
                .key("linknet")
                .comment("An array of 10.X.Y.N/28 linking networks, the order dictates the network offset."),
            Field::array("devices", &self.devices)
                .key("device")
                .comment("Local devices."),
        ]
    }
}

impl Validate for Network {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "location", &self.location);
        require_unique(
            &mut errors,
            "linknet",
            self.linknets.iter().map(|l| l.name.as_str()),
        );
        validate_each(&mut errors, "linknet", self.linknets.iter().enumerate());
        require_unique(
            &mut errors,
            "device",
            self.devices.iter().map(|d| d.name.as_str()),
        );
        validate_each(&mut errors, "device", self.devices.iter().enumerate());
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_location() {
        let mut network = Network {
            location: "WEL".to_string(),
            ..Network::default()
        };
        assert_eq!(network.display_name(), "WEL");
        network.name = Some(" ".to_string());
        assert_eq!(network.display_name(), "WEL");
        network.name = Some("Wellington".to_string());
        assert_eq!(network.display_name(), "Wellington");
    }

    #[test]
    fn repeated_device_names_are_reported() {
        let device = Device {
            name: "wel-logger".to_string(),
            model: "Q330".to_string(),
            ..Device::default()
        };
        let network = Network {
            location: "WEL".to_string(),
            devices: vec![device.clone(), device],
            ..Network::default()
        };
        let errors = network.validate().expect_err("repeated device");
        assert_eq!(
            errors.to_string(),
            "device 'wel-logger' is listed more than once"
        );
    }
}
