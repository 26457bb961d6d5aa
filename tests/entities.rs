mod common;

use std::fmt::Debug;

use common::{TestWorkspace, fixture_path};
use inventory_meta::{
    Record, Validate, encode_string,
    inventory::{Maker, Model, Network, Provider},
    store,
};
use serde::de::DeserializeOwned;

/// Loads a fixture, validates it, stores it and checks it loads back unchanged.
fn check_store_cycle<T>(fixture: &str) -> T
where
    T: Record + Validate + DeserializeOwned + PartialEq + Debug,
{
    let loaded: T = store::load_record(&fixture_path(fixture)).expect("load fixture");
    loaded.validate().expect("fixture validates");

    let workspace = TestWorkspace::new();
    let path = workspace.path().join("copy").join(fixture);
    store::store_record(&path, &loaded).expect("store record");
    let reloaded: T = store::load_record(&path).expect("reload record");
    assert_eq!(reloaded, loaded);
    loaded
}

#[test]
fn maker_fixture_round_trips() {
    let maker: Maker = check_store_cycle("makers/kinemetrics/maker.toml");
    assert_eq!(maker.models.len(), 2);
    assert_eq!(maker.models[0].kind, "Datalogger");
    assert_eq!(
        maker.notes.as_deref(),
        Some("Strong motion recorders.\nSupport contract renewed yearly.")
    );
}

#[test]
fn makers_load_from_a_directory_in_path_order() {
    let makers: Vec<Maker> =
        store::load_records(&fixture_path("makers"), "maker.toml").expect("load makers");
    let names = makers.iter().map(|m| m.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["Kinemetrics", "Quanterra"]);
}

#[test]
fn model_fixture_round_trips_with_sorted_versions() {
    let model: Model = check_store_cycle("model.toml");
    assert_eq!(model.versions["s"].name, "Q330S");

    let text = encode_string(&model).expect("encode model");
    let hr = text.find("[version.hr]").expect("hr section");
    let s = text.find("[version.s]").expect("s section");
    assert!(hr < s);
}

#[test]
fn provider_fixture_round_trips_with_quoted_service_key() {
    let provider: Provider = check_store_cycle("provider.toml");
    assert_eq!(
        provider.services["Test Service"].contact.as_deref(),
        Some("0800 123123")
    );
    assert_eq!(provider.ranges[0].networks.len(), 2);

    let text = encode_string(&provider).expect("encode provider");
    assert!(text.contains("[service.\"Test Service\"]\n"));
    assert!(text.contains("[[range]]\n"));
}

#[test]
fn network_fixture_round_trips() {
    let network: Network = check_store_cycle("network.toml");
    assert_eq!(network.display_name(), "Wellington");
    assert_eq!(network.linknets[0].name, "KAIK to WEL");
    assert_eq!(network.devices[1].uninstalled, Some(false));

    let text = encode_string(&network).expect("encode network");
    assert_eq!(text.matches("\n[[device]]\n").count(), 2);
}

#[test]
fn empty_entities_document_their_collections() {
    let text = encode_string(&Provider::default()).expect("encode provider");
    assert!(text.contains("#[service.value]\n"));
    assert!(text.contains("#[[range]]\n"));
    let decoded: Provider = toml::from_str(&text).expect("placeholders are comments");
    assert_eq!(decoded, Provider::default());

    let text = encode_string(&Network::default()).expect("encode network");
    assert_eq!(text.matches("#[[device]]").count(), 1);
    assert_eq!(text.matches("#[[linknet]]").count(), 1);
}
