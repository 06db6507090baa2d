use crate::demo::default_scenario;
use crate::sim::ScenarioSpec;

#[test]
fn scenario_spec_parses_minimal_json_with_defaults() {
    let raw = r#"
    {
        "schema_version": 1,
        "edge": { "mels": 1 },
        "cloud": { "vms": 1 },
        "devices": [ { "name": "sensor_1" } ],
        "apps": [ {
            "name": "app_1",
            "device": "sensor_1",
            "mel": "MEL.1",
            "vm": "VM.1",
            "data_rate_ms": 500,
            "start_ms": 0,
            "stop_ms": 1000,
            "edgelet_mi": 100,
            "cloudlet_mi": 200
        } ]
    }
    "#;
    let spec: ScenarioSpec = serde_json::from_str(raw).expect("parse scenario");
    assert_eq!(spec.schema_version, 1);
    assert!(spec.meta.is_none());
    assert_eq!(spec.edge.mels, 1);
    assert!(spec.edge.mips.is_none());
    assert!(spec.sdwan.parallel_link_gbps.is_none());
    assert!(spec.devices[0].battery_capacity.is_none());
    assert!(spec.apps[0].device_output_bytes.is_none());
    assert!(spec.apps[0].mel_output_bytes.is_none());
}

#[test]
fn scenario_spec_round_trips_through_json() {
    let spec = default_scenario();
    let raw = serde_json::to_string(&spec).expect("serialize");
    let back: ScenarioSpec = serde_json::from_str(&raw).expect("reparse");
    assert_eq!(back.schema_version, spec.schema_version);
    assert_eq!(back.apps.len(), spec.apps.len());
    assert_eq!(back.devices.len(), spec.devices.len());
}

#[test]
fn builtin_scenario_exercises_abstract_and_direct_routing() {
    let spec = default_scenario();
    assert_eq!(spec.apps.len(), 2);
    assert!(spec.apps.iter().any(|a| a.mel.ends_with(".*")));
    assert!(spec.apps.iter().any(|a| !a.mel.ends_with(".*")));
    assert!(spec.edge.mels >= 2);
}
