use crate::broker::{LookupError, Registry};
use crate::net::NetId;
use crate::sim::EntityId;

#[test]
fn registry_resolves_names_to_ids_stably() {
    let mut registry = Registry::default();
    registry.register_datacenter(EntityId(1), "edge");
    registry.register_vm("MEL.1", NetId(5), EntityId(1));
    registry.register_device("sensor_1", EntityId(9));

    // Same id on every call within a run.
    assert_eq!(registry.vm_id("MEL.1").expect("vm"), NetId(5));
    assert_eq!(registry.vm_id("MEL.1").expect("vm"), NetId(5));
    assert_eq!(registry.device_id("sensor_1").expect("device"), EntityId(9));
    assert!(registry.vm_names().any(|n| n == "MEL.1"));
}

#[test]
fn unknown_names_fail_with_typed_errors() {
    let registry = Registry::default();
    assert_eq!(
        registry.vm_id("MEL.9").expect_err("unknown vm"),
        LookupError::UnknownVm("MEL.9".to_string())
    );
    assert_eq!(
        registry.device_id("ghost").expect_err("unknown device"),
        LookupError::UnknownDevice("ghost".to_string())
    );
}

#[test]
fn datacenter_of_vm_distinguishes_unresolved_from_id_zero() {
    let mut registry = Registry::default();
    registry.register_datacenter(EntityId(3), "cloud");
    // NetId(0) is a perfectly valid endpoint id, not a sentinel.
    registry.register_vm("VM.0", NetId(0), EntityId(3));

    assert_eq!(registry.datacenter_of_vm(NetId(0)), Some(EntityId(3)));
    assert_eq!(registry.datacenter_of_vm(NetId(999)), None);
    assert_eq!(registry.datacenter_name(EntityId(3)), Some("cloud"));
    assert_eq!(registry.datacenter_name(EntityId(8)), None);
}
