//! 场景装配
//!
//! 把 `ScenarioSpec` 组装成可运行的引擎：broker、边缘/云数据中心、
//! SD-WAN 与 IoT 设备，并完成名字注册与候选路径下发。

use crate::broker::{AppDescriptor, AppId, Broker, IdGen};
use crate::dc::{Datacenter, SdWan, SdnController};
use crate::iot::{Battery, IoTDevice};
use crate::mel::RoundRobinMelPolicy;
use crate::net::NetId;
use crate::sim::{Engine, EntityId, ScenarioSpec, SimError, SimTime};
use crate::topo::{CloudOpts, EdgeOpts, WanOpts, build_cloud_dc, build_edge_dc, build_sdwan};

/// 组装完成的场景。
pub struct BuiltScenario {
    pub engine: Engine,
    pub broker: EntityId,
    pub edge_dc: EntityId,
    pub cloud_dc: EntityId,
    pub sdwan: EntityId,
    pub devices: Vec<EntityId>,
}

/// 内置演示场景：一个抽象 MEL 应用 + 一个直连 MEL 应用。
pub fn default_scenario() -> ScenarioSpec {
    serde_json::from_value(serde_json::json!({
        "schema_version": 1,
        "meta": { "description": "two sensors, abstract + direct MEL routing" },
        "edge": { "mels": 2 },
        "cloud": { "vms": 1 },
        "sdwan": { "parallel_link_gbps": [10, 8] },
        "devices": [
            { "name": "sensor_1" },
            { "name": "sensor_2" }
        ],
        "apps": [
            {
                "name": "sense_temperature",
                "device": "sensor_1",
                "mel": "MEL.*",
                "vm": "VM.1",
                "data_rate_ms": 500,
                "start_ms": 0,
                "stop_ms": 5000,
                "edgelet_mi": 500,
                "cloudlet_mi": 1500
            },
            {
                "name": "sense_humidity",
                "device": "sensor_2",
                "mel": "MEL.1",
                "vm": "VM.1",
                "data_rate_ms": 1000,
                "start_ms": 1000,
                "stop_ms": 6000,
                "edgelet_mi": 300,
                "cloudlet_mi": 900
            }
        ]
    }))
    .expect("builtin scenario is valid")
}

/// 按场景组装引擎与全部实体。
pub fn build_scenario(spec: &ScenarioSpec) -> Result<BuiltScenario, SimError> {
    let mut engine = Engine::default();
    let flow_ids = IdGen::default();
    let compute_ids = IdGen::default();
    let workflow_ids = IdGen::default();
    let net_ids = IdGen::default();

    let broker = engine.add_entity(|id| {
        Broker::new(
            id,
            "broker",
            Box::new(RoundRobinMelPolicy::default()),
            flow_ids.clone(),
            compute_ids.clone(),
        )
    });

    // 网络端点 id：MEL、云 VM、设备共用一个 id 空间。
    let mels: Vec<(NetId, String)> = (1..=spec.edge.mels)
        .map(|i| (NetId(net_ids.next()), format!("MEL.{i}")))
        .collect();
    let vms: Vec<(NetId, String)> = (1..=spec.cloud.vms)
        .map(|i| (NetId(net_ids.next()), format!("VM.{i}")))
        .collect();
    let device_nets: Vec<NetId> = spec.devices.iter().map(|_| NetId(net_ids.next())).collect();

    // 边缘域：MEL 挂主机，设备挂接入交换机。
    let edge_name = spec
        .edge
        .name
        .clone()
        .unwrap_or_else(|| "Edge_DC".to_string());
    let mut edge = build_edge_dc(&EdgeOpts {
        mels: spec.edge.mels,
        link_gbps: spec.edge.link_gbps.unwrap_or(1),
        link_latency: SimTime::from_micros(spec.edge.link_latency_us.unwrap_or(50)),
    });
    for ((net, _), host) in mels.iter().zip(&edge.mel_hosts) {
        edge.topology.attach(*net, *host);
    }
    for net in &device_nets {
        edge.topology.attach(*net, edge.iot_access);
    }
    let mut edge_controller = SdnController::new("edge_sdn", edge.topology);
    edge_controller.set_new_paths(&edge.paths)?;
    let edge_dc = engine.add_entity(|id| {
        Datacenter::new(
            id,
            edge_name.clone(),
            spec.edge.mips.unwrap_or(1_250),
            broker,
            edge_controller,
        )
    });

    // 云域
    let cloud_name = spec
        .cloud
        .name
        .clone()
        .unwrap_or_else(|| "Cloud_DC".to_string());
    let mut cloud = build_cloud_dc(&CloudOpts {
        vms: spec.cloud.vms,
        link_gbps: spec.cloud.link_gbps.unwrap_or(10),
        link_latency: SimTime::from_micros(spec.cloud.link_latency_us.unwrap_or(20)),
    });
    for ((net, _), host) in vms.iter().zip(&cloud.vm_hosts) {
        cloud.topology.attach(*net, *host);
    }
    let mut cloud_controller = SdnController::new("cloud_sdn", cloud.topology);
    cloud_controller.set_new_paths(&cloud.paths)?;
    let cloud_dc = engine.add_entity(|id| {
        Datacenter::new(
            id,
            cloud_name.clone(),
            spec.cloud.mips.unwrap_or(10_000),
            broker,
            cloud_controller,
        )
    });

    // SD-WAN：边缘端点挂边缘网关，云端点挂云网关。
    let mut wan = build_sdwan(&WanOpts {
        parallel_link_gbps: spec
            .sdwan
            .parallel_link_gbps
            .clone()
            .unwrap_or_else(|| vec![10]),
        link_latency: SimTime::from_micros(spec.sdwan.link_latency_us.unwrap_or(2_000)),
    });
    for (net, _) in &mels {
        wan.topology.attach(*net, wan.edge_gateway);
    }
    for (net, _) in &vms {
        wan.topology.attach(*net, wan.cloud_gateway);
    }
    let mut wan_controller = SdnController::new("sdwan_ctrl", wan.topology);
    wan_controller.set_new_paths(&wan.paths)?;
    let sdwan = engine.add_entity(|id| SdWan::new(id, "sdwan", broker, wan_controller));

    // 设备实体
    let mut devices = Vec::with_capacity(spec.devices.len());
    for (ds, net) in spec.devices.iter().zip(&device_nets) {
        let battery = Battery::new(
            ds.battery_capacity.unwrap_or(1_000.0),
            ds.sensing_drain.unwrap_or(0.1),
        );
        let name = ds.name.clone();
        let net = *net;
        let device = engine.add_entity(|id| {
            IoTDevice::new(
                id,
                name,
                net,
                broker,
                battery,
                flow_ids.clone(),
                workflow_ids.clone(),
            )
        });
        devices.push(device);
    }

    // broker 装配：数据中心清单、设备注册、应用目录。
    {
        let b = engine
            .entity_mut(broker)
            .as_any_mut()
            .downcast_mut::<Broker>()
            .expect("broker entity");
        b.add_datacenter(edge_dc, edge_name, mels);
        b.add_datacenter(cloud_dc, cloud_name, vms);
        for (ds, device) in spec.devices.iter().zip(&devices) {
            b.add_iot_device(ds.name.clone(), *device);
        }
        let apps = spec
            .apps
            .iter()
            .enumerate()
            .map(|(i, a)| {
                AppDescriptor::new(
                    AppId(i as u64 + 1),
                    a.name.clone(),
                    a.device.clone(),
                    a.mel.clone(),
                    a.vm.clone(),
                    SimTime::from_millis(a.data_rate_ms),
                    SimTime::from_millis(a.start_ms),
                    SimTime::from_millis(a.stop_ms),
                    a.device_output_bytes.unwrap_or(200),
                    a.edgelet_mi,
                    a.cloudlet_mi,
                    a.mel_output_bytes.unwrap_or(100),
                )
            })
            .collect();
        b.submit_apps(apps);
    }
    {
        let d = engine
            .entity_mut(edge_dc)
            .as_any_mut()
            .downcast_mut::<Datacenter>()
            .expect("edge datacenter entity");
        d.set_sdwan(sdwan);
    }

    Ok(BuiltScenario {
        engine,
        broker,
        edge_dc,
        cloud_dc,
        sdwan,
        devices,
    })
}
