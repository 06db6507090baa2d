use crate::net::{NetId, NodeId, RoutingError, SdnRoutingPolicy, Topology};
use crate::sim::SimTime;

fn named_paths(paths: &[&[&str]]) -> Vec<Vec<String>> {
    paths
        .iter()
        .map(|p| p.iter().map(|s| s.to_string()).collect())
        .collect()
}

// A -- B -- C, all switches, one link per hop.
fn line_topology() -> (Topology, NodeId, NodeId, NodeId) {
    let mut t = Topology::default();
    let a = t.add_switch("A");
    let b = t.add_switch("B");
    let c = t.add_switch("C");
    t.connect(a, b, 100, SimTime::ZERO);
    t.connect(b, c, 100, SimTime::ZERO);
    (t, a, b, c)
}

#[test]
fn set_new_paths_caches_reversed_nodes_links_and_key() {
    let (topo, a, b, c) = line_topology();
    let mut policy = SdnRoutingPolicy::default();
    policy
        .set_new_paths(&topo, &named_paths(&[&["A", "B", "C"]]))
        .expect("set paths");

    // Supplied A->B->C, cached under the reversed endpoints (C, A).
    let route = policy
        .build_route(&topo, c, a, NetId(10), NetId(20))
        .expect("build route");
    assert_eq!(route, vec![c, b, a]);

    // Link list is reversed too: hop C->B first, then B->A.
    let ab = topo.links_between(a, b)[0];
    let bc = topo.links_between(b, c)[0];
    assert_eq!(policy.get_links(NetId(10), NetId(20)).expect("links"), &[bc, ab]);
    assert_eq!(
        policy.get_route(NetId(10), NetId(20)).expect("route"),
        &[c, b, a]
    );
}

#[test]
fn build_route_memoizes_per_id_pair() {
    let (topo, a, _b, c) = line_topology();
    let mut policy = SdnRoutingPolicy::default();
    policy
        .set_new_paths(&topo, &named_paths(&[&["A", "B", "C"]]))
        .expect("set paths");

    let first = policy
        .build_route(&topo, c, a, NetId(1), NetId(2))
        .expect("first call");
    let first_links = policy.get_links(NetId(1), NetId(2)).expect("links").to_vec();

    // Second call with node endpoints whose *name* pair has no backing
    // path: an id-cache hit must short-circuit before any name lookup.
    let second = policy
        .build_route(&topo, a, c, NetId(1), NetId(2))
        .expect("memoized call");
    assert_eq!(first, second);
    assert_eq!(policy.get_links(NetId(1), NetId(2)).expect("links"), first_links);
}

#[test]
fn build_route_without_backing_named_path_is_fatal() {
    let (topo, a, _b, c) = line_topology();
    let mut policy = SdnRoutingPolicy::default();
    policy
        .set_new_paths(&topo, &named_paths(&[&["A", "B", "C"]]))
        .expect("set paths");

    // Only the C->A orientation was declared.
    let err = policy
        .build_route(&topo, a, c, NetId(3), NetId(4))
        .expect_err("missing path");
    assert_eq!(
        err,
        RoutingError::MissingPath {
            src: "A".to_string(),
            dst: "C".to_string(),
        }
    );
}

#[test]
fn set_new_paths_rejects_missing_link_between_adjacent_nodes() {
    let mut t = Topology::default();
    t.add_switch("A");
    t.add_switch("C");
    let mut policy = SdnRoutingPolicy::default();
    let err = policy
        .set_new_paths(&t, &named_paths(&[&["A", "C"]]))
        .expect_err("no link declared");
    assert_eq!(
        err,
        RoutingError::MissingLink {
            from: "A".to_string(),
            to: "C".to_string(),
        }
    );
}

#[test]
fn set_new_paths_rejects_unknown_node_names() {
    let (topo, _a, _b, _c) = line_topology();
    let mut policy = SdnRoutingPolicy::default();
    let err = policy
        .set_new_paths(&topo, &named_paths(&[&["A", "Z"]]))
        .expect_err("unknown node");
    assert_eq!(err, RoutingError::UnknownNode("Z".to_string()));
}

#[test]
fn parallel_links_pick_highest_effective_bandwidth() {
    let mut t = Topology::default();
    let x = t.add_switch("X");
    let y = t.add_switch("Y");
    let wide = t.connect(x, y, 100, SimTime::ZERO);
    let narrow = t.connect(x, y, 80, SimTime::ZERO);

    let mut policy = SdnRoutingPolicy::default();
    policy
        .set_new_paths(&t, &named_paths(&[&["X", "Y"]]))
        .expect("set paths");
    let (_, links) = policy.cache().named_route("Y", "X").expect("named entry");
    assert_eq!(links, &[wide]);

    // One registered channel on the wide link halves it before comparison:
    // 100/2 = 50 < 80, so the narrow link wins the re-evaluation.
    t.register_channel(wide);
    assert_eq!(t.link(wide).effective_bandwidth(), 100);
    policy
        .set_new_paths(&t, &named_paths(&[&["X", "Y"]]))
        .expect("set paths again");
    let (_, links) = policy.cache().named_route("Y", "X").expect("named entry");
    assert_eq!(links, &[narrow]);
}

#[test]
fn host_endpoints_force_single_channel_in_the_formula() {
    let mut t = Topology::default();
    let h = t.add_host("H");
    let s = t.add_switch("S");
    let busy = t.connect(h, s, 100, SimTime::ZERO);
    let idle = t.connect(h, s, 90, SimTime::ZERO);
    // Two registered channels would cut the 100 link to a third between
    // switches, but a host endpoint pins the divisor at 1 on both candidates.
    t.register_channel(busy);
    t.register_channel(busy);

    let mut policy = SdnRoutingPolicy::default();
    policy
        .set_new_paths(&t, &named_paths(&[&["H", "S"]]))
        .expect("set paths");
    let (_, links) = policy.cache().named_route("S", "H").expect("named entry");
    assert_eq!(links, &[busy]);
    let _ = idle;
}

#[test]
fn set_new_paths_clears_previously_resolved_entries() {
    let (topo, a, _b, c) = line_topology();
    let mut policy = SdnRoutingPolicy::default();
    policy
        .set_new_paths(&topo, &named_paths(&[&["A", "B", "C"]]))
        .expect("set paths");
    policy
        .build_route(&topo, c, a, NetId(1), NetId(2))
        .expect("populate id cache");
    assert!(policy.get_route(NetId(1), NetId(2)).is_some());

    policy
        .set_new_paths(&topo, &named_paths(&[&["A", "B", "C"]]))
        .expect("repopulate");
    assert!(policy.get_route(NetId(1), NetId(2)).is_none());
    assert!(policy.get_links(NetId(1), NetId(2)).is_none());
}
