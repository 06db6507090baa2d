use crate::net::{LinkId, NetId, NodeId, PathCache};

#[test]
fn path_cache_stores_named_and_resolved_entries_independently() {
    let mut cache = PathCache::default();
    cache.insert_named("C", "A", vec![NodeId(2), NodeId(1), NodeId(0)], vec![LinkId(1), LinkId(0)]);

    let (nodes, links) = cache.named_route("C", "A").expect("named entry");
    assert_eq!(nodes, &[NodeId(2), NodeId(1), NodeId(0)]);
    assert_eq!(links, &[LinkId(1), LinkId(0)]);
    assert!(cache.named_route("A", "C").is_none());
    assert!(cache.route(NetId(1), NetId(2)).is_none());

    cache.insert_resolved(NetId(1), NetId(2), vec![NodeId(2), NodeId(0)], vec![LinkId(1)]);
    assert_eq!(cache.route(NetId(1), NetId(2)).expect("route"), &[NodeId(2), NodeId(0)]);
    assert_eq!(cache.links(NetId(1), NetId(2)).expect("links"), &[LinkId(1)]);
    assert!(cache.route(NetId(2), NetId(1)).is_none());

    assert_eq!(cache.named_len(), 1);
    assert_eq!(cache.resolved_len(), 1);
}

#[test]
fn path_cache_clear_empties_all_four_tables() {
    let mut cache = PathCache::default();
    cache.insert_named("B", "A", vec![NodeId(1), NodeId(0)], vec![LinkId(0)]);
    cache.insert_resolved(NetId(1), NetId(2), vec![NodeId(1), NodeId(0)], vec![LinkId(0)]);

    cache.clear();

    assert!(cache.named_route("B", "A").is_none());
    assert!(cache.route(NetId(1), NetId(2)).is_none());
    assert!(cache.links(NetId(1), NetId(2)).is_none());
    assert_eq!(cache.named_len(), 0);
    assert_eq!(cache.resolved_len(), 0);
}
