use cesium_ordmap::{
    Config,
    GeometricalLevelGenerator,
    Seeding,
    SkipList,
    ZipTree,
};
use rand::{
    rngs::SmallRng,
    seq::SliceRandom,
    SeedableRng,
};

fn shuffled(count: u32, seed: u64) -> Vec<u32> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut keys: Vec<u32> = (0..count).collect();
    keys.shuffle(&mut rng);
    keys
}

#[test]
fn test_duplicate_policies_differ() {
    let mut list = SkipList::new();
    let mut tree = ZipTree::new();
    for value in ["v1", "v2"] {
        list.insert("key", value);
        tree.insert("key", value);
    }
    assert_eq!(list.get("key"), Some(&"v1"));
    assert_eq!(tree.get("key"), Some(&"v2"));
    assert_eq!(list.len(), 1);
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_round_trip_and_emptying() {
    let keys = shuffled(2_000, 11);
    let mut list = SkipList::new();
    let mut tree = ZipTree::new();
    for key in keys.iter() {
        assert!(list.insert(*key, key.to_string()));
        assert_eq!(tree.insert(*key, key.to_string()), None);
    }
    for key in keys.iter() {
        assert_eq!(list.get(key), Some(&key.to_string()));
        assert_eq!(tree.get(key), Some(&key.to_string()));
    }

    let removal = shuffled(2_000, 12);
    for key in removal.iter() {
        assert_eq!(list.remove(key), Some(key.to_string()));
        assert_eq!(tree.remove(key), Some(key.to_string()));
    }

    assert!(list.is_empty());
    assert_eq!(list.level(), 0);
    assert_eq!(list.len_at_level(0), 0);
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), 0);

    // absent keys stay no-ops once empty
    assert_eq!(list.remove(&0), None);
    assert_eq!(tree.remove(&0), None);
    assert_eq!(tree.len(), 0);
}

#[test]
fn test_bulk_load_both_ways() {
    let keys = shuffled(500, 3);
    let tree: ZipTree<u32, u32> = keys.iter().map(|k| (*k, k * 3)).collect();

    let mut list = SkipList::new();
    list.extend_from_tree(&tree);
    assert!(list.iter().eq(tree.iter()));

    let mut copy = ZipTree::with_generator(GeometricalLevelGenerator::seeded(usize::MAX, 0.5, 5));
    copy.extend_from_list(&list);
    assert!(copy.iter().eq(list.iter()));
    assert_eq!(copy.len(), 500);
}

#[test]
fn test_keyed_lists_share_a_level_profile() {
    let config = Config::default().with_max_level(12);
    let mut first = SkipList::with_config(config);
    let mut second = SkipList::with_config(config);
    for key in shuffled(3_000, 1) {
        first.insert(key, ());
    }
    for key in shuffled(3_000, 2) {
        second.insert(key, ());
    }

    assert_eq!(first.level(), second.level());
    for level in 0..=first.max_level() {
        assert_eq!(first.len_at_level(level), second.len_at_level(level));
    }
}

#[test]
fn test_stream_list_keeps_order() {
    let config = Config::default().with_seeding(Seeding::Stream);
    let mut list = SkipList::with_config(config);
    for key in shuffled(1_000, 8) {
        list.insert(key, ());
    }
    let keys: Vec<u32> = list.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, (0..1_000).collect::<Vec<_>>());
}
