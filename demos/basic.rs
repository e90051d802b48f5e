//! Examples of using the radix map
use radix_map::{Natural, RadixMap, Reversed};

fn main() {
    // Create a new map with string keys
    let mut map = RadixMap::<String, i32>::new();

    // Insert some values
    map.insert("romane".to_string(), 1);
    map.insert("romanus".to_string(), 2);
    map.insert("romulus".to_string(), 3);
    map.insert("rubens".to_string(), 4);

    // Existing values are never overwritten
    let (_, inserted) = map.insert("romane".to_string(), 100);
    assert!(!inserted);
    assert_eq!(map.get(&"romane".to_string()), Some(&1));
    assert_eq!(map.get(&"missing".to_string()), None);

    // Entries come out in lexicographic order
    for (key, value) in &map {
        println!("{} -> {}", key, value);
    }

    // Indexed access that inserts a default on a miss
    *map.get_or_insert_default("rubicon".to_string()) += 5;
    assert_eq!(map[&"rubicon".to_string()], 5);

    // Prefix queries
    let roman: Vec<_> = map.prefix_match(&"roma".to_string()).map(|(k, _)| k.clone()).collect();
    println!("roma* -> {:?}", roman);
    let longest = map.longest_match(&"rubicons".to_string());
    println!("longest prefix of rubicons -> {:?}", longest.key());

    // Bulk removal
    let removed = map.remove_if(|key| key.starts_with("rom"));
    println!("removed {} keys, {} left", removed, map.len());

    // Byte keys and a reversed order
    let mut bytes = RadixMap::with_order(Reversed(Natural));
    bytes.insert(vec![1u8, 2, 3], "a");
    bytes.insert(vec![1u8, 2], "b");
    bytes.insert(vec![2u8], "c");
    println!("{:?}", bytes);

    map.check_structure().expect("tree is well formed");
}
