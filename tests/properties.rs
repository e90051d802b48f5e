//! Randomized checks against `BTreeMap` as a model.
use quickcheck::{quickcheck, Arbitrary, Gen};
use radix_map::RadixMap;
use std::collections::BTreeMap;

/// Short keys over a tiny alphabet, so that random keys share prefixes and
/// exercise splits and merges.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Key(String);

impl Arbitrary for Key {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 6;
        let key = (0..len)
            .map(|_| *g.choose(&['a', 'b', 'c']).unwrap_or(&'a'))
            .collect();
        Key(key)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Key))
    }
}

#[derive(Clone, Debug)]
enum Op {
    Insert(Key, u8),
    Erase(Key),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(Key::arbitrary(g), u8::arbitrary(g))
        } else {
            Op::Erase(Key::arbitrary(g))
        }
    }
}

/// Applies `ops` to both maps, checking the tree's invariants after each step.
fn run(ops: &[Op]) -> Result<(RadixMap<String, u8>, BTreeMap<String, u8>), String> {
    let mut map = RadixMap::new();
    let mut model = BTreeMap::new();

    for op in ops {
        match op {
            Op::Insert(Key(key), value) => {
                let (cursor, inserted) = map.insert(key.clone(), *value);
                let expected_inserted = !model.contains_key(key);
                let stored = *model.entry(key.clone()).or_insert(*value);
                if inserted != expected_inserted || cursor.value() != Some(&stored) {
                    return Err(format!("insert {:?} disagreed with model", key));
                }
            }
            Op::Erase(Key(key)) => {
                if map.erase(key) != model.remove(key).is_some() {
                    return Err(format!("erase {:?} disagreed with model", key));
                }
            }
        }
        map.check_structure()
            .map_err(|e| format!("after {:?}: {}", op, e))?;
        if map.len() != model.len() {
            return Err(format!("after {:?}: len {} != {}", op, map.len(), model.len()));
        }
    }
    Ok((map, model))
}

fn longest_prefix<'a>(model: &'a BTreeMap<String, u8>, key: &str) -> Option<&'a String> {
    model
        .keys()
        .filter(|k| key.starts_with(k.as_str()))
        .max_by_key(|k| k.len())
}

quickcheck! {
    fn prop_matches_model(ops: Vec<Op>) -> bool {
        match run(&ops) {
            Ok((map, model)) => map.iter().eq(model.iter()),
            Err(_) => false,
        }
    }

    fn prop_find_after_erase(ops: Vec<Op>, probe: Key) -> bool {
        let (mut map, model) = match run(&ops) {
            Ok(maps) => maps,
            Err(_) => return false,
        };
        let found = map.find(&probe.0).value().copied() == model.get(&probe.0).copied();
        map.erase(&probe.0);
        found && map.find(&probe.0).is_end() && map.check_structure().is_ok()
    }

    fn prop_prefix_match(ops: Vec<Op>, probe: Key) -> bool {
        let (map, model) = match run(&ops) {
            Ok(maps) => maps,
            Err(_) => return false,
        };
        let found: Vec<&String> = map.prefix_match(&probe.0).map(|(k, _)| k).collect();
        let expected: Vec<&String> = model.keys().filter(|k| k.starts_with(&probe.0)).collect();
        found == expected
    }

    fn prop_greedy_contains_prefix(ops: Vec<Op>, probe: Key) -> bool {
        let (map, _) = match run(&ops) {
            Ok(maps) => maps,
            Err(_) => return false,
        };
        let greedy: Vec<&String> = map.greedy_match(&probe.0).map(|(k, _)| k).collect();
        map.prefix_match(&probe.0).all(|(k, _)| greedy.contains(&k))
    }

    fn prop_longest_match(ops: Vec<Op>, probe: Key) -> bool {
        let (map, model) = match run(&ops) {
            Ok(maps) => maps,
            Err(_) => return false,
        };
        map.longest_match(&probe.0).key() == longest_prefix(&model, &probe.0)
    }

    fn prop_remove_if(ops: Vec<Op>, unit: Key) -> bool {
        let (mut map, mut model) = match run(&ops) {
            Ok(maps) => maps,
            Err(_) => return false,
        };
        let pred = |k: &String| k.ends_with(unit.0.as_str());
        let before = model.len();
        model.retain(|k, _| !pred(k));
        map.remove_if(|k| pred(k)) == before - model.len()
            && map.iter().eq(model.iter())
            && map.check_structure().is_ok()
    }
}
