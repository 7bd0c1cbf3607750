//! Demo-roster generation from a built-in name pool.
//!
//! For trying the tool without a real participant list. Names are picked
//! randomly without replacement so a demo roster never starts with
//! duplicates; requests larger than the pool are padded with numbered
//! guest entries.

use rand::Rng;
use teamspirit_types::Participant;

/// Built-in pool of demo names. The generator picks randomly without
/// replacement from this list.
const NAME_POOL: &[&str] = &[
    "Alice Johnson", "Bob Smith", "Charlie Brown", "Diana Prince",
    "Evan Wright", "Fiona Gallagher", "George Martin", "Hannah Lee",
    "Ian Malcolm", "Julia Child", "Kofi Mensah", "Leila Haddad",
    "Marcus Webb", "Nina Petrova", "Oscar Reyes", "Priya Sharma",
    "Quentin Ford", "Rosa Delgado", "Samir Patel", "Tara O'Brien",
    "Umar Farouk", "Vera Lindqvist", "Wendell Price", "Xiomara Cruz",
    "Yusuf Demir", "Zoe Clarke", "Anton Kovac", "Bree Calloway",
    "Cedric Osei", "Dalia Nasser", "Elena Sorokina", "Felix Braun",
    "Grace Mwangi", "Hiro Tanaka", "Ingrid Dahl", "Jonas Keller",
    "Keiko Sato", "Liam Doyle", "Mei Chen", "Noor Al-Amin",
];

/// Generate `count` demo names, unique while the pool lasts.
pub fn generate_demo_names(rng: &mut impl Rng, count: usize) -> Vec<String> {
    let pool_len = NAME_POOL.len();
    let take = count.min(pool_len);

    // Fisher-Yates partial shuffle: create index array, shuffle first `take` elements.
    let mut indices: Vec<usize> = (0..pool_len).collect();
    for i in 0..take {
        let j = rng.random_range(i..pool_len);
        indices.swap(i, j);
    }

    let mut names: Vec<String> = indices
        .iter()
        .take(take)
        .filter_map(|&index| NAME_POOL.get(index).map(|name| String::from(*name)))
        .collect();

    // Pool exhausted: pad with numbered guests, still unique.
    let mut guest: u32 = 0;
    while names.len() < count {
        guest = guest.saturating_add(1);
        names.push(format!("Guest {guest}"));
    }

    names
}

/// Generate a full demo roster with fresh participant ids.
pub fn generate_demo_roster(rng: &mut impl Rng, count: usize) -> Vec<Participant> {
    generate_demo_names(rng, count)
        .into_iter()
        .map(Participant::new)
        .collect()
}
