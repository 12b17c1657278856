//! Readable generated list names (`adjective-animal`).

use uuid::Uuid;

const ADJECTIVES: &[&str] = &[
    "amber", "brave", "calm", "clever", "curious", "dapper", "eager", "fancy", "gentle", "happy",
    "jolly", "keen", "lively", "lucky", "merry", "nimble", "proud", "quick", "quiet", "rapid",
    "shiny", "sunny", "swift", "witty",
];

const ANIMALS: &[&str] = &[
    "badger", "beaver", "crane", "dolphin", "falcon", "ferret", "gecko", "heron", "ibex", "koala",
    "lemur", "lynx", "marmot", "narwhal", "otter", "owl", "panda", "puffin", "quokka", "raven",
    "seal", "tapir", "walrus", "yak",
];

/// Attempts at a fresh random name before falling back to a numeric suffix.
const MAX_RANDOM_ATTEMPTS: usize = 32;

fn random_name() -> String {
    let bytes = Uuid::new_v4().into_bytes();
    let adjective = ADJECTIVES[usize::from(bytes[0]) % ADJECTIVES.len()];
    let animal = ANIMALS[usize::from(bytes[1]) % ANIMALS.len()];
    format!("{adjective}-{animal}")
}

/// Generates a name for which `is_taken` returns false.
pub fn generate_list_name(is_taken: impl Fn(&str) -> bool) -> String {
    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let candidate = random_name();
        if !is_taken(&candidate) {
            return candidate;
        }
    }

    let base = random_name();
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_shape() {
        let name = generate_list_name(|_| false);
        let (adjective, animal) = name.split_once('-').unwrap();
        assert!(ADJECTIVES.contains(&adjective));
        assert!(ANIMALS.contains(&animal));
    }

    #[test]
    fn test_collision_falls_back_to_suffix() {
        // Every plain name is taken
        let name = generate_list_name(|candidate| candidate.matches('-').count() == 1);
        assert_eq!(name.matches('-').count(), 2);
        assert!(name.ends_with("-2"));
    }
}
