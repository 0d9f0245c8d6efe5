use bistro_shared::menu::MenuItem;
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

/// Picks one candidate among equally valid items for a slot.
pub trait Chooser {
    fn choose<'a>(&mut self, candidates: &[&'a MenuItem]) -> Option<&'a MenuItem>;
}

/// Uniform random pick.
pub struct RandomChooser {
    rng: StdRng,
}

impl RandomChooser {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomChooser {
    fn default() -> Self {
        Self::new()
    }
}

impl Chooser for RandomChooser {
    fn choose<'a>(&mut self, candidates: &[&'a MenuItem]) -> Option<&'a MenuItem> {
        candidates.choose(&mut self.rng).copied()
    }
}

/// Always the first candidate, in catalog order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstChooser;

impl Chooser for FirstChooser {
    fn choose<'a>(&mut self, candidates: &[&'a MenuItem]) -> Option<&'a MenuItem> {
        candidates.first().copied()
    }
}

/// Seeded when a seed is configured, entropy-backed otherwise.
pub fn chooser_for_seed(seed: Option<u64>) -> Box<dyn Chooser + Send> {
    match seed {
        Some(seed) => Box::new(RandomChooser::seeded(seed)),
        None => Box::new(RandomChooser::new()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use bistro_shared::menu::ItemType;

    use super::*;

    fn items(n: usize) -> Vec<MenuItem> {
        (0..n)
            .map(|i| MenuItem {
                id: i.to_string(),
                name: format!("item {i}"),
                price: 1.0,
                allergens: BTreeSet::new(),
                item_type: ItemType::Snack,
                available_days: BTreeSet::new(),
                available_times: BTreeSet::new(),
            })
            .collect()
    }

    #[test]
    fn test_empty_candidates() {
        assert!(RandomChooser::seeded(1).choose(&[]).is_none());
        assert!(FirstChooser.choose(&[]).is_none());
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let items = items(20);
        let refs = items.iter().collect::<Vec<_>>();

        let mut a = RandomChooser::seeded(42);
        let mut b = RandomChooser::seeded(42);
        for _ in 0..10 {
            assert_eq!(
                a.choose(&refs).map(|i| &i.id),
                b.choose(&refs).map(|i| &i.id)
            );
        }
    }

    #[test]
    fn test_first_chooser() {
        let items = items(3);
        let refs = items.iter().collect::<Vec<_>>();

        assert_eq!(FirstChooser.choose(&refs).map(|i| i.id.as_str()), Some("0"));
    }
}
