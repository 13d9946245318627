//! The fixed, ordered list of categories a model can predict.
//!
//! Output index `i` of the model corresponds to catalog entry `i`. The
//! ordering is established when the model is exported and must never be
//! reordered afterwards, or every prediction would be silently mislabeled.

/// The 101 Food-101 category names, in the exact order the bundled model
/// was exported with.
pub const FOOD101_LABELS: [&str; 101] = [
    "apple_pie",
    "baby_back_ribs",
    "baklava",
    "beef_carpaccio",
    "beef_tartare",
    "beet_salad",
    "beignets",
    "bibimbap",
    "bread_pudding",
    "breakfast_burrito",
    "bruschetta",
    "caesar_salad",
    "cannoli",
    "caprese_salad",
    "carrot_cake",
    "ceviche",
    "cheesecake",
    "cheese_plate",
    "chicken_curry",
    "chicken_quesadilla",
    "chicken_wings",
    "chocolate_cake",
    "chocolate_mousse",
    "churros",
    "clam_chowder",
    "club_sandwich",
    "crab_cakes",
    "creme_brulee",
    "croque_madame",
    "cup_cakes",
    "deviled_eggs",
    "donuts",
    "dumplings",
    "edamame",
    "eggs_benedict",
    "escargots",
    "falafel",
    "filet_mignon",
    "fish_and_chips",
    "foie_gras",
    "french_fries",
    "french_onion_soup",
    "french_toast",
    "fried_calamari",
    "fried_rice",
    "frozen_yogurt",
    "garlic_bread",
    "gnocchi",
    "greek_salad",
    "grilled_cheese_sandwich",
    "grilled_salmon",
    "guacamole",
    "gyoza",
    "hamburger",
    "hot_and_sour_soup",
    "hot_dog",
    "huevos_rancheros",
    "hummus",
    "ice_cream",
    "lasagna",
    "lobster_bisque",
    "lobster_roll_sandwich",
    "macaroni_and_cheese",
    "macarons",
    "miso_soup",
    "mussels",
    "nachos",
    "omelette",
    "onion_rings",
    "oysters",
    "pad_thai",
    "paella",
    "pancakes",
    "panna_cotta",
    "peking_duck",
    "pho",
    "pizza",
    "pork_chop",
    "poutine",
    "prime_rib",
    "pulled_pork_sandwich",
    "ramen",
    "ravioli",
    "red_velvet_cake",
    "risotto",
    "samosa",
    "sashimi",
    "scallops",
    "seaweed_salad",
    "shrimp_and_grits",
    "spaghetti_bolognese",
    "spaghetti_carbonara",
    "spring_rolls",
    "steak",
    "strawberry_shortcake",
    "sushi",
    "tacos",
    "takoyaki",
    "tiramisu",
    "tuna_tartare",
    "waffles",
];

/// An ordered, index-addressable set of category labels.
///
/// Labels use a lowercase, underscore-separated convention (`"fried_rice"`).
/// The catalog is immutable once constructed; classifiers hold it behind an
/// `Arc` and map score-vector indices straight into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    labels: Vec<String>,
}

impl Catalog {
    /// Creates a catalog from an ordered list of labels.
    ///
    /// The order must match the order of the model's output vector.
    pub fn new(labels: Vec<impl Into<String>>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// The Food-101 catalog used by the bundled model.
    pub fn food101() -> Self {
        Self::new(FOOD101_LABELS.to_vec())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the label at `index`, or `None` if out of range.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn food101_has_101_entries() {
        let catalog = Catalog::food101();
        assert_eq!(catalog.len(), 101);
    }

    #[test]
    fn food101_labels_are_unique() {
        let unique: HashSet<&str> = FOOD101_LABELS.iter().copied().collect();
        assert_eq!(unique.len(), FOOD101_LABELS.len());
    }

    #[test]
    fn food101_labels_use_snake_case() {
        let catalog = Catalog::food101();
        for label in catalog.iter() {
            assert!(!label.is_empty());
            assert!(
                label
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
                "unexpected character in label {:?}",
                label
            );
        }
    }

    #[test]
    fn index_lookup_matches_export_order() {
        let catalog = Catalog::food101();
        assert_eq!(catalog.label(0), Some("apple_pie"));
        assert_eq!(catalog.label(44), Some("fried_rice"));
        assert_eq!(catalog.label(100), Some("waffles"));
        assert_eq!(catalog.label(101), None);
    }
}
