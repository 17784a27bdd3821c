//! Sprite classification by texture name
//!
//! Rules are checked top to bottom; the first rule with a keyword contained
//! in the lowercased name wins. Keywords cover English and Russian names.

/// What a map element becomes in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Wall,
    Exit,
    Oxygen,
    Enemy,
    PlayerSpawn,
}

/// One row of the classification table
#[derive(Debug, Clone, Copy)]
pub struct ClassifyRule {
    pub category: Category,
    /// Lowercase substrings, any of which selects `category`
    pub keywords: &'static [&'static str],
}

impl ClassifyRule {
    pub fn matches(&self, lowercase_name: &str) -> bool {
        self.keywords.iter().any(|k| lowercase_name.contains(k))
    }
}

/// Default rule table
pub const RULES: &[ClassifyRule] = &[
    ClassifyRule {
        category: Category::Wall,
        keywords: &["wall", "стен"],
    },
    ClassifyRule {
        category: Category::Exit,
        keywords: &["door", "exit", "двер", "выход"],
    },
    ClassifyRule {
        category: Category::Oxygen,
        // "oxigen" is a misspelling found in shipped assets
        keywords: &["oxygen", "oxigen", "кисл"],
    },
    ClassifyRule {
        category: Category::Enemy,
        keywords: &["enemy", "враг"],
    },
    ClassifyRule {
        category: Category::PlayerSpawn,
        keywords: &["player", "spawn", "игрок"],
    },
];

/// Classify with an explicit rule table
pub fn classify_with(rules: &[ClassifyRule], name: &str) -> Option<Category> {
    let name = name.to_lowercase();
    rules.iter().find(|r| r.matches(&name)).map(|r| r.category)
}

/// Classify with the default table
pub fn classify(name: &str) -> Option<Category> {
    classify_with(RULES, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_names() {
        assert_eq!(classify("brick_wall_02.png"), Some(Category::Wall));
        assert_eq!(classify("Door"), Some(Category::Exit));
        assert_eq!(classify("OXYGEN_tank"), Some(Category::Oxygen));
        assert_eq!(classify("oxigen"), Some(Category::Oxygen));
        assert_eq!(classify("enemy_blob"), Some(Category::Enemy));
        assert_eq!(classify("player_start"), Some(Category::PlayerSpawn));
    }

    #[test]
    fn test_russian_names() {
        assert_eq!(classify("Стена"), Some(Category::Wall));
        assert_eq!(classify("дверь"), Some(Category::Exit));
        assert_eq!(classify("КИСЛОРОД"), Some(Category::Oxygen));
    }

    #[test]
    fn test_first_match_wins() {
        // Both "wall" and "door" appear; wall is listed first
        assert_eq!(classify("wall_door_frame"), Some(Category::Wall));
    }

    #[test]
    fn test_unmatched_ignored() {
        assert_eq!(classify("floor_tile"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn test_custom_table() {
        let rules = [ClassifyRule {
            category: Category::Exit,
            keywords: &["hatch"],
        }];
        assert_eq!(classify_with(&rules, "Escape_Hatch"), Some(Category::Exit));
        assert_eq!(classify_with(&rules, "wall"), None);
    }
}
