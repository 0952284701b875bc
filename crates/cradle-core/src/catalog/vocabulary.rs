//! Per-category ingredient vocabulary and product naming.

use crate::enums::Category;

const PUREE_INGREDIENTS: &[&str] = &[
    "Apple",
    "Banana",
    "Pear",
    "Sweet Potato",
    "Carrot",
    "Peas",
    "Green Beans",
    "Butternut Squash",
    "Mango",
    "Blueberry",
];

const CEREAL_INGREDIENTS: &[&str] = &[
    "Rice",
    "Brown Rice",
    "Oatmeal",
    "Multigrain",
    "Quinoa",
    "Barley",
];

const SNACK_INGREDIENTS: &[&str] = &[
    "Rice Puffs",
    "Yogurt Melts",
    "Teething Wafers",
    "Veggie Straws",
    "Sweet Potato Puffs",
    "Oat Bars",
];

const JUICE_INGREDIENTS: &[&str] = &[
    "Apple Juice",
    "Grape Juice",
    "Pear Juice",
    "White Grape Juice",
    "Mixed Fruit Juice",
    "Carrot Juice Blend",
];

const MEAL_INGREDIENTS: &[&str] = &[
    "Chicken & Rice",
    "Turkey & Vegetables",
    "Pasta Primavera",
    "Beef Stew",
    "Vegetable Lasagna",
    "Mac & Cheese",
];

/// Base ingredients a synthesized product in `category` can be built around.
#[must_use]
pub const fn ingredients(category: Category) -> &'static [&'static str] {
    match category {
        Category::Puree => PUREE_INGREDIENTS,
        Category::Cereal => CEREAL_INGREDIENTS,
        Category::Snack => SNACK_INGREDIENTS,
        Category::Juice => JUICE_INGREDIENTS,
        Category::Meal => MEAL_INGREDIENTS,
    }
}

/// How the base ingredient is dressed up in the product name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameTemplate {
    Plain,
    WithBanana,
    Organic,
    Medley,
}

impl NameTemplate {
    pub const ALL: [Self; 4] = [Self::Plain, Self::WithBanana, Self::Organic, Self::Medley];

    #[must_use]
    pub fn apply(self, ingredient: &str) -> String {
        match self {
            Self::Plain => ingredient.to_string(),
            // "Banana & Banana" reads wrong; keep the plain name instead.
            Self::WithBanana if ingredient.contains("Banana") => ingredient.to_string(),
            Self::WithBanana => format!("{ingredient} & Banana"),
            Self::Organic => format!("Organic {ingredient}"),
            Self::Medley => format!("{ingredient} Medley"),
        }
    }

    #[must_use]
    pub const fn is_organic(self) -> bool {
        matches!(self, Self::Organic)
    }
}

/// Assemble `"{brand} [Stage N ]{templated ingredient}"`.
#[must_use]
pub fn product_name(
    brand: &str,
    stage: Option<u8>,
    template: NameTemplate,
    ingredient: &str,
) -> String {
    let body = template.apply(ingredient);
    match stage {
        Some(stage) => format!("{brand} Stage {stage} {body}"),
        None => format!("{brand} {body}"),
    }
}
