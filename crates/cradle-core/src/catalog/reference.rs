//! Reference products with laboratory-measured contaminant levels.
//!
//! These entries come from the 2019 Healthy Babies Bright Futures baby food
//! testing and are inserted verbatim: their measured values feed the score
//! directly and their lab provenance is kept.

use chrono::NaiveDate;

use crate::entities::{CatalogEntry, ContaminantLevels, LabResult, Product, Provenance};
use crate::enums::Category;
use crate::errors::CoreError;

pub const REFERENCE_LAB_NAME: &str = "Brooks Applied Labs";
pub const REFERENCE_REPORT_URL: &str = "https://www.healthybabyfood.org";
pub const REFERENCE_TEST_YEAR: i32 = 2019;

/// `(year, month, day)` of the reference testing.
const REFERENCE_TEST_DATE: (i32, u32, u32) = (2019, 10, 17);

#[derive(Debug, Clone, Copy)]
pub struct ReferenceProduct {
    pub name: &'static str,
    pub brand: &'static str,
    pub category: Category,
    pub barcode: &'static str,
    pub is_organic: bool,
    pub description: &'static str,
    pub levels: ContaminantLevels,
}

const fn reference(
    name: &'static str,
    brand: &'static str,
    category: Category,
    barcode: &'static str,
    is_organic: bool,
    description: &'static str,
    levels: ContaminantLevels,
) -> ReferenceProduct {
    ReferenceProduct {
        name,
        brand,
        category,
        barcode,
        is_organic,
        description,
        levels,
    }
}

/// The fixed reference table (lead, arsenic, cadmium, mercury in ppb).
pub const REFERENCE_PRODUCTS: [ReferenceProduct; 20] = [
    reference(
        "Earth's Best Organic Whole Grain Rice Cereal",
        "Earth's Best",
        Category::Cereal,
        "023923330016",
        true,
        "Single-grain organic rice cereal for infants.",
        ContaminantLevels::new(5.1, 96.0, 2.4, 0.6),
    ),
    reference(
        "Gerber Single Grain Rice Cereal",
        "Gerber",
        Category::Cereal,
        "015000048792",
        false,
        "Iron-fortified single grain rice cereal.",
        ContaminantLevels::new(3.9, 119.0, 2.7, 0.8),
    ),
    reference(
        "Beech-Nut Rice Cereal",
        "Beech-Nut",
        Category::Cereal,
        "052200034225",
        false,
        "Stage 1 rice cereal.",
        ContaminantLevels::new(2.6, 87.0, 1.8, 0.4),
    ),
    reference(
        "Gerber Oatmeal Cereal",
        "Gerber",
        Category::Cereal,
        "015000048808",
        false,
        "Single grain oatmeal cereal.",
        ContaminantLevels::new(1.9, 12.0, 3.1, 0.2),
    ),
    reference(
        "Happy Baby Organic Superfood Puffs Purple Carrot & Blueberry",
        "Happy Baby",
        Category::Snack,
        "852697001354",
        true,
        "Rice-based puffs with carrot and blueberry.",
        ContaminantLevels::new(4.8, 72.0, 3.6, 0.3),
    ),
    reference(
        "Gerber Lil' Crunchies Veggie Dip",
        "Gerber",
        Category::Snack,
        "015000074302",
        false,
        "Baked corn snack for crawlers.",
        ContaminantLevels::new(3.2, 48.0, 4.1, 0.2),
    ),
    reference(
        "Earth's Best Organic Sunny Days Snack Bars",
        "Earth's Best",
        Category::Snack,
        "023923203136",
        true,
        "Soft-baked fruit and oat bars.",
        ContaminantLevels::new(2.1, 18.0, 5.6, 0.1),
    ),
    reference(
        "Beech-Nut Classics Sweet Potatoes",
        "Beech-Nut",
        Category::Puree,
        "052200146379",
        false,
        "Stage 1 sweet potato puree.",
        ContaminantLevels::new(6.7, 9.4, 3.2, 0.2),
    ),
    reference(
        "Gerber 2nd Foods Carrots",
        "Gerber",
        Category::Puree,
        "015000074319",
        false,
        "Stage 2 carrot puree.",
        ContaminantLevels::new(4.1, 11.0, 7.9, 0.1),
    ),
    reference(
        "Earth's Best Organic Sweet Potatoes",
        "Earth's Best",
        Category::Puree,
        "023923201019",
        true,
        "Stage 2 organic sweet potato puree.",
        ContaminantLevels::new(5.3, 7.6, 2.9, 0.2),
    ),
    reference(
        "Gerber 1st Foods Apple",
        "Gerber",
        Category::Puree,
        "015000071240",
        false,
        "Stage 1 apple puree.",
        ContaminantLevels::new(1.2, 8.5, 1.1, 0.1),
    ),
    reference(
        "Beech-Nut Naturals Bananas",
        "Beech-Nut",
        Category::Puree,
        "052200034584",
        false,
        "Stage 1 banana puree.",
        ContaminantLevels::new(0.6, 2.1, 0.4, 0.05),
    ),
    reference(
        "Plum Organics Pear, Spinach & Pea",
        "Plum Organics",
        Category::Puree,
        "890180001207",
        true,
        "Stage 2 organic fruit and vegetable pouch.",
        ContaminantLevels::new(1.8, 4.3, 2.6, 0.1),
    ),
    reference(
        "Parent's Choice Grape Juice",
        "Parent's Choice",
        Category::Juice,
        "681131133019",
        false,
        "100% grape juice for toddlers.",
        ContaminantLevels::new(8.9, 6.2, 0.5, 0.1),
    ),
    reference(
        "Gerber 100% Apple Juice",
        "Gerber",
        Category::Juice,
        "015000074906",
        false,
        "Apple juice with added vitamin C.",
        ContaminantLevels::new(5.7, 7.1, 0.3, 0.05),
    ),
    reference(
        "Up & Up Pear Juice",
        "Up & Up",
        Category::Juice,
        "492000321019",
        false,
        "100% pear juice.",
        ContaminantLevels::new(11.2, 4.4, 0.6, 0.1),
    ),
    reference(
        "Gerber Chicken & Rice Dinner",
        "Gerber",
        Category::Meal,
        "015000076320",
        false,
        "Stage 3 chicken and rice dinner.",
        ContaminantLevels::new(2.4, 31.0, 2.2, 0.4),
    ),
    reference(
        "Beech-Nut Vegetable Lasagna",
        "Beech-Nut",
        Category::Meal,
        "052200018515",
        false,
        "Toddler vegetable lasagna.",
        ContaminantLevels::new(3.6, 14.0, 3.8, 0.3),
    ),
    reference(
        "Sprout Organic Sweet Potato Apple Spinach",
        "Sprout Organics",
        Category::Puree,
        "850001040014",
        true,
        "Stage 2 organic vegetable and fruit pouch.",
        ContaminantLevels::new(3.9, 6.8, 2.7, 0.1),
    ),
    reference(
        "Happy Baby Organic Teethers Blueberry & Purple Carrot",
        "Happy Baby",
        Category::Snack,
        "852697001507",
        true,
        "Rice-based teething wafers.",
        ContaminantLevels::new(2.3, 64.0, 1.2, 0.2),
    ),
];

impl ReferenceProduct {
    /// Convert into a catalog entry carrying the reference lab provenance.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the stored levels or test date are invalid.
    pub fn to_entry(&self) -> Result<CatalogEntry, CoreError> {
        let (year, month, day) = REFERENCE_TEST_DATE;
        let test_date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            CoreError::Validation(format!("invalid reference test date {year}-{month}-{day}"))
        })?;

        Ok(CatalogEntry {
            product: Product {
                name: self.name.to_string(),
                brand: self.brand.to_string(),
                category: self.category,
                barcode: self.barcode.to_string(),
                description: self.description.to_string(),
                is_organic: self.is_organic,
                provenance: Provenance::Reference {
                    test_year: REFERENCE_TEST_YEAR,
                },
            },
            lab_result: LabResult::new(
                REFERENCE_LAB_NAME,
                test_date,
                Some(REFERENCE_REPORT_URL.to_string()),
                self.levels,
            )?,
        })
    }
}

/// All reference products as catalog entries, in table order.
///
/// # Errors
///
/// Returns `CoreError` if any table row is invalid.
pub fn reference_entries() -> Result<Vec<CatalogEntry>, CoreError> {
    REFERENCE_PRODUCTS.iter().map(ReferenceProduct::to_entry).collect()
}
