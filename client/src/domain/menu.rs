//! Bar menu items and the validation rules of the "add menu item" form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::validation::{FieldErrors, optional_text, optional_web_url};
use crate::domain::{BarId, MenuItemId};

/// Maximum accepted item name length.
pub const NAME_MAX: usize = 100;
/// Maximum accepted item description length.
pub const DESCRIPTION_MAX: usize = 500;
/// Upper bound (inclusive) for the alcohol percentage.
pub const ALCOHOL_PERCENTAGE_MAX: f64 = 100.0;

/// Menu section an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuItemType {
    /// Dishes and snacks.
    #[default]
    Food,
    /// Non-alcoholic drinks.
    Drink,
    /// Alcoholic drinks; these carry an alcohol percentage.
    Alcohol,
}

impl MenuItemType {
    /// Wire representation used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Drink => "drink",
            Self::Alcohol => "alcohol",
        }
    }

    /// Path segment of the filtered menu endpoint (`bars/{id}/menu/{segment}`).
    #[must_use]
    pub const fn menu_segment(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Drink => "drinks",
            Self::Alcohol => "alcohol",
        }
    }
}

impl FromStr for MenuItemType {
    type Err = MenuItemValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "drink" | "drinks" => Ok(Self::Drink),
            "alcohol" => Ok(Self::Alcohol),
            _ => Err(MenuItemValidationError::UnknownType),
        }
    }
}

/// Field validation failures for menu item input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItemValidationError {
    /// Name was blank.
    NameRequired,
    /// Name exceeds [`NAME_MAX`].
    NameTooLong,
    /// Description exceeds [`DESCRIPTION_MAX`].
    DescriptionTooLong,
    /// Price was blank.
    PriceRequired,
    /// Price is not a finite non-negative number.
    PriceInvalid,
    /// Photo URL is not an absolute `http(s)` URL.
    PhotoUrlInvalid,
    /// Type was not one of food, drink or alcohol.
    UnknownType,
    /// Alcoholic items need an alcohol percentage.
    AlcoholPercentageRequired,
    /// Alcohol percentage is not in (0, 100].
    AlcoholPercentageOutOfRange,
    /// Volume is not a positive whole number of millilitres.
    VolumeInvalid,
}

impl fmt::Display for MenuItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameRequired => write!(f, "Name is required"),
            Self::NameTooLong => write!(f, "Name must be at most {NAME_MAX} characters"),
            Self::DescriptionTooLong => {
                write!(f, "Description must be at most {DESCRIPTION_MAX} characters")
            }
            Self::PriceRequired => write!(f, "Price is required"),
            Self::PriceInvalid => write!(f, "Price must be a valid positive number"),
            Self::PhotoUrlInvalid => write!(f, "Photo URL must be a valid http(s) URL"),
            Self::UnknownType => write!(f, "Type must be food, drink or alcohol"),
            Self::AlcoholPercentageRequired => {
                write!(f, "Alcohol percentage is required for alcoholic items")
            }
            Self::AlcoholPercentageOutOfRange => {
                write!(f, "Alcohol percentage must be greater than 0 and at most 100")
            }
            Self::VolumeInvalid => write!(f, "Volume must be a positive number of millilitres"),
        }
    }
}

impl std::error::Error for MenuItemValidationError {}

/// Raw "add menu item" form input.
#[derive(Debug, Clone, Default)]
pub struct MenuItemInput {
    /// Item name.
    pub name: String,
    /// Optional description.
    pub description: String,
    /// Price as typed, e.g. `"4.50"` or `"4,50"`.
    pub price: String,
    /// Optional photo URL.
    pub photo_url: String,
    /// Selected menu section.
    pub item_type: MenuItemType,
    /// Alcohol percentage as typed; only read for alcoholic items.
    pub alcohol_percentage: String,
    /// Optional volume in millilitres.
    pub volume: String,
}

/// Validated menu item ready to be sent to the API.
///
/// ## Invariants
/// - `alcohol_percentage` is `Some` iff `item_type` is [`MenuItemType::Alcohol`],
///   and then lies in (0, 100].
/// - `price` is finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDraft {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo_url: Option<String>,
    #[serde(rename = "type")]
    item_type: MenuItemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    alcohol_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    volume: Option<u32>,
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

impl MenuItemDraft {
    /// Validate form input field by field.
    ///
    /// The alcohol percentage is only inspected for alcoholic items; other
    /// types ignore whatever the field contains.
    pub fn try_from_input(input: &MenuItemInput) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = input.name.trim();
        if name.is_empty() {
            errors.insert("name", MenuItemValidationError::NameRequired);
        } else if name.chars().count() > NAME_MAX {
            errors.insert("name", MenuItemValidationError::NameTooLong);
        }

        let description = optional_text(&input.description);
        if description
            .as_ref()
            .is_some_and(|text| text.chars().count() > DESCRIPTION_MAX)
        {
            errors.insert("description", MenuItemValidationError::DescriptionTooLong);
        }

        let price = if input.price.trim().is_empty() {
            errors.insert("price", MenuItemValidationError::PriceRequired);
            None
        } else {
            let parsed = parse_decimal(&input.price).filter(|price| *price >= 0.0);
            if parsed.is_none() {
                errors.insert("price", MenuItemValidationError::PriceInvalid);
            }
            parsed
        };

        let photo_url = match optional_web_url(&input.photo_url) {
            Ok(url) => url.map(String::from),
            Err(_) => {
                errors.insert("photoUrl", MenuItemValidationError::PhotoUrlInvalid);
                None
            }
        };

        let alcohol_percentage = if input.item_type == MenuItemType::Alcohol {
            Self::validate_alcohol_percentage(&input.alcohol_percentage, &mut errors)
        } else {
            None
        };

        let volume = match optional_text(&input.volume) {
            None => None,
            Some(text) => {
                let parsed = text.parse::<u32>().ok().filter(|volume| *volume > 0);
                if parsed.is_none() {
                    errors.insert("volume", MenuItemValidationError::VolumeInvalid);
                }
                parsed
            }
        };

        errors.into_result(|| Self {
            name: name.to_owned(),
            description,
            price: price.unwrap_or_default(),
            photo_url,
            item_type: input.item_type,
            alcohol_percentage,
            volume,
        })
    }

    fn validate_alcohol_percentage(raw: &str, errors: &mut FieldErrors) -> Option<f64> {
        if raw.trim().is_empty() {
            errors.insert(
                "alcoholPercentage",
                MenuItemValidationError::AlcoholPercentageRequired,
            );
            return None;
        }
        let parsed = parse_decimal(raw)
            .filter(|percentage| *percentage > 0.0 && *percentage <= ALCOHOL_PERCENTAGE_MAX);
        if parsed.is_none() {
            errors.insert(
                "alcoholPercentage",
                MenuItemValidationError::AlcoholPercentageOutOfRange,
            );
        }
        parsed
    }

    /// Item name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Item price.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Menu section.
    pub fn item_type(&self) -> MenuItemType {
        self.item_type
    }

    /// Alcohol percentage for alcoholic items.
    pub fn alcohol_percentage(&self) -> Option<f64> {
        self.alcohol_percentage
    }

    /// Volume in millilitres.
    pub fn volume(&self) -> Option<u32> {
        self.volume
    }
}

/// Menu item as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Item identifier.
    #[serde(alias = "_id")]
    pub id: MenuItemId,
    /// Owning bar.
    #[serde(alias = "bar")]
    pub bar_id: BarId,
    /// Item name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Price in the venue's currency.
    pub price: f64,
    /// Optional photo URL.
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Menu section.
    #[serde(rename = "type")]
    pub item_type: MenuItemType,
    /// Alcohol percentage for alcoholic items.
    #[serde(default)]
    pub alcohol_percentage: Option<f64>,
    /// Volume in millilitres.
    #[serde(default)]
    pub volume: Option<u32>,
    /// Whether the venue currently serves the item.
    #[serde(default = "default_available", alias = "isAvailable")]
    pub available: bool,
}

const fn default_available() -> bool {
    true
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn food_input() -> MenuItemInput {
        MenuItemInput {
            name: "Loaded fries".to_owned(),
            description: "With cheese".to_owned(),
            price: "6.50".to_owned(),
            item_type: MenuItemType::Food,
            ..MenuItemInput::default()
        }
    }

    #[rstest]
    fn alcohol_without_percentage_fails(food_input: MenuItemInput) {
        let input = MenuItemInput {
            item_type: MenuItemType::Alcohol,
            alcohol_percentage: String::new(),
            ..food_input
        };
        let errors = MenuItemDraft::try_from_input(&input).expect_err("missing percentage");
        assert_eq!(
            errors.get("alcoholPercentage"),
            Some("Alcohol percentage is required for alcoholic items")
        );
    }

    #[rstest]
    #[case("")]
    #[case("not a number")]
    #[case("250")]
    #[case("-4")]
    fn food_ignores_alcohol_percentage_content(food_input: MenuItemInput, #[case] raw: &str) {
        let input = MenuItemInput {
            alcohol_percentage: raw.to_owned(),
            ..food_input
        };
        let draft = MenuItemDraft::try_from_input(&input).expect("food passes");
        assert_eq!(draft.alcohol_percentage(), None);
    }

    #[rstest]
    #[case("0", false)]
    #[case("0.1", true)]
    #[case("5,2", true)]
    #[case("100", true)]
    #[case("100.01", false)]
    #[case("abc", false)]
    fn alcohol_percentage_range(food_input: MenuItemInput, #[case] raw: &str, #[case] ok: bool) {
        let input = MenuItemInput {
            item_type: MenuItemType::Alcohol,
            alcohol_percentage: raw.to_owned(),
            ..food_input
        };
        assert_eq!(MenuItemDraft::try_from_input(&input).is_ok(), ok);
    }

    #[rstest]
    #[case("", MenuItemValidationError::PriceRequired)]
    #[case("free", MenuItemValidationError::PriceInvalid)]
    #[case("-1", MenuItemValidationError::PriceInvalid)]
    fn price_validation(
        food_input: MenuItemInput,
        #[case] raw: &str,
        #[case] expected: MenuItemValidationError,
    ) {
        let input = MenuItemInput {
            price: raw.to_owned(),
            ..food_input
        };
        let errors = MenuItemDraft::try_from_input(&input).expect_err("bad price");
        assert_eq!(errors.get("price"), Some(expected.to_string().as_str()));
    }

    #[rstest]
    fn collects_every_failing_field() {
        let input = MenuItemInput {
            photo_url: "nope".to_owned(),
            volume: "0".to_owned(),
            ..MenuItemInput::default()
        };
        let errors = MenuItemDraft::try_from_input(&input).expect_err("invalid");
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["name", "photoUrl", "price", "volume"]);
    }

    #[rstest]
    fn draft_serialises_wire_shape(food_input: MenuItemInput) {
        let input = MenuItemInput {
            name: "  IPA ".to_owned(),
            item_type: MenuItemType::Alcohol,
            alcohol_percentage: "5.5".to_owned(),
            volume: "500".to_owned(),
            photo_url: "https://cdn.example.com/ipa.png".to_owned(),
            ..food_input
        };
        let draft = MenuItemDraft::try_from_input(&input).expect("valid");
        let value = serde_json::to_value(&draft).expect("serialise");
        assert_eq!(value["name"], "IPA");
        assert_eq!(value["type"], "alcohol");
        assert_eq!(value["alcoholPercentage"], 5.5);
        assert_eq!(value["volume"], 500);
        assert_eq!(value["photoUrl"], "https://cdn.example.com/ipa.png");
    }

    #[rstest]
    #[case("Drinks", MenuItemType::Drink)]
    #[case(" alcohol ", MenuItemType::Alcohol)]
    fn parses_type_names(#[case] raw: &str, #[case] expected: MenuItemType) {
        assert_eq!(raw.parse::<MenuItemType>(), Ok(expected));
    }

    #[rstest]
    fn decodes_api_menu_item_with_defaults() {
        let item: MenuItem = serde_json::from_value(serde_json::json!({
            "_id": "m-1",
            "bar": "b-1",
            "name": "Lemonade",
            "price": 3.0,
            "type": "drink",
        }))
        .expect("decode");
        assert!(item.available);
        assert_eq!(item.item_type, MenuItemType::Drink);
    }
}
