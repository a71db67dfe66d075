use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::quantity::{lenient_quantity, Quantity};
use crate::error::{DatakickError, Result};

// ---------------------------------------------------------------------------
// Product — a single item from the Datakick database
// ---------------------------------------------------------------------------

/// Read-only view of one product as returned by the service.
///
/// Every known attribute is a typed field with a same-named accessor; an
/// attribute the service left out reads as `None`. Numeric attributes are
/// [`Quantity`] values, so free text such as `"about 8"` is kept as sent.
/// The full payload, including fields this crate does not model, is kept and
/// available through [`as_dict`](Product::as_dict) and [`get`](Product::get).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Product {
    fields: ProductFields,
    images: Vec<String>,
    raw: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
struct ProductFields {
    // -- identifying --
    #[serde(deserialize_with = "lenient_string")]
    gtin14: Option<String>,

    // -- descriptive --
    #[serde(deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    brand_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    size: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    ingredients: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    serving_size: Option<String>,
    #[serde(deserialize_with = "lenient_quantity")]
    servings_per_container: Option<Quantity>,

    // -- nutritional --
    #[serde(deserialize_with = "lenient_quantity")]
    calories: Option<Quantity>,
    #[serde(deserialize_with = "lenient_quantity")]
    fat_calories: Option<Quantity>,
    #[serde(deserialize_with = "lenient_quantity")]
    fat: Option<Quantity>,
    #[serde(deserialize_with = "lenient_quantity")]
    saturated_fat: Option<Quantity>,
    #[serde(deserialize_with = "lenient_quantity")]
    trans_fat: Option<Quantity>,
    #[serde(deserialize_with = "lenient_quantity")]
    polyunsaturated_fat: Option<Quantity>,
    #[serde(deserialize_with = "lenient_quantity")]
    monounsaturated_fat: Option<Quantity>,
    #[serde(deserialize_with = "lenient_quantity")]
    cholesterol: Option<Quantity>,
    #[serde(deserialize_with = "lenient_quantity")]
    sodium: Option<Quantity>,
    #[serde(deserialize_with = "lenient_quantity")]
    potassium: Option<Quantity>,
    #[serde(deserialize_with = "lenient_quantity")]
    carbohydrate: Option<Quantity>,
    #[serde(deserialize_with = "lenient_quantity")]
    fiber: Option<Quantity>,
    #[serde(deserialize_with = "lenient_quantity")]
    sugars: Option<Quantity>,
    #[serde(deserialize_with = "lenient_quantity")]
    protein: Option<Quantity>,
    #[serde(deserialize_with = "lenient_quantity")]
    alcohol_by_volume: Option<Quantity>,

    // -- books --
    #[serde(deserialize_with = "lenient_string")]
    author: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    publisher: Option<String>,
    #[serde(deserialize_with = "lenient_quantity")]
    pages: Option<Quantity>,
}

impl Product {
    /// Build a product from one decoded JSON object.
    ///
    /// `images` is rewritten from `[{"url": ...}, ...]` to a flat list of URL
    /// strings before anything else reads the payload.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut raw = match value {
            Value::Object(map) => map,
            other => {
                return Err(DatakickError::InvalidResponse(format!(
                    "expected a product object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let images = normalize_images(raw.remove("images"));
        raw.insert(
            "images".to_string(),
            Value::Array(images.iter().cloned().map(Value::String).collect()),
        );

        let fields = ProductFields::deserialize(Value::Object(raw.clone()))?;
        Ok(Self {
            fields,
            images,
            raw,
        })
    }

    /// Independent copy of every attribute, unknown fields included.
    pub fn as_dict(&self) -> Map<String, Value> {
        self.raw.clone()
    }

    /// Raw lookup for attributes without a dedicated accessor.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    /// The barcode (ean/upc).
    pub fn gtin14(&self) -> Option<&str> {
        self.fields.gtin14.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.name.as_deref()
    }

    pub fn brand_name(&self) -> Option<&str> {
        self.fields.brand_name.as_deref()
    }

    /// Net weight or volume, e.g. `20oz` or `500g`.
    pub fn size(&self) -> Option<&str> {
        self.fields.size.as_deref()
    }

    pub fn ingredients(&self) -> Option<&str> {
        self.fields.ingredients.as_deref()
    }

    pub fn serving_size(&self) -> Option<&str> {
        self.fields.serving_size.as_deref()
    }

    pub fn servings_per_container(&self) -> Option<&Quantity> {
        self.fields.servings_per_container.as_ref()
    }

    pub fn calories(&self) -> Option<&Quantity> {
        self.fields.calories.as_ref()
    }

    /// Calories from fat.
    pub fn fat_calories(&self) -> Option<&Quantity> {
        self.fields.fat_calories.as_ref()
    }

    /// Fat in grams.
    pub fn fat(&self) -> Option<&Quantity> {
        self.fields.fat.as_ref()
    }

    /// Saturated fat in grams.
    pub fn saturated_fat(&self) -> Option<&Quantity> {
        self.fields.saturated_fat.as_ref()
    }

    /// Trans fat in grams.
    pub fn trans_fat(&self) -> Option<&Quantity> {
        self.fields.trans_fat.as_ref()
    }

    /// Polyunsaturated fat in grams.
    pub fn polyunsaturated_fat(&self) -> Option<&Quantity> {
        self.fields.polyunsaturated_fat.as_ref()
    }

    /// Monounsaturated fat in grams.
    pub fn monounsaturated_fat(&self) -> Option<&Quantity> {
        self.fields.monounsaturated_fat.as_ref()
    }

    /// Cholesterol in milligrams.
    pub fn cholesterol(&self) -> Option<&Quantity> {
        self.fields.cholesterol.as_ref()
    }

    /// Sodium in milligrams.
    pub fn sodium(&self) -> Option<&Quantity> {
        self.fields.sodium.as_ref()
    }

    /// Potassium in milligrams.
    pub fn potassium(&self) -> Option<&Quantity> {
        self.fields.potassium.as_ref()
    }

    /// Carbohydrates in grams.
    pub fn carbohydrate(&self) -> Option<&Quantity> {
        self.fields.carbohydrate.as_ref()
    }

    /// Fiber in grams.
    pub fn fiber(&self) -> Option<&Quantity> {
        self.fields.fiber.as_ref()
    }

    /// Sugars in grams.
    pub fn sugars(&self) -> Option<&Quantity> {
        self.fields.sugars.as_ref()
    }

    /// Protein in grams.
    pub fn protein(&self) -> Option<&Quantity> {
        self.fields.protein.as_ref()
    }

    /// Alcohol by volume, as a percentage.
    pub fn alcohol_by_volume(&self) -> Option<&Quantity> {
        self.fields.alcohol_by_volume.as_ref()
    }

    pub fn author(&self) -> Option<&str> {
        self.fields.author.as_deref()
    }

    pub fn publisher(&self) -> Option<&str> {
        self.fields.publisher.as_deref()
    }

    pub fn pages(&self) -> Option<&Quantity> {
        self.fields.pages.as_ref()
    }

    /// URLs of every image attached to the product, in service order.
    pub fn images(&self) -> &[String] {
        &self.images
    }
}

impl TryFrom<Value> for Product {
    type Error = DatakickError;

    fn try_from(value: Value) -> Result<Self> {
        Product::from_value(value)
    }
}

impl From<Product> for Value {
    fn from(product: Product) -> Self {
        Value::Object(product.raw)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Accepts `{"url": "..."}` objects and bare strings; anything else is dropped.
fn normalize_images(images: Option<Value>) -> Vec<String> {
    let Some(Value::Array(items)) = images else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(url) => Some(url),
            Value::Object(mut obj) => match obj.remove("url") {
                Some(Value::String(url)) => Some(url),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
