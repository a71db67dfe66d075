use super::quantity::Quantity;

// ---------------------------------------------------------------------------
// ProductUpdate — fields sent when adding or modifying a product
// ---------------------------------------------------------------------------

/// Attributes to create or overwrite on a product.
///
/// All fields are optional. A field is sent only when it is `Some` and not
/// "empty": blank strings and numeric zero are skipped, the same as `None`.
/// Numeric attributes take a [`Quantity`], the same type
/// [`Product`](super::Product) reads them back as.
///
/// ```
/// use datakick_sdk::ProductUpdate;
///
/// let update = ProductUpdate {
///     name: Some("Peanut Butter".into()),
///     calories: Some(0.0.into()),
///     ..Default::default()
/// };
/// assert_eq!(update.to_query_pairs(), vec![("name", "Peanut Butter".to_string())]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub brand_name: Option<String>,
    /// Net weight or volume, e.g. `20oz` or `500g`.
    pub size: Option<String>,
    pub ingredients: Option<String>,
    pub serving_size: Option<String>,
    pub servings_per_container: Option<Quantity>,
    pub calories: Option<Quantity>,
    pub fat_calories: Option<Quantity>,
    pub fat: Option<Quantity>,
    pub saturated_fat: Option<Quantity>,
    pub trans_fat: Option<Quantity>,
    pub polyunsaturated_fat: Option<Quantity>,
    pub monounsaturated_fat: Option<Quantity>,
    pub cholesterol: Option<Quantity>,
    pub sodium: Option<Quantity>,
    pub potassium: Option<Quantity>,
    pub carbohydrate: Option<Quantity>,
    pub fiber: Option<Quantity>,
    pub sugars: Option<Quantity>,
    pub protein: Option<Quantity>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub pages: Option<Quantity>,
    pub alcohol_by_volume: Option<Quantity>,
}

impl ProductUpdate {
    /// Query parameters for the PUT request, in declaration order.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        push_text(&mut pairs, "name", &self.name);
        push_text(&mut pairs, "brand_name", &self.brand_name);
        push_text(&mut pairs, "size", &self.size);
        push_text(&mut pairs, "ingredients", &self.ingredients);
        push_text(&mut pairs, "serving_size", &self.serving_size);
        push_quantity(&mut pairs, "servings_per_container", &self.servings_per_container);
        push_quantity(&mut pairs, "calories", &self.calories);
        push_quantity(&mut pairs, "fat_calories", &self.fat_calories);
        push_quantity(&mut pairs, "fat", &self.fat);
        push_quantity(&mut pairs, "saturated_fat", &self.saturated_fat);
        push_quantity(&mut pairs, "trans_fat", &self.trans_fat);
        push_quantity(&mut pairs, "polyunsaturated_fat", &self.polyunsaturated_fat);
        push_quantity(&mut pairs, "monounsaturated_fat", &self.monounsaturated_fat);
        push_quantity(&mut pairs, "cholesterol", &self.cholesterol);
        push_quantity(&mut pairs, "sodium", &self.sodium);
        push_quantity(&mut pairs, "potassium", &self.potassium);
        push_quantity(&mut pairs, "carbohydrate", &self.carbohydrate);
        push_quantity(&mut pairs, "fiber", &self.fiber);
        push_quantity(&mut pairs, "sugars", &self.sugars);
        push_quantity(&mut pairs, "protein", &self.protein);
        push_text(&mut pairs, "author", &self.author);
        push_text(&mut pairs, "publisher", &self.publisher);
        push_quantity(&mut pairs, "pages", &self.pages);
        push_quantity(&mut pairs, "alcohol_by_volume", &self.alcohol_by_volume);

        pairs
    }

    /// True when no field would be sent.
    pub fn is_empty(&self) -> bool {
        self.to_query_pairs().is_empty()
    }
}

type Pairs = Vec<(&'static str, String)>;

fn push_text(pairs: &mut Pairs, key: &'static str, value: &Option<String>) {
    if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
        pairs.push((key, v.to_string()));
    }
}

fn push_quantity(pairs: &mut Pairs, key: &'static str, value: &Option<Quantity>) {
    if let Some(q) = value.as_ref().filter(|q| !q.is_blank()) {
        pairs.push((key, q.to_string()));
    }
}
