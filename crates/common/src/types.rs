//! Masterdata record types
//!
//! These are the value objects the harness assembles and submits through
//! the web client. Each record deserializes straight from a JSON fixture
//! (missing fields fall back to defaults) and exposes chained setters for
//! per-run overrides.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Reference to a product category by its composite search key.
///
/// The web client's lookup field identifies a category as
/// `"{value}_{name}"`, so the reference keeps both parts and renders
/// them on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CategoryRef {
    pub value: String,
    pub name: String,
}

impl CategoryRef {
    pub fn new(value: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: name.into(),
        }
    }
}

impl From<&ProductCategory> for CategoryRef {
    fn from(category: &ProductCategory) -> Self {
        Self::new(category.value.clone(), category.name.clone())
    }
}

impl From<CategoryRef> for String {
    fn from(r: CategoryRef) -> Self {
        r.to_string()
    }
}

impl TryFrom<String> for CategoryRef {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        // Category values never contain underscores, so the first one
        // separates value from name.
        match s.split_once('_') {
            Some((value, name)) if !value.is_empty() && !name.is_empty() => {
                Ok(Self::new(value, name))
            }
            _ => Err(Error::InvalidRef(s)),
        }
    }
}

impl std::fmt::Display for CategoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.value, self.name)
    }
}

/// Product category record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductCategory {
    pub name: String,
    pub value: String,
}

impl ProductCategory {
    pub fn set_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn set_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// The composite key the web client uses to look this category up
    pub fn reference(&self) -> CategoryRef {
        CategoryRef::from(self)
    }
}

/// Product record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub name: String,
    pub value: String,

    /// Category lookup, `"{value}_{name}"` in fixture form
    pub product_category: Option<CategoryRef>,

    /// Mandatory form fields seeded by the fixture
    pub product_type: String,
    pub uom: String,

    pub stocked: bool,
    pub purchased: bool,
    pub sold: bool,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            name: String::new(),
            value: String::new(),
            product_category: None,
            product_type: "Item".to_string(),
            uom: "Each".to_string(),
            stocked: true,
            purchased: true,
            sold: true,
        }
    }
}

impl Product {
    pub fn set_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn set_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn set_product_category(mut self, category: impl Into<CategoryRef>) -> Self {
        self.product_category = Some(category.into());
        self
    }

    pub fn set_stocked(mut self, stocked: bool) -> Self {
        self.stocked = stocked;
        self
    }

    pub fn set_purchased(mut self, purchased: bool) -> Self {
        self.purchased = purchased;
        self
    }

    pub fn set_sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }
}

/// Bill of material record linking a parent product to one component
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillOfMaterial {
    /// Parent product, referenced by name
    pub product: String,

    /// Component product, referenced by name
    pub product_component: String,

    pub quantity: f64,
}

impl Default for BillOfMaterial {
    fn default() -> Self {
        Self {
            product: String::new(),
            product_component: String::new(),
            quantity: 1.0,
        }
    }
}

impl BillOfMaterial {
    pub fn set_product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    pub fn set_product_component(mut self, component: impl Into<String>) -> Self {
        self.product_component = component.into();
        self
    }

    pub fn set_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_ref_renders_composite_key() {
        let category = ProductCategory::default()
            .set_name("Standard")
            .set_value("24-Standard");
        assert_eq!(category.reference().to_string(), "24-Standard_Standard");
    }

    #[test]
    fn category_ref_parses_from_fixture_form() {
        let r = CategoryRef::try_from("Standard_Standard Category".to_string()).unwrap();
        assert_eq!(r.value, "Standard");
        assert_eq!(r.name, "Standard Category");
    }

    #[test]
    fn category_ref_rejects_missing_separator() {
        assert!(CategoryRef::try_from("Standard".to_string()).is_err());
        assert!(CategoryRef::try_from("_Name".to_string()).is_err());
    }

    #[test]
    fn product_deserializes_with_fixture_defaults() {
        let product: Product = serde_json::from_str(
            r#"{ "value": "P-1", "productCategory": "Standard_Standard" }"#,
        )
        .unwrap();
        assert_eq!(product.product_type, "Item");
        assert_eq!(product.uom, "Each");
        assert!(product.stocked);
        let category = product.product_category.unwrap();
        assert_eq!(category.name, "Standard");
    }

    #[test]
    fn setters_chain_and_override() {
        let product = Product::default()
            .set_name("Gearbox")
            .set_value("GB-01")
            .set_stocked(false)
            .set_purchased(false)
            .set_sold(false);
        assert_eq!(product.name, "Gearbox");
        assert!(!product.stocked && !product.purchased && !product.sold);
    }

    #[test]
    fn bill_of_material_defaults_to_single_unit() {
        let bom = BillOfMaterial::default()
            .set_product("Gearbox")
            .set_product_component("Shaft");
        assert_eq!(bom.quantity, 1.0);
        assert_eq!(bom.product_component, "Shaft");
    }
}
