//! Canonical masterdata journeys
//!
//! The bill-of-material flow creates a category, a product, a component
//! product and a bill of material linking the two, then opens the product
//! window. Later entities reference earlier ones by name or search key,
//! so creation order is fixed; every name carries the run stamp.

use erpweb_common::{BillOfMaterial, FixtureStore, Product, ProductCategory, RunStamp};

use crate::error::E2eResult;
use crate::masterdata::Masterdata;
use crate::scenario::Scenario;
use crate::session::{self, window};

/// Fixture names the product flows expect to find
pub mod fixtures {
    pub const PRODUCT_CATEGORY: &str = "product/simple_productCategory";
    pub const PRODUCT: &str = "product/simple_product";
    pub const BILL_OF_MATERIAL: &str = "product/bill_of_material";
}

/// Build the create-bill-of-material journey
pub fn create_bill_of_material(store: &FixtureStore, stamp: &RunStamp) -> E2eResult<Scenario> {
    let category = store
        .get::<ProductCategory>(fixtures::PRODUCT_CATEGORY)?
        .set_name(stamp.qualify("ProductCategoryName"))
        .set_value(stamp.qualify("ProductNameValue"));

    let product = store
        .get::<Product>(fixtures::PRODUCT)?
        .set_name(stamp.qualify("ProductName"))
        .set_value(stamp.qualify("ProductNameValue"))
        .set_product_category(category.reference())
        .set_stocked(false)
        .set_purchased(false)
        .set_sold(false);

    let component = store
        .get::<Product>(fixtures::PRODUCT)?
        .set_name(stamp.qualify("ProductComponentName"))
        .set_value(stamp.qualify("ProductComponentValue"))
        .set_product_category(category.reference())
        .set_stocked(false)
        .set_purchased(false)
        .set_sold(false);

    let bom = store
        .get::<BillOfMaterial>(fixtures::BILL_OF_MATERIAL)?
        .set_product(product.name.clone())
        .set_product_component(component.name.clone());

    let mut scenario = Scenario::new("create-bill-of-material");
    category.apply(&mut scenario);
    product.apply(&mut scenario);
    component.apply(&mut scenario);
    bom.apply(&mut scenario);
    scenario.push(
        "open the product window",
        session::visit_window(window::PRODUCT),
    );

    Ok(scenario)
}
