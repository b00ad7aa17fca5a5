//! Submitting masterdata records through the web client
//!
//! Each record type knows which document window it lives in and how its
//! fields map onto that window's form. `apply()` appends the record's
//! submission as one named scenario step; the browser work happens when
//! the scenario runs.

use erpweb_common::{BillOfMaterial, Product, ProductCategory};

use crate::browser::UiStep;
use crate::scenario::Scenario;
use crate::session::{self, window};

/// A record the harness can submit through a document window
pub trait Masterdata {
    /// Window this record is created in
    fn window_id(&self) -> &'static str;

    /// Step name as it appears in reports
    fn describe(&self) -> String;

    /// Form interactions specific to this record type
    fn form_steps(&self) -> Vec<UiStep>;

    /// Full submission: open a new document, fill the form, save
    fn steps(&self) -> Vec<UiStep> {
        let mut steps = session::new_document(self.window_id());
        steps.extend(self.form_steps());
        steps.extend(session::save_document());
        steps
    }

    /// Append this record's submission to a scenario
    fn apply(&self, scenario: &mut Scenario) {
        scenario.push(self.describe(), self.steps());
    }
}

impl Masterdata for ProductCategory {
    fn window_id(&self) -> &'static str {
        window::PRODUCT_CATEGORY
    }

    fn describe(&self) -> String {
        format!("create product category \"{}\"", self.name)
    }

    fn form_steps(&self) -> Vec<UiStep> {
        let mut steps = session::fill_field("Name", &self.name);
        steps.extend(session::fill_field("Value", &self.value));
        steps
    }
}

impl Masterdata for Product {
    fn window_id(&self) -> &'static str {
        window::PRODUCT
    }

    fn describe(&self) -> String {
        format!("create product \"{}\"", self.name)
    }

    fn form_steps(&self) -> Vec<UiStep> {
        let mut steps = session::fill_field("Name", &self.name);
        steps.extend(session::fill_field("Value", &self.value));
        steps.extend(session::fill_lookup("ProductType", &self.product_type));
        steps.extend(session::fill_lookup("UOM", &self.uom));
        if let Some(category) = &self.product_category {
            steps.extend(session::fill_lookup(
                "ProductCategory",
                &category.to_string(),
            ));
        }
        steps.extend(session::set_flag("Stocked", self.stocked));
        steps.extend(session::set_flag("Purchased", self.purchased));
        steps.extend(session::set_flag("Sold", self.sold));
        steps
    }
}

impl Masterdata for BillOfMaterial {
    fn window_id(&self) -> &'static str {
        window::BILL_OF_MATERIAL
    }

    fn describe(&self) -> String {
        format!(
            "create bill of material \"{}\" -> \"{}\"",
            self.product, self.product_component
        )
    }

    fn form_steps(&self) -> Vec<UiStep> {
        let mut steps = session::fill_lookup("Product", &self.product);
        steps.extend(session::fill_lookup("ProductComponent", &self.product_component));
        steps.extend(session::fill_field("Qty", &self.quantity.to_string()));
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use erpweb_common::CategoryRef;

    #[test]
    fn category_submission_opens_window_and_saves() {
        let category = ProductCategory::default()
            .set_name("Spare Parts")
            .set_value("SpareParts");
        let steps = category.steps();

        assert!(matches!(&steps[0], UiStep::Navigate { path, .. }
            if path == "/window/144/new"));
        assert!(steps.iter().any(|s| matches!(s, UiStep::Fill { value, .. }
            if value == "Spare Parts")));
        assert!(matches!(steps.last(), Some(UiStep::WaitFor { selector, .. })
            if selector == ".indicator-saved"));
    }

    #[test]
    fn product_form_covers_every_field() {
        let product = Product::default()
            .set_name("Gearbox")
            .set_value("GB-01")
            .set_product_category(CategoryRef::new("SpareParts", "Spare Parts"))
            .set_stocked(false)
            .set_purchased(false)
            .set_sold(false);
        let steps = product.form_steps();

        // category lookup carries the composite key
        assert!(steps.iter().any(|s| matches!(s, UiStep::Fill { value, .. }
            if value == "SpareParts_Spare Parts")));

        // all three flags are forced off
        let unchecked: Vec<_> = steps
            .iter()
            .filter_map(|s| match s {
                UiStep::SetChecked { selector, checked: false } => Some(selector.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(unchecked.len(), 3);
        assert!(unchecked.iter().any(|s| s.contains("Stocked")));
        assert!(unchecked.iter().any(|s| s.contains("Purchased")));
        assert!(unchecked.iter().any(|s| s.contains("Sold")));
    }

    #[test]
    fn product_without_category_skips_the_lookup() {
        let product = Product::default().set_name("Loose").set_value("L-1");
        let steps = product.form_steps();
        assert!(!steps.iter().any(|s| matches!(s, UiStep::Fill { selector, .. }
            if selector.contains("ProductCategory"))));
    }

    #[test]
    fn bom_links_parent_before_component() {
        let bom = BillOfMaterial::default()
            .set_product("Gearbox")
            .set_product_component("Shaft");
        let steps = bom.form_steps();

        let fills: Vec<_> = steps
            .iter()
            .filter_map(|s| match s {
                UiStep::Fill { selector, value } => Some((selector.as_str(), value.as_str())),
                _ => None,
            })
            .collect();
        let product_pos = fills.iter().position(|(_, v)| *v == "Gearbox").unwrap();
        let component_pos = fills.iter().position(|(_, v)| *v == "Shaft").unwrap();
        assert!(product_pos < component_pos);

        // default quantity renders without a trailing fraction
        assert!(fills.iter().any(|(s, v)| s.contains("Qty") && *v == "1"));
    }

    #[test]
    fn apply_appends_one_named_step() {
        let mut scenario = Scenario::new("s");
        ProductCategory::default()
            .set_name("C")
            .set_value("V")
            .apply(&mut scenario);
        assert_eq!(scenario.len(), 1);
        assert_eq!(scenario.steps[0].name, "create product category \"C\"");
    }
}
