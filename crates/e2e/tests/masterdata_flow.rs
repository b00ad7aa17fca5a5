//! Browserless integration tests for the masterdata flow
//!
//! Assembles the canonical scenario from the shipped fixtures and checks
//! the compiled Playwright script, without needing a live client.

use std::path::PathBuf;

use erpweb_common::{FixtureStore, Product, RunStamp};
use erpweb_e2e::browser::{BridgeConfig, PlaywrightBridge};
use erpweb_e2e::flows;

fn shipped_fixtures() -> FixtureStore {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    FixtureStore::open(dir).expect("shipped fixtures load")
}

#[test]
fn shipped_fixtures_cover_the_product_flow() {
    let store = shipped_fixtures();
    let names: Vec<_> = store.names().collect();

    for required in [
        flows::fixtures::PRODUCT_CATEGORY,
        flows::fixtures::PRODUCT,
        flows::fixtures::BILL_OF_MATERIAL,
    ] {
        assert!(names.contains(&required), "missing fixture: {required}");
    }

    // the product fixture seeds the flags on, the flow turns them off
    let product: Product = store.get(flows::fixtures::PRODUCT).unwrap();
    assert!(product.stocked && product.purchased && product.sold);
    assert_eq!(product.product_type, "Item");
}

#[test]
fn flow_assembles_from_shipped_fixtures() {
    let store = shipped_fixtures();
    let stamp = RunStamp::from_millis(1700000000000);

    let scenario = flows::create_bill_of_material(&store, &stamp).unwrap();
    assert_eq!(scenario.len(), 5);
    assert_eq!(scenario.name, "create-bill-of-material");
}

#[test]
fn compiled_script_keeps_one_session_for_all_steps() {
    let store = shipped_fixtures();
    let stamp = RunStamp::from_millis(1700000000000);
    let scenario = flows::create_bill_of_material(&store, &stamp).unwrap();

    let bridge = PlaywrightBridge::unchecked(BridgeConfig::default());
    let script = bridge.build_script(&scenario.steps);

    // one browser launch, one marker per scenario step
    assert_eq!(script.matches("launch(").count(), 1);
    assert_eq!(script.matches("mark({ ok: true").count(), scenario.len());

    // stamped entity names flow into the page interactions
    assert!(script.contains("ProductName 1700000000000"));
    assert!(script.contains("ProductComponentName 1700000000000"));
    assert!(script.contains("ProductNameValue 1700000000000_ProductCategoryName 1700000000000"));

    // the run ends on the product window
    assert!(script.contains("/window/140"));
}
