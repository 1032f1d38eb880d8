//! Cascading address selection against a mock regional directory service.
//!
//! Exercises the real HTTP client end to end: province -> regency ->
//! district -> village, reselection invalidation, and restore of a saved
//! address.

use nexu_checkout::config::RegionalConfig;
use nexu_checkout::regional::{RegionCascade, RegionalClient};
use nexu_integration_tests::{complete_address, init_tracing};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_directory(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/provinces.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "31", "name": "DKI JAKARTA"},
            {"id": "32", "name": "JAWA BARAT"},
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/regencies/31.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "3171", "province_id": "31", "name": "KOTA JAKARTA PUSAT"},
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/regencies/32.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "3204", "province_id": "32", "name": "KABUPATEN BANDUNG"},
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/districts/3171.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "317101", "regency_id": "3171", "name": "MENTENG"},
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/villages/317101.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "3171011001", "district_id": "317101", "name": "MENTENG"},
        ])))
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> RegionalClient {
    RegionalClient::new(&RegionalConfig {
        base_url: server.uri(),
    })
}

#[tokio::test]
async fn test_full_selection_fills_names_and_ids() {
    init_tracing();
    let server = MockServer::start().await;
    mount_directory(&server).await;

    let mut cascade = RegionCascade::new(client_for(&server));
    let mut address = nexu_checkout::address::Address::default();

    cascade.load_provinces().await.unwrap();
    assert_eq!(cascade.provinces().len(), 2);

    cascade.select_province(&mut address, "31").await.unwrap();
    assert_eq!(address.province, "DKI JAKARTA");
    assert!(cascade.regency_selector_enabled(&address));

    cascade.select_regency(&mut address, "3171").await.unwrap();
    assert_eq!(address.city, "KOTA JAKARTA PUSAT");

    cascade
        .select_district(&mut address, "317101")
        .await
        .unwrap();
    assert_eq!(address.district, "MENTENG");

    cascade.select_village(&mut address, "3171011001");
    assert_eq!(address.village, "MENTENG");
    assert_eq!(address.village_id, "3171011001");
}

#[tokio::test]
async fn test_reselecting_province_invalidates_descendants() {
    init_tracing();
    let server = MockServer::start().await;
    mount_directory(&server).await;

    let mut cascade = RegionCascade::new(client_for(&server));
    let mut address = nexu_checkout::address::Address::default();

    cascade.load_provinces().await.unwrap();
    cascade.select_province(&mut address, "31").await.unwrap();
    cascade.select_regency(&mut address, "3171").await.unwrap();
    cascade
        .select_district(&mut address, "317101")
        .await
        .unwrap();
    cascade.select_village(&mut address, "3171011001");

    // Switching provinces drops every descendant selection and list.
    cascade.select_province(&mut address, "32").await.unwrap();
    assert_eq!(address.province, "JAWA BARAT");
    assert!(address.city.is_empty());
    assert!(address.district.is_empty());
    assert!(address.village.is_empty());
    assert!(address.regency_id.is_empty());
    assert_eq!(cascade.regencies().len(), 1);
    assert!(cascade.districts().is_empty());
    assert!(cascade.villages().is_empty());
    assert!(!cascade.district_selector_enabled(&address));
    assert!(!cascade.village_selector_enabled(&address));
}

#[tokio::test]
async fn test_restore_reseeds_lists_for_saved_address() {
    init_tracing();
    let server = MockServer::start().await;
    mount_directory(&server).await;

    let mut address = complete_address();
    address.province_id = "31".to_string();
    address.regency_id = "3171".to_string();
    address.district_id = "317101".to_string();
    address.village_id = "3171011001".to_string();

    let mut cascade = RegionCascade::new(client_for(&server));
    cascade.restore(&address).await;

    assert_eq!(cascade.provinces().len(), 2);
    assert_eq!(cascade.regencies().len(), 1);
    assert_eq!(cascade.districts().len(), 1);
    assert_eq!(cascade.villages().len(), 1);
    // Restoring never touches the saved selections.
    assert_eq!(address.village, "Menteng");
}

#[tokio::test]
async fn test_failed_child_fetch_keeps_parent_selection() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/provinces.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "31", "name": "DKI JAKARTA"},
        ])))
        .mount(&server)
        .await;
    // No regency mock: the child fetch 404s.

    let mut cascade = RegionCascade::new(client_for(&server));
    let mut address = nexu_checkout::address::Address::default();
    cascade.load_provinces().await.unwrap();

    let result = cascade.select_province(&mut address, "31").await;
    assert!(result.is_err());
    assert_eq!(address.province, "DKI JAKARTA");
    assert_eq!(address.province_id, "31");
    assert!(cascade.regencies().is_empty());
    assert!(!cascade.loading_regencies());
}
