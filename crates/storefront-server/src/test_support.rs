use serde_json::{json, Value};
use storefront_cms::{Catalog, CmsClient};
use storefront_core::CmsCredentials;

pub const ENTRIES_PATH: &str = "/spaces/space1/environments/master/entries";

pub fn test_catalog(base_url: &str) -> Catalog {
    let client = CmsClient::new(
        CmsCredentials {
            space_id: "space1".to_owned(),
            environment: "master".to_owned(),
            access_token: "test-token".to_owned(),
        },
        base_url,
        "products",
        Some(5),
        "storefront-test/0.1",
    )
    .expect("failed to build test CmsClient");
    Catalog::new(client)
}

/// Entry without images, so detail lookups need no asset requests.
pub fn entry_body(id: &str, title: &str) -> Value {
    json!({
        "sys": { "id": id },
        "fields": {
            "title": title,
            "brandName": "Acme",
            "price": 19.5,
            "category": "hats"
        }
    })
}
