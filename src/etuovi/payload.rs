use serde_json::{json, Value};

use crate::models::criteria::SearchCriteria;

/// One page of results, newest first. No follow-up pages are fetched.
pub const PAGE_SIZE: u32 = 30;

/// Splice the location filter fragment and the user criteria into the fixed
/// payload the listpage endpoint expects. `price_max` arrives in thousands
/// of euros and is converted here; unset criteria become JSON nulls.
pub fn build_search_payload(location_criteria: &Value, criteria: &SearchCriteria) -> Value {
    json!({
        "locationSearchCriteria": location_criteria,
        "pagination": {
            "firstResult": 0,
            "maxResults": PAGE_SIZE,
            "page": 1
        },
        "sortingOrder": {
            "property": "PUBLISHED_OR_UPDATED_AT",
            "direction": "DESC"
        },
        "priceMin": null,
        "priceMax": criteria.price_max.map(|price| price * 1000),
        "sizeMin": criteria.size_min,
        "sizeMax": null,
        "yearMin": criteria.year_min,
        "yearMax": null,
        "propertyType": "RESIDENTIAL",
        "residentialPropertyTypes": ["APARTMENT_HOUSE"],
        "bidType": "ALL",
        "sellerType": "ALL",
        "newBuildingSearchCriteria": "ALL_PROPERTIES",
        "ownershipTypes": ["OWN"],
        "plotHoldingTypes": ["OWN", "OPTIONAL_RENTAL"],
        "freeTextSearch": "",
        "maintenanceChargeMin": null,
        "maintenanceChargeMax": null,
        "plotAreaMin": null,
        "plotAreaMax": null,
        "priceSquareMeterMin": null,
        "priceSquareMeterMax": null,
        "publishingTimeSearchCriteria": "ANY_DAY",
        "showingSearchCriteria": {}
    })
}
