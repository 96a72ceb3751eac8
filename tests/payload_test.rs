#[cfg(test)]
mod search_payload {
    use serde_json::{json, Value};
    use velaton::etuovi::payload::{build_search_payload, PAGE_SIZE};
    use velaton::models::criteria::SearchCriteria;

    fn criteria() -> SearchCriteria {
        SearchCriteria {
            location: "helsinki".to_string(),
            price_max: Some(250),
            year_min: Some(1990),
            size_min: Some(30),
            user_max_limit: None,
            interest_rate: 0.03,
        }
    }

    fn template() -> Value {
        json!({ "locations": [{ "id": 64, "type": "CITY", "name": "Helsinki" }] })
    }

    #[test]
    fn price_ceiling_is_converted_to_euros() {
        let payload = build_search_payload(&template(), &criteria());
        assert_eq!(payload["priceMax"], json!(250000));
        assert_eq!(payload["priceMin"], Value::Null);
    }

    #[test]
    fn unset_bounds_become_nulls() {
        let mut unbounded = criteria();
        unbounded.price_max = None;
        unbounded.year_min = None;
        unbounded.size_min = None;
        let payload = build_search_payload(&template(), &unbounded);
        assert_eq!(payload["priceMax"], Value::Null);
        assert_eq!(payload["yearMin"], Value::Null);
        assert_eq!(payload["sizeMin"], Value::Null);
    }

    #[test]
    fn location_fragment_is_spliced_in_unchanged() {
        let payload = build_search_payload(&template(), &criteria());
        assert_eq!(payload["locationSearchCriteria"], template());
    }

    #[test]
    fn pagination_is_one_page_of_thirty_newest_first() {
        let payload = build_search_payload(&template(), &criteria());
        assert_eq!(payload["pagination"]["firstResult"], json!(0));
        assert_eq!(payload["pagination"]["maxResults"], json!(PAGE_SIZE));
        assert_eq!(payload["pagination"]["page"], json!(1));
        assert_eq!(
            payload["sortingOrder"],
            json!({ "property": "PUBLISHED_OR_UPDATED_AT", "direction": "DESC" })
        );
    }

    #[test]
    fn fixed_property_filters_are_in_place() {
        let payload = build_search_payload(&template(), &criteria());
        assert_eq!(payload["propertyType"], json!("RESIDENTIAL"));
        assert_eq!(payload["residentialPropertyTypes"], json!(["APARTMENT_HOUSE"]));
        assert_eq!(payload["ownershipTypes"], json!(["OWN"]));
        assert_eq!(
            payload["plotHoldingTypes"],
            json!(["OWN", "OPTIONAL_RENTAL"])
        );
        assert_eq!(payload["bidType"], json!("ALL"));
        assert_eq!(payload["yearMin"], json!(1990));
        assert_eq!(payload["sizeMin"], json!(30));
    }
}
