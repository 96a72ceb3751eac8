#[cfg(test)]
mod criteria_validation {
    use velaton::error::ApiError;
    use velaton::models::criteria::SearchCriteria;

    fn criteria() -> SearchCriteria {
        SearchCriteria {
            location: "helsinki".to_string(),
            price_max: Some(250),
            year_min: Some(1990),
            size_min: Some(30),
            user_max_limit: Some(150000.0),
            interest_rate: 0.03,
        }
    }

    #[test]
    fn well_formed_criteria_pass() {
        assert!(criteria().validate().is_ok());
    }

    #[test]
    fn unset_bounds_are_accepted() {
        let unbounded = SearchCriteria {
            price_max: None,
            year_min: None,
            size_min: None,
            user_max_limit: None,
            ..criteria()
        };
        assert!(unbounded.validate().is_ok());
    }

    #[test]
    fn non_positive_bounds_are_rejected() {
        let mut bad = criteria();
        bad.interest_rate = 0.0;
        assert!(matches!(bad.validate(), Err(ApiError::InvalidCriteria(_))));

        let mut bad = criteria();
        bad.price_max = Some(-1);
        assert!(matches!(bad.validate(), Err(ApiError::InvalidCriteria(_))));

        let mut bad = criteria();
        bad.year_min = Some(0);
        assert!(matches!(bad.validate(), Err(ApiError::InvalidCriteria(_))));

        let mut bad = criteria();
        bad.size_min = Some(-5);
        assert!(matches!(bad.validate(), Err(ApiError::InvalidCriteria(_))));

        let mut bad = criteria();
        bad.user_max_limit = Some(0.0);
        assert!(matches!(bad.validate(), Err(ApiError::InvalidCriteria(_))));
    }

    #[test]
    fn interest_rate_defaults_to_three_percent() {
        let parsed: SearchCriteria =
            serde_json::from_str(r#"{ "location": "helsinki" }"#).unwrap();
        assert_eq!(parsed.interest_rate, 0.03);
        assert_eq!(parsed.price_max, None);
    }
}
