#[cfg(test)]
mod spreadsheet_export {
    use velaton::export::{workbook_bytes, ResultTable, TableStore};
    use velaton::models::property::{MetricResult, PlotHolding, PropertyRecord};

    fn record() -> PropertyRecord {
        PropertyRecord {
            friendly_id: Some("12345678".to_string()),
            address: Some("Esimerkkikatu 1 A 2".to_string()),
            selling_price: Some(90000.0),
            debt_free_price: Some(100000.0),
            loan_share: 10000.0,
            maintenance_charge: 150.0,
            financing_charge: 74.0,
            living_area: Some(54.5),
            floor_level: Some(3),
            construction_year: Some(2020),
            plot_holding: Some(PlotHolding::Own),
            plot_buyout_share: 0.0,
        }
    }

    fn metric() -> MetricResult {
        MetricResult {
            kohdenumero: "12345678".to_string(),
            kassavirta: 3800.0,
            kassavirta_5: 4175.0,
            kassavirta_10: 4550.0,
            gross_yield: 0.078,
            roi: 0.07,
        }
    }

    // xlsx files start with the zip local-file-header magic
    fn assert_is_xlsx(bytes: &[u8]) {
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn record_tables_render_to_a_workbook() {
        let table = ResultTable::Records(vec![record()]);
        assert_is_xlsx(&workbook_bytes(&table).unwrap());
    }

    #[test]
    fn metric_tables_render_to_a_workbook() {
        let table = ResultTable::Metrics(vec![metric()]);
        assert_is_xlsx(&workbook_bytes(&table).unwrap());
    }

    #[test]
    fn empty_tables_still_render_headers() {
        let table = ResultTable::Records(vec![]);
        assert_is_xlsx(&workbook_bytes(&table).unwrap());
    }

    #[test]
    fn table_handles_are_unique_per_request() {
        let store = TableStore::new();
        let first = store.store("results", ResultTable::Records(vec![record()]));
        let second = store.store("results", ResultTable::Records(vec![record()]));
        assert_ne!(first, second);
        assert!(first.starts_with("results-"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn taking_a_table_consumes_its_entry() {
        let store = TableStore::new();
        let name = store.store("metrics", ResultTable::Metrics(vec![metric()]));
        assert!(store.take(&name).is_some());
        assert!(store.take(&name).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_handles_yield_nothing() {
        let store = TableStore::new();
        assert!(store.take("results-deadbeef").is_none());
    }

    #[test]
    fn records_with_missing_fields_render() {
        let sparse = PropertyRecord {
            friendly_id: None,
            address: None,
            selling_price: None,
            debt_free_price: None,
            loan_share: 0.0,
            maintenance_charge: 0.0,
            financing_charge: 0.0,
            living_area: None,
            floor_level: None,
            construction_year: None,
            plot_holding: None,
            plot_buyout_share: 0.0,
        };
        let table = ResultTable::Records(vec![sparse]);
        assert_is_xlsx(&workbook_bytes(&table).unwrap());
    }
}
