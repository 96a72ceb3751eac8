#[cfg(test)]
mod location_templates {
    use std::fs;
    use std::path::PathBuf;

    use velaton::error::ApiError;
    use velaton::etuovi::templates::TemplateStore;

    struct TempTemplates {
        dir: PathBuf,
    }

    impl TempTemplates {
        fn new(tag: &str) -> TempTemplates {
            let dir = std::env::temp_dir().join(format!("velaton-templates-{tag}-{}", std::process::id()));
            fs::create_dir_all(&dir).unwrap();
            TempTemplates { dir }
        }

        fn write(&self, name: &str, content: &str) {
            fs::write(self.dir.join(name), content).unwrap();
        }

        fn store(&self) -> TemplateStore {
            TemplateStore::new(self.dir.clone())
        }
    }

    impl Drop for TempTemplates {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.dir);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let temp = TempTemplates::new("case");
        temp.write("kallio.json", r#"{ "locations": [] }"#);
        let store = temp.store();
        assert!(store.load("kallio").is_ok());
        assert!(store.load("Kallio").is_ok());
        assert!(store.load("KALLIO").is_ok());
    }

    #[test]
    fn missing_template_is_a_configuration_error() {
        let temp = TempTemplates::new("missing");
        let result = temp.store().load("Atlantis");
        assert!(matches!(result, Err(ApiError::TemplateNotFound(ref l)) if l == "Atlantis"));
    }

    #[test]
    fn malformed_template_is_reported_not_a_crash() {
        let temp = TempTemplates::new("malformed");
        temp.write("rikki.json", "{ not json");
        let result = temp.store().load("rikki");
        assert!(matches!(result, Err(ApiError::TemplateInvalid { .. })));
    }

    #[test]
    fn template_content_round_trips() {
        let temp = TempTemplates::new("content");
        temp.write("espoo.json", r#"{ "locations": [{ "id": 49 }] }"#);
        let template = temp.store().load("espoo").unwrap();
        assert_eq!(template["locations"][0]["id"], 49);
    }
}
