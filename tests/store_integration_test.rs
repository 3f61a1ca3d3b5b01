//! Integration tests for loading configuration files from disk and querying them.
//!
//! Tests cover:
//! - Opening files and readers (ConfigStore::open, from_reader)
//! - Structural errors with line numbers and all-or-nothing loading
//! - Missing-variable handling with and without exceptions
//! - Section enumeration through the cursor
//! - Case-insensitive lookups (property based)

mod common;

use approx::assert_relative_eq;
use common::*;
use confdata::adapters::reader_line_source::ReaderLineSource;
use confdata::{ConfigFileError, ConfigStore, ErrorKind};
use proptest::prelude::*;

mod opening {
    use super::*;

    #[test]
    fn open_reads_station_file() {
        let file = write_temp_conf(STATIONS_CONF);
        let store = ConfigStore::open(file.path()).unwrap();

        assert_eq!(store.get_value("baseline").unwrap(), "13.434510");
        assert_eq!(store.get_value_description("baseline").unwrap(), "kilometers");
        assert_relative_eq!(
            store.get_value_as_double(("staX", "ONSA")).unwrap(),
            3_370_658.5419
        );
        assert_eq!(
            store.get_variable_description(("staX", "ONSA")).unwrap(),
            "X station coordinate"
        );
        assert_eq!(store.get_value_as_int(("sampling", "onsa")).unwrap(), 30);
        assert!(store.get_value_as_bool(("reference", "bell")).unwrap());
    }

    #[test]
    fn open_missing_file_is_unreadable() {
        let err = ConfigStore::open("/nonexistent/path/stations.conf").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SourceUnreadable);
        assert!(err.to_string().contains("/nonexistent/path/stations.conf"));
    }

    #[test]
    fn from_reader_handles_crlf_and_bom() {
        let bytes = "\u{feff}[Rx]\r\nname = BELL\r\n".as_bytes();
        let store = ConfigStore::from_reader(bytes).unwrap();
        assert_eq!(store.get_value(("name", "RX")).unwrap(), "BELL");
    }

    #[test]
    fn load_through_explicit_line_source() {
        let file = write_temp_conf("rate = 2\n");
        let mut store = ConfigStore::with_default_section("main").unwrap();
        store
            .load(ReaderLineSource::open(file.path()).unwrap())
            .unwrap();
        assert_eq!(store.get_value_as_int("rate").unwrap(), 2);
        assert_eq!(store.section_names().collect::<Vec<_>>(), vec!["MAIN"]);
    }

    #[test]
    fn load_path_merges_into_existing_store() {
        let base = write_temp_conf("[ONSA]\nname = ONSA\n");
        let extra = write_temp_conf("[onsa]\nsampling = 30\n[BELL]\nreference = yes\n");

        let mut store = ConfigStore::open(base.path()).unwrap();
        store.load_path(extra.path()).unwrap();

        assert_eq!(store.get_value(("name", "ONSA")).unwrap(), "ONSA");
        assert_eq!(store.get_value(("sampling", "ONSA")).unwrap(), "30");
        assert_eq!(store.len(), 2);
    }
}

mod structural_errors {
    use super::*;

    #[test]
    fn bad_variable_name_aborts_with_line_number() {
        let file = write_temp_conf("ok = 1\n\nbad name = 1\n");
        let err = ConfigStore::open(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::InvalidVariableName { line: 3, ref name } if name == "bad name"
        ));
    }

    #[test]
    fn bad_section_name_aborts() {
        let err = "[9lives]\n".parse::<ConfigStore>().unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidSectionName { line: 1, .. }));
    }

    #[test]
    fn missing_separator_aborts() {
        let err = "[A]\n# fine\nno separator here\n"
            .parse::<ConfigStore>()
            .unwrap_err();
        assert!(matches!(err, ConfigFileError::MalformedLine { line: 3, .. }));
    }

    #[test]
    fn overlong_line_aborts() {
        let text = format!("[A]\nlong = {}\n", "v".repeat(300));
        let err = text.parse::<ConfigStore>().unwrap_err();
        assert!(matches!(err, ConfigFileError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn failed_reload_keeps_previous_contents() {
        let good = write_temp_conf(STATIONS_CONF);
        let bad = write_temp_conf("[EXTRA]\nfine = 1\n1bad = 2\n");

        let mut store = ConfigStore::open(good.path()).unwrap();
        let sections_before = store.len();
        let variables_before = store.variable_count();

        assert!(store.load_path(bad.path()).is_err());
        assert_eq!(store.len(), sections_before);
        assert_eq!(store.variable_count(), variables_before);
        assert!(store.section("EXTRA").is_none());
    }
}

mod missing_values {
    use super::*;

    #[test]
    fn strict_store_reports_not_found() {
        let store: ConfigStore = STATIONS_CONF.parse().unwrap();
        for err in [
            store.get_value("absent").unwrap_err(),
            store.get_value(("name", "NOSUCH")).unwrap_err(),
            store.get_value_as_double(("absent", "ONSA")).unwrap_err(),
        ] {
            assert_eq!(err.kind(), ErrorKind::NotFound);
        }
    }

    #[test]
    fn lenient_store_returns_empty_defaults() {
        let mut store: ConfigStore = STATIONS_CONF.parse().unwrap();
        store.set_exception_on_missing(false);

        assert_eq!(store.get_value("absent").unwrap(), "");
        assert_eq!(store.get_value_as_int("absent").unwrap(), 0);
        assert_relative_eq!(store.get_value_as_double("absent").unwrap(), 0.0);
        assert!(!store.get_value_as_bool(("reference", "NOSUCH")).unwrap());
        assert_eq!(store.get_variable_description("absent").unwrap(), "");
    }

    #[test]
    fn lenient_store_still_rejects_bad_numbers() {
        let mut store: ConfigStore = STATIONS_CONF.parse().unwrap();
        store.set_exception_on_missing(false);
        let err = store.get_value_as_double(("antennaType", "ONSA")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NumberFormat);
    }

    #[test]
    fn clear_then_query() {
        let mut store: ConfigStore = STATIONS_CONF.parse().unwrap();
        store.clear();
        assert_eq!(store.get_value("baseline").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(store.next_section_name(), None);

        store.set_exception_on_missing(false);
        assert_eq!(store.get_value("baseline").unwrap(), "");
        assert_eq!(store.get_value_as_int("baseline").unwrap(), 0);
    }
}

mod section_cursor {
    use super::*;

    #[test]
    fn enumerates_each_section_once_in_file_order() {
        let mut store: ConfigStore = STATIONS_CONF.parse().unwrap();
        let names: Vec<String> = std::iter::from_fn(|| store.next_section_name()).collect();
        assert_eq!(names, vec!["DEFAULT", "ONSA", "BELL", "ROVER"]);
        assert_eq!(store.next_section_name(), None);
    }

    #[test]
    fn reset_restarts_enumeration() {
        let mut store: ConfigStore = STATIONS_CONF.parse().unwrap();
        store.next_section_name();
        store.next_section_name();
        store.reset_section_cursor();
        assert_eq!(store.next_section_name().as_deref(), Some("DEFAULT"));
    }
}

proptest! {
    #[test]
    fn lookups_ignore_source_and_query_case(
        section in "[A-Za-z][A-Za-z0-9_-]{0,12}",
        variable in "[A-Za-z][A-Za-z0-9_-]{0,12}",
        value in "[A-Za-z0-9./+-]{0,20}",
    ) {
        let text = format!("[{section}]\n  {variable} =   {value}  \n");
        let store: ConfigStore = text.parse().unwrap();

        let upper = (variable.to_uppercase(), section.to_uppercase());
        let lower = (variable.to_lowercase(), section.to_lowercase());
        prop_assert_eq!(store.get_value((upper.0.as_str(), upper.1.as_str())).unwrap(), value.clone());
        prop_assert_eq!(store.get_value((lower.0.as_str(), lower.1.as_str())).unwrap(), value);
    }

    #[test]
    fn last_definition_wins(first in 0i64..1000, second in 0i64..1000) {
        let text = format!("[S]\nx = {first}\nX = {second}\n");
        let store: ConfigStore = text.parse().unwrap();
        prop_assert_eq!(store.get_value_as_int(("x", "s")).unwrap(), second);
    }
}
