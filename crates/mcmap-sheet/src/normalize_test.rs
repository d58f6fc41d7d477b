use mcmap_core::FilterOptions;
use rust_decimal::Decimal;

use super::*;

fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable::new(
        headers.iter().map(|h| (*h).to_owned()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|c| (*c).to_owned()).collect())
            .collect(),
    )
}

const FULL_HEADERS: [&str; 12] = [
    "Nom Établissement",
    "Ville",
    "Région",
    "Département",
    "Type",
    "Statut",
    "CA",
    "Latitude",
    "Longitude",
    "Services",
    "Lien HubSpot",
    "Visite prévue",
];

#[test]
fn terminated_row_is_fully_normalized() {
    let t = table(
        &FULL_HEADERS,
        &[&[
            "Clinique A",
            "Lyon",
            "Auvergne-Rhône-Alpes",
            "Rhône",
            "Clinique",
            "Résilié",
            "1 200,50 €",
            "45,76",
            "4.83",
            "Cardiologie, Pédiatrie ,-",
            "https://app.hubspot.com/contacts/1",
            "12/03",
        ]],
    );

    let rows = normalize_table(&t);
    assert_eq!(rows.len(), 1);
    let e = &rows[0];
    assert_eq!(e.status_key, "resilie");
    assert_eq!(e.status_class, StatusClass::Terminated);
    assert_eq!(e.style().color, "#7f8c8d");
    assert_eq!(e.style().radius, 6);
    assert_eq!(e.revenue, Decimal::new(120_050, 2));
    assert_eq!(e.search_label, "Clinique A (Lyon)");
    assert_eq!(e.coordinates(), Some((45.76, 4.83)));
    assert_eq!(
        e.services.iter().map(String::as_str).collect::<Vec<_>>(),
        ["Cardiologie", "Pédiatrie"]
    );
    assert!(e.has_scheduled_visit());
    assert_eq!(
        e.crm_link.as_deref(),
        Some("https://app.hubspot.com/contacts/1")
    );
}

#[test]
fn malformed_revenue_coerces_to_zero() {
    let t = table(&["Statut", "CA"], &[&["Client fidèle", "abc"]]);
    let e = &normalize_table(&t)[0];
    assert_eq!(e.status_class, StatusClass::Client);
    assert_eq!(e.style().color, "#2ecc71");
    assert_eq!(e.style().radius, 12);
    assert_eq!(e.revenue, Decimal::ZERO);
}

#[test]
fn missing_status_column_makes_every_row_unknown() {
    let t = table(
        &["Nom Établissement", "Ville"],
        &[&["Clinique A", "Lyon"], &["Clinique B", "Paris"]],
    );
    let rows = normalize_table(&t);
    assert!(rows.iter().all(|e| e.status_class == StatusClass::Unknown));
    assert!(rows.iter().all(|e| e.status_raw.is_empty()));

    let options = FilterOptions::cascade(&rows, &mcmap_core::EstablishmentFilter::default());
    assert!(options.statuses.is_empty());
    assert!(options.regions.is_empty());
}

#[test]
fn mappability_follows_coordinates() {
    let t = table(
        &["Nom", "Latitude", "Longitude"],
        &[&["A", "48.8", "2.3"], &["B", "", "2.3"], &["C", "48.8", "abc"]],
    );
    let rows = normalize_table(&t);
    assert!(rows[0].is_mappable());
    assert!(!rows[1].is_mappable());
    assert!(!rows[2].is_mappable());
}

#[test]
fn headers_with_stray_spaces_are_recognized() {
    let t = table(&[" Statut ", "CA "], &[&["En discussion", "10"]]);
    let e = &normalize_table(&t)[0];
    assert_eq!(e.status_class, StatusClass::Discussion);
    assert_eq!(e.revenue, Decimal::from(10));
}

#[test]
fn empty_rows_are_emitted_with_defaults() {
    let t = table(&FULL_HEADERS, &[&[], &["", "", "", "", "", "", "", "", "", "", "", "-"]]);
    let rows = normalize_table(&t);
    assert_eq!(rows.len(), 2);
    for (i, e) in rows.iter().enumerate() {
        assert_eq!(e.row_index, i);
        assert_eq!(e.search_label, i.to_string());
        assert_eq!(e.status_class, StatusClass::Unknown);
        assert_eq!(e.revenue, Decimal::ZERO);
        assert!(e.services.is_empty());
        assert!(!e.is_mappable());
        assert!(!e.has_scheduled_visit());
        assert_eq!(e.crm_link, None);
    }
}

#[test]
fn empty_table_yields_nothing() {
    assert!(normalize_table(&RawTable::default()).is_empty());
}

#[test]
fn legacy_name_header_feeds_search_label() {
    let t = table(&["Nom", "Ville"], &[&["Centre B", "Nantes"]]);
    let e = &normalize_table(&t)[0];
    assert_eq!(e.name.as_deref(), Some("Centre B"));
    assert_eq!(e.search_label, "Centre B (Nantes)");
}

#[test]
fn establishment_key_is_stable_and_case_insensitive() {
    let a = table(&["Nom", "Ville", "Latitude"], &[&["Clinique A", "Lyon", "45.7"]]);
    let b = table(&["Nom", "Ville", "Latitude"], &[&["CLINIQUE A", "lyon", "45.7"]]);
    let c = table(&["Nom", "Ville", "Latitude"], &[&["Clinique A", "Lyon", "45.8"]]);
    let ka = &normalize_table(&a)[0].key;
    assert_eq!(ka.len(), 64);
    assert_eq!(ka, &normalize_table(&b)[0].key);
    assert_ne!(ka, &normalize_table(&c)[0].key);
}

#[test]
fn classification_agrees_across_spellings() {
    let t = table(
        &["Statut"],
        &[&["Résilié"], &["RESILIE"], &["  résilié  "], &["Re\u{301}silie\u{301}"]],
    );
    let rows = normalize_table(&t);
    assert!(rows.iter().all(|e| e.status_key == "resilie"));
    assert!(rows.iter().all(|e| e.status_class == StatusClass::Terminated));
}
