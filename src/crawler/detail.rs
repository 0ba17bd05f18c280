//! Detail page field extractor
//!
//! A building's detail page carries a `.building_info` section with a heading
//! and an info table. The first rows of the table are fixed-position
//! (architect, location, GPS); everything after that is optional and
//! label-driven, so a missing row never misaligns the fields that follow.

use crate::building::Building;
use crate::crawler::fetcher::fetch_page;
use crate::crawler::listing::child_elements;
use crate::crawler::text::string_between;
use crate::ScrapeError;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

const ROW_LABEL_DATE: &str = "Date";
const ROW_LABEL_STYLE: &str = "Style";
const ROW_LABEL_TYPE: &str = "Type";
const ROW_LABEL_ALIAS: &str = "Alias";
const ROW_LABEL_NOTES: &str = "Notes";

/// Fetches a detail page and extracts the building record
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The building's detail page URL
///
/// # Returns
///
/// * `Ok(Building)` - The populated record
/// * `Err(ScrapeError)` - Fetch/parse failure, or `BuildingNotFound` when
///   both name and architect are empty (nonexistent or mistyped slug)
pub async fn extract_building(client: &Client, url: &str) -> Result<Building, ScrapeError> {
    let body = fetch_page(client, url).await?;
    extract_building_document(&body, url)
}

/// Extracts the building record from detail page markup
pub fn extract_building_document(html: &str, url: &str) -> Result<Building, ScrapeError> {
    let document = Html::parse_document(html);
    let mut building = Building::default();

    if let Some(info) = select_first(&document, ".building_info") {
        building.name = select_first_in(info, "h1")
            .map(element_text)
            .unwrap_or_default();

        let rows = select_all_in(info, "#building_info_tbl tr");

        // Architect row
        if let Some(architect_row) = rows.first() {
            building.architect = select_first_in(*architect_row, "a")
                .map(element_text)
                .unwrap_or_default();

            // Location row: the architect row's next sibling. Links map
            // positionally; fewer than three leaves the remainder empty.
            if let Some(location_row) = next_sibling_element(*architect_row) {
                for (index, link) in links_in(location_row).into_iter().enumerate() {
                    match index {
                        0 => building.city = element_text(link),
                        1 => building.state = element_text(link),
                        2 => building.country = element_text(link),
                        _ => break,
                    }
                }
            }
        }

        // GPS row
        match rows.get(2) {
            Some(gps_row) => {
                let (latitude, longitude) = parse_gps(&gps_row.inner_html());
                building.latitude = latitude;
                building.longitude = longitude;
            }
            None => {
                tracing::warn!("No GPS row on {}", url);
            }
        }

        apply_labeled_rows(&rows, &mut building);
    }

    // Existence check: a page with neither a name nor an architect does not
    // describe a real building.
    if !building.is_valid() {
        return Err(ScrapeError::BuildingNotFound {
            url: url.to_string(),
        });
    }

    Ok(building)
}

/// Consumes rows 3.. with a label-driven cursor
///
/// Each step compares the current row's first-cell text, case-sensitively,
/// against the next unconsumed label in the Date/Style/Type/Alias/Notes
/// sequence. On a match the field is filled and the cursor advances; on a
/// mismatch the field stays empty and the same row is re-tested against the
/// next label.
fn apply_labeled_rows(rows: &[ElementRef], building: &mut Building) {
    // Date/Alias/Notes live in the second cell; Style/Type in the row's link
    let fields: [(&str, RowValue, &mut String); 5] = [
        (ROW_LABEL_DATE, RowValue::SecondCell, &mut building.date),
        (ROW_LABEL_STYLE, RowValue::LinkText, &mut building.style),
        (
            ROW_LABEL_TYPE,
            RowValue::LinkText,
            &mut building.building_type,
        ),
        (ROW_LABEL_ALIAS, RowValue::SecondCell, &mut building.alias),
        (ROW_LABEL_NOTES, RowValue::SecondCell, &mut building.notes),
    ];

    let mut cursor = 3;
    for (label, kind, slot) in fields {
        let Some(row) = rows.get(cursor) else {
            continue;
        };

        let cells: Vec<ElementRef> = child_elements(*row).collect();
        let row_label: String = cells.first().map(|c| element_text(*c)).unwrap_or_default();
        if row_label != label {
            continue;
        }

        *slot = match kind {
            RowValue::SecondCell => cells.get(1).map(|c| element_text(*c)).unwrap_or_default(),
            RowValue::LinkText => select_first_in(*row, "a")
                .map(element_text)
                .unwrap_or_default(),
        };
        cursor += 1;
    }
}

/// Where a labeled row keeps its value
enum RowValue {
    SecondCell,
    LinkText,
}

/// Pulls latitude and longitude out of the GPS row's raw inner markup
///
/// The coordinates appear either as two separately parenthesized values with
/// a comma between the groups, or as one parenthesized pair with the comma
/// inside. The first parenthesized value (up to an embedded comma) is the
/// latitude; the longitude comes from the remainder after the first comma.
fn parse_gps(markup: &str) -> (String, String) {
    let first = string_between(markup, "(", ")");
    if first.is_empty() {
        return (String::new(), String::new());
    }

    if let Some(comma) = first.find(',') {
        let latitude = first[..comma].to_string();
        let longitude = first[comma + 1..].trim_start().to_string();
        return (latitude, longitude);
    }

    let latitude = first.to_string();
    let longitude = match markup.find(',') {
        Some(pos) => string_between(&markup[pos..], "(", ")").to_string(),
        None => String::new(),
    };
    (latitude, longitude)
}

/// First descendant matching a selector, or None for no match
fn select_first<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

/// First descendant of an element matching a selector
fn select_first_in<'a>(element: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    element.select(&selector).next()
}

/// All descendants of an element matching a selector, in document order
fn select_all_in<'a>(element: ElementRef<'a>, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(selector) => element.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// All anchor descendants of an element, in document order
fn links_in(element: ElementRef) -> Vec<ElementRef> {
    select_all_in(element, "a")
}

/// The concatenated text of an element, passed through verbatim
fn element_text(element: ElementRef) -> String {
    element.text().collect()
}

/// The architect row's next sibling row
fn next_sibling_element(element: ElementRef) -> Option<ElementRef> {
    element.next_siblings().filter_map(ElementRef::wrap).next()
}
