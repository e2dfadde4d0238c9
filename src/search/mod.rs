//! In-memory search over the center list.
//!
//! Text fields (names, designations) match case-insensitively; numeric labels
//! (center numbers, mobile numbers) match on the raw query.

use serde::Serialize;

use crate::models::Center;

/// Summary counts shown on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryStats {
    pub total_centers: usize,
    pub total_personnel: usize,
}

/// Centers matching `query`, in document order. An empty query matches everything.
pub fn filter_centers<'a>(centers: &'a [Center], query: &str) -> Vec<&'a Center> {
    if query.is_empty() {
        return centers.iter().collect();
    }

    let lower = query.to_lowercase();
    centers
        .iter()
        .filter(|center| matches(center, query, &lower))
        .collect()
}

fn matches(center: &Center, raw: &str, lower: &str) -> bool {
    center.name.to_lowercase().contains(lower)
        || center.center_number.contains(raw)
        || center.important_persons.iter().any(|p| {
            p.name.to_lowercase().contains(lower)
                || p.mobile.contains(raw)
                || p.designation.to_lowercase().contains(lower)
        })
}

pub fn stats(centers: &[Center]) -> DirectoryStats {
    DirectoryStats {
        total_centers: centers.len(),
        total_personnel: centers.iter().map(|c| c.important_persons.len()).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Person;

    fn fixture() -> Vec<Center> {
        vec![
            Center {
                id: "1".to_string(),
                center_number: "০১".to_string(),
                name: "Patenga Government School".to_string(),
                booth_count: "8".to_string(),
                voter_count: "3200".to_string(),
                room_location: "Ground floor".to_string(),
                location_link: String::new(),
                important_persons: vec![Person {
                    id: "p1".to_string(),
                    name: "Karim".to_string(),
                    designation: "Presiding Officer".to_string(),
                    mobile: "01711111111".to_string(),
                }],
            },
            Center {
                id: "2".to_string(),
                center_number: "০২".to_string(),
                name: "EPZ High School".to_string(),
                booth_count: "6".to_string(),
                voter_count: "2100".to_string(),
                room_location: String::new(),
                location_link: String::new(),
                important_persons: vec![
                    Person {
                        id: "p2".to_string(),
                        name: "Salma".to_string(),
                        designation: "Polling Agent".to_string(),
                        mobile: "01822222222".to_string(),
                    },
                    Person {
                        id: "p3".to_string(),
                        name: "Jamal".to_string(),
                        designation: "Guard".to_string(),
                        mobile: "01933333333".to_string(),
                    },
                ],
            },
        ]
    }

    fn ids(found: Vec<&Center>) -> Vec<&str> {
        found.into_iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_all() {
        let centers = fixture();
        assert_eq!(ids(filter_centers(&centers, "")), vec!["1", "2"]);
    }

    #[test]
    fn test_matches_names_case_insensitively() {
        let centers = fixture();
        assert_eq!(ids(filter_centers(&centers, "patenga")), vec!["1"]);
        assert_eq!(ids(filter_centers(&centers, "HIGH")), vec!["2"]);
        assert_eq!(ids(filter_centers(&centers, "school")), vec!["1", "2"]);
    }

    #[test]
    fn test_matches_people_and_numbers() {
        let centers = fixture();
        assert_eq!(ids(filter_centers(&centers, "salma")), vec!["2"]);
        assert_eq!(ids(filter_centers(&centers, "presiding")), vec!["1"]);
        assert_eq!(ids(filter_centers(&centers, "01933")), vec!["2"]);
        assert_eq!(ids(filter_centers(&centers, "০১")), vec!["1"]);
        assert!(filter_centers(&centers, "nowhere").is_empty());
    }

    #[test]
    fn test_stats() {
        let centers = fixture();
        assert_eq!(
            stats(&centers),
            DirectoryStats {
                total_centers: 2,
                total_personnel: 3
            }
        );
    }
}
