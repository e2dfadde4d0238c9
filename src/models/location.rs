//! Helpers for the map links stored in `Center::location_link`.

/// Link that opens the given coordinates in Google Maps.
pub fn map_link(lat: f64, lng: f64) -> String {
    format!("https://www.google.com/maps?q={},{}", lat, lng)
}

/// Extract `(lat, lng)` from a link containing `q=<lat>,<lng>`.
///
/// Every `q=` is tried in order; the first one followed by a coordinate pair wins.
pub fn coordinates(link: &str) -> Option<(f64, f64)> {
    link.match_indices("q=")
        .find_map(|(start, _)| parse_pair(&link[start + 2..]))
}

fn parse_pair(rest: &str) -> Option<(f64, f64)> {
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ',' || c == '-'))
        .unwrap_or(rest.len());
    let (lat, lng) = rest[..end].split_once(',')?;
    Some((lat.parse().ok()?, lng.parse().ok()?))
}

/// Embeddable map URL for a stored link, if the link carries coordinates.
pub fn embed_url(link: &str) -> Option<String> {
    let (lat, lng) = coordinates(link)?;
    Some(format!(
        "https://maps.google.com/maps?q={},{}&hl=bn&z=15&output=embed",
        lat, lng
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_link_round_trip() {
        let link = map_link(22.2513, 91.7915);
        assert_eq!(link, "https://www.google.com/maps?q=22.2513,91.7915");
        assert_eq!(coordinates(&link), Some((22.2513, 91.7915)));
    }

    #[test]
    fn test_coordinates_ignore_trailing_params() {
        assert_eq!(
            coordinates("https://maps.google.com/?q=1.5,2.25&z=15"),
            Some((1.5, 2.25))
        );
        assert_eq!(coordinates("https://maps.google.com/?z=15"), None);
        assert_eq!(coordinates("q=abc,def"), None);
    }

    #[test]
    fn test_coordinates_skip_other_q_params() {
        assert_eq!(
            coordinates("https://maps.example.com/?hq=x&q=1,2"),
            Some((1.0, 2.0))
        );
        assert_eq!(
            coordinates("https://maps.example.com/?q=here&q=3.5,4.5"),
            Some((3.5, 4.5))
        );
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            embed_url("https://www.google.com/maps?q=1.5,2.25").as_deref(),
            Some("https://maps.google.com/maps?q=1.5,2.25&hl=bn&z=15&output=embed")
        );
        assert_eq!(embed_url(""), None);
    }
}
