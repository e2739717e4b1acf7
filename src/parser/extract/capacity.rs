use std::sync::LazyLock;

use regex::Regex;

use crate::model::Capacity;

static SITES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:full\s*hookup\s*)?(?:camp)?sites?").unwrap());

pub fn extract(text: &str) -> Capacity {
    Capacity {
        max_occupancy: None,
        total_sites: SITES_RE
            .captures(text)
            .and_then(|caps| caps[1].parse::<u32>().ok()),
        reservation_required: text.to_lowercase().contains("reservation"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_count() {
        assert_eq!(extract("45 full hookup sites").total_sites, Some(45));
        assert_eq!(extract("12 campsites along the river").total_sites, Some(12));
        assert_eq!(extract("primitive camping only").total_sites, None);
    }

    #[test]
    fn reservation_keyword() {
        assert!(extract("Reservations recommended").reservation_required);
        assert!(!extract("first come, first served").reservation_required);
    }
}
