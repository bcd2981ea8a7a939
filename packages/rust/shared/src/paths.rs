//! Canonical URL paths for entity pages.

/// Suffix appended to state and lane slugs in canonical paths.
pub const STATE_SUFFIX: &str = "-truck-dispatch-service";

/// Suffix appended to truck-type slugs in canonical paths.
pub const TRUCK_TYPE_SUFFIX: &str = "-dispatch-service";

pub fn state_path(state_slug: &str) -> String {
    format!("/states/{state_slug}{STATE_SUFFIX}")
}

pub fn lane_path(state_slug: &str, lane_slug: &str) -> String {
    format!("/states/{state_slug}{STATE_SUFFIX}/lanes/{lane_slug}{STATE_SUFFIX}")
}

pub fn truck_type_path(slug: &str) -> String {
    format!("/truck-type/{slug}{TRUCK_TYPE_SUFFIX}")
}

pub fn partner_path(slug: &str) -> String {
    format!("/partners/{slug}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_paths() {
        assert_eq!(state_path("texas"), "/states/texas-truck-dispatch-service");
        assert_eq!(
            lane_path("texas", "dallas-to-atlanta"),
            "/states/texas-truck-dispatch-service/lanes/dallas-to-atlanta-truck-dispatch-service"
        );
        assert_eq!(truck_type_path("reefer"), "/truck-type/reefer-dispatch-service");
        assert_eq!(partner_path("rxo"), "/partners/rxo");
    }
}
