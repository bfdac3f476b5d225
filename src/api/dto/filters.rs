//! Query parameters for list endpoints.

use serde::Deserialize;

use crate::error::AppError;
use crate::utils::id_list::parse_id_list;

/// `GET /visits?places=1,2`
#[derive(Debug, Default, Deserialize)]
pub struct VisitFilter {
    pub places: Option<String>,
}

impl VisitFilter {
    /// Place ids to restrict the list to, `None` for no filter.
    pub fn place_ids(&self) -> Result<Option<Vec<i64>>, AppError> {
        parse_id_list(self.places.as_deref()).map_err(|msg| AppError::field("places", msg))
    }
}

/// `GET /plans?visits=1,2`
#[derive(Debug, Default, Deserialize)]
pub struct PlanFilter {
    pub visits: Option<String>,
}

impl PlanFilter {
    pub fn visit_ids(&self) -> Result<Option<Vec<i64>>, AppError> {
        parse_id_list(self.visits.as_deref()).map_err(|msg| AppError::field("visits", msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_filter() {
        let filter = VisitFilter {
            places: Some("3, 1".to_string()),
        };
        assert_eq!(filter.place_ids().unwrap(), Some(vec![3, 1]));
        assert_eq!(VisitFilter::default().place_ids().unwrap(), None);
    }

    #[test]
    fn test_malformed_filter_is_field_error() {
        let filter = PlanFilter {
            visits: Some("1,x".to_string()),
        };
        let (_, info) = filter.visit_ids().unwrap_err().to_error_info();
        assert!(info.details["visits"].is_array());
    }
}
