//! Review Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Review lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Draft,
    Submitted,
    Completed,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 3] = [
        ReviewStatus::Draft,
        ReviewStatus::Submitted,
        ReviewStatus::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReviewStatus::Draft => "draft",
            ReviewStatus::Submitted => "submitted",
            ReviewStatus::Completed => "completed",
        }
    }
}

/// Performance review entity as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub id: Option<i64>,
    /// Reviewed employee reference
    pub emp_id: i64,
    /// Display name cached at creation time
    #[serde(default)]
    pub emp_name: String,
    pub reviewer_id: i64,
    #[serde(default)]
    pub reviewer_name: String,
    pub review_cycle_id: i64,
    /// Cycle name cached at creation time
    #[serde(default)]
    pub cycle_name: String,
    /// In [0, 5] at 0.5 increments
    pub rating: f64,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(default)]
    pub created_date: Option<NaiveDate>,
}

/// Create/update payload for reviews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewPayload {
    pub emp_id: i64,
    pub emp_name: String,
    pub reviewer_id: i64,
    pub reviewer_name: String,
    pub review_cycle_id: i64,
    pub cycle_name: String,
    pub rating: f64,
    pub comments: String,
    pub status: ReviewStatus,
    pub created_date: NaiveDate,
}

/// Arithmetic mean of the ratings rounded to two decimals, or 0.0 for
/// an empty set.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: f64 = reviews.iter().map(|review| review.rating).sum();
    let mean = sum / reviews.len() as f64;
    (mean * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn review_with_rating(rating: f64) -> Review {
        Review {
            id: Some(1),
            emp_id: 3,
            emp_name: "Amit Patel".to_string(),
            reviewer_id: 5,
            reviewer_name: "Prasad".to_string(),
            review_cycle_id: 2,
            cycle_name: "H1 2025".to_string(),
            rating,
            comments: "solid quarter".to_string(),
            status: ReviewStatus::Submitted,
            created_date: None,
        }
    }

    #[test]
    fn average_of_empty_set_is_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        let reviews: Vec<Review> = [4.5, 4.0, 3.5].into_iter().map(review_with_rating).collect();
        assert_eq!(average_rating(&reviews), 4.0);

        let reviews: Vec<Review> = [5.0, 4.5, 4.5].into_iter().map(review_with_rating).collect();
        assert_eq!(average_rating(&reviews), 4.67);
    }

    #[test]
    fn status_round_trips_lowercase() {
        for status in ReviewStatus::ALL {
            let wire = serde_json::to_value(status).unwrap();
            assert_eq!(wire, json!(status.label()));
        }
    }

    #[test]
    fn deserializes_backend_row() {
        let review: Review = serde_json::from_value(json!({
            "id": 9,
            "emp_id": 1,
            "emp_name": "Rajesh Kumar",
            "reviewer_id": 5,
            "reviewer_name": "Prasad",
            "review_cycle_id": 2,
            "rating": 4.5,
            "comments": "exceeded expectations",
            "status": "submitted",
            "created_date": "2025-06-15"
        }))
        .unwrap();
        assert_eq!(review.rating, 4.5);
        assert_eq!(review.status, ReviewStatus::Submitted);
        assert_eq!(review.cycle_name, "");
    }
}
