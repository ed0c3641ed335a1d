use serde::{Deserialize, Serialize};

/// Which line of the breakdown a score contribution belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VictoryPointsSource {
    TerraformRating,
    Milestones,
    Awards,
    Greenery,
    City,
    VictoryPoints,
}

/// A single labelled contribution shown in the score details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VictoryPointsDetail {
    pub message: String,
    pub victory_point: i32,
}

/// End-of-game score breakdown for one participant.
///
/// Scoring itself is computed elsewhere; this record only stores the result
/// and keeps `total` consistent with the lines it is fed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VictoryPointsBreakdown {
    pub terraform_rating: i32,
    pub milestones: i32,
    pub awards: i32,
    pub greenery: i32,
    pub city: i32,
    pub victory_points: i32,
    pub total: i32,
    pub details_cards: Vec<VictoryPointsDetail>,
    pub details_milestones: Vec<VictoryPointsDetail>,
    pub details_awards: Vec<VictoryPointsDetail>,
}

impl VictoryPointsBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `points` to one line and to the total.
    pub fn set_victory_points(&mut self, source: VictoryPointsSource, points: i32) {
        self.add(source, points, None);
    }

    /// Add `points` with a detail message (card, milestone or award name).
    pub fn set_victory_points_with_detail(
        &mut self,
        source: VictoryPointsSource,
        points: i32,
        message: impl Into<String>,
    ) {
        self.add(source, points, Some(message.into()));
    }

    fn add(&mut self, source: VictoryPointsSource, points: i32, message: Option<String>) {
        let detail = message.map(|message| VictoryPointsDetail {
            message,
            victory_point: points,
        });
        match source {
            VictoryPointsSource::TerraformRating => self.terraform_rating += points,
            VictoryPointsSource::Milestones => {
                self.milestones += points;
                self.details_milestones.extend(detail);
            }
            VictoryPointsSource::Awards => {
                self.awards += points;
                self.details_awards.extend(detail);
            }
            VictoryPointsSource::Greenery => self.greenery += points,
            VictoryPointsSource::City => self.city += points,
            VictoryPointsSource::VictoryPoints => {
                self.victory_points += points;
                self.details_cards.extend(detail);
            }
        }
        self.total += points;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_victory_points_updates_total() {
        let mut vpb = VictoryPointsBreakdown::new();
        vpb.set_victory_points(VictoryPointsSource::VictoryPoints, 1);
        vpb.set_victory_points(VictoryPointsSource::TerraformRating, 20);
        assert_eq!(vpb.victory_points, 1);
        assert_eq!(vpb.terraform_rating, 20);
        assert_eq!(vpb.total, 21);
        assert!(vpb.details_cards.is_empty());
    }

    #[test]
    fn test_details_recorded_for_cards_and_awards() {
        let mut vpb = VictoryPointsBreakdown::new();
        vpb.set_victory_points_with_detail(
            VictoryPointsSource::VictoryPoints,
            2,
            "Lagrange Observatory",
        );
        vpb.set_victory_points_with_detail(VictoryPointsSource::Awards, 5, "Banker");
        assert_eq!(vpb.details_cards[0].message, "Lagrange Observatory");
        assert_eq!(vpb.details_awards[0].victory_point, 5);
        assert_eq!(vpb.total, 7);
    }
}
