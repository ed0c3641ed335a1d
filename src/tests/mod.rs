//! Crate-internal scenario tests and shared fixtures.


/// Builders shared by the co-located unit tests.
pub(crate) mod fixtures {
    use crate::color::Color;
    use crate::game_state::GameState;
    use crate::ids::{GameId, PlayerId};
    use crate::options::GameOptions;
    use crate::player::Player;

    /// A seeded session with one participant per id, coloured in seat order.
    pub(crate) fn game(ids: &[&str]) -> GameState {
        let players = ids
            .iter()
            .zip(Color::ALL)
            .map(|(&id, color)| Player::new(PlayerId::new(id), id, color))
            .collect();
        GameState::new(GameId::new("foobar"), players, GameOptions::seeded(0))
    }

    /// Payload rows from string slices.
    pub(crate) fn payload(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }
}
