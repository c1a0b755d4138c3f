// Team roster. Each penguin wears one team's colors.

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team {
    pub id: u32,
    pub name: &'static str,
    pub color: [u8; 3],
}

const fn team(id: u32, name: &'static str, color: [u8; 3]) -> Team {
    Team { id, name, color }
}

pub const TEAMS: [Team; 20] = [
    team(1, "Red Robins", [255, 0, 0]),
    team(2, "Blue Blizzards", [0, 0, 255]),
    team(3, "Green Ghosts", [0, 255, 0]),
    team(4, "Yellow Yaks", [255, 255, 0]),
    team(5, "Purple Penguins", [128, 0, 128]),
    team(6, "Orange Otters", [255, 165, 0]),
    team(7, "Cyan Cyclones", [0, 255, 255]),
    team(8, "Pink Panthers", [255, 192, 203]),
    team(9, "Brown Bears", [165, 42, 42]),
    team(10, "Grey Geese", [128, 128, 128]),
    team(11, "Golden Griffins", [255, 215, 0]),
    team(12, "Silver Sharks", [192, 192, 192]),
    team(13, "Bronze Badgers", [205, 127, 50]),
    team(14, "Navy Narwhals", [0, 0, 128]),
    team(15, "Teal Turtles", [0, 128, 128]),
    team(16, "Maroon Monkeys", [128, 0, 0]),
    team(17, "Olive Owls", [128, 128, 0]),
    team(18, "Lime Lions", [0, 128, 0]),
    team(19, "Indigo Iguanas", [75, 0, 130]),
    team(20, "Violet Vultures", [238, 130, 238]),
];

pub fn team_by_id(id: u32) -> Option<Team> {
    TEAMS.iter().copied().find(|t| t.id == id)
}

/// The two sides of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matchup {
    pub player: Team,
    pub opponent: Team,
}

impl Matchup {
    /// Resolve configured team ids. Unknown ids fall back to the first
    /// team for the player and to a random draw for the opponent.
    pub fn pick<R: Rng>(player_id: u32, opponent_id: Option<u32>, rng: &mut R) -> Self {
        let player = team_by_id(player_id).unwrap_or_else(|| {
            tracing::warn!("Unknown player team {}, using {}", player_id, TEAMS[0].name);
            TEAMS[0]
        });

        let opponent = opponent_id
            .and_then(team_by_id)
            .filter(|t| t.id != player.id)
            .unwrap_or_else(|| random_opponent(player.id, rng));

        Self { player, opponent }
    }
}

fn random_opponent<R: Rng>(player_id: u32, rng: &mut R) -> Team {
    let candidates: Vec<Team> = TEAMS.iter().copied().filter(|t| t.id != player_id).collect();
    // The roster always has more than one team
    *candidates.choose(rng).unwrap_or(&TEAMS[1])
}
