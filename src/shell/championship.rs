//! Championship vocabulary on top of the generic graph store
//!
//! Labels, predicates and the handful of graph patterns the console builds
//! and queries: tournaments, teams, players and game results.

use crate::graph::{
    Direction, EdgeFilter, GraphError, GraphResult, GraphStore, Label, NodeId, PropertyValue,
};
use crate::props;
use indexmap::IndexMap;

pub const TOURNAMENT: &str = "Tournament";
pub const TEAM: &str = "Team";
pub const PLAYER: &str = "Player";
pub const GAME: &str = "Game";

pub const PARTICIPATES_IN: &str = "PARTICIPATES_IN";
pub const PLAYS_FOR: &str = "PLAYS_FOR";
pub const HOME_TEAM: &str = "HOME_TEAM";
pub const AWAY_TEAM: &str = "AWAY_TEAM";
pub const WON: &str = "WON";
pub const LOST_TO: &str = "LOST_TO";

/// Team name -> node id, in registration order
pub type TeamRegistry = IndexMap<String, NodeId>;

/// Competition format chosen at setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TournamentFormat {
    RoundRobin,
    Knockout,
    Unspecified,
}

impl TournamentFormat {
    /// Menu choice `1` or `2`; anything else is unspecified
    pub fn from_choice(choice: &str) -> Self {
        match choice.trim() {
            "1" => TournamentFormat::RoundRobin,
            "2" => TournamentFormat::Knockout,
            _ => TournamentFormat::Unspecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentFormat::RoundRobin => "Round Robin",
            TournamentFormat::Knockout => "Knockout",
            TournamentFormat::Unspecified => "Unspecified",
        }
    }
}

/// Result of a game from the home team's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl Outcome {
    /// Match the typed winner against both team names, ignoring case
    ///
    /// Anything that names neither team (including `DRAW`) counts as a draw.
    pub fn from_winner(winner: &str, home: &str, away: &str) -> Self {
        let winner = winner.trim().to_uppercase();
        if winner == home.to_uppercase() {
            Outcome::HomeWin
        } else if winner == away.to_uppercase() {
            Outcome::AwayWin
        } else {
            Outcome::Draw
        }
    }
}

/// A game as shown in "games won" listings
#[derive(Debug, Clone, PartialEq)]
pub struct GameResult {
    pub id: NodeId,
    pub date: String,
    pub score: String,
}

pub fn create_tournament(
    store: &mut GraphStore,
    name: &str,
    year: &str,
    format: TournamentFormat,
) -> NodeId {
    store.create_node(
        TOURNAMENT,
        props! { "name" => name, "year" => year, "format" => format.as_str() },
    )
}

/// Create a team and link it to the tournament
pub fn add_team(
    store: &mut GraphStore,
    tournament: NodeId,
    name: &str,
    city: &str,
) -> GraphResult<NodeId> {
    let team = store.create_node(TEAM, props! { "name" => name, "city" => city });
    store.create_edge(team, PARTICIPATES_IN, tournament)?;
    Ok(team)
}

/// Create a player who plays for `team`
pub fn add_player(
    store: &mut GraphStore,
    team: NodeId,
    name: &str,
    position: &str,
) -> GraphResult<NodeId> {
    if !store.has_node(team) {
        return Err(GraphError::NodeNotFound(team));
    }
    let player = store.create_node(PLAYER, props! { "name" => name, "position" => position });
    store.create_edge(player, PLAYS_FOR, team)?;
    Ok(player)
}

/// Record a game between two teams
///
/// The winner gets a `WON` edge to the game and the loser a `LOST_TO` edge;
/// a draw adds neither.
pub fn record_game(
    store: &mut GraphStore,
    home: NodeId,
    away: NodeId,
    date: &str,
    score: &str,
    outcome: Outcome,
) -> GraphResult<NodeId> {
    for team in [home, away] {
        if !store.has_node(team) {
            return Err(GraphError::NodeNotFound(team));
        }
    }

    let game = store.create_node(GAME, props! { "date" => date, "score" => score });
    store.create_edge(game, HOME_TEAM, home)?;
    store.create_edge(game, AWAY_TEAM, away)?;

    match outcome {
        Outcome::HomeWin => {
            store.create_edge(home, WON, game)?;
            store.create_edge(away, LOST_TO, game)?;
        }
        Outcome::AwayWin => {
            store.create_edge(away, WON, game)?;
            store.create_edge(home, LOST_TO, game)?;
        }
        Outcome::Draw => {}
    }
    Ok(game)
}

fn text_property(store: &GraphStore, id: NodeId, key: &str) -> String {
    store
        .get_node(id)
        .and_then(|n| n.get_property(key))
        .map(|v| v.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Names of players whose position equals `position` exactly
pub fn players_by_position(store: &GraphStore, position: &str) -> Vec<String> {
    store
        .query_by_property(&Label::new(PLAYER), "position", &PropertyValue::from(position))
        .into_iter()
        .map(|(id, _)| text_property(store, id, "name"))
        .collect()
}

/// Names of live players with a `PLAYS_FOR` edge into `team`
pub fn players_of_team(store: &GraphStore, team: NodeId) -> Vec<String> {
    store
        .neighbors(team, PLAYS_FOR, Direction::Incoming)
        .into_iter()
        .filter(|player| player.exists)
        .map(|player| player.name)
        .collect()
}

/// Live games `team` has a `WON` edge to
pub fn games_won_by(store: &GraphStore, team: NodeId) -> Vec<GameResult> {
    store
        .find_edges(&EdgeFilter::outgoing(team).predicate(WON))
        .into_iter()
        .filter(|edge| store.has_node(edge.object))
        .map(|edge| GameResult {
            id: edge.object,
            date: text_property(store, edge.object, "date"),
            score: text_property(store, edge.object, "score"),
        })
        .collect()
}

/// A small ready-made championship
pub fn sample_championship() -> GraphResult<(GraphStore, TeamRegistry)> {
    let mut store = GraphStore::new();
    let mut teams = TeamRegistry::new();
    let cup = create_tournament(&mut store, "Spring Cup", "2024", TournamentFormat::RoundRobin);

    for (name, city) in [
        ("Lions", "Porto"),
        ("Falcons", "Lisbon"),
        ("Wolves", "Braga"),
        ("Sharks", "Faro"),
    ] {
        let id = add_team(&mut store, cup, name, city)?;
        teams.insert(name.to_string(), id);
    }

    let squad = [
        ("Lions", "Rui", "Forward"),
        ("Lions", "Ines", "Goalkeeper"),
        ("Falcons", "Tiago", "Forward"),
        ("Wolves", "Marta", "Defender"),
        ("Sharks", "Joao", "Midfielder"),
    ];
    for (team, player, position) in squad {
        add_player(&mut store, teams[team], player, position)?;
    }

    record_game(&mut store, teams["Lions"], teams["Falcons"], "2024-03-02", "2x1", Outcome::HomeWin)?;
    record_game(&mut store, teams["Wolves"], teams["Sharks"], "2024-03-03", "0x0", Outcome::Draw)?;
    record_game(&mut store, teams["Sharks"], teams["Lions"], "2024-03-10", "1x3", Outcome::AwayWin)?;

    Ok((store, teams))
}
