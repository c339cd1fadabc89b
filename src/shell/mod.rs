//! Interactive console for building and querying a championship graph
//!
//! The shell is generic over its input and output so it can be driven by a
//! script in tests. It talks to the graph only through `GraphStore`
//! operations and the helpers in [`championship`].

pub mod championship;

use crate::config::AppConfig;
use crate::graph::{GraphError, GraphStore, GraphSummary, NodeId, PropertyMap};
use crate::render::GraphRenderer;
use championship::{Outcome, TeamRegistry, TournamentFormat};
use comfy_table::{ContentArrangement, Table};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::{info, warn};

/// Shell errors
#[derive(Error, Debug)]
pub enum ShellError {
    /// Input ran out; treated as a request to exit
    #[error("end of input")]
    EndOfInput,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type ShellResult<T> = Result<T, ShellError>;

/// Format a property bag as `{key: value, ...}`
pub fn format_properties(properties: &PropertyMap) -> String {
    let body: Vec<String> = properties
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect();
    format!("{{{}}}", body.join(", "))
}

/// Label distribution as a table
pub fn summary_table(summary: &GraphSummary) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Label", "Nodes"]);
    for (label, count) in &summary.label_distribution {
        table.add_row(vec![label.to_string(), count.to_string()]);
    }
    table
}

/// Console session over a fresh graph
pub struct Shell<R, W> {
    input: R,
    output: W,
    store: GraphStore,
    renderer: GraphRenderer,
    config: AppConfig,
    teams: TeamRegistry,
    tournament: Option<NodeId>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, config: AppConfig) -> Self {
        Self {
            input,
            output,
            store: GraphStore::new(),
            renderer: GraphRenderer::new(config.render.clone()),
            config,
            teams: TeamRegistry::new(),
            tournament: None,
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn teams(&self) -> &TeamRegistry {
        &self.teams
    }

    pub fn tournament(&self) -> Option<NodeId> {
        self.tournament
    }

    pub fn into_store(self) -> GraphStore {
        self.store
    }

    /// Run setup and then the main menu until exit or end of input
    pub fn run(&mut self) -> ShellResult<()> {
        writeln!(self.output, "\n=============================================")?;
        writeln!(self.output, "        Championship Knowledge Graph        ")?;
        writeln!(self.output, "=============================================")?;
        writeln!(self.output, "Create the championship to get started.")?;

        match self.setup_championship().and_then(|_| self.main_menu()) {
            Ok(()) | Err(ShellError::EndOfInput) => {
                writeln!(self.output, "\nShutting down. Bye!")?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn prompt(&mut self, text: &str) -> ShellResult<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    fn confirm(&mut self, text: &str) -> ShellResult<bool> {
        let answer = self.prompt(text)?;
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    fn list_teams(&mut self) -> ShellResult<()> {
        let names: Vec<&str> = self.teams.keys().map(String::as_str).collect();
        writeln!(self.output, "Available teams: {:?}", names)?;
        Ok(())
    }

    fn lookup_team(&mut self, prompt: &str) -> ShellResult<Option<(String, NodeId)>> {
        self.list_teams()?;
        let name = self.prompt(prompt)?;
        Ok(self.teams.get(&name).map(|&id| (name, id)))
    }

    /// Tournament, teams, initial players and initial games
    pub fn setup_championship(&mut self) -> ShellResult<()> {
        writeln!(self.output, "\n--- CHAMPIONSHIP SETUP ---")?;
        let name = self.prompt("1. Championship name: ")?;
        let year = self.prompt("2. Championship year: ")?;
        let choice = self.prompt(
            "3. Format:\n   [1] Round Robin\n   [2] Knockout\n   Choose (1 or 2): ",
        )?;
        let format = TournamentFormat::from_choice(&choice);
        if format == TournamentFormat::Unspecified {
            writeln!(self.output, "Invalid format option. Using 'Unspecified'.")?;
        }

        let tournament = championship::create_tournament(&mut self.store, &name, &year, format);
        self.tournament = Some(tournament);
        writeln!(self.output, "\n[OK] Tournament '{}' created with ID: {}.", name, tournament)?;

        let min_teams = self.config.shell.min_teams;
        writeln!(self.output, "\n--- TEAM REGISTRATION (minimum {}) ---", min_teams)?;
        while self.teams.len() < min_teams || self.confirm("Add another team? (y/n): ")? {
            writeln!(self.output, "\nTeam #{}", self.teams.len() + 1)?;
            let team_name = loop {
                let name = self.prompt("Team name: ")?;
                if !self.teams.contains_key(&name) {
                    break name;
                }
                writeln!(self.output, "Team '{}' is already registered. Choose another name.", name)?;
            };
            let city = self.prompt("Team city: ")?;
            let id = championship::add_team(&mut self.store, tournament, &team_name, &city)?;
            self.teams.insert(team_name.clone(), id);
            writeln!(self.output, "[OK] Team '{}' added. ID: {}.", team_name, id)?;
        }

        if !self.teams.is_empty() {
            writeln!(self.output, "\n--- INITIAL PLAYERS ---")?;
            let offers = self.teams.len() * 3 + 3;
            for i in 0..offers {
                let (team_name, team_id) = match self.teams.get_index(i % self.teams.len()) {
                    Some((name, &id)) => (name.clone(), id),
                    None => break,
                };
                if self.confirm(&format!("Add a player to {}? (y/n): ", team_name))? {
                    let player = self.prompt(&format!("Player name for {}: ", team_name))?;
                    let position = self.prompt("Position (e.g. Forward): ")?;
                    championship::add_player(&mut self.store, team_id, &player, &position)?;
                    writeln!(self.output, "  [OK] Player '{}' added.", player)?;
                }
            }

            let min_games = self.config.shell.min_games;
            writeln!(self.output, "\n--- INITIAL GAMES (minimum {}) ---", min_games)?;
            let mut games = 0;
            while games < min_games || self.confirm("Register another game? (y/n): ")? {
                writeln!(self.output, "\nGame #{}", games + 1)?;
                if self.register_game()?.is_some() {
                    games += 1;
                }
            }
        }

        info!(nodes = self.store.node_count(), "championship setup complete");
        writeln!(
            self.output,
            "\n[INFO] Initial setup complete. Total nodes in the graph: {}.",
            self.store.node_count()
        )?;
        Ok(())
    }

    /// Prompt for a game; `None` when a team name is unknown
    pub fn register_game(&mut self) -> ShellResult<Option<NodeId>> {
        writeln!(self.output, "\n--- NEW GAME ---")?;
        self.list_teams()?;
        let home = self.prompt("Home team name: ")?;
        let away = self.prompt("Away team name: ")?;

        let (home_id, away_id) = match (self.teams.get(&home), self.teams.get(&away)) {
            (Some(&h), Some(&a)) => (h, a),
            _ => {
                writeln!(self.output, "One or both teams were not found. Going back.")?;
                return Ok(None);
            }
        };

        let date = self.prompt("Game date (YYYY-MM-DD): ")?;
        let score = self.prompt("Score (e.g. 2x1): ")?;
        let winner = self.prompt("Winner (team name or 'DRAW'): ")?;
        let outcome = Outcome::from_winner(&winner, &home, &away);

        let game =
            championship::record_game(&mut self.store, home_id, away_id, &date, &score, outcome)?;
        writeln!(self.output, "[OK] Game added. Result: {}. ID: {}", score, game)?;
        Ok(Some(game))
    }

    fn add_player(&mut self) -> ShellResult<()> {
        writeln!(self.output, "\n--- NEW PLAYER ---")?;
        let Some((team_name, team_id)) = self.lookup_team("Team the player plays for: ")? else {
            writeln!(self.output, "Team not found. Going back.")?;
            return Ok(());
        };

        let player = self.prompt("Player name: ")?;
        let position = self.prompt("Position (e.g. Forward): ")?;
        championship::add_player(&mut self.store, team_id, &player, &position)?;
        writeln!(self.output, "[OK] Player '{}' added to {}.", player, team_name)?;
        Ok(())
    }

    fn add_menu(&mut self) -> ShellResult<()> {
        loop {
            writeln!(self.output, "\n--- ADD TO THE GRAPH ---")?;
            writeln!(self.output, "1. Add a player to a team")?;
            writeln!(self.output, "2. Add a game result")?;
            writeln!(self.output, "3. Back to main menu")?;

            match self.prompt("Choose an option: ")?.as_str() {
                "1" => self.add_player()?,
                "2" => {
                    self.register_game()?;
                }
                "3" => return Ok(()),
                _ => writeln!(self.output, "Invalid option.")?,
            }
        }
    }

    fn query_menu(&mut self) -> ShellResult<()> {
        loop {
            writeln!(self.output, "\n--- GRAPH QUERIES ---")?;
            writeln!(self.output, "1. Find players by position (property lookup)")?;
            writeln!(self.output, "2. Find players of a team (inverse relationship)")?;
            writeln!(self.output, "3. Find games won by a team")?;
            writeln!(self.output, "4. Back to main menu")?;

            match self.prompt("Choose an option: ")?.as_str() {
                "1" => {
                    let position = self.prompt("Position to search for (e.g. Forward): ")?;
                    let names = championship::players_by_position(&self.store, &position);
                    writeln!(self.output, "\nResults for position '{}':", position)?;
                    if names.is_empty() {
                        writeln!(self.output, "No players found for that position.")?;
                    }
                    for name in names {
                        writeln!(self.output, "  - {}", name)?;
                    }
                }
                "2" => match self.lookup_team("Team to list players for: ")? {
                    Some((team_name, team_id)) => {
                        let names = championship::players_of_team(&self.store, team_id);
                        writeln!(self.output, "\nPlayers who PLAY_FOR {}:", team_name)?;
                        if names.is_empty() {
                            writeln!(self.output, "No players found for this team.")?;
                        }
                        for name in names {
                            writeln!(self.output, "  - {}", name)?;
                        }
                    }
                    None => writeln!(self.output, "Team not found.")?,
                },
                "3" => match self.lookup_team("Team to list wins for: ")? {
                    Some((team_name, team_id)) => {
                        let games = championship::games_won_by(&self.store, team_id);
                        writeln!(self.output, "\nGames won by {}:", team_name)?;
                        if games.is_empty() {
                            writeln!(self.output, "{} has not won any recorded game.", team_name)?;
                        }
                        for game in games {
                            writeln!(self.output, "  - Game {} (Score: {})", game.date, game.score)?;
                        }
                    }
                    None => writeln!(self.output, "Team not found.")?,
                },
                "4" => return Ok(()),
                _ => writeln!(self.output, "Invalid option.")?,
            }
        }
    }

    /// Print counts and the label distribution
    pub fn print_summary(&mut self) -> ShellResult<()> {
        let summary = self.store.summarize();
        writeln!(self.output, "\n--- Knowledge Graph Summary ---")?;
        writeln!(self.output, "Total nodes: {}", summary.node_count)?;
        writeln!(self.output, "Total relationships (edges): {}", summary.edge_count)?;
        writeln!(self.output, "{}", summary_table(&summary))?;
        Ok(())
    }

    /// Print a node and its outgoing relationships
    pub fn print_node_detail(&mut self, id: NodeId) -> ShellResult<()> {
        let detail = match self.store.node_detail(id) {
            Ok(detail) => detail,
            Err(GraphError::NodeNotFound(_)) => {
                writeln!(self.output, "Node {} not found.", id)?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        writeln!(self.output, "\n--- Node details: {} ({}) ---", id, detail.node.label)?;
        writeln!(self.output, "Properties: {}", format_properties(&detail.node.properties))?;
        writeln!(self.output, "Outgoing relationships:")?;
        if detail.outgoing.is_empty() {
            writeln!(self.output, "  No outgoing relationships found.")?;
        }
        for (predicate, target) in &detail.outgoing {
            writeln!(
                self.output,
                "  -> {} -> {} ({}: {})",
                predicate, target.id, target.label, target.name
            )?;
        }
        Ok(())
    }

    fn inspect(&mut self) -> ShellResult<()> {
        self.print_summary()?;
        if self.store.node_count() == 0 {
            return Ok(());
        }
        let token = self.prompt("Enter a node ID to see its details (e.g. N1): ")?;
        match token.parse::<NodeId>() {
            Ok(id) => self.print_node_detail(id),
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                Ok(())
            }
        }
    }

    fn delete_node(&mut self) -> ShellResult<()> {
        let token = self.prompt("Node ID to delete (e.g. N5): ")?;
        let id = match token.parse::<NodeId>() {
            Ok(id) => id,
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                return Ok(());
            }
        };

        match self.store.delete_node(id) {
            Ok(_) => {
                self.teams.retain(|_, team| *team != id);
                if self.tournament == Some(id) {
                    self.tournament = None;
                }
                writeln!(self.output, "[OK] Node {} and its relationships removed.", id)?;
            }
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(())
    }

    /// Render the graph; failures are reported, never fatal
    pub fn render(&mut self) -> ShellResult<()> {
        match self.renderer.render(&self.store) {
            Ok(path) => {
                writeln!(self.output, "\n[OK] Graph visualization generated.")?;
                writeln!(self.output, "File saved as '{}'.", path.display())?;
            }
            Err(e) => {
                warn!(error = %e, "graph rendering failed");
                writeln!(self.output, "\n[WARN] Could not render the graph: {}", e)?;
                writeln!(
                    self.output,
                    "The DOT source is kept at '{}'.",
                    self.renderer.dot_path().display()
                )?;
            }
        }
        Ok(())
    }

    fn main_menu(&mut self) -> ShellResult<()> {
        loop {
            writeln!(self.output, "\n--- MAIN MENU ---")?;
            writeln!(self.output, "1. Add entities (players, games)")?;
            writeln!(self.output, "2. Query the knowledge graph")?;
            writeln!(self.output, "3. Show summary and node details")?;
            writeln!(self.output, "4. Delete a node and its relationships")?;
            writeln!(
                self.output,
                "5. Render graph (saves '{}')",
                self.renderer.image_path().display()
            )?;
            writeln!(self.output, "6. Exit")?;

            match self.prompt("Choose an option: ")?.as_str() {
                "1" => self.add_menu()?,
                "2" => self.query_menu()?,
                "3" => self.inspect()?,
                "4" => self.delete_node()?,
                "5" => self.render()?,
                "6" => return Ok(()),
                _ => writeln!(self.output, "Invalid option. Try again.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShellConfig;
    use crate::graph::EdgeFilter;
    use std::io::Cursor;

    fn small_config() -> AppConfig {
        AppConfig {
            shell: ShellConfig {
                min_teams: 2,
                min_games: 1,
            },
            ..AppConfig::default()
        }
    }

    fn run_script(script: &str) -> (GraphStore, String) {
        let mut out = Vec::new();
        let store = {
            let mut shell = Shell::new(Cursor::new(script.to_string()), &mut out, small_config());
            shell.run().unwrap();
            shell.into_store()
        };
        (store, String::from_utf8(out).unwrap())
    }

    const SETUP: &str = "\
Cup
2024
1
Lions
Porto
Falcons
Lisbon
n
y
Rui
Forward
n
n
n
n
n
n
n
n
Lions
Falcons
2024-03-02
2x1
lions
n
";

    #[test]
    fn test_setup_builds_graph() {
        let (store, out) = run_script(SETUP);

        // tournament, 2 teams, 1 player, 1 game
        assert_eq!(store.node_count(), 5);
        // 2 PARTICIPATES_IN, 1 PLAYS_FOR, HOME/AWAY, WON/LOST_TO
        assert_eq!(store.edge_count(), 7);
        assert!(out.contains("[OK] Tournament 'Cup' created with ID: N1."));
        assert!(out.contains("[OK] Game added. Result: 2x1. ID: N5"));
        // End of input at the main menu exits cleanly
        assert!(out.contains("Shutting down. Bye!"));
    }

    #[test]
    fn test_queries_and_detail() {
        let script = format!("{}2\n1\nForward\n2\nLions\n3\nLions\n3\nFalcons\n4\n3\nN2\n6\n", SETUP);
        let (_, out) = run_script(&script);

        assert!(out.contains("Results for position 'Forward':\n  - Rui"));
        assert!(out.contains("Players who PLAY_FOR Lions:\n  - Rui"));
        assert!(out.contains("Games won by Lions:\n  - Game 2024-03-02 (Score: 2x1)"));
        assert!(out.contains("Falcons has not won any recorded game."));
        assert!(out.contains("Total nodes: 5"));
        assert!(out.contains("--- Node details: N2 (Team) ---"));
        assert!(out.contains("Properties: {name: Lions, city: Porto}"));
        assert!(out.contains("  -> PARTICIPATES_IN -> N1 (Tournament: Cup)"));
        assert!(out.contains("  -> WON -> N5 (Game: N/A)"));
    }

    #[test]
    fn test_delete_cascades_from_menu() {
        let script = format!("{}4\nN2\n4\nN2\n4\nbogus\n3\nN2\n", SETUP);
        let (store, out) = run_script(&script);

        assert!(out.contains("[OK] Node N2 and its relationships removed."));
        assert!(out.contains("Node N2 not found"));
        assert!(out.contains("invalid node id \"bogus\""));
        assert_eq!(store.node_count(), 4);
        assert!(store.edges().all(|e| !e.touches(NodeId::new(2))));
    }

    #[test]
    fn test_unknown_team_game_not_counted() {
        let script = "\
Cup
2024
7
Lions
Porto
Falcons
Lisbon
n
n
n
n
n
n
n
n
n
n
Nope
Falcons
Lions
Falcons
2024-03-02
0x0
DRAW
n
6
";
        let (store, out) = run_script(script);
        assert!(out.contains("Invalid format option. Using 'Unspecified'."));
        assert!(out.contains("One or both teams were not found. Going back."));
        // tournament, 2 teams, 1 game; draw adds no result edges
        assert_eq!(store.node_count(), 4);
        assert_eq!(store.edge_count(), 4);
    }

    #[test]
    fn test_render_failure_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config();
        config.render.output = dir.path().join("graph");
        config.render.dot_binary = "kgraph-no-such-graphviz-binary".to_string();

        let mut out = Vec::new();
        {
            let mut shell = Shell::new(Cursor::new(format!("{}5\n6\n", SETUP)), &mut out, config);
            shell.run().unwrap();
        }
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("[WARN] Could not render the graph"));
        assert!(out.contains("Shutting down. Bye!"));
    }

    #[test]
    fn test_format_properties() {
        let props = crate::props! { "name" => "Ana", "age" => 20i64 };
        assert_eq!(format_properties(&props), "{name: Ana, age: 20}");
        assert_eq!(format_properties(&PropertyMap::new()), "{}");
    }

    #[test]
    fn test_duplicate_team_name_is_reprompted() {
        let script = SETUP.replacen("Lions\nPorto\nFalcons", "Lions\nPorto\nLions\nFalcons", 1);
        let (store, out) = run_script(&script);

        assert!(out.contains("Team 'Lions' is already registered. Choose another name."));
        assert_eq!(out.matches("Team #2").count(), 1);
        assert!(!out.contains("Team #3"));
        assert_eq!(store.summarize().label_distribution[&crate::graph::Label::new("Team")], 2);
        assert_eq!(store.node_count(), 5);
    }

    #[test]
    fn test_add_menu() {
        let script = format!(
            "{}1\n1\nLions\nInes\nGoalkeeper\n1\nNope\n2\nFalcons\nLions\n2024-03-09\n3x0\nFalcons\n9\n3\n6\n",
            SETUP
        );
        let mut out = Vec::new();
        {
            let mut shell = Shell::new(Cursor::new(script), &mut out, small_config());
            shell.run().unwrap();

            assert_eq!(shell.tournament(), Some(NodeId::new(1)));
            let lions = shell.teams()["Lions"];
            let falcons = shell.teams()["Falcons"];
            let store = shell.store();

            // N6 is the new player, N7 the new game
            let plays_for = store.find_edges(&EdgeFilter::incoming(lions).predicate(championship::PLAYS_FOR));
            assert_eq!(plays_for.len(), 2);
            assert_eq!(plays_for[1].subject, NodeId::new(6));

            let won = store.find_edges(&EdgeFilter::outgoing(falcons).predicate(championship::WON));
            assert_eq!(won.len(), 1);
            assert_eq!(won[0].object, NodeId::new(7));
            assert_eq!(
                store.find_edges(&EdgeFilter::outgoing(lions).predicate(championship::LOST_TO)).len(),
                1
            );
            assert_eq!(store.node_count(), 7);
        }

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("[OK] Player 'Ines' added to Lions."));
        assert!(out.contains("Team not found. Going back."));
        assert!(out.contains("[OK] Game added. Result: 3x0. ID: N7"));
        assert!(out.contains("Invalid option."));
        assert!(out.contains("Shutting down. Bye!"));
    }
}
