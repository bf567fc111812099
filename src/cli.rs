// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use clap::Subcommand;
use decouvertes_core::Fallible;
use decouvertes_core::PlayerId;
use decouvertes_core::Timestamp;
use decouvertes_core::TinyRng;

use crate::cmd::card::check_card_answer;
use crate::cmd::card::get_card;
use crate::cmd::orphans::delete_orphans;
use crate::cmd::orphans::list_orphans;
use crate::cmd::players::create_player;
use crate::cmd::players::delete_player;
use crate::cmd::players::list_players;
use crate::cmd::stats::print_stats;
use crate::collection::Collection;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Print the next card to review as JSON.
    GetCard {
        /// Path to the data directory. By default, ~/.config/decouvertes is used.
        #[arg(long)]
        directory: Option<String>,
        /// Review as this player. Without it, single-player progress is used.
        #[arg(long)]
        player_id: Option<String>,
    },
    /// Check an answer and move the card between boxes.
    CheckAnswer {
        /// Path to the data directory. By default, ~/.config/decouvertes is used.
        #[arg(long)]
        directory: Option<String>,
        /// The ID of the card being answered.
        #[arg(long)]
        id: String,
        /// The user's answer.
        #[arg(long)]
        answer: String,
        /// Answer as this player. Without it, single-player progress is used.
        #[arg(long)]
        player_id: Option<String>,
    },
    /// Create a player and print their ID.
    CreatePlayer {
        /// Path to the data directory. By default, ~/.config/decouvertes is used.
        #[arg(long)]
        directory: Option<String>,
        /// The player's display name.
        #[arg(long)]
        name: String,
    },
    /// List all players.
    ListPlayers {
        /// Path to the data directory. By default, ~/.config/decouvertes is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Delete a player and all of their progress.
    DeletePlayer {
        /// Path to the data directory. By default, ~/.config/decouvertes is used.
        #[arg(long)]
        directory: Option<String>,
        #[arg(long)]
        player_id: String,
    },
    /// Print a player's statistics.
    GetStats {
        /// Path to the data directory. By default, ~/.config/decouvertes is used.
        #[arg(long)]
        directory: Option<String>,
        #[arg(long)]
        player_id: String,
    },
    /// Commands relating to progress entries for cards no longer in the catalog.
    Orphans {
        #[command(subcommand)]
        command: OrphanCommand,
    },
}

#[derive(Subcommand)]
enum OrphanCommand {
    /// List the IDs of all orphan progress entries.
    List {
        /// Path to the data directory. By default, ~/.config/decouvertes is used.
        #[arg(long)]
        directory: Option<String>,
        #[arg(long)]
        player_id: Option<String>,
    },
    /// Remove all orphan progress entries.
    Delete {
        /// Path to the data directory. By default, ~/.config/decouvertes is used.
        #[arg(long)]
        directory: Option<String>,
        #[arg(long)]
        player_id: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    let output: String = match cli {
        Command::GetCard {
            directory,
            player_id,
        } => {
            let collection = Collection::open(directory)?;
            let mut rng = TinyRng::from_entropy()?;
            get_card(
                &collection,
                player_id.map(PlayerId::from),
                &mut rng,
                Timestamp::now(),
            )?
        }
        Command::CheckAnswer {
            directory,
            id,
            answer,
            player_id,
        } => {
            let collection = Collection::open(directory)?;
            check_card_answer(
                &collection,
                player_id.map(PlayerId::from),
                &id,
                &answer,
                Timestamp::now(),
            )?
        }
        Command::CreatePlayer { directory, name } => {
            create_player(&Collection::open(directory)?, &name)?
        }
        Command::ListPlayers { directory } => list_players(&Collection::open(directory)?)?,
        Command::DeletePlayer {
            directory,
            player_id,
        } => delete_player(&Collection::open(directory)?, &PlayerId::from(player_id))?,
        Command::GetStats {
            directory,
            player_id,
        } => print_stats(
            &Collection::open(directory)?,
            &PlayerId::from(player_id),
            Timestamp::now(),
        )?,
        Command::Orphans { command } => match command {
            OrphanCommand::List {
                directory,
                player_id,
            } => list_orphans(&Collection::open(directory)?, player_id.map(PlayerId::from))?,
            OrphanCommand::Delete {
                directory,
                player_id,
            } => delete_orphans(&Collection::open(directory)?, player_id.map(PlayerId::from))?,
        },
    };
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_definition() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_parse_check_answer() {
        let cli = Command::try_parse_from([
            "decouvertes",
            "check-answer",
            "--id=c1",
            "--answer=foo = []",
            "--player-id=abc",
        ])
        .unwrap();
        match cli {
            Command::CheckAnswer {
                id,
                answer,
                player_id,
                directory,
            } => {
                assert_eq!(id, "c1");
                assert_eq!(answer, "foo = []");
                assert_eq!(player_id.as_deref(), Some("abc"));
                assert_eq!(directory, None);
            }
            _ => panic!("expected check-answer"),
        }
    }

    #[test]
    fn test_check_answer_requires_id() {
        let result = Command::try_parse_from(["decouvertes", "check-answer", "--answer=x"]);
        assert!(result.is_err());
    }
}
