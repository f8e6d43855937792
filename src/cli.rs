//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for the role-compass binary.

use clap::{Parser, Subcommand};

use role_compass::domain::scoring::LIST_VIEW_LIMIT;

/// role-compass - Guided career exploration
///
/// Pick up to two focus categories, choose the traits that describe you,
/// and see which roles fit best. Selections persist between runs.
#[derive(Parser, Debug)]
#[command(name = "role-compass")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the current selection, step and data source
    Status,

    /// List categories
    Categories,

    /// List traits for the selected categories
    Traits,

    /// Select or deselect a category (at most two; the oldest is replaced)
    ToggleCategory {
        /// Category id
        id: String,
    },

    /// Select or deselect a trait
    ToggleTrait {
        /// Trait id
        id: String,
    },

    /// Replace the free-text notes
    Notes {
        /// Note text
        text: String,
    },

    /// Rank roles against the current selection
    Roles {
        /// Number of roles to show
        #[arg(short, long, default_value_t = LIST_VIEW_LIMIT)]
        limit: usize,
    },

    /// Show a short summary of the selection and best matches
    Summary,

    /// Clear all selections
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_toggle_category() {
        let cli = Cli::parse_from(["role-compass", "toggle-category", "mind"]);
        assert_eq!(
            cli.command,
            Commands::ToggleCategory {
                id: "mind".to_string()
            }
        );
    }

    #[test]
    fn test_roles_limit_defaults_to_list_view() {
        let cli = Cli::parse_from(["role-compass", "roles"]);
        assert_eq!(
            cli.command,
            Commands::Roles {
                limit: LIST_VIEW_LIMIT
            }
        );

        let cli = Cli::parse_from(["role-compass", "-v", "roles", "--limit", "5"]);
        assert_eq!(cli.command, Commands::Roles { limit: 5 });
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_notes_takes_text() {
        let cli = Cli::parse_from(["role-compass", "notes", "likes outdoors"]);
        assert_eq!(
            cli.command,
            Commands::Notes {
                text: "likes outdoors".to_string()
            }
        );
    }
}
