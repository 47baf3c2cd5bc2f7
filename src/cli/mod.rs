mod render;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use timegrid::parsers::source_for;
use timegrid::services::{schedule_rows, RoomDirectory, TimetableConfig, Workspace};
use timegrid::types::{FilterState, Selection};

/// Render class schedules into day × time-slot grids
#[derive(Parser)]
#[command(name = "timegrid")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.timegrid/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the timetable grid
    Grid(ViewArgs),

    /// Show the filter options available for the current selection
    Options(ViewArgs),

    /// Show one row per scheduled event
    List(ViewArgs),
}

/// Input sources and filter selection shared by every command
#[derive(Args, Debug)]
struct ViewArgs {
    /// Scheduler response: file path or http(s) URL
    #[arg(long, value_name = "SRC")]
    events: String,

    /// Room directory: file path or http(s) URL
    #[arg(long, value_name = "SRC")]
    rooms: Option<String>,

    /// Section year digit, or "all"
    #[arg(long, default_value = "all")]
    year: Selection<u8>,

    /// Section id (e.g. CS2A), or "all"
    #[arg(long, default_value = "all")]
    section: Selection<String>,

    /// Room id or room name, or "all"
    #[arg(long, default_value = "all")]
    room: Selection<String>,

    /// Teacher name, or "all"
    #[arg(long, default_value = "all")]
    teacher: Selection<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl ViewArgs {
    fn requested_filter(&self) -> FilterState {
        FilterState {
            year: self.year,
            section: self.section.clone(),
            room: self.room.clone(),
            teacher: self.teacher.clone(),
        }
    }

    /// Load config, rooms and events into a workspace with the filter applied
    fn workspace(&self, config: &TimetableConfig) -> anyhow::Result<Workspace> {
        let index = config.slot_index().context("invalid slot catalog")?;

        let rooms = match &self.rooms {
            Some(location) => source_for(location)
                .load_rooms()
                .with_context(|| format!("failed to load rooms from {}", location))?,
            None => Vec::new(),
        };

        let payload = source_for(&self.events)
            .load_schedule()
            .with_context(|| format!("failed to load schedule from {}", self.events))?;

        let mut workspace = Workspace::new(index, RoomDirectory::new(rooms));
        workspace.replace_events(&payload.schedule);

        let requested = self.requested_filter();
        workspace.set_filter(requested.clone());
        if workspace.filter() != &requested {
            log::warn!(
                "filter reset to year={} section={} room={} teacher={} (no matching events)",
                workspace.filter().year,
                workspace.filter().section,
                workspace.filter().room,
                workspace.filter().teacher
            );
        }
        Ok(workspace)
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config = TimetableConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Grid(args) => {
                let workspace = args.workspace(&config)?;
                let rendered = workspace.render(&mut config.color_assigner());
                if args.json {
                    print_json(&rendered.grid)
                } else {
                    print!("{}", render::grid_table(&rendered.grid));
                    if !rendered.grid.exclusions.is_empty() {
                        eprintln!(
                            "[timegrid] {} event(s) not shown",
                            rendered.grid.exclusions.len()
                        );
                    }
                    Ok(())
                }
            }
            Commands::Options(args) => {
                let workspace = args.workspace(&config)?;
                let rendered = workspace.render(&mut config.color_assigner());
                if args.json {
                    print_json(&rendered.options)
                } else {
                    print!("{}", render::options_text(&rendered.options));
                    Ok(())
                }
            }
            Commands::List(args) => {
                let workspace = args.workspace(&config)?;
                let visible = timegrid::services::filter::apply(
                    workspace.events(),
                    workspace.filter(),
                    workspace.rooms(),
                );
                let rows = schedule_rows(&visible, workspace.index(), workspace.rooms());
                if args.json {
                    print_json(&rows)
                } else {
                    print!("{}", render::listing_table(&rows));
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(cli: Cli) -> ViewArgs {
        match cli.command {
            Commands::Grid(args) | Commands::Options(args) | Commands::List(args) => args,
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["timegrid"]).is_err());
    }

    #[test]
    fn test_cli_requires_events() {
        assert!(Cli::try_parse_from(["timegrid", "grid"]).is_err());
    }

    #[test]
    fn test_cli_parse_grid_defaults() {
        let cli = Cli::try_parse_from(["timegrid", "grid", "--events", "s.json"]).unwrap();
        assert!(cli.config.is_none());
        let args = view(cli);
        assert_eq!(args.events, "s.json");
        assert_eq!(args.requested_filter(), FilterState::all());
        assert!(!args.json);
    }

    #[test]
    fn test_cli_parse_filters() {
        let cli = Cli::try_parse_from([
            "timegrid",
            "list",
            "--events",
            "https://scheduler.local/schedule",
            "--year",
            "2",
            "--section",
            "CS2A",
            "--room",
            "Room 101",
            "--json",
            "--config",
            "cfg.json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("cfg.json")));
        let args = view(cli);
        let filter = args.requested_filter();
        assert_eq!(filter.year, Selection::Only(2));
        assert_eq!(filter.section, Selection::Only("CS2A".into()));
        assert_eq!(filter.room, Selection::Only("Room 101".into()));
        assert!(filter.teacher.is_all());
        assert!(args.json);
    }

    #[test]
    fn test_cli_rejects_bad_year() {
        let result =
            Cli::try_parse_from(["timegrid", "grid", "--events", "s.json", "--year", "two"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_workspace_from_fixtures() {
        let cli = Cli::try_parse_from([
            "timegrid",
            "grid",
            "--events",
            "tests/fixtures/schedule.json",
            "--rooms",
            "tests/fixtures/rooms.json",
            "--section",
            "CS2A",
        ])
        .unwrap();
        let args = view(cli);
        let workspace = args.workspace(&TimetableConfig::default()).unwrap();
        assert_eq!(workspace.events().len(), 5);
        assert_eq!(workspace.filter().section, Selection::Only("CS2A".into()));
    }
}
