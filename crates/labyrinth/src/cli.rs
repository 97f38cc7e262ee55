//! Command-line interface for `labyrinth-server`.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, ValueEnum};
use labyrinth::prelude::{FrameLayout, SessionConfig, DEFAULT_SIDE};
use labyrinth_protocol::DEFAULT_MOVE_CAPACITY;

/// Largest accepted maze side. A fogged view of a board this size still
/// fits in one JSON frame.
pub const MAX_SIDE: usize = 64;

/// Labyrinth - fog-of-war maze exploration server
#[derive(Parser, Debug)]
#[command(name = "labyrinth-server")]
#[command(about = "Serves a maze file to players over TCP", long_about = None)]
#[command(version)]
pub struct Cli {
    /// IP version to listen on (all interfaces)
    #[arg(value_enum)]
    pub ip_version: IpVersion,

    /// Port to listen on
    pub port: u16,

    /// Maze definition file
    #[arg(short = 'i', long = "input")]
    pub maze: PathBuf,

    /// Side length of the square maze
    #[arg(
        long,
        default_value_t = DEFAULT_SIDE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_SIDE as u64)
    )]
    pub side: usize,

    /// Seconds to wait for a request before dropping the connection
    #[arg(long, default_value_t = 300)]
    pub idle_timeout: u64,

    /// Wire format
    #[arg(long, value_enum, default_value_t = CodecKind::Fixed)]
    pub codec: CodecKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum IpVersion {
    V4,
    V6,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CodecKind {
    /// Fixed-layout binary frames understood by the classic client
    Fixed,
    /// Length-prefixed JSON with tagged responses
    Json,
}

impl Cli {
    /// The unspecified address of the chosen IP version.
    pub fn bind_addr(&self) -> SocketAddr {
        match self.ip_version {
            IpVersion::V4 => (Ipv4Addr::UNSPECIFIED, self.port).into(),
            IpVersion::V6 => (Ipv6Addr::UNSPECIFIED, self.port).into(),
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            idle_timeout: Duration::from_secs(self.idle_timeout),
        }
    }

    /// Frame layout for the fixed codec.
    ///
    /// Mazes larger than the default get enough move slots for the longest
    /// possible hint.
    pub fn frame_layout(&self) -> FrameLayout {
        let capacity = DEFAULT_MOVE_CAPACITY.max(self.side * self.side);
        FrameLayout::new(self.side, capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth::prelude::{Board, CellKind, Codec, JsonCodec, Position, Response};
    use labyrinth_protocol::MAX_JSON_FRAME;

    fn parse_side(side: &str) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(["labyrinth-server", "v4", "4000", "-i", "m", "--side", side])
    }

    #[test]
    fn test_parse_classic_arguments() {
        let cli = Cli::try_parse_from([
            "labyrinth-server",
            "v4",
            "51511",
            "-i",
            "maze.txt",
        ])
        .unwrap();

        assert_eq!(cli.ip_version, IpVersion::V4);
        assert_eq!(cli.port, 51511);
        assert_eq!(cli.maze, PathBuf::from("maze.txt"));
        assert_eq!(cli.side, DEFAULT_SIDE);
        assert_eq!(cli.codec, CodecKind::Fixed);
        assert_eq!(cli.bind_addr(), "0.0.0.0:51511".parse().unwrap());
        assert_eq!(cli.frame_layout(), FrameLayout::default());
    }

    #[test]
    fn test_parse_v6_binds_unspecified_v6() {
        let cli = Cli::try_parse_from([
            "labyrinth-server",
            "v6",
            "4000",
            "-i",
            "maze.txt",
            "--codec",
            "json",
            "--idle-timeout",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.bind_addr(), "[::]:4000".parse().unwrap());
        assert_eq!(cli.codec, CodecKind::Json);
        assert_eq!(cli.session_config().idle_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_parse_bad_ip_version_errors() {
        let result = Cli::try_parse_from(["labyrinth-server", "v5", "4000", "-i", "m"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_missing_maze_errors() {
        let result = Cli::try_parse_from(["labyrinth-server", "v4", "4000"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_frame_layout_large_maze_grows_move_capacity() {
        let cli = parse_side("12").unwrap();
        assert_eq!(cli.frame_layout(), FrameLayout::new(12, 144));
    }

    #[test]
    fn test_parse_side_out_of_range_errors() {
        assert!(parse_side("0").is_err());
        assert!(parse_side("65").is_err());
        assert!(parse_side("100000").is_err());
        assert_eq!(parse_side("64").unwrap().side, MAX_SIDE);
    }

    #[test]
    fn test_largest_partial_map_fits_json_frame() {
        let mut view = Board::filled(MAX_SIDE, CellKind::Unknown);
        view.set(Position::new(0, 0), CellKind::PlayerMarker);
        let bytes = JsonCodec.encode_response(&Response::PartialMap(view)).unwrap();
        assert!(bytes.len() <= MAX_JSON_FRAME, "{} bytes", bytes.len());
    }
}
