//! Arrival times grouped by direction of travel.

use std::fmt;

/// Direction of travel on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::North, Direction::South];

    /// Label used for the output panel, e.g. "Northbound".
    pub fn label(self) -> &'static str {
        match self {
            Direction::North => "Northbound",
            Direction::South => "Southbound",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Upcoming arrival timestamps at one station.
///
/// Each list holds raw ISO-8601 strings in the order the feed returned them.
/// An empty list means no more scheduled arrivals in that direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arrivals {
    pub north: Vec<String>,
    pub south: Vec<String>,
}

impl Arrivals {
    pub fn new(north: Vec<String>, south: Vec<String>) -> Self {
        Self { north, south }
    }

    /// True when neither direction has an upcoming arrival.
    pub fn is_empty(&self) -> bool {
        self.north.is_empty() && self.south.is_empty()
    }
}
