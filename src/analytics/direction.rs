//! Compass direction labels attached to reports.

use serde::{Deserialize, Serialize};

/// Label used when a report carries no direction
pub const UNKNOWN_DIRECTION: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl Direction {
    /// Clockwise from north, 45 degrees apart
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::Northeast,
        Direction::East,
        Direction::Southeast,
        Direction::South,
        Direction::Southwest,
        Direction::West,
        Direction::Northwest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::Northeast => "Northeast",
            Direction::East => "East",
            Direction::Southeast => "Southeast",
            Direction::South => "South",
            Direction::Southwest => "Southwest",
            Direction::West => "West",
            Direction::Northwest => "Northwest",
        }
    }

    /// Grid step (east, north) for this direction
    pub fn unit_vector(&self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::Northeast => (1, 1),
            Direction::East => (1, 0),
            Direction::Southeast => (1, -1),
            Direction::South => (0, -1),
            Direction::Southwest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::Northwest => (-1, 1),
        }
    }

    /// Nearest of the eight labels to a compass heading in degrees
    pub fn from_heading(degrees: f64) -> Option<Self> {
        if !degrees.is_finite() {
            return None;
        }
        let sector = (degrees / 45.0).round().rem_euclid(8.0) as usize;
        Self::ALL.get(sector).copied()
    }

    /// Parse a label, abbreviation or numeric heading
    pub fn parse(text: &str) -> Option<Self> {
        let key: String = text
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        let direction = match key.as_str() {
            "n" | "north" => Direction::North,
            "ne" | "northeast" => Direction::Northeast,
            "e" | "east" => Direction::East,
            "se" | "southeast" => Direction::Southeast,
            "s" | "south" => Direction::South,
            "sw" | "southwest" => Direction::Southwest,
            "w" | "west" => Direction::West,
            "nw" | "northwest" => Direction::Northwest,
            other => {
                // Separators were stripped from `key`, so parse the original text to keep the sign
                let degrees = text.trim().trim_end_matches('°').trim().parse::<f64>().ok()?;
                return Self::from_heading(degrees);
            }
        };
        Some(direction)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display label for a raw direction field
pub fn normalize_direction(raw: Option<&str>) -> String {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return UNKNOWN_DIRECTION.to_string();
    };
    match Direction::parse(text) {
        Some(direction) => direction.as_str().to_string(),
        None => title_case(text),
    }
}

/// Upper-case every letter that follows a non-letter, lower-case the rest
fn title_case(text: &str) -> String {
    let mut prev_is_letter = false;
    text.chars()
        .flat_map(|c| {
            let mapped: Vec<char> = if prev_is_letter {
                c.to_lowercase().collect()
            } else {
                c.to_uppercase().collect()
            };
            prev_is_letter = c.is_alphabetic();
            mapped
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(normalize_direction(Some("N")), "North");
        assert_eq!(normalize_direction(Some("north-east")), "Northeast");
        assert_eq!(normalize_direction(Some("  South West ")), "Southwest");
        assert_eq!(normalize_direction(Some("nw")), "Northwest");
        assert_eq!(normalize_direction(Some("Northeast")), "Northeast");
    }

    #[test]
    fn test_missing_is_unknown() {
        assert_eq!(normalize_direction(None), UNKNOWN_DIRECTION);
        assert_eq!(normalize_direction(Some("   ")), UNKNOWN_DIRECTION);
    }

    #[test]
    fn test_unrecognized_text_is_title_cased() {
        assert_eq!(normalize_direction(Some("towards the river")), "Towards The River");
    }

    #[test]
    fn test_title_case_breaks_on_non_letters() {
        assert_eq!(normalize_direction(Some("north-by-west")), "North-By-West");
        assert_eq!(normalize_direction(Some("o'brien street")), "O'Brien Street");
        assert_eq!(normalize_direction(Some("ALONG  the ROAD")), "Along  The Road");
    }

    #[test]
    fn test_negative_headings_keep_sign() {
        assert_eq!(normalize_direction(Some("-90")), "West");
        assert_eq!(normalize_direction(Some("-45")), "Northwest");
        assert_eq!(normalize_direction(Some("270")), "West");
        assert_eq!(normalize_direction(Some(" -135° ")), "Southwest");
    }

    #[test]
    fn test_headings() {
        assert_eq!(Direction::parse("0"), Some(Direction::North));
        assert_eq!(Direction::parse("44°"), Some(Direction::Northeast));
        assert_eq!(Direction::parse("350"), Some(Direction::North));
        assert_eq!(Direction::parse("-90"), Some(Direction::West));
        assert_eq!(Direction::from_heading(f64::NAN), None);
    }

    #[test]
    fn test_unit_vectors_are_opposite() {
        for (i, d) in Direction::ALL.iter().enumerate() {
            let opposite = Direction::ALL[(i + 4) % 8];
            let (x, y) = d.unit_vector();
            assert_eq!(opposite.unit_vector(), (-x, -y));
        }
    }
}
