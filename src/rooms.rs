//! Built-in room definitions for the default game.

use crate::pinmatch::Pin;
use crate::session::RoomSpec;
use crate::wordsearch::WordSearchConfig;

/// Room 1 events in chronological order, earliest first.
///
/// Ten events is the most a single-digit code can encode.
pub const TIMELINE_EVENTS: [&str; 10] = [
    "Decades / Westwood",
    "D&B",
    "You watch party",
    "Kinara / Cocktail Making",
    "Rohit talk",
    "First time at LOJ",
    "Meeting my parents",
    "Meeting your parents",
    "LA Trip",
    "Houston",
];

/// Words hidden in the Room 2 grid.
pub const SEARCH_WORDS: &[&str] = &[
    "WESTWOOD", "DECADES", "KINARA", "COCKTAIL", "PARENTS", "HOUSTON", "PARTY",
];

/// Room 3 pins as `(label, x, y)` on a 1000x600 map.
pub const MAP_PINS: &[(&str, f64, f64)] = &[
    ("Westwood", 118.0, 352.0),
    ("San Francisco", 82.0, 268.0),
    ("Houston", 548.0, 482.0),
    ("New York", 890.0, 190.0),
];

/// How far, in map units, a pin may land from its target.
pub const MAP_TOLERANCE: f64 = 30.0;

/// The three rooms of the default game, in play order.
pub fn default_rooms() -> Vec<RoomSpec> {
    vec![
        RoomSpec::Timeline {
            title: "Our Timeline".to_string(),
            events: TIMELINE_EVENTS.iter().map(|s| s.to_string()).collect(),
        },
        RoomSpec::WordSearch {
            title: "Word Search".to_string(),
            words: SEARCH_WORDS.iter().map(|s| s.to_string()).collect(),
            config: WordSearchConfig::default(),
        },
        RoomSpec::Map {
            title: "Where We've Been".to_string(),
            pins: MAP_PINS
                .iter()
                .map(|&(label, x, y)| Pin::new(label, x, y))
                .collect(),
            shuffled: true,
            tolerance: MAP_TOLERANCE,
        },
    ]
}
