//! Station components: the interactable kitchen furniture.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StationId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationKind {
    Oven,
    Stove,
    CuttingBoard,
    Blender,
    Bench,
    Serving,
}

impl StationKind {
    pub const ALL: [StationKind; 6] = [
        StationKind::Oven,
        StationKind::Stove,
        StationKind::CuttingBoard,
        StationKind::Blender,
        StationKind::Bench,
        StationKind::Serving,
    ];

    /// Name used by the station data table.
    pub fn data_key(&self) -> &'static str {
        match self {
            StationKind::Oven => "oven",
            StationKind::Stove => "stove",
            StationKind::CuttingBoard => "cutting board",
            StationKind::Blender => "blender",
            StationKind::Bench => "bench",
            StationKind::Serving => "serving",
        }
    }

    /// Heats whatever cookable item is placed on it.
    pub fn is_cooking(&self) -> bool {
        matches!(self, StationKind::Oven | StationKind::Stove)
    }

    /// Chops its item while the player works it.
    pub fn is_chopping(&self) -> bool {
        matches!(self, StationKind::CuttingBoard | StationKind::Blender)
    }
}

impl fmt::Display for StationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.data_key())
    }
}

impl FromStr for StationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StationKind::ALL
            .into_iter()
            .find(|k| k.data_key() == s)
            .ok_or_else(|| format!("unknown station kind: {}", s))
    }
}

/// A station and the item names it accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub kind: StationKind,
    /// `None` accepts any item
    pub accepts: Option<Vec<String>>,
}

impl Station {
    /// Case-insensitive check against the accept list.
    pub fn is_item_accepted(&self, item_name: &str) -> bool {
        let Some(accepts) = &self.accepts else {
            return true;
        };
        let name = item_name.to_lowercase();
        accepts.iter().any(|a| *a == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parses_data_keys() {
        for kind in StationKind::ALL {
            assert_eq!(kind.data_key().parse::<StationKind>(), Ok(kind));
        }
        assert!("fridge".parse::<StationKind>().is_err());
    }

    #[test]
    fn test_accept_list() {
        let oven = Station {
            id: StationId(1),
            kind: StationKind::Oven,
            accepts: Some(vec!["beef".into(), "fish".into()]),
        };
        assert!(oven.is_item_accepted("Beef"));
        assert!(!oven.is_item_accepted("banana"));

        let bench = Station {
            id: StationId(2),
            kind: StationKind::Bench,
            accepts: None,
        };
        assert!(bench.is_item_accepted("anything"));
    }
}
