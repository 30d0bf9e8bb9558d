/// One of the eight grid directions. `y` grows downwards, so north is `dy = -1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }
}

/// Actions the core interprets itself.
///
/// Anything else a key map produces is a pass-through name handed back to the
/// caller untouched.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CoreAction {
    MoveNorth,
    MoveNorthEast,
    MoveEast,
    MoveSouthEast,
    MoveSouth,
    MoveSouthWest,
    MoveWest,
    MoveNorthWest,
    Wait,
    Look,
    Target,
    Quit,
}

impl CoreAction {
    pub const fn moving(direction: Direction) -> Self {
        match direction {
            Direction::North => CoreAction::MoveNorth,
            Direction::NorthEast => CoreAction::MoveNorthEast,
            Direction::East => CoreAction::MoveEast,
            Direction::SouthEast => CoreAction::MoveSouthEast,
            Direction::South => CoreAction::MoveSouth,
            Direction::SouthWest => CoreAction::MoveSouthWest,
            Direction::West => CoreAction::MoveWest,
            Direction::NorthWest => CoreAction::MoveNorthWest,
        }
    }

    /// Direction of a movement action, `None` for everything else.
    pub const fn direction(self) -> Option<Direction> {
        match self {
            CoreAction::MoveNorth => Some(Direction::North),
            CoreAction::MoveNorthEast => Some(Direction::NorthEast),
            CoreAction::MoveEast => Some(Direction::East),
            CoreAction::MoveSouthEast => Some(Direction::SouthEast),
            CoreAction::MoveSouth => Some(Direction::South),
            CoreAction::MoveSouthWest => Some(Direction::SouthWest),
            CoreAction::MoveWest => Some(Direction::West),
            CoreAction::MoveNorthWest => Some(Direction::NorthWest),
            CoreAction::Wait | CoreAction::Look | CoreAction::Target | CoreAction::Quit => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A key map entry after resolution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Core(CoreAction),
    PassThrough(String),
}

impl Action {
    pub fn name(&self) -> &str {
        match self {
            Action::Core(action) => action.as_str(),
            Action::PassThrough(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_names_are_kebab_case() {
        assert_eq!(CoreAction::MoveNorthEast.as_str(), "move-north-east");
        assert_eq!("move-south-west".parse::<CoreAction>().unwrap(), CoreAction::MoveSouthWest);
        assert_eq!("look".parse::<CoreAction>().unwrap(), CoreAction::Look);
        assert!("save".parse::<CoreAction>().is_err());
    }

    #[test]
    fn every_direction_round_trips_through_its_action() {
        for direction in Direction::ALL {
            assert_eq!(CoreAction::moving(direction).direction(), Some(direction));
        }
        assert_eq!(CoreAction::Wait.direction(), None);
    }

    #[test]
    fn opposite_deltas_cancel() {
        let (nx, ny) = Direction::North.delta();
        let (sx, sy) = Direction::South.delta();
        assert_eq!((nx + sx, ny + sy), (0, 0));
        assert_eq!(Direction::NorthWest.delta(), (-1, -1));
    }
}
