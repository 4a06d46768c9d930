//! Keyboard decoding: each character of a line is one command.

/// A player action decoded from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveCursor { dx: i8, dy: i8 },
    Place,
    ToggleTimed,
    TogglePause,
    NewGame,
    Quit,
}

impl Command {
    pub fn from_key(key: char) -> Option<Self> {
        let command = match key.to_ascii_lowercase() {
            'w' => Command::MoveCursor { dx: 0, dy: 1 },
            'a' => Command::MoveCursor { dx: -1, dy: 0 },
            's' => Command::MoveCursor { dx: 0, dy: -1 },
            'd' => Command::MoveCursor { dx: 1, dy: 0 },
            // Numpad corners.
            '7' => Command::MoveCursor { dx: -1, dy: 1 },
            '9' => Command::MoveCursor { dx: 1, dy: 1 },
            '1' => Command::MoveCursor { dx: -1, dy: -1 },
            '3' => Command::MoveCursor { dx: 1, dy: -1 },
            ' ' | 'e' => Command::Place,
            't' => Command::ToggleTimed,
            'p' => Command::TogglePause,
            'n' => Command::NewGame,
            'q' => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// Every command in `line`, in order. Unknown keys are skipped.
pub fn decode(line: &str) -> impl Iterator<Item = Command> + '_ {
    line.chars().filter_map(Command::from_key)
}

pub const HELP: &str = "keys: w/a/s/d move, 7/9/1/3 diagonal, space or e place, t timed mode, p pause, n new game, q quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_in_order() {
        let commands: Vec<Command> = decode("ddW e?q").collect();
        assert_eq!(
            commands,
            vec![
                Command::MoveCursor { dx: 1, dy: 0 },
                Command::MoveCursor { dx: 1, dy: 0 },
                Command::MoveCursor { dx: 0, dy: 1 },
                Command::Place,
                Command::Place,
                Command::Quit,
            ]
        );
    }

    #[test]
    fn ignores_unknown_keys() {
        assert_eq!(decode("xyz0").count(), 0);
        assert_eq!(Command::from_key('P'), Some(Command::TogglePause));
    }

    #[test]
    fn numpad_corners_move_diagonally() {
        let commands: Vec<Command> = decode("7913").collect();
        assert_eq!(
            commands,
            vec![
                Command::MoveCursor { dx: -1, dy: 1 },
                Command::MoveCursor { dx: 1, dy: 1 },
                Command::MoveCursor { dx: -1, dy: -1 },
                Command::MoveCursor { dx: 1, dy: -1 },
            ]
        );
    }
}
