//! REPL commands understood by the presence client.

/// One cardinal step direction (y grows downward, screen convention)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Get the tile delta for this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Command typed at the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Step one tile in a direction
    Move(Direction),
    /// Print the current position
    Pos,
    /// Print the command list
    Help,
    /// Leave the space and exit
    Quit,
}

/// Parse one line of user input into a command.
pub fn parse_command(input: &str) -> Option<Command> {
    match input.trim().to_lowercase().as_str() {
        "up" | "u" => Some(Command::Move(Direction::Up)),
        "down" | "d" => Some(Command::Move(Direction::Down)),
        "left" | "l" => Some(Command::Move(Direction::Left)),
        "right" | "r" => Some(Command::Move(Direction::Right)),
        "pos" | "p" => Some(Command::Pos),
        "help" | "h" | "?" => Some(Command::Help),
        "quit" | "q" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directions() {
        // テスト項目: 4 方向のコマンドがパースできる
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(parse_command("up"), Some(Command::Move(Direction::Up)));
        assert_eq!(parse_command("down"), Some(Command::Move(Direction::Down)));
        assert_eq!(parse_command("left"), Some(Command::Move(Direction::Left)));
        assert_eq!(
            parse_command("right"),
            Some(Command::Move(Direction::Right))
        );
    }

    #[test]
    fn test_parse_short_aliases() {
        // テスト項目: 短縮形エイリアスが使える
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(parse_command("u"), Some(Command::Move(Direction::Up)));
        assert_eq!(parse_command("p"), Some(Command::Pos));
        assert_eq!(parse_command("?"), Some(Command::Help));
        assert_eq!(parse_command("q"), Some(Command::Quit));
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        // テスト項目: 大文字や前後の空白を許容する
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(parse_command("  UP  "), Some(Command::Move(Direction::Up)));
        assert_eq!(parse_command("Quit"), Some(Command::Quit));
    }

    #[test]
    fn test_parse_rejects_unknown_input() {
        // テスト項目: 未知の入力は None になる
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(parse_command("teleport"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_deltas_are_unit_cardinal_steps() {
        // テスト項目: 各方向のデルタはちょうど 1 マスの直交移動になる
        // given (前提条件):
        let directions = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];

        // when (操作) / then (期待する結果):
        for direction in directions {
            let (dx, dy) = direction.delta();
            assert_eq!(dx.abs() + dy.abs(), 1, "{direction:?}");
        }
    }
}
