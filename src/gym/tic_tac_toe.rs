use std::fmt;

use strum::{Display, VariantArray};

use crate::{
    env::{DiscreteActionSpace, Environment},
    error::{Error, Result},
};

/// The winning triples: 3 rows, 3 columns, 2 diagonals
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Display, VariantArray, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

#[derive(Display, Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum Cell {
    #[default]
    #[strum(to_string = " ")]
    Empty,
    X,
    O,
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

/// The nine cells, row-major. Two boards with the same marks are the same state.
pub type Board = [Cell; 9];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Player),
    Draw,
}

fn is_winner(board: &Board, player: Player) -> bool {
    let mark = Cell::from(player);
    LINES
        .iter()
        .any(|line| line.iter().all(|&i| board[i] == mark))
}

fn is_full(board: &Board) -> bool {
    !board.contains(&Cell::Empty)
}

fn empty_cells(board: &Board) -> Vec<usize> {
    board
        .iter()
        .enumerate()
        .filter(|&(_, &cell)| cell == Cell::Empty)
        .map(|(i, _)| i)
        .collect()
}

/// Tic-tac-toe rules engine
///
/// Intended for use with a [QTableAgent](crate::algo::tabular::q_table::QTableAgent).
/// X always opens. Rewards are not assigned here; see [`crate::train::Rewards`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToe {
    board: Board,
    current: Player,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self {
            board: [Cell::Empty; 9],
            current: Player::X,
        }
    }
}

impl TicTacToe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Clear the board and give the first move to X
    pub fn reset(&mut self) -> Board {
        self.board = [Cell::Empty; 9];
        self.current = Player::X;
        self.board
    }

    /// Indices of the empty cells in ascending order
    pub fn available_moves(&self) -> Vec<usize> {
        empty_cells(&self.board)
    }

    /// Place the current player's mark and pass the turn
    ///
    /// The move must come from [`available_moves`](Self::available_moves); only debug
    /// builds check it. Use [`try_apply_move`](Self::try_apply_move) for untrusted input.
    pub fn apply_move(&mut self, action: usize) {
        debug_assert!(
            self.board[action] == Cell::Empty,
            "Cell {action} is already occupied"
        );
        self.board[action] = self.current.into();
        self.current = self.current.opponent();
    }

    /// Validated form of [`apply_move`](Self::apply_move)
    pub fn try_apply_move(&mut self, action: usize) -> Result<()> {
        if self.is_game_over() {
            return Err(Error::GameOver);
        }
        match self.board.get(action) {
            None => Err(Error::OutOfRange { position: action }),
            Some(Cell::X | Cell::O) => Err(Error::Occupied { position: action }),
            Some(Cell::Empty) => {
                self.apply_move(action);
                Ok(())
            }
        }
    }

    pub fn is_winner(&self, player: Player) -> bool {
        is_winner(&self.board, player)
    }

    /// True once every cell is taken; check [`is_winner`](Self::is_winner) first
    /// to tell a draw from a win on the last move
    pub fn is_draw(&self) -> bool {
        is_full(&self.board)
    }

    pub fn is_game_over(&self) -> bool {
        self.is_winner(Player::X) || self.is_winner(Player::O) || self.is_draw()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if self.is_winner(Player::X) {
            Some(Outcome::Win(Player::X))
        } else if self.is_winner(Player::O) {
            Some(Outcome::Win(Player::O))
        } else if self.is_draw() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SEPARATOR: &str = "-------------";
        writeln!(f, "{SEPARATOR}")?;
        for row in self.board.chunks(3) {
            writeln!(f, "| {} | {} | {} |", row[0], row[1], row[2])?;
            writeln!(f, "{SEPARATOR}")?;
        }
        Ok(())
    }
}

impl Environment for TicTacToe {
    type State = Board;
    type Action = usize;

    fn state(&self) -> Self::State {
        self.board
    }

    fn is_active(&self) -> bool {
        !self.is_game_over()
    }

    fn step(&mut self, action: Self::Action) {
        self.apply_move(action);
    }

    fn reset(&mut self) -> Self::State {
        TicTacToe::reset(self)
    }
}

impl DiscreteActionSpace for TicTacToe {
    fn actions(&self) -> Vec<Self::Action> {
        self.available_moves()
    }

    fn action_space() -> Vec<Self::Action> {
        (0..9).collect()
    }

    fn legal_actions(state: &Self::State) -> Vec<Self::Action> {
        if Player::VARIANTS.iter().any(|&p| is_winner(state, p)) {
            return Vec::new();
        }
        empty_cells(state)
    }
}
