//! Board drawing for the terminal.

use chess_core::Square;
use chess_rules::Board;

/// Draws the board, top rank first.
///
/// With coordinates, each rank is prefixed by its number and a line of
/// file letters follows the board.
pub fn render(board: &Board, show_coordinates: bool) -> String {
    if !show_coordinates {
        return board.to_string();
    }

    let label_width = board.height().to_string().len();
    let mut out = String::new();
    for rank in (0..board.height()).rev() {
        let cells: Vec<String> = (0..board.width())
            .map(|file| cell_char(board, Square::new(rank, file)).to_string())
            .collect();
        out.push_str(&format!(
            "{:>width$} {}\n",
            rank + 1,
            cells.join(" "),
            width = label_width
        ));
    }
    let files: Vec<String> = (0..board.width()).map(|f| file_label(f).to_string()).collect();
    out.push_str(&format!(
        "{:width$} {}\n",
        "",
        files.join(" "),
        width = label_width
    ));
    out
}

fn cell_char(board: &Board, square: Square) -> char {
    board
        .occupant(square)
        .map_or('.', |p| p.kind().to_char(p.color()))
}

fn file_label(file: u8) -> char {
    Square::new(0, file)
        .to_algebraic()
        .chars()
        .next()
        .unwrap_or('?')
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Color;

    #[test]
    fn plain_matches_display() {
        let board = Board::standard();
        assert_eq!(render(&board, false), board.to_string());
    }

    #[test]
    fn coordinates_frame_the_board() {
        let board = Board::from_placement("k7/8/8/8/8/8/8/7K", Color::White).unwrap();
        let text = render(&board, true);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8 k . . . . . . .");
        assert_eq!(lines[7], "1 . . . . . . . K");
        assert_eq!(lines[8], "  a b c d e f g h");
    }

    #[test]
    fn wide_rank_labels_are_aligned() {
        let board = Board::empty(3, 10).unwrap();
        let text = render(&board, true);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "10 . . .");
        assert_eq!(lines[9], " 1 . . .");
        assert_eq!(lines[10], "   a b c");
    }
}
