use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::Rect;

/// Splits `area` into one cell per section. One to three sections sit side by
/// side, four form a 2x2 grid, and anything narrower than `narrow_width`
/// stacks sections top to bottom.
pub fn section_grid(count: usize, area: Rect, narrow_width: u16) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    if area.width < narrow_width {
        return split_even(area, Direction::Vertical, count);
    }
    match count {
        4 => split_even(area, Direction::Vertical, 2)
            .into_iter()
            .flat_map(|row| split_even(row, Direction::Horizontal, 2))
            .collect(),
        n => split_even(area, Direction::Horizontal, n),
    }
}

fn split_even(area: Rect, direction: Direction, parts: usize) -> Vec<Rect> {
    let constraints = (0..parts)
        .map(|_| Constraint::Ratio(1, parts as u32))
        .collect::<Vec<_>>();
    Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_section_fills_area() {
        let area = Rect::new(0, 0, 120, 40);
        assert_eq!(section_grid(1, area, 80), vec![area]);
    }

    #[test]
    fn test_three_sections_side_by_side() {
        let cells = section_grid(3, Rect::new(0, 0, 120, 40), 80);
        assert_eq!(cells.len(), 3);
        assert!(cells.iter().all(|c| c.y == 0 && c.height == 40));
        assert_eq!(cells[0].x, 0);
        assert!(cells[0].x < cells[1].x && cells[1].x < cells[2].x);
        assert_eq!(cells.iter().map(|c| c.width).sum::<u16>(), 120);
    }

    #[test]
    fn test_four_sections_form_grid() {
        let cells = section_grid(4, Rect::new(0, 0, 100, 40), 80);
        assert_eq!(cells.len(), 4);
        assert_eq!((cells[0].x, cells[0].y), (0, 0));
        assert_eq!((cells[1].x, cells[1].y), (50, 0));
        assert_eq!((cells[2].x, cells[2].y), (0, 20));
        assert_eq!((cells[3].x, cells[3].y), (50, 20));
    }

    #[test]
    fn test_narrow_terminal_stacks_sections() {
        let cells = section_grid(4, Rect::new(0, 0, 60, 40), 80);
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|c| c.x == 0 && c.width == 60));
        assert_eq!(cells[3].y, 30);
    }

    #[test]
    fn test_no_sections() {
        assert!(section_grid(0, Rect::new(0, 0, 10, 10), 80).is_empty());
    }
}
