use super::types::Position;

/// The segment chain. Insertion order is body order: tail first, head last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    segments: Vec<Position>,
}

impl Snake {
    pub fn new(start: Position) -> Self {
        Self {
            segments: vec![start],
        }
    }

    pub fn head(&self) -> Position {
        *self
            .segments
            .last()
            .expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Position {
        *self
            .segments
            .first()
            .expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Position] {
        &self.segments
    }

    pub fn contains(&self, position: Position) -> bool {
        self.segments.contains(&position)
    }

    /// The body after the tail leaves its cell, i.e. everything except the
    /// tail. Collision checks for the next head run against this slice.
    pub fn advanced_body(&self) -> &[Position] {
        &self.segments[1..]
    }

    /// One step forward: the tail cell is vacated and the new head appended.
    pub fn advance(&mut self, new_head: Position) {
        self.segments.remove(0);
        self.segments.push(new_head);
    }

    /// One step forward while keeping the tail, lengthening by exactly one.
    pub fn grow(&mut self, new_head: Position) {
        self.segments.push(new_head);
    }

    #[cfg(test)]
    pub fn from_segments(segments: Vec<Position>) -> Self {
        assert!(!segments.is_empty());
        Self { segments }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_snake_has_single_segment() {
        let snake = Snake::new(Position(42));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position(42));
        assert_eq!(snake.tail(), Position(42));
    }

    #[test]
    fn test_advance_keeps_length() {
        let mut snake = Snake::from_segments(vec![Position(5), Position(6)]);
        snake.advance(Position(7));
        assert_eq!(snake.segments(), &[Position(6), Position(7)]);
    }

    #[test]
    fn test_grow_keeps_tail() {
        let mut snake = Snake::from_segments(vec![Position(5), Position(6)]);
        snake.grow(Position(7));
        assert_eq!(snake.segments(), &[Position(5), Position(6), Position(7)]);
    }

    #[test]
    fn test_advanced_body_excludes_tail() {
        let snake = Snake::from_segments(vec![Position(5), Position(6), Position(7)]);
        assert_eq!(snake.advanced_body(), &[Position(6), Position(7)]);
        assert!(!snake.advanced_body().contains(&Position(5)));
    }
}
