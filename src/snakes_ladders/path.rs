use crate::snakes_ladders::{MoveKind, MoveRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// One cell of the dice advance.
    Walk,
    /// One cell of a snake or ladder redirect.
    Slide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub cell: u8,
    pub stage: Stage,
}

/// Cells a token passes through for one resolved move, in display order.
///
/// The walk covers `start + 1 ..= start + roll`; if a link fired the slide
/// then steps one cell at a time towards the final cell. Overshot moves
/// produce no steps. Consumers pull one step per animation frame.
#[derive(Debug, Clone)]
pub struct MovePath {
    current: u8,
    linear: u8,
    end: u8,
    walking: bool,
}

impl MovePath {
    pub fn new(record: &MoveRecord) -> Self {
        let linear = match record.kind() {
            MoveKind::Overshot => record.start(),
            _ => record.start() + record.roll(),
        };
        MovePath {
            current: record.start(),
            linear,
            end: record.end(),
            walking: true,
        }
    }
}

impl Iterator for MovePath {
    type Item = PathStep;

    fn next(&mut self) -> Option<PathStep> {
        if self.walking {
            if self.current < self.linear {
                self.current += 1;
                return Some(PathStep { cell: self.current, stage: Stage::Walk });
            }
            self.walking = false;
        }
        if self.current < self.end {
            self.current += 1;
        } else if self.current > self.end {
            self.current -= 1;
        } else {
            return None;
        }
        Some(PathStep { cell: self.current, stage: Stage::Slide })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let walk = if self.walking { self.linear - self.current } else { 0 };
        let from = if self.walking { self.linear } else { self.current };
        let len = walk as usize + from.abs_diff(self.end) as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for MovePath {}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(record: &MoveRecord, stage: Stage) -> Vec<u8> {
        MovePath::new(record).filter(|s| s.stage == stage).map(|s| s.cell).collect()
    }

    #[test]
    fn test_plain_walk() {
        let record = MoveRecord::new("a", 0, 4, 10, 14);
        assert_eq!(cells(&record, Stage::Walk), vec![11, 12, 13, 14]);
        assert!(cells(&record, Stage::Slide).is_empty());
        assert_eq!(MovePath::new(&record).len(), 4);
    }

    #[test]
    fn test_ladder_climbs_after_walk() {
        let record = MoveRecord::new("a", 0, 3, 1, 14);
        let path: Vec<PathStep> = MovePath::new(&record).collect();
        assert_eq!(path.len(), 13);
        assert_eq!(&path[..3], &[
            PathStep { cell: 2, stage: Stage::Walk },
            PathStep { cell: 3, stage: Stage::Walk },
            PathStep { cell: 4, stage: Stage::Walk },
        ]);
        assert_eq!(cells(&record, Stage::Slide), (5..=14).collect::<Vec<u8>>());
    }

    #[test]
    fn test_snake_slides_down() {
        let record = MoveRecord::new("a", 0, 2, 85, 24);
        assert_eq!(cells(&record, Stage::Walk), vec![86, 87]);
        let slide = cells(&record, Stage::Slide);
        assert_eq!(slide.first(), Some(&86));
        assert_eq!(slide.last(), Some(&24));
        assert_eq!(slide.len(), 63);
    }

    #[test]
    fn test_overshoot_is_empty() {
        let record = MoveRecord::new("a", 0, 3, 98, 98);
        assert_eq!(MovePath::new(&record).len(), 0);
        assert_eq!(MovePath::new(&record).next(), None);
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let mut path = MovePath::new(&MoveRecord::new("a", 0, 2, 85, 24));
        let total = path.len();
        path.next();
        path.next();
        path.next();
        assert_eq!(path.len(), total - 3);
        assert_eq!(path.by_ref().count(), total - 3);
        assert_eq!(path.len(), 0);
    }
}
