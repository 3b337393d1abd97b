use hashbrown::HashMap;

use crate::{error::GameError, snakes_ladders::{GridPosition, Link, LinkKind, grid::{LAST_CELL, check_cell}}};

pub const CLASSIC_SNAKES: [(u8, u8); 10] = [
    (16, 6), (47, 26), (49, 11), (56, 32), (62, 19),
    (64, 60), (87, 24), (93, 73), (95, 75), (98, 78),
];

pub const CLASSIC_LADDERS: [(u8, u8); 8] = [
    (4, 14), (9, 31), (21, 42), (28, 84),
    (36, 44), (51, 67), (71, 91), (80, 96),
];

/// The static part of the game: which cells start a snake or a ladder and
/// how linear cell numbers map onto the grid.
///
/// A board is validated once when it is built, so lookups afterwards only fail
/// for cells off the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    links: HashMap<u8, Link>,
}

impl Board {
    /// The fixed table the game ships with.
    pub fn classic() -> Self {
        Board::from_links(&CLASSIC_SNAKES, &CLASSIC_LADDERS)
            .expect("classic link table is valid")
    }

    /// Builds a board from `(head, tail)` snake pairs and `(foot, top)` ladder pairs.
    pub fn from_links(snakes: &[(u8, u8)], ladders: &[(u8, u8)]) -> Result<Self, GameError> {
        let mut links = HashMap::with_capacity(snakes.len() + ladders.len());

        let declared = snakes.iter().map(|&pair| (pair, LinkKind::Snake))
            .chain(ladders.iter().map(|&pair| (pair, LinkKind::Ladder)));

        for ((from, to), kind) in declared {
            let reject = |reason| GameError::Configuration { from, to, reason };
            if check_cell(from).is_err() || check_cell(to).is_err() {
                return Err(reject("cell outside the board"));
            }
            if from == to {
                return Err(reject("link leads back to its own cell"));
            }
            if from == LAST_CELL {
                return Err(reject("the final cell cannot start a link"));
            }
            let link = Link::new(from, to);
            if link.kind() != kind {
                return Err(match kind {
                    LinkKind::Snake => reject("snake must lead down the board"),
                    LinkKind::Ladder => reject("ladder must lead up the board"),
                });
            }
            if links.insert(from, link).is_some() {
                return Err(reject("cell already starts another link"));
            }
        }

        if let Some(link) = links.values().find(|link| links.contains_key(&link.to())) {
            return Err(GameError::Configuration {
                from: link.from(),
                to: link.to(),
                reason: "destination is itself a link source",
            });
        }

        Ok(Board { links })
    }

    /// Where a token that stops on `cell` ends up after any snake or ladder.
    /// The table holds no chains, so one lookup is final.
    pub fn resolve_landing(&self, cell: u8) -> Result<u8, GameError> {
        let cell = check_cell(cell)?;
        Ok(self.links.get(&cell).map_or(cell, |link| link.to()))
    }

    pub fn to_grid_position(&self, cell: u8) -> Result<GridPosition, GameError> {
        GridPosition::from_cell(cell)
    }

    pub fn from_grid_position(&self, position: GridPosition) -> Result<u8, GameError> {
        position.to_cell()
    }

    pub fn link_at(&self, cell: u8) -> Option<Link> {
        self.links.get(&cell).copied()
    }

    /// All links, ordered by source cell.
    pub fn links(&self) -> Vec<Link> {
        let mut links: Vec<Link> = self.links.values().copied().collect();
        links.sort_unstable_by_key(|link| link.from());
        links
    }

    pub fn snakes(&self) -> Vec<Link> {
        self.links().into_iter().filter(|link| link.kind() == LinkKind::Snake).collect()
    }

    pub fn ladders(&self) -> Vec<Link> {
        self.links().into_iter().filter(|link| link.kind() == LinkKind::Ladder).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::classic()
    }
}
