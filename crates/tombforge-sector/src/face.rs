/// Horizontal direction across a sector edge. North is +Z, East is +X.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Sector offset `(dx, dz)` of the neighbour across this edge.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }
}

/// Which edge (or the diagonal) a vertical face sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallSide {
    North,
    South,
    East,
    West,
    Diagonal,
}

impl From<Direction> for WallSide {
    fn from(d: Direction) -> Self {
        match d {
            Direction::North => WallSide::North,
            Direction::South => WallSide::South,
            Direction::East => WallSide::East,
            Direction::West => WallSide::West,
        }
    }
}

/// Vertical sub-face of a wall, bottom to top: ED, QA, Middle, WS, RF.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallPart {
    QA,
    ED,
    Middle,
    RF,
    WS,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockFace {
    NorthQA,
    NorthED,
    NorthMiddle,
    NorthRF,
    NorthWS,
    SouthQA,
    SouthED,
    SouthMiddle,
    SouthRF,
    SouthWS,
    EastQA,
    EastED,
    EastMiddle,
    EastRF,
    EastWS,
    WestQA,
    WestED,
    WestMiddle,
    WestRF,
    WestWS,
    DiagonalQA,
    DiagonalED,
    DiagonalMiddle,
    DiagonalRF,
    DiagonalWS,
    Floor,
    FloorTriangle2,
    Ceiling,
    CeilingTriangle2,
}

impl BlockFace {
    pub const COUNT: usize = 29;

    pub const ALL: [BlockFace; BlockFace::COUNT] = [
        BlockFace::NorthQA,
        BlockFace::NorthED,
        BlockFace::NorthMiddle,
        BlockFace::NorthRF,
        BlockFace::NorthWS,
        BlockFace::SouthQA,
        BlockFace::SouthED,
        BlockFace::SouthMiddle,
        BlockFace::SouthRF,
        BlockFace::SouthWS,
        BlockFace::EastQA,
        BlockFace::EastED,
        BlockFace::EastMiddle,
        BlockFace::EastRF,
        BlockFace::EastWS,
        BlockFace::WestQA,
        BlockFace::WestED,
        BlockFace::WestMiddle,
        BlockFace::WestRF,
        BlockFace::WestWS,
        BlockFace::DiagonalQA,
        BlockFace::DiagonalED,
        BlockFace::DiagonalMiddle,
        BlockFace::DiagonalRF,
        BlockFace::DiagonalWS,
        BlockFace::Floor,
        BlockFace::FloorTriangle2,
        BlockFace::Ceiling,
        BlockFace::CeilingTriangle2,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn wall(side: WallSide, part: WallPart) -> Self {
        let base = match side {
            WallSide::North => 0,
            WallSide::South => 5,
            WallSide::East => 10,
            WallSide::West => 15,
            WallSide::Diagonal => 20,
        };
        let off = match part {
            WallPart::QA => 0,
            WallPart::ED => 1,
            WallPart::Middle => 2,
            WallPart::RF => 3,
            WallPart::WS => 4,
        };
        Self::ALL[base + off]
    }

    #[inline]
    pub fn is_wall(self) -> bool {
        self.index() < BlockFace::Floor.index()
    }

    #[inline]
    pub fn is_floor(self) -> bool {
        matches!(self, BlockFace::Floor | BlockFace::FloorTriangle2)
    }

    #[inline]
    pub fn is_ceiling(self) -> bool {
        matches!(self, BlockFace::Ceiling | BlockFace::CeilingTriangle2)
    }
}
