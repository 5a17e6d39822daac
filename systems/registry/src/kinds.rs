//! Built-in placeable kinds shipped with the editor.
//!
//! Each kind is a plain struct holding the authoring state the editor
//! persists (position and uniform scale); sprites and gameplay stats
//! live outside this core. The [`standard_kinds`] table is the single
//! place new kinds are added.

use tower_defence_core::Position;

use crate::{Capability, Placeable, PlaceableFactory};

/// Complete registration list of the built-in placeable kinds.
///
/// Order is significant: it fixes palette layout and keeps kind
/// enumeration deterministic across runs.
#[must_use]
pub fn standard_kinds() -> [(&'static str, &'static [Capability], PlaceableFactory); 11] {
    [
        ("Tower.Plot", &[Capability::Tower], tower_plot),
        ("Tower.Archer", &[Capability::Tower], archer_tower),
        ("Decoration.Tree", &[Capability::Decoration], decoration_tree),
        ("Decoration.Rock", &[Capability::Decoration], decoration_rock),
        ("Path.LR", &[Capability::PathTile], path_lr),
        ("Path.UD", &[Capability::PathTile], path_ud),
        ("Path.LD", &[Capability::PathTile], path_ld),
        ("Path.LU", &[Capability::PathTile], path_lu),
        ("Path.RD", &[Capability::PathTile], path_rd),
        ("Path.RU", &[Capability::PathTile], path_ru),
        ("Enemy.BasicOrk", &[Capability::Enemy], basic_ork),
    ]
}

macro_rules! placeable_impl {
    ($type:ty, $name:expr) => {
        impl Placeable for $type {
            fn kind_name(&self) -> &'static str {
                $name
            }

            fn position(&self) -> Position {
                self.position
            }

            fn set_position(&mut self, position: Position) {
                self.position = position;
            }

            fn scale(&self) -> f32 {
                self.scale
            }

            fn set_scale(&mut self, scale: f32) {
                self.scale = scale;
            }

            fn clone_boxed(&self) -> Box<dyn Placeable> {
                Box::new(self.clone())
            }
        }
    };
}

/// Empty plot a tower can later be constructed on.
#[derive(Clone, Debug, PartialEq)]
pub struct TowerPlot {
    position: Position,
    scale: f32,
}

impl TowerPlot {
    /// Creates a plot at the provided position and scale.
    #[must_use]
    pub const fn new(position: Position, scale: f32) -> Self {
        Self { position, scale }
    }
}

placeable_impl!(TowerPlot, "Tower.Plot");

/// Archer tower placed directly into the level.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcherTower {
    position: Position,
    scale: f32,
}

impl ArcherTower {
    /// Creates an archer tower at the provided position and scale.
    #[must_use]
    pub const fn new(position: Position, scale: f32) -> Self {
        Self { position, scale }
    }
}

placeable_impl!(ArcherTower, "Tower.Archer");

/// Visual style applied to a decoration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecorationStyle {
    /// Tree sprite.
    Tree,
    /// Rock sprite.
    Rock,
}

/// Non-interactive scenery object.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoration {
    style: DecorationStyle,
    position: Position,
    scale: f32,
}

impl Decoration {
    /// Creates a decoration with the provided style, position and scale.
    #[must_use]
    pub const fn new(style: DecorationStyle, position: Position, scale: f32) -> Self {
        Self {
            style,
            position,
            scale,
        }
    }

    /// Style rendered for this decoration.
    #[must_use]
    pub const fn style(&self) -> DecorationStyle {
        self.style
    }
}

impl Placeable for Decoration {
    fn kind_name(&self) -> &'static str {
        match self.style {
            DecorationStyle::Tree => "Decoration.Tree",
            DecorationStyle::Rock => "Decoration.Rock",
        }
    }

    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn scale(&self) -> f32 {
        self.scale
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    fn clone_boxed(&self) -> Box<dyn Placeable> {
        Box::new(self.clone())
    }
}

/// Entry/exit sides connected by a path tile sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathOrientation {
    /// Straight tile connecting the left and right edges.
    LeftRight,
    /// Straight tile connecting the top and bottom edges.
    UpDown,
    /// Corner tile connecting the left and bottom edges.
    LeftDown,
    /// Corner tile connecting the left and top edges.
    LeftUp,
    /// Corner tile connecting the right and bottom edges.
    RightDown,
    /// Corner tile connecting the right and top edges.
    RightUp,
}

/// Tile composing the visible walk path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathTile {
    orientation: PathOrientation,
    position: Position,
    scale: f32,
}

impl PathTile {
    /// Creates a path tile with the provided orientation, position and scale.
    #[must_use]
    pub const fn new(orientation: PathOrientation, position: Position, scale: f32) -> Self {
        Self {
            orientation,
            position,
            scale,
        }
    }

    /// Orientation of the tile's connected edges.
    #[must_use]
    pub const fn orientation(&self) -> PathOrientation {
        self.orientation
    }
}

impl Placeable for PathTile {
    fn kind_name(&self) -> &'static str {
        match self.orientation {
            PathOrientation::LeftRight => "Path.LR",
            PathOrientation::UpDown => "Path.UD",
            PathOrientation::LeftDown => "Path.LD",
            PathOrientation::LeftUp => "Path.LU",
            PathOrientation::RightDown => "Path.RD",
            PathOrientation::RightUp => "Path.RU",
        }
    }

    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn scale(&self) -> f32 {
        self.scale
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    fn clone_boxed(&self) -> Box<dyn Placeable> {
        Box::new(self.clone())
    }
}

/// Baseline enemy available to the wave composition editor.
#[derive(Clone, Debug, PartialEq)]
pub struct BasicOrk {
    position: Position,
    scale: f32,
}

impl BasicOrk {
    /// Creates a basic ork at the provided position and scale.
    #[must_use]
    pub const fn new(position: Position, scale: f32) -> Self {
        Self { position, scale }
    }
}

placeable_impl!(BasicOrk, "Enemy.BasicOrk");

/// Factory for [`TowerPlot`].
#[must_use]
pub fn tower_plot(position: Position, scale: f32) -> Box<dyn Placeable> {
    Box::new(TowerPlot::new(position, scale))
}

/// Factory for [`ArcherTower`].
#[must_use]
pub fn archer_tower(position: Position, scale: f32) -> Box<dyn Placeable> {
    Box::new(ArcherTower::new(position, scale))
}

/// Factory for a tree [`Decoration`].
#[must_use]
pub fn decoration_tree(position: Position, scale: f32) -> Box<dyn Placeable> {
    Box::new(Decoration::new(DecorationStyle::Tree, position, scale))
}

/// Factory for a rock [`Decoration`].
#[must_use]
pub fn decoration_rock(position: Position, scale: f32) -> Box<dyn Placeable> {
    Box::new(Decoration::new(DecorationStyle::Rock, position, scale))
}

/// Factory for a left-right [`PathTile`].
#[must_use]
pub fn path_lr(position: Position, scale: f32) -> Box<dyn Placeable> {
    Box::new(PathTile::new(PathOrientation::LeftRight, position, scale))
}

/// Factory for an up-down [`PathTile`].
#[must_use]
pub fn path_ud(position: Position, scale: f32) -> Box<dyn Placeable> {
    Box::new(PathTile::new(PathOrientation::UpDown, position, scale))
}

/// Factory for a left-down [`PathTile`].
#[must_use]
pub fn path_ld(position: Position, scale: f32) -> Box<dyn Placeable> {
    Box::new(PathTile::new(PathOrientation::LeftDown, position, scale))
}

/// Factory for a left-up [`PathTile`].
#[must_use]
pub fn path_lu(position: Position, scale: f32) -> Box<dyn Placeable> {
    Box::new(PathTile::new(PathOrientation::LeftUp, position, scale))
}

/// Factory for a right-down [`PathTile`].
#[must_use]
pub fn path_rd(position: Position, scale: f32) -> Box<dyn Placeable> {
    Box::new(PathTile::new(PathOrientation::RightDown, position, scale))
}

/// Factory for a right-up [`PathTile`].
#[must_use]
pub fn path_ru(position: Position, scale: f32) -> Box<dyn Placeable> {
    Box::new(PathTile::new(PathOrientation::RightUp, position, scale))
}

/// Factory for [`BasicOrk`].
#[must_use]
pub fn basic_ork(position: Position, scale: f32) -> Box<dyn Placeable> {
    Box::new(BasicOrk::new(position, scale))
}
