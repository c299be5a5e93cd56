//! Sector grid geometry.
//!
//! The galaxy is split into `grid_size x grid_size` equal cells. A point
//! belongs to the cell its coordinates fall in after flooring; points on
//! the far edge of the galaxy are clamped into the last row or column, so
//! every point maps to exactly one cell.

/// Row prefixes, cycled with a numeric suffix past the last letter.
const GREEK_LETTERS: [&str; 24] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
    "Lambda", "Mu", "Nu", "Xi", "Omicron", "Pi", "Rho", "Sigma", "Tau", "Upsilon", "Phi", "Chi",
    "Psi", "Omega",
];

/// Cell dimensions for one galaxy and grid size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorLayout {
    grid_size: u32,
    cell_width: f64,
    cell_height: f64,
}

impl SectorLayout {
    /// Layout for a `width x height` galaxy. `None` if any argument is zero.
    pub fn new(width: u32, height: u32, grid_size: u32) -> Option<Self> {
        if width == 0 || height == 0 || grid_size == 0 {
            return None;
        }
        Some(Self {
            grid_size,
            cell_width: f64::from(width) / f64::from(grid_size),
            cell_height: f64::from(height) / f64::from(grid_size),
        })
    }

    /// Cells per side.
    pub const fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Horizontal extent of one cell.
    pub const fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// Vertical extent of one cell.
    pub const fn cell_height(&self) -> f64 {
        self.cell_height
    }

    /// `(grid_x, grid_y)` of the cell holding a point.
    pub fn cell_of(&self, x: f64, y: f64) -> (u32, u32) {
        (
            self.axis_index(x, self.cell_width),
            self.axis_index(y, self.cell_height),
        )
    }

    /// `(x_min, x_max, y_min, y_max)` of a cell.
    pub fn cell_bounds(&self, grid_x: u32, grid_y: u32) -> (f64, f64, f64, f64) {
        let x = f64::from(grid_x);
        let y = f64::from(grid_y);
        (
            x * self.cell_width,
            (x + 1.0) * self.cell_width,
            y * self.cell_height,
            (y + 1.0) * self.cell_height,
        )
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn axis_index(&self, value: f64, cell: f64) -> u32 {
        let last = self.grid_size.saturating_sub(1);
        let raw = (value / cell).floor();
        if raw.is_nan() || raw <= 0.0 {
            0
        } else {
            (raw as u32).min(last)
        }
    }
}

/// Display name of a cell: the row's Greek letter and the one-based column,
/// e.g. "Beta-3". Rows past Omega repeat the alphabet with a cycle number,
/// so row 25 is "Beta-1-4" in column 4.
pub fn sector_name(grid_x: u32, grid_y: u32) -> String {
    let letters = u32::try_from(GREEK_LETTERS.len()).unwrap_or(u32::MAX);
    let letter = grid_y
        .checked_rem(letters)
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| GREEK_LETTERS.get(i))
        .copied()
        .unwrap_or("Alpha");
    let column = grid_x.saturating_add(1);
    match grid_y.checked_div(letters) {
        Some(cycle) if cycle > 0 => format!("{letter}-{cycle}-{column}"),
        _ => format!("{letter}-{column}"),
    }
}
