//! Compiled-in maze layouts
//!
//! Codes: 0 empty, 1 wall, 2 dot, 3 power pellet, 4 tunnel.

use serde::{Deserialize, Serialize};

/// Which maze a round is played on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Classic,
    Bonus,
}

impl LayoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Classic => "classic",
            LayoutKind::Bonus => "bonus",
        }
    }
}

impl std::str::FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(LayoutKind::Classic),
            "bonus" => Ok(LayoutKind::Bonus),
            other => Err(format!("unknown layout '{other}' (expected classic or bonus)")),
        }
    }
}

pub const LAYOUT_WIDTH: usize = 19;
pub const LAYOUT_HEIGHT: usize = 19;

#[rustfmt::skip]
pub const CLASSIC: [[u8; LAYOUT_WIDTH]; LAYOUT_HEIGHT] = [
    [1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
    [1,2,2,2,2,2,2,2,2,1,2,2,2,2,2,2,2,2,1],
    [1,2,1,1,2,1,1,1,2,1,2,1,1,1,2,1,1,2,1],
    [1,3,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,3,1],
    [1,2,1,1,2,1,2,1,1,1,1,1,2,1,2,1,1,2,1],
    [1,2,2,2,2,1,2,2,2,1,2,2,2,1,2,2,2,2,1],
    [1,1,1,1,2,1,1,1,0,1,0,1,1,1,2,1,1,1,1],
    [1,1,1,1,2,1,0,0,0,0,0,0,0,1,2,1,1,1,1],
    [4,0,0,0,2,0,0,1,1,0,1,1,0,0,2,0,0,0,4],
    [1,1,1,1,2,1,0,1,0,0,0,1,0,1,2,1,1,1,1],
    [1,1,1,1,2,1,0,1,1,1,1,1,0,1,2,1,1,1,1],
    [1,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,1],
    [1,2,1,1,2,1,1,1,2,1,2,1,1,1,2,1,1,2,1],
    [1,3,2,1,2,2,2,2,2,2,2,2,2,2,2,1,2,3,1],
    [1,1,2,1,2,1,2,1,1,1,1,1,2,1,2,1,2,1,1],
    [1,2,2,2,2,1,2,2,2,1,2,2,2,1,2,2,2,2,1],
    [1,2,1,1,1,1,1,1,2,1,2,1,1,1,1,1,1,2,1],
    [1,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,1],
    [1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
];

/// Wall pattern stamped into the top of the bonus maze ('X' wall, '_' open)
const BONUS_PATTERN: [&str; 5] = [
    "XXX_XXX__X_XXX_XXX_XXX",
    "X___X____X_X_X_X___X_X",
    "X___XXX__X_X_X_XXX_X_X",
    "X_____X__X_X_X_X_X_X_X",
    "XXX_XXX__X_XXX_XXX_XXX",
];

/// Number of dot rows below the tunnel in the bonus maze
const BONUS_TRAILING_DOT_ROWS: usize = 9;

/// Layout table for a maze kind
pub fn table(layout: LayoutKind) -> Vec<Vec<u8>> {
    match layout {
        LayoutKind::Classic => CLASSIC.iter().map(|row| row.to_vec()).collect(),
        LayoutKind::Bonus => expand_pattern(&BONUS_PATTERN, LAYOUT_WIDTH),
    }
}

/// Expand a text pattern into a bordered maze: a dot row, the pattern, a dot
/// row, the tunnel row, trailing dot rows, all framed by walls.
///
/// Pattern lines are clipped or padded (with open cells) to the interior
/// width so the result is always `width` columns wide.
pub fn expand_pattern(pattern: &[&str], width: usize) -> Vec<Vec<u8>> {
    let interior = width.saturating_sub(2);
    let framed = |inner: Vec<u8>| {
        let mut row = Vec::with_capacity(width);
        row.push(1);
        row.extend(inner);
        row.push(1);
        row
    };
    let dots_row = framed(vec![2; interior]);

    let mut maze = Vec::with_capacity(pattern.len() + BONUS_TRAILING_DOT_ROWS + 5);
    maze.push(vec![1; width]);
    maze.push(dots_row.clone());

    for line in pattern {
        let mut inner: Vec<u8> = line
            .chars()
            .take(interior)
            .map(|ch| if ch == 'X' { 1 } else { 0 })
            .collect();
        inner.resize(interior, 0);
        maze.push(framed(inner));
    }

    maze.push(dots_row.clone());

    let mut tunnel = vec![0; width];
    if let Some(first) = tunnel.first_mut() {
        *first = 4;
    }
    if let Some(last) = tunnel.last_mut() {
        *last = 4;
    }
    maze.push(tunnel);

    for _ in 0..BONUS_TRAILING_DOT_ROWS {
        maze.push(dots_row.clone());
    }
    maze.push(vec![1; width]);

    log::debug!(
        "Expanded {}-line pattern into a {}x{} maze",
        pattern.len(),
        width,
        maze.len()
    );
    maze
}
