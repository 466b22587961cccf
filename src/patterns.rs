use crate::grid::WIDTH;

/// A seed bitmap, one byte per column with bit 0 at the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub columns: &'static [u8],
}

impl Pattern {
    /// Fails to build when used in a const and the pattern is wider than the
    /// playfield.
    pub const fn new(name: &'static str, columns: &'static [u8]) -> Self {
        assert!(columns.len() <= WIDTH, "pattern wider than the playfield");
        Pattern { name, columns }
    }

    pub const fn width(&self) -> usize {
        self.columns.len()
    }
}

pub const GLIDER: Pattern = Pattern::new("glider", &[0x8, 0x4, 0x1c]);
pub const LWSS: Pattern = Pattern::new("lightweight spaceship", &[0xa, 0x1, 0x1, 0x9, 0x7]);
pub const R_PENTOMINO: Pattern = Pattern::new("r-pentomino", &[0x4, 0xe, 0x2]);
pub const DIEHARD: Pattern = Pattern::new("diehard", &[0x4, 0xc, 0x0, 0x0, 0x0, 0x8, 0xa, 0x8]);
pub const ACORN: Pattern = Pattern::new("acorn", &[0x8, 0xc, 0x0, 0x4, 0x8, 0x8, 0x8, 0x8]);

/// Built-in seeds in the order the middle key cycles through them.
pub static PATTERNS: [Pattern; 5] = [GLIDER, LWSS, R_PENTOMINO, DIEHARD, ACORN];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_fits_the_default_placement() {
        let config = crate::Config::default();
        for pattern in PATTERNS {
            assert!(config.seed_column + pattern.width() <= WIDTH, "{}", pattern.name);
        }
    }

    #[test]
    fn cell_counts() {
        let cells = |p: Pattern| p.columns.iter().map(|c| c.count_ones()).sum::<u32>();
        assert_eq!(cells(GLIDER), 5);
        assert_eq!(cells(LWSS), 9);
        assert_eq!(cells(R_PENTOMINO), 5);
        assert_eq!(cells(DIEHARD), 7);
        assert_eq!(cells(ACORN), 8);
    }
}
