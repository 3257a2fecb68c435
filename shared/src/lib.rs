pub mod error;
pub mod shift;
pub mod staff;
pub mod weights;

pub use error::{OptimizeError, OptimizeResult};
pub use shift::{decode, default_glyph, is_star_glyph, ShiftKind, GLYPH_UNAVAILABLE, GLYPH_WORK_BACKUP};
pub use staff::{PeriodBoundary, Staff};
pub use weights::{PenaltyWeights, SolverSettings};
