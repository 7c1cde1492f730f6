use thiserror::Error;

#[derive(Error, Debug)]
pub enum CallError {
    #[error("Alignment failed: {0}")]
    Alignment(String),

    #[error("Alignment failed for every panel entry")]
    AllAlignmentsFailed,

    #[error(
        "Coordinate walk from column {column} exhausted its retry budget \
         (requested displacement {displacement})"
    )]
    CoordinateOverflow { column: usize, displacement: i64 },
}
