use thiserror::Error;

/// Failures that stop an analysis outright.
///
/// Problems that only make the resulting commands unfit for upload are not
/// errors; they are collected as [`crate::Issue`]s in a [`crate::Report`].
#[derive(Error, Debug)]
pub enum MapError {
    #[error("Invalid territory id '{element_id}': expected Territory_<number>")]
    InvalidTerritoryId { element_id: String },
    #[error("No group labelled 'penalty' found; create a layer named \"Penalties\" first")]
    MissingPenaltyGroup,
    #[error("The map contains no Territory_ elements")]
    NoTerritories,
    #[error(transparent)]
    Svg(#[from] wzsvg::SvgError),
}
