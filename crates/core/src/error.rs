use thiserror::Error;

use crate::model::QuizFormatError;
use crate::route::RouteError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    QuizFormat(#[from] QuizFormatError),
    #[error(transparent)]
    Route(#[from] RouteError),
}
