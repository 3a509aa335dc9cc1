use thiserror::Error;

use crate::menu::popup::PopupId;

/// Errors returned by the public menu API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// The popup is not a root of the layer, or it was already closed.
    #[error("popup {0} is not open")]
    NotOpen(PopupId),
}
