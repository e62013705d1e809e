//! Products

use std::fmt;

use serde::Deserialize;

/// External integer product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Create a new product id. No range check is performed here; see [`ProductId::is_valid`].
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Return the raw id
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Product ids must be strictly positive to reference a product.
    pub const fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
