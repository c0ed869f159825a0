//! Serde support for [`Secret`].
//!
//! Secrets deserialize transparently but deliberately do not implement
//! `Serialize`: a value that must leave the process should be exposed first,
//! at the call site, where the leak is visible in review.

use serde::{Deserialize, Deserializer};

use crate::{Secret, Strategy};

impl<'de, S, I> Deserialize<'de> for Secret<S, I>
where
    S: Deserialize<'de>,
    I: Strategy<S>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        S::deserialize(deserializer).map(Self::new)
    }
}
