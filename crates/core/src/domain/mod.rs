pub mod analysis;
pub mod chat;
pub mod date_range;
pub mod form;
pub mod quiz;

use serde::{Deserialize, Deserializer};

// Backend payloads send `null` for fields they could not fill.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
