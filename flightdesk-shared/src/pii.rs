use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

const MASK: &str = "********";

/// A wrapper for secrets (SMTP passwords, tokens) that masks its value in Debug and Display output.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Only log macros are guarded; serialized config dumps still need the value.
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Replaces all but the last `visible` characters with `*`, e.g. for phone numbers in logs.
pub fn mask_tail(value: &str, visible: usize) -> String {
    let total = value.chars().count();
    let hidden = total.saturating_sub(visible);

    value
        .chars()
        .enumerate()
        .map(|(i, c)| if i < hidden { '*' } else { c })
        .collect()
}
