use std::fmt;

/// Separates mutually exclusive options in a converter side (`w/b➪$`).
pub const ALTERNATIVE_SEPARATOR: char = '/';

/// A single value or a choice between at least two options.
///
/// A one-element choice is always normalized to [`Alternatives::Single`], so
/// `Options` means the notation offered the player a real choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Alternatives<T> {
    Single(T),
    Options(Vec<T>),
}

impl<T> Alternatives<T> {
    /// Build from a list, normalizing one element to `Single`. Returns `None`
    /// for an empty list.
    pub fn from_vec(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self::from_nonempty(items))
        }
    }

    fn from_nonempty(items: Vec<T>) -> Self {
        match <[T; 1]>::try_from(items) {
            Ok([only]) => Alternatives::Single(only),
            Err(items) => Alternatives::Options(items),
        }
    }

    /// Split `s` on `/` and parse every piece. The first failure aborts.
    pub fn parse_with<E, F>(s: &str, mut parse: F) -> Result<Self, E>
    where
        F: FnMut(&str) -> Result<T, E>,
    {
        let items = s
            .split(ALTERNATIVE_SEPARATOR)
            .map(&mut parse)
            .collect::<Result<Vec<T>, E>>()?;
        Ok(Self::from_nonempty(items))
    }

    /// The unambiguous value, or `None` when the player has a choice.
    pub fn single(&self) -> Option<&T> {
        match self {
            Alternatives::Single(item) => Some(item),
            Alternatives::Options(_) => None,
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Alternatives::Single(_))
    }

    /// Number of options (1 for `Single`).
    pub fn len(&self) -> usize {
        match self {
            Alternatives::Single(_) => 1,
            Alternatives::Options(items) => items.len(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Alternatives::Single(item) => std::slice::from_ref(item).iter(),
            Alternatives::Options(items) => items.iter(),
        }
    }

    /// Combine every option of `self` with every option of `other`.
    ///
    /// Two singles combine directly. Otherwise the result lists the Cartesian
    /// product with `self` as the outer loop and `other` as the inner one, so
    /// it has `self.len() * other.len()` options.
    pub fn product_with<U, V, E, F>(
        &self,
        other: &Alternatives<U>,
        mut combine: F,
    ) -> Result<Alternatives<V>, E>
    where
        F: FnMut(&T, &U) -> Result<V, E>,
    {
        if let (Alternatives::Single(a), Alternatives::Single(b)) = (self, other) {
            return combine(a, b).map(Alternatives::Single);
        }
        let mut combined = Vec::with_capacity(self.len() * other.len());
        for a in self.iter() {
            for b in other.iter() {
                combined.push(combine(a, b)?);
            }
        }
        Ok(Alternatives::from_nonempty(combined))
    }
}

impl<T: fmt::Display> fmt::Display for Alternatives<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "{ALTERNATIVE_SEPARATOR}")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}
