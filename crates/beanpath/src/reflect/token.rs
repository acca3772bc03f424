//! One step of a property path: `items[2].sku` → name `items`, index `2`,
//! children `sku`.

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathToken<'a> {
    name:         &'a str,
    indexed_name: &'a str,
    index:        Option<&'a str>,
    children:     &'a str,
}

impl<'a> PathToken<'a> {
    /// Split off the first segment of `expr`.
    pub fn parse(expr: &'a str) -> Result<Self, Error> {
        if expr.is_empty() {
            return Err(Error::invalid_path(expr, "empty path"));
        }
        let (segment, children) = match expr.split_once('.') {
            Some((segment, rest)) => (segment, rest),
            None                  => (expr, ""),
        };
        if segment.is_empty() {
            return Err(Error::invalid_path(expr, "empty segment"));
        }

        let (name, index) = match segment.find('[') {
            Some(open) => {
                let Some(inner) = segment[open + 1..].strip_suffix(']') else {
                    return Err(Error::invalid_path(expr, "unclosed `[`"));
                };
                (&segment[..open], Some(inner))
            }
            None => (segment, None),
        };
        if name.is_empty() {
            return Err(Error::invalid_path(expr, "index without a property name"));
        }

        Ok(Self { name, indexed_name: segment, index, children })
    }

    /// Property name without any index suffix.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Property name including the `[..]` suffix, when present.
    pub fn indexed_name(&self) -> &'a str {
        self.indexed_name
    }

    /// Contents of the brackets. Opaque here: a sequence position or a map key.
    pub fn index(&self) -> Option<&'a str> {
        self.index
    }

    /// The unconsumed rest of the path, empty on the last segment.
    pub fn children(&self) -> &'a str {
        self.children
    }

    pub fn has_next(&self) -> bool {
        !self.children.is_empty()
    }

    /// Token for the next segment, if any.
    pub fn next(&self) -> Option<Result<PathToken<'a>, Error>> {
        self.has_next().then(|| PathToken::parse(self.children))
    }
}
