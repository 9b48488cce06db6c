use std::collections::BTreeMap;

/// One `:func arg*` occurrence seen while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub name: String, // Function symbol including the leading ':'
    pub arity: usize,
}

/// Call sites recorded during a single parse, in completion order
///
/// Append-only and not deduplicated: a call nested inside another call's
/// arguments is recorded before the call that contains it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallSites {
    sites: Vec<CallSite>,
}

impl CallSites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str, arity: usize) {
        tracing::trace!(name, arity, "call site");
        self.sites.push(CallSite {
            name: name.to_string(),
            arity,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &CallSite> {
        self.sites.iter()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Functions called with more than one distinct argument count,
    /// sorted by name, each with its sorted arities
    pub fn arity_conflicts(&self) -> Vec<(&str, Vec<usize>)> {
        let mut arities: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for site in &self.sites {
            let seen = arities.entry(site.name.as_str()).or_default();
            if !seen.contains(&site.arity) {
                seen.push(site.arity);
            }
        }

        arities
            .into_iter()
            .filter(|(_, seen)| seen.len() > 1)
            .map(|(name, mut seen)| {
                seen.sort_unstable();
                (name, seen)
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a CallSites {
    type Item = &'a CallSite;
    type IntoIter = std::slice::Iter<'a, CallSite>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.iter()
    }
}
