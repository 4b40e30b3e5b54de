/// Outcome of a fan-out where every item is fetched independently.
///
/// Successes keep the order of the input, failures remember the index they were issued at,
/// so callers decide per query whether a failed item is dropped or replaced.
#[derive(Debug)]
pub struct PartialResult<T, E> {
    pub items: Vec<T>,
    pub failures: Vec<(usize, E)>,
}

impl<T, E> FromIterator<Result<T, E>> for PartialResult<T, E> {
    fn from_iter<I: IntoIterator<Item = Result<T, E>>>(iter: I) -> Self {
        let mut items = Vec::new();
        let mut failures = Vec::new();
        for (index, result) in iter.into_iter().enumerate() {
            match result {
                Ok(item) => items.push(item),
                Err(err) => failures.push((index, err)),
            }
        }
        Self { items, failures }
    }
}
