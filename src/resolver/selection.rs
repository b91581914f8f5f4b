use super::Skip;

/// How one candidate is chosen when a lookup returns several assets or holders.
///
/// The service returns candidates in its own order and only the first page is
/// read, so `First` trusts that a single issuer controls the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Selection {
    /// Take the first candidate returned.
    #[default]
    First,
    /// Require exactly one candidate; several is an ambiguous skip.
    Unique,
}

impl Selection {
    /// `Ok(None)` when there are no candidates at all.
    pub fn pick<I>(self, candidates: I, what: &'static str) -> Result<Option<I::Item>, Skip>
    where
        I: IntoIterator,
    {
        let mut candidates = candidates.into_iter();
        let first = candidates.next();
        match self {
            Selection::First => Ok(first),
            Selection::Unique => {
                let rest = candidates.count();
                if rest > 0 {
                    Err(Skip::Ambiguous {
                        what,
                        count: rest + 1,
                    })
                } else {
                    Ok(first)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_takes_service_order() {
        let picked = Selection::First.pick(vec!["b", "a", "c"], "holder").unwrap();
        assert_eq!(picked, Some("b"));
    }

    #[test]
    fn test_empty_is_none_for_both_policies() {
        let empty: Vec<&str> = vec![];
        assert_eq!(Selection::First.pick(empty.clone(), "holder").unwrap(), None);
        assert_eq!(Selection::Unique.pick(empty, "holder").unwrap(), None);
    }

    #[test]
    fn test_unique_rejects_several() {
        assert_eq!(Selection::Unique.pick(vec![1], "token").unwrap(), Some(1));
        match Selection::Unique.pick(vec![1, 2, 3], "token") {
            Err(Skip::Ambiguous { what, count }) => {
                assert_eq!(what, "token");
                assert_eq!(count, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
