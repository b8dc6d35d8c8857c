use serde::{Deserialize, Serialize};

/// A named skill. Identity is the exact, case-sensitive `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub verified: bool,
}

impl Skill {
    pub fn new(name: impl Into<String>, verified: bool) -> Self {
        Self {
            name: name.into(),
            verified,
        }
    }

    pub fn verified(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn pending(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    /// Required skills with no verified counterpart, in required order.
    pub missing: Vec<Skill>,
}

/// Decide whether a volunteer holding `possessed` may apply to a mission
/// demanding `required`.
///
/// The `verified` flag on required entries is ignored; only the volunteer's
/// copy has to be verified. Repeated required names are checked one by one.
pub fn evaluate(required: &[Skill], possessed: &[Skill]) -> EligibilityResult {
    let missing: Vec<Skill> = required
        .iter()
        .filter(|wanted| {
            !possessed
                .iter()
                .any(|held| held.verified && held.name == wanted.name)
        })
        .cloned()
        .collect();

    EligibilityResult {
        eligible: missing.is_empty(),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_requirements_are_always_met() {
        let result = evaluate(&[], &[Skill::pending("Cooking")]);
        assert!(result.eligible);
        assert!(result.missing.is_empty());

        let result = evaluate(&[], &[]);
        assert!(result.eligible);
    }

    #[test]
    fn verified_match_ignores_required_flag() {
        let required = vec![Skill::pending("First Aid")];
        let possessed = vec![Skill::verified("First Aid")];
        let result = evaluate(&required, &possessed);
        assert!(result.eligible);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn pending_skill_does_not_count() {
        let required = vec![Skill::pending("First Aid")];
        let possessed = vec![Skill::pending("First Aid")];
        let result = evaluate(&required, &possessed);
        assert!(!result.eligible);
        assert_eq!(result.missing, vec![Skill::pending("First Aid")]);
    }

    #[test]
    fn reports_only_unmatched_requirements() {
        let required = vec![Skill::pending("A"), Skill::pending("B")];
        let possessed = vec![Skill::verified("A")];
        let result = evaluate(&required, &possessed);
        assert!(!result.eligible);
        assert_eq!(result.missing, vec![Skill::pending("B")]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let required = vec![Skill::pending("First Aid")];
        let possessed = vec![Skill::verified("first aid")];
        let result = evaluate(&required, &possessed);
        assert!(!result.eligible);
        assert_eq!(result.missing.len(), 1);

        let padded = vec![Skill::verified("First Aid ")];
        assert!(!evaluate(&required, &padded).eligible);
    }

    #[test]
    fn missing_keeps_order_and_duplicates() {
        let required = vec![
            Skill::pending("C"),
            Skill::verified("A"),
            Skill::pending("C"),
            Skill::pending("B"),
        ];
        let possessed = vec![Skill::verified("A"), Skill::pending("B")];
        let result = evaluate(&required, &possessed);
        assert_eq!(
            result.missing,
            vec![Skill::pending("C"), Skill::pending("C"), Skill::pending("B")]
        );
    }

    #[test]
    fn a_later_verified_duplicate_satisfies_the_requirement() {
        let required = vec![Skill::pending("Driving")];
        let possessed = vec![Skill::pending("Driving"), Skill::verified("Driving")];
        assert!(evaluate(&required, &possessed).eligible);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let required = vec![Skill::pending("A"), Skill::pending("B")];
        let possessed = vec![Skill::verified("B")];
        let first = evaluate(&required, &possessed);
        let second = evaluate(&required, &possessed);
        assert_eq!(first, second);
    }

    #[test]
    fn eligible_iff_every_requirement_has_verified_match() {
        let names = ["A", "B", "C"];
        let pool: Vec<Skill> = names
            .iter()
            .flat_map(|n| [Skill::verified(*n), Skill::pending(*n)])
            .collect();

        // Every subset of the pool as possessed, every subset of names as required.
        for possessed_mask in 0u32..(1 << pool.len()) {
            let possessed: Vec<Skill> = pool
                .iter()
                .enumerate()
                .filter(|(i, _)| possessed_mask & (1 << i) != 0)
                .map(|(_, s)| s.clone())
                .collect();

            for required_mask in 0u32..(1 << names.len()) {
                let required: Vec<Skill> = names
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| required_mask & (1 << i) != 0)
                    .map(|(_, n)| Skill::pending(*n))
                    .collect();

                let result = evaluate(&required, &possessed);
                let expected = required
                    .iter()
                    .all(|r| possessed.iter().any(|p| p.verified && p.name == r.name));
                assert_eq!(result.eligible, expected);
                assert!(result.missing.iter().all(|m| required.contains(m)));
            }
        }
    }
}
