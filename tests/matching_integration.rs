//! Integration tests for the combination search and report rendering.

mod support;

use std::collections::HashSet;

use talent_match::matching::{
    find_combinations, format_combinations, Combination, CombinationSearch, RequiredSkills,
};
use talent_match::pipeline::Matcher;
use talent_match::profile::{Profile, ProfileStore};

fn marketplace_store() -> ProfileStore {
    serde_json::from_str(support::PROFILES).expect("Fixture should parse")
}

fn ids(combinations: &[Combination]) -> Vec<Vec<&str>> {
    combinations
        .iter()
        .map(|c| c.ids().iter().map(String::as_str).collect())
        .collect()
}

#[test]
fn complementary_specialists_are_combined() {
    let store = marketplace_store();
    let required = RequiredSkills::new(["unity", "blender"]);

    let result = find_combinations(&store, &required);
    assert_eq!(ids(&result), vec![vec!["f1", "f2"], vec!["f2", "f4"]]);
}

#[test]
fn single_skill_yields_single_profiles() {
    let store = marketplace_store();
    let required = RequiredSkills::new(["unity"]);

    let result = find_combinations(&store, &required);
    assert_eq!(ids(&result), vec![vec!["f1"], vec!["f4"]]);
}

#[test]
fn duplicates_and_whitespace_are_normalized() {
    let store = marketplace_store();
    let required = RequiredSkills::new([" unity ", "unity", "solidity\n"]);

    let result = find_combinations(&store, &required);
    assert_eq!(ids(&result), vec![vec!["f1", "f4"], vec!["f4"]]);
}

#[test]
fn missing_skill_yields_no_combinations() {
    let store = marketplace_store();
    let required = RequiredSkills::new(["unity", "rust"]);

    assert!(find_combinations(&store, &required).is_empty());
}

#[test]
fn empty_requirement_yields_exactly_the_empty_combination() {
    let store = marketplace_store();
    let required = RequiredSkills::new(Vec::<String>::new());

    let result = find_combinations(&store, &required);
    assert_eq!(result, vec![Combination::default()]);
}

#[test]
fn report_shows_company_reviews() {
    let store = marketplace_store();
    let required = RequiredSkills::new(["unity", "blender"]);
    let combinations = find_combinations(&store, &required);

    let report = format_combinations(&store, &combinations, "Acme Studios");
    assert!(report.starts_with("Combination (1):\n- ID: f1, Name: Alice Chen, Profession: Game Developer"));
    assert!(report.contains("\n\nCombination (2):\n"));
    assert!(report.contains("    - blender:\n      - Beautiful assets"));
    assert!(report.contains("    - c#: Level 4"));

    let other = format_combinations(&store, &combinations, "Globex");
    assert!(!other.contains("Beautiful assets"));
}

#[test]
fn matcher_respects_limit() {
    let store = marketplace_store();
    let result = Matcher::new(&store, "Acme Studios")
        .with_limit(Some(1))
        .match_skills(&["unity", "blender"]);

    assert_eq!(ids(&result.outcome.combinations), vec![vec!["f1", "f2"]]);
    assert!(result.outcome.truncated);
    assert!(!result.report.contains("Combination (2)"));
}

/// Deterministic pseudo-random stores for property checks.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) % bound
    }
}

const SKILL_POOL: [&str; 6] = ["rust", "go", "python", "unity", "figma", "sql"];

fn random_store(rng: &mut Lcg, size: usize) -> ProfileStore {
    (0..size)
        .map(|i| {
            let skill_count = rng.next(3);
            let profile = (0..skill_count).fold(Profile::new(format!("P{i}"), "Dev"), |p, _| {
                let skill = SKILL_POOL[rng.next(SKILL_POOL.len() as u64) as usize];
                p.with_skill(skill, 1 + rng.next(5) as u32)
            });
            (format!("p{i:02}"), profile)
        })
        .collect()
}

#[test]
fn search_properties_hold_on_generated_stores() {
    for seed in 1..40 {
        let mut rng = Lcg(seed);
        let store = random_store(&mut rng, 8);
        let required: RequiredSkills = (0..1 + rng.next(3))
            .map(|_| SKILL_POOL[rng.next(SKILL_POOL.len() as u64) as usize])
            .collect();

        let order: Vec<&str> = store.ids().collect();
        let result = CombinationSearch::new(&store, &required).run();
        assert!(!result.truncated);

        for combination in &result.combinations {
            // Soundness: the union covers every required skill.
            let union: HashSet<&str> = combination
                .ids()
                .iter()
                .flat_map(|id| store.get(id).unwrap().skill_names())
                .collect();
            for skill in required.names() {
                assert!(union.contains(skill.as_str()), "seed {seed}: {skill} uncovered");
            }

            // Pruning: every member offers at least one required skill.
            for id in combination.ids() {
                let profile = store.get(id).unwrap();
                assert!(
                    profile.skill_names().any(|s| required.contains(s)),
                    "seed {seed}: useless member {id}"
                );
            }

            // Strictly increasing enumeration order, hence no duplicates.
            let positions: Vec<usize> = combination
                .ids()
                .iter()
                .map(|id| order.iter().position(|o| o == id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "seed {seed}");
        }

        // Distinct paths never produce the same combination twice.
        let unique: HashSet<&Combination> = result.combinations.iter().collect();
        assert_eq!(unique.len(), result.combinations.len(), "seed {seed}");
    }
}
