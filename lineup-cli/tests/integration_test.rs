//! Integration tests for the lineup picker
//!
//! Tests the full stack: CSV ingestion, formation parsing and roster
//! selection under every sort mode

use lineup_core::{
    parse_formation, AgeDirection, LineupError, Orientation, PlayerPool, PlayerRecord, Position,
    Quotas, Roster, RosterSelector, SortChoice, SortMode,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// A full squad with two players short up front
fn squad_csv() -> String {
    let mut csv = String::from("Player,Position,Age,Skill,Nationality\n");
    let rows = [
        ("Pickford", "Goalkeeper", 30, 82),
        ("Ramsdale", "Goalkeeper", 26, 80),
        ("Pope", "Goalkeeper", 32, 81),
        ("Walker", "Defender", 34, 84),
        ("Stones", "Defender", 30, 86),
        ("Guehi", "Defender", 24, 82),
        ("Shaw", "Defender", 29, 83),
        ("Trippier", "Defender", 34, 84),
        ("Maguire", "Defender", 31, 80),
        ("Rice", "Midfielder", 25, 88),
        ("Bellingham", "Midfielder", 21, 90),
        ("Mainoo", "Midfielder", 19, 79),
        ("Foden", "Midfielder", 24, 88),
        ("Gallagher", "Midfielder", 24, 80),
        ("Kane", "Forward", 31, 90),
        ("Saka", "Forward", 23, 87),
    ];
    for (name, position, age, skill) in rows {
        csv.push_str(&format!("{},{},{},{},England\n", name, position, age, skill));
    }
    csv
}

fn load_squad() -> PlayerPool {
    PlayerPool::from_reader(squad_csv().as_bytes()).expect("squad should load")
}

fn names(roster: &Roster<'_>) -> Vec<String> {
    roster.players().map(|p| p.name().to_string()).collect()
}

fn position_blocks(roster: &Roster<'_>) -> Vec<Position> {
    let mut blocks: Vec<Position> = roster.entries().iter().map(|e| e.position).collect();
    blocks.dedup();
    blocks
}

fn fixed_orientation(orientation: Orientation) -> impl FnMut() -> lineup_core::Result<Orientation> {
    move || -> lineup_core::Result<Orientation> { Ok(orientation) }
}

fn fixed_age(direction: AgeDirection) -> impl FnMut() -> lineup_core::Result<AgeDirection> {
    move || -> lineup_core::Result<AgeDirection> { Ok(direction) }
}

// ============================================================================
// FORMATION TESTS
// ============================================================================

#[test]
fn test_formation_to_quotas() {
    let mut resolver = fixed_orientation(Orientation::Forward);
    assert_eq!(parse_formation("4-3-3", &mut resolver).unwrap().as_array(), [1, 4, 3, 3]);
    assert_eq!(parse_formation("4-3-2-1", &mut resolver).unwrap().as_array(), [1, 4, 3, 3]);

    let mut resolver = fixed_orientation(Orientation::Midfielder);
    assert_eq!(parse_formation("4-3-2-1", &mut resolver).unwrap().as_array(), [1, 4, 5, 1]);
}

#[test]
fn test_formation_errors() {
    let mut resolver = fixed_orientation(Orientation::Forward);
    for bad in ["4.4.2", "4x4x2", "4", "4321"] {
        assert!(matches!(
            parse_formation(bad, &mut resolver),
            Err(LineupError::InvalidFormat(_))
        ));
    }
    for bad in ["4-4-3", "2-4-4", "1-4-5"] {
        assert!(matches!(
            parse_formation(bad, &mut resolver),
            Err(LineupError::InvalidQuota(_))
        ));
    }
}

// ============================================================================
// SELECTION TESTS
// ============================================================================

#[test]
fn test_pick_by_skill() {
    let pool = load_squad();
    let quotas = parse_formation("4-3-3", &mut fixed_orientation(Orientation::Forward)).unwrap();
    let mut selector = RosterSelector::new(ChaCha8Rng::seed_from_u64(1));

    let roster = selector
        .select(pool.players(), &quotas, SortChoice::Skill, &mut fixed_age(AgeDirection::Old))
        .unwrap();

    assert_eq!(
        names(&roster),
        vec![
            "Pickford", "Stones", "Walker", "Trippier", "Shaw", "Bellingham", "Rice", "Foden",
            "Kane", "Saka",
        ]
    );
    // Only two forwards in the squad
    assert_eq!(roster.len(), 10);
    assert_eq!(roster.at(Position::Forward).count(), 2);

    // Extra columns travel with the record
    assert_eq!(roster.players().next().unwrap().get("Nationality"), Some("England"));
}

#[test]
fn test_pick_by_skill_is_idempotent() {
    let pool = load_squad();
    let quotas = Quotas::new(4, 4, 2);
    let mut selector = RosterSelector::seeded(None);

    let first = selector.select_with_mode(pool.players(), &quotas, SortMode::BySkillDesc).unwrap();
    let second = selector.select_with_mode(pool.players(), &quotas, SortMode::BySkillDesc).unwrap();
    assert_eq!(names(&first), names(&second));
}

#[test]
fn test_pick_by_age() {
    let pool = load_squad();
    let quotas = Quotas::new(3, 2, 1);
    let mut selector = RosterSelector::seeded(Some(5));

    let young = selector
        .select(pool.players(), &quotas, SortChoice::Age, &mut fixed_age(AgeDirection::Young))
        .unwrap();
    assert_eq!(
        names(&young),
        vec!["Ramsdale", "Guehi", "Shaw", "Stones", "Mainoo", "Bellingham", "Saka"]
    );

    let old = selector
        .select(pool.players(), &quotas, SortChoice::Age, &mut fixed_age(AgeDirection::Old))
        .unwrap();
    assert_eq!(
        names(&old),
        vec!["Pope", "Walker", "Trippier", "Maguire", "Rice", "Foden", "Kane"]
    );
}

#[test]
fn test_pick_random() {
    let pool = load_squad();
    let quotas = Quotas::new(5, 4, 1);

    for seed in 0..20 {
        let mut selector = RosterSelector::new(ChaCha8Rng::seed_from_u64(seed));
        let roster = selector.select_with_mode(pool.players(), &quotas, SortMode::Random).unwrap();

        for position in Position::ALL {
            let picked: Vec<&PlayerRecord> = roster.at(position).collect();
            let available = pool.players().iter().filter(|p| p.plays(position)).count();
            assert_eq!(picked.len(), quotas.get(position).min(available));
            assert!(picked.iter().all(|p| p.plays(position)));

            let mut seen: Vec<&str> = picked.iter().map(|p| p.name()).collect();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), picked.len(), "duplicate pick with seed {}", seed);
        }
    }
}

#[test]
fn test_top_four_of_eleven_defenders() {
    let skills = [90, 10, 50, 70, 50, 20, 90, 30, 60, 40, 80];
    let players: Vec<PlayerRecord> = skills
        .iter()
        .enumerate()
        .map(|(i, skill)| {
            PlayerRecord::from_pairs([
                ("Player", format!("D{}", i)),
                ("Position", "Defender".to_string()),
                ("Age", "25".to_string()),
                ("Skill", skill.to_string()),
            ])
        })
        .collect();

    let roster = RosterSelector::seeded(Some(0))
        .select_with_mode(&players, &Quotas::new(4, 3, 3), SortMode::BySkillDesc)
        .unwrap();

    assert_eq!(names(&roster), vec!["D0", "D6", "D10", "D3"]);
}

#[test]
fn test_blocks_follow_roster_order() {
    let pool = load_squad();
    let quotas = Quotas::new(4, 4, 2);

    for mode in [
        SortMode::BySkillDesc,
        SortMode::ByAge(AgeDirection::Young),
        SortMode::ByAge(AgeDirection::Old),
        SortMode::Random,
    ] {
        let roster = RosterSelector::seeded(Some(11))
            .select_with_mode(pool.players(), &quotas, mode)
            .unwrap();
        assert_eq!(position_blocks(&roster), Position::ALL.to_vec(), "{:?}", mode);
    }
}

#[test]
fn test_malformed_age_is_reported() {
    let csv = "Player,Position,Age,Skill\nKeeper,Goalkeeper,unknown,70\n";
    let pool = PlayerPool::from_reader(csv.as_bytes()).unwrap();

    let mut selector = RosterSelector::seeded(Some(0));
    let err = selector
        .select(
            pool.players(),
            &Quotas::new(4, 4, 2),
            SortChoice::Age,
            &mut fixed_age(AgeDirection::Young),
        )
        .unwrap_err();
    assert!(matches!(err, LineupError::MalformedPlayerRecord { ref field, .. } if field == "Age"));
}

#[test]
fn test_sort_choice_validation() {
    for code in ["1", "2", "3"] {
        assert_eq!(code.parse::<SortChoice>().unwrap().code().to_string(), code);
    }
    assert!(matches!("4".parse::<SortChoice>(), Err(LineupError::InvalidSortOption(_))));
    assert!(matches!("abc".parse::<SortChoice>(), Err(LineupError::InvalidSortOption(_))));
}
