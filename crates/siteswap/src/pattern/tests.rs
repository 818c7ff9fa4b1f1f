use super::*;
use crate::params::{HandRole, Layout};
use crate::state::CollisionError;

#[test]
fn classic_patterns_are_valid() {
    assert!(is_valid(&[3, 3, 3], 3, 1, false));
    assert!(is_valid(&[5, 3, 1], 3, 1, false));
    assert!(is_valid(&[4, 4, 1], 3, 1, false));
    assert!(is_valid(&[4, 2, 0], 2, 1, false));
    assert!(is_valid(&[8, 6, 2, 7, 7], 7, 1, false));
    assert!(is_valid(&[3], 3, 1, false));
}

#[test]
fn average_is_checked_first() {
    assert_eq!(
        check_validity(&[5, 4], 4, Layout::SOLO),
        Err(ValidityError::Average {
            sum: 9,
            expected: 8
        })
    );
    // right objects, wrong count claimed
    assert!(!is_valid(&[3, 3, 3], 2, 1, false));
}

#[test]
fn collisions_and_open_cycles_are_rejected() {
    // 9 7 7 7 5: throws from positions 0 and 2 land together.
    assert!(!is_valid(&[9, 7, 7, 7, 5], 7, 1, false));
    // 3 2 1 has the right average but all three throws land together.
    let err = check_validity(&[3, 2, 1], 2, Layout::SOLO).unwrap_err();
    assert!(matches!(
        err,
        ValidityError::Collision {
            cause: CollisionError::Occupied { .. },
            ..
        }
    ));
    // 8 1 3: the 8 and the 3 meet on the same position of a later period.
    assert_eq!(
        check_validity(&[8, 1, 3], 4, Layout::SOLO),
        Err(ValidityError::OpenCycle)
    );
}

#[test]
fn short_period_with_high_throws_is_fine() {
    // period shorter than the heights involved
    assert!(is_valid(&[9, 1], 5, 1, false));
    assert!(is_valid(&[7], 7, 1, false));
}

#[test]
fn sync_rules() {
    // Two jugglers in sync: 4 4 is a valid two-object-per-juggler pattern.
    assert!(is_valid(&[4, 4], 4, 2, true));
    // A 1 from the first slot would land in the same beat.
    assert_eq!(
        check_validity(&[1, 3], 2, Layout::new(2, true)),
        Err(ValidityError::SameBeat { position: 0 })
    );
    // Period must cover whole beats.
    assert!(matches!(
        check_validity(&[3, 3, 3], 3, Layout::new(2, true)),
        Err(ValidityError::PartialBeat { .. })
    ));
}

#[test]
fn canonical_rotation_is_lexicographically_smallest() {
    let s: Siteswap = "86277".parse().unwrap();
    assert_eq!(s.canonical().heights(), &[2, 7, 7, 8, 6]);
    assert!(s.canonical().is_canonical());
    assert!(!s.is_canonical());
    assert!(s.is_rotation_of(&s.rotated(3)));
    let t: Siteswap = "531".parse().unwrap();
    assert!(!s.is_rotation_of(&t));
}

#[test]
fn sync_canonical_rotates_by_whole_beats() {
    let s = Siteswap::new(vec![6, 2, 4, 4], Layout::new(2, true));
    // rotating by one slot would give 2 4 4 6, which is not beat-aligned
    assert_eq!(s.canonical().heights(), &[4, 4, 6, 2]);
}

#[test]
fn display_and_parse() {
    let s: Siteswap = "a,b,3".parse().unwrap();
    assert_eq!(s.heights(), &[10, 11, 3]);
    assert_eq!(s.to_string(), "ab3");
    let s: Siteswap = "9 7 5".parse().unwrap();
    assert_eq!(s.heights(), &[9, 7, 5]);
    let s = Siteswap::parse_with("(4,4)(6,2)", Layout::new(2, true)).unwrap();
    assert_eq!(s.heights(), &[4, 4, 6, 2]);
    assert_eq!(s.to_string(), "(4,4)(6,2)");
    assert_eq!(Siteswap::solo(vec![40, 2]).to_string(), "40,2");
    assert_eq!("".parse::<Siteswap>(), Err(SiteswapParseError::Empty));
    assert!(matches!(
        "3?3".parse::<Siteswap>(),
        Err(SiteswapParseError::InvalidThrow { .. })
    ));
}

#[test]
fn objects_and_roles() {
    let s: Siteswap = "441".parse().unwrap();
    assert_eq!(s.number_of_objects(), Some(3));
    assert!(s.is_valid(3));
    assert_eq!("54".parse::<Siteswap>().unwrap().number_of_objects(), None);
    assert!(s.throws().all(|t| t.role.is_none()));
    let sync = Siteswap::new(vec![4, 4, 0, 2], Layout::new(2, true));
    let roles: Vec<_> = sync.throws().map(|t| t.role).collect();
    assert_eq!(
        roles,
        vec![
            Some(HandRole::Straight),
            Some(HandRole::Straight),
            Some(HandRole::Hold),
            Some(HandRole::Cross)
        ]
    );
}
