//! Validates the direction model, domain bitsets, and rule symmetry

use tileweave::analysis::adjacency::{AdjacencyRules, Direction, DomainSet};

#[test]
fn test_inverse_pairs_are_involutions() {
    for direction in Direction::ALL {
        assert_eq!(direction.inverse().inverse(), direction);
        assert_ne!(direction.inverse(), direction);
    }
    assert_eq!(Direction::North.inverse(), Direction::South);
    assert_eq!(Direction::West.inverse(), Direction::East);
}

#[test]
fn test_offsets_of_inverse_directions_cancel() {
    for direction in Direction::ALL {
        let (dx, dy) = direction.offset();
        let (ix, iy) = direction.inverse().offset();
        assert_eq!((dx + ix, dy + iy), (0, 0));
    }
}

#[test]
fn test_direction_indices_are_distinct() {
    let mut seen = [false; 4];
    for direction in Direction::ALL {
        let index = direction.index();
        assert!(!seen[index]);
        seen[index] = true;
    }
}

#[test]
fn test_domain_set_membership() {
    let mut set = DomainSet::empty(8);
    assert!(set.is_empty());
    assert!(set.insert(3));
    assert!(!set.insert(3));
    set.insert(5);
    assert!(set.contains(3));
    assert!(set.contains(5));
    assert!(!set.contains(4));
    assert_eq!(set.count(), 2);
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![3, 5]);
}

#[test]
fn test_domain_set_intersection() {
    let mut left = DomainSet::empty(6);
    left.insert(1);
    left.insert(3);
    left.insert(5);
    let mut right = DomainSet::empty(6);
    right.insert(3);
    right.insert(4);
    right.insert(5);
    left.intersect_with(&right);
    assert_eq!(left.iter().collect::<Vec<_>>(), vec![3, 5]);
}

#[test]
fn test_full_set_contains_everything() {
    let set = DomainSet::full(4);
    assert_eq!(set.count(), 4);
    assert_eq!(set.domain_len(), 4);
}

#[test]
fn test_allow_records_the_mirror_edge() {
    let mut rules = AdjacencyRules::new(5);
    rules.allow(1, Direction::East, 2);
    assert!(rules.contains(1, Direction::East, 2));
    assert!(rules.contains(2, Direction::West, 1));
    assert!(!rules.contains(1, Direction::West, 2));
    assert!(rules.is_symmetric());
}

#[test]
fn test_symmetry_holds_over_many_insertions() {
    let mut rules = AdjacencyRules::new(7);
    for tile in 0..7 {
        for direction in Direction::ALL {
            rules.allow(tile, direction, (tile * 3 + direction.index()) % 7);
        }
    }
    assert!(rules.is_symmetric());
}

#[test]
fn test_count_matches_membership() {
    let mut rules = AdjacencyRules::new(4);
    rules.allow(0, Direction::North, 1);
    rules.allow(0, Direction::North, 2);
    rules.allow(0, Direction::North, 2);
    assert_eq!(rules.count(0, Direction::North), 2);
    assert_eq!(rules.count(0, Direction::South), 0);
    assert_eq!(rules.domain_len(), 4);
}

#[test]
#[should_panic(expected = "exceeds domain width")]
fn test_allow_outside_domain_is_fatal() {
    let mut rules = AdjacencyRules::new(2);
    rules.allow(2, Direction::North, 0);
}
