use super::*;

fn id(n: i64) -> DoorId {
    DoorId::new(n).unwrap()
}

#[test]
fn calendar_date_gates_by_day() {
    let policy = AccessPolicy::default();
    assert_eq!(policy.resolve_day(5), 5);
    for n in 1..=5 {
        assert!(policy.permits(id(n), 5), "door {n}");
    }
    for n in 6..=31 {
        assert!(!policy.permits(id(n), 5), "door {n}");
    }
}

#[test]
fn today_is_clamped() {
    let policy = AccessPolicy::default();
    assert_eq!(policy.resolve_day(0), 1);
    assert_eq!(policy.resolve_day(40), 31);
}

#[test]
fn all_doors_unlocks_everything() {
    let policy = AccessPolicy::new(true, Some(2));
    assert_eq!(policy.resolve_day(1), 31);
    for n in 1..=31 {
        assert!(policy.permits(id(n), 1));
    }
}

#[test]
fn test_day_overrides_calendar() {
    let policy = AccessPolicy::new(false, Some(10));
    assert_eq!(policy.resolve_day(25), 10);
    assert!(policy.permits(id(10), 25));
    assert!(!policy.permits(id(11), 25));

    // And can unlock ahead of the real date.
    assert!(policy.permits(id(10), 1));
}

#[test]
fn test_day_is_clamped_on_construction() {
    assert_eq!(AccessPolicy::new(false, Some(0)).test_day, Some(1));
    assert_eq!(AccessPolicy::new(false, Some(-4)).test_day, Some(1));
    assert_eq!(AccessPolicy::new(false, Some(99)).test_day, Some(31));
    assert_eq!(AccessPolicy::new(false, None).test_day, None);
}

#[test]
fn gate_matches_door_can_open() {
    use crate::door::geometry::NormalizedRect;
    use crate::door::machine::Door;
    use crate::door::model::{AnimationStyle, Payload};

    let policy = AccessPolicy::new(false, Some(12));
    for n in 1..=31 {
        let door = Door::new(
            id(n),
            NormalizedRect {
                x: 0.0,
                y: 0.0,
                w: 0.1,
                h: 0.1,
            },
            Payload::parse("star"),
            AnimationStyle::Slide,
        );
        assert_eq!(
            policy.permits(door.id(), 3),
            door.can_open(policy.resolve_day(3))
        );
    }
}
