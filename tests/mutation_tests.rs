use strictvec::{catch_fatal, StrictVec, StrictVecError, Unwind};

type TestVec = StrictVec<i32, Unwind>;

fn filled(count: i32) -> TestVec {
    let mut vec = TestVec::new();
    for i in 0..count {
        vec.push(i);
    }
    vec
}

#[test]
fn test_get_and_set() {
    let mut vec = filled(10);

    for i in 0..10 {
        vec.set(i, (i * 100) as i32);
    }
    for i in 0..10 {
        assert_eq!(vec.get(i), (i * 100) as i32);
    }
}

#[test]
fn test_set_leaves_other_indices() {
    let mut vec = filled(5);
    vec.set(2, -7);
    assert_eq!(vec.as_slice(), &[0, 1, -7, 3, 4]);
}

#[test]
fn test_get_out_of_range_is_fatal() {
    let vec = filled(3);
    assert_eq!(
        catch_fatal(|| vec.get(3)),
        Err(StrictVecError::IndexOutOfRange {
            index: 3,
            length: 3
        })
    );
    assert!(catch_fatal(|| vec.get(usize::MAX)).is_err());
}

#[test]
fn test_get_beyond_length_within_capacity_is_fatal() {
    let vec = TestVec::with_capacity(10);
    assert!(catch_fatal(|| vec.get(0)).is_err());
    assert!(catch_fatal(|| vec.get(9)).is_err());
}

#[test]
fn test_set_out_of_range_is_fatal() {
    let mut vec = filled(2);
    assert!(catch_fatal(|| vec.set(2, 100)).is_err());
    assert_eq!(vec.as_slice(), &[0, 1]);
}

#[test]
fn test_insert_into_middle() {
    let mut vec = filled(5);
    vec.insert(2, 25);

    assert_eq!(vec.len(), 6);
    assert_eq!(vec.as_slice(), &[0, 1, 25, 2, 3, 4]);
}

#[test]
fn test_insert_front_repeatedly() {
    let mut vec = TestVec::new();
    for i in 0..10 {
        vec.insert(0, i);
    }
    assert_eq!(vec.as_slice(), &[9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
}

#[test]
fn test_insert_at_end_matches_push() {
    let mut inserted = filled(7);
    let mut pushed = filled(7);

    for value in 100..120 {
        let end = inserted.len();
        inserted.insert(end, value);
        pushed.push(value);
    }

    assert_eq!(inserted.as_slice(), pushed.as_slice());
    assert_eq!(inserted.capacity(), pushed.capacity());
}

#[test]
fn test_insert_into_unallocated_grows_from_floor() {
    let mut vec = TestVec::new();
    vec.insert(0, 1);
    assert_eq!(vec.capacity(), 2);

    vec.insert(1, 2);
    vec.insert(1, 3);
    assert_eq!(vec.capacity(), 4);
    assert_eq!(vec.as_slice(), &[1, 3, 2]);
}

#[test]
fn test_insert_when_full_doubles() {
    let mut vec = TestVec::with_capacity(3);
    vec.push(1);
    vec.push(2);
    vec.push(3);

    vec.insert(1, 9);

    assert_eq!(vec.capacity(), 6);
    assert_eq!(vec.as_slice(), &[1, 9, 2, 3]);
}

#[test]
fn test_insert_out_of_range_is_fatal() {
    let mut vec = filled(3);
    assert_eq!(
        catch_fatal(|| vec.insert(4, 0)),
        Err(StrictVecError::IndexOutOfRange {
            index: 4,
            length: 3
        })
    );
    assert_eq!(vec.as_slice(), &[0, 1, 2]);
}

#[test]
fn test_delete_from_middle() {
    let mut vec = filled(6);
    vec.delete(1);

    assert_eq!(vec.len(), 5);
    assert_eq!(vec.as_slice(), &[0, 2, 3, 4, 5]);
}

#[test]
fn test_delete_first_and_last() {
    let mut vec = filled(4);
    vec.delete(0);
    assert_eq!(vec.as_slice(), &[1, 2, 3]);

    let last = vec.len() - 1;
    vec.delete(last);
    assert_eq!(vec.as_slice(), &[1, 2]);
}

#[test]
fn test_delete_keeps_capacity() {
    let mut vec = filled(20);
    let capacity = vec.capacity();

    while !vec.is_empty() {
        vec.delete(0);
    }

    assert_eq!(vec.capacity(), capacity);
}

#[test]
fn test_delete_out_of_range_is_fatal() {
    let mut vec = filled(2);
    assert!(catch_fatal(|| vec.delete(2)).is_err());

    let mut empty = TestVec::new();
    assert_eq!(
        catch_fatal(|| empty.delete(0)),
        Err(StrictVecError::IndexOutOfRange {
            index: 0,
            length: 0
        })
    );
}

#[test]
fn test_insert_then_delete_restores() {
    let mut vec = filled(8);
    let before: Vec<i32> = vec.iter().copied().collect();

    vec.insert(3, 77);
    assert_eq!(vec.get(3), 77);
    vec.delete(3);

    assert_eq!(vec.as_slice(), before.as_slice());
}

#[test]
fn test_try_variants_do_not_mutate_on_error() {
    let mut vec: StrictVec<i32> = [1, 2, 3].into_iter().collect();

    assert!(vec.try_set(3, 0).is_err());
    assert!(vec.try_insert(5, 0).is_err());
    assert!(vec.try_delete(3).is_err());

    assert_eq!(vec.as_slice(), &[1, 2, 3]);
    assert_eq!(vec.try_get(1), Ok(2));
}
